pub mod csv;
pub mod summary;

pub use csv::{write_samples, write_samples_file};
pub use summary::{write_summary, write_summary_file, FlightSummary};
