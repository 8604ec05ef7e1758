pub mod io;
pub mod physics;
pub mod sim;
pub mod vehicle;

pub use io::FlightSummary;
pub use sim::{simulate, Flight, PreflightReport, SimConfig, TerminationReason};
pub use vehicle::{DesignError, LoadError, RocketDesign};
