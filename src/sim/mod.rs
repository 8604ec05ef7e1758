pub mod integrator;
pub mod runner;
pub mod state;

pub use integrator::euler_step;
pub use runner::{simulate, Flight, PreflightReport, SimConfig, TerminationReason};
pub use state::{RocketState, Sample};
