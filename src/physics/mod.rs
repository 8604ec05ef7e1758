pub mod atmosphere;
pub mod forces;

/// Standard gravity at the surface, m/s^2.
pub const G0: f64 = 9.80665;
