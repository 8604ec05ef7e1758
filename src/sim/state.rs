use nalgebra::Vector3;

use crate::vehicle::RocketDesign;

// ---------------------------------------------------------------------------
// Simulation state
// ---------------------------------------------------------------------------

/// Full state vector at a single point in time.
/// Frame: East-North-Up (ENU), origin at the launch site.
#[derive(Debug, Clone)]
pub struct RocketState {
    pub time: f64,            // s, elapsed since ignition
    pub pos: Vector3<f64>,    // m   [East, North, Up]
    pub vel: Vector3<f64>,    // m/s
    pub mass: f64,            // kg  (decreases during burn)
}

impl RocketState {
    /// State at ignition, built from the design's initial conditions.
    pub fn at_ignition(design: &RocketDesign) -> Self {
        Self {
            time: 0.0,
            pos: design.initial_position,
            vel: design.initial_velocity(),
            mass: design.initial_mass,
        }
    }

    /// Height above the launch plane, m.
    pub fn altitude(&self) -> f64 {
        self.pos.z
    }

    /// Velocity magnitude, m/s.
    pub fn speed(&self) -> f64 {
        self.vel.norm()
    }

    /// Snapshot for the output series.
    pub fn sample(&self) -> Sample {
        Sample {
            time: self.time,
            pos: self.pos,
            vel: self.vel,
            mass: self.mass,
            speed: self.speed(),
        }
    }
}

// ---------------------------------------------------------------------------
// Output sample
// ---------------------------------------------------------------------------

/// One recorded snapshot of the state. The ordered sample sequence is the
/// simulation's whole output; `PartialEq` lets tests compare runs directly.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub time: f64,            // s
    pub pos: Vector3<f64>,    // m
    pub vel: Vector3<f64>,    // m/s
    pub mass: f64,            // kg
    pub speed: f64,           // m/s, velocity magnitude
}

impl Sample {
    pub fn altitude(&self) -> f64 {
        self.pos.z
    }
}
