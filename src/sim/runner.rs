use std::fmt;

use crate::physics::forces;
use crate::vehicle::{DesignError, RocketDesign};

use super::integrator::euler_step;
use super::state::{RocketState, Sample};

// ---------------------------------------------------------------------------
// Simulation configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct SimConfig {
    pub dt: f64,              // integration timestep, s
    pub max_duration: f64,    // hard stop, s
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            dt: 0.1,              // 10 Hz
            max_duration: 600.0,  // 10 min ceiling
        }
    }
}

// ---------------------------------------------------------------------------
// Pre-flight check
// ---------------------------------------------------------------------------

/// Advisory liftoff check made once before the loop starts: the vertical
/// thrust component at ignition against the weight of the loaded vehicle.
/// A failing check never stops the run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreflightReport {
    pub vertical_thrust_n: f64,
    pub initial_weight_n: f64,
}

impl PreflightReport {
    /// Ratio of vertical thrust to liftoff weight.
    pub fn vertical_twr(&self) -> f64 {
        self.vertical_thrust_n / self.initial_weight_n
    }

    /// False means the vehicle cannot leave the pad.
    pub fn liftoff_capable(&self) -> bool {
        self.vertical_thrust_n >= self.initial_weight_n
    }
}

impl fmt::Display for PreflightReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "vertical thrust {:.0} N vs liftoff weight {:.0} N (vertical TWR {:.3})",
            self.vertical_thrust_n,
            self.initial_weight_n,
            self.vertical_twr()
        )?;
        if !self.liftoff_capable() {
            write!(f, ", insufficient to lift off")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Termination
// ---------------------------------------------------------------------------

/// Why a run ended. Impact takes precedence when both conditions are met in
/// the same step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// Altitude crossed zero after launch.
    Impact,
    /// max_duration elapsed without ground contact.
    Timeout,
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerminationReason::Impact => write!(f, "impact"),
            TerminationReason::Timeout => write!(f, "timeout"),
        }
    }
}

/// Complete output of one run.
#[derive(Debug, Clone)]
pub struct Flight {
    pub samples: Vec<Sample>,
    pub termination: TerminationReason,
    pub preflight: PreflightReport,
}

// ---------------------------------------------------------------------------
// Full simulation loop
// ---------------------------------------------------------------------------

/// Run a full flight from ignition until ground impact or timeout.
///
/// Validates the design up front and returns the ordered sample series,
/// starting with the ignition state at t = 0. The run is a pure function of
/// its inputs: identical design and config give an identical sample series.
pub fn simulate(design: &RocketDesign, config: &SimConfig) -> Result<Flight, DesignError> {
    design.validate()?;
    debug_assert!(config.dt > 0.0, "timestep must be positive");

    let direction = design.thrust_direction();
    let mut state = RocketState::at_ignition(design);

    let preflight = PreflightReport {
        vertical_thrust_n: forces::thrust_force(
            design.thrust_n,
            &direction,
            0.0,
            design.burn_time_s,
        )
        .z,
        initial_weight_n: forces::gravity_force(design.initial_mass).norm(),
    };

    let capacity = (config.max_duration / config.dt) as usize + 1;
    let mut samples = Vec::with_capacity(capacity.min(100_000));
    samples.push(state.sample());

    let termination = loop {
        let net_force = forces::gravity_force(state.mass)
            + forces::thrust_force(design.thrust_n, &direction, state.time, design.burn_time_s)
            + forces::drag_force(
                &state.vel,
                state.altitude(),
                design.drag_coefficient,
                design.cross_sectional_area_m2,
            );

        euler_step(&mut state, net_force, design, config.dt);
        samples.push(state.sample());

        // Ground impact wins over timeout when a step triggers both. The
        // time > 0 clause keeps a pad start at z = 0 from counting.
        if state.pos.z <= 0.0 && state.time > 0.0 {
            break TerminationReason::Impact;
        }
        if state.time >= config.max_duration {
            break TerminationReason::Timeout;
        }
    };

    Ok(Flight {
        samples,
        termination,
        preflight,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
