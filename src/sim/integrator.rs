use nalgebra::Vector3;

use crate::vehicle::RocketDesign;

use super::state::RocketState;

// ---------------------------------------------------------------------------
// Semi-implicit Euler integrator
// ---------------------------------------------------------------------------

/// Advance the state by one timestep under the given net force.
///
/// Velocity is updated first and the position update uses the new velocity
/// (semi-implicit Euler). Mass depletes at the design's constant flow rate
/// while the burn lasts and is pinned at dry mass from burnout on, so step
/// rounding never leaves a sliver of propellant.
pub fn euler_step(
    state: &mut RocketState,
    net_force: Vector3<f64>,
    design: &RocketDesign,
    dt: f64,
) {
    let accel = net_force / state.mass;
    state.vel += accel * dt;
    state.pos += state.vel * dt;

    if state.time < design.burn_time_s {
        state.mass = (state.mass - design.mass_flow_rate() * dt)
            .clamp(design.dry_mass, design.initial_mass);
    }

    state.time += dt;
    if state.time >= design.burn_time_s {
        state.mass = design.dry_mass;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
