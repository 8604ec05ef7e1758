use nalgebra::Vector3;

use crate::physics::{atmosphere, G0};

/// Uniform gravity force on a body of the given mass (inertial frame, ENU).
/// Always points straight down.
pub fn gravity_force(mass: f64) -> Vector3<f64> {
    Vector3::new(0.0, 0.0, -mass * G0)
}

/// Thrust force along a fixed unit direction. Active while `elapsed` is
/// strictly below `burn_time_s`; zero at and after burnout.
///
/// `direction` must already be normalized (the vehicle design guarantees it).
pub fn thrust_force(
    thrust_n: f64,
    direction: &Vector3<f64>,
    elapsed: f64,
    burn_time_s: f64,
) -> Vector3<f64> {
    if elapsed < burn_time_s {
        direction * thrust_n
    } else {
        Vector3::zeros()
    }
}

/// Aerodynamic drag force (inertial frame, opposing velocity).
/// Exactly zero below a small speed threshold so a vehicle at rest on the
/// pad sees no spurious force from normalizing a zero vector.
pub fn drag_force(vel: &Vector3<f64>, altitude: f64, cd: f64, area: f64) -> Vector3<f64> {
    let speed = vel.norm();
    if speed > 1e-6 {
        let q_dyn = 0.5 * atmosphere::air_density(altitude) * speed * speed;
        let drag_mag = q_dyn * cd * area;
        -vel.normalize() * drag_mag
    } else {
        Vector3::zeros()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn gravity_points_down() {
        let f = gravity_force(100.0);
        assert_relative_eq!(f.z, -100.0 * G0, max_relative = 1e-12);
        assert_eq!(f.x, 0.0);
        assert_eq!(f.y, 0.0);
    }

    #[test]
    fn thrust_active_during_burn() {
        let dir = Vector3::new(0.0, 0.0, 1.0);
        let f = thrust_force(2_000.0, &dir, 5.0, 11.0);
        assert_relative_eq!(f.z, 2_000.0, max_relative = 1e-12);
        // Direction and magnitude stay fixed for the whole burn.
        assert_eq!(f, thrust_force(2_000.0, &dir, 0.0, 11.0));
        assert_eq!(f, thrust_force(2_000.0, &dir, 10.9, 11.0));
    }

    #[test]
    fn thrust_cuts_off_at_burnout() {
        let dir = Vector3::new(0.0, 0.0, 1.0);
        // Boundary: elapsed == burn_time is already coast.
        assert_eq!(thrust_force(2_000.0, &dir, 11.0, 11.0), Vector3::zeros());
        assert_eq!(thrust_force(2_000.0, &dir, 20.0, 11.0), Vector3::zeros());
    }

    #[test]
    fn drag_opposes_velocity() {
        let vel = Vector3::new(0.0, 0.0, 300.0);
        let f = drag_force(&vel, 0.0, 0.3, 0.01);
        assert!(f.z < 0.0, "Drag should oppose upward velocity");
        assert_eq!(f.x, 0.0);
        assert_eq!(f.y, 0.0);
    }

    #[test]
    fn drag_magnitude_at_sea_level() {
        let vel = Vector3::new(0.0, 0.0, 100.0);
        let f = drag_force(&vel, 0.0, 0.3, 0.01);
        // 0.5 * 1.225 * 100^2 * 0.3 * 0.01
        assert_relative_eq!(f.z, -18.375, max_relative = 1e-12);
    }

    #[test]
    fn no_drag_at_rest() {
        let f = drag_force(&Vector3::zeros(), 0.0, 0.3, 0.01);
        assert_eq!(f, Vector3::zeros());
    }

    #[test]
    fn drag_weakens_with_altitude() {
        let vel = Vector3::new(50.0, 0.0, 200.0);
        let low = drag_force(&vel, 0.0, 0.3, 0.01).norm();
        let high = drag_force(&vel, 20_000.0, 0.3, 0.01).norm();
        assert!(high < low);
    }
}
