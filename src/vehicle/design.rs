use std::fs;
use std::path::Path;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Direction vectors with a norm below this are rejected as degenerate.
const DIRECTION_EPS: f64 = 1e-9;

// ---------------------------------------------------------------------------
// Rocket design record
// ---------------------------------------------------------------------------

/// Immutable description of a single-stage rocket and its launch state.
/// Loaded from a TOML design file or built in code (see [`presets`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RocketDesign {
    pub name: String,
    pub initial_mass: f64,            // kg, propellant included
    pub dry_mass: f64,                // kg
    pub thrust_n: f64,                // N, constant while burning
    pub burn_time_s: f64,             // s
    pub drag_coefficient: f64,
    pub cross_sectional_area_m2: f64, // m^2
    /// Launch pad location, m (ENU, z up). Defaults to the origin.
    #[serde(default = "default_position")]
    pub initial_position: Vector3<f64>,
    /// Speed at ignition along `initial_direction`, m/s. Defaults to 0.
    #[serde(default)]
    pub initial_speed: f64,
    /// Thrust/launch axis, any nonzero magnitude. Defaults to straight up.
    #[serde(default = "default_direction")]
    pub initial_direction: Vector3<f64>,
}

fn default_position() -> Vector3<f64> {
    Vector3::zeros()
}

fn default_direction() -> Vector3<f64> {
    Vector3::new(0.0, 0.0, 1.0)
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A design parameter that fails its physical constraint.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DesignError {
    #[error("initial mass {initial} kg must exceed dry mass {dry} kg")]
    MassOrdering { initial: f64, dry: f64 },

    #[error("dry mass must be positive, got {0} kg")]
    NonPositiveDryMass(f64),

    #[error("thrust must be non-negative, got {0} N")]
    NegativeThrust(f64),

    #[error("burn time must be positive, got {0} s")]
    NonPositiveBurnTime(f64),

    #[error("drag coefficient must be non-negative, got {0}")]
    NegativeDragCoefficient(f64),

    #[error("cross-sectional area must be positive, got {0} m^2")]
    NonPositiveArea(f64),

    #[error("initial speed must be non-negative, got {0} m/s")]
    NegativeInitialSpeed(f64),

    #[error("direction vector must have nonzero magnitude")]
    ZeroDirection,
}

/// Failure to produce a usable design from a file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read design file")]
    Io(#[from] std::io::Error),

    #[error("could not parse design file")]
    Parse(#[from] toml::de::Error),

    #[error("invalid design")]
    Invalid(#[from] DesignError),
}

// ---------------------------------------------------------------------------
// Construction and derived quantities
// ---------------------------------------------------------------------------

impl RocketDesign {
    /// Check every design constraint. `simulate` calls this before any step
    /// runs; the loaders call it after parsing.
    pub fn validate(&self) -> Result<(), DesignError> {
        if self.dry_mass <= 0.0 {
            return Err(DesignError::NonPositiveDryMass(self.dry_mass));
        }
        if self.initial_mass <= self.dry_mass {
            return Err(DesignError::MassOrdering {
                initial: self.initial_mass,
                dry: self.dry_mass,
            });
        }
        if self.thrust_n < 0.0 {
            return Err(DesignError::NegativeThrust(self.thrust_n));
        }
        if self.burn_time_s <= 0.0 {
            return Err(DesignError::NonPositiveBurnTime(self.burn_time_s));
        }
        if self.drag_coefficient < 0.0 {
            return Err(DesignError::NegativeDragCoefficient(self.drag_coefficient));
        }
        if self.cross_sectional_area_m2 <= 0.0 {
            return Err(DesignError::NonPositiveArea(self.cross_sectional_area_m2));
        }
        if self.initial_speed < 0.0 {
            return Err(DesignError::NegativeInitialSpeed(self.initial_speed));
        }
        if self.initial_direction.norm() < DIRECTION_EPS {
            return Err(DesignError::ZeroDirection);
        }
        Ok(())
    }

    pub fn propellant_mass(&self) -> f64 {
        self.initial_mass - self.dry_mass
    }

    /// Constant propellant consumption over the burn, kg/s.
    pub fn mass_flow_rate(&self) -> f64 {
        self.propellant_mass() / self.burn_time_s
    }

    /// Unit vector along the fixed thrust axis. Falls back to straight up for
    /// a degenerate stored vector; `validate` rejects that case before a
    /// simulation can start.
    pub fn thrust_direction(&self) -> Vector3<f64> {
        self.initial_direction
            .try_normalize(DIRECTION_EPS)
            .unwrap_or_else(default_direction)
    }

    /// Velocity vector at ignition.
    pub fn initial_velocity(&self) -> Vector3<f64> {
        self.thrust_direction() * self.initial_speed
    }

    /// Parse a design from TOML text and validate it.
    pub fn from_toml_str(text: &str) -> Result<Self, LoadError> {
        let design: RocketDesign = toml::from_str(text)?;
        design.validate()?;
        Ok(design)
    }

    /// Read, parse, and validate a TOML design file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}

// ---------------------------------------------------------------------------
// Preset designs
// ---------------------------------------------------------------------------

pub mod presets {
    use super::*;

    /// Heavy lifter pitched 45 degrees downrange. Vertical thrust exceeds
    /// liftoff weight by well under 1%, which makes it the stock case for
    /// exercising the pre-flight margin.
    pub fn example_rocket() -> RocketDesign {
        RocketDesign {
            name: "Example Rocket".into(),
            initial_mass: 549_054.0,
            dry_mass: 22_200.0,
            thrust_n: 7_620_000.0,
            burn_time_s: 162.0,
            drag_coefficient: 0.4,
            cross_sectional_area_m2: 10.75,
            initial_position: Vector3::zeros(),
            initial_speed: 0.0,
            initial_direction: Vector3::new(1.0, 0.0, 1.0),
        }
    }

    /// Small sounding rocket launched straight up.
    pub fn small_rocket() -> RocketDesign {
        RocketDesign {
            name: "Small Rocket".into(),
            initial_mass: 30.0,
            dry_mass: 20.0,
            thrust_n: 2_000.0,
            burn_time_s: 11.0,
            drag_coefficient: 0.3,
            cross_sectional_area_m2: 0.007_854,
            initial_position: Vector3::zeros(),
            initial_speed: 0.0,
            initial_direction: Vector3::new(0.0, 0.0, 1.0),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn presets_are_valid() {
        assert!(presets::example_rocket().validate().is_ok());
        assert!(presets::small_rocket().validate().is_ok());
    }

    #[test]
    fn derived_quantities() {
        let design = presets::small_rocket();
        assert_relative_eq!(design.propellant_mass(), 10.0, max_relative = 1e-12);
        assert_relative_eq!(design.mass_flow_rate(), 10.0 / 11.0, max_relative = 1e-12);
    }

    #[test]
    fn thrust_direction_is_normalized() {
        let design = presets::example_rocket();
        let dir = design.thrust_direction();
        assert_relative_eq!(dir.norm(), 1.0, max_relative = 1e-12);
        let inv_sqrt2 = 1.0 / 2.0_f64.sqrt();
        assert_relative_eq!(dir.x, inv_sqrt2, max_relative = 1e-12);
        assert_relative_eq!(dir.z, inv_sqrt2, max_relative = 1e-12);
    }

    #[test]
    fn initial_velocity_scales_direction() {
        let mut design = presets::small_rocket();
        design.initial_speed = 50.0;
        let v = design.initial_velocity();
        assert_relative_eq!(v.z, 50.0, max_relative = 1e-12);
        assert_eq!(v.x, 0.0);
    }

    #[test]
    fn rejects_mass_ordering() {
        let mut design = presets::small_rocket();
        design.initial_mass = design.dry_mass;
        assert!(matches!(
            design.validate(),
            Err(DesignError::MassOrdering { .. })
        ));
    }

    #[test]
    fn rejects_bad_scalars() {
        let base = presets::small_rocket();

        let mut d = base.clone();
        d.dry_mass = 0.0;
        assert!(matches!(d.validate(), Err(DesignError::NonPositiveDryMass(_))));

        let mut d = base.clone();
        d.thrust_n = -1.0;
        assert!(matches!(d.validate(), Err(DesignError::NegativeThrust(_))));

        let mut d = base.clone();
        d.burn_time_s = 0.0;
        assert!(matches!(d.validate(), Err(DesignError::NonPositiveBurnTime(_))));

        let mut d = base.clone();
        d.drag_coefficient = -0.1;
        assert!(matches!(
            d.validate(),
            Err(DesignError::NegativeDragCoefficient(_))
        ));

        let mut d = base.clone();
        d.cross_sectional_area_m2 = 0.0;
        assert!(matches!(d.validate(), Err(DesignError::NonPositiveArea(_))));

        let mut d = base.clone();
        d.initial_speed = -5.0;
        assert!(matches!(
            d.validate(),
            Err(DesignError::NegativeInitialSpeed(_))
        ));
    }

    #[test]
    fn rejects_zero_direction() {
        let mut design = presets::small_rocket();
        design.initial_direction = Vector3::zeros();
        assert!(matches!(design.validate(), Err(DesignError::ZeroDirection)));
    }

    #[test]
    fn parses_full_toml() {
        let text = r#"
            name = "Test Rocket"
            initial_mass = 100.0
            dry_mass = 40.0
            thrust_n = 3000.0
            burn_time_s = 8.0
            drag_coefficient = 0.35
            cross_sectional_area_m2 = 0.02
            initial_position = [10.0, -5.0, 0.0]
            initial_speed = 2.0
            initial_direction = [0.0, 1.0, 3.0]
        "#;
        let design = RocketDesign::from_toml_str(text).unwrap();
        assert_eq!(design.name, "Test Rocket");
        assert_relative_eq!(design.initial_mass, 100.0, max_relative = 1e-12);
        assert_relative_eq!(design.initial_position.x, 10.0, max_relative = 1e-12);
        assert_relative_eq!(design.initial_direction.y, 1.0, max_relative = 1e-12);
    }

    #[test]
    fn omitted_initial_state_uses_defaults() {
        let text = r#"
            name = "Bare"
            initial_mass = 30.0
            dry_mass = 20.0
            thrust_n = 2000.0
            burn_time_s = 11.0
            drag_coefficient = 0.3
            cross_sectional_area_m2 = 0.0078
        "#;
        let design = RocketDesign::from_toml_str(text).unwrap();
        assert_eq!(design.initial_position, Vector3::zeros());
        assert_eq!(design.initial_speed, 0.0);
        assert_eq!(design.initial_direction, Vector3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn toml_round_trip() {
        let design = presets::example_rocket();
        let text = toml::to_string(&design).unwrap();
        let back = RocketDesign::from_toml_str(&text).unwrap();
        assert_eq!(back, design);
    }

    #[test]
    fn shipped_design_files_match_presets() {
        let example = RocketDesign::load("designs/example_rocket.toml").unwrap();
        assert_eq!(example, presets::example_rocket());

        let small = RocketDesign::load("designs/small_rocket.toml").unwrap();
        assert_eq!(small, presets::small_rocket());
    }

    #[test]
    fn load_errors_are_distinct() {
        assert!(matches!(
            RocketDesign::load("designs/does_not_exist.toml"),
            Err(LoadError::Io(_))
        ));
        assert!(matches!(
            RocketDesign::from_toml_str("name = ["),
            Err(LoadError::Parse(_))
        ));

        let invalid = r#"
            name = "Backwards"
            initial_mass = 20.0
            dry_mass = 30.0
            thrust_n = 2000.0
            burn_time_s = 11.0
            drag_coefficient = 0.3
            cross_sectional_area_m2 = 0.0078
        "#;
        assert!(matches!(
            RocketDesign::from_toml_str(invalid),
            Err(LoadError::Invalid(DesignError::MassOrdering { .. }))
        ));
    }
}
