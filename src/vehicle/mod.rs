pub mod design;

pub use design::{presets, DesignError, LoadError, RocketDesign};
