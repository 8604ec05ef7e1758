// ---------------------------------------------------------------------------
// Exponential atmosphere (single scale height)
// ---------------------------------------------------------------------------

/// Air density at sea level, kg/m^3.
pub const SEA_LEVEL_DENSITY: f64 = 1.225;

/// Atmospheric scale height, m. Density falls by a factor e every SCALE_HEIGHT.
pub const SCALE_HEIGHT: f64 = 8_500.0;

/// Exponential atmosphere model: rho(h) = rho_0 * exp(-h / H).
///
/// Clamps negative altitudes to sea level. Strictly decreasing above sea
/// level and strictly positive everywhere: density approaches zero with
/// altitude but never reaches it.
pub fn air_density(altitude_m: f64) -> f64 {
    let h = altitude_m.max(0.0);
    SEA_LEVEL_DENSITY * (-h / SCALE_HEIGHT).exp()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
