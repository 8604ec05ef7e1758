use std::io::{self, Write};
use std::path::Path;

use nalgebra::Vector3;

use crate::sim::{Sample, TerminationReason};
use crate::vehicle::RocketDesign;

/// Summary statistics computed from a flight's sample series.
#[derive(Debug, Clone)]
pub struct FlightSummary {
    pub apogee_m: f64,
    pub apogee_time: f64,
    pub max_speed: f64,
    pub flight_time: f64,
    pub final_position: Vector3<f64>,
    pub final_velocity: Vector3<f64>,
    pub impact_speed: f64,
}

impl FlightSummary {
    /// Compute the summary from a recorded flight.
    /// The series always holds at least the ignition sample.
    pub fn from_samples(samples: &[Sample]) -> Self {
        let apogee = samples
            .iter()
            .max_by(|a, b| a.pos.z.partial_cmp(&b.pos.z).unwrap())
            .unwrap();

        let max_speed = samples.iter().map(|s| s.speed).fold(0.0_f64, f64::max);

        let last = samples.last().unwrap();

        FlightSummary {
            apogee_m: apogee.pos.z,
            apogee_time: apogee.time,
            max_speed,
            flight_time: last.time,
            final_position: last.pos,
            final_velocity: last.vel,
            impact_speed: last.speed,
        }
    }
}

/// Write the flight summary as JSON to a writer.
pub fn write_summary<W: Write>(
    writer: &mut W,
    design: &RocketDesign,
    termination: TerminationReason,
    summary: &FlightSummary,
) -> io::Result<()> {
    writeln!(writer, "{{")?;
    writeln!(writer, "  \"design\": {{")?;
    writeln!(writer, "    \"name\": \"{}\"", design.name)?;
    writeln!(writer, "  }},")?;
    writeln!(writer, "  \"termination\": \"{}\",", termination)?;
    writeln!(writer, "  \"performance\": {{")?;
    writeln!(writer, "    \"apogee_m\": {:.2},", summary.apogee_m)?;
    writeln!(writer, "    \"apogee_time_s\": {:.2},", summary.apogee_time)?;
    writeln!(writer, "    \"max_speed_ms\": {:.2},", summary.max_speed)?;
    writeln!(writer, "    \"flight_time_s\": {:.2},", summary.flight_time)?;
    writeln!(
        writer,
        "    \"final_position_m\": [{:.2}, {:.2}, {:.2}],",
        summary.final_position.x, summary.final_position.y, summary.final_position.z
    )?;
    writeln!(
        writer,
        "    \"final_velocity_ms\": [{:.2}, {:.2}, {:.2}],",
        summary.final_velocity.x, summary.final_velocity.y, summary.final_velocity.z
    )?;
    writeln!(writer, "    \"impact_speed_ms\": {:.2}", summary.impact_speed)?;
    writeln!(writer, "  }}")?;
    writeln!(writer, "}}")?;
    Ok(())
}

/// Write the flight summary JSON to a file.
pub fn write_summary_file<P: AsRef<Path>>(
    path: P,
    design: &RocketDesign,
    termination: TerminationReason,
    summary: &FlightSummary,
) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_summary(&mut file, design, termination, summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vehicle::presets;

    fn simple_flight() -> Vec<Sample> {
        vec![
            Sample {
                time: 0.0,
                pos: Vector3::zeros(),
                vel: Vector3::new(0.0, 0.0, 100.0),
                mass: 30.0,
                speed: 100.0,
            },
            Sample {
                time: 10.0,
                pos: Vector3::new(0.0, 0.0, 5_000.0),
                vel: Vector3::zeros(),
                mass: 20.0,
                speed: 0.0,
            },
            Sample {
                time: 20.0,
                pos: Vector3::new(0.0, 0.0, -0.5),
                vel: Vector3::new(0.0, 0.0, -50.0),
                mass: 20.0,
                speed: 50.0,
            },
        ]
    }

    #[test]
    fn summary_computes_apogee_and_impact() {
        let s = FlightSummary::from_samples(&simple_flight());
        assert!((s.apogee_m - 5_000.0).abs() < 0.1);
        assert!((s.apogee_time - 10.0).abs() < 0.1);
        assert!((s.max_speed - 100.0).abs() < 0.1);
        assert!((s.flight_time - 20.0).abs() < 0.1);
        assert!((s.impact_speed - 50.0).abs() < 0.1);
    }

    #[test]
    fn json_output_is_valid() {
        let summary = FlightSummary::from_samples(&simple_flight());
        let design = presets::small_rocket();

        let mut buf = Vec::new();
        write_summary(&mut buf, &design, TerminationReason::Impact, &summary).unwrap();
        let json = String::from_utf8(buf).unwrap();

        assert!(json.contains("\"design\""));
        assert!(json.contains("\"Small Rocket\""));
        assert!(json.contains("\"termination\": \"impact\""));
        assert!(json.contains("\"apogee_m\""));
        assert!(json.contains("\"final_position_m\""));
    }
}
