use std::io::{self, Write};
use std::path::Path;

use crate::sim::Sample;

/// Write the sample series as CSV.
///
/// Columns: time, x, y, z, vx, vy, vz, mass, speed
pub fn write_samples<W: Write>(writer: &mut W, samples: &[Sample]) -> io::Result<()> {
    writeln!(writer, "time,x,y,z,vx,vy,vz,mass,speed")?;

    for s in samples {
        writeln!(
            writer,
            "{:.4},{:.4},{:.4},{:.4},{:.4},{:.4},{:.4},{:.4},{:.4}",
            s.time,
            s.pos.x,
            s.pos.y,
            s.pos.z,
            s.vel.x,
            s.vel.y,
            s.vel.z,
            s.mass,
            s.speed,
        )?;
    }

    Ok(())
}

/// Write the sample series to a CSV file at the given path.
pub fn write_samples_file<P: AsRef<Path>>(path: P, samples: &[Sample]) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_samples(&mut file, samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    #[test]
    fn csv_output_has_header_and_rows() {
        let samples = vec![
            Sample {
                time: 0.0,
                pos: Vector3::zeros(),
                vel: Vector3::zeros(),
                mass: 30.0,
                speed: 0.0,
            },
            Sample {
                time: 0.1,
                pos: Vector3::new(0.0, 0.0, 1.0),
                vel: Vector3::new(0.0, 0.0, 20.0),
                mass: 29.9,
                speed: 20.0,
            },
        ];

        let mut buf = Vec::new();
        write_samples(&mut buf, &samples).unwrap();
        let output = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "time,x,y,z,vx,vy,vz,mass,speed");
        assert_eq!(lines.len(), 3); // header + 2 data rows
        assert!(lines[1].starts_with("0.0000,"));
        assert!(lines[2].ends_with(",29.9000,20.0000"));
    }
}
