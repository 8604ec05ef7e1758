use std::env;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::{info, warn};

use ascent_sim::io::{self, FlightSummary};
use ascent_sim::physics::atmosphere;
use ascent_sim::sim::{simulate, Flight, SimConfig, TerminationReason};
use ascent_sim::vehicle::{presets, RocketDesign};

#[derive(Parser, Debug)]
#[command(name = "ascent-sim")]
#[command(about = "Point-mass rocket trajectory simulator")]
#[command(version)]
struct Args {
    /// TOML design file (defaults to the built-in small rocket)
    design: Option<PathBuf>,

    /// Integration timestep, s
    #[arg(long, default_value_t = 0.1)]
    dt: f64,

    /// Hard stop for the run, s
    #[arg(long, default_value_t = 600.0)]
    max_duration: f64,

    /// Write the sample series as CSV to this path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write the flight summary as JSON to this path
    #[arg(long)]
    summary: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Default log level to "info"
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    pretty_env_logger::init();

    let args = Args::parse();

    if args.dt <= 0.0 {
        bail!("--dt must be positive, got {}", args.dt);
    }
    if args.max_duration <= 0.0 {
        bail!("--max-duration must be positive, got {}", args.max_duration);
    }

    let design = match &args.design {
        Some(path) => RocketDesign::load(path)
            .with_context(|| format!("loading design file {}", path.display()))?,
        None => {
            let design = presets::small_rocket();
            info!("no design file given, using built-in '{}'", design.name);
            design
        }
    };

    let config = SimConfig {
        dt: args.dt,
        max_duration: args.max_duration,
    };

    info!("simulating '{}' (dt = {} s)", design.name, config.dt);
    let flight = simulate(&design, &config)?;

    if !flight.preflight.liftoff_capable() {
        warn!("{}", flight.preflight);
    }

    let summary = FlightSummary::from_samples(&flight.samples);
    print_report(&design, &config, &flight, &summary);

    if let Some(path) = &args.output {
        io::write_samples_file(path, &flight.samples)
            .with_context(|| format!("writing {}", path.display()))?;
        info!("samples written to {}", path.display());
    }

    if let Some(path) = &args.summary {
        io::write_summary_file(path, &design, flight.termination, &summary)
            .with_context(|| format!("writing {}", path.display()))?;
        info!("summary written to {}", path.display());
    }

    Ok(())
}

fn print_report(design: &RocketDesign, config: &SimConfig, flight: &Flight, summary: &FlightSummary) {
    let samples = &flight.samples;
    let burnout = samples.iter().find(|s| s.time >= design.burn_time_s);
    let final_sample = samples.last().unwrap();

    let downrange = ((summary.final_position.x - design.initial_position.x).powi(2)
        + (summary.final_position.y - design.initial_position.y).powi(2))
    .sqrt();

    println!();
    println!("====================================================================");
    println!("  FLIGHT SIMULATION: {}", design.name);
    println!("====================================================================");
    println!();
    println!("  Design Parameters");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  Initial mass: {:>10.1} kg    Dry mass:     {:>10.1} kg",
        design.initial_mass, design.dry_mass
    );
    println!(
        "  Propellant:   {:>10.1} kg    Mass flow:    {:>10.2} kg/s",
        design.propellant_mass(),
        design.mass_flow_rate()
    );
    println!(
        "  Thrust:       {:>10.0} N     Burn time:    {:>10.1} s",
        design.thrust_n, design.burn_time_s
    );
    println!(
        "  Cd:           {:>10.3}       Area:         {:>10.4} m^2",
        design.drag_coefficient, design.cross_sectional_area_m2
    );
    println!();

    println!("  Pre-flight Check");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!("  {}", flight.preflight);
    println!();

    println!("  Flight Events");
    println!("  ──────────────────────────────────────────────────────────────────");

    if let Some(bo) = burnout {
        println!(
            "  BURNOUT   t={:>6.1}s   alt={:>8.0}m   vel={:>7.1}m/s",
            bo.time,
            bo.altitude(),
            bo.speed
        );
    }

    println!(
        "  APOGEE    t={:>6.1}s   alt={:>8.0}m   rho={:.4} kg/m^3",
        summary.apogee_time,
        summary.apogee_m,
        atmosphere::air_density(summary.apogee_m)
    );

    match flight.termination {
        TerminationReason::Impact => println!(
            "  IMPACT    t={:>6.1}s   vel={:>7.1}m/s",
            final_sample.time, summary.impact_speed
        ),
        TerminationReason::Timeout => println!(
            "  TIMEOUT   t={:>6.1}s   alt={:>8.0}m   still airborne",
            final_sample.time,
            final_sample.altitude()
        ),
    }
    println!();

    println!("  Performance Summary");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  Apogee:        {:>8.0} m   ({:.2} km)",
        summary.apogee_m,
        summary.apogee_m / 1000.0
    );
    println!("  Max speed:     {:>8.1} m/s", summary.max_speed);
    println!("  Flight time:   {:>8.1} s", summary.flight_time);
    println!("  Downrange:     {:>8.0} m", downrange);
    println!();

    println!("  Trajectory");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  {:>7}  {:>9}  {:>9}  {:>8}  {:>7}",
        "t (s)", "alt (m)", "vel (m/s)", "mass(kg)", "phase"
    );
    println!("  {}", "─".repeat(60));

    let sample_interval = (samples.len() / 30).max(1);
    for (i, s) in samples.iter().enumerate() {
        let print = i % sample_interval == 0
            || i == 0
            || (s.time - design.burn_time_s).abs() < config.dt * 1.5
            || i == samples.len() - 1;

        if !print {
            continue;
        }

        let phase = if s.time < design.burn_time_s {
            "BURN"
        } else if s.vel.z > 0.0 {
            "COAST"
        } else {
            "DESC"
        };

        println!(
            "  {:>7.2}  {:>9.1}  {:>9.1}  {:>8.2}  {:>7}",
            s.time,
            s.altitude(),
            s.speed,
            s.mass,
            phase
        );
    }

    println!();
    println!(
        "  Simulation: {} samples, dt={} s, ended by {}",
        samples.len(),
        config.dt,
        flight.termination
    );
    println!("====================================================================");
    println!();
}
