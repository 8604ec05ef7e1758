use eframe::egui;
use egui_plot::{Line, Plot, PlotPoints};

use ascent_sim::sim::{self, Flight, SimConfig};
use ascent_sim::vehicle::{presets, RocketDesign};

fn main() -> eframe::Result {
    let design = presets::example_rocket();
    let config = SimConfig::default();
    let flight = sim::simulate(&design, &config).expect("preset design is valid");

    let app = FlightViz { flight, design };
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1200.0, 900.0]),
        ..Default::default()
    };
    eframe::run_native("Ascent Simulator", options, Box::new(|_| Ok(Box::new(app))))
}

struct FlightViz {
    flight: Flight,
    design: RocketDesign,
}

impl eframe::App for FlightViz {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let samples = &self.flight.samples;
        let step = (samples.len() / 2000).max(1);
        let sampled: Vec<_> = samples.iter().step_by(step).collect();

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.heading(format!("Design: {}", self.design.name));
            let apogee = samples.iter().map(|s| s.pos.z).fold(0.0_f64, f64::max);
            let max_v = samples.iter().map(|s| s.speed).fold(0.0_f64, f64::max);
            ui.label(format!(
                "Apogee: {:.1} km  |  Max speed: {:.0} m/s  |  Flight: {:.0} s  |  Ended by {}",
                apogee / 1000.0,
                max_v,
                samples.last().map_or(0.0, |s| s.time),
                self.flight.termination,
            ));
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let available = ui.available_size();
            let half_w = available.x / 2.0 - 8.0;
            let third_h = available.y / 3.0 - 8.0;

            ui.horizontal(|ui| {
                // Altitude vs Time
                ui.vertical(|ui| {
                    ui.label("Altitude (km)");
                    let points: PlotPoints = sampled.iter()
                        .map(|s| [s.time, s.pos.z / 1000.0])
                        .collect();
                    Plot::new("altitude")
                        .width(half_w)
                        .height(third_h)
                        .x_axis_label("Time (s)")
                        .show(ui, |plot_ui| {
                            plot_ui.line(Line::new("Altitude", points));
                        });
                });

                // Speed vs Time
                ui.vertical(|ui| {
                    ui.label("Speed (m/s)");
                    let points: PlotPoints = sampled.iter()
                        .map(|s| [s.time, s.speed])
                        .collect();
                    Plot::new("speed")
                        .width(half_w)
                        .height(third_h)
                        .x_axis_label("Time (s)")
                        .show(ui, |plot_ui| {
                            plot_ui.line(Line::new("Speed", points));
                        });
                });
            });

            ui.horizontal(|ui| {
                // Mass vs Time
                ui.vertical(|ui| {
                    ui.label("Mass (kg)");
                    let points: PlotPoints = sampled.iter()
                        .map(|s| [s.time, s.mass])
                        .collect();
                    Plot::new("mass")
                        .width(half_w)
                        .height(third_h)
                        .x_axis_label("Time (s)")
                        .show(ui, |plot_ui| {
                            plot_ui.line(Line::new("Mass", points));
                        });
                });

                // Vertical velocity vs Time
                ui.vertical(|ui| {
                    ui.label("Vertical Velocity (m/s)");
                    let points: PlotPoints = sampled.iter()
                        .map(|s| [s.time, s.vel.z])
                        .collect();
                    Plot::new("vz")
                        .width(half_w)
                        .height(third_h)
                        .x_axis_label("Time (s)")
                        .show(ui, |plot_ui| {
                            plot_ui.line(Line::new("Vz", points));
                        });
                });
            });

            // Altitude vs Downrange
            ui.vertical(|ui| {
                ui.label("Trajectory Profile (km)");
                let points: PlotPoints = sampled.iter()
                    .map(|s| {
                        let dr = (s.pos.x.powi(2) + s.pos.y.powi(2)).sqrt();
                        [dr / 1000.0, s.pos.z / 1000.0]
                    })
                    .collect();
                Plot::new("profile")
                    .width(available.x - 8.0)
                    .height(third_h)
                    .x_axis_label("Downrange (km)")
                    .data_aspect(1.0)
                    .show(ui, |plot_ui| {
                        plot_ui.line(Line::new("Trajectory", points));
                    });
            });
        });
    }
}
