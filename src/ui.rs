/*
 * UI Module
 *
 * This module contains the egui control window for the evolution run.
 * Parameter change detection is handled by the SimulationParams struct.
 */

use nannou_egui::{egui, Egui};

use crate::debug::{DebugInfo, RunStats};
use crate::params::SimulationParams;

// Update the UI and return whether the run should restart, whether the
// population size changed, and whether any UI value changed
pub fn update_ui(
    egui: &mut Egui,
    params: &mut SimulationParams,
    debug_info: &DebugInfo,
    stats: &RunStats,
) -> (bool, bool, bool) {
    let mut should_restart = false;

    // Take a snapshot of current parameter values for change detection
    params.take_snapshot();

    let ctx = egui.begin_frame();

    egui::Window::new("Evolution Controls")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            ui.collapsing("Run", |ui| {
                ui.add(
                    egui::Slider::new(
                        &mut params.population_size,
                        SimulationParams::get_population_range(),
                    )
                    .text("Population"),
                );
                ui.add(
                    egui::Slider::new(
                        &mut params.max_generations,
                        SimulationParams::get_max_generations_range(),
                    )
                    .text("Generation Cap"),
                );
                ui.add(
                    egui::Slider::new(
                        &mut params.ticks_per_step,
                        SimulationParams::get_ticks_per_step_range(),
                    )
                    .text("Fast Forward"),
                );

                if ui.button("Restart Evolution").clicked() {
                    should_restart = true;
                }
            });

            ui.separator();
            ui.label(format!("Generation: {}", stats.generation));
            ui.label(format!("Score: {}", stats.score));
            ui.label(format!("Alive: {}", stats.alive));
            match stats.best_fitness {
                Some(best) => ui.label(format!("Best fitness: {best:.1}")),
                None => ui.label("Best fitness: -"),
            };
            if stats.halted {
                ui.label("Run halted");
            }

            ui.separator();
            ui.checkbox(&mut params.pause_simulation, "Pause Simulation");
            ui.checkbox(&mut params.show_debug, "Show Debug Info");
            ui.checkbox(&mut params.draw_sensor_lines, "Draw Sensor Lines");

            if params.show_debug {
                ui.label(format!("FPS: {:.1}", debug_info.fps));
            }
        });

    let (_, population_changed, ui_changed) = params.detect_changes();
    (should_restart, population_changed, ui_changed)
}
