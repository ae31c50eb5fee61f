/*
 * Simulation Parameters Module
 *
 * This module defines the SimulationParams struct that contains all the
 * tunable constants of the simulation plus the knobs that can be adjusted
 * through the UI. The defaults carry the reference values and must not be
 * changed casually: fitness and kinematics are only comparable across runs
 * when these match bit-for-bit. It also provides methods for parameter
 * change detection used by the UI layer.
 */

// Parameters for the simulation; physics values are fixed per generation,
// the UI knobs at the bottom can change while a generation is running.
#[derive(Clone)]
pub struct SimulationParams {
    // Kinematics
    pub gravity: f32,
    pub jump_impulse: f32,
    pub terminal_velocity: f32,
    pub ascent_boost: f32,
    pub max_tilt: f32,
    pub tilt_step: f32,
    pub animation_period: u32,

    // Obstacles and world
    pub pipe_gap: f32,
    pub scroll_speed: f32,
    pub gap_min: i32,
    pub gap_max: i32,
    pub respawn_x: f32,
    pub initial_pipe_x: f32,
    pub floor_y: f32,
    pub ceiling_y: f32,
    pub bird_spawn_x: f32,
    pub bird_spawn_y: f32,

    // Fitness shaping
    pub survival_reward: f32,
    pub pass_bonus: f32,
    pub collision_penalty: f32,

    // Run control
    pub tick_rate: f32,
    pub population_size: usize,
    pub max_generations: u32,
    pub tick_budget: u64, // 0 disables the per-generation cap
    pub rng_seed: Option<u64>,

    // UI knobs
    pub ticks_per_step: u32, // simulation fast-forward multiplier
    pub pause_simulation: bool,
    pub show_debug: bool,
    pub draw_sensor_lines: bool,

    // Internal state for tracking changes
    previous_values: Option<ParamSnapshot>,
}

// A snapshot of parameter values used for change detection
#[derive(Clone)]
struct ParamSnapshot {
    population_size: usize,
    ticks_per_step: u32,
    pause_simulation: bool,
    show_debug: bool,
    draw_sensor_lines: bool,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            gravity: 3.0,
            jump_impulse: -10.5,
            terminal_velocity: 16.0,
            ascent_boost: 2.0,
            max_tilt: 25.0,
            tilt_step: 20.0,
            animation_period: 5,

            pipe_gap: 200.0,
            scroll_speed: 5.0,
            gap_min: 50,
            gap_max: 450,
            respawn_x: 600.0,
            initial_pipe_x: 700.0,
            floor_y: 730.0,
            ceiling_y: 0.0,
            bird_spawn_x: 230.0,
            bird_spawn_y: 350.0,

            survival_reward: 0.1,
            pass_bonus: 5.0,
            collision_penalty: 1.0,

            tick_rate: 30.0,
            population_size: 50,
            max_generations: 50,
            tick_budget: 10_000,
            rng_seed: None,

            ticks_per_step: 1,
            pause_simulation: false,
            show_debug: false,
            draw_sensor_lines: false,

            // Initialize with no previous values
            previous_values: None,
        }
    }
}

impl SimulationParams {
    // Take a snapshot of current parameter values for change detection
    pub fn take_snapshot(&mut self) {
        self.previous_values = Some(ParamSnapshot {
            population_size: self.population_size,
            ticks_per_step: self.ticks_per_step,
            pause_simulation: self.pause_simulation,
            show_debug: self.show_debug,
            draw_sensor_lines: self.draw_sensor_lines,
        });
    }

    // Check if any parameters have changed since the last snapshot.
    // Returns a tuple of (should_restart_run, population_changed, any_ui_changed).
    pub fn detect_changes(&self) -> (bool, bool, bool) {
        let mut population_changed = false;
        let mut ui_changed = false;

        // If we don't have previous values, nothing has changed
        if let Some(prev) = &self.previous_values {
            if self.population_size != prev.population_size {
                population_changed = true;
                ui_changed = true;
            }

            if self.ticks_per_step != prev.ticks_per_step
                || self.pause_simulation != prev.pause_simulation
                || self.show_debug != prev.show_debug
                || self.draw_sensor_lines != prev.draw_sensor_lines
            {
                ui_changed = true;
            }
        }

        // The first element (should_restart_run) is set by the UI when the
        // restart button is clicked.
        (false, population_changed, ui_changed)
    }

    // Get parameter ranges for UI sliders
    pub fn get_population_range() -> std::ops::RangeInclusive<usize> {
        1..=500
    }

    pub fn get_ticks_per_step_range() -> std::ops::RangeInclusive<u32> {
        1..=64
    }

    pub fn get_max_generations_range() -> std::ops::RangeInclusive<u32> {
        1..=500
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The reference constants must survive refactors unchanged; every value
    // here feeds either the kinematics or the fitness shaping.
    #[test]
    fn defaults_match_reference_values() {
        let params = SimulationParams::default();
        assert_eq!(params.gravity, 3.0);
        assert_eq!(params.jump_impulse, -10.5);
        assert_eq!(params.terminal_velocity, 16.0);
        assert_eq!(params.ascent_boost, 2.0);
        assert_eq!(params.pipe_gap, 200.0);
        assert_eq!(params.scroll_speed, 5.0);
        assert_eq!(params.gap_min, 50);
        assert_eq!(params.gap_max, 450);
        assert_eq!(params.respawn_x, 600.0);
        assert_eq!(params.initial_pipe_x, 700.0);
        assert_eq!(params.floor_y, 730.0);
        assert_eq!(params.survival_reward, 0.1);
        assert_eq!(params.pass_bonus, 5.0);
        assert_eq!(params.collision_penalty, 1.0);
        assert_eq!(params.tick_rate, 30.0);
        assert_eq!(params.bird_spawn_x, 230.0);
        assert_eq!(params.bird_spawn_y, 350.0);
    }

    #[test]
    fn change_detection_tracks_ui_knobs() {
        let mut params = SimulationParams::default();
        params.take_snapshot();
        assert_eq!(params.detect_changes(), (false, false, false));

        params.pause_simulation = true;
        assert_eq!(params.detect_changes(), (false, false, true));

        params.take_snapshot();
        params.population_size += 10;
        let (_, population_changed, ui_changed) = params.detect_changes();
        assert!(population_changed);
        assert!(ui_changed);
    }
}
