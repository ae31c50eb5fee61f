/*
 * Application Module
 *
 * This module defines the main application model and logic for the
 * neuroevolution run. It owns the sprite atlas, the evolution engine and
 * the current generation, advances the simulation with a fixed 30 Hz
 * timestep independent of the render rate, and rotates generations as they
 * terminate.
 */

use nannou::prelude::*;
use nannou_egui::Egui;
use std::time::{Duration, Instant};
use tracing::{error, info};

use crate::debug::{DebugInfo, RunStats};
use crate::engine::{EvolutionEngine, RandomSearchEngine};
use crate::params::SimulationParams;
use crate::population::{FrameSnapshot, Generation, GenerationStatus};
use crate::sprites::SpriteAtlas;
use crate::{renderer, ui, WINDOW_HEIGHT, WINDOW_WIDTH};

// Fallback engine seed when the params carry none
const DEFAULT_ENGINE_SEED: u64 = 0x5EED;

// Main model for the application
pub struct Model {
    pub params: SimulationParams,
    pub atlas: SpriteAtlas,
    pub engine: Box<dyn EvolutionEngine>,
    pub generation: Generation,
    pub latest_frame: FrameSnapshot,
    pub egui: Egui,
    pub debug_info: DebugInfo,
    pub best_fitness: Option<f32>,
    pub halted: bool,
    // Fixed timestep variables
    pub tick_accumulator: Duration,
    pub tick_step: Duration,
    pub last_update_time: Instant,
}

impl Model {
    pub fn run_stats(&self) -> RunStats {
        RunStats {
            generation: self.generation.number(),
            score: self.generation.score(),
            alive: self.generation.alive(),
            ticks: self.generation.ticks(),
            best_fitness: self.best_fitness,
            halted: self.halted,
        }
    }
}

// Initialize the model
pub fn model(app: &App) -> Model {
    let window_id = app
        .new_window()
        .title("Flappy Neuroevolution")
        .size(WINDOW_WIDTH as u32, WINDOW_HEIGHT as u32)
        .view(view)
        .raw_event(raw_window_event)
        .build()
        .unwrap();

    let window = app.window(window_id).unwrap();
    let egui = Egui::from_window(&window);

    let params = SimulationParams::default();
    let atlas = SpriteAtlas::synthetic();

    let seed = params.rng_seed.unwrap_or(DEFAULT_ENGINE_SEED);
    let mut engine: Box<dyn EvolutionEngine> =
        Box::new(RandomSearchEngine::new(params.population_size, seed));
    let generation = Generation::new(engine.spawn_generation(), 1, &params, &atlas);
    let latest_frame = generation.snapshot(&atlas);

    info!(population = params.population_size, "evolution run starting");

    let tick_step = Duration::from_secs_f32(1.0 / params.tick_rate);
    let now = Instant::now();

    Model {
        params,
        atlas,
        engine,
        generation,
        latest_frame,
        egui,
        debug_info: DebugInfo::default(),
        best_fitness: None,
        halted: false,
        tick_accumulator: Duration::ZERO,
        tick_step,
        last_update_time: now,
    }
}

// Update the model
pub fn update(app: &App, model: &mut Model, update: Update) {
    // Update debug info
    model.debug_info.fps = app.fps();
    model.debug_info.frame_time = update.since_last;

    // Update UI and check for parameter changes
    let stats = model.run_stats();
    let (should_restart, population_changed, _ui_changed) =
        ui::update_ui(&mut model.egui, &mut model.params, &model.debug_info, &stats);

    if should_restart || population_changed {
        restart_run(model);
    }

    // Fixed timestep: accumulate wall time, consume it in whole sim steps
    let current_time = Instant::now();
    let frame_time = current_time.duration_since(model.last_update_time);
    model.last_update_time = current_time;
    model.tick_accumulator += frame_time;

    let mut ticks_this_frame = 0u32;
    if !model.params.pause_simulation && !model.halted {
        while model.tick_accumulator >= model.tick_step {
            // Each step can fast-forward several sim ticks
            for _ in 0..model.params.ticks_per_step {
                step_simulation(model);
                ticks_this_frame += 1;
                if model.halted {
                    break;
                }
            }
            model.tick_accumulator -= model.tick_step;
        }
    } else {
        // Drop accumulated time while paused so unpausing doesn't burst
        model.tick_accumulator = Duration::ZERO;
    }
    model.debug_info.sim_ticks_last_frame = ticks_this_frame;

    model.latest_frame = model.generation.snapshot(&model.atlas);
}

// Advance the current generation one tick, rotating to the next generation
// when it terminates or exhausts its tick budget
fn step_simulation(model: &mut Model) {
    let budget_spent =
        model.params.tick_budget > 0 && model.generation.ticks() >= model.params.tick_budget;

    let status = if budget_spent {
        GenerationStatus::Terminated
    } else {
        match model.generation.tick(&model.atlas) {
            Ok(status) => status,
            Err(err) => {
                // A malformed policy invalidates the whole run
                error!(error = %err, "aborting evolution run");
                model.halted = true;
                return;
            }
        }
    };

    if status == GenerationStatus::Terminated {
        next_generation(model);
    }
}

fn next_generation(model: &mut Model) {
    let fitness = model.generation.fitnesses();
    let generation_best = fitness.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
    if model.best_fitness.map_or(true, |best| generation_best > best) {
        model.best_fitness = Some(generation_best);
    }

    info!(
        generation = model.generation.number(),
        score = model.generation.score(),
        ticks = model.generation.ticks(),
        best = generation_best,
        "generation finished"
    );

    model.engine.absorb_fitness(&fitness);

    if model.generation.number() >= model.params.max_generations {
        info!(cap = model.params.max_generations, "generation cap reached");
        model.halted = true;
        return;
    }

    let number = model.generation.number() + 1;
    model.generation = Generation::new(
        model.engine.spawn_generation(),
        number,
        &model.params,
        &model.atlas,
    );
}

// Throw away the current run and start over with fresh policies
fn restart_run(model: &mut Model) {
    let seed = model.params.rng_seed.unwrap_or(DEFAULT_ENGINE_SEED);
    model.engine = Box::new(RandomSearchEngine::new(
        model.params.population_size,
        seed,
    ));
    model.generation = Generation::new(
        model.engine.spawn_generation(),
        1,
        &model.params,
        &model.atlas,
    );
    model.best_fitness = None;
    model.halted = false;
    info!(population = model.params.population_size, "evolution run restarted");
}

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();

    renderer::draw_frame(&draw, &model.latest_frame, &model.params, &model.atlas);

    if model.params.show_debug {
        renderer::draw_debug_info(&draw, &model.debug_info, &model.run_stats());
    }

    draw.to_frame(app, &frame).unwrap();

    // Draw the egui UI
    model.egui.draw_to_frame(&frame).unwrap();
}

// Handle raw window events for egui
pub fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}
