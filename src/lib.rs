/*
 * Flappy Neuroevolution Simulation - Module Definitions
 *
 * This file defines the module structure for the flappy-bird neuroevolution
 * simulation. It organizes the code into logical components for better
 * maintainability.
 */

// Re-export key components for easier access
pub use base::Base;
pub use bird::Bird;
pub use engine::{EvolutionEngine, RandomSearchEngine};
pub use mask::SpriteMask;
pub use params::SimulationParams;
pub use pipe::Pipe;
pub use policy::{Policy, PolicyError};
pub use population::{FrameSnapshot, Generation, GenerationStatus, SimError};
pub use sprites::SpriteAtlas;

// Define modules
pub mod app;
pub mod base;
pub mod bird;
pub mod debug;
pub mod engine;
pub mod mask;
pub mod params;
pub mod pipe;
pub mod policy;
pub mod population;
pub mod renderer;
pub mod sprites;
pub mod ui;

// Constants
pub const WINDOW_WIDTH: f32 = 500.0;
pub const WINDOW_HEIGHT: f32 = 800.0;
