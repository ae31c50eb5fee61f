/*
 * Debug Information Module
 *
 * This module defines the DebugInfo struct with frame statistics shown in
 * the overlay, and the RunStats summary of the evolution run displayed by
 * the UI panel.
 */

use std::time::Duration;

// Debug information to display
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub sim_ticks_last_frame: u32,
}

impl Default for DebugInfo {
    fn default() -> Self {
        Self {
            fps: 0.0,
            frame_time: Duration::ZERO,
            sim_ticks_last_frame: 0,
        }
    }
}

// Summary of the evolution run for the UI panel
#[derive(Clone, Copy, Default)]
pub struct RunStats {
    pub generation: u32,
    pub score: u32,
    pub alive: usize,
    pub ticks: u64,
    pub best_fitness: Option<f32>,
    pub halted: bool,
}
