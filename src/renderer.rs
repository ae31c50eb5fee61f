/*
 * Renderer Module
 *
 * This module draws a FrameSnapshot: pipes, the scrolling ground strip,
 * every live bird with its tilt and wing frame, the score and generation
 * readouts and the optional sensor lines. It is a pure consumer of the
 * snapshot; nothing here feeds back into the simulation.
 *
 * The simulation uses screen-style coordinates (origin top-left, y grows
 * towards the floor); nannou draws from a centered origin with y up, so
 * every position goes through to_screen().
 */

use nannou::prelude::*;

use crate::debug::{DebugInfo, RunStats};
use crate::params::SimulationParams;
use crate::population::FrameSnapshot;
use crate::sprites::SpriteAtlas;
use crate::{WINDOW_HEIGHT, WINDOW_WIDTH};

// Convert a simulation-space point to nannou screen space
fn to_screen(x: f32, y: f32) -> Point2 {
    pt2(x - WINDOW_WIDTH / 2.0, WINDOW_HEIGHT / 2.0 - y)
}

// Convert a simulation-space rectangle (top-left corner plus size) to a
// centered nannou rectangle
fn rect_center(x: f32, y: f32, w: f32, h: f32) -> Point2 {
    to_screen(x + w / 2.0, y + h / 2.0)
}

pub fn draw_frame(
    draw: &Draw,
    frame: &FrameSnapshot,
    params: &SimulationParams,
    atlas: &SpriteAtlas,
) {
    // Sky
    draw.background().color(rgb(0.43f32, 0.77, 0.89));

    // Pipes, both halves
    let pipe_w = atlas.pipe_width();
    let pipe_h = atlas.pipe_height();
    for pipe in &frame.pipes {
        let top_center = rect_center(pipe.x, pipe.top, pipe_w, pipe_h);
        draw.rect()
            .xy(top_center)
            .w_h(pipe_w, pipe_h)
            .color(rgb(0.23f32, 0.65, 0.26));

        let bottom_center = rect_center(pipe.x, pipe.bottom, pipe_w, pipe_h);
        draw.rect()
            .xy(bottom_center)
            .w_h(pipe_w, pipe_h)
            .color(rgb(0.23f32, 0.65, 0.26));
    }

    // Sensor lines from each bird to the gap corners of the sensing pipe
    if params.draw_sensor_lines {
        if let Some(idx) = frame.sensing_pipe {
            if let Some(pipe) = frame.pipes.get(idx) {
                let gap_x = pipe.x + pipe_w / 2.0;
                for bird in &frame.birds {
                    let center = to_screen(
                        bird.x + atlas.bird_width() / 2.0,
                        bird.y + atlas.bird_height() / 2.0,
                    );
                    draw.line()
                        .start(center)
                        .end(to_screen(gap_x, pipe.gap_y))
                        .weight(2.0)
                        .color(RED);
                    draw.line()
                        .start(center)
                        .end(to_screen(gap_x, pipe.bottom))
                        .weight(2.0)
                        .color(RED);
                }
            }
        }
    }

    // Ground strip, two looping copies
    let base_w = atlas.base_width();
    let base_h = WINDOW_HEIGHT - frame.base.y;
    for base_x in [frame.base.x1, frame.base.x2] {
        draw.rect()
            .xy(rect_center(base_x, frame.base.y, base_w, base_h))
            .w_h(base_w, base_h)
            .color(rgb(0.87f32, 0.73, 0.4));
    }

    // Birds: ellipse body rotated by tilt, wing frame shifts the shade
    let bird_w = atlas.bird_width();
    let bird_h = atlas.bird_height();
    for bird in &frame.birds {
        let shade = match bird.frame {
            0 => rgb(0.98f32, 0.8, 0.21),
            1 => rgb(0.95f32, 0.72, 0.16),
            _ => rgb(0.9f32, 0.64, 0.12),
        };
        draw.ellipse()
            .xy(rect_center(bird.x, bird.y, bird_w, bird_h))
            .w_h(bird_w, bird_h)
            .rotate(bird.tilt.to_radians())
            .color(shade);
    }

    // Score top right, generation and alive top left
    draw.text(&format!("Score: {}", frame.score))
        .x_y(WINDOW_WIDTH / 2.0 - 70.0, WINDOW_HEIGHT / 2.0 - 25.0)
        .color(WHITE)
        .font_size(24);

    draw.text(&format!("Gens: {}", frame.generation))
        .x_y(-WINDOW_WIDTH / 2.0 + 60.0, WINDOW_HEIGHT / 2.0 - 25.0)
        .color(WHITE)
        .font_size(24);

    draw.text(&format!("Alive: {}", frame.alive))
        .x_y(-WINDOW_WIDTH / 2.0 + 60.0, WINDOW_HEIGHT / 2.0 - 55.0)
        .color(WHITE)
        .font_size(24);
}

// Draw the debug overlay in the bottom-left corner
pub fn draw_debug_info(draw: &Draw, debug_info: &DebugInfo, stats: &RunStats) {
    let x = -WINDOW_WIDTH / 2.0 + 90.0;
    let mut y = -WINDOW_HEIGHT / 2.0 + 110.0;

    let lines = [
        format!("FPS: {:.1}", debug_info.fps),
        format!(
            "Frame time: {:.2} ms",
            debug_info.frame_time.as_secs_f64() * 1000.0
        ),
        format!("Sim ticks/frame: {}", debug_info.sim_ticks_last_frame),
        format!("Gen ticks: {}", stats.ticks),
    ];

    for line in &lines {
        draw.text(line).x_y(x, y).color(WHITE).font_size(14);
        y -= 20.0;
    }
}
