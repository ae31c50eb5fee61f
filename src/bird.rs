/*
 * Bird Module
 *
 * This module defines the Bird struct and its kinematics. A bird only knows
 * two moves: a jump that sets a fixed upward impulse, and a free-fall step
 * integrated from ticks since the last jump. Displacement is clamped to a
 * terminal value so falls never exceed a fixed per-tick speed.
 */

use crate::params::SimulationParams;

// Vertical band above the jump reference height within which the bird keeps
// pitching up instead of rotating into a dive
const TILT_HOLD_BAND: f32 = 50.0;

// Tilt angle at or below which the bird is considered nose-diving and the
// wing animation freezes on the glide frame
const NOSE_DIVE_TILT: f32 = -80.0;

#[derive(Clone)]
pub struct Bird {
    pub x: f32,
    pub y: f32,
    pub tilt: f32,
    pub vel: f32,
    pub tick_count: u32,
    pub height: f32,
    pub img_count: u32,
    pub frame: usize,
}

impl Bird {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            tilt: 0.0,
            vel: 0.0,
            tick_count: 0,
            height: y,
            img_count: 0,
            frame: 0,
        }
    }

    // Start a new ascent: fixed upward impulse, restart the tick counter and
    // remember the height the jump started from
    pub fn jump(&mut self, params: &SimulationParams) {
        self.vel = params.jump_impulse;
        self.tick_count = 0;
        self.height = self.y;
    }

    // Advance one tick of free flight and return the applied displacement.
    // Positive displacement is downward (screen coordinates grow towards the
    // floor).
    pub fn advance(&mut self, params: &SimulationParams) -> f32 {
        self.tick_count += 1;

        // Displacement since the last jump: d = v*t + 0.5*g*t^2
        let t = self.tick_count as f32;
        let mut displacement = self.vel * t + 0.5 * params.gravity * t * t;

        // Terminal fall speed, applied symmetrically to the magnitude
        if displacement.abs() >= params.terminal_velocity {
            displacement = displacement.signum() * params.terminal_velocity;
        }

        // Still ascending: add a little extra lift so ascents feel snappier
        if displacement < 0.0 {
            displacement -= params.ascent_boost;
        }

        self.y += displacement;

        // Tilt: pitch up while ascending or while still close above the jump
        // reference height, otherwise rotate nose-down, floored at -90
        if displacement < 0.0 || self.y < self.height + TILT_HOLD_BAND {
            if self.tilt < params.max_tilt {
                self.tilt = params.max_tilt;
            }
        } else if self.tilt > -90.0 {
            self.tilt = (self.tilt - params.tilt_step).max(-90.0);
        }

        displacement
    }

    // Advance the wing animation counter one tick. The flap cycle runs
    // frames 0, 1, 2, 1; a nose-diving bird holds the glide frame instead.
    pub fn advance_animation(&mut self, params: &SimulationParams) {
        let period = params.animation_period;
        self.img_count += 1;

        self.frame = if self.img_count <= period {
            0
        } else if self.img_count <= period * 2 {
            1
        } else if self.img_count <= period * 3 {
            2
        } else if self.img_count <= period * 4 {
            1
        } else {
            self.img_count = 0;
            0
        };

        if self.tilt <= NOSE_DIVE_TILT {
            self.frame = 1;
            self.img_count = period * 2;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> SimulationParams {
        SimulationParams::default()
    }

    #[test]
    fn jump_resets_state_regardless_of_prior_motion() {
        let params = params();
        let mut bird = Bird::new(230.0, 350.0);

        for _ in 0..17 {
            bird.advance(&params);
        }
        let y_before_jump = bird.y;

        bird.jump(&params);
        assert_eq!(bird.vel, -10.5);
        assert_eq!(bird.tick_count, 0);
        assert_eq!(bird.height, y_before_jump);
    }

    #[test]
    fn displacement_stays_within_clamp_bounds() {
        let params = params();
        let mut bird = Bird::new(230.0, 350.0);

        // Long free fall: displacement approaches the terminal value
        for _ in 0..50 {
            let d = bird.advance(&params);
            assert!(d <= params.terminal_velocity);
        }

        // Ascent after a jump: the overshoot correction can push the
        // displacement at most 2 below the negative terminal value
        bird.jump(&params);
        for _ in 0..10 {
            let d = bird.advance(&params);
            if d < 0.0 {
                assert!(d >= -(params.terminal_velocity + params.ascent_boost));
            }
        }
    }

    #[test]
    fn falling_reaches_terminal_velocity() {
        let params = params();
        let mut bird = Bird::new(230.0, 350.0);

        // With zero initial velocity, d = 1.5*t^2 passes 16 at t = 4
        bird.advance(&params);
        bird.advance(&params);
        bird.advance(&params);
        let d = bird.advance(&params);
        assert_eq!(d, params.terminal_velocity);
    }

    // Tilt uses the ascending-displacement condition (d < 0), not the
    // wider d < 50 variant: a bird that just jumped snaps nose-up, a bird
    // in free fall far below its reference height rotates down.
    #[test]
    fn tilt_snaps_up_on_ascent_and_rotates_down_in_free_fall() {
        let params = params();
        let mut bird = Bird::new(230.0, 350.0);

        bird.jump(&params);
        bird.advance(&params);
        assert_eq!(bird.tilt, params.max_tilt);

        // Fall far enough that y leaves the hold band above the reference
        for _ in 0..30 {
            bird.advance(&params);
        }
        assert_eq!(bird.tilt, -90.0, "tilt must bottom out exactly at -90");
    }

    #[test]
    fn tilt_holds_up_within_band_above_reference() {
        let params = params();
        let mut bird = Bird::new(230.0, 350.0);
        bird.jump(&params);

        // First couple of ticks keep the bird above height + 50
        bird.advance(&params);
        bird.advance(&params);
        assert!(bird.y < bird.height + TILT_HOLD_BAND);
        assert_eq!(bird.tilt, params.max_tilt);
    }

    #[test]
    fn animation_cycles_and_nose_dive_forces_glide_frame() {
        let params = params();
        let mut bird = Bird::new(230.0, 350.0);
        bird.tilt = 0.0;

        let mut seen = Vec::new();
        for _ in 0..(params.animation_period * 4 + 1) {
            // Hold tilt level so the nose-dive override stays out of the way
            bird.tilt = 0.0;
            bird.advance_animation(&params);
            seen.push(bird.frame);
        }
        assert!(seen.contains(&0));
        assert!(seen.contains(&1));
        assert!(seen.contains(&2));

        bird.tilt = -85.0;
        bird.advance_animation(&params);
        assert_eq!(bird.frame, 1);
        assert_eq!(bird.img_count, params.animation_period * 2);
    }
}
