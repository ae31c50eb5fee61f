/*
 * Pipe Module
 *
 * This module defines the Pipe struct and the obstacle stream operations:
 * spawning with a random gap height, scrolling, pruning off-screen pipes,
 * the monotonic passed flag and the selection of the pipe a bird senses.
 * It also hosts the pixel-mask collision test between a bird and the two
 * pipe halves.
 */

use rand::Rng;

use crate::bird::Bird;
use crate::params::SimulationParams;
use crate::sprites::SpriteAtlas;

#[derive(Clone)]
pub struct Pipe {
    pub x: f32,
    // Top edge of the gap; also the bottom edge of the downward-facing pipe
    pub gap_y: f32,
    // Top-left y of the top pipe sprite (negative for tall sprites)
    pub top: f32,
    // Top-left y of the bottom pipe sprite
    pub bottom: f32,
    pub passed: bool,
}

impl Pipe {
    // Spawn a pipe at the given x with a gap height drawn uniformly from
    // [gap_min, gap_max)
    pub fn spawn(
        x: f32,
        rng: &mut impl Rng,
        params: &SimulationParams,
        atlas: &SpriteAtlas,
    ) -> Self {
        let gap_y = rng.gen_range(params.gap_min..params.gap_max) as f32;
        Self {
            x,
            gap_y,
            top: gap_y - atlas.pipe_height(),
            bottom: gap_y + params.pipe_gap,
            passed: false,
        }
    }

    // Scroll one tick to the left
    pub fn advance(&mut self, speed: f32) {
        self.x -= speed;
    }

    // A pipe is gone once its right edge has crossed the left boundary
    pub fn is_offscreen(&self, pipe_width: f32) -> bool {
        self.x + pipe_width < 0.0
    }

    // Pixel-accurate collision against both pipe halves. Pure: depends only
    // on current positions and the sprite masks.
    pub fn collides(&self, bird: &Bird, atlas: &SpriteAtlas) -> bool {
        let bird_mask = atlas.bird_frame(bird.frame);
        let bird_y = bird.y.round();

        let dx = (self.x - bird.x).round() as i32;
        let top_dy = (self.top - bird_y).round() as i32;
        let bottom_dy = (self.bottom - bird_y).round() as i32;

        bird_mask.overlap(atlas.pipe_top(), (dx, top_dy))
            || bird_mask.overlap(atlas.pipe_bottom(), (dx, bottom_dy))
    }
}

// Select the pipe a bird at `bird_x` should sense: the first pipe in scroll
// order whose right edge has not yet passed the bird. Falls back to the last
// pipe when every pipe is already behind (a new pipe spawns the same tick a
// pipe is passed, so this is transient at most).
//
// Calling this with no live pipes is a programming error; a pipe is always
// created before the first tick runs.
pub fn sensing_index(pipes: &[Pipe], bird_x: f32, pipe_width: f32) -> usize {
    assert!(!pipes.is_empty(), "sensing requested with no live pipes");

    pipes
        .iter()
        .position(|pipe| pipe.x + pipe_width >= bird_x)
        .unwrap_or(pipes.len() - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn setup() -> (SimulationParams, SpriteAtlas) {
        (SimulationParams::default(), SpriteAtlas::synthetic())
    }

    #[test]
    fn spawn_places_gap_within_range() {
        let (params, atlas) = setup();
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        for _ in 0..200 {
            let pipe = Pipe::spawn(700.0, &mut rng, &params, &atlas);
            assert!(pipe.gap_y >= params.gap_min as f32);
            assert!(pipe.gap_y < params.gap_max as f32);
            assert_eq!(pipe.bottom, pipe.gap_y + params.pipe_gap);
            assert_eq!(pipe.top, pipe.gap_y - atlas.pipe_height());
            assert!(!pipe.passed);
        }
    }

    #[test]
    fn identical_seeds_reproduce_gap_sequence() {
        let (params, atlas) = setup();
        let mut rng_a = ChaCha8Rng::seed_from_u64(42);
        let mut rng_b = ChaCha8Rng::seed_from_u64(42);

        let gaps_a: Vec<f32> = (0..32)
            .map(|_| Pipe::spawn(700.0, &mut rng_a, &params, &atlas).gap_y)
            .collect();
        let gaps_b: Vec<f32> = (0..32)
            .map(|_| Pipe::spawn(700.0, &mut rng_b, &params, &atlas).gap_y)
            .collect();

        assert_eq!(gaps_a, gaps_b);
    }

    #[test]
    fn pruning_triggers_when_right_edge_crosses_left_boundary() {
        let (params, atlas) = setup();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut pipe = Pipe::spawn(0.0, &mut rng, &params, &atlas);

        assert!(!pipe.is_offscreen(atlas.pipe_width()));
        while pipe.x + atlas.pipe_width() >= 0.0 {
            pipe.advance(params.scroll_speed);
        }
        assert!(pipe.is_offscreen(atlas.pipe_width()));
    }

    #[test]
    fn sensing_skips_pipes_already_behind_the_bird() {
        let (params, atlas) = setup();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let width = atlas.pipe_width();

        let mut near = Pipe::spawn(300.0, &mut rng, &params, &atlas);
        let far = Pipe::spawn(600.0, &mut rng, &params, &atlas);

        let pipes = vec![near.clone(), far.clone()];
        assert_eq!(sensing_index(&pipes, 230.0, width), 0);

        // Move the near pipe until its right edge is behind the bird
        while near.x + width >= 230.0 {
            near.advance(params.scroll_speed);
        }
        let pipes = vec![near, far];
        assert_eq!(sensing_index(&pipes, 230.0, width), 1);
    }

    #[test]
    #[should_panic(expected = "no live pipes")]
    fn sensing_with_no_pipes_fails_fast() {
        sensing_index(&[], 230.0, 104.0);
    }

    #[test]
    fn collision_matches_gap_geometry() {
        let (params, atlas) = setup();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut pipe = Pipe::spawn(230.0, &mut rng, &params, &atlas);
        pipe.gap_y = 300.0;
        pipe.top = pipe.gap_y - atlas.pipe_height();
        pipe.bottom = pipe.gap_y + params.pipe_gap;

        // Bird centered in the gap: clear of both halves
        let mut bird = Bird::new(230.0, 380.0);
        assert!(!pipe.collides(&bird, &atlas));

        // Bird raised into the top pipe
        bird.y = 260.0;
        assert!(pipe.collides(&bird, &atlas));

        // Bird dropped into the bottom pipe
        bird.y = 490.0;
        assert!(pipe.collides(&bird, &atlas));

        // Pipe far to the right: no horizontal overlap at all
        bird.y = 260.0;
        pipe.x = 600.0;
        assert!(!pipe.collides(&bird, &atlas));
    }
}
