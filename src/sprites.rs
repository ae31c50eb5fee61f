/*
 * Sprite Atlas Module
 *
 * This module defines the SpriteAtlas struct that bundles every sprite mask
 * and sprite dimension the simulation core needs. It is constructed once at
 * startup and passed by reference into the population controller, replacing
 * any module-level image state. The top pipe mask is derived by flipping the
 * bottom pipe mask vertically.
 */

use crate::mask::SpriteMask;

pub struct SpriteAtlas {
    bird_frames: Vec<SpriteMask>,
    pipe_bottom: SpriteMask,
    pipe_top: SpriteMask,
    base_width: f32,
}

impl SpriteAtlas {
    // Build an atlas from loaded sprite masks. The bird frames drive the
    // wing animation and must all share the same dimensions.
    pub fn new(bird_frames: Vec<SpriteMask>, pipe: SpriteMask, base_width: f32) -> Self {
        assert!(!bird_frames.is_empty(), "atlas needs at least one bird frame");
        let first = (bird_frames[0].width(), bird_frames[0].height());
        assert!(
            bird_frames
                .iter()
                .all(|frame| (frame.width(), frame.height()) == first),
            "bird frames must share dimensions"
        );

        let pipe_top = pipe.flipped_vertical();
        Self {
            bird_frames,
            pipe_bottom: pipe,
            pipe_top,
            base_width,
        }
    }

    // Headless atlas with the reference sprite dimensions (2x scaled source
    // art): three 68x48 bird frames with an elliptical body, a solid
    // 104x640 pipe and a 672 wide ground strip.
    pub fn synthetic() -> Self {
        let bird = SpriteMask::from_fn(68, 48, |x, y| {
            let dx = (x as f32 - 33.5) / 34.0;
            let dy = (y as f32 - 23.5) / 24.0;
            dx * dx + dy * dy <= 1.0
        });
        let bird_frames = vec![bird.clone(), bird.clone(), bird];
        let pipe = SpriteMask::filled(104, 640);
        Self::new(bird_frames, pipe, 672.0)
    }

    pub fn bird_frame(&self, frame: usize) -> &SpriteMask {
        &self.bird_frames[frame % self.bird_frames.len()]
    }

    pub fn frame_count(&self) -> usize {
        self.bird_frames.len()
    }

    pub fn pipe_top(&self) -> &SpriteMask {
        &self.pipe_top
    }

    pub fn pipe_bottom(&self) -> &SpriteMask {
        &self.pipe_bottom
    }

    pub fn bird_width(&self) -> f32 {
        self.bird_frames[0].width() as f32
    }

    pub fn bird_height(&self) -> f32 {
        self.bird_frames[0].height() as f32
    }

    pub fn pipe_width(&self) -> f32 {
        self.pipe_bottom.width() as f32
    }

    pub fn pipe_height(&self) -> f32 {
        self.pipe_bottom.height() as f32
    }

    pub fn base_width(&self) -> f32 {
        self.base_width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthetic_atlas_has_reference_dimensions() {
        let atlas = SpriteAtlas::synthetic();
        assert_eq!(atlas.bird_width(), 68.0);
        assert_eq!(atlas.bird_height(), 48.0);
        assert_eq!(atlas.pipe_width(), 104.0);
        assert_eq!(atlas.pipe_height(), 640.0);
        assert_eq!(atlas.base_width(), 672.0);
        assert_eq!(atlas.frame_count(), 3);
    }

    #[test]
    fn top_pipe_is_flipped_bottom_pipe() {
        let mut pipe = SpriteMask::filled(4, 6);
        pipe.set(0, 0, false); // notch in the top-left corner
        let atlas = SpriteAtlas::new(vec![SpriteMask::filled(2, 2)], pipe, 100.0);

        assert!(!atlas.pipe_top().is_opaque(0, 5));
        assert!(atlas.pipe_top().is_opaque(0, 0));
    }
}
