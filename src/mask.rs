/*
 * Sprite Mask Module
 *
 * This module defines the SpriteMask struct used for pixel-accurate
 * collision detection. A mask records which pixels of a sprite are opaque;
 * two masks collide when at least one opaque pixel coincides once the
 * second mask is shifted by an integer offset relative to the first.
 */

#[derive(Clone)]
pub struct SpriteMask {
    width: usize,
    height: usize,
    bits: Vec<bool>,
}

impl SpriteMask {
    // Create a fully transparent mask
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            bits: vec![false; width * height],
        }
    }

    // Create a fully opaque mask
    pub fn filled(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            bits: vec![true; width * height],
        }
    }

    // Create a mask from a per-pixel predicate
    pub fn from_fn(width: usize, height: usize, f: impl Fn(usize, usize) -> bool) -> Self {
        let mut mask = Self::new(width, height);
        for y in 0..height {
            for x in 0..width {
                mask.bits[y * width + x] = f(x, y);
            }
        }
        mask
    }

    // Create a mask from rows of '#' (opaque) and '.' (transparent).
    // All rows must have the same length.
    pub fn from_rows(rows: &[&str]) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.len());
        Self::from_fn(width, height, |x, y| {
            rows[y].as_bytes()[x] == b'#'
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_opaque(&self, x: usize, y: usize) -> bool {
        self.bits[y * self.width + x]
    }

    pub fn set(&mut self, x: usize, y: usize, opaque: bool) {
        self.bits[y * self.width + x] = opaque;
    }

    // Mirror the mask top-to-bottom, used to derive the downward-facing top
    // pipe from the upward-facing bottom pipe sprite
    pub fn flipped_vertical(&self) -> Self {
        Self::from_fn(self.width, self.height, |x, y| {
            self.is_opaque(x, self.height - 1 - y)
        })
    }

    // Test whether any opaque pixel of `other`, placed with its top-left
    // corner at `offset` relative to this mask's top-left corner, coincides
    // with an opaque pixel of this mask.
    pub fn overlap(&self, other: &SpriteMask, offset: (i32, i32)) -> bool {
        let (dx, dy) = offset;

        // Intersection rectangle in this mask's coordinates
        let x_start = dx.max(0);
        let y_start = dy.max(0);
        let x_end = (other.width as i32 + dx).min(self.width as i32);
        let y_end = (other.height as i32 + dy).min(self.height as i32);

        for y in y_start..y_end {
            for x in x_start..x_end {
                if self.is_opaque(x as usize, y as usize)
                    && other.is_opaque((x - dx) as usize, (y - dy) as usize)
                {
                    return true;
                }
            }
        }

        false
    }
}
