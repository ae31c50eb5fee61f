/*
 * Base Module
 *
 * This module defines the Base struct: the scrolling ground strip drawn as
 * two copies of the same sprite riding one width apart. When a copy's right
 * edge crosses the left boundary it hops behind the other copy, producing a
 * seamless loop.
 */

#[derive(Clone)]
pub struct Base {
    pub y: f32,
    pub x1: f32,
    pub x2: f32,
    pub width: f32,
}

impl Base {
    pub fn new(y: f32, width: f32) -> Self {
        Self {
            y,
            x1: 0.0,
            x2: width,
            width,
        }
    }

    // Scroll one tick to the left, wrapping whichever copy fell off-screen
    pub fn advance(&mut self, speed: f32) {
        self.x1 -= speed;
        self.x2 -= speed;

        if self.x1 + self.width < 0.0 {
            self.x1 = self.x2 + self.width;
        }
        if self.x2 + self.width < 0.0 {
            self.x2 = self.x1 + self.width;
        }
    }
}
