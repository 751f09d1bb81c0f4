//! LED strip trait

use crate::palette::Rgb;

/// Trait for one addressable LED strip
///
/// Pixel writes are buffered; nothing reaches the LEDs until [`show`]
/// is called. Implementations must ignore writes past [`len`].
///
/// [`show`]: LedStrip::show
/// [`len`]: LedStrip::len
pub trait LedStrip {
    /// Number of pixels on the strip (fixed for its lifetime)
    fn len(&self) -> usize;

    /// Set one pixel in the pending frame
    fn set_pixel(&mut self, index: usize, color: Rgb);

    /// Set every pixel in the pending frame to off
    fn clear(&mut self);

    /// Commit the pending frame to the LEDs
    fn show(&mut self);

    /// Check if the strip has no pixels
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Set every pixel to one color and commit
    fn fill(&mut self, color: Rgb) {
        for i in 0..self.len() {
            self.set_pixel(i, color);
        }
        self.show();
    }
}
