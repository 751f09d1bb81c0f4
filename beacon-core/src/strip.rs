//! In-memory strip frame buffer
//!
//! The animation engine writes pixels synchronously; the firmware pushes
//! the finished frame to the LEDs afterwards. `show()` therefore only marks
//! the buffer, and the output side collects it with [`StripBuffer::take_flush`].

use beacon_protocol::{StripId, STRIP_COUNT};

use crate::config::{strip_config, MAX_STRIP_LEN, STRIPS};
use crate::palette::{Rgb, OFF};
use crate::traits::LedStrip;

/// Pixel buffer for one strip
#[derive(Debug, Clone)]
pub struct StripBuffer {
    pixels: [Rgb; MAX_STRIP_LEN],
    len: usize,
    flush_pending: bool,
}

impl StripBuffer {
    /// Create an all-off buffer with `len` pixels (clamped to [`MAX_STRIP_LEN`])
    pub fn new(len: usize) -> Self {
        Self {
            pixels: [OFF; MAX_STRIP_LEN],
            len: len.min(MAX_STRIP_LEN),
            flush_pending: false,
        }
    }

    /// Buffer sized for a configured strip
    pub fn for_strip(id: StripId) -> Self {
        Self::new(strip_config(id).length)
    }

    /// One buffer per configured strip, in [`StripId::index`] order
    pub fn for_all() -> [Self; STRIP_COUNT] {
        core::array::from_fn(|i| Self::new(STRIPS[i].length))
    }

    /// Pixels actually present on the strip
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels[..self.len]
    }

    /// Full-size frame; pixels past the strip length are always off
    pub fn frame(&self) -> &[Rgb; MAX_STRIP_LEN] {
        &self.pixels
    }

    /// Returns true (once) if `show()` was called since the last take
    pub fn take_flush(&mut self) -> bool {
        core::mem::replace(&mut self.flush_pending, false)
    }
}

impl LedStrip for StripBuffer {
    fn len(&self) -> usize {
        self.len
    }

    fn set_pixel(&mut self, index: usize, color: Rgb) {
        if index < self.len {
            self.pixels[index] = color;
        }
    }

    fn clear(&mut self) {
        self.pixels[..self.len].fill(OFF);
    }

    fn show(&mut self) {
        self.flush_pending = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_past_end_are_ignored() {
        let mut strip = StripBuffer::new(3);
        strip.set_pixel(3, Rgb::new(1, 2, 3));
        strip.set_pixel(MAX_STRIP_LEN + 4, Rgb::new(1, 2, 3));
        assert!(strip.frame().iter().all(|&p| p == OFF));
    }

    #[test]
    fn test_show_marks_for_flush_once() {
        let mut strip = StripBuffer::new(4);
        assert!(!strip.take_flush());
        strip.fill(Rgb::new(9, 9, 9));
        assert!(strip.take_flush());
        assert!(!strip.take_flush());
        assert_eq!(strip.pixels(), &[Rgb::new(9, 9, 9); 4]);
    }

    #[test]
    fn test_for_all_uses_configured_lengths() {
        let strips = StripBuffer::for_all();
        assert_eq!(strips[StripId::PillarBL.index()].len(), 13);
        assert_eq!(strips[StripId::CornerR.index()].len(), 30);
    }

    #[test]
    fn test_length_clamped() {
        assert_eq!(StripBuffer::new(MAX_STRIP_LEN * 2).len(), MAX_STRIP_LEN);
    }
}
