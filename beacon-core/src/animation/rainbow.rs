//! Shuffling rainbow

use beacon_protocol::{Color, RainbowParams, PALETTE_SIZE};
use rand::seq::SliceRandom;
use rand::RngCore;

use crate::palette::rgb;
use crate::traits::LedStrip;

/// Palette colors in runs of `segment_length` pixels
///
/// Every step reshuffles the palette and shifts the segment colors by one
/// more position than the previous step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rainbow {
    segment_length: usize,
    offset: usize,
}

impl Rainbow {
    /// Create a rainbow; a segment length of 0 is treated as 1
    pub fn new(params: &RainbowParams) -> Self {
        Self {
            segment_length: usize::from(params.segment_length.max(1)),
            offset: 0,
        }
    }

    /// Current rotation offset
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Draw one frame and advance
    pub fn step<S: LedStrip, R: RngCore>(&mut self, strip: &mut S, rng: &mut R) {
        let mut order = Color::PALETTE;
        order.shuffle(rng);

        let mut segment = 0;
        for i in 0..strip.len() {
            if i % self.segment_length == 0 {
                segment = (segment + 1) % PALETTE_SIZE;
            }
            let color = order[(segment + self.offset) % PALETTE_SIZE];
            strip.set_pixel(i, rgb(color));
        }
        strip.show();

        self.offset = (self.offset + 1) % PALETTE_SIZE;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strip::StripBuffer;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_segments_share_a_color() {
        let mut strip = StripBuffer::new(12);
        let mut rng = SmallRng::seed_from_u64(7);
        let mut rainbow = Rainbow::new(&RainbowParams {
            segment_length: 3,
            speed_ms: 100,
        });

        rainbow.step(&mut strip, &mut rng);

        let pixels = strip.pixels();
        for segment in pixels.chunks(3) {
            assert!(segment.iter().all(|&p| p == segment[0]));
        }
        // Adjacent segments come from distinct palette slots
        assert_ne!(pixels[0], pixels[3]);
        assert!(strip.take_flush());
    }

    #[test]
    fn test_offset_rotates_each_step() {
        let mut strip = StripBuffer::new(5);
        let mut rng = SmallRng::seed_from_u64(1);
        let mut rainbow = Rainbow::new(&RainbowParams::default());

        for expected in 1..=PALETTE_SIZE {
            rainbow.step(&mut strip, &mut rng);
            assert_eq!(rainbow.offset(), expected % PALETTE_SIZE);
        }
    }

    #[test]
    fn test_zero_segment_length() {
        let mut strip = StripBuffer::new(4);
        let mut rng = SmallRng::seed_from_u64(3);
        let mut rainbow = Rainbow::new(&RainbowParams {
            segment_length: 0,
            speed_ms: 10,
        });
        rainbow.step(&mut strip, &mut rng);
        assert!(strip.pixels().windows(2).all(|w| w[0] != w[1]));
    }
}
