//! Single traveling pixel

use beacon_protocol::{Color, TravelParams, PALETTE_SIZE};

use crate::palette::{rgb, Rgb};
use crate::traits::LedStrip;

/// One lit pixel walking along the strip, wrapping back to the start
///
/// In random mode the pixel takes the next palette color each time it
/// wraps, instead of keeping a fixed color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Travel {
    color: Rgb,
    position: usize,
    shift_color_index: usize,
    random: bool,
}

impl Travel {
    /// Create a travel starting from `params`
    pub fn new(color: Rgb, params: &TravelParams) -> Self {
        Self {
            color,
            position: usize::from(params.position),
            shift_color_index: usize::from(params.shift_color_index) % PALETTE_SIZE,
            random: params.random,
        }
    }

    /// Pixel that the next step lights (before wrapping)
    pub fn position(&self) -> usize {
        self.position
    }

    /// Palette index used in random mode
    pub fn shift_color_index(&self) -> usize {
        self.shift_color_index
    }

    /// Draw one frame and advance
    pub fn step<S: LedStrip>(&mut self, strip: &mut S) {
        if self.position >= strip.len() {
            self.position = 0;
            if self.random {
                self.shift_color_index = (self.shift_color_index + 1) % PALETTE_SIZE;
            }
        }

        let color = if self.random {
            rgb(Color::from_index(self.shift_color_index))
        } else {
            self.color
        };

        strip.clear();
        strip.set_pixel(self.position, color);
        strip.show();
        self.position += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::OFF;
    use crate::strip::StripBuffer;

    fn lit(strip: &StripBuffer) -> Vec<usize> {
        strip
            .pixels()
            .iter()
            .enumerate()
            .filter(|(_, &p)| p != OFF)
            .map(|(i, _)| i)
            .collect()
    }

    #[test]
    fn test_single_pixel_walks_and_wraps() {
        let mut strip = StripBuffer::new(3);
        let red = rgb(Color::Red);
        let mut travel = Travel::new(red, &TravelParams::default());

        let mut seen = Vec::new();
        for _ in 0..5 {
            travel.step(&mut strip);
            assert_eq!(lit(&strip).len(), 1);
            seen.push(lit(&strip)[0]);
        }
        assert_eq!(seen, [0, 1, 2, 0, 1]);
        assert_eq!(strip.pixels()[1], red);
    }

    #[test]
    fn test_random_mode_cycles_palette_on_wrap() {
        let mut strip = StripBuffer::new(2);
        let params = TravelParams {
            shift_color_index: 1,
            random: true,
            ..TravelParams::default()
        };
        let mut travel = Travel::new(rgb(Color::White), &params);

        travel.step(&mut strip);
        assert_eq!(strip.pixels()[0], rgb(Color::Green));
        travel.step(&mut strip);
        assert_eq!(strip.pixels()[1], rgb(Color::Green));
        travel.step(&mut strip);
        assert_eq!(strip.pixels()[0], rgb(Color::Blue));
        assert_eq!(travel.shift_color_index(), 2);
    }

    #[test]
    fn test_shift_index_wraps_at_palette_end() {
        let mut strip = StripBuffer::new(1);
        let params = TravelParams {
            shift_color_index: (PALETTE_SIZE - 1) as u8,
            random: true,
            ..TravelParams::default()
        };
        let mut travel = Travel::new(OFF, &params);
        travel.step(&mut strip);
        travel.step(&mut strip);
        assert_eq!(travel.shift_color_index(), 0);
        assert_eq!(strip.pixels()[0], rgb(Color::Red));
    }

    #[test]
    fn test_start_past_end_restarts_at_zero() {
        let mut strip = StripBuffer::new(4);
        let params = TravelParams {
            position: 40,
            ..TravelParams::default()
        };
        let mut travel = Travel::new(rgb(Color::Cyan), &params);
        travel.step(&mut strip);
        assert_eq!(lit(&strip), [0]);
        assert_eq!(travel.position(), 1);
    }
}
