//! Palette colors and last-color fallback

use beacon_protocol::{Color, Named};

/// 8-bit RGB triple, as written to the strips
pub type Rgb = smart_leds::RGB8;

/// Off
pub const OFF: Rgb = Rgb::new(0, 0, 0);

/// Color used before any name has been resolved
pub const INITIAL_COLOR: Color = Color::Pink;

/// RGB value of a palette color
pub const fn rgb(color: Color) -> Rgb {
    match color {
        Color::Red => Rgb::new(255, 0, 0),
        Color::Green => Rgb::new(0, 255, 0),
        Color::Blue => Rgb::new(0, 0, 255),
        Color::Yellow => Rgb::new(255, 255, 0),
        Color::Magenta => Rgb::new(255, 0, 255),
        Color::Cyan => Rgb::new(0, 255, 255),
        Color::White => Rgb::new(255, 255, 255),
        Color::Orange => Rgb::new(255, 165, 0),
        Color::Pink => Rgb::new(255, 170, 203),
        Color::RedLow => Rgb::new(25, 0, 0),
        Color::BlueLow => Rgb::new(0, 0, 25),
        Color::Black => Rgb::new(0, 0, 0),
    }
}

/// Resolves color names, remembering the last one that resolved
///
/// An unknown or missing name never fails; it yields whatever color was
/// resolved most recently.
#[derive(Debug, Clone)]
pub struct Palette {
    last: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self::new()
    }
}

impl Palette {
    /// Create a palette with [`INITIAL_COLOR`] as the fallback
    pub const fn new() -> Self {
        Self {
            last: INITIAL_COLOR,
        }
    }

    /// The color an unresolvable name currently maps to
    pub fn last(&self) -> Color {
        self.last
    }

    /// Resolve a (possibly missing) color name
    pub fn resolve(&mut self, name: Option<&Named<Color>>) -> Color {
        if let Some(color) = name.and_then(Named::known) {
            self.last = color;
        }
        self.last
    }
}
