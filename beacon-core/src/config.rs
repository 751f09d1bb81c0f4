//! Strip configuration
//!
//! The robot has six strips with fixed data pins and pixel counts. The table
//! is compiled in; pins and lengths never change at runtime.

use beacon_protocol::{StripId, STRIP_COUNT};

/// Longest strip on the robot (pixels)
pub const MAX_STRIP_LEN: usize = 30;

/// Hardware description of one strip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StripConfig {
    /// Strip identity
    pub id: StripId,
    /// GPIO driving the strip's data line
    pub pin: u8,
    /// Number of pixels
    pub length: usize,
}

/// All strips, in [`StripId::index`] order
pub static STRIPS: [StripConfig; STRIP_COUNT] = [
    StripConfig {
        id: StripId::PillarFL,
        pin: 27,
        length: 25,
    },
    StripConfig {
        id: StripId::PillarFR,
        pin: 22,
        length: 25,
    },
    StripConfig {
        id: StripId::PillarBL,
        pin: 18,
        length: 13,
    },
    StripConfig {
        id: StripId::PillarBR,
        pin: 13,
        length: 13,
    },
    StripConfig {
        id: StripId::CornerL,
        pin: 9,
        length: 30,
    },
    StripConfig {
        id: StripId::CornerR,
        pin: 5,
        length: 30,
    },
];

/// Configuration of one strip
pub fn strip_config(id: StripId) -> &'static StripConfig {
    &STRIPS[id.index()]
}
