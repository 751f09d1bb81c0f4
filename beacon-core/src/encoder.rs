//! Host-side command encoder
//!
//! Every tick the host samples the robot state and reduces it to one
//! whole-robot color: alliance color while empty-handed, yellow for a cone,
//! magenta for a cube, white when nothing is known. During the endgame the
//! color pulses to a low-brightness variant.

use beacon_protocol::{Command, Named};

/// Host sampling cadence
pub const TICK_INTERVAL_MS: u64 = 50;

/// Remaining match time assumed when none is published
pub const DEFAULT_REMAINING_TIME_S: f64 = 300.0;

/// Endgame starts when fewer than this many seconds remain
pub const ENDGAME_THRESHOLD_S: f64 = 30.0;

/// Endgame pulse period in ticks
pub const ENDGAME_CYCLE_TICKS: u8 = 40;

/// Counter values above this select the low-brightness color
pub const ENDGAME_LOW_AFTER: u8 = 20;

/// Driver-station control word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlWord(pub u32);

impl ControlWord {
    pub const DS_ATTACHED: u32 = 0b100000;
    pub const FMS_ATTACHED: u32 = 0b010000;
    pub const E_STOP: u32 = 0b001000;
    pub const TEST_MODE: u32 = 0b000100;
    pub const AUTONOMOUS: u32 = 0b000010;
    pub const ENABLED: u32 = 0b000001;

    /// Decode each flag as `(word & mask) != 0`
    pub fn flags(self) -> ControlFlags {
        let set = |mask: u32| self.0 & mask != 0;
        ControlFlags {
            ds_attached: set(Self::DS_ATTACHED),
            fms_attached: set(Self::FMS_ATTACHED),
            e_stopped: set(Self::E_STOP),
            test_mode: set(Self::TEST_MODE),
            autonomous: set(Self::AUTONOMOUS),
            enabled: set(Self::ENABLED),
        }
    }
}

/// Decoded control word flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlFlags {
    pub ds_attached: bool,
    pub fms_attached: bool,
    pub e_stopped: bool,
    pub test_mode: bool,
    pub autonomous: bool,
    pub enabled: bool,
}

/// Game piece the robot reports holding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GamePiece {
    /// Explicitly holding nothing ("NONE")
    NoPiece,
    Cone,
    Cube,
    /// Empty, absent, or unrecognized tag
    Unavailable,
}

impl GamePiece {
    /// Classify a published tag (case-sensitive)
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "NONE" => GamePiece::NoPiece,
            "CONE" => GamePiece::Cone,
            "CUBE" => GamePiece::Cube,
            _ => GamePiece::Unavailable,
        }
    }
}

/// One sample of the shared robot state, with defaults already applied
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RobotState {
    pub red_alliance: bool,
    pub control_word: u32,
    pub game_piece: GamePiece,
    pub remaining_time_s: f64,
}

impl Default for RobotState {
    fn default() -> Self {
        Self {
            red_alliance: false,
            control_word: 0,
            game_piece: GamePiece::Unavailable,
            remaining_time_s: DEFAULT_REMAINING_TIME_S,
        }
    }
}

/// Colors the encoder can select
///
/// The low variants of yellow and magenta are sent by name even though the
/// device palette lacks them; the device then keeps its last color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SignalColor {
    Red,
    RedLow,
    Blue,
    BlueLow,
    Yellow,
    YellowLow,
    Magenta,
    MagentaLow,
    White,
}

impl SignalColor {
    pub fn name(self) -> &'static str {
        match self {
            SignalColor::Red => "red",
            SignalColor::RedLow => "redLow",
            SignalColor::Blue => "blue",
            SignalColor::BlueLow => "blueLow",
            SignalColor::Yellow => "yellow",
            SignalColor::YellowLow => "yellowLow",
            SignalColor::Magenta => "magenta",
            SignalColor::MagentaLow => "magentaLow",
            SignalColor::White => "white",
        }
    }
}

/// Reduces robot state samples to lighting commands
#[derive(Debug, Clone, Default)]
pub struct CommandEncoder {
    latched: ControlWord,
    endgame_counter: u8,
}

impl CommandEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent non-zero control word
    pub fn latched(&self) -> ControlWord {
        self.latched
    }

    pub fn endgame_counter(&self) -> u8 {
        self.endgame_counter
    }

    /// Record a control word; zero means "no update"
    pub fn latch(&mut self, word: u32) -> ControlWord {
        if word != 0 {
            self.latched = ControlWord(word);
        }
        self.latched
    }

    /// Advance one tick and pick the color for `state`
    pub fn select(&mut self, state: &RobotState) -> SignalColor {
        let flags = self.latch(state.control_word).flags();
        let remaining = state.remaining_time_s;
        let endgame = remaining < ENDGAME_THRESHOLD_S
            && remaining > 0.0
            && !flags.autonomous
            && flags.enabled;

        if endgame {
            self.endgame_counter = (self.endgame_counter + 1) % ENDGAME_CYCLE_TICKS;
        }
        let low = endgame && self.endgame_counter > ENDGAME_LOW_AFTER;

        let pick = |normal, dim| if low { dim } else { normal };
        match (state.game_piece, state.red_alliance) {
            (GamePiece::NoPiece, true) => pick(SignalColor::Red, SignalColor::RedLow),
            (GamePiece::NoPiece, false) => pick(SignalColor::Blue, SignalColor::BlueLow),
            (GamePiece::Cone, _) => pick(SignalColor::Yellow, SignalColor::YellowLow),
            (GamePiece::Cube, _) => pick(SignalColor::Magenta, SignalColor::MagentaLow),
            (GamePiece::Unavailable, _) => SignalColor::White,
        }
    }

    /// Advance one tick and build the command to send
    pub fn tick(&mut self, state: &RobotState) -> Command {
        let color = self.select(state);
        Command::set_whole_robot(Named::parse(color.name()))
    }
}
