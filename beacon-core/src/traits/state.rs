//! Robot telemetry source trait

use crate::encoder::{GamePiece, RobotState, DEFAULT_REMAINING_TIME_S};

/// Trait for the shared robot state the host samples every tick
///
/// Each value is read independently and may be missing (never published,
/// or the table connection is down). [`sample`] substitutes the defaults.
///
/// [`sample`]: StateSource::sample
pub trait StateSource {
    /// Whether the robot is on the red alliance
    fn red_alliance(&self) -> Option<bool>;

    /// Raw driver-station control word
    fn control_word(&self) -> Option<i64>;

    /// Game piece currently held
    fn game_piece(&self) -> Option<GamePiece>;

    /// Remaining match time in seconds
    fn remaining_time_s(&self) -> Option<f64>;

    /// Read every value, falling back to defaults for missing ones
    fn sample(&self) -> RobotState {
        RobotState {
            red_alliance: self.red_alliance().unwrap_or(false),
            control_word: self
                .control_word()
                .and_then(|word| u32::try_from(word).ok())
                .unwrap_or(0),
            game_piece: self.game_piece().unwrap_or(GamePiece::Unavailable),
            remaining_time_s: self.remaining_time_s().unwrap_or(DEFAULT_REMAINING_TIME_S),
        }
    }
}
