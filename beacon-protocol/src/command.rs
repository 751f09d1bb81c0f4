//! Lighting commands
//!
//! A command is a flat JSON object. The `command` field selects the verb;
//! the remaining fields are optional and only meaningful for some verbs:
//!
//! ```text
//! {"command":"setWholeRobot","color":"blue"}
//! {"command":"setWholeStrip","strip":"pillarFL","color":"yellow"}
//! {"command":"singleLightTravel","strip":"pillarFR","color":"red",
//!  "time":70,"position":0,"shiftColorIndex":0,"random":false}
//! {"command":"shufflingRainbow","strip":"cornerL","segmentLength":3,"speed":250}
//! {"command":"stopAnimation","strip":"cornerL"}
//! ```

use core::fmt;

use heapless::Vec;
use serde::de::{self, Deserializer, Unexpected, Visitor};
use serde::{Deserialize, Serialize};

use crate::frame::{FrameError, MAX_FRAME_SIZE, MAX_PAYLOAD_SIZE, TERMINATOR};
use crate::names::{Named, Vocabulary};

/// Command verbs understood by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandKind {
    /// Fill one strip with a color
    SetWholeStrip,
    /// Fill every strip with a color
    SetWholeRobot,
    /// Run a single pixel along a strip
    SingleLightTravel,
    /// Rotating, shuffled palette segments on a strip
    ShufflingRainbow,
    /// Cancel a strip's animation and turn it off
    StopAnimation,
}

impl Vocabulary for CommandKind {
    const ALL: &'static [Self] = &[
        CommandKind::SetWholeStrip,
        CommandKind::SetWholeRobot,
        CommandKind::SingleLightTravel,
        CommandKind::ShufflingRainbow,
        CommandKind::StopAnimation,
    ];

    fn name(self) -> &'static str {
        match self {
            CommandKind::SetWholeStrip => "setWholeStrip",
            CommandKind::SetWholeRobot => "setWholeRobot",
            CommandKind::SingleLightTravel => "singleLightTravel",
            CommandKind::ShufflingRainbow => "shufflingRainbow",
            CommandKind::StopAnimation => "stopAnimation",
        }
    }
}

/// Number of LED strips on the robot
pub const STRIP_COUNT: usize = 6;

/// The robot's LED strips
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StripId {
    PillarFL,
    PillarFR,
    PillarBL,
    PillarBR,
    CornerL,
    CornerR,
}

impl StripId {
    /// Position of this strip in [`Vocabulary::ALL`], usable as an array index
    pub const fn index(self) -> usize {
        match self {
            StripId::PillarFL => 0,
            StripId::PillarFR => 1,
            StripId::PillarBL => 2,
            StripId::PillarBR => 3,
            StripId::CornerL => 4,
            StripId::CornerR => 5,
        }
    }
}

impl Vocabulary for StripId {
    const ALL: &'static [Self] = &[
        StripId::PillarFL,
        StripId::PillarFR,
        StripId::PillarBL,
        StripId::PillarBR,
        StripId::CornerL,
        StripId::CornerR,
    ];

    fn name(self) -> &'static str {
        match self {
            StripId::PillarFL => "pillarFL",
            StripId::PillarFR => "pillarFR",
            StripId::PillarBL => "pillarBL",
            StripId::PillarBR => "pillarBR",
            StripId::CornerL => "cornerL",
            StripId::CornerR => "cornerR",
        }
    }
}

/// Number of palette colors
pub const PALETTE_SIZE: usize = 12;

/// Named palette colors
///
/// Declaration order is the palette order used by animations that cycle
/// through colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Color {
    Red,
    Green,
    Blue,
    Yellow,
    Magenta,
    Cyan,
    White,
    Orange,
    Pink,
    RedLow,
    BlueLow,
    Black,
}

impl Color {
    /// Every palette color, in palette order
    pub const PALETTE: [Color; PALETTE_SIZE] = [
        Color::Red,
        Color::Green,
        Color::Blue,
        Color::Yellow,
        Color::Magenta,
        Color::Cyan,
        Color::White,
        Color::Orange,
        Color::Pink,
        Color::RedLow,
        Color::BlueLow,
        Color::Black,
    ];

    /// Position in the palette
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Palette color at `index`, wrapping past the end
    pub fn from_index(index: usize) -> Self {
        Self::PALETTE[index % PALETTE_SIZE]
    }
}

impl Vocabulary for Color {
    const ALL: &'static [Self] = &Color::PALETTE;

    fn name(self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::Yellow => "yellow",
            Color::Magenta => "magenta",
            Color::Cyan => "cyan",
            Color::White => "white",
            Color::Orange => "orange",
            Color::Pink => "pink",
            Color::RedLow => "redLow",
            Color::BlueLow => "blueLow",
            Color::Black => "black",
        }
    }
}

/// A lighting command as carried on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "camelCase")]
pub struct Command {
    pub command: Named<CommandKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strip: Option<Named<StripId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Named<Color>>,
    /// Travel step interval (ms)
    #[serde(
        default,
        deserialize_with = "deserialize_millis",
        skip_serializing_if = "Option::is_none"
    )]
    pub time: Option<u32>,
    /// Travel starting pixel
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<u16>,
    /// Travel starting palette index
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shift_color_index: Option<u8>,
    /// Travel cycles through the palette instead of using `color`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub random: Option<bool>,
    /// Rainbow pixels per color segment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment_length: Option<u16>,
    /// Rainbow step interval (ms)
    #[serde(
        default,
        deserialize_with = "deserialize_millis",
        skip_serializing_if = "Option::is_none"
    )]
    pub speed: Option<u32>,
}

/// Read an interval from any JSON number, truncating a fractional part
fn deserialize_millis<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Millis>::deserialize(deserializer).map(|ms| ms.map(|Millis(ms)| ms))
}

struct Millis(u32);

impl<'de> Deserialize<'de> for Millis {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_f64(MillisVisitor)
    }
}

struct MillisVisitor;

impl<'de> Visitor<'de> for MillisVisitor {
    type Value = Millis;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a non-negative number of milliseconds")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Millis, E> {
        u32::try_from(v)
            .map(Millis)
            .map_err(|_| E::invalid_value(Unexpected::Unsigned(v), &self))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Millis, E> {
        match u64::try_from(v) {
            Ok(v) => self.visit_u64(v),
            Err(_) => Err(E::invalid_value(Unexpected::Signed(v), &self)),
        }
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Millis, E> {
        if v >= 0.0 && v < u32::MAX as f64 + 1.0 {
            Ok(Millis(v as u32))
        } else {
            Err(E::invalid_value(Unexpected::Float(v), &self))
        }
    }
}

/// Parameters for a traveling-pixel animation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TravelParams {
    pub time_ms: u32,
    pub position: u16,
    pub shift_color_index: u8,
    pub random: bool,
}

impl Default for TravelParams {
    fn default() -> Self {
        Self {
            time_ms: 70,
            position: 0,
            shift_color_index: 0,
            random: false,
        }
    }
}

/// Parameters for a shuffling rainbow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RainbowParams {
    pub segment_length: u16,
    pub speed_ms: u32,
}

impl Default for RainbowParams {
    fn default() -> Self {
        Self {
            segment_length: 1,
            speed_ms: 250,
        }
    }
}

impl Command {
    /// Bare command with only the verb set
    pub fn new(kind: impl Into<Named<CommandKind>>) -> Self {
        Self {
            command: kind.into(),
            strip: None,
            color: None,
            time: None,
            position: None,
            shift_color_index: None,
            random: None,
            segment_length: None,
            speed: None,
        }
    }

    pub fn set_whole_strip(
        strip: impl Into<Named<StripId>>,
        color: impl Into<Named<Color>>,
    ) -> Self {
        Self {
            strip: Some(strip.into()),
            color: Some(color.into()),
            ..Self::new(CommandKind::SetWholeStrip)
        }
    }

    pub fn set_whole_robot(color: impl Into<Named<Color>>) -> Self {
        Self {
            color: Some(color.into()),
            ..Self::new(CommandKind::SetWholeRobot)
        }
    }

    pub fn single_light_travel(
        strip: impl Into<Named<StripId>>,
        color: impl Into<Named<Color>>,
        params: TravelParams,
    ) -> Self {
        Self {
            strip: Some(strip.into()),
            color: Some(color.into()),
            time: Some(params.time_ms),
            position: Some(params.position),
            shift_color_index: Some(params.shift_color_index),
            random: Some(params.random),
            ..Self::new(CommandKind::SingleLightTravel)
        }
    }

    pub fn shuffling_rainbow(strip: impl Into<Named<StripId>>, params: RainbowParams) -> Self {
        Self {
            strip: Some(strip.into()),
            segment_length: Some(params.segment_length),
            speed: Some(params.speed_ms),
            ..Self::new(CommandKind::ShufflingRainbow)
        }
    }

    pub fn stop_animation(strip: impl Into<Named<StripId>>) -> Self {
        Self {
            strip: Some(strip.into()),
            ..Self::new(CommandKind::StopAnimation)
        }
    }

    /// Travel parameters, with defaults for any field left out
    pub fn travel_params(&self) -> TravelParams {
        let defaults = TravelParams::default();
        TravelParams {
            time_ms: self.time.unwrap_or(defaults.time_ms),
            position: self.position.unwrap_or(defaults.position),
            shift_color_index: self.shift_color_index.unwrap_or(defaults.shift_color_index),
            random: self.random.unwrap_or(defaults.random),
        }
    }

    /// Rainbow parameters, with defaults for any field left out
    pub fn rainbow_params(&self) -> RainbowParams {
        let defaults = RainbowParams::default();
        RainbowParams {
            segment_length: self.segment_length.unwrap_or(defaults.segment_length),
            speed_ms: self.speed.unwrap_or(defaults.speed_ms),
        }
    }

    /// Serialize to JSON, returning the number of bytes written
    pub fn to_json(&self, buffer: &mut [u8]) -> Result<usize, FrameError> {
        serde_json_core::to_slice(self, buffer).map_err(|_| FrameError::BufferTooSmall)
    }

    /// Parse a JSON payload (without terminator)
    pub fn from_json(payload: &[u8]) -> Result<Self, FrameError> {
        serde_json_core::from_slice::<Command>(payload)
            .map(|(command, _)| command)
            .map_err(|_| FrameError::InvalidJson)
    }

    /// Encode as a complete frame: JSON payload followed by the terminator
    pub fn to_frame(&self) -> Result<Vec<u8, MAX_FRAME_SIZE>, FrameError> {
        let mut buffer = [0u8; MAX_FRAME_SIZE];
        let len = crate::frame::encode_frame(self, &mut buffer)?;
        let mut frame = Vec::new();
        frame
            .extend_from_slice(&buffer[..len])
            .map_err(|_| FrameError::BufferTooSmall)?;
        Ok(frame)
    }
}

// Compile-time check that a maximal payload plus terminator fits a frame
const _: () = assert!(MAX_PAYLOAD_SIZE + TERMINATOR.len() == MAX_FRAME_SIZE);

#[cfg(test)]
mod tests {
    use super::*;

    fn json(command: &Command) -> heapless::String<MAX_PAYLOAD_SIZE> {
        let mut buf = [0u8; MAX_PAYLOAD_SIZE];
        let len = command.to_json(&mut buf).unwrap();
        let mut out = heapless::String::new();
        out.push_str(core::str::from_utf8(&buf[..len]).unwrap()).unwrap();
        out
    }

    #[test]
    fn test_set_whole_robot_wire_form() {
        let command = Command::set_whole_robot(Color::Blue);
        assert_eq!(
            json(&command).as_str(),
            r#"{"command":"setWholeRobot","color":"blue"}"#
        );
    }

    #[test]
    fn test_travel_wire_form_uses_camel_case() {
        let command = Command::single_light_travel(
            StripId::PillarFR,
            Color::Red,
            TravelParams {
                time_ms: 70,
                position: 3,
                shift_color_index: 2,
                random: true,
            },
        );
        assert_eq!(
            json(&command).as_str(),
            r#"{"command":"singleLightTravel","strip":"pillarFR","color":"red","time":70,"position":3,"shiftColorIndex":2,"random":true}"#
        );
    }

    #[test]
    fn test_decode_ignores_unknown_fields() {
        let command =
            Command::from_json(br#"{"command":"setWholeRobot","brightness":4,"color":"cyan"}"#)
                .unwrap();
        assert_eq!(command, Command::set_whole_robot(Color::Cyan));
    }

    #[test]
    fn test_decode_keeps_unknown_names() {
        let command =
            Command::from_json(br#"{"command":"fireworks","strip":"roof","color":"yellowLow"}"#)
                .unwrap();
        assert_eq!(command.command.as_str(), "fireworks");
        assert_eq!(command.command.known(), None);
        assert_eq!(command.strip.unwrap().known(), None);
        assert_eq!(command.color.unwrap().as_str(), "yellowLow");
    }

    #[test]
    fn test_decode_rejects_missing_command() {
        assert_eq!(
            Command::from_json(br#"{"color":"red"}"#),
            Err(FrameError::InvalidJson)
        );
    }

    #[test]
    fn test_decode_rejects_trailing_garbage() {
        assert_eq!(
            Command::from_json(br#"{"command":"setWholeRobot"}}"#),
            Err(FrameError::InvalidJson)
        );
    }

    #[test]
    fn test_decode_fractional_intervals() {
        let command = Command::from_json(
            br#"{"command":"singleLightTravel","strip":"pillarFR","time":70.0}"#,
        )
        .unwrap();
        assert_eq!(command.time, Some(70));

        let command =
            Command::from_json(br#"{"command":"shufflingRainbow","speed":12.9}"#).unwrap();
        assert_eq!(command.speed, Some(12));

        let command = Command::from_json(br#"{"command":"shufflingRainbow","speed":250}"#).unwrap();
        assert_eq!(command.rainbow_params().speed_ms, 250);
    }

    #[test]
    fn test_decode_rejects_negative_interval() {
        assert_eq!(
            Command::from_json(br#"{"command":"singleLightTravel","time":-1}"#),
            Err(FrameError::InvalidJson)
        );
        assert_eq!(
            Command::from_json(br#"{"command":"singleLightTravel","time":null}"#)
                .map(|command| command.time),
            Ok(None)
        );
    }

    #[test]
    fn test_travel_params_defaults() {
        let mut command = Command::new(CommandKind::SingleLightTravel);
        command.position = Some(7);
        let params = command.travel_params();
        assert_eq!(params.position, 7);
        assert_eq!(params.time_ms, 70);
        assert!(!params.random);
    }

    #[test]
    fn test_all_combinations_survive_encoding() {
        for &kind in CommandKind::ALL {
            for &strip in StripId::ALL {
                for &color in Color::ALL {
                    let mut command = Command::new(kind);
                    command.strip = Some(strip.into());
                    command.color = Some(color.into());
                    let frame = command.to_frame().unwrap();
                    let payload = &frame[..frame.len() - TERMINATOR.len()];
                    assert_eq!(Command::from_json(payload).unwrap(), command);
                }
            }
        }
    }

    #[test]
    fn test_palette_index_wraps() {
        assert_eq!(Color::from_index(0), Color::Red);
        assert_eq!(Color::from_index(PALETTE_SIZE + 2), Color::Blue);
        assert_eq!(Color::Black.index(), PALETTE_SIZE - 1);
    }
}
