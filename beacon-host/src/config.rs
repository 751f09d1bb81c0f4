//! Host configuration
//!
//! Loaded from a TOML file. Every key is optional; a missing key takes the
//! value the robot normally uses.
//!
//! ```toml
//! tick_ms = 50
//!
//! [serial]
//! port = "/dev/ttyS0"
//! baud = 115200
//!
//! [topics]
//! red_alliance = "/FMSInfo/IsRedAlliance"
//! control_word = "/FMSInfo/FMSControlData"
//! game_piece = "/Boat/Gas"
//! remaining_time = "/Boat/GasTime"
//! ```

use std::fs;
use std::io;
use std::path::Path;

use serde::Deserialize;

use beacon_core::encoder::TICK_INTERVAL_MS;

use crate::error::HostError;

/// Config file read when no path is given
pub const DEFAULT_CONFIG_PATH: &str = "beacon.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HostConfig {
    /// Encoder tick interval (ms)
    pub tick_ms: u64,
    pub serial: SerialConfig,
    pub topics: Topics,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            tick_ms: TICK_INTERVAL_MS,
            serial: SerialConfig::default(),
            topics: Topics::default(),
        }
    }
}

/// Serial link to the LED controller
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SerialConfig {
    /// Device path (GPIO 14/15 UART on the Pi)
    pub port: String,
    pub baud: u32,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            port: "/dev/ttyS0".into(),
            baud: 115_200,
        }
    }
}

/// Names of the telemetry values the encoder samples
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Topics {
    pub red_alliance: String,
    pub control_word: String,
    pub game_piece: String,
    pub remaining_time: String,
}

impl Default for Topics {
    fn default() -> Self {
        Self {
            red_alliance: "/FMSInfo/IsRedAlliance".into(),
            control_word: "/FMSInfo/FMSControlData".into(),
            game_piece: "/Boat/Gas".into(),
            remaining_time: "/Boat/GasTime".into(),
        }
    }
}

impl HostConfig {
    /// Parse config text
    pub fn parse(text: &str) -> Result<Self, HostError> {
        let config: HostConfig = toml::from_str(text)?;
        if config.tick_ms == 0 {
            return Err(HostError::Config("tick_ms must be at least 1".into()));
        }
        Ok(config)
    }

    /// Load config from `path`
    ///
    /// A missing file at the default path yields the defaults; any other
    /// read failure is an error.
    pub fn load(path: &Path) -> Result<Self, HostError> {
        match fs::read_to_string(path) {
            Ok(text) => Self::parse(&text),
            Err(e)
                if e.kind() == io::ErrorKind::NotFound && path == Path::new(DEFAULT_CONFIG_PATH) =>
            {
                log::info!("No {DEFAULT_CONFIG_PATH} found, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(HostError::Config(format!("{}: {e}", path.display()))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = HostConfig::parse("").unwrap();
        assert_eq!(config, HostConfig::default());
        assert_eq!(config.serial.baud, 115_200);
        assert_eq!(config.tick_ms, 50);
        assert_eq!(config.topics.game_piece, "/Boat/Gas");
    }

    #[test]
    fn test_partial_override() {
        let config = HostConfig::parse(
            r#"
            [serial]
            port = "/dev/ttyAMA0"

            [topics]
            remaining_time = "/Match/Time"
            "#,
        )
        .unwrap();

        assert_eq!(config.serial.port, "/dev/ttyAMA0");
        assert_eq!(config.serial.baud, 115_200);
        assert_eq!(config.topics.remaining_time, "/Match/Time");
        assert_eq!(config.topics.red_alliance, "/FMSInfo/IsRedAlliance");
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result = HostConfig::parse("[serial]\nspeed = 9600\n");
        assert!(matches!(result, Err(HostError::Config(_))));
    }

    #[test]
    fn test_zero_tick_rejected() {
        assert!(matches!(
            HostConfig::parse("tick_ms = 0"),
            Err(HostError::Config(_))
        ));
    }

    #[test]
    fn test_missing_explicit_path_is_error() {
        let result = HostConfig::load(Path::new("/nonexistent/beacon-test.toml"));
        assert!(matches!(result, Err(HostError::Config(_))));
    }
}
