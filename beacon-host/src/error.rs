//! Host error type

use std::fmt;
use std::io;

use beacon_protocol::FrameError;

/// Errors surfaced by the host process
#[derive(Debug)]
pub enum HostError {
    /// Configuration file could not be read or parsed
    Config(String),
    /// I/O failure on the serial link or the state feed
    Io(io::Error),
    /// Serial port could not be opened
    Serial(serialport::Error),
    /// Command did not fit in a frame
    Frame(FrameError),
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostError::Config(msg) => write!(f, "config error: {msg}"),
            HostError::Io(e) => write!(f, "I/O error: {e}"),
            HostError::Serial(e) => write!(f, "serial error: {e}"),
            HostError::Frame(e) => write!(f, "frame error: {e}"),
        }
    }
}

impl std::error::Error for HostError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HostError::Config(_) => None,
            HostError::Io(e) => Some(e),
            HostError::Serial(e) => Some(e),
            HostError::Frame(e) => Some(e),
        }
    }
}

impl From<io::Error> for HostError {
    fn from(e: io::Error) -> Self {
        HostError::Io(e)
    }
}

impl From<serialport::Error> for HostError {
    fn from(e: serialport::Error) -> Self {
        HostError::Serial(e)
    }
}

impl From<FrameError> for HostError {
    fn from(e: FrameError) -> Self {
        HostError::Frame(e)
    }
}

impl From<toml::de::Error> for HostError {
    fn from(e: toml::de::Error) -> Self {
        HostError::Config(e.to_string())
    }
}
