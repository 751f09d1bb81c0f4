//! Serial link to the LED controller
//!
//! The link is fire-and-forget: a frame that cannot be written is dropped
//! and the next tick sends a fresh one. A failed open or write closes the
//! port; reopening is attempted at most once per [`REOPEN_INTERVAL`].

use std::io::Write;
use std::time::{Duration, Instant};

use crate::config::SerialConfig;
use crate::error::HostError;

/// Minimum spacing between open attempts
pub const REOPEN_INTERVAL: Duration = Duration::from_secs(1);

/// Write timeout on the serial port
const WRITE_TIMEOUT: Duration = Duration::from_millis(100);

/// Open the controller's serial port (8N1, no flow control)
pub fn open_port(config: &SerialConfig) -> Result<Box<dyn serialport::SerialPort>, HostError> {
    let port = serialport::new(&config.port, config.baud)
        .data_bits(serialport::DataBits::Eight)
        .parity(serialport::Parity::None)
        .stop_bits(serialport::StopBits::One)
        .flow_control(serialport::FlowControl::None)
        .timeout(WRITE_TIMEOUT)
        .open()?;
    Ok(port)
}

/// What happened to a frame handed to [`Link::send`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Written,
    /// Port closed and a reopen is not due yet
    Skipped,
}

/// Self-healing writer around a port opener
pub struct Link<W, F> {
    open: F,
    port: Option<W>,
    last_attempt: Option<Instant>,
}

impl<W, F> Link<W, F>
where
    W: Write,
    F: FnMut() -> Result<W, HostError>,
{
    /// Create a closed link; the port opens on the first send
    pub fn new(open: F) -> Self {
        Self {
            open,
            port: None,
            last_attempt: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.port.is_some()
    }

    /// Write one frame
    ///
    /// On error the port is closed and the frame is lost.
    pub fn send(&mut self, frame: &[u8], now: Instant) -> Result<Delivery, HostError> {
        let mut port = match self.port.take() {
            Some(port) => port,
            None => {
                if self
                    .last_attempt
                    .is_some_and(|at| now.duration_since(at) < REOPEN_INTERVAL)
                {
                    return Ok(Delivery::Skipped);
                }
                self.last_attempt = Some(now);
                let port = (self.open)()?;
                log::info!("Serial port opened");
                port
            }
        };

        port.write_all(frame)?;
        port.flush()?;
        self.port = Some(port);
        Ok(Delivery::Written)
    }
}
