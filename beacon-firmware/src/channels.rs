//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use beacon_protocol::Command;

/// Channel capacity for decoded host commands
const COMMAND_CHANNEL_SIZE: usize = 4;

/// Commands decoded by the serial task, consumed by the lights task
pub static COMMAND_CHANNEL: Channel<CriticalSectionRawMutex, Command, COMMAND_CHANNEL_SIZE> =
    Channel::new();

/// Signal that a frame arrived over serial (drives the status LED)
pub static FRAME_ACTIVITY: Signal<CriticalSectionRawMutex, ()> = Signal::new();
