//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod lights;
pub mod serial_rx;
pub mod status_led;

pub use lights::lights_task;
pub use serial_rx::serial_rx_task;
pub use status_led::status_led_task;
