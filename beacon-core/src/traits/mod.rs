//! Hardware abstraction traits
//!
//! These traits define the interface between the lighting logic
//! and the outside world (LED hardware, telemetry).

pub mod state;
pub mod strip;

pub use state::StateSource;
pub use strip::LedStrip;
