//! Board-agnostic core logic for the Beacon LED controller
//!
//! This crate contains all lighting logic that does not depend on
//! specific hardware implementations:
//!
//! - LED strip abstraction trait and an in-memory pixel buffer
//! - Palette resolution with last-color fallback
//! - Animation engine (per-strip cancellable effects)
//! - Boot choreography
//! - Command dispatcher
//! - Host-side command encoder (telemetry to lighting command)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod animation;
pub mod config;
pub mod controller;
pub mod dispatch;
pub mod encoder;
pub mod palette;
pub mod startup;
pub mod strip;
pub mod traits;

pub use animation::{Animation, AnimationEngine, AnimationHandle};
pub use controller::LightController;
pub use dispatch::{Dispatcher, Outcome};
pub use encoder::{CommandEncoder, GamePiece, RobotState};
pub use palette::{rgb, Palette, Rgb};
pub use startup::StartupSequence;
pub use strip::StripBuffer;
pub use traits::{LedStrip, StateSource};
