//! Beacon serial lighting protocol
//!
//! This crate defines the line-delimited protocol between the Raspberry Pi
//! host (which watches robot telemetry) and the RP2040 LED controller. The
//! link is one-way and lossy: the host pushes a fresh command every tick and
//! never waits for an answer.
//!
//! # Protocol Overview
//!
//! Every message is a JSON object followed by a literal two-byte terminator:
//! ```text
//! ┌──────────────────────────────────────────────┬────────────┐
//! │ PAYLOAD (UTF-8 JSON, 1-510 B)                │ "/r" (2 B) │
//! └──────────────────────────────────────────────┴────────────┘
//! ```
//!
//! Text framing keeps the link readable in a serial monitor. Field values
//! that name a strip, color or verb are decoded into [`Named`] so a frame
//! with an unrecognized name still reaches the dispatcher.

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(unsafe_code)]

pub mod command;
pub mod frame;
pub mod names;

pub use command::{
    Color, Command, CommandKind, RainbowParams, StripId, TravelParams, PALETTE_SIZE, STRIP_COUNT,
};
pub use frame::{
    decode_payload, encode_frame, FrameError, FrameReceiver, MAX_FRAME_SIZE, MAX_PAYLOAD_SIZE,
    TERMINATOR,
};
pub use names::{Named, Vocabulary, MAX_NAME_LEN};
