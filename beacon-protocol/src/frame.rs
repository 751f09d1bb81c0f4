//! Frame encoding and decoding for the serial lighting link.
//!
//! Frame format:
//! - PAYLOAD: UTF-8 JSON text of one [`Command`]
//! - TERMINATOR: the two printable bytes `/` `r` (0x2F 0x72)
//!
//! The terminator is a literal slash followed by the letter r, not a
//! carriage return. No vocabulary name contains it, but an arbitrary string
//! value that does will split the frame at that point.

use heapless::Vec;

use crate::command::Command;

/// Two-byte frame terminator
pub const TERMINATOR: &[u8; 2] = b"/r";

/// Maximum complete frame size (PAYLOAD + TERMINATOR)
pub const MAX_FRAME_SIZE: usize = 512;

/// Maximum payload size in bytes
pub const MAX_PAYLOAD_SIZE: usize = MAX_FRAME_SIZE - TERMINATOR.len();

/// Receive buffer capacity: a full payload plus the first terminator byte
const RX_CAPACITY: usize = MAX_PAYLOAD_SIZE + 1;

/// Errors that can occur during frame parsing or encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Receive buffer filled up before a terminator arrived
    Overflow,
    /// Terminator with no payload in front of it
    Empty,
    /// Payload is not valid UTF-8
    InvalidUtf8,
    /// Payload is not a JSON command object
    InvalidJson,
    /// Buffer too small for encoding
    BufferTooSmall,
}

impl core::fmt::Display for FrameError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            FrameError::Overflow => "receive buffer overflow",
            FrameError::Empty => "empty frame",
            FrameError::InvalidUtf8 => "payload is not valid UTF-8",
            FrameError::InvalidJson => "payload is not a valid command",
            FrameError::BufferTooSmall => "buffer too small for frame",
        };
        f.write_str(msg)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FrameError {}

/// Encode a command into a byte buffer as payload + terminator
///
/// Returns the number of bytes written
pub fn encode_frame(command: &Command, buffer: &mut [u8]) -> Result<usize, FrameError> {
    let payload_len = command.to_json(buffer)?;
    let frame_len = payload_len + TERMINATOR.len();
    if buffer.len() < frame_len {
        return Err(FrameError::BufferTooSmall);
    }
    buffer[payload_len..frame_len].copy_from_slice(TERMINATOR);
    Ok(frame_len)
}

/// Decode one payload (terminator already removed)
pub fn decode_payload(payload: &[u8]) -> Result<Command, FrameError> {
    if payload.is_empty() {
        return Err(FrameError::Empty);
    }
    let text = core::str::from_utf8(payload).map_err(|_| FrameError::InvalidUtf8)?;
    Command::from_json(text.as_bytes())
}

/// Accumulates raw serial bytes and splits them into frames
///
/// The terminator is recognized wherever it lands, so several frames
/// delivered in one chunk are each decoded, and a partial frame at the end
/// of a chunk stays buffered until the rest arrives. Bytes belonging to a
/// frame are dropped as soon as that frame is extracted, whether or not it
/// decodes.
///
/// A frame that outgrows the buffer is reported once as
/// [`FrameError::Overflow`]. The rest of it is skipped up to and including
/// its terminator, so the next frame starts clean.
#[derive(Debug, Clone, Default)]
pub struct FrameReceiver {
    buffer: Vec<u8, RX_CAPACITY>,
    /// Skipping the tail of an oversized frame
    discarding: bool,
    /// Last byte seen while discarding
    prev: u8,
}

impl FrameReceiver {
    /// Create an empty receiver
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop any partially received frame
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.discarding = false;
        self.prev = 0;
    }

    /// Bytes received since the last complete frame
    pub fn pending(&self) -> &[u8] {
        &self.buffer
    }

    /// Feed a single byte to the receiver
    ///
    /// Returns `Ok(Some(command))` when the byte completes a valid frame,
    /// `Ok(None)` when more bytes are needed, or `Err` when it completes a
    /// malformed frame or overflows the buffer.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Command>, FrameError> {
        if self.discarding {
            if self.prev == TERMINATOR[0] && byte == TERMINATOR[1] {
                self.discarding = false;
            }
            self.prev = byte;
            return Ok(None);
        }

        if byte == TERMINATOR[1] && self.buffer.last() == Some(&TERMINATOR[0]) {
            let payload_len = self.buffer.len() - 1;
            let result = decode_payload(&self.buffer[..payload_len]);
            self.buffer.clear();
            return result.map(Some);
        }

        if self.buffer.push(byte).is_err() {
            self.buffer.clear();
            self.discarding = true;
            self.prev = byte;
            return Err(FrameError::Overflow);
        }
        Ok(None)
    }

    /// Feed a chunk of bytes, yielding the outcome of every frame it completes
    ///
    /// The chunk is consumed as the iterator advances; drive it to the end
    /// so trailing bytes reach the buffer.
    pub fn feed_bytes<'a>(&'a mut self, bytes: &'a [u8]) -> Frames<'a> {
        Frames {
            receiver: self,
            bytes: bytes.iter(),
        }
    }
}

/// Iterator over the frames completed by one chunk, see [`FrameReceiver::feed_bytes`]
pub struct Frames<'a> {
    receiver: &'a mut FrameReceiver,
    bytes: core::slice::Iter<'a, u8>,
}

impl Iterator for Frames<'_> {
    type Item = Result<Command, FrameError>;

    fn next(&mut self) -> Option<Self::Item> {
        for &byte in self.bytes.by_ref() {
            match self.receiver.feed(byte) {
                Ok(Some(command)) => return Some(Ok(command)),
                Ok(None) => {}
                Err(e) => return Some(Err(e)),
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{Color, StripId, TravelParams};
    use crate::names::Vocabulary;
    use proptest::prelude::*;
    use std::vec::Vec as StdVec;

    fn collect(
        receiver: &mut FrameReceiver,
        bytes: &[u8],
    ) -> StdVec<Result<Command, FrameError>> {
        receiver.feed_bytes(bytes).collect()
    }

    #[test]
    fn test_set_whole_robot_frame() {
        let mut receiver = FrameReceiver::new();
        let results = collect(
            &mut receiver,
            br#"{"command":"setWholeRobot","color":"blue"}/r"#,
        );

        assert_eq!(results, [Ok(Command::set_whole_robot(Color::Blue))]);
        assert!(receiver.pending().is_empty());
    }

    #[test]
    fn test_encode_appends_terminator() {
        let frame = Command::set_whole_robot(Color::White).to_frame().unwrap();
        assert!(frame.ends_with(b"}/r"));
    }

    #[test]
    fn test_partial_frame_is_buffered() {
        let mut receiver = FrameReceiver::new();
        assert!(collect(&mut receiver, br#"{"command":"setWhole"#).is_empty());
        assert_eq!(receiver.pending(), br#"{"command":"setWhole"#);

        let results = collect(&mut receiver, br#"Robot","color":"red"}/r"#);
        assert_eq!(results, [Ok(Command::set_whole_robot(Color::Red))]);
        assert!(receiver.pending().is_empty());
    }

    #[test]
    fn test_terminator_split_across_chunks() {
        let mut receiver = FrameReceiver::new();
        assert!(collect(&mut receiver, br#"{"command":"setWholeRobot"}/"#).is_empty());
        let results = collect(&mut receiver, b"r");
        assert_eq!(results.len(), 1);
        assert!(results[0].is_ok());
    }

    #[test]
    fn test_concatenated_frames_are_split() {
        let mut receiver = FrameReceiver::new();
        let results = collect(
            &mut receiver,
            concat!(
                r#"{"command":"setWholeRobot","color":"red"}/r"#,
                r#"{"command":"setWholeStrip","strip":"cornerL","color":"green"}/r"#,
                r#"{"comm"#,
            )
            .as_bytes(),
        );

        assert_eq!(
            results,
            [
                Ok(Command::set_whole_robot(Color::Red)),
                Ok(Command::set_whole_strip(StripId::CornerL, Color::Green)),
            ]
        );
        assert_eq!(receiver.pending(), br#"{"comm"#);
    }

    #[test]
    fn test_carriage_return_is_not_a_terminator() {
        let mut receiver = FrameReceiver::new();
        assert!(collect(&mut receiver, b"{\"command\":\"setWholeRobot\"}\r").is_empty());
        assert!(!receiver.pending().is_empty());
    }

    #[test]
    fn test_invalid_json_is_discarded() {
        let mut receiver = FrameReceiver::new();
        let results = collect(&mut receiver, b"hello/r");
        assert_eq!(results, [Err(FrameError::InvalidJson)]);
        assert!(receiver.pending().is_empty());

        // The next frame decodes normally
        let results = collect(&mut receiver, br#"{"command":"setWholeRobot"}/r"#);
        assert!(results[0].is_ok());
    }

    #[test]
    fn test_invalid_utf8_is_discarded() {
        let mut receiver = FrameReceiver::new();
        let results = collect(&mut receiver, b"{\"command\":\"\xC3\x28\"}/r");
        assert_eq!(results, [Err(FrameError::InvalidUtf8)]);
        assert!(receiver.pending().is_empty());
    }

    #[test]
    fn test_multibyte_utf8_in_unknown_name() {
        let mut receiver = FrameReceiver::new();
        let results = collect(
            &mut receiver,
            "{\"command\":\"setWholeRobot\",\"color\":\"grün\"}/r".as_bytes(),
        );
        let command = results[0].clone().unwrap();
        assert_eq!(command.color.unwrap().as_str(), "grün");
    }

    #[test]
    fn test_empty_frame() {
        let mut receiver = FrameReceiver::new();
        assert_eq!(collect(&mut receiver, b"/r"), [Err(FrameError::Empty)]);
    }

    #[test]
    fn test_overflow_resets_buffer() {
        let mut receiver = FrameReceiver::new();
        let garbage = [b'x'; RX_CAPACITY + 1];
        let results = collect(&mut receiver, &garbage);
        assert_eq!(results, [Err(FrameError::Overflow)]);
        assert!(receiver.pending().is_empty());
    }

    #[test]
    fn test_overflow_on_terminator_keeps_next_frame() {
        let mut receiver = FrameReceiver::new();
        let mut stream = StdVec::new();
        stream.extend_from_slice(&[b'x'; RX_CAPACITY]);
        stream.extend_from_slice(b"/r");
        stream.extend_from_slice(br#"{"command":"setWholeRobot","color":"blue"}/r"#);

        let results = collect(&mut receiver, &stream);
        assert_eq!(
            results,
            [
                Err(FrameError::Overflow),
                Ok(Command::set_whole_robot(Color::Blue)),
            ]
        );
        assert!(receiver.pending().is_empty());
    }

    #[test]
    fn test_oversized_frame_tail_is_skipped() {
        let mut receiver = FrameReceiver::new();
        let mut stream = StdVec::new();
        stream.extend_from_slice(&[b'x'; RX_CAPACITY + 40]);
        stream.extend_from_slice(br#"{"command":"setWholeRobot","color":"red"}/r"#);

        // The tail of the oversized frame is swallowed with it
        assert_eq!(collect(&mut receiver, &stream), [Err(FrameError::Overflow)]);
        assert!(receiver.pending().is_empty());

        let results = collect(&mut receiver, br#"{"command":"setWholeRobot","color":"green"}/r"#);
        assert_eq!(results, [Ok(Command::set_whole_robot(Color::Green))]);
    }

    #[test]
    fn test_clear_ends_discarding() {
        let mut receiver = FrameReceiver::new();
        let _ = collect(&mut receiver, &[b'x'; RX_CAPACITY + 1]);
        receiver.clear();
        let results = collect(&mut receiver, br#"{"command":"setWholeRobot"}/r"#);
        assert!(results[0].is_ok());
    }

    #[test]
    fn test_clear_drops_partial_frame() {
        let mut receiver = FrameReceiver::new();
        let _ = collect(&mut receiver, b"noise from boot");
        receiver.clear();
        let results = collect(&mut receiver, br#"{"command":"setWholeRobot"}/r"#);
        assert!(results[0].is_ok());
    }

    #[test]
    fn test_encode_buffer_too_small() {
        let mut buffer = [0u8; 8];
        let result = encode_frame(&Command::set_whole_robot(Color::Red), &mut buffer);
        assert_eq!(result, Err(FrameError::BufferTooSmall));
    }

    fn arb_command() -> impl Strategy<Value = Command> {
        (0..StripId::ALL.len(), 0..Color::ALL.len(), any::<u16>(), any::<bool>()).prop_map(
            |(strip, color, position, random)| {
                Command::single_light_travel(
                    StripId::ALL[strip],
                    Color::ALL[color],
                    TravelParams {
                        position,
                        random,
                        ..TravelParams::default()
                    },
                )
            },
        )
    }

    proptest! {
        #[test]
        fn prop_chunking_never_leaks_completed_frames(
            commands in proptest::collection::vec(arb_command(), 1..6),
            split in 1usize..64,
        ) {
            let mut stream = StdVec::new();
            let mut frame_ends = StdVec::new();
            for command in &commands {
                stream.extend_from_slice(&command.to_frame().unwrap());
                frame_ends.push(stream.len());
            }

            let mut receiver = FrameReceiver::new();
            let mut decoded = StdVec::new();
            let mut consumed = 0;
            for chunk in stream.chunks(split) {
                decoded.extend(receiver.feed_bytes(chunk).map(|result| result.unwrap()));
                consumed += chunk.len();

                // Only bytes after the last completed frame may remain buffered
                let last_end = frame_ends
                    .iter()
                    .copied()
                    .filter(|&end| end <= consumed)
                    .last()
                    .unwrap_or(0);
                prop_assert_eq!(receiver.pending(), &stream[last_end..consumed]);
            }

            prop_assert_eq!(decoded, commands);
            prop_assert!(receiver.pending().is_empty());
        }
    }
}
