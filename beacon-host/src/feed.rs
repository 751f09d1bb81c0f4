//! Line-oriented telemetry feed
//!
//! The robot's telemetry arrives as `topic=value` lines, for example from a
//! table client piped into stdin:
//!
//! ```text
//! /FMSInfo/IsRedAlliance=true
//! /FMSInfo/FMSControlData=33
//! /Boat/Gas=CONE
//! /Boat/GasTime=27.5
//! ```
//!
//! Only the latest value of each topic is kept. Reads see whatever arrived
//! last; a topic that never arrived, or whose value does not parse, reads
//! as absent.

use std::collections::HashMap;
use std::io::{self, BufRead};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;

use beacon_core::{GamePiece, StateSource};

use crate::config::Topics;

/// Split a feed line into topic and value
///
/// Blank lines and lines starting with `#` are skipped.
pub fn parse_line(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let (topic, value) = line.split_once('=')?;
    let topic = topic.trim();
    if topic.is_empty() {
        return None;
    }
    Some((topic, value.trim()))
}

/// Latest telemetry values, keyed by topic
#[derive(Debug, Clone)]
pub struct FeedStateSource {
    topics: Topics,
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl FeedStateSource {
    pub fn new(topics: Topics) -> Self {
        Self {
            topics,
            values: Arc::default(),
        }
    }

    /// Start a reader thread that ingests stdin until it closes
    pub fn spawn_stdin(topics: Topics) -> io::Result<Self> {
        let source = Self::new(topics);
        let feed = source.clone();
        thread::Builder::new()
            .name("state-feed".into())
            .spawn(move || {
                let stdin = io::stdin();
                for line in stdin.lock().lines() {
                    match line {
                        Ok(line) => feed.ingest(&line),
                        Err(e) => {
                            log::error!("State feed read failed: {e}");
                            break;
                        }
                    }
                }
                log::warn!("State feed closed; holding last values");
            })?;
        Ok(source)
    }

    /// Record one feed line
    pub fn ingest(&self, line: &str) {
        let Some((topic, value)) = parse_line(line) else {
            if !line.trim().is_empty() {
                log::debug!("Ignoring feed line {line:?}");
            }
            return;
        };
        log::trace!("{topic} = {value}");
        self.lock().insert(topic.to_owned(), value.to_owned());
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.values.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn read<T>(&self, topic: &str, parse: impl FnOnce(&str) -> Option<T>) -> Option<T> {
        self.lock().get(topic).and_then(|value| parse(value.as_str()))
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

impl StateSource for FeedStateSource {
    fn red_alliance(&self) -> Option<bool> {
        self.read(&self.topics.red_alliance, parse_bool)
    }

    fn control_word(&self) -> Option<i64> {
        self.read(&self.topics.control_word, |v| v.parse().ok())
    }

    fn game_piece(&self) -> Option<GamePiece> {
        self.read(&self.topics.game_piece, |v| Some(GamePiece::from_tag(v)))
    }

    fn remaining_time_s(&self) -> Option<f64> {
        self.read(&self.topics.remaining_time, |v| {
            v.parse::<f64>().ok().filter(|t| t.is_finite())
        })
    }
}
