//! Boot choreography
//!
//! After power-up the whole robot cycles red, green, blue, off and settles
//! on blue, so a glance at the strips shows that every channel works. The
//! first command from the host ends the sequence early.

use beacon_protocol::Color;

/// (offset from boot in ms, whole-robot color)
pub const STARTUP_STEPS: [(u64, Color); 5] = [
    (0, Color::Red),
    (3000, Color::Green),
    (6000, Color::Blue),
    (9000, Color::Black),
    (11000, Color::Blue),
];

/// Timed whole-robot colors shown after boot
#[derive(Debug, Clone)]
pub struct StartupSequence {
    started_ms: u64,
    next_step: usize,
}

impl StartupSequence {
    pub fn new(now_ms: u64) -> Self {
        Self {
            started_ms: now_ms,
            next_step: 0,
        }
    }

    /// Color to show now, if a step became due since the last poll
    ///
    /// When several steps are overdue only the latest is returned.
    pub fn poll(&mut self, now_ms: u64) -> Option<Color> {
        let elapsed = now_ms.saturating_sub(self.started_ms);
        let mut color = None;
        while let Some(&(offset, step_color)) = STARTUP_STEPS.get(self.next_step) {
            if offset > elapsed {
                break;
            }
            color = Some(step_color);
            self.next_step += 1;
        }
        color
    }

    /// Time the next step is due, or `None` when finished
    pub fn next_deadline(&self) -> Option<u64> {
        STARTUP_STEPS
            .get(self.next_step)
            .map(|&(offset, _)| self.started_ms + offset)
    }

    /// Skip all remaining steps
    pub fn abort(&mut self) {
        self.next_step = STARTUP_STEPS.len();
    }

    pub fn is_finished(&self) -> bool {
        self.next_step >= STARTUP_STEPS.len()
    }
}
