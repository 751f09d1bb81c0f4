//! Per-strip animation engine
//!
//! Each strip has one animation slot. Starting an animation on a strip
//! replaces whatever ran there before, and so does filling the strip with a
//! solid color. Slots are stepped from [`AnimationEngine::poll`]; the caller
//! sleeps until [`AnimationEngine::next_deadline`] in between.

mod rainbow;
mod travel;

pub use rainbow::Rainbow;
pub use travel::Travel;

use beacon_protocol::{StripId, Vocabulary, STRIP_COUNT};
use rand::RngCore;

use crate::palette::Rgb;
use crate::traits::LedStrip;

/// A running effect
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Animation {
    Travel(Travel),
    Rainbow(Rainbow),
}

impl Animation {
    fn step<S: LedStrip, R: RngCore>(&mut self, strip: &mut S, rng: &mut R) {
        match self {
            Animation::Travel(travel) => travel.step(strip),
            Animation::Rainbow(rainbow) => rainbow.step(strip, rng),
        }
    }
}

/// Token for one started animation
///
/// A handle stays bound to the animation it was returned for; once that
/// animation is replaced, cancelling through the old handle does nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AnimationHandle {
    strip: StripId,
    generation: u32,
}

impl AnimationHandle {
    /// Strip the animation runs on
    pub fn strip(&self) -> StripId {
        self.strip
    }
}

#[derive(Debug)]
struct Slot {
    animation: Animation,
    interval_ms: u64,
    next_due_ms: u64,
    generation: u32,
}

/// Owns the strips and steps their animations
pub struct AnimationEngine<S, R> {
    strips: [S; STRIP_COUNT],
    slots: [Option<Slot>; STRIP_COUNT],
    generations: [u32; STRIP_COUNT],
    rng: R,
}

impl<S: LedStrip, R: RngCore> AnimationEngine<S, R> {
    /// Create an engine over `strips`, indexed by [`StripId::index`]
    pub fn new(strips: [S; STRIP_COUNT], rng: R) -> Self {
        Self {
            strips,
            slots: Default::default(),
            generations: [0; STRIP_COUNT],
            rng,
        }
    }

    pub fn strip(&self, id: StripId) -> &S {
        &self.strips[id.index()]
    }

    pub fn strip_mut(&mut self, id: StripId) -> &mut S {
        &mut self.strips[id.index()]
    }

    pub fn strips_mut(&mut self) -> &mut [S; STRIP_COUNT] {
        &mut self.strips
    }

    /// Fill one strip with a solid color, cancelling its animation
    pub fn fill(&mut self, id: StripId, color: Rgb) {
        self.stop(id);
        self.strips[id.index()].fill(color);
    }

    /// Fill every strip with a solid color, cancelling all animations
    pub fn fill_all(&mut self, color: Rgb) {
        for &id in StripId::ALL {
            self.fill(id, color);
        }
    }

    /// Start an animation on a strip, replacing any that is running there
    ///
    /// The first step happens one interval after `now_ms`. An interval of 0
    /// is treated as 1 ms.
    pub fn start(
        &mut self,
        id: StripId,
        animation: Animation,
        interval_ms: u32,
        now_ms: u64,
    ) -> AnimationHandle {
        let index = id.index();
        let generation = self.generations[index].wrapping_add(1);
        self.generations[index] = generation;

        let interval_ms = u64::from(interval_ms.max(1));
        self.slots[index] = Some(Slot {
            animation,
            interval_ms,
            next_due_ms: now_ms + interval_ms,
            generation,
        });

        AnimationHandle {
            strip: id,
            generation,
        }
    }

    /// Cancel the animation a handle refers to
    ///
    /// Returns false if it was already cancelled or replaced.
    pub fn cancel(&mut self, handle: AnimationHandle) -> bool {
        let slot = &mut self.slots[handle.strip.index()];
        match slot {
            Some(s) if s.generation == handle.generation => {
                *slot = None;
                true
            }
            _ => false,
        }
    }

    /// Cancel whatever runs on a strip; returns true if something was running
    pub fn stop(&mut self, id: StripId) -> bool {
        self.slots[id.index()].take().is_some()
    }

    pub fn is_running(&self, handle: AnimationHandle) -> bool {
        matches!(
            &self.slots[handle.strip.index()],
            Some(s) if s.generation == handle.generation
        )
    }

    /// Currently running animation on a strip
    pub fn animation(&self, id: StripId) -> Option<&Animation> {
        self.slots[id.index()].as_ref().map(|s| &s.animation)
    }

    /// Earliest time any animation is due, or `None` if nothing runs
    pub fn next_deadline(&self) -> Option<u64> {
        self.slots
            .iter()
            .flatten()
            .map(|s| s.next_due_ms)
            .min()
    }

    /// Step every animation that is due at `now_ms`
    ///
    /// Each due animation steps once. One that has fallen more than an
    /// interval behind is rescheduled from `now_ms` rather than catching up.
    /// Returns the number of animations stepped.
    pub fn poll(&mut self, now_ms: u64) -> usize {
        let mut stepped = 0;
        for (slot, strip) in self.slots.iter_mut().zip(self.strips.iter_mut()) {
            let Some(slot) = slot else { continue };
            if slot.next_due_ms > now_ms {
                continue;
            }

            slot.animation.step(strip, &mut self.rng);
            stepped += 1;

            slot.next_due_ms += slot.interval_ms;
            if slot.next_due_ms <= now_ms {
                slot.next_due_ms = now_ms + slot.interval_ms;
            }
        }
        stepped
    }
}
