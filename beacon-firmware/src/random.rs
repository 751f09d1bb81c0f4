//! Seed for the animation RNG

use embassy_rp::clocks::RoscRng;
use rand::RngCore;

/// Seed drawn from the ring oscillator's jitter
pub fn get_seed() -> u64 {
    RoscRng.next_u64()
}
