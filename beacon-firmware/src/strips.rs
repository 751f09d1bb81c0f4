//! PIO-driven WS2812 outputs
//!
//! Four strips run on PIO0 and two on PIO1, one state machine each. Every
//! output is sized for the longest strip; pixels past a strip's length stay
//! off in the frame buffer.

use embassy_rp::peripherals::{PIO0, PIO1};
use embassy_rp::pio_programs::ws2812::PioWs2812;

use beacon_core::config::MAX_STRIP_LEN;
use beacon_core::Rgb;
use beacon_protocol::StripId;

pub type Ws2812<P, const SM: usize> = PioWs2812<'static, P, SM, MAX_STRIP_LEN>;

/// The six hardware strip outputs
pub struct StripOutputs {
    pub pillar_fl: Ws2812<PIO0, 0>,
    pub pillar_fr: Ws2812<PIO0, 1>,
    pub pillar_bl: Ws2812<PIO0, 2>,
    pub pillar_br: Ws2812<PIO0, 3>,
    pub corner_l: Ws2812<PIO1, 0>,
    pub corner_r: Ws2812<PIO1, 1>,
}

impl StripOutputs {
    /// Push one frame to a strip
    pub async fn write(&mut self, id: StripId, frame: &[Rgb; MAX_STRIP_LEN]) {
        match id {
            StripId::PillarFL => self.pillar_fl.write(frame).await,
            StripId::PillarFR => self.pillar_fr.write(frame).await,
            StripId::PillarBL => self.pillar_bl.write(frame).await,
            StripId::PillarBR => self.pillar_br.write(frame).await,
            StripId::CornerL => self.corner_l.write(frame).await,
            StripId::CornerR => self.corner_r.write(frame).await,
        }
    }
}
