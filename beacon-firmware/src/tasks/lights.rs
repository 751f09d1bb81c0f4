//! Lighting task
//!
//! Owns the light controller and the strip outputs. Sleeps until either a
//! command arrives or the next animation step is due, then pushes every
//! strip that changed to the hardware.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_time::{Instant, Timer};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use beacon_core::{LightController, Outcome, StripBuffer};
use beacon_protocol::{StripId, Vocabulary};

use crate::channels::COMMAND_CHANNEL;
use crate::strips::StripOutputs;

type Controller = LightController<StripBuffer, SmallRng>;

fn now_ms() -> u64 {
    Instant::now().as_millis()
}

/// Lights task - runs the startup sequence, commands and animations
#[embassy_executor::task]
pub async fn lights_task(mut outputs: StripOutputs, seed: u64) {
    info!("Lights task started");

    let mut controller = Controller::new(
        StripBuffer::for_all(),
        SmallRng::seed_from_u64(seed),
        now_ms(),
    );

    loop {
        controller.poll(now_ms());
        flush(&mut controller, &mut outputs).await;

        let event = match controller.next_deadline() {
            Some(deadline) => {
                select(
                    COMMAND_CHANNEL.receive(),
                    Timer::at(Instant::from_millis(deadline)),
                )
                .await
            }
            None => Either::First(COMMAND_CHANNEL.receive().await),
        };

        if let Either::First(command) = event {
            if controller.in_startup() {
                info!("Host connected, ending startup sequence");
            }
            report(controller.handle(command, now_ms()));
            flush(&mut controller, &mut outputs).await;
        }
    }
}

/// Write every strip that was shown since the last flush
async fn flush(controller: &mut Controller, outputs: &mut StripOutputs) {
    for &id in StripId::ALL {
        let strip = controller.strip_mut(id);
        if strip.take_flush() {
            outputs.write(id, strip.frame()).await;
        }
    }
}

fn report(outcome: Outcome) {
    match outcome {
        Outcome::UnknownStrip(name) => warn!("Unknown strip: {:?}", name),
        Outcome::UnknownCommand(name) => warn!("Ignoring command: {:?}", name),
        other => debug!("Dispatched: {:?}", other),
    }
}
