//! Onboard status LED task
//!
//! Blinks steadily while the firmware runs and flickers briefly whenever a
//! frame arrives from the host.

use embassy_futures::select::{select, Either};
use embassy_rp::gpio::Output;
use embassy_time::{Duration, Timer};

use crate::channels::FRAME_ACTIVITY;

/// Idle blink half-period
const BLINK_INTERVAL: Duration = Duration::from_millis(650);

/// Toggle spacing of the activity flicker
const ACTIVITY_INTERVAL: Duration = Duration::from_millis(100);

#[embassy_executor::task]
pub async fn status_led_task(mut led: Output<'static>) {
    loop {
        match select(Timer::after(BLINK_INTERVAL), FRAME_ACTIVITY.wait()).await {
            Either::First(()) => led.toggle(),
            Either::Second(()) => {
                for _ in 0..3 {
                    led.toggle();
                    Timer::after(ACTIVITY_INTERVAL).await;
                }
            }
        }
    }
}
