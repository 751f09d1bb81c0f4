//! Host UART receive task
//!
//! Splits the byte stream into frames and forwards decoded commands to the
//! lights task.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::uart::BufferedUartRx;
use embassy_time::{Duration, Instant, Timer};
use embedded_io_async::Read;

use beacon_protocol::FrameReceiver;

use crate::channels::{COMMAND_CHANNEL, FRAME_ACTIVITY};

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Bytes received this long after boot are treated as line noise
const BOOT_FLUSH_DELAY: Duration = Duration::from_secs(1);

/// Serial RX task - receives frames from the host and queues commands
#[embassy_executor::task]
pub async fn serial_rx_task(mut rx: BufferedUartRx) {
    info!("Serial RX task started");

    let mut receiver = FrameReceiver::new();
    let mut buf = [0u8; RX_BUF_SIZE];
    let mut boot_flush = Some(Instant::now() + BOOT_FLUSH_DELAY);

    loop {
        let read = match boot_flush {
            Some(at) => match select(rx.read(&mut buf), Timer::at(at)).await {
                Either::First(read) => read,
                Either::Second(()) => {
                    if !receiver.pending().is_empty() {
                        debug!("Dropping {} bytes received during boot", receiver.pending().len());
                    }
                    receiver.clear();
                    boot_flush = None;
                    continue;
                }
            },
            None => rx.read(&mut buf).await,
        };

        let n = match read {
            Ok(n) => n,
            Err(e) => {
                warn!("UART read error: {:?}", e);
                continue;
            }
        };
        trace!("RX: {} bytes", n);

        for result in receiver.feed_bytes(&buf[..n]) {
            match result {
                Ok(command) => {
                    FRAME_ACTIVITY.signal(());
                    COMMAND_CHANNEL.send(command).await;
                }
                Err(e) => {
                    warn!("Discarding frame: {}", e);
                }
            }
        }
    }
}
