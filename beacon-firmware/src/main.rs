//! Beacon - Robot LED Controller Firmware
//!
//! Receives lighting commands from the robot's Raspberry Pi over UART and
//! drives six WS2812 strips on the pillars and corners of the robot.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::{PIO0, PIO1, UART0};
use embassy_rp::pio::{InterruptHandler as PioInterruptHandler, Pio};
use embassy_rp::pio_programs::ws2812::{PioWs2812, PioWs2812Program};
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use embassy_time::Timer;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use beacon_core::config::STRIPS;

use crate::strips::StripOutputs;

mod channels;
mod random;
mod strips;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
    PIO0_IRQ_0 => PioInterruptHandler<PIO0>;
    PIO1_IRQ_0 => PioInterruptHandler<PIO1>;
});

/// Host link baud rate (8N1, no flow control)
const HOST_BAUD: u32 = 115_200;

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 16]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 1024]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Beacon firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Host link on UART0 (GPIO0 TX, GPIO1 RX)
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = HOST_BAUD;

    let tx_buf = TX_BUF.init([0u8; 16]);
    let rx_buf = RX_BUF.init([0u8; 1024]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    info!("UART initialized at {} baud", HOST_BAUD);

    // Strip outputs: pillars on PIO0, corners on PIO1
    let Pio {
        common: mut pio0,
        sm0,
        sm1,
        sm2,
        sm3,
        ..
    } = Pio::new(p.PIO0, Irqs);
    let program0 = PioWs2812Program::new(&mut pio0);

    let pillar_fl = PioWs2812::new(&mut pio0, sm0, p.DMA_CH0, p.PIN_27, &program0);
    let pillar_fr = PioWs2812::new(&mut pio0, sm1, p.DMA_CH1, p.PIN_22, &program0);
    let pillar_bl = PioWs2812::new(&mut pio0, sm2, p.DMA_CH2, p.PIN_18, &program0);
    let pillar_br = PioWs2812::new(&mut pio0, sm3, p.DMA_CH3, p.PIN_13, &program0);

    let Pio {
        common: mut pio1,
        sm0,
        sm1,
        ..
    } = Pio::new(p.PIO1, Irqs);
    let program1 = PioWs2812Program::new(&mut pio1);

    let corner_l = PioWs2812::new(&mut pio1, sm0, p.DMA_CH4, p.PIN_9, &program1);
    let corner_r = PioWs2812::new(&mut pio1, sm1, p.DMA_CH5, p.PIN_5, &program1);

    let outputs = StripOutputs {
        pillar_fl,
        pillar_fr,
        pillar_bl,
        pillar_br,
        corner_l,
        corner_r,
    };

    for strip in &STRIPS {
        debug!("Strip {:?}: GPIO{} x{}", strip.id, strip.pin, strip.length);
    }
    info!("PIO strip outputs initialized");

    let status_led = Output::new(p.PIN_25, Level::Low);

    // Spawn tasks
    spawner.spawn(tasks::lights_task(outputs, random::get_seed())).unwrap();
    spawner.spawn(tasks::serial_rx_task(rx)).unwrap();
    spawner.spawn(tasks::status_led_task(status_led)).unwrap();

    info!("All tasks spawned, firmware running");

    // Keep the PIO blocks and the UART TX half alive
    let _keep = (pio0, pio1, tx);
    loop {
        Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
