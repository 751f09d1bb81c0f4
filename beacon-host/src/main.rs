//! Beacon host bridge
//!
//! Runs on the robot's Raspberry Pi. Every tick it samples the telemetry
//! feed, reduces it to one whole-robot color and sends that command to the
//! LED controller over serial.
//!
//! Usage: `beacon-host [CONFIG] < telemetry-feed`

mod config;
mod error;
mod feed;
mod link;

use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;
use std::time::{Duration, Instant};

use beacon_core::{CommandEncoder, StateSource};
use clap::{value_parser, Arg, Command};

use crate::config::{HostConfig, DEFAULT_CONFIG_PATH};
use crate::error::HostError;
use crate::feed::FeedStateSource;
use crate::link::{open_port, Delivery, Link};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn cli() -> Command {
    Command::new("beacon-host")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Turns robot telemetry lines on stdin into LED commands on a serial port")
        .arg(
            Arg::new("config")
                .value_name("CONFIG")
                .help("Path to the TOML config file")
                .value_parser(value_parser!(PathBuf))
                .default_value(DEFAULT_CONFIG_PATH),
        )
}

fn run() -> Result<(), HostError> {
    let matches = cli().get_matches();
    let path = matches
        .get_one::<PathBuf>("config")
        .cloned()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let config = HostConfig::load(&path)?;
    log::info!(
        "Sending to {} at {} baud every {} ms",
        config.serial.port,
        config.serial.baud,
        config.tick_ms
    );

    let source = FeedStateSource::spawn_stdin(config.topics.clone())?;
    let serial = config.serial.clone();
    let mut link = Link::new(move || open_port(&serial));
    let mut encoder = CommandEncoder::new();

    let interval = Duration::from_millis(config.tick_ms);
    let mut next_tick = Instant::now();
    let mut last_color = None;

    loop {
        let state = source.sample();
        let command = encoder.tick(&state);
        let frame = command.to_frame()?;

        let color = command.color.as_ref().map(|c| c.as_str().to_owned());
        if color != last_color {
            log::info!("Robot color: {}", color.as_deref().unwrap_or("-"));
            last_color = color;
        }
        log::trace!("{state:?}");

        match link.send(&frame, Instant::now()) {
            Ok(Delivery::Written) => {}
            Ok(Delivery::Skipped) => log::trace!("Link down, frame dropped"),
            Err(e) => log::warn!("Frame dropped: {e}"),
        }

        next_tick += interval;
        let now = Instant::now();
        if next_tick > now {
            thread::sleep(next_tick - now);
        } else {
            next_tick = now;
        }
    }
}
