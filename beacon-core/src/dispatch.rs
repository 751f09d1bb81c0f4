//! Command dispatch
//!
//! Turns a decoded [`Command`] into engine actions. Nothing here fails:
//! unknown colors fall back to the last good color, while unknown strips and
//! verbs turn into a no-op [`Outcome`] that the caller logs.

use beacon_protocol::{Color, Command, CommandKind, Named, StripId};
use rand::RngCore;

use crate::animation::{Animation, AnimationEngine, AnimationHandle, Rainbow, Travel};
use crate::palette::{rgb, Palette};
use crate::traits::LedStrip;

/// What a dispatched command did
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// One strip filled with a solid color
    StripFilled { strip: StripId, color: Color },
    /// Every strip filled with a solid color
    RobotFilled { color: Color },
    /// An animation was started
    Started(AnimationHandle),
    /// A strip's animation was cancelled and the strip turned off
    Stopped { strip: StripId, was_running: bool },
    /// The strip name was missing or not recognized
    UnknownStrip(Option<Named<StripId>>),
    /// The verb was not recognized
    UnknownCommand(Named<CommandKind>),
}

/// Maps commands onto the animation engine
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    palette: Palette,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            palette: Palette::new(),
        }
    }

    /// Color that an unknown or missing color name currently resolves to
    pub fn last_color(&self) -> Color {
        self.palette.last()
    }

    /// Apply one command
    pub fn dispatch<S: LedStrip, R: RngCore>(
        &mut self,
        command: Command,
        engine: &mut AnimationEngine<S, R>,
        now_ms: u64,
    ) -> Outcome {
        let Some(kind) = command.command.known() else {
            return Outcome::UnknownCommand(command.command);
        };

        match kind {
            CommandKind::SetWholeStrip => {
                let color = self.palette.resolve(command.color.as_ref());
                let strip = match resolve_strip(command.strip) {
                    Ok(strip) => strip,
                    Err(outcome) => return outcome,
                };
                engine.fill(strip, rgb(color));
                Outcome::StripFilled { strip, color }
            }
            CommandKind::SetWholeRobot => {
                let color = self.palette.resolve(command.color.as_ref());
                engine.fill_all(rgb(color));
                Outcome::RobotFilled { color }
            }
            CommandKind::SingleLightTravel => {
                let color = self.palette.resolve(command.color.as_ref());
                let params = command.travel_params();
                let strip = match resolve_strip(command.strip) {
                    Ok(strip) => strip,
                    Err(outcome) => return outcome,
                };
                let travel = Travel::new(rgb(color), &params);
                Outcome::Started(engine.start(
                    strip,
                    Animation::Travel(travel),
                    params.time_ms,
                    now_ms,
                ))
            }
            CommandKind::ShufflingRainbow => {
                let params = command.rainbow_params();
                let strip = match resolve_strip(command.strip) {
                    Ok(strip) => strip,
                    Err(outcome) => return outcome,
                };
                let rainbow = Rainbow::new(&params);
                Outcome::Started(engine.start(
                    strip,
                    Animation::Rainbow(rainbow),
                    params.speed_ms,
                    now_ms,
                ))
            }
            CommandKind::StopAnimation => {
                let strip = match resolve_strip(command.strip) {
                    Ok(strip) => strip,
                    Err(outcome) => return outcome,
                };
                let was_running = engine.stop(strip);
                let target = engine.strip_mut(strip);
                target.clear();
                target.show();
                Outcome::Stopped { strip, was_running }
            }
        }
    }
}

fn resolve_strip(name: Option<Named<StripId>>) -> Result<StripId, Outcome> {
    match name.as_ref().and_then(Named::known) {
        Some(strip) => Ok(strip),
        None => Err(Outcome::UnknownStrip(name)),
    }
}
