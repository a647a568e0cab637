//! Tokio driver for an [`Overlay`].
//!
//! Ticks from the active clock and commands from the settings side are
//! handled one at a time in a single `select!` loop, so a command always
//! lands fully between two ticks.

use std::str::FromStr;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::{FrameSource, Offset, Overlay, OverlaySettings, Presenter, Side, TokioClock};

/// A change requested from outside the playback loop.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    SetGogo(bool),
    SetCharacter(i32),
    SetFrameRate(i32),
    SetSide(Side),
    /// Offset for the active side
    SetOffset(Offset),
    /// Commit a whole settings dialog result
    Apply(OverlaySettings),
    Shutdown,
}

impl FromStr for Command {
    type Err = String;

    /// Parse a text command: `gogo on|off`, `char <id>`, `fps <n>`,
    /// `side 1p|2p`, `offset <x> <y>`, `quit`.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let verb = words.next().ok_or_else(|| "empty command".to_string())?;
        let args: Vec<&str> = words.collect();

        let int = |s: &str| s.parse::<i32>().map_err(|e| format!("'{}': {}", s, e));
        let float = |s: &str| s.parse::<f64>().map_err(|e| format!("'{}': {}", s, e));

        match (verb.to_ascii_lowercase().as_str(), args.as_slice()) {
            ("gogo", [flag]) => match *flag {
                "on" | "true" | "1" => Ok(Command::SetGogo(true)),
                "off" | "false" | "0" => Ok(Command::SetGogo(false)),
                other => Err(format!("expected on or off, got '{}'", other)),
            },
            ("char" | "character", [id]) => Ok(Command::SetCharacter(int(*id)?)),
            ("fps", [fps]) => Ok(Command::SetFrameRate(int(*fps)?)),
            ("side", [side]) => Ok(Command::SetSide(side.parse()?)),
            ("offset", [x, y]) => Ok(Command::SetOffset(Offset::new(float(*x)?, float(*y)?))),
            ("quit" | "exit", []) => Ok(Command::Shutdown),
            _ => Err(format!("unknown command '{}'", line.trim())),
        }
    }
}

/// Drive `overlay` until a [`Command::Shutdown`] arrives or every sender is
/// dropped. Returns the overlay in its final state.
///
/// Presented frames and placement changes go to `presenter`. Commands that
/// fail (bad frame rate, unloadable character) are logged and ignored.
pub async fn run_overlay<S, P>(
    mut overlay: Overlay<S, TokioClock>,
    mut presenter: P,
    mut commands: mpsc::Receiver<Command>,
) -> Overlay<S, TokioClock>
where
    S: FrameSource,
    P: Presenter<S::Handle>,
{
    presenter.place(overlay.placement());

    loop {
        tokio::select! {
            biased;

            command = commands.recv() => {
                let Some(command) = command else {
                    debug!("command channel closed");
                    break;
                };
                if !handle_command(&mut overlay, &mut presenter, command) {
                    break;
                }
            }
            _ = overlay.controller_mut().active_clock_mut().tick() => {
                if overlay.tick() {
                    presenter.show(overlay.current_frame());
                }
            }
        }
    }

    overlay
}

/// Apply one command. Returns false on shutdown.
fn handle_command<S, P>(overlay: &mut Overlay<S, TokioClock>, presenter: &mut P, command: Command) -> bool
where
    S: FrameSource,
    P: Presenter<S::Handle>,
{
    debug!(?command, "command received");
    match command {
        Command::SetGogo(requested) => overlay.set_gogo_requested(requested),
        Command::SetCharacter(id) => match overlay.set_character(id) {
            Ok(()) => presenter.show(overlay.current_frame()),
            Err(e) => warn!(error = %e, "character change rejected"),
        },
        Command::SetFrameRate(fps) => {
            if let Err(e) = overlay.set_frame_rate(fps) {
                warn!(error = %e, "frame rate change rejected");
            }
        }
        Command::SetSide(side) => {
            overlay.set_side(side);
            presenter.place(overlay.placement());
        }
        Command::SetOffset(offset) => {
            overlay.set_offset(offset);
            presenter.place(overlay.placement());
        }
        Command::Apply(settings) => {
            let character = overlay.controller().character_id();
            match overlay.apply(settings) {
                Ok(()) => {
                    if settings.character_id != character {
                        presenter.show(overlay.current_frame());
                    }
                    presenter.place(overlay.placement());
                }
                Err(e) => warn!(error = %e, "settings rejected"),
            }
        }
        Command::Shutdown => return false,
    }
    true
}
