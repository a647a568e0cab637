//! Headless preview for taskbar-anim-core.
//!
//! Plays a character from `<base-dir>/Flames` and prints every presented
//! frame. Settings are changed by typing commands on stdin:
//! `gogo on|off`, `char <id>`, `fps <n>`, `side 1p|2p`, `offset <x> <y>`,
//! `quit`.

use std::path::PathBuf;

use clap::Parser;
use taskbar_anim_core::{
    run_overlay, CharacterConfig, Command, DirectorySource, FrameRate, Geometry, Overlay,
    OverlaySettings, Placement, Presenter, Side, TokioClock, WorkArea,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Preview the taskbar overlay animation without a window
#[derive(Parser, Debug)]
#[command(name = "taskbar-anim")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory containing the Flames/ asset folder
    #[arg(short = 'C', long, default_value = ".")]
    base_dir: PathBuf,

    /// Frames per second
    #[arg(long, default_value_t = 60)]
    fps: i32,

    /// Player side: 1p or 2p
    #[arg(long, default_value = "1p")]
    side: Side,

    /// Character id to start with (defaults to the first configured one)
    #[arg(long)]
    character: Option<i32>,

    /// Work area width in pixels
    #[arg(long, default_value_t = 1920.0)]
    area_width: f64,

    /// Work area height in pixels
    #[arg(long, default_value_t = 1040.0)]
    area_height: f64,

    /// Overlay window size in pixels
    #[arg(long, default_value_t = 256.0)]
    window_size: f64,
}

/// Prints frames and placements to stdout.
struct StdoutPresenter;

impl Presenter<PathBuf> for StdoutPresenter {
    fn show(&mut self, frame: Option<&PathBuf>) {
        match frame {
            Some(path) => println!("frame {}", path.display()),
            None => println!("frame -"),
        }
    }

    fn place(&mut self, placement: Placement) {
        println!(
            "place left={} top={} mirrored={}",
            placement.left, placement.top, placement.mirrored
        );
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let characters = CharacterConfig::load(&cli.base_dir);
    let source = DirectorySource::new(&cli.base_dir);
    info!(root = %source.root().display(), "reading frames");

    let interval = FrameRate::DEFAULT.interval();
    let mut overlay = Overlay::new(
        source,
        characters,
        TokioClock::new(interval),
        TokioClock::new(interval),
    )?
    .with_geometry(Geometry {
        area: WorkArea::from_size(cli.area_width, cli.area_height),
        window_width: cli.window_size,
        window_height: cli.window_size,
    });
    info!(count = overlay.characters().characters().len(), "characters configured");

    let initial = overlay.settings();
    overlay.apply(OverlaySettings {
        side: cli.side,
        fps: cli.fps,
        character_id: cli.character.unwrap_or(initial.character_id),
        ..initial
    })?;

    let (tx, rx) = mpsc::channel(16);
    tokio::spawn(read_commands(tx));

    run_overlay(overlay, StdoutPresenter, rx).await;
    info!("stopped");
    Ok(())
}

/// Forward stdin lines as commands until EOF or `quit`.
async fn read_commands(tx: mpsc::Sender<Command>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                warn!(error = %e, "stdin read failed");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        match line.parse::<Command>() {
            Ok(command) => {
                if tx.send(command).await.is_err() {
                    return;
                }
            }
            Err(e) => warn!("{}", e),
        }
    }
    let _ = tx.send(Command::Shutdown).await;
}
