//! # taskbar-anim-core
//!
//! Playback core for an animated character sprite overlaid above the
//! desktop taskbar.
//!
//! This crate provides platform-agnostic data structures and logic for:
//! - Enumerating and loading numbered frame files per character
//! - Switching between the idle loop, the one-shot gogo-start lead-in and
//!   the gogo loop on external request
//! - Pacing playback with two clocks driven at a configurable frame rate
//! - Placing the overlay window for the 1P or 2P side
//!
//! ## Features
//!
//! - `serde` - Enable serialization/deserialization for value types
//! - `json` - Read the character list from `Flames/config.json`
//! - `png` - Decode frames into RGBA [`Sprite`]s
//! - `runtime` - Tokio-backed [`TokioClock`] and [`run_overlay`] driver
//! - `cli` - The `taskbar-anim` preview binary
//!
//! ## Example
//!
//! ```rust,ignore
//! use taskbar_anim_core::{CharacterConfig, DirectorySource, Overlay, TokioClock, run_overlay};
//!
//! let characters = CharacterConfig::load(&base_dir);
//! let overlay = Overlay::new(
//!     DirectorySource::new(&base_dir),
//!     characters,
//!     TokioClock::new(interval),
//!     TokioClock::new(interval),
//! )?;
//!
//! // Feed Command values from the settings UI; frames reach the presenter.
//! run_overlay(overlay, presenter, commands).await;
//! ```

mod animation;
mod clock;
mod data;
mod details;
mod error;
mod loader;
mod overlay;
mod placement;
#[cfg(feature = "runtime")]
mod runtime;

pub use animation::{PlaybackController, PlaybackMode, PlaybackState};
pub use clock::{Clock, FrameRate, ManualClock};
pub use data::{AnimationKind, CharacterSelection, FrameFile, FrameSet};
pub use details::{CharacterConfig, CharacterEntry};
pub use error::{ConfigError, LoadError, OverlayError, PlaybackError};
pub use loader::{list_frame_files, DirectorySource, FrameSource, ASSET_DIR};
pub use overlay::{Geometry, Overlay, OverlaySettings, Presenter};
pub use placement::{Offset, Placement, Side, SideOffsets, WorkArea};

#[cfg(feature = "png")]
pub use loader::{PngSource, Sprite};

#[cfg(feature = "runtime")]
pub use clock::TokioClock;
#[cfg(feature = "runtime")]
pub use runtime::{run_overlay, Command};
