//! Overlay session: playback plus character list, side and placement.
//!
//! The settings dialog works on an [`OverlaySettings`] snapshot and hands
//! the edited value back to [`Overlay::apply`], which commits it in one
//! step between ticks.

use tracing::{info, warn};

use crate::{
    CharacterConfig, CharacterSelection, Clock, FrameRate, FrameSource, ManualClock, Offset,
    OverlayError, Placement, PlaybackController, Side, SideOffsets, WorkArea,
};

/// Everything the settings dialog can change.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OverlaySettings {
    pub gogo: bool,
    pub side: Side,
    pub character_id: i32,
    /// Frames per second; must be positive
    pub fps: i32,
    pub offsets: SideOffsets,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            gogo: false,
            side: Side::OneP,
            character_id: 0,
            fps: FrameRate::DEFAULT.fps() as i32,
            offsets: SideOffsets::default(),
        }
    }
}

/// Receiver of frame selections and window placements.
pub trait Presenter<H> {
    /// Display `frame`, or clear the sprite when `None`.
    fn show(&mut self, frame: Option<&H>);

    fn place(&mut self, placement: Placement);
}

/// Window geometry used to compute [`Placement`]s.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Geometry {
    pub area: WorkArea,
    pub window_width: f64,
    pub window_height: f64,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            area: WorkArea::from_size(1920.0, 1040.0),
            window_width: 256.0,
            window_height: 256.0,
        }
    }
}

/// A running overlay: one character's playback and where it is shown.
pub struct Overlay<S: FrameSource, C> {
    source: S,
    characters: CharacterConfig,
    controller: PlaybackController<S::Handle, C>,
    side: Side,
    offsets: SideOffsets,
    geometry: Geometry,
}

impl<S: FrameSource> Overlay<S, ManualClock> {
    /// Create an overlay whose ticks are delivered by the caller.
    pub fn manual(source: S, characters: CharacterConfig) -> Result<Self, OverlayError> {
        let interval = FrameRate::DEFAULT.interval();
        Self::new(source, characters, ManualClock::new(interval), ManualClock::new(interval))
    }
}

impl<S: FrameSource, C: Clock> Overlay<S, C> {
    /// Load the first configured character and start idling at the default
    /// frame rate on the 1P side.
    pub fn new(source: S, characters: CharacterConfig, idle_clock: C, gogo_clock: C) -> Result<Self, OverlayError> {
        let characters = characters.or_builtin();
        let id = characters.initial_id();
        let character = load(&source, &characters, id)?;
        info!(
            id,
            idle = character.idle.len(),
            gogo_start = character.gogo_start.len(),
            gogo = character.gogo_loop.len(),
            "character loaded"
        );

        Ok(Self {
            controller: PlaybackController::new(character, FrameRate::DEFAULT, idle_clock, gogo_clock),
            source,
            characters,
            side: Side::default(),
            offsets: SideOffsets::default(),
            geometry: Geometry::default(),
        })
    }

    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = geometry;
        self
    }

    /// Snapshot of the current settings, to seed the settings dialog.
    pub fn settings(&self) -> OverlaySettings {
        OverlaySettings {
            gogo: self.controller.state().gogo_requested,
            side: self.side,
            character_id: self.controller.character_id(),
            fps: self.controller.frame_rate().fps() as i32,
            offsets: self.offsets,
        }
    }

    /// Commit edited settings.
    ///
    /// Frames are reloaded only when the character id changed. If the frame
    /// rate is invalid or the new character fails to load, nothing is
    /// changed.
    pub fn apply(&mut self, settings: OverlaySettings) -> Result<(), OverlayError> {
        FrameRate::new(settings.fps)?;
        let reload = if settings.character_id != self.controller.character_id() {
            Some(load(&self.source, &self.characters, settings.character_id)?)
        } else {
            None
        };

        self.controller.set_gogo_requested(settings.gogo);
        if let Some(character) = reload {
            self.controller.set_character(character);
        }
        self.side = settings.side;
        self.offsets = settings.offsets;
        self.controller.set_frame_rate(settings.fps)?;

        info!(
            gogo = settings.gogo,
            side = ?settings.side,
            character = settings.character_id,
            fps = settings.fps,
            "settings applied"
        );
        Ok(())
    }

    /// Advance playback by one tick of the active clock.
    pub fn tick(&mut self) -> bool {
        self.controller.tick()
    }

    pub fn set_gogo_requested(&mut self, requested: bool) {
        self.controller.set_gogo_requested(requested);
    }

    /// Load and switch to another character. On failure the current one
    /// keeps playing.
    pub fn set_character(&mut self, id: i32) -> Result<(), OverlayError> {
        let character = load(&self.source, &self.characters, id)?;
        self.controller.set_character(character);
        info!(id, "character switched");
        Ok(())
    }

    pub fn set_frame_rate(&mut self, fps: i32) -> Result<(), OverlayError> {
        Ok(self.controller.set_frame_rate(fps)?)
    }

    /// Show the overlay on `side`, at that side's stored offset.
    pub fn set_side(&mut self, side: Side) {
        self.side = side;
    }

    /// Move the window for the active side only.
    pub fn set_offset(&mut self, offset: Offset) {
        self.offsets.set(self.side, offset);
    }

    /// Window position for the active side and its offset.
    pub fn placement(&self) -> Placement {
        Placement::compute(
            &self.geometry.area,
            self.geometry.window_width,
            self.geometry.window_height,
            self.side,
            self.offsets.get(self.side),
        )
    }

    pub fn current_frame(&self) -> Option<&S::Handle> {
        self.controller.current_frame()
    }

    pub fn side(&self) -> Side {
        self.side
    }

    /// Configured characters, with the built-in fallback applied.
    pub fn characters(&self) -> &CharacterConfig {
        &self.characters
    }

    pub fn controller(&self) -> &PlaybackController<S::Handle, C> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut PlaybackController<S::Handle, C> {
        &mut self.controller
    }
}

fn load<S: FrameSource>(
    source: &S,
    characters: &CharacterConfig,
    id: i32,
) -> Result<CharacterSelection<S::Handle>, OverlayError> {
    if !characters.contains(id) {
        warn!(id, "character id not in config, loading anyway");
    }
    source
        .load_character(id)
        .map_err(|source| OverlayError::Load { id, source })
}
