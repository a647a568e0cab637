//! Playback state machine for the idle / gogo sprite loops.

use std::time::Duration;

use tracing::debug;

use crate::{AnimationKind, CharacterSelection, Clock, FrameRate, ManualClock, PlaybackError};

/// Which animation is currently driving the sprite.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlaybackMode {
    /// Looping the idle frames on the idle clock
    #[default]
    Idle,
    /// Playing the one-shot gogo-start frames on the gogo clock
    GogoTransition,
    /// Looping the gogo frames on the gogo clock
    GogoLoop,
}

/// Snapshot of the controller's mode, cursors and request flag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlaybackState {
    /// Animation currently playing
    pub mode: PlaybackMode,
    /// Next idle frame to present
    pub idle_cursor: usize,
    /// Next gogo-loop frame to present
    pub gogo_cursor: usize,
    /// Next gogo-start frame to present
    pub transition_cursor: usize,
    /// Latest gogo request, read on the next tick
    pub gogo_requested: bool,
}

impl PlaybackState {
    #[inline]
    pub fn transition_in_progress(&self) -> bool {
        self.mode == PlaybackMode::GogoTransition
    }
}

/// Drives idle, gogo-start and gogo-loop playback for one character.
///
/// The controller owns two clocks: the idle clock paces `Idle`, the gogo
/// clock paces `GogoTransition` and `GogoLoop`. At most one of them runs at
/// a time. The host waits on [`active_clock`](Self::active_clock) and calls
/// [`tick`](Self::tick) whenever it fires.
///
/// A gogo request is only read on tick boundaries, and a started transition
/// always plays to its last frame.
///
/// ## Example
///
/// ```rust
/// use taskbar_anim_core::{CharacterSelection, FrameRate, PlaybackController, PlaybackMode};
///
/// let character = CharacterSelection::new(0, vec!["A", "B"], vec!["T"], vec!["L"]);
/// let mut controller = PlaybackController::manual(character, FrameRate::DEFAULT);
///
/// controller.tick();
/// assert_eq!(controller.current_frame(), Some(&"A"));
///
/// controller.set_gogo_requested(true);
/// controller.tick();
/// assert_eq!(controller.current_frame(), Some(&"T"));
/// assert_eq!(controller.mode(), PlaybackMode::GogoLoop);
///
/// controller.tick();
/// assert_eq!(controller.current_frame(), Some(&"L"));
/// ```
#[derive(Debug)]
pub struct PlaybackController<H, C> {
    character: CharacterSelection<H>,
    idle_clock: C,
    gogo_clock: C,
    state: PlaybackState,
    frame_rate: FrameRate,
    /// Last presented frame as (set, index)
    current: Option<(AnimationKind, usize)>,
}

impl<H> PlaybackController<H, ManualClock> {
    /// Create a controller whose ticks are delivered by the caller.
    pub fn manual(character: CharacterSelection<H>, frame_rate: FrameRate) -> Self {
        let interval = frame_rate.interval();
        Self::new(
            character,
            frame_rate,
            ManualClock::new(interval),
            ManualClock::new(interval),
        )
    }
}

impl<H, C: Clock> PlaybackController<H, C> {
    /// Create a controller in `Idle` with the idle clock running.
    pub fn new(
        character: CharacterSelection<H>,
        frame_rate: FrameRate,
        mut idle_clock: C,
        mut gogo_clock: C,
    ) -> Self {
        idle_clock.set_interval(frame_rate.interval());
        gogo_clock.set_interval(frame_rate.interval());
        gogo_clock.stop();
        idle_clock.start();

        Self {
            character,
            idle_clock,
            gogo_clock,
            state: PlaybackState::default(),
            frame_rate,
            current: None,
        }
    }

    /// Advance playback by one tick of the active clock.
    ///
    /// Returns true if a new frame was presented.
    pub fn tick(&mut self) -> bool {
        match self.state.mode {
            PlaybackMode::Idle => {
                if self.state.gogo_requested {
                    self.begin_gogo()
                } else {
                    self.present_idle()
                }
            }
            PlaybackMode::GogoTransition => self.advance_transition(),
            PlaybackMode::GogoLoop => {
                if self.state.gogo_requested {
                    self.present_gogo_loop()
                } else {
                    self.gogo_clock.stop();
                    self.idle_clock.start();
                    self.set_mode(PlaybackMode::Idle);
                    self.present_idle()
                }
            }
        }
    }

    /// Request or release the gogo animation.
    ///
    /// Takes effect on the next tick. Repeating the current value is a no-op.
    pub fn set_gogo_requested(&mut self, requested: bool) {
        if self.state.gogo_requested != requested {
            debug!(requested, mode = ?self.state.mode, "gogo request changed");
        }
        self.state.gogo_requested = requested;
    }

    /// Replace all three frame sets with a newly loaded character.
    ///
    /// Cursors go back to 0 and any transition or loop progress is dropped;
    /// playback resumes in `Idle`. The gogo request flag is kept, so a
    /// pending request restarts the new character's transition on the next
    /// tick.
    pub fn set_character(&mut self, character: CharacterSelection<H>) {
        debug!(
            from = self.character.id,
            to = character.id,
            mode = ?self.state.mode,
            "replacing character frames"
        );
        self.character = character;
        self.state.idle_cursor = 0;
        self.state.gogo_cursor = 0;
        self.state.transition_cursor = 0;
        self.current = None;

        self.gogo_clock.stop();
        if !self.idle_clock.is_running() {
            self.idle_clock.start();
        }
        self.set_mode(PlaybackMode::Idle);
    }

    /// Change the frame rate of both clocks.
    ///
    /// The running clock uses the new interval from its next tick on;
    /// cursors and mode are untouched. Re-applying the current rate keeps
    /// the clocks' phase. Non-positive rates are rejected and leave the
    /// controller unchanged.
    pub fn set_frame_rate(&mut self, fps: i32) -> Result<(), PlaybackError> {
        let frame_rate = FrameRate::new(fps)?;
        if frame_rate == self.frame_rate {
            return Ok(());
        }
        self.frame_rate = frame_rate;
        self.idle_clock.set_interval(frame_rate.interval());
        self.gogo_clock.set_interval(frame_rate.interval());
        debug!(fps = frame_rate.fps(), interval = ?frame_rate.interval(), "clocks re-armed");
        Ok(())
    }

    /// The frame most recently presented, if any.
    pub fn current_frame(&self) -> Option<&H> {
        self.current
            .and_then(|(kind, index)| self.character.frames(kind).get(index))
    }

    /// The set and index of the frame most recently presented.
    #[inline]
    pub fn current_position(&self) -> Option<(AnimationKind, usize)> {
        self.current
    }

    /// Get the current playback mode.
    #[inline]
    pub fn mode(&self) -> PlaybackMode {
        self.state.mode
    }

    /// Copy of the mode, cursors and request flag.
    #[inline]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Get the current frame rate.
    #[inline]
    pub fn frame_rate(&self) -> FrameRate {
        self.frame_rate
    }

    /// Interval the active clock is currently armed with.
    #[inline]
    pub fn interval(&self) -> Duration {
        self.active_clock().interval()
    }

    /// Id of the character being played.
    #[inline]
    pub fn character_id(&self) -> i32 {
        self.character.id
    }

    /// Frame sets of the character being played.
    #[inline]
    pub fn character(&self) -> &CharacterSelection<H> {
        &self.character
    }

    /// The clock that paces the current mode.
    pub fn active_clock(&self) -> &C {
        match self.state.mode {
            PlaybackMode::Idle => &self.idle_clock,
            PlaybackMode::GogoTransition | PlaybackMode::GogoLoop => &self.gogo_clock,
        }
    }

    /// Mutable access to the active clock, for hosts that await its ticks.
    pub fn active_clock_mut(&mut self) -> &mut C {
        match self.state.mode {
            PlaybackMode::Idle => &mut self.idle_clock,
            PlaybackMode::GogoTransition | PlaybackMode::GogoLoop => &mut self.gogo_clock,
        }
    }

    /// Clock pacing `Idle`.
    #[inline]
    pub fn idle_clock(&self) -> &C {
        &self.idle_clock
    }

    /// Clock pacing `GogoTransition` and `GogoLoop`.
    #[inline]
    pub fn gogo_clock(&self) -> &C {
        &self.gogo_clock
    }

    fn set_mode(&mut self, mode: PlaybackMode) {
        if self.state.mode != mode {
            debug!(from = ?self.state.mode, to = ?mode, "playback mode changed");
            self.state.mode = mode;
        }
    }

    fn begin_gogo(&mut self) -> bool {
        self.idle_clock.stop();
        self.gogo_clock.start();
        self.state.transition_cursor = 0;

        if self.character.gogo_start.is_empty() {
            self.set_mode(PlaybackMode::GogoLoop);
            return false;
        }
        self.set_mode(PlaybackMode::GogoTransition);
        self.advance_transition()
    }

    fn advance_transition(&mut self) -> bool {
        let len = self.character.gogo_start.len();
        let cursor = self.state.transition_cursor;

        let presented = cursor < len;
        if presented {
            self.current = Some((AnimationKind::GogoStart, cursor));
            self.state.transition_cursor = cursor + 1;
        }

        if self.state.transition_cursor >= len {
            self.set_mode(PlaybackMode::GogoLoop);
            self.gogo_clock.start();
        }
        presented
    }

    fn present_idle(&mut self) -> bool {
        if self.character.idle.is_empty() {
            return false;
        }
        let cursor = self.state.idle_cursor;
        self.current = Some((AnimationKind::Idle, cursor));
        self.state.idle_cursor = self.character.idle.next_cursor(cursor);
        true
    }

    fn present_gogo_loop(&mut self) -> bool {
        if self.character.gogo_loop.is_empty() {
            return false;
        }
        let cursor = self.state.gogo_cursor;
        self.current = Some((AnimationKind::GogoLoop, cursor));
        self.state.gogo_cursor = self.character.gogo_loop.next_cursor(cursor);
        true
    }
}
