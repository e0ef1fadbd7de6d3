//! Playback state machine over a generated step log.
//!
//! ```text
//! Empty --load--> Ready(0) --next/prev--> Ready(k) ... AtEnd(len-1)
//!   ^                 |                                   |
//!   +--load(empty)----+------------ reset --> Ready(0) <--+
//! ```
//!
//! Auto-advance is a single timer slot owned by [`Playback`]. Every
//! transition that touches the steps, the cursor, or the play flag cancels
//! the pending advance before mutating and re-arms afterwards if playback
//! should continue. The host drives time with [`Playback::tick`]; a timer
//! handle that was cancelled can never fire.

use std::time::Duration;

use cofactor_types::Step;

/// Delay between automatic advances while playing.
pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(1500);

/// Coarse position of the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackPhase {
    /// No steps loaded; cursor unset.
    Empty,
    /// Cursor somewhere before the last step.
    Ready { cursor: usize },
    /// Cursor on the last step. Rewinding is still allowed.
    AtEnd { cursor: usize },
}

/// Identity of one scheduled advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone)]
struct ScheduledAdvance {
    handle: TimerHandle,
    elapsed: Duration,
}

#[derive(Debug, Clone)]
pub struct Playback {
    steps: Vec<Step>,
    cursor: Option<usize>,
    is_playing: bool,
    step_delay: Duration,
    pending: Option<ScheduledAdvance>,
    next_handle: u64,
}

impl Default for Playback {
    fn default() -> Self {
        Self::new(DEFAULT_STEP_DELAY)
    }
}

impl Playback {
    #[must_use]
    pub fn new(step_delay: Duration) -> Self {
        Self {
            steps: Vec::new(),
            cursor: None,
            is_playing: false,
            step_delay,
            pending: None,
            next_handle: 0,
        }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[must_use]
    pub const fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    #[must_use]
    pub const fn is_playing(&self) -> bool {
        self.is_playing
    }

    #[must_use]
    pub const fn step_delay(&self) -> Duration {
        self.step_delay
    }

    /// Step under the cursor.
    #[must_use]
    pub fn current(&self) -> Option<&Step> {
        self.cursor.and_then(|i| self.steps.get(i))
    }

    #[must_use]
    pub fn phase(&self) -> PlaybackPhase {
        match self.cursor {
            None => PlaybackPhase::Empty,
            Some(cursor) if cursor + 1 >= self.steps.len() => PlaybackPhase::AtEnd { cursor },
            Some(cursor) => PlaybackPhase::Ready { cursor },
        }
    }

    #[must_use]
    pub fn at_end(&self) -> bool {
        matches!(self.phase(), PlaybackPhase::AtEnd { .. })
    }

    /// Handle of the outstanding advance, if one is armed.
    #[must_use]
    pub fn pending_advance(&self) -> Option<TimerHandle> {
        self.pending.as_ref().map(|p| p.handle)
    }

    /// Time left until the armed advance fires.
    #[must_use]
    pub fn time_until_advance(&self) -> Option<Duration> {
        self.pending
            .as_ref()
            .map(|p| self.step_delay.saturating_sub(p.elapsed))
    }

    // ------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------

    /// Replace the step log. Cursor goes to 0 and playback pauses.
    pub fn load(&mut self, steps: Vec<Step>) {
        self.cancel_advance();
        self.cursor = if steps.is_empty() { None } else { Some(0) };
        self.steps = steps;
        self.is_playing = false;
        tracing::debug!(len = self.steps.len(), "Playback loaded");
    }

    /// Move forward one step. Returns whether the cursor moved.
    pub fn next(&mut self) -> bool {
        let Some(cursor) = self.cursor else {
            return false;
        };
        let target = (cursor + 1).min(self.steps.len() - 1);
        self.move_to(cursor, target)
    }

    /// Move back one step. Returns whether the cursor moved.
    pub fn prev(&mut self) -> bool {
        let Some(cursor) = self.cursor else {
            return false;
        };
        self.move_to(cursor, cursor.saturating_sub(1))
    }

    pub fn play(&mut self) {
        if self.is_playing {
            return;
        }
        self.cancel_advance();
        self.is_playing = true;
        self.arm_if_playing();
        tracing::debug!(cursor = ?self.cursor, "Playback started");
    }

    pub fn pause(&mut self) {
        if !self.is_playing {
            return;
        }
        self.cancel_advance();
        self.is_playing = false;
        tracing::debug!(cursor = ?self.cursor, "Playback paused");
    }

    pub fn toggle_play(&mut self) {
        if self.is_playing {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Rewind to the first step and pause. Steps are kept.
    pub fn reset(&mut self) {
        self.cancel_advance();
        if !self.steps.is_empty() {
            self.cursor = Some(0);
        }
        self.is_playing = false;
    }

    // ------------------------------------------------------------------
    // Timer
    // ------------------------------------------------------------------

    /// Advance the playback clock. Fires at most one advance per call.
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        let Some(pending) = self.pending.as_mut() else {
            return false;
        };
        pending.elapsed = pending.elapsed.saturating_add(elapsed);
        if pending.elapsed < self.step_delay {
            return false;
        }
        let handle = pending.handle;
        self.fire(handle)
    }

    /// Deliver a timer expiry. Only the currently armed handle has any effect.
    pub fn fire(&mut self, handle: TimerHandle) -> bool {
        if self.pending_advance() != Some(handle) {
            tracing::debug!(?handle, "Ignoring stale playback timer");
            return false;
        }
        self.pending = None;
        self.next()
    }

    fn move_to(&mut self, from: usize, to: usize) -> bool {
        if from == to {
            return false;
        }
        self.cancel_advance();
        self.cursor = Some(to);
        self.arm_if_playing();
        true
    }

    fn cancel_advance(&mut self) {
        self.pending = None;
    }

    fn arm_if_playing(&mut self) {
        debug_assert!(self.pending.is_none(), "advance armed twice");
        let should_arm = self.is_playing && matches!(self.phase(), PlaybackPhase::Ready { .. });
        if !should_arm {
            return;
        }
        let handle = TimerHandle(self.next_handle);
        self.next_handle = self.next_handle.wrapping_add(1);
        self.pending = Some(ScheduledAdvance {
            handle,
            elapsed: Duration::ZERO,
        });
    }
}
