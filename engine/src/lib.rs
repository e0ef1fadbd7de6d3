//! Core engine for Cofactor - state machine and orchestration.
//!
//! This crate contains the App state machine without TUI dependencies.

use std::time::{Duration, Instant};

pub use cofactor_types::{
    CellRef, Matrix, MatrixShapeError, Sign, Step, StepKind, resolve_cell,
    ui::{Focus, UiOptions},
};

mod config;
pub mod generator;
mod matrix_state;
pub mod playback;

pub use config::{AppConfig, CofactorConfig, ConfigError, PlaybackConfig, STEP_DELAY_ENV};
pub use generator::{GenerateError, StepSink, generate, generate_rows};
pub use matrix_state::{MAX_SIZE, MIN_SIZE, MatrixState, Preset, accepts_cell_text};
pub use playback::{DEFAULT_STEP_DELAY, Playback, PlaybackPhase, TimerHandle};

// ============================================================================
// Settings - resolved from config/environment once at startup
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppSettings {
    pub ui_options: UiOptions,
    pub step_delay: Duration,
    pub autoplay: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            ui_options: UiOptions::default(),
            step_delay: DEFAULT_STEP_DELAY,
            autoplay: false,
        }
    }
}

impl AppSettings {
    #[must_use]
    pub fn from_config(config: Option<&CofactorConfig>) -> Self {
        let Some(config) = config else {
            return Self::default();
        };
        let app = config.app.as_ref();
        Self {
            ui_options: UiOptions {
                ascii_only: app.is_some_and(|a| a.ascii_only),
                high_contrast: app.is_some_and(|a| a.high_contrast),
            },
            step_delay: config.step_delay(),
            autoplay: config.autoplay(),
        }
    }
}

// ============================================================================
// App - one interactive session
// ============================================================================

/// Session state driven by the presentation layer.
///
/// All mutations are synchronous and run to completion; the only deferred
/// work is the playback auto-advance, which is advanced by [`App::tick`].
#[derive(Debug)]
pub struct App {
    matrix: MatrixState,
    selected: CellRef,
    preset: Preset,
    playback: Playback,
    focus: Focus,
    settings: AppSettings,
    status_message: Option<String>,
    should_quit: bool,
    last_frame: Instant,
}

impl App {
    /// Build a session from the user's config file, falling back to defaults.
    #[must_use]
    pub fn new() -> Self {
        let config = match CofactorConfig::load() {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!("Ignoring config: {err}");
                None
            }
        };
        Self::with_settings(AppSettings::from_config(config.as_ref()))
    }

    #[must_use]
    pub fn with_settings(settings: AppSettings) -> Self {
        Self {
            matrix: MatrixState::new(),
            selected: CellRef::new(0, 0),
            preset: Preset::ThreeByThree,
            playback: Playback::new(settings.step_delay),
            focus: Focus::Editor,
            settings,
            status_message: None,
            should_quit: false,
            last_frame: Instant::now(),
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn matrix(&self) -> &MatrixState {
        &self.matrix
    }

    pub fn selected(&self) -> CellRef {
        self.selected
    }

    /// Preset most recently loaded into the editor.
    pub fn preset(&self) -> Preset {
        self.preset
    }

    pub fn playback(&self) -> &Playback {
        &self.playback
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn settings(&self) -> AppSettings {
        self.settings
    }

    pub fn ui_options(&self) -> UiOptions {
        self.settings.ui_options
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn toggle_focus(&mut self) {
        self.focus = self.focus.toggle();
    }

    // ------------------------------------------------------------------
    // Calculation
    // ------------------------------------------------------------------

    /// Resolve the editor grid, generate steps, and load them into playback.
    ///
    /// A degenerate grid produces no steps; the previous run stays loaded and
    /// the failure is reported through the status line.
    pub fn calculate(&mut self) -> Result<usize, GenerateError> {
        let rows = self.matrix.resolved();
        match generate_rows(&rows) {
            Ok(steps) => {
                let len = steps.len();
                tracing::info!(size = rows.len(), steps = len, "Calculated determinant");
                self.playback.load(steps);
                if self.settings.autoplay {
                    self.playback.play();
                }
                self.focus = Focus::Playback;
                self.clear_status();
                Ok(len)
            }
            Err(err) => {
                tracing::warn!("Calculation skipped: {err}");
                self.set_status(format!("Cannot calculate: {err}"));
                Err(err)
            }
        }
    }

    // ------------------------------------------------------------------
    // Editor
    // ------------------------------------------------------------------

    /// Move the selected cell, clamped to the grid.
    pub fn move_selection(&mut self, d_row: isize, d_col: isize) {
        let last = self.matrix.size().saturating_sub(1);
        let row = self.selected.row.saturating_add_signed(d_row).min(last);
        let col = self.selected.col.saturating_add_signed(d_col).min(last);
        self.selected = CellRef::new(row, col);
    }

    /// Append a character to the selected cell if the result is still a
    /// partial number. Returns whether the cell changed.
    pub fn type_char(&mut self, c: char) -> bool {
        let CellRef { row, col } = self.selected;
        let Some(current) = self.matrix.cell(row, col) else {
            return false;
        };
        let mut text = current.to_owned();
        text.push(c);
        if !accepts_cell_text(&text) {
            return false;
        }
        self.edit_cell(text);
        true
    }

    pub fn backspace(&mut self) {
        let CellRef { row, col } = self.selected;
        if let Some(current) = self.matrix.cell(row, col) {
            let mut text = current.to_owned();
            if text.pop().is_some() {
                self.edit_cell(text);
            }
        }
    }

    pub fn clear_cell(&mut self) {
        self.edit_cell(String::new());
    }

    /// Grow by one row and column. All cells become blank.
    pub fn grow(&mut self) {
        let size = self.matrix.size();
        if size < MAX_SIZE {
            self.resize(size + 1);
        }
    }

    /// Shrink by one row and column. All cells become blank.
    pub fn shrink(&mut self) {
        let size = self.matrix.size();
        if size > MIN_SIZE {
            self.resize(size - 1);
        }
    }

    pub fn resize(&mut self, size: usize) {
        self.stop_playback_for_edit();
        self.matrix.resize(size);
        self.move_selection(0, 0);
    }

    /// Load the next built-in preset.
    pub fn cycle_preset(&mut self) {
        self.preset = self.preset.next();
        self.load_preset(self.preset);
    }

    pub fn load_preset(&mut self, preset: Preset) {
        self.stop_playback_for_edit();
        self.preset = preset;
        self.matrix.load_preset(&preset.rows());
        self.move_selection(0, 0);
        self.set_status(format!("Loaded {} preset", preset.label()));
    }

    fn edit_cell(&mut self, text: String) {
        self.stop_playback_for_edit();
        let CellRef { row, col } = self.selected;
        self.matrix.set_cell(row, col, text);
    }

    /// Editing the matrix mid-playback must not leave a stale advance armed.
    fn stop_playback_for_edit(&mut self) {
        if self.playback.is_playing() {
            tracing::debug!("Matrix edited during playback; pausing");
            self.playback.pause();
        }
    }

    // ------------------------------------------------------------------
    // Playback
    // ------------------------------------------------------------------

    pub fn next_step(&mut self) {
        self.playback.next();
    }

    pub fn prev_step(&mut self) {
        self.playback.prev();
    }

    pub fn toggle_play(&mut self) {
        self.playback.toggle_play();
    }

    pub fn play(&mut self) {
        self.playback.play();
    }

    pub fn pause(&mut self) {
        self.playback.pause();
    }

    pub fn reset_playback(&mut self) {
        self.playback.reset();
    }

    // ------------------------------------------------------------------
    // Frame timing
    // ------------------------------------------------------------------

    /// Advance time-based state by `elapsed`. Returns whether the cursor moved.
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        self.playback.tick(elapsed)
    }

    /// Get elapsed time since last frame and update timing.
    pub fn frame_elapsed(&mut self) -> Duration {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.last_frame = now;
        elapsed
    }
}

impl Default for App {
    fn default() -> Self {
        Self::with_settings(AppSettings::default())
    }
}
