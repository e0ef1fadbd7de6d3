//! UI state types shared by the engine (state ownership) and tui (rendering/input).
//!
//! Pure data types with no IO, no async, no ratatui dependency.

/// UI configuration options derived from config/environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiOptions {
    pub ascii_only: bool,
    pub high_contrast: bool,
}

/// Which pane receives keyboard input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Editor,
    Playback,
}

impl Focus {
    #[must_use]
    pub const fn toggle(self) -> Self {
        match self {
            Self::Editor => Self::Playback,
            Self::Playback => Self::Editor,
        }
    }
}
