//! Editable input matrix.
//!
//! Cells hold raw text exactly as typed; numbers are only produced when a
//! calculation resolves the grid (see [`cofactor_types::resolve_cell`]).

use std::sync::LazyLock;

use regex::Regex;

use cofactor_types::resolve_grid;

pub const MIN_SIZE: usize = 2;
pub const MAX_SIZE: usize = 5;

/// Partial numeric input the editor lets through: optional minus, digits,
/// at most one decimal point.
static PARTIAL_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-?\d*\.?\d*$").expect("partial number pattern is valid")
});

/// Whether `text` is acceptable as (possibly incomplete) cell content.
#[must_use]
pub fn accepts_cell_text(text: &str) -> bool {
    PARTIAL_NUMBER.is_match(text)
}

/// Built-in example matrices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    TwoByTwo,
    ThreeByThree,
    FourByFour,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Self::TwoByTwo, Self::ThreeByThree, Self::FourByFour];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::TwoByTwo => "2x2",
            Self::ThreeByThree => "3x3",
            Self::FourByFour => "4x4",
        }
    }

    #[must_use]
    pub fn rows(self) -> Vec<Vec<f64>> {
        let rows: &[&[f64]] = match self {
            Self::TwoByTwo => &[&[4.0, 7.0], &[2.0, 6.0]],
            Self::ThreeByThree => &[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0], &[7.0, 8.0, 9.0]],
            Self::FourByFour => &[
                &[5.0, 3.0, 2.0, 4.0],
                &[4.0, 2.0, 1.0, 3.0],
                &[2.0, 5.0, 3.0, 1.0],
                &[1.0, 2.0, 3.0, 4.0],
            ],
        };
        rows.iter().map(|row| row.to_vec()).collect()
    }

    /// The preset after this one, wrapping around.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::TwoByTwo => Self::ThreeByThree,
            Self::ThreeByThree => Self::FourByFour,
            Self::FourByFour => Self::TwoByTwo,
        }
    }
}

/// Current editor matrix: raw cell text plus its dimension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixState {
    cells: Vec<Vec<String>>,
}

impl Default for MatrixState {
    fn default() -> Self {
        let mut state = Self { cells: Vec::new() };
        state.load_preset(&Preset::ThreeByThree.rows());
        state
    }
}

impl MatrixState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.cells
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
    }

    #[must_use]
    pub fn cells(&self) -> &[Vec<String>] {
        &self.cells
    }

    /// Resize to `size` (clamped to `MIN_SIZE..=MAX_SIZE`) and blank every cell.
    pub fn resize(&mut self, size: usize) {
        let size = size.clamp(MIN_SIZE, MAX_SIZE);
        self.cells = vec![vec![String::new(); size]; size];
        tracing::debug!(size, "Matrix resized");
    }

    /// Store raw text for one cell. Out-of-range positions are ignored.
    pub fn set_cell(&mut self, row: usize, col: usize, text: impl Into<String>) {
        if let Some(cell) = self.cells.get_mut(row).and_then(|r| r.get_mut(col)) {
            *cell = text.into();
        }
    }

    /// Replace matrix and size together.
    pub fn load_preset<R: AsRef<[f64]>>(&mut self, rows: &[R]) {
        self.cells = rows
            .iter()
            .map(|row| row.as_ref().iter().map(|v| format_cell(*v)).collect())
            .collect();
        tracing::debug!(size = self.cells.len(), "Preset loaded");
    }

    /// Numeric view of the grid; unparsable text resolves to 0.
    #[must_use]
    pub fn resolved(&self) -> Vec<Vec<f64>> {
        resolve_grid(&self.cells)
    }
}

fn format_cell(value: f64) -> String {
    format!("{value}")
}
