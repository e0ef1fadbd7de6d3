//! Step records emitted by one run of cofactor expansion.
//!
//! A run is a flat, ordered log. Consumers match exhaustively on [`Step`];
//! there is no other channel between the generator and playback.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Matrix;

/// Cofactor sign `(-1)^(row + col)`.
///
/// Parity is the same for 0-based and 1-based indices, so callers may
/// display either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum Sign {
    Plus,
    Minus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cofactor sign must be 1 or -1 (got {0})")]
pub struct InvalidSign(pub i8);

impl Sign {
    #[must_use]
    pub const fn of(row: usize, col: usize) -> Self {
        if (row + col) % 2 == 0 {
            Self::Plus
        } else {
            Self::Minus
        }
    }

    #[must_use]
    pub const fn as_i8(self) -> i8 {
        match self {
            Self::Plus => 1,
            Self::Minus => -1,
        }
    }

    #[must_use]
    pub const fn as_f64(self) -> f64 {
        match self {
            Self::Plus => 1.0,
            Self::Minus => -1.0,
        }
    }
}

impl From<Sign> for i8 {
    fn from(sign: Sign) -> Self {
        sign.as_i8()
    }
}

impl TryFrom<i8> for Sign {
    type Error = InvalidSign;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Plus),
            -1 => Ok(Self::Minus),
            other => Err(InvalidSign(other)),
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plus => f.write_str("+1"),
            Self::Minus => f.write_str("-1"),
        }
    }
}

/// 0-based position of a cell in the matrix being expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

impl CellRef {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// One atomic event of a determinant run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum Step {
    /// The full input matrix at the beginning of a run.
    Start { matrix: Matrix },
    /// `matrix[row_index][col_index]` is the source element of the next term.
    HighlightCofactor {
        row_index: usize,
        col_index: usize,
        sign: Sign,
        element: f64,
    },
    /// The minor formed by deleting `minor_of.row` and `minor_of.col`.
    FormMinor { minor: Matrix, minor_of: CellRef },
    /// Base case `[[a, b], [c, d]]`, `result = a*d - b*c`.
    #[serde(rename = "calc-2x2-determinant")]
    Calc2x2Determinant {
        a: f64,
        b: f64,
        c: f64,
        d: f64,
        result: f64,
    },
    /// `term = sign * element * det(minor)` folded into the running sum.
    AddToSum { term: f64, running_sum: f64 },
    /// Determinant of the full input matrix.
    FinalResult { determinant: f64 },
}

/// Payload-free discriminant of [`Step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKind {
    Start,
    HighlightCofactor,
    FormMinor,
    Calc2x2Determinant,
    AddToSum,
    FinalResult,
}

impl StepKind {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Start => "Start",
            Self::HighlightCofactor => "Select element",
            Self::FormMinor => "Form minor",
            Self::Calc2x2Determinant => "2x2 determinant",
            Self::AddToSum => "Add to sum",
            Self::FinalResult => "Result",
        }
    }
}

impl Step {
    #[must_use]
    pub const fn kind(&self) -> StepKind {
        match self {
            Self::Start { .. } => StepKind::Start,
            Self::HighlightCofactor { .. } => StepKind::HighlightCofactor,
            Self::FormMinor { .. } => StepKind::FormMinor,
            Self::Calc2x2Determinant { .. } => StepKind::Calc2x2Determinant,
            Self::AddToSum { .. } => StepKind::AddToSum,
            Self::FinalResult { .. } => StepKind::FinalResult,
        }
    }

    /// Running sum before this step's term was added.
    #[must_use]
    pub fn previous_sum(&self) -> Option<f64> {
        match self {
            Self::AddToSum { term, running_sum } => Some(running_sum - term),
            _ => None,
        }
    }
}
