//! Square numeric matrix used as generator input and in step records.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a set of rows cannot form a [`Matrix`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatrixShapeError {
    #[error("matrix has no rows")]
    Empty,
    #[error("matrix is not square: row {row} has {len} cells, expected {expected}")]
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },
    #[error("cell ({row}, {col}) is not a finite number")]
    NonFinite { row: usize, col: usize },
}

/// A non-empty square matrix of finite `f64` cells, stored row-major.
///
/// Construction validates shape once; every `Matrix` in the program is
/// square with `dim() >= 1`. Minors are fresh matrices, the source is never
/// mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct Matrix {
    dim: usize,
    cells: Vec<f64>,
}

impl Matrix {
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self, MatrixShapeError> {
        let dim = rows.len();
        if dim == 0 {
            return Err(MatrixShapeError::Empty);
        }

        let mut cells = Vec::with_capacity(dim * dim);
        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != dim {
                return Err(MatrixShapeError::NotSquare {
                    row,
                    len: values.len(),
                    expected: dim,
                });
            }
            if let Some(col) = values.iter().position(|v| !v.is_finite()) {
                return Err(MatrixShapeError::NonFinite { row, col });
            }
            cells.extend_from_slice(values);
        }

        Ok(Self { dim, cells })
    }

    /// The n×n identity matrix.
    #[must_use]
    pub fn identity(dim: usize) -> Self {
        assert!(dim > 0, "identity matrix must have at least one row");
        let mut cells = vec![0.0; dim * dim];
        for i in 0..dim {
            cells[i * dim + i] = 1.0;
        }
        Self { dim, cells }
    }

    #[must_use]
    pub const fn dim(&self) -> usize {
        self.dim
    }

    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        assert!(row < self.dim && col < self.dim, "cell out of range");
        self.cells[row * self.dim + col]
    }

    #[must_use]
    pub fn row(&self, row: usize) -> &[f64] {
        let start = row * self.dim;
        &self.cells[start..start + self.dim]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.cells.chunks_exact(self.dim)
    }

    /// Submatrix with `row` and `col` deleted.
    ///
    /// Requires `dim() >= 2`, since a 0×0 matrix is not representable.
    #[must_use]
    pub fn minor(&self, row: usize, col: usize) -> Self {
        assert!(self.dim >= 2, "a 1x1 matrix has no minor");
        assert!(row < self.dim && col < self.dim, "minor index out of range");

        let dim = self.dim - 1;
        let cells = self
            .rows()
            .enumerate()
            .filter(|&(r, _)| r != row)
            .flat_map(|(_, values)| {
                values
                    .iter()
                    .enumerate()
                    .filter(move |&(c, _)| c != col)
                    .map(|(_, v)| *v)
            })
            .collect();

        Self { dim, cells }
    }

    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.rows().map(<[f64]>::to_vec).collect()
    }
}

impl TryFrom<Vec<Vec<f64>>> for Matrix {
    type Error = MatrixShapeError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        Self::from_rows(&rows)
    }
}

impl From<Matrix> for Vec<Vec<f64>> {
    fn from(matrix: Matrix) -> Self {
        matrix.to_rows()
    }
}
