//! Cofactor expansion with step instrumentation.
//!
//! The determinant is computed by one recursive routine. Instrumentation is
//! an optional [`StepSink`] threaded through the recursion:
//!
//! - the outermost call gets the sink and records its row-0 column loop;
//! - a minor that is exactly 2×2 is evaluated with the sink, so its base case
//!   shows up as [`Step::Calc2x2Determinant`];
//! - larger minors are evaluated without a sink and only contribute a value.
//!
//! For n ≥ 4 the nested expansions are therefore silent.

use thiserror::Error;

use cofactor_types::{CellRef, Matrix, MatrixShapeError, Sign, Step};

/// Receiver for steps recorded during a run.
pub trait StepSink {
    fn append(&mut self, step: Step);
}

impl StepSink for Vec<Step> {
    fn append(&mut self, step: Step) {
        self.push(step);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    #[error("nothing to compute: {0}")]
    Degenerate(#[from] MatrixShapeError),
    #[error("determinant overflows the number range")]
    Overflow,
}

/// Validate raw rows and generate the step log for them.
///
/// Finite cells can still multiply past `f64::MAX`; such runs are rejected
/// with [`GenerateError::Overflow`] instead of carrying NaN or infinity.
/// A non-finite term always leaves the final sum non-finite, so checking the
/// result covers every step.
pub fn generate_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Vec<Step>, GenerateError> {
    let matrix = Matrix::from_rows(rows)?;
    let steps = generate(&matrix);
    match steps.last() {
        Some(Step::FinalResult { determinant }) if !determinant.is_finite() => {
            tracing::debug!(n = matrix.dim(), "Determinant overflowed");
            Err(GenerateError::Overflow)
        }
        _ => Ok(steps),
    }
}

/// Generate the full step log for one run of cofactor expansion.
///
/// Output is a pure function of `matrix`.
#[must_use]
pub fn generate(matrix: &Matrix) -> Vec<Step> {
    let n = matrix.dim();
    let mut steps = Vec::with_capacity(expected_len(n));

    steps.push(Step::Start {
        matrix: matrix.clone(),
    });
    let det = determinant(matrix, Some(&mut steps));
    steps.push(Step::FinalResult { determinant: det });

    tracing::debug!(n, steps = steps.len(), determinant = det, "Generated steps");
    steps
}

/// Number of steps [`generate`] emits for an n×n matrix.
#[must_use]
pub const fn expected_len(n: usize) -> usize {
    match n {
        0 => 0,
        1 => 2,
        2 => 3,
        3 => 1 + 4 * 3 + 1,
        n => 1 + 3 * n + 1,
    }
}

/// Determinant without instrumentation.
#[must_use]
pub fn determinant_value(matrix: &Matrix) -> f64 {
    determinant::<Vec<Step>>(matrix, None)
}

/// Determinant by row-0 Laplace expansion.
///
/// With a sink, a 2×2 input records its base case, and an n ≥ 3 input records
/// its column loop (forwarding the sink only into 2×2 minors).
pub fn determinant<S>(matrix: &Matrix, mut sink: Option<&mut S>) -> f64
where
    S: StepSink + ?Sized,
{
    match matrix.dim() {
        1 => matrix.get(0, 0),
        2 => {
            let (a, b) = (matrix.get(0, 0), matrix.get(0, 1));
            let (c, d) = (matrix.get(1, 0), matrix.get(1, 1));
            let result = a * d - b * c;
            if let Some(sink) = sink {
                sink.append(Step::Calc2x2Determinant { a, b, c, d, result });
            }
            result
        }
        n => {
            const EXPANSION_ROW: usize = 0;

            let mut running_sum = 0.0;
            for col in 0..n {
                let sign = Sign::of(EXPANSION_ROW, col);
                let element = matrix.get(EXPANSION_ROW, col);
                let minor = matrix.minor(EXPANSION_ROW, col);

                if let Some(sink) = sink.as_deref_mut() {
                    sink.append(Step::HighlightCofactor {
                        row_index: EXPANSION_ROW,
                        col_index: col,
                        sign,
                        element,
                    });
                    sink.append(Step::FormMinor {
                        minor: minor.clone(),
                        minor_of: CellRef::new(EXPANSION_ROW, col),
                    });
                }

                let nested = if minor.dim() == 2 {
                    sink.as_deref_mut()
                } else {
                    None
                };
                let sub_determinant = determinant(&minor, nested);

                let term = sign.as_f64() * element * sub_determinant;
                running_sum += term;

                if let Some(sink) = sink.as_deref_mut() {
                    sink.append(Step::AddToSum { term, running_sum });
                }
            }
            running_sum
        }
    }
}
