//! Natural-language explanation of each step.
//!
//! Indices are shown 1-based, as in textbook notation (`a12`, `M12`).

use cofactor_engine::{CellRef, Sign, Step, StepKind};

use crate::theme::Glyphs;

/// Decimal places kept when displaying numbers.
const DISPLAY_DECIMALS: i32 = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Explanation {
    pub title: String,
    pub theory: String,
    pub lines: Vec<String>,
}

/// Format a number for display: at most six decimals, no trailing zeros,
/// and never `-0`.
#[must_use]
pub fn format_number(value: f64) -> String {
    let scale = 10f64.powi(DISPLAY_DECIMALS);
    let rounded = (value * scale).round() / scale;
    if rounded == 0.0 {
        return "0".to_string();
    }
    format!("{rounded}")
}

/// Status-bar label for a step kind, spelled with the active glyphs.
#[must_use]
pub fn step_label(kind: StepKind, glyphs: Glyphs) -> String {
    match kind {
        StepKind::Calc2x2Determinant => format!("2{}2 determinant", glyphs.times),
        other => other.label().to_string(),
    }
}

#[must_use]
pub fn explain(step: &Step, glyphs: Glyphs) -> Explanation {
    let times = glyphs.times;
    let minus = glyphs.minus;

    match step {
        Step::Start { matrix } => {
            let n = matrix.dim();
            Explanation {
                title: "Cofactor Expansion Method".to_string(),
                theory: "Laplace expansion writes the determinant as a sum of products of the \
                         elements of one row and their cofactors."
                    .to_string(),
                lines: vec![format!(
                    "Calculating the determinant of a {n}{times}{n} matrix, expanding along row 1."
                )],
            }
        }
        Step::HighlightCofactor {
            row_index,
            col_index,
            sign,
            element,
        } => {
            let (i, j) = (row_index + 1, col_index + 1);
            let element = format_number(*element);
            Explanation {
                title: "Cofactor Expansion Theorem".to_string(),
                theory: format!(
                    "det(A) = sum of a_1j {times} C_1j, where C_ij = (-1)^(i+j) {times} det(M_ij)."
                ),
                lines: vec![
                    format!("Term: ({sign}) {times} {element} {times} det(M{i}{j})"),
                    format!("({sign}) = cofactor sign (-1)^({i}+{j}) = {sign}"),
                    format!("{element} = element a{i}{j} of the original matrix"),
                    format!("det(M{i}{j}) = determinant of the minor M{i}{j}"),
                ],
            }
        }
        Step::FormMinor { minor, minor_of } => {
            let (i, j) = (minor_of.row + 1, minor_of.col + 1);
            let n = minor.dim();
            Explanation {
                title: "Minor Matrix".to_string(),
                theory: "The minor M_ij is what remains after deleting row i and column j."
                    .to_string(),
                lines: vec![format!(
                    "Removing row {i} and column {j} leaves the {n}{times}{n} minor M{i}{j}."
                )],
            }
        }
        Step::Calc2x2Determinant { a, b, c, d, result } => {
            let [a, b, c, d, result] = [*a, *b, *c, *d, *result].map(format_number);
            Explanation {
                title: format!("2{times}2 Determinant Formula"),
                theory: format!("For a 2{times}2 matrix [a b; c d], det = ad - bc."),
                lines: vec![format!(
                    "det = ({a} {times} {d}) {minus} ({b} {times} {c}) = {result}"
                )],
            }
        }
        Step::AddToSum { term, running_sum } => {
            let previous = format_number(step.previous_sum().unwrap_or_default());
            let term = format_number(*term);
            let sum = format_number(*running_sum);
            Explanation {
                title: "Summation Step".to_string(),
                theory: "Each signed term is added to the running total.".to_string(),
                lines: vec![format!("Sum = {previous} + ({term}) = {sum}")],
            }
        }
        Step::FinalResult { determinant } => {
            let verdict = if !determinant.is_finite() {
                "The determinant is outside the representable number range."
            } else if *determinant == 0.0 {
                "The matrix is singular: it has no inverse."
            } else {
                "The determinant is non-zero, so the matrix is invertible."
            };
            Explanation {
                title: "Final Result".to_string(),
                theory: "The cofactor expansion is complete.".to_string(),
                lines: vec![
                    format!("det(A) = {}", format_number(*determinant)),
                    verdict.to_string(),
                ],
            }
        }
    }
}

/// One finished term of the row-1 expansion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Term {
    pub at: CellRef,
    pub sign: Sign,
    pub element: f64,
    /// Determinant of the minor, when it is known. Shown 2×2 minors carry it
    /// directly; larger ones are recovered from the term unless the element
    /// is zero.
    pub minor_det: Option<f64>,
    pub value: f64,
    pub running_sum: f64,
}

impl Term {
    /// `Term k: (±1) × a × det = value`, with `number` 1-based.
    #[must_use]
    pub fn summary(&self, number: usize, glyphs: Glyphs) -> String {
        let times = glyphs.times;
        let (i, j) = (self.at.row + 1, self.at.col + 1);
        let minor = self
            .minor_det
            .map_or_else(|| format!("det(M{i}{j})"), format_number);
        format!(
            "Term {number}: ({}) {times} {} {times} {minor} = {}",
            self.sign,
            format_number(self.element),
            format_number(self.value),
        )
    }

    #[must_use]
    pub fn sign_derivation(&self) -> String {
        let (i, j) = (self.at.row + 1, self.at.col + 1);
        let parity = if (i + j) % 2 == 0 {
            "positive"
        } else {
            "negative"
        };
        format!("sign (-1)^({i}+{j}) = {} ({parity})", self.sign)
    }
}

/// Terms completed so far and, once reached, the final determinant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    pub terms: Vec<Term>,
    pub determinant: Option<f64>,
}

/// Fold a prefix of the step log into the finished terms.
///
/// Pass `steps[..=cursor]` to get the history as of the cursor. A term is
/// only listed once its `AddToSum` step has been reached.
#[must_use]
pub fn history(steps: &[Step]) -> History {
    let mut out = History::default();
    let mut open: Option<(CellRef, Sign, f64, Option<f64>)> = None;

    for step in steps {
        match step {
            Step::HighlightCofactor {
                row_index,
                col_index,
                sign,
                element,
            } => {
                open = Some((CellRef::new(*row_index, *col_index), *sign, *element, None));
            }
            Step::Calc2x2Determinant { result, .. } => {
                if let Some((_, _, _, minor_det)) = open.as_mut() {
                    *minor_det = Some(*result);
                }
            }
            Step::AddToSum { term, running_sum } => {
                if let Some((at, sign, element, minor_det)) = open.take() {
                    let minor_det = minor_det.or_else(|| {
                        (element != 0.0).then(|| term / (sign.as_f64() * element))
                    });
                    out.terms.push(Term {
                        at,
                        sign,
                        element,
                        minor_det,
                        value: *term,
                        running_sum: *running_sum,
                    });
                }
            }
            Step::FinalResult { determinant } => out.determinant = Some(*determinant),
            Step::Start { .. } | Step::FormMinor { .. } => {}
        }
    }
    out
}
