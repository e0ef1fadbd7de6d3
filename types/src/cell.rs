//! Lenient conversion of editor cell text into numbers.

/// Resolve raw cell text to a number.
///
/// Anything that does not parse to a finite `f64` (blank cells, a lone `-`
/// or `.`, overflowing literals) resolves to `0.0`. Calculation always
/// proceeds; malformed text is never an error.
#[must_use]
pub fn resolve_cell(text: &str) -> f64 {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

/// Resolve a grid of raw cell text row by row.
#[must_use]
pub fn resolve_grid<R: AsRef<[String]>>(rows: &[R]) -> Vec<Vec<f64>> {
    rows.iter()
        .map(|row| row.as_ref().iter().map(|cell| resolve_cell(cell)).collect())
        .collect()
}
