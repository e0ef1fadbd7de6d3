//! Shared test fixtures
//!
//! Matrices with hand-checked determinants.

#![allow(dead_code)]

use std::time::Duration;

use cofactor_engine::{App, AppSettings, Matrix, Step, UiOptions};

/// A named matrix and its exact determinant.
pub struct Fixture {
    pub name: &'static str,
    pub rows: Vec<Vec<f64>>,
    pub determinant: f64,
}

impl Fixture {
    pub fn matrix(&self) -> Matrix {
        Matrix::from_rows(&self.rows).expect("fixture is square")
    }
}

fn fixture(name: &'static str, rows: &[&[f64]], determinant: f64) -> Fixture {
    Fixture {
        name,
        rows: rows.iter().map(|row| row.to_vec()).collect(),
        determinant,
    }
}

pub fn known_matrices() -> Vec<Fixture> {
    vec![
        fixture("single", &[&[-3.5]], -3.5),
        fixture("2x2 ascending", &[&[1.0, 2.0], &[3.0, 4.0]], -2.0),
        fixture("2x2 preset", &[&[4.0, 7.0], &[2.0, 6.0]], 10.0),
        fixture(
            "3x3 singular",
            &[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0], &[7.0, 8.0, 9.0]],
            0.0,
        ),
        fixture(
            "3x3 mixed signs",
            &[&[2.0, -3.0, 1.0], &[2.0, 0.0, -1.0], &[1.0, 4.0, 5.0]],
            49.0,
        ),
        fixture(
            "4x4 preset",
            &[
                &[5.0, 3.0, 2.0, 4.0],
                &[4.0, 2.0, 1.0, 3.0],
                &[2.0, 5.0, 3.0, 1.0],
                &[1.0, 2.0, 3.0, 4.0],
            ],
            15.0,
        ),
        fixture(
            "5x5 cyclic",
            &[
                &[1.0, 2.0, 3.0, 4.0, 5.0],
                &[2.0, 3.0, 4.0, 5.0, 1.0],
                &[3.0, 4.0, 5.0, 1.0, 2.0],
                &[4.0, 5.0, 1.0, 2.0, 3.0],
                &[5.0, 1.0, 2.0, 3.0, 4.0],
            ],
            1875.0,
        ),
    ]
}

/// Determinant carried by the trailing `FinalResult`.
pub fn final_determinant(steps: &[Step]) -> f64 {
    match steps.last() {
        Some(Step::FinalResult { determinant }) => *determinant,
        other => panic!("expected FinalResult, got {other:?}"),
    }
}

pub const TEST_DELAY: Duration = Duration::from_millis(200);

/// Session with a short step delay and ASCII glyphs.
pub fn test_app() -> App {
    App::with_settings(AppSettings {
        ui_options: UiOptions {
            ascii_only: true,
            high_contrast: false,
        },
        step_delay: TEST_DELAY,
        autoplay: false,
    })
}
