//! Step log generation tests

use cofactor_engine::{
    Matrix, Sign, Step, StepKind, generate, generate_rows, generator::expected_len, resolve_cell,
};

use crate::common::{final_determinant, known_matrices};

#[test]
fn known_determinants() {
    for fixture in known_matrices() {
        let steps = generate(&fixture.matrix());
        assert_eq!(
            final_determinant(&steps),
            fixture.determinant,
            "{}",
            fixture.name
        );
    }
}

#[test]
fn step_count_depends_only_on_size() {
    for fixture in known_matrices() {
        let n = fixture.rows.len();
        let steps = generate(&fixture.matrix());
        assert_eq!(steps.len(), expected_len(n), "{}", fixture.name);
    }
    assert_eq!(expected_len(2), 3);
    assert_eq!(expected_len(3), 14);
    assert_eq!(expected_len(4), 14);
    assert_eq!(expected_len(5), 17);
}

#[test]
fn log_starts_with_input_and_ends_with_result() {
    for fixture in known_matrices() {
        let matrix = fixture.matrix();
        let steps = generate(&matrix);
        assert_eq!(steps.first(), Some(&Step::Start { matrix }), "{}", fixture.name);
        assert_eq!(
            steps.last().map(Step::kind),
            Some(StepKind::FinalResult),
            "{}",
            fixture.name
        );
    }
}

#[test]
fn running_sum_accumulates_terms_in_order() {
    for fixture in known_matrices().into_iter().filter(|f| f.rows.len() >= 3) {
        let steps = generate(&fixture.matrix());
        let mut sum = 0.0;
        let mut terms = 0;
        for step in &steps {
            if let Step::AddToSum { term, running_sum } = step {
                sum += term;
                terms += 1;
                assert_eq!(*running_sum, sum, "{}", fixture.name);
                assert_eq!(step.previous_sum(), Some(running_sum - term));
            }
        }
        assert_eq!(terms, fixture.rows.len(), "{}", fixture.name);
        assert_eq!(final_determinant(&steps), sum, "{}", fixture.name);
    }
}

#[test]
fn cofactor_signs_alternate_along_first_row() {
    let fixture = &known_matrices()[6];
    let steps = generate(&fixture.matrix());
    let highlights: Vec<(usize, usize, Sign, f64)> = steps
        .iter()
        .filter_map(|step| match step {
            Step::HighlightCofactor {
                row_index,
                col_index,
                sign,
                element,
            } => Some((*row_index, *col_index, *sign, *element)),
            _ => None,
        })
        .collect();

    assert_eq!(
        highlights,
        vec![
            (0, 0, Sign::Plus, 1.0),
            (0, 1, Sign::Minus, 2.0),
            (0, 2, Sign::Plus, 3.0),
            (0, 3, Sign::Minus, 4.0),
            (0, 4, Sign::Plus, 5.0),
        ]
    );
}

#[test]
fn each_column_emits_highlight_minor_and_sum() {
    let fixture = &known_matrices()[5];
    let kinds: Vec<StepKind> = generate(&fixture.matrix())
        .iter()
        .map(Step::kind)
        .collect();

    assert_eq!(kinds[0], StepKind::Start);
    for column in kinds[1..kinds.len() - 1].chunks(3) {
        assert_eq!(
            column,
            [
                StepKind::HighlightCofactor,
                StepKind::FormMinor,
                StepKind::AddToSum
            ]
        );
    }
}

#[test]
fn four_by_four_terms_use_silent_minors() {
    let fixture = &known_matrices()[5];
    let steps = generate(&fixture.matrix());

    let terms: Vec<f64> = steps
        .iter()
        .filter_map(|step| match step {
            Step::AddToSum { term, .. } => Some(*term),
            _ => None,
        })
        .collect();
    assert_eq!(terms, vec![135.0, -114.0, 110.0, -116.0]);

    let minor_sizes: Vec<usize> = steps
        .iter()
        .filter_map(|step| match step {
            Step::FormMinor { minor, .. } => Some(minor.dim()),
            _ => None,
        })
        .collect();
    assert_eq!(minor_sizes, vec![3; 4]);
}

#[test]
fn regeneration_is_byte_identical() {
    for fixture in known_matrices() {
        let first = serde_json::to_string(&generate(&fixture.matrix())).unwrap();
        let second = serde_json::to_string(&generate(&fixture.matrix())).unwrap();
        assert_eq!(first, second, "{}", fixture.name);
    }
}

#[test]
fn step_log_wire_format() {
    let steps = generate(&Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap());
    let json = serde_json::to_value(&steps).unwrap();
    assert_eq!(
        json,
        serde_json::json!([
            {"type": "start", "matrix": [[1.0, 2.0], [3.0, 4.0]]},
            {"type": "calc-2x2-determinant", "a": 1.0, "b": 2.0, "c": 3.0, "d": 4.0, "result": -2.0},
            {"type": "final-result", "determinant": -2.0}
        ])
    );
}

#[test]
fn blank_and_garbage_cells_resolve_to_zero() {
    let raw = [["", "2"], ["abc", "4"]];
    let rows: Vec<Vec<f64>> = raw
        .iter()
        .map(|row| row.iter().map(|cell| resolve_cell(cell)).collect())
        .collect();
    let steps = generate_rows(&rows).unwrap();
    assert_eq!(final_determinant(&steps), 0.0);
}

#[test]
fn ragged_rows_are_rejected() {
    let rows = vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0], vec![6.0, 7.0, 8.0]];
    assert!(generate_rows(&rows).is_err());
}
