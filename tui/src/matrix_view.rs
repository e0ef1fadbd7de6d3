//! Grid rendering for editor and step matrices.

use ratatui::{
    style::Style,
    text::{Line, Span},
};
use unicode_width::UnicodeWidthStr;

use cofactor_engine::CellRef;

use crate::theme::{Glyphs, Palette, styles};

/// Narrowest cell, so blank editor cells stay clickable-looking.
const MIN_CELL_WIDTH: usize = 3;

/// How one cell (or a row/column cross) is emphasized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellMark {
    None,
    /// Editor cursor.
    Selected(CellRef),
    /// Element chosen for the current cofactor term.
    Highlight(CellRef),
    /// Row and column deleted to form a minor.
    CrossOut(CellRef),
}

impl CellMark {
    fn style_for(self, row: usize, col: usize, palette: &Palette) -> Style {
        match self {
            Self::Selected(at) if at == CellRef::new(row, col) => styles::selected_cell(palette),
            Self::Highlight(at) if at == CellRef::new(row, col) => {
                styles::highlighted_element(palette)
            }
            Self::CrossOut(at) if at.row == row || at.col == col => styles::crossed_out(palette),
            _ => Style::default().fg(palette.text_primary),
        }
    }
}

/// Lay out `cells` as a bracketed grid, one `Line` per row.
///
/// Columns share a common width so the grid stays aligned.
pub fn matrix_lines<'a, R, S>(
    cells: &[R],
    mark: CellMark,
    palette: &Palette,
    glyphs: &Glyphs,
) -> Vec<Line<'a>>
where
    R: AsRef<[S]>,
    S: AsRef<str>,
{
    let width = cells
        .iter()
        .flat_map(|row| row.as_ref().iter().map(|c| c.as_ref().width()))
        .max()
        .unwrap_or(0)
        .max(MIN_CELL_WIDTH);

    let bracket = Style::default().fg(palette.text_muted);
    let (left, right) = (glyphs.bracket_left, glyphs.bracket_right);

    cells
        .iter()
        .enumerate()
        .map(|(row, values)| {
            let mut spans = vec![Span::styled(left, bracket)];
            for (col, value) in values.as_ref().iter().enumerate() {
                let text = format!(" {:>width$} ", value.as_ref());
                spans.push(Span::styled(text, mark.style_for(row, col, palette)));
            }
            spans.push(Span::styled(right, bracket));
            Line::from(spans)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cofactor_engine::UiOptions;

    use crate::theme::{glyphs, palette};

    fn plain(lines: &[Line<'_>]) -> Vec<String> {
        lines
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn aligns_columns_to_widest_cell() {
        let options = UiOptions {
            ascii_only: true,
            ..UiOptions::default()
        };
        let cells = vec![vec!["1", "-12.5"], vec!["300", ""]];
        let lines = matrix_lines(&cells, CellMark::None, &palette(options), &glyphs(options));
        assert_eq!(
            plain(&lines),
            vec!["[     1  -12.5 ]", "[   300        ]"]
        );
    }

    #[test]
    fn cross_out_marks_whole_row_and_column() {
        let options = UiOptions::default();
        let pal = palette(options);
        let cells = vec![vec!["1", "2"], vec!["3", "4"]];
        let lines = matrix_lines(
            &cells,
            CellMark::CrossOut(CellRef::new(0, 1)),
            &pal,
            &glyphs(options),
        );

        let crossed = styles::crossed_out(&pal);
        // spans: bracket, cell, cell, bracket
        assert_eq!(lines[0].spans[1].style, crossed);
        assert_eq!(lines[0].spans[2].style, crossed);
        assert_ne!(lines[1].spans[1].style, crossed);
        assert_eq!(lines[1].spans[2].style, crossed);
    }

    #[test]
    fn highlight_marks_single_cell() {
        let options = UiOptions::default();
        let pal = palette(options);
        let cells = vec![vec!["1", "2"], vec!["3", "4"]];
        let lines = matrix_lines(
            &cells,
            CellMark::Highlight(CellRef::new(1, 0)),
            &pal,
            &glyphs(options),
        );
        let highlighted = styles::highlighted_element(&pal);
        assert_eq!(lines[1].spans[1].style, highlighted);
        assert_ne!(lines[0].spans[1].style, highlighted);
    }
}
