//! TUI rendering and input handling for Cofactor.

mod explain;
mod input;
mod matrix_view;
mod theme;

pub use explain::{Explanation, History, Term, explain, format_number, history, step_label};
pub use input::{InputPump, apply_event, apply_key, handle_events};
pub use matrix_view::{CellMark, matrix_lines};
pub use theme::{Glyphs, Palette, glyphs, palette, styles};

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use cofactor_engine::{App, CellRef, Focus, Matrix, Playback, Step};

/// Shown in the visualization pane before the first calculation.
pub const EMPTY_PROMPT: &str = "Press Enter to calculate the determinant.";

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let options = app.ui_options();
    let palette = palette(options);
    let glyphs = glyphs(options);

    let bg_block = Block::default().style(Style::default().bg(palette.bg_dark));
    frame.render_widget(bg_block, frame.area());

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Panes
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[0]);

    draw_editor(frame, app, panes[0], &palette, &glyphs);
    draw_visualization(frame, app, panes[1], &palette, &glyphs);
    draw_status_bar(frame, app, rows[1], &palette, &glyphs);
}

fn pane_block<'a>(title: String, focused: bool, palette: &Palette) -> Block<'a> {
    let border = if focused {
        palette.accent
    } else {
        palette.bg_border
    };
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border))
        .title(Span::styled(title, styles::title(palette)))
        .style(Style::default().bg(palette.bg_panel))
}

fn draw_editor(frame: &mut Frame, app: &App, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let size = app.matrix().size();
    let block = pane_block(
        format!(" Matrix {size}{}{size} ", glyphs.times),
        app.focus() == Focus::Editor,
        palette,
    );

    let mut lines = vec![Line::default()];
    lines.extend(matrix_lines(
        app.matrix().cells(),
        CellMark::Selected(app.selected()),
        palette,
        glyphs,
    ));
    lines.push(Line::default());

    let CellRef { row, col } = app.selected();
    lines.push(Line::from(vec![
        Span::styled(
            format!("{} ", glyphs.selected),
            Style::default().fg(palette.accent),
        ),
        Span::styled(
            format!("a{}{}", row + 1, col + 1),
            Style::default().fg(palette.text_secondary),
        ),
        Span::styled(
            format!("  preset {}", app.preset().label()),
            Style::default().fg(palette.text_muted),
        ),
    ]));
    lines.push(Line::default());
    for (key, action) in [
        ("0-9 - .", "edit"),
        ("[ ]", "size"),
        ("p", "preset"),
        ("Enter", "calculate"),
    ] {
        lines.push(key_hint_line(key, action, palette));
    }

    let editor = Paragraph::new(lines).block(block);
    frame.render_widget(editor, area);
}

fn key_hint_line<'a>(key: &'a str, action: &'a str, palette: &Palette) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{key:>8} "), styles::key_hint(palette)),
        Span::styled(action, Style::default().fg(palette.text_muted)),
    ])
}

fn draw_visualization(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let focused = app.focus() == Focus::Playback;
    let block = pane_block(" Cofactor Expansion ".to_string(), focused, palette);

    let playback = app.playback();
    let (Some(step), Some(cursor)) = (playback.current(), playback.cursor()) else {
        let prompt = Paragraph::new(vec![
            Line::default(),
            Line::from(Span::styled(
                EMPTY_PROMPT,
                Style::default().fg(palette.text_secondary),
            )),
        ])
        .alignment(Alignment::Center)
        .block(block);
        frame.render_widget(prompt, area);
        return;
    };

    let done = history(playback.steps().get(..=cursor).unwrap_or_default());
    let term_lines = history_lines(&done, palette, glyphs);
    let history_height = (term_lines.len() as u16 + 2).min(area.height / 2);

    let regions = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(history_height)])
        .split(area);

    let explanation = explain(step, *glyphs);
    let mut lines = vec![
        Line::from(Span::styled(explanation.title, styles::title(palette))),
        Line::from(Span::styled(
            explanation.theory,
            Style::default()
                .fg(palette.text_muted)
                .add_modifier(Modifier::ITALIC),
        )),
        Line::default(),
    ];
    lines.extend(step_figure(step, playback, palette, glyphs));
    lines.push(Line::default());

    let is_final = matches!(step, Step::FinalResult { .. });
    for (i, text) in explanation.lines.into_iter().enumerate() {
        let style = if is_final && i == 0 {
            styles::result(palette)
        } else {
            Style::default().fg(palette.text_primary)
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!("{} ", glyphs.bullet),
                Style::default().fg(palette.accent),
            ),
            Span::styled(text, style),
        ]));
    }

    let view = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(block);
    frame.render_widget(view, regions[0]);

    // Keep the newest terms visible when the list outgrows its region.
    let visible = history_height.saturating_sub(2) as usize;
    let scroll = term_lines.len().saturating_sub(visible) as u16;
    let steps_view = Paragraph::new(term_lines)
        .scroll((scroll, 0))
        .block(pane_block(" Calculation Steps ".to_string(), focused, palette));
    frame.render_widget(steps_view, regions[1]);
}

/// Finished terms up to the cursor, newest emphasized, then the result badge
/// once the run is complete.
fn history_lines<'a>(done: &History, palette: &Palette, glyphs: &Glyphs) -> Vec<Line<'a>> {
    if done.terms.is_empty() && done.determinant.is_none() {
        return vec![Line::from(Span::styled(
            "Terms appear here as the expansion progresses.",
            Style::default().fg(palette.text_muted),
        ))];
    }

    let newest = done.terms.len().saturating_sub(1);
    let mut lines = Vec::with_capacity(done.terms.len() * 2 + 2);
    for (idx, term) in done.terms.iter().enumerate() {
        let summary_style = if idx == newest {
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.text_primary)
        };
        lines.push(Line::from(vec![
            Span::styled(term.summary(idx + 1, *glyphs), summary_style),
            Span::styled(
                format!("  {} Sum: {}", glyphs.bullet, format_number(term.running_sum)),
                Style::default().fg(palette.text_secondary),
            ),
        ]));
        lines.push(Line::from(Span::styled(
            format!("    {}", term.sign_derivation()),
            Style::default().fg(palette.text_muted),
        )));
    }

    if let Some(determinant) = done.determinant {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            format!(" Determinant = {} ", format_number(determinant)),
            styles::result_badge(palette),
        )));
    }
    lines
}

/// Matrix of the current run, as recorded by its `Start` step.
fn run_matrix(playback: &Playback) -> Option<&Matrix> {
    match playback.steps().first() {
        Some(Step::Start { matrix }) => Some(matrix),
        _ => None,
    }
}

fn display_rows(matrix: &Matrix) -> Vec<Vec<String>> {
    matrix
        .rows()
        .map(|row| row.iter().copied().map(format_number).collect())
        .collect()
}

/// Grid(s) illustrating one step.
fn step_figure<'a>(
    step: &Step,
    playback: &Playback,
    palette: &Palette,
    glyphs: &Glyphs,
) -> Vec<Line<'a>> {
    let grid = |matrix: &Matrix, mark: CellMark| {
        matrix_lines(&display_rows(matrix), mark, palette, glyphs)
    };
    let caption = |text: String| {
        Line::from(Span::styled(
            text,
            Style::default().fg(palette.text_secondary),
        ))
    };

    match step {
        Step::Start { matrix } => grid(matrix, CellMark::None),
        Step::HighlightCofactor {
            row_index,
            col_index,
            ..
        } => run_matrix(playback)
            .map(|m| grid(m, CellMark::Highlight(CellRef::new(*row_index, *col_index))))
            .unwrap_or_default(),
        Step::FormMinor { minor, minor_of } => {
            let mut lines = run_matrix(playback)
                .map(|m| grid(m, CellMark::CrossOut(*minor_of)))
                .unwrap_or_default();
            lines.push(Line::default());
            lines.push(caption(format!(
                "M{}{} =",
                minor_of.row + 1,
                minor_of.col + 1
            )));
            lines.extend(grid(minor, CellMark::None));
            lines
        }
        Step::Calc2x2Determinant { a, b, c, d, .. } => {
            let rows = [[*a, *b], [*c, *d]].map(|row| row.map(format_number));
            matrix_lines(&rows, CellMark::None, palette, glyphs)
        }
        Step::AddToSum { running_sum, .. } => {
            vec![caption(format!("Running sum: {}", format_number(*running_sum)))]
        }
        Step::FinalResult { .. } => run_matrix(playback)
            .map(|m| grid(m, CellMark::None))
            .unwrap_or_default(),
    }
}

fn draw_status_bar(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let (mode, mode_style) = match app.focus() {
        Focus::Editor => (" EDIT ", styles::mode_editor(palette)),
        Focus::Playback => (" PLAY ", styles::mode_playback(palette)),
    };

    let playback = app.playback();
    let position = match (playback.cursor(), playback.current()) {
        (Some(cursor), Some(step)) => format!(
            "Step {}/{} {} {}",
            cursor + 1,
            playback.len(),
            glyphs.bullet,
            step_label(step.kind(), *glyphs)
        ),
        _ => "No steps".to_string(),
    };
    let play_glyph = if playback.is_playing() {
        glyphs.playing
    } else {
        glyphs.paused
    };

    let mut spans = vec![
        Span::styled(mode, mode_style),
        Span::raw(" "),
        Span::styled(
            format!("{play_glyph} "),
            Style::default().fg(palette.accent),
        ),
        Span::styled(position, Style::default().fg(palette.text_secondary)),
    ];
    if let Some(msg) = app.status_message() {
        spans.push(Span::styled(
            format!(" {} {msg}", glyphs.bullet),
            Style::default().fg(palette.warning),
        ));
    }

    let hints = match app.focus() {
        Focus::Editor => "Tab playback  Ctrl-C quit",
        Focus::Playback => "h/l step  Space play  r reset  Tab edit  q quit",
    };

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(hints.len() as u16 + 1)])
        .split(area);

    frame.render_widget(Paragraph::new(Line::from(spans)), chunks[0]);
    frame.render_widget(
        Paragraph::new(Span::styled(hints, styles::key_hint(palette))).alignment(Alignment::Right),
        chunks[1],
    );
}
