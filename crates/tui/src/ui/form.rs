//! The parameter form panel: one row per schema entry plus the Apply row.
//!
//! Rendering is read-only over the engine's widget states; every mutation
//! goes through `App::update` and the form's reducer path.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
};

use datascope_engine::WidgetState;
use datascope_engine::number::format_number;

use crate::app::{App, Focus, FormPanel};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::Form;
    let title = match &app.form {
        Some(panel) => format!("Filters: {}", panel.entry.label),
        None => "Filters".to_string(),
    };
    let block = Block::default()
        .title(Span::styled(title, theme::title_style()))
        .borders(Borders::ALL)
        .border_style(theme::border_style(focused));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(panel) = app.form.as_ref() else {
        let hint = if app.selected_entry.is_some() {
            "Loading filters..."
        } else {
            "Select a dataset to load its filters"
        };
        f.render_widget(Paragraph::new(hint).style(theme::text_muted()), inner);
        return;
    };

    let mut lines: Vec<Line> = Vec::new();
    let mut edit_col: Option<u16> = None;

    for (idx, (_name, widget)) in panel.form.widgets().enumerate() {
        let is_cursor = focused && idx == panel.cursor;
        if is_cursor && panel.editing {
            let prefix = format!("{}{}: ", widget.label(), bound_suffix(widget, panel.bound_idx));
            edit_col = Some((prefix.chars().count() + panel.edit_buffer.chars().count()) as u16);
            lines.push(Line::from(vec![
                Span::styled(prefix, theme::highlight_style()),
                Span::styled(panel.edit_buffer.clone(), theme::text_style()),
            ]));
        } else {
            lines.push(widget_line(panel, widget, is_cursor));
        }
    }

    let apply_selected = focused && panel.is_apply_row();
    lines.push(Line::from(Span::styled(
        "[ Apply ]",
        if apply_selected { theme::highlight_style() } else { theme::accent_style() },
    )));

    // Keep the cursor row visible when the form is taller than the panel.
    let height = inner.height as usize;
    let cursor_row = panel.cursor.min(lines.len().saturating_sub(1));
    let start = if height > 0 && cursor_row + 1 > height {
        cursor_row + 1 - height
    } else {
        0
    };
    let visible: Vec<Line> = lines.into_iter().skip(start).collect();
    f.render_widget(Paragraph::new(Text::from(visible)).style(theme::text_style()), inner);

    if let Some(col) = edit_col {
        let x = inner.x.saturating_add(col);
        let y = inner.y.saturating_add((cursor_row - start) as u16);
        f.set_cursor_position((x, y));
    }
}

/// Label suffix naming the bound being edited on a range row.
fn bound_suffix(widget: &WidgetState, bound_idx: usize) -> &'static str {
    match widget {
        WidgetState::DateRange(_) => {
            if bound_idx == 0 {
                " start"
            } else {
                " end"
            }
        }
        WidgetState::NumberRange(_) => {
            if bound_idx == 0 {
                " lower"
            } else {
                " upper"
            }
        }
        _ => "",
    }
}

fn widget_line(panel: &FormPanel, widget: &WidgetState, is_cursor: bool) -> Line<'static> {
    let label_style = if is_cursor { theme::highlight_style() } else { theme::text_style() };
    let value_style = if is_cursor { theme::accent_style() } else { theme::text_style() };
    let mut spans = vec![Span::styled(format!("{}: ", widget.label()), label_style)];

    match widget {
        WidgetState::SingleSelect(s) => {
            let current = s
                .def
                .options
                .iter()
                .find(|o| o.id == s.selected_id)
                .map(|o| o.label.clone())
                .unwrap_or_else(|| {
                    if s.selected_id.is_empty() {
                        "<none>".to_string()
                    } else {
                        s.selected_id.clone()
                    }
                });
            spans.push(Span::styled(current, value_style));
            if is_cursor {
                spans.push(Span::styled("  <->", theme::text_muted()));
            }
        }
        WidgetState::MultiSelect(s) => {
            for (i, option) in s.def.options.iter().enumerate() {
                let mark = if s.selected_ids.contains(&option.id) { "[x]" } else { "[ ]" };
                let style = if is_cursor && i == panel.option_idx {
                    theme::highlight_style()
                } else {
                    theme::text_style()
                };
                spans.push(Span::styled(format!("{}{}  ", mark, option.label), style));
            }
            if s.def.order_matters {
                spans.push(Span::styled("(order matters)", theme::text_muted()));
            }
        }
        WidgetState::Date(s) => {
            let shown = if s.selected.is_empty() { "<unset>".to_string() } else { s.selected.clone() };
            spans.push(Span::styled(shown, value_style));
            if let (Some(min), Some(max)) = (&s.def.min_date, &s.def.max_date) {
                spans.push(Span::styled(format!("  [{}..{}]", min, max), theme::text_muted()));
            }
        }
        WidgetState::DateRange(s) => {
            let start_style = if is_cursor && panel.bound_idx == 0 { theme::highlight_style() } else { value_style };
            let end_style = if is_cursor && panel.bound_idx == 1 { theme::highlight_style() } else { value_style };
            let start = if s.start.is_empty() { "...".to_string() } else { s.start.clone() };
            let end = if s.end.is_empty() { "...".to_string() } else { s.end.clone() };
            spans.push(Span::styled(start, start_style));
            spans.push(Span::styled(" ~ ", theme::text_muted()));
            spans.push(Span::styled(end, end_style));
            if s.last_complete.is_none() {
                spans.push(Span::styled("  (incomplete)", theme::text_muted()));
            }
        }
        WidgetState::Number(s) => {
            spans.push(Span::styled(format_number(s.value), value_style));
            spans.push(Span::styled(
                format!(
                    "  [{}..{} step {}]",
                    format_number(s.def.min_value),
                    format_number(s.def.max_value),
                    format_number(s.def.increment)
                ),
                theme::text_muted(),
            ));
        }
        WidgetState::NumberRange(s) => {
            let lower_style = if is_cursor && panel.bound_idx == 0 { theme::highlight_style() } else { value_style };
            let upper_style = if is_cursor && panel.bound_idx == 1 { theme::highlight_style() } else { value_style };
            spans.push(Span::styled(format_number(s.lower), lower_style));
            spans.push(Span::styled(" - ", theme::text_muted()));
            spans.push(Span::styled(format_number(s.upper), upper_style));
            spans.push(Span::styled(
                format!(
                    "  [{}..{} step {}]",
                    format_number(s.def.min_value),
                    format_number(s.def.max_value),
                    format_number(s.def.increment)
                ),
                theme::text_muted(),
            ));
        }
        WidgetState::Text(s) => {
            let shown = if s.text.is_empty() { "<empty>".to_string() } else { s.text.clone() };
            spans.push(Span::styled(shown, value_style));
        }
    }

    if is_cursor && let Some(description) = widget.description() {
        spans.push(Span::styled(format!("  ({})", description), theme::text_muted()));
    }

    Line::from(spans)
}
