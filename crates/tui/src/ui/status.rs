//! Status log and hint bar.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::App;
use crate::theme;

const THROBBER: [char; 10] = ['|', '/', '-', '\\', '|', '/', '-', '\\', '|', '/'];

pub fn render_log(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(Span::styled("Status", theme::title_style()))
        .borders(Borders::ALL)
        .border_style(theme::border_style(false));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let visible = inner.height as usize;
    let start = app.logs.entries.len().saturating_sub(visible);
    let lines: Vec<Line> = app.logs.entries[start..]
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let is_last = start + i + 1 == app.logs.entries.len();
            let style = if is_last { theme::text_style() } else { theme::text_muted() };
            Line::from(Span::styled(entry.clone(), style))
        })
        .collect();
    f.render_widget(Paragraph::new(Text::from(lines)), inner);
}

pub fn render_hints(f: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![
        Span::styled("Tab", theme::accent_style()),
        Span::styled(" panels  ", theme::text_muted()),
        Span::styled("Enter", theme::accent_style()),
        Span::styled(" select/edit  ", theme::text_muted()),
        Span::styled("Space", theme::accent_style()),
        Span::styled(" toggle  ", theme::text_muted()),
        Span::styled("+/-", theme::accent_style()),
        Span::styled(" step  ", theme::text_muted()),
        Span::styled("Ctrl+R", theme::accent_style()),
        Span::styled(" apply  ", theme::text_muted()),
        Span::styled("Ctrl+Y", theme::accent_style()),
        Span::styled(" copy  ", theme::text_muted()),
        Span::styled("Ctrl+C", theme::accent_style()),
        Span::styled(" quit", theme::text_muted()),
    ];
    if app.in_flight > 0 {
        spans.push(Span::styled(
            format!("  {} fetching...", THROBBER[app.throbber_idx % THROBBER.len()]),
            theme::accent_style(),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
