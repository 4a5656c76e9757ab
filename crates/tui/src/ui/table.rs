//! Results table panel.
//!
//! Columns come straight from the result schema (no inference); widths are
//! sized to the visible content and capped so one wide column cannot starve
//! the rest.

use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    text::Span,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};
use unicode_width::UnicodeWidthStr;

use datascope_types::TableData;

use crate::app::{App, Focus};
use crate::theme;

const MIN_COLUMN_WIDTH: u16 = 4;
const MAX_COLUMN_WIDTH: u16 = 32;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::Results;

    let Some(table) = &app.results.table else {
        let block = Block::default()
            .title(Span::styled("Results", theme::title_style()))
            .borders(Borders::ALL)
            .border_style(theme::border_style(focused));
        let inner = block.inner(area);
        f.render_widget(block, area);
        f.render_widget(
            Paragraph::new("No results yet. Set filters and Apply.").style(theme::text_muted()),
            inner,
        );
        return;
    };

    let total = table.data.len();
    let title = format!("Results ({} rows, from row {})", total, app.results.offset + 1);
    let block = Block::default()
        .title(Span::styled(title, theme::title_style()))
        .borders(Borders::ALL)
        .border_style(theme::border_style(focused));

    let header: Row = Row::new(
        table
            .schema
            .fields
            .iter()
            .map(|field| Cell::from(field.name.clone()).style(theme::title_style()))
            .collect::<Vec<Cell>>(),
    );

    // Slice rows to the visible window (borders + header row).
    let visible_height = area.height.saturating_sub(3).max(1) as usize;
    let start = app.results.offset.min(total.saturating_sub(1));
    let end = (start + visible_height).min(total);
    let visible = &table.data[start..end];

    let rows: Vec<Row> = visible
        .iter()
        .map(|row| {
            Row::new(
                table
                    .schema
                    .fields
                    .iter()
                    .map(|field| Cell::from(TableData::cell_text(row, &field.name)).style(theme::text_style()))
                    .collect::<Vec<Cell>>(),
            )
        })
        .collect();

    let widths = column_widths(table, visible);
    let widget = Table::new(rows, widths).header(header).block(block).column_spacing(1);
    f.render_widget(widget, area);
}

/// Size each column to its widest visible cell (or header), clamped.
fn column_widths(table: &TableData, visible: &[serde_json::Map<String, serde_json::Value>]) -> Vec<Constraint> {
    table
        .schema
        .fields
        .iter()
        .map(|field| {
            let mut width = field.name.width();
            for row in visible {
                width = width.max(TableData::cell_text(row, &field.name).width());
            }
            Constraint::Length((width as u16).clamp(MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH))
        })
        .collect()
}
