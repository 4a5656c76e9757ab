//! Project and dataset selection panels.

use ratatui::{
    Frame,
    layout::Rect,
    text::Span,
    widgets::{Block, Borders, List, ListItem},
};

use datascope_types::OutputFormat;

use crate::app::{App, Focus};
use crate::theme;

pub fn render_projects(f: &mut Frame, area: Rect, app: &mut App) {
    let items: Vec<ListItem> = match &app.catalog.catalog {
        Some(catalog) => catalog
            .projects
            .iter()
            .map(|p| ListItem::new(p.label.clone()).style(theme::text_style()))
            .collect(),
        None => vec![ListItem::new("Loading catalog...").style(theme::text_muted())],
    };

    let block = Block::default()
        .title(Span::styled("Projects", theme::title_style()))
        .borders(Borders::ALL)
        .border_style(theme::border_style(app.focus == Focus::Projects));

    let list = List::new(items)
        .block(block)
        .highlight_style(theme::list_highlight_style())
        .highlight_symbol("> ");

    f.render_stateful_widget(list, area, &mut app.catalog.projects_list);
}

pub fn render_entries(f: &mut Frame, area: Rect, app: &mut App) {
    let items: Vec<ListItem> = if app.catalog.entries.is_empty() {
        vec![ListItem::new("No datasets").style(theme::text_muted())]
    } else {
        app.catalog
            .entries
            .iter()
            .map(|entry| {
                let label = match entry.format {
                    OutputFormat::Table => entry.label.clone(),
                    OutputFormat::Png => format!("{} [png]", entry.label),
                    OutputFormat::Html => format!("{} [html]", entry.label),
                    OutputFormat::Unset => format!("{} [?]", entry.label),
                };
                ListItem::new(label).style(theme::text_style())
            })
            .collect()
    };

    let block = Block::default()
        .title(Span::styled("Datasets", theme::title_style()))
        .borders(Borders::ALL)
        .border_style(theme::border_style(app.focus == Focus::Entries));

    let list = List::new(items)
        .block(block)
        .highlight_style(theme::list_highlight_style())
        .highlight_symbol("> ");

    f.render_stateful_widget(list, area, &mut app.catalog.entries_list);
}
