//! Screen layout and panel rendering.
//!
//! The screen splits into a left column (projects, datasets, filter form),
//! a right results table, a status log, and a one-line hint bar.

pub mod catalog;
pub mod form;
pub mod status;
pub mod table;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::app::App;

pub fn draw(frame: &mut Frame, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(10), Constraint::Length(6), Constraint::Length(1)])
        .split(frame.area());

    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(42), Constraint::Percentage(58)])
        .split(rows[0]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Length(8), Constraint::Min(5)])
        .split(main[0]);

    catalog::render_projects(frame, left[0], app);
    catalog::render_entries(frame, left[1], app);
    form::render(frame, left[2], app);
    table::render(frame, main[1], app);
    status::render_log(frame, rows[1], app);
    status::render_hints(frame, rows[2], app);
}
