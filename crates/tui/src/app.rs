//! Application state and logic for the Datascope TUI.
//!
//! State updates follow the message/effect split used across the codebase:
//! key events become [`Msg`]s, [`App::update`] mutates state and returns
//! [`Effect`]s, and the `cmd` module turns effects into spawned fetches whose
//! [`FetchOutcome`]s come back through `Msg::FetchCompleted`. State updates
//! stay pure; all I/O lives behind effects.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use datascope_api::DataServiceClient;
use datascope_engine::{CascadeRequest, CascadeTokens, ParameterForm, WidgetEvent, WidgetState};
use datascope_engine::number::format_number;
use datascope_engine::widget::ChangeEvent;
use datascope_types::{Catalog, DataCatalog, DataEntry, OutputFormat, ParameterDef, TableData};
use ratatui::widgets::ListState;
use tracing::debug;

/// Cross-cutting shared context owned by the App.
#[derive(Debug, Clone)]
pub struct SharedCtx {
    /// HTTP client for the configured service.
    pub client: Arc<DataServiceClient>,
    /// Path of the top-level project catalog.
    pub catalog_path: String,
}

/// Which panel currently receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Projects,
    Entries,
    Form,
    Results,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Projects => Focus::Entries,
            Focus::Entries => Focus::Form,
            Focus::Form => Focus::Results,
            Focus::Results => Focus::Projects,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::Projects => Focus::Results,
            Focus::Entries => Focus::Projects,
            Focus::Form => Focus::Entries,
            Focus::Results => Focus::Form,
        }
    }
}

/// Project and dataset navigation state.
#[derive(Debug, Default)]
pub struct CatalogState {
    pub catalog: Option<Catalog>,
    pub project_idx: usize,
    pub projects_list: ListState,
    /// Entries of the selected project's data catalog.
    pub entries: Vec<DataEntry>,
    pub entry_idx: usize,
    pub entries_list: ListState,
}

/// The mounted parameter form plus its UI cursor state.
#[derive(Debug)]
pub struct FormPanel {
    pub form: ParameterForm,
    /// The dataset or dashboard this form belongs to.
    pub entry: DataEntry,
    /// Cursor over the form rows; `form.len()` is the Apply row.
    pub cursor: usize,
    /// Option cursor within a focused multi-select row.
    pub option_idx: usize,
    /// Active bound within a range row: 0 = lower/start, 1 = upper/end.
    pub bound_idx: usize,
    pub editing: bool,
    pub edit_buffer: String,
    pub tokens: CascadeTokens,
}

impl FormPanel {
    pub fn new(entry: DataEntry, defs: Vec<ParameterDef>) -> Self {
        Self {
            form: ParameterForm::new(defs),
            entry,
            cursor: 0,
            option_idx: 0,
            bound_idx: 0,
            editing: false,
            edit_buffer: String::new(),
            tokens: CascadeTokens::new(),
        }
    }

    pub fn is_apply_row(&self) -> bool {
        self.cursor >= self.form.len()
    }

    pub fn cursor_name(&self) -> Option<String> {
        self.form.widgets().nth(self.cursor).map(|(name, _)| name.clone())
    }

    /// Seed the edit buffer from the active bound of the cursor widget.
    fn seed_buffer(&self, widget: &WidgetState) -> String {
        match widget {
            WidgetState::Number(s) => format_number(s.value),
            WidgetState::NumberRange(s) => {
                if self.bound_idx == 0 {
                    format_number(s.lower)
                } else {
                    format_number(s.upper)
                }
            }
            WidgetState::Date(s) => s.selected.clone(),
            WidgetState::DateRange(s) => {
                if self.bound_idx == 0 {
                    s.start.clone()
                } else {
                    s.end.clone()
                }
            }
            WidgetState::Text(s) => s.text.clone(),
            _ => String::new(),
        }
    }

    /// Translate the edit buffer into the commit event for the cursor widget.
    fn commit_event(&self, widget: &WidgetState) -> Option<WidgetEvent> {
        let raw = self.edit_buffer.clone();
        match widget {
            WidgetState::Number(_) => Some(WidgetEvent::CommitNumber(raw)),
            WidgetState::NumberRange(_) => Some(if self.bound_idx == 0 {
                WidgetEvent::CommitLower(raw)
            } else {
                WidgetEvent::CommitUpper(raw)
            }),
            WidgetState::Date(_) => Some(WidgetEvent::CommitDate(raw)),
            WidgetState::DateRange(_) => Some(if self.bound_idx == 0 {
                WidgetEvent::CommitStartDate(raw)
            } else {
                WidgetEvent::CommitEndDate(raw)
            }),
            WidgetState::Text(_) => Some(WidgetEvent::CommitText(raw)),
            _ => None,
        }
    }
}

/// Fetched result table plus scroll position.
#[derive(Debug, Default)]
pub struct ResultsState {
    pub table: Option<TableData>,
    pub offset: usize,
}

/// Rolling status log shown at the bottom of the screen.
#[derive(Debug, Default)]
pub struct LogsState {
    pub entries: Vec<String>,
}

impl LogsState {
    pub fn push(&mut self, line: String) {
        self.entries.push(line);
        let len = self.entries.len();
        if len > 500 {
            self.entries.drain(0..len - 500);
        }
    }
}

/// Messages that can be sent to update the application state.
#[derive(Debug, Clone)]
pub enum Msg {
    /// Move focus to the next panel
    FocusNext,
    /// Move focus to the previous panel
    FocusPrev,
    /// Move the focused panel's cursor/scroll by the given offset
    MoveSelection(isize),
    /// Activate the focused row (select project/dataset, edit/toggle, Apply)
    Enter,
    /// Abandon the current edit buffer
    CancelEdit,
    /// Add a character to the edit buffer
    FormChar(char),
    /// Remove a character from the edit buffer
    FormBackspace,
    /// Cycle options / switch range bound / step a number leftwards
    FormLeft,
    /// Cycle options / switch range bound / step a number rightwards
    FormRight,
    /// Toggle the multi-select option under the option cursor
    FormToggle,
    /// Select every option of the focused multi-select
    FormSelectAll,
    /// Clear the focused multi-select
    FormClearAll,
    /// Step the focused numeric widget by N increments
    FormStep(i32),
    /// Submit the current selections to the result endpoint
    Apply,
    /// Copy the result table to the clipboard as TSV
    CopyTable,
    /// Jump to the top of the result table
    TableHome,
    /// Jump to the bottom of the result table
    TableEnd,
    /// Periodic UI tick (throbber)
    Tick,
    /// Terminal resized
    Resize(u16, u16),
    /// Background fetch completed with outcome
    FetchCompleted(FetchOutcome),
}

/// Side effects produced by state updates; executed by the `cmd` module.
#[derive(Debug, Clone)]
pub enum Effect {
    FetchCatalog,
    FetchDataCatalog { path: String },
    FetchParameters { path: String, seq: u64 },
    FetchCascade { path: String, request: CascadeRequest },
    FetchTable { path: String, pairs: Vec<(String, String)> },
    CopyToClipboard(String),
}

/// Result of a background fetch, routed back as `Msg::FetchCompleted`.
/// Errors are pre-rendered strings headed for the status log.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    Catalog(Result<Catalog, String>),
    DataCatalog(Result<DataCatalog, String>),
    Parameters { seq: u64, result: Result<Vec<ParameterDef>, String> },
    Cascade { provoker: String, token: u64, result: Result<Vec<ParameterDef>, String> },
    Table(Result<TableData, String>),
    /// The fetch task itself died (join error).
    Failed(String),
}

/// The main application state.
pub struct App {
    pub ctx: SharedCtx,
    pub focus: Focus,
    pub catalog: CatalogState,
    /// Selected catalog entry; the form mounts when its schema arrives.
    pub selected_entry: Option<DataEntry>,
    pub form: Option<FormPanel>,
    pub results: ResultsState,
    pub logs: LogsState,
    /// Outstanding fetches; drives the throbber.
    pub in_flight: usize,
    pub throbber_idx: usize,
    /// Generation counter for full-schema fetches; a response whose sequence
    /// is stale (dataset switched again meanwhile) is dropped.
    pub schema_req_seq: u64,
}

impl App {
    pub fn new(ctx: SharedCtx) -> Self {
        Self {
            ctx,
            focus: Focus::default(),
            catalog: CatalogState::default(),
            selected_entry: None,
            form: None,
            results: ResultsState::default(),
            logs: LogsState::default(),
            in_flight: 0,
            throbber_idx: 0,
            schema_req_seq: 0,
        }
    }

    /// Route a key event to messages based on focus and edit state, then
    /// fold them through `update`.
    pub fn handle_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        let mut effects = Vec::new();
        for msg in self.key_to_msgs(key) {
            effects.extend(self.update(msg));
        }
        effects
    }

    fn key_to_msgs(&self, key: KeyEvent) -> Vec<Msg> {
        // Global shortcuts work from any panel.
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('y') => vec![Msg::CopyTable],
                KeyCode::Char('r') => vec![Msg::Apply],
                _ => Vec::new(),
            };
        }
        match key.code {
            KeyCode::Tab => return vec![Msg::FocusNext],
            KeyCode::BackTab => return vec![Msg::FocusPrev],
            _ => {}
        }

        // An active edit buffer captures plain input.
        if self.focus == Focus::Form && self.form.as_ref().is_some_and(|p| p.editing) {
            return match key.code {
                KeyCode::Char(c) => vec![Msg::FormChar(c)],
                KeyCode::Backspace => vec![Msg::FormBackspace],
                KeyCode::Enter => vec![Msg::Enter],
                KeyCode::Esc => vec![Msg::CancelEdit],
                _ => Vec::new(),
            };
        }

        match self.focus {
            Focus::Projects | Focus::Entries => match key.code {
                KeyCode::Up => vec![Msg::MoveSelection(-1)],
                KeyCode::Down => vec![Msg::MoveSelection(1)],
                KeyCode::Enter => vec![Msg::Enter],
                _ => Vec::new(),
            },
            Focus::Form => match key.code {
                KeyCode::Up => vec![Msg::MoveSelection(-1)],
                KeyCode::Down => vec![Msg::MoveSelection(1)],
                KeyCode::Left => vec![Msg::FormLeft],
                KeyCode::Right => vec![Msg::FormRight],
                KeyCode::Enter => vec![Msg::Enter],
                KeyCode::Char(' ') => vec![Msg::FormToggle],
                KeyCode::Char('a') => vec![Msg::FormSelectAll],
                KeyCode::Char('x') => vec![Msg::FormClearAll],
                KeyCode::Char('+') | KeyCode::Char('=') => vec![Msg::FormStep(1)],
                KeyCode::Char('-') => vec![Msg::FormStep(-1)],
                _ => Vec::new(),
            },
            Focus::Results => match key.code {
                KeyCode::Up => vec![Msg::MoveSelection(-1)],
                KeyCode::Down => vec![Msg::MoveSelection(1)],
                KeyCode::PageUp => vec![Msg::MoveSelection(-10)],
                KeyCode::PageDown => vec![Msg::MoveSelection(10)],
                KeyCode::Home => vec![Msg::TableHome],
                KeyCode::End => vec![Msg::TableEnd],
                _ => Vec::new(),
            },
        }
    }

    /// Update the application state based on a message, returning the side
    /// effects to perform.
    pub fn update(&mut self, msg: Msg) -> Vec<Effect> {
        match msg {
            Msg::Tick => {
                if self.in_flight > 0 {
                    self.throbber_idx = (self.throbber_idx + 1) % 10;
                }
                Vec::new()
            }
            Msg::Resize(_, _) => Vec::new(),
            Msg::FocusNext => {
                self.focus = self.focus.next();
                Vec::new()
            }
            Msg::FocusPrev => {
                self.focus = self.focus.prev();
                Vec::new()
            }
            Msg::MoveSelection(delta) => {
                self.move_selection(delta);
                Vec::new()
            }
            Msg::Enter => self.activate(),
            Msg::CancelEdit => {
                if let Some(panel) = self.form.as_mut() {
                    panel.editing = false;
                    panel.edit_buffer.clear();
                }
                Vec::new()
            }
            Msg::FormChar(c) => {
                if let Some(panel) = self.form.as_mut()
                    && panel.editing
                {
                    panel.edit_buffer.push(c);
                }
                Vec::new()
            }
            Msg::FormBackspace => {
                if let Some(panel) = self.form.as_mut()
                    && panel.editing
                {
                    panel.edit_buffer.pop();
                }
                Vec::new()
            }
            Msg::FormLeft => self.form_horizontal(-1),
            Msg::FormRight => self.form_horizontal(1),
            Msg::FormToggle => self.form_toggle(),
            Msg::FormSelectAll => self.form_bulk(true),
            Msg::FormClearAll => self.form_bulk(false),
            Msg::FormStep(steps) => self.form_step(steps),
            Msg::Apply => self.apply_query(),
            Msg::CopyTable => self.copy_table(),
            Msg::TableHome => {
                self.results.offset = 0;
                Vec::new()
            }
            Msg::TableEnd => {
                if let Some(table) = &self.results.table {
                    self.results.offset = table.data.len().saturating_sub(1);
                }
                Vec::new()
            }
            Msg::FetchCompleted(outcome) => self.complete_fetch(outcome),
        }
    }

    fn move_selection(&mut self, delta: isize) {
        match self.focus {
            Focus::Projects => {
                let len = self.catalog.catalog.as_ref().map_or(0, |c| c.projects.len());
                self.catalog.project_idx = shift(self.catalog.project_idx, delta, len);
                self.catalog.projects_list.select(Some(self.catalog.project_idx));
            }
            Focus::Entries => {
                let len = self.catalog.entries.len();
                self.catalog.entry_idx = shift(self.catalog.entry_idx, delta, len);
                self.catalog.entries_list.select(Some(self.catalog.entry_idx));
            }
            Focus::Form => {
                if let Some(panel) = self.form.as_mut() {
                    // Cursor range includes the Apply row at the end.
                    panel.cursor = shift(panel.cursor, delta, panel.form.len() + 1);
                    panel.option_idx = 0;
                    panel.bound_idx = 0;
                    panel.editing = false;
                    panel.edit_buffer.clear();
                }
            }
            Focus::Results => {
                if let Some(table) = &self.results.table {
                    self.results.offset = shift(self.results.offset, delta, table.data.len());
                }
            }
        }
    }

    /// Enter on the focused row: select a project/entry, begin or commit an
    /// edit, toggle a multi-select option, or submit via the Apply row.
    fn activate(&mut self) -> Vec<Effect> {
        match self.focus {
            Focus::Projects => self.select_project(self.catalog.project_idx),
            Focus::Entries => self.select_entry(self.catalog.entry_idx),
            Focus::Form => self.form_enter(),
            Focus::Results => Vec::new(),
        }
    }

    fn select_project(&mut self, idx: usize) -> Vec<Effect> {
        let Some(project) = self.catalog.catalog.as_ref().and_then(|c| c.projects.get(idx)) else {
            return Vec::new();
        };
        let Some(path) = project.latest_data_catalog_path() else {
            self.logs.push(format!("Project '{}' has no published versions", project.label));
            return Vec::new();
        };
        let path = path.to_string();
        self.catalog.entries.clear();
        self.catalog.entry_idx = 0;
        // Dataset switch: the old form container and its registry go away.
        self.selected_entry = None;
        self.form = None;
        self.results = ResultsState::default();
        vec![Effect::FetchDataCatalog { path }]
    }

    fn select_entry(&mut self, idx: usize) -> Vec<Effect> {
        let Some(entry) = self.catalog.entries.get(idx).cloned() else {
            return Vec::new();
        };
        self.schema_req_seq += 1;
        self.selected_entry = Some(entry.clone());
        self.form = None;
        self.results = ResultsState::default();
        vec![Effect::FetchParameters { path: entry.parameters_path, seq: self.schema_req_seq }]
    }

    fn form_enter(&mut self) -> Vec<Effect> {
        let is_apply = self.form.as_ref().is_some_and(FormPanel::is_apply_row);
        if is_apply {
            return self.apply_query();
        }
        let Some(panel) = self.form.as_mut() else { return Vec::new() };
        let Some(name) = panel.cursor_name() else { return Vec::new() };

        if panel.editing {
            let event = panel.form.widget(&name).and_then(|w| panel.commit_event(w));
            panel.editing = false;
            panel.edit_buffer.clear();
            if let Some(event) = event
                && let Some(change) = panel.form.apply_event(&name, &event)
            {
                return cascade_effect(panel, change);
            }
            return Vec::new();
        }

        // Plan first with an immutable look, then act.
        enum Plan {
            Toggle(String),
            BeginEdit(String),
            Nothing,
        }
        let plan = match panel.form.widget(&name) {
            Some(WidgetState::MultiSelect(s)) => s
                .def
                .options
                .get(panel.option_idx)
                .map(|o| Plan::Toggle(o.id.clone()))
                .unwrap_or(Plan::Nothing),
            // Single selects cycle with Left/Right instead.
            Some(WidgetState::SingleSelect(_)) | None => Plan::Nothing,
            Some(widget) => Plan::BeginEdit(panel.seed_buffer(widget)),
        };
        match plan {
            Plan::Toggle(id) => {
                if let Some(change) = panel.form.apply_event(&name, &WidgetEvent::ToggleOption(id)) {
                    return cascade_effect(panel, change);
                }
                Vec::new()
            }
            Plan::BeginEdit(seed) => {
                panel.edit_buffer = seed;
                panel.editing = true;
                Vec::new()
            }
            Plan::Nothing => Vec::new(),
        }
    }

    /// Left/Right on a form row: cycle a single-select, move the multi-select
    /// option cursor, switch the active bound of a range, or step a number.
    fn form_horizontal(&mut self, delta: i32) -> Vec<Effect> {
        let Some(panel) = self.form.as_mut() else { return Vec::new() };
        if panel.is_apply_row() {
            return Vec::new();
        }
        let Some(name) = panel.cursor_name() else { return Vec::new() };

        let mut event = None;
        match panel.form.widget(&name) {
            Some(WidgetState::SingleSelect(s)) => {
                let options = &s.def.options;
                if !options.is_empty() {
                    let current = options.iter().position(|o| o.id == s.selected_id).unwrap_or(0);
                    let next = if delta < 0 {
                        (current + options.len() - 1) % options.len()
                    } else {
                        (current + 1) % options.len()
                    };
                    event = Some(WidgetEvent::SelectOption(options[next].id.clone()));
                }
            }
            Some(WidgetState::MultiSelect(s)) => {
                let len = s.def.options.len();
                if len > 0 {
                    panel.option_idx = shift(panel.option_idx, delta as isize, len);
                }
            }
            Some(WidgetState::NumberRange(_)) | Some(WidgetState::DateRange(_)) => {
                panel.bound_idx = if delta < 0 { 0 } else { 1 };
            }
            Some(WidgetState::Number(_)) => {
                event = Some(WidgetEvent::StepNumber(delta));
            }
            _ => {}
        }

        if let Some(event) = event
            && let Some(change) = panel.form.apply_event(&name, &event)
        {
            return cascade_effect(panel, change);
        }
        Vec::new()
    }

    fn form_toggle(&mut self) -> Vec<Effect> {
        let Some(panel) = self.form.as_mut() else { return Vec::new() };
        let Some(name) = panel.cursor_name() else { return Vec::new() };
        let id = match panel.form.widget(&name) {
            Some(WidgetState::MultiSelect(s)) => s.def.options.get(panel.option_idx).map(|o| o.id.clone()),
            _ => None,
        };
        if let Some(id) = id
            && let Some(change) = panel.form.apply_event(&name, &WidgetEvent::ToggleOption(id))
        {
            return cascade_effect(panel, change);
        }
        Vec::new()
    }

    fn form_bulk(&mut self, select_all: bool) -> Vec<Effect> {
        let Some(panel) = self.form.as_mut() else { return Vec::new() };
        let Some(name) = panel.cursor_name() else { return Vec::new() };
        let allowed = match panel.form.widget(&name) {
            // Select-all is offered only when the definition asks for it;
            // clearing is always available.
            Some(WidgetState::MultiSelect(s)) => !select_all || s.def.show_select_all,
            _ => false,
        };
        if !allowed {
            return Vec::new();
        }
        let event = if select_all { WidgetEvent::SelectAll } else { WidgetEvent::ClearAll };
        if let Some(change) = panel.form.apply_event(&name, &event) {
            return cascade_effect(panel, change);
        }
        Vec::new()
    }

    fn form_step(&mut self, steps: i32) -> Vec<Effect> {
        let Some(panel) = self.form.as_mut() else { return Vec::new() };
        let Some(name) = panel.cursor_name() else { return Vec::new() };
        let event = match panel.form.widget(&name) {
            Some(WidgetState::Number(_)) => Some(WidgetEvent::StepNumber(steps)),
            Some(WidgetState::NumberRange(_)) => Some(if panel.bound_idx == 0 {
                WidgetEvent::StepLower(steps)
            } else {
                WidgetEvent::StepUpper(steps)
            }),
            _ => None,
        };
        if let Some(event) = event
            && let Some(change) = panel.form.apply_event(&name, &event)
        {
            return cascade_effect(panel, change);
        }
        Vec::new()
    }

    /// Explicit submission: snapshot the registry, encode, fetch. Dashboards
    /// whose declared format the terminal cannot render are refused with a
    /// status line instead of a fetch.
    fn apply_query(&mut self) -> Vec<Effect> {
        let Some(panel) = self.form.as_ref() else {
            self.logs.push("No dataset loaded".to_string());
            return Vec::new();
        };
        match panel.entry.format {
            OutputFormat::Table => vec![Effect::FetchTable {
                path: panel.entry.result_path.clone(),
                pairs: panel.form.query_pairs(),
            }],
            OutputFormat::Png | OutputFormat::Html => {
                let label = panel.entry.label.clone();
                self.logs
                    .push(format!("'{}' renders as an image/page; not displayable here", label));
                Vec::new()
            }
            OutputFormat::Unset => {
                let label = panel.entry.label.clone();
                self.logs.push(format!("'{}' declares an unknown result format", label));
                Vec::new()
            }
        }
    }

    fn copy_table(&mut self) -> Vec<Effect> {
        match &self.results.table {
            Some(table) => vec![Effect::CopyToClipboard(crate::cmd::table_to_tsv(table))],
            None => {
                self.logs.push("Nothing to copy yet".to_string());
                Vec::new()
            }
        }
    }

    fn complete_fetch(&mut self, outcome: FetchOutcome) -> Vec<Effect> {
        self.in_flight = self.in_flight.saturating_sub(1);
        match outcome {
            FetchOutcome::Catalog(Ok(catalog)) => {
                let count = catalog.projects.len();
                self.catalog.catalog = Some(catalog);
                self.catalog.project_idx = 0;
                self.catalog.projects_list.select(Some(0));
                self.logs.push(format!("Catalog loaded: {} project(s)", count));
                // Auto-select the first project, as the service UI does.
                if count > 0 { self.select_project(0) } else { Vec::new() }
            }
            FetchOutcome::DataCatalog(Ok(data_catalog)) => {
                self.catalog.entries = data_catalog.entries();
                self.catalog.entry_idx = 0;
                self.catalog.entries_list.select(Some(0));
                if self.catalog.entries.is_empty() {
                    self.logs.push("No datasets found for the current project".to_string());
                    Vec::new()
                } else {
                    self.select_entry(0)
                }
            }
            FetchOutcome::Parameters { seq, result: Ok(defs) } => {
                if seq != self.schema_req_seq {
                    debug!(seq, current = self.schema_req_seq, "stale schema response dropped");
                    return Vec::new();
                }
                let Some(entry) = self.selected_entry.clone() else { return Vec::new() };
                let count = defs.len();
                self.form = Some(FormPanel::new(entry, defs));
                self.logs.push(format!("Loaded {} filter(s)", count));
                Vec::new()
            }
            FetchOutcome::Cascade { provoker, token, result: Ok(defs) } => {
                match self.form.as_mut() {
                    Some(panel) if panel.tokens.is_current(&provoker, token) => {
                        let replaced = panel.form.apply_cascade_delta(&provoker, defs);
                        debug!(%provoker, ?replaced, "cascade delta applied");
                    }
                    _ => debug!(%provoker, token, "stale cascade response dropped"),
                }
                Vec::new()
            }
            FetchOutcome::Table(Ok(table)) => {
                let rows = table.data.len();
                self.results.table = Some(table);
                self.results.offset = 0;
                self.logs.push(format!("Query returned {} row(s)", rows));
                Vec::new()
            }
            // Every failure funnels into the shared status-log path; the
            // widget that provoked a failed cascade keeps its applied value.
            FetchOutcome::Catalog(Err(e))
            | FetchOutcome::DataCatalog(Err(e))
            | FetchOutcome::Parameters { result: Err(e), .. }
            | FetchOutcome::Cascade { result: Err(e), .. }
            | FetchOutcome::Table(Err(e))
            | FetchOutcome::Failed(e) => {
                self.logs.push(e);
                Vec::new()
            }
        }
    }
}

/// Issue a cascade fetch for a change event that asks for one.
fn cascade_effect(panel: &mut FormPanel, change: ChangeEvent) -> Vec<Effect> {
    if !change.triggers_cascade {
        return Vec::new();
    }
    let token = panel.tokens.issue(&change.name);
    vec![Effect::FetchCascade {
        path: panel.entry.parameters_path.clone(),
        request: CascadeRequest { provoker: change.name, selections: change.value, token },
    }]
}

/// Shift an index by a delta, clamped into `0..len`.
fn shift(current: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let moved = if delta >= 0 {
        current.saturating_add(delta as usize)
    } else {
        current.saturating_sub(delta.unsigned_abs())
    };
    moved.min(len - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use datascope_types::{DashboardMeta, DatasetMeta, NumberDef, ProjectMeta, ProjectVersion, SelectOption, SingleSelectDef};

    fn test_app() -> App {
        let client = DataServiceClient::new("http://localhost:8000").expect("local client");
        App::new(SharedCtx { client: Arc::new(client), catalog_path: "/catalog".into() })
    }

    fn entry() -> DataEntry {
        DataEntry {
            name: "demo".into(),
            label: "Demo".into(),
            parameters_path: "/demo/parameters".into(),
            result_path: "/demo/result".into(),
            format: OutputFormat::Table,
        }
    }

    fn defs() -> Vec<ParameterDef> {
        vec![
            ParameterDef::SingleSelect(SingleSelectDef {
                name: "region".into(),
                label: "Region".into(),
                options: vec![
                    SelectOption { id: "us".into(), label: "US".into() },
                    SelectOption { id: "eu".into(), label: "EU".into() },
                ],
                trigger_refresh: true,
                selected_id: "us".into(),
                ..SingleSelectDef::default()
            }),
            ParameterDef::Number(NumberDef {
                name: "year".into(),
                label: "Year".into(),
                min_value: 2000.0,
                max_value: 2024.0,
                increment: 1.0,
                selected_value: 2020.0,
                ..NumberDef::default()
            }),
        ]
    }

    fn mount_form(app: &mut App) {
        app.selected_entry = Some(entry());
        app.schema_req_seq = 1;
        app.in_flight = 1;
        let effects = app.update(Msg::FetchCompleted(FetchOutcome::Parameters { seq: 1, result: Ok(defs()) }));
        assert!(effects.is_empty());
        assert!(app.form.is_some());
    }

    #[test]
    fn catalog_arrival_chains_into_data_catalog_fetch() {
        let mut app = test_app();
        app.in_flight = 1;
        let catalog = Catalog {
            projects: vec![ProjectMeta {
                name: "p".into(),
                label: "P".into(),
                versions: vec![ProjectVersion { major_version: 1, data_catalog_path: "/p/v1/dc".into() }],
            }],
        };
        let effects = app.update(Msg::FetchCompleted(FetchOutcome::Catalog(Ok(catalog))));
        assert!(matches!(&effects[..], [Effect::FetchDataCatalog { path }] if path == "/p/v1/dc"));
    }

    #[test]
    fn data_catalog_arrival_auto_selects_first_entry() {
        let mut app = test_app();
        app.in_flight = 1;
        let dc = DataCatalog {
            datasets: vec![DatasetMeta {
                name: "demo".into(),
                label: "Demo".into(),
                parameters_path: "/demo/parameters".into(),
                result_path: "/demo/result".into(),
            }],
            dashboards: vec![],
        };
        let effects = app.update(Msg::FetchCompleted(FetchOutcome::DataCatalog(Ok(dc))));
        assert!(
            matches!(&effects[..], [Effect::FetchParameters { path, seq: 1 }] if path == "/demo/parameters")
        );
        assert_eq!(app.selected_entry.as_ref().map(|e| e.name.as_str()), Some("demo"));
    }

    #[test]
    fn stale_schema_response_is_dropped() {
        let mut app = test_app();
        app.selected_entry = Some(entry());
        app.schema_req_seq = 2;
        app.in_flight = 1;
        app.update(Msg::FetchCompleted(FetchOutcome::Parameters { seq: 1, result: Ok(defs()) }));
        assert!(app.form.is_none());
    }

    #[test]
    fn select_cycle_triggers_cascade_fetch() {
        let mut app = test_app();
        mount_form(&mut app);
        app.focus = Focus::Form;

        let effects = app.update(Msg::FormRight);
        match &effects[..] {
            [Effect::FetchCascade { path, request }] => {
                assert_eq!(path, "/demo/parameters");
                assert_eq!(request.provoker, "region");
                assert_eq!(request.selections, vec!["eu".to_string()]);
                assert_eq!(request.token, 1);
            }
            other => panic!("expected cascade effect, got {:?}", other),
        }
    }

    #[test]
    fn stale_cascade_token_is_not_applied() {
        let mut app = test_app();
        mount_form(&mut app);
        app.focus = Focus::Form;

        app.update(Msg::FormRight); // region -> eu, token 1
        app.update(Msg::FormLeft); // region -> us, token 2

        // The token-1 response arrives late with a year delta; it must not
        // be applied.
        app.in_flight = 1;
        app.update(Msg::FetchCompleted(FetchOutcome::Cascade {
            provoker: "region".into(),
            token: 1,
            result: Ok(vec![ParameterDef::Number(NumberDef {
                name: "year".into(),
                label: "Year".into(),
                min_value: 2000.0,
                max_value: 2024.0,
                increment: 1.0,
                selected_value: 2021.0,
                ..NumberDef::default()
            })]),
        }));
        let panel = app.form.as_ref().expect("form mounted");
        assert_eq!(panel.form.registry().get("year"), Some(&["2020".to_string()][..]));
    }

    #[test]
    fn current_cascade_token_updates_sibling_widget() {
        let mut app = test_app();
        mount_form(&mut app);
        app.focus = Focus::Form;
        app.update(Msg::FormRight); // region -> eu, token 1

        app.in_flight = 1;
        app.update(Msg::FetchCompleted(FetchOutcome::Cascade {
            provoker: "region".into(),
            token: 1,
            result: Ok(vec![ParameterDef::Number(NumberDef {
                name: "year".into(),
                label: "Year".into(),
                min_value: 2000.0,
                max_value: 2024.0,
                increment: 1.0,
                selected_value: 2021.0,
                ..NumberDef::default()
            })]),
        }));
        let panel = app.form.as_ref().expect("form mounted");
        assert_eq!(panel.form.registry().get("year"), Some(&["2021".to_string()][..]));
        assert_eq!(panel.form.registry().get("region"), Some(&["eu".to_string()][..]));
    }

    #[test]
    fn apply_submits_registry_in_schema_order() {
        let mut app = test_app();
        mount_form(&mut app);
        let effects = app.update(Msg::Apply);
        match &effects[..] {
            [Effect::FetchTable { path, pairs }] => {
                assert_eq!(path, "/demo/result");
                assert_eq!(
                    pairs,
                    &vec![
                        ("region".to_string(), "us".to_string()),
                        ("year".to_string(), "2020".to_string()),
                    ]
                );
            }
            other => panic!("expected table fetch, got {:?}", other),
        }
    }

    #[test]
    fn apply_refuses_non_table_dashboards() {
        let mut app = test_app();
        app.selected_entry = Some(DataEntry { format: OutputFormat::Html, ..entry() });
        app.schema_req_seq = 1;
        app.in_flight = 1;
        app.update(Msg::FetchCompleted(FetchOutcome::Parameters { seq: 1, result: Ok(vec![]) }));
        let effects = app.update(Msg::Apply);
        assert!(effects.is_empty());
        assert!(app.logs.entries.last().is_some_and(|l| l.contains("not displayable")));
    }

    #[test]
    fn edit_commit_goes_through_the_reducer() {
        let mut app = test_app();
        mount_form(&mut app);
        app.focus = Focus::Form;
        app.update(Msg::MoveSelection(1)); // cursor to year
        app.update(Msg::Enter); // begin edit
        assert!(app.form.as_ref().is_some_and(|p| p.editing));
        assert_eq!(app.form.as_ref().unwrap().edit_buffer, "2020");

        // Erase the seeded value and type a new one.
        for _ in 0..4 {
            app.update(Msg::FormBackspace);
        }
        for c in "2023".chars() {
            app.update(Msg::FormChar(c));
        }
        app.update(Msg::Enter); // commit
        let panel = app.form.as_ref().unwrap();
        assert!(!panel.editing);
        assert_eq!(panel.form.registry().get("year"), Some(&["2023".to_string()][..]));
    }

    #[test]
    fn out_of_bounds_edit_keeps_prior_value() {
        let mut app = test_app();
        mount_form(&mut app);
        app.focus = Focus::Form;
        app.update(Msg::MoveSelection(1));
        app.update(Msg::Enter);
        let panel = app.form.as_mut().unwrap();
        panel.edit_buffer = "1999".into();
        app.update(Msg::Enter);
        let panel = app.form.as_ref().unwrap();
        assert_eq!(panel.form.registry().get("year"), Some(&["2020".to_string()][..]));
    }

    #[test]
    fn dataset_switch_drops_form_and_results() {
        let mut app = test_app();
        mount_form(&mut app);
        app.results.table = Some(TableData::default());
        app.catalog.entries = vec![DataEntry { name: "other".into(), ..entry() }];
        let effects = app.select_entry(0);
        assert!(app.form.is_none());
        assert!(app.results.table.is_none());
        assert!(matches!(&effects[..], [Effect::FetchParameters { seq: 2, .. }]));
    }

    #[test]
    fn fetch_failures_land_in_the_status_log() {
        let mut app = test_app();
        app.in_flight = 1;
        app.update(Msg::FetchCompleted(FetchOutcome::Table(Err("500 from /r: boom".into()))));
        assert_eq!(app.logs.entries.last().map(String::as_str), Some("500 from /r: boom"));
        assert_eq!(app.in_flight, 0);
    }

    #[test]
    fn dashboard_entries_follow_datasets() {
        let dc = DataCatalog {
            datasets: vec![DatasetMeta {
                name: "d".into(),
                label: "D".into(),
                parameters_path: "/p".into(),
                result_path: "/r".into(),
            }],
            dashboards: vec![DashboardMeta {
                name: "b".into(),
                label: "B".into(),
                parameters_path: "/p2".into(),
                result_path: "/r2".into(),
                result_format: "png".into(),
            }],
        };
        let entries = dc.entries();
        assert_eq!(entries[1].format, OutputFormat::Png);
    }
}
