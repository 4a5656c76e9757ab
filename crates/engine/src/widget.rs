//! Widget state reducers: one per widget kind.
//!
//! Each state owns a widget's editable local values and a copy of its current
//! definition. State flows one way: `apply_snapshot` resets local state from
//! the definition's `selected_*` fields, and local edits never write back
//! into the definition. Edits arrive as committed [`WidgetEvent`]s; invalid
//! edits (unparseable, out of bounds, violating a range invariant) are
//! silently rejected and the prior value is kept.
//!
//! The normalized value a widget contributes to the selection registry is an
//! ordered sequence of strings. Two quirks are load-bearing wire behavior:
//!
//! - A multi-select with nothing selected publishes `[""]`, a one-element
//!   sequence holding an empty string. The result servers expect the key to
//!   be present; display code special-cases the sentinel, query encoding must
//!   not.
//! - A date-range that has never held a complete pair suppresses publication
//!   entirely (`published_value` returns `None`); once a complete pair has
//!   existed, incomplete edits keep republishing the last complete pair.

use chrono::NaiveDate;
use datascope_types::{
    DateDef, DateRangeDef, MultiSelectDef, NumberDef, NumberRangeDef, ParameterDef, SingleSelectDef, TextDef,
};

use crate::number::{clamp, format_number, parse_number, within};

/// A committed edit routed to a widget by name. Events that do not apply to
/// the target widget's kind are ignored.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetEvent {
    /// single_select: choose the option with this id.
    SelectOption(String),
    /// multi_select: toggle the option with this id in or out.
    ToggleOption(String),
    /// multi_select: select every option in option order.
    SelectAll,
    /// multi_select: clear the selection.
    ClearAll,
    /// date: commit an ISO date string (empty clears).
    CommitDate(String),
    /// date_range: commit the start bound (empty clears it).
    CommitStartDate(String),
    /// date_range: commit the end bound (empty clears it).
    CommitEndDate(String),
    /// number: commit a raw numeric string.
    CommitNumber(String),
    /// number_range: commit the lower bound.
    CommitLower(String),
    /// number_range: commit the upper bound.
    CommitUpper(String),
    /// number: step by N increments (negative steps down), clamped to bounds.
    StepNumber(i32),
    /// number_range: step the lower bound, clamped to `[min, upper]`.
    StepLower(i32),
    /// number_range: step the upper bound, clamped to `[lower, max]`.
    StepUpper(i32),
    /// text: replace the entered text.
    CommitText(String),
}

/// What a routed edit meant, surfaced by the form container. The caller,
/// never the widget, decides whether to start a cascade fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeEvent {
    pub name: String,
    /// The value published to the registry by this change.
    pub value: Vec<String>,
    /// True when the widget's definition carries `trigger_refresh` and the
    /// selection actually changed.
    pub triggers_cascade: bool,
}

fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Bounds are optional and unparseable bounds are ignored rather than
/// rejecting every edit.
fn date_in_bounds(date: NaiveDate, min: Option<&str>, max: Option<&str>) -> bool {
    if let Some(min_date) = min.and_then(parse_iso_date)
        && date < min_date
    {
        return false;
    }
    if let Some(max_date) = max.and_then(parse_iso_date)
        && date > max_date
    {
        return false;
    }
    true
}

#[derive(Debug, Clone)]
pub struct SingleSelectState {
    pub def: SingleSelectDef,
    pub selected_id: String,
}

impl SingleSelectState {
    fn new(def: &SingleSelectDef) -> Self {
        Self { def: def.clone(), selected_id: def.selected_id.clone() }
    }

    fn reduce_select(&mut self, id: &str) -> bool {
        if id == self.selected_id || !self.def.options.iter().any(|o| o.id == id) {
            return false;
        }
        self.selected_id = id.to_string();
        true
    }

    fn value(&self) -> Vec<String> {
        vec![self.selected_id.clone()]
    }
}

#[derive(Debug, Clone)]
pub struct MultiSelectState {
    pub def: MultiSelectDef,
    /// Selection in the order the user made it; `order_matters` is honored
    /// by construction.
    pub selected_ids: Vec<String>,
}

impl MultiSelectState {
    fn new(def: &MultiSelectDef) -> Self {
        // Defaults that do not name a known option are dropped.
        let selected_ids = def
            .selected_ids
            .iter()
            .filter(|id| def.options.iter().any(|o| &o.id == *id))
            .cloned()
            .collect();
        Self { def: def.clone(), selected_ids }
    }

    fn reduce_toggle(&mut self, id: &str) -> bool {
        if let Some(pos) = self.selected_ids.iter().position(|s| s == id) {
            self.selected_ids.remove(pos);
            return true;
        }
        if self.def.options.iter().any(|o| o.id == id) {
            self.selected_ids.push(id.to_string());
            return true;
        }
        false
    }

    fn reduce_select_all(&mut self) -> bool {
        let all: Vec<String> = self.def.options.iter().map(|o| o.id.clone()).collect();
        if self.selected_ids == all {
            return false;
        }
        self.selected_ids = all;
        true
    }

    fn reduce_clear(&mut self) -> bool {
        if self.selected_ids.is_empty() {
            return false;
        }
        self.selected_ids.clear();
        true
    }

    fn value(&self) -> Vec<String> {
        if self.selected_ids.is_empty() {
            // Empty-selection sentinel; see the module docs.
            vec![String::new()]
        } else {
            self.selected_ids.clone()
        }
    }
}

#[derive(Debug, Clone)]
pub struct DateState {
    pub def: DateDef,
    pub selected: String,
}

impl DateState {
    fn new(def: &DateDef) -> Self {
        Self { def: def.clone(), selected: def.selected_date.clone() }
    }

    fn reduce_commit(&mut self, raw: &str) -> bool {
        if raw == self.selected {
            return false;
        }
        if !raw.is_empty() {
            let Some(date) = parse_iso_date(raw) else { return false };
            if !date_in_bounds(date, self.def.min_date.as_deref(), self.def.max_date.as_deref()) {
                return false;
            }
        }
        self.selected = raw.to_string();
        true
    }

    fn value(&self) -> Vec<String> {
        vec![self.selected.clone()]
    }
}

#[derive(Debug, Clone)]
pub struct DateRangeState {
    pub def: DateRangeDef,
    pub start: String,
    pub end: String,
    /// Last complete `(start, end)` pair; republished while a bound is being
    /// re-picked so a partial range never reaches the registry.
    pub last_complete: Option<(String, String)>,
}

impl DateRangeState {
    fn new(def: &DateRangeDef) -> Self {
        let start = def.selected_start_date.clone();
        let end = def.selected_end_date.clone();
        let last_complete = if !start.is_empty() && !end.is_empty() {
            Some((start.clone(), end.clone()))
        } else {
            None
        };
        Self { def: def.clone(), start, end, last_complete }
    }

    fn reduce_commit_bound(&mut self, raw: &str, is_start: bool) -> bool {
        let current = if is_start { &self.start } else { &self.end };
        if raw == current {
            return false;
        }
        if !raw.is_empty() {
            let Some(date) = parse_iso_date(raw) else { return false };
            if !date_in_bounds(date, self.def.min_date.as_deref(), self.def.max_date.as_deref()) {
                return false;
            }
            // A candidate complete pair must also be ordered.
            let counterpart = if is_start { &self.end } else { &self.start };
            if let Some(other) = parse_iso_date(counterpart) {
                let (start, end) = if is_start { (date, other) } else { (other, date) };
                if start > end {
                    return false;
                }
            }
        }
        if is_start {
            self.start = raw.to_string();
        } else {
            self.end = raw.to_string();
        }
        if !self.start.is_empty() && !self.end.is_empty() {
            self.last_complete = Some((self.start.clone(), self.end.clone()));
        }
        true
    }

    fn value(&self) -> Option<Vec<String>> {
        self.last_complete
            .as_ref()
            .map(|(start, end)| vec![start.clone(), end.clone()])
    }
}

#[derive(Debug, Clone)]
pub struct NumberState {
    pub def: NumberDef,
    pub value: f64,
}

impl NumberState {
    fn new(def: &NumberDef) -> Self {
        Self { def: def.clone(), value: def.selected_value }
    }

    fn reduce_commit(&mut self, raw: &str) -> bool {
        let Some(candidate) = parse_number(raw) else { return false };
        if candidate == self.value || !within(candidate, self.def.min_value, self.def.max_value) {
            return false;
        }
        self.value = candidate;
        true
    }

    fn reduce_step(&mut self, steps: i32) -> bool {
        let candidate = clamp(
            self.value + self.def.increment * f64::from(steps),
            self.def.min_value,
            self.def.max_value,
        );
        if candidate == self.value {
            return false;
        }
        self.value = candidate;
        true
    }

    fn published(&self) -> Vec<String> {
        vec![format_number(self.value)]
    }
}

#[derive(Debug, Clone)]
pub struct NumberRangeState {
    pub def: NumberRangeDef,
    pub lower: f64,
    pub upper: f64,
}

impl NumberRangeState {
    fn new(def: &NumberRangeDef) -> Self {
        Self { def: def.clone(), lower: def.selected_lower_value, upper: def.selected_upper_value }
    }

    /// The edited bound validates against the counterpart bound, so
    /// `lower <= upper` holds structurally.
    fn reduce_commit_lower(&mut self, raw: &str) -> bool {
        let Some(candidate) = parse_number(raw) else { return false };
        if candidate == self.lower || !within(candidate, self.def.min_value, self.upper) {
            return false;
        }
        self.lower = candidate;
        true
    }

    fn reduce_commit_upper(&mut self, raw: &str) -> bool {
        let Some(candidate) = parse_number(raw) else { return false };
        if candidate == self.upper || !within(candidate, self.lower, self.def.max_value) {
            return false;
        }
        self.upper = candidate;
        true
    }

    fn reduce_step_lower(&mut self, steps: i32) -> bool {
        let candidate = clamp(self.lower + self.def.increment * f64::from(steps), self.def.min_value, self.upper);
        if candidate == self.lower {
            return false;
        }
        self.lower = candidate;
        true
    }

    fn reduce_step_upper(&mut self, steps: i32) -> bool {
        let candidate = clamp(self.upper + self.def.increment * f64::from(steps), self.lower, self.def.max_value);
        if candidate == self.upper {
            return false;
        }
        self.upper = candidate;
        true
    }

    fn published(&self) -> Vec<String> {
        vec![format_number(self.lower), format_number(self.upper)]
    }
}

#[derive(Debug, Clone)]
pub struct TextState {
    pub def: TextDef,
    pub text: String,
}

impl TextState {
    fn new(def: &TextDef) -> Self {
        Self { def: def.clone(), text: def.entered_text.clone() }
    }

    fn reduce_commit(&mut self, raw: &str) -> bool {
        if raw == self.text {
            return false;
        }
        self.text = raw.to_string();
        true
    }

    fn value(&self) -> Vec<String> {
        vec![self.text.clone()]
    }
}

/// Mounted widget state, one per schema entry, dispatched by kind.
#[derive(Debug, Clone)]
pub enum WidgetState {
    SingleSelect(SingleSelectState),
    MultiSelect(MultiSelectState),
    Date(DateState),
    DateRange(DateRangeState),
    Number(NumberState),
    NumberRange(NumberRangeState),
    Text(TextState),
}

impl WidgetState {
    /// Mount a widget for a definition, seeding local state from its
    /// `selected_*` fields.
    pub fn new(def: &ParameterDef) -> Self {
        match def {
            ParameterDef::SingleSelect(d) => WidgetState::SingleSelect(SingleSelectState::new(d)),
            ParameterDef::MultiSelect(d) => WidgetState::MultiSelect(MultiSelectState::new(d)),
            ParameterDef::Date(d) => WidgetState::Date(DateState::new(d)),
            ParameterDef::DateRange(d) => WidgetState::DateRange(DateRangeState::new(d)),
            ParameterDef::Number(d) => WidgetState::Number(NumberState::new(d)),
            ParameterDef::NumberRange(d) => WidgetState::NumberRange(NumberRangeState::new(d)),
            ParameterDef::Text(d) => WidgetState::Text(TextState::new(d)),
        }
    }

    /// One-way sync from a fresh definition snapshot: local editable state is
    /// reset wholesale. Invoked by the container on mount and after a cascade
    /// merge touches this entry, never implicitly.
    pub fn apply_snapshot(&mut self, def: &ParameterDef) {
        *self = WidgetState::new(def);
    }

    /// Route a committed edit to the kind-specific reducer. Returns whether
    /// the widget's state changed; mismatched event kinds are ignored.
    pub fn apply(&mut self, event: &WidgetEvent) -> bool {
        match (self, event) {
            (WidgetState::SingleSelect(s), WidgetEvent::SelectOption(id)) => s.reduce_select(id),
            (WidgetState::MultiSelect(s), WidgetEvent::ToggleOption(id)) => s.reduce_toggle(id),
            (WidgetState::MultiSelect(s), WidgetEvent::SelectAll) => s.reduce_select_all(),
            (WidgetState::MultiSelect(s), WidgetEvent::ClearAll) => s.reduce_clear(),
            (WidgetState::Date(s), WidgetEvent::CommitDate(raw)) => s.reduce_commit(raw),
            (WidgetState::DateRange(s), WidgetEvent::CommitStartDate(raw)) => s.reduce_commit_bound(raw, true),
            (WidgetState::DateRange(s), WidgetEvent::CommitEndDate(raw)) => s.reduce_commit_bound(raw, false),
            (WidgetState::Number(s), WidgetEvent::CommitNumber(raw)) => s.reduce_commit(raw),
            (WidgetState::Number(s), WidgetEvent::StepNumber(steps)) => s.reduce_step(*steps),
            (WidgetState::NumberRange(s), WidgetEvent::CommitLower(raw)) => s.reduce_commit_lower(raw),
            (WidgetState::NumberRange(s), WidgetEvent::CommitUpper(raw)) => s.reduce_commit_upper(raw),
            (WidgetState::NumberRange(s), WidgetEvent::StepLower(steps)) => s.reduce_step_lower(*steps),
            (WidgetState::NumberRange(s), WidgetEvent::StepUpper(steps)) => s.reduce_step_upper(*steps),
            (WidgetState::Text(s), WidgetEvent::CommitText(raw)) => s.reduce_commit(raw),
            _ => false,
        }
    }

    /// The normalized value this widget currently contributes, or `None` to
    /// suppress publication (date-range before its first complete pair).
    pub fn published_value(&self) -> Option<Vec<String>> {
        match self {
            WidgetState::SingleSelect(s) => Some(s.value()),
            WidgetState::MultiSelect(s) => Some(s.value()),
            WidgetState::Date(s) => Some(s.value()),
            WidgetState::DateRange(s) => s.value(),
            WidgetState::Number(s) => Some(s.published()),
            WidgetState::NumberRange(s) => Some(s.published()),
            WidgetState::Text(s) => Some(s.value()),
        }
    }

    /// Whether changes to this widget should provoke a cascade refresh.
    pub fn triggers_cascade(&self) -> bool {
        match self {
            WidgetState::SingleSelect(s) => s.def.trigger_refresh,
            WidgetState::MultiSelect(s) => s.def.trigger_refresh,
            _ => false,
        }
    }

    /// The widget kind's wire discriminant, for messages and dispatch.
    pub fn kind(&self) -> &'static str {
        match self {
            WidgetState::SingleSelect(_) => "single_select",
            WidgetState::MultiSelect(_) => "multi_select",
            WidgetState::Date(_) => "date",
            WidgetState::DateRange(_) => "date_range",
            WidgetState::Number(_) => "number",
            WidgetState::NumberRange(_) => "number_range",
            WidgetState::Text(_) => "text",
        }
    }

    pub fn label(&self) -> &str {
        match self {
            WidgetState::SingleSelect(s) => &s.def.label,
            WidgetState::MultiSelect(s) => &s.def.label,
            WidgetState::Date(s) => &s.def.label,
            WidgetState::DateRange(s) => &s.def.label,
            WidgetState::Number(s) => &s.def.label,
            WidgetState::NumberRange(s) => &s.def.label,
            WidgetState::Text(s) => &s.def.label,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            WidgetState::SingleSelect(s) => s.def.description.as_deref(),
            WidgetState::MultiSelect(s) => s.def.description.as_deref(),
            WidgetState::Date(s) => s.def.description.as_deref(),
            WidgetState::DateRange(s) => s.def.description.as_deref(),
            WidgetState::Number(s) => s.def.description.as_deref(),
            WidgetState::NumberRange(s) => s.def.description.as_deref(),
            WidgetState::Text(s) => s.def.description.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use datascope_types::SelectOption;

    fn region_def(selected: &str, trigger: bool) -> ParameterDef {
        ParameterDef::SingleSelect(SingleSelectDef {
            name: "region".into(),
            label: "Region".into(),
            options: vec![
                SelectOption { id: "us".into(), label: "US".into() },
                SelectOption { id: "eu".into(), label: "EU".into() },
            ],
            trigger_refresh: trigger,
            selected_id: selected.into(),
            ..SingleSelectDef::default()
        })
    }

    fn tags_def(selected: &[&str]) -> ParameterDef {
        ParameterDef::MultiSelect(MultiSelectDef {
            name: "tags".into(),
            label: "Tags".into(),
            options: vec![
                SelectOption { id: "a".into(), label: "A".into() },
                SelectOption { id: "b".into(), label: "B".into() },
                SelectOption { id: "c".into(), label: "C".into() },
            ],
            selected_ids: selected.iter().map(|s| s.to_string()).collect(),
            ..MultiSelectDef::default()
        })
    }

    fn year_def(min: f64, max: f64, selected: f64) -> ParameterDef {
        ParameterDef::Number(NumberDef {
            name: "year".into(),
            label: "Year".into(),
            min_value: min,
            max_value: max,
            increment: 1.0,
            selected_value: selected,
            ..NumberDef::default()
        })
    }

    #[test]
    fn single_select_rejects_unknown_option() {
        let mut widget = WidgetState::new(&region_def("us", false));
        assert!(!widget.apply(&WidgetEvent::SelectOption("mars".into())));
        assert!(widget.apply(&WidgetEvent::SelectOption("eu".into())));
        assert_eq!(widget.published_value(), Some(vec!["eu".to_string()]));
    }

    #[test]
    fn single_select_same_value_is_no_change() {
        let mut widget = WidgetState::new(&region_def("us", false));
        assert!(!widget.apply(&WidgetEvent::SelectOption("us".into())));
    }

    #[test]
    fn multi_select_preserves_selection_order() {
        let mut widget = WidgetState::new(&tags_def(&[]));
        widget.apply(&WidgetEvent::ToggleOption("c".into()));
        widget.apply(&WidgetEvent::ToggleOption("a".into()));
        assert_eq!(widget.published_value(), Some(vec!["c".to_string(), "a".to_string()]));
        // Re-adding a removed id goes to the back.
        widget.apply(&WidgetEvent::ToggleOption("c".into()));
        widget.apply(&WidgetEvent::ToggleOption("c".into()));
        assert_eq!(widget.published_value(), Some(vec!["a".to_string(), "c".to_string()]));
    }

    #[test]
    fn multi_select_empty_publishes_sentinel() {
        let mut widget = WidgetState::new(&tags_def(&["a"]));
        widget.apply(&WidgetEvent::ToggleOption("a".into()));
        assert_eq!(widget.published_value(), Some(vec![String::new()]));
    }

    #[test]
    fn multi_select_select_all_uses_option_order() {
        let mut widget = WidgetState::new(&tags_def(&["b"]));
        assert!(widget.apply(&WidgetEvent::SelectAll));
        assert_eq!(
            widget.published_value(),
            Some(vec!["a".to_string(), "b".to_string(), "c".to_string()])
        );
        assert!(!widget.apply(&WidgetEvent::SelectAll));
    }

    #[test]
    fn multi_select_drops_unknown_defaults() {
        let widget = WidgetState::new(&tags_def(&["a", "zzz"]));
        assert_eq!(widget.published_value(), Some(vec!["a".to_string()]));
    }

    #[test]
    fn number_clamp_law() {
        let mut widget = WidgetState::new(&year_def(0.0, 10.0, 5.0));
        assert!(!widget.apply(&WidgetEvent::CommitNumber("15".into())));
        assert_eq!(widget.published_value(), Some(vec!["5".to_string()]));
        assert!(widget.apply(&WidgetEvent::CommitNumber("7".into())));
        assert_eq!(widget.published_value(), Some(vec!["7".to_string()]));
    }

    #[test]
    fn number_rejects_garbage_silently() {
        let mut widget = WidgetState::new(&year_def(0.0, 10.0, 5.0));
        assert!(!widget.apply(&WidgetEvent::CommitNumber("five".into())));
        assert_eq!(widget.published_value(), Some(vec!["5".to_string()]));
    }

    #[test]
    fn number_step_clamps_to_bounds() {
        let mut widget = WidgetState::new(&year_def(2000.0, 2024.0, 2023.0));
        assert!(widget.apply(&WidgetEvent::StepNumber(5)));
        assert_eq!(widget.published_value(), Some(vec!["2024".to_string()]));
        assert!(!widget.apply(&WidgetEvent::StepNumber(1)));
    }

    #[test]
    fn number_range_bounds_check_against_counterpart() {
        let def = ParameterDef::NumberRange(NumberRangeDef {
            name: "range".into(),
            label: "Range".into(),
            min_value: 0.0,
            max_value: 100.0,
            increment: 1.0,
            selected_lower_value: 20.0,
            selected_upper_value: 80.0,
            ..NumberRangeDef::default()
        });
        let mut widget = WidgetState::new(&def);
        // Lower may not cross upper, upper may not cross lower.
        assert!(!widget.apply(&WidgetEvent::CommitLower("90".into())));
        assert!(!widget.apply(&WidgetEvent::CommitUpper("10".into())));
        assert!(widget.apply(&WidgetEvent::CommitLower("40".into())));
        assert!(widget.apply(&WidgetEvent::CommitUpper("60".into())));
        assert_eq!(widget.published_value(), Some(vec!["40".to_string(), "60".to_string()]));
    }

    #[test]
    fn date_rejects_out_of_bounds_and_garbage() {
        let def = ParameterDef::Date(DateDef {
            name: "day".into(),
            label: "Day".into(),
            selected_date: "2024-06-15".into(),
            min_date: Some("2024-01-01".into()),
            max_date: Some("2024-12-31".into()),
            ..DateDef::default()
        });
        let mut widget = WidgetState::new(&def);
        assert!(!widget.apply(&WidgetEvent::CommitDate("2025-01-01".into())));
        assert!(!widget.apply(&WidgetEvent::CommitDate("not-a-date".into())));
        assert!(widget.apply(&WidgetEvent::CommitDate("2024-03-01".into())));
        assert_eq!(widget.published_value(), Some(vec!["2024-03-01".to_string()]));
    }

    #[test]
    fn date_range_suppresses_until_complete() {
        let def = ParameterDef::DateRange(DateRangeDef {
            name: "window".into(),
            label: "Window".into(),
            ..DateRangeDef::default()
        });
        let mut widget = WidgetState::new(&def);
        assert_eq!(widget.published_value(), None);

        assert!(widget.apply(&WidgetEvent::CommitStartDate("2024-01-01".into())));
        assert_eq!(widget.published_value(), None);

        assert!(widget.apply(&WidgetEvent::CommitEndDate("2024-02-01".into())));
        assert_eq!(
            widget.published_value(),
            Some(vec!["2024-01-01".to_string(), "2024-02-01".to_string()])
        );
    }

    #[test]
    fn date_range_republishes_last_complete_while_editing() {
        let def = ParameterDef::DateRange(DateRangeDef {
            name: "window".into(),
            label: "Window".into(),
            selected_start_date: "2024-01-01".into(),
            selected_end_date: "2024-02-01".into(),
            ..DateRangeDef::default()
        });
        let mut widget = WidgetState::new(&def);
        assert!(widget.apply(&WidgetEvent::CommitStartDate(String::new())));
        // Incomplete again, but the last complete pair still publishes.
        assert_eq!(
            widget.published_value(),
            Some(vec!["2024-01-01".to_string(), "2024-02-01".to_string()])
        );
    }

    #[test]
    fn date_range_rejects_inverted_pair() {
        let def = ParameterDef::DateRange(DateRangeDef {
            name: "window".into(),
            label: "Window".into(),
            selected_start_date: "2024-05-01".into(),
            selected_end_date: "2024-06-01".into(),
            ..DateRangeDef::default()
        });
        let mut widget = WidgetState::new(&def);
        assert!(!widget.apply(&WidgetEvent::CommitEndDate("2024-04-01".into())));
        assert_eq!(
            widget.published_value(),
            Some(vec!["2024-05-01".to_string(), "2024-06-01".to_string()])
        );
    }

    #[test]
    fn snapshot_resets_local_state() {
        let mut widget = WidgetState::new(&region_def("us", true));
        widget.apply(&WidgetEvent::SelectOption("eu".into()));
        widget.apply_snapshot(&region_def("us", true));
        assert_eq!(widget.published_value(), Some(vec!["us".to_string()]));
        assert!(widget.triggers_cascade());
    }

    #[test]
    fn mismatched_event_kind_is_ignored() {
        let mut widget = WidgetState::new(&region_def("us", false));
        assert!(!widget.apply(&WidgetEvent::CommitNumber("3".into())));
        assert!(!widget.apply(&WidgetEvent::ToggleOption("eu".into())));
    }
}
