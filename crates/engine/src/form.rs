//! The form container: sole owner of the schema, the mounted widgets, and
//! the selection registry.
//!
//! Widgets never see the registry or each other; edits are routed in by name
//! and change events flow back out. The caller (a UI or the headless query
//! path) decides what a change event means, in particular whether to start a
//! cascade fetch, and hands any cascade response back through
//! [`ParameterForm::apply_cascade_delta`].

use datascope_types::ParameterDef;
use indexmap::IndexMap;
use thiserror::Error;
use tracing::debug;

use crate::registry::SelectionRegistry;
use crate::schema::ParameterSchema;
use crate::widget::{ChangeEvent, WidgetEvent, WidgetState};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no parameter named '{0}' in the current schema")]
    UnknownParameter(String),
    #[error("parameter '{name}' ({kind}) does not accept the value '{value}'")]
    RejectedValue { name: String, kind: &'static str, value: String },
}

#[derive(Debug, Clone, Default)]
pub struct ParameterForm {
    schema: ParameterSchema,
    widgets: IndexMap<String, WidgetState>,
    registry: SelectionRegistry,
}

impl ParameterForm {
    /// Mount one widget per schema entry (schema order) and publish every
    /// widget's initial value. Widgets whose publication is suppressed (a
    /// date-range served without a complete default pair) contribute no
    /// registry entry until they first complete.
    pub fn new(defs: Vec<ParameterDef>) -> Self {
        let schema = ParameterSchema::from_defs(defs);
        let mut widgets = IndexMap::with_capacity(schema.len());
        let mut registry = SelectionRegistry::new();
        for (name, def) in schema.iter() {
            let widget = WidgetState::new(def);
            if let Some(value) = widget.published_value() {
                registry.publish(name, value);
            }
            widgets.insert(name.clone(), widget);
        }
        Self { schema, widgets, registry }
    }

    /// Replace the whole schema (dataset switch): every widget unmounts and
    /// the registry is rebuilt from scratch.
    pub fn replace_schema(&mut self, defs: Vec<ParameterDef>) {
        *self = ParameterForm::new(defs);
    }

    pub fn schema(&self) -> &ParameterSchema {
        &self.schema
    }

    pub fn registry(&self) -> &SelectionRegistry {
        &self.registry
    }

    pub fn widget(&self, name: &str) -> Option<&WidgetState> {
        self.widgets.get(name)
    }

    /// Widgets in mount order, for rendering.
    pub fn widgets(&self) -> impl Iterator<Item = (&String, &WidgetState)> {
        self.widgets.iter()
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Route a committed edit to the named widget. On a real change the new
    /// value is republished to the registry and a [`ChangeEvent`] comes back;
    /// rejected or identical edits return `None`. The caller alone decides
    /// whether `triggers_cascade` turns into a fetch.
    pub fn apply_event(&mut self, name: &str, event: &WidgetEvent) -> Option<ChangeEvent> {
        let widget = self.widgets.get_mut(name)?;
        if !widget.apply(event) {
            return None;
        }
        let value = widget.published_value()?;
        self.registry.publish(name, value.clone());
        Some(ChangeEvent {
            name: name.to_string(),
            value,
            triggers_cascade: widget.triggers_cascade(),
        })
    }

    /// Apply a cascade response: merge the delta into the schema, then
    /// re-snapshot and republish every replaced widget except the provoker,
    /// which keeps its own already-applied local state. Returns the names
    /// whose definitions were replaced.
    pub fn apply_cascade_delta(&mut self, provoker: &str, defs: Vec<ParameterDef>) -> Vec<String> {
        let replaced = self.schema.merge_delta(defs);
        for name in &replaced {
            if name == provoker {
                debug!(%name, "cascade delta touched its own provoker; local state kept");
                continue;
            }
            let (Some(def), Some(widget)) = (self.schema.get(name), self.widgets.get_mut(name)) else {
                continue;
            };
            widget.apply_snapshot(def);
            match widget.published_value() {
                Some(value) => self.registry.publish(name, value),
                None => {
                    self.registry.remove(name);
                }
            }
        }
        replaced
    }

    /// Snapshot the registry as query pairs for submission: each name
    /// repeated once per value, mount order preserved.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.registry.flatten()
    }

    /// Headless override path (`--set name=value`): translate a raw string
    /// into the widget's commit event. Selects take an option id,
    /// multi-selects a comma-separated id list, ranges a `start..end` pair.
    pub fn apply_override(&mut self, name: &str, raw: &str) -> Result<Option<ChangeEvent>, EngineError> {
        let kind = self
            .widgets
            .get(name)
            .map(WidgetState::kind)
            .ok_or_else(|| EngineError::UnknownParameter(name.to_string()))?;

        let rejected = || EngineError::RejectedValue {
            name: name.to_string(),
            kind,
            value: raw.to_string(),
        };

        let mut last_change = None;
        match kind {
            "single_select" => {
                last_change = self.apply_event(name, &WidgetEvent::SelectOption(raw.to_string()));
                if last_change.is_none() {
                    return Err(rejected());
                }
            }
            "multi_select" => {
                let _ = self.apply_event(name, &WidgetEvent::ClearAll);
                for id in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                    match self.apply_event(name, &WidgetEvent::ToggleOption(id.to_string())) {
                        Some(change) => last_change = Some(change),
                        None => return Err(rejected()),
                    }
                }
            }
            "date" => {
                last_change = self.apply_event(name, &WidgetEvent::CommitDate(raw.to_string()));
                if last_change.is_none() {
                    return Err(rejected());
                }
            }
            "date_range" => {
                let (start, end) = raw.split_once("..").ok_or_else(rejected)?;
                let _ = self.apply_event(name, &WidgetEvent::CommitStartDate(start.trim().to_string()));
                last_change = self.apply_event(name, &WidgetEvent::CommitEndDate(end.trim().to_string()));
            }
            "number" => {
                last_change = self.apply_event(name, &WidgetEvent::CommitNumber(raw.to_string()));
                if last_change.is_none() {
                    return Err(rejected());
                }
            }
            "number_range" => {
                let (lower, upper) = raw.split_once("..").ok_or_else(rejected)?;
                let _ = self.apply_event(name, &WidgetEvent::CommitLower(lower.trim().to_string()));
                last_change = self.apply_event(name, &WidgetEvent::CommitUpper(upper.trim().to_string()));
            }
            _ => {
                last_change = self.apply_event(name, &WidgetEvent::CommitText(raw.to_string()));
            }
        }
        Ok(last_change)
    }
}
