//! Parameter schema wire model.
//!
//! A parameters endpoint returns `{"parameters": [...]}` where each entry is
//! a tagged object discriminated by `widget_type`. The same payload shape is
//! returned for full schema loads and for cascade deltas (a subset of the
//! parameter names, refreshed after a `trigger_refresh` widget changed).
//!
//! Parsing is tolerant by contract: an entry with an unrecognized
//! `widget_type`, or one whose body does not match its declared shape, is a
//! schema-author error and is skipped rather than failing the whole response.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One option of a select-type parameter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub id: String,
    pub label: String,
}

/// Single-choice dropdown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SingleSelectDef {
    pub name: String,
    pub label: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub options: Vec<SelectOption>,
    #[serde(default)]
    pub trigger_refresh: bool,
    #[serde(default)]
    pub selected_id: String,
}

/// Multi-choice selector with ordered selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MultiSelectDef {
    pub name: String,
    pub label: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub options: Vec<SelectOption>,
    #[serde(default)]
    pub trigger_refresh: bool,
    #[serde(default)]
    pub selected_ids: Vec<String>,
    #[serde(default)]
    pub order_matters: bool,
    #[serde(default)]
    pub show_select_all: bool,
}

/// Single ISO date (`YYYY-MM-DD`) with optional bounds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DateDef {
    pub name: String,
    pub label: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub selected_date: String,
    #[serde(default)]
    pub min_date: Option<String>,
    #[serde(default)]
    pub max_date: Option<String>,
}

/// Inclusive ISO date range; either bound may arrive empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DateRangeDef {
    pub name: String,
    pub label: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub selected_start_date: String,
    #[serde(default)]
    pub selected_end_date: String,
    #[serde(default)]
    pub min_date: Option<String>,
    #[serde(default)]
    pub max_date: Option<String>,
}

/// Bounded numeric value with a stepping increment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NumberDef {
    pub name: String,
    pub label: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub min_value: f64,
    #[serde(default)]
    pub max_value: f64,
    #[serde(default = "default_increment")]
    pub increment: f64,
    #[serde(default)]
    pub selected_value: f64,
}

/// Bounded numeric range; the invariant `lower <= upper` is enforced by the
/// engine's reducers, not by deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NumberRangeDef {
    pub name: String,
    pub label: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub min_value: f64,
    #[serde(default)]
    pub max_value: f64,
    #[serde(default = "default_increment")]
    pub increment: f64,
    #[serde(default)]
    pub selected_lower_value: f64,
    #[serde(default)]
    pub selected_upper_value: f64,
}

/// Free-form text entry. `input_type` is an opaque rendering hint
/// (`text`, `textarea`, `color`, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextDef {
    pub name: String,
    pub label: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub entered_text: String,
    #[serde(default = "default_input_type")]
    pub input_type: String,
}

fn default_increment() -> f64 {
    1.0
}

fn default_input_type() -> String {
    "text".to_string()
}

/// A server-declared filter control, discriminated by `widget_type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "widget_type", rename_all = "snake_case")]
pub enum ParameterDef {
    SingleSelect(SingleSelectDef),
    MultiSelect(MultiSelectDef),
    Date(DateDef),
    DateRange(DateRangeDef),
    Number(NumberDef),
    NumberRange(NumberRangeDef),
    Text(TextDef),
}

impl ParameterDef {
    /// The parameter's unique key within one schema snapshot.
    pub fn name(&self) -> &str {
        match self {
            ParameterDef::SingleSelect(d) => &d.name,
            ParameterDef::MultiSelect(d) => &d.name,
            ParameterDef::Date(d) => &d.name,
            ParameterDef::DateRange(d) => &d.name,
            ParameterDef::Number(d) => &d.name,
            ParameterDef::NumberRange(d) => &d.name,
            ParameterDef::Text(d) => &d.name,
        }
    }

    /// Human-readable label shown next to the widget.
    pub fn label(&self) -> &str {
        match self {
            ParameterDef::SingleSelect(d) => &d.label,
            ParameterDef::MultiSelect(d) => &d.label,
            ParameterDef::Date(d) => &d.label,
            ParameterDef::DateRange(d) => &d.label,
            ParameterDef::Number(d) => &d.label,
            ParameterDef::NumberRange(d) => &d.label,
            ParameterDef::Text(d) => &d.label,
        }
    }

    /// Optional hover/help text.
    pub fn description(&self) -> Option<&str> {
        match self {
            ParameterDef::SingleSelect(d) => d.description.as_deref(),
            ParameterDef::MultiSelect(d) => d.description.as_deref(),
            ParameterDef::Date(d) => d.description.as_deref(),
            ParameterDef::DateRange(d) => d.description.as_deref(),
            ParameterDef::Number(d) => d.description.as_deref(),
            ParameterDef::NumberRange(d) => d.description.as_deref(),
            ParameterDef::Text(d) => d.description.as_deref(),
        }
    }

    /// Whether a change to this parameter should provoke a cascade refresh.
    /// Only select-type widgets carry the flag.
    pub fn trigger_refresh(&self) -> bool {
        match self {
            ParameterDef::SingleSelect(d) => d.trigger_refresh,
            ParameterDef::MultiSelect(d) => d.trigger_refresh,
            _ => false,
        }
    }
}

/// Raw parameters payload. Entries stay as JSON values until
/// [`ParamsResponse::definitions`] filters out the ones this client does not
/// understand.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParamsResponse {
    #[serde(default)]
    pub parameters: Vec<Value>,
}

impl ParamsResponse {
    /// Decode each entry, skipping unknown widget types and malformed bodies.
    pub fn definitions(self) -> Vec<ParameterDef> {
        self.parameters
            .into_iter()
            .filter_map(|raw| serde_json::from_value::<ParameterDef>(raw).ok())
            .collect()
    }
}
