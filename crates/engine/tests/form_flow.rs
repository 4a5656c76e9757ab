//! End-to-end form flow: parse a served schema, edit widgets, cascade, and
//! build the submission query. No network, no terminal.

use datascope_engine::{CascadeRequest, CascadeTokens, ParameterForm, WidgetEvent, append_query, encode_query};
use datascope_types::ParamsResponse;

fn parse_defs(json: &str) -> Vec<datascope_types::ParameterDef> {
    serde_json::from_str::<ParamsResponse>(json)
        .expect("deserialize parameters payload")
        .definitions()
}

const INITIAL_SCHEMA: &str = r#"{
    "parameters": [
        {
            "widget_type": "single_select",
            "name": "region",
            "label": "Region",
            "options": [{"id": "us", "label": "US"}, {"id": "eu", "label": "EU"}],
            "selected_id": "us",
            "trigger_refresh": true
        },
        {
            "widget_type": "number",
            "name": "year",
            "label": "Year",
            "min_value": 2000,
            "max_value": 2024,
            "increment": 1,
            "selected_value": 2020
        }
    ]
}"#;

#[test]
fn initial_mount_covers_every_parameter() {
    let form = ParameterForm::new(parse_defs(INITIAL_SCHEMA));
    assert_eq!(form.len(), 2);
    assert_eq!(form.registry().len(), 2);
    for (_, values) in form.registry().iter() {
        assert!(!values.is_empty());
    }
    assert_eq!(encode_query(&form.query_pairs()), "region=us&year=2020");
}

#[test]
fn region_change_cascades_into_year() {
    let mut form = ParameterForm::new(parse_defs(INITIAL_SCHEMA));
    let mut tokens = CascadeTokens::new();

    let change = form
        .apply_event("region", &WidgetEvent::SelectOption("eu".into()))
        .expect("region changed");
    assert!(change.triggers_cascade);

    // The container (not the widget) turns the change into a scoped fetch.
    let request = CascadeRequest {
        provoker: change.name.clone(),
        selections: change.value.clone(),
        token: tokens.issue(&change.name),
    };
    assert_eq!(append_query("/demo/parameters", &request.query_pairs()), "/demo/parameters?region=eu");

    // Server answers with a delta for year only.
    let delta = parse_defs(
        r#"{
            "parameters": [
                {
                    "widget_type": "number",
                    "name": "year",
                    "label": "Year",
                    "min_value": 2000,
                    "max_value": 2024,
                    "increment": 1,
                    "selected_value": 2021
                }
            ]
        }"#,
    );
    assert!(tokens.is_current(&request.provoker, request.token));
    let replaced = form.apply_cascade_delta(&request.provoker, delta);
    assert_eq!(replaced, vec!["year"]);

    // Year re-rendered at 2021 with no direct action on the year widget.
    assert_eq!(form.registry().get("year"), Some(&["2021".to_string()][..]));
    assert_eq!(encode_query(&form.query_pairs()), "region=eu&year=2021");
}

#[test]
fn stale_cascade_response_is_discarded() {
    let mut form = ParameterForm::new(parse_defs(INITIAL_SCHEMA));
    let mut tokens = CascadeTokens::new();

    form.apply_event("region", &WidgetEvent::SelectOption("eu".into()));
    let first = tokens.issue("region");
    form.apply_event("region", &WidgetEvent::SelectOption("us".into()));
    let second = tokens.issue("region");

    // The response for the first (superseded) trigger arrives last; the
    // guard keeps it from being applied.
    assert!(!tokens.is_current("region", first));
    assert!(tokens.is_current("region", second));
}

#[test]
fn submission_reflects_schema_order_not_edit_order() {
    let mut form = ParameterForm::new(parse_defs(INITIAL_SCHEMA));
    form.apply_event("year", &WidgetEvent::CommitNumber("2021".into()));
    form.apply_event("region", &WidgetEvent::SelectOption("eu".into()));
    assert_eq!(encode_query(&form.query_pairs()), "region=eu&year=2021");
}
