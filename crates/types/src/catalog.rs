//! Catalog responses: projects, versions, and per-version data catalogs.
//!
//! The top-level catalog lists projects; each project version points at a
//! data catalog of datasets and dashboards. Datasets always yield tabular
//! results; dashboards declare a `result_format` that may be something the
//! terminal cannot render.

use serde::{Deserialize, Serialize};

/// Top-level catalog response: every project visible to the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub projects: Vec<ProjectMeta>,
}

/// A project with one entry per published major version.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectMeta {
    pub name: String,
    pub label: String,
    #[serde(default)]
    pub versions: Vec<ProjectVersion>,
}

/// A published version of a project.
///
/// The wire payload also carries a `token_path` for session negotiation;
/// it is intentionally not modeled here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectVersion {
    #[serde(default)]
    pub major_version: i64,
    #[serde(default)]
    pub data_catalog_path: String,
}

impl ProjectMeta {
    /// The newest version's data catalog path, if the project has any version.
    pub fn latest_data_catalog_path(&self) -> Option<&str> {
        self.versions.first().map(|v| v.data_catalog_path.as_str())
    }
}

/// Data catalog for one project version.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataCatalog {
    #[serde(default)]
    pub datasets: Vec<DatasetMeta>,
    #[serde(default)]
    pub dashboards: Vec<DashboardMeta>,
}

/// A queryable dataset: parameters endpoint plus tabular result endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetMeta {
    pub name: String,
    pub label: String,
    pub parameters_path: String,
    pub result_path: String,
}

/// A dashboard: like a dataset, but the result payload has a declared format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardMeta {
    pub name: String,
    pub label: String,
    pub parameters_path: String,
    pub result_path: String,
    #[serde(default)]
    pub result_format: String,
}

/// How a result payload should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Unknown or unsupported declared format; results are not fetched.
    #[default]
    Unset,
    Table,
    Png,
    Html,
}

impl OutputFormat {
    /// Parse a catalog `result_format` string, case-insensitively.
    pub fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "table" => OutputFormat::Table,
            "png" => OutputFormat::Png,
            "html" => OutputFormat::Html,
            _ => OutputFormat::Unset,
        }
    }
}

/// A selectable catalog entry, unifying datasets and dashboards for the UI.
#[derive(Debug, Clone, PartialEq)]
pub struct DataEntry {
    pub name: String,
    pub label: String,
    pub parameters_path: String,
    pub result_path: String,
    pub format: OutputFormat,
}

impl DataCatalog {
    /// Flatten datasets and dashboards into the selection order shown to the
    /// user: datasets first, then dashboards.
    pub fn entries(&self) -> Vec<DataEntry> {
        let mut out: Vec<DataEntry> = Vec::with_capacity(self.datasets.len() + self.dashboards.len());
        for d in &self.datasets {
            out.push(DataEntry {
                name: d.name.clone(),
                label: d.label.clone(),
                parameters_path: d.parameters_path.clone(),
                result_path: d.result_path.clone(),
                format: OutputFormat::Table,
            });
        }
        for d in &self.dashboards {
            out.push(DataEntry {
                name: d.name.clone(),
                label: d.label.clone(),
                parameters_path: d.parameters_path.clone(),
                result_path: d.result_path.clone(),
                format: OutputFormat::parse(&d.result_format),
            });
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_round_trip_minimal() {
        let json = r#"{
            "projects": [
                {
                    "name": "sales",
                    "label": "Sales",
                    "versions": [
                        {"major_version": 2, "data_catalog_path": "/sales/v2/catalog"},
                        {"major_version": 1, "data_catalog_path": "/sales/v1/catalog"}
                    ]
                }
            ]
        }"#;

        let catalog: Catalog = serde_json::from_str(json).expect("deserialize Catalog");
        assert_eq!(catalog.projects.len(), 1);
        let project = &catalog.projects[0];
        assert_eq!(project.name, "sales");
        assert_eq!(project.latest_data_catalog_path(), Some("/sales/v2/catalog"));

        let back = serde_json::to_string(&catalog).expect("serialize Catalog");
        let catalog2: Catalog = serde_json::from_str(&back).expect("round-trip deserialize");
        assert_eq!(catalog2, catalog);
    }

    #[test]
    fn catalog_tolerates_unknown_fields() {
        // Servers include auth-related paths the client does not model.
        let json = r#"{
            "projects": [
                {
                    "name": "p", "label": "P",
                    "versions": [{"major_version": 1, "token_path": "/token", "data_catalog_path": "/dc"}]
                }
            ]
        }"#;
        let catalog: Catalog = serde_json::from_str(json).expect("deserialize with token_path");
        assert_eq!(catalog.projects[0].versions[0].data_catalog_path, "/dc");
    }

    #[test]
    fn data_catalog_entries_order_and_format() {
        let json = r#"{
            "datasets": [
                {"name": "raw", "label": "Raw", "parameters_path": "/p", "result_path": "/r"}
            ],
            "dashboards": [
                {"name": "trend", "label": "Trend", "parameters_path": "/p2", "result_path": "/r2", "result_format": "HTML"},
                {"name": "map", "label": "Map", "parameters_path": "/p3", "result_path": "/r3", "result_format": "heatmap"}
            ]
        }"#;
        let dc: DataCatalog = serde_json::from_str(json).expect("deserialize DataCatalog");
        let entries = dc.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].name, "raw");
        assert_eq!(entries[0].format, OutputFormat::Table);
        assert_eq!(entries[1].format, OutputFormat::Html);
        assert_eq!(entries[2].format, OutputFormat::Unset);
    }

    #[test]
    fn output_format_parse_is_case_insensitive() {
        assert_eq!(OutputFormat::parse("table"), OutputFormat::Table);
        assert_eq!(OutputFormat::parse("Table"), OutputFormat::Table);
        assert_eq!(OutputFormat::parse("PNG"), OutputFormat::Png);
        assert_eq!(OutputFormat::parse(""), OutputFormat::Unset);
    }
}
