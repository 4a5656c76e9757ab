//! # Datascope Shared Types
//!
//! Wire-level data model shared across the Datascope crates: the project
//! catalog, the parameter schema served by a dataset's parameters endpoint,
//! and the tabular result payload served by its result endpoint.
//!
//! Everything here is plain serde data. Behavior (widget reducers, selection
//! tracking, cascade merging) lives in `datascope-engine`; these types only
//! describe what the server says.

pub mod catalog;
pub mod params;
pub mod results;

pub use catalog::{Catalog, DashboardMeta, DataCatalog, DataEntry, DatasetMeta, OutputFormat, ProjectMeta, ProjectVersion};
pub use params::{
    DateDef, DateRangeDef, MultiSelectDef, NumberDef, NumberRangeDef, ParameterDef, ParamsResponse, SelectOption,
    SingleSelectDef, TextDef,
};
pub use results::{FieldDef, TableData, TableSchema};
