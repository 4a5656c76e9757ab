//! # Datascope Parameter-Widget Engine
//!
//! The core of the dynamic filter subsystem, kept free of I/O and rendering:
//!
//! - [`schema::ParameterSchema`]: the ordered, name-keyed schema snapshot
//!   with in-place cascade merging.
//! - [`widget::WidgetState`]: one reducer per widget kind, turning committed
//!   edits into a normalized string-sequence value.
//! - [`registry::SelectionRegistry`]: the write-only mapping from parameter
//!   name to its current normalized value.
//! - [`cascade`]: request tokens that let callers discard stale cascade
//!   responses, plus the request payload itself.
//! - [`form::ParameterForm`]: the container owning all of the above; it
//!   mounts one widget per schema entry, routes edits, applies cascade
//!   deltas, and snapshots the registry for submission.
//! - [`query`]: percent-encoded query assembly with repeated keys.
//!
//! The UI layers (terminal or headless) drive a `ParameterForm` with
//! [`widget::WidgetEvent`]s and perform the fetches themselves; the engine
//! decides what changed, what to publish, and what a change means.

pub mod cascade;
pub mod form;
pub mod number;
pub mod query;
pub mod registry;
pub mod schema;
pub mod widget;

pub use cascade::{CascadeRequest, CascadeTokens};
pub use form::{EngineError, ParameterForm};
pub use query::{append_query, encode_query};
pub use registry::SelectionRegistry;
pub use schema::ParameterSchema;
pub use widget::{ChangeEvent, WidgetEvent, WidgetState};
