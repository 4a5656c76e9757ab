//! # Datascope TUI
//!
//! Terminal front end for dataset exploration services: browse projects and
//! datasets, edit the server-declared filter form, and run queries into a
//! results table.
//!
//! ## Architecture
//!
//! The crate follows a message/effect loop: key events become `Msg`s handled
//! by `App::update`, which returns `Effect`s; the `cmd` module executes
//! effects as spawned fetches whose outcomes feed back into the loop. The
//! filter semantics themselves (reducers, selection registry, cascade
//! merging) live in `datascope-engine`; this crate only renders them and
//! moves bytes.

mod app;
mod cmd;
mod runtime;
mod theme;
mod ui;

use anyhow::Result;
use datascope_api::DataServiceClient;

/// Run the TUI against a service until the user quits.
pub async fn run(client: DataServiceClient, catalog_path: String) -> Result<()> {
    runtime::run_app(client, catalog_path).await
}
