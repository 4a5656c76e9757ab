//! Effect execution layer.
//!
//! Translates [`Effect`]s from pure state updates into actual work: spawned
//! HTTP fetches that resolve to [`FetchOutcome`]s, and clipboard writes.
//! Fetch tasks are pushed onto the runtime's `FuturesUnordered` so the event
//! loop can join them as they finish; the user keeps editing while any
//! number of fetches are outstanding.

use futures_util::stream::FuturesUnordered;
use tokio::task::JoinHandle;

use datascope_types::TableData;

use crate::app::{App, Effect, FetchOutcome};

/// Execute a batch of effects, spawning fetches onto `pending`.
pub fn run_effects(app: &mut App, effects: Vec<Effect>, pending: &mut FuturesUnordered<JoinHandle<FetchOutcome>>) {
    for effect in effects {
        match effect {
            Effect::FetchCatalog => {
                let client = app.ctx.client.clone();
                let path = app.ctx.catalog_path.clone();
                app.in_flight += 1;
                pending.push(tokio::spawn(async move {
                    FetchOutcome::Catalog(client.fetch_catalog(&path).await.map_err(render_error))
                }));
            }
            Effect::FetchDataCatalog { path } => {
                let client = app.ctx.client.clone();
                app.in_flight += 1;
                pending.push(tokio::spawn(async move {
                    FetchOutcome::DataCatalog(client.fetch_data_catalog(&path).await.map_err(render_error))
                }));
            }
            Effect::FetchParameters { path, seq } => {
                let client = app.ctx.client.clone();
                app.in_flight += 1;
                pending.push(tokio::spawn(async move {
                    let result = client.fetch_parameters(&path, None).await.map_err(render_error);
                    FetchOutcome::Parameters { seq, result }
                }));
            }
            Effect::FetchCascade { path, request } => {
                let client = app.ctx.client.clone();
                app.in_flight += 1;
                pending.push(tokio::spawn(async move {
                    let scope = request.query_pairs();
                    let result = client.fetch_parameters(&path, Some(&scope)).await.map_err(render_error);
                    FetchOutcome::Cascade { provoker: request.provoker, token: request.token, result }
                }));
            }
            Effect::FetchTable { path, pairs } => {
                let client = app.ctx.client.clone();
                app.in_flight += 1;
                pending.push(tokio::spawn(async move {
                    FetchOutcome::Table(client.fetch_table(&path, &pairs).await.map_err(render_error))
                }));
            }
            Effect::CopyToClipboard(text) => copy_to_clipboard(app, text),
        }
    }
}

fn render_error(error: anyhow::Error) -> String {
    format!("{:#}", error)
}

/// Write text into the system clipboard, logging the outcome.
fn copy_to_clipboard(app: &mut App, text: String) {
    match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text)) {
        Ok(()) => app.logs.push("Table copied to clipboard".to_string()),
        Err(e) => app.logs.push(format!("Clipboard error: {}", e)),
    }
}

/// Flatten a result table to tab-separated text: one header row of field
/// names, then one line per data row in schema field order.
pub fn table_to_tsv(table: &TableData) -> String {
    let mut out = String::new();
    for (i, field) in table.schema.fields.iter().enumerate() {
        if i != 0 {
            out.push('\t');
        }
        out.push_str(&field.name);
    }
    out.push('\n');

    for row in &table.data {
        for (i, field) in table.schema.fields.iter().enumerate() {
            if i != 0 {
                out.push('\t');
            }
            out.push_str(&TableData::cell_text(row, &field.name));
        }
        out.push('\n');
    }
    out
}
