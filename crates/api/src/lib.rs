//! Datascope HTTP client.
//!
//! A thin wrapper around a configured `reqwest::Client` for talking to a
//! dataset exploration service. It focuses on:
//!
//! - Validating the configured base URL for safety
//! - Building requests with a consistent User-Agent and Accept header
//! - Fetching JSON with friendly error mapping (the server's `message` or
//!   `detail` field surfaces when present)
//! - Typed helpers for the catalog, parameters, and result endpoints
//!
//! Authentication is out of scope: requests are anonymous, and auth-related
//! catalog fields are ignored upstream in `datascope-types`.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use datascope_engine::append_query;
use datascope_types::{Catalog, DataCatalog, ParameterDef, ParamsResponse, TableData};
use reqwest::{Client, RequestBuilder, Url, header};
use tracing::debug;

/// Hostnames allowed to use any scheme; everything else must be HTTPS.
const LOCALHOST_DOMAINS: &[&str] = &["localhost", "127.0.0.1"];

/// Client for one dataset exploration service.
#[derive(Debug, Clone)]
pub struct DataServiceClient {
    pub base_url: String,
    pub http: Client,
    pub user_agent: String,
}

impl DataServiceClient {
    /// Construct a client for a validated base URL.
    ///
    /// Non-localhost hosts must use HTTPS; `localhost`/`127.0.0.1` may use
    /// any scheme for local development.
    pub fn new(base_url: &str) -> Result<Self> {
        validate_base_url(base_url)?;

        let mut default_headers = header::HeaderMap::new();
        default_headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(default_headers)
            .timeout(Duration::from_secs(30))
            .build()
            .context("build http client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
            user_agent: format!("datascope/0.1; {}", std::env::consts::OS),
        })
    }

    /// Build a GET request for a service-relative path (which may already
    /// carry a query string).
    pub fn request(&self, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "building request");

        self.http
            .request(reqwest::Method::GET, url)
            .header(header::USER_AGENT, &self.user_agent)
    }

    /// GET a path and decode the body as JSON.
    ///
    /// Transport failures get a hint about connectivity; non-2xx statuses
    /// become errors carrying the server's own message when it sent one.
    pub async fn get_json(&self, path: &str) -> Result<serde_json::Value> {
        let response = self
            .request(path)
            .send()
            .await
            .with_context(|| format!("network error fetching {path}; check the service is reachable"))?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(anyhow!("{} from {}: {}", status, path, extract_error_message(&text)));
        }

        serde_json::from_str(&text).with_context(|| format!("invalid JSON from {path}"))
    }

    /// Fetch the top-level project catalog.
    pub async fn fetch_catalog(&self, path: &str) -> Result<Catalog> {
        let value = self.get_json(path).await?;
        serde_json::from_value(value).context("malformed catalog payload")
    }

    /// Fetch one project version's data catalog.
    pub async fn fetch_data_catalog(&self, path: &str) -> Result<DataCatalog> {
        let value = self.get_json(path).await?;
        serde_json::from_value(value).context("malformed data catalog payload")
    }

    /// Fetch a parameter schema. Without a scope this is the full schema;
    /// with one, the delta for that provoker's new selections.
    pub async fn fetch_parameters(&self, path: &str, scope: Option<&[(String, String)]>) -> Result<Vec<ParameterDef>> {
        let path = match scope {
            Some(pairs) => append_query(path, pairs),
            None => path.to_string(),
        };
        let value = self.get_json(&path).await?;
        let response: ParamsResponse = serde_json::from_value(value).context("malformed parameters payload")?;
        Ok(response.definitions())
    }

    /// Execute a submitted query against a result endpoint.
    pub async fn fetch_table(&self, path: &str, pairs: &[(String, String)]) -> Result<TableData> {
        let value = self.get_json(&append_query(path, pairs)).await?;
        serde_json::from_value(value).context("malformed table payload")
    }
}

/// Validate that a base URL is acceptable for use by the client.
///
/// Rules:
/// - `localhost` or `127.0.0.1`: any scheme is allowed
/// - otherwise: scheme must be HTTPS
fn validate_base_url(base: &str) -> Result<()> {
    let parsed = Url::parse(base).map_err(|e| anyhow!("invalid base URL '{}': {}", base, e))?;

    let host = parsed
        .host_str()
        .ok_or_else(|| anyhow!("base URL must include a host"))?;

    if LOCALHOST_DOMAINS.iter().any(|&allowed| host.eq_ignore_ascii_case(allowed)) {
        return Ok(());
    }

    if parsed.scheme() != "https" {
        return Err(anyhow!(
            "base URL must use https for non-localhost hosts; got '{}://'",
            parsed.scheme()
        ));
    }

    Ok(())
}

/// Pull a human-readable message out of an error body. Servers answer with
/// `{"message": ...}` for general failures and `{"detail": ...}` for
/// authorization ones; anything else falls back to the raw body.
fn extract_error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "detail"] {
            if let Some(text) = value.get(key).and_then(|v| v.as_str()) {
                return text.to_string();
            }
        }
    }
    if body.is_empty() {
        "<no body>".to_string()
    } else {
        body.to_string()
    }
}
