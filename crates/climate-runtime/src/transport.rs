//! HTTP client for the remote aggregation service.
//!
//! The service exposes two endpoints under a configurable base URL:
//!
//! | Method | Path        | Request                       | Success body          |
//! |--------|-------------|-------------------------------|-----------------------|
//! | POST   | `/upload/`  | multipart field `file` (CSV)  | `{ "file_path": .. }` |
//! | GET    | `/process/` | query `file_name=<name>`      | yearly + monthly data |
//!
//! Failures surface as [`ClimateError::TransportFailure`] carrying the
//! server's `detail` message when one is present. Requests are made exactly
//! once; retrying is left to the caller.

use std::path::Path;
use std::time::Duration;

use climate_core::error::{ClimateError, Result};
use climate_core::models::AggregateResult;
use climate_core::settings::DEFAULT_SERVER_URL;
use climate_data::parser::ensure_csv_extension;
use climate_data::remote::{ErrorResponse, ProcessResponse, UploadResponse};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use tracing::{debug, info, warn};

const UPLOAD_FAILED: &str = "File upload failed.";
const PROCESS_FAILED: &str = "File processing failed.";

/// Per-request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

// ── RemoteClient ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct RemoteClient {
    client: Client,
    base_url: String,
}

impl Default for RemoteClient {
    fn default() -> Self {
        Self::new(DEFAULT_SERVER_URL)
    }
}

impl RemoteClient {
    /// Create a client for `base_url` (trailing slashes are ignored).
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|e| {
                warn!(error = %e, "falling back to default HTTP client");
                Client::new()
            });
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Upload the CSV at `path`; returns the server-side file path.
    pub async fn upload(&self, path: &Path) -> Result<String> {
        ensure_csv_extension(path)?;
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| ClimateError::FileRead {
                path: path.to_path_buf(),
                source,
            })?;
        let file_name = file_name_of(path)?;

        let part = Part::bytes(bytes)
            .file_name(file_name.clone())
            .mime_str("text/csv")
            .map_err(|e| ClimateError::TransportFailure(e.to_string()))?;
        let form = Form::new().part("file", part);

        let url = format!("{}/upload/", self.base_url);
        debug!(url = %url, file = %file_name, "uploading file");

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(network_failure)?;
        let response = check_status(response, UPLOAD_FAILED).await?;

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| ClimateError::MalformedResponse(e.to_string()))?;
        let stored = body.file_path.ok_or_else(|| {
            ClimateError::MalformedResponse("upload response has no file_path".to_string())
        })?;
        info!(file = %file_name, stored = %stored, "upload complete");
        Ok(stored)
    }

    /// Ask the server to aggregate a previously uploaded file.
    pub async fn process(&self, file_name: &str) -> Result<AggregateResult> {
        let url = format!("{}/process/", self.base_url);
        debug!(url = %url, file = %file_name, "requesting processing");

        let response = self
            .client
            .get(&url)
            .query(&[("file_name", file_name)])
            .send()
            .await
            .map_err(network_failure)?;
        let response = check_status(response, PROCESS_FAILED).await?;

        let body: ProcessResponse = response
            .json()
            .await
            .map_err(|e| ClimateError::MalformedResponse(e.to_string()))?;
        let result = body.into_aggregate()?;
        info!(
            years = result.yearly.len(),
            months = result.monthly.len(),
            "remote aggregation received"
        );
        Ok(result)
    }

    /// Upload `path`, then process it by its file name.
    pub async fn upload_and_process(&self, path: &Path) -> Result<AggregateResult> {
        self.upload(path).await?;
        self.process(&file_name_of(path)?).await
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn file_name_of(path: &Path) -> Result<String> {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .ok_or_else(|| ClimateError::InvalidFileType(path.display().to_string()))
}

fn network_failure(e: reqwest::Error) -> ClimateError {
    warn!(error = %e, "request failed");
    ClimateError::TransportFailure(e.to_string())
}

/// Pass 2xx responses through; otherwise extract the server's `detail`.
async fn check_status(response: Response, fallback: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let detail = response
        .json::<ErrorResponse>()
        .await
        .ok()
        .and_then(|body| body.detail)
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string());
    warn!(status = %status, detail = %detail, "server rejected request");
    Err(ClimateError::TransportFailure(detail))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
