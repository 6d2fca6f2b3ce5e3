use std::time::Duration;

use crate::api::{AmoClient, ApiFailure, MarketplaceApi};
use crate::error::{DeployError, Result};
use crate::token;
use crate::types::DeployRequest;

/// Delay between validation polls.
const POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Drives one upload through submission and validation.
pub struct Deployer<A: MarketplaceApi> {
    api: A,
    poll_interval: Duration,
}

impl Deployer<AmoClient> {
    pub fn new() -> Self {
        Self::with_api(AmoClient::new())
    }
}

impl Default for Deployer<AmoClient> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: MarketplaceApi> Deployer<A> {
    pub fn with_api(api: A) -> Self {
        Self {
            api,
            poll_interval: POLL_INTERVAL,
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Upload the extension and wait for the marketplace's verdict.
    ///
    /// Mints a fresh token, PUTs the artifact, then polls the validation job
    /// until it reports the version processed. Resolves immediately when the
    /// upload response carries no tracking key (the API accepted the version
    /// synchronously). There is no internal timeout: polling continues until
    /// the server reaches a verdict or a poll call fails. Errors are never
    /// retried; the first failure ends the invocation.
    pub async fn deploy(&self, req: DeployRequest) -> Result<()> {
        validate(&req)?;

        let token = token::sign(&req.issuer, &req.secret)?;
        let artifact = tokio::fs::read(&req.src).await?;
        let filename = req
            .src
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("extension.zip")
            .to_string();

        tracing::info!(id = %req.id, version = %req.version, "Uploading version");
        let receipt = self
            .api
            .upload_version(&req.id, &req.version, &filename, artifact, &token)
            .await
            .map_err(|f| DeployError::Submission(submission_message(f, &req.version)))?;

        let Some(pk) = receipt.pk else {
            tracing::info!(id = %req.id, version = %req.version, "Upload accepted synchronously");
            return Ok(());
        };

        tracing::info!(pk = %pk, "Upload accepted, polling validation job");
        let mut first = true;
        loop {
            if !first {
                tokio::time::sleep(self.poll_interval).await;
            }
            first = false;

            let status = self
                .api
                .upload_status(&req.id, &req.version, &pk, &token)
                .await
                .map_err(polling_error)?;

            if !status.processed {
                tracing::debug!(pk = %pk, "Validation still in progress");
                continue;
            }
            if status.valid {
                tracing::info!(pk = %pk, "Validation passed");
                return Ok(());
            }
            return Err(DeployError::ValidationFailed {
                url: status.validation_url.unwrap_or_default(),
                results: status
                    .validation_results
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "null".to_string()),
            });
        }
    }
}

/// Upload and validate in one call with the live AMO client.
pub async fn deploy(req: DeployRequest) -> Result<()> {
    Deployer::new().deploy(req).await
}

/// Fields are checked in a fixed order; the first empty one is reported.
fn validate(req: &DeployRequest) -> Result<()> {
    if req.issuer.is_empty() {
        return Err(DeployError::MissingField("issuer"));
    }
    if req.secret.is_empty() {
        return Err(DeployError::MissingField("secret"));
    }
    if req.id.is_empty() {
        return Err(DeployError::MissingField("id"));
    }
    if req.version.is_empty() {
        return Err(DeployError::MissingField("version"));
    }
    if req.src.as_os_str().is_empty() {
        return Err(DeployError::MissingField("src"));
    }
    Ok(())
}

/// Status-specific messages for the submission step. Polling failures get
/// the generic form only.
fn submission_message(failure: ApiFailure, version: &str) -> String {
    match failure {
        ApiFailure::Rejected { status: 401, body } => {
            format!("401 Unauthorized: {}", body.detail.unwrap_or_default())
        }
        ApiFailure::Rejected { status: 403, .. } => {
            "403 Forbidden: no permission to modify versions".to_string()
        }
        ApiFailure::Rejected { status: 409, .. } => {
            format!("409 Conflict: version {version} already exists")
        }
        ApiFailure::Rejected { status: 400, body } => {
            format!(
                "400 Bad Request: {}",
                body.error.or(body.detail).unwrap_or_default()
            )
        }
        ApiFailure::Rejected { status, body } => {
            format!(
                "Status {status}: {}",
                body.error.or(body.detail).unwrap_or_default()
            )
        }
        ApiFailure::Transport(message) => format!("Status none: {message}"),
    }
}

fn polling_error(failure: ApiFailure) -> DeployError {
    match failure {
        ApiFailure::Rejected { status, body } => DeployError::Polling {
            status: status.to_string(),
            message: body.error.or(body.detail).unwrap_or_default(),
        },
        ApiFailure::Transport(message) => DeployError::Polling {
            status: "none".to_string(),
            message,
        },
    }
}
