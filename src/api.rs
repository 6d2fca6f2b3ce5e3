use async_trait::async_trait;

use crate::types::{ErrorBody, UploadReceipt, UploadStatus};

const BASE_URL: &str = "https://addons.mozilla.org/api/v3";

/// Failure of a single API call. Distinguishes a request that never produced
/// an HTTP response from one the server answered with a non-2xx status.
#[derive(Debug)]
pub enum ApiFailure {
    Transport(String),
    Rejected { status: u16, body: ErrorBody },
}

/// The two marketplace calls the deploy workflow makes. Implemented by
/// [`AmoClient`] against the live API and by in-process mocks in tests.
#[async_trait]
pub trait MarketplaceApi: Send + Sync {
    /// Create or replace a version by uploading its artifact. Idempotent PUT.
    async fn upload_version(
        &self,
        id: &str,
        version: &str,
        filename: &str,
        artifact: Vec<u8>,
        token: &str,
    ) -> Result<UploadReceipt, ApiFailure>;

    /// Fetch the state of the validation job keyed by `pk`.
    async fn upload_status(
        &self,
        id: &str,
        version: &str,
        pk: &str,
        token: &str,
    ) -> Result<UploadStatus, ApiFailure>;
}

/// Client for the addons.mozilla.org signing API.
pub struct AmoClient {
    client: reqwest::Client,
    base_url: String,
}

impl AmoClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Point the client at a different host, e.g. a staging instance.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    async fn read_rejection(resp: reqwest::Response) -> ApiFailure {
        let status = resp.status().as_u16();
        let text = resp.text().await.unwrap_or_default();
        let body = serde_json::from_str(&text).unwrap_or_default();
        ApiFailure::Rejected { status, body }
    }
}

impl Default for AmoClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MarketplaceApi for AmoClient {
    async fn upload_version(
        &self,
        id: &str,
        version: &str,
        filename: &str,
        artifact: Vec<u8>,
        token: &str,
    ) -> Result<UploadReceipt, ApiFailure> {
        let url = format!("{}/addons/{}/versions/{}/", self.base_url, id, version);
        let part = reqwest::multipart::Part::bytes(artifact).file_name(filename.to_string());
        let form = reqwest::multipart::Form::new().part("upload", part);

        let resp = self
            .client
            .put(&url)
            .header("Authorization", format!("JWT {token}"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| ApiFailure::Transport(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(Self::read_rejection(resp).await);
        }

        resp.json()
            .await
            .map_err(|e| ApiFailure::Transport(e.to_string()))
    }

    async fn upload_status(
        &self,
        id: &str,
        version: &str,
        pk: &str,
        token: &str,
    ) -> Result<UploadStatus, ApiFailure> {
        let url = format!(
            "{}/addons/{}/versions/{}/uploads/{}/",
            self.base_url, id, version, pk
        );

        let resp = self
            .client
            .get(&url)
            .header("Authorization", format!("JWT {token}"))
            .send()
            .await
            .map_err(|e| ApiFailure::Transport(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(Self::read_rejection(resp).await);
        }

        resp.json()
            .await
            .map_err(|e| ApiFailure::Transport(e.to_string()))
    }
}
