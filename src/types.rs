use std::path::PathBuf;

use serde::Deserialize;

/// Everything one deploy invocation needs. All five fields are required;
/// nothing is defaulted or read from the environment.
#[derive(Debug, Clone)]
pub struct DeployRequest {
    /// JWT issuer from the AMO API credentials page.
    pub issuer: String,
    /// JWT secret paired with the issuer.
    pub secret: String,
    /// Add-on ID (slug or GUID).
    pub id: String,
    /// Version being uploaded, e.g. "1.0.2".
    pub version: String,
    /// Path to the packaged extension (.zip/.xpi).
    pub src: PathBuf,
}

/// Response to the version upload. `pk` keys the validation job; the API
/// omits it when it accepts the upload synchronously.
#[derive(Debug, Deserialize)]
pub struct UploadReceipt {
    #[serde(default)]
    pub pk: Option<String>,
}

/// One poll of the validation job.
#[derive(Debug, Deserialize)]
pub struct UploadStatus {
    #[serde(default)]
    pub processed: bool,
    #[serde(default)]
    pub valid: bool,
    #[serde(default)]
    pub validation_url: Option<String>,
    #[serde(default)]
    pub validation_results: Option<serde_json::Value>,
}

/// Error payload shape the marketplace returns alongside non-2xx statuses.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}
