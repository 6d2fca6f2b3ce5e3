//! Deploys WebExtensions to addons.mozilla.org.
//!
//! One call does the whole workflow: mint a short-lived HS256 token from the
//! caller's API credentials, upload the packaged extension as a new version,
//! then poll the validation job until AMO accepts or rejects it.
//!
//! ```no_run
//! use amo_deploy::DeployRequest;
//!
//! # async fn run() -> amo_deploy::Result<()> {
//! amo_deploy::deploy(DeployRequest {
//!     issuer: "user:12345:67".to_string(),
//!     secret: "0123456789abcdef".to_string(),
//!     id: "my-extension@example.com".to_string(),
//!     version: "1.0.2".to_string(),
//!     src: "dist/my-extension.zip".into(),
//! })
//! .await
//! # }
//! ```

pub mod api;
pub mod deploy;
pub mod error;
pub mod token;
pub mod types;

pub use api::{AmoClient, ApiFailure, MarketplaceApi};
pub use deploy::{deploy, Deployer};
pub use error::{DeployError, Result};
pub use types::{DeployRequest, UploadReceipt, UploadStatus};
