//! Prow credentials bundle
//!
//! CI jobs do not export per-field variables. They mount a TOML document and
//! point `AZURE_CREDENTIALS` at it:
//!
//! ```toml
//! [Creds]
//! ClientID = "..."
//! ClientSecret = "..."
//! TenantID = "..."
//! SubscriptionID = "..."
//! StorageAccountName = "..."
//! StorageAccountKey = "..."
//! ```
//!
//! The storage account keys belong to other consumers of the same document and
//! are parsed but never copied into [`Credentials`](crate::Credentials).

use crate::error::{CredentialFileError, Result};
use serde::{Deserialize, Deserializer};
use std::path::Path;

/// Top level of the bundle document
#[derive(Debug, Clone, Deserialize)]
pub struct BundleCredentials {
    #[serde(rename = "Creds")]
    pub creds: BundleCreds,
}

/// The `[Creds]` table
#[derive(Clone, Deserialize)]
pub struct BundleCreds {
    #[serde(rename = "ClientID", deserialize_with = "non_empty")]
    pub client_id: String,
    #[serde(rename = "ClientSecret", deserialize_with = "non_empty")]
    pub client_secret: String,
    #[serde(rename = "TenantID", deserialize_with = "non_empty")]
    pub tenant_id: String,
    #[serde(rename = "SubscriptionID", deserialize_with = "non_empty")]
    pub subscription_id: String,
    #[serde(rename = "StorageAccountName", default)]
    pub storage_account_name: String,
    #[serde(rename = "StorageAccountKey", default)]
    pub storage_account_key: String,
}

impl std::fmt::Debug for BundleCreds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BundleCreds")
            .field("client_id", &self.client_id)
            .field("tenant_id", &self.tenant_id)
            .field("subscription_id", &self.subscription_id)
            .field("storage_account_name", &self.storage_account_name)
            .finish()
    }
}

fn non_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    if value.is_empty() {
        return Err(serde::de::Error::invalid_value(
            serde::de::Unexpected::Str(&value),
            &"a non-empty string",
        ));
    }
    Ok(value)
}

impl BundleCredentials {
    /// Parse bundle text; `path` is only used for error reporting
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| CredentialFileError::bundle_parse(path, e))
    }
}

/// Read and parse the bundle at `path`, returning its `[Creds]` table
pub fn decode_bundle_file(path: impl AsRef<Path>) -> Result<BundleCreds> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "reading credentials bundle");

    let content =
        std::fs::read_to_string(path).map_err(|e| CredentialFileError::bundle_read(path, e))?;
    let bundle = BundleCredentials::parse(&content, path)?;
    Ok(bundle.creds)
}
