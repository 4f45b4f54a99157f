//! Error types for credential resolution and the credential file
//!
//! Every failure surfaced by this crate is a [`CredentialFileError`]. File and
//! parser failures keep the originating path and the underlying cause, both in
//! the `Display` text and through [`std::error::Error::source`].
//!
//! ```
//! use azure_test_credentials::CredentialFileError;
//!
//! let err = CredentialFileError::missing_credentials([
//!     "tenantId",
//!     "subscriptionId",
//!     "aadClientId",
//!     "aadClientSecret",
//! ]);
//! assert!(err.to_string().contains("$aadClientSecret"));
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, CredentialFileError>;

/// Credential file error type
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum CredentialFileError {
    /// Neither the direct variables nor the bundle variable supplied credentials
    #[error(
        "AZURE_CREDENTIALS is not set. You will need to set the following env vars: ${}, ${}, ${} and ${}",
        .variables[0],
        .variables[1],
        .variables[2],
        .variables[3]
    )]
    MissingCredentials {
        /// Mandatory variables the caller must set, in tenant/subscription/client/secret order
        variables: [&'static str; 4],
    },

    /// The bundle file could not be read
    #[error("Failed to read credentials file {path}: {source}")]
    BundleRead {
        /// Path taken from the bundle variable
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The bundle file is not a well-formed credentials bundle
    ///
    /// Covers malformed TOML, a missing `Creds` table, and a missing or empty
    /// mandatory key.
    #[error("Failed to parse credentials file {path}: {source}")]
    BundleParse {
        /// Path taken from the bundle variable
        path: PathBuf,
        /// Underlying TOML error
        #[source]
        source: toml::de::Error,
    },

    /// The credential file could not be created or written
    #[error("Failed to create {path}: {source}")]
    FileCreate {
        /// Destination path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The credential file exists but could not be removed
    #[error("Failed to remove {path}: {source}")]
    FileDelete {
        /// Destination path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The JSON document could not be produced; indicates a bug, not bad input
    #[error("Failed to render credential file: {source}")]
    Template {
        /// Underlying serializer error
        #[source]
        source: serde_json::Error,
    },

    /// The configured destination cannot hold a credential file
    #[error("Invalid credential file configuration for {field}: {reason}")]
    InvalidConfig {
        /// Configuration field at fault
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },
}

impl CredentialFileError {
    /// Create a missing credentials error
    pub fn missing_credentials(variables: [&'static str; 4]) -> Self {
        Self::MissingCredentials { variables }
    }

    /// Create a bundle read error
    pub fn bundle_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::BundleRead {
            path: path.into(),
            source,
        }
    }

    /// Create a bundle parse error
    pub fn bundle_parse(path: impl Into<PathBuf>, source: toml::de::Error) -> Self {
        Self::BundleParse {
            path: path.into(),
            source,
        }
    }

    /// Create a file create error
    pub fn file_create(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileCreate {
            path: path.into(),
            source,
        }
    }

    /// Create a file delete error
    pub fn file_delete(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileDelete {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid configuration error
    pub fn invalid_config(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }

    /// Whether the caller can fix this by changing its environment or inputs
    ///
    /// `Template` is the only internal failure.
    pub fn is_user_error(&self) -> bool {
        !matches!(self, Self::Template { .. })
    }
}

impl From<serde_json::Error> for CredentialFileError {
    fn from(source: serde_json::Error) -> Self {
        Self::Template { source }
    }
}
