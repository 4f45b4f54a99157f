//! Credential file configuration

use crate::error::{CredentialFileError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Path the driver test tooling reads credentials from
pub const DEFAULT_CREDENTIAL_FILE_PATH: &str = "/tmp/azure.json";

/// Prefix of generated resource-group names
pub const DEFAULT_RESOURCE_GROUP_PREFIX: &str = "azurefile-csi-driver-test-";

/// Where the credential file is written and how missing values are generated
///
/// # Examples
///
/// ```
/// use azure_test_credentials::CredentialFileConfig;
///
/// let config = CredentialFileConfig::default();
/// assert_eq!(config.destination.to_str(), Some("/tmp/azure.json"));
///
/// let config = CredentialFileConfig::new("/run/test/azure.json")
///     .with_resource_group_prefix("e2e-");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialFileConfig {
    /// Absolute path of the rendered JSON file
    #[serde(default = "default_destination")]
    pub destination: PathBuf,

    /// Prefix joined with a UUID when no resource group is supplied
    #[serde(default = "default_resource_group_prefix")]
    pub resource_group_prefix: String,
}

fn default_destination() -> PathBuf {
    PathBuf::from(DEFAULT_CREDENTIAL_FILE_PATH)
}

fn default_resource_group_prefix() -> String {
    DEFAULT_RESOURCE_GROUP_PREFIX.to_string()
}

impl CredentialFileConfig {
    /// Create a configuration writing to `destination`
    pub fn new(destination: impl Into<PathBuf>) -> Self {
        Self {
            destination: destination.into(),
            resource_group_prefix: default_resource_group_prefix(),
        }
    }

    /// Set the destination path
    pub fn with_destination(mut self, destination: impl Into<PathBuf>) -> Self {
        self.destination = destination.into();
        self
    }

    /// Set the generated resource-group prefix
    pub fn with_resource_group_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.resource_group_prefix = prefix.into();
        self
    }

    /// Check that the destination can name a file
    pub fn validate(&self) -> Result<()> {
        if self.destination.as_os_str().is_empty() {
            return Err(CredentialFileError::invalid_config(
                "destination",
                "must not be empty",
            ));
        }

        if !self.destination.is_absolute() {
            return Err(CredentialFileError::invalid_config(
                "destination",
                format!("must be an absolute path, got {}", self.destination.display()),
            ));
        }

        if self.destination.file_name().is_none() {
            return Err(CredentialFileError::invalid_config(
                "destination",
                "must name a file",
            ));
        }

        Ok(())
    }
}

impl Default for CredentialFileConfig {
    fn default() -> Self {
        Self::new(default_destination())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn defaults_match_driver_contract() {
        let config = CredentialFileConfig::default();
        assert_eq!(config.destination, PathBuf::from("/tmp/azure.json"));
        assert_eq!(config.resource_group_prefix, "azurefile-csi-driver-test-");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn deserializes_with_field_defaults() {
        let config: CredentialFileConfig =
            serde_json::from_str(r#"{"destination":"/run/azure.json"}"#).unwrap();
        assert_eq!(config.destination, PathBuf::from("/run/azure.json"));
        assert_eq!(config.resource_group_prefix, DEFAULT_RESOURCE_GROUP_PREFIX);

        let config: CredentialFileConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, CredentialFileConfig::default());
    }

    #[rstest]
    #[case("")]
    #[case("relative/azure.json")]
    #[case("/tmp/..")]
    #[case("/")]
    fn rejects_unusable_destinations(#[case] destination: &str) {
        let err = CredentialFileConfig::new(destination).validate().unwrap_err();
        assert!(
            matches!(err, CredentialFileError::InvalidConfig { field: "destination", .. }),
            "{err:?}"
        );
    }
}
