//! Credential resolution
//!
//! Two sources, first match wins:
//!
//! 1. the direct per-field variables, when all four mandatory ones are set;
//! 2. the bundle named by `AZURE_CREDENTIALS`, when that variable is present.
//!
//! Values are never merged across sources. Resource group and location
//! defaults apply to whichever source wins.

use crate::bundle::decode_bundle_file;
use crate::cloud::{AzureCloud, RegionProfile};
use crate::config::DEFAULT_RESOURCE_GROUP_PREFIX;
use crate::credentials::Credentials;
use crate::env::{DirectCredentials, EnvSnapshot};
use crate::error::{CredentialFileError, Result};
use uuid::Uuid;

/// Resolves [`Credentials`] from an explicit environment snapshot
#[derive(Debug, Clone)]
pub struct CredentialResolver {
    env: EnvSnapshot,
    resource_group_prefix: String,
}

impl CredentialResolver {
    /// Create a resolver over `env`
    pub fn new(env: EnvSnapshot) -> Self {
        Self {
            env,
            resource_group_prefix: DEFAULT_RESOURCE_GROUP_PREFIX.to_string(),
        }
    }

    /// Set the prefix used for generated resource-group names
    pub fn with_resource_group_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.resource_group_prefix = prefix.into();
        self
    }

    /// Resolve credentials for the public or the China cloud
    ///
    /// The bundle source always yields [`AzureCloud::Public`], even when the
    /// alternate region was requested. Its location default still follows the
    /// requested region.
    pub fn resolve(&self, alternate_region: bool) -> Result<Credentials> {
        let profile = RegionProfile::select(alternate_region);
        let direct = DirectCredentials::read(&self.env, &profile.env);

        let resource_group = if direct.resource_group.is_empty() {
            self.generate_resource_group()
        } else {
            direct.resource_group.clone()
        };
        let location = if direct.location.is_empty() {
            profile.default_location.to_string()
        } else {
            direct.location.clone()
        };

        if direct.is_complete() {
            tracing::debug!(cloud = %profile.cloud, "using credentials from environment variables");
            let DirectCredentials {
                tenant_id,
                subscription_id,
                client_id,
                client_secret,
                ..
            } = direct;
            return Ok(Credentials::new(
                profile.cloud,
                tenant_id,
                subscription_id,
                client_id,
                client_secret,
                resource_group,
                location,
            ));
        }

        if let Some(path) = self.env.bundle_path() {
            tracing::info!("Running in Prow, converting AZURE_CREDENTIALS to a credential file");
            if profile.cloud != AzureCloud::Public {
                tracing::warn!(
                    requested = %profile.cloud,
                    "credentials bundle only targets {}",
                    AzureCloud::Public
                );
            }

            let creds = decode_bundle_file(path)?;
            return Ok(Credentials::new(
                AzureCloud::Public,
                creds.tenant_id,
                creds.subscription_id,
                creds.client_id,
                creds.client_secret,
                resource_group,
                location,
            ));
        }

        Err(CredentialFileError::missing_credentials(
            profile.env.mandatory(),
        ))
    }

    fn generate_resource_group(&self) -> String {
        format!("{}{}", self.resource_group_prefix, Uuid::new_v4())
    }
}
