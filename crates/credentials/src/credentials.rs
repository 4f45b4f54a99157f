//! The rendered credential record

use crate::cloud::AzureCloud;
use serde::{Deserialize, Serialize};

/// Azure credentials in the shape the CSI driver reads from `azure.json`
///
/// Field declaration order is the key order of the rendered file. Values are
/// only built by [`CredentialResolver`](crate::CredentialResolver), so every
/// field is non-empty.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    cloud: AzureCloud,
    tenant_id: String,
    subscription_id: String,
    #[serde(rename = "aadClientId")]
    client_id: String,
    #[serde(rename = "aadClientSecret")]
    client_secret: String,
    resource_group: String,
    location: String,
}

impl Credentials {
    pub(crate) fn new(
        cloud: AzureCloud,
        tenant_id: String,
        subscription_id: String,
        client_id: String,
        client_secret: String,
        resource_group: String,
        location: String,
    ) -> Self {
        Self {
            cloud,
            tenant_id,
            subscription_id,
            client_id,
            client_secret,
            resource_group,
            location,
        }
    }

    pub fn cloud(&self) -> AzureCloud {
        self.cloud
    }

    pub fn tenant_id(&self) -> &str {
        &self.tenant_id
    }

    pub fn subscription_id(&self) -> &str {
        &self.subscription_id
    }

    /// AAD application (client) id
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// AAD application secret
    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    pub fn resource_group(&self) -> &str {
        &self.resource_group
    }

    pub fn location(&self) -> &str {
        &self.location
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("cloud", &self.cloud)
            .field("tenant_id", &self.tenant_id)
            .field("subscription_id", &self.subscription_id)
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("resource_group", &self.resource_group)
            .field("location", &self.location)
            .finish()
    }
}
