//! Cloud and region selection
//!
//! The only region-dependent branching lives here: which cloud name is
//! rendered, which environment variables are read, and which location is used
//! when none is supplied.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Cloud name rendered for the public Azure cloud
pub const AZURE_PUBLIC_CLOUD: &str = "AzurePublicCloud";
/// Cloud name rendered for Azure China
pub const AZURE_CHINA_CLOUD: &str = "AzureChinaCloud";

/// Location used when the public-cloud `location` variable is unset
pub const DEFAULT_PUBLIC_CLOUD_LOCATION: &str = "eastus2";
/// Location used when `location_china` is unset
pub const DEFAULT_CHINA_CLOUD_LOCATION: &str = "chinaeast2";

/// Azure cloud environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AzureCloud {
    /// Public Azure
    #[serde(rename = "AzurePublicCloud")]
    Public,
    /// Azure operated in China
    #[serde(rename = "AzureChinaCloud")]
    China,
}

impl AzureCloud {
    /// Name written to the `cloud` key of the credential file
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Public => AZURE_PUBLIC_CLOUD,
            Self::China => AZURE_CHINA_CLOUD,
        }
    }
}

impl fmt::Display for AzureCloud {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Environment variable names read for one region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvVarNames {
    pub tenant_id: &'static str,
    pub subscription_id: &'static str,
    pub client_id: &'static str,
    pub client_secret: &'static str,
    pub resource_group: &'static str,
    pub location: &'static str,
}

impl EnvVarNames {
    const PUBLIC: Self = Self {
        tenant_id: "tenantId",
        subscription_id: "subscriptionId",
        client_id: "aadClientId",
        client_secret: "aadClientSecret",
        resource_group: "resourceGroup",
        location: "location",
    };

    const CHINA: Self = Self {
        tenant_id: "tenantId_china",
        subscription_id: "subscriptionId_china",
        client_id: "aadClientId_china",
        client_secret: "aadClientSecret_china",
        resource_group: "resourceGroup_china",
        location: "location_china",
    };

    /// The four variables without which the direct source is unusable
    pub fn mandatory(&self) -> [&'static str; 4] {
        [
            self.tenant_id,
            self.subscription_id,
            self.client_id,
            self.client_secret,
        ]
    }

    /// Every variable name for this region
    pub fn all(&self) -> [&'static str; 6] {
        [
            self.tenant_id,
            self.subscription_id,
            self.client_id,
            self.client_secret,
            self.resource_group,
            self.location,
        ]
    }
}

/// Region-specific resolution settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionProfile {
    pub cloud: AzureCloud,
    pub default_location: &'static str,
    pub env: EnvVarNames,
}

impl RegionProfile {
    /// Public Azure profile
    pub const PUBLIC: Self = Self {
        cloud: AzureCloud::Public,
        default_location: DEFAULT_PUBLIC_CLOUD_LOCATION,
        env: EnvVarNames::PUBLIC,
    };

    /// Azure China profile
    pub const CHINA: Self = Self {
        cloud: AzureCloud::China,
        default_location: DEFAULT_CHINA_CLOUD_LOCATION,
        env: EnvVarNames::CHINA,
    };

    /// Pick the profile for the alternate-region flag
    pub fn select(alternate_region: bool) -> Self {
        if alternate_region {
            Self::CHINA
        } else {
            Self::PUBLIC
        }
    }

    /// Profile for a given cloud
    pub fn for_cloud(cloud: AzureCloud) -> Self {
        match cloud {
            AzureCloud::Public => Self::PUBLIC,
            AzureCloud::China => Self::CHINA,
        }
    }
}
