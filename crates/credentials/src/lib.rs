//! Azure test credentials
//!
//! Produces the short-lived `azure.json` credential file that Azure File CSI
//! driver sanity, integration and e2e tests read, and removes it afterwards.
//!
//! Credentials come from one of two places:
//!
//! - **Direct variables** - `tenantId`, `subscriptionId`, `aadClientId`,
//!   `aadClientSecret` (plus optional `resourceGroup`, `location`), or their
//!   `_china` counterparts for Azure China
//! - **Prow bundle** - a TOML file named by `AZURE_CREDENTIALS`
//!
//! # Quick start
//!
//! ```no_run
//! use azure_test_credentials::{create_credential_file, delete_credential_file};
//!
//! let creds = create_credential_file(false)?;
//! println!("testing in {}", creds.location());
//! // ... run the tests that read /tmp/azure.json ...
//! delete_credential_file()?;
//! # Ok::<(), azure_test_credentials::CredentialFileError>(())
//! ```
//!
//! The explicit form takes the environment and destination as values:
//!
//! ```no_run
//! use azure_test_credentials::{CredentialFileConfig, EnvSnapshot, create_credential_file_with};
//!
//! let env = EnvSnapshot::from_pairs([
//!     ("tenantId", "t"),
//!     ("subscriptionId", "s"),
//!     ("aadClientId", "c"),
//!     ("aadClientSecret", "x"),
//! ]);
//! let config = CredentialFileConfig::new("/run/e2e/azure.json");
//! let _creds = create_credential_file_with(&env, &config, false)?;
//! # Ok::<(), azure_test_credentials::CredentialFileError>(())
//! ```
#![forbid(unsafe_code)]

pub mod bundle;
pub mod cloud;
pub mod config;
pub mod credentials;
pub mod env;
pub mod error;
pub mod render;
pub mod resolver;

pub use crate::bundle::{BundleCredentials, BundleCreds, decode_bundle_file};
pub use crate::cloud::{
    AZURE_CHINA_CLOUD, AZURE_PUBLIC_CLOUD, AzureCloud, DEFAULT_CHINA_CLOUD_LOCATION,
    DEFAULT_PUBLIC_CLOUD_LOCATION, EnvVarNames, RegionProfile,
};
pub use crate::config::{
    CredentialFileConfig, DEFAULT_CREDENTIAL_FILE_PATH, DEFAULT_RESOURCE_GROUP_PREFIX,
};
pub use crate::credentials::Credentials;
pub use crate::env::{AZURE_CREDENTIALS_ENV, DirectCredentials, EnvSnapshot};
pub use crate::error::{CredentialFileError, Result};
pub use crate::render::CredentialFile;
pub use crate::resolver::CredentialResolver;

/// Resolve credentials from the process environment and write `/tmp/azure.json`
///
/// `alternate_region` selects Azure China.
pub fn create_credential_file(alternate_region: bool) -> Result<Credentials> {
    create_credential_file_with(
        &EnvSnapshot::from_process(),
        &CredentialFileConfig::default(),
        alternate_region,
    )
}

/// Remove `/tmp/azure.json`; succeeds if it does not exist
pub fn delete_credential_file() -> Result<()> {
    CredentialFile::default().delete()
}

/// Resolve credentials from `env` and write them to `config.destination`
pub fn create_credential_file_with(
    env: &EnvSnapshot,
    config: &CredentialFileConfig,
    alternate_region: bool,
) -> Result<Credentials> {
    let file = CredentialFile::new(config)?;
    let credentials = CredentialResolver::new(env.clone())
        .with_resource_group_prefix(config.resource_group_prefix.clone())
        .resolve(alternate_region)?;
    file.render(&credentials)?;
    Ok(credentials)
}

/// Remove the file at `config.destination`; succeeds if it does not exist
pub fn delete_credential_file_with(config: &CredentialFileConfig) -> Result<()> {
    CredentialFile::new(config)?.delete()
}

/// Commonly used types
pub mod prelude {
    pub use crate::{
        AzureCloud, CredentialFile, CredentialFileConfig, CredentialFileError,
        CredentialResolver, Credentials, EnvSnapshot,
    };
}
