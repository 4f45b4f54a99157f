//! Environment snapshot and the direct credential source
//!
//! Resolution never reads the process environment itself. Callers capture the
//! recognized variables once into an [`EnvSnapshot`] (from the process, a
//! fixture, or their own configuration) and hand that to the resolver.

use crate::cloud::{EnvVarNames, RegionProfile};
use std::collections::HashMap;

/// Variable whose presence selects the bundle source; its value is a file path
pub const AZURE_CREDENTIALS_ENV: &str = "AZURE_CREDENTIALS";

/// Point-in-time copy of the environment variables resolution cares about
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    vars: HashMap<String, String>,
}

impl EnvSnapshot {
    /// Create an empty snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture every recognized variable from the process environment
    ///
    /// Only the direct variables for both regions and `AZURE_CREDENTIALS` are
    /// copied. Values that are not valid UTF-8 are converted lossily.
    pub fn from_process() -> Self {
        let names = RegionProfile::PUBLIC
            .env
            .all()
            .into_iter()
            .chain(RegionProfile::CHINA.env.all())
            .chain([AZURE_CREDENTIALS_ENV]);

        let vars: HashMap<String, String> = names
            .filter_map(|name| {
                std::env::var_os(name)
                    .map(|value| (name.to_string(), value.to_string_lossy().into_owned()))
            })
            .collect();

        tracing::trace!(count = vars.len(), "captured credential environment");
        Self { vars }
    }

    /// Build a snapshot from explicit name/value pairs
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        pairs.into_iter().collect()
    }

    /// Set a variable
    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    /// Value of a variable, `None` when absent
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Value of a variable, empty when absent
    pub fn get_or_empty(&self, name: &str) -> &str {
        self.get(name).unwrap_or_default()
    }

    /// Path named by `AZURE_CREDENTIALS`, if the variable is present at all
    ///
    /// A present-but-empty variable still counts as present.
    pub fn bundle_path(&self) -> Option<&str> {
        self.get(AZURE_CREDENTIALS_ENV)
    }
}

impl<K, V> FromIterator<(K, V)> for EnvSnapshot
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

/// Raw values read from the direct per-field variables
///
/// Absent variables are empty strings; nothing here fails.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct DirectCredentials {
    pub tenant_id: String,
    pub subscription_id: String,
    pub client_id: String,
    pub client_secret: String,
    pub resource_group: String,
    pub location: String,
}

impl DirectCredentials {
    /// Read the six direct values named by `names`
    pub fn read(env: &EnvSnapshot, names: &EnvVarNames) -> Self {
        let read = |name: &str| env.get_or_empty(name).to_string();
        Self {
            tenant_id: read(names.tenant_id),
            subscription_id: read(names.subscription_id),
            client_id: read(names.client_id),
            client_secret: read(names.client_secret),
            resource_group: read(names.resource_group),
            location: read(names.location),
        }
    }

    /// Whether all four mandatory fields are non-empty
    pub fn is_complete(&self) -> bool {
        !self.tenant_id.is_empty()
            && !self.subscription_id.is_empty()
            && !self.client_id.is_empty()
            && !self.client_secret.is_empty()
    }
}

impl std::fmt::Debug for DirectCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectCredentials")
            .field("tenant_id", &self.tenant_id)
            .field("subscription_id", &self.subscription_id)
            .field("client_id", &self.client_id)
            .field("resource_group", &self.resource_group)
            .field("location", &self.location)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn full_public_env() -> EnvSnapshot {
        EnvSnapshot::from_pairs([
            ("tenantId", "t1"),
            ("subscriptionId", "s1"),
            ("aadClientId", "c1"),
            ("aadClientSecret", "x1"),
            ("resourceGroup", "rg1"),
            ("location", "loc1"),
        ])
    }

    #[test]
    fn reads_public_names() {
        let direct = DirectCredentials::read(&full_public_env(), &RegionProfile::PUBLIC.env);
        assert_eq!(
            direct,
            DirectCredentials {
                tenant_id: "t1".into(),
                subscription_id: "s1".into(),
                client_id: "c1".into(),
                client_secret: "x1".into(),
                resource_group: "rg1".into(),
                location: "loc1".into(),
            }
        );
        assert!(direct.is_complete());
    }

    #[test]
    fn china_profile_ignores_public_names() {
        let direct = DirectCredentials::read(&full_public_env(), &RegionProfile::CHINA.env);
        assert_eq!(direct, DirectCredentials::default());
        assert!(!direct.is_complete());
    }

    #[test]
    fn empty_mandatory_value_is_incomplete() {
        let env = full_public_env().with_var("aadClientSecret", "");
        let direct = DirectCredentials::read(&env, &RegionProfile::PUBLIC.env);
        assert!(!direct.is_complete());
        assert_eq!(direct.client_id, "c1");
    }

    #[test]
    fn optional_fields_do_not_affect_completeness() {
        let env = EnvSnapshot::from_pairs([
            ("tenantId_china", "t"),
            ("subscriptionId_china", "s"),
            ("aadClientId_china", "c"),
            ("aadClientSecret_china", "x"),
        ]);
        let direct = DirectCredentials::read(&env, &RegionProfile::CHINA.env);
        assert!(direct.is_complete());
        assert!(direct.resource_group.is_empty());
        assert!(direct.location.is_empty());
    }

    #[test]
    fn bundle_path_presence() {
        assert_eq!(EnvSnapshot::new().bundle_path(), None);
        let env = EnvSnapshot::new().with_var(AZURE_CREDENTIALS_ENV, "");
        assert_eq!(env.bundle_path(), Some(""));
    }

    #[test]
    fn debug_omits_secret() {
        let direct = DirectCredentials::read(&full_public_env(), &RegionProfile::PUBLIC.env);
        let rendered = format!("{direct:?}");
        assert!(rendered.contains("t1"));
        assert!(!rendered.contains("x1"));
    }
}
