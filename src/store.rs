use std::{fmt, fs, path::Path};

use static_cell::StaticCell;
use thiserror::Error;

use crate::config::{Field, SecretsConfig, SECRETS};
use crate::definitions::{self, MissingKey, RawSecrets};

static STORE: StaticCell<SecretStore> = StaticCell::new();

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("missing configuration: {0} ({key}) has no value and no default", key = .0.key())]
    MissingConfiguration(Field),
    #[error("failed to read secrets file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse secrets file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("secrets store is already installed")]
    AlreadyInstalled,
}

/// Secrets supplied at process start instead of compiled in.
///
/// Loaded once, then either borrowed directly or installed as the
/// process-wide store with [`SecretStore::install`]. Consumers read it
/// through [`SecretStore::config`].
#[derive(Clone, PartialEq, Eq)]
pub struct SecretStore {
    wifi_ssid: String,
    wifi_password: String,
    dps_global_endpoint: String,
    dps_id_scope: String,
    dps_symmetric_key: String,
}

impl SecretStore {
    /// Resolves every key through `lookup`. Only the DPS endpoint has a default.
    pub fn from_lookup<F>(mut lookup: F) -> Result<Self, LoadError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        Self::from_values(definitions::resolve(|index| lookup(Field::ALL[index].key())))
    }

    /// Reads `SECRET_*` variables from the process environment.
    pub fn from_env() -> Result<Self, LoadError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Parses a definitions file (`SECRET_SSID = "..."`, one key per line).
    pub fn from_toml_str(s: &str) -> Result<Self, LoadError> {
        Self::from_values(RawSecrets::parse(s)?.resolve_with(|_| None))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Owned copy of the compiled-in secrets.
    pub fn compiled() -> Self {
        Self::from(SECRETS)
    }

    /// Replaces each field `lookup` has a value for.
    pub fn with_overrides<F>(mut self, mut lookup: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        for field in Field::ALL {
            if let Some(value) = lookup(field.key()) {
                *self.slot(field) = value;
            }
        }
        self
    }

    pub fn config(&self) -> SecretsConfig<'_> {
        SecretsConfig {
            wifi_ssid: &self.wifi_ssid,
            wifi_password: &self.wifi_password,
            dps_global_endpoint: &self.dps_global_endpoint,
            dps_id_scope: &self.dps_id_scope,
            dps_symmetric_key: &self.dps_symmetric_key,
        }
    }

    /// Moves the store into process-wide storage. Succeeds once per process.
    pub fn install(self) -> Result<&'static SecretStore, LoadError> {
        match STORE.try_init(self) {
            Some(store) => Ok(store),
            None => Err(LoadError::AlreadyInstalled),
        }
    }

    fn from_values(values: Result<[String; 5], MissingKey>) -> Result<Self, LoadError> {
        let [wifi_ssid, wifi_password, dps_global_endpoint, dps_id_scope, dps_symmetric_key] =
            values.map_err(|MissingKey(index)| LoadError::MissingConfiguration(Field::ALL[index]))?;

        Ok(Self {
            wifi_ssid,
            wifi_password,
            dps_global_endpoint,
            dps_id_scope,
            dps_symmetric_key,
        })
    }

    fn slot(&mut self, field: Field) -> &mut String {
        match field {
            Field::WifiSsid => &mut self.wifi_ssid,
            Field::WifiPassword => &mut self.wifi_password,
            Field::DpsGlobalEndpoint => &mut self.dps_global_endpoint,
            Field::DpsIdScope => &mut self.dps_id_scope,
            Field::DpsSymmetricKey => &mut self.dps_symmetric_key,
        }
    }
}

impl From<SecretsConfig<'_>> for SecretStore {
    fn from(config: SecretsConfig<'_>) -> Self {
        Self {
            wifi_ssid: config.wifi_ssid.to_owned(),
            wifi_password: config.wifi_password.to_owned(),
            dps_global_endpoint: config.dps_global_endpoint.to_owned(),
            dps_id_scope: config.dps_id_scope.to_owned(),
            dps_symmetric_key: config.dps_symmetric_key.to_owned(),
        }
    }
}

impl fmt::Debug for SecretStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.config(), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    const TEMPLATE: &str = include_str!("../secrets.template.toml");

    fn lookup_from(pairs: &[(&str, &str)]) -> impl FnMut(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn template_file_parses_to_template_config() {
        let store = SecretStore::from_toml_str(TEMPLATE).unwrap();
        assert_eq!(store.config(), SecretsConfig::template());
    }

    #[test]
    fn endpoint_defaults_when_absent() {
        let store = SecretStore::from_lookup(lookup_from(&[
            ("SECRET_SSID", "office"),
            ("SECRET_PASS", ""),
            ("SECRET_DPS_ID_SCOPE", "0ne00ABCDEF"),
            ("SECRET_DPS_SYMMETRIC_KEY", "c2VjcmV0"),
        ]))
        .unwrap();
        assert_eq!(
            store.config().dps_global_endpoint,
            "global.azure-devices-provisioning.net"
        );
        assert_eq!(store.config().wifi_ssid, "office");
    }

    #[test]
    fn missing_required_key_is_reported() {
        let err = SecretStore::from_lookup(lookup_from(&[
            ("SECRET_SSID", "office"),
            ("SECRET_PASS", ""),
            ("SECRET_DPS_SYMMETRIC_KEY", "c2VjcmV0"),
        ]))
        .unwrap_err();
        assert!(matches!(
            err,
            LoadError::MissingConfiguration(Field::DpsIdScope)
        ));
        assert_eq!(
            err.to_string(),
            "missing configuration: dps_id_scope (SECRET_DPS_ID_SCOPE) has no value and no default"
        );
    }

    #[test]
    fn missing_key_in_file_is_reported() {
        let err = SecretStore::from_toml_str("SECRET_SSID = \"office\"\n").unwrap_err();
        assert!(matches!(
            err,
            LoadError::MissingConfiguration(Field::WifiPassword)
        ));
    }

    #[test]
    fn unknown_key_is_a_parse_error() {
        let file = format!("{TEMPLATE}\nSECRET_SSD = \"typo\"\n");
        let err = SecretStore::from_toml_str(&file).unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
    }

    #[test]
    fn overrides_replace_file_values() {
        let store = SecretStore::from_toml_str(TEMPLATE)
            .unwrap()
            .with_overrides(lookup_from(&[
                ("SECRET_SSID", "office"),
                ("SECRET_DPS_GLOBAL_ENDPOINT", ""),
            ]));
        assert_eq!(store.config().wifi_ssid, "office");
        assert_eq!(store.config().dps_global_endpoint, "");
        assert_eq!(store.config().dps_id_scope, "");
    }

    #[test]
    fn compiled_secrets_match_source_file() {
        let expected = SecretStore::from_file(env!("SECRETS_SOURCE"))
            .unwrap()
            .with_overrides(|key| std::env::var(key).ok());
        assert_eq!(crate::config::load(), expected.config());
        assert_eq!(SecretStore::compiled(), expected);
    }

    #[test]
    fn debug_is_redacted() {
        let store = SecretStore::from(SecretsConfig {
            wifi_password: "hunter22hunter22",
            ..SecretsConfig::template()
        });
        assert!(!format!("{store:?}").contains("hunter22"));
    }
}
