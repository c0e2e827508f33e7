// Shared by build.rs (through `#[path]`) and the runtime store, so the
// compiled-in and runtime secrets are resolved by the same rules.

use serde::Deserialize;

use crate::constants::{DEFAULT_DPS_GLOBAL_ENDPOINT, SECRET_KEYS};

/// Index into `SECRET_KEYS` of a key with no value and no default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingKey(pub usize);

impl MissingKey {
    pub fn key(&self) -> &'static str {
        SECRET_KEYS[self.0]
    }
}

/// Definitions file as written, every key optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawSecrets {
    #[serde(rename = "SECRET_SSID")]
    ssid: Option<String>,
    #[serde(rename = "SECRET_PASS")]
    pass: Option<String>,
    #[serde(rename = "SECRET_DPS_GLOBAL_ENDPOINT")]
    dps_global_endpoint: Option<String>,
    #[serde(rename = "SECRET_DPS_ID_SCOPE")]
    dps_id_scope: Option<String>,
    #[serde(rename = "SECRET_DPS_SYMMETRIC_KEY")]
    dps_symmetric_key: Option<String>,
}

impl RawSecrets {
    pub fn parse(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Resolves every key in `SECRET_KEYS` order. `overrides` wins over the
    /// file, then the endpoint default applies.
    pub fn resolve_with<F>(mut self, mut overrides: F) -> Result<[String; 5], MissingKey>
    where
        F: FnMut(&'static str) -> Option<String>,
    {
        resolve(|index| overrides(SECRET_KEYS[index]).or_else(|| self.take(index)))
    }

    fn take(&mut self, index: usize) -> Option<String> {
        match index {
            0 => self.ssid.take(),
            1 => self.pass.take(),
            2 => self.dps_global_endpoint.take(),
            3 => self.dps_id_scope.take(),
            4 => self.dps_symmetric_key.take(),
            _ => None,
        }
    }
}

pub fn default_value(index: usize) -> Option<&'static str> {
    (SECRET_KEYS[index] == "SECRET_DPS_GLOBAL_ENDPOINT").then_some(DEFAULT_DPS_GLOBAL_ENDPOINT)
}

/// Looks up each key by index, falling back to its default.
pub fn resolve<F>(mut value_of: F) -> Result<[String; 5], MissingKey>
where
    F: FnMut(usize) -> Option<String>,
{
    let mut values: [String; 5] = Default::default();
    for (index, slot) in values.iter_mut().enumerate() {
        *slot = value_of(index)
            .or_else(|| default_value(index).map(str::to_owned))
            .ok_or(MissingKey(index))?;
    }
    Ok(values)
}
