use core::fmt;

use base64::{engine::general_purpose::STANDARD, DecodeSliceError, Engine};

use crate::constants::{DEFAULT_DPS_GLOBAL_ENDPOINT, SECRET_KEYS};

/// One of the five values held by the secrets store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    WifiSsid,
    WifiPassword,
    DpsGlobalEndpoint,
    DpsIdScope,
    DpsSymmetricKey,
}

impl Field {
    pub const COUNT: usize = 5;

    /// Every field, in definitions file order.
    pub const ALL: [Field; Field::COUNT] = [
        Field::WifiSsid,
        Field::WifiPassword,
        Field::DpsGlobalEndpoint,
        Field::DpsIdScope,
        Field::DpsSymmetricKey,
    ];

    /// Key used in the definitions file and for environment overrides.
    pub const fn key(self) -> &'static str {
        SECRET_KEYS[self as usize]
    }

    pub const fn name(self) -> &'static str {
        match self {
            Field::WifiSsid => "wifi_ssid",
            Field::WifiPassword => "wifi_password",
            Field::DpsGlobalEndpoint => "dps_global_endpoint",
            Field::DpsIdScope => "dps_id_scope",
            Field::DpsSymmetricKey => "dps_symmetric_key",
        }
    }

    /// Value that is never printed or logged.
    pub const fn is_sensitive(self) -> bool {
        matches!(self, Field::WifiPassword | Field::DpsSymmetricKey)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// WiFi and DPS credentials handed to the connectivity and provisioning code.
///
/// The compiled-in value is [`SECRETS`]; any other value (a runtime store, a
/// test fixture) can be injected wherever a `&SecretsConfig` is taken.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct SecretsConfig<'a> {
    // Wi-Fi SSID to connect to
    pub wifi_ssid: &'a str,

    // Wi-Fi pre-shared key (password), empty for an open network
    pub wifi_password: &'a str,

    // DPS global device endpoint hostname
    pub dps_global_endpoint: &'a str,

    // ID scope of the DPS instance
    pub dps_id_scope: &'a str,

    // Base64 enrollment group symmetric key
    pub dps_symmetric_key: &'a str,
}

impl<'a> SecretsConfig<'a> {
    pub const fn new(
        wifi_ssid: &'a str,
        wifi_password: &'a str,
        dps_global_endpoint: &'a str,
        dps_id_scope: &'a str,
        dps_symmetric_key: &'a str,
    ) -> Self {
        Self {
            wifi_ssid,
            wifi_password,
            dps_global_endpoint,
            dps_id_scope,
            dps_symmetric_key,
        }
    }

    /// Unfilled template: everything empty except the default endpoint.
    pub const fn template() -> SecretsConfig<'static> {
        SecretsConfig {
            wifi_ssid: "",
            wifi_password: "",
            dps_global_endpoint: DEFAULT_DPS_GLOBAL_ENDPOINT,
            dps_id_scope: "",
            dps_symmetric_key: "",
        }
    }

    pub const fn get(&self, field: Field) -> &'a str {
        match field {
            Field::WifiSsid => self.wifi_ssid,
            Field::WifiPassword => self.wifi_password,
            Field::DpsGlobalEndpoint => self.dps_global_endpoint,
            Field::DpsIdScope => self.dps_id_scope,
            Field::DpsSymmetricKey => self.dps_symmetric_key,
        }
    }

    /// Decodes the enrollment group key into `out` and returns the written bytes.
    pub fn decode_symmetric_key<'buf>(&self, out: &'buf mut [u8]) -> Result<&'buf [u8], KeyError> {
        if self.dps_symmetric_key.is_empty() {
            return Err(KeyError::Missing);
        }

        let len = STANDARD
            .decode_slice(self.dps_symmetric_key, out)
            .map_err(|e| match e {
                DecodeSliceError::OutputSliceTooSmall => KeyError::BufferTooSmall,
                _ => KeyError::InvalidBase64,
            })?;

        Ok(&out[..len])
    }
}

impl fmt::Debug for SecretsConfig<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("SecretsConfig");
        for field in Field::ALL {
            let value = self.get(field);
            if field.is_sensitive() && !value.is_empty() {
                s.field(field.name(), &format_args!("<redacted>"));
            } else {
                s.field(field.name(), &value);
            }
        }
        s.finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyError {
    Missing,
    InvalidBase64,
    BufferTooSmall,
}

impl fmt::Display for KeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyError::Missing => f.write_str("symmetric key is empty"),
            KeyError::InvalidBase64 => f.write_str("invalid base64"),
            KeyError::BufferTooSmall => f.write_str("output buffer too small for decoded key"),
        }
    }
}

/// Returns the compiled-in secrets.
pub fn load() -> SecretsConfig<'static> {
    SECRETS
}

// secrets are generated at compile time
include!(concat!(env!("OUT_DIR"), "/secrets.rs"));
