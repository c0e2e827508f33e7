use core::fmt;

use base64::{engine::general_purpose::STANDARD, Engine};
use heapless::Vec;

use crate::config::{Field, SecretsConfig};
use crate::constants::{
    SYMMETRIC_KEY_MAX_BYTES, SYMMETRIC_KEY_MIN_BYTES, WIFI_PASSPHRASE_MAX_LEN,
    WIFI_PASSPHRASE_MIN_LEN, WIFI_PSK_HEX_LEN, WIFI_SSID_MAX_LEN,
};
use crate::hostname::is_valid_hostname;

// Unpadded chunk size decoded at a time when checking the symmetric key
const KEY_CHUNK_LEN: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    Empty,
    TooLong { max: usize },
    InvalidPassphrase,
    InvalidHostname,
    InvalidBase64,
    InvalidKeyLength,
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reason::Empty => f.write_str("must not be empty"),
            Reason::TooLong { max } => write!(f, "longer than {max} bytes"),
            Reason::InvalidPassphrase => write!(
                f,
                "passphrase must be {WIFI_PASSPHRASE_MIN_LEN} to {WIFI_PASSPHRASE_MAX_LEN} printable ASCII characters or {WIFI_PSK_HEX_LEN} hex digits"
            ),
            Reason::InvalidHostname => f.write_str("invalid hostname"),
            Reason::InvalidBase64 => f.write_str("invalid base64"),
            Reason::InvalidKeyLength => write!(
                f,
                "decoded key must be {SYMMETRIC_KEY_MIN_BYTES} to {SYMMETRIC_KEY_MAX_BYTES} bytes"
            ),
        }
    }
}

/// A field that is present but unusable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationError {
    pub field: Field,
    pub reason: Reason,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ValidationError {}

/// At most one error per field.
pub type ValidationErrors = Vec<ValidationError, { Field::COUNT }>;

/// Checks every field and collects all failures, in field order.
pub fn validate(config: &SecretsConfig<'_>) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    for field in Field::ALL {
        if let Err(reason) = check(field, config.get(field)) {
            // capacity matches the number of fields
            errors.push(ValidationError { field, reason }).ok();
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Logs each failure. Values are never included, only field names and keys.
pub fn report(errors: &[ValidationError]) {
    for error in errors {
        log::error!(
            "Invalid secret {} ({}): {}",
            error.field,
            error.field.key(),
            error.reason
        );
    }
}

fn check(field: Field, value: &str) -> Result<(), Reason> {
    match field {
        Field::WifiSsid => {
            if value.is_empty() {
                Err(Reason::Empty)
            } else if value.len() > WIFI_SSID_MAX_LEN {
                Err(Reason::TooLong {
                    max: WIFI_SSID_MAX_LEN,
                })
            } else {
                Ok(())
            }
        }
        // empty means an open network
        Field::WifiPassword => {
            if value.is_empty() || is_wpa2_passphrase(value) || is_wpa2_hex_psk(value) {
                Ok(())
            } else {
                Err(Reason::InvalidPassphrase)
            }
        }
        Field::DpsGlobalEndpoint => {
            if value.is_empty() || is_valid_hostname(value) {
                Ok(())
            } else {
                Err(Reason::InvalidHostname)
            }
        }
        Field::DpsIdScope => {
            if value.is_empty() {
                Err(Reason::Empty)
            } else {
                Ok(())
            }
        }
        Field::DpsSymmetricKey => {
            if value.is_empty() {
                return Err(Reason::Empty);
            }
            let len = decoded_key_len(value)?;
            if (SYMMETRIC_KEY_MIN_BYTES..=SYMMETRIC_KEY_MAX_BYTES).contains(&len) {
                Ok(())
            } else {
                Err(Reason::InvalidKeyLength)
            }
        }
    }
}

fn is_wpa2_passphrase(value: &str) -> bool {
    (WIFI_PASSPHRASE_MIN_LEN..=WIFI_PASSPHRASE_MAX_LEN).contains(&value.len())
        && value.bytes().all(|b| matches!(b, b' '..=b'~'))
}

fn is_wpa2_hex_psk(value: &str) -> bool {
    value.len() == WIFI_PSK_HEX_LEN && value.bytes().all(|b| b.is_ascii_hexdigit())
}

// Decodes in fixed chunks so keys of any length are checked without allocating.
// Every chunk but the last is a whole number of quads and may not hold padding.
fn decoded_key_len(key: &str) -> Result<usize, Reason> {
    let mut buf = [0u8; KEY_CHUNK_LEN / 4 * 3];
    let mut total = 0;

    let mut chunks = key.as_bytes().chunks(KEY_CHUNK_LEN).peekable();
    while let Some(chunk) = chunks.next() {
        if chunks.peek().is_some() && chunk.contains(&b'=') {
            return Err(Reason::InvalidBase64);
        }
        total += STANDARD
            .decode_slice(chunk, &mut buf)
            .map_err(|_| Reason::InvalidBase64)?;
    }

    Ok(total)
}
