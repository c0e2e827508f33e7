/// Definitions file keys, in field order
pub const SECRET_KEYS: [&str; 5] = [
    "SECRET_SSID",
    "SECRET_PASS",
    "SECRET_DPS_GLOBAL_ENDPOINT",
    "SECRET_DPS_ID_SCOPE",
    "SECRET_DPS_SYMMETRIC_KEY",
];

/// Global DPS endpoint used when the definitions file leaves it unset
pub const DEFAULT_DPS_GLOBAL_ENDPOINT: &str = "global.azure-devices-provisioning.net";

/// Maximum SSID length in bytes (802.11)
pub const WIFI_SSID_MAX_LEN: usize = 32;
/// Shortest WPA2 passphrase
pub const WIFI_PASSPHRASE_MIN_LEN: usize = 8;
/// Longest WPA2 passphrase, printable ASCII
pub const WIFI_PASSPHRASE_MAX_LEN: usize = 63;
/// Length of a raw WPA2 PSK written as hex digits
pub const WIFI_PSK_HEX_LEN: usize = 64;

/// Maximum length of a full DNS name
pub const HOSTNAME_MAX_LEN: usize = 253;
/// Maximum length of a single DNS label
pub const HOSTNAME_LABEL_MAX_LEN: usize = 63;

/// Smallest decoded enrollment group key accepted by DPS
pub const SYMMETRIC_KEY_MIN_BYTES: usize = 16;
/// Largest decoded enrollment group key accepted by DPS
pub const SYMMETRIC_KEY_MAX_BYTES: usize = 64;
