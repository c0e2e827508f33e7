//! WiFi and Azure DPS credentials for the clicker firmware.
//!
//! Values are compiled in from `secrets.toml` (see `build.rs`) and exposed as
//! [`SECRETS`]. With the `std` feature they can instead be loaded at process
//! start through [`SecretStore`]. Either way callers run [`validate`] before
//! handing the values to the network and provisioning code.

#![cfg_attr(not(any(test, feature = "std")), no_std)]

pub mod config;
pub mod constants;
#[cfg(feature = "std")]
mod definitions;
mod hostname;
#[cfg(feature = "std")]
pub mod store;
pub mod validate;

pub use config::{load, Field, KeyError, SecretsConfig, SECRETS};
#[cfg(feature = "std")]
pub use store::{LoadError, SecretStore};
pub use validate::{report, validate, Reason, ValidationError, ValidationErrors};
