//! Bridge configuration.

use serde::Deserialize;

use crate::error::BridgeResult;

/// Behaviour switches for a [`crate::Bridge`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BridgeConfig {
    /// Reject positionally paired lists (e.g. `schemas` / `schemaIds`) whose
    /// lengths differ, before any native call is made.
    pub enforce_paired_lengths: bool,
    /// Install the native library's default logger when the bridge is built.
    pub install_native_logger: bool,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            enforce_paired_lengths: true,
            install_native_logger: false,
        }
    }
}

impl BridgeConfig {
    /// Parse a JSON config document; missing keys keep their defaults.
    pub fn from_json(text: &str) -> BridgeResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Pass paired lists through unchecked and leave validation to the
    /// native library.
    pub fn permissive(mut self) -> Self {
        self.enforce_paired_lengths = false;
        self
    }
}
