//! The bridge: a native library plus the behaviour switches applied to
//! every call made through it.

use anoncreds_bridge_native::NativeLibrary;

use crate::config::BridgeConfig;
use crate::error::{BridgeError, BridgeResult};
use crate::list::OwnedArray;
use crate::translate;

pub struct Bridge<L> {
    native: L,
    config: BridgeConfig,
}

impl<L: NativeLibrary> Bridge<L> {
    pub fn new(native: L) -> Self {
        Self::with_config(native, BridgeConfig::default())
    }

    pub fn with_config(native: L, config: BridgeConfig) -> Self {
        let bridge = Self { native, config };
        if bridge.config.install_native_logger {
            if let Err(e) = bridge.set_default_logger() {
                log::warn!("could not install native logger: {e}");
            }
        }
        bridge
    }

    pub fn native(&self) -> &L {
        &self.native
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Status check for one native call; see [`translate::translate`].
    pub(crate) fn finish<T>(
        &self,
        operation: &str,
        status: u32,
        read: impl FnOnce() -> BridgeResult<T>,
    ) -> BridgeResult<T> {
        translate::translate(&self.native, operation, status, read)
    }

    /// Reject positionally paired lists of different lengths.
    pub(crate) fn check_paired<A, B>(
        &self,
        left: (&str, &OwnedArray<A>),
        right: (&str, &OwnedArray<B>),
    ) -> BridgeResult<()> {
        let ((left_name, left), (right_name, right)) = (left, right);
        if !self.config.enforce_paired_lengths || left.len() == right.len() {
            return Ok(());
        }
        Err(BridgeError::invalid(
            right_name,
            format!(
                "has {} element(s) but `{left_name}` has {}",
                right.len(),
                left.len()
            ),
        ))
    }

    /// Install the native library's default diagnostic logger.
    pub fn set_default_logger(&self) -> BridgeResult<()> {
        let status = unsafe { self.native.set_default_logger() };
        self.finish("setDefaultLogger", status, || Ok(()))
    }
}
