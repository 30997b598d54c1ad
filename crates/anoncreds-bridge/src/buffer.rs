//! Owned strings and byte buffers lent to the native library for one call.

use std::ffi::CString;
use std::ptr;

use anoncreds_bridge_types::{ByteBuffer, FfiStr};

use crate::error::{BridgeError, BridgeResult};
use crate::release::Allocation;

/// NUL-terminated copy of a host string.
#[derive(Debug)]
pub struct NativeString {
    inner: CString,
    _ticket: Allocation,
}

impl NativeString {
    /// Interior NUL bytes cannot cross the boundary and are rejected.
    pub fn new(name: &str, value: &str) -> BridgeResult<Self> {
        let inner = CString::new(value).map_err(|e| {
            BridgeError::invalid(name, format!("contains NUL byte at {}", e.nul_position()))
        })?;
        Ok(Self {
            inner,
            _ticket: Allocation::acquire(),
        })
    }

    pub fn as_ptr(&self) -> FfiStr {
        self.inner.as_ptr()
    }
}

/// Pointer for an optional string; absent is null.
pub fn optional_ptr(value: &Option<NativeString>) -> FfiStr {
    value.as_ref().map_or(ptr::null(), NativeString::as_ptr)
}

/// Host bytes copied into a buffer one byte longer than the payload. The
/// extra byte is a NUL terminator; the recorded length excludes it.
#[derive(Debug)]
pub struct OwnedByteBuffer {
    bytes: Box<[u8]>,
    _ticket: Allocation,
}

impl OwnedByteBuffer {
    pub fn from_bytes(payload: &[u8]) -> Self {
        let mut bytes = Vec::with_capacity(payload.len() + 1);
        bytes.extend_from_slice(payload);
        bytes.push(0);
        Self {
            bytes: bytes.into_boxed_slice(),
            _ticket: Allocation::acquire(),
        }
    }

    pub fn from_text(text: &str) -> Self {
        Self::from_bytes(text.as_bytes())
    }

    pub fn len(&self) -> usize {
        self.bytes.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrowed view for the native call. The library only reads input
    /// buffers.
    pub fn as_ffi(&self) -> ByteBuffer {
        ByteBuffer {
            len: self.len() as i64,
            data: self.bytes.as_ptr() as *mut u8,
        }
    }
}
