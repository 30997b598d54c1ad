//! Status translation and the host-facing result envelope.

use std::ffi::CStr;
use std::os::raw::c_char;
use std::ptr;

use anoncreds_bridge_native::NativeLibrary;
use anoncreds_bridge_types::{ByteBuffer, ErrorCode, ObjectHandle};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{BridgeError, BridgeResult};

pub(crate) const ERROR_FETCH_FAILED: &str = "failed to get current error";

#[derive(Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: String,
}

/// Read the native library's last error message. Must run before any other
/// native call on this thread.
pub(crate) fn current_error<L: NativeLibrary>(native: &L) -> String {
    let mut out: *const c_char = ptr::null();
    let status = unsafe { native.get_current_error(&mut out) };
    if !ErrorCode::from(status).is_success() || out.is_null() {
        return ERROR_FETCH_FAILED.to_string();
    }
    let text = unsafe { CStr::from_ptr(out) }.to_string_lossy().into_owned();
    match serde_json::from_str::<ErrorDetail>(&text) {
        Ok(detail) if !detail.message.is_empty() => detail.message,
        _ => text,
    }
}

/// Turn a native status into a result. Output slots are only read through
/// `read` on success.
pub(crate) fn translate<L, T>(
    native: &L,
    operation: &str,
    status: u32,
    read: impl FnOnce() -> BridgeResult<T>,
) -> BridgeResult<T>
where
    L: NativeLibrary,
{
    let code = ErrorCode::from(status);
    if code.is_success() {
        return read();
    }
    let message = current_error(native);
    log::debug!("{operation} failed with {code}: {message}");
    Err(BridgeError::NativeFailure { code, message })
}

/// Copy a native-owned string. The source is left to the library.
///
/// # Safety
///
/// `ptr` must be null or point at a NUL-terminated string.
pub(crate) unsafe fn copy_native_string(ptr: *const c_char) -> BridgeResult<String> {
    if ptr.is_null() {
        return Err(BridgeError::NativeFailure {
            code: ErrorCode::Unexpected,
            message: "native library returned a null string".into(),
        });
    }
    Ok(CStr::from_ptr(ptr).to_string_lossy().into_owned())
}

/// Copy a native-owned byte buffer into a string and give the buffer back
/// to the library.
///
/// # Safety
///
/// `buffer` must have been produced by `native` and not yet freed.
pub(crate) unsafe fn take_native_buffer<L: NativeLibrary>(
    native: &L,
    buffer: ByteBuffer,
) -> String {
    let text = String::from_utf8_lossy(buffer.as_slice()).into_owned();
    native.buffer_free(buffer);
    text
}

// ─── Envelope ───────────────────────────────────────────────────────────────

/// Failure body shown to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: u32,
    pub kind: String,
    pub message: String,
}

impl From<&BridgeError> for ErrorBody {
    fn from(err: &BridgeError) -> Self {
        Self {
            code: err.code().code(),
            kind: err.kind().to_string(),
            message: err.message(),
        }
    }
}

/// Uniform result of one host call: `{"ok": value}` or
/// `{"error": {code, kind, message}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Ok(Value),
    Error(ErrorBody),
}

impl Outcome {
    pub fn from_result<T: Serialize>(result: BridgeResult<T>) -> Self {
        match result.and_then(|v| Ok(serde_json::to_value(v)?)) {
            Ok(value) => Outcome::Ok(value),
            Err(err) => Outcome::Error(ErrorBody::from(&err)),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Outcome::Ok(_))
    }

    pub fn value(&self) -> Option<&Value> {
        match self {
            Outcome::Ok(value) => Some(value),
            Outcome::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&ErrorBody> {
        match self {
            Outcome::Ok(_) => None,
            Outcome::Error(body) => Some(body),
        }
    }

    /// The handle inside an `ok` value of the `{"handle": n}` shape.
    pub fn handle(&self) -> Option<ObjectHandle> {
        self.value()
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }
}
