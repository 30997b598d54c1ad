//! Bridge error types.

use anoncreds_bridge_types::ErrorCode;
use thiserror::Error;

pub type BridgeResult<T> = Result<T, BridgeError>;

#[derive(Debug, Error)]
pub enum BridgeError {
    /// A host value's runtime type disagrees with the declared parameter.
    #[error("type mismatch for `{name}`: expected {expected}, found {found}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        found: String,
    },

    /// A well-typed value breaks a structural rule of the operation.
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument { name: String, reason: String },

    /// The native call returned a non-success status.
    #[error("native call failed with {code}: {message}")]
    NativeFailure { code: ErrorCode, message: String },

    #[error("failed to serialize result: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl BridgeError {
    pub(crate) fn mismatch(
        name: impl Into<String>,
        expected: &'static str,
        found: impl Into<String>,
    ) -> Self {
        BridgeError::TypeMismatch {
            name: name.into(),
            expected,
            found: found.into(),
        }
    }

    pub(crate) fn invalid(name: impl Into<String>, reason: impl Into<String>) -> Self {
        BridgeError::InvalidArgument {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Status code reported to the host. Errors raised before the native call
    /// report `Input`.
    pub fn code(&self) -> ErrorCode {
        match self {
            BridgeError::NativeFailure { code, .. } => *code,
            BridgeError::TypeMismatch { .. } | BridgeError::InvalidArgument { .. } => {
                ErrorCode::Input
            }
            BridgeError::Serialization(_) => ErrorCode::Unexpected,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            BridgeError::TypeMismatch { .. } => "TypeMismatch",
            BridgeError::InvalidArgument { .. } => "InvalidArgument",
            BridgeError::NativeFailure { .. } => "NativeFailure",
            BridgeError::Serialization(_) => "Serialization",
        }
    }

    /// Message without the taxonomy prefix; native failures carry the
    /// library's own text verbatim.
    pub fn message(&self) -> String {
        match self {
            BridgeError::NativeFailure { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}
