//! Native status codes.

use serde::{Serialize, Serializer};

/// Outcome of a native call.
///
/// `Success` is the only value that makes output slots readable. Codes the
/// bridge does not know are kept verbatim in `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    Success,
    Input,
    IoError,
    InvalidState,
    Unexpected,
    CredentialRevoked,
    InvalidUserRevocId,
    ProofRejected,
    RevocationRegistryFull,
    Unknown(u32),
}

impl ErrorCode {
    pub fn code(self) -> u32 {
        match self {
            ErrorCode::Success => 0,
            ErrorCode::Input => 1,
            ErrorCode::IoError => 2,
            ErrorCode::InvalidState => 3,
            ErrorCode::Unexpected => 4,
            ErrorCode::CredentialRevoked => 5,
            ErrorCode::InvalidUserRevocId => 6,
            ErrorCode::ProofRejected => 7,
            ErrorCode::RevocationRegistryFull => 8,
            ErrorCode::Unknown(n) => n,
        }
    }

    pub fn is_success(self) -> bool {
        self == ErrorCode::Success
    }

    pub fn name(self) -> &'static str {
        match self {
            ErrorCode::Success => "Success",
            ErrorCode::Input => "Input",
            ErrorCode::IoError => "IOError",
            ErrorCode::InvalidState => "InvalidState",
            ErrorCode::Unexpected => "Unexpected",
            ErrorCode::CredentialRevoked => "CredentialRevoked",
            ErrorCode::InvalidUserRevocId => "InvalidUserRevocId",
            ErrorCode::ProofRejected => "ProofRejected",
            ErrorCode::RevocationRegistryFull => "RevocationRegistryFull",
            ErrorCode::Unknown(_) => "Unknown",
        }
    }
}

impl From<u32> for ErrorCode {
    fn from(raw: u32) -> Self {
        match raw {
            0 => ErrorCode::Success,
            1 => ErrorCode::Input,
            2 => ErrorCode::IoError,
            3 => ErrorCode::InvalidState,
            4 => ErrorCode::Unexpected,
            5 => ErrorCode::CredentialRevoked,
            6 => ErrorCode::InvalidUserRevocId,
            7 => ErrorCode::ProofRejected,
            8 => ErrorCode::RevocationRegistryFull,
            n => ErrorCode::Unknown(n),
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name(), self.code())
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.code())
    }
}
