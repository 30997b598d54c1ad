//! Marshaling bridge between dynamically-typed hosts and the anoncreds C
//! library.
//!
//! A host call arrives as an operation name plus a JSON argument bag. The
//! bridge checks the bag against the operation's parameter table, converts
//! every argument into owned C-layout memory, makes one native call, and
//! turns the status and output slots into an [`Outcome`]. All input-side
//! memory is released when the call returns, whichever way it went; see
//! [`live_allocations`].

pub mod args;
pub mod bridge;
pub mod buffer;
pub mod catalog;
pub mod config;
pub mod error;
pub mod list;
mod ops;
pub mod record;
pub mod release;
pub mod translate;
pub mod value;

pub use anoncreds_bridge_native::{DynamicLibrary, LoadError, NativeLibrary};
pub use anoncreds_bridge_types::{ErrorCode, ObjectHandle, ObjectKind};
pub use args::{ArgumentBag, Param, ParamKind};
pub use bridge::Bridge;
pub use catalog::Operation;
pub use config::BridgeConfig;
pub use error::{BridgeError, BridgeResult};
pub use ops::{
    CredentialDefinitionOutput, CredentialRequestOutput, RevocationRegistryDefinitionOutput,
};
pub use release::{live_allocations, total_allocations};
pub use translate::{ErrorBody, Outcome};
