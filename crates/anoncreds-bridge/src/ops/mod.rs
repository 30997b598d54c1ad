//! Per-operation call sites.
//!
//! Each method marshals its arguments into owned guards, makes exactly one
//! native call, and translates the status. The guards drop when the method
//! returns, on every path.

mod general;
mod issuance;
mod presentation;
mod revocation;
mod w3c;

pub use issuance::{CredentialDefinitionOutput, CredentialRequestOutput};
pub use revocation::RevocationRegistryDefinitionOutput;
