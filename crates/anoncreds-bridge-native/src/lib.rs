//! The native side of the bridge.
//!
//! [`NativeLibrary`] restates the anoncreds C surface as a Rust trait: every
//! method takes exactly the C-layout arguments of its entry point and returns
//! the raw status word. [`DynamicLibrary`] satisfies it by loading the shared
//! library at runtime; tests satisfy it with an in-process fake.

pub mod error;
pub mod library;
pub mod loader;

pub use error::LoadError;
pub use library::NativeLibrary;
pub use loader::{default_library_name, DynamicLibrary};
