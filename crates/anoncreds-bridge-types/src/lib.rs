//! Types that cross the anoncreds C boundary.
//!
//! Everything in [`ffi`] is `#[repr(C)]` and laid out exactly as the native
//! library declares it. [`ObjectHandle`] and [`ErrorCode`] are shared by the
//! marshaling layer and the native trait so neither has to re-derive them.

pub mod error_code;
pub mod ffi;
pub mod handle;
pub mod object_kind;

pub use error_code::ErrorCode;
pub use ffi::{
    ByteBuffer, FfiCredRevInfo, FfiCredentialEntry, FfiCredentialEntryList, FfiCredentialProve,
    FfiCredentialProveList, FfiI32List, FfiList, FfiNonrevokedIntervalOverride,
    FfiNonrevokedIntervalOverrideList, FfiObjectHandleList, FfiStr, FfiStrList,
};
pub use handle::ObjectHandle;
pub use object_kind::ObjectKind;
