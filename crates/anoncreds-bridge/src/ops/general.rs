//! Version, errors, generic object accessors and from-JSON constructors.

use std::os::raw::c_char;
use std::ptr;

use anoncreds_bridge_native::NativeLibrary;
use anoncreds_bridge_types::{ByteBuffer, ErrorCode, ObjectHandle, ObjectKind};

use crate::args::ArgumentBag;
use crate::bridge::Bridge;
use crate::error::{BridgeError, BridgeResult};
use crate::translate::{copy_native_string, take_native_buffer, ERROR_FETCH_FAILED};

impl<L: NativeLibrary> Bridge<L> {
    pub fn version(&self) -> BridgeResult<String> {
        unsafe { copy_native_string(self.native().version()) }
    }

    /// Raw error document of the most recent failure on this thread.
    pub fn get_current_error(&self) -> BridgeResult<String> {
        let mut out: *const c_char = ptr::null();
        let status = unsafe { self.native().get_current_error(&mut out) };
        if !ErrorCode::from(status).is_success() {
            return Err(BridgeError::NativeFailure {
                code: ErrorCode::from(status),
                message: ERROR_FETCH_FAILED.into(),
            });
        }
        unsafe { copy_native_string(out) }
    }

    pub fn get_json(&self, args: &ArgumentBag<'_>) -> BridgeResult<String> {
        let handle = args.handle("objectHandle")?;
        let mut out = ByteBuffer::empty();
        let status = unsafe { self.native().object_get_json(handle, &mut out) };
        self.finish("getJson", status, || {
            Ok(unsafe { take_native_buffer(self.native(), out) })
        })
    }

    pub fn get_type_name(&self, args: &ArgumentBag<'_>) -> BridgeResult<String> {
        let handle = args.handle("objectHandle")?;
        let mut out: *const c_char = ptr::null();
        let status = unsafe { self.native().object_get_type_name(handle, &mut out) };
        self.finish("getTypeName", status, || unsafe { copy_native_string(out) })
    }

    /// Release a native object. The handle must not be used afterwards.
    pub fn object_free(&self, args: &ArgumentBag<'_>) -> BridgeResult<()> {
        let handle = args.handle("objectHandle")?;
        log::trace!("freeing object {handle}");
        unsafe { self.native().object_free(handle) };
        Ok(())
    }

    pub fn create_link_secret(&self) -> BridgeResult<String> {
        let mut out: *const c_char = ptr::null();
        let status = unsafe { self.native().create_link_secret(&mut out) };
        self.finish("createLinkSecret", status, || unsafe {
            copy_native_string(out)
        })
    }

    pub fn generate_nonce(&self) -> BridgeResult<String> {
        let mut out: *const c_char = ptr::null();
        let status = unsafe { self.native().generate_nonce(&mut out) };
        self.finish("generateNonce", status, || unsafe {
            copy_native_string(out)
        })
    }

    /// Parse a serialized object of `kind` from the `json` argument.
    pub fn from_json(
        &self,
        kind: ObjectKind,
        args: &ArgumentBag<'_>,
    ) -> BridgeResult<ObjectHandle> {
        let json = args.json_buffer("json")?;
        let mut out = ObjectHandle::NONE;
        let status = unsafe { self.native().object_from_json(kind, json.as_ffi(), &mut out) };
        self.finish(kind.from_json_symbol(), status, || Ok(out))
    }
}
