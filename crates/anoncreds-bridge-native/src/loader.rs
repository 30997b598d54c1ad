//! Runtime loading of the anoncreds shared library.
//!
//! All symbols are resolved once in [`DynamicLibrary::open`]; a library that
//! lacks any entry point is rejected up front instead of failing mid-call.

use std::ffi::OsStr;
use std::os::raw::c_char;
use std::path::Path;

use anoncreds_bridge_types::{
    ByteBuffer, FfiCredRevInfo, FfiCredentialEntryList, FfiCredentialProveList, FfiI32List,
    FfiNonrevokedIntervalOverrideList, FfiObjectHandleList, FfiStr, FfiStrList, ObjectHandle,
    ObjectKind,
};
use libloading::Library;

use crate::error::LoadError;
use crate::library::NativeLibrary;

type FromJsonFn = unsafe extern "C" fn(ByteBuffer, *mut ObjectHandle) -> u32;

/// Platform file name of the library, e.g. `libanoncreds.so`.
pub fn default_library_name() -> std::ffi::OsString {
    libloading::library_filename("anoncreds")
}

unsafe fn resolve<T: Copy>(library: &Library, symbol: &str) -> Result<T, LoadError> {
    let name = format!("{symbol}\0");
    let sym = library
        .get::<T>(name.as_bytes())
        .map_err(|source| LoadError::MissingSymbol {
            symbol: symbol.to_string(),
            source,
        })?;
    Ok(*sym)
}

/// Declares the entry point table once and derives from it the resolver and
/// the forwarding `NativeLibrary` impl.
macro_rules! native_api {
    ($(
        $method:ident => $symbol:literal ( $($arg:ident : $ty:ty),* $(,)? ) $(-> $ret:ty)? ;
    )*) => {
        struct Api {
            $( $method: unsafe extern "C" fn($($ty),*) $(-> $ret)?, )*
        }

        impl Api {
            unsafe fn resolve(library: &Library) -> Result<Self, LoadError> {
                Ok(Api {
                    $( $method: resolve(library, $symbol)?, )*
                })
            }
        }

        #[allow(clippy::too_many_arguments)]
        impl NativeLibrary for DynamicLibrary {
            $(
                unsafe fn $method(&self, $($arg: $ty),*) $(-> $ret)? {
                    (self.api.$method)($($arg),*)
                }
            )*

            unsafe fn object_from_json(
                &self,
                kind: ObjectKind,
                json: ByteBuffer,
                out: *mut ObjectHandle,
            ) -> u32 {
                (self.from_json[kind.index()])(json, out)
            }
        }
    };
}

/// The anoncreds library loaded from disk.
pub struct DynamicLibrary {
    api: Api,
    from_json: Vec<FromJsonFn>,
    // Keeps the code behind `api` and `from_json` mapped.
    _library: Library,
}

impl DynamicLibrary {
    /// Load the library at `path` and resolve every entry point.
    pub fn open(path: impl AsRef<OsStr>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        // SAFETY: loading runs the library's initializers; anoncreds has no
        // initializer side effects beyond its own statics.
        let library = unsafe { Library::new(path) }.map_err(|source| LoadError::Open {
            path: Path::new(path).to_path_buf(),
            source,
        })?;

        // SAFETY: each symbol is read with the signature the C header gives it.
        let (api, from_json) = unsafe {
            let api = Api::resolve(&library)?;
            let from_json = ObjectKind::ALL
                .iter()
                .map(|kind| resolve::<FromJsonFn>(&library, kind.from_json_symbol()))
                .collect::<Result<Vec<_>, _>>()?;
            (api, from_json)
        };

        log::debug!(
            "loaded anoncreds library from {}",
            Path::new(path).display()
        );

        Ok(DynamicLibrary {
            api,
            from_json,
            _library: library,
        })
    }

    /// Load the library by its platform name from the default search path.
    pub fn open_default() -> Result<Self, LoadError> {
        Self::open(default_library_name())
    }
}

native_api! {
    version => "anoncreds_version"() -> *const c_char;
    get_current_error => "anoncreds_get_current_error"(out: *mut *const c_char) -> u32;
    set_default_logger => "anoncreds_set_default_logger"() -> u32;
    object_get_json => "anoncreds_object_get_json"(
        handle: ObjectHandle,
        out: *mut ByteBuffer,
    ) -> u32;
    object_get_type_name => "anoncreds_object_get_type_name"(
        handle: ObjectHandle,
        out: *mut *const c_char,
    ) -> u32;
    object_free => "anoncreds_object_free"(handle: ObjectHandle);
    buffer_free => "anoncreds_buffer_free"(buffer: ByteBuffer);

    create_link_secret => "anoncreds_create_link_secret"(out: *mut *const c_char) -> u32;
    generate_nonce => "anoncreds_generate_nonce"(out: *mut *const c_char) -> u32;

    create_schema => "anoncreds_create_schema"(
        name: FfiStr,
        version: FfiStr,
        issuer_id: FfiStr,
        attr_names: FfiStrList,
        out: *mut ObjectHandle,
    ) -> u32;
    create_credential_definition => "anoncreds_create_credential_definition"(
        schema_id: FfiStr,
        schema: ObjectHandle,
        tag: FfiStr,
        issuer_id: FfiStr,
        signature_type: FfiStr,
        support_revocation: i8,
        cred_def_out: *mut ObjectHandle,
        cred_def_private_out: *mut ObjectHandle,
        key_proof_out: *mut ObjectHandle,
    ) -> u32;
    create_credential_offer => "anoncreds_create_credential_offer"(
        schema_id: FfiStr,
        cred_def_id: FfiStr,
        key_proof: ObjectHandle,
        out: *mut ObjectHandle,
    ) -> u32;
    create_credential_request => "anoncreds_create_credential_request"(
        entropy: FfiStr,
        prover_did: FfiStr,
        cred_def: ObjectHandle,
        link_secret: FfiStr,
        link_secret_id: FfiStr,
        cred_offer: ObjectHandle,
        cred_req_out: *mut ObjectHandle,
        cred_req_metadata_out: *mut ObjectHandle,
    ) -> u32;
    create_credential => "anoncreds_create_credential"(
        cred_def: ObjectHandle,
        cred_def_private: ObjectHandle,
        cred_offer: ObjectHandle,
        cred_request: ObjectHandle,
        attr_names: FfiStrList,
        attr_raw_values: FfiStrList,
        attr_enc_values: FfiStrList,
        revocation: *const FfiCredRevInfo,
        out: *mut ObjectHandle,
    ) -> u32;
    process_credential => "anoncreds_process_credential"(
        cred: ObjectHandle,
        cred_req_metadata: ObjectHandle,
        link_secret: FfiStr,
        cred_def: ObjectHandle,
        rev_reg_def: ObjectHandle,
        out: *mut ObjectHandle,
    ) -> u32;
    credential_get_attribute => "anoncreds_credential_get_attribute"(
        handle: ObjectHandle,
        name: FfiStr,
        out: *mut *const c_char,
    ) -> u32;
    encode_credential_attributes => "anoncreds_encode_credential_attributes"(
        attr_raw_values: FfiStrList,
        out: *mut *const c_char,
    ) -> u32;

    create_presentation => "anoncreds_create_presentation"(
        pres_req: ObjectHandle,
        credentials: FfiCredentialEntryList,
        credentials_prove: FfiCredentialProveList,
        self_attest_names: FfiStrList,
        self_attest_values: FfiStrList,
        link_secret: FfiStr,
        schemas: FfiObjectHandleList,
        schema_ids: FfiStrList,
        cred_defs: FfiObjectHandleList,
        cred_def_ids: FfiStrList,
        out: *mut ObjectHandle,
    ) -> u32;
    verify_presentation => "anoncreds_verify_presentation"(
        presentation: ObjectHandle,
        pres_req: ObjectHandle,
        schemas: FfiObjectHandleList,
        schema_ids: FfiStrList,
        cred_defs: FfiObjectHandleList,
        cred_def_ids: FfiStrList,
        rev_reg_defs: FfiObjectHandleList,
        rev_reg_def_ids: FfiStrList,
        rev_status_lists: FfiObjectHandleList,
        nonrevoked_overrides: FfiNonrevokedIntervalOverrideList,
        out: *mut i8,
    ) -> u32;

    create_revocation_registry_def => "anoncreds_create_revocation_registry_def"(
        cred_def: ObjectHandle,
        cred_def_id: FfiStr,
        issuer_id: FfiStr,
        tag: FfiStr,
        rev_reg_type: FfiStr,
        max_cred_num: i64,
        tails_dir_path: FfiStr,
        reg_def_out: *mut ObjectHandle,
        reg_def_private_out: *mut ObjectHandle,
    ) -> u32;
    revocation_registry_definition_get_attribute =>
        "anoncreds_revocation_registry_definition_get_attribute"(
        handle: ObjectHandle,
        name: FfiStr,
        out: *mut *const c_char,
    ) -> u32;
    create_revocation_status_list => "anoncreds_create_revocation_status_list"(
        cred_def: ObjectHandle,
        rev_reg_def_id: FfiStr,
        rev_reg_def: ObjectHandle,
        rev_reg_private: ObjectHandle,
        issuer_id: FfiStr,
        issuance_by_default: i8,
        timestamp: i64,
        out: *mut ObjectHandle,
    ) -> u32;
    update_revocation_status_list => "anoncreds_update_revocation_status_list"(
        cred_def: ObjectHandle,
        rev_reg_def: ObjectHandle,
        rev_reg_private: ObjectHandle,
        rev_current_list: ObjectHandle,
        issued: FfiI32List,
        revoked: FfiI32List,
        timestamp: i64,
        out: *mut ObjectHandle,
    ) -> u32;
    update_revocation_status_list_timestamp_only =>
        "anoncreds_update_revocation_status_list_timestamp_only"(
        timestamp: i64,
        rev_current_list: ObjectHandle,
        out: *mut ObjectHandle,
    ) -> u32;
    create_or_update_revocation_state => "anoncreds_create_or_update_revocation_state"(
        rev_reg_def: ObjectHandle,
        rev_status_list: ObjectHandle,
        rev_reg_index: i64,
        tails_path: FfiStr,
        rev_state: ObjectHandle,
        old_rev_status_list: ObjectHandle,
        out: *mut ObjectHandle,
    ) -> u32;

    create_w3c_credential => "anoncreds_create_w3c_credential"(
        cred_def: ObjectHandle,
        cred_def_private: ObjectHandle,
        cred_offer: ObjectHandle,
        cred_request: ObjectHandle,
        attr_names: FfiStrList,
        attr_raw_values: FfiStrList,
        revocation: *const FfiCredRevInfo,
        w3c_version: FfiStr,
        out: *mut ObjectHandle,
    ) -> u32;
    process_w3c_credential => "anoncreds_process_w3c_credential"(
        cred: ObjectHandle,
        cred_req_metadata: ObjectHandle,
        link_secret: FfiStr,
        cred_def: ObjectHandle,
        rev_reg_def: ObjectHandle,
        out: *mut ObjectHandle,
    ) -> u32;
    create_w3c_presentation => "anoncreds_create_w3c_presentation"(
        pres_req: ObjectHandle,
        credentials: FfiCredentialEntryList,
        credentials_prove: FfiCredentialProveList,
        link_secret: FfiStr,
        schemas: FfiObjectHandleList,
        schema_ids: FfiStrList,
        cred_defs: FfiObjectHandleList,
        cred_def_ids: FfiStrList,
        w3c_version: FfiStr,
        out: *mut ObjectHandle,
    ) -> u32;
    verify_w3c_presentation => "anoncreds_verify_w3c_presentation"(
        presentation: ObjectHandle,
        pres_req: ObjectHandle,
        schemas: FfiObjectHandleList,
        schema_ids: FfiStrList,
        cred_defs: FfiObjectHandleList,
        cred_def_ids: FfiStrList,
        rev_reg_defs: FfiObjectHandleList,
        rev_reg_def_ids: FfiStrList,
        rev_status_lists: FfiObjectHandleList,
        nonrevoked_overrides: FfiNonrevokedIntervalOverrideList,
        out: *mut i8,
    ) -> u32;
    credential_to_w3c => "anoncreds_credential_to_w3c"(
        cred: ObjectHandle,
        issuer_id: FfiStr,
        w3c_version: FfiStr,
        out: *mut ObjectHandle,
    ) -> u32;
    credential_from_w3c => "anoncreds_credential_from_w3c"(
        cred: ObjectHandle,
        out: *mut ObjectHandle,
    ) -> u32;
    w3c_credential_get_integrity_proof_details =>
        "anoncreds_w3c_credential_get_integrity_proof_details"(
        cred: ObjectHandle,
        out: *mut ObjectHandle,
    ) -> u32;
    w3c_credential_proof_get_attribute => "anoncreds_w3c_credential_proof_get_attribute"(
        handle: ObjectHandle,
        name: FfiStr,
        out: *mut *const c_char,
    ) -> u32;
}
