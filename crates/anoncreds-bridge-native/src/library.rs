//! The anoncreds C-ABI contract.
//!
//! Conventions shared by every entry point:
//!   - Returns a status word; `0` is success and makes every output slot
//!     valid. Any other value leaves the output slots indeterminate.
//!   - Inputs are borrowed for the duration of the call only.
//!   - Strings written to `*const c_char` outputs stay owned by the library.
//!   - Buffers written to `ByteBuffer` outputs go back through
//!     [`NativeLibrary::buffer_free`].
//!   - Object handles are released only through [`NativeLibrary::object_free`].
//!
//! # Safety
//!
//! Every method is `unsafe`: callers must pass pointers that are valid,
//! correctly aligned, and (for strings) null-terminated for the whole call,
//! and counted lists whose `count` matches the memory behind `data`.

use std::os::raw::c_char;

use anoncreds_bridge_types::{
    ByteBuffer, FfiCredRevInfo, FfiCredentialEntryList, FfiCredentialProveList, FfiI32List,
    FfiNonrevokedIntervalOverrideList, FfiObjectHandleList, FfiStr, FfiStrList, ObjectHandle,
    ObjectKind,
};

#[allow(clippy::too_many_arguments)]
pub trait NativeLibrary {
    // ─── General ────────────────────────────────────────────────────────────

    unsafe fn version(&self) -> *const c_char;

    /// JSON `{"code": n, "message": s}` describing the most recent failure on
    /// the calling thread.
    unsafe fn get_current_error(&self, out: *mut *const c_char) -> u32;

    unsafe fn set_default_logger(&self) -> u32;

    unsafe fn object_get_json(&self, handle: ObjectHandle, out: *mut ByteBuffer) -> u32;

    unsafe fn object_get_type_name(&self, handle: ObjectHandle, out: *mut *const c_char) -> u32;

    unsafe fn object_free(&self, handle: ObjectHandle);

    unsafe fn buffer_free(&self, buffer: ByteBuffer);

    /// Dispatches to `anoncreds_<kind>_from_json`.
    unsafe fn object_from_json(
        &self,
        kind: ObjectKind,
        json: ByteBuffer,
        out: *mut ObjectHandle,
    ) -> u32;

    // ─── Meta ───────────────────────────────────────────────────────────────

    unsafe fn create_link_secret(&self, out: *mut *const c_char) -> u32;

    unsafe fn generate_nonce(&self, out: *mut *const c_char) -> u32;

    // ─── Issuance ───────────────────────────────────────────────────────────

    unsafe fn create_schema(
        &self,
        name: FfiStr,
        version: FfiStr,
        issuer_id: FfiStr,
        attr_names: FfiStrList,
        out: *mut ObjectHandle,
    ) -> u32;

    unsafe fn create_credential_definition(
        &self,
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

    unsafe fn create_credential_offer(
        &self,
        schema_id: FfiStr,
        cred_def_id: FfiStr,
        key_proof: ObjectHandle,
        out: *mut ObjectHandle,
    ) -> u32;

    unsafe fn create_credential_request(
        &self,
        entropy: FfiStr,
        prover_did: FfiStr,
        cred_def: ObjectHandle,
        link_secret: FfiStr,
        link_secret_id: FfiStr,
        cred_offer: ObjectHandle,
        cred_req_out: *mut ObjectHandle,
        cred_req_metadata_out: *mut ObjectHandle,
    ) -> u32;

    unsafe fn create_credential(
        &self,
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

    unsafe fn process_credential(
        &self,
        cred: ObjectHandle,
        cred_req_metadata: ObjectHandle,
        link_secret: FfiStr,
        cred_def: ObjectHandle,
        rev_reg_def: ObjectHandle,
        out: *mut ObjectHandle,
    ) -> u32;

    unsafe fn credential_get_attribute(
        &self,
        handle: ObjectHandle,
        name: FfiStr,
        out: *mut *const c_char,
    ) -> u32;

    unsafe fn encode_credential_attributes(
        &self,
        attr_raw_values: FfiStrList,
        out: *mut *const c_char,
    ) -> u32;

    // ─── Presentations ──────────────────────────────────────────────────────

    unsafe fn create_presentation(
        &self,
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

    unsafe fn verify_presentation(
        &self,
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

    // ─── Revocation ─────────────────────────────────────────────────────────

    unsafe fn create_revocation_registry_def(
        &self,
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

    unsafe fn revocation_registry_definition_get_attribute(
        &self,
        handle: ObjectHandle,
        name: FfiStr,
        out: *mut *const c_char,
    ) -> u32;

    unsafe fn create_revocation_status_list(
        &self,
        cred_def: ObjectHandle,
        rev_reg_def_id: FfiStr,
        rev_reg_def: ObjectHandle,
        rev_reg_private: ObjectHandle,
        issuer_id: FfiStr,
        issuance_by_default: i8,
        timestamp: i64,
        out: *mut ObjectHandle,
    ) -> u32;

    unsafe fn update_revocation_status_list(
        &self,
        cred_def: ObjectHandle,
        rev_reg_def: ObjectHandle,
        rev_reg_private: ObjectHandle,
        rev_current_list: ObjectHandle,
        issued: FfiI32List,
        revoked: FfiI32List,
        timestamp: i64,
        out: *mut ObjectHandle,
    ) -> u32;

    unsafe fn update_revocation_status_list_timestamp_only(
        &self,
        timestamp: i64,
        rev_current_list: ObjectHandle,
        out: *mut ObjectHandle,
    ) -> u32;

    unsafe fn create_or_update_revocation_state(
        &self,
        rev_reg_def: ObjectHandle,
        rev_status_list: ObjectHandle,
        rev_reg_index: i64,
        tails_path: FfiStr,
        rev_state: ObjectHandle,
        old_rev_status_list: ObjectHandle,
        out: *mut ObjectHandle,
    ) -> u32;

    // ─── W3C ────────────────────────────────────────────────────────────────

    unsafe fn create_w3c_credential(
        &self,
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

    unsafe fn process_w3c_credential(
        &self,
        cred: ObjectHandle,
        cred_req_metadata: ObjectHandle,
        link_secret: FfiStr,
        cred_def: ObjectHandle,
        rev_reg_def: ObjectHandle,
        out: *mut ObjectHandle,
    ) -> u32;

    unsafe fn create_w3c_presentation(
        &self,
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

    unsafe fn verify_w3c_presentation(
        &self,
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

    unsafe fn credential_to_w3c(
        &self,
        cred: ObjectHandle,
        issuer_id: FfiStr,
        w3c_version: FfiStr,
        out: *mut ObjectHandle,
    ) -> u32;

    unsafe fn credential_from_w3c(&self, cred: ObjectHandle, out: *mut ObjectHandle) -> u32;

    unsafe fn w3c_credential_get_integrity_proof_details(
        &self,
        cred: ObjectHandle,
        out: *mut ObjectHandle,
    ) -> u32;

    unsafe fn w3c_credential_proof_get_attribute(
        &self,
        handle: ObjectHandle,
        name: FfiStr,
        out: *mut *const c_char,
    ) -> u32;
}
