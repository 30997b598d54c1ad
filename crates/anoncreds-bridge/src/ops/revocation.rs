//! Revocation registries, status lists and revocation states.

use std::os::raw::c_char;
use std::ptr;

use anoncreds_bridge_native::NativeLibrary;
use anoncreds_bridge_types::ObjectHandle;
use serde::Serialize;

use crate::args::ArgumentBag;
use crate::bridge::Bridge;
use crate::buffer::optional_ptr;
use crate::error::BridgeResult;
use crate::translate::copy_native_string;

/// Native timestamp meaning "not supplied".
const NO_TIMESTAMP: i64 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevocationRegistryDefinitionOutput {
    pub revocation_registry_definition: ObjectHandle,
    pub revocation_registry_definition_private: ObjectHandle,
}

impl<L: NativeLibrary> Bridge<L> {
    pub fn create_revocation_registry_definition(
        &self,
        args: &ArgumentBag<'_>,
    ) -> BridgeResult<RevocationRegistryDefinitionOutput> {
        let cred_def = args.handle("credentialDefinition")?;
        let cred_def_id = args.c_string("credentialDefinitionId")?;
        let issuer_id = args.c_string("issuerId")?;
        let tag = args.c_string("tag")?;
        let rev_reg_type = args.c_string("revocationRegistryType")?;
        let max_cred_num = args.i64("maximumCredentialNumber")?;
        let tails_dir = args.optional_c_string("tailsDirectoryPath")?;

        let mut reg_def = ObjectHandle::NONE;
        let mut reg_def_private = ObjectHandle::NONE;
        let status = unsafe {
            self.native().create_revocation_registry_def(
                cred_def,
                cred_def_id.as_ptr(),
                issuer_id.as_ptr(),
                tag.as_ptr(),
                rev_reg_type.as_ptr(),
                max_cred_num,
                optional_ptr(&tails_dir),
                &mut reg_def,
                &mut reg_def_private,
            )
        };
        self.finish("createRevocationRegistryDefinition", status, || {
            Ok(RevocationRegistryDefinitionOutput {
                revocation_registry_definition: reg_def,
                revocation_registry_definition_private: reg_def_private,
            })
        })
    }

    pub fn revocation_registry_definition_get_attribute(
        &self,
        args: &ArgumentBag<'_>,
    ) -> BridgeResult<String> {
        let handle = args.handle("objectHandle")?;
        let name = args.c_string("name")?;

        let mut out: *const c_char = ptr::null();
        let status = unsafe {
            self.native()
                .revocation_registry_definition_get_attribute(handle, name.as_ptr(), &mut out)
        };
        self.finish("revocationRegistryDefinitionGetAttribute", status, || unsafe {
            copy_native_string(out)
        })
    }

    pub fn create_revocation_status_list(
        &self,
        args: &ArgumentBag<'_>,
    ) -> BridgeResult<ObjectHandle> {
        let cred_def = args.handle("credentialDefinition")?;
        let rev_reg_def_id = args.c_string("revocationRegistryDefinitionId")?;
        let rev_reg_def = args.handle("revocationRegistryDefinition")?;
        let rev_reg_private = args.handle("revocationRegistryDefinitionPrivate")?;
        let issuer_id = args.c_string("issuerId")?;
        let issuance_by_default = args.flag("issuanceByDefault")?;
        let timestamp = args.optional_i64("timestamp", NO_TIMESTAMP)?;

        let mut out = ObjectHandle::NONE;
        let status = unsafe {
            self.native().create_revocation_status_list(
                cred_def,
                rev_reg_def_id.as_ptr(),
                rev_reg_def,
                rev_reg_private,
                issuer_id.as_ptr(),
                issuance_by_default,
                timestamp,
                &mut out,
            )
        };
        self.finish("createRevocationStatusList", status, || Ok(out))
    }

    pub fn update_revocation_status_list(
        &self,
        args: &ArgumentBag<'_>,
    ) -> BridgeResult<ObjectHandle> {
        let cred_def = args.handle("credentialDefinition")?;
        let rev_reg_def = args.handle("revocationRegistryDefinition")?;
        let rev_reg_private = args.handle("revocationRegistryDefinitionPrivate")?;
        let current = args.handle("revocationStatusList")?;
        let issued = args.optional_i32_list("issued")?;
        let revoked = args.optional_i32_list("revoked")?;
        let timestamp = args.optional_i64("timestamp", NO_TIMESTAMP)?;

        let mut out = ObjectHandle::NONE;
        let status = unsafe {
            self.native().update_revocation_status_list(
                cred_def,
                rev_reg_def,
                rev_reg_private,
                current,
                issued.as_ffi(),
                revoked.as_ffi(),
                timestamp,
                &mut out,
            )
        };
        self.finish("updateRevocationStatusList", status, || Ok(out))
    }

    pub fn update_revocation_status_list_timestamp_only(
        &self,
        args: &ArgumentBag<'_>,
    ) -> BridgeResult<ObjectHandle> {
        let timestamp = args.i64("timestamp")?;
        let current = args.handle("revocationStatusList")?;

        let mut out = ObjectHandle::NONE;
        let status = unsafe {
            self.native()
                .update_revocation_status_list_timestamp_only(timestamp, current, &mut out)
        };
        self.finish(
            "updateRevocationStatusListTimestampOnly",
            status,
            || Ok(out),
        )
    }

    pub fn create_or_update_revocation_state(
        &self,
        args: &ArgumentBag<'_>,
    ) -> BridgeResult<ObjectHandle> {
        let rev_reg_def = args.handle("revocationRegistryDefinition")?;
        let status_list = args.handle("revocationStatusList")?;
        let index = args.i64("revocationRegistryIndex")?;
        let tails_path = args.c_string("tailsPath")?;
        let old_state = args.optional_handle("oldRevocationState")?;
        let old_status_list = args.optional_handle("oldRevocationStatusList")?;

        let mut out = ObjectHandle::NONE;
        let status = unsafe {
            self.native().create_or_update_revocation_state(
                rev_reg_def,
                status_list,
                index,
                tails_path.as_ptr(),
                old_state,
                old_status_list,
                &mut out,
            )
        };
        self.finish("createOrUpdateRevocationState", status, || Ok(out))
    }
}
