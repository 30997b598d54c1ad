//! W3C-compatible credentials and presentations.

use std::os::raw::c_char;
use std::ptr;

use anoncreds_bridge_native::NativeLibrary;
use anoncreds_bridge_types::ObjectHandle;

use crate::args::ArgumentBag;
use crate::bridge::Bridge;
use crate::buffer::optional_ptr;
use crate::error::BridgeResult;
use crate::record::{check_prove_indices, revocation_config_ptr};
use crate::translate::copy_native_string;

impl<L: NativeLibrary> Bridge<L> {
    pub fn create_w3c_credential(&self, args: &ArgumentBag<'_>) -> BridgeResult<ObjectHandle> {
        let cred_def = args.handle("credentialDefinition")?;
        let cred_def_private = args.handle("credentialDefinitionPrivate")?;
        let cred_offer = args.handle("credentialOffer")?;
        let cred_request = args.handle("credentialRequest")?;
        let names = args.str_list("attributeNames")?;
        let raw_values = args.str_list("attributeRawValues")?;
        let revocation = args.optional_revocation_config("revocationConfiguration")?;
        let w3c_version = args.optional_c_string("w3cVersion")?;

        self.check_paired(
            ("attributeNames", &names),
            ("attributeRawValues", &raw_values),
        )?;

        let mut out = ObjectHandle::NONE;
        let status = unsafe {
            self.native().create_w3c_credential(
                cred_def,
                cred_def_private,
                cred_offer,
                cred_request,
                names.as_ffi(),
                raw_values.as_ffi(),
                revocation_config_ptr(&revocation),
                optional_ptr(&w3c_version),
                &mut out,
            )
        };
        self.finish("createW3cCredential", status, || Ok(out))
    }

    pub fn process_w3c_credential(&self, args: &ArgumentBag<'_>) -> BridgeResult<ObjectHandle> {
        let credential = args.handle("credential")?;
        let metadata = args.handle("credentialRequestMetadata")?;
        let link_secret = args.c_string("linkSecret")?;
        let cred_def = args.handle("credentialDefinition")?;
        let rev_reg_def = args.optional_handle("revocationRegistryDefinition")?;

        let mut out = ObjectHandle::NONE;
        let status = unsafe {
            self.native().process_w3c_credential(
                credential,
                metadata,
                link_secret.as_ptr(),
                cred_def,
                rev_reg_def,
                &mut out,
            )
        };
        self.finish("processW3cCredential", status, || Ok(out))
    }

    pub fn create_w3c_presentation(&self, args: &ArgumentBag<'_>) -> BridgeResult<ObjectHandle> {
        let pres_req = args.handle("presentationRequest")?;
        let credentials = args.credential_entries("credentials")?;
        let proves = args.credential_proves("credentialsProve")?;
        let link_secret = args.c_string("linkSecret")?;
        let ledger = self.ledger_objects(args)?;
        let w3c_version = args.optional_c_string("w3cVersion")?;

        check_prove_indices("credentialsProve", &proves, credentials.len())?;

        let mut out = ObjectHandle::NONE;
        let status = unsafe {
            self.native().create_w3c_presentation(
                pres_req,
                credentials.as_ffi(),
                proves.as_ffi(),
                link_secret.as_ptr(),
                ledger.schemas.as_ffi(),
                ledger.schema_ids.as_ffi(),
                ledger.cred_defs.as_ffi(),
                ledger.cred_def_ids.as_ffi(),
                optional_ptr(&w3c_version),
                &mut out,
            )
        };
        self.finish("createW3cPresentation", status, || Ok(out))
    }

    pub fn verify_w3c_presentation(&self, args: &ArgumentBag<'_>) -> BridgeResult<bool> {
        let presentation = args.handle("presentation")?;
        let pres_req = args.handle("presentationRequest")?;
        let ledger = self.ledger_objects(args)?;
        let revocation = self.revocation_objects(args)?;

        let mut verified: i8 = 0;
        let status = unsafe {
            self.native().verify_w3c_presentation(
                presentation,
                pres_req,
                ledger.schemas.as_ffi(),
                ledger.schema_ids.as_ffi(),
                ledger.cred_defs.as_ffi(),
                ledger.cred_def_ids.as_ffi(),
                revocation.rev_reg_defs.as_ffi(),
                revocation.rev_reg_def_ids.as_ffi(),
                revocation.rev_status_lists.as_ffi(),
                revocation.overrides.as_ffi(),
                &mut verified,
            )
        };
        self.finish("verifyW3cPresentation", status, || Ok(verified != 0))
    }

    pub fn credential_to_w3c(&self, args: &ArgumentBag<'_>) -> BridgeResult<ObjectHandle> {
        let credential = args.handle("objectHandle")?;
        let issuer_id = args.c_string("issuerId")?;
        let w3c_version = args.optional_c_string("w3cVersion")?;

        let mut out = ObjectHandle::NONE;
        let status = unsafe {
            self.native().credential_to_w3c(
                credential,
                issuer_id.as_ptr(),
                optional_ptr(&w3c_version),
                &mut out,
            )
        };
        self.finish("credentialToW3c", status, || Ok(out))
    }

    pub fn credential_from_w3c(&self, args: &ArgumentBag<'_>) -> BridgeResult<ObjectHandle> {
        let credential = args.handle("objectHandle")?;

        let mut out = ObjectHandle::NONE;
        let status = unsafe { self.native().credential_from_w3c(credential, &mut out) };
        self.finish("credentialFromW3c", status, || Ok(out))
    }

    pub fn w3c_credential_get_integrity_proof_details(
        &self,
        args: &ArgumentBag<'_>,
    ) -> BridgeResult<ObjectHandle> {
        let credential = args.handle("objectHandle")?;

        let mut out = ObjectHandle::NONE;
        let status = unsafe {
            self.native()
                .w3c_credential_get_integrity_proof_details(credential, &mut out)
        };
        self.finish("w3cCredentialGetIntegrityProofDetails", status, || Ok(out))
    }

    pub fn w3c_credential_proof_get_attribute(
        &self,
        args: &ArgumentBag<'_>,
    ) -> BridgeResult<String> {
        let handle = args.handle("objectHandle")?;
        let name = args.c_string("name")?;

        let mut out: *const c_char = ptr::null();
        let status = unsafe {
            self.native()
                .w3c_credential_proof_get_attribute(handle, name.as_ptr(), &mut out)
        };
        self.finish("w3cCredentialProofGetAttribute", status, || unsafe {
            copy_native_string(out)
        })
    }
}
