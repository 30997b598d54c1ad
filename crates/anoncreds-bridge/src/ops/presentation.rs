//! Classic presentation creation and verification.

use anoncreds_bridge_native::NativeLibrary;
use anoncreds_bridge_types::{FfiNonrevokedIntervalOverride, FfiStr, ObjectHandle};

use crate::args::ArgumentBag;
use crate::bridge::Bridge;
use crate::error::BridgeResult;
use crate::list::OwnedArray;
use crate::record::check_prove_indices;

/// Ledger objects a verifier resolves identifiers against.
pub(crate) struct LedgerObjects {
    pub schemas: OwnedArray<ObjectHandle>,
    pub schema_ids: OwnedArray<FfiStr>,
    pub cred_defs: OwnedArray<ObjectHandle>,
    pub cred_def_ids: OwnedArray<FfiStr>,
}

/// Revocation material a verifier may be given.
pub(crate) struct RevocationObjects {
    pub rev_reg_defs: OwnedArray<ObjectHandle>,
    pub rev_reg_def_ids: OwnedArray<FfiStr>,
    pub rev_status_lists: OwnedArray<ObjectHandle>,
    pub overrides: OwnedArray<FfiNonrevokedIntervalOverride>,
}

impl<L: NativeLibrary> Bridge<L> {
    pub(crate) fn ledger_objects(&self, args: &ArgumentBag<'_>) -> BridgeResult<LedgerObjects> {
        let objects = LedgerObjects {
            schemas: args.handle_list("schemas")?,
            schema_ids: args.str_list("schemaIds")?,
            cred_defs: args.handle_list("credentialDefinitions")?,
            cred_def_ids: args.str_list("credentialDefinitionIds")?,
        };
        self.check_paired(
            ("schemas", &objects.schemas),
            ("schemaIds", &objects.schema_ids),
        )?;
        self.check_paired(
            ("credentialDefinitions", &objects.cred_defs),
            ("credentialDefinitionIds", &objects.cred_def_ids),
        )?;
        Ok(objects)
    }

    pub(crate) fn revocation_objects(
        &self,
        args: &ArgumentBag<'_>,
    ) -> BridgeResult<RevocationObjects> {
        let objects = RevocationObjects {
            rev_reg_defs: args.optional_handle_list("revocationRegistryDefinitions")?,
            rev_reg_def_ids: args
                .optional_str_list("revocationRegistryDefinitionIds")?
                .unwrap_or_default(),
            rev_status_lists: args.optional_handle_list("revocationStatusLists")?,
            overrides: args.optional_nonrevoked_overrides("nonRevokedIntervalOverrides")?,
        };
        self.check_paired(
            ("revocationRegistryDefinitions", &objects.rev_reg_defs),
            ("revocationRegistryDefinitionIds", &objects.rev_reg_def_ids),
        )?;
        Ok(objects)
    }

    pub fn create_presentation(&self, args: &ArgumentBag<'_>) -> BridgeResult<ObjectHandle> {
        let pres_req = args.handle("presentationRequest")?;
        let credentials = args.credential_entries("credentials")?;
        let proves = args.credential_proves("credentialsProve")?;
        let self_attest_names = args.str_list("selfAttestNames")?;
        let self_attest_values = args.str_list("selfAttestValues")?;
        let link_secret = args.c_string("linkSecret")?;
        let ledger = self.ledger_objects(args)?;

        check_prove_indices("credentialsProve", &proves, credentials.len())?;
        self.check_paired(
            ("selfAttestNames", &self_attest_names),
            ("selfAttestValues", &self_attest_values),
        )?;

        let mut out = ObjectHandle::NONE;
        let status = unsafe {
            self.native().create_presentation(
                pres_req,
                credentials.as_ffi(),
                proves.as_ffi(),
                self_attest_names.as_ffi(),
                self_attest_values.as_ffi(),
                link_secret.as_ptr(),
                ledger.schemas.as_ffi(),
                ledger.schema_ids.as_ffi(),
                ledger.cred_defs.as_ffi(),
                ledger.cred_def_ids.as_ffi(),
                &mut out,
            )
        };
        self.finish("createPresentation", status, || Ok(out))
    }

    pub fn verify_presentation(&self, args: &ArgumentBag<'_>) -> BridgeResult<bool> {
        let presentation = args.handle("presentation")?;
        let pres_req = args.handle("presentationRequest")?;
        let ledger = self.ledger_objects(args)?;
        let revocation = self.revocation_objects(args)?;

        let mut verified: i8 = 0;
        let status = unsafe {
            self.native().verify_presentation(
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
        self.finish("verifyPresentation", status, || Ok(verified != 0))
    }
}
