//! Schemas, credential definitions, offers, requests and credentials.

use std::os::raw::c_char;
use std::ptr;

use anoncreds_bridge_native::NativeLibrary;
use anoncreds_bridge_types::ObjectHandle;
use serde::Serialize;

use crate::args::ArgumentBag;
use crate::bridge::Bridge;
use crate::buffer::optional_ptr;
use crate::error::BridgeResult;
use crate::record::revocation_config_ptr;
use crate::translate::copy_native_string;

/// The three objects produced together by `createCredentialDefinition`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialDefinitionOutput {
    pub credential_definition: ObjectHandle,
    pub credential_definition_private: ObjectHandle,
    pub key_correctness_proof: ObjectHandle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialRequestOutput {
    pub credential_request: ObjectHandle,
    pub credential_request_metadata: ObjectHandle,
}

impl<L: NativeLibrary> Bridge<L> {
    pub fn create_schema(&self, args: &ArgumentBag<'_>) -> BridgeResult<ObjectHandle> {
        let name = args.c_string("name")?;
        let version = args.c_string("version")?;
        let issuer_id = args.c_string("issuerId")?;
        let attribute_names = args.str_list("attributeNames")?;

        let mut out = ObjectHandle::NONE;
        let status = unsafe {
            self.native().create_schema(
                name.as_ptr(),
                version.as_ptr(),
                issuer_id.as_ptr(),
                attribute_names.as_ffi(),
                &mut out,
            )
        };
        self.finish("createSchema", status, || Ok(out))
    }

    pub fn create_credential_definition(
        &self,
        args: &ArgumentBag<'_>,
    ) -> BridgeResult<CredentialDefinitionOutput> {
        let schema_id = args.c_string("schemaId")?;
        let schema = args.handle("schema")?;
        let tag = args.c_string("tag")?;
        let issuer_id = args.c_string("issuerId")?;
        let signature_type = args.c_string("signatureType")?;
        let support_revocation = args.flag("supportRevocation")?;

        let mut cred_def = ObjectHandle::NONE;
        let mut cred_def_private = ObjectHandle::NONE;
        let mut key_proof = ObjectHandle::NONE;
        let status = unsafe {
            self.native().create_credential_definition(
                schema_id.as_ptr(),
                schema,
                tag.as_ptr(),
                issuer_id.as_ptr(),
                signature_type.as_ptr(),
                support_revocation,
                &mut cred_def,
                &mut cred_def_private,
                &mut key_proof,
            )
        };
        self.finish("createCredentialDefinition", status, || {
            Ok(CredentialDefinitionOutput {
                credential_definition: cred_def,
                credential_definition_private: cred_def_private,
                key_correctness_proof: key_proof,
            })
        })
    }

    pub fn create_credential_offer(&self, args: &ArgumentBag<'_>) -> BridgeResult<ObjectHandle> {
        let schema_id = args.c_string("schemaId")?;
        let cred_def_id = args.c_string("credentialDefinitionId")?;
        let key_proof = args.handle("keyCorrectnessProof")?;

        let mut out = ObjectHandle::NONE;
        let status = unsafe {
            self.native().create_credential_offer(
                schema_id.as_ptr(),
                cred_def_id.as_ptr(),
                key_proof,
                &mut out,
            )
        };
        self.finish("createCredentialOffer", status, || Ok(out))
    }

    pub fn create_credential_request(
        &self,
        args: &ArgumentBag<'_>,
    ) -> BridgeResult<CredentialRequestOutput> {
        let entropy = args.optional_c_string("entropy")?;
        let prover_did = args.optional_c_string("proverDid")?;
        let cred_def = args.handle("credentialDefinition")?;
        let link_secret = args.c_string("linkSecret")?;
        let link_secret_id = args.c_string("linkSecretId")?;
        let cred_offer = args.handle("credentialOffer")?;

        let mut request = ObjectHandle::NONE;
        let mut metadata = ObjectHandle::NONE;
        let status = unsafe {
            self.native().create_credential_request(
                optional_ptr(&entropy),
                optional_ptr(&prover_did),
                cred_def,
                link_secret.as_ptr(),
                link_secret_id.as_ptr(),
                cred_offer,
                &mut request,
                &mut metadata,
            )
        };
        self.finish("createCredentialRequest", status, || {
            Ok(CredentialRequestOutput {
                credential_request: request,
                credential_request_metadata: metadata,
            })
        })
    }

    pub fn create_credential(&self, args: &ArgumentBag<'_>) -> BridgeResult<ObjectHandle> {
        let cred_def = args.handle("credentialDefinition")?;
        let cred_def_private = args.handle("credentialDefinitionPrivate")?;
        let cred_offer = args.handle("credentialOffer")?;
        let cred_request = args.handle("credentialRequest")?;
        let names = args.str_list("attributeNames")?;
        let raw_values = args.str_list("attributeRawValues")?;
        let encoded_values = args.optional_str_list("attributeEncodedValues")?;
        let revocation = args.optional_revocation_config("revocationConfiguration")?;

        self.check_paired(
            ("attributeNames", &names),
            ("attributeRawValues", &raw_values),
        )?;
        if let Some(encoded) = encoded_values.as_ref().filter(|e| !e.is_empty()) {
            self.check_paired(
                ("attributeNames", &names),
                ("attributeEncodedValues", encoded),
            )?;
        }
        let encoded_values = encoded_values.unwrap_or_default();

        let mut out = ObjectHandle::NONE;
        let status = unsafe {
            self.native().create_credential(
                cred_def,
                cred_def_private,
                cred_offer,
                cred_request,
                names.as_ffi(),
                raw_values.as_ffi(),
                encoded_values.as_ffi(),
                revocation_config_ptr(&revocation),
                &mut out,
            )
        };
        self.finish("createCredential", status, || Ok(out))
    }

    pub fn process_credential(&self, args: &ArgumentBag<'_>) -> BridgeResult<ObjectHandle> {
        let credential = args.handle("credential")?;
        let metadata = args.handle("credentialRequestMetadata")?;
        let link_secret = args.c_string("linkSecret")?;
        let cred_def = args.handle("credentialDefinition")?;
        let rev_reg_def = args.optional_handle("revocationRegistryDefinition")?;

        let mut out = ObjectHandle::NONE;
        let status = unsafe {
            self.native().process_credential(
                credential,
                metadata,
                link_secret.as_ptr(),
                cred_def,
                rev_reg_def,
                &mut out,
            )
        };
        self.finish("processCredential", status, || Ok(out))
    }

    pub fn credential_get_attribute(&self, args: &ArgumentBag<'_>) -> BridgeResult<String> {
        let handle = args.handle("objectHandle")?;
        let name = args.c_string("name")?;

        let mut out: *const c_char = ptr::null();
        let status = unsafe {
            self.native()
                .credential_get_attribute(handle, name.as_ptr(), &mut out)
        };
        self.finish("credentialGetAttribute", status, || unsafe {
            copy_native_string(out)
        })
    }

    /// Encoded form of each raw value, in input order.
    pub fn encode_credential_attributes(
        &self,
        args: &ArgumentBag<'_>,
    ) -> BridgeResult<Vec<String>> {
        let raw_values = args.str_list("attributeRawValues")?;

        let mut out: *const c_char = ptr::null();
        let status = unsafe {
            self.native()
                .encode_credential_attributes(raw_values.as_ffi(), &mut out)
        };
        self.finish("encodeCredentialAttributes", status, || {
            let joined = unsafe { copy_native_string(out) }?;
            if joined.is_empty() {
                return Ok(Vec::new());
            }
            Ok(joined.split(',').map(str::to_owned).collect())
        })
    }
}
