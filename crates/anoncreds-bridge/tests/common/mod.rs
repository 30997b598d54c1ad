//! In-process stand-in for the anoncreds shared library.
//!
//! Objects are plain JSON documents behind integer handles. Inputs are read
//! through the same C-layout pointers the real library receives, so the
//! bridge's marshaling is exercised end to end. The cryptography is not
//! modelled: proofs are bookkeeping, not math.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use anoncreds_bridge::{
    Bridge, BridgeConfig, ErrorCode, NativeLibrary, ObjectHandle, ObjectKind, Outcome,
};
use anoncreds_bridge_types::{
    ByteBuffer, FfiCredRevInfo, FfiCredentialEntryList, FfiCredentialProveList, FfiI32List,
    FfiNonrevokedIntervalOverrideList, FfiObjectHandleList, FfiStr, FfiStrList,
};
use serde_json::{json, Map, Value};

const VERSION: &[u8] = b"0.2.0-fake\0";

struct Failure(ErrorCode, String);

type Step<T> = Result<T, Failure>;

fn input(message: impl Into<String>) -> Failure {
    Failure(ErrorCode::Input, message.into())
}

struct Stored {
    type_name: &'static str,
    json: Value,
}

#[derive(Default)]
pub struct FakeAnoncreds {
    objects: RefCell<BTreeMap<usize, Stored>>,
    next_handle: Cell<usize>,
    last_error: RefCell<Option<(ErrorCode, String)>>,
    lent: RefCell<Vec<CString>>,
    buffers_out: Cell<usize>,
    buffers_freed: Cell<usize>,
    calls: Cell<usize>,
    seed: Cell<u64>,
    observed: RefCell<Value>,
    error_accessor_broken: Cell<bool>,
}

// ─── Pointer readers ────────────────────────────────────────────────────────

unsafe fn text(ptr: FfiStr) -> Option<String> {
    (!ptr.is_null()).then(|| CStr::from_ptr(ptr).to_string_lossy().into_owned())
}

unsafe fn texts(list: FfiStrList) -> Vec<String> {
    list.as_slice().iter().map(|&p| text(p).unwrap_or_default()).collect()
}

unsafe fn handles(list: FfiObjectHandleList) -> Vec<ObjectHandle> {
    list.as_slice().to_vec()
}

fn encode(raw: &str) -> String {
    match raw.parse::<i32>() {
        Ok(n) => n.to_string(),
        Err(_) => raw
            .bytes()
            .fold(17u64, |h, b| h.wrapping_mul(31).wrapping_add(u64::from(b)))
            .to_string(),
    }
}

impl FakeAnoncreds {
    pub fn new() -> Self {
        Self {
            next_handle: Cell::new(1),
            seed: Cell::new(1_000_003),
            ..Default::default()
        }
    }

    // ─── Inspection ─────────────────────────────────────────────────────

    /// Status-returning native calls made so far.
    pub fn native_calls(&self) -> usize {
        self.calls.get()
    }

    pub fn live_objects(&self) -> usize {
        self.objects.borrow().len()
    }

    /// Buffers handed out by `object_get_json` and not yet returned.
    pub fn outstanding_buffers(&self) -> usize {
        self.buffers_out.get() - self.buffers_freed.get()
    }

    /// Make every later `get_current_error` call fail.
    pub fn break_error_accessor(&self) {
        self.error_accessor_broken.set(true);
    }

    /// What the most recent list-heavy call saw on its side of the boundary.
    pub fn observed(&self) -> Value {
        self.observed.borrow().clone()
    }

    pub fn object_json(&self, handle: ObjectHandle) -> Option<Value> {
        self.objects.borrow().get(&handle.0).map(|s| s.json.clone())
    }

    // ─── Plumbing ───────────────────────────────────────────────────────

    fn observe(&self, value: Value) {
        *self.observed.borrow_mut() = value;
    }

    fn store(&self, type_name: &'static str, json: Value) -> ObjectHandle {
        let handle = self.next_handle.get();
        self.next_handle.set(handle + 1);
        self.objects.borrow_mut().insert(handle, Stored { type_name, json });
        ObjectHandle(handle)
    }

    fn load(&self, handle: ObjectHandle, type_name: &str) -> Step<Value> {
        let objects = self.objects.borrow();
        match objects.get(&handle.0) {
            Some(stored) if stored.type_name == type_name => Ok(stored.json.clone()),
            Some(stored) => Err(input(format!(
                "Invalid object type for handle {}: expected {type_name}, found {}",
                handle.0, stored.type_name
            ))),
            None => Err(input(format!("Invalid handle: {}", handle.0))),
        }
    }

    fn load_optional(&self, handle: ObjectHandle, type_name: &str) -> Step<Option<Value>> {
        if handle.is_none() {
            Ok(None)
        } else {
            self.load(handle, type_name).map(Some)
        }
    }

    fn lend(&self, value: String) -> *const c_char {
        let owned = CString::new(value).unwrap_or_default();
        let ptr = owned.as_ptr();
        self.lent.borrow_mut().push(owned);
        ptr
    }

    fn random_digits(&self) -> String {
        let next = self.seed.get().wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
        self.seed.set(next);
        format!("{next}")
    }

    fn status<T>(&self, result: Step<T>, write: impl FnOnce(T)) -> u32 {
        self.calls.set(self.calls.get() + 1);
        match result {
            Ok(value) => {
                write(value);
                ErrorCode::Success.code()
            }
            Err(Failure(code, message)) => {
                *self.last_error.borrow_mut() = Some((code, message));
                code.code()
            }
        }
    }

    unsafe fn emit<T>(&self, result: Step<T>, out: *mut T) -> u32 {
        self.status(result, |value| unsafe { out.write(value) })
    }

    unsafe fn emit_text(&self, result: Step<String>, out: *mut *const c_char) -> u32 {
        self.status(result, |value| unsafe { out.write(self.lend(value)) })
    }

    // ─── Object logic ───────────────────────────────────────────────────

    fn credential_definition(
        &self,
        schema_id: Option<String>,
        schema: ObjectHandle,
        tag: Option<String>,
        issuer_id: Option<String>,
        signature_type: Option<String>,
        support_revocation: i8,
    ) -> Step<(ObjectHandle, ObjectHandle, ObjectHandle)> {
        let schema = self.load(schema, "Schema")?;
        let signature_type = signature_type.ok_or_else(|| input("Missing signature type"))?;
        if signature_type != "CL" {
            return Err(input(format!("Unsupported signature type: {signature_type}")));
        }
        let schema_id = schema_id.ok_or_else(|| input("Missing schema id"))?;
        let issuer_id = issuer_id.ok_or_else(|| input("Missing issuer id"))?;
        let mut value = json!({"primary": {"n": self.random_digits()}});
        if support_revocation != 0 {
            value["revocation"] = json!({"g": self.random_digits()});
        }
        let cred_def = self.store(
            "CredentialDefinition",
            json!({
                "schemaId": schema_id,
                "type": signature_type,
                "tag": tag.unwrap_or_default(),
                "issuerId": issuer_id,
                "attrNames": schema["attrNames"],
                "value": value,
            }),
        );
        let private = self.store(
            "CredentialDefinitionPrivate",
            json!({"value": {"p_key": self.random_digits()}}),
        );
        let proof = self.store(
            "CredentialKeyCorrectnessProof",
            json!({"c": self.random_digits()}),
        );
        Ok((cred_def, private, proof))
    }

    fn issue(
        &self,
        cred_def: ObjectHandle,
        cred_def_private: ObjectHandle,
        cred_offer: ObjectHandle,
        cred_request: ObjectHandle,
        names: Vec<String>,
        raw: Vec<String>,
        encoded: Vec<String>,
        revocation: Option<FfiCredRevInfo>,
    ) -> Step<Value> {
        let definition = self.load(cred_def, "CredentialDefinition")?;
        self.load(cred_def_private, "CredentialDefinitionPrivate")?;
        let offer = self.load(cred_offer, "CredentialOffer")?;
        self.load(cred_request, "CredentialRequest")?;
        if names.len() != raw.len() {
            return Err(input("Mismatched attribute names and raw values"));
        }
        if !encoded.is_empty() && encoded.len() != names.len() {
            return Err(input("Mismatched attribute names and encoded values"));
        }
        let mut values = Map::new();
        for (index, (name, raw)) in names.iter().zip(&raw).enumerate() {
            let encoded = encoded.get(index).cloned().unwrap_or_else(|| encode(raw));
            values.insert(name.clone(), json!({"raw": raw, "encoded": encoded}));
        }
        let mut credential = json!({
            "schema_id": offer["schema_id"],
            "cred_def_id": offer["cred_def_id"],
            "values": values,
            "signature": {"m_2": self.random_digits()},
            "rev_reg_id": null,
        });
        if let Some(info) = revocation {
            if definition["value"].get("revocation").is_none() {
                return Err(input("Credential definition does not support revocation"));
            }
            let reg_def = self.load(info.reg_def, "RevocationRegistryDefinition")?;
            self.load(info.reg_def_private, "RevocationRegistryDefinitionPrivate")?;
            let list = self.load(info.status_list, "RevocationStatusList")?;
            let max = reg_def["value"]["maxCredNum"].as_i64().unwrap_or(0);
            if info.reg_idx < 0 || info.reg_idx >= max {
                return Err(Failure(
                    ErrorCode::InvalidUserRevocId,
                    format!("Revocation index {} out of range", info.reg_idx),
                ));
            }
            credential["rev_reg_id"] = list["revRegDefId"].clone();
            credential["rev_reg_index"] = json!(info.reg_idx);
        }
        self.observe(json!({
            "attributeEncodedValues": encoded.len(),
            "revocation": revocation.is_some(),
        }));
        Ok(credential)
    }

    fn present(
        &self,
        pres_req: ObjectHandle,
        credentials: FfiCredentialEntryList,
        proves: FfiCredentialProveList,
        self_attested: Vec<(String, String)>,
        link_secret: Option<String>,
        schema_ids: Vec<String>,
        cred_def_ids: Vec<String>,
    ) -> Step<Value> {
        let request = self.load(pres_req, "PresentationRequest")?;
        link_secret.ok_or_else(|| input("Missing link secret"))?;
        let entries = unsafe { credentials.as_slice() };
        if entries.is_empty() && self_attested.is_empty() {
            return Err(input("No credentials or self-attested attributes were provided"));
        }
        let mut loaded = Vec::with_capacity(entries.len());
        let mut identifiers = Vec::new();
        for entry in entries {
            let credential = self.load(entry.credential, "Credential")?;
            if !entry.rev_state.is_none() {
                self.load(entry.rev_state, "CredentialRevocationState")?;
            }
            if !schema_ids.iter().any(|id| credential["schema_id"] == json!(id)) {
                return Err(input("Schema not provided for ID"));
            }
            if !cred_def_ids.iter().any(|id| credential["cred_def_id"] == json!(id)) {
                return Err(input("Credential Definition not provided for ID"));
            }
            identifiers.push(json!({
                "schema_id": credential["schema_id"],
                "cred_def_id": credential["cred_def_id"],
                "timestamp": (entry.timestamp >= 0).then_some(entry.timestamp),
            }));
            loaded.push(credential);
        }
        let mut revealed = Map::new();
        let mut predicates = Map::new();
        for prove in unsafe { proves.as_slice() } {
            let referent = unsafe { text(prove.referent) }.unwrap_or_default();
            let credential = loaded
                .get(prove.entry_idx as usize)
                .ok_or_else(|| input("Invalid credential entry index"))?;
            if prove.is_predicate != 0 {
                predicates.insert(referent, json!({"sub_proof_index": prove.entry_idx}));
                continue;
            }
            let name = request["requested_attributes"][&referent]["name"]
                .as_str()
                .unwrap_or(&referent)
                .to_string();
            let raw = credential["values"][&name]["raw"].clone();
            let entry = if prove.reveal != 0 {
                json!({"sub_proof_index": prove.entry_idx, "raw": raw})
            } else {
                json!({"sub_proof_index": prove.entry_idx})
            };
            revealed.insert(referent, entry);
        }
        let self_attested: Map<String, Value> = self_attested
            .into_iter()
            .map(|(name, value)| (name, Value::String(value)))
            .collect();
        Ok(json!({
            "nonce": request["nonce"],
            "identifiers": identifiers,
            "requested_proof": {
                "revealed_attrs": revealed,
                "predicates": predicates,
                "self_attested_attrs": self_attested,
            },
        }))
    }

    #[allow(clippy::too_many_arguments)]
    unsafe fn verify(
        &self,
        presentation_type: &str,
        presentation: ObjectHandle,
        pres_req: ObjectHandle,
        schemas: FfiObjectHandleList,
        schema_ids: FfiStrList,
        cred_defs: FfiObjectHandleList,
        cred_def_ids: FfiStrList,
        rev_reg_defs: FfiObjectHandleList,
        rev_reg_def_ids: FfiStrList,
        rev_status_lists: FfiObjectHandleList,
        overrides: FfiNonrevokedIntervalOverrideList,
    ) -> Step<i8> {
        let override_ids: Vec<Value> = overrides
            .as_slice()
            .iter()
            .map(|o| {
                json!({
                    "id": text(o.rev_reg_def_id),
                    "from": o.requested_from_ts,
                    "override": o.override_rev_status_list_ts,
                })
            })
            .collect();
        self.observe(json!({
            "schemas": schemas.count,
            "credentialDefinitions": cred_defs.count,
            "revocationRegistryDefinitions": rev_reg_defs.count,
            "revocationRegistryDefinitionIds": rev_reg_def_ids.count,
            "revocationStatusLists": rev_status_lists.count,
            "revocationStatusListsNull": rev_status_lists.data.is_null(),
            "nonRevokedIntervalOverrides": override_ids,
        }));

        let presentation = self.load(presentation, presentation_type)?;
        let request = self.load(pres_req, "PresentationRequest")?;
        for handle in handles(schemas) {
            self.load(handle, "Schema")?;
        }
        for handle in handles(cred_defs) {
            self.load(handle, "CredentialDefinition")?;
        }
        let schema_ids = texts(schema_ids);
        let cred_def_ids = texts(cred_def_ids);
        if let Some(identifiers) = presentation["identifiers"].as_array() {
            for identifier in identifiers {
                if !schema_ids.iter().any(|id| identifier["schema_id"] == json!(id)) {
                    return Err(input("Schema not provided for ID"));
                }
                if !cred_def_ids.iter().any(|id| identifier["cred_def_id"] == json!(id)) {
                    return Err(input("Credential Definition not provided for ID"));
                }
            }
        }
        Ok(i8::from(presentation["nonce"] == request["nonce"]))
    }

    fn status_list_update(
        &self,
        list: Value,
        issued: &[i32],
        revoked: &[i32],
        timestamp: i64,
    ) -> Step<Value> {
        let mut list = list;
        let bits = list["revocationList"]
            .as_array_mut()
            .ok_or_else(|| Failure(ErrorCode::InvalidState, "Corrupt status list".into()))?;
        for (&index, bit) in issued.iter().map(|i| (i, 0)).chain(revoked.iter().map(|i| (i, 1))) {
            let slot = usize::try_from(index)
                .ok()
                .and_then(|i| bits.get_mut(i))
                .ok_or_else(|| {
                    Failure(
                        ErrorCode::InvalidUserRevocId,
                        format!("Revocation index {index} out of range"),
                    )
                })?;
            *slot = json!(bit);
        }
        if timestamp >= 0 {
            list["timestamp"] = json!(timestamp);
        }
        Ok(list)
    }
}

// ─── NativeLibrary ──────────────────────────────────────────────────────────

#[allow(clippy::too_many_arguments)]
impl NativeLibrary for FakeAnoncreds {
    unsafe fn version(&self) -> *const c_char {
        VERSION.as_ptr().cast()
    }

    unsafe fn get_current_error(&self, out: *mut *const c_char) -> u32 {
        if self.error_accessor_broken.get() {
            return ErrorCode::Unexpected.code();
        }
        let document = match &*self.last_error.borrow() {
            Some((code, message)) => json!({"code": code.code(), "message": message}),
            None => json!({"code": 0, "message": null}),
        };
        out.write(self.lend(document.to_string()));
        ErrorCode::Success.code()
    }

    unsafe fn set_default_logger(&self) -> u32 {
        self.status(Ok(()), |_| {})
    }

    unsafe fn object_get_json(&self, handle: ObjectHandle, out: *mut ByteBuffer) -> u32 {
        let result = match self.objects.borrow().get(&handle.0) {
            Some(stored) => Ok(stored.json.to_string()),
            None => Err(input(format!("Invalid handle: {}", handle.0))),
        };
        self.status(result, |text| {
            let bytes = text.into_bytes().into_boxed_slice();
            let len = bytes.len() as i64;
            let data = Box::into_raw(bytes) as *mut u8;
            self.buffers_out.set(self.buffers_out.get() + 1);
            unsafe { out.write(ByteBuffer { len, data }) };
        })
    }

    unsafe fn object_get_type_name(&self, handle: ObjectHandle, out: *mut *const c_char) -> u32 {
        let result = match self.objects.borrow().get(&handle.0) {
            Some(stored) => Ok(stored.type_name.to_string()),
            None => Err(input(format!("Invalid handle: {}", handle.0))),
        };
        self.emit_text(result, out)
    }

    unsafe fn object_free(&self, handle: ObjectHandle) {
        self.objects.borrow_mut().remove(&handle.0);
    }

    unsafe fn buffer_free(&self, buffer: ByteBuffer) {
        if buffer.data.is_null() {
            return;
        }
        let slice = ptr::slice_from_raw_parts_mut(buffer.data, buffer.len as usize);
        drop(Box::from_raw(slice));
        self.buffers_freed.set(self.buffers_freed.get() + 1);
    }

    unsafe fn object_from_json(
        &self,
        kind: ObjectKind,
        json: ByteBuffer,
        out: *mut ObjectHandle,
    ) -> u32 {
        let result = serde_json::from_slice::<Value>(json.as_slice())
            .map_err(|e| input(format!("Invalid JSON for {}: {e}", kind.type_name())))
            .and_then(|value| match value {
                Value::Object(_) => Ok(self.store(kind.type_name(), value)),
                _ => Err(input(format!("Invalid JSON for {}: expected object", kind.type_name()))),
            });
        self.emit(result, out)
    }

    unsafe fn create_link_secret(&self, out: *mut *const c_char) -> u32 {
        let secret = self.random_digits();
        self.emit_text(Ok(secret), out)
    }

    unsafe fn generate_nonce(&self, out: *mut *const c_char) -> u32 {
        let nonce = self.random_digits();
        self.emit_text(Ok(nonce), out)
    }

    unsafe fn create_schema(
        &self,
        name: FfiStr,
        version: FfiStr,
        issuer_id: FfiStr,
        attr_names: FfiStrList,
        out: *mut ObjectHandle,
    ) -> u32 {
        let attr_names = texts(attr_names);
        let result = match (text(name), text(version), text(issuer_id)) {
            _ if attr_names.is_empty() => Err(input("Invalid schema: empty attribute names")),
            (Some(name), Some(version), Some(issuer_id)) => Ok(self.store(
                "Schema",
                json!({
                    "name": name,
                    "version": version,
                    "issuerId": issuer_id,
                    "attrNames": attr_names,
                }),
            )),
            _ => Err(input("Missing schema field")),
        };
        self.emit(result, out)
    }

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
    ) -> u32 {
        let result = self.credential_definition(
            text(schema_id),
            schema,
            text(tag),
            text(issuer_id),
            text(signature_type),
            support_revocation,
        );
        self.status(result, |(cred_def, private, proof)| unsafe {
            cred_def_out.write(cred_def);
            cred_def_private_out.write(private);
            key_proof_out.write(proof);
        })
    }

    unsafe fn create_credential_offer(
        &self,
        schema_id: FfiStr,
        cred_def_id: FfiStr,
        key_proof: ObjectHandle,
        out: *mut ObjectHandle,
    ) -> u32 {
        let result = self
            .load(key_proof, "CredentialKeyCorrectnessProof")
            .map(|proof| {
                self.store(
                    "CredentialOffer",
                    json!({
                        "schema_id": text(schema_id),
                        "cred_def_id": text(cred_def_id),
                        "key_correctness_proof": proof,
                        "nonce": self.random_digits(),
                    }),
                )
            });
        self.emit(result, out)
    }

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
    ) -> u32 {
        let entropy = text(entropy);
        let prover_did = text(prover_did);
        let link_secret = text(link_secret);
        let link_secret_id = text(link_secret_id);
        let result = (|| {
            self.load(cred_def, "CredentialDefinition")?;
            let offer = self.load(cred_offer, "CredentialOffer")?;
            link_secret.ok_or_else(|| input("Missing link secret"))?;
            let mut request = json!({
                "cred_def_id": offer["cred_def_id"],
                "blinded_ms": {"u": self.random_digits()},
                "nonce": self.random_digits(),
            });
            match (entropy, prover_did) {
                (Some(entropy), _) => request["entropy"] = json!(entropy),
                (None, Some(did)) => request["prover_did"] = json!(did),
                (None, None) => return Err(input("Entropy or prover DID must be supplied")),
            }
            let metadata = json!({
                "link_secret_name": link_secret_id,
                "nonce": offer["nonce"],
            });
            Ok((
                self.store("CredentialRequest", request),
                self.store("CredentialRequestMetadata", metadata),
            ))
        })();
        self.status(result, |(request, metadata)| unsafe {
            cred_req_out.write(request);
            cred_req_metadata_out.write(metadata);
        })
    }

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
    ) -> u32 {
        let result = self
            .issue(
                cred_def,
                cred_def_private,
                cred_offer,
                cred_request,
                texts(attr_names),
                texts(attr_raw_values),
                texts(attr_enc_values),
                revocation.as_ref().copied(),
            )
            .map(|credential| self.store("Credential", credential));
        self.emit(result, out)
    }

    unsafe fn process_credential(
        &self,
        cred: ObjectHandle,
        cred_req_metadata: ObjectHandle,
        link_secret: FfiStr,
        cred_def: ObjectHandle,
        rev_reg_def: ObjectHandle,
        out: *mut ObjectHandle,
    ) -> u32 {
        let link_secret = text(link_secret);
        let result = (|| {
            let mut credential = self.load(cred, "Credential")?;
            self.load(cred_req_metadata, "CredentialRequestMetadata")?;
            self.load(cred_def, "CredentialDefinition")?;
            self.load_optional(rev_reg_def, "RevocationRegistryDefinition")?;
            link_secret.ok_or_else(|| input("Missing link secret"))?;
            credential["signature_processed"] = json!(true);
            Ok(self.store("Credential", credential))
        })();
        self.emit(result, out)
    }

    unsafe fn credential_get_attribute(
        &self,
        handle: ObjectHandle,
        name: FfiStr,
        out: *mut *const c_char,
    ) -> u32 {
        let name = text(name).unwrap_or_default();
        let result = self.load(handle, "Credential").and_then(|credential| {
            match (name.as_str(), &credential[name.as_str()]) {
                ("schema_id" | "cred_def_id" | "rev_reg_id", Value::String(s)) => Ok(s.clone()),
                ("rev_reg_id", Value::Null) => Ok(String::new()),
                ("rev_reg_index", Value::Number(n)) => Ok(n.to_string()),
                _ => Err(input(format!("Unsupported attribute: {name}"))),
            }
        });
        self.emit_text(result, out)
    }

    unsafe fn encode_credential_attributes(
        &self,
        attr_raw_values: FfiStrList,
        out: *mut *const c_char,
    ) -> u32 {
        let encoded: Vec<String> = texts(attr_raw_values).iter().map(|raw| encode(raw)).collect();
        self.emit_text(Ok(encoded.join(",")), out)
    }

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
    ) -> u32 {
        let self_attested: Vec<(String, String)> = texts(self_attest_names)
            .into_iter()
            .zip(texts(self_attest_values))
            .collect();
        let result = (|| {
            for handle in handles(schemas) {
                self.load(handle, "Schema")?;
            }
            for handle in handles(cred_defs) {
                self.load(handle, "CredentialDefinition")?;
            }
            let presentation = self.present(
                pres_req,
                credentials,
                credentials_prove,
                self_attested,
                text(link_secret),
                texts(schema_ids),
                texts(cred_def_ids),
            )?;
            Ok(self.store("Presentation", presentation))
        })();
        self.emit(result, out)
    }

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
    ) -> u32 {
        let result = self.verify(
            "Presentation",
            presentation,
            pres_req,
            schemas,
            schema_ids,
            cred_defs,
            cred_def_ids,
            rev_reg_defs,
            rev_reg_def_ids,
            rev_status_lists,
            nonrevoked_overrides,
        );
        self.emit(result, out)
    }

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
    ) -> u32 {
        let tails_dir = text(tails_dir_path).unwrap_or_else(|| "/tmp/tails".into());
        let result = (|| {
            let definition = self.load(cred_def, "CredentialDefinition")?;
            if definition["value"].get("revocation").is_none() {
                return Err(input("Credential definition does not support revocation"));
            }
            if max_cred_num <= 0 {
                return Err(input("Maximum credential number must be positive"));
            }
            let tails_hash = self.random_digits();
            let reg_def = self.store(
                "RevocationRegistryDefinition",
                json!({
                    "credDefId": text(cred_def_id),
                    "issuerId": text(issuer_id),
                    "tag": text(tag),
                    "revocDefType": text(rev_reg_type),
                    "value": {
                        "maxCredNum": max_cred_num,
                        "tailsHash": tails_hash,
                        "tailsLocation": format!("{tails_dir}/{tails_hash}"),
                    },
                }),
            );
            let private = self.store(
                "RevocationRegistryDefinitionPrivate",
                json!({"value": {"gamma": self.random_digits()}}),
            );
            Ok((reg_def, private))
        })();
        self.status(result, |(reg_def, private)| unsafe {
            reg_def_out.write(reg_def);
            reg_def_private_out.write(private);
        })
    }

    unsafe fn revocation_registry_definition_get_attribute(
        &self,
        handle: ObjectHandle,
        name: FfiStr,
        out: *mut *const c_char,
    ) -> u32 {
        let name = text(name).unwrap_or_default();
        let result = self
            .load(handle, "RevocationRegistryDefinition")
            .and_then(|definition| {
                let value = &definition["value"];
                match name.as_str() {
                    "max_cred_num" => Ok(value["maxCredNum"].to_string()),
                    "tails_hash" => Ok(value["tailsHash"].as_str().unwrap_or_default().into()),
                    "tails_location" => {
                        Ok(value["tailsLocation"].as_str().unwrap_or_default().into())
                    }
                    _ => Err(input(format!("Unsupported attribute: {name}"))),
                }
            });
        self.emit_text(result, out)
    }

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
    ) -> u32 {
        let result = (|| {
            self.load(cred_def, "CredentialDefinition")?;
            let definition = self.load(rev_reg_def, "RevocationRegistryDefinition")?;
            self.load(rev_reg_private, "RevocationRegistryDefinitionPrivate")?;
            let size = definition["value"]["maxCredNum"].as_u64().unwrap_or(0) as usize;
            let bit = if issuance_by_default != 0 { 0 } else { 1 };
            Ok(self.store(
                "RevocationStatusList",
                json!({
                    "revRegDefId": text(rev_reg_def_id),
                    "issuerId": text(issuer_id),
                    "revocationList": vec![bit; size],
                    "timestamp": (timestamp >= 0).then_some(timestamp),
                }),
            ))
        })();
        self.emit(result, out)
    }

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
    ) -> u32 {
        self.observe(json!({
            "issued": issued.count,
            "issuedNull": issued.data.is_null(),
            "revoked": revoked.count,
            "timestamp": timestamp,
        }));
        let result = (|| {
            self.load(cred_def, "CredentialDefinition")?;
            self.load(rev_reg_def, "RevocationRegistryDefinition")?;
            self.load(rev_reg_private, "RevocationRegistryDefinitionPrivate")?;
            let list = self.load(rev_current_list, "RevocationStatusList")?;
            let updated =
                self.status_list_update(list, issued.as_slice(), revoked.as_slice(), timestamp)?;
            Ok(self.store("RevocationStatusList", updated))
        })();
        self.emit(result, out)
    }

    unsafe fn update_revocation_status_list_timestamp_only(
        &self,
        timestamp: i64,
        rev_current_list: ObjectHandle,
        out: *mut ObjectHandle,
    ) -> u32 {
        let result = self
            .load(rev_current_list, "RevocationStatusList")
            .and_then(|list| self.status_list_update(list, &[], &[], timestamp))
            .map(|list| self.store("RevocationStatusList", list));
        self.emit(result, out)
    }

    unsafe fn create_or_update_revocation_state(
        &self,
        rev_reg_def: ObjectHandle,
        rev_status_list: ObjectHandle,
        rev_reg_index: i64,
        tails_path: FfiStr,
        rev_state: ObjectHandle,
        old_rev_status_list: ObjectHandle,
        out: *mut ObjectHandle,
    ) -> u32 {
        let tails_path = text(tails_path);
        let result = (|| {
            let definition = self.load(rev_reg_def, "RevocationRegistryDefinition")?;
            let list = self.load(rev_status_list, "RevocationStatusList")?;
            let previous = self.load_optional(rev_state, "CredentialRevocationState")?;
            self.load_optional(old_rev_status_list, "RevocationStatusList")?;
            tails_path.ok_or_else(|| input("Missing tails path"))?;
            let max = definition["value"]["maxCredNum"].as_i64().unwrap_or(0);
            if rev_reg_index < 0 || rev_reg_index >= max {
                return Err(Failure(
                    ErrorCode::InvalidUserRevocId,
                    format!("Revocation index {rev_reg_index} out of range"),
                ));
            }
            if list["revocationList"][rev_reg_index as usize] == json!(1) {
                return Err(Failure(ErrorCode::CredentialRevoked, "Credential revoked".into()));
            }
            let updates = previous.map_or(0, |p| p["updates"].as_u64().unwrap_or(0) + 1);
            Ok(self.store(
                "CredentialRevocationState",
                json!({
                    "rev_reg_index": rev_reg_index,
                    "timestamp": list["timestamp"],
                    "witness": {"omega": self.random_digits()},
                    "updates": updates,
                }),
            ))
        })();
        self.emit(result, out)
    }

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
    ) -> u32 {
        let version = text(w3c_version).unwrap_or_else(|| "1.1".into());
        let result = self
            .issue(
                cred_def,
                cred_def_private,
                cred_offer,
                cred_request,
                texts(attr_names),
                texts(attr_raw_values),
                Vec::new(),
                revocation.as_ref().copied(),
            )
            .map(|credential| self.store("W3CCredential", to_w3c(&credential, None, &version)));
        self.emit(result, out)
    }

    unsafe fn process_w3c_credential(
        &self,
        cred: ObjectHandle,
        cred_req_metadata: ObjectHandle,
        link_secret: FfiStr,
        cred_def: ObjectHandle,
        rev_reg_def: ObjectHandle,
        out: *mut ObjectHandle,
    ) -> u32 {
        let link_secret = text(link_secret);
        let result = (|| {
            let mut credential = self.load(cred, "W3CCredential")?;
            self.load(cred_req_metadata, "CredentialRequestMetadata")?;
            self.load(cred_def, "CredentialDefinition")?;
            self.load_optional(rev_reg_def, "RevocationRegistryDefinition")?;
            link_secret.ok_or_else(|| input("Missing link secret"))?;
            credential["proof"]["processed"] = json!(true);
            Ok(self.store("W3CCredential", credential))
        })();
        self.emit(result, out)
    }

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
    ) -> u32 {
        let version = text(w3c_version).unwrap_or_else(|| "1.1".into());
        let result = (|| {
            for handle in handles(schemas) {
                self.load(handle, "Schema")?;
            }
            for handle in handles(cred_defs) {
                self.load(handle, "CredentialDefinition")?;
            }
            // W3C credentials are proved through their classic form.
            let entries = credentials.as_slice();
            let mut classic = Vec::with_capacity(entries.len());
            let mut converted = Vec::with_capacity(entries.len());
            for entry in entries {
                let credential = from_w3c(&self.load(entry.credential, "W3CCredential")?);
                let handle = self.store("Credential", credential);
                converted.push(handle);
                classic.push(anoncreds_bridge_types::FfiCredentialEntry {
                    credential: handle,
                    ..*entry
                });
            }
            let presentation = self.present(
                pres_req,
                anoncreds_bridge_types::FfiList::from_slice(&classic),
                credentials_prove,
                Vec::new(),
                text(link_secret),
                texts(schema_ids),
                texts(cred_def_ids),
            );
            for handle in converted {
                self.objects.borrow_mut().remove(&handle.0);
            }
            let mut presentation = presentation?;
            presentation["@context"] = json!(context(&version));
            presentation["type"] = json!(["VerifiablePresentation"]);
            Ok(self.store("W3CPresentation", presentation))
        })();
        self.emit(result, out)
    }

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
    ) -> u32 {
        let result = self.verify(
            "W3CPresentation",
            presentation,
            pres_req,
            schemas,
            schema_ids,
            cred_defs,
            cred_def_ids,
            rev_reg_defs,
            rev_reg_def_ids,
            rev_status_lists,
            nonrevoked_overrides,
        );
        self.emit(result, out)
    }

    unsafe fn credential_to_w3c(
        &self,
        cred: ObjectHandle,
        issuer_id: FfiStr,
        w3c_version: FfiStr,
        out: *mut ObjectHandle,
    ) -> u32 {
        let issuer_id = text(issuer_id);
        let version = text(w3c_version).unwrap_or_else(|| "1.1".into());
        let result = self
            .load(cred, "Credential")
            .map(|credential| {
                self.store("W3CCredential", to_w3c(&credential, issuer_id, &version))
            });
        self.emit(result, out)
    }

    unsafe fn credential_from_w3c(&self, cred: ObjectHandle, out: *mut ObjectHandle) -> u32 {
        let result = self
            .load(cred, "W3CCredential")
            .map(|credential| self.store("Credential", from_w3c(&credential)));
        self.emit(result, out)
    }

    unsafe fn w3c_credential_get_integrity_proof_details(
        &self,
        cred: ObjectHandle,
        out: *mut ObjectHandle,
    ) -> u32 {
        let result = self
            .load(cred, "W3CCredential")
            .map(|credential| self.store("W3CCredentialProofDetails", credential["proof"].clone()));
        self.emit(result, out)
    }

    unsafe fn w3c_credential_proof_get_attribute(
        &self,
        handle: ObjectHandle,
        name: FfiStr,
        out: *mut *const c_char,
    ) -> u32 {
        let name = text(name).unwrap_or_default();
        let result = self
            .load(handle, "W3CCredentialProofDetails")
            .and_then(|proof| match (name.as_str(), &proof[name.as_str()]) {
                ("schema_id" | "cred_def_id" | "rev_reg_id", Value::String(s)) => Ok(s.clone()),
                ("rev_reg_index" | "timestamp", Value::Number(n)) => Ok(n.to_string()),
                _ => Err(input(format!("Unsupported attribute: {name}"))),
            });
        self.emit_text(result, out)
    }
}

fn context(version: &str) -> Vec<&'static str> {
    let base = if version == "2.0" {
        "https://www.w3.org/ns/credentials/v2"
    } else {
        "https://www.w3.org/2018/credentials/v1"
    };
    vec![
        base,
        "https://raw.githubusercontent.com/hyperledger/anoncreds-spec/main/data/anoncreds-w3c-context.json",
    ]
}

fn to_w3c(credential: &Value, issuer_id: Option<String>, version: &str) -> Value {
    let subject: Map<String, Value> = credential["values"]
        .as_object()
        .map(|values| {
            values
                .iter()
                .map(|(name, value)| (name.clone(), value["raw"].clone()))
                .collect()
        })
        .unwrap_or_default();
    json!({
        "@context": context(version),
        "type": ["VerifiableCredential", "AnonCredsCredential"],
        "issuer": issuer_id,
        "credentialSubject": subject,
        "proof": {
            "type": "DataIntegrityProof",
            "schema_id": credential["schema_id"],
            "cred_def_id": credential["cred_def_id"],
            "rev_reg_id": credential["rev_reg_id"],
            "rev_reg_index": credential.get("rev_reg_index"),
            "values": credential["values"],
            "signature": credential["signature"],
        },
    })
}

fn from_w3c(credential: &Value) -> Value {
    let proof = &credential["proof"];
    json!({
        "schema_id": proof["schema_id"],
        "cred_def_id": proof["cred_def_id"],
        "rev_reg_id": proof["rev_reg_id"],
        "values": proof["values"],
        "signature": proof["signature"],
    })
}

// ─── Host-side helpers ──────────────────────────────────────────────────────

pub fn bridge() -> Bridge<FakeAnoncreds> {
    Bridge::new(FakeAnoncreds::new())
}

pub fn permissive_bridge() -> Bridge<FakeAnoncreds> {
    Bridge::with_config(FakeAnoncreds::new(), BridgeConfig::default().permissive())
}

/// Invoke by host name and insist on success.
pub fn ok(bridge: &Bridge<FakeAnoncreds>, operation: &str, args: Value) -> Value {
    match bridge.invoke_named(operation, &args) {
        Outcome::Ok(value) => value,
        Outcome::Error(body) => panic!("{operation} failed: {body:?}"),
    }
}

/// Invoke by host name and insist on failure.
pub fn err(
    bridge: &Bridge<FakeAnoncreds>,
    operation: &str,
    args: Value,
) -> anoncreds_bridge::ErrorBody {
    match bridge.invoke_named(operation, &args) {
        Outcome::Ok(value) => panic!("{operation} unexpectedly succeeded: {value}"),
        Outcome::Error(body) => body,
    }
}

pub const ISSUER_ID: &str = "mock:uri";
pub const SCHEMA_ID: &str = "mock:uri:schema";
pub const CRED_DEF_ID: &str = "mock:uri:creddef";
pub const REV_REG_DEF_ID: &str = "mock:uri:revregdef";

/// Issuer material for a three-attribute schema.
pub struct Issuer {
    pub schema: Value,
    pub credential_definition: Value,
    pub credential_definition_private: Value,
    pub key_correctness_proof: Value,
}

pub fn issuer(bridge: &Bridge<FakeAnoncreds>, support_revocation: bool) -> Issuer {
    let schema = ok(
        bridge,
        "createSchema",
        json!({
            "name": "schema-1",
            "version": "1.0",
            "issuerId": ISSUER_ID,
            "attributeNames": ["name", "age", "sex"],
        }),
    );
    let output = ok(
        bridge,
        "createCredentialDefinition",
        json!({
            "schemaId": SCHEMA_ID,
            "schema": schema,
            "tag": "TAG",
            "issuerId": ISSUER_ID,
            "signatureType": "CL",
            "supportRevocation": support_revocation,
        }),
    );
    Issuer {
        schema,
        credential_definition: output["credentialDefinition"].clone(),
        credential_definition_private: output["credentialDefinitionPrivate"].clone(),
        key_correctness_proof: output["keyCorrectnessProof"].clone(),
    }
}

/// Offer plus request for `issuer`'s credential definition.
pub fn offer_and_request(
    bridge: &Bridge<FakeAnoncreds>,
    issuer: &Issuer,
) -> (Value, Value, Value, String) {
    let offer = ok(
        bridge,
        "createCredentialOffer",
        json!({
            "schemaId": SCHEMA_ID,
            "credentialDefinitionId": CRED_DEF_ID,
            "keyCorrectnessProof": issuer.key_correctness_proof,
        }),
    );
    let link_secret = ok(bridge, "createLinkSecret", json!({}));
    let output = ok(
        bridge,
        "createCredentialRequest",
        json!({
            "entropy": "entropy",
            "credentialDefinition": issuer.credential_definition,
            "linkSecret": link_secret,
            "linkSecretId": "default",
            "credentialOffer": offer,
        }),
    );
    let link_secret = link_secret.as_str().unwrap_or_default().to_string();
    (
        offer,
        output["credentialRequest"].clone(),
        output["credentialRequestMetadata"].clone(),
        link_secret,
    )
}

pub fn presentation_request(bridge: &Bridge<FakeAnoncreds>) -> Value {
    let nonce = ok(bridge, "generateNonce", json!({}));
    ok(
        bridge,
        "presentationRequestFromJson",
        json!({
            "json": {
                "nonce": nonce,
                "name": "pres_req_1",
                "version": "0.1",
                "requested_attributes": {
                    "attr1_referent": {"name": "name"},
                    "attr2_referent": {"name": "sex"},
                    "attr3_referent": {"name": "phone"},
                },
                "requested_predicates": {
                    "predicate1_referent": {"name": "age", "p_type": ">=", "p_value": 18},
                },
            },
        }),
    )
}
