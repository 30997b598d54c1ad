//! Fixed-layout records built from host objects.

use anoncreds_bridge_types::{
    FfiCredRevInfo, FfiCredentialEntry, FfiCredentialProve, FfiNonrevokedIntervalOverride,
    ObjectHandle,
};
use serde_json::{Map, Value};

use crate::buffer::NativeString;
use crate::error::{BridgeError, BridgeResult};
use crate::list::{marshal_with, OwnedArray};
use crate::value::{as_flag, as_handle, as_i32, as_i64, as_str, type_of};

/// Named fields of one host object. `null` reads as absent.
struct Fields<'a> {
    name: &'a str,
    map: &'a Map<String, Value>,
}

impl<'a> Fields<'a> {
    fn of(name: &'a str, value: &'a Value) -> BridgeResult<Self> {
        match value {
            Value::Object(map) => Ok(Self { name, map }),
            other => Err(BridgeError::mismatch(name, "object", type_of(Some(other)))),
        }
    }

    fn path(&self, field: &str) -> String {
        format!("{}.{field}", self.name)
    }

    fn get(&self, field: &str) -> Option<&'a Value> {
        self.map.get(field).filter(|v| !v.is_null())
    }

    fn required(&self, field: &str) -> BridgeResult<&'a Value> {
        self.get(field)
            .ok_or_else(|| BridgeError::mismatch(self.path(field), "value", type_of(None)))
    }

    fn handle(&self, field: &str) -> BridgeResult<ObjectHandle> {
        as_handle(&self.path(field), self.required(field)?)
    }

    fn optional_handle(&self, field: &str) -> BridgeResult<ObjectHandle> {
        self.get(field)
            .map_or(Ok(ObjectHandle::NONE), |v| as_handle(&self.path(field), v))
    }

    fn i64(&self, field: &str) -> BridgeResult<i64> {
        as_i64(&self.path(field), self.required(field)?)
    }

    fn optional_i64(&self, field: &str, default: i64) -> BridgeResult<i64> {
        self.get(field)
            .map_or(Ok(default), |v| as_i64(&self.path(field), v))
    }

    fn i32(&self, field: &str) -> BridgeResult<i32> {
        as_i32(&self.path(field), self.required(field)?)
    }

    fn flag(&self, field: &str) -> BridgeResult<i8> {
        as_flag(&self.path(field), self.required(field)?)
    }

    fn string(&self, field: &str) -> BridgeResult<NativeString> {
        let path = self.path(field);
        NativeString::new(&path, as_str(&path, self.required(field)?)?)
    }
}

// ─── Presentation inputs ────────────────────────────────────────────────────

/// `{credential, timestamp?, revocationState?}` per element.
pub fn credential_entries(
    name: &str,
    value: &Value,
) -> BridgeResult<OwnedArray<FfiCredentialEntry>> {
    marshal_with(name, value, |element, v, _| {
        let fields = Fields::of(element, v)?;
        Ok(FfiCredentialEntry {
            credential: fields.handle("credential")?,
            timestamp: fields.optional_i64("timestamp", -1)?,
            rev_state: fields.optional_handle("revocationState")?,
        })
    })
}

/// `{entryIndex, referent, isPredicate, reveal}` per element. Referent
/// strings are owned by the returned array.
pub fn credential_proves(
    name: &str,
    value: &Value,
) -> BridgeResult<OwnedArray<FfiCredentialProve>> {
    marshal_with(name, value, |element, v, children| {
        let fields = Fields::of(element, v)?;
        let entry_idx = fields.i64("entryIndex")?;
        let referent = fields.string("referent")?;
        let prove = FfiCredentialProve {
            entry_idx,
            referent: referent.as_ptr(),
            is_predicate: fields.flag("isPredicate")?,
            reveal: fields.flag("reveal")?,
        };
        children.push(referent);
        Ok(prove)
    })
}

/// Every prove must point at one of `entries` credential entries.
pub fn check_prove_indices(
    name: &str,
    proves: &OwnedArray<FfiCredentialProve>,
    entries: usize,
) -> BridgeResult<()> {
    for (index, prove) in proves.items().iter().enumerate() {
        if prove.entry_idx < 0 || prove.entry_idx as u64 >= entries as u64 {
            return Err(BridgeError::invalid(
                format!("{name}[{index}].entryIndex"),
                format!("{} does not address one of {entries} credential entries", prove.entry_idx),
            ));
        }
    }
    Ok(())
}

/// `{revocationRegistryDefinitionId, requestedFromTimestamp,
/// overrideRevocationStatusListTimestamp}` per element.
pub fn nonrevoked_overrides(
    name: &str,
    value: &Value,
) -> BridgeResult<OwnedArray<FfiNonrevokedIntervalOverride>> {
    marshal_with(name, value, |element, v, children| {
        let fields = Fields::of(element, v)?;
        let rev_reg_def_id = fields.string("revocationRegistryDefinitionId")?;
        let item = FfiNonrevokedIntervalOverride {
            rev_reg_def_id: rev_reg_def_id.as_ptr(),
            requested_from_ts: fields.i32("requestedFromTimestamp")?,
            override_rev_status_list_ts: fields.i32("overrideRevocationStatusListTimestamp")?,
        };
        children.push(rev_reg_def_id);
        Ok(item)
    })
}

// ─── Issuance inputs ────────────────────────────────────────────────────────

/// Revocation configuration for a revocable credential. The record holds
/// only handles and an index, so it needs no backing allocation.
pub fn revocation_config(name: &str, value: &Value) -> BridgeResult<FfiCredRevInfo> {
    let fields = Fields::of(name, value)?;
    Ok(FfiCredRevInfo {
        reg_def: fields.handle("revocationRegistryDefinition")?,
        reg_def_private: fields.handle("revocationRegistryDefinitionPrivate")?,
        status_list: fields.handle("revocationStatusList")?,
        reg_idx: fields.i64("registryIndex")?,
    })
}

/// Pointer for an optional revocation configuration; absent is null.
pub fn revocation_config_ptr(config: &Option<FfiCredRevInfo>) -> *const FfiCredRevInfo {
    config.as_ref().map_or(std::ptr::null(), |c| c as *const FfiCredRevInfo)
}
