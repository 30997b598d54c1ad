//! Argument bags and per-operation parameter tables.

use anoncreds_bridge_types::{
    FfiCredRevInfo, FfiCredentialEntry, FfiCredentialProve, FfiNonrevokedIntervalOverride, FfiStr,
    ObjectHandle,
};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::buffer::{NativeString, OwnedByteBuffer};
use crate::error::{BridgeError, BridgeResult};
use crate::list::{self, OwnedArray};
use crate::record;
use crate::value::{self, type_of};

/// Declared shape of one named argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ParamKind {
    String,
    /// JSON text, or a structured value serialized on the way in.
    Json,
    Flag,
    I32,
    I64,
    Handle,
    StringList,
    HandleList,
    I32List,
    CredentialEntries,
    CredentialProves,
    NonRevokedOverrides,
    RevocationConfig,
}

impl ParamKind {
    /// Check the value's outer shape. Elements and record fields are
    /// checked while marshaling.
    fn check(self, name: &str, v: &Value) -> BridgeResult<()> {
        match self {
            ParamKind::String => value::as_str(name, v).map(drop),
            ParamKind::Json => value::as_json_text(name, v).map(drop),
            ParamKind::Flag => value::as_flag(name, v).map(drop),
            ParamKind::I32 => value::as_i32(name, v).map(drop),
            ParamKind::I64 => value::as_i64(name, v).map(drop),
            ParamKind::Handle => value::as_handle(name, v).map(drop),
            ParamKind::StringList
            | ParamKind::HandleList
            | ParamKind::I32List
            | ParamKind::CredentialEntries
            | ParamKind::CredentialProves
            | ParamKind::NonRevokedOverrides => list::elements(name, v).map(drop),
            ParamKind::RevocationConfig => match v {
                Value::Object(_) => Ok(()),
                other => Err(BridgeError::mismatch(name, "object", type_of(Some(other)))),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Param {
    pub name: &'static str,
    pub kind: ParamKind,
    pub optional: bool,
}

impl Param {
    pub const fn required(name: &'static str, kind: ParamKind) -> Self {
        Self {
            name,
            kind,
            optional: false,
        }
    }

    pub const fn optional(name: &'static str, kind: ParamKind) -> Self {
        Self {
            name,
            kind,
            optional: true,
        }
    }
}

/// Named host arguments for one call. A `null` value is treated the same
/// as an absent key.
#[derive(Debug, Clone, Copy)]
pub struct ArgumentBag<'a> {
    values: &'a Map<String, Value>,
}

impl<'a> ArgumentBag<'a> {
    pub fn new(values: &'a Map<String, Value>) -> Self {
        Self { values }
    }

    pub fn from_value(value: &'a Value) -> BridgeResult<Self> {
        match value {
            Value::Object(values) => Ok(Self::new(values)),
            other => Err(BridgeError::mismatch("arguments", "object", type_of(Some(other)))),
        }
    }

    pub fn get(&self, name: &str) -> Option<&'a Value> {
        self.values.get(name).filter(|v| !v.is_null())
    }

    fn required(&self, name: &str) -> BridgeResult<&'a Value> {
        self.get(name)
            .ok_or_else(|| BridgeError::mismatch(name, "value", type_of(None)))
    }

    /// Check every declared parameter's presence and outer shape. Keys the
    /// table does not declare are ignored.
    pub fn validate(&self, operation: &str, params: &[Param]) -> BridgeResult<()> {
        for param in params {
            match self.get(param.name) {
                Some(value) => param.kind.check(param.name, value)?,
                None if param.optional => {}
                None => return Err(BridgeError::mismatch(param.name, "value", type_of(None))),
            }
        }
        for key in self.values.keys() {
            if !params.iter().any(|p| p.name == key.as_str()) {
                log::debug!("{operation}: ignoring undeclared argument `{key}`");
            }
        }
        Ok(())
    }

    // ─── Scalars ────────────────────────────────────────────────────────

    pub fn str(&self, name: &str) -> BridgeResult<&'a str> {
        value::as_str(name, self.required(name)?)
    }

    pub fn c_string(&self, name: &str) -> BridgeResult<NativeString> {
        NativeString::new(name, self.str(name)?)
    }

    /// Absent, `null` and the empty string all mean "not supplied".
    pub fn optional_c_string(&self, name: &str) -> BridgeResult<Option<NativeString>> {
        match self.get(name) {
            None => Ok(None),
            Some(v) => match value::as_str(name, v)? {
                "" => Ok(None),
                s => NativeString::new(name, s).map(Some),
            },
        }
    }

    pub fn json_buffer(&self, name: &str) -> BridgeResult<OwnedByteBuffer> {
        let text = value::as_json_text(name, self.required(name)?)?;
        Ok(OwnedByteBuffer::from_text(&text))
    }

    pub fn flag(&self, name: &str) -> BridgeResult<i8> {
        value::as_flag(name, self.required(name)?)
    }

    pub fn i64(&self, name: &str) -> BridgeResult<i64> {
        value::as_i64(name, self.required(name)?)
    }

    pub fn optional_i64(&self, name: &str, default: i64) -> BridgeResult<i64> {
        self.get(name)
            .map_or(Ok(default), |v| value::as_i64(name, v))
    }

    pub fn handle(&self, name: &str) -> BridgeResult<ObjectHandle> {
        value::as_handle(name, self.required(name)?)
    }

    pub fn optional_handle(&self, name: &str) -> BridgeResult<ObjectHandle> {
        self.get(name)
            .map_or(Ok(ObjectHandle::NONE), |v| value::as_handle(name, v))
    }

    // ─── Lists ──────────────────────────────────────────────────────────

    pub fn str_list(&self, name: &str) -> BridgeResult<OwnedArray<FfiStr>> {
        list::string_list(name, self.required(name)?)
    }

    pub fn optional_str_list(&self, name: &str) -> BridgeResult<Option<OwnedArray<FfiStr>>> {
        self.get(name).map(|v| list::string_list(name, v)).transpose()
    }

    pub fn handle_list(&self, name: &str) -> BridgeResult<OwnedArray<ObjectHandle>> {
        list::handle_list(name, self.required(name)?)
    }

    /// Absent lists marshal to an empty array without allocating.
    pub fn optional_handle_list(&self, name: &str) -> BridgeResult<OwnedArray<ObjectHandle>> {
        self.get(name)
            .map_or_else(|| Ok(OwnedArray::empty()), |v| list::handle_list(name, v))
    }

    pub fn optional_i32_list(&self, name: &str) -> BridgeResult<OwnedArray<i32>> {
        self.get(name)
            .map_or_else(|| Ok(OwnedArray::empty()), |v| list::i32_list(name, v))
    }

    // ─── Records ────────────────────────────────────────────────────────

    pub fn credential_entries(&self, name: &str) -> BridgeResult<OwnedArray<FfiCredentialEntry>> {
        record::credential_entries(name, self.required(name)?)
    }

    pub fn credential_proves(&self, name: &str) -> BridgeResult<OwnedArray<FfiCredentialProve>> {
        record::credential_proves(name, self.required(name)?)
    }

    pub fn optional_nonrevoked_overrides(
        &self,
        name: &str,
    ) -> BridgeResult<OwnedArray<FfiNonrevokedIntervalOverride>> {
        self.get(name).map_or_else(
            || Ok(OwnedArray::empty()),
            |v| record::nonrevoked_overrides(name, v),
        )
    }

    pub fn optional_revocation_config(&self, name: &str) -> BridgeResult<Option<FfiCredRevInfo>> {
        self.get(name)
            .map(|v| record::revocation_config(name, v))
            .transpose()
    }
}
