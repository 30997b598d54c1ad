//! Opaque native object handles.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Integer token naming an object that lives inside the native library.
///
/// The bridge never looks inside the referent and never frees it on its own;
/// releasing a handle is always an explicit host request. Handle `0` is the
/// "not present" sentinel used by optional handle parameters.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct ObjectHandle(pub usize);

impl ObjectHandle {
    /// The absent-handle sentinel.
    pub const NONE: ObjectHandle = ObjectHandle(0);

    pub fn is_none(self) -> bool {
        self.0 == 0
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl From<usize> for ObjectHandle {
    fn from(raw: usize) -> Self {
        ObjectHandle(raw)
    }
}

impl std::fmt::Display for ObjectHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Host-side shape of a handle: `{"handle": n}`.
#[derive(Serialize, Deserialize)]
struct HandleWrapper {
    handle: usize,
}

impl Serialize for ObjectHandle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        HandleWrapper { handle: self.0 }.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ObjectHandle {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        HandleWrapper::deserialize(deserializer).map(|w| ObjectHandle(w.handle))
    }
}
