//! Contiguous arrays lent to the native library.

use anoncreds_bridge_types::{FfiList, FfiStr, ObjectHandle};
use serde_json::Value;

use crate::buffer::NativeString;
use crate::error::{BridgeError, BridgeResult};
use crate::release::Allocation;
use crate::value::{as_handle, as_i32, as_str, type_of};

/// Backing memory of one native array plus any strings its elements point
/// into.
///
/// An empty array allocates nothing and is lent as a null pointer with a
/// zero count. On drop the element strings are released before the array
/// that refers to them.
#[derive(Debug)]
pub struct OwnedArray<T> {
    items: Vec<T>,
    children: Vec<NativeString>,
    _ticket: Option<Allocation>,
}

impl<T> OwnedArray<T> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            children: Vec::new(),
            _ticket: None,
        }
    }

    pub(crate) fn with_children(items: Vec<T>, children: Vec<NativeString>) -> Self {
        let ticket = (!items.is_empty()).then(Allocation::acquire);
        Self {
            items,
            children,
            _ticket: ticket,
        }
    }

    pub fn from_items(items: Vec<T>) -> Self {
        Self::with_children(items, Vec::new())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn as_ffi(&self) -> FfiList<T> {
        FfiList::from_slice(&self.items)
    }
}

impl<T> Default for OwnedArray<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> Drop for OwnedArray<T> {
    fn drop(&mut self) {
        self.children.clear();
    }
}

/// Elements of a host list, or a type mismatch naming the whole list.
pub(crate) fn elements<'a>(name: &str, value: &'a Value) -> BridgeResult<&'a [Value]> {
    match value {
        Value::Array(items) => Ok(items),
        other => Err(BridgeError::mismatch(name, "array", type_of(Some(other)))),
    }
}

pub(crate) fn element_name(name: &str, index: usize) -> String {
    format!("{name}[{index}]")
}

/// Marshal a host list element by element. On a failing element every
/// element already converted is released before the error returns.
pub(crate) fn marshal_with<T, F>(
    name: &str,
    value: &Value,
    mut convert: F,
) -> BridgeResult<OwnedArray<T>>
where
    F: FnMut(&str, &Value, &mut Vec<NativeString>) -> BridgeResult<T>,
{
    let source = elements(name, value)?;
    let mut items = Vec::with_capacity(source.len());
    let mut children = Vec::new();
    for (index, element) in source.iter().enumerate() {
        items.push(convert(&element_name(name, index), element, &mut children)?);
    }
    Ok(OwnedArray::with_children(items, children))
}

pub fn string_list(name: &str, value: &Value) -> BridgeResult<OwnedArray<FfiStr>> {
    marshal_with(name, value, |element, v, children| {
        let string = NativeString::new(element, as_str(element, v)?)?;
        let ptr = string.as_ptr();
        children.push(string);
        Ok(ptr)
    })
}

pub fn handle_list(name: &str, value: &Value) -> BridgeResult<OwnedArray<ObjectHandle>> {
    marshal_with(name, value, |element, v, _| as_handle(element, v))
}

pub fn i32_list(name: &str, value: &Value) -> BridgeResult<OwnedArray<i32>> {
    marshal_with(name, value, |element, v, _| as_i32(element, v))
}
