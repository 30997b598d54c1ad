//! C-layout structures passed to and from the native library.
//!
//! None of these types own their pointees. Whoever builds one is responsible
//! for keeping the backing memory alive for as long as the native call runs;
//! on the bridge side that is the job of the owned guards in
//! `anoncreds_bridge::buffer` and `anoncreds_bridge::list`.

use std::os::raw::c_char;
use std::ptr;
use std::slice;

use crate::ObjectHandle;

/// Borrowed, null-terminated C string. Null means "not supplied".
pub type FfiStr = *const c_char;

// ─── Buffers ────────────────────────────────────────────────────────────────

/// Length-prefixed byte buffer.
///
/// Bridge-built buffers also carry a trailing NUL after `len` bytes, so
/// either convention can read them.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct ByteBuffer {
    pub len: i64,
    pub data: *mut u8,
}

impl ByteBuffer {
    pub const fn empty() -> Self {
        ByteBuffer {
            len: 0,
            data: ptr::null_mut(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len <= 0 || self.data.is_null()
    }

    /// # Safety
    ///
    /// `data` must point at `len` readable bytes that stay valid for the
    /// returned lifetime.
    pub unsafe fn as_slice<'a>(&self) -> &'a [u8] {
        if self.is_empty() {
            &[]
        } else {
            slice::from_raw_parts(self.data, self.len as usize)
        }
    }
}

impl Default for ByteBuffer {
    fn default() -> Self {
        ByteBuffer::empty()
    }
}

// ─── Counted arrays ─────────────────────────────────────────────────────────

/// Pointer + count view of a contiguous native array.
///
/// A zero-count list may carry a null pointer and is never dereferenced.
#[repr(C)]
#[derive(Debug)]
pub struct FfiList<T> {
    pub count: usize,
    pub data: *const T,
}

impl<T> FfiList<T> {
    pub const fn empty() -> Self {
        FfiList {
            count: 0,
            data: ptr::null(),
        }
    }

    pub fn from_slice(items: &[T]) -> Self {
        if items.is_empty() {
            FfiList::empty()
        } else {
            FfiList {
                count: items.len(),
                data: items.as_ptr(),
            }
        }
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// # Safety
    ///
    /// `data` must point at `count` initialized elements that stay valid for
    /// the returned lifetime.
    pub unsafe fn as_slice<'a>(&self) -> &'a [T] {
        if self.count == 0 || self.data.is_null() {
            &[]
        } else {
            slice::from_raw_parts(self.data, self.count)
        }
    }
}

// Manual impls: derive would demand `T: Copy` for a struct that only holds a
// pointer to `T`.
impl<T> Clone for FfiList<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for FfiList<T> {}

impl<T> Default for FfiList<T> {
    fn default() -> Self {
        FfiList::empty()
    }
}

pub type FfiStrList = FfiList<FfiStr>;
pub type FfiObjectHandleList = FfiList<ObjectHandle>;
pub type FfiI32List = FfiList<i32>;
pub type FfiCredentialEntryList = FfiList<FfiCredentialEntry>;
pub type FfiCredentialProveList = FfiList<FfiCredentialProve>;
pub type FfiNonrevokedIntervalOverrideList = FfiList<FfiNonrevokedIntervalOverride>;

// ─── Records ────────────────────────────────────────────────────────────────

/// One credential offered to a presentation. `timestamp` is `-1` and
/// `rev_state` is [`ObjectHandle::NONE`] when the credential is not revocable.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FfiCredentialEntry {
    pub credential: ObjectHandle,
    pub timestamp: i64,
    pub rev_state: ObjectHandle,
}

/// Which referent of which credential entry to prove, and how.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FfiCredentialProve {
    pub entry_idx: i64,
    pub referent: FfiStr,
    pub is_predicate: i8,
    pub reveal: i8,
}

/// Revocation material for issuing a revocable credential.
///
/// Absence is expressed by passing a null `*const FfiCredRevInfo`, never by a
/// zeroed record.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FfiCredRevInfo {
    pub reg_def: ObjectHandle,
    pub reg_def_private: ObjectHandle,
    pub status_list: ObjectHandle,
    pub reg_idx: i64,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FfiNonrevokedIntervalOverride {
    pub rev_reg_def_id: FfiStr,
    pub requested_from_ts: i32,
    pub override_rev_status_list_ts: i32,
}
