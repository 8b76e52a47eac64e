//! Purpose: Type-erased sequence headers for elements the caller must not lay out.
//! Exports: `RawOpaqueSeq`.
//! Invariants: The payload behind `data` is always a `Payload<T>` for exactly one `T`;
//! only the function bundle exported for that `T` may touch it.

use std::ffi::c_void;

use crate::core::seq::RawSeq;

/// Sequence header with the element type erased. There is no runtime tag:
/// which `T` sits behind `data` is carried entirely by which exported bundle
/// the caller picked, so mixing bundles across element types is undefined.
/// Internally this is a thin cast over the one generic sequence
/// implementation; the erased form exists only at the symbol level.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct RawOpaqueSeq {
    pub len: isize,
    pub data: *mut c_void,
}

impl RawOpaqueSeq {
    /// Erases a typed header. The payload pointer is reinterpreted, not moved.
    pub fn erase<T>(raw: RawSeq<T>) -> Self {
        Self {
            len: raw.len,
            data: raw.data.cast(),
        }
    }

    /// Recovers the typed header.
    ///
    /// # Safety
    /// `T` must be the element type this header was erased from.
    pub unsafe fn typed<T>(self) -> RawSeq<T> {
        RawSeq {
            len: self.len,
            data: self.data.cast(),
        }
    }
}
