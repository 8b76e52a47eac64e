//! Purpose: Dynamic byte strings sharing the sequence layout contract.
//! Exports: `RawStr` (by-value header), `Str` (owning handle).
//! Invariants: `len` never counts the courtesy NUL; bytes past `len` are unspecified.
//! Notes: Contents are only conventionally UTF-8; display goes through `bstr`.

use std::fmt;

use bstr::BStr;

use crate::core::layout::Payload;
use crate::core::seq::{RawSeq, Seq};

/// String header: same two-level shape as every other container, with a byte
/// payload. There is one layout contract, not one per element type, so this
/// is `RawSeq<u8>` under another name.
pub type RawStr = RawSeq<u8>;

/// Owning dynamic string. Constructors that allocate reserve one spare byte
/// and put a NUL there so C callers can treat the payload as a C string; that
/// byte is a courtesy, not a contract, and `len` never includes it.
#[repr(transparent)]
#[derive(Default, PartialEq)]
pub struct Str {
    inner: Seq<u8>,
}

impl Str {
    pub const fn new() -> Self {
        Self { inner: Seq::new() }
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        if bytes.is_empty() {
            return Self::new();
        }
        let payload = Payload::alloc_copy(bytes, bytes.len() + 1);
        unsafe { *Payload::elems_ptr(payload.as_ptr()).add(bytes.len()) = 0 };
        let raw = RawSeq {
            len: bytes.len() as isize,
            data: payload.as_ptr(),
        };
        Self {
            inner: unsafe { Seq::from_raw(raw) },
        }
    }

    /// Concatenation: a fresh buffer of capacity `a.len() + b.len() + 1`,
    /// both inputs copied in order, nothing inserted between them.
    pub fn join(a: &[u8], b: &[u8]) -> Self {
        if b.is_empty() {
            return Self::from_bytes(a);
        }
        if a.is_empty() {
            return Self::from_bytes(b);
        }
        let total = a.len() + b.len();
        let payload = Payload::alloc_copy(a, total + 1);
        unsafe {
            let elems = Payload::elems_ptr(payload.as_ptr());
            std::ptr::copy_nonoverlapping(b.as_ptr(), elems.add(a.len()), b.len());
            *elems.add(total) = 0;
        }
        let raw = RawSeq {
            len: total as isize,
            data: payload.as_ptr(),
        };
        Self {
            inner: unsafe { Seq::from_raw(raw) },
        }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.inner.as_slice()
    }

    pub fn as_bstr(&self) -> &BStr {
        BStr::new(self.as_bytes())
    }

    pub fn as_raw(&self) -> RawStr {
        self.inner.as_raw()
    }

    /// Hands the payload to the caller, who now owes exactly one free.
    pub fn into_raw(self) -> RawStr {
        self.inner.into_raw()
    }

    /// # Safety
    /// `raw` must carry a live owned payload that no other owner will free.
    pub unsafe fn from_raw(raw: RawStr) -> Self {
        Self {
            inner: unsafe { Seq::from_raw(raw) },
        }
    }
}

impl From<&str> for Str {
    fn from(text: &str) -> Self {
        Self::from_bytes(text.as_bytes())
    }
}

impl fmt::Display for Str {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_bstr(), f)
    }
}

impl fmt::Debug for Str {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_bstr(), f)
    }
}

#[cfg(test)]
mod tests {
    use super::Str;

    #[test]
    fn join_concatenates_without_separator() {
        let joined = Str::join(b"hello, ", b"world");
        assert_eq!(joined.len(), 12);
        assert_eq!(joined.as_bytes(), b"hello, world");
    }

    #[test]
    fn join_length_is_sum_of_inputs() {
        let a = b"abc";
        let b = b"defgh";
        let joined = Str::join(a, b);
        assert_eq!(joined.len(), a.len() + b.len());
    }

    #[test]
    fn join_with_empty_side_copies_the_other() {
        assert_eq!(Str::join(b"", b"tail").as_bytes(), b"tail");
        assert_eq!(Str::join(b"head", b"").as_bytes(), b"head");
        assert!(Str::join(b"", b"").is_empty());
    }

    #[test]
    fn courtesy_nul_sits_past_len() {
        let text = Str::from_bytes(b"abc");
        let raw = text.as_raw();
        unsafe {
            assert_eq!((*raw.data).capacity, 4);
            assert_eq!(*raw.elem_ptr(3), 0);
        }
        assert_eq!(text.len(), 3);
    }

    #[test]
    fn value_equality_is_content_equality() {
        let a = Str::from("same");
        let b = Str::from_bytes(b"same");
        assert_ne!(a.as_raw().data, b.as_raw().data);
        assert_eq!(a, b);
    }

    #[test]
    fn display_tolerates_non_utf8() {
        let text = Str::from_bytes(&[b'o', b'k', 0xFF]);
        assert!(!format!("{text}").is_empty());
    }
}
