//! Purpose: Caller-overridable callback slots the native side invokes.
//! Exports: `Hook`, hook signatures, the process-wide slots.
//! Invariants: One slot per signature; reassignment is a full replace.
//! Invariants: Set/get are lock-serialized, so a concurrent replace is
//! last-write-wins rather than undefined behavior.

use std::sync::{Mutex, PoisonError};

use crate::core::seq::{RawSeq, Seq};

pub type IntHook = extern "C" fn(isize) -> isize;
pub type FloatHook = extern "C" fn(f64) -> f64;

/// Sequence hook contract: the argument is borrowed for the duration of the
/// call; the return value is a fresh owned sequence the caller must free.
pub type SeqF64Hook = extern "C" fn(RawSeq<f64>) -> RawSeq<f64>;

/// A single mutable slot holding a function pointer, populated with the
/// native default at compile time. There is no registration list; `replace`
/// overwrites whatever was there, and `reset` restores the default.
pub struct Hook<F: Copy> {
    default: F,
    slot: Mutex<F>,
}

impl<F: Copy> Hook<F> {
    pub const fn new(default: F) -> Self {
        Self {
            default,
            slot: Mutex::new(default),
        }
    }

    pub fn replace(&self, hook: F) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = hook;
    }

    pub fn reset(&self) {
        self.replace(self.default);
    }

    /// The slot value right now. Invocation sites read this synchronously and
    /// call through whatever it returns.
    pub fn current(&self) -> F {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

pub static INT_HOOK: Hook<IntHook> = Hook::new(echo_int);
pub static FLOAT_HOOK: Hook<FloatHook> = Hook::new(echo_float);
pub static SEQ_F64_HOOK: Hook<SeqF64Hook> = Hook::new(copy_seq_f64);

extern "C" fn echo_int(value: isize) -> isize {
    value
}

extern "C" fn echo_float(value: f64) -> f64 {
    value
}

/// Default sequence hook: identity over values, fresh payload. The caller
/// frees argument and result independently, so the argument header is never
/// echoed back.
extern "C" fn copy_seq_f64(seq: RawSeq<f64>) -> RawSeq<f64> {
    let elems = unsafe { seq.as_slice() };
    Seq::from_slice(elems).into_raw()
}

#[cfg(test)]
mod tests {
    use super::{FLOAT_HOOK, Hook, INT_HOOK, IntHook, SEQ_F64_HOOK};
    use crate::core::seq::{RawSeq, Seq};

    extern "C" fn double_it(value: isize) -> isize {
        value * 2
    }

    #[test]
    fn defaults_are_identity() {
        assert_eq!((INT_HOOK.current())(100), 100);
        assert_eq!((FLOAT_HOOK.current())(100.0), 100.0);
    }

    #[test]
    fn replace_swaps_the_whole_slot() {
        let hook: Hook<IntHook> = Hook::new(super::echo_int);
        hook.replace(double_it);
        assert_eq!((hook.current())(5), 10);
        hook.reset();
        assert_eq!((hook.current())(5), 5);
    }

    #[test]
    fn default_seq_hook_returns_fresh_payload() {
        let input = Seq::from_slice(&[1.0f64, 2.0, 3.0, 4.0]);
        let output = unsafe { Seq::from_raw((SEQ_F64_HOOK.current())(input.as_raw())) };
        assert_ne!(input.as_raw().data, output.as_raw().data);
        assert!(unsafe { RawSeq::value_eq(input.as_raw(), output.as_raw()) });
    }
}
