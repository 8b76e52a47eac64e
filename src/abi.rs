//! Purpose: C ABI surface for runtime-less callers (libmarrow).
//! Exports: C-callable container, record, and hook functions under the `mrw_` prefix.
//! Invariants: Container headers cross by value; payloads only by reference.
//! Invariants: Every owned return value maps to exactly one matching free function.
//! Invariants: Free functions tolerate null/empty payloads; nothing else is guarded.
//! Notes: Declarations for callers live in `include/marrow.h`.
#![allow(non_camel_case_types)]

use std::ffi::CStr;
use std::slice;

use libc::c_char;
use tracing::{debug, trace, warn};

use crate::api::{
    self, Config, FLOAT_HOOK, FloatHook, INT_HOOK, IntHook, RawOpaqueSeq, RawSeq, Record,
    SEQ_F64_HOOK, Seq, SeqF64Hook, Str,
};

pub type mrw_str = RawSeq<u8>;
pub type mrw_seq_f64 = RawSeq<f64>;
pub type mrw_opaque_seq = RawOpaqueSeq;
pub type mrw_record = Record;

/// One-time process setup for callers with no Rust main: reads `MARROW_LOG`
/// and installs the tracing subscriber. Safe to call more than once; a bad
/// filter falls back to defaults instead of failing the caller.
#[unsafe(no_mangle)]
pub extern "C" fn mrw_startup() {
    match Config::from_env() {
        Ok(ready) => api::init(&ready),
        Err(err) => {
            api::init(&Config::default());
            warn!("startup configuration rejected: {err}");
        }
    }
    debug!("marrow ABI ready");
}

#[unsafe(no_mangle)]
pub extern "C" fn mrw_hello_world(msg: *const c_char) {
    if msg.is_null() {
        return;
    }
    let text = unsafe { CStr::from_ptr(msg) };
    println!("{}", text.to_string_lossy());
}

#[unsafe(no_mangle)]
pub extern "C" fn mrw_do_thing(a: isize, b: isize) -> isize {
    a + b
}

// ---- strings ---------------------------------------------------------------

#[unsafe(no_mangle)]
pub extern "C" fn mrw_str_new(data: *const u8, len: isize) -> mrw_str {
    Str::from_bytes(source_slice(data, len)).into_raw()
}

/// Joins two C strings into one owned dynamic string, no separator inserted.
#[unsafe(no_mangle)]
pub extern "C" fn mrw_str_join(a: *const c_char, b: *const c_char) -> mrw_str {
    let joined = Str::join(cstr_bytes(a), cstr_bytes(b));
    trace!(len = joined.len(), "str joined");
    joined.into_raw()
}

#[unsafe(no_mangle)]
pub extern "C" fn mrw_str_cmp(a: mrw_str, b: mrw_str) -> bool {
    unsafe { RawSeq::value_eq(a, b) }
}

/// Releases the payload behind `s`. Call exactly once per owned string; the
/// caller's header copy is dangling afterwards.
#[unsafe(no_mangle)]
pub extern "C" fn mrw_str_free(s: mrw_str) {
    if s.data.is_null() {
        return;
    }
    trace!(len = s.len, "str freed");
    drop(unsafe { Str::from_raw(s) });
}

// ---- float sequences -------------------------------------------------------

#[unsafe(no_mangle)]
pub extern "C" fn mrw_seq_f64_new(data: *const f64, len: isize) -> mrw_seq_f64 {
    Seq::from_slice(source_slice(data, len)).into_raw()
}

#[unsafe(no_mangle)]
pub extern "C" fn mrw_seq_f64_cmp(a: mrw_seq_f64, b: mrw_seq_f64) -> bool {
    unsafe { RawSeq::value_eq(a, b) }
}

#[unsafe(no_mangle)]
pub extern "C" fn mrw_seq_f64_free(s: mrw_seq_f64) {
    if s.data.is_null() {
        return;
    }
    trace!(len = s.len, "seq_f64 freed");
    drop(unsafe { Seq::from_raw(s) });
}

// ---- opaque integer sequences ----------------------------------------------

// The element layout stays on this side of the boundary; callers operate
// through this bundle only. Index contracts are unchecked; out-of-range
// access is undefined (see include/marrow.h).

#[unsafe(no_mangle)]
pub extern "C" fn mrw_opaque_seq_int_new(data: *const isize, len: isize) -> mrw_opaque_seq {
    RawOpaqueSeq::erase(Seq::from_slice(source_slice(data, len)).into_raw())
}

/// Element read, no bounds check: `0 <= i < s.len` is the caller's contract.
#[unsafe(no_mangle)]
pub extern "C" fn mrw_opaque_seq_int_index(s: mrw_opaque_seq, i: isize) -> isize {
    unsafe { *s.typed::<isize>().elem_ptr(i) }
}

/// Mutable element reference, no bounds check. Valid until the sequence is
/// freed; nothing exported here ever reallocates the payload.
#[unsafe(no_mangle)]
pub extern "C" fn mrw_opaque_seq_int_index_mut(s: *mut mrw_opaque_seq, i: isize) -> *mut isize {
    unsafe { (*s).typed::<isize>().elem_ptr(i) }
}

/// In-place overwrite, no bounds check.
#[unsafe(no_mangle)]
pub extern "C" fn mrw_opaque_seq_int_assign(s: *mut mrw_opaque_seq, i: isize, value: isize) {
    unsafe { *(*s).typed::<isize>().elem_ptr(i) = value };
}

#[unsafe(no_mangle)]
pub extern "C" fn mrw_opaque_seq_int_cmp(a: mrw_opaque_seq, b: mrw_opaque_seq) -> bool {
    unsafe { RawSeq::value_eq(a.typed::<isize>(), b.typed::<isize>()) }
}

/// Single-use: the sequence is consumed and must not be freed again. There is
/// no consumed flag; stale header copies keep the old pointer.
#[unsafe(no_mangle)]
pub extern "C" fn mrw_opaque_seq_int_free(s: mrw_opaque_seq) {
    let typed = unsafe { s.typed::<isize>() };
    if typed.data.is_null() {
        return;
    }
    trace!(len = typed.len, "opaque_seq_int freed");
    drop(unsafe { Seq::from_raw(typed) });
}

// ---- records ---------------------------------------------------------------

#[unsafe(no_mangle)]
pub extern "C" fn mrw_record_new(value: isize) -> *mut mrw_record {
    trace!(value, "record allocated");
    Box::into_raw(Record::new(value))
}

/// Frees the record and, before the block itself, the string payload it owns.
#[unsafe(no_mangle)]
pub extern "C" fn mrw_record_free(record: *mut mrw_record) {
    if record.is_null() {
        return;
    }
    drop(unsafe { Box::from_raw(record) });
}

// ---- hooks -----------------------------------------------------------------

// Passing a null function pointer to a setter restores the native default.

#[unsafe(no_mangle)]
pub extern "C" fn mrw_set_int_hook(hook: Option<IntHook>) {
    match hook {
        Some(hook) => INT_HOOK.replace(hook),
        None => INT_HOOK.reset(),
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn mrw_set_float_hook(hook: Option<FloatHook>) {
    match hook {
        Some(hook) => FLOAT_HOOK.replace(hook),
        None => FLOAT_HOOK.reset(),
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn mrw_set_seq_f64_hook(hook: Option<SeqF64Hook>) {
    match hook {
        Some(hook) => SEQ_F64_HOOK.replace(hook),
        None => SEQ_F64_HOOK.reset(),
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn mrw_run_int_hook(value: isize) -> isize {
    (INT_HOOK.current())(value)
}

#[unsafe(no_mangle)]
pub extern "C" fn mrw_run_float_hook(value: f64) -> f64 {
    (FLOAT_HOOK.current())(value)
}

/// Invokes the sequence hook. The argument stays caller-owned; the returned
/// sequence is a fresh owned value the caller must free.
#[unsafe(no_mangle)]
pub extern "C" fn mrw_run_seq_f64_hook(s: mrw_seq_f64) -> mrw_seq_f64 {
    (SEQ_F64_HOOK.current())(s)
}

// ---- edge helpers ----------------------------------------------------------

fn source_slice<'a, T>(data: *const T, len: isize) -> &'a [T] {
    if data.is_null() || len <= 0 {
        if data.is_null() && len > 0 {
            warn!(len, "null source pointer treated as empty");
        }
        return &[];
    }
    unsafe { slice::from_raw_parts(data, len as usize) }
}

fn cstr_bytes<'a>(ptr: *const c_char) -> &'a [u8] {
    if ptr.is_null() {
        return &[];
    }
    unsafe { CStr::from_ptr(ptr) }.to_bytes()
}
