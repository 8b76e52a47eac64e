//! Purpose: Define the stable public Rust API boundary for Marrow.
//! Exports: Owning container handles, hooks, config, and errors.
//! Role: Public, additive-only surface; Rust consumers stay off the raw headers.
//! Invariants: Owning handles (`Str`, `Seq`, `Box<Record>`) free their payload
//! exactly once; aliasing and double-free exist only at the C edge.

pub use crate::core::config::{Config, LOG_ENV, init, init_from_env};
pub use crate::core::error::{Error, ErrorKind};
pub use crate::core::hooks::{
    FLOAT_HOOK, FloatHook, Hook, INT_HOOK, IntHook, SEQ_F64_HOOK, SeqF64Hook,
};
pub use crate::core::opaque::RawOpaqueSeq;
pub use crate::core::record::Record;
pub use crate::core::seq::{RawSeq, Seq};
pub use crate::core::string::{RawStr, Str};
