//! Purpose: Shared library crate behind `libmarrow` and the conformance runner.
//! Exports: `api` (Rust surface), `abi` (C surface), `core` (layout, handles, hooks, errors).
//! Role: The "native side" of the boundary; owns every payload it hands out.
//! Invariants: All container payloads flow through `core::layout`; no second allocator path.
//! Invariants: The C surface in `abi` is additive-only once published.
pub mod abi;
pub mod api;
pub mod core;
