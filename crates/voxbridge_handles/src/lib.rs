//! Opaque handle tables for foreign-owned engine resources.
//!
//! Script callers may not hold raw engine pointers across calls, so each
//! resource-producing operation stores the pointer here under a
//! caller-assigned integer key and hands the key back. A lookup of a removed
//! or unknown key fails closed instead of dereferencing freed memory.

pub mod table;

pub use table::{HandleError, HandleTable, ResourceKind};
