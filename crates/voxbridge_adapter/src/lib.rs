//! Call adapter and marshalling boundary.
//!
//! [`EngineAdapter`] owns one loaded engine library and the four opaque
//! handle tables, and exposes every historical operation both as a typed
//! method and through the string-keyed [`EngineAdapter::invoke`] dispatch
//! used by scripting hosts. Arguments arrive as [`Value`]s, are converted to
//! the selected generation's native representation, and results come back as
//! a [`Reply`] carrying the engine's own result code or success flag
//! verbatim.

pub mod adapter;
pub mod args;
pub mod dispatch;
pub mod error;
mod ops_legacy;
mod ops_v0_14;
mod ops_v0_16;
pub mod uuid;
pub mod value;

pub use adapter::EngineAdapter;
pub use args::{CallArgs, MarshalError};
pub use dispatch::OPERATIONS;
pub use error::AdapterError;
pub use uuid::{format_uuid, parse_uuid};
pub use value::{Reply, Value};
