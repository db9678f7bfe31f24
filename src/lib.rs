//! voxbridge: a runtime FFI adapter for VOICEVOX-family speech-synthesis
//! engines across every historical ABI generation.
//!
//! The engine is not linked at build time; it is a shared library opened from
//! a caller-supplied path. Over its release history the engine's C contract
//! changed repeatedly — function names, option-struct layouts, and error
//! conventions are all different between release lines — while old callers
//! kept working. voxbridge reproduces each of those contracts side by side
//! and lets the caller pick one explicitly per call.
//!
//! The layers, bottom up:
//!
//! - [`voxbridge_loader`]: opens/closes the shared library and resolves
//!   symbols into typed function pointers. The signature cast is the one
//!   irreducible safety obligation in the system and lives only there.
//! - [`voxbridge_abi`]: one call table per ABI generation (v0.5 – v0.16),
//!   fixing symbol names, `#[repr(C)]` layouts, and the generation's result
//!   convention. Legacy generations abort on a missing symbol, as their
//!   callers expect; modern ones return a recoverable error.
//! - [`voxbridge_handles`]: caller-keyed tables mapping small integers to
//!   foreign-owned pointers, so scripting callers never hold raw pointers
//!   and use-after-destruct becomes a lookup failure.
//! - [`voxbridge_adapter`]: the marshalling boundary. Reads positional
//!   [`Value`] arguments, builds the selected generation's native
//!   representation, invokes the engine, copies engine-owned buffers out and
//!   frees them through the paired free function, and hands back a [`Reply`]
//!   carrying the engine's result code or success flag verbatim.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use voxbridge::{EngineAdapter, Value};
//!
//! # fn main() -> Result<(), voxbridge::AdapterError> {
//! let adapter = EngineAdapter::new();
//! adapter.load(Path::new("./libvoicevox_core.so"))?;
//!
//! adapter.open_jtalk_rc_new_v0_16("./open_jtalk_dic_utf_8-1.11", 0)?;
//! adapter.synthesizer_new_v0_16(0, 0, 1, 0)?;
//! adapter.voice_model_new_from_path_v0_16("./model/0.vvm", 0)?;
//! adapter.synthesizer_load_voice_model_v0_16(0, 0)?;
//!
//! let query = adapter.synthesizer_create_audio_query_v0_16(0, "こんにちは", 2)?;
//! if let Some(Value::Str(json)) = query.value {
//!     let _audio = adapter.synthesizer_synthesis_v0_16(0, &json, 2, false)?;
//! }
//!
//! // The same surface is addressable by name from a scripting host:
//! adapter.invoke("synthesizer_is_gpu_mode_v0_16", &[Value::U32(0)])?;
//! adapter.unload()?;
//! # Ok(())
//! # }
//! ```

pub use voxbridge_abi as abi;
pub use voxbridge_adapter::{
    AdapterError, CallArgs, EngineAdapter, MarshalError, OPERATIONS, Reply, Value, format_uuid,
    parse_uuid,
};
pub use voxbridge_handles::{HandleError, HandleTable, ResourceKind};
pub use voxbridge_loader::{EngineLibrary, LibraryLoader, LoaderError};
pub use voxbridge_utils::init_logging;
