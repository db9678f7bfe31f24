//! ABI generation set for VOICEVOX-family engine libraries.
//!
//! Each historical engine release line gets its own module fixing three
//! things: the foreign symbol name of every operation, the exact `#[repr(C)]`
//! layouts it expects, and its result convention. The generations are
//! mutually incompatible and are never mixed within one call:
//!
//! | module   | surface                               | result convention              |
//! |----------|---------------------------------------|--------------------------------|
//! | [`v0_5`] | global-state core, `long` scalars     | bool + `last_error_message`    |
//! | [`v0_8`] | global-state core, `int64_t` scalars  | bool + `last_error_message`    |
//! | [`v0_10`]| adds threaded init, `finalize`        | bool + `last_error_message`    |
//! | [`v0_12`]| first `voicevox_*` surface            | result code (+ bool legacy)    |
//! | [`v0_14`]| option structs, paired free functions | result code                    |
//! | [`v0_15`]| accent-phrase pipeline                | result code                    |
//! | [`v0_16`]| handle-based objects, user dictionary | result code                    |
//!
//! In the v0.5–v0.12 modules a missing symbol terminates the process, the
//! behaviour callers of those release lines depend on; from v0.14 on it is a
//! recoverable [`voxbridge_loader::LoaderError::SymbolNotFound`].

pub mod raw;
pub mod v0_5;
pub mod v0_8;
pub mod v0_10;
pub mod v0_12;
pub mod v0_14;
pub mod v0_15;
pub mod v0_16;

pub use raw::{
    AccelerationMode, AccentPhrasesOptionsV15, AudioQueryOptionsV14, InitializeOptionsV14,
    InitializeOptionsV16, OpenJtalkRc, ResultCode, StyleId, Synthesizer, SynthesisOptions,
    TtsOptionsV14, TtsOptionsV16, UserDict, UserDictWordType, UserDictWordV16, VoiceModel,
    RESULT_OK,
};
