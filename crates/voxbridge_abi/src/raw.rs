//! Raw C-level types shared by the generation tables.
//!
//! Field order and widths reproduce the engine headers exactly; the loaded
//! library dereferences these layouts byte for byte, so nothing here may be
//! reordered or widened.

use std::marker::PhantomData;
use std::os::raw::c_char;

/// Result code returned by every `voicevox_*` operation from v0.12 on. Zero is
/// success; the meaning of any other value is looked up through the engine's
/// own `voicevox_error_result_to_message`.
pub type ResultCode = i32;

pub const RESULT_OK: ResultCode = 0;

/// Integer selecting one speaking style within a voice model.
pub type StyleId = u32;

macro_rules! opaque_type {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[repr(C)]
        pub struct $name {
            _data: [u8; 0],
            _marker: PhantomData<(*mut u8, core::marker::PhantomPinned)>,
        }
    };
}

opaque_type! {
    /// Foreign text-analyzer context (Open JTalk runtime configuration).
    OpenJtalkRc
}
opaque_type! {
    /// Foreign user dictionary.
    UserDict
}
opaque_type! {
    /// Foreign voice model, corresponding to one VVM file.
    VoiceModel
}
opaque_type! {
    /// Foreign synthesizer instance.
    Synthesizer
}

/// Hardware acceleration mode for synthesizer construction.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccelerationMode {
    Auto = 0,
    Cpu = 1,
    Gpu = 2,
}

impl AccelerationMode {
    /// Map the wire value used at the scripting boundary; out-of-range values
    /// fall back to `Auto`, matching the engine's own default.
    pub fn from_wire(value: u32) -> Self {
        match value {
            1 => AccelerationMode::Cpu,
            2 => AccelerationMode::Gpu,
            _ => AccelerationMode::Auto,
        }
    }
}

/// Word class of a user-dictionary entry.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UserDictWordType {
    ProperNoun = 0,
    CommonNoun = 1,
    Verb = 2,
    Adjective = 3,
    Suffix = 4,
}

impl UserDictWordType {
    pub fn from_wire(value: u32) -> Self {
        match value {
            1 => UserDictWordType::CommonNoun,
            2 => UserDictWordType::Verb,
            3 => UserDictWordType::Adjective,
            4 => UserDictWordType::Suffix,
            _ => UserDictWordType::ProperNoun,
        }
    }
}

/// v0.14 initialize options: global engine initialisation.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct InitializeOptionsV14 {
    pub acceleration_mode: AccelerationMode,
    pub cpu_num_threads: u16,
    pub load_all_models: bool,
    pub open_jtalk_dict_dir: *const c_char,
}

/// v0.16 initialize options: per-synthesizer construction.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct InitializeOptionsV16 {
    pub acceleration_mode: AccelerationMode,
    pub cpu_num_threads: u16,
}

/// v0.14 audio query options.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct AudioQueryOptionsV14 {
    pub kana: bool,
}

/// v0.15 accent-phrase options.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct AccentPhrasesOptionsV15 {
    pub kana: bool,
}

/// Synthesis options, identical layout in v0.14 and v0.16.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct SynthesisOptions {
    pub enable_interrogative_upspeak: bool,
}

/// v0.14 text-to-speech options.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct TtsOptionsV14 {
    pub kana: bool,
    pub enable_interrogative_upspeak: bool,
}

/// v0.16 text-to-speech options; the `kana` flag moved into dedicated
/// `*_from_kana` entry points.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct TtsOptionsV16 {
    pub enable_interrogative_upspeak: bool,
}

/// v0.16 user-dictionary word.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct UserDictWordV16 {
    pub surface: *const c_char,
    pub pronunciation: *const c_char,
    pub accent_type: usize,
    pub word_type: UserDictWordType,
    pub priority: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_mapping_defaults() {
        assert_eq!(AccelerationMode::from_wire(1), AccelerationMode::Cpu);
        assert_eq!(AccelerationMode::from_wire(99), AccelerationMode::Auto);
        assert_eq!(UserDictWordType::from_wire(4), UserDictWordType::Suffix);
        assert_eq!(UserDictWordType::from_wire(99), UserDictWordType::ProperNoun);
    }

    #[test]
    fn test_option_struct_layouts_are_stable() {
        // The engine reads these by offset; widths must not drift.
        assert_eq!(std::mem::size_of::<AccelerationMode>(), 4);
        assert_eq!(std::mem::size_of::<SynthesisOptions>(), 1);
        assert_eq!(std::mem::size_of::<TtsOptionsV14>(), 2);
        assert_eq!(std::mem::size_of::<TtsOptionsV16>(), 1);
        assert_eq!(
            std::mem::size_of::<InitializeOptionsV16>(),
            std::mem::size_of::<i32>() + std::mem::size_of::<u16>() + 2
        );
    }
}
