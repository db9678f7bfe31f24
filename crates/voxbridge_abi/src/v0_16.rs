//! v0.16 call table: handle-based objects.
//!
//! This release line replaced the global-state engine with reference-counted
//! objects (text analyzer, user dictionary, voice model, synthesizer) that are
//! constructed and destructed through dedicated entry points. All operations
//! report an integer result code; a missing symbol is recoverable.
//!
//! Every function here is a thin trampoline: resolve the exact symbol name
//! with the exact v0.16 signature, then call it. No marshalling happens at
//! this layer.

use std::os::raw::c_char;

use voxbridge_loader::{EngineLibrary, LoaderError, resolver};

use crate::raw::{
    InitializeOptionsV16, OpenJtalkRc, ResultCode, StyleId, SynthesisOptions, Synthesizer,
    TtsOptionsV16, UserDict, UserDictWordV16, VoiceModel,
};

/// # Safety
/// `open_jtalk_dic_dir` must be NUL-terminated; `out_open_jtalk` must be a
/// valid out-pointer.
pub unsafe fn open_jtalk_rc_new(
    lib: &EngineLibrary,
    open_jtalk_dic_dir: *const c_char,
    out_open_jtalk: *mut *mut OpenJtalkRc,
) -> Result<ResultCode, LoaderError> {
    type F = unsafe extern "C" fn(*const c_char, *mut *mut OpenJtalkRc) -> ResultCode;
    let f = unsafe { resolver::resolve::<F>(lib, "voicevox_open_jtalk_rc_new")? };
    Ok(unsafe { f(open_jtalk_dic_dir, out_open_jtalk) })
}

/// # Safety
/// Both pointers must be live objects produced by this library.
pub unsafe fn open_jtalk_rc_use_user_dict(
    lib: &EngineLibrary,
    open_jtalk: *const OpenJtalkRc,
    user_dict: *const UserDict,
) -> Result<ResultCode, LoaderError> {
    type F = unsafe extern "C" fn(*const OpenJtalkRc, *const UserDict) -> ResultCode;
    let f = unsafe { resolver::resolve::<F>(lib, "voicevox_open_jtalk_rc_use_user_dict")? };
    Ok(unsafe { f(open_jtalk, user_dict) })
}

/// # Safety
/// `open_jtalk` must be live and is invalid after this call.
pub unsafe fn open_jtalk_rc_delete(
    lib: &EngineLibrary,
    open_jtalk: *mut OpenJtalkRc,
) -> Result<(), LoaderError> {
    type F = unsafe extern "C" fn(*mut OpenJtalkRc);
    let f = unsafe { resolver::resolve::<F>(lib, "voicevox_open_jtalk_rc_delete")? };
    unsafe { f(open_jtalk) };
    Ok(())
}

/// # Safety
/// The loaded library must be a v0.16-line engine.
pub unsafe fn make_default_initialize_options(
    lib: &EngineLibrary,
) -> Result<InitializeOptionsV16, LoaderError> {
    type F = unsafe extern "C" fn() -> InitializeOptionsV16;
    let f = unsafe { resolver::resolve::<F>(lib, "voicevox_make_default_initialize_options")? };
    Ok(unsafe { f() })
}

/// # Safety
/// `path` must be NUL-terminated; `out_model` must be a valid out-pointer.
pub unsafe fn voice_model_new_from_path(
    lib: &EngineLibrary,
    path: *const c_char,
    out_model: *mut *mut VoiceModel,
) -> Result<ResultCode, LoaderError> {
    type F = unsafe extern "C" fn(*const c_char, *mut *mut VoiceModel) -> ResultCode;
    let f = unsafe { resolver::resolve::<F>(lib, "voicevox_voice_model_new_from_path")? };
    Ok(unsafe { f(path, out_model) })
}

/// Returns a borrowed id string owned by the model; do not free it.
///
/// # Safety
/// `model` must be live.
pub unsafe fn voice_model_id(
    lib: &EngineLibrary,
    model: *const VoiceModel,
) -> Result<*const c_char, LoaderError> {
    type F = unsafe extern "C" fn(*const VoiceModel) -> *const c_char;
    let f = unsafe { resolver::resolve::<F>(lib, "voicevox_voice_model_id")? };
    Ok(unsafe { f(model) })
}

/// Returns a borrowed JSON string owned by the model; do not free it.
///
/// # Safety
/// `model` must be live.
pub unsafe fn voice_model_get_metas_json(
    lib: &EngineLibrary,
    model: *const VoiceModel,
) -> Result<*const c_char, LoaderError> {
    type F = unsafe extern "C" fn(*const VoiceModel) -> *const c_char;
    let f = unsafe { resolver::resolve::<F>(lib, "voicevox_voice_model_get_metas_json")? };
    Ok(unsafe { f(model) })
}

/// # Safety
/// `model` must be live and is invalid after this call.
pub unsafe fn voice_model_delete(
    lib: &EngineLibrary,
    model: *mut VoiceModel,
) -> Result<(), LoaderError> {
    type F = unsafe extern "C" fn(*mut VoiceModel);
    let f = unsafe { resolver::resolve::<F>(lib, "voicevox_voice_model_delete")? };
    unsafe { f(model) };
    Ok(())
}

/// # Safety
/// `open_jtalk` must be live; `out_synthesizer` must be a valid out-pointer.
pub unsafe fn synthesizer_new(
    lib: &EngineLibrary,
    open_jtalk: *const OpenJtalkRc,
    options: InitializeOptionsV16,
    out_synthesizer: *mut *mut Synthesizer,
) -> Result<ResultCode, LoaderError> {
    type F = unsafe extern "C" fn(
        *const OpenJtalkRc,
        InitializeOptionsV16,
        *mut *mut Synthesizer,
    ) -> ResultCode;
    let f = unsafe { resolver::resolve::<F>(lib, "voicevox_synthesizer_new")? };
    Ok(unsafe { f(open_jtalk, options, out_synthesizer) })
}

/// # Safety
/// `synthesizer` must be live and is invalid after this call.
pub unsafe fn synthesizer_delete(
    lib: &EngineLibrary,
    synthesizer: *mut Synthesizer,
) -> Result<(), LoaderError> {
    type F = unsafe extern "C" fn(*mut Synthesizer);
    let f = unsafe { resolver::resolve::<F>(lib, "voicevox_synthesizer_delete")? };
    unsafe { f(synthesizer) };
    Ok(())
}

/// # Safety
/// Both pointers must be live objects produced by this library.
pub unsafe fn synthesizer_load_voice_model(
    lib: &EngineLibrary,
    synthesizer: *const Synthesizer,
    model: *const VoiceModel,
) -> Result<ResultCode, LoaderError> {
    type F = unsafe extern "C" fn(*const Synthesizer, *const VoiceModel) -> ResultCode;
    let f = unsafe { resolver::resolve::<F>(lib, "voicevox_synthesizer_load_voice_model")? };
    Ok(unsafe { f(synthesizer, model) })
}

/// # Safety
/// `synthesizer` must be live; `model_id` must be NUL-terminated.
pub unsafe fn synthesizer_unload_voice_model(
    lib: &EngineLibrary,
    synthesizer: *const Synthesizer,
    model_id: *const c_char,
) -> Result<ResultCode, LoaderError> {
    type F = unsafe extern "C" fn(*const Synthesizer, *const c_char) -> ResultCode;
    let f = unsafe { resolver::resolve::<F>(lib, "voicevox_synthesizer_unload_voice_model")? };
    Ok(unsafe { f(synthesizer, model_id) })
}

/// # Safety
/// `synthesizer` must be live.
pub unsafe fn synthesizer_is_gpu_mode(
    lib: &EngineLibrary,
    synthesizer: *const Synthesizer,
) -> Result<bool, LoaderError> {
    type F = unsafe extern "C" fn(*const Synthesizer) -> bool;
    let f = unsafe { resolver::resolve::<F>(lib, "voicevox_synthesizer_is_gpu_mode")? };
    Ok(unsafe { f(synthesizer) })
}

/// # Safety
/// `synthesizer` must be live; `model_id` must be NUL-terminated.
pub unsafe fn synthesizer_is_loaded_voice_model(
    lib: &EngineLibrary,
    synthesizer: *const Synthesizer,
    model_id: *const c_char,
) -> Result<bool, LoaderError> {
    type F = unsafe extern "C" fn(*const Synthesizer, *const c_char) -> bool;
    let f = unsafe { resolver::resolve::<F>(lib, "voicevox_synthesizer_is_loaded_voice_model")? };
    Ok(unsafe { f(synthesizer, model_id) })
}

/// Returns an engine-allocated JSON string; release it with [`json_free`].
///
/// # Safety
/// `synthesizer` must be live.
pub unsafe fn synthesizer_create_metas_json(
    lib: &EngineLibrary,
    synthesizer: *const Synthesizer,
) -> Result<*mut c_char, LoaderError> {
    type F = unsafe extern "C" fn(*const Synthesizer) -> *mut c_char;
    let f = unsafe { resolver::resolve::<F>(lib, "voicevox_synthesizer_create_metas_json")? };
    Ok(unsafe { f(synthesizer) })
}

/// # Safety
/// `output_supported_devices_json` must be a valid out-pointer; on success the
/// engine-allocated string must be released with [`json_free`].
pub unsafe fn create_supported_devices_json(
    lib: &EngineLibrary,
    output_supported_devices_json: *mut *mut c_char,
) -> Result<ResultCode, LoaderError> {
    type F = unsafe extern "C" fn(*mut *mut c_char) -> ResultCode;
    let f = unsafe { resolver::resolve::<F>(lib, "voicevox_create_supported_devices_json")? };
    Ok(unsafe { f(output_supported_devices_json) })
}

macro_rules! synthesizer_json_op {
    ($(#[$doc:meta])* $name:ident, $symbol:literal) => {
        $(#[$doc])*
        /// # Safety
        /// `synthesizer` must be live, the input string NUL-terminated, and
        /// the out-pointer valid; on success release the output with
        /// [`json_free`].
        pub unsafe fn $name(
            lib: &EngineLibrary,
            synthesizer: *const Synthesizer,
            input: *const c_char,
            style_id: StyleId,
            output_json: *mut *mut c_char,
        ) -> Result<ResultCode, LoaderError> {
            type F = unsafe extern "C" fn(
                *const Synthesizer,
                *const c_char,
                StyleId,
                *mut *mut c_char,
            ) -> ResultCode;
            let f = unsafe { resolver::resolve::<F>(lib, $symbol)? };
            Ok(unsafe { f(synthesizer, input, style_id, output_json) })
        }
    };
}

synthesizer_json_op!(
    /// AudioQuery from AquesTalk-style kana notation.
    synthesizer_create_audio_query_from_kana,
    "voicevox_synthesizer_create_audio_query_from_kana"
);
synthesizer_json_op!(
    /// AudioQuery from Japanese text.
    synthesizer_create_audio_query,
    "voicevox_synthesizer_create_audio_query"
);
synthesizer_json_op!(
    /// Accent phrases from AquesTalk-style kana notation.
    synthesizer_create_accent_phrases_from_kana,
    "voicevox_synthesizer_create_accent_phrases_from_kana"
);
synthesizer_json_op!(
    /// Accent phrases from Japanese text.
    synthesizer_create_accent_phrases,
    "voicevox_synthesizer_create_accent_phrases"
);
synthesizer_json_op!(
    /// Regenerate pitch and length of the given accent phrases.
    synthesizer_replace_mora_data,
    "voicevox_synthesizer_replace_mora_data"
);
synthesizer_json_op!(
    /// Regenerate phoneme lengths of the given accent phrases.
    synthesizer_replace_phoneme_length,
    "voicevox_synthesizer_replace_phoneme_length"
);
synthesizer_json_op!(
    /// Regenerate mora pitches of the given accent phrases.
    synthesizer_replace_mora_pitch,
    "voicevox_synthesizer_replace_mora_pitch"
);

/// # Safety
/// The loaded library must be a v0.16-line engine.
pub unsafe fn make_default_synthesis_options(
    lib: &EngineLibrary,
) -> Result<SynthesisOptions, LoaderError> {
    type F = unsafe extern "C" fn() -> SynthesisOptions;
    let f = unsafe { resolver::resolve::<F>(lib, "voicevox_make_default_synthesis_options")? };
    Ok(unsafe { f() })
}

/// # Safety
/// `synthesizer` must be live, `audio_query_json` NUL-terminated, and both
/// out-pointers valid; on success release the wave with [`wav_free`].
pub unsafe fn synthesizer_synthesis(
    lib: &EngineLibrary,
    synthesizer: *const Synthesizer,
    audio_query_json: *const c_char,
    style_id: StyleId,
    options: SynthesisOptions,
    output_wav_length: *mut usize,
    output_wav: *mut *mut u8,
) -> Result<ResultCode, LoaderError> {
    type F = unsafe extern "C" fn(
        *const Synthesizer,
        *const c_char,
        StyleId,
        SynthesisOptions,
        *mut usize,
        *mut *mut u8,
    ) -> ResultCode;
    let f = unsafe { resolver::resolve::<F>(lib, "voicevox_synthesizer_synthesis")? };
    Ok(unsafe { f(synthesizer, audio_query_json, style_id, options, output_wav_length, output_wav) })
}

/// # Safety
/// The loaded library must be a v0.16-line engine.
pub unsafe fn make_default_tts_options(lib: &EngineLibrary) -> Result<TtsOptionsV16, LoaderError> {
    type F = unsafe extern "C" fn() -> TtsOptionsV16;
    let f = unsafe { resolver::resolve::<F>(lib, "voicevox_make_default_tts_options")? };
    Ok(unsafe { f() })
}

macro_rules! synthesizer_tts_op {
    ($(#[$doc:meta])* $name:ident, $symbol:literal) => {
        $(#[$doc])*
        /// # Safety
        /// `synthesizer` must be live, the input string NUL-terminated, and
        /// both out-pointers valid; on success release the wave with
        /// [`wav_free`].
        pub unsafe fn $name(
            lib: &EngineLibrary,
            synthesizer: *const Synthesizer,
            input: *const c_char,
            style_id: StyleId,
            options: TtsOptionsV16,
            output_wav_length: *mut usize,
            output_wav: *mut *mut u8,
        ) -> Result<ResultCode, LoaderError> {
            type F = unsafe extern "C" fn(
                *const Synthesizer,
                *const c_char,
                StyleId,
                TtsOptionsV16,
                *mut usize,
                *mut *mut u8,
            ) -> ResultCode;
            let f = unsafe { resolver::resolve::<F>(lib, $symbol)? };
            Ok(unsafe { f(synthesizer, input, style_id, options, output_wav_length, output_wav) })
        }
    };
}

synthesizer_tts_op!(
    /// Text-to-speech from AquesTalk-style kana notation.
    synthesizer_tts_from_kana,
    "voicevox_synthesizer_tts_from_kana"
);
synthesizer_tts_op!(
    /// Text-to-speech from Japanese text.
    synthesizer_tts,
    "voicevox_synthesizer_tts"
);

/// # Safety
/// `json` must be an engine-allocated string not yet freed.
pub unsafe fn json_free(lib: &EngineLibrary, json: *mut c_char) -> Result<(), LoaderError> {
    type F = unsafe extern "C" fn(*mut c_char);
    let f = unsafe { resolver::resolve::<F>(lib, "voicevox_json_free")? };
    unsafe { f(json) };
    Ok(())
}

/// # Safety
/// `wav` must be an engine-allocated buffer not yet freed.
pub unsafe fn wav_free(lib: &EngineLibrary, wav: *mut u8) -> Result<(), LoaderError> {
    type F = unsafe extern "C" fn(*mut u8);
    let f = unsafe { resolver::resolve::<F>(lib, "voicevox_wav_free")? };
    unsafe { f(wav) };
    Ok(())
}

/// Build a word with engine defaults for the fields not passed here.
///
/// # Safety
/// `surface` and `pronunciation` must be NUL-terminated and outlive every use
/// of the returned struct, which borrows both pointers.
pub unsafe fn user_dict_word_make(
    lib: &EngineLibrary,
    surface: *const c_char,
    pronunciation: *const c_char,
) -> Result<UserDictWordV16, LoaderError> {
    type F = unsafe extern "C" fn(*const c_char, *const c_char) -> UserDictWordV16;
    let f = unsafe { resolver::resolve::<F>(lib, "voicevox_user_dict_word_make")? };
    Ok(unsafe { f(surface, pronunciation) })
}

/// # Safety
/// The loaded library must be a v0.16-line engine.
pub unsafe fn user_dict_new(lib: &EngineLibrary) -> Result<*mut UserDict, LoaderError> {
    type F = unsafe extern "C" fn() -> *mut UserDict;
    let f = unsafe { resolver::resolve::<F>(lib, "voicevox_user_dict_new")? };
    Ok(unsafe { f() })
}

/// # Safety
/// `user_dict` must be live; `dict_path` must be NUL-terminated.
pub unsafe fn user_dict_load(
    lib: &EngineLibrary,
    user_dict: *const UserDict,
    dict_path: *const c_char,
) -> Result<ResultCode, LoaderError> {
    type F = unsafe extern "C" fn(*const UserDict, *const c_char) -> ResultCode;
    let f = unsafe { resolver::resolve::<F>(lib, "voicevox_user_dict_load")? };
    Ok(unsafe { f(user_dict, dict_path) })
}

/// # Safety
/// `user_dict` and `word` must be live; `output_word_uuid` must point to 16
/// writable bytes.
pub unsafe fn user_dict_add_word(
    lib: &EngineLibrary,
    user_dict: *const UserDict,
    word: *const UserDictWordV16,
    output_word_uuid: *mut [u8; 16],
) -> Result<ResultCode, LoaderError> {
    type F =
        unsafe extern "C" fn(*const UserDict, *const UserDictWordV16, *mut [u8; 16]) -> ResultCode;
    let f = unsafe { resolver::resolve::<F>(lib, "voicevox_user_dict_add_word")? };
    Ok(unsafe { f(user_dict, word, output_word_uuid) })
}

/// # Safety
/// `user_dict` and `word` must be live; `word_uuid` must point to 16 readable
/// bytes.
pub unsafe fn user_dict_update_word(
    lib: &EngineLibrary,
    user_dict: *const UserDict,
    word_uuid: *const [u8; 16],
    word: *const UserDictWordV16,
) -> Result<ResultCode, LoaderError> {
    type F = unsafe extern "C" fn(
        *const UserDict,
        *const [u8; 16],
        *const UserDictWordV16,
    ) -> ResultCode;
    let f = unsafe { resolver::resolve::<F>(lib, "voicevox_user_dict_update_word")? };
    Ok(unsafe { f(user_dict, word_uuid, word) })
}

/// # Safety
/// `user_dict` must be live; `word_uuid` must point to 16 readable bytes.
pub unsafe fn user_dict_remove_word(
    lib: &EngineLibrary,
    user_dict: *const UserDict,
    word_uuid: *const [u8; 16],
) -> Result<ResultCode, LoaderError> {
    type F = unsafe extern "C" fn(*const UserDict, *const [u8; 16]) -> ResultCode;
    let f = unsafe { resolver::resolve::<F>(lib, "voicevox_user_dict_remove_word")? };
    Ok(unsafe { f(user_dict, word_uuid) })
}

/// # Safety
/// `user_dict` must be live; on success release the output with [`json_free`].
pub unsafe fn user_dict_to_json(
    lib: &EngineLibrary,
    user_dict: *const UserDict,
    output_json: *mut *mut c_char,
) -> Result<ResultCode, LoaderError> {
    type F = unsafe extern "C" fn(*const UserDict, *mut *mut c_char) -> ResultCode;
    let f = unsafe { resolver::resolve::<F>(lib, "voicevox_user_dict_to_json")? };
    Ok(unsafe { f(user_dict, output_json) })
}

/// # Safety
/// Both dictionaries must be live.
pub unsafe fn user_dict_import(
    lib: &EngineLibrary,
    user_dict: *const UserDict,
    other_dict: *const UserDict,
) -> Result<ResultCode, LoaderError> {
    type F = unsafe extern "C" fn(*const UserDict, *const UserDict) -> ResultCode;
    let f = unsafe { resolver::resolve::<F>(lib, "voicevox_user_dict_import")? };
    Ok(unsafe { f(user_dict, other_dict) })
}

/// # Safety
/// `user_dict` must be live; `path` must be NUL-terminated.
pub unsafe fn user_dict_save(
    lib: &EngineLibrary,
    user_dict: *const UserDict,
    path: *const c_char,
) -> Result<ResultCode, LoaderError> {
    type F = unsafe extern "C" fn(*const UserDict, *const c_char) -> ResultCode;
    let f = unsafe { resolver::resolve::<F>(lib, "voicevox_user_dict_save")? };
    Ok(unsafe { f(user_dict, path) })
}

/// # Safety
/// `user_dict` must be live and is invalid after this call.
pub unsafe fn user_dict_delete(
    lib: &EngineLibrary,
    user_dict: *mut UserDict,
) -> Result<(), LoaderError> {
    type F = unsafe extern "C" fn(*mut UserDict);
    let f = unsafe { resolver::resolve::<F>(lib, "voicevox_user_dict_delete")? };
    unsafe { f(user_dict) };
    Ok(())
}
