//! v0.14 call table: global-state engine with option structs.
//!
//! The engine is still a process-wide singleton (`voicevox_initialize` /
//! `voicevox_finalize`), but every operation reports an integer result code
//! and output buffers have paired free functions. A missing symbol is
//! recoverable from this generation onward.

use std::os::raw::c_char;

use voxbridge_loader::{EngineLibrary, LoaderError, resolver};

use crate::raw::{AudioQueryOptionsV14, InitializeOptionsV14, ResultCode, SynthesisOptions, TtsOptionsV14};

/// # Safety
/// The loaded library must be a v0.14-line engine.
pub unsafe fn make_default_initialize_options(
    lib: &EngineLibrary,
) -> Result<InitializeOptionsV14, LoaderError> {
    type F = unsafe extern "C" fn() -> InitializeOptionsV14;
    let f = unsafe { resolver::resolve::<F>(lib, "voicevox_make_default_initialize_options")? };
    Ok(unsafe { f() })
}

/// # Safety
/// `options.open_jtalk_dict_dir` must be NUL-terminated and live for the call.
pub unsafe fn initialize(
    lib: &EngineLibrary,
    options: InitializeOptionsV14,
) -> Result<ResultCode, LoaderError> {
    type F = unsafe extern "C" fn(InitializeOptionsV14) -> ResultCode;
    let f = unsafe { resolver::resolve::<F>(lib, "voicevox_initialize")? };
    Ok(unsafe { f(options) })
}

/// Returns a borrowed static version string; do not free it.
///
/// # Safety
/// The loaded library must be a v0.14-line engine.
pub unsafe fn get_version(lib: &EngineLibrary) -> Result<*const c_char, LoaderError> {
    type F = unsafe extern "C" fn() -> *const c_char;
    let f = unsafe { resolver::resolve::<F>(lib, "voicevox_get_version")? };
    Ok(unsafe { f() })
}

/// # Safety
/// The engine must have been initialised.
pub unsafe fn load_model(lib: &EngineLibrary, speaker_id: u32) -> Result<ResultCode, LoaderError> {
    type F = unsafe extern "C" fn(u32) -> ResultCode;
    let f = unsafe { resolver::resolve::<F>(lib, "voicevox_load_model")? };
    Ok(unsafe { f(speaker_id) })
}

/// # Safety
/// The loaded library must be a v0.14-line engine.
pub unsafe fn is_gpu_mode(lib: &EngineLibrary) -> Result<bool, LoaderError> {
    type F = unsafe extern "C" fn() -> bool;
    let f = unsafe { resolver::resolve::<F>(lib, "voicevox_is_gpu_mode")? };
    Ok(unsafe { f() })
}

/// # Safety
/// The loaded library must be a v0.14-line engine.
pub unsafe fn is_model_loaded(lib: &EngineLibrary, speaker_id: u32) -> Result<bool, LoaderError> {
    type F = unsafe extern "C" fn(u32) -> bool;
    let f = unsafe { resolver::resolve::<F>(lib, "voicevox_is_model_loaded")? };
    Ok(unsafe { f(speaker_id) })
}

/// # Safety
/// The loaded library must be a v0.14-line engine.
pub unsafe fn finalize(lib: &EngineLibrary) -> Result<(), LoaderError> {
    type F = unsafe extern "C" fn();
    let f = unsafe { resolver::resolve::<F>(lib, "voicevox_finalize")? };
    unsafe { f() };
    Ok(())
}

/// Returns a borrowed JSON string owned by the engine; do not free it.
///
/// # Safety
/// The engine must have been initialised.
pub unsafe fn get_metas_json(lib: &EngineLibrary) -> Result<*const c_char, LoaderError> {
    type F = unsafe extern "C" fn() -> *const c_char;
    let f = unsafe { resolver::resolve::<F>(lib, "voicevox_get_metas_json")? };
    Ok(unsafe { f() })
}

/// Returns a borrowed JSON string owned by the engine; do not free it.
///
/// # Safety
/// The loaded library must be a v0.14-line engine.
pub unsafe fn get_supported_devices_json(
    lib: &EngineLibrary,
) -> Result<*const c_char, LoaderError> {
    type F = unsafe extern "C" fn() -> *const c_char;
    let f = unsafe { resolver::resolve::<F>(lib, "voicevox_get_supported_devices_json")? };
    Ok(unsafe { f() })
}

/// # Safety
/// `phoneme_vector` must point to `length` readable elements; the out-pointers
/// must be valid. On success release the data with
/// [`predict_duration_data_free`].
pub unsafe fn predict_duration(
    lib: &EngineLibrary,
    length: usize,
    phoneme_vector: *mut i64,
    speaker_id: u32,
    output_data_length: *mut usize,
    output_data: *mut *mut f32,
) -> Result<ResultCode, LoaderError> {
    type F =
        unsafe extern "C" fn(usize, *mut i64, u32, *mut usize, *mut *mut f32) -> ResultCode;
    let f = unsafe { resolver::resolve::<F>(lib, "voicevox_predict_duration")? };
    Ok(unsafe { f(length, phoneme_vector, speaker_id, output_data_length, output_data) })
}

/// # Safety
/// `data` must be an engine-allocated buffer not yet freed.
pub unsafe fn predict_duration_data_free(
    lib: &EngineLibrary,
    data: *mut f32,
) -> Result<(), LoaderError> {
    type F = unsafe extern "C" fn(*mut f32);
    let f = unsafe { resolver::resolve::<F>(lib, "voicevox_predict_duration_data_free")? };
    unsafe { f(data) };
    Ok(())
}

/// # Safety
/// All six vectors must point to `length` readable elements; the out-pointers
/// must be valid. On success release the data with
/// [`predict_intonation_data_free`].
#[allow(clippy::too_many_arguments)]
pub unsafe fn predict_intonation(
    lib: &EngineLibrary,
    length: usize,
    vowel_phoneme_vector: *mut i64,
    consonant_phoneme_vector: *mut i64,
    start_accent_vector: *mut i64,
    end_accent_vector: *mut i64,
    start_accent_phrase_vector: *mut i64,
    end_accent_phrase_vector: *mut i64,
    speaker_id: u32,
    output_data_length: *mut usize,
    output_data: *mut *mut f32,
) -> Result<ResultCode, LoaderError> {
    type F = unsafe extern "C" fn(
        usize,
        *mut i64,
        *mut i64,
        *mut i64,
        *mut i64,
        *mut i64,
        *mut i64,
        u32,
        *mut usize,
        *mut *mut f32,
    ) -> ResultCode;
    let f = unsafe { resolver::resolve::<F>(lib, "voicevox_predict_intonation")? };
    Ok(unsafe {
        f(
            length,
            vowel_phoneme_vector,
            consonant_phoneme_vector,
            start_accent_vector,
            end_accent_vector,
            start_accent_phrase_vector,
            end_accent_phrase_vector,
            speaker_id,
            output_data_length,
            output_data,
        )
    })
}

/// # Safety
/// `data` must be an engine-allocated buffer not yet freed.
pub unsafe fn predict_intonation_data_free(
    lib: &EngineLibrary,
    data: *mut f32,
) -> Result<(), LoaderError> {
    type F = unsafe extern "C" fn(*mut f32);
    let f = unsafe { resolver::resolve::<F>(lib, "voicevox_predict_intonation_data_free")? };
    unsafe { f(data) };
    Ok(())
}

/// # Safety
/// `f0` must point to `length` elements and `phoneme_vector` to
/// `length * phoneme_size`; the out-pointers must be valid. On success release
/// the data with [`decode_data_free`].
#[allow(clippy::too_many_arguments)]
pub unsafe fn decode(
    lib: &EngineLibrary,
    length: usize,
    phoneme_size: usize,
    f0: *mut f32,
    phoneme_vector: *mut f32,
    speaker_id: u32,
    output_data_length: *mut usize,
    output_data: *mut *mut f32,
) -> Result<ResultCode, LoaderError> {
    type F = unsafe extern "C" fn(
        usize,
        usize,
        *mut f32,
        *mut f32,
        u32,
        *mut usize,
        *mut *mut f32,
    ) -> ResultCode;
    let f = unsafe { resolver::resolve::<F>(lib, "voicevox_decode")? };
    Ok(unsafe {
        f(
            length,
            phoneme_size,
            f0,
            phoneme_vector,
            speaker_id,
            output_data_length,
            output_data,
        )
    })
}

/// # Safety
/// `data` must be an engine-allocated buffer not yet freed.
pub unsafe fn decode_data_free(lib: &EngineLibrary, data: *mut f32) -> Result<(), LoaderError> {
    type F = unsafe extern "C" fn(*mut f32);
    let f = unsafe { resolver::resolve::<F>(lib, "voicevox_decode_data_free")? };
    unsafe { f(data) };
    Ok(())
}

/// # Safety
/// The loaded library must be a v0.14-line engine.
pub unsafe fn make_default_audio_query_options(
    lib: &EngineLibrary,
) -> Result<AudioQueryOptionsV14, LoaderError> {
    type F = unsafe extern "C" fn() -> AudioQueryOptionsV14;
    let f = unsafe { resolver::resolve::<F>(lib, "voicevox_make_default_audio_query_options")? };
    Ok(unsafe { f() })
}

/// # Safety
/// `text` must be NUL-terminated; on success release the output with
/// [`audio_query_json_free`].
pub unsafe fn audio_query(
    lib: &EngineLibrary,
    text: *const c_char,
    speaker_id: u32,
    options: AudioQueryOptionsV14,
    output_audio_query_json: *mut *mut c_char,
) -> Result<ResultCode, LoaderError> {
    type F = unsafe extern "C" fn(
        *const c_char,
        u32,
        AudioQueryOptionsV14,
        *mut *mut c_char,
    ) -> ResultCode;
    let f = unsafe { resolver::resolve::<F>(lib, "voicevox_audio_query")? };
    Ok(unsafe { f(text, speaker_id, options, output_audio_query_json) })
}

/// # Safety
/// `audio_query_json` must be an engine-allocated string not yet freed.
pub unsafe fn audio_query_json_free(
    lib: &EngineLibrary,
    audio_query_json: *mut c_char,
) -> Result<(), LoaderError> {
    type F = unsafe extern "C" fn(*mut c_char);
    let f = unsafe { resolver::resolve::<F>(lib, "voicevox_audio_query_json_free")? };
    unsafe { f(audio_query_json) };
    Ok(())
}

/// # Safety
/// The loaded library must be a v0.14-line engine.
pub unsafe fn make_default_synthesis_options(
    lib: &EngineLibrary,
) -> Result<SynthesisOptions, LoaderError> {
    type F = unsafe extern "C" fn() -> SynthesisOptions;
    let f = unsafe { resolver::resolve::<F>(lib, "voicevox_make_default_synthesis_options")? };
    Ok(unsafe { f() })
}

/// # Safety
/// `audio_query_json` must be NUL-terminated; on success release the wave with
/// [`wav_free`].
pub unsafe fn synthesis(
    lib: &EngineLibrary,
    audio_query_json: *const c_char,
    speaker_id: u32,
    options: SynthesisOptions,
    output_wav_length: *mut usize,
    output_wav: *mut *mut u8,
) -> Result<ResultCode, LoaderError> {
    type F = unsafe extern "C" fn(
        *const c_char,
        u32,
        SynthesisOptions,
        *mut usize,
        *mut *mut u8,
    ) -> ResultCode;
    let f = unsafe { resolver::resolve::<F>(lib, "voicevox_synthesis")? };
    Ok(unsafe { f(audio_query_json, speaker_id, options, output_wav_length, output_wav) })
}

/// # Safety
/// The loaded library must be a v0.14-line engine.
pub unsafe fn make_default_tts_options(lib: &EngineLibrary) -> Result<TtsOptionsV14, LoaderError> {
    type F = unsafe extern "C" fn() -> TtsOptionsV14;
    let f = unsafe { resolver::resolve::<F>(lib, "voicevox_make_default_tts_options")? };
    Ok(unsafe { f() })
}

/// # Safety
/// `text` must be NUL-terminated; on success release the wave with
/// [`wav_free`].
pub unsafe fn tts(
    lib: &EngineLibrary,
    text: *const c_char,
    speaker_id: u32,
    options: TtsOptionsV14,
    output_wav_length: *mut usize,
    output_wav: *mut *mut u8,
) -> Result<ResultCode, LoaderError> {
    type F = unsafe extern "C" fn(
        *const c_char,
        u32,
        TtsOptionsV14,
        *mut usize,
        *mut *mut u8,
    ) -> ResultCode;
    let f = unsafe { resolver::resolve::<F>(lib, "voicevox_tts")? };
    Ok(unsafe { f(text, speaker_id, options, output_wav_length, output_wav) })
}

/// # Safety
/// `wav` must be an engine-allocated buffer not yet freed.
pub unsafe fn wav_free(lib: &EngineLibrary, wav: *mut u8) -> Result<(), LoaderError> {
    type F = unsafe extern "C" fn(*mut u8);
    let f = unsafe { resolver::resolve::<F>(lib, "voicevox_wav_free")? };
    unsafe { f(wav) };
    Ok(())
}
