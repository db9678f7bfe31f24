//! v0.12 call table: the first `voicevox_*` surface alongside the legacy
//! boolean core.
//!
//! Two conventions coexist in this release line: the inherited global-state
//! functions return a success flag and leave details to `last_error_message`
//! (see [`crate::v0_5`]), while the new `voicevox_*` entry points return an
//! integer result code. Either way, a missing symbol terminates the process;
//! there is no recoverable path in this generation and callers rely on the
//! fail-fast behaviour.

use std::os::raw::{c_char, c_int};

use voxbridge_loader::{EngineLibrary, resolver};

use crate::raw::ResultCode;

/// # Safety
/// The loaded library must be a v0.12-line engine.
pub unsafe fn initialize(
    lib: &EngineLibrary,
    use_gpu: bool,
    cpu_num_threads: c_int,
    load_all_models: bool,
) -> bool {
    type F = unsafe extern "C" fn(bool, c_int, bool) -> bool;
    let f = unsafe { resolver::resolve_or_abort::<F>(lib, "initialize") };
    unsafe { f(use_gpu, cpu_num_threads, load_all_models) }
}

/// # Safety
/// The engine must have been initialised.
pub unsafe fn load_model(lib: &EngineLibrary, speaker_id: i64) -> bool {
    type F = unsafe extern "C" fn(i64) -> bool;
    let f = unsafe { resolver::resolve_or_abort::<F>(lib, "load_model") };
    unsafe { f(speaker_id) }
}

/// # Safety
/// The loaded library must be a v0.12-line engine.
pub unsafe fn is_model_loaded(lib: &EngineLibrary, speaker_id: i64) -> bool {
    type F = unsafe extern "C" fn(i64) -> bool;
    let f = unsafe { resolver::resolve_or_abort::<F>(lib, "is_model_loaded") };
    unsafe { f(speaker_id) }
}

/// # Safety
/// `dict_path` must be NUL-terminated.
pub unsafe fn load_openjtalk_dict(lib: &EngineLibrary, dict_path: *const c_char) -> ResultCode {
    type F = unsafe extern "C" fn(*const c_char) -> ResultCode;
    let f = unsafe { resolver::resolve_or_abort::<F>(lib, "voicevox_load_openjtalk_dict") };
    unsafe { f(dict_path) }
}

/// # Safety
/// `text` must be NUL-terminated and the out-pointers valid; on success
/// release the wave with [`wav_free`].
pub unsafe fn tts(
    lib: &EngineLibrary,
    text: *const c_char,
    speaker_id: i64,
    output_binary_size: *mut c_int,
    output_wav: *mut *mut u8,
) -> ResultCode {
    type F = unsafe extern "C" fn(*const c_char, i64, *mut c_int, *mut *mut u8) -> ResultCode;
    let f = unsafe { resolver::resolve_or_abort::<F>(lib, "voicevox_tts") };
    unsafe { f(text, speaker_id, output_binary_size, output_wav) }
}

/// # Safety
/// `text` must be NUL-terminated AquesTalk-style kana and the out-pointers
/// valid; on success release the wave with [`wav_free`].
pub unsafe fn tts_from_kana(
    lib: &EngineLibrary,
    text: *const c_char,
    speaker_id: i64,
    output_binary_size: *mut c_int,
    output_wav: *mut *mut u8,
) -> ResultCode {
    type F = unsafe extern "C" fn(*const c_char, i64, *mut c_int, *mut *mut u8) -> ResultCode;
    let f = unsafe { resolver::resolve_or_abort::<F>(lib, "voicevox_tts_from_kana") };
    unsafe { f(text, speaker_id, output_binary_size, output_wav) }
}

/// # Safety
/// `wav` must be an engine-allocated buffer not yet freed.
pub unsafe fn wav_free(lib: &EngineLibrary, wav: *mut u8) {
    type F = unsafe extern "C" fn(*mut u8);
    let f = unsafe { resolver::resolve_or_abort::<F>(lib, "voicevox_wav_free") };
    unsafe { f(wav) };
}

/// Returns a borrowed static message string; do not free it.
///
/// # Safety
/// The loaded library must be a v0.12-line engine.
pub unsafe fn error_result_to_message(
    lib: &EngineLibrary,
    result_code: ResultCode,
) -> *const c_char {
    type F = unsafe extern "C" fn(ResultCode) -> *const c_char;
    let f = unsafe { resolver::resolve_or_abort::<F>(lib, "voicevox_error_result_to_message") };
    unsafe { f(result_code) }
}
