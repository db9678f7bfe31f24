//! v0.5 call table: the oldest supported release line.
//!
//! Scalars are C `long` (platform-width), success is a bare flag, and the
//! only diagnostics channel is `last_error_message`. A missing symbol
//! terminates the process.

use std::os::raw::{c_char, c_int, c_long};

use voxbridge_loader::{EngineLibrary, resolver};

/// # Safety
/// `root_dir_path` must be NUL-terminated.
pub unsafe fn initialize(lib: &EngineLibrary, root_dir_path: *const c_char, use_gpu: bool) -> bool {
    type F = unsafe extern "C" fn(*const c_char, bool) -> bool;
    let f = unsafe { resolver::resolve_or_abort::<F>(lib, "initialize") };
    unsafe { f(root_dir_path, use_gpu) }
}

/// Returns a borrowed JSON string owned by the engine; do not free it.
///
/// # Safety
/// The loaded library must be a v0.5-line engine.
pub unsafe fn metas(lib: &EngineLibrary) -> *const c_char {
    type F = unsafe extern "C" fn() -> *const c_char;
    let f = unsafe { resolver::resolve_or_abort::<F>(lib, "metas") };
    unsafe { f() }
}

/// Returns a borrowed message string owned by the engine; do not free it.
///
/// # Safety
/// The loaded library must be a v0.5-line engine.
pub unsafe fn last_error_message(lib: &EngineLibrary) -> *const c_char {
    type F = unsafe extern "C" fn() -> *const c_char;
    let f = unsafe { resolver::resolve_or_abort::<F>(lib, "last_error_message") };
    unsafe { f() }
}

/// Phoneme-duration forward pass; writes `length` floats into `output`.
///
/// # Safety
/// `phoneme_list` must point to `length` readable elements and `output` to
/// `length` writable floats; `speaker_id` must be a valid pointer.
pub unsafe fn yukarin_s_forward(
    lib: &EngineLibrary,
    length: c_int,
    phoneme_list: *mut c_long,
    speaker_id: *mut c_long,
    output: *mut f32,
) -> bool {
    type F = unsafe extern "C" fn(c_int, *mut c_long, *mut c_long, *mut f32) -> bool;
    let f = unsafe { resolver::resolve_or_abort::<F>(lib, "yukarin_s_forward") };
    unsafe { f(length, phoneme_list, speaker_id, output) }
}

/// Mora-pitch forward pass over six parallel `length`-sized vectors; writes
/// `length` floats into `output`.
///
/// # Safety
/// Every vector must point to `length` readable elements and `output` to
/// `length` writable floats; `speaker_id` must be a valid pointer.
#[allow(clippy::too_many_arguments)]
pub unsafe fn yukarin_sa_forward(
    lib: &EngineLibrary,
    length: c_int,
    vowel_phoneme_list: *mut c_long,
    consonant_phoneme_list: *mut c_long,
    start_accent_list: *mut c_long,
    end_accent_list: *mut c_long,
    start_accent_phrase_list: *mut c_long,
    end_accent_phrase_list: *mut c_long,
    speaker_id: *mut c_long,
    output: *mut f32,
) -> bool {
    type F = unsafe extern "C" fn(
        c_int,
        *mut c_long,
        *mut c_long,
        *mut c_long,
        *mut c_long,
        *mut c_long,
        *mut c_long,
        *mut c_long,
        *mut f32,
    ) -> bool;
    let f = unsafe { resolver::resolve_or_abort::<F>(lib, "yukarin_sa_forward") };
    unsafe {
        f(
            length,
            vowel_phoneme_list,
            consonant_phoneme_list,
            start_accent_list,
            end_accent_list,
            start_accent_phrase_list,
            end_accent_phrase_list,
            speaker_id,
            output,
        )
    }
}

/// Waveform decode; writes `length * 256` floats into `output`.
///
/// # Safety
/// `f0` must point to `length` elements, `phoneme` to
/// `length * phoneme_size`, and `output` to `length * 256` writable floats;
/// `speaker_id` must be a valid pointer.
pub unsafe fn decode_forward(
    lib: &EngineLibrary,
    length: c_int,
    phoneme_size: c_int,
    f0: *mut f32,
    phoneme: *mut f32,
    speaker_id: *mut c_long,
    output: *mut f32,
) -> bool {
    type F = unsafe extern "C" fn(c_int, c_int, *mut f32, *mut f32, *mut c_long, *mut f32) -> bool;
    let f = unsafe { resolver::resolve_or_abort::<F>(lib, "decode_forward") };
    unsafe { f(length, phoneme_size, f0, phoneme, speaker_id, output) }
}
