//! v0.8 call table: the raw inference core with `int64_t` scalars. Output
//! buffers are caller-allocated and sized from the input sequence. A missing
//! symbol terminates the process.

use voxbridge_loader::{EngineLibrary, resolver};

/// Phoneme-duration forward pass; writes `length` floats into `output`.
///
/// # Safety
/// `phoneme_list` must point to `length` readable elements and `output` to
/// `length` writable floats; `speaker_id` must be a valid pointer.
pub unsafe fn yukarin_s_forward(
    lib: &EngineLibrary,
    length: i64,
    phoneme_list: *mut i64,
    speaker_id: *mut i64,
    output: *mut f32,
) -> bool {
    type F = unsafe extern "C" fn(i64, *mut i64, *mut i64, *mut f32) -> bool;
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
    length: i64,
    vowel_phoneme_list: *mut i64,
    consonant_phoneme_list: *mut i64,
    start_accent_list: *mut i64,
    end_accent_list: *mut i64,
    start_accent_phrase_list: *mut i64,
    end_accent_phrase_list: *mut i64,
    speaker_id: *mut i64,
    output: *mut f32,
) -> bool {
    type F = unsafe extern "C" fn(
        i64,
        *mut i64,
        *mut i64,
        *mut i64,
        *mut i64,
        *mut i64,
        *mut i64,
        *mut i64,
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
    length: i64,
    phoneme_size: i64,
    f0: *mut f32,
    phoneme: *mut f32,
    speaker_id: *mut i64,
    output: *mut f32,
) -> bool {
    type F = unsafe extern "C" fn(i64, i64, *mut f32, *mut f32, *mut i64, *mut f32) -> bool;
    let f = unsafe { resolver::resolve_or_abort::<F>(lib, "decode_forward") };
    unsafe { f(length, phoneme_size, f0, phoneme, speaker_id, output) }
}
