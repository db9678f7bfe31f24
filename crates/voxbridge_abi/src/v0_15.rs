//! v0.15 call table: the accent-phrase pipeline added on top of the v0.14
//! global-state engine. Accent phrases travel as opaque JSON; every output is
//! released with [`accent_phrases_json_free`].

use std::os::raw::c_char;

use voxbridge_loader::{EngineLibrary, LoaderError, resolver};

use crate::raw::{AccentPhrasesOptionsV15, ResultCode};

/// # Safety
/// `text` must be NUL-terminated; on success release the output with
/// [`accent_phrases_json_free`].
pub unsafe fn accent_phrases(
    lib: &EngineLibrary,
    text: *const c_char,
    speaker_id: u32,
    options: AccentPhrasesOptionsV15,
    output_accent_phrases_json: *mut *mut c_char,
) -> Result<ResultCode, LoaderError> {
    type F = unsafe extern "C" fn(
        *const c_char,
        u32,
        AccentPhrasesOptionsV15,
        *mut *mut c_char,
    ) -> ResultCode;
    let f = unsafe { resolver::resolve::<F>(lib, "voicevox_accent_phrases")? };
    Ok(unsafe { f(text, speaker_id, options, output_accent_phrases_json) })
}

macro_rules! accent_phrase_rewrite_op {
    ($(#[$doc:meta])* $name:ident, $symbol:literal) => {
        $(#[$doc])*
        /// # Safety
        /// `accent_phrases_json` must be NUL-terminated; on success release
        /// the output with [`accent_phrases_json_free`].
        pub unsafe fn $name(
            lib: &EngineLibrary,
            accent_phrases_json: *const c_char,
            speaker_id: u32,
            output_accent_phrases_json: *mut *mut c_char,
        ) -> Result<ResultCode, LoaderError> {
            type F = unsafe extern "C" fn(*const c_char, u32, *mut *mut c_char) -> ResultCode;
            let f = unsafe { resolver::resolve::<F>(lib, $symbol)? };
            Ok(unsafe { f(accent_phrases_json, speaker_id, output_accent_phrases_json) })
        }
    };
}

accent_phrase_rewrite_op!(
    /// Regenerate phoneme lengths.
    mora_length,
    "voicevox_mora_length"
);
accent_phrase_rewrite_op!(
    /// Regenerate mora pitches.
    mora_pitch,
    "voicevox_mora_pitch"
);
accent_phrase_rewrite_op!(
    /// Regenerate both pitch and length.
    mora_data,
    "voicevox_mora_data"
);

/// # Safety
/// `accent_phrases_json` must be an engine-allocated string not yet freed.
pub unsafe fn accent_phrases_json_free(
    lib: &EngineLibrary,
    accent_phrases_json: *mut c_char,
) -> Result<(), LoaderError> {
    type F = unsafe extern "C" fn(*mut c_char);
    let f = unsafe { resolver::resolve::<F>(lib, "voicevox_accent_phrases_json_free")? };
    unsafe { f(accent_phrases_json) };
    Ok(())
}
