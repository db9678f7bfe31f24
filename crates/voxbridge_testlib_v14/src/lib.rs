//! Fake v0.14/v0.15-line engine used by the adapter integration tests.
//!
//! Reproduces the global-state surface: one process-wide initialisation flag,
//! per-speaker model loading, result codes, and engine-allocated outputs with
//! paired free functions. The v0.15 accent-phrase entry points are included,
//! as that release line shipped them on top of the v0.14 core.

use std::collections::HashSet;
use std::ffi::CStr;
use std::os::raw::c_char;
use std::ptr;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use serde_json::json;

use voxbridge_abi::{
    AccelerationMode, AccentPhrasesOptionsV15, AudioQueryOptionsV14, InitializeOptionsV14,
    SynthesisOptions, TtsOptionsV14,
};
use voxbridge_testlib_support::{
    alloc_bytes, alloc_cstring, alloc_floats, free_bytes, free_cstring, free_floats, wav_bytes,
};

const OK: i32 = 0;
const NOT_INITIALIZED_ERROR: i32 = 1;
const INVALID_SPEAKER_ERROR: i32 = 4;

static INITIALIZED: AtomicBool = AtomicBool::new(false);
static LOADED_SPEAKERS: Mutex<Option<HashSet<u32>>> = Mutex::new(None);

fn initialized() -> bool {
    INITIALIZED.load(Ordering::SeqCst)
}

fn with_speakers<R>(f: impl FnOnce(&mut HashSet<u32>) -> R) -> R {
    let mut guard = LOADED_SPEAKERS.lock().expect("stub lock");
    f(guard.get_or_insert_with(HashSet::new))
}

unsafe fn read_str(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(ptr) }
        .to_str()
        .ok()
        .map(str::to_owned)
}

fn audio_query_json() -> String {
    json!({
        "accent_phrases": [{
            "moras": [{"text": "コ", "vowel": "o", "vowel_length": 0.11, "pitch": 5.1}],
            "accent": 1,
            "is_interrogative": false,
        }],
        "speedScale": 1.0,
        "pitchScale": 0.0,
        "intonationScale": 1.0,
        "volumeScale": 1.0,
        "prePhonemeLength": 0.1,
        "postPhonemeLength": 0.1,
        "outputSamplingRate": 24_000,
        "outputStereo": false,
        "kana": "",
    })
    .to_string()
}

#[unsafe(no_mangle)]
pub extern "C" fn voicevox_make_default_initialize_options() -> InitializeOptionsV14 {
    InitializeOptionsV14 {
        acceleration_mode: AccelerationMode::Auto,
        cpu_num_threads: 0,
        load_all_models: false,
        open_jtalk_dict_dir: ptr::null(),
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn voicevox_initialize(options: InitializeOptionsV14) -> i32 {
    if unsafe { read_str(options.open_jtalk_dict_dir) }.is_none() {
        return NOT_INITIALIZED_ERROR;
    }
    INITIALIZED.store(true, Ordering::SeqCst);
    if options.load_all_models {
        with_speakers(|speakers| {
            speakers.extend([0, 1, 2]);
        });
    }
    OK
}

#[unsafe(no_mangle)]
pub extern "C" fn voicevox_get_version() -> *const c_char {
    c"0.14.0-stub".as_ptr()
}

#[unsafe(no_mangle)]
pub extern "C" fn voicevox_load_model(speaker_id: u32) -> i32 {
    if !initialized() {
        return NOT_INITIALIZED_ERROR;
    }
    with_speakers(|speakers| {
        speakers.insert(speaker_id);
    });
    OK
}

#[unsafe(no_mangle)]
pub extern "C" fn voicevox_is_gpu_mode() -> bool {
    false
}

#[unsafe(no_mangle)]
pub extern "C" fn voicevox_is_model_loaded(speaker_id: u32) -> bool {
    with_speakers(|speakers| speakers.contains(&speaker_id))
}

#[unsafe(no_mangle)]
pub extern "C" fn voicevox_finalize() {
    INITIALIZED.store(false, Ordering::SeqCst);
    with_speakers(HashSet::clear);
}

#[unsafe(no_mangle)]
pub extern "C" fn voicevox_get_metas_json() -> *const c_char {
    c"[{\"name\":\"stub speaker\",\"styles\":[{\"name\":\"normal\",\"id\":2}]}]".as_ptr()
}

#[unsafe(no_mangle)]
pub extern "C" fn voicevox_get_supported_devices_json() -> *const c_char {
    c"{\"cpu\":true,\"cuda\":false,\"dml\":false}".as_ptr()
}

#[unsafe(no_mangle)]
pub extern "C" fn voicevox_predict_duration(
    length: usize,
    phoneme_vector: *mut i64,
    _speaker_id: u32,
    output_data_length: *mut usize,
    output_data: *mut *mut f32,
) -> i32 {
    if !initialized() {
        return NOT_INITIALIZED_ERROR;
    }
    if phoneme_vector.is_null() && length > 0 {
        return INVALID_SPEAKER_ERROR;
    }
    let durations = vec![0.07f32; length];
    unsafe {
        output_data_length.write(durations.len());
        output_data.write(alloc_floats(&durations));
    }
    OK
}

#[unsafe(no_mangle)]
pub extern "C" fn voicevox_predict_duration_data_free(data: *mut f32) {
    unsafe { free_floats(data) };
}

#[unsafe(no_mangle)]
#[allow(clippy::too_many_arguments)]
pub extern "C" fn voicevox_predict_intonation(
    length: usize,
    _vowel_phoneme_vector: *mut i64,
    _consonant_phoneme_vector: *mut i64,
    _start_accent_vector: *mut i64,
    _end_accent_vector: *mut i64,
    _start_accent_phrase_vector: *mut i64,
    _end_accent_phrase_vector: *mut i64,
    _speaker_id: u32,
    output_data_length: *mut usize,
    output_data: *mut *mut f32,
) -> i32 {
    if !initialized() {
        return NOT_INITIALIZED_ERROR;
    }
    let pitches = vec![5.5f32; length];
    unsafe {
        output_data_length.write(pitches.len());
        output_data.write(alloc_floats(&pitches));
    }
    OK
}

#[unsafe(no_mangle)]
pub extern "C" fn voicevox_predict_intonation_data_free(data: *mut f32) {
    unsafe { free_floats(data) };
}

#[unsafe(no_mangle)]
pub extern "C" fn voicevox_decode(
    length: usize,
    _phoneme_size: usize,
    _f0: *mut f32,
    _phoneme_vector: *mut f32,
    _speaker_id: u32,
    output_data_length: *mut usize,
    output_data: *mut *mut f32,
) -> i32 {
    if !initialized() {
        return NOT_INITIALIZED_ERROR;
    }
    let samples = vec![0.0f32; length * 256];
    unsafe {
        output_data_length.write(samples.len());
        output_data.write(alloc_floats(&samples));
    }
    OK
}

#[unsafe(no_mangle)]
pub extern "C" fn voicevox_decode_data_free(data: *mut f32) {
    unsafe { free_floats(data) };
}

#[unsafe(no_mangle)]
pub extern "C" fn voicevox_make_default_audio_query_options() -> AudioQueryOptionsV14 {
    AudioQueryOptionsV14 { kana: false }
}

#[unsafe(no_mangle)]
pub extern "C" fn voicevox_audio_query(
    text: *const c_char,
    _speaker_id: u32,
    _options: AudioQueryOptionsV14,
    output_audio_query_json: *mut *mut c_char,
) -> i32 {
    if !initialized() {
        return NOT_INITIALIZED_ERROR;
    }
    if unsafe { read_str(text) }.is_none() {
        return INVALID_SPEAKER_ERROR;
    }
    unsafe { output_audio_query_json.write(alloc_cstring(&audio_query_json())) };
    OK
}

#[unsafe(no_mangle)]
pub extern "C" fn voicevox_audio_query_json_free(audio_query_json: *mut c_char) {
    unsafe { free_cstring(audio_query_json) };
}

#[unsafe(no_mangle)]
pub extern "C" fn voicevox_make_default_synthesis_options() -> SynthesisOptions {
    SynthesisOptions {
        enable_interrogative_upspeak: false,
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn voicevox_synthesis(
    audio_query_json: *const c_char,
    _speaker_id: u32,
    _options: SynthesisOptions,
    output_wav_length: *mut usize,
    output_wav: *mut *mut u8,
) -> i32 {
    if !initialized() {
        return NOT_INITIALIZED_ERROR;
    }
    if unsafe { read_str(audio_query_json) }.is_none() {
        return INVALID_SPEAKER_ERROR;
    }
    let wav = wav_bytes(1_200);
    unsafe {
        output_wav_length.write(wav.len());
        output_wav.write(alloc_bytes(&wav));
    }
    OK
}

#[unsafe(no_mangle)]
pub extern "C" fn voicevox_make_default_tts_options() -> TtsOptionsV14 {
    TtsOptionsV14 {
        kana: false,
        enable_interrogative_upspeak: false,
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn voicevox_tts(
    text: *const c_char,
    _speaker_id: u32,
    _options: TtsOptionsV14,
    output_wav_length: *mut usize,
    output_wav: *mut *mut u8,
) -> i32 {
    if !initialized() {
        return NOT_INITIALIZED_ERROR;
    }
    if unsafe { read_str(text) }.is_none() {
        return INVALID_SPEAKER_ERROR;
    }
    let wav = wav_bytes(1_200);
    unsafe {
        output_wav_length.write(wav.len());
        output_wav.write(alloc_bytes(&wav));
    }
    OK
}

#[unsafe(no_mangle)]
pub extern "C" fn voicevox_wav_free(wav: *mut u8) {
    unsafe { free_bytes(wav) };
}

#[unsafe(no_mangle)]
pub extern "C" fn voicevox_error_result_to_message(result_code: i32) -> *const c_char {
    match result_code {
        0 => c"OK".as_ptr(),
        1 => c"engine is not initialized".as_ptr(),
        4 => c"invalid input".as_ptr(),
        _ => c"unknown stub error".as_ptr(),
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn voicevox_accent_phrases(
    text: *const c_char,
    _speaker_id: u32,
    _options: AccentPhrasesOptionsV15,
    output_accent_phrases_json: *mut *mut c_char,
) -> i32 {
    if !initialized() {
        return NOT_INITIALIZED_ERROR;
    }
    if unsafe { read_str(text) }.is_none() {
        return INVALID_SPEAKER_ERROR;
    }
    let phrases = json!([{
        "moras": [{"text": "コ", "vowel": "o", "vowel_length": 0.11, "pitch": 5.1}],
        "accent": 1,
        "is_interrogative": false,
    }])
    .to_string();
    unsafe { output_accent_phrases_json.write(alloc_cstring(&phrases)) };
    OK
}

macro_rules! rewrite_entry_point {
    ($name:ident) => {
        #[unsafe(no_mangle)]
        pub extern "C" fn $name(
            accent_phrases_json: *const c_char,
            _speaker_id: u32,
            output_accent_phrases_json: *mut *mut c_char,
        ) -> i32 {
            if !initialized() {
                return NOT_INITIALIZED_ERROR;
            }
            // Echo the input back, the round-trip the tests rely on.
            let Some(json) = (unsafe { read_str(accent_phrases_json) }) else {
                return INVALID_SPEAKER_ERROR;
            };
            unsafe { output_accent_phrases_json.write(alloc_cstring(&json)) };
            OK
        }
    };
}

rewrite_entry_point!(voicevox_mora_length);
rewrite_entry_point!(voicevox_mora_pitch);
rewrite_entry_point!(voicevox_mora_data);

#[unsafe(no_mangle)]
pub extern "C" fn voicevox_accent_phrases_json_free(accent_phrases_json: *mut c_char) {
    unsafe { free_cstring(accent_phrases_json) };
}
