//! Fake v0.12-line engine used by the adapter integration tests.
//!
//! Models the legacy global-state core: boolean success flags,
//! `last_error_message` diagnostics, caller-allocated inference outputs, and
//! the first `voicevox_*` entry points with result codes. The `int64_t`
//! inference signatures match the v0.8 line as well, so the v0.8 call table
//! is exercised against this library too.

use std::collections::HashSet;
use std::ffi::CStr;
use std::os::raw::{c_char, c_int};
use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use voxbridge_testlib_support::{alloc_bytes, free_bytes, wav_bytes};

const OK: i32 = 0;
const NOT_INITIALIZED_ERROR: i32 = 9;
const DICT_NOT_FOUND_ERROR: i32 = 10;

static INITIALIZED: AtomicBool = AtomicBool::new(false);
static LOADED_SPEAKERS: Mutex<Option<HashSet<i64>>> = Mutex::new(None);

fn initialized() -> bool {
    INITIALIZED.load(Ordering::SeqCst)
}

fn with_speakers<R>(f: impl FnOnce(&mut HashSet<i64>) -> R) -> R {
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

#[unsafe(no_mangle)]
pub extern "C" fn initialize(use_gpu: bool, _cpu_num_threads: c_int, load_all_models: bool) -> bool {
    if use_gpu {
        // The fixture has no GPU path.
        return false;
    }
    INITIALIZED.store(true, Ordering::SeqCst);
    if load_all_models {
        with_speakers(|speakers| {
            speakers.extend([0, 1, 2]);
        });
    }
    true
}

#[unsafe(no_mangle)]
pub extern "C" fn finalize() {
    INITIALIZED.store(false, Ordering::SeqCst);
    with_speakers(HashSet::clear);
}

#[unsafe(no_mangle)]
pub extern "C" fn load_model(speaker_id: i64) -> bool {
    if !initialized() {
        return false;
    }
    with_speakers(|speakers| {
        speakers.insert(speaker_id);
    });
    true
}

#[unsafe(no_mangle)]
pub extern "C" fn is_model_loaded(speaker_id: i64) -> bool {
    with_speakers(|speakers| speakers.contains(&speaker_id))
}

#[unsafe(no_mangle)]
pub extern "C" fn metas() -> *const c_char {
    c"[{\"name\":\"stub speaker\",\"styles\":[{\"name\":\"normal\",\"id\":2}]}]".as_ptr()
}

#[unsafe(no_mangle)]
pub extern "C" fn supported_devices() -> *const c_char {
    c"{\"cpu\":true,\"cuda\":false}".as_ptr()
}

#[unsafe(no_mangle)]
pub extern "C" fn last_error_message() -> *const c_char {
    if initialized() {
        c"".as_ptr()
    } else {
        c"not initialized".as_ptr()
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn yukarin_s_forward(
    length: i64,
    phoneme_list: *mut i64,
    _speaker_id: *mut i64,
    output: *mut f32,
) -> bool {
    if !initialized() || phoneme_list.is_null() || output.is_null() {
        return false;
    }
    let length = usize::try_from(length).unwrap_or(0);
    for i in 0..length {
        unsafe { output.add(i).write(0.07) };
    }
    true
}

#[unsafe(no_mangle)]
#[allow(clippy::too_many_arguments)]
pub extern "C" fn yukarin_sa_forward(
    length: i64,
    vowel_phoneme_list: *mut i64,
    _consonant_phoneme_list: *mut i64,
    _start_accent_list: *mut i64,
    _end_accent_list: *mut i64,
    _start_accent_phrase_list: *mut i64,
    _end_accent_phrase_list: *mut i64,
    _speaker_id: *mut i64,
    output: *mut f32,
) -> bool {
    if !initialized() || vowel_phoneme_list.is_null() || output.is_null() {
        return false;
    }
    let length = usize::try_from(length).unwrap_or(0);
    for i in 0..length {
        unsafe { output.add(i).write(5.5) };
    }
    true
}

#[unsafe(no_mangle)]
pub extern "C" fn decode_forward(
    length: i64,
    _phoneme_size: i64,
    f0: *mut f32,
    _phoneme: *mut f32,
    _speaker_id: *mut i64,
    output: *mut f32,
) -> bool {
    if !initialized() || f0.is_null() || output.is_null() {
        return false;
    }
    let samples = usize::try_from(length).unwrap_or(0) * 256;
    for i in 0..samples {
        unsafe { output.add(i).write(0.0) };
    }
    true
}

#[unsafe(no_mangle)]
pub extern "C" fn voicevox_load_openjtalk_dict(dict_path: *const c_char) -> i32 {
    match unsafe { read_str(dict_path) } {
        Some(path) if Path::new(&path).exists() => OK,
        _ => DICT_NOT_FOUND_ERROR,
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn voicevox_tts(
    text: *const c_char,
    _speaker_id: i64,
    output_binary_size: *mut c_int,
    output_wav: *mut *mut u8,
) -> i32 {
    if !initialized() {
        return NOT_INITIALIZED_ERROR;
    }
    if unsafe { read_str(text) }.is_none() {
        return DICT_NOT_FOUND_ERROR;
    }
    let wav = wav_bytes(800);
    unsafe {
        output_binary_size.write(wav.len() as c_int);
        output_wav.write(alloc_bytes(&wav));
    }
    OK
}

#[unsafe(no_mangle)]
pub extern "C" fn voicevox_tts_from_kana(
    text: *const c_char,
    speaker_id: i64,
    output_binary_size: *mut c_int,
    output_wav: *mut *mut u8,
) -> i32 {
    voicevox_tts(text, speaker_id, output_binary_size, output_wav)
}

#[unsafe(no_mangle)]
pub extern "C" fn voicevox_wav_free(wav: *mut u8) {
    unsafe { free_bytes(wav) };
}

#[unsafe(no_mangle)]
pub extern "C" fn voicevox_error_result_to_message(result_code: i32) -> *const c_char {
    match result_code {
        0 => c"OK".as_ptr(),
        9 => c"engine is not initialized".as_ptr(),
        10 => c"dictionary not found".as_ptr(),
        _ => c"unknown stub error".as_ptr(),
    }
}
