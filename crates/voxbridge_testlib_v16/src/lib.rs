//! Fake v0.16-line engine used by the adapter integration tests.
//!
//! Exports the real v0.16 symbol names with the real signatures, backed by
//! plausible fixture data: models load from any existing file, audio queries
//! are fixed JSON, synthesis produces a silent RIFF wave. This exercises the
//! loader, resolver, marshalling and free paths end to end without a real
//! engine.

use std::collections::{HashMap, HashSet};
use std::ffi::CStr;
use std::os::raw::c_char;
use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::json;

use voxbridge_abi::{
    AccelerationMode, InitializeOptionsV16, OpenJtalkRc, SynthesisOptions, Synthesizer,
    TtsOptionsV16, UserDict, UserDictWordType, UserDictWordV16, VoiceModel,
};
use voxbridge_testlib_support::{
    alloc_bytes, alloc_cstring, free_bytes, free_cstring, sequential_uuid, wav_bytes,
};

const OK: i32 = 0;
const NOT_LOADED_ERROR: i32 = 6;
const OPEN_DICT_ERROR: i32 = 12;
const FILE_NOT_FOUND_ERROR: i32 = 13;
const WORD_NOT_FOUND_ERROR: i32 = 22;

static WORD_COUNTER: AtomicU64 = AtomicU64::new(1);

struct StubOpenJtalk {
    #[allow(dead_code)]
    dict_dir: String,
}

#[derive(Clone)]
struct StoredWord {
    surface: String,
    pronunciation: String,
    accent_type: usize,
    word_type: UserDictWordType,
    priority: u32,
}

struct StubUserDict {
    words: Mutex<HashMap<[u8; 16], StoredWord>>,
}

struct StubVoiceModel {
    id: std::ffi::CString,
    metas: std::ffi::CString,
}

struct StubSynthesizer {
    gpu: bool,
    loaded: Mutex<HashSet<String>>,
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

fn word_type_label(word_type: UserDictWordType) -> &'static str {
    match word_type {
        UserDictWordType::ProperNoun => "PROPER_NOUN",
        UserDictWordType::CommonNoun => "COMMON_NOUN",
        UserDictWordType::Verb => "VERB",
        UserDictWordType::Adjective => "ADJECTIVE",
        UserDictWordType::Suffix => "SUFFIX",
    }
}

fn hyphenated(uuid: &[u8; 16]) -> String {
    let mut out = String::with_capacity(36);
    for (i, byte) in uuid.iter().enumerate() {
        if matches!(i, 4 | 6 | 8 | 10) {
            out.push('-');
        }
        out.push_str(&format!("{byte:02x}"));
    }
    out
}

fn model_metas_json(id: &str) -> String {
    json!([{
        "name": "stub speaker",
        "speaker_uuid": "00000000-0000-0000-0000-000000000000",
        "version": "0.16.0",
        "styles": [
            {"name": "normal", "id": 2},
            {"name": "calm", "id": 302}
        ],
        "model_id": id,
    }])
    .to_string()
}

#[unsafe(no_mangle)]
pub extern "C" fn voicevox_open_jtalk_rc_new(
    open_jtalk_dic_dir: *const c_char,
    out_open_jtalk: *mut *mut OpenJtalkRc,
) -> i32 {
    let Some(dict_dir) = (unsafe { read_str(open_jtalk_dic_dir) }) else {
        return OPEN_DICT_ERROR;
    };
    if dict_dir.is_empty() {
        return OPEN_DICT_ERROR;
    }
    let boxed = Box::new(StubOpenJtalk { dict_dir });
    unsafe { out_open_jtalk.write(Box::into_raw(boxed).cast::<OpenJtalkRc>()) };
    OK
}

#[unsafe(no_mangle)]
pub extern "C" fn voicevox_open_jtalk_rc_use_user_dict(
    open_jtalk: *const OpenJtalkRc,
    user_dict: *const UserDict,
) -> i32 {
    if open_jtalk.is_null() || user_dict.is_null() {
        return NOT_LOADED_ERROR;
    }
    OK
}

#[unsafe(no_mangle)]
pub extern "C" fn voicevox_open_jtalk_rc_delete(open_jtalk: *mut OpenJtalkRc) {
    if !open_jtalk.is_null() {
        drop(unsafe { Box::from_raw(open_jtalk.cast::<StubOpenJtalk>()) });
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn voicevox_make_default_initialize_options() -> InitializeOptionsV16 {
    InitializeOptionsV16 {
        acceleration_mode: AccelerationMode::Auto,
        cpu_num_threads: 0,
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn voicevox_get_version() -> *const c_char {
    c"0.16.0-stub".as_ptr()
}

#[unsafe(no_mangle)]
pub extern "C" fn voicevox_voice_model_new_from_path(
    path: *const c_char,
    out_model: *mut *mut VoiceModel,
) -> i32 {
    let Some(path) = (unsafe { read_str(path) }) else {
        return FILE_NOT_FOUND_ERROR;
    };
    if !Path::new(&path).is_file() {
        return FILE_NOT_FOUND_ERROR;
    }
    let stem = Path::new(&path)
        .file_stem()
        .map_or_else(|| "model".to_owned(), |s| s.to_string_lossy().into_owned());
    let id = format!("stub-{stem}");
    let metas = model_metas_json(&id);
    let boxed = Box::new(StubVoiceModel {
        id: std::ffi::CString::new(id).expect("no interior NUL"),
        metas: std::ffi::CString::new(metas).expect("no interior NUL"),
    });
    unsafe { out_model.write(Box::into_raw(boxed).cast::<VoiceModel>()) };
    OK
}

#[unsafe(no_mangle)]
pub extern "C" fn voicevox_voice_model_id(model: *const VoiceModel) -> *const c_char {
    let model = unsafe { &*model.cast::<StubVoiceModel>() };
    model.id.as_ptr()
}

#[unsafe(no_mangle)]
pub extern "C" fn voicevox_voice_model_get_metas_json(model: *const VoiceModel) -> *const c_char {
    let model = unsafe { &*model.cast::<StubVoiceModel>() };
    model.metas.as_ptr()
}

#[unsafe(no_mangle)]
pub extern "C" fn voicevox_voice_model_delete(model: *mut VoiceModel) {
    if !model.is_null() {
        drop(unsafe { Box::from_raw(model.cast::<StubVoiceModel>()) });
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn voicevox_synthesizer_new(
    open_jtalk: *const OpenJtalkRc,
    options: InitializeOptionsV16,
    out_synthesizer: *mut *mut Synthesizer,
) -> i32 {
    if open_jtalk.is_null() {
        return NOT_LOADED_ERROR;
    }
    let boxed = Box::new(StubSynthesizer {
        gpu: options.acceleration_mode == AccelerationMode::Gpu,
        loaded: Mutex::new(HashSet::new()),
    });
    unsafe { out_synthesizer.write(Box::into_raw(boxed).cast::<Synthesizer>()) };
    OK
}

#[unsafe(no_mangle)]
pub extern "C" fn voicevox_synthesizer_delete(synthesizer: *mut Synthesizer) {
    if !synthesizer.is_null() {
        drop(unsafe { Box::from_raw(synthesizer.cast::<StubSynthesizer>()) });
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn voicevox_synthesizer_load_voice_model(
    synthesizer: *const Synthesizer,
    model: *const VoiceModel,
) -> i32 {
    let synthesizer = unsafe { &*synthesizer.cast::<StubSynthesizer>() };
    let model = unsafe { &*model.cast::<StubVoiceModel>() };
    synthesizer
        .loaded
        .lock()
        .expect("stub lock")
        .insert(model.id.to_string_lossy().into_owned());
    OK
}

#[unsafe(no_mangle)]
pub extern "C" fn voicevox_synthesizer_unload_voice_model(
    synthesizer: *const Synthesizer,
    model_id: *const c_char,
) -> i32 {
    let synthesizer = unsafe { &*synthesizer.cast::<StubSynthesizer>() };
    let Some(model_id) = (unsafe { read_str(model_id) }) else {
        return NOT_LOADED_ERROR;
    };
    if synthesizer.loaded.lock().expect("stub lock").remove(&model_id) {
        OK
    } else {
        NOT_LOADED_ERROR
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn voicevox_synthesizer_is_gpu_mode(synthesizer: *const Synthesizer) -> bool {
    unsafe { &*synthesizer.cast::<StubSynthesizer>() }.gpu
}

#[unsafe(no_mangle)]
pub extern "C" fn voicevox_synthesizer_is_loaded_voice_model(
    synthesizer: *const Synthesizer,
    model_id: *const c_char,
) -> bool {
    let synthesizer = unsafe { &*synthesizer.cast::<StubSynthesizer>() };
    let Some(model_id) = (unsafe { read_str(model_id) }) else {
        return false;
    };
    synthesizer.loaded.lock().expect("stub lock").contains(&model_id)
}

#[unsafe(no_mangle)]
pub extern "C" fn voicevox_synthesizer_create_metas_json(
    synthesizer: *const Synthesizer,
) -> *mut c_char {
    let synthesizer = unsafe { &*synthesizer.cast::<StubSynthesizer>() };
    let loaded: Vec<String> = synthesizer
        .loaded
        .lock()
        .expect("stub lock")
        .iter()
        .cloned()
        .collect();
    alloc_cstring(
        &json!(loaded.iter().map(|id| json!({"model_id": id})).collect::<Vec<_>>()).to_string(),
    )
}

#[unsafe(no_mangle)]
pub extern "C" fn voicevox_create_supported_devices_json(
    output_supported_devices_json: *mut *mut c_char,
) -> i32 {
    let devices = json!({"cpu": true, "cuda": false, "dml": false}).to_string();
    unsafe { output_supported_devices_json.write(alloc_cstring(&devices)) };
    OK
}

fn synthesizer_query_json(synthesizer: *const Synthesizer, out: *mut *mut c_char) -> i32 {
    let synthesizer = unsafe { &*synthesizer.cast::<StubSynthesizer>() };
    if synthesizer.loaded.lock().expect("stub lock").is_empty() {
        return NOT_LOADED_ERROR;
    }
    let query = json!({
        "accent_phrases": [{
            "moras": [{"text": "コ", "vowel": "o", "vowel_length": 0.1, "pitch": 5.4}],
            "accent": 1,
            "is_interrogative": false,
        }],
        "speed_scale": 1.0,
        "pitch_scale": 0.0,
        "intonation_scale": 1.0,
        "volume_scale": 1.0,
        "pre_phoneme_length": 0.1,
        "post_phoneme_length": 0.1,
        "output_sampling_rate": 24_000,
        "output_stereo": false,
        "kana": "",
    })
    .to_string();
    unsafe { out.write(alloc_cstring(&query)) };
    OK
}

macro_rules! query_entry_point {
    ($name:ident) => {
        #[unsafe(no_mangle)]
        pub extern "C" fn $name(
            synthesizer: *const Synthesizer,
            input: *const c_char,
            _style_id: u32,
            output_json: *mut *mut c_char,
        ) -> i32 {
            if unsafe { read_str(input) }.is_none() {
                return NOT_LOADED_ERROR;
            }
            synthesizer_query_json(synthesizer, output_json)
        }
    };
}

query_entry_point!(voicevox_synthesizer_create_audio_query_from_kana);
query_entry_point!(voicevox_synthesizer_create_audio_query);
query_entry_point!(voicevox_synthesizer_create_accent_phrases_from_kana);
query_entry_point!(voicevox_synthesizer_create_accent_phrases);

macro_rules! rewrite_entry_point {
    ($name:ident) => {
        #[unsafe(no_mangle)]
        pub extern "C" fn $name(
            synthesizer: *const Synthesizer,
            accent_phrases_json: *const c_char,
            _style_id: u32,
            output_json: *mut *mut c_char,
        ) -> i32 {
            let synthesizer = unsafe { &*synthesizer.cast::<StubSynthesizer>() };
            if synthesizer.loaded.lock().expect("stub lock").is_empty() {
                return NOT_LOADED_ERROR;
            }
            // Echo the input back, the round-trip the tests rely on.
            let Some(json) = (unsafe { read_str(accent_phrases_json) }) else {
                return NOT_LOADED_ERROR;
            };
            unsafe { output_json.write(alloc_cstring(&json)) };
            OK
        }
    };
}

rewrite_entry_point!(voicevox_synthesizer_replace_mora_data);
rewrite_entry_point!(voicevox_synthesizer_replace_phoneme_length);
rewrite_entry_point!(voicevox_synthesizer_replace_mora_pitch);

#[unsafe(no_mangle)]
pub extern "C" fn voicevox_make_default_synthesis_options() -> SynthesisOptions {
    SynthesisOptions {
        enable_interrogative_upspeak: false,
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn voicevox_synthesizer_synthesis(
    synthesizer: *const Synthesizer,
    audio_query_json: *const c_char,
    _style_id: u32,
    _options: SynthesisOptions,
    output_wav_length: *mut usize,
    output_wav: *mut *mut u8,
) -> i32 {
    let stub = unsafe { &*synthesizer.cast::<StubSynthesizer>() };
    if stub.loaded.lock().expect("stub lock").is_empty() {
        return NOT_LOADED_ERROR;
    }
    if unsafe { read_str(audio_query_json) }.is_none() {
        return NOT_LOADED_ERROR;
    }
    let wav = wav_bytes(2_400);
    unsafe {
        output_wav_length.write(wav.len());
        output_wav.write(alloc_bytes(&wav));
    }
    OK
}

#[unsafe(no_mangle)]
pub extern "C" fn voicevox_make_default_tts_options() -> TtsOptionsV16 {
    TtsOptionsV16 {
        enable_interrogative_upspeak: false,
    }
}

macro_rules! tts_entry_point {
    ($name:ident) => {
        #[unsafe(no_mangle)]
        pub extern "C" fn $name(
            synthesizer: *const Synthesizer,
            input: *const c_char,
            _style_id: u32,
            _options: TtsOptionsV16,
            output_wav_length: *mut usize,
            output_wav: *mut *mut u8,
        ) -> i32 {
            let stub = unsafe { &*synthesizer.cast::<StubSynthesizer>() };
            if stub.loaded.lock().expect("stub lock").is_empty() {
                return NOT_LOADED_ERROR;
            }
            if unsafe { read_str(input) }.is_none() {
                return NOT_LOADED_ERROR;
            }
            let wav = wav_bytes(2_400);
            unsafe {
                output_wav_length.write(wav.len());
                output_wav.write(alloc_bytes(&wav));
            }
            OK
        }
    };
}

tts_entry_point!(voicevox_synthesizer_tts_from_kana);
tts_entry_point!(voicevox_synthesizer_tts);

#[unsafe(no_mangle)]
pub extern "C" fn voicevox_json_free(json: *mut c_char) {
    unsafe { free_cstring(json) };
}

#[unsafe(no_mangle)]
pub extern "C" fn voicevox_wav_free(wav: *mut u8) {
    unsafe { free_bytes(wav) };
}

#[unsafe(no_mangle)]
pub extern "C" fn voicevox_error_result_to_message(result_code: i32) -> *const c_char {
    match result_code {
        0 => c"OK".as_ptr(),
        6 => c"model is not loaded".as_ptr(),
        12 => c"failed to open dictionary".as_ptr(),
        13 => c"file not found".as_ptr(),
        22 => c"word not found".as_ptr(),
        _ => c"unknown stub error".as_ptr(),
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn voicevox_user_dict_word_make(
    surface: *const c_char,
    pronunciation: *const c_char,
) -> UserDictWordV16 {
    UserDictWordV16 {
        surface,
        pronunciation,
        accent_type: 0,
        word_type: UserDictWordType::ProperNoun,
        priority: 5,
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn voicevox_user_dict_new() -> *mut UserDict {
    Box::into_raw(Box::new(StubUserDict {
        words: Mutex::new(HashMap::new()),
    }))
    .cast::<UserDict>()
}

#[unsafe(no_mangle)]
pub extern "C" fn voicevox_user_dict_load(
    user_dict: *const UserDict,
    dict_path: *const c_char,
) -> i32 {
    if user_dict.is_null() {
        return NOT_LOADED_ERROR;
    }
    match unsafe { read_str(dict_path) } {
        Some(path) if Path::new(&path).is_file() => OK,
        _ => FILE_NOT_FOUND_ERROR,
    }
}

unsafe fn stored_word(word: *const UserDictWordV16) -> Option<StoredWord> {
    let word = unsafe { &*word };
    Some(StoredWord {
        surface: unsafe { read_str(word.surface) }?,
        pronunciation: unsafe { read_str(word.pronunciation) }?,
        accent_type: word.accent_type,
        word_type: word.word_type,
        priority: word.priority,
    })
}

#[unsafe(no_mangle)]
pub extern "C" fn voicevox_user_dict_add_word(
    user_dict: *const UserDict,
    word: *const UserDictWordV16,
    output_word_uuid: *mut [u8; 16],
) -> i32 {
    let dict = unsafe { &*user_dict.cast::<StubUserDict>() };
    let Some(stored) = (unsafe { stored_word(word) }) else {
        return WORD_NOT_FOUND_ERROR;
    };
    let uuid = sequential_uuid(WORD_COUNTER.fetch_add(1, Ordering::Relaxed));
    dict.words.lock().expect("stub lock").insert(uuid, stored);
    unsafe { output_word_uuid.write(uuid) };
    OK
}

#[unsafe(no_mangle)]
pub extern "C" fn voicevox_user_dict_update_word(
    user_dict: *const UserDict,
    word_uuid: *const [u8; 16],
    word: *const UserDictWordV16,
) -> i32 {
    let dict = unsafe { &*user_dict.cast::<StubUserDict>() };
    let uuid = unsafe { *word_uuid };
    let Some(stored) = (unsafe { stored_word(word) }) else {
        return WORD_NOT_FOUND_ERROR;
    };
    let mut words = dict.words.lock().expect("stub lock");
    if !words.contains_key(&uuid) {
        return WORD_NOT_FOUND_ERROR;
    }
    words.insert(uuid, stored);
    OK
}

#[unsafe(no_mangle)]
pub extern "C" fn voicevox_user_dict_remove_word(
    user_dict: *const UserDict,
    word_uuid: *const [u8; 16],
) -> i32 {
    let dict = unsafe { &*user_dict.cast::<StubUserDict>() };
    let uuid = unsafe { *word_uuid };
    if dict.words.lock().expect("stub lock").remove(&uuid).is_some() {
        OK
    } else {
        WORD_NOT_FOUND_ERROR
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn voicevox_user_dict_to_json(
    user_dict: *const UserDict,
    output_json: *mut *mut c_char,
) -> i32 {
    let dict = unsafe { &*user_dict.cast::<StubUserDict>() };
    let words = dict.words.lock().expect("stub lock");
    let mut map = serde_json::Map::new();
    for (uuid, word) in words.iter() {
        map.insert(
            hyphenated(uuid),
            json!({
                "surface": word.surface,
                "pronunciation": word.pronunciation,
                "accent_type": word.accent_type,
                "word_type": word_type_label(word.word_type),
                "priority": word.priority,
            }),
        );
    }
    unsafe { output_json.write(alloc_cstring(&serde_json::Value::Object(map).to_string())) };
    OK
}

#[unsafe(no_mangle)]
pub extern "C" fn voicevox_user_dict_import(
    user_dict: *const UserDict,
    other_dict: *const UserDict,
) -> i32 {
    let dict = unsafe { &*user_dict.cast::<StubUserDict>() };
    let other = unsafe { &*other_dict.cast::<StubUserDict>() };
    let imported: Vec<([u8; 16], StoredWord)> = other
        .words
        .lock()
        .expect("stub lock")
        .iter()
        .map(|(uuid, word)| (*uuid, word.clone()))
        .collect();
    let mut words = dict.words.lock().expect("stub lock");
    for (uuid, word) in imported {
        words.insert(uuid, word);
    }
    OK
}

#[unsafe(no_mangle)]
pub extern "C" fn voicevox_user_dict_save(
    user_dict: *const UserDict,
    path: *const c_char,
) -> i32 {
    if user_dict.is_null() {
        return NOT_LOADED_ERROR;
    }
    match unsafe { read_str(path) } {
        Some(path) => match std::fs::write(&path, b"stub dictionary") {
            Ok(()) => OK,
            Err(_) => FILE_NOT_FOUND_ERROR,
        },
        None => FILE_NOT_FOUND_ERROR,
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn voicevox_user_dict_delete(user_dict: *mut UserDict) {
    if !user_dict.is_null() {
        drop(unsafe { Box::from_raw(user_dict.cast::<StubUserDict>()) });
    }
}
