//! End-to-end flows against the fake v0.16 engine library.

mod common;

use voxbridge_adapter::{AdapterError, EngineAdapter, Value};
use voxbridge_handles::{HandleError, ResourceKind};
use voxbridge_loader::LoaderError;

const TESTLIB: &str = "voxbridge_testlib_v16";

fn dict_dir() -> String {
    env!("CARGO_MANIFEST_DIR").to_owned()
}

fn loaded_adapter() -> Option<(EngineAdapter, std::path::PathBuf)> {
    let path = common::require_testlib(TESTLIB)?;
    let adapter = EngineAdapter::new();
    adapter.load(&path).expect("fixture library loads");
    Some((adapter, path))
}

#[test]
fn test_load_then_unload_leaves_nothing_usable() {
    let Some((adapter, _)) = loaded_adapter() else {
        return;
    };

    assert!(adapter.get_version_v0_14().unwrap().is_ok());
    adapter.unload().unwrap();

    assert!(matches!(
        adapter.get_version_v0_14().unwrap_err(),
        AdapterError::LibraryNotLoaded
    ));
    assert!(matches!(
        adapter.unload().unwrap_err(),
        AdapterError::LibraryNotLoaded
    ));
}

#[test]
fn test_full_synthesis_flow() {
    let Some((adapter, lib_path)) = loaded_adapter() else {
        return;
    };

    let version = adapter.get_version_v0_14().unwrap();
    assert!(matches!(version.value, Some(Value::Str(ref v)) if !v.is_empty()));

    // Text analyzer and synthesizer against it, CPU mode, auto thread count.
    assert_eq!(adapter.open_jtalk_rc_new_v0_16(&dict_dir(), 0).unwrap().code, Some(0));
    assert_eq!(adapter.synthesizer_new_v0_16(0, 0, 1, 0).unwrap().code, Some(0));
    let gpu = adapter.synthesizer_is_gpu_mode_v0_16(0).unwrap();
    assert_eq!(gpu.value, Some(Value::Bool(false)));

    // Any existing file serves as a voice model for the fixture engine; use
    // the engine library itself.
    let model_path = lib_path.to_string_lossy().into_owned();
    assert_eq!(
        adapter.voice_model_new_from_path_v0_16(&model_path, 0).unwrap().code,
        Some(0)
    );
    let Some(Value::Str(model_id)) = adapter.voice_model_id_v0_16(0).unwrap().value else {
        panic!("model id must be a string");
    };
    assert!(!model_id.is_empty());

    let Some(Value::Str(metas)) = adapter.voice_model_get_metas_json_v0_16(0).unwrap().value
    else {
        panic!("metas must be a string");
    };
    let metas: serde_json::Value = serde_json::from_str(&metas).expect("valid metas json");
    assert!(metas.is_array());

    assert_eq!(adapter.synthesizer_load_voice_model_v0_16(0, 0).unwrap().code, Some(0));
    let loaded = adapter.synthesizer_is_loaded_voice_model_v0_16(0, &model_id).unwrap();
    assert_eq!(loaded.value, Some(Value::Bool(true)));

    let devices = adapter.create_supported_devices_json_v0_16().unwrap();
    assert_eq!(devices.code, Some(0));
    assert!(matches!(devices.value, Some(Value::Str(ref s)) if s.contains("cpu")));

    // Audio query from Japanese text, then synthesis from that query.
    let query = adapter
        .synthesizer_create_audio_query_v0_16(0, "こんにちは", 2)
        .unwrap();
    assert_eq!(query.code, Some(0));
    let Some(Value::Str(query_json)) = query.value else {
        panic!("audio query must be a string");
    };
    assert!(!query_json.is_empty());
    serde_json::from_str::<serde_json::Value>(&query_json).expect("valid audio query json");

    let audio = adapter
        .synthesizer_synthesis_v0_16(0, &query_json, 2, false)
        .unwrap();
    assert_eq!(audio.code, Some(0));
    let Some(Value::Bytes(wav)) = audio.value else {
        panic!("synthesis must produce bytes");
    };
    assert!(!wav.is_empty());
    assert_eq!(&wav[..4], b"RIFF");

    // Accent-phrase pipeline and the one-call shortcut.
    let phrases = adapter
        .synthesizer_create_accent_phrases_v0_16(0, "こんにちは", 2)
        .unwrap();
    assert_eq!(phrases.code, Some(0));
    let Some(Value::Str(phrases_json)) = phrases.value else {
        panic!("accent phrases must be a string");
    };
    let rewritten = adapter
        .synthesizer_replace_mora_pitch_v0_16(0, &phrases_json, 2)
        .unwrap();
    assert_eq!(rewritten.code, Some(0));
    assert_eq!(rewritten.value, Some(Value::Str(phrases_json)));

    let tts = adapter.synthesizer_tts_v0_16(0, "こんにちは", 2, true).unwrap();
    assert_eq!(tts.code, Some(0));
    assert!(matches!(tts.value, Some(Value::Bytes(ref b)) if b.starts_with(b"RIFF")));

    assert_eq!(adapter.synthesizer_unload_voice_model_v0_16(0, &model_id).unwrap().code, Some(0));
    adapter.voice_model_delete_v0_16(0).unwrap();
    adapter.synthesizer_delete_v0_16(0).unwrap();
    adapter.open_jtalk_rc_delete_v0_16(0).unwrap();
}

#[test]
fn test_synthesis_without_model_reports_engine_code() {
    let Some((adapter, _)) = loaded_adapter() else {
        return;
    };

    adapter.open_jtalk_rc_new_v0_16(&dict_dir(), 10).unwrap();
    adapter.synthesizer_new_v0_16(10, 10, 1, 0).unwrap();

    // No voice model loaded: the engine's own code comes back, not a crash
    // and not an adapter error.
    let query = adapter
        .synthesizer_create_audio_query_v0_16(10, "こんにちは", 2)
        .unwrap();
    assert_ne!(query.code, Some(0));
    assert!(query.value.is_none());

    let message = adapter
        .error_result_to_message_v0_12(query.code.unwrap() as u32)
        .unwrap();
    assert!(matches!(message.value, Some(Value::Str(ref m)) if !m.is_empty()));

    adapter.synthesizer_delete_v0_16(10).unwrap();
    adapter.open_jtalk_rc_delete_v0_16(10).unwrap();
}

#[test]
fn test_user_dict_round_trip() {
    let Some((adapter, _)) = loaded_adapter() else {
        return;
    };

    adapter.user_dict_new_v0_16(1).unwrap();
    let added = adapter
        .user_dict_add_word_v0_16(1, "東北きりたん", "トウホクキリタン", 1, 7, 0)
        .unwrap();
    assert_eq!(added.code, Some(0));
    let Some(Value::Bytes(uuid)) = added.value else {
        panic!("add word must return uuid bytes");
    };
    let uuid: [u8; 16] = uuid.as_slice().try_into().unwrap();

    let exported = adapter.user_dict_to_json_v0_16(1).unwrap();
    assert_eq!(exported.code, Some(0));
    let Some(Value::Str(json)) = exported.value else {
        panic!("export must be a string");
    };
    let words: serde_json::Value = serde_json::from_str(&json).unwrap();
    let entry = words
        .as_object()
        .and_then(|map| map.values().next())
        .expect("one exported word");
    assert_eq!(entry["surface"], "東北きりたん");
    assert_eq!(entry["pronunciation"], "トウホクキリタン");
    assert_eq!(entry["accent_type"], 1);
    assert_eq!(entry["priority"], 7);
    assert_eq!(entry["word_type"], "PROPER_NOUN");

    // Import into a fresh dictionary reproduces the same fields.
    adapter.user_dict_new_v0_16(2).unwrap();
    assert_eq!(adapter.user_dict_import_v0_16(2, 1).unwrap().code, Some(0));
    let reimported = adapter.user_dict_to_json_v0_16(2).unwrap();
    let Some(Value::Str(json2)) = reimported.value else {
        panic!("export must be a string");
    };
    assert_eq!(
        serde_json::from_str::<serde_json::Value>(&json2).unwrap(),
        words
    );

    let updated = adapter
        .user_dict_update_word_v0_16(1, "東北きりたん", "キリタン", 2, 9, 1, uuid)
        .unwrap();
    assert_eq!(updated.code, Some(0));

    assert_eq!(adapter.user_dict_remove_word_v0_16(1, uuid).unwrap().code, Some(0));
    // Removing again reports the engine's word-not-found code.
    assert_ne!(adapter.user_dict_remove_word_v0_16(1, uuid).unwrap().code, Some(0));

    adapter.user_dict_delete_v0_16(1).unwrap();
    adapter.user_dict_delete_v0_16(2).unwrap();
}

#[test]
fn test_stale_handles_fail_lookup() {
    let Some((adapter, _)) = loaded_adapter() else {
        return;
    };

    adapter.open_jtalk_rc_new_v0_16(&dict_dir(), 77).unwrap();
    adapter.open_jtalk_rc_delete_v0_16(77).unwrap();

    // The dependency was destructed; construction against it must fail the
    // lookup instead of dereferencing a stale pointer.
    let err = adapter.synthesizer_new_v0_16(77, 77, 1, 0).unwrap_err();
    assert!(matches!(
        err,
        AdapterError::Handle(HandleError::NotFound { key: 77, kind: ResourceKind::TextAnalyzer })
    ));

    let err = adapter.voice_model_id_v0_16(99).unwrap_err();
    assert!(matches!(
        err,
        AdapterError::Handle(HandleError::NotFound { key: 99, kind: ResourceKind::VoiceModel })
    ));
}

#[test]
fn test_missing_symbol_is_reported_by_exact_name() {
    let Some((adapter, _)) = loaded_adapter() else {
        return;
    };

    // The v0.16 fixture does not export the v0.14 global initializer; the
    // recoverable resolver names the symbol it could not find.
    let err = adapter.initialize_v0_14(0, 0, false, &dict_dir()).unwrap_err();
    match err {
        AdapterError::Loader(LoaderError::SymbolNotFound { symbol }) => {
            assert_eq!(symbol, "voicevox_initialize");
        }
        other => panic!("expected SymbolNotFound, got {other}"),
    }
}

#[test]
fn test_dispatch_surface_round_trip() {
    let Some((adapter, _)) = loaded_adapter() else {
        return;
    };

    let reply = adapter.invoke("get_version_v0_14", &[]).unwrap();
    assert!(matches!(reply.value, Some(Value::Str(ref v)) if v.contains("stub")));

    adapter
        .invoke(
            "open_jtalk_rc_new_v0_16",
            &[Value::Str(dict_dir()), Value::U32(50)],
        )
        .unwrap();
    let reply = adapter
        .invoke(
            "synthesizer_new_v0_16",
            &[Value::U32(50), Value::U32(50), Value::U32(1), Value::U32(0)],
        )
        .unwrap();
    assert_eq!(reply.code, Some(0));

    // Positional contract violation surfaces as a typed marshalling error.
    let err = adapter
        .invoke("synthesizer_new_v0_16", &[Value::Str("context".into())])
        .unwrap_err();
    assert!(matches!(err, AdapterError::Marshal(_)));

    adapter.invoke("synthesizer_delete_v0_16", &[Value::U32(50)]).unwrap();
    adapter.invoke("open_jtalk_rc_delete_v0_16", &[Value::U32(50)]).unwrap();
}
