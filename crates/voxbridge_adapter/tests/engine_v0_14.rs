//! End-to-end flow against the fake v0.14/v0.15 engine library.
//!
//! That engine is a process-wide singleton, so the whole flow lives in one
//! test function: the not-initialized failures are asserted first, then the
//! engine is initialised and exercised, then finalised.

mod common;

use voxbridge_adapter::{EngineAdapter, Value};

const TESTLIB: &str = "voxbridge_testlib_v14";

#[test]
fn test_global_state_engine_flow() {
    let Some(path) = common::require_testlib(TESTLIB) else {
        return;
    };
    let adapter = EngineAdapter::new();
    adapter.load(&path).unwrap();
    let dict_dir = env!("CARGO_MANIFEST_DIR");

    // Before initialisation the engine reports its own failure code.
    let early = adapter.audio_query_v0_14("こんにちは", 2, false).unwrap();
    assert_ne!(early.code, Some(0));
    let message = adapter
        .error_result_to_message_v0_12(early.code.unwrap() as u32)
        .unwrap();
    assert!(matches!(message.value, Some(Value::Str(ref m)) if !m.is_empty()));

    assert_eq!(adapter.initialize_v0_14(1, 0, false, dict_dir).unwrap().code, Some(0));
    assert_eq!(adapter.load_model_v0_14(2).unwrap().code, Some(0));
    assert_eq!(
        adapter.is_model_loaded_v0_14(2).unwrap().value,
        Some(Value::Bool(true))
    );
    assert_eq!(
        adapter.is_gpu_mode_v0_14().unwrap().value,
        Some(Value::Bool(false))
    );
    assert!(matches!(
        adapter.get_metas_json_v0_14().unwrap().value,
        Some(Value::Str(ref s)) if !s.is_empty()
    ));
    assert!(matches!(
        adapter.get_supported_devices_json_v0_14().unwrap().value,
        Some(Value::Str(ref s)) if s.contains("cpu")
    ));

    // Inference surface: native array lengths always come from the inputs.
    let duration = adapter.predict_duration_v0_14(&[3, 5, 17], 2).unwrap();
    assert_eq!(duration.code, Some(0));
    assert!(matches!(duration.value, Some(Value::FloatList(ref d)) if d.len() == 3));

    let sequence = vec![1i64, 2, 3, 4];
    let intonation = adapter
        .predict_intonation_v0_14(
            &sequence, &sequence, &sequence, &sequence, &sequence, &sequence, 2,
        )
        .unwrap();
    assert_eq!(intonation.code, Some(0));
    assert!(matches!(intonation.value, Some(Value::FloatList(ref d)) if d.len() == 4));

    let decoded = adapter.decode_v0_14(&[5.5, 5.6], &[0.0; 2 * 45], 2).unwrap();
    assert_eq!(decoded.code, Some(0));
    assert!(matches!(decoded.value, Some(Value::FloatList(ref d)) if d.len() == 2 * 256));

    // Query, synthesis and the one-call shortcut.
    let query = adapter.audio_query_v0_14("こんにちは", 2, false).unwrap();
    assert_eq!(query.code, Some(0));
    let Some(Value::Str(query_json)) = query.value else {
        panic!("audio query must be a string");
    };
    serde_json::from_str::<serde_json::Value>(&query_json).expect("valid audio query json");

    let audio = adapter.synthesis_v0_14(&query_json, 2, true).unwrap();
    assert_eq!(audio.code, Some(0));
    assert!(matches!(audio.value, Some(Value::Bytes(ref wav)) if wav.starts_with(b"RIFF")));

    let tts = adapter.tts_v0_14("こんにちは", 2, false, false).unwrap();
    assert_eq!(tts.code, Some(0));
    assert!(matches!(tts.value, Some(Value::Bytes(ref wav)) if wav.starts_with(b"RIFF")));

    // v0.15 accent-phrase pipeline; the rewrite passes echo the payload.
    let phrases = adapter.accent_phrases_v0_15("こんにちは", 2, false).unwrap();
    assert_eq!(phrases.code, Some(0));
    let Some(Value::Str(phrases_json)) = phrases.value else {
        panic!("accent phrases must be a string");
    };
    for reply in [
        adapter.mora_length_v0_15(&phrases_json, 2).unwrap(),
        adapter.mora_pitch_v0_15(&phrases_json, 2).unwrap(),
        adapter.mora_data_v0_15(&phrases_json, 2).unwrap(),
    ] {
        assert_eq!(reply.code, Some(0));
        assert_eq!(reply.value, Some(Value::Str(phrases_json.clone())));
    }

    adapter.finalize_v0_14().unwrap();
    assert_eq!(
        adapter.is_model_loaded_v0_14(2).unwrap().value,
        Some(Value::Bool(false))
    );
}
