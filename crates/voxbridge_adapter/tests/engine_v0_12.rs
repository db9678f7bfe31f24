//! End-to-end flow against the fake v0.12-line engine library, covering the
//! boolean legacy surface, the first `voicevox_*` entry points, and the v0.8
//! inference signatures that this release line kept.

mod common;

use voxbridge_adapter::{AdapterError, EngineAdapter, Value};

const TESTLIB: &str = "voxbridge_testlib_v12";

#[test]
fn test_legacy_engine_flow() {
    let Some(path) = common::require_testlib(TESTLIB) else {
        return;
    };
    let adapter = EngineAdapter::new();
    adapter.load(&path).unwrap();
    let dict_dir = env!("CARGO_MANIFEST_DIR");

    // Boolean failures come back as flags, with last_error_message as the
    // diagnostics channel.
    assert_eq!(
        adapter.load_model_v0_12(2).unwrap().value,
        Some(Value::Bool(false))
    );
    assert!(matches!(
        adapter.last_error_message_v0_5().unwrap().value,
        Some(Value::Str(ref m)) if !m.is_empty()
    ));

    // The fixture has no GPU path; the engine-reported refusal is data.
    assert_eq!(
        adapter.initialize_v0_12(true, 0, false).unwrap().value,
        Some(Value::Bool(false))
    );
    assert_eq!(
        adapter.initialize_v0_12(false, 0, false).unwrap().value,
        Some(Value::Bool(true))
    );
    assert_eq!(
        adapter.load_model_v0_12(2).unwrap().value,
        Some(Value::Bool(true))
    );
    assert_eq!(
        adapter.is_model_loaded_v0_12(2).unwrap().value,
        Some(Value::Bool(true))
    );

    assert!(matches!(
        adapter.metas_v0_5().unwrap().value,
        Some(Value::Str(ref s)) if !s.is_empty()
    ));
    assert!(matches!(
        adapter.supported_devices_v0_10().unwrap().value,
        Some(Value::Str(ref s)) if s.contains("cpu")
    ));

    // Inference: outputs are caller-allocated, sized from the input.
    let duration = adapter.yukarin_s_forward_v0_8(&[3, 5, 17], 2).unwrap();
    assert_eq!(duration.flag, Some(true));
    assert!(matches!(duration.value, Some(Value::FloatList(ref d)) if d.len() == 3));

    let sequence = vec![1i64, 2, 3];
    let intonation = adapter
        .yukarin_sa_forward_v0_8(&sequence, &sequence, &sequence, &sequence, &sequence, &sequence, 2)
        .unwrap();
    assert_eq!(intonation.flag, Some(true));
    assert!(matches!(intonation.value, Some(Value::FloatList(ref d)) if d.len() == 3));

    // Mismatched parallel sequences are rejected before any engine call.
    let err = adapter
        .yukarin_sa_forward_v0_8(&[1, 2, 3, 4, 5], &[1, 2, 3], &sequence, &sequence, &sequence, &sequence, 2)
        .unwrap_err();
    assert!(matches!(err, AdapterError::Marshal(_)));

    let decoded = adapter.decode_forward_v0_8(&[5.5, 5.6], &[0.0; 90], 2).unwrap();
    assert_eq!(decoded.flag, Some(true));
    assert!(matches!(decoded.value, Some(Value::FloatList(ref d)) if d.len() == 2));

    // The v0.12 voicevox_* surface with result codes.
    assert_eq!(adapter.load_openjtalk_dict_v0_12(dict_dir).unwrap().code, Some(0));
    assert_ne!(
        adapter.load_openjtalk_dict_v0_12("/no/such/dictionary").unwrap().code,
        Some(0)
    );

    let tts = adapter.tts_v0_12("こんにちは", 2).unwrap();
    assert_eq!(tts.code, Some(0));
    assert!(matches!(tts.value, Some(Value::Bytes(ref wav)) if wav.starts_with(b"RIFF")));

    let kana = adapter.tts_from_kana_v0_12("コンニチワ'", 2).unwrap();
    assert_eq!(kana.code, Some(0));
    assert!(matches!(kana.value, Some(Value::Bytes(ref wav)) if !wav.is_empty()));

    let message = adapter.error_result_to_message_v0_12(0).unwrap();
    assert_eq!(message.value, Some(Value::Str("OK".into())));

    adapter.finalize_v0_10().unwrap();
    assert_eq!(
        adapter.is_model_loaded_v0_12(2).unwrap().value,
        Some(Value::Bool(false))
    );
}
