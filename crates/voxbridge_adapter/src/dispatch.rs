//! String-keyed operation dispatch: the surface a scripting host binds to.
//!
//! Every exposed operation is addressed by name, with the ABI generation spelt
//! out in the suffix — selecting the generation is always explicit, never
//! inferred from the loaded library. Arguments are read positionally with the
//! `(index, type)` contracts documented on the typed methods.

use tracing::debug;

use crate::adapter::EngineAdapter;
use crate::args::CallArgs;
use crate::error::AdapterError;
use crate::value::{Reply, Value};

/// Names accepted by [`EngineAdapter::invoke`], in registry order.
pub const OPERATIONS: &[&str] = &[
    "load",
    "unload",
    "get_version_v0_14",
    "error_result_to_message_v0_12",
    // v0.16 handle-based surface
    "open_jtalk_rc_new_v0_16",
    "open_jtalk_rc_use_user_dict_v0_16",
    "open_jtalk_rc_delete_v0_16",
    "voice_model_new_from_path_v0_16",
    "voice_model_id_v0_16",
    "voice_model_get_metas_json_v0_16",
    "voice_model_delete_v0_16",
    "synthesizer_new_v0_16",
    "synthesizer_delete_v0_16",
    "synthesizer_load_voice_model_v0_16",
    "synthesizer_unload_voice_model_v0_16",
    "synthesizer_is_gpu_mode_v0_16",
    "synthesizer_is_loaded_voice_model_v0_16",
    "synthesizer_create_metas_json_v0_16",
    "create_supported_devices_json_v0_16",
    "synthesizer_create_audio_query_from_kana_v0_16",
    "synthesizer_create_audio_query_v0_16",
    "synthesizer_create_accent_phrases_from_kana_v0_16",
    "synthesizer_create_accent_phrases_v0_16",
    "synthesizer_replace_mora_data_v0_16",
    "synthesizer_replace_phoneme_length_v0_16",
    "synthesizer_replace_mora_pitch_v0_16",
    "synthesizer_synthesis_v0_16",
    "synthesizer_tts_from_kana_v0_16",
    "synthesizer_tts_v0_16",
    "user_dict_new_v0_16",
    "user_dict_load_v0_16",
    "user_dict_add_word_v0_16",
    "user_dict_update_word_v0_16",
    "user_dict_remove_word_v0_16",
    "user_dict_to_json_v0_16",
    "user_dict_import_v0_16",
    "user_dict_save_v0_16",
    "user_dict_delete_v0_16",
    // v0.14 / v0.15 global-state surface
    "initialize_v0_14",
    "load_model_v0_14",
    "is_gpu_mode_v0_14",
    "is_model_loaded_v0_14",
    "finalize_v0_14",
    "get_metas_json_v0_14",
    "get_supported_devices_json_v0_14",
    "predict_duration_v0_14",
    "predict_intonation_v0_14",
    "decode_v0_14",
    "audio_query_v0_14",
    "synthesis_v0_14",
    "tts_v0_14",
    "accent_phrases_v0_15",
    "mora_length_v0_15",
    "mora_pitch_v0_15",
    "mora_data_v0_15",
    // v0.5 – v0.12 legacy surface
    "initialize_v0_12",
    "load_model_v0_12",
    "is_model_loaded_v0_12",
    "load_openjtalk_dict_v0_12",
    "tts_v0_12",
    "tts_from_kana_v0_12",
    "initialize_v0_10",
    "finalize_v0_10",
    "supported_devices_v0_10",
    "initialize_v0_5",
    "metas_v0_5",
    "last_error_message_v0_5",
    "yukarin_s_forward_v0_8",
    "yukarin_sa_forward_v0_8",
    "decode_forward_v0_8",
    "yukarin_s_forward_v0_5",
    "yukarin_sa_forward_v0_5",
    "decode_forward_v0_5",
];

impl EngineAdapter {
    /// Dispatch one named operation with positional arguments.
    #[allow(clippy::too_many_lines)]
    pub fn invoke(&self, operation: &str, args: &[Value]) -> Result<Reply, AdapterError> {
        let args = CallArgs::new(args);
        debug!(operation, argc = args.len(), "dispatching engine operation");
        match operation {
            "load" => {
                let path = args.str_at(0)?;
                self.load(std::path::Path::new(path))?;
                Ok(Reply::empty())
            }
            "unload" => {
                self.unload()?;
                Ok(Reply::empty())
            }
            "get_version_v0_14" => self.get_version_v0_14(),
            "error_result_to_message_v0_12" => {
                self.error_result_to_message_v0_12(args.u32_at(0)?)
            }

            "open_jtalk_rc_new_v0_16" => {
                self.open_jtalk_rc_new_v0_16(args.str_at(0)?, args.u32_at(1)?)
            }
            "open_jtalk_rc_use_user_dict_v0_16" => {
                self.open_jtalk_rc_use_user_dict_v0_16(args.u32_at(0)?, args.u32_at(1)?)
            }
            "open_jtalk_rc_delete_v0_16" => self.open_jtalk_rc_delete_v0_16(args.u32_at(0)?),
            "voice_model_new_from_path_v0_16" => {
                self.voice_model_new_from_path_v0_16(args.str_at(0)?, args.u32_at(1)?)
            }
            "voice_model_id_v0_16" => self.voice_model_id_v0_16(args.u32_at(0)?),
            "voice_model_get_metas_json_v0_16" => {
                self.voice_model_get_metas_json_v0_16(args.u32_at(0)?)
            }
            "voice_model_delete_v0_16" => self.voice_model_delete_v0_16(args.u32_at(0)?),
            "synthesizer_new_v0_16" => self.synthesizer_new_v0_16(
                args.u32_at(0)?,
                args.u32_at(1)?,
                args.u32_at(2)?,
                args.u32_at(3)?,
            ),
            "synthesizer_delete_v0_16" => self.synthesizer_delete_v0_16(args.u32_at(0)?),
            "synthesizer_load_voice_model_v0_16" => {
                self.synthesizer_load_voice_model_v0_16(args.u32_at(0)?, args.u32_at(1)?)
            }
            "synthesizer_unload_voice_model_v0_16" => {
                self.synthesizer_unload_voice_model_v0_16(args.u32_at(0)?, args.str_at(1)?)
            }
            "synthesizer_is_gpu_mode_v0_16" => {
                self.synthesizer_is_gpu_mode_v0_16(args.u32_at(0)?)
            }
            "synthesizer_is_loaded_voice_model_v0_16" => {
                self.synthesizer_is_loaded_voice_model_v0_16(args.u32_at(0)?, args.str_at(1)?)
            }
            "synthesizer_create_metas_json_v0_16" => {
                self.synthesizer_create_metas_json_v0_16(args.u32_at(0)?)
            }
            "create_supported_devices_json_v0_16" => self.create_supported_devices_json_v0_16(),
            "synthesizer_create_audio_query_from_kana_v0_16" => self
                .synthesizer_create_audio_query_from_kana_v0_16(
                    args.u32_at(0)?,
                    args.str_at(1)?,
                    args.u32_at(2)?,
                ),
            "synthesizer_create_audio_query_v0_16" => self.synthesizer_create_audio_query_v0_16(
                args.u32_at(0)?,
                args.str_at(1)?,
                args.u32_at(2)?,
            ),
            "synthesizer_create_accent_phrases_from_kana_v0_16" => self
                .synthesizer_create_accent_phrases_from_kana_v0_16(
                    args.u32_at(0)?,
                    args.str_at(1)?,
                    args.u32_at(2)?,
                ),
            "synthesizer_create_accent_phrases_v0_16" => self
                .synthesizer_create_accent_phrases_v0_16(
                    args.u32_at(0)?,
                    args.str_at(1)?,
                    args.u32_at(2)?,
                ),
            "synthesizer_replace_mora_data_v0_16" => self.synthesizer_replace_mora_data_v0_16(
                args.u32_at(0)?,
                args.str_at(1)?,
                args.u32_at(2)?,
            ),
            "synthesizer_replace_phoneme_length_v0_16" => self
                .synthesizer_replace_phoneme_length_v0_16(
                    args.u32_at(0)?,
                    args.str_at(1)?,
                    args.u32_at(2)?,
                ),
            "synthesizer_replace_mora_pitch_v0_16" => self.synthesizer_replace_mora_pitch_v0_16(
                args.u32_at(0)?,
                args.str_at(1)?,
                args.u32_at(2)?,
            ),
            "synthesizer_synthesis_v0_16" => self.synthesizer_synthesis_v0_16(
                args.u32_at(0)?,
                args.str_at(1)?,
                args.u32_at(2)?,
                args.bool_at(3)?,
            ),
            "synthesizer_tts_from_kana_v0_16" => self.synthesizer_tts_from_kana_v0_16(
                args.u32_at(0)?,
                args.str_at(1)?,
                args.u32_at(2)?,
                args.bool_at(3)?,
            ),
            "synthesizer_tts_v0_16" => self.synthesizer_tts_v0_16(
                args.u32_at(0)?,
                args.str_at(1)?,
                args.u32_at(2)?,
                args.bool_at(3)?,
            ),
            "user_dict_new_v0_16" => self.user_dict_new_v0_16(args.u32_at(0)?),
            "user_dict_load_v0_16" => {
                self.user_dict_load_v0_16(args.u32_at(0)?, args.str_at(1)?)
            }
            "user_dict_add_word_v0_16" => self.user_dict_add_word_v0_16(
                args.u32_at(0)?,
                args.str_at(1)?,
                args.str_at(2)?,
                args.u32_at(3)?,
                args.u32_at(4)?,
                args.u32_at(5)?,
            ),
            "user_dict_update_word_v0_16" => self.user_dict_update_word_v0_16(
                args.u32_at(0)?,
                args.str_at(1)?,
                args.str_at(2)?,
                args.u32_at(3)?,
                args.u32_at(4)?,
                args.u32_at(5)?,
                args.uuid_at(6)?,
            ),
            "user_dict_remove_word_v0_16" => {
                self.user_dict_remove_word_v0_16(args.u32_at(0)?, args.uuid_at(1)?)
            }
            "user_dict_to_json_v0_16" => self.user_dict_to_json_v0_16(args.u32_at(0)?),
            "user_dict_import_v0_16" => {
                self.user_dict_import_v0_16(args.u32_at(0)?, args.u32_at(1)?)
            }
            "user_dict_save_v0_16" => {
                self.user_dict_save_v0_16(args.u32_at(0)?, args.str_at(1)?)
            }
            "user_dict_delete_v0_16" => self.user_dict_delete_v0_16(args.u32_at(0)?),

            "initialize_v0_14" => self.initialize_v0_14(
                args.u32_at(0)?,
                args.u32_at(1)?,
                args.bool_at(2)?,
                args.str_at(3)?,
            ),
            "load_model_v0_14" => self.load_model_v0_14(args.u32_at(0)?),
            "is_gpu_mode_v0_14" => self.is_gpu_mode_v0_14(),
            "is_model_loaded_v0_14" => self.is_model_loaded_v0_14(args.u32_at(0)?),
            "finalize_v0_14" => self.finalize_v0_14(),
            "get_metas_json_v0_14" => self.get_metas_json_v0_14(),
            "get_supported_devices_json_v0_14" => self.get_supported_devices_json_v0_14(),
            "predict_duration_v0_14" => {
                self.predict_duration_v0_14(args.int_list_at(0)?, args.u32_at(1)?)
            }
            "predict_intonation_v0_14" => self.predict_intonation_v0_14(
                args.int_list_at(0)?,
                args.int_list_at(1)?,
                args.int_list_at(2)?,
                args.int_list_at(3)?,
                args.int_list_at(4)?,
                args.int_list_at(5)?,
                args.u32_at(6)?,
            ),
            "decode_v0_14" => self.decode_v0_14(
                args.float_list_at(0)?,
                args.float_list_at(1)?,
                args.u32_at(2)?,
            ),
            "audio_query_v0_14" => {
                self.audio_query_v0_14(args.str_at(0)?, args.u32_at(1)?, args.bool_at(2)?)
            }
            "synthesis_v0_14" => {
                self.synthesis_v0_14(args.str_at(0)?, args.u32_at(1)?, args.bool_at(2)?)
            }
            "tts_v0_14" => self.tts_v0_14(
                args.str_at(0)?,
                args.u32_at(1)?,
                args.bool_at(2)?,
                args.bool_at(3)?,
            ),
            "accent_phrases_v0_15" => {
                self.accent_phrases_v0_15(args.str_at(0)?, args.u32_at(1)?, args.bool_at(2)?)
            }
            "mora_length_v0_15" => self.mora_length_v0_15(args.str_at(0)?, args.u32_at(1)?),
            "mora_pitch_v0_15" => self.mora_pitch_v0_15(args.str_at(0)?, args.u32_at(1)?),
            "mora_data_v0_15" => self.mora_data_v0_15(args.str_at(0)?, args.u32_at(1)?),

            "initialize_v0_12" => {
                self.initialize_v0_12(args.bool_at(0)?, args.u32_at(1)?, args.bool_at(2)?)
            }
            "load_model_v0_12" => self.load_model_v0_12(args.u32_at(0)?),
            "is_model_loaded_v0_12" => self.is_model_loaded_v0_12(args.u32_at(0)?),
            "load_openjtalk_dict_v0_12" => self.load_openjtalk_dict_v0_12(args.str_at(0)?),
            "tts_v0_12" => self.tts_v0_12(args.str_at(0)?, args.u32_at(1)?),
            "tts_from_kana_v0_12" => self.tts_from_kana_v0_12(args.str_at(0)?, args.u32_at(1)?),
            "initialize_v0_10" => {
                self.initialize_v0_10(args.str_at(0)?, args.bool_at(1)?, args.u32_at(2)?)
            }
            "finalize_v0_10" => self.finalize_v0_10(),
            "supported_devices_v0_10" => self.supported_devices_v0_10(),
            "initialize_v0_5" => self.initialize_v0_5(args.str_at(0)?, args.bool_at(1)?),
            "metas_v0_5" => self.metas_v0_5(),
            "last_error_message_v0_5" => self.last_error_message_v0_5(),
            "yukarin_s_forward_v0_8" => {
                self.yukarin_s_forward_v0_8(args.int_list_at(0)?, args.u32_at(1)?)
            }
            "yukarin_sa_forward_v0_8" => self.yukarin_sa_forward_v0_8(
                args.int_list_at(0)?,
                args.int_list_at(1)?,
                args.int_list_at(2)?,
                args.int_list_at(3)?,
                args.int_list_at(4)?,
                args.int_list_at(5)?,
                args.u32_at(6)?,
            ),
            "decode_forward_v0_8" => self.decode_forward_v0_8(
                args.float_list_at(0)?,
                args.float_list_at(1)?,
                args.u32_at(2)?,
            ),
            "yukarin_s_forward_v0_5" => {
                self.yukarin_s_forward_v0_5(args.int_list_at(0)?, args.u32_at(1)?)
            }
            "yukarin_sa_forward_v0_5" => self.yukarin_sa_forward_v0_5(
                args.int_list_at(0)?,
                args.int_list_at(1)?,
                args.int_list_at(2)?,
                args.int_list_at(3)?,
                args.int_list_at(4)?,
                args.int_list_at(5)?,
                args.u32_at(6)?,
            ),
            "decode_forward_v0_5" => self.decode_forward_v0_5(
                args.float_list_at(0)?,
                args.float_list_at(1)?,
                args.u32_at(2)?,
            ),

            unknown => Err(AdapterError::UnknownOperation(unknown.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    #[test]
    fn test_unknown_operation_is_reported_by_name() {
        let adapter = EngineAdapter::new();
        let err = adapter.invoke("synthesizer_warp_v9", &[]).unwrap_err();
        assert_eq!(err.to_string(), "unknown operation `synthesizer_warp_v9`");
    }

    #[test]
    fn test_every_registered_operation_is_dispatchable() {
        // Each name must reach its handler; with no library loaded every
        // engine-touching operation fails with a marshalling or not-loaded
        // error, never with UnknownOperation.
        let adapter = EngineAdapter::new();
        for op in OPERATIONS {
            if *op == "load" {
                continue;
            }
            let result = adapter.invoke(op, &[]);
            if let Err(AdapterError::UnknownOperation(name)) = &result {
                panic!("operation {name} is registered but not dispatched");
            }
        }
    }

    #[test]
    fn test_operations_fail_closed_without_library() {
        let adapter = EngineAdapter::new();
        let err = adapter
            .invoke("get_version_v0_14", &[])
            .unwrap_err();
        assert!(matches!(err, AdapterError::LibraryNotLoaded));

        let err = adapter
            .invoke("tts_v0_14", &[
                Value::Str("こんにちは".into()),
                Value::U32(2),
                Value::Bool(false),
                Value::Bool(false),
            ])
            .unwrap_err();
        assert!(matches!(err, AdapterError::LibraryNotLoaded));
    }

    #[test]
    fn test_length_mismatch_rejected_before_any_engine_call() {
        // No library is loaded; the mismatch must surface first, proving the
        // check runs before any native buffer or foreign call.
        let adapter = EngineAdapter::new();
        let args = [
            Value::IntList(vec![1, 2, 3, 4, 5]),
            Value::IntList(vec![1, 2, 3]),
            Value::IntList(vec![1, 2, 3, 4, 5]),
            Value::IntList(vec![1, 2, 3, 4, 5]),
            Value::IntList(vec![1, 2, 3, 4, 5]),
            Value::IntList(vec![1, 2, 3, 4, 5]),
            Value::U32(1),
        ];
        let err = adapter.invoke("predict_intonation_v0_14", &args).unwrap_err();
        assert!(err.to_string().contains("differ in length"), "{err}");
    }
}
