//! v0.16 operations: handle-based text analyzer, user dictionary, voice
//! model and synthesizer.
//!
//! Construction operations call the engine, then insert the produced pointer
//! under the caller-assigned key in one critical section. Destruction removes
//! the mapping first, so no other caller can look up a pointer that is about
//! to be freed, then destructs through the engine.

use std::os::raw::c_char;
use std::ptr;

use voxbridge_abi::{
    AccelerationMode, ResultCode, StyleId, Synthesizer, UserDictWordType, RESULT_OK, v0_16,
};
use voxbridge_loader::{EngineLibrary, LoaderError};

use crate::adapter::{copy_cstr, cstring, EngineAdapter};
use crate::error::AdapterError;
use crate::value::{Reply, Value};

impl EngineAdapter {
    /// `(dictDirPath: string, handleKey: u32) -> {resultCode}`
    pub fn open_jtalk_rc_new_v0_16(
        &self,
        dict_dir: &str,
        handle_key: u32,
    ) -> Result<Reply, AdapterError> {
        let lib = self.engine()?;
        let dict_dir = cstring(dict_dir)?;
        let mut out = ptr::null_mut();
        let code = unsafe { v0_16::open_jtalk_rc_new(&lib, dict_dir.as_ptr(), &raw mut out)? };
        if code == RESULT_OK && !out.is_null() {
            self.text_analyzers.insert(handle_key, out);
        }
        Ok(Reply::code(code))
    }

    /// `(handleKey: u32, userDictHandleKey: u32) -> {resultCode}`
    pub fn open_jtalk_rc_use_user_dict_v0_16(
        &self,
        handle_key: u32,
        user_dict_key: u32,
    ) -> Result<Reply, AdapterError> {
        let lib = self.engine()?;
        let open_jtalk = self.text_analyzers.get(handle_key)?;
        let user_dict = self.user_dicts.get(user_dict_key)?;
        let code = unsafe { v0_16::open_jtalk_rc_use_user_dict(&lib, open_jtalk, user_dict)? };
        Ok(Reply::code(code))
    }

    /// `(handleKey: u32) -> {}`
    pub fn open_jtalk_rc_delete_v0_16(&self, handle_key: u32) -> Result<Reply, AdapterError> {
        let lib = self.engine()?;
        let open_jtalk = self.text_analyzers.remove(handle_key)?;
        unsafe { v0_16::open_jtalk_rc_delete(&lib, open_jtalk)? };
        Ok(Reply::empty())
    }

    /// `(path: string, handleKey: u32) -> {resultCode}`
    pub fn voice_model_new_from_path_v0_16(
        &self,
        path: &str,
        handle_key: u32,
    ) -> Result<Reply, AdapterError> {
        let lib = self.engine()?;
        let path = cstring(path)?;
        let mut out = ptr::null_mut();
        let code = unsafe { v0_16::voice_model_new_from_path(&lib, path.as_ptr(), &raw mut out)? };
        if code == RESULT_OK && !out.is_null() {
            self.voice_models.insert(handle_key, out);
        }
        Ok(Reply::code(code))
    }

    /// `(handleKey: u32) -> {id: string}`
    pub fn voice_model_id_v0_16(&self, handle_key: u32) -> Result<Reply, AdapterError> {
        let lib = self.engine()?;
        let model = self.voice_models.get(handle_key)?;
        let id = unsafe { v0_16::voice_model_id(&lib, model)? };
        Ok(Reply::value(Value::Str(unsafe { copy_cstr(id) })))
    }

    /// `(handleKey: u32) -> {json: string}`
    pub fn voice_model_get_metas_json_v0_16(&self, handle_key: u32) -> Result<Reply, AdapterError> {
        let lib = self.engine()?;
        let model = self.voice_models.get(handle_key)?;
        let metas = unsafe { v0_16::voice_model_get_metas_json(&lib, model)? };
        Ok(Reply::value(Value::Str(unsafe { copy_cstr(metas) })))
    }

    /// `(handleKey: u32) -> {}`
    pub fn voice_model_delete_v0_16(&self, handle_key: u32) -> Result<Reply, AdapterError> {
        let lib = self.engine()?;
        let model = self.voice_models.remove(handle_key)?;
        unsafe { v0_16::voice_model_delete(&lib, model)? };
        Ok(Reply::empty())
    }

    /// `(contextHandleKey: u32, handleKey: u32, accelerationMode: u32,
    /// cpuNumThreads: u32) -> {resultCode}`
    ///
    /// The text-analyzer dependency is looked up first; constructing against
    /// a removed context fails the lookup instead of dereferencing a stale
    /// pointer.
    pub fn synthesizer_new_v0_16(
        &self,
        context_key: u32,
        handle_key: u32,
        acceleration_mode: u32,
        cpu_num_threads: u32,
    ) -> Result<Reply, AdapterError> {
        let lib = self.engine()?;
        let open_jtalk = self.text_analyzers.get(context_key)?;
        let mut options = unsafe { v0_16::make_default_initialize_options(&lib)? };
        options.acceleration_mode = AccelerationMode::from_wire(acceleration_mode);
        options.cpu_num_threads = cpu_num_threads as u16;
        let mut out = ptr::null_mut();
        let code = unsafe { v0_16::synthesizer_new(&lib, open_jtalk, options, &raw mut out)? };
        if code == RESULT_OK && !out.is_null() {
            self.synthesizers.insert(handle_key, out);
        }
        Ok(Reply::code(code))
    }

    /// `(handleKey: u32) -> {}`
    pub fn synthesizer_delete_v0_16(&self, handle_key: u32) -> Result<Reply, AdapterError> {
        let lib = self.engine()?;
        let synthesizer = self.synthesizers.remove(handle_key)?;
        unsafe { v0_16::synthesizer_delete(&lib, synthesizer)? };
        Ok(Reply::empty())
    }

    /// `(handleKey: u32, modelHandleKey: u32) -> {resultCode}`
    pub fn synthesizer_load_voice_model_v0_16(
        &self,
        handle_key: u32,
        model_key: u32,
    ) -> Result<Reply, AdapterError> {
        let lib = self.engine()?;
        let synthesizer = self.synthesizers.get(handle_key)?;
        let model = self.voice_models.get(model_key)?;
        let code = unsafe { v0_16::synthesizer_load_voice_model(&lib, synthesizer, model)? };
        Ok(Reply::code(code))
    }

    /// `(handleKey: u32, modelId: string) -> {resultCode}`
    pub fn synthesizer_unload_voice_model_v0_16(
        &self,
        handle_key: u32,
        model_id: &str,
    ) -> Result<Reply, AdapterError> {
        let lib = self.engine()?;
        let synthesizer = self.synthesizers.get(handle_key)?;
        let model_id = cstring(model_id)?;
        let code = unsafe {
            v0_16::synthesizer_unload_voice_model(&lib, synthesizer, model_id.as_ptr())?
        };
        Ok(Reply::code(code))
    }

    /// `(handleKey: u32) -> {result: bool}`
    pub fn synthesizer_is_gpu_mode_v0_16(&self, handle_key: u32) -> Result<Reply, AdapterError> {
        let lib = self.engine()?;
        let synthesizer = self.synthesizers.get(handle_key)?;
        let gpu = unsafe { v0_16::synthesizer_is_gpu_mode(&lib, synthesizer)? };
        Ok(Reply::value(Value::Bool(gpu)))
    }

    /// `(handleKey: u32, modelId: string) -> {result: bool}`
    pub fn synthesizer_is_loaded_voice_model_v0_16(
        &self,
        handle_key: u32,
        model_id: &str,
    ) -> Result<Reply, AdapterError> {
        let lib = self.engine()?;
        let synthesizer = self.synthesizers.get(handle_key)?;
        let model_id = cstring(model_id)?;
        let loaded = unsafe {
            v0_16::synthesizer_is_loaded_voice_model(&lib, synthesizer, model_id.as_ptr())?
        };
        Ok(Reply::value(Value::Bool(loaded)))
    }

    /// `(handleKey: u32) -> {json: string}`
    pub fn synthesizer_create_metas_json_v0_16(
        &self,
        handle_key: u32,
    ) -> Result<Reply, AdapterError> {
        let lib = self.engine()?;
        let synthesizer = self.synthesizers.get(handle_key)?;
        let raw = unsafe { v0_16::synthesizer_create_metas_json(&lib, synthesizer)? };
        let metas = unsafe { copy_cstr(raw) };
        if !raw.is_null() {
            unsafe { v0_16::json_free(&lib, raw)? };
        }
        Ok(Reply::value(Value::Str(metas)))
    }

    /// `() -> {resultCode, json: string}`
    pub fn create_supported_devices_json_v0_16(&self) -> Result<Reply, AdapterError> {
        let lib = self.engine()?;
        let mut out = ptr::null_mut();
        let code = unsafe { v0_16::create_supported_devices_json(&lib, &raw mut out)? };
        Ok(Self::consume_json(&lib, code, out)?)
    }

    /// `(handleKey: u32, kana: string, styleId: u32) -> {resultCode, json}`
    pub fn synthesizer_create_audio_query_from_kana_v0_16(
        &self,
        handle_key: u32,
        kana: &str,
        style_id: u32,
    ) -> Result<Reply, AdapterError> {
        self.synthesizer_json_op(handle_key, kana, style_id, |lib, syn, input, style, out| unsafe {
            v0_16::synthesizer_create_audio_query_from_kana(lib, syn, input, style, out)
        })
    }

    /// `(handleKey: u32, text: string, styleId: u32) -> {resultCode, json}`
    pub fn synthesizer_create_audio_query_v0_16(
        &self,
        handle_key: u32,
        text: &str,
        style_id: u32,
    ) -> Result<Reply, AdapterError> {
        self.synthesizer_json_op(handle_key, text, style_id, |lib, syn, input, style, out| unsafe {
            v0_16::synthesizer_create_audio_query(lib, syn, input, style, out)
        })
    }

    /// `(handleKey: u32, kana: string, styleId: u32) -> {resultCode, json}`
    pub fn synthesizer_create_accent_phrases_from_kana_v0_16(
        &self,
        handle_key: u32,
        kana: &str,
        style_id: u32,
    ) -> Result<Reply, AdapterError> {
        self.synthesizer_json_op(handle_key, kana, style_id, |lib, syn, input, style, out| unsafe {
            v0_16::synthesizer_create_accent_phrases_from_kana(lib, syn, input, style, out)
        })
    }

    /// `(handleKey: u32, text: string, styleId: u32) -> {resultCode, json}`
    pub fn synthesizer_create_accent_phrases_v0_16(
        &self,
        handle_key: u32,
        text: &str,
        style_id: u32,
    ) -> Result<Reply, AdapterError> {
        self.synthesizer_json_op(handle_key, text, style_id, |lib, syn, input, style, out| unsafe {
            v0_16::synthesizer_create_accent_phrases(lib, syn, input, style, out)
        })
    }

    /// `(handleKey: u32, accentPhrasesJson: string, styleId: u32) ->
    /// {resultCode, json}`
    pub fn synthesizer_replace_mora_data_v0_16(
        &self,
        handle_key: u32,
        accent_phrases_json: &str,
        style_id: u32,
    ) -> Result<Reply, AdapterError> {
        self.synthesizer_json_op(
            handle_key,
            accent_phrases_json,
            style_id,
            |lib, syn, input, style, out| unsafe {
                v0_16::synthesizer_replace_mora_data(lib, syn, input, style, out)
            },
        )
    }

    /// `(handleKey: u32, accentPhrasesJson: string, styleId: u32) ->
    /// {resultCode, json}`
    pub fn synthesizer_replace_phoneme_length_v0_16(
        &self,
        handle_key: u32,
        accent_phrases_json: &str,
        style_id: u32,
    ) -> Result<Reply, AdapterError> {
        self.synthesizer_json_op(
            handle_key,
            accent_phrases_json,
            style_id,
            |lib, syn, input, style, out| unsafe {
                v0_16::synthesizer_replace_phoneme_length(lib, syn, input, style, out)
            },
        )
    }

    /// `(handleKey: u32, accentPhrasesJson: string, styleId: u32) ->
    /// {resultCode, json}`
    pub fn synthesizer_replace_mora_pitch_v0_16(
        &self,
        handle_key: u32,
        accent_phrases_json: &str,
        style_id: u32,
    ) -> Result<Reply, AdapterError> {
        self.synthesizer_json_op(
            handle_key,
            accent_phrases_json,
            style_id,
            |lib, syn, input, style, out| unsafe {
                v0_16::synthesizer_replace_mora_pitch(lib, syn, input, style, out)
            },
        )
    }

    /// `(handleKey: u32, audioQueryJson: string, styleId: u32,
    /// enableInterrogativeUpspeak: bool) -> {resultCode, bytes}`
    pub fn synthesizer_synthesis_v0_16(
        &self,
        handle_key: u32,
        audio_query_json: &str,
        style_id: u32,
        enable_interrogative_upspeak: bool,
    ) -> Result<Reply, AdapterError> {
        let lib = self.engine()?;
        let synthesizer = self.synthesizers.get(handle_key)?;
        let audio_query_json = cstring(audio_query_json)?;
        let mut options = unsafe { v0_16::make_default_synthesis_options(&lib)? };
        options.enable_interrogative_upspeak = enable_interrogative_upspeak;
        let mut wav_length = 0usize;
        let mut wav = ptr::null_mut();
        let code = unsafe {
            v0_16::synthesizer_synthesis(
                &lib,
                synthesizer,
                audio_query_json.as_ptr(),
                style_id,
                options,
                &raw mut wav_length,
                &raw mut wav,
            )?
        };
        Ok(Self::consume_wav(&lib, code, wav, wav_length)?)
    }

    /// `(handleKey: u32, kana: string, styleId: u32,
    /// enableInterrogativeUpspeak: bool) -> {resultCode, bytes}`
    pub fn synthesizer_tts_from_kana_v0_16(
        &self,
        handle_key: u32,
        kana: &str,
        style_id: u32,
        enable_interrogative_upspeak: bool,
    ) -> Result<Reply, AdapterError> {
        self.synthesizer_tts_op(
            handle_key,
            kana,
            style_id,
            enable_interrogative_upspeak,
            |lib, syn, input, style, options, len, wav| unsafe {
                v0_16::synthesizer_tts_from_kana(lib, syn, input, style, options, len, wav)
            },
        )
    }

    /// `(handleKey: u32, text: string, styleId: u32,
    /// enableInterrogativeUpspeak: bool) -> {resultCode, bytes}`
    pub fn synthesizer_tts_v0_16(
        &self,
        handle_key: u32,
        text: &str,
        style_id: u32,
        enable_interrogative_upspeak: bool,
    ) -> Result<Reply, AdapterError> {
        self.synthesizer_tts_op(
            handle_key,
            text,
            style_id,
            enable_interrogative_upspeak,
            |lib, syn, input, style, options, len, wav| unsafe {
                v0_16::synthesizer_tts(lib, syn, input, style, options, len, wav)
            },
        )
    }

    /// `(handleKey: u32) -> {}`
    pub fn user_dict_new_v0_16(&self, handle_key: u32) -> Result<Reply, AdapterError> {
        let lib = self.engine()?;
        let dict = unsafe { v0_16::user_dict_new(&lib)? };
        if !dict.is_null() {
            self.user_dicts.insert(handle_key, dict);
        }
        Ok(Reply::empty())
    }

    /// `(handleKey: u32, dictPath: string) -> {resultCode}`
    pub fn user_dict_load_v0_16(
        &self,
        handle_key: u32,
        dict_path: &str,
    ) -> Result<Reply, AdapterError> {
        let lib = self.engine()?;
        let dict = self.user_dicts.get(handle_key)?;
        let dict_path = cstring(dict_path)?;
        let code = unsafe { v0_16::user_dict_load(&lib, dict, dict_path.as_ptr())? };
        Ok(Reply::code(code))
    }

    /// `(handleKey: u32, surface: string, pronunciation: string,
    /// accentType: u32, priority: u32, wordType: u32) ->
    /// {resultCode, uuid: 16 bytes}`
    pub fn user_dict_add_word_v0_16(
        &self,
        handle_key: u32,
        surface: &str,
        pronunciation: &str,
        accent_type: u32,
        priority: u32,
        word_type: u32,
    ) -> Result<Reply, AdapterError> {
        let lib = self.engine()?;
        let dict = self.user_dicts.get(handle_key)?;
        let surface = cstring(surface)?;
        let pronunciation = cstring(pronunciation)?;
        let mut word = unsafe {
            v0_16::user_dict_word_make(&lib, surface.as_ptr(), pronunciation.as_ptr())?
        };
        word.accent_type = accent_type as usize;
        word.priority = priority;
        word.word_type = UserDictWordType::from_wire(word_type);
        let mut uuid = [0u8; 16];
        let code =
            unsafe { v0_16::user_dict_add_word(&lib, dict, &raw const word, &raw mut uuid)? };
        Ok(Reply::code_value(code, Value::Bytes(uuid.to_vec())))
    }

    /// `(handleKey: u32, surface: string, pronunciation: string,
    /// accentType: u32, priority: u32, wordType: u32, uuid: 16 bytes) ->
    /// {resultCode}`
    #[allow(clippy::too_many_arguments)]
    pub fn user_dict_update_word_v0_16(
        &self,
        handle_key: u32,
        surface: &str,
        pronunciation: &str,
        accent_type: u32,
        priority: u32,
        word_type: u32,
        uuid: [u8; 16],
    ) -> Result<Reply, AdapterError> {
        let lib = self.engine()?;
        let dict = self.user_dicts.get(handle_key)?;
        let surface = cstring(surface)?;
        let pronunciation = cstring(pronunciation)?;
        let mut word = unsafe {
            v0_16::user_dict_word_make(&lib, surface.as_ptr(), pronunciation.as_ptr())?
        };
        word.accent_type = accent_type as usize;
        word.priority = priority;
        word.word_type = UserDictWordType::from_wire(word_type);
        let code = unsafe {
            v0_16::user_dict_update_word(&lib, dict, &raw const uuid, &raw const word)?
        };
        Ok(Reply::code(code))
    }

    /// `(handleKey: u32, uuid: 16 bytes) -> {resultCode}`
    pub fn user_dict_remove_word_v0_16(
        &self,
        handle_key: u32,
        uuid: [u8; 16],
    ) -> Result<Reply, AdapterError> {
        let lib = self.engine()?;
        let dict = self.user_dicts.get(handle_key)?;
        let code = unsafe { v0_16::user_dict_remove_word(&lib, dict, &raw const uuid)? };
        Ok(Reply::code(code))
    }

    /// `(handleKey: u32) -> {resultCode, json}`
    pub fn user_dict_to_json_v0_16(&self, handle_key: u32) -> Result<Reply, AdapterError> {
        let lib = self.engine()?;
        let dict = self.user_dicts.get(handle_key)?;
        let mut out = ptr::null_mut();
        let code = unsafe { v0_16::user_dict_to_json(&lib, dict, &raw mut out)? };
        Ok(Self::consume_json(&lib, code, out)?)
    }

    /// `(handleKey: u32, otherHandleKey: u32) -> {resultCode}`
    pub fn user_dict_import_v0_16(
        &self,
        handle_key: u32,
        other_key: u32,
    ) -> Result<Reply, AdapterError> {
        let lib = self.engine()?;
        let dict = self.user_dicts.get(handle_key)?;
        let other = self.user_dicts.get(other_key)?;
        let code = unsafe { v0_16::user_dict_import(&lib, dict, other)? };
        Ok(Reply::code(code))
    }

    /// `(handleKey: u32, path: string) -> {resultCode}`
    pub fn user_dict_save_v0_16(
        &self,
        handle_key: u32,
        path: &str,
    ) -> Result<Reply, AdapterError> {
        let lib = self.engine()?;
        let dict = self.user_dicts.get(handle_key)?;
        let path = cstring(path)?;
        let code = unsafe { v0_16::user_dict_save(&lib, dict, path.as_ptr())? };
        Ok(Reply::code(code))
    }

    /// `(handleKey: u32) -> {}`
    pub fn user_dict_delete_v0_16(&self, handle_key: u32) -> Result<Reply, AdapterError> {
        let lib = self.engine()?;
        let dict = self.user_dicts.remove(handle_key)?;
        unsafe { v0_16::user_dict_delete(&lib, dict)? };
        Ok(Reply::empty())
    }

    fn synthesizer_json_op<F>(
        &self,
        handle_key: u32,
        input: &str,
        style_id: u32,
        call: F,
    ) -> Result<Reply, AdapterError>
    where
        F: FnOnce(
            &EngineLibrary,
            *const Synthesizer,
            *const c_char,
            StyleId,
            *mut *mut c_char,
        ) -> Result<ResultCode, LoaderError>,
    {
        let lib = self.engine()?;
        let synthesizer = self.synthesizers.get(handle_key)?;
        let input = cstring(input)?;
        let mut out = ptr::null_mut();
        let code = call(&lib, synthesizer, input.as_ptr(), style_id, &raw mut out)?;
        Self::consume_json(&lib, code, out)
    }

    #[allow(clippy::type_complexity)]
    fn synthesizer_tts_op<F>(
        &self,
        handle_key: u32,
        input: &str,
        style_id: u32,
        enable_interrogative_upspeak: bool,
        call: F,
    ) -> Result<Reply, AdapterError>
    where
        F: FnOnce(
            &EngineLibrary,
            *const Synthesizer,
            *const c_char,
            StyleId,
            voxbridge_abi::TtsOptionsV16,
            *mut usize,
            *mut *mut u8,
        ) -> Result<ResultCode, LoaderError>,
    {
        let lib = self.engine()?;
        let synthesizer = self.synthesizers.get(handle_key)?;
        let input = cstring(input)?;
        let mut options = unsafe { v0_16::make_default_tts_options(&lib)? };
        options.enable_interrogative_upspeak = enable_interrogative_upspeak;
        let mut wav_length = 0usize;
        let mut wav = ptr::null_mut();
        let code = call(
            &lib,
            synthesizer,
            input.as_ptr(),
            style_id,
            options,
            &raw mut wav_length,
            &raw mut wav,
        )?;
        Self::consume_wav(&lib, code, wav, wav_length)
    }

    /// Copy an engine-allocated JSON string into host memory, then free it.
    /// Runs on failure paths too: a buffer obtained before the engine
    /// reported an error must still be released.
    fn consume_json(
        lib: &EngineLibrary,
        code: ResultCode,
        out: *mut c_char,
    ) -> Result<Reply, AdapterError> {
        if out.is_null() {
            return Ok(Reply::code(code));
        }
        let json = unsafe { copy_cstr(out) };
        unsafe { v0_16::json_free(lib, out)? };
        Ok(Reply::code_value(code, Value::Str(json)))
    }

    /// Copy an engine-allocated wave buffer into host memory, then free it.
    fn consume_wav(
        lib: &EngineLibrary,
        code: ResultCode,
        wav: *mut u8,
        wav_length: usize,
    ) -> Result<Reply, AdapterError> {
        if wav.is_null() {
            return Ok(Reply::code(code));
        }
        let bytes = unsafe { std::slice::from_raw_parts(wav, wav_length) }.to_vec();
        unsafe { v0_16::wav_free(lib, wav)? };
        Ok(Reply::code_value(code, Value::Bytes(bytes)))
    }
}
