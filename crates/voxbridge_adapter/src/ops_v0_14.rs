//! v0.14 and v0.15 operations: the global-state engine with result codes.
//!
//! Sequence inputs are copied into native vectors whose length is always the
//! actual input length; a separate caller-supplied length would be able to
//! desynchronize from the data, so none is accepted. Parallel sequences are
//! length-checked before any native buffer is built.

use std::os::raw::c_char;
use std::ptr;

use voxbridge_abi::{ResultCode, v0_14, v0_15};
use voxbridge_loader::{EngineLibrary, LoaderError};

use crate::adapter::{copy_cstr, cstring, EngineAdapter};
use crate::args::check_same_length;
use crate::error::AdapterError;
use crate::value::{Reply, Value};

impl EngineAdapter {
    /// `() -> {result: string}`
    pub fn get_version_v0_14(&self) -> Result<Reply, AdapterError> {
        let lib = self.engine()?;
        let version = unsafe { v0_14::get_version(&lib)? };
        Ok(Reply::value(Value::Str(unsafe { copy_cstr(version) })))
    }

    /// `(accelerationMode: u32, cpuNumThreads: u32, loadAllModels: bool,
    /// openJtalkDictDir: string) -> {resultCode}`
    pub fn initialize_v0_14(
        &self,
        acceleration_mode: u32,
        cpu_num_threads: u32,
        load_all_models: bool,
        open_jtalk_dict_dir: &str,
    ) -> Result<Reply, AdapterError> {
        let lib = self.engine()?;
        let dict_dir = cstring(open_jtalk_dict_dir)?;
        let mut options = unsafe { v0_14::make_default_initialize_options(&lib)? };
        options.acceleration_mode = voxbridge_abi::AccelerationMode::from_wire(acceleration_mode);
        options.cpu_num_threads = cpu_num_threads as u16;
        options.load_all_models = load_all_models;
        options.open_jtalk_dict_dir = dict_dir.as_ptr();
        let code = unsafe { v0_14::initialize(&lib, options)? };
        Ok(Reply::code(code))
    }

    /// `(speakerId: u32) -> {resultCode}`
    pub fn load_model_v0_14(&self, speaker_id: u32) -> Result<Reply, AdapterError> {
        let lib = self.engine()?;
        let code = unsafe { v0_14::load_model(&lib, speaker_id)? };
        Ok(Reply::code(code))
    }

    /// `() -> {result: bool}`
    pub fn is_gpu_mode_v0_14(&self) -> Result<Reply, AdapterError> {
        let lib = self.engine()?;
        let gpu = unsafe { v0_14::is_gpu_mode(&lib)? };
        Ok(Reply::value(Value::Bool(gpu)))
    }

    /// `(speakerId: u32) -> {result: bool}`
    pub fn is_model_loaded_v0_14(&self, speaker_id: u32) -> Result<Reply, AdapterError> {
        let lib = self.engine()?;
        let loaded = unsafe { v0_14::is_model_loaded(&lib, speaker_id)? };
        Ok(Reply::value(Value::Bool(loaded)))
    }

    /// `() -> {}`
    pub fn finalize_v0_14(&self) -> Result<Reply, AdapterError> {
        let lib = self.engine()?;
        unsafe { v0_14::finalize(&lib)? };
        Ok(Reply::empty())
    }

    /// `() -> {result: string}`
    pub fn get_metas_json_v0_14(&self) -> Result<Reply, AdapterError> {
        let lib = self.engine()?;
        let metas = unsafe { v0_14::get_metas_json(&lib)? };
        Ok(Reply::value(Value::Str(unsafe { copy_cstr(metas) })))
    }

    /// `() -> {result: string}`
    pub fn get_supported_devices_json_v0_14(&self) -> Result<Reply, AdapterError> {
        let lib = self.engine()?;
        let devices = unsafe { v0_14::get_supported_devices_json(&lib)? };
        Ok(Reply::value(Value::Str(unsafe { copy_cstr(devices) })))
    }

    /// `(phoneme: int list, speakerId: u32) -> {resultCode, result: float list}`
    pub fn predict_duration_v0_14(
        &self,
        phoneme: &[i64],
        speaker_id: u32,
    ) -> Result<Reply, AdapterError> {
        let lib = self.engine()?;
        let mut phoneme = phoneme.to_vec();
        let mut out_length = 0usize;
        let mut out_data = ptr::null_mut();
        let code = unsafe {
            v0_14::predict_duration(
                &lib,
                phoneme.len(),
                phoneme.as_mut_ptr(),
                speaker_id,
                &raw mut out_length,
                &raw mut out_data,
            )?
        };
        Self::consume_prediction(&lib, code, out_data, out_length, |lib, data| unsafe {
            v0_14::predict_duration_data_free(lib, data)
        })
    }

    /// `(vowelPhoneme, consonantPhoneme, startAccent, endAccent,
    /// startAccentPhrase, endAccentPhrase: int list, speakerId: u32) ->
    /// {resultCode, result: float list}`
    ///
    /// All six sequences must have the same length.
    #[allow(clippy::too_many_arguments)]
    pub fn predict_intonation_v0_14(
        &self,
        vowel_phoneme: &[i64],
        consonant_phoneme: &[i64],
        start_accent: &[i64],
        end_accent: &[i64],
        start_accent_phrase: &[i64],
        end_accent_phrase: &[i64],
        speaker_id: u32,
    ) -> Result<Reply, AdapterError> {
        let length = vowel_phoneme.len();
        check_same_length("vowel phoneme", length, "consonant phoneme", consonant_phoneme.len())?;
        check_same_length("vowel phoneme", length, "start accent", start_accent.len())?;
        check_same_length("vowel phoneme", length, "end accent", end_accent.len())?;
        check_same_length(
            "vowel phoneme",
            length,
            "start accent phrase",
            start_accent_phrase.len(),
        )?;
        check_same_length(
            "vowel phoneme",
            length,
            "end accent phrase",
            end_accent_phrase.len(),
        )?;

        let lib = self.engine()?;
        let mut vowel_phoneme = vowel_phoneme.to_vec();
        let mut consonant_phoneme = consonant_phoneme.to_vec();
        let mut start_accent = start_accent.to_vec();
        let mut end_accent = end_accent.to_vec();
        let mut start_accent_phrase = start_accent_phrase.to_vec();
        let mut end_accent_phrase = end_accent_phrase.to_vec();
        let mut out_length = 0usize;
        let mut out_data = ptr::null_mut();
        let code = unsafe {
            v0_14::predict_intonation(
                &lib,
                length,
                vowel_phoneme.as_mut_ptr(),
                consonant_phoneme.as_mut_ptr(),
                start_accent.as_mut_ptr(),
                end_accent.as_mut_ptr(),
                start_accent_phrase.as_mut_ptr(),
                end_accent_phrase.as_mut_ptr(),
                speaker_id,
                &raw mut out_length,
                &raw mut out_data,
            )?
        };
        Self::consume_prediction(&lib, code, out_data, out_length, |lib, data| unsafe {
            v0_14::predict_intonation_data_free(lib, data)
        })
    }

    /// `(f0: float list, phoneme: float list, speakerId: u32) ->
    /// {resultCode, result: float list}`
    pub fn decode_v0_14(
        &self,
        f0: &[f32],
        phoneme: &[f32],
        speaker_id: u32,
    ) -> Result<Reply, AdapterError> {
        let lib = self.engine()?;
        let mut f0 = f0.to_vec();
        let mut phoneme = phoneme.to_vec();
        let mut out_length = 0usize;
        let mut out_data = ptr::null_mut();
        let code = unsafe {
            v0_14::decode(
                &lib,
                f0.len(),
                phoneme.len(),
                f0.as_mut_ptr(),
                phoneme.as_mut_ptr(),
                speaker_id,
                &raw mut out_length,
                &raw mut out_data,
            )?
        };
        Self::consume_prediction(&lib, code, out_data, out_length, |lib, data| unsafe {
            v0_14::decode_data_free(lib, data)
        })
    }

    /// `(text: string, speakerId: u32, kana: bool) -> {resultCode, json}`
    pub fn audio_query_v0_14(
        &self,
        text: &str,
        speaker_id: u32,
        kana: bool,
    ) -> Result<Reply, AdapterError> {
        let lib = self.engine()?;
        let text = cstring(text)?;
        let mut options = unsafe { v0_14::make_default_audio_query_options(&lib)? };
        options.kana = kana;
        let mut out = ptr::null_mut();
        let code = unsafe {
            v0_14::audio_query(&lib, text.as_ptr(), speaker_id, options, &raw mut out)?
        };
        if out.is_null() {
            return Ok(Reply::code(code));
        }
        let json = unsafe { copy_cstr(out) };
        unsafe { v0_14::audio_query_json_free(&lib, out)? };
        Ok(Reply::code_value(code, Value::Str(json)))
    }

    /// `(audioQueryJson: string, speakerId: u32,
    /// enableInterrogativeUpspeak: bool) -> {resultCode, bytes}`
    pub fn synthesis_v0_14(
        &self,
        audio_query_json: &str,
        speaker_id: u32,
        enable_interrogative_upspeak: bool,
    ) -> Result<Reply, AdapterError> {
        let lib = self.engine()?;
        let audio_query_json = cstring(audio_query_json)?;
        let mut options = unsafe { v0_14::make_default_synthesis_options(&lib)? };
        options.enable_interrogative_upspeak = enable_interrogative_upspeak;
        let mut wav_length = 0usize;
        let mut wav = ptr::null_mut();
        let code = unsafe {
            v0_14::synthesis(
                &lib,
                audio_query_json.as_ptr(),
                speaker_id,
                options,
                &raw mut wav_length,
                &raw mut wav,
            )?
        };
        Self::consume_wav_v0_14(&lib, code, wav, wav_length)
    }

    /// `(text: string, speakerId: u32, enableInterrogativeUpspeak: bool,
    /// kana: bool) -> {resultCode, bytes}`
    pub fn tts_v0_14(
        &self,
        text: &str,
        speaker_id: u32,
        enable_interrogative_upspeak: bool,
        kana: bool,
    ) -> Result<Reply, AdapterError> {
        let lib = self.engine()?;
        let text = cstring(text)?;
        let mut options = unsafe { v0_14::make_default_tts_options(&lib)? };
        options.enable_interrogative_upspeak = enable_interrogative_upspeak;
        options.kana = kana;
        let mut wav_length = 0usize;
        let mut wav = ptr::null_mut();
        let code = unsafe {
            v0_14::tts(
                &lib,
                text.as_ptr(),
                speaker_id,
                options,
                &raw mut wav_length,
                &raw mut wav,
            )?
        };
        Self::consume_wav_v0_14(&lib, code, wav, wav_length)
    }

    /// `(text: string, speakerId: u32, kana: bool) -> {resultCode, json}`
    pub fn accent_phrases_v0_15(
        &self,
        text: &str,
        speaker_id: u32,
        kana: bool,
    ) -> Result<Reply, AdapterError> {
        let lib = self.engine()?;
        let text = cstring(text)?;
        let options = voxbridge_abi::AccentPhrasesOptionsV15 { kana };
        let mut out = ptr::null_mut();
        let code = unsafe {
            v0_15::accent_phrases(&lib, text.as_ptr(), speaker_id, options, &raw mut out)?
        };
        Self::consume_accent_phrases(&lib, code, out)
    }

    /// `(accentPhrasesJson: string, speakerId: u32) -> {resultCode, json}`
    pub fn mora_length_v0_15(
        &self,
        accent_phrases_json: &str,
        speaker_id: u32,
    ) -> Result<Reply, AdapterError> {
        self.accent_phrase_rewrite(accent_phrases_json, speaker_id, |lib, json, speaker, out| {
            unsafe { v0_15::mora_length(lib, json, speaker, out) }
        })
    }

    /// `(accentPhrasesJson: string, speakerId: u32) -> {resultCode, json}`
    pub fn mora_pitch_v0_15(
        &self,
        accent_phrases_json: &str,
        speaker_id: u32,
    ) -> Result<Reply, AdapterError> {
        self.accent_phrase_rewrite(accent_phrases_json, speaker_id, |lib, json, speaker, out| {
            unsafe { v0_15::mora_pitch(lib, json, speaker, out) }
        })
    }

    /// `(accentPhrasesJson: string, speakerId: u32) -> {resultCode, json}`
    pub fn mora_data_v0_15(
        &self,
        accent_phrases_json: &str,
        speaker_id: u32,
    ) -> Result<Reply, AdapterError> {
        self.accent_phrase_rewrite(accent_phrases_json, speaker_id, |lib, json, speaker, out| {
            unsafe { v0_15::mora_data(lib, json, speaker, out) }
        })
    }

    fn accent_phrase_rewrite<F>(
        &self,
        accent_phrases_json: &str,
        speaker_id: u32,
        call: F,
    ) -> Result<Reply, AdapterError>
    where
        F: FnOnce(
            &EngineLibrary,
            *const c_char,
            u32,
            *mut *mut c_char,
        ) -> Result<ResultCode, LoaderError>,
    {
        let lib = self.engine()?;
        let json = cstring(accent_phrases_json)?;
        let mut out = ptr::null_mut();
        let code = call(&lib, json.as_ptr(), speaker_id, &raw mut out)?;
        Self::consume_accent_phrases(&lib, code, out)
    }

    fn consume_accent_phrases(
        lib: &EngineLibrary,
        code: ResultCode,
        out: *mut c_char,
    ) -> Result<Reply, AdapterError> {
        if out.is_null() {
            return Ok(Reply::code(code));
        }
        let json = unsafe { copy_cstr(out) };
        unsafe { v0_15::accent_phrases_json_free(lib, out)? };
        Ok(Reply::code_value(code, Value::Str(json)))
    }

    /// Copy engine-allocated prediction data into a host float list, then
    /// free it through the matching free function. Runs on failure paths too.
    fn consume_prediction<F>(
        lib: &EngineLibrary,
        code: ResultCode,
        data: *mut f32,
        length: usize,
        free: F,
    ) -> Result<Reply, AdapterError>
    where
        F: FnOnce(&EngineLibrary, *mut f32) -> Result<(), LoaderError>,
    {
        if data.is_null() {
            return Ok(Reply::code(code));
        }
        let values = unsafe { std::slice::from_raw_parts(data, length) }.to_vec();
        free(lib, data)?;
        Ok(Reply::code_value(code, Value::FloatList(values)))
    }

    fn consume_wav_v0_14(
        lib: &EngineLibrary,
        code: ResultCode,
        wav: *mut u8,
        wav_length: usize,
    ) -> Result<Reply, AdapterError> {
        if wav.is_null() {
            return Ok(Reply::code(code));
        }
        let bytes = unsafe { std::slice::from_raw_parts(wav, wav_length) }.to_vec();
        unsafe { v0_14::wav_free(lib, wav)? };
        Ok(Reply::code_value(code, Value::Bytes(bytes)))
    }
}
