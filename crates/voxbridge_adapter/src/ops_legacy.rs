//! v0.5 through v0.12 operations: the global-state boolean core and the
//! first `voicevox_*` surface.
//!
//! These generations predate engine-allocated outputs; inference results are
//! written into caller-allocated buffers sized from the input sequence.
//! Success is a bare flag, with `last_error_message` as the only diagnostics
//! channel. A missing symbol aborts the process inside the call table.

use std::os::raw::{c_int, c_long};
use std::ptr;

use voxbridge_abi::{v0_5, v0_8, v0_10, v0_12};

use crate::adapter::{copy_cstr, cstring, EngineAdapter};
use crate::args::check_same_length;
use crate::error::AdapterError;
use crate::value::{Reply, Value};

impl EngineAdapter {
    /// `(resultCode: u32) -> {result: string}`
    pub fn error_result_to_message_v0_12(&self, result_code: u32) -> Result<Reply, AdapterError> {
        let lib = self.engine()?;
        let message = unsafe { v0_12::error_result_to_message(&lib, result_code as i32) };
        Ok(Reply::value(Value::Str(unsafe { copy_cstr(message) })))
    }

    /// `(useGpu: bool, cpuNumThreads: u32, loadAllModels: bool) ->
    /// {result: bool}`
    pub fn initialize_v0_12(
        &self,
        use_gpu: bool,
        cpu_num_threads: u32,
        load_all_models: bool,
    ) -> Result<Reply, AdapterError> {
        let lib = self.engine()?;
        let ok = unsafe {
            v0_12::initialize(&lib, use_gpu, cpu_num_threads as c_int, load_all_models)
        };
        Ok(Reply::value(Value::Bool(ok)))
    }

    /// `(speakerId: u32) -> {result: bool}`
    pub fn load_model_v0_12(&self, speaker_id: u32) -> Result<Reply, AdapterError> {
        let lib = self.engine()?;
        let ok = unsafe { v0_12::load_model(&lib, i64::from(speaker_id)) };
        Ok(Reply::value(Value::Bool(ok)))
    }

    /// `(speakerId: u32) -> {result: bool}`
    pub fn is_model_loaded_v0_12(&self, speaker_id: u32) -> Result<Reply, AdapterError> {
        let lib = self.engine()?;
        let loaded = unsafe { v0_12::is_model_loaded(&lib, i64::from(speaker_id)) };
        Ok(Reply::value(Value::Bool(loaded)))
    }

    /// `(dictPath: string) -> {resultCode}`
    pub fn load_openjtalk_dict_v0_12(&self, dict_path: &str) -> Result<Reply, AdapterError> {
        let lib = self.engine()?;
        let dict_path = cstring(dict_path)?;
        let code = unsafe { v0_12::load_openjtalk_dict(&lib, dict_path.as_ptr()) };
        Ok(Reply::code(code))
    }

    /// `(text: string, speakerId: u32) -> {resultCode, bytes}`
    pub fn tts_v0_12(&self, text: &str, speaker_id: u32) -> Result<Reply, AdapterError> {
        let lib = self.engine()?;
        let text = cstring(text)?;
        let mut size: c_int = 0;
        let mut wav = ptr::null_mut();
        let code = unsafe {
            v0_12::tts(
                &lib,
                text.as_ptr(),
                i64::from(speaker_id),
                &raw mut size,
                &raw mut wav,
            )
        };
        if wav.is_null() {
            return Ok(Reply::code(code));
        }
        let bytes = unsafe {
            std::slice::from_raw_parts(wav, usize::try_from(size).unwrap_or(0))
        }
        .to_vec();
        unsafe { v0_12::wav_free(&lib, wav) };
        Ok(Reply::code_value(code, Value::Bytes(bytes)))
    }

    /// `(kana: string, speakerId: u32) -> {resultCode, bytes}`
    pub fn tts_from_kana_v0_12(&self, kana: &str, speaker_id: u32) -> Result<Reply, AdapterError> {
        let lib = self.engine()?;
        let kana = cstring(kana)?;
        let mut size: c_int = 0;
        let mut wav = ptr::null_mut();
        let code = unsafe {
            v0_12::tts_from_kana(
                &lib,
                kana.as_ptr(),
                i64::from(speaker_id),
                &raw mut size,
                &raw mut wav,
            )
        };
        if wav.is_null() {
            return Ok(Reply::code(code));
        }
        let bytes = unsafe {
            std::slice::from_raw_parts(wav, usize::try_from(size).unwrap_or(0))
        }
        .to_vec();
        unsafe { v0_12::wav_free(&lib, wav) };
        Ok(Reply::code_value(code, Value::Bytes(bytes)))
    }

    /// `(rootDirPath: string, useGpu: bool, cpuNumThreads: u32) ->
    /// {result: bool}`
    pub fn initialize_v0_10(
        &self,
        root_dir_path: &str,
        use_gpu: bool,
        cpu_num_threads: u32,
    ) -> Result<Reply, AdapterError> {
        let lib = self.engine()?;
        let root = cstring(root_dir_path)?;
        let ok = unsafe {
            v0_10::initialize(&lib, root.as_ptr(), use_gpu, cpu_num_threads as c_int)
        };
        Ok(Reply::value(Value::Bool(ok)))
    }

    /// `() -> {}`
    pub fn finalize_v0_10(&self) -> Result<Reply, AdapterError> {
        let lib = self.engine()?;
        unsafe { v0_10::finalize(&lib) };
        Ok(Reply::empty())
    }

    /// `() -> {result: string}`
    pub fn supported_devices_v0_10(&self) -> Result<Reply, AdapterError> {
        let lib = self.engine()?;
        let devices = unsafe { v0_10::supported_devices(&lib) };
        Ok(Reply::value(Value::Str(unsafe { copy_cstr(devices) })))
    }

    /// `(rootDirPath: string, useGpu: bool) -> {result: bool}`
    pub fn initialize_v0_5(
        &self,
        root_dir_path: &str,
        use_gpu: bool,
    ) -> Result<Reply, AdapterError> {
        let lib = self.engine()?;
        let root = cstring(root_dir_path)?;
        let ok = unsafe { v0_5::initialize(&lib, root.as_ptr(), use_gpu) };
        Ok(Reply::value(Value::Bool(ok)))
    }

    /// `() -> {result: string}`
    pub fn metas_v0_5(&self) -> Result<Reply, AdapterError> {
        let lib = self.engine()?;
        let metas = unsafe { v0_5::metas(&lib) };
        Ok(Reply::value(Value::Str(unsafe { copy_cstr(metas) })))
    }

    /// `() -> {result: string}`
    pub fn last_error_message_v0_5(&self) -> Result<Reply, AdapterError> {
        let lib = self.engine()?;
        let message = unsafe { v0_5::last_error_message(&lib) };
        Ok(Reply::value(Value::Str(unsafe { copy_cstr(message) })))
    }

    /// `(phonemeList: int list, speakerId: u32) ->
    /// {result: float list, result2: bool}`
    pub fn yukarin_s_forward_v0_8(
        &self,
        phoneme_list: &[i64],
        speaker_id: u32,
    ) -> Result<Reply, AdapterError> {
        let lib = self.engine()?;
        let mut phoneme = phoneme_list.to_vec();
        let mut speaker = i64::from(speaker_id);
        let mut output = vec![0.0f32; phoneme.len()];
        let ok = unsafe {
            v0_8::yukarin_s_forward(
                &lib,
                phoneme.len() as i64,
                phoneme.as_mut_ptr(),
                &raw mut speaker,
                output.as_mut_ptr(),
            )
        };
        Ok(Reply::flag_value(ok, Value::FloatList(output)))
    }

    /// `(vowelPhonemeList, consonantPhonemeList, startAccentList,
    /// endAccentList, startAccentPhraseList, endAccentPhraseList: int list,
    /// speakerId: u32) -> {result: float list, result2: bool}`
    #[allow(clippy::too_many_arguments)]
    pub fn yukarin_sa_forward_v0_8(
        &self,
        vowel_phoneme_list: &[i64],
        consonant_phoneme_list: &[i64],
        start_accent_list: &[i64],
        end_accent_list: &[i64],
        start_accent_phrase_list: &[i64],
        end_accent_phrase_list: &[i64],
        speaker_id: u32,
    ) -> Result<Reply, AdapterError> {
        let length = vowel_phoneme_list.len();
        check_same_length("vowel phoneme", length, "consonant phoneme", consonant_phoneme_list.len())?;
        check_same_length("vowel phoneme", length, "start accent", start_accent_list.len())?;
        check_same_length("vowel phoneme", length, "end accent", end_accent_list.len())?;
        check_same_length(
            "vowel phoneme",
            length,
            "start accent phrase",
            start_accent_phrase_list.len(),
        )?;
        check_same_length(
            "vowel phoneme",
            length,
            "end accent phrase",
            end_accent_phrase_list.len(),
        )?;

        let lib = self.engine()?;
        let mut vowel = vowel_phoneme_list.to_vec();
        let mut consonant = consonant_phoneme_list.to_vec();
        let mut start_accent = start_accent_list.to_vec();
        let mut end_accent = end_accent_list.to_vec();
        let mut start_phrase = start_accent_phrase_list.to_vec();
        let mut end_phrase = end_accent_phrase_list.to_vec();
        let mut speaker = i64::from(speaker_id);
        let mut output = vec![0.0f32; length];
        let ok = unsafe {
            v0_8::yukarin_sa_forward(
                &lib,
                length as i64,
                vowel.as_mut_ptr(),
                consonant.as_mut_ptr(),
                start_accent.as_mut_ptr(),
                end_accent.as_mut_ptr(),
                start_phrase.as_mut_ptr(),
                end_phrase.as_mut_ptr(),
                &raw mut speaker,
                output.as_mut_ptr(),
            )
        };
        Ok(Reply::flag_value(ok, Value::FloatList(output)))
    }

    /// `(f0: float list, phoneme: float list, speakerId: u32) ->
    /// {result: float list, result2: bool}`
    pub fn decode_forward_v0_8(
        &self,
        f0: &[f32],
        phoneme: &[f32],
        speaker_id: u32,
    ) -> Result<Reply, AdapterError> {
        let lib = self.engine()?;
        let length = f0.len();
        let mut f0 = f0.to_vec();
        let mut phoneme = phoneme.to_vec();
        let mut speaker = i64::from(speaker_id);
        // The engine writes 256 samples per frame; only the first frame-count
        // samples are surfaced, matching the historical boundary.
        let mut output = vec![0.0f32; length * 256];
        let ok = unsafe {
            v0_8::decode_forward(
                &lib,
                length as i64,
                phoneme.len() as i64,
                f0.as_mut_ptr(),
                phoneme.as_mut_ptr(),
                &raw mut speaker,
                output.as_mut_ptr(),
            )
        };
        output.truncate(length);
        Ok(Reply::flag_value(ok, Value::FloatList(output)))
    }

    /// `(phonemeList: int list, speakerId: u32) ->
    /// {result: float list, result2: bool}`
    pub fn yukarin_s_forward_v0_5(
        &self,
        phoneme_list: &[i64],
        speaker_id: u32,
    ) -> Result<Reply, AdapterError> {
        let lib = self.engine()?;
        let mut phoneme: Vec<c_long> = phoneme_list.iter().map(|&v| v as c_long).collect();
        let mut speaker = speaker_id as c_long;
        let mut output = vec![0.0f32; phoneme.len()];
        let ok = unsafe {
            v0_5::yukarin_s_forward(
                &lib,
                phoneme.len() as c_int,
                phoneme.as_mut_ptr(),
                &raw mut speaker,
                output.as_mut_ptr(),
            )
        };
        Ok(Reply::flag_value(ok, Value::FloatList(output)))
    }

    /// `(vowelPhonemeList, consonantPhonemeList, startAccentList,
    /// endAccentList, startAccentPhraseList, endAccentPhraseList: int list,
    /// speakerId: u32) -> {result: float list, result2: bool}`
    #[allow(clippy::too_many_arguments)]
    pub fn yukarin_sa_forward_v0_5(
        &self,
        vowel_phoneme_list: &[i64],
        consonant_phoneme_list: &[i64],
        start_accent_list: &[i64],
        end_accent_list: &[i64],
        start_accent_phrase_list: &[i64],
        end_accent_phrase_list: &[i64],
        speaker_id: u32,
    ) -> Result<Reply, AdapterError> {
        let length = vowel_phoneme_list.len();
        check_same_length("vowel phoneme", length, "consonant phoneme", consonant_phoneme_list.len())?;
        check_same_length("vowel phoneme", length, "start accent", start_accent_list.len())?;
        check_same_length("vowel phoneme", length, "end accent", end_accent_list.len())?;
        check_same_length(
            "vowel phoneme",
            length,
            "start accent phrase",
            start_accent_phrase_list.len(),
        )?;
        check_same_length(
            "vowel phoneme",
            length,
            "end accent phrase",
            end_accent_phrase_list.len(),
        )?;

        let lib = self.engine()?;
        let to_native = |list: &[i64]| -> Vec<c_long> {
            list.iter().map(|&v| v as c_long).collect()
        };
        let mut vowel = to_native(vowel_phoneme_list);
        let mut consonant = to_native(consonant_phoneme_list);
        let mut start_accent = to_native(start_accent_list);
        let mut end_accent = to_native(end_accent_list);
        let mut start_phrase = to_native(start_accent_phrase_list);
        let mut end_phrase = to_native(end_accent_phrase_list);
        let mut speaker = speaker_id as c_long;
        let mut output = vec![0.0f32; length];
        let ok = unsafe {
            v0_5::yukarin_sa_forward(
                &lib,
                length as c_int,
                vowel.as_mut_ptr(),
                consonant.as_mut_ptr(),
                start_accent.as_mut_ptr(),
                end_accent.as_mut_ptr(),
                start_phrase.as_mut_ptr(),
                end_phrase.as_mut_ptr(),
                &raw mut speaker,
                output.as_mut_ptr(),
            )
        };
        Ok(Reply::flag_value(ok, Value::FloatList(output)))
    }

    /// `(f0: float list, phoneme: float list, speakerId: u32) ->
    /// {result: float list, result2: bool}`
    pub fn decode_forward_v0_5(
        &self,
        f0: &[f32],
        phoneme: &[f32],
        speaker_id: u32,
    ) -> Result<Reply, AdapterError> {
        let lib = self.engine()?;
        let length = f0.len();
        let mut f0 = f0.to_vec();
        let mut phoneme = phoneme.to_vec();
        let mut speaker = speaker_id as c_long;
        let mut output = vec![0.0f32; length * 256];
        let ok = unsafe {
            v0_5::decode_forward(
                &lib,
                length as c_int,
                phoneme.len() as c_int,
                f0.as_mut_ptr(),
                phoneme.as_mut_ptr(),
                &raw mut speaker,
                output.as_mut_ptr(),
            )
        };
        output.truncate(length);
        Ok(Reply::flag_value(ok, Value::FloatList(output)))
    }
}
