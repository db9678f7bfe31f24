//! Allocation helpers shared by the fake engine libraries used in tests.
//!
//! The fake engines hand buffers across the C boundary and must be able to
//! free them later given only the data pointer, exactly like the real
//! engines. Byte and float buffers carry their layout in a hidden header in
//! front of the data; C strings use the standard NUL-terminated ownership
//! transfer.

use std::alloc::{self, Layout};
use std::ffi::CString;
use std::os::raw::c_char;

const HEADER: usize = std::mem::size_of::<usize>();

/// Hand a Rust string across the boundary as an owned C string. Release with
/// [`free_cstring`].
pub fn alloc_cstring(value: &str) -> *mut c_char {
    CString::new(value)
        .unwrap_or_else(|_| CString::new("invalid string").expect("no interior NUL"))
        .into_raw()
}

/// # Safety
/// `ptr` must come from [`alloc_cstring`] and not have been freed.
pub unsafe fn free_cstring(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(unsafe { CString::from_raw(ptr) });
    }
}

/// Allocate an owned byte buffer whose length is recorded in a header before
/// the returned pointer. Release with [`free_bytes`].
pub fn alloc_bytes(data: &[u8]) -> *mut u8 {
    let layout = Layout::from_size_align(HEADER + data.len(), HEADER).expect("valid layout");
    unsafe {
        let base = alloc::alloc(layout);
        assert!(!base.is_null(), "allocation failed");
        (base.cast::<usize>()).write(data.len());
        let out = base.add(HEADER);
        std::ptr::copy_nonoverlapping(data.as_ptr(), out, data.len());
        out
    }
}

/// # Safety
/// `ptr` must come from [`alloc_bytes`] and not have been freed.
pub unsafe fn free_bytes(ptr: *mut u8) {
    if ptr.is_null() {
        return;
    }
    unsafe {
        let base = ptr.sub(HEADER);
        let len = base.cast::<usize>().read();
        let layout = Layout::from_size_align(HEADER + len, HEADER).expect("valid layout");
        alloc::dealloc(base, layout);
    }
}

/// Allocate an owned float buffer; same header scheme as [`alloc_bytes`].
/// Release with [`free_floats`].
pub fn alloc_floats(values: &[f32]) -> *mut f32 {
    let bytes = HEADER + values.len() * 4;
    let layout = Layout::from_size_align(bytes, HEADER).expect("valid layout");
    unsafe {
        let base = alloc::alloc(layout);
        assert!(!base.is_null(), "allocation failed");
        (base.cast::<usize>()).write(values.len());
        let out = base.add(HEADER).cast::<f32>();
        std::ptr::copy_nonoverlapping(values.as_ptr(), out, values.len());
        out
    }
}

/// # Safety
/// `ptr` must come from [`alloc_floats`] and not have been freed.
pub unsafe fn free_floats(ptr: *mut f32) {
    if ptr.is_null() {
        return;
    }
    unsafe {
        let base = ptr.cast::<u8>().sub(HEADER);
        let len = base.cast::<usize>().read();
        let layout = Layout::from_size_align(HEADER + len * 4, HEADER).expect("valid layout");
        alloc::dealloc(base, layout);
    }
}

/// A minimal but well-formed RIFF/WAVE buffer: 16-bit mono PCM at 24 kHz with
/// `sample_count` silent samples.
pub fn wav_bytes(sample_count: usize) -> Vec<u8> {
    let data_len = (sample_count * 2) as u32;
    let mut out = Vec::with_capacity(44 + sample_count * 2);
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_len).to_le_bytes());
    out.extend_from_slice(b"WAVE");
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // PCM
    out.extend_from_slice(&1u16.to_le_bytes()); // mono
    out.extend_from_slice(&24_000u32.to_le_bytes());
    out.extend_from_slice(&48_000u32.to_le_bytes());
    out.extend_from_slice(&2u16.to_le_bytes());
    out.extend_from_slice(&16u16.to_le_bytes());
    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
    out.resize(44 + sample_count * 2, 0);
    out
}

/// Deterministic 16-byte identifier for fake dictionary words.
pub fn sequential_uuid(counter: u64) -> [u8; 16] {
    let mut uuid = [0u8; 16];
    uuid[..8].copy_from_slice(b"vbstub--");
    uuid[8..].copy_from_slice(&counter.to_be_bytes());
    uuid
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_buffer_round_trip() {
        let data = [1u8, 2, 3, 4, 5];
        let ptr = alloc_bytes(&data);
        let copied = unsafe { std::slice::from_raw_parts(ptr, data.len()) }.to_vec();
        assert_eq!(copied, data);
        unsafe { free_bytes(ptr) };
    }

    #[test]
    fn test_float_buffer_round_trip() {
        let values = [0.25f32, -1.5, 3.0];
        let ptr = alloc_floats(&values);
        let copied = unsafe { std::slice::from_raw_parts(ptr, values.len()) }.to_vec();
        assert_eq!(copied, values);
        unsafe { free_floats(ptr) };
    }

    #[test]
    fn test_wav_header_is_riff() {
        let wav = wav_bytes(100);
        assert_eq!(&wav[..4], b"RIFF");
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(wav.len(), 44 + 200);
    }
}
