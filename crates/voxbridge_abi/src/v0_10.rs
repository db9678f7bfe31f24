//! v0.10 call table: threaded initialisation and device queries on the legacy
//! boolean core. A missing symbol terminates the process.

use std::os::raw::{c_char, c_int};

use voxbridge_loader::{EngineLibrary, resolver};

/// # Safety
/// `root_dir_path` must be NUL-terminated.
pub unsafe fn initialize(
    lib: &EngineLibrary,
    root_dir_path: *const c_char,
    use_gpu: bool,
    cpu_num_threads: c_int,
) -> bool {
    type F = unsafe extern "C" fn(*const c_char, bool, c_int) -> bool;
    let f = unsafe { resolver::resolve_or_abort::<F>(lib, "initialize") };
    unsafe { f(root_dir_path, use_gpu, cpu_num_threads) }
}

/// # Safety
/// The loaded library must be a v0.10-line engine.
pub unsafe fn finalize(lib: &EngineLibrary) {
    type F = unsafe extern "C" fn();
    let f = unsafe { resolver::resolve_or_abort::<F>(lib, "finalize") };
    unsafe { f() };
}

/// Returns a borrowed JSON string owned by the engine; do not free it.
///
/// # Safety
/// The loaded library must be a v0.10-line engine.
pub unsafe fn supported_devices(lib: &EngineLibrary) -> *const c_char {
    type F = unsafe extern "C" fn() -> *const c_char;
    let f = unsafe { resolver::resolve_or_abort::<F>(lib, "supported_devices") };
    unsafe { f() }
}
