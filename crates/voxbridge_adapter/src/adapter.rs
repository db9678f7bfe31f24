//! The adapter instance: one engine library plus the four resource tables.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::path::Path;

use parking_lot::RwLock;
use tracing::debug;

use voxbridge_abi::{OpenJtalkRc, Synthesizer, UserDict, VoiceModel};
use voxbridge_handles::{HandleTable, ResourceKind};
use voxbridge_loader::{EngineLibrary, LibraryLoader};

use crate::args::MarshalError;
use crate::error::AdapterError;

/// Synchronous call-through adapter over one loaded engine library.
///
/// The adapter introduces no concurrency of its own; every operation blocks
/// for the duration of the foreign call. Each resource-producing operation is
/// a single critical section from foreign construction to table insertion, so
/// a concurrent removal cannot race the insert. Load and unload must be
/// serialized by the caller against in-flight operations.
pub struct EngineAdapter {
    library: RwLock<Option<EngineLibrary>>,
    pub(crate) text_analyzers: HandleTable<OpenJtalkRc>,
    pub(crate) user_dicts: HandleTable<UserDict>,
    pub(crate) voice_models: HandleTable<VoiceModel>,
    pub(crate) synthesizers: HandleTable<Synthesizer>,
}

impl Default for EngineAdapter {
    fn default() -> Self {
        Self {
            library: RwLock::new(None),
            text_analyzers: HandleTable::new(ResourceKind::TextAnalyzer),
            user_dicts: HandleTable::new(ResourceKind::UserDict),
            voice_models: HandleTable::new(ResourceKind::VoiceModel),
            synthesizers: HandleTable::new(ResourceKind::Synthesizer),
        }
    }
}

impl EngineAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind the engine library at `path`. Replaces any previously bound
    /// library; resources tracked for the old one are dropped from the
    /// tables since their pointers die with it.
    pub fn load(&self, path: &Path) -> Result<(), AdapterError> {
        let library = LibraryLoader::global().load(path)?;
        let previous = self.library.write().replace(library);
        if previous.is_some() {
            self.clear_tables();
        }
        debug!(path = %path.display(), "engine library bound");
        Ok(())
    }

    /// Unbind the engine library. Every handle in the four tables becomes
    /// stale and is dropped; subsequent operations fail with
    /// [`AdapterError::LibraryNotLoaded`].
    pub fn unload(&self) -> Result<(), AdapterError> {
        let library = self
            .library
            .write()
            .take()
            .ok_or(AdapterError::LibraryNotLoaded)?;
        self.clear_tables();
        // Another adapter may already have evicted this path; the handle we
        // just dropped still closes once the last clone is gone.
        let _ = LibraryLoader::global().unload(library.path());
        debug!(path = %library.path().display(), "engine library unbound");
        Ok(())
    }

    pub fn is_loaded(&self) -> bool {
        self.library.read().is_some()
    }

    /// Clone out the bound library, failing closed when none is bound. The
    /// clone keeps the OS handle alive for the duration of the call even if
    /// an unload races in, so resolved symbols stay valid until we return.
    pub(crate) fn engine(&self) -> Result<EngineLibrary, AdapterError> {
        self.library
            .read()
            .clone()
            .ok_or(AdapterError::LibraryNotLoaded)
    }

    fn clear_tables(&self) {
        self.text_analyzers.clear();
        self.user_dicts.clear();
        self.voice_models.clear();
        self.synthesizers.clear();
    }
}

/// Convert a host string to a NUL-terminated C string.
pub(crate) fn cstring(value: &str) -> Result<CString, MarshalError> {
    CString::new(value).map_err(|_| MarshalError::NulInString)
}

/// Copy a borrowed, engine-owned C string into host memory. A null pointer
/// becomes an empty string rather than a crash.
pub(crate) unsafe fn copy_cstr(ptr: *const c_char) -> String {
    if ptr.is_null() {
        return String::new();
    }
    unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operations_require_a_loaded_library() {
        let adapter = EngineAdapter::new();
        assert!(!adapter.is_loaded());
        assert!(matches!(
            adapter.engine().unwrap_err(),
            AdapterError::LibraryNotLoaded
        ));
    }

    #[test]
    fn test_unload_without_load_fails() {
        let adapter = EngineAdapter::new();
        assert!(matches!(
            adapter.unload().unwrap_err(),
            AdapterError::LibraryNotLoaded
        ));
    }

    #[test]
    fn test_load_rejects_bad_path() {
        let adapter = EngineAdapter::new();
        let err = adapter.load(Path::new("/no/such/engine.so")).unwrap_err();
        assert!(err.to_string().contains("/no/such/engine.so"));
        assert!(!adapter.is_loaded());
    }

    #[test]
    fn test_cstring_rejects_interior_nul() {
        assert!(matches!(
            cstring("bad\0text").unwrap_err(),
            MarshalError::NulInString
        ));
    }
}
