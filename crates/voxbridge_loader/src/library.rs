use std::collections::HashMap;
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use libloading::Library;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use tracing::debug;

use crate::error::LoaderError;

/// Thin wrapper around a `libloading::Library` with reference counting so the
/// adapter can clone handles when sharing across call sites. The OS handle is
/// closed when the last clone drops; function pointers resolved from it are
/// weak and must not outlive the wrapper.
#[derive(Clone)]
pub struct EngineLibrary {
    inner: Arc<Library>,
    path: PathBuf,
}

impl EngineLibrary {
    /// Open the shared library at `path`.
    pub fn open(path: &Path) -> Result<Self, LoaderError> {
        let library = unsafe { Library::new(path) }.map_err(|source| {
            LoaderError::LibraryNotFound {
                path: path.to_path_buf(),
                source,
            }
        })?;
        debug!(path = %path.display(), "opened engine library");
        Ok(Self {
            inner: Arc::new(library),
            path: path.to_path_buf(),
        })
    }

    /// The path this library was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Deref for EngineLibrary {
    type Target = Library;

    fn deref(&self) -> &Self::Target {
        self.inner.as_ref()
    }
}

impl std::fmt::Debug for EngineLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineLibrary")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

/// Loads engine libraries on demand and caches the handles per path, so two
/// adapters pointed at the same engine file share one OS handle.
pub struct LibraryLoader {
    cache: Mutex<HashMap<PathBuf, EngineLibrary>>,
}

impl Default for LibraryLoader {
    fn default() -> Self {
        Self {
            cache: Mutex::new(HashMap::new()),
        }
    }
}

impl LibraryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn global() -> &'static Self {
        static GLOBAL: Lazy<LibraryLoader> = Lazy::new(LibraryLoader::new);
        &GLOBAL
    }

    pub fn load(&self, path: &Path) -> Result<EngineLibrary, LoaderError> {
        if let Some(existing) = self.cache.lock().get(path).cloned() {
            return Ok(existing);
        }

        let handle = EngineLibrary::open(path)?;
        self.cache.lock().insert(path.to_path_buf(), handle.clone());
        Ok(handle)
    }

    /// Drop the cached handle for `path`. The OS library is closed once every
    /// outstanding [`EngineLibrary`] clone is gone; callers must not retain
    /// symbol pointers across this point.
    pub fn unload(&self, path: &Path) -> Result<(), LoaderError> {
        match self.cache.lock().remove(path) {
            Some(handle) => {
                debug!(path = %handle.path().display(), "evicted engine library");
                Ok(())
            }
            None => Err(LoaderError::UnloadFailed {
                path: path.to_path_buf(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_missing_library_names_path() {
        let err = EngineLibrary::open(Path::new("/nonexistent/libengine.so")).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("/nonexistent/libengine.so"), "{message}");
    }

    #[test]
    fn test_unload_unknown_path_fails() {
        let loader = LibraryLoader::new();
        let err = loader.unload(Path::new("/never/loaded.so")).unwrap_err();
        assert!(matches!(err, LoaderError::UnloadFailed { .. }));
    }
}
