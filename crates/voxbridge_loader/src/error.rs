use std::path::PathBuf;

use thiserror::Error;

/// Failures raised while opening a library or resolving a symbol from it.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// The path did not name a loadable shared library.
    #[error("failed to load engine library {path}: {source}")]
    LibraryNotFound {
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },

    /// The library is open but does not export the requested symbol. The
    /// embedded name tells the caller which generation/function is missing.
    #[error("engine library does not export `{symbol}`; wrong ABI generation or engine release?")]
    SymbolNotFound { symbol: String },

    /// An unload was requested for a path that is not currently loaded.
    #[error("no engine library loaded from {path}")]
    UnloadFailed { path: PathBuf },
}
