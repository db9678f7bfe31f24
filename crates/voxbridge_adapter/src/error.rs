use thiserror::Error;

use voxbridge_handles::HandleError;
use voxbridge_loader::LoaderError;

use crate::args::MarshalError;

/// Adapter-level failures surfaced to the scripting caller.
///
/// Engine-reported result codes are not in this taxonomy: they are data,
/// returned verbatim inside [`crate::Reply`]. Nothing here is retried.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// No engine library is bound; call `load` first.
    #[error("no engine library is loaded")]
    LibraryNotLoaded,

    /// Library open/close or symbol-resolution failure (modern generations;
    /// the legacy generations abort instead).
    #[error(transparent)]
    Loader(#[from] LoaderError),

    /// Stale or unknown resource handle.
    #[error(transparent)]
    Handle(#[from] HandleError),

    /// Argument extraction or native conversion failure.
    #[error(transparent)]
    Marshal(#[from] MarshalError),

    /// The dispatch registry has no operation under this name.
    #[error("unknown operation `{0}`")]
    UnknownOperation(String),
}
