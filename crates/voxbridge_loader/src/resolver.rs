//! Typed symbol resolution.
//!
//! This is the one place where a foreign entry point is cast to a concrete
//! Rust function-pointer type. The cast cannot be checked at run time: if the
//! requested signature does not match the symbol's true calling convention,
//! the resulting call is undefined behaviour. Callers therefore select the
//! ABI generation explicitly and never infer it from the library.

use std::process;

use tracing::error;

use crate::error::LoaderError;
use crate::library::EngineLibrary;

/// Resolve `symbol` from `lib` as a function pointer of type `F`.
///
/// # Safety
///
/// `F` must be the exact `unsafe extern "C" fn` type matching the symbol's
/// true signature in the loaded engine release. A mismatch is undefined
/// behaviour at the subsequent call, not a catchable error here.
pub unsafe fn resolve<F: Copy>(lib: &EngineLibrary, symbol: &str) -> Result<F, LoaderError> {
    let found = unsafe { lib.get::<F>(symbol.as_bytes()) }.map_err(|_| {
        LoaderError::SymbolNotFound {
            symbol: symbol.to_owned(),
        }
    })?;
    Ok(*found)
}

/// Resolve `symbol` or terminate the process.
///
/// The oldest engine generations have no recoverable error path for a missing
/// entry point; callers built against them depend on the fail-fast behaviour,
/// so it is reproduced here rather than softened into a result.
///
/// # Safety
///
/// Same signature obligation as [`resolve`].
pub unsafe fn resolve_or_abort<F: Copy>(lib: &EngineLibrary, symbol: &str) -> F {
    match unsafe { resolve::<F>(lib, symbol) } {
        Ok(f) => f,
        Err(err) => {
            error!(%err, path = %lib.path().display(), "fatal: engine symbol missing");
            process::abort();
        }
    }
}
