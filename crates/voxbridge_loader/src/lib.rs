//! Run-time loading of speech-engine shared libraries.
//!
//! This crate owns the two lowest layers of the adapter: opening a shared
//! library from a caller-supplied path ([`EngineLibrary`], [`LibraryLoader`])
//! and resolving foreign symbols into typed function pointers
//! ([`resolver::resolve`], [`resolver::resolve_or_abort`]).

pub mod error;
pub mod library;
pub mod resolver;

pub use error::LoaderError;
pub use library::{EngineLibrary, LibraryLoader};
