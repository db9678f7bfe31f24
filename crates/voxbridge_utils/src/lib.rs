//! Shared utilities for the voxbridge crates.

pub mod logger;

pub use logger::init_logging;
