//! App module - instruction modes and printers
//!
//! Maps a parsed instruction word onto the adapter for its mode.

mod commands;

pub use commands::*;
