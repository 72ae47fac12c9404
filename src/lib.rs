//! disarm - ARM / AArch64 / Thumb instruction disassembler
//!
//! Library half of the `disarm` binary: argument validation, mode dispatch
//! and the Capstone-backed disassembly adapters.

pub mod app;
pub mod disasm;
pub mod ui;

pub use app::Mode;
pub use disasm::{disassemble_aarch32, disassemble_aarch64, DisasmError, INVALID_INSTRUCTION};
