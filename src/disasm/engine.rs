//! Disassembly Engine using Capstone
//!
//! Owns one Capstone handle for the lifetime of an [`Engine`] value. The
//! handle is closed when the engine is dropped, so every early return out of
//! a decode loop still releases it.

use capstone::prelude::*;
use thiserror::Error;

/// Text emitted in place of an instruction the engine could not decode.
pub const INVALID_INSTRUCTION: &str = "<invalid instruction>";

#[derive(Error, Debug)]
pub enum DisasmError {
    #[error("Capstone error: {0}")]
    CapstoneError(String),
}

impl From<capstone::Error> for DisasmError {
    fn from(err: capstone::Error) -> Self {
        DisasmError::CapstoneError(err.to_string())
    }
}

/// Architecture variant the engine is opened for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// 32-bit ARM, fixed 4-byte encoding
    Arm,
    /// 32-bit ARM, mixed 2/4-byte encoding
    Thumb,
    /// 64-bit ARM
    Arm64,
}

impl Target {
    /// Step taken over an undecodable instruction so the walk always advances.
    pub fn min_instruction_size(self) -> usize {
        match self {
            Target::Thumb => 2,
            Target::Arm | Target::Arm64 => 4,
        }
    }
}

/// A single decoded instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedInstruction {
    pub mnemonic: String,
    pub operands: String,
    /// Bytes consumed from the input buffer
    pub length: usize,
}

impl DecodedInstruction {
    /// Tab-separated assembly text, e.g. `\tadd\tr0, r0, r1`
    pub fn format(&self) -> String {
        if self.operands.is_empty() {
            format!("\t{}", self.mnemonic)
        } else {
            format!("\t{}\t{}", self.mnemonic, self.operands)
        }
    }
}

pub struct DisasmEngine {
    cs: Capstone,
    target: Target,
}

impl DisasmEngine {
    pub fn new(target: Target) -> Result<Self, DisasmError> {
        let cs = match target {
            Target::Arm => Capstone::new()
                .arm()
                .mode(arch::arm::ArchMode::Arm)
                .extra_mode([arch::arm::ArchExtraMode::V8].iter().copied())
                .build()?,
            Target::Thumb => Capstone::new()
                .arm()
                .mode(arch::arm::ArchMode::Thumb)
                .extra_mode([arch::arm::ArchExtraMode::V8].iter().copied())
                .build()?,
            Target::Arm64 => Capstone::new()
                .arm64()
                .mode(arch::arm64::ArchMode::Arm)
                .build()?,
        };

        log::debug!("Opened {:?} disassembly engine", target);
        Ok(Self { cs, target })
    }

    pub fn target(&self) -> Target {
        self.target
    }

    /// Decode the first instruction of `bytes`, addressed at `address`.
    ///
    /// Returns `Ok(None)` when the engine consumed nothing.
    pub fn decode_one(
        &self,
        bytes: &[u8],
        address: u64,
    ) -> Result<Option<DecodedInstruction>, DisasmError> {
        log::trace!("Decoding [{}] at {:#x}", hex::encode(bytes), address);

        let insns = self.cs.disasm_count(bytes, address, 1)?;
        let decoded = insns
            .iter()
            .next()
            .filter(|insn| insn.len() > 0)
            .map(|insn| DecodedInstruction {
                mnemonic: insn.mnemonic().unwrap_or("???").to_string(),
                operands: insn.op_str().unwrap_or("").to_string(),
                length: insn.len(),
            });

        if decoded.is_none() {
            log::debug!("No instruction decoded at {:#x}", address);
        }

        Ok(decoded)
    }
}

impl Drop for DisasmEngine {
    fn drop(&mut self) {
        // Capstone closes its handle in its own Drop
        log::debug!("Closing {:?} disassembly engine", self.target);
    }
}
