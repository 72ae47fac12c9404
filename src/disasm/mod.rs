//! Disassembly module - ARM, Thumb and AArch64 text disassembly
//!
//! Uses Capstone as the decoding backend.

pub mod engine;

pub use engine::{DecodedInstruction, DisasmEngine, DisasmError, Target, INVALID_INSTRUCTION};

/// Disassemble a 32-bit ARM or Thumb buffer, one instruction per line.
///
/// Undecodable instructions are rendered as [`INVALID_INSTRUCTION`] and
/// skipped by the minimum instruction size of the mode. The walk stops once
/// the remaining length is no larger than the last step, so a trailing
/// fragment is never decoded twice.
pub fn disassemble_aarch32(is_thumb: bool, pc: u32, instructions: &[u8]) -> Result<String, DisasmError> {
    let engine = DisasmEngine::new(if is_thumb { Target::Thumb } else { Target::Arm })?;

    let mut result = String::new();
    let mut pc = pc;
    let mut rest = instructions;

    while !rest.is_empty() {
        let step = match engine.decode_one(rest, u64::from(pc))? {
            Some(insn) => {
                result.push_str(&insn.format());
                insn.length
            }
            None => {
                result.push_str(INVALID_INSTRUCTION);
                engine.target().min_instruction_size()
            }
        };
        result.push('\n');

        if rest.len() <= step {
            break;
        }

        pc = pc.wrapping_add(step as u32);
        rest = &rest[step..];
    }

    Ok(result)
}

/// Disassemble exactly one AArch64 instruction word.
pub fn disassemble_aarch64(pc: u64, instruction: u32) -> Result<String, DisasmError> {
    let engine = DisasmEngine::new(Target::Arm64)?;

    let mut result = match engine.decode_one(&instruction.to_le_bytes(), pc)? {
        Some(insn) => insn.format(),
        None => INVALID_INSTRUCTION.to_string(),
    };
    result.push('\n');

    Ok(result)
}
