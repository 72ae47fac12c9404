//! Mode selection and per-mode printers

use std::io::Write;
use std::str::FromStr;

use anyhow::{Context, Result};
use thiserror::Error;

use crate::disasm::{disassemble_aarch32, disassemble_aarch64};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid mode: {0}\nValid values: a32, a64, thumb")]
pub struct InvalidMode(pub String);

/// Instruction set to decode the word as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    A32,
    A64,
    /// `t16`, `t32` and `thumb`; the width comes from the word itself
    Thumb,
}

impl FromStr for Mode {
    type Err = InvalidMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "a32" => Ok(Mode::A32),
            "a64" => Ok(Mode::A64),
            "t32" | "t16" | "thumb" => Ok(Mode::Thumb),
            other => Err(InvalidMode(other.to_string())),
        }
    }
}

impl Mode {
    /// Print `instruction` decoded in this mode, followed by a blank line.
    pub fn print<W: Write>(self, instruction: u32, out: &mut W) -> Result<()> {
        match self {
            Mode::A32 => print_a32_instruction(instruction, out),
            Mode::A64 => print_a64_instruction(instruction, out),
            Mode::Thumb => print_thumb_instruction(instruction, out),
        }
    }
}

/// Byte width of a Thumb word: 16-bit encodings leave the upper half zero.
pub fn thumb_instruction_size(instruction: u32) -> usize {
    if instruction >> 16 == 0 {
        2
    } else {
        4
    }
}

pub fn print_a32_instruction<W: Write>(instruction: u32, out: &mut W) -> Result<()> {
    let dis = disassemble_aarch32(false, 0, &instruction.to_le_bytes())
        .context("A32 disassembly failed")?;
    emit(out, &dis)
}

pub fn print_a64_instruction<W: Write>(instruction: u32, out: &mut W) -> Result<()> {
    let dis = disassemble_aarch64(0, instruction).context("A64 disassembly failed")?;
    emit(out, &dis)
}

pub fn print_thumb_instruction<W: Write>(instruction: u32, out: &mut W) -> Result<()> {
    let size = thumb_instruction_size(instruction);
    log::debug!("Thumb instruction {:#x} is {} bytes wide", instruction, size);

    let bytes = instruction.to_le_bytes();
    let dis = disassemble_aarch32(true, 0, &bytes[..size]).context("Thumb disassembly failed")?;
    emit(out, &dis)
}

fn emit<W: Write>(out: &mut W, dis: &str) -> Result<()> {
    writeln!(out, "{}", dis).context("Failed to write disassembly")?;
    out.flush()?;
    Ok(())
}
