//! CLI - argument parsing and validation
//!
//! Turns the raw process arguments into a mode and an instruction word.
//! Every rejection is a [`CliError`] whose message is what the user sees.

use std::ffi::OsString;

use thiserror::Error;

use crate::app::{InvalidMode, Mode};

/// Longest hex digit string accepted after prefix removal
pub const MAX_HEX_DIGITS: usize = 8;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    #[error("usage: {program} <a32/a64/thumb> <instruction_in_hex>")]
    Usage { program: String },

    #[error("hex string too long")]
    HexTooLong,

    #[error(transparent)]
    InvalidMode(#[from] InvalidMode),
}

/// A validated request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Invocation {
    pub mode: Mode,
    pub instruction: u32,
}

/// Parse process arguments (program name first): `<mode> <hex> [ignored]`.
///
/// Tokens are taken verbatim; `--`, `-h` and friends are ordinary values.
/// Checks run in order: argument count, hex length, mode.
pub fn parse_invocation<I, T>(args: I) -> Result<Invocation, CliError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();

    let (mode, hex) = match args.as_slice() {
        [_, mode, hex] => (mode, hex),
        [_, mode, hex, extra] => {
            log::debug!("Ignoring trailing argument {:?}", extra);
            (mode, hex)
        }
        _ => {
            let program = args
                .first()
                .map(|p| p.to_string_lossy().into_owned())
                .unwrap_or_else(|| "disarm".to_string());
            log::debug!("Expected 2 or 3 arguments, got {}", args.len().saturating_sub(1));
            return Err(CliError::Usage { program });
        }
    };

    let digits = strip_hex_prefix(hex.as_encoded_bytes());
    if digits.len() > MAX_HEX_DIGITS {
        return Err(CliError::HexTooLong);
    }

    // Non-UTF-8 bytes become U+FFFD, which ends the digit run
    let instruction = parse_hex_word(&String::from_utf8_lossy(digits));
    let mode: Mode = mode.to_string_lossy().parse()?;
    log::info!("Decoding {:#010x} as {:?}", instruction, mode);

    Ok(Invocation { mode, instruction })
}

/// Drop a leading lowercase `0x`, but only when digits follow it.
pub fn strip_hex_prefix(s: &[u8]) -> &[u8] {
    match s.strip_prefix(b"0x") {
        Some(rest) if !rest.is_empty() => rest,
        _ => s,
    }
}

/// Lenient base-16 conversion with C `strtol` semantics, truncated to 32 bits.
///
/// Leading whitespace, a sign and a `0x`/`0X` prefix are accepted; parsing
/// stops at the first non-hex character and an empty digit run yields 0.
pub fn parse_hex_word(s: &str) -> u32 {
    let s = s.trim_start_matches(|c: char| c.is_ascii_whitespace());
    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let s = match s.get(..2) {
        Some("0x" | "0X") if s[2..].starts_with(|c: char| c.is_ascii_hexdigit()) => &s[2..],
        _ => s,
    };

    let end = s.find(|c: char| !c.is_ascii_hexdigit()).unwrap_or(s.len());
    let run = &s[..end];
    if run.is_empty() {
        return 0;
    }

    // Out-of-range input saturates to the 64-bit long bounds, like strtol.
    let magnitude = u64::from_str_radix(run, 16).map_or(i128::MAX, i128::from);
    let value = if negative { -magnitude } else { magnitude };
    value.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as u32
}
