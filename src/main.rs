//! disarm - single-instruction disassembler
//!
//! Entry point that validates `<mode> <hex>` and prints the decoded text.

use std::process::ExitCode;

use disarm::ui::cli::parse_invocation;

fn main() -> anyhow::Result<ExitCode> {
    // 1. Initialize logger; stderr only, stdout carries the disassembly
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // 2. Parse command line arguments
    let invocation = match parse_invocation(std::env::args_os()) {
        Ok(invocation) => invocation,
        Err(e) => {
            println!("{}", e);
            return Ok(ExitCode::FAILURE);
        }
    };

    log::debug!("Invocation: {:?}", invocation);

    // 3. Decode and print
    let stdout = std::io::stdout();
    invocation.mode.print(invocation.instruction, &mut stdout.lock())?;

    Ok(ExitCode::SUCCESS)
}
