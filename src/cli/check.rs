//! Check command implementation: assemble and report, never run.

use super::CliError;
use rv32sim::Assembler;
use std::path::Path;

/// Execute the check command.
///
/// # Errors
///
/// Returns an error listing every diagnostic when assembly fails.
pub(crate) fn execute(program: &Path) -> Result<(), CliError> {
    let result = Assembler::new().assemble_path(program);

    if !result.success() {
        for error in &result.errors {
            eprintln!("{}: {error}", program.display());
        }
        return Err(CliError::new(format!(
            "{} diagnostics",
            result.errors.len()
        )));
    }

    println!(
        "ok: {} instructions, {} data bytes, {} symbols",
        result.text.len(),
        result.data.len(),
        result.symbols.len()
    );
    for (name, addr) in &result.symbols {
        println!("  {addr:#010x}  {name}");
    }

    Ok(())
}
