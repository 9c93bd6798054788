//! Run command implementation.

use super::{CliError, OutputFormat};
use rv32sim::{regs, Emulator, ExecMode};
use std::path::Path;

/// Execute the run command.
///
/// # Errors
///
/// Returns an error if the program fails to assemble.
#[allow(clippy::too_many_arguments)]
#[allow(clippy::fn_params_excessive_bools)]
pub(crate) fn execute(
    program: &Path,
    pipeline: bool,
    no_forwarding: bool,
    no_hazard_detection: bool,
    max_cycles: u64,
    format: OutputFormat,
    regs: bool,
) -> Result<(), CliError> {
    let mut em = Emulator::new();

    if let Err(errors) = em.load_path(program) {
        let report = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n  ");
        return Err(CliError::new(format!(
            "assembly of {} failed:\n  {report}",
            program.display()
        )));
    }

    if pipeline {
        em.set_mode(ExecMode::Pipeline);
        em.pipeline_mut().set_forwarding(!no_forwarding);
        em.pipeline_mut().set_hazard_detection(!no_hazard_detection);
    }

    while em.step() {
        if em.stats().cycles >= max_cycles {
            eprintln!("warning: stopped after {max_cycles} cycles without a halt");
            break;
        }
    }

    let stats = em.stats();

    match format {
        OutputFormat::Text => {
            println!(
                "{} at pc={:#010x}",
                if em.is_halted() { "halted" } else { "stopped" },
                em.pc()
            );
            println!("cycles:       {}", stats.cycles);
            println!("instructions: {}", stats.instructions);
            if stats.instructions > 0 {
                #[allow(clippy::cast_precision_loss)]
                let cpi = stats.cycles as f64 / stats.instructions as f64;
                println!("cpi:          {cpi:.2}");
            }
            if pipeline {
                println!("stalls:       {}", stats.stalls);
                println!("flushes:      {}", stats.flushes);
                println!("forwards:     {}", stats.forwards);
            }
            println!("mem reads:    {}", stats.mem_reads);
            println!("mem writes:   {}", stats.mem_writes);
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&stats)
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
    }

    if regs {
        println!();
        print_registers(&em);
    }

    Ok(())
}

/// Print the register file, four to a row, with ABI names.
fn print_registers(em: &Emulator) {
    let values = em.registers().all();
    for row in 0..8 {
        let mut line = String::new();
        for col in 0..4 {
            let reg = row * 4 + col;
            line.push_str(&format!(
                "x{reg:<2}/{:<4} = {:#010x}   ",
                regs::NAMES[reg], values[reg]
            ));
        }
        println!("{}", line.trim_end());
    }
}
