//! rv32sim CLI - batch driver for the RV32IM simulator.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

/// rv32sim - an RV32IM assembler and pipelined simulator
#[derive(Parser, Debug)]
#[command(name = "rv32sim")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Assemble a program and run it to completion
    Run {
        /// Assembly source file
        #[arg(required = true)]
        program: PathBuf,

        /// Execute on the five-stage pipeline instead of the
        /// single-cycle core
        #[arg(short, long)]
        pipeline: bool,

        /// Disable operand forwarding (pipeline mode)
        #[arg(long)]
        no_forwarding: bool,

        /// Disable load-use hazard detection (pipeline mode)
        #[arg(long)]
        no_hazard_detection: bool,

        /// Stop after this many cycles even without a halt
        #[arg(long, default_value = "1000000")]
        max_cycles: u64,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Print final register values
        #[arg(short, long)]
        regs: bool,
    },

    /// Assemble a program and report diagnostics without running it
    Check {
        /// Assembly source file
        #[arg(required = true)]
        program: PathBuf,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    let result = match args.command {
        Commands::Run {
            program,
            pipeline,
            no_forwarding,
            no_hazard_detection,
            max_cycles,
            format,
            regs,
        } => cli::run::execute(
            &program,
            pipeline,
            no_forwarding,
            no_hazard_detection,
            max_cycles,
            format,
            regs,
        ),

        Commands::Check { program } => cli::check::execute(&program),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
