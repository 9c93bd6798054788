//! Top-level facade tying the assembler, memory, registers and the two
//! executors together.
//!
//! Only one executor drives the shared architectural state at a time,
//! selected by [`ExecMode`]; callers must not interleave single-cycle
//! steps and pipeline cycles without a reset in between.

use std::path::Path;

use serde::Serialize;

use crate::asm::{AsmError, Assembler, Program};
use crate::exec::Cpu;
use crate::mem::{Memory, STACK_TOP};
use crate::pipeline::Pipeline;
use crate::regs::RegisterFile;

/// Which executor `step`/`run` drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecMode {
    /// The single-cycle reference executor.
    #[default]
    SingleCycle,
    /// The five-stage pipeline.
    Pipeline,
}

/// Execution statistics, uniform across both executors.
///
/// Stall/flush/forward counts are zero in single-cycle mode. Memory
/// counters are byte-granular and include the program-load writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExecStats {
    /// Clock cycles elapsed.
    pub cycles: u64,
    /// Instructions executed (committed, for the pipeline).
    pub instructions: u64,
    /// Load-use stall cycles inserted.
    pub stalls: u64,
    /// Latches flushed by taken branches.
    pub flushes: u64,
    /// Operands bypassed into EX.
    pub forwards: u64,
    /// Bytes read from memory.
    pub mem_reads: u64,
    /// Bytes written to memory.
    pub mem_writes: u64,
}

/// The emulator: owns the architectural state, both executors, and the
/// last assembled program.
#[derive(Debug, Default)]
pub struct Emulator {
    mem: Memory,
    regs: RegisterFile,
    cpu: Cpu,
    pipeline: Pipeline,
    mode: ExecMode,
    program: Option<Program>,
}

impl Emulator {
    /// Create an emulator with no program loaded.
    #[must_use]
    pub fn new() -> Self {
        Emulator {
            mem: Memory::new(),
            regs: RegisterFile::new(),
            cpu: Cpu::new(),
            pipeline: Pipeline::new(),
            mode: ExecMode::SingleCycle,
            program: None,
        }
    }

    /// Assemble `source` and load it.
    ///
    /// # Errors
    ///
    /// Returns the assembly diagnostics when the source has errors; no
    /// state changes in that case.
    pub fn load_source(&mut self, source: &str) -> Result<(), Vec<AsmError>> {
        self.install_program(Assembler::new().assemble(source))
    }

    /// Assemble the file at `path` and load it.
    ///
    /// # Errors
    ///
    /// Returns the assembly diagnostics (including a missing-file
    /// diagnostic) when assembly fails; no state changes in that case.
    pub fn load_path(&mut self, path: &Path) -> Result<(), Vec<AsmError>> {
        self.install_program(Assembler::new().assemble_path(path))
    }

    fn install_program(&mut self, program: Program) -> Result<(), Vec<AsmError>> {
        if !program.success() {
            return Err(program.errors);
        }
        self.program = Some(program);
        self.install();
        Ok(())
    }

    /// Populate memory and registers from the held program: text at its
    /// base, data at its base, stack pointer in x2.
    fn install(&mut self) {
        self.mem.reset();
        self.regs.reset();
        self.cpu.reset();
        self.pipeline.reset();

        if let Some(program) = &self.program {
            self.mem.write_block(program.text_base, &program.text);
            self.mem.write_bytes(program.data_base, &program.data);
            self.regs.write(2, STACK_TOP);
        }
    }

    /// Reset all state and reload the last assembled program.
    pub fn reset(&mut self) {
        self.install();
    }

    /// Which executor is active.
    #[must_use]
    pub fn mode(&self) -> ExecMode {
        self.mode
    }

    /// Select the active executor.
    pub fn set_mode(&mut self, mode: ExecMode) {
        self.mode = mode;
    }

    /// Advance the active executor by one step (single-cycle instruction
    /// or pipeline clock cycle). Returns `false` on halt or breakpoint.
    pub fn step(&mut self) -> bool {
        match self.mode {
            ExecMode::SingleCycle => self.cpu.step(&mut self.mem, &mut self.regs),
            ExecMode::Pipeline => self.pipeline.cycle(&mut self.mem, &mut self.regs),
        }
    }

    /// Run the active executor until halt or breakpoint.
    pub fn run(&mut self) {
        match self.mode {
            ExecMode::SingleCycle => self.cpu.run(&mut self.mem, &mut self.regs),
            ExecMode::Pipeline => self.pipeline.run(&mut self.mem, &mut self.regs),
        }
    }

    /// Program counter of the active executor.
    #[must_use]
    pub fn pc(&self) -> u32 {
        match self.mode {
            ExecMode::SingleCycle => self.cpu.pc(),
            ExecMode::Pipeline => self.pipeline.pc(),
        }
    }

    /// Whether the active executor has halted on `ecall`.
    #[must_use]
    pub fn is_halted(&self) -> bool {
        match self.mode {
            ExecMode::SingleCycle => self.cpu.is_halted(),
            ExecMode::Pipeline => self.pipeline.is_halted(),
        }
    }

    /// Statistics of the active executor plus the shared memory counters.
    #[must_use]
    pub fn stats(&self) -> ExecStats {
        let (cycles, instructions, stalls, flushes, forwards) = match self.mode {
            ExecMode::SingleCycle => (self.cpu.cycle_count(), self.cpu.instruction_count(), 0, 0, 0),
            ExecMode::Pipeline => (
                self.pipeline.cycle_count(),
                self.pipeline.instruction_count(),
                self.pipeline.stall_count(),
                self.pipeline.flush_count(),
                self.pipeline.forward_count(),
            ),
        };
        ExecStats {
            cycles,
            instructions,
            stalls,
            flushes,
            forwards,
            mem_reads: self.mem.read_count(),
            mem_writes: self.mem.write_count(),
        }
    }

    /// The shared register file.
    #[must_use]
    pub fn registers(&self) -> &RegisterFile {
        &self.regs
    }

    /// The shared memory (use the `peek_*` accessors for display).
    #[must_use]
    pub fn memory(&self) -> &Memory {
        &self.mem
    }

    /// The last successfully assembled program, if any.
    #[must_use]
    pub fn program(&self) -> Option<&Program> {
        self.program.as_ref()
    }

    /// The single-cycle executor, for breakpoints and inspection.
    #[must_use]
    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    /// Mutable single-cycle executor, for breakpoints and `set_pc`.
    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.cpu
    }

    /// The pipeline, for the stage snapshot and statistics.
    #[must_use]
    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Mutable pipeline, for breakpoints and the hazard switches.
    pub fn pipeline_mut(&mut self) -> &mut Pipeline {
        &mut self.pipeline
    }
}
