// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! rv32sim: an RV32IM teaching simulator.
//!
//! The crate assembles RISC-V source into machine code and executes it on
//! either of two engines over the same architectural state:
//!
//! ```text
//! source text ──> Assembler ──> Program (text words, data bytes, symbols)
//!                                  │ loaded at fixed bases
//!                                  ▼
//!               ┌────────── Memory + RegisterFile ──────────┐
//!               │                                           │
//!      Cpu (single-cycle reference)     Pipeline (5-stage, in-order)
//! ```
//!
//! The single-cycle [`Cpu`] is the functional reference. The [`Pipeline`]
//! models fetch, decode, execute, memory and writeback with latches between
//! stages, stalls on load-use hazards, operand forwarding, and branch
//! resolution in execute with a two-bubble flush. With hazard handling
//! enabled it commits the same register file and memory as the reference
//! for any program.

pub mod asm;
pub mod emulator;
pub mod exec;
pub mod isa;
pub mod mem;
pub mod pipeline;
pub mod regs;

pub use asm::{AsmError, Assembler, Program};
pub use emulator::{Emulator, ExecMode, ExecStats};
pub use exec::Cpu;
pub use mem::Memory;
pub use pipeline::Pipeline;
pub use regs::RegisterFile;
