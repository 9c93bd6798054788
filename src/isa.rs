//! RISC-V instruction set: decoding, control signals, and the ALU.

pub mod alu;
mod instruction;

pub use alu::AluOp;
pub use instruction::{Format, InsKind, Instruction};

/// Decode a 32-bit instruction word fetched at `pc`.
///
/// Never fails: unrecognized encodings yield a well-formed record with
/// [`InsKind::Unknown`], which executes as a no-op.
#[must_use]
pub fn decode(word: u32, pc: u32) -> Instruction {
    instruction::decode(word, pc)
}
