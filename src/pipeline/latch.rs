//! Pipeline latch records.
//!
//! Each latch is a flat value record cloned between stages at cycle
//! boundaries; flushing resets it to a no-op bubble with `valid = false`.

use crate::isa::Instruction;

/// IF/ID latch: the fetched word and where it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IfId {
    /// Raw fetched word.
    pub instruction: u32,
    /// Address the word was fetched from.
    pub pc: u32,
    /// Sequential successor address.
    pub next_pc: u32,
    /// Whether the latch holds a real instruction.
    pub valid: bool,
}

impl Default for IfId {
    fn default() -> Self {
        IfId {
            instruction: 0x0000_0013, // NOP
            pc: 0,
            next_pc: 4,
            valid: false,
        }
    }
}

impl IfId {
    /// Replace the contents with a bubble.
    pub fn flush(&mut self) {
        *self = IfId::default();
    }
}

/// ID/EX latch: decoded instruction plus register operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdEx {
    /// Decoded instruction record.
    pub ins: Instruction,
    /// rs1 value as read in ID.
    pub rs1_val: u32,
    /// rs2 value as read in ID.
    pub rs2_val: u32,
    /// Fetch address of the instruction.
    pub pc: u32,
    /// Sequential successor address.
    pub next_pc: u32,
    /// Whether the latch holds a real instruction.
    pub valid: bool,
}

impl Default for IdEx {
    fn default() -> Self {
        IdEx {
            ins: Instruction::default(),
            rs1_val: 0,
            rs2_val: 0,
            pc: 0,
            next_pc: 4,
            valid: false,
        }
    }
}

impl IdEx {
    /// Replace the contents with a bubble.
    pub fn flush(&mut self) {
        *self = IdEx::default();
    }
}

/// EX/MEM latch: ALU result, store data, and branch resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExMem {
    /// Decoded instruction record.
    pub ins: Instruction,
    /// ALU output (memory address for loads/stores, return address for jumps).
    pub alu_result: u32,
    /// Forwarded rs2 value, the data for stores.
    pub rs2_val: u32,
    /// Resolved branch target.
    pub branch_target: u32,
    /// Whether the branch/jump was taken; if so, `branch_target` is the
    /// next address fetch reads from.
    pub branch_taken: bool,
    /// Whether the latch holds a real instruction.
    pub valid: bool,
}

impl ExMem {
    /// Replace the contents with a bubble.
    pub fn flush(&mut self) {
        *self = ExMem::default();
    }
}

/// MEM/WB latch: the values writeback chooses between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MemWb {
    /// Decoded instruction record.
    pub ins: Instruction,
    /// ALU output carried through MEM.
    pub alu_result: u32,
    /// Data loaded from memory, when `ins.mem_read`.
    pub mem_data: u32,
    /// Whether the latch holds a real instruction.
    pub valid: bool,
}

impl MemWb {
    /// Replace the contents with a bubble.
    pub fn flush(&mut self) {
        *self = MemWb::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_bubbles() {
        let if_id = IfId::default();
        assert!(!if_id.valid);
        assert_eq!(if_id.instruction, 0x13);

        let id_ex = IdEx::default();
        assert!(!id_ex.valid);
        assert!(id_ex.ins.is_nop());
    }

    #[test]
    fn test_flush_resets() {
        let mut ex_mem = ExMem {
            alu_result: 99,
            branch_taken: true,
            valid: true,
            ..ExMem::default()
        };
        ex_mem.flush();
        assert_eq!(ex_mem, ExMem::default());
    }
}
