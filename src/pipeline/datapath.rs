//! The five-stage datapath.
//!
//! Stages run in strict reverse order (WB, MEM, EX, ID, IF) within one
//! `cycle()`, so every stage reads its input latch before the upstream
//! stage overwrites it; reverse order substitutes for double-buffering
//! the latches. The register file write in WB therefore lands before ID
//! reads in the same cycle, giving the conventional write-first-half /
//! read-second-half resolution.

#![allow(clippy::cast_sign_loss)] // immediates are added to addresses as wrapped u32

use crate::exec::memory_access;
use crate::isa::{self, alu, InsKind};
use crate::mem::{Memory, TEXT_BASE};
use crate::pipeline::hazard::{self, Forward};
use crate::pipeline::latch::{ExMem, IdEx, IfId, MemWb};
use crate::regs::RegisterFile;

/// The pipelined executor.
///
/// Architectural state (memory, register file) is borrowed per cycle;
/// the struct owns only the microarchitectural state: PC, the four
/// latches, the hazard-handling switches and the statistics counters.
#[derive(Debug, Clone)]
pub struct Pipeline {
    pc: u32,
    next_pc: u32,

    if_id: IfId,
    id_ex: IdEx,
    ex_mem: ExMem,
    mem_wb: MemWb,

    hazard_detection: bool,
    forwarding: bool,

    halted: bool,
    stalled: bool,

    cycles: u64,
    instructions: u64,
    stalls: u64,
    flushes: u64,
    forwards: u64,

    breakpoints: Vec<u32>,
}

impl Pipeline {
    /// Create a pipeline with the PC at the text base and both hazard
    /// switches enabled.
    #[must_use]
    pub fn new() -> Self {
        Pipeline {
            pc: TEXT_BASE,
            next_pc: TEXT_BASE.wrapping_add(4),
            if_id: IfId::default(),
            id_ex: IdEx::default(),
            ex_mem: ExMem::default(),
            mem_wb: MemWb::default(),
            hazard_detection: true,
            forwarding: true,
            halted: false,
            stalled: false,
            cycles: 0,
            instructions: 0,
            stalls: 0,
            flushes: 0,
            forwards: 0,
            breakpoints: Vec::new(),
        }
    }

    /// Return to the reset state: PC at the text base, all latches
    /// bubbled, counters zeroed. Switches and breakpoints survive.
    pub fn reset(&mut self) {
        self.pc = TEXT_BASE;
        self.next_pc = TEXT_BASE.wrapping_add(4);
        self.halted = false;
        self.stalled = false;
        self.cycles = 0;
        self.instructions = 0;
        self.stalls = 0;
        self.flushes = 0;
        self.forwards = 0;
        self.if_id.flush();
        self.id_ex.flush();
        self.ex_mem.flush();
        self.mem_wb.flush();
    }

    /// Advance the pipeline by one clock cycle.
    ///
    /// Returns `false` when execution should not continue: the pipeline
    /// has halted, or `pc` already sits on a breakpoint (in which case no
    /// stage executes).
    pub fn cycle(&mut self, mem: &mut Memory, regs: &mut RegisterFile) -> bool {
        if self.halted {
            return false;
        }
        // A breakpoint suspends the clock between cycles: the cycle that
        // set pc here completed normally, this call does nothing.
        if self.has_breakpoint(self.pc) {
            return false;
        }

        self.stalled = self.detect_stall();

        if self.stalled {
            self.stalls += 1;
            // Drain the back half; the bubble replaces the load's consumer
            // while IF/ID and pc hold so it re-decodes next cycle.
            self.stage_wb(regs);
            self.stage_mem(mem);
            self.stage_ex();
            self.id_ex.flush();
        } else {
            self.stage_wb(regs);
            self.stage_mem(mem);
            let redirect = self.stage_ex();
            self.stage_id(regs);
            // A taken branch claims this cycle's fetch slot: the squashed
            // fetch is one of the two flushed bubbles.
            if !redirect {
                self.stage_if(mem);
            }
        }

        self.cycles += 1;

        !self.halted
    }

    /// Run until halt or breakpoint.
    pub fn run(&mut self, mem: &mut Memory, regs: &mut RegisterFile) {
        while self.cycle(mem, regs) {}
    }

    /// Load-use stall decision for this cycle: the instruction sitting in
    /// IF/ID is decoded on the fly and checked against the load in ID/EX.
    fn detect_stall(&self) -> bool {
        if !self.hazard_detection {
            return false;
        }
        if !self.id_ex.valid || !self.id_ex.ins.mem_read {
            return false;
        }
        let next_ins = isa::decode(self.if_id.instruction, self.if_id.pc);
        hazard::detect_load_use(&self.id_ex, &next_ins)
    }

    // ==================== Stages ====================

    /// IF: fetch `mem[pc]` into IF/ID and advance the fetch stream.
    fn stage_if(&mut self, mem: &mut Memory) {
        self.if_id.instruction = mem.read_word(self.pc);
        self.if_id.pc = self.pc;
        self.if_id.next_pc = self.pc.wrapping_add(4);
        self.if_id.valid = true;

        self.pc = self.next_pc;
        self.next_pc = self.pc.wrapping_add(4);
    }

    /// ID: decode IF/ID and read the register file as it stands right
    /// now (WB already ran this cycle).
    fn stage_id(&mut self, regs: &RegisterFile) {
        if !self.if_id.valid {
            self.id_ex.flush();
            return;
        }

        let ins = isa::decode(self.if_id.instruction, self.if_id.pc);

        self.id_ex.rs1_val = regs.read(ins.rs1);
        self.id_ex.rs2_val = regs.read(ins.rs2);
        self.id_ex.pc = self.if_id.pc;
        self.id_ex.next_pc = self.if_id.next_pc;
        self.id_ex.ins = ins;
        self.id_ex.valid = true;
    }

    /// EX: select forwarded operands, run the ALU, resolve branches.
    ///
    /// Returns `true` when a taken branch redirected the fetch stream;
    /// the caller must then skip IF for this cycle.
    fn stage_ex(&mut self) -> bool {
        if !self.id_ex.valid {
            self.ex_mem.flush();
            return false;
        }

        let ins = self.id_ex.ins;

        // Operand selection: bypass from the two older in-flight results
        // when they target our sources. EX/MEM is the younger of the two
        // and takes priority.
        let (fwd_a, fwd_b) = if self.forwarding {
            let a = hazard::forward_rs1(&self.id_ex, &self.ex_mem, &self.mem_wb);
            let b = hazard::forward_rs2(&self.id_ex, &self.ex_mem, &self.mem_wb);
            self.forwards += u64::from(a != Forward::None) + u64::from(b != Forward::None);
            (a, b)
        } else {
            (Forward::None, Forward::None)
        };

        let rs1_val = self.forwarded_value(fwd_a, self.id_ex.rs1_val);
        let rs2_val = self.forwarded_value(fwd_b, self.id_ex.rs2_val);

        let alu_a = if ins.kind == InsKind::Auipc {
            self.id_ex.pc
        } else {
            rs1_val
        };
        let alu_b = if ins.alu_src { ins.imm as u32 } else { rs2_val };
        let mut alu_result = alu::execute(ins.alu_op, alu_a, alu_b);

        // Branch resolution happens here, with forwarded operands
        let mut branch_target = 0;
        let mut branch_taken = false;

        if ins.jump {
            match ins.kind {
                InsKind::Jal => {
                    branch_target = self.id_ex.pc.wrapping_add(ins.imm as u32);
                    branch_taken = true;
                    alu_result = self.id_ex.pc.wrapping_add(4); // return address
                }
                InsKind::Jalr => {
                    branch_target = rs1_val.wrapping_add(ins.imm as u32) & !1;
                    branch_taken = true;
                    alu_result = self.id_ex.pc.wrapping_add(4);
                }
                _ => {}
            }
        } else if ins.branch && alu::branch_taken(ins.kind, rs1_val, rs2_val) {
            branch_target = self.id_ex.pc.wrapping_add(ins.imm as u32);
            branch_taken = true;
        }

        self.ex_mem = ExMem {
            ins,
            alu_result,
            rs2_val,
            branch_target,
            branch_taken,
            valid: true,
        };

        if !hazard::detect_branch_hazard(&self.ex_mem) {
            return false;
        }

        // Redirect fetch and cancel the two wrong-path instructions:
        // the one in IF/ID and this cycle's fetch slot.
        self.pc = branch_target;
        self.next_pc = branch_target.wrapping_add(4);
        self.if_id.flush();
        self.id_ex.flush();
        self.flushes += 2;
        true
    }

    /// MEM: perform loads/stores and count the committed instruction.
    fn stage_mem(&mut self, mem: &mut Memory) {
        if !self.ex_mem.valid {
            self.mem_wb.flush();
            return;
        }

        let ins = self.ex_mem.ins;
        let mem_data = if ins.mem_read || ins.mem_write {
            memory_access(&ins, self.ex_mem.alu_result, self.ex_mem.rs2_val, mem)
        } else {
            0
        };

        self.mem_wb = MemWb {
            ins,
            alu_result: self.ex_mem.alu_result,
            mem_data,
            valid: true,
        };

        // Bubbles and unrecognized words never count as work done
        if ins.kind != InsKind::Unknown && !ins.is_nop() {
            self.instructions += 1;
        }
    }

    /// WB: commit to the register file; `ecall` halts here.
    fn stage_wb(&mut self, regs: &mut RegisterFile) {
        if !self.mem_wb.valid {
            return;
        }

        let ins = self.mem_wb.ins;

        if ins.reg_write && ins.rd != 0 {
            let value = if ins.mem_to_reg {
                self.mem_wb.mem_data
            } else {
                self.mem_wb.alu_result
            };
            regs.write(ins.rd, value);
        }

        if ins.kind == InsKind::Ecall {
            self.halted = true;
        }
    }

    fn forwarded_value(&self, fwd: Forward, reg_val: u32) -> u32 {
        match fwd {
            Forward::ExMem => self.ex_mem.alu_result,
            Forward::MemWb => {
                if self.mem_wb.ins.mem_to_reg {
                    self.mem_wb.mem_data
                } else {
                    self.mem_wb.alu_result
                }
            }
            Forward::None => reg_val,
        }
    }

    // ==================== Switches ====================

    /// Enable or disable load-use stall insertion.
    pub fn set_hazard_detection(&mut self, enabled: bool) {
        self.hazard_detection = enabled;
    }

    /// Enable or disable operand forwarding.
    pub fn set_forwarding(&mut self, enabled: bool) {
        self.forwarding = enabled;
    }

    /// Whether load-use stalling is enabled.
    #[must_use]
    pub fn hazard_detection(&self) -> bool {
        self.hazard_detection
    }

    /// Whether operand forwarding is enabled.
    #[must_use]
    pub fn forwarding(&self) -> bool {
        self.forwarding
    }

    // ==================== State access ====================

    /// Address the fetch stage reads from next.
    #[must_use]
    pub fn pc(&self) -> u32 {
        self.pc
    }

    /// Move the fetch stream to `addr`.
    pub fn set_pc(&mut self, addr: u32) {
        self.pc = addr;
        self.next_pc = addr.wrapping_add(4);
    }

    /// Clock cycles elapsed since reset (stall cycles included).
    #[must_use]
    pub fn cycle_count(&self) -> u64 {
        self.cycles
    }

    /// Instructions committed since reset (bubbles, NOPs and unknown
    /// encodings excluded).
    #[must_use]
    pub fn instruction_count(&self) -> u64 {
        self.instructions
    }

    /// Whether an `ecall` reached writeback.
    #[must_use]
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Whether the last cycle stalled on a load-use hazard.
    #[must_use]
    pub fn is_stalled(&self) -> bool {
        self.stalled
    }

    /// Stall cycles inserted since reset.
    #[must_use]
    pub fn stall_count(&self) -> u64 {
        self.stalls
    }

    /// Latches flushed by taken branches since reset.
    #[must_use]
    pub fn flush_count(&self) -> u64 {
        self.flushes
    }

    /// Operands bypassed into EX since reset.
    #[must_use]
    pub fn forward_count(&self) -> u64 {
        self.forwards
    }

    /// The IF/ID latch, for display.
    #[must_use]
    pub fn if_id(&self) -> &IfId {
        &self.if_id
    }

    /// The ID/EX latch, for display.
    #[must_use]
    pub fn id_ex(&self) -> &IdEx {
        &self.id_ex
    }

    /// The EX/MEM latch, for display.
    #[must_use]
    pub fn ex_mem(&self) -> &ExMem {
        &self.ex_mem
    }

    /// The MEM/WB latch, for display.
    #[must_use]
    pub fn mem_wb(&self) -> &MemWb {
        &self.mem_wb
    }

    // ==================== Breakpoints ====================

    /// Set a breakpoint; duplicates are ignored.
    pub fn add_breakpoint(&mut self, addr: u32) {
        if !self.has_breakpoint(addr) {
            self.breakpoints.push(addr);
        }
    }

    /// Remove a breakpoint if present.
    pub fn remove_breakpoint(&mut self, addr: u32) {
        self.breakpoints.retain(|&a| a != addr);
    }

    /// Remove all breakpoints.
    pub fn clear_breakpoints(&mut self) {
        self.breakpoints.clear();
    }

    /// Whether a breakpoint is set at `addr`.
    #[must_use]
    pub fn has_breakpoint(&self, addr: u32) -> bool {
        self.breakpoints.contains(&addr)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
