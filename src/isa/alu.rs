//! Arithmetic-logic unit and the branch predicate.
//!
//! The cast warnings below are intentionally allowed because RISC-V
//! semantics require deliberate signed/unsigned reinterpretation of 32-bit
//! values.

#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_truncation)]

use crate::isa::InsKind;

/// Operation selector for the ALU.
#[allow(missing_docs)] // Variants mirror the RISC-V operation names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AluOp {
    Add,
    Sub,
    Sll,
    Srl,
    Sra,
    Slt,
    Sltu,
    Xor,
    Or,
    And,
    Mul,
    Mulh,
    Mulhsu,
    Mulhu,
    Div,
    Divu,
    Rem,
    Remu,
    /// Pass operand B through unchanged (used for LUI).
    PassB,
    /// No operation selected; the result is 0.
    None,
}

/// Execute one ALU operation.
///
/// A pure function of `(op, a, b)`. All arithmetic wraps modulo 2^32;
/// shifts use the low 5 bits of `b`. Division never traps: division by
/// zero and signed overflow produce the RISC-V-specified results.
#[must_use]
pub fn execute(op: AluOp, a: u32, b: u32) -> u32 {
    let sa = a as i32;
    let sb = b as i32;

    match op {
        AluOp::Add => a.wrapping_add(b),
        AluOp::Sub => a.wrapping_sub(b),

        // Shifts use the lower 5 bits of b
        AluOp::Sll => a << (b & 0x1F),
        AluOp::Srl => a >> (b & 0x1F),
        AluOp::Sra => (sa >> (b & 0x1F)) as u32,

        AluOp::Slt => u32::from(sa < sb),
        AluOp::Sltu => u32::from(a < b),

        AluOp::Xor => a ^ b,
        AluOp::Or => a | b,
        AluOp::And => a & b,

        // Widen both operands to 64 bits with the appropriate signedness,
        // then take the low or high half of the product.
        AluOp::Mul => a.wrapping_mul(b),
        AluOp::Mulh => ((i64::from(sa) * i64::from(sb)) >> 32) as u32,
        AluOp::Mulhsu => ((i64::from(sa) * i64::from(b)) >> 32) as u32,
        AluOp::Mulhu => ((u64::from(a) * u64::from(b)) >> 32) as u32,

        // Per RISC-V spec:
        // - Division by zero: quotient = all 1s, remainder = dividend
        // - Overflow (MIN / -1): quotient = MIN, remainder = 0
        AluOp::Div => {
            if sb == 0 {
                u32::MAX
            } else if sa == i32::MIN && sb == -1 {
                sa as u32
            } else {
                (sa / sb) as u32
            }
        }
        AluOp::Divu => {
            if b == 0 {
                u32::MAX
            } else {
                a / b
            }
        }
        AluOp::Rem => {
            if sb == 0 {
                sa as u32
            } else if sa == i32::MIN && sb == -1 {
                0
            } else {
                (sa % sb) as u32
            }
        }
        AluOp::Remu => {
            if b == 0 {
                a
            } else {
                a % b
            }
        }

        AluOp::PassB => b,
        AluOp::None => 0,
    }
}

/// Evaluate a branch condition with the correct signedness.
///
/// Returns `false` for non-branch kinds.
#[must_use]
pub fn branch_taken(kind: InsKind, rs1_val: u32, rs2_val: u32) -> bool {
    let s1 = rs1_val as i32;
    let s2 = rs2_val as i32;

    match kind {
        InsKind::Beq => rs1_val == rs2_val,
        InsKind::Bne => rs1_val != rs2_val,
        InsKind::Blt => s1 < s2,
        InsKind::Bge => s1 >= s2,
        InsKind::Bltu => rs1_val < rs2_val,
        InsKind::Bgeu => rs1_val >= rs2_val,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_sub_wrap() {
        assert_eq!(execute(AluOp::Add, 0xFFFF_FFFF, 1), 0);
        assert_eq!(execute(AluOp::Sub, 0, 1), 0xFFFF_FFFF);
    }

    #[test]
    fn test_shifts_use_low_five_bits() {
        assert_eq!(execute(AluOp::Sll, 1, 31), 0x8000_0000);
        assert_eq!(execute(AluOp::Sll, 1, 32), 1); // shamt wraps to 0
        assert_eq!(execute(AluOp::Srl, 0x8000_0000, 31), 1);
        assert_eq!(execute(AluOp::Sra, 0x8000_0000, 31), 0xFFFF_FFFF);
        assert_eq!(execute(AluOp::Sra, 0x4000_0000, 30), 1);
    }

    #[test]
    fn test_comparisons() {
        // -1 < 1 signed, but not unsigned
        assert_eq!(execute(AluOp::Slt, 0xFFFF_FFFF, 1), 1);
        assert_eq!(execute(AluOp::Sltu, 0xFFFF_FFFF, 1), 0);
        assert_eq!(execute(AluOp::Slt, 1, 1), 0);
    }

    #[test]
    fn test_mul_low_bits() {
        assert_eq!(execute(AluOp::Mul, 7, 6), 42);
        // Lower 32 bits of 0x100000000
        assert_eq!(execute(AluOp::Mul, 0x8000_0000, 2), 0);
    }

    #[test]
    fn test_mulh_signed() {
        // -1 * -1 = 1, upper bits = 0
        assert_eq!(execute(AluOp::Mulh, u32::MAX, u32::MAX), 0);
        // MIN * MIN = 2^62, upper 32 bits = 0x40000000
        assert_eq!(execute(AluOp::Mulh, 0x8000_0000, 0x8000_0000), 0x4000_0000);
    }

    #[test]
    fn test_mulhu() {
        // 0xFFFFFFFF * 0xFFFFFFFF = 0xFFFFFFFE00000001
        assert_eq!(execute(AluOp::Mulhu, u32::MAX, u32::MAX), 0xFFFF_FFFE);
    }

    #[test]
    fn test_mulhsu() {
        // -1 (signed) * 0xFFFFFFFF (unsigned) = -0xFFFFFFFF
        assert_eq!(execute(AluOp::Mulhsu, u32::MAX, u32::MAX), 0xFFFF_FFFF);
        assert_eq!(execute(AluOp::Mulhsu, 2, 0x8000_0000), 1);
    }

    #[test]
    fn test_div() {
        assert_eq!(execute(AluOp::Div, 42, 7), 6);
        assert_eq!(execute(AluOp::Div, (-42i32) as u32, 7) as i32, -6);
    }

    #[test]
    fn test_div_by_zero() {
        assert_eq!(execute(AluOp::Div, 42, 0), u32::MAX);
        assert_eq!(execute(AluOp::Divu, 42, 0), u32::MAX);
        assert_eq!(execute(AluOp::Rem, 42, 0), 42);
        assert_eq!(execute(AluOp::Remu, 42, 0), 42);
    }

    #[test]
    fn test_div_overflow() {
        let min = 0x8000_0000u32; // i32::MIN
        let neg1 = u32::MAX;
        assert_eq!(execute(AluOp::Div, min, neg1), min);
        assert_eq!(execute(AluOp::Rem, min, neg1), 0);
    }

    #[test]
    fn test_rem() {
        assert_eq!(execute(AluOp::Rem, 43, 7), 1);
        assert_eq!(execute(AluOp::Rem, (-43i32) as u32, 7) as i32, -1);
        assert_eq!(execute(AluOp::Remu, 43, 7), 1);
    }

    #[test]
    fn test_pass_b() {
        assert_eq!(execute(AluOp::PassB, 99, 0x1234_5000), 0x1234_5000);
    }

    #[test]
    fn test_branch_predicates() {
        assert!(branch_taken(InsKind::Beq, 5, 5));
        assert!(!branch_taken(InsKind::Beq, 5, 6));
        assert!(branch_taken(InsKind::Bne, 5, 6));

        // -1 vs 1: signed less, unsigned greater
        assert!(branch_taken(InsKind::Blt, u32::MAX, 1));
        assert!(!branch_taken(InsKind::Bltu, u32::MAX, 1));
        assert!(branch_taken(InsKind::Bgeu, u32::MAX, 1));
        assert!(branch_taken(InsKind::Bge, 1, u32::MAX));

        // Non-branch kinds never take
        assert!(!branch_taken(InsKind::Add, 1, 1));
    }
}
