//! End-to-end assembler tests: whole programs through both passes, with
//! the decoder closing the round trip.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)] // Test code can use unwrap
#![allow(clippy::unreadable_literal)] // Instruction encodings are standard hex
#![allow(clippy::cast_sign_loss)]

use rv32sim::isa::{decode, InsKind};
use rv32sim::mem::{DATA_BASE, TEXT_BASE};
use rv32sim::{Assembler, Program};

fn assemble(src: &str) -> Program {
    Assembler::new().assemble(src)
}

/// Decode every emitted word at its load address.
fn decode_all(p: &Program) -> Vec<rv32sim::isa::Instruction> {
    p.text
        .iter()
        .enumerate()
        .map(|(i, &w)| decode(w, p.text_base + 4 * i as u32))
        .collect()
}

#[test]
fn test_round_trip_full_instruction_mix() {
    let src = "\
start:
    addi t0, zero, 100
    slti t1, t0, 200
    sltiu t2, t0, 0x80
    xori s1, t0, -1
    ori a0, t0, 0b1010
    andi a1, t0, 15
    slli a2, t0, 3
    srli a3, t0, 1
    srai a4, t0, 2
    add s2, t0, t1
    sub s3, t0, t1
    sll s4, t0, t1
    slt s5, t0, t1
    sltu s6, t0, t1
    xor s7, t0, t1
    srl s8, t0, t1
    sra s9, t0, t1
    or s10, t0, t1
    and s11, t0, t1
    mul t3, t0, t1
    mulh t4, t0, t1
    mulhsu t5, t0, t1
    mulhu t6, t0, t1
    div a5, t0, t1
    divu a6, t0, t1
    rem a7, t0, t1
    remu s0, t0, t1
    lb ra, -4(sp)
    lh gp, 2(sp)
    lw tp, 0(sp)
    lbu t0, 1(sp)
    lhu t1, 6(sp)
    sb t0, -1(sp)
    sh t1, 2(sp)
    sw t2, 8(sp)
    beq t0, t1, start
    bne t0, t1, start
    blt t0, t1, start
    bge t0, t1, start
    bltu t0, t1, start
    bgeu t0, t1, start
    lui s0, 0xFEDCB
    auipc s1, 0x1
    jal ra, start
    jalr ra, t0, 4
    ecall
    ebreak
";
    let p = assemble(src);
    assert!(p.success(), "errors: {:?}", p.errors);

    let expected = [
        InsKind::Addi,
        InsKind::Slti,
        InsKind::Sltiu,
        InsKind::Xori,
        InsKind::Ori,
        InsKind::Andi,
        InsKind::Slli,
        InsKind::Srli,
        InsKind::Srai,
        InsKind::Add,
        InsKind::Sub,
        InsKind::Sll,
        InsKind::Slt,
        InsKind::Sltu,
        InsKind::Xor,
        InsKind::Srl,
        InsKind::Sra,
        InsKind::Or,
        InsKind::And,
        InsKind::Mul,
        InsKind::Mulh,
        InsKind::Mulhsu,
        InsKind::Mulhu,
        InsKind::Div,
        InsKind::Divu,
        InsKind::Rem,
        InsKind::Remu,
        InsKind::Lb,
        InsKind::Lh,
        InsKind::Lw,
        InsKind::Lbu,
        InsKind::Lhu,
        InsKind::Sb,
        InsKind::Sh,
        InsKind::Sw,
        InsKind::Beq,
        InsKind::Bne,
        InsKind::Blt,
        InsKind::Bge,
        InsKind::Bltu,
        InsKind::Bgeu,
        InsKind::Lui,
        InsKind::Auipc,
        InsKind::Jal,
        InsKind::Jalr,
        InsKind::Ecall,
        InsKind::Ebreak,
    ];
    let decoded = decode_all(&p);
    assert_eq!(decoded.len(), expected.len());
    for (ins, want) in decoded.iter().zip(expected) {
        assert_eq!(ins.kind, want, "at {:#x}", ins.pc);
    }

    // Spot-check operands survived the round trip
    assert_eq!(decoded[0].imm, 100);
    assert_eq!(decoded[3].imm, -1);
    assert_eq!((decoded[27].rd, decoded[27].rs1, decoded[27].imm), (1, 2, -4));
    assert_eq!(decoded[34].imm, 8); // sw offset
    assert_eq!(decoded[41].imm, 0xFEDCB000u32 as i32);
}

#[test]
fn test_branch_offsets_are_pc_relative() {
    let src = "\
a: nop
b: nop
    beq x0, x0, a
    beq x0, x0, d
c: nop
d: nop
";
    let p = assemble(src);
    assert!(p.success());
    let ins = decode(p.text[2], 8);
    assert_eq!(ins.imm, -8); // 8 -> 0
    let ins = decode(p.text[3], 12);
    assert_eq!(ins.imm, 8); // 12 -> 20
}

#[test]
fn test_data_labels_resolve_to_data_base() {
    let src = "\
.data
first: .word 1
second: .word 2, 3
third: .byte 4
.text
nop
";
    let p = assemble(src);
    assert!(p.success());
    assert_eq!(p.symbols["first"], DATA_BASE);
    assert_eq!(p.symbols["second"], DATA_BASE + 4);
    assert_eq!(p.symbols["third"], DATA_BASE + 12);
    assert_eq!(p.data.len(), 13);
}

#[test]
fn test_section_switching_mid_file() {
    let src = "\
.text
nop
.data
x: .word 9
.text
again: nop
.data
y: .half 1
";
    let p = assemble(src);
    assert!(p.success());
    assert_eq!(p.symbols["again"], TEXT_BASE + 4);
    assert_eq!(p.symbols["x"], DATA_BASE);
    assert_eq!(p.symbols["y"], DATA_BASE + 4);
    assert_eq!(p.text.len(), 2);
}

#[test]
fn test_pass_sizes_agree_with_forward_references() {
    // A forward label used before its definition, past a multi-word li:
    // the branch offset is only right if pass 1 reserved exactly what
    // pass 2 emitted for the li.
    let src = "\
    li x1, 0x12345678
    beq x0, x0, end
    li x2, 0x1000
end: ecall
";
    let p = assemble(src);
    assert!(p.success(), "errors: {:?}", p.errors);
    // Layout: li -> 0,4 ; beq -> 8 ; li (lui only) -> 12 ; end -> 16
    assert_eq!(p.symbols["end"], 16);
    let beq = decode(p.text[2], 8);
    assert_eq!(beq.imm, 8);
    // 0x1000 has a zero low part: single lui
    let lui = decode(p.text[3], 12);
    assert_eq!(lui.kind, InsKind::Lui);
    assert_eq!(lui.imm, 0x1000);
    assert_eq!(decode(p.text[4], 16).kind, InsKind::Ecall);
}

#[test]
fn test_la_against_text_label() {
    let src = "\
    la x1, here
    nop
here: ecall
";
    let p = assemble(src);
    assert!(p.success());
    // auipc at 0, target at 12: upper 0, lower 12
    let auipc = decode(p.text[0], 0);
    let addi = decode(p.text[1], 4);
    assert_eq!(auipc.kind, InsKind::Auipc);
    assert_eq!(auipc.imm, 0);
    assert_eq!(addi.imm, 12);
}

#[test]
fn test_globl_accepted_and_ignored() {
    let p = assemble(".globl main\n.global helper\nmain: nop\n");
    assert!(p.success());
    assert_eq!(p.text.len(), 1);
}

#[test]
fn test_string_directive_variants() {
    let src = ".data\na: .asciz \"Hi\"\nb: .string \"x\\0y\"\n";
    let p = assemble(src);
    assert!(p.success());
    assert_eq!(p.data, vec![b'H', b'i', 0, b'x', 0, b'y', 0]);
    assert_eq!(p.symbols["b"], DATA_BASE + 3);
}

#[test]
fn test_li_boundary_values() {
    // 2047 and -2048 are single addi; 2048 and -2049 need lui
    let p = assemble("li x1, 2047\nli x2, -2048\nli x3, 2048\nli x4, -2049\n");
    assert!(p.success());
    assert_eq!(p.text.len(), 2 + 4);

    let a = decode(p.text[0], 0);
    assert_eq!((a.kind, a.imm), (InsKind::Addi, 2047));
    let b = decode(p.text[1], 4);
    assert_eq!((b.kind, b.imm), (InsKind::Addi, -2048));

    // li x3, 2048 -> lui x3, 1 ; addi x3, x3, -2048
    let lui = decode(p.text[2], 8);
    let addi = decode(p.text[3], 12);
    assert_eq!((lui.kind, lui.imm), (InsKind::Lui, 0x1000));
    assert_eq!((addi.kind, addi.imm), (InsKind::Addi, -2048));
    assert_eq!(
        (lui.imm as u32).wrapping_add(addi.imm as u32),
        2048,
        "li 2048 reassembles"
    );

    // li x4, -2049 -> lui 0xFFFFF ; addi -1... verify by reassembly
    let lui = decode(p.text[4], 16);
    let addi = decode(p.text[5], 20);
    assert_eq!(
        (lui.imm as u32).wrapping_add(addi.imm as u32),
        (-2049i32) as u32
    );
}

#[test]
fn test_all_errors_reported_with_lines() {
    let src = "\
nop
first_bad x1, x2
li x1, notanumber
sw x1, nowhere
addi x1, x99, 0
beq x1, x2, missing
";
    let p = assemble(src);
    assert!(!p.success());
    let lines: Vec<usize> = p.errors.iter().map(|e| e.line).collect();
    assert_eq!(lines, vec![2, 3, 4, 5, 6]);
    let rendered = p.errors[0].to_string();
    assert!(rendered.starts_with("line 2:"));
}

#[test]
fn test_failed_assembly_is_not_loadable() {
    let mut em = rv32sim::Emulator::new();
    assert!(em.load_source("bogus instruction\n").is_err());
    assert!(em.program().is_none());
}

#[test]
fn test_source_map_tracks_pseudo_expansion() {
    let src = "start: li a0, 0x12345678\n    mv a1, a0\n";
    let p = assemble(src);
    assert!(p.success());
    assert_eq!(p.source_map.len(), 3);
    assert!(p.source_map[&0].contains("li a0"));
    assert!(p.source_map[&4].contains("li a0"));
    assert!(p.source_map[&8].contains("mv a1"));
}
