//! The two-pass assembly driver.
//!
//! Pass 1 walks the source tracking only section cursors and label
//! addresses; pass 2 walks it again emitting words and bytes and
//! resolving labels. Every construct must advance the text cursor in
//! pass 1 by exactly the number of bytes pass 2 emits for it, otherwise
//! PC-relative resolution skews — this is why `li` parses its immediate
//! in both passes: the one-versus-two-word decision is made from the
//! value, identically each time.

use std::fs;
use std::path::Path;

use crate::asm::encode::{self, enc_b, enc_i, enc_j, enc_r, enc_s, enc_u, split_hi_lo};
use crate::asm::parse::{parse_imm, parse_mem, parse_reg};
use crate::asm::{AsmError, Program};
use crate::mem::{DATA_BASE, TEXT_BASE};

const NOP: u32 = 0x0000_0013;

/// The two-pass assembler. One instance can be reused across sources;
/// every [`Assembler::assemble`] call starts from a clean slate.
#[derive(Debug, Default)]
pub struct Assembler {
    out: Program,
    text_addr: u32,
    data_addr: u32,
    in_data: bool,
    line_num: usize,
}

impl Assembler {
    /// Create an assembler.
    #[must_use]
    pub fn new() -> Self {
        Assembler::default()
    }

    /// Assemble a source string.
    pub fn assemble(&mut self, source: &str) -> Program {
        self.out = Program::default();

        for first_pass in [true, false] {
            self.text_addr = TEXT_BASE;
            self.data_addr = DATA_BASE;
            self.in_data = false;
            self.line_num = 0;
            if !first_pass {
                // Report each problem once: pass 2 revisits everything
                self.out.errors.clear();
            }
            for line in source.lines() {
                self.line_num += 1;
                self.process_line(line, first_pass);
            }
        }

        std::mem::take(&mut self.out)
    }

    /// Assemble a source file.
    ///
    /// A missing or unreadable file yields a single line-0 diagnostic.
    pub fn assemble_path(&mut self, path: &Path) -> Program {
        match fs::read_to_string(path) {
            Ok(source) => self.assemble(&source),
            Err(err) => Program {
                errors: vec![AsmError::new(
                    0,
                    format!("cannot open {}: {err}", path.display()),
                )],
                ..Program::default()
            },
        }
    }

    // ==================== Line handling ====================

    fn process_line(&mut self, orig: &str, first_pass: bool) {
        // Comments run from '#' to end of line
        let line = match orig.find('#') {
            Some(i) => &orig[..i],
            None => orig,
        };
        let mut line = line.trim();
        if line.is_empty() {
            return;
        }

        // A leading "label:" defines a symbol at the current cursor
        if let Some(colon) = line.find(':') {
            if first_pass {
                let label = line[..colon].trim().to_string();
                let addr = if self.in_data {
                    self.data_addr
                } else {
                    self.text_addr
                };
                self.out.symbols.insert(label, addr);
            }
            line = line[colon + 1..].trim();
            if line.is_empty() {
                return;
            }
        }

        if line.starts_with('.') {
            self.directive(line, first_pass);
            return;
        }

        // Instructions only exist in the text section
        if self.in_data {
            return;
        }

        let (mnem, rest) = match line.find(char::is_whitespace) {
            Some(i) => (&line[..i], line[i..].trim()),
            None => (line, ""),
        };
        let mnem = mnem.to_ascii_lowercase();
        let ops: Vec<&str> = rest
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();

        if !self.pseudo(&mnem, &ops, orig, first_pass) {
            self.instruction(&mnem, &ops, orig, first_pass);
        }
    }

    // ==================== Directives ====================

    fn directive(&mut self, line: &str, first_pass: bool) {
        let mut parts = line.split(|c: char| c.is_whitespace() || c == ',').filter(|s| !s.is_empty());
        let Some(dir) = parts.next() else { return };
        let dir = dir.to_ascii_lowercase();
        let args: Vec<&str> = parts.collect();

        match dir.as_str() {
            ".text" => self.in_data = false,
            ".data" => self.in_data = true,
            ".globl" | ".global" => {}

            ".word" => self.data_values(&args, 4, first_pass),
            ".half" => self.data_values(&args, 2, first_pass),
            ".byte" => self.data_values(&args, 1, first_pass),

            ".asciz" | ".string" => self.string_data(line, first_pass),

            ".space" => {
                if let Some(n) = args.first().and_then(|s| parse_imm(s)) {
                    if self.in_data && n > 0 {
                        if !first_pass {
                            self.out.data.extend(std::iter::repeat(0u8).take(n as usize));
                        }
                        self.data_addr = self.data_addr.wrapping_add(n as u32);
                    }
                }
            }

            ".align" => {
                if let Some(p) = args.first().and_then(|s| parse_imm(s)) {
                    if (0..=31).contains(&p) {
                        self.align_to(1u32 << p, first_pass);
                    }
                }
            }

            // Unrecognized directives are accepted and ignored
            _ => {}
        }
    }

    /// Emit `.word`/`.half`/`.byte` values, little-endian.
    fn data_values(&mut self, args: &[&str], width: u32, first_pass: bool) {
        for arg in args {
            if let Some(value) = parse_imm(arg) {
                if self.in_data {
                    if !first_pass {
                        let bytes = value.to_le_bytes();
                        self.out.data.extend_from_slice(&bytes[..width as usize]);
                    }
                    self.data_addr = self.data_addr.wrapping_add(width);
                }
            }
        }
    }

    /// Emit a `.asciz`/`.string` literal plus its null terminator.
    fn string_data(&mut self, line: &str, first_pass: bool) {
        let Some(q1) = line.find('"') else { return };
        let Some(q2) = line.rfind('"') else { return };
        if q2 <= q1 {
            return;
        }

        let body = line[q1 + 1..q2].as_bytes();
        let mut bytes = Vec::with_capacity(body.len() + 1);
        let mut i = 0;
        while i < body.len() {
            let mut c = body[i];
            if c == b'\\' && i + 1 < body.len() {
                i += 1;
                c = match body[i] {
                    b'n' => b'\n',
                    b't' => b'\t',
                    b'r' => b'\r',
                    b'0' => b'\0',
                    other => other, // covers \\ and \" and passes the rest through
                };
            }
            bytes.push(c);
            i += 1;
        }
        bytes.push(0);

        if self.in_data {
            #[allow(clippy::cast_possible_truncation)]
            {
                self.data_addr = self.data_addr.wrapping_add(bytes.len() as u32);
            }
            if !first_pass {
                self.out.data.extend_from_slice(&bytes);
            }
        }
    }

    /// Advance the active section cursor to a multiple of `align`;
    /// text-section padding is canonical NOPs.
    fn align_to(&mut self, align: u32, first_pass: bool) {
        if self.in_data {
            while self.data_addr % align != 0 {
                if !first_pass {
                    self.out.data.push(0);
                }
                self.data_addr += 1;
            }
        } else {
            while self.text_addr % align != 0 {
                if first_pass {
                    self.text_addr += 4;
                } else {
                    self.emit(NOP, "");
                }
            }
        }
    }

    // ==================== Emission helpers ====================

    fn emit(&mut self, word: u32, src: &str) {
        self.out.source_map.insert(self.text_addr, src.trim().to_string());
        self.out.text.push(word);
        self.text_addr += 4;
    }

    fn reserve(&mut self, bytes: u32) {
        self.text_addr += bytes;
    }

    fn error(&mut self, message: impl Into<String>) {
        self.out.errors.push(AsmError::new(self.line_num, message));
    }

    /// Parse a register operand, diagnosing failures.
    fn reg(&mut self, s: &str) -> Option<u8> {
        let r = parse_reg(s);
        if r.is_none() {
            self.error(format!("invalid register: {s}"));
        }
        r
    }

    /// Parse an immediate operand, diagnosing failures.
    fn imm(&mut self, s: &str) -> Option<i32> {
        let v = parse_imm(s);
        if v.is_none() {
            self.error(format!("invalid immediate: {s}"));
        }
        v
    }

    /// Parse an `offset(reg)` operand, diagnosing failures.
    fn mem_operand(&mut self, s: &str) -> Option<(i32, u8)> {
        let m = parse_mem(s);
        if m.is_none() {
            self.error(format!("malformed memory operand: {s}"));
        }
        m
    }

    /// Resolve a label to its address, diagnosing failures.
    fn label_addr(&mut self, name: &str) -> Option<u32> {
        if let Some(&addr) = self.out.symbols.get(name) {
            Some(addr)
        } else {
            self.error(format!("unknown label: {name}"));
            None
        }
    }

    /// Resolve a branch/jump target: a numeric offset, or a label made
    /// PC-relative to the instruction being emitted.
    #[allow(clippy::cast_possible_wrap)]
    fn target_offset(&mut self, s: &str) -> Option<i32> {
        if let Some(v) = parse_imm(s) {
            return Some(v);
        }
        self.label_addr(s)
            .map(|addr| addr.wrapping_sub(self.text_addr) as i32)
    }

    fn malformed(&mut self, mnem: &str) {
        self.error(format!("malformed operands for '{mnem}'"));
    }

    // ==================== Pseudo-instructions ====================

    /// Lower a pseudo-instruction. Returns false when `mnem` is not a
    /// pseudo-instruction (wrong arity falls through to the real-
    /// instruction handler, which diagnoses it).
    #[allow(clippy::too_many_lines)]
    fn pseudo(&mut self, mnem: &str, ops: &[&str], src: &str, first_pass: bool) -> bool {
        match (mnem, ops.len()) {
            ("nop", 0) => {
                if first_pass {
                    self.reserve(4);
                } else {
                    self.emit(NOP, src);
                }
            }

            // mv rd, rs -> addi rd, rs, 0
            ("mv", 2) => {
                if first_pass {
                    self.reserve(4);
                } else if let (Some(rd), Some(rs)) = (self.reg(ops[0]), self.reg(ops[1])) {
                    self.emit(enc_i(encode::OP_IMM, rd, 0b000, rs, 0), src);
                }
            }

            // not rd, rs -> xori rd, rs, -1
            ("not", 2) => {
                if first_pass {
                    self.reserve(4);
                } else if let (Some(rd), Some(rs)) = (self.reg(ops[0]), self.reg(ops[1])) {
                    self.emit(enc_i(encode::OP_IMM, rd, 0b100, rs, -1), src);
                }
            }

            // neg rd, rs -> sub rd, x0, rs
            ("neg", 2) => {
                if first_pass {
                    self.reserve(4);
                } else if let (Some(rd), Some(rs)) = (self.reg(ops[0]), self.reg(ops[1])) {
                    self.emit(enc_r(encode::OP, rd, 0b000, 0, rs, 0b010_0000), src);
                }
            }

            // seqz rd, rs -> sltiu rd, rs, 1
            ("seqz", 2) => {
                if first_pass {
                    self.reserve(4);
                } else if let (Some(rd), Some(rs)) = (self.reg(ops[0]), self.reg(ops[1])) {
                    self.emit(enc_i(encode::OP_IMM, rd, 0b011, rs, 1), src);
                }
            }

            // snez rd, rs -> sltu rd, x0, rs
            ("snez", 2) => {
                if first_pass {
                    self.reserve(4);
                } else if let (Some(rd), Some(rs)) = (self.reg(ops[0]), self.reg(ops[1])) {
                    self.emit(enc_r(encode::OP, rd, 0b011, 0, rs, 0), src);
                }
            }

            // sltz rd, rs -> slt rd, rs, x0
            ("sltz", 2) => {
                if first_pass {
                    self.reserve(4);
                } else if let (Some(rd), Some(rs)) = (self.reg(ops[0]), self.reg(ops[1])) {
                    self.emit(enc_r(encode::OP, rd, 0b010, rs, 0, 0), src);
                }
            }

            // sgtz rd, rs -> slt rd, x0, rs
            ("sgtz", 2) => {
                if first_pass {
                    self.reserve(4);
                } else if let (Some(rd), Some(rs)) = (self.reg(ops[0]), self.reg(ops[1])) {
                    self.emit(enc_r(encode::OP, rd, 0b010, 0, rs, 0), src);
                }
            }

            ("li", 2) => self.lower_li(ops, src, first_pass),
            ("la", 2) => self.lower_la(ops, src, first_pass),

            // j target -> jal x0, target
            ("j", 1) => {
                if first_pass {
                    self.reserve(4);
                } else if let Some(off) = self.target_offset(ops[0]) {
                    self.emit(enc_j(encode::JAL, 0, off), src);
                }
            }

            // jr rs -> jalr x0, rs, 0
            ("jr", 1) => {
                if first_pass {
                    self.reserve(4);
                } else if let Some(rs) = self.reg(ops[0]) {
                    self.emit(enc_i(encode::JALR, 0, 0, rs, 0), src);
                }
            }

            // ret -> jalr x0, ra, 0
            ("ret", 0) => {
                if first_pass {
                    self.reserve(4);
                } else {
                    self.emit(enc_i(encode::JALR, 0, 0, 1, 0), src);
                }
            }

            // call label -> jal ra, label
            ("call", 1) => {
                if first_pass {
                    self.reserve(4);
                } else if let Some(addr) = self.label_addr(ops[0]) {
                    #[allow(clippy::cast_possible_wrap)]
                    let off = addr.wrapping_sub(self.text_addr) as i32;
                    self.emit(enc_j(encode::JAL, 1, off), src);
                }
            }

            // tail label -> jal x0, label
            ("tail", 1) => {
                if first_pass {
                    self.reserve(4);
                } else if let Some(addr) = self.label_addr(ops[0]) {
                    #[allow(clippy::cast_possible_wrap)]
                    let off = addr.wrapping_sub(self.text_addr) as i32;
                    self.emit(enc_j(encode::JAL, 0, off), src);
                }
            }

            // One-register branch pseudos against x0
            ("beqz", 2) => self.branch_zero(0b000, ops, src, first_pass, false),
            ("bnez", 2) => self.branch_zero(0b001, ops, src, first_pass, false),
            ("bgez", 2) => self.branch_zero(0b101, ops, src, first_pass, false),
            ("bltz", 2) => self.branch_zero(0b100, ops, src, first_pass, false),
            // blez/bgtz put the register on the rs2 side
            ("blez", 2) => self.branch_zero(0b101, ops, src, first_pass, true),
            ("bgtz", 2) => self.branch_zero(0b100, ops, src, first_pass, true),

            // Two-register comparisons lowered by swapping operands
            ("bgt", 3) => self.branch_swapped(0b100, ops, src, first_pass),
            ("ble", 3) => self.branch_swapped(0b101, ops, src, first_pass),
            ("bgtu", 3) => self.branch_swapped(0b110, ops, src, first_pass),
            ("bleu", 3) => self.branch_swapped(0b111, ops, src, first_pass),

            _ => return false,
        }
        true
    }

    /// `li rd, imm`: one `addi` when the value fits 12 signed bits,
    /// otherwise `lui` (+ `addi` unless the low part is zero).
    fn lower_li(&mut self, ops: &[&str], src: &str, first_pass: bool) {
        if first_pass {
            // The size decision is by value, so pass 1 parses too
            match parse_imm(ops[1]) {
                Some(imm) if !(-2048..2048).contains(&imm) => {
                    let (_, lower) = split_hi_lo(imm);
                    self.reserve(if lower == 0 { 4 } else { 8 });
                }
                _ => self.reserve(4),
            }
            return;
        }

        if let (Some(rd), Some(imm)) = (self.reg(ops[0]), self.imm(ops[1])) {
            if (-2048..2048).contains(&imm) {
                self.emit(enc_i(encode::OP_IMM, rd, 0b000, 0, imm), src);
            } else {
                let (upper, lower) = split_hi_lo(imm);
                #[allow(clippy::cast_possible_wrap)]
                self.emit(enc_u(encode::LUI, rd, (upper << 12) as i32), src);
                if lower != 0 {
                    self.emit(enc_i(encode::OP_IMM, rd, 0b000, rd, lower), src);
                }
            }
        }
    }

    /// `la rd, label`: always `auipc` + `addi`, eight bytes, anchored at
    /// the text address of the `auipc`.
    fn lower_la(&mut self, ops: &[&str], src: &str, first_pass: bool) {
        if first_pass {
            self.reserve(8);
            return;
        }

        if let Some(rd) = self.reg(ops[0]) {
            if let Some(addr) = self.label_addr(ops[1]) {
                #[allow(clippy::cast_possible_wrap)]
                let off = addr.wrapping_sub(self.text_addr) as i32;
                let (upper, lower) = split_hi_lo(off);
                #[allow(clippy::cast_possible_wrap)]
                self.emit(enc_u(encode::AUIPC, rd, (upper << 12) as i32), src);
                self.emit(enc_i(encode::OP_IMM, rd, 0b000, rd, lower), src);
            }
        }
    }

    /// One-register branch against x0. `reg_on_rs2` selects the
    /// `blez`/`bgtz` shape where the register occupies the rs2 slot.
    fn branch_zero(&mut self, funct3: u32, ops: &[&str], src: &str, first_pass: bool, reg_on_rs2: bool) {
        if first_pass {
            self.reserve(4);
            return;
        }

        if let Some(rs) = self.reg(ops[0]) {
            if let Some(off) = self.target_offset(ops[1]) {
                let (rs1, rs2) = if reg_on_rs2 { (0, rs) } else { (rs, 0) };
                self.emit(enc_b(encode::BRANCH, funct3, rs1, rs2, off), src);
            }
        }
    }

    /// Two-register branch pseudo lowered by swapping rs and rt.
    fn branch_swapped(&mut self, funct3: u32, ops: &[&str], src: &str, first_pass: bool) {
        if first_pass {
            self.reserve(4);
            return;
        }

        if let (Some(rs), Some(rt)) = (self.reg(ops[0]), self.reg(ops[1])) {
            if let Some(off) = self.target_offset(ops[2]) {
                self.emit(enc_b(encode::BRANCH, funct3, rt, rs, off), src);
            }
        }
    }

    // ==================== Real instructions ====================

    #[allow(clippy::too_many_lines)]
    fn instruction(&mut self, mnem: &str, ops: &[&str], src: &str, first_pass: bool) {
        // R-type, M extension included
        if let Some((funct3, funct7)) = r_op(mnem) {
            if ops.len() != 3 {
                self.malformed(mnem);
                return;
            }
            if first_pass {
                self.reserve(4);
            } else if let (Some(rd), Some(rs1), Some(rs2)) =
                (self.reg(ops[0]), self.reg(ops[1]), self.reg(ops[2]))
            {
                self.emit(enc_r(encode::OP, rd, funct3, rs1, rs2, funct7), src);
            }
            return;
        }

        // I-type arithmetic
        if let Some(funct3) = i_arith_op(mnem) {
            if ops.len() != 3 {
                self.malformed(mnem);
                return;
            }
            if first_pass {
                self.reserve(4);
            } else if let (Some(rd), Some(rs1), Some(imm)) =
                (self.reg(ops[0]), self.reg(ops[1]), self.imm(ops[2]))
            {
                self.emit(enc_i(encode::OP_IMM, rd, funct3, rs1, imm), src);
            }
            return;
        }

        // Shift immediates: shamt lives in the rs2 field
        if let Some((funct3, funct7)) = shift_op(mnem) {
            if ops.len() != 3 {
                self.malformed(mnem);
                return;
            }
            if first_pass {
                self.reserve(4);
            } else if let (Some(rd), Some(rs1), Some(shamt)) =
                (self.reg(ops[0]), self.reg(ops[1]), self.imm(ops[2]))
            {
                #[allow(clippy::cast_sign_loss)]
                let word = (funct7 << 25)
                    | (((shamt as u32) & 0x1F) << 20)
                    | (u32::from(rs1) << 15)
                    | (funct3 << 12)
                    | (u32::from(rd) << 7)
                    | encode::OP_IMM;
                self.emit(word, src);
            }
            return;
        }

        // Loads: rd, offset(rs1)
        if let Some(funct3) = load_op(mnem) {
            if ops.len() != 2 {
                self.malformed(mnem);
                return;
            }
            if first_pass {
                self.reserve(4);
            } else if let Some(rd) = self.reg(ops[0]) {
                if let Some((off, rs1)) = self.mem_operand(ops[1]) {
                    self.emit(enc_i(encode::LOAD, rd, funct3, rs1, off), src);
                }
            }
            return;
        }

        // Stores: rs2, offset(rs1)
        if let Some(funct3) = store_op(mnem) {
            if ops.len() != 2 {
                self.malformed(mnem);
                return;
            }
            if first_pass {
                self.reserve(4);
            } else if let Some(rs2) = self.reg(ops[0]) {
                if let Some((off, rs1)) = self.mem_operand(ops[1]) {
                    self.emit(enc_s(encode::STORE, funct3, rs1, rs2, off), src);
                }
            }
            return;
        }

        // Branches: rs1, rs2, target
        if let Some(funct3) = branch_op(mnem) {
            if ops.len() != 3 {
                self.malformed(mnem);
                return;
            }
            if first_pass {
                self.reserve(4);
            } else if let (Some(rs1), Some(rs2)) = (self.reg(ops[0]), self.reg(ops[1])) {
                if let Some(off) = self.target_offset(ops[2]) {
                    self.emit(enc_b(encode::BRANCH, funct3, rs1, rs2, off), src);
                }
            }
            return;
        }

        match mnem {
            // jal [rd,] target; rd defaults to ra
            "jal" => {
                if ops.is_empty() || ops.len() > 2 {
                    self.malformed(mnem);
                } else if first_pass {
                    self.reserve(4);
                } else {
                    let (rd, target) = if ops.len() == 1 {
                        (Some(1), ops[0])
                    } else {
                        (self.reg(ops[0]), ops[1])
                    };
                    if let Some(rd) = rd {
                        if let Some(off) = self.target_offset(target) {
                            self.emit(enc_j(encode::JAL, rd, off), src);
                        }
                    }
                }
            }

            // jalr rs | jalr rd, offset(rs1) | jalr rd, rs1, imm
            "jalr" => {
                if ops.is_empty() || ops.len() > 3 {
                    self.malformed(mnem);
                } else if first_pass {
                    self.reserve(4);
                } else {
                    let parsed = match ops.len() {
                        1 => self.reg(ops[0]).map(|rs1| (1, rs1, 0)),
                        2 => match (self.reg(ops[0]), self.mem_operand(ops[1])) {
                            (Some(rd), Some((off, rs1))) => Some((rd, rs1, off)),
                            _ => None,
                        },
                        _ => match (self.reg(ops[0]), self.reg(ops[1]), self.imm(ops[2])) {
                            (Some(rd), Some(rs1), Some(off)) => Some((rd, rs1, off)),
                            _ => None,
                        },
                    };
                    if let Some((rd, rs1, off)) = parsed {
                        self.emit(enc_i(encode::JALR, rd, 0, rs1, off), src);
                    }
                }
            }

            // lui/auipc rd, imm: the full immediate is shifted into the
            // upper payload
            "lui" | "auipc" => {
                if ops.len() != 2 {
                    self.malformed(mnem);
                } else if first_pass {
                    self.reserve(4);
                } else if let (Some(rd), Some(imm)) = (self.reg(ops[0]), self.imm(ops[1])) {
                    let opcode = if mnem == "lui" {
                        encode::LUI
                    } else {
                        encode::AUIPC
                    };
                    self.emit(enc_u(opcode, rd, imm.wrapping_shl(12)), src);
                }
            }

            "ecall" => {
                if ops.is_empty() {
                    if first_pass {
                        self.reserve(4);
                    } else {
                        self.emit(0x0000_0073, src);
                    }
                } else {
                    self.malformed(mnem);
                }
            }

            "ebreak" => {
                if ops.is_empty() {
                    if first_pass {
                        self.reserve(4);
                    } else {
                        self.emit(0x0010_0073, src);
                    }
                } else {
                    self.malformed(mnem);
                }
            }

            _ => self.error(format!("unknown instruction: {mnem}")),
        }
    }
}

// ==================== Mnemonic tables ====================

fn r_op(mnem: &str) -> Option<(u32, u32)> {
    Some(match mnem {
        "add" => (0b000, 0b000_0000),
        "sub" => (0b000, 0b010_0000),
        "sll" => (0b001, 0b000_0000),
        "slt" => (0b010, 0b000_0000),
        "sltu" => (0b011, 0b000_0000),
        "xor" => (0b100, 0b000_0000),
        "srl" => (0b101, 0b000_0000),
        "sra" => (0b101, 0b010_0000),
        "or" => (0b110, 0b000_0000),
        "and" => (0b111, 0b000_0000),
        "mul" => (0b000, 0b000_0001),
        "mulh" => (0b001, 0b000_0001),
        "mulhsu" => (0b010, 0b000_0001),
        "mulhu" => (0b011, 0b000_0001),
        "div" => (0b100, 0b000_0001),
        "divu" => (0b101, 0b000_0001),
        "rem" => (0b110, 0b000_0001),
        "remu" => (0b111, 0b000_0001),
        _ => return None,
    })
}

fn i_arith_op(mnem: &str) -> Option<u32> {
    Some(match mnem {
        "addi" => 0b000,
        "slti" => 0b010,
        "sltiu" => 0b011,
        "xori" => 0b100,
        "ori" => 0b110,
        "andi" => 0b111,
        _ => return None,
    })
}

fn shift_op(mnem: &str) -> Option<(u32, u32)> {
    Some(match mnem {
        "slli" => (0b001, 0b000_0000),
        "srli" => (0b101, 0b000_0000),
        "srai" => (0b101, 0b010_0000),
        _ => return None,
    })
}

fn load_op(mnem: &str) -> Option<u32> {
    Some(match mnem {
        "lb" => 0b000,
        "lh" => 0b001,
        "lw" => 0b010,
        "lbu" => 0b100,
        "lhu" => 0b101,
        _ => return None,
    })
}

fn store_op(mnem: &str) -> Option<u32> {
    Some(match mnem {
        "sb" => 0b000,
        "sh" => 0b001,
        "sw" => 0b010,
        _ => return None,
    })
}

fn branch_op(mnem: &str) -> Option<u32> {
    Some(match mnem {
        "beq" => 0b000,
        "bne" => 0b001,
        "blt" => 0b100,
        "bge" => 0b101,
        "bltu" => 0b110,
        "bgeu" => 0b111,
        _ => return None,
    })
}
