//! Operand parsing: register names, immediates, memory operands.

use crate::regs;

/// Parse a register token: `xN` or an ABI name (`fp` aliases `s0`).
pub(crate) fn parse_reg(s: &str) -> Option<u8> {
    let r = s.trim().to_ascii_lowercase();
    if r.is_empty() {
        return None;
    }

    if let Some(num) = r.strip_prefix('x') {
        let n: u8 = num.parse().ok()?;
        return (n < 32).then_some(n);
    }

    if r == "fp" {
        return Some(8);
    }

    let index = regs::NAMES.iter().position(|&name| name == r)?;
    u8::try_from(index).ok()
}

/// Parse an immediate: decimal, `0x` hex or `0b` binary, optional sign.
///
/// Accepts any value representable in 32 bits under either a signed or an
/// unsigned reading; out-of-range unsigned values wrap into the signed
/// result.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn parse_imm(s: &str) -> Option<i32> {
    let t = s.trim();
    let (negative, t) = match t.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, t.strip_prefix('+').unwrap_or(t)),
    };

    let magnitude: i64 = if let Some(hex) = t.strip_prefix("0x").or_else(|| t.strip_prefix("0X")) {
        i64::from(u32::from_str_radix(hex, 16).ok()?)
    } else if let Some(bin) = t.strip_prefix("0b").or_else(|| t.strip_prefix("0B")) {
        i64::from(u32::from_str_radix(bin, 2).ok()?)
    } else {
        t.parse::<u32>().ok().map(i64::from)?
    };

    let value = if negative { -magnitude } else { magnitude };
    if !(-(1i64 << 31)..(1i64 << 32)).contains(&value) {
        return None;
    }
    Some(value as i32)
}

/// Parse a memory operand `offset(reg)`; the offset defaults to 0.
pub(crate) fn parse_mem(s: &str) -> Option<(i32, u8)> {
    let open = s.find('(')?;
    let close = s.rfind(')')?;
    if close < open {
        return None;
    }

    let off_str = s[..open].trim();
    let offset = if off_str.is_empty() {
        0
    } else {
        parse_imm(off_str)?
    };

    let reg = parse_reg(&s[open + 1..close])?;
    Some((offset, reg))
}
