//! MIPS Application Binary Interface (ABI) register names.
//!
//! Defines the conventional register names used by the assembler and the
//! disassembler, plus a few well-known indices.

/// Register `$zero` (hardwired to zero).
pub const REG_ZERO: usize = 0;
/// Register `$t0` (first temporary).
pub const REG_T0: usize = 8;
/// Register `$sp` (stack pointer).
pub const REG_SP: usize = 29;
/// Register `$ra` (return address).
pub const REG_RA: usize = 31;

/// ABI names for `$0`-`$31`, including the leading `$`.
pub const REG_NAMES: [&str; 32] = [
    "$zero", "$at", "$v0", "$v1", "$a0", "$a1", "$a2", "$a3", "$t0", "$t1", "$t2", "$t3", "$t4",
    "$t5", "$t6", "$t7", "$s0", "$s1", "$s2", "$s3", "$s4", "$s5", "$s6", "$s7", "$t8", "$t9",
    "$k0", "$k1", "$gp", "$sp", "$fp", "$ra",
];

/// Returns the ABI name of register `idx`, or `"$?"` when out of range.
#[inline]
pub fn reg_name(idx: usize) -> &'static str {
    REG_NAMES.get(idx).copied().unwrap_or("$?")
}

/// Parses a register operand.
///
/// Accepts ABI names (`$t0`, `$ra`) and numeric forms (`$8`, `$31`), case-insensitively.
/// `$s8` is accepted as an alias of `$fp`.
pub fn reg_index(name: &str) -> Option<usize> {
    let lower = name.trim().to_ascii_lowercase();
    let body = lower.strip_prefix('$')?;
    if let Ok(n) = body.parse::<usize>() {
        return (n < REG_NAMES.len()).then_some(n);
    }
    if body == "s8" {
        return Some(30);
    }
    REG_NAMES.iter().position(|r| &r[1..] == body)
}
