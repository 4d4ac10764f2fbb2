//! Two-pass MIPS assembler.
//!
//! The first pass strips comments, records label addresses and collects the
//! instruction lines. The second pass parses operands and encodes each line,
//! resolving labels to branch offsets or jump targets.
//!
//! Syntax accepted:
//! 1. **Comments:** everything after `#` is ignored.
//! 2. **Labels:** `name:` on its own line or in front of an instruction.
//! 3. **Operands:** separated by commas, whitespace or parentheses, so
//!    `lw $t0, 4($t1)` and `lw $t0 4 $t1` are equivalent.
//! 4. **Immediates:** decimal (`-4`) or hexadecimal (`0xBEEF`).

use std::collections::HashMap;

use crate::common::error::{AsmError, AsmErrorKind};
use crate::isa::abi::reg_index;
use crate::isa::decode::{Format, Op};
use crate::isa::instruction::{TARGET_MASK, encode_i, encode_j, encode_r};

/// An instruction line that survived the first pass.
struct SourceLine<'a> {
    line: usize,
    addr: u32,
    text: &'a str,
}

/// Assembles `source` into machine words, placing the first instruction at `base`.
///
/// # Arguments
///
/// * `source` - Program text, one instruction per line.
/// * `base` - Byte address of the first instruction; labels resolve relative to it.
///
/// # Returns
///
/// The encoded words in program order, or every diagnostic found.
pub fn assemble(source: &str, base: u32) -> Result<Vec<u32>, Vec<AsmError>> {
    let mut errors = Vec::new();
    let mut labels: HashMap<String, u32> = HashMap::new();
    let mut lines = Vec::new();
    let mut addr = base;

    for (idx, raw) in source.lines().enumerate() {
        let line = idx + 1;
        let mut text = raw.split('#').next().unwrap_or_default().trim();

        while let Some((label, rest)) = text.split_once(':') {
            let label = label.trim();
            if !is_label(label) {
                errors.push(AsmError {
                    line,
                    kind: AsmErrorKind::BadLabel(label.to_owned()),
                });
                text = "";
                break;
            }
            if labels.insert(label.to_owned(), addr).is_some() {
                errors.push(AsmError {
                    line,
                    kind: AsmErrorKind::DuplicateLabel(label.to_owned()),
                });
            }
            text = rest.trim();
        }

        if !text.is_empty() {
            lines.push(SourceLine { line, addr, text });
            addr = addr.wrapping_add(4);
        }
    }

    let mut words = Vec::with_capacity(lines.len());
    for src in &lines {
        match encode_line(src, &labels) {
            Ok(word) => words.push(word),
            Err(kind) => errors.push(AsmError {
                line: src.line,
                kind,
            }),
        }
    }

    if errors.is_empty() {
        Ok(words)
    } else {
        errors.sort_by_key(|e| e.line);
        Err(errors)
    }
}

fn is_label(s: &str) -> bool {
    let mut chars = s.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '.')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}

fn encode_line(src: &SourceLine<'_>, labels: &HashMap<String, u32>) -> Result<u32, AsmErrorKind> {
    let tokens: Vec<&str> = src
        .text
        .split(|c: char| c == ',' || c == '(' || c == ')' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .collect();
    let Some((&head, operands)) = tokens.split_first() else {
        return Ok(0);
    };
    let mnemonic = head.to_ascii_lowercase();

    if mnemonic == "nop" {
        expect_operands(&mnemonic, operands, 0)?;
        return Ok(0);
    }

    let op = Op::from_mnemonic(&mnemonic).ok_or_else(|| AsmErrorKind::UnknownMnemonic(head.to_owned()))?;

    match op {
        Op::Add | Op::Sub | Op::And | Op::Or | Op::Xor | Op::Nor | Op::Slt => {
            expect_operands(&mnemonic, operands, 3)?;
            let rd = reg(operands[0])?;
            let rs = reg(operands[1])?;
            let rt = reg(operands[2])?;
            Ok(encode_r(rs, rt, rd, 0, funct_of(op)))
        }
        Op::Sll | Op::Srl | Op::Sra => {
            expect_operands(&mnemonic, operands, 3)?;
            let rd = reg(operands[0])?;
            let rt = reg(operands[1])?;
            let shamt = immediate(operands[2])?;
            if !(0..32).contains(&shamt) {
                return Err(AsmErrorKind::BadImmediate(operands[2].to_owned()));
            }
            Ok(encode_r(0, rt, rd, shamt as u32, funct_of(op)))
        }
        Op::Jr => {
            expect_operands(&mnemonic, operands, 1)?;
            Ok(encode_r(reg(operands[0])?, 0, 0, 0, funct_of(op)))
        }
        Op::Addi | Op::Slti | Op::Andi | Op::Ori => {
            expect_operands(&mnemonic, operands, 3)?;
            let rt = reg(operands[0])?;
            let rs = reg(operands[1])?;
            let imm = imm16(operands[2])?;
            Ok(encode_i(op.opcode(), rs, rt, imm))
        }
        Op::Lw | Op::Sw => {
            // `lw rt, off(rs)` or `lw rt, (rs)`
            let (rt, off, rs) = match operands {
                [rt, rs] => (reg(rt)?, 0, reg(rs)?),
                [rt, off, rs] => (reg(rt)?, imm16(off)?, reg(rs)?),
                _ => {
                    return Err(AsmErrorKind::OperandCount {
                        mnemonic,
                        expected: 3,
                        found: operands.len(),
                    });
                }
            };
            Ok(encode_i(op.opcode(), rs, rt, off))
        }
        Op::Beq | Op::Bne => {
            expect_operands(&mnemonic, operands, 3)?;
            let rs = reg(operands[0])?;
            let rt = reg(operands[1])?;
            let offset = match labels.get(operands[2]) {
                Some(&target) => {
                    i64::from(target.wrapping_sub(src.addr.wrapping_add(4)) as i32) / 4
                }
                None => immediate(operands[2]).map_err(|e| undefined_or(operands[2], e))?,
            };
            if !(i64::from(i16::MIN)..=i64::from(i16::MAX)).contains(&offset) {
                return Err(AsmErrorKind::BadImmediate(operands[2].to_owned()));
            }
            Ok(encode_i(op.opcode(), rs, rt, offset as u32))
        }
        Op::J | Op::Jal => {
            expect_operands(&mnemonic, operands, 1)?;
            let target = match labels.get(operands[0]) {
                Some(&addr) => addr >> 2,
                None => immediate(operands[0]).map_err(|e| undefined_or(operands[0], e))? as u32,
            };
            Ok(encode_j(op.opcode(), target & TARGET_MASK))
        }
    }
}

fn funct_of(op: Op) -> u32 {
    debug_assert_eq!(op.format(), Format::R);
    op.funct().unwrap_or_default()
}

fn expect_operands(mnemonic: &str, operands: &[&str], expected: usize) -> Result<(), AsmErrorKind> {
    if operands.len() == expected {
        Ok(())
    } else {
        Err(AsmErrorKind::OperandCount {
            mnemonic: mnemonic.to_owned(),
            expected,
            found: operands.len(),
        })
    }
}

fn reg(token: &str) -> Result<u32, AsmErrorKind> {
    reg_index(token)
        .map(|r| r as u32)
        .ok_or_else(|| AsmErrorKind::BadRegister(token.to_owned()))
}

/// Parses a decimal or `0x` hexadecimal integer with an optional sign.
fn immediate(token: &str) -> Result<i64, AsmErrorKind> {
    let bad = || AsmErrorKind::BadImmediate(token.to_owned());
    let (neg, body) = match token.as_bytes().first() {
        Some(b'-') => (true, &token[1..]),
        Some(b'+') => (false, &token[1..]),
        _ => (false, token),
    };
    let (digits, radix) = match body.strip_prefix("0x").or_else(|| body.strip_prefix("0X")) {
        Some(hex) => (hex, 16),
        None => (body, 10),
    };
    if digits.starts_with(['+', '-']) {
        return Err(bad());
    }
    let magnitude = i64::from_str_radix(digits, radix).map_err(|_| bad())?;
    Ok(if neg { -magnitude } else { magnitude })
}

/// Parses an immediate that must fit the 16-bit field, signed or unsigned.
fn imm16(token: &str) -> Result<u32, AsmErrorKind> {
    let value = immediate(token)?;
    if (i64::from(i16::MIN)..=i64::from(u16::MAX)).contains(&value) {
        Ok((value as u32) & 0xFFFF)
    } else {
        Err(AsmErrorKind::BadImmediate(token.to_owned()))
    }
}

/// A non-numeric branch or jump operand is reported as a missing label.
fn undefined_or(token: &str, err: AsmErrorKind) -> AsmErrorKind {
    if is_label(token) {
        AsmErrorKind::UndefinedLabel(token.to_owned())
    } else {
        err
    }
}
