//! MIPS Instruction Decoder.
//!
//! This module turns a raw 32-bit word into an [`Instruction`]: the operation,
//! the register fields, and the immediate already extended the way the operation
//! consumes it (sign-extended for arithmetic, loads, stores and branches;
//! zero-extended for `andi`/`ori`).

use serde::Serialize;

use crate::common::error::DecodeError;
use crate::isa::instruction::InstructionBits;
use crate::isa::opcodes::{funct, opcodes};

/// Register index of `$ra`, written by `jal`.
pub const LINK_REG: usize = 31;

/// Encoding format, selected by the primary opcode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Format {
    /// Register format (opcode 0).
    R,
    /// Immediate format.
    I,
    /// Jump format (opcodes 2 and 3).
    J,
}

/// Supported operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Op {
    /// `rd = rs + rt`
    Add,
    /// `rd = rs - rt`
    Sub,
    /// `rd = rs & rt`
    And,
    /// `rd = rs | rt`
    Or,
    /// `rd = rs ^ rt`
    Xor,
    /// `rd = !(rs | rt)`
    Nor,
    /// `rd = rs < rt` (signed)
    Slt,
    /// `rd = rt << shamt`
    Sll,
    /// `rd = rt >> shamt` (logical)
    Srl,
    /// `rd = rt >> shamt` (arithmetic)
    Sra,
    /// `pc = rs`
    Jr,
    /// Jump to a 26-bit word target.
    J,
    /// Jump and write the return address to `$ra`.
    Jal,
    /// Branch if `rs == rt`.
    Beq,
    /// Branch if `rs != rt`.
    Bne,
    /// `rt = rs + sext(imm)`
    Addi,
    /// `rt = rs < sext(imm)` (signed)
    Slti,
    /// `rt = rs & zext(imm)`
    Andi,
    /// `rt = rs | zext(imm)`
    Ori,
    /// `rt = mem[rs + sext(imm)]`
    Lw,
    /// `mem[rs + sext(imm)] = rt`
    Sw,
}

impl Op {
    /// Assembly mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Sub => "sub",
            Self::And => "and",
            Self::Or => "or",
            Self::Xor => "xor",
            Self::Nor => "nor",
            Self::Slt => "slt",
            Self::Sll => "sll",
            Self::Srl => "srl",
            Self::Sra => "sra",
            Self::Jr => "jr",
            Self::J => "j",
            Self::Jal => "jal",
            Self::Beq => "beq",
            Self::Bne => "bne",
            Self::Addi => "addi",
            Self::Slti => "slti",
            Self::Andi => "andi",
            Self::Ori => "ori",
            Self::Lw => "lw",
            Self::Sw => "sw",
        }
    }

    /// Looks up an operation by its (lower-case) mnemonic.
    pub fn from_mnemonic(name: &str) -> Option<Self> {
        Some(match name {
            "add" => Self::Add,
            "sub" => Self::Sub,
            "and" => Self::And,
            "or" => Self::Or,
            "xor" => Self::Xor,
            "nor" => Self::Nor,
            "slt" => Self::Slt,
            "sll" => Self::Sll,
            "srl" => Self::Srl,
            "sra" => Self::Sra,
            "jr" => Self::Jr,
            "j" => Self::J,
            "jal" => Self::Jal,
            "beq" => Self::Beq,
            "bne" => Self::Bne,
            "addi" => Self::Addi,
            "slti" => Self::Slti,
            "andi" => Self::Andi,
            "ori" => Self::Ori,
            "lw" => Self::Lw,
            "sw" => Self::Sw,
            _ => return None,
        })
    }

    /// Encoding format of the operation.
    pub const fn format(self) -> Format {
        match self {
            Self::Add
            | Self::Sub
            | Self::And
            | Self::Or
            | Self::Xor
            | Self::Nor
            | Self::Slt
            | Self::Sll
            | Self::Srl
            | Self::Sra
            | Self::Jr => Format::R,
            Self::J | Self::Jal => Format::J,
            _ => Format::I,
        }
    }

    /// Primary opcode field.
    pub const fn opcode(self) -> u32 {
        match self {
            Self::J => opcodes::OP_J,
            Self::Jal => opcodes::OP_JAL,
            Self::Beq => opcodes::OP_BEQ,
            Self::Bne => opcodes::OP_BNE,
            Self::Addi => opcodes::OP_ADDI,
            Self::Slti => opcodes::OP_SLTI,
            Self::Andi => opcodes::OP_ANDI,
            Self::Ori => opcodes::OP_ORI,
            Self::Lw => opcodes::OP_LW,
            Self::Sw => opcodes::OP_SW,
            _ => opcodes::OP_SPECIAL,
        }
    }

    /// Function field for R-type operations, `None` otherwise.
    pub const fn funct(self) -> Option<u32> {
        Some(match self {
            Self::Add => funct::ADD,
            Self::Sub => funct::SUB,
            Self::And => funct::AND,
            Self::Or => funct::OR,
            Self::Xor => funct::XOR,
            Self::Nor => funct::NOR,
            Self::Slt => funct::SLT,
            Self::Sll => funct::SLL,
            Self::Srl => funct::SRL,
            Self::Sra => funct::SRA,
            Self::Jr => funct::JR,
            _ => return None,
        })
    }

    /// Immediate is zero-extended rather than sign-extended.
    pub const fn zero_extends(self) -> bool {
        matches!(self, Self::Andi | Self::Ori)
    }
}

/// A decoded instruction.
///
/// Field values are taken straight from the encoding, so fields that the
/// operation does not use (for example `rd` of an I-type word) still hold
/// whatever bits were present.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Instruction {
    /// Raw 32-bit encoding.
    pub raw: u32,
    /// Decoded operation.
    pub op: Op,
    /// `rs` field.
    pub rs: usize,
    /// `rt` field.
    pub rt: usize,
    /// `rd` field.
    pub rd: usize,
    /// Shift amount.
    pub shamt: u32,
    /// Immediate after sign or zero extension (0 for non-I-type).
    pub imm: i32,
    /// 26-bit jump target (word address).
    pub target: u32,
}

impl Instruction {
    /// Encoding format.
    pub const fn format(&self) -> Format {
        self.op.format()
    }

    /// Primary opcode field.
    pub fn opcode(&self) -> u32 {
        self.raw.opcode()
    }

    /// The canonical `sll $zero, $zero, 0` no-op.
    pub const fn is_nop(&self) -> bool {
        self.raw == 0
    }

    /// Registers read by the instruction, in operand order.
    ///
    /// Unused slots are `None`. Shifts only read `rt`, `jr` only reads `rs`,
    /// and I-type arithmetic and loads only read `rs`.
    pub const fn sources(&self) -> [Option<usize>; 2] {
        match self.op {
            Op::Sll | Op::Srl | Op::Sra => [None, Some(self.rt)],
            Op::Jr => [Some(self.rs), None],
            Op::J | Op::Jal => [None, None],
            Op::Addi | Op::Slti | Op::Andi | Op::Ori | Op::Lw => [Some(self.rs), None],
            _ => [Some(self.rs), Some(self.rt)],
        }
    }

    /// Whether the instruction reads register `reg`. `$zero` never counts.
    pub fn reads(&self, reg: usize) -> bool {
        reg != 0 && self.sources().contains(&Some(reg))
    }


    /// Branch target for an instruction at `pc`: `pc + 4 + (imm << 2)`.
    pub const fn branch_target(&self, pc: u32) -> u32 {
        pc.wrapping_add(4).wrapping_add((self.imm as u32) << 2)
    }

    /// Jump target for an instruction at `pc`: the upper nibble of `pc + 4`
    /// joined with the 26-bit target shifted left by two.
    pub const fn jump_target(&self, pc: u32) -> u32 {
        (pc.wrapping_add(4) & 0xF000_0000) | (self.target << 2)
    }
}

/// Decodes a 32-bit word.
///
/// # Arguments
///
/// * `word` - The raw instruction encoding.
///
/// # Returns
///
/// The decoded [`Instruction`], or a [`DecodeError`] naming the unsupported
/// opcode or function field.
pub fn decode(word: u32) -> Result<Instruction, DecodeError> {
    let opcode = word.opcode();
    let op = match opcode {
        opcodes::OP_SPECIAL => match word.funct() {
            funct::ADD => Op::Add,
            funct::SUB => Op::Sub,
            funct::AND => Op::And,
            funct::OR => Op::Or,
            funct::XOR => Op::Xor,
            funct::NOR => Op::Nor,
            funct::SLT => Op::Slt,
            funct::SLL => Op::Sll,
            funct::SRL => Op::Srl,
            funct::SRA => Op::Sra,
            funct::JR => Op::Jr,
            other => {
                return Err(DecodeError::UnknownFunct {
                    word,
                    funct: other,
                });
            }
        },
        opcodes::OP_J => Op::J,
        opcodes::OP_JAL => Op::Jal,
        opcodes::OP_BEQ => Op::Beq,
        opcodes::OP_BNE => Op::Bne,
        opcodes::OP_ADDI => Op::Addi,
        opcodes::OP_SLTI => Op::Slti,
        opcodes::OP_ANDI => Op::Andi,
        opcodes::OP_ORI => Op::Ori,
        opcodes::OP_LW => Op::Lw,
        opcodes::OP_SW => Op::Sw,
        other => return Err(DecodeError::UnknownOpcode { word, opcode: other }),
    };

    let imm = match op.format() {
        Format::I if op.zero_extends() => i32::from(word.imm16()),
        Format::I => i32::from(word.imm16() as i16),
        _ => 0,
    };

    Ok(Instruction {
        raw: word,
        op,
        rs: word.rs(),
        rt: word.rt(),
        rd: word.rd(),
        shamt: word.shamt(),
        imm,
        target: if op.format() == Format::J { word.target() } else { 0 },
    })
}
