//! Pipeline control signals and the control unit.
//!
//! This module defines the signals that steer an instruction through the
//! pipeline. It performs:
//! 1. **Operation Classification:** Resolves the ALU operation for every instruction.
//! 2. **Operand Selection:** Chooses the sources for ALU inputs A and B.
//! 3. **Memory and Writeback Control:** Load/store enables and register write selection.
//! 4. **Control Flow:** Marks branches, jumps, links, and register jumps.

use serde::Serialize;

use crate::isa::decode::{Instruction, Op};

/// ALU operation types.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AluOp {
    /// Wrapping addition (also address generation and link computation).
    #[default]
    Add,

    /// Wrapping subtraction (also branch comparison).
    Sub,

    /// Bitwise AND.
    And,

    /// Bitwise OR.
    Or,

    /// Bitwise XOR.
    Xor,

    /// Bitwise NOR.
    Nor,

    /// Set less than (signed).
    Slt,

    /// Shift left logical.
    Sll,

    /// Shift right logical.
    Srl,

    /// Shift right arithmetic.
    Sra,
}

/// Source for ALU operand A.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OpASrc {
    /// Register `rs` (after forwarding).
    #[default]
    Rs,
    /// Register `rt` (after forwarding); used by shifts.
    Rt,
    /// The instruction's own PC; used by `jal`.
    Pc,
}

/// Register-side source for ALU operand B, used when `alu_src` is clear.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OpBSrc {
    /// Register `rt` (after forwarding).
    #[default]
    Rt,
    /// The shift amount field.
    Shamt,
    /// The constant 4; used by `jal` to form the return address.
    Four,
}

/// Control signals for pipeline execution.
///
/// Produced in decode and carried with the instruction until writeback.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlSignals {
    /// Write the result to the destination register.
    pub reg_write: bool,
    /// Write back the loaded value instead of the ALU result.
    pub mem_to_reg: bool,
    /// Read data memory (load).
    pub mem_read: bool,
    /// Write data memory (store).
    pub mem_write: bool,
    /// Conditional branch, resolved in execute.
    pub branch: bool,
    /// Unconditional jump to a 26-bit target, resolved in decode.
    pub jump: bool,
    /// Jump through register `rs`, resolved in execute.
    pub jump_reg: bool,
    /// Writes the return address to `$ra`.
    pub link: bool,
    /// Destination is `rd` rather than `rt`.
    pub reg_dst: bool,
    /// Operand B is the extended immediate; overrides `b_src`.
    pub alu_src: bool,
    /// ALU operation to perform.
    pub alu: AluOp,
    /// Source selection for ALU operand A.
    pub a_src: OpASrc,
    /// Source selection for ALU operand B when `alu_src` is clear.
    pub b_src: OpBSrc,
}

impl ControlSignals {
    /// The control unit: derives the signals for `inst`.
    pub const fn for_instruction(inst: &Instruction) -> Self {
        let base = Self {
            reg_write: false,
            mem_to_reg: false,
            mem_read: false,
            mem_write: false,
            branch: false,
            jump: false,
            jump_reg: false,
            link: false,
            reg_dst: false,
            alu_src: false,
            alu: AluOp::Add,
            a_src: OpASrc::Rs,
            b_src: OpBSrc::Rt,
        };
        let r_type = Self {
            reg_write: true,
            reg_dst: true,
            ..base
        };
        let imm = Self {
            reg_write: true,
            alu_src: true,
            ..base
        };
        let shift = Self {
            a_src: OpASrc::Rt,
            b_src: OpBSrc::Shamt,
            ..r_type
        };

        match inst.op {
            Op::Add => r_type,
            Op::Sub => Self { alu: AluOp::Sub, ..r_type },
            Op::And => Self { alu: AluOp::And, ..r_type },
            Op::Or => Self { alu: AluOp::Or, ..r_type },
            Op::Xor => Self { alu: AluOp::Xor, ..r_type },
            Op::Nor => Self { alu: AluOp::Nor, ..r_type },
            Op::Slt => Self { alu: AluOp::Slt, ..r_type },
            Op::Sll => Self { alu: AluOp::Sll, ..shift },
            Op::Srl => Self { alu: AluOp::Srl, ..shift },
            Op::Sra => Self { alu: AluOp::Sra, ..shift },
            Op::Jr => Self { jump_reg: true, ..base },
            Op::J => Self { jump: true, ..base },
            Op::Jal => Self {
                reg_write: true,
                jump: true,
                link: true,
                a_src: OpASrc::Pc,
                b_src: OpBSrc::Four,
                ..base
            },
            Op::Beq | Op::Bne => Self {
                branch: true,
                alu: AluOp::Sub,
                ..base
            },
            Op::Addi => imm,
            Op::Slti => Self { alu: AluOp::Slt, ..imm },
            Op::Andi => Self { alu: AluOp::And, ..imm },
            Op::Ori => Self { alu: AluOp::Or, ..imm },
            Op::Lw => Self {
                mem_read: true,
                mem_to_reg: true,
                ..imm
            },
            Op::Sw => Self {
                reg_write: false,
                mem_write: true,
                ..imm
            },
        }
    }
}
