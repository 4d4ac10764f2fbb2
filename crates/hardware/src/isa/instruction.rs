//! Instruction encoding and decoding utilities.
//!
//! Provides bit extraction for the three MIPS instruction formats and the
//! inverse encoders used by the assembler:
//!
//! ```text
//! R: opcode[31:26] rs[25:21] rt[20:16] rd[15:11] shamt[10:6] funct[5:0]
//! I: opcode[31:26] rs[25:21] rt[20:16] imm[15:0]
//! J: opcode[31:26] target[25:0]
//! ```

/// Bit position of the opcode field.
pub const OPCODE_SHIFT: u32 = 26;
/// Bit position of the rs field.
pub const RS_SHIFT: u32 = 21;
/// Bit position of the rt field.
pub const RT_SHIFT: u32 = 16;
/// Bit position of the rd field.
pub const RD_SHIFT: u32 = 11;
/// Bit position of the shift-amount field.
pub const SHAMT_SHIFT: u32 = 6;

/// Mask for the 6-bit opcode and function fields.
pub const SIX_BIT_MASK: u32 = 0x3F;
/// Mask for 5-bit register and shift-amount fields.
pub const REG_MASK: u32 = 0x1F;
/// Mask for the 16-bit immediate field.
pub const IMM_MASK: u32 = 0xFFFF;
/// Mask for the 26-bit jump target field.
pub const TARGET_MASK: u32 = 0x03FF_FFFF;

/// Trait for extracting instruction fields from encoded instructions.
pub trait InstructionBits {
    /// Extracts the primary opcode (bits 26-31).
    fn opcode(&self) -> u32;

    /// Extracts the first source register (bits 21-25).
    fn rs(&self) -> usize;

    /// Extracts the second source or I-type destination register (bits 16-20).
    fn rt(&self) -> usize;

    /// Extracts the R-type destination register (bits 11-15).
    fn rd(&self) -> usize;

    /// Extracts the shift amount (bits 6-10).
    fn shamt(&self) -> u32;

    /// Extracts the R-type function code (bits 0-5).
    fn funct(&self) -> u32;

    /// Extracts the raw 16-bit immediate (bits 0-15).
    fn imm16(&self) -> u16;

    /// Extracts the 26-bit jump target (bits 0-25).
    fn target(&self) -> u32;
}

impl InstructionBits for u32 {
    #[inline]
    fn opcode(&self) -> u32 {
        (self >> OPCODE_SHIFT) & SIX_BIT_MASK
    }

    #[inline]
    fn rs(&self) -> usize {
        ((self >> RS_SHIFT) & REG_MASK) as usize
    }

    #[inline]
    fn rt(&self) -> usize {
        ((self >> RT_SHIFT) & REG_MASK) as usize
    }

    #[inline]
    fn rd(&self) -> usize {
        ((self >> RD_SHIFT) & REG_MASK) as usize
    }

    #[inline]
    fn shamt(&self) -> u32 {
        (self >> SHAMT_SHIFT) & REG_MASK
    }

    #[inline]
    fn funct(&self) -> u32 {
        self & SIX_BIT_MASK
    }

    #[inline]
    fn imm16(&self) -> u16 {
        (self & IMM_MASK) as u16
    }

    #[inline]
    fn target(&self) -> u32 {
        self & TARGET_MASK
    }
}

/// Encodes an R-type instruction. Out-of-range fields are masked.
pub const fn encode_r(rs: u32, rt: u32, rd: u32, shamt: u32, funct: u32) -> u32 {
    ((rs & REG_MASK) << RS_SHIFT)
        | ((rt & REG_MASK) << RT_SHIFT)
        | ((rd & REG_MASK) << RD_SHIFT)
        | ((shamt & REG_MASK) << SHAMT_SHIFT)
        | (funct & SIX_BIT_MASK)
}

/// Encodes an I-type instruction. The immediate is truncated to 16 bits.
pub const fn encode_i(opcode: u32, rs: u32, rt: u32, imm: u32) -> u32 {
    ((opcode & SIX_BIT_MASK) << OPCODE_SHIFT)
        | ((rs & REG_MASK) << RS_SHIFT)
        | ((rt & REG_MASK) << RT_SHIFT)
        | (imm & IMM_MASK)
}

/// Encodes a J-type instruction. The target is a word address truncated to 26 bits.
pub const fn encode_j(opcode: u32, target: u32) -> u32 {
    ((opcode & SIX_BIT_MASK) << OPCODE_SHIFT) | (target & TARGET_MASK)
}
