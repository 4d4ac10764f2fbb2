//! MIPS opcode and function code tables.

/// Primary opcodes (bits 26-31).
pub mod opcodes {
    /// R-type instructions; the operation is selected by the function field.
    pub const OP_SPECIAL: u32 = 0x00;
    /// Jump.
    pub const OP_J: u32 = 0x02;
    /// Jump and link.
    pub const OP_JAL: u32 = 0x03;
    /// Branch if equal.
    pub const OP_BEQ: u32 = 0x04;
    /// Branch if not equal.
    pub const OP_BNE: u32 = 0x05;
    /// Add immediate.
    pub const OP_ADDI: u32 = 0x08;
    /// Set on less than immediate.
    pub const OP_SLTI: u32 = 0x0A;
    /// AND immediate (zero-extended).
    pub const OP_ANDI: u32 = 0x0C;
    /// OR immediate (zero-extended).
    pub const OP_ORI: u32 = 0x0D;
    /// Load word.
    pub const OP_LW: u32 = 0x23;
    /// Store word.
    pub const OP_SW: u32 = 0x2B;
}

/// R-type function codes (bits 0-5).
pub mod funct {
    /// Shift left logical.
    pub const SLL: u32 = 0x00;
    /// Shift right logical.
    pub const SRL: u32 = 0x02;
    /// Shift right arithmetic.
    pub const SRA: u32 = 0x03;
    /// Jump register.
    pub const JR: u32 = 0x08;
    /// Add.
    pub const ADD: u32 = 0x20;
    /// Subtract.
    pub const SUB: u32 = 0x22;
    /// Bitwise AND.
    pub const AND: u32 = 0x24;
    /// Bitwise OR.
    pub const OR: u32 = 0x25;
    /// Bitwise XOR.
    pub const XOR: u32 = 0x26;
    /// Bitwise NOR.
    pub const NOR: u32 = 0x27;
    /// Set on less than (signed).
    pub const SLT: u32 = 0x2A;
}
