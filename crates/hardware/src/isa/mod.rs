//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains the MIPS32 subset executed by the pipeline: field extraction,
//! opcode tables, decoding, disassembly, and a two-pass assembler.
//!
//! # Supported Instructions
//!
//! * R-type: `add sub and or xor nor slt sll srl sra jr`
//! * I-type: `addi andi ori slti lw sw beq bne`
//! * J-type: `j jal`

/// Application Binary Interface (ABI) register name mappings.
pub mod abi;

/// Two-pass assembler for MIPS source text.
pub mod asm;

/// Instruction decoding into a structured [`Instruction`](decode::Instruction).
pub mod decode;

/// Instruction disassembler for state views, tracing, and diagnostics.
pub mod disasm;

/// Instruction field extraction and encoding helpers.
pub mod instruction;

/// Primary opcode and R-type function code tables.
pub mod opcodes;

pub use decode::{Format, Instruction, Op, decode};
