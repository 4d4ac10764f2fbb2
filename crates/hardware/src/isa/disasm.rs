//! Instruction Disassembler for the MIPS subset.
//!
//! Converts decoded instructions back into assembler syntax for the state view,
//! debug tracing, and the CLI `disasm` command. The output is accepted by
//! [`assemble`](crate::isa::asm::assemble), except that branch offsets and jump
//! targets are printed numerically.
//!
//! # Usage
//!
//! ```
//! use mipsim_core::isa::disasm::disassemble_word;
//! assert_eq!(disassemble_word(0x2008_0005), "addi $t0, $zero, 5");
//! assert_eq!(disassemble_word(0x0800_0007), "j 0x1C");
//! ```

use crate::isa::abi::reg_name;
use crate::isa::decode::{Instruction, Op, decode};

/// Renders a decoded instruction as assembly text.
pub fn disassemble(inst: &Instruction) -> String {
    if inst.is_nop() {
        return "nop".to_owned();
    }
    let m = inst.op.mnemonic();
    match inst.op {
        Op::Add | Op::Sub | Op::And | Op::Or | Op::Xor | Op::Nor | Op::Slt => format!(
            "{m} {}, {}, {}",
            reg_name(inst.rd),
            reg_name(inst.rs),
            reg_name(inst.rt)
        ),
        Op::Sll | Op::Srl | Op::Sra => format!(
            "{m} {}, {}, {}",
            reg_name(inst.rd),
            reg_name(inst.rt),
            inst.shamt
        ),
        Op::Jr => format!("{m} {}", reg_name(inst.rs)),
        Op::J | Op::Jal => format!("{m} {:#X}", inst.target << 2),
        Op::Beq | Op::Bne => format!(
            "{m} {}, {}, {}",
            reg_name(inst.rs),
            reg_name(inst.rt),
            inst.imm
        ),
        Op::Lw | Op::Sw => format!("{m} {}, {}({})", reg_name(inst.rt), inst.imm, reg_name(inst.rs)),
        Op::Addi | Op::Slti | Op::Andi | Op::Ori => format!(
            "{m} {}, {}, {}",
            reg_name(inst.rt),
            reg_name(inst.rs),
            inst.imm
        ),
    }
}

/// Decodes and renders a raw word; unsupported words render as `.word 0x...`.
pub fn disassemble_word(word: u32) -> String {
    decode(word).map_or_else(|_| format!(".word {word:#010x}"), |inst| disassemble(&inst))
}
