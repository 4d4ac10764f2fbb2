//! Instruction Decode (ID) Stage.
//!
//! This module implements the second stage of the pipeline. It performs:
//! 1. **Control Generation:** Runs the control unit on the fetched instruction.
//! 2. **Register Read:** Reads `rs` and `rt` after writeback has updated the file
//!    this cycle, so a value retiring now is visible without forwarding.
//! 3. **Jump Resolution:** Computes the target of `j`/`jal`, which needs no registers.

use tracing::trace;

use crate::core::Cpu;
use crate::core::pipeline::latches::{IdExEntry, IfIdEntry};
use crate::core::pipeline::signals::ControlSignals;
use crate::isa::decode::LINK_REG;
use crate::isa::disasm::disassemble;

/// Result of decoding one instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodeOutput {
    /// The ID/EX entry.
    pub entry: IdExEntry,
    /// Jump target when the instruction is `j` or `jal`.
    pub jump: Option<u32>,
}

/// Executes the instruction decode stage for one IF/ID entry.
///
/// # Arguments
///
/// * `cpu` - CPU state (register file).
/// * `fetched` - The IF/ID entry being decoded.
pub fn decode_stage(cpu: &Cpu, fetched: &IfIdEntry) -> DecodeOutput {
    let inst = fetched.inst;
    let ctrl = ControlSignals::for_instruction(&inst);
    let dest = if !ctrl.reg_write {
        0
    } else if ctrl.link {
        LINK_REG
    } else if ctrl.reg_dst {
        inst.rd
    } else {
        inst.rt
    };

    let entry = IdExEntry {
        pc: fetched.pc,
        inst,
        rs: inst.rs,
        rt: inst.rt,
        rd: inst.rd,
        dest,
        rv1: cpu.regs.read(inst.rs),
        rv2: cpu.regs.read(inst.rt),
        imm: inst.imm,
        shamt: inst.shamt,
        ctrl,
    };
    trace!(pc = fetched.pc, asm = %disassemble(&inst), "ID");

    DecodeOutput {
        entry,
        jump: ctrl.jump.then(|| inst.jump_target(fetched.pc)),
    }
}
