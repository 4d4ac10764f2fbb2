//! Latch entries for hazard and forwarding tests.
//!
//! Entries are produced by running the real decode and execute stages on a
//! scratch CPU, so control signals always match the instruction.

use mipsim_core::Cpu;
use mipsim_core::config::Config;
use mipsim_core::core::pipeline::latches::{
    ExMem, ExMemEntry, IdExEntry, IfIdEntry, MemWb, MemWbEntry, Slot,
};
use mipsim_core::core::pipeline::stages::{decode_stage, execute_stage};
use mipsim_core::isa::decode;

pub fn if_id(pc: u32, word: u32) -> IfIdEntry {
    IfIdEntry {
        pc,
        inst: decode(word).expect("test word must decode"),
    }
}

/// Decodes `word` after writing `regs` into a fresh register file.
pub fn id_ex_with(pc: u32, word: u32, regs: &[(usize, i32)]) -> IdExEntry {
    let mut cpu = Cpu::new(&Config::default());
    for &(r, v) in regs {
        cpu.regs.write(r, v);
    }
    decode_stage(&cpu, &if_id(pc, word)).entry
}

pub fn id_ex(pc: u32, word: u32) -> IdExEntry {
    id_ex_with(pc, word, &[])
}

/// Executes `word` with no forwarding sources.
pub fn ex_mem_with(pc: u32, word: u32, regs: &[(usize, i32)]) -> ExMemEntry {
    execute_stage(&id_ex_with(pc, word, regs), &Slot::Empty, &Slot::Empty).entry
}

/// A MEM/WB entry for `word` with an explicit writeback value.
pub fn mem_wb(pc: u32, word: u32, write_data: i32) -> MemWbEntry {
    let ex = ex_mem_with(pc, word, &[]);
    MemWbEntry {
        pc,
        inst: ex.inst,
        alu: ex.alu,
        mem_data: if ex.ctrl.mem_read { write_data } else { 0 },
        write_data,
        dest: ex.dest,
        ctrl: ex.ctrl,
    }
}

/// An EX/MEM entry for `word` whose ALU result is forced to `alu`.
pub fn ex_mem_result(pc: u32, word: u32, alu: i32) -> ExMem {
    Slot::Valid(ExMemEntry {
        alu,
        ..ex_mem_with(pc, word, &[])
    })
}

pub fn mem_wb_slot(pc: u32, word: u32, write_data: i32) -> MemWb {
    Slot::Valid(mem_wb(pc, word, write_data))
}
