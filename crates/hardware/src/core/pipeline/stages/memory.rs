//! Memory Access (MEM) Stage.
//!
//! This module implements the fourth stage of the pipeline. Loads read the
//! word at the effective address computed in execute; stores write the
//! forwarded `rt` value. The result to be written back is selected here.

use tracing::trace;

use crate::core::Cpu;
use crate::core::pipeline::latches::{ExMemEntry, MemWbEntry};

/// Executes the memory stage for one EX/MEM entry.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state (data memory).
/// * `ex` - The EX/MEM entry.
///
/// # Returns
///
/// The MEM/WB entry, with `write_data` set to the loaded word for loads and
/// the ALU result otherwise.
pub fn mem_stage(cpu: &mut Cpu, ex: &ExMemEntry) -> MemWbEntry {
    let addr = ex.alu as u32;
    let mem_data = if ex.ctrl.mem_read {
        let v = cpu.dmem.load_word(addr);
        trace!(addr, value = v, "MEM load");
        v
    } else {
        0
    };
    if ex.ctrl.mem_write {
        trace!(addr, value = ex.store_data, "MEM store");
        cpu.dmem.store_word(addr, ex.store_data);
    }

    MemWbEntry {
        pc: ex.pc,
        inst: ex.inst,
        alu: ex.alu,
        mem_data,
        write_data: if ex.ctrl.mem_to_reg { mem_data } else { ex.alu },
        dest: ex.dest,
        ctrl: ex.ctrl,
    }
}
