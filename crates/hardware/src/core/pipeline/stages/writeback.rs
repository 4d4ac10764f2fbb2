//! Writeback (WB) Stage.
//!
//! This module implements the final stage of the pipeline. It commits the
//! selected result to the register file. Writes to `$zero` are discarded by
//! the register file itself.

use tracing::trace;

use crate::core::Cpu;
use crate::core::pipeline::latches::MemWbEntry;
use crate::isa::abi::reg_name;

/// Executes the writeback stage for one MEM/WB entry.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state (register file).
/// * `wb` - The MEM/WB entry retiring this cycle.
pub fn wb_stage(cpu: &mut Cpu, wb: &MemWbEntry) {
    if wb.ctrl.reg_write && wb.dest != 0 {
        trace!(reg = reg_name(wb.dest), value = wb.write_data, "WB");
        cpu.regs.write(wb.dest, wb.write_data);
    }
}
