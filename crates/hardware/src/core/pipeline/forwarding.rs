//! Operand Forwarding Unit.
//!
//! Resolves read-after-write hazards by bypassing the register file. For each
//! operand of the instruction in execute, the unit compares the source register
//! with the destinations of the two older instructions:
//! 1. **EX/MEM:** The instruction one ahead; wins when both match.
//! 2. **MEM/WB:** The instruction two ahead; supplies loaded data as well as ALU results.
//!
//! A load sitting in EX/MEM has no data yet, so it is never a forwarding source;
//! the load-use stall guarantees that case does not reach execute.

use serde::Serialize;

use crate::core::pipeline::latches::{ExMem, MemWb};
use crate::isa::abi::REG_ZERO;

/// Where an execute-stage operand value came from.
///
/// The discriminants follow the classic `ForwardA`/`ForwardB` mux encoding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum ForwardSrc {
    /// Register file value read in decode (`00`).
    #[default]
    RegFile = 0,
    /// MEM/WB latch (`01`).
    MemWb = 1,
    /// EX/MEM latch (`10`).
    ExMem = 2,
}

impl ForwardSrc {
    /// Mux select code (0, 1 or 2).
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Latch name for reports.
    pub const fn label(self) -> &'static str {
        match self {
            Self::RegFile => "register file",
            Self::MemWb => "MEM/WB",
            Self::ExMem => "EX/MEM",
        }
    }
}

/// Selects the source for register `reg`.
///
/// # Arguments
///
/// * `reg` - Source register of the instruction in execute.
/// * `ex_mem` - EX/MEM latch at the start of the cycle.
/// * `mem_wb` - MEM/WB latch at the start of the cycle.
pub fn select(reg: usize, ex_mem: &ExMem, mem_wb: &MemWb) -> ForwardSrc {
    if reg == REG_ZERO {
        return ForwardSrc::RegFile;
    }
    let ex_hit = ex_mem
        .valid()
        .is_some_and(|e| e.ctrl.reg_write && !e.ctrl.mem_read && e.dest == reg);
    if ex_hit {
        return ForwardSrc::ExMem;
    }
    let wb_hit = mem_wb
        .valid()
        .is_some_and(|w| w.ctrl.reg_write && w.dest == reg);
    if wb_hit {
        ForwardSrc::MemWb
    } else {
        ForwardSrc::RegFile
    }
}

/// Resolves an operand value: the forwarded value when a newer producer exists,
/// otherwise the register file value read in decode.
///
/// # Returns
///
/// The operand value and the source it was taken from.
pub fn resolve(reg: usize, reg_value: i32, ex_mem: &ExMem, mem_wb: &MemWb) -> (i32, ForwardSrc) {
    let src = select(reg, ex_mem, mem_wb);
    let value = match src {
        ForwardSrc::ExMem => ex_mem.valid().map_or(reg_value, |e| e.alu),
        ForwardSrc::MemWb => mem_wb.valid().map_or(reg_value, |w| w.write_data),
        ForwardSrc::RegFile => reg_value,
    };
    (value, src)
}
