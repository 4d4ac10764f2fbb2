//! Execute (EX) Stage.
//!
//! This module implements the third stage of the pipeline. It performs:
//! 1. **Forwarding:** Replaces stale register reads with newer results from
//!    EX/MEM or MEM/WB.
//! 2. **ALU Operations:** Arithmetic, logic, shifts, address generation, and
//!    the `jal` return address.
//! 3. **Branch Resolution:** Decides `beq`/`bne`/`jr` and reports a redirect.

use tracing::trace;

use crate::core::pipeline::forwarding::{self, ForwardSrc};
use crate::core::pipeline::latches::{ExMem, ExMemEntry, IdExEntry, MemWb};
use crate::core::pipeline::signals::{OpASrc, OpBSrc};
use crate::core::units::alu::Alu;
use crate::core::units::bru::BranchUnit;

/// Result of executing one instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExecuteOutput {
    /// The EX/MEM entry.
    pub entry: ExMemEntry,
    /// Redirect target when a branch or `jr` is taken.
    pub redirect: Option<u32>,
}

/// Executes the execute stage for one ID/EX entry.
///
/// # Arguments
///
/// * `id` - The ID/EX entry being executed.
/// * `ex_mem` - EX/MEM latch at the start of the cycle (forwarding source).
/// * `mem_wb` - MEM/WB latch at the start of the cycle (forwarding source).
pub fn execute_stage(id: &IdExEntry, ex_mem: &ExMem, mem_wb: &MemWb) -> ExecuteOutput {
    let operand = |reg: usize, value: i32| {
        if id.inst.reads(reg) {
            forwarding::resolve(reg, value, ex_mem, mem_wb)
        } else {
            (value, ForwardSrc::RegFile)
        }
    };
    let (rs_val, forward_a) = operand(id.rs, id.rv1);
    let (rt_val, forward_b) = operand(id.rt, id.rv2);

    let a = match id.ctrl.a_src {
        OpASrc::Rs => rs_val,
        OpASrc::Rt => rt_val,
        OpASrc::Pc => id.pc as i32,
    };
    let b = if id.ctrl.alu_src {
        id.imm
    } else {
        match id.ctrl.b_src {
            OpBSrc::Rt => rt_val,
            OpBSrc::Shamt => id.shamt as i32,
            OpBSrc::Four => 4,
        }
    };
    let alu = Alu::execute(id.ctrl.alu, a, b);

    let resolution = BranchUnit::resolve(&id.ctrl, &id.inst, id.pc, rs_val, rt_val);
    let redirect = resolution.filter(|r| r.taken).map(|r| r.target);
    trace!(pc = id.pc, alu, ?forward_a, ?forward_b, ?redirect, "EX");

    ExecuteOutput {
        entry: ExMemEntry {
            pc: id.pc,
            inst: id.inst,
            alu,
            store_data: rt_val,
            dest: id.dest,
            zero: alu == 0,
            branch_taken: redirect.is_some(),
            forward_a,
            forward_b,
            ctrl: id.ctrl,
        },
        redirect,
    }
}
