//! Branch Resolution Unit (BRU).
//!
//! The pipeline fetches sequentially (static not-taken). Conditional branches
//! and `jr` are resolved here during execute using forwarded operands; a taken
//! outcome redirects fetch and squashes the two younger instructions.

use crate::core::pipeline::signals::ControlSignals;
use crate::isa::decode::{Instruction, Op};

/// Outcome of resolving a control-flow instruction in execute.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Whether control leaves the sequential path.
    pub taken: bool,
    /// Redirect target when taken.
    pub target: u32,
}

/// Branch resolution unit.
#[derive(Clone, Copy, Debug)]
pub struct BranchUnit;

impl BranchUnit {
    /// Resolves a conditional branch or `jr`.
    ///
    /// # Arguments
    ///
    /// * `ctrl` - Control signals; only `branch` and `jump_reg` instructions resolve here.
    /// * `inst` - The instruction in execute.
    /// * `pc`   - Address of the instruction.
    /// * `a`    - Forwarded `rs` value.
    /// * `b`    - Forwarded `rt` value.
    ///
    /// # Returns
    ///
    /// `None` when the control unit marked neither `branch` nor `jump_reg`.
    pub const fn resolve(
        ctrl: &ControlSignals,
        inst: &Instruction,
        pc: u32,
        a: i32,
        b: i32,
    ) -> Option<Resolution> {
        if ctrl.jump_reg {
            return Some(Resolution {
                taken: true,
                target: a as u32,
            });
        }
        if !ctrl.branch {
            return None;
        }
        let taken = match inst.op {
            Op::Bne => a != b,
            _ => a == b,
        };
        Some(Resolution {
            taken,
            target: inst.branch_target(pc),
        })
    }
}
