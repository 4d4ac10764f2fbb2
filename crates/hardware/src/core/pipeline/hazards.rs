//! Hazard Detection and Reporting.
//!
//! This module implements the logic that keeps the pipeline consistent when
//! instructions depend on each other. It provides:
//! 1. **Load-Use Detection:** Identifies loads whose result is needed by the very
//!    next instruction, which forwarding alone cannot satisfy.
//! 2. **Hazard Reports:** Human-readable records of stalls, forwards, and flushes,
//!    attached to every cycle snapshot.

use serde::Serialize;

use crate::core::pipeline::forwarding::ForwardSrc;
use crate::core::pipeline::latches::{ExMemEntry, IdEx, IfId};
use crate::isa::abi::reg_name;
use crate::isa::disasm::disassemble;

/// Checks if a pipeline stall is needed due to a load-use data hazard.
///
/// A load-use hazard occurs when the instruction in decode reads a register
/// that the load currently in execute has not yet fetched from memory.
///
/// # Arguments
///
/// * `id_ex` - The ID/EX latch holding the instruction in execute.
/// * `if_id` - The IF/ID latch holding the instruction in decode.
///
/// # Returns
///
/// `true` if a one-cycle stall is required, `false` otherwise.
///
/// # Examples
///
/// ```text
/// ID/EX: lw  $t0, 0($t1)     <- loads $t0 (in execute)
/// IF/ID: add $t2, $t0, $t3   <- reads $t0 (in decode)
/// ```
pub fn need_stall_load_use(id_ex: &IdEx, if_id: &IfId) -> bool {
    let (Some(ex), Some(id)) = (id_ex.valid(), if_id.valid()) else {
        return false;
    };
    ex.ctrl.mem_read && ex.dest != 0 && id.inst.reads(ex.dest)
}

/// Category of a reported hazard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HazardKind {
    /// Read-after-write dependency resolved by forwarding.
    Data,
    /// Control-flow change that squashed younger instructions.
    Control,
    /// Load-use dependency that stalled the front of the pipeline.
    Stall,
}

/// A hazard observed during one cycle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Hazard {
    /// Hazard category.
    pub kind: HazardKind,
    /// Description naming the instructions and registers involved.
    pub message: String,
}

impl Hazard {
    /// Load-use stall: `load` in execute produces a register `user` reads in decode.
    pub fn load_use(id_ex: &IdEx, if_id: &IfId) -> Option<Self> {
        let (ex, id) = (id_ex.valid()?, if_id.valid()?);
        Some(Self {
            kind: HazardKind::Stall,
            message: format!(
                "load-use: '{}' needs {} from '{}'; stalling one cycle",
                disassemble(&id.inst),
                reg_name(ex.dest),
                disassemble(&ex.inst)
            ),
        })
    }

    /// Forwarding events recorded in an execute result, one per forwarded operand.
    pub fn forwards(entry: &ExMemEntry, rs: usize, rt: usize) -> Vec<Self> {
        [("A", rs, entry.forward_a), ("B", rt, entry.forward_b)]
            .into_iter()
            .filter(|(_, _, src)| *src != ForwardSrc::RegFile)
            .map(|(operand, reg, src)| Self {
                kind: HazardKind::Data,
                message: format!(
                    "forward {} -> operand {operand} ({}) of '{}'",
                    src.label(),
                    reg_name(reg),
                    disassemble(&entry.inst)
                ),
            })
            .collect()
    }

    /// Taken branch or register jump resolved in execute.
    pub fn branch_taken(entry: &ExMemEntry, target: u32) -> Self {
        Self {
            kind: HazardKind::Control,
            message: format!(
                "'{}' taken to {target:#x}; flushing IF and ID",
                disassemble(&entry.inst)
            ),
        }
    }

    /// Jump resolved in decode.
    pub fn jump(text: &str, target: u32) -> Self {
        Self {
            kind: HazardKind::Control,
            message: format!("'{text}' jumps to {target:#x}; flushing IF"),
        }
    }
}
