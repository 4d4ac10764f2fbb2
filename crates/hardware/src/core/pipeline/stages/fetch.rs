//! Instruction Fetch (IF) Stage.
//!
//! This module implements the first stage of the instruction pipeline. It reads
//! the instruction at the current Program Counter and advances the PC by one
//! word. Fetch always predicts the sequential path; redirects are applied by
//! the engine after later stages resolve control flow.

use tracing::trace;

use crate::common::constants::WORD_BYTES;
use crate::core::Cpu;
use crate::core::pipeline::latches::{IfId, IfIdEntry, Slot};

/// Executes the instruction fetch stage of the pipeline.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state; the PC is advanced by 4.
///
/// # Returns
///
/// The new IF/ID latch contents: the fetched instruction, or `Empty` when
/// nothing is loaded at the PC.
pub fn fetch_stage(cpu: &mut Cpu) -> IfId {
    let pc = cpu.pc;
    cpu.pc = pc.wrapping_add(WORD_BYTES);
    match cpu.imem.fetch(pc) {
        Some(inst) => {
            trace!(pc, word = inst.raw, "IF");
            Slot::Valid(IfIdEntry { pc, inst })
        }
        None => Slot::Empty,
    }
}
