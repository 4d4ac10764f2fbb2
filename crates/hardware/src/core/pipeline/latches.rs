//! Pipeline latch structures for inter-stage communication.
//!
//! This module defines the entry types carried between the five stages:
//! Fetch → Decode → Execute → Memory → Writeback.
//!
//! 1. **Instruction Flow:** One entry per latch, wrapped in a [`Slot`].
//! 2. **Bubbles:** Stall-inserted and squashed instructions travel as [`Slot::Bubble`]
//!    so that the timeline shows where the pipeline lost a cycle.

use crate::core::pipeline::forwarding::ForwardSrc;
use crate::core::pipeline::signals::ControlSignals;
use crate::isa::decode::Instruction;

/// Contents of a pipeline latch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Slot<T> {
    /// Nothing has entered the latch.
    #[default]
    Empty,
    /// A no-op inserted by a stall or left behind by a squash.
    Bubble,
    /// A live instruction.
    Valid(T),
}

impl<T> Slot<T> {
    /// The live entry, if any.
    pub const fn valid(&self) -> Option<&T> {
        match self {
            Self::Valid(entry) => Some(entry),
            _ => None,
        }
    }

    /// Whether the latch holds nothing at all.
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// What the next latch receives when this one does not pass a live entry
    /// on: a live entry or bubble becomes a bubble, an empty latch stays empty.
    pub const fn squashed<U>(&self) -> Slot<U> {
        match self {
            Self::Empty => Slot::Empty,
            _ => Slot::Bubble,
        }
    }
}

/// Entry in the IF/ID pipeline latch (Fetch to Decode stage).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IfIdEntry {
    /// Program counter of the instruction.
    pub pc: u32,
    /// Fetched instruction.
    pub inst: Instruction,
}

/// Entry in the ID/EX pipeline latch (Decode to Execute stage).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IdExEntry {
    /// Program counter of the instruction.
    pub pc: u32,
    /// Decoded instruction.
    pub inst: Instruction,
    /// First source register index.
    pub rs: usize,
    /// Second source register index.
    pub rt: usize,
    /// `rd` field.
    pub rd: usize,
    /// Destination register (`rd`, `rt` or `$ra`); 0 when nothing is written.
    pub dest: usize,
    /// Value read from `rs` in decode.
    pub rv1: i32,
    /// Value read from `rt` in decode.
    pub rv2: i32,
    /// Sign- or zero-extended immediate.
    pub imm: i32,
    /// Shift amount.
    pub shamt: u32,
    /// Control signals.
    pub ctrl: ControlSignals,
}

/// Entry in the EX/MEM pipeline latch (Execute to Memory stage).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExMemEntry {
    /// Program counter of the instruction.
    pub pc: u32,
    /// Decoded instruction.
    pub inst: Instruction,
    /// ALU result (effective address for loads and stores).
    pub alu: i32,
    /// Forwarded `rt` value, written to memory by stores.
    pub store_data: i32,
    /// Destination register.
    pub dest: usize,
    /// ALU zero flag.
    pub zero: bool,
    /// Whether a branch or `jr` redirected the PC.
    pub branch_taken: bool,
    /// Where operand A was taken from.
    pub forward_a: ForwardSrc,
    /// Where operand B was taken from.
    pub forward_b: ForwardSrc,
    /// Control signals.
    pub ctrl: ControlSignals,
}

/// Entry in the MEM/WB pipeline latch (Memory to Writeback stage).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemWbEntry {
    /// Program counter of the instruction.
    pub pc: u32,
    /// Decoded instruction.
    pub inst: Instruction,
    /// ALU result carried from execute.
    pub alu: i32,
    /// Value loaded from memory (0 for non-loads).
    pub mem_data: i32,
    /// Value written to the destination register: `mem_data` for loads, `alu` otherwise.
    pub write_data: i32,
    /// Destination register.
    pub dest: usize,
    /// Control signals.
    pub ctrl: ControlSignals,
}

/// IF/ID latch.
pub type IfId = Slot<IfIdEntry>;
/// ID/EX latch.
pub type IdEx = Slot<IdExEntry>;
/// EX/MEM latch.
pub type ExMem = Slot<ExMemEntry>;
/// MEM/WB latch.
pub type MemWb = Slot<MemWbEntry>;

/// The four inter-stage latches.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Latches {
    /// IF/ID latch.
    pub if_id: IfId,
    /// ID/EX latch.
    pub id_ex: IdEx,
    /// EX/MEM latch.
    pub ex_mem: ExMem,
    /// MEM/WB latch.
    pub mem_wb: MemWb,
}

impl Latches {
    /// Whether every latch is empty (bubbles count as occupied).
    pub const fn is_empty(&self) -> bool {
        self.if_id.is_empty() && self.id_ex.is_empty() && self.ex_mem.is_empty() && self.mem_wb.is_empty()
    }
}
