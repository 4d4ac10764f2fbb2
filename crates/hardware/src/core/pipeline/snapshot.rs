//! Per-cycle pipeline snapshots.
//!
//! Every cycle the engine records what each stage did: which instruction it
//! worked on, and whether it was stalled, flushed, or carrying a bubble. The
//! snapshots form the pipeline timeline shown by front ends.

use std::collections::VecDeque;

use serde::Serialize;

use crate::core::pipeline::hazards::Hazard;
use crate::core::pipeline::latches::{ExMemEntry, IdExEntry, IfIdEntry, MemWbEntry, Slot};

/// What a stage did during one cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StageState {
    /// Processed a live instruction.
    Instr,
    /// Had nothing to process.
    Empty,
    /// Held its instruction because of a load-use stall.
    Stall,
    /// Carried a bubble.
    Bubble,
    /// Its instruction was squashed by a redirect this cycle.
    Flush,
}

/// One stage's activity in one cycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StageRecord<T> {
    /// Stage state.
    pub state: StageState,
    /// The latch entry the stage produced (or consumed, for writeback).
    /// Present for `Instr`, `Flush`, and usually `Stall`.
    pub entry: Option<T>,
}

impl<T> StageRecord<T> {
    /// A record with the given state and entry.
    pub const fn new(state: StageState, entry: Option<T>) -> Self {
        Self { state, entry }
    }

    /// Nothing to process.
    pub const fn empty() -> Self {
        Self::new(StageState::Empty, None)
    }

    /// A bubble passed through.
    pub const fn bubble() -> Self {
        Self::new(StageState::Bubble, None)
    }

    /// Record for a stage whose input latch held no live entry.
    pub const fn idle<U>(input: &Slot<U>) -> Self {
        if input.is_empty() {
            Self::empty()
        } else {
            Self::bubble()
        }
    }
}

impl<T: Clone> StageRecord<T> {
    /// Mirrors the contents of a latch: live entries are `Instr`.
    pub fn from_slot(slot: &Slot<T>) -> Self {
        match slot {
            Slot::Empty => Self::empty(),
            Slot::Bubble => Self::bubble(),
            Slot::Valid(entry) => Self::new(StageState::Instr, Some(entry.clone())),
        }
    }
}

/// All five stages in one cycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CycleSnapshot {
    /// 1-based cycle number.
    pub cycle: u64,
    /// Fetch.
    pub fetch: StageRecord<IfIdEntry>,
    /// Decode.
    pub decode: StageRecord<IdExEntry>,
    /// Execute.
    pub execute: StageRecord<ExMemEntry>,
    /// Memory access.
    pub memory: StageRecord<MemWbEntry>,
    /// Writeback.
    pub writeback: StageRecord<MemWbEntry>,
    /// Hazards observed this cycle.
    pub hazards: Vec<Hazard>,
}

/// Bounded snapshot history; the oldest cycle is evicted first.
#[derive(Clone, Debug, Default)]
pub struct History {
    limit: usize,
    entries: VecDeque<CycleSnapshot>,
}

impl History {
    /// Creates an empty history holding at most `limit` snapshots.
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            entries: VecDeque::with_capacity(limit.min(1024)),
        }
    }

    /// Appends a snapshot, evicting the oldest if full.
    pub fn push(&mut self, snapshot: CycleSnapshot) {
        if self.limit == 0 {
            return;
        }
        while self.entries.len() >= self.limit {
            let _ = self.entries.pop_front();
        }
        self.entries.push_back(snapshot);
    }

    /// Most recent snapshot.
    pub fn last(&self) -> Option<&CycleSnapshot> {
        self.entries.back()
    }

    /// Snapshots from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &CycleSnapshot> + '_ {
        self.entries.iter()
    }

    /// Number of retained snapshots.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no snapshot is retained.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every snapshot.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
