//! Instruction memory.

use crate::common::constants::WORD_BYTES;
use crate::isa::decode::Instruction;

/// Instruction memory holding decoded instructions.
///
/// Words are decoded once at load time, so fetch never fails on an illegal
/// encoding. Slots that were never loaded, and addresses beyond the end of
/// memory, fetch as `None`.
#[derive(Clone, Debug)]
pub struct InstructionMemory {
    slots: Vec<Option<Instruction>>,
}

impl InstructionMemory {
    /// Creates an empty instruction memory of `words` slots.
    pub fn new(words: usize) -> Self {
        Self {
            slots: vec![None; words],
        }
    }

    /// Number of word slots.
    pub fn words(&self) -> usize {
        self.slots.len()
    }

    /// Size in bytes.
    pub fn size_bytes(&self) -> u32 {
        (self.slots.len() as u32).saturating_mul(WORD_BYTES)
    }

    /// Whether `addr` is a word-aligned address inside memory.
    pub fn contains(&self, addr: u32) -> bool {
        addr % WORD_BYTES == 0 && ((addr / WORD_BYTES) as usize) < self.slots.len()
    }

    /// Fetches the instruction stored at byte address `addr`.
    pub fn fetch(&self, addr: u32) -> Option<Instruction> {
        if addr % WORD_BYTES != 0 {
            return None;
        }
        self.slots.get((addr / WORD_BYTES) as usize).copied().flatten()
    }

    /// Stores an instruction at `addr`.
    ///
    /// # Returns
    ///
    /// `false` when `addr` is unaligned or out of range, in which case nothing is stored.
    pub fn store(&mut self, addr: u32, inst: Instruction) -> bool {
        if addr % WORD_BYTES != 0 {
            return false;
        }
        match self.slots.get_mut((addr / WORD_BYTES) as usize) {
            Some(slot) => {
                *slot = Some(inst);
                true
            }
            None => false,
        }
    }

    /// Empties every slot.
    pub fn clear(&mut self) {
        self.slots.fill(None);
    }

    /// Iterates over loaded slots as `(byte_addr, instruction)`.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &Instruction)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|inst| (i as u32 * WORD_BYTES, inst)))
    }
}
