//! Data memory.

use tracing::warn;

use crate::common::constants::WORD_BYTES;

/// Zero-initialised data memory of 32-bit words.
///
/// Byte addresses are mapped to words with `addr >> 2`, so the low two bits of
/// an unaligned address are dropped. Reads outside memory return 0 and writes
/// outside memory are discarded; both are logged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataMemory {
    words: Vec<i32>,
}

impl DataMemory {
    /// Creates a zeroed data memory of `words` words.
    pub fn new(words: usize) -> Self {
        Self {
            words: vec![0; words],
        }
    }

    /// Size in bytes.
    pub fn size_bytes(&self) -> u32 {
        (self.words.len() as u32).saturating_mul(WORD_BYTES)
    }

    /// Loads the word containing byte address `addr`.
    pub fn load_word(&self, addr: u32) -> i32 {
        if let Some(v) = self.words.get((addr / WORD_BYTES) as usize) {
            *v
        } else {
            warn!(addr, "load outside data memory; returning 0");
            0
        }
    }

    /// Stores `value` into the word containing byte address `addr`.
    pub fn store_word(&mut self, addr: u32, value: i32) {
        if let Some(slot) = self.words.get_mut((addr / WORD_BYTES) as usize) {
            *slot = value;
        } else {
            warn!(addr, value, "store outside data memory ignored");
        }
    }

    /// Zeroes every word.
    pub fn clear(&mut self) {
        self.words.fill(0);
    }

    /// Iterates over all words as `(byte_addr, value)`.
    pub fn iter(&self) -> impl Iterator<Item = (u32, i32)> + '_ {
        self.words
            .iter()
            .enumerate()
            .map(|(i, v)| (i as u32 * WORD_BYTES, *v))
    }
}
