//! MIPS General-Purpose Register File.
//!
//! This module implements the 32 x 32-bit register file. It performs the following:
//! 1. **Storage:** Maintains `$0`-`$31` as signed 32-bit words.
//! 2. **Invariant Enforcement:** Ensures that `$zero` always reads as zero.
//! 3. **Debugging:** Provides a copy of the whole file and a formatted dump.

use crate::common::constants::NUM_REGS;
use crate::isa::abi::{REG_ZERO, reg_name};

/// General-Purpose Register file.
///
/// Register `$zero` is hardwired to zero; writes to it are discarded.
/// Out-of-range indices read as zero and ignore writes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Gpr {
    regs: [i32; NUM_REGS],
}

impl Gpr {
    /// Creates a register file with every register set to zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31).
    ///
    /// # Returns
    ///
    /// The stored value; `$zero` and out-of-range indices return 0.
    #[inline]
    pub fn read(&self, idx: usize) -> i32 {
        if idx == REG_ZERO {
            0
        } else {
            self.regs.get(idx).copied().unwrap_or(0)
        }
    }

    /// Writes a register. Writes to `$zero` or out-of-range indices are ignored.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31).
    /// * `val` - The value to store.
    #[inline]
    pub fn write(&mut self, idx: usize, val: i32) {
        if idx != REG_ZERO {
            if let Some(slot) = self.regs.get_mut(idx) {
                *slot = val;
            }
        }
    }

    /// Returns a copy of all 32 registers.
    pub const fn snapshot(&self) -> [i32; NUM_REGS] {
        self.regs
    }

    /// Resets every register to zero.
    pub fn clear(&mut self) {
        self.regs = [0; NUM_REGS];
    }

    /// Formats the register file four registers per line, for CLI output.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for (row, chunk) in self.regs.chunks(4).enumerate() {
            let line: Vec<String> = chunk
                .iter()
                .enumerate()
                .map(|(i, v)| format!("{:>5}={v:<11}", reg_name(row * 4 + i)))
                .collect();
            out.push_str(line.join(" ").trim_end());
            out.push('\n');
        }
        out
    }
}
