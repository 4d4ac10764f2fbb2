//! Global Simulator Constants.
//!
//! This module defines machine-wide constants. It includes:
//! 1. **Word Constants:** Instruction and data word width.
//! 2. **Register Constants:** Size of the general-purpose register file.
//! 3. **Memory Constants:** Default instruction and data memory geometry.

/// Size of an instruction or data word in bytes.
pub const WORD_BYTES: u32 = 4;

/// Number of general-purpose registers (`$0`-`$31`).
pub const NUM_REGS: usize = 32;

/// Default number of instruction memory words (4 KiB).
pub const DEFAULT_INSTRUCTION_WORDS: usize = 1024;

/// Default number of data memory words (4 KiB).
pub const DEFAULT_DATA_WORDS: usize = 1024;

/// Default number of cycle snapshots retained in the pipeline history.
pub const DEFAULT_HISTORY_LIMIT: usize = 10_000;

/// Default cap on the cycles a single step request may run.
pub const DEFAULT_MAX_STEP_CYCLES: u64 = 100_000;
