//! Memory system around the core.
//!
//! The pipeline uses a Harvard arrangement: instruction fetch and data access
//! go to separate word-addressed memories, so IF and MEM never contend.

/// Instruction and data memories.
pub mod memory;

pub use memory::{DataMemory, InstructionMemory};
