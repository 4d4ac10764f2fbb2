//! Word-addressed memories.
//!
//! 1. **Instruction memory:** Holds pre-decoded instructions; empty slots fetch nothing.
//! 2. **Data memory:** Zero-initialised `i32` words accessed by `lw`/`sw`.
//!
//! Both are addressed in bytes and indexed by `addr >> 2`.

/// Data memory.
pub mod data;

/// Instruction memory.
pub mod instruction;

pub use data::DataMemory;
pub use instruction::InstructionMemory;
