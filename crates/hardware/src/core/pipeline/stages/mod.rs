//! Pipeline stage implementations.
//!
//! This module contains the individual implementations for the five stages of the
//! instruction pipeline. It includes:
//! 1. **Fetch:** Retrieves the instruction at the PC and advances it.
//! 2. **Decode:** Generates control signals, reads operands, and resolves jumps.
//! 3. **Execute:** Applies forwarding, runs the ALU, and resolves branches.
//! 4. **Memory:** Handles data load and store operations.
//! 5. **Writeback:** Commits results to the register file.
//!
//! Each stage is a function of the latch it consumes. Stall, squash and
//! redirect decisions belong to the [`Pipeline`](super::Pipeline) engine.

/// Instruction decode stage implementation.
pub mod decode;

/// Instruction execute stage implementation.
pub mod execute;

/// Instruction fetch stage implementation.
pub mod fetch;

/// Memory access stage implementation.
pub mod memory;

/// Writeback stage implementation.
pub mod writeback;

/// Decode stage entry point (ID stage).
pub use decode::{DecodeOutput, decode_stage};
/// Execute stage entry point (EX stage).
pub use execute::{ExecuteOutput, execute_stage};
/// Fetch stage entry point (IF stage).
pub use fetch::fetch_stage;
/// Memory stage entry point (MEM stage).
pub use memory::mem_stage;
/// Writeback stage entry point (WB stage).
pub use writeback::wb_stage;
