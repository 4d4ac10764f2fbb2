//! Instruction pipeline implementation.
//!
//! This module contains the implementation of the five-stage instruction pipeline.
//! It includes the following components:
//! 1. **Engine:** Per-cycle orchestration of stalls, squashes, and redirects.
//! 2. **Hazards:** Load-use detection and per-cycle hazard reports.
//! 3. **Forwarding:** Operand bypass from EX/MEM and MEM/WB.
//! 4. **Latches:** Inter-stage buffers for communication between pipeline stages.
//! 5. **Signals:** Control signals generated during instruction decoding.
//! 6. **Stages:** Implementation of Fetch, Decode, Execute, Memory, and Writeback stages.
//! 7. **Snapshots:** The per-cycle stage timeline.

/// Cycle engine owning the latches.
pub mod engine;

/// Operand forwarding unit.
pub mod forwarding;

/// Pipeline hazard detection and reporting.
pub mod hazards;

/// Inter-stage pipeline latches (IF/ID, ID/EX, EX/MEM, MEM/WB).
pub mod latches;

/// Control signals generated during instruction decode.
pub mod signals;

/// Per-cycle stage snapshots and bounded history.
pub mod snapshot;

/// Pipeline stage implementations (fetch, decode, execute, memory, writeback).
pub mod stages;

pub use engine::Pipeline;
