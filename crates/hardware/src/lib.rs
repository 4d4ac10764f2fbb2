//! MIPS five-stage pipeline simulator library.
//!
//! This crate implements a cycle-level model of the classic MIPS32 integer pipeline:
//! 1. **Core:** Pipeline (fetch, decode, execute, memory, writeback) with forwarding,
//!    load-use stalls, and branch/jump flushes over a 32-entry register file.
//! 2. **Memory:** Separate word-addressed instruction and data memories.
//! 3. **ISA:** Decoding, disassembly, and a two-pass assembler for the supported subset.
//! 4. **Simulation:** Loader, configuration, per-cycle snapshots, statistics, and
//!    the JSON state view consumed by front ends.

/// Common types and constants (word size, register count, errors).
pub mod common;
/// Simulator configuration (defaults and hierarchical config structures).
pub mod config;
/// CPU core (architectural state, pipeline, execution units).
pub mod core;
/// Instruction set (encoding, decode, ABI names, disassembler, assembler).
pub mod isa;
/// Program loading, the simulator driver, demos, and state views.
pub mod sim;
/// Instruction and data memories.
pub mod soc;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Architectural state: registers, PC, and memories.
pub use crate::core::Cpu;
/// Top-level simulator; construct with `Simulator::new`.
pub use crate::sim::Simulator;
