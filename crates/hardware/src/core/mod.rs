//! Core processor implementation.
//!
//! This module contains the processor model: architectural state, the
//! five-stage pipeline, and the execution units the stages call into.

/// Architectural register state.
pub mod arch;

/// Architectural state container (registers, PC, memories).
pub mod cpu;

/// Instruction pipeline implementation (stages, latches, hazards, forwarding, snapshots).
pub mod pipeline;

/// Execution units (ALU, branch resolution).
pub mod units;

pub use self::cpu::Cpu;
