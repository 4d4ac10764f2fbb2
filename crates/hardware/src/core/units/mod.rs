//! Execution units and functional components.
//!
//! This module contains the combinational units the execute stage calls into:
//! the integer ALU and the branch resolution unit.

/// Arithmetic Logic Unit for integer operations.
pub mod alu;

/// Branch Resolution Unit for conditional branches and register jumps.
pub mod bru;
