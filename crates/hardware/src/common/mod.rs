//! Common types and constants shared across the MIPS pipeline simulator.
//!
//! This module provides the building blocks used by every other component:
//! 1. **Constants:** Word size, register count, and default memory geometry.
//! 2. **Error Handling:** Decode, assembly, load, and configuration errors.

/// Common constants used throughout the simulator.
pub mod constants;

/// Error types for decoding, assembling, loading, and configuration.
pub mod error;

pub use constants::{NUM_REGS, WORD_BYTES};
pub use error::{AsmError, AsmErrorKind, ConfigError, DecodeError, LoadError, SimError};
