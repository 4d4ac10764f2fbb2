//! MIPS architectural state.
//!
//! 1. **GPRs:** The 32-entry general-purpose register file with `$zero` hardwired.

/// General-Purpose Register file implementation.
pub mod gpr;
