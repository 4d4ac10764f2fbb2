//! Simulation driver, program loading, and client-facing state.
//!
//! 1. **Loader:** Hex and assembly program loading into instruction memory.
//! 2. **Simulator:** The CPU and pipeline stepped together.
//! 3. **Programs:** Built-in demonstration programs.
//! 4. **State:** The serializable state view served to clients.

/// Program text parsing and installation.
pub mod loader;

/// Built-in demo programs.
pub mod programs;

/// Top-level simulator.
pub mod simulator;

/// JSON state view.
pub mod state;

pub use loader::{LoadReport, SourceFormat};
pub use simulator::{ResetOptions, Simulator};
pub use state::StateView;
