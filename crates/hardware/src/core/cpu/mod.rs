//! CPU Architectural State.
//!
//! This module defines the `Cpu` structure, the container for everything an
//! instruction can observe or modify:
//! 1. **Registers:** The general-purpose register file.
//! 2. **Program Counter:** Address of the next instruction to fetch.
//! 3. **Memories:** Separate instruction and data memories.
//!
//! Pipeline latches live in [`Pipeline`](crate::core::pipeline::Pipeline), which
//! borrows the `Cpu` mutably for the duration of each cycle.

use crate::config::Config;
use crate::core::arch::gpr::Gpr;
use crate::soc::{DataMemory, InstructionMemory};

/// Processor architectural state.
#[derive(Clone, Debug)]
pub struct Cpu {
    /// General-purpose registers.
    pub regs: Gpr,
    /// Program counter (byte address of the next fetch).
    pub pc: u32,
    /// Instruction memory.
    pub imem: InstructionMemory,
    /// Data memory.
    pub dmem: DataMemory,
}

impl Cpu {
    /// Creates a CPU sized and initialised from `config`.
    pub fn new(config: &Config) -> Self {
        Self {
            regs: Gpr::new(),
            pc: config.general.start_pc,
            imem: InstructionMemory::new(config.memory.instruction_words),
            dmem: DataMemory::new(config.memory.data_words),
        }
    }

    /// Clears architectural state.
    ///
    /// Instruction memory is always emptied and the PC set to `pc`; registers
    /// and data memory are zeroed only when requested.
    pub fn reset(&mut self, clear_regs: bool, clear_mem: bool, pc: u32) {
        self.imem.clear();
        if clear_regs {
            self.regs.clear();
        }
        if clear_mem {
            self.dmem.clear();
        }
        self.pc = pc;
    }
}
