//! Simulator: owns both the CPU and the pipeline side-by-side.
//!
//! The pipeline borrows the CPU mutably for each cycle, so neither needs to
//! hold a reference to the other.

use tracing::info;

use crate::common::constants::WORD_BYTES;
use crate::common::error::LoadError;
use crate::config::Config;
use crate::core::Cpu;
use crate::core::pipeline::Pipeline;
use crate::sim::loader::{self, LoadReport, SourceFormat};
use crate::sim::state::{DataMemoryView, PipelineView, StateView, latch_view};
use crate::stats::SimStats;

/// Options for [`Simulator::reset`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResetOptions {
    /// Zero the register file.
    pub clear_regs: bool,
    /// Zero data memory.
    pub clear_mem: bool,
    /// PC after the reset.
    pub pc: u32,
}

/// Top-level simulator: CPU architectural state + pipeline.
#[derive(Clone, Debug)]
pub struct Simulator {
    /// CPU architectural state (registers, PC, memories).
    pub cpu: Cpu,
    /// Five-stage pipeline.
    pub pipeline: Pipeline,
    config: Config,
}

impl Simulator {
    /// Creates a new simulator with the given configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            cpu: Cpu::new(config),
            pipeline: Pipeline::new(config),
            config: config.clone(),
        }
    }

    /// Configuration the simulator was built with.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Performance counters.
    pub const fn stats(&self) -> &SimStats {
        &self.pipeline.stats
    }

    /// Cycles since the last reset.
    pub const fn cycle(&self) -> u64 {
        self.pipeline.cycle()
    }

    /// Advances the simulator by one clock cycle.
    pub fn step(&mut self) {
        self.pipeline.tick(&mut self.cpu);
    }

    /// Advances the simulator by `cycles` clock cycles.
    pub fn run(&mut self, cycles: u64) {
        for _ in 0..cycles {
            self.step();
        }
    }

    /// Runs until the pipeline has drained or `max_cycles` have elapsed.
    ///
    /// # Returns
    ///
    /// The number of cycles run.
    pub fn run_until_drained(&mut self, max_cycles: u64) -> u64 {
        let mut ran = 0;
        while ran < max_cycles && !self.pipeline.is_drained(&self.cpu) {
            self.step();
            ran += 1;
        }
        ran
    }

    /// Whether the pipeline is empty and nothing is left to fetch.
    pub fn is_drained(&self) -> bool {
        self.pipeline.is_drained(&self.cpu)
    }

    /// Replaces the program with `text` and restarts the pipeline at `start`.
    ///
    /// Registers, data memory, history, and statistics are kept. On error the
    /// simulator is unchanged.
    pub fn load(
        &mut self,
        text: &str,
        start: u32,
        format: SourceFormat,
    ) -> Result<LoadReport, LoadError> {
        let report = loader::load_text(&mut self.cpu, text, start, format)?;
        self.pipeline.flush();
        Ok(report)
    }

    /// Replaces the program with machine words and restarts the pipeline at `start`.
    pub fn load_words(&mut self, words: &[u32], start: u32) -> Result<LoadReport, LoadError> {
        let report = loader::load_words(&mut self.cpu, words, start)?;
        self.pipeline.flush();
        Ok(report)
    }

    /// Clears the program, the pipeline, history, and statistics.
    ///
    /// Registers and data memory are cleared only when requested.
    ///
    /// # Errors
    ///
    /// Returns an error if `options.pc` is not word-aligned; nothing is reset then.
    pub fn reset(&mut self, options: ResetOptions) -> Result<(), LoadError> {
        if options.pc % WORD_BYTES != 0 {
            return Err(LoadError::UnalignedStart(options.pc));
        }
        self.cpu
            .reset(options.clear_regs, options.clear_mem, options.pc);
        self.pipeline.reset();
        info!(
            clear_regs = options.clear_regs,
            clear_mem = options.clear_mem,
            pc = options.pc,
            "simulator reset"
        );
        Ok(())
    }

    /// Captures the complete state for clients.
    pub fn state(&self) -> StateView {
        let latches = &self.pipeline.latches;
        let history = self.pipeline.history();
        StateView {
            cycle: self.cycle(),
            pc: self.cpu.pc,
            registers: self.cpu.regs.snapshot(),
            pipeline: PipelineView {
                if_id: latch_view(&latches.if_id),
                id_ex: latch_view(&latches.id_ex),
                ex_mem: latch_view(&latches.ex_mem),
                mem_wb: latch_view(&latches.mem_wb),
            },
            data_memory: DataMemoryView(self.cpu.dmem.iter().collect()),
            pipeline_history: history.iter().map(Into::into).collect(),
            hazards: history
                .last()
                .map(|s| s.hazards.clone())
                .unwrap_or_default(),
            stats: self.stats().clone(),
        }
    }
}
