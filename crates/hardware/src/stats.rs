//! Simulation statistics collection and reporting.
//!
//! This module tracks performance metrics for the pipeline. It provides:
//! 1. **Cycle and CPI:** Total cycles, retired instructions, and derived CPI.
//! 2. **Instruction mix:** Counts by category (ALU, load, store, branch, jump).
//! 3. **Control flow:** Branches taken and not taken, jumps, and squashed instructions.
//! 4. **Data hazards:** Load-use stall cycles and forwards from each latch.

use std::fmt::Write as _;

use serde::Serialize;

use crate::isa::decode::Op;

/// Simulation statistics structure tracking all performance metrics.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimStats {
    /// Total simulated cycles.
    pub cycles: u64,
    /// Instructions that completed writeback.
    pub instructions_retired: u64,

    /// Retired ALU instructions (R-type arithmetic, shifts, immediates).
    pub inst_alu: u64,
    /// Retired loads.
    pub inst_load: u64,
    /// Retired stores.
    pub inst_store: u64,
    /// Retired conditional branches.
    pub inst_branch: u64,
    /// Retired jumps (`j`, `jal`, `jr`).
    pub inst_jump: u64,

    /// Conditional branches resolved taken.
    pub branches_taken: u64,
    /// Conditional branches resolved not taken.
    pub branches_not_taken: u64,
    /// Jumps redirected in decode.
    pub jumps: u64,
    /// Live instructions discarded by a redirect.
    pub flushed: u64,

    /// Cycles lost to load-use stalls.
    pub stalls_load_use: u64,
    /// Operands forwarded from EX/MEM.
    pub forwards_ex_mem: u64,
    /// Operands forwarded from MEM/WB.
    pub forwards_mem_wb: u64,
}

impl SimStats {
    /// Counts an instruction leaving writeback.
    pub fn record_retire(&mut self, op: Op) {
        self.instructions_retired += 1;
        match op {
            Op::Lw => self.inst_load += 1,
            Op::Sw => self.inst_store += 1,
            Op::Beq | Op::Bne => self.inst_branch += 1,
            Op::J | Op::Jal | Op::Jr => self.inst_jump += 1,
            _ => self.inst_alu += 1,
        }
    }

    /// Cycles per retired instruction; 0 before anything retires.
    pub fn cpi(&self) -> f64 {
        if self.instructions_retired == 0 {
            0.0
        } else {
            self.cycles as f64 / self.instructions_retired as f64
        }
    }

    /// Renders the selected report sections. An empty slice selects all of them.
    ///
    /// Sections: `summary`, `mix`, `control`, `hazards`.
    pub fn report_sections(&self, sections: &[&str]) -> String {
        let want = |s: &str| sections.is_empty() || sections.contains(&s);
        let pct = |n: u64| {
            if self.instructions_retired == 0 {
                0.0
            } else {
                n as f64 * 100.0 / self.instructions_retired as f64
            }
        };
        let mut out = String::new();

        if want("summary") {
            let _ = writeln!(out, "==========================================================");
            let _ = writeln!(out, "MIPS PIPELINE SIMULATION STATISTICS");
            let _ = writeln!(out, "==========================================================");
            let _ = writeln!(out, "sim_cycles               {}", self.cycles);
            let _ = writeln!(out, "sim_insts                {}", self.instructions_retired);
            let _ = writeln!(out, "sim_cpi                  {:.4}", self.cpi());
            let _ = writeln!(out, "----------------------------------------------------------");
        }
        if want("mix") {
            let _ = writeln!(out, "INSTRUCTION MIX");
            for (name, n) in [
                ("alu", self.inst_alu),
                ("load", self.inst_load),
                ("store", self.inst_store),
                ("branch", self.inst_branch),
                ("jump", self.inst_jump),
            ] {
                let _ = writeln!(out, "  {name:<22} {n:>8} ({:>5.1}%)", pct(n));
            }
            let _ = writeln!(out, "----------------------------------------------------------");
        }
        if want("control") {
            let _ = writeln!(out, "CONTROL FLOW");
            let _ = writeln!(out, "  branches.taken         {:>8}", self.branches_taken);
            let _ = writeln!(out, "  branches.not_taken     {:>8}", self.branches_not_taken);
            let _ = writeln!(out, "  jumps                  {:>8}", self.jumps);
            let _ = writeln!(out, "  flushed                {:>8}", self.flushed);
            let _ = writeln!(out, "----------------------------------------------------------");
        }
        if want("hazards") {
            let _ = writeln!(out, "DATA HAZARDS");
            let _ = writeln!(out, "  stalls.load_use        {:>8}", self.stalls_load_use);
            let _ = writeln!(out, "  forwards.ex_mem        {:>8}", self.forwards_ex_mem);
            let _ = writeln!(out, "  forwards.mem_wb        {:>8}", self.forwards_mem_wb);
            let _ = writeln!(out, "==========================================================");
        }
        out
    }

    /// Prints the full report to stdout.
    pub fn print(&self) {
        print!("{}", self.report_sections(&[]));
    }
}
