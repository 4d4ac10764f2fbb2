//! Pipeline engine: one clock cycle of the five-stage pipeline.
//!
//! This module coordinates the stages and owns the latches. It performs:
//! 1. **Evaluation Order:** WB, MEM, EX, ID, IF. Every stage reads the latches as
//!    they were at the start of the cycle and the new latches are committed at
//!    the end, so the order only matters for shared state (the register file is
//!    written before decode reads it).
//! 2. **Stalls:** A load-use hazard holds the PC and IF/ID and sends a bubble to ID/EX.
//! 3. **Redirects:** A taken branch or `jr` in EX squashes ID and IF; a jump in
//!    ID squashes IF. The older redirect wins.
//! 4. **Bookkeeping:** Statistics, hazard reports, and the snapshot history.

use tracing::debug;

use crate::config::Config;
use crate::core::Cpu;
use crate::core::pipeline::forwarding::ForwardSrc;
use crate::core::pipeline::hazards::{Hazard, need_stall_load_use};
use crate::core::pipeline::latches::{IfIdEntry, Latches, Slot};
use crate::core::pipeline::snapshot::{CycleSnapshot, History, StageRecord, StageState};
use crate::core::pipeline::stages::{
    decode_stage, execute_stage, fetch_stage, mem_stage, wb_stage,
};
use crate::isa::disasm::disassemble;
use crate::stats::SimStats;

/// The five-stage pipeline: latches plus per-cycle bookkeeping.
#[derive(Clone, Debug)]
pub struct Pipeline {
    /// Inter-stage latches as of the end of the last cycle.
    pub latches: Latches,
    /// Performance counters.
    pub stats: SimStats,
    history: History,
    cycle: u64,
    trace_stages: bool,
}

impl Pipeline {
    /// Creates an empty pipeline.
    pub fn new(config: &Config) -> Self {
        Self {
            latches: Latches::default(),
            stats: SimStats::default(),
            history: History::new(config.pipeline.history_limit),
            cycle: 0,
            trace_stages: config.general.trace_stages,
        }
    }

    /// Number of cycles simulated since the last reset.
    pub const fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Snapshot history, oldest first.
    pub const fn history(&self) -> &History {
        &self.history
    }

    /// Empties every latch. History and statistics are kept.
    pub fn flush(&mut self) {
        self.latches = Latches::default();
    }

    /// Returns the pipeline to its power-on state.
    pub fn reset(&mut self) {
        self.flush();
        self.history.clear();
        self.stats = SimStats::default();
        self.cycle = 0;
    }

    /// Whether the pipeline holds nothing and there is nothing left to fetch.
    pub fn is_drained(&self, cpu: &Cpu) -> bool {
        self.latches.is_empty() && cpu.imem.fetch(cpu.pc).is_none()
    }

    /// Advances the pipeline by one clock cycle.
    pub fn tick(&mut self, cpu: &mut Cpu) {
        self.cycle += 1;
        self.stats.cycles += 1;
        let old = std::mem::take(&mut self.latches);
        let mut hazards = Vec::new();

        let stall = need_stall_load_use(&old.id_ex, &old.if_id);
        if stall {
            self.stats.stalls_load_use += 1;
            hazards.extend(Hazard::load_use(&old.id_ex, &old.if_id));
        }

        // WB
        let writeback = StageRecord::from_slot(&old.mem_wb);
        if let Some(wb) = old.mem_wb.valid() {
            wb_stage(cpu, wb);
            self.stats.record_retire(wb.inst.op);
        }

        // MEM
        let mem_wb = match &old.ex_mem {
            Slot::Valid(ex) => Slot::Valid(mem_stage(cpu, ex)),
            other => other.squashed(),
        };
        let memory = StageRecord::from_slot(&mem_wb);

        // EX
        let mut ex_redirect = None;
        let ex_mem = match &old.id_ex {
            Slot::Valid(id) => {
                let out = execute_stage(id, &old.ex_mem, &old.mem_wb);
                for src in [out.entry.forward_a, out.entry.forward_b] {
                    match src {
                        ForwardSrc::ExMem => self.stats.forwards_ex_mem += 1,
                        ForwardSrc::MemWb => self.stats.forwards_mem_wb += 1,
                        ForwardSrc::RegFile => {}
                    }
                }
                hazards.extend(Hazard::forwards(&out.entry, id.rs, id.rt));
                if out.entry.ctrl.branch {
                    if out.entry.branch_taken {
                        self.stats.branches_taken += 1;
                    } else {
                        self.stats.branches_not_taken += 1;
                    }
                }
                if let Some(target) = out.redirect {
                    hazards.push(Hazard::branch_taken(&out.entry, target));
                    ex_redirect = Some(target);
                }
                Slot::Valid(out.entry)
            }
            other => other.squashed(),
        };
        let execute = StageRecord::from_slot(&ex_mem);

        // ID
        let mut id_redirect = None;
        let (id_ex, decode) = match old.if_id.valid().map(|f| decode_stage(cpu, f)) {
            None => (old.if_id.squashed(), StageRecord::idle(&old.if_id)),
            Some(d) if stall => (Slot::Bubble, StageRecord::new(StageState::Stall, Some(d.entry))),
            Some(d) if ex_redirect.is_some() => {
                self.stats.flushed += 1;
                (Slot::Bubble, StageRecord::new(StageState::Flush, Some(d.entry)))
            }
            Some(d) => {
                if let Some(target) = d.jump {
                    self.stats.jumps += 1;
                    hazards.push(Hazard::jump(&disassemble(&d.entry.inst), target));
                    id_redirect = Some(target);
                }
                (Slot::Valid(d.entry), StageRecord::new(StageState::Instr, Some(d.entry)))
            }
        };

        // IF
        let redirect = ex_redirect.or(id_redirect);
        let (if_id, fetch) = if stall {
            let held = cpu
                .imem
                .fetch(cpu.pc)
                .map(|inst| IfIdEntry { pc: cpu.pc, inst });
            (old.if_id, StageRecord::new(StageState::Stall, held))
        } else {
            let fetched = fetch_stage(cpu);
            match (redirect, fetched) {
                (Some(target), Slot::Valid(squashed)) => {
                    cpu.pc = target;
                    self.stats.flushed += 1;
                    (Slot::Bubble, StageRecord::new(StageState::Flush, Some(squashed)))
                }
                (Some(target), _) => {
                    cpu.pc = target;
                    (Slot::Empty, StageRecord::empty())
                }
                (None, fetched) => {
                    let record = StageRecord::from_slot(&fetched);
                    (fetched, record)
                }
            }
        };

        self.latches = Latches {
            if_id,
            id_ex,
            ex_mem,
            mem_wb,
        };

        let snapshot = CycleSnapshot {
            cycle: self.cycle,
            fetch,
            decode,
            execute,
            memory,
            writeback,
            hazards,
        };
        if self.trace_stages {
            log_snapshot(&snapshot);
        }
        debug!(
            cycle = self.cycle,
            pc = cpu.pc,
            stall,
            redirect = ?redirect,
            "cycle complete"
        );
        self.history.push(snapshot);
    }
}

fn log_snapshot(s: &CycleSnapshot) {
    fn cell<T>(r: &StageRecord<T>, inst: impl Fn(&T) -> String) -> String {
        match (&r.state, &r.entry) {
            (StageState::Instr, Some(e)) => inst(e),
            (state, Some(e)) => format!("{state:?}({})", inst(e)),
            (state, None) => format!("{state:?}"),
        }
    }
    debug!(
        cycle = s.cycle,
        IF = %cell(&s.fetch, |e| disassemble(&e.inst)),
        ID = %cell(&s.decode, |e| disassemble(&e.inst)),
        EX = %cell(&s.execute, |e| disassemble(&e.inst)),
        MEM = %cell(&s.memory, |e| disassemble(&e.inst)),
        WB = %cell(&s.writeback, |e| disassemble(&e.inst)),
        "stages"
    );
}
