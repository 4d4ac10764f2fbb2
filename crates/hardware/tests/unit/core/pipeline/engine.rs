//! Pipeline Engine Timeline Tests.
//!
//! Verifies the per-cycle stage records: where stalls hold instructions,
//! which instructions are flushed by redirects, and how bubbles travel
//! through the later stages.

use mipsim_core::config::Config;
use mipsim_core::core::pipeline::forwarding::ForwardSrc;
use mipsim_core::core::pipeline::hazards::HazardKind;
use mipsim_core::core::pipeline::latches::Slot;
use mipsim_core::core::pipeline::snapshot::StageState;
use mipsim_core::isa::abi::REG_T0;
use pretty_assertions::assert_eq;

use crate::common::TestContext;
use crate::common::builder::instruction::*;

const T0: u32 = REG_T0 as u32;
const T1: u32 = T0 + 1;
const T2: u32 = T0 + 2;

fn states(ctx: &TestContext, cycle: u64) -> [StageState; 5] {
    let s = ctx.snapshot(cycle);
    [
        s.fetch.state,
        s.decode.state,
        s.execute.state,
        s.memory.state,
        s.writeback.state,
    ]
}

#[test]
fn straight_line_fills_and_drains() {
    let mut ctx = TestContext::new().load_program(0, &[addi(T0, 0, 1), addi(T1, 0, 2)]);
    ctx.run(6);

    use StageState::{Empty, Instr};
    assert_eq!(states(&ctx, 1), [Instr, Empty, Empty, Empty, Empty]);
    assert_eq!(states(&ctx, 2), [Instr, Instr, Empty, Empty, Empty]);
    assert_eq!(states(&ctx, 3), [Empty, Instr, Instr, Empty, Empty]);
    assert_eq!(states(&ctx, 6), [Empty, Empty, Empty, Empty, Instr]);
    assert!(ctx.sim.is_drained());
    assert_eq!(ctx.stats().instructions_retired, 2);
    assert_eq!(ctx.get_reg(T1 as usize), 2);
}

#[test]
fn load_use_stalls_one_cycle() {
    let mut ctx = TestContext::new().load_program(0, &[lw(T1, 0, 0), add(T2, T1, T1)]);
    ctx.cpu_mut().dmem.store_word(0, 21);
    ctx.run(7);

    let stall = ctx.snapshot(3);
    assert_eq!(stall.fetch.state, StageState::Stall);
    assert_eq!(stall.decode.state, StageState::Stall);
    assert_eq!(stall.decode.entry.map(|e| e.pc), Some(4));
    assert_eq!(stall.execute.state, StageState::Instr);
    assert!(stall.hazards.iter().any(|h| h.kind == HazardKind::Stall));

    let after = ctx.snapshot(4);
    assert_eq!(after.decode.state, StageState::Instr);
    assert_eq!(after.execute.state, StageState::Bubble);

    let forwarded = ctx.snapshot(5).execute.entry.expect("add in EX");
    assert_eq!(forwarded.forward_a, ForwardSrc::MemWb);
    assert_eq!(forwarded.forward_b, ForwardSrc::MemWb);
    assert_eq!(forwarded.alu, 42);

    assert_eq!(ctx.get_reg(T2 as usize), 42);
    assert_eq!(ctx.stats().stalls_load_use, 1);
    assert_eq!(ctx.stats().forwards_mem_wb, 2);
    assert_eq!(ctx.sim.cycle(), 7);
    assert!(ctx.sim.is_drained());
}

#[test]
fn stall_holds_pc_and_fetch_latch() {
    let mut ctx = TestContext::new().load_program(
        0,
        &[lw(T1, 0, 0), add(T2, T1, 0), addi(T0, 0, 5)],
    );
    ctx.run(2);
    assert_eq!(ctx.cpu().pc, 8);
    ctx.run(1);
    assert_eq!(ctx.cpu().pc, 8, "PC held during the stall");
    let stall = ctx.snapshot(3);
    assert_eq!(stall.fetch.entry.map(|e| e.pc), Some(8));
    assert!(matches!(&ctx.sim.pipeline.latches.if_id, Slot::Valid(e) if e.pc == 4));
    assert!(matches!(ctx.sim.pipeline.latches.id_ex, Slot::Bubble));
}

#[test]
fn taken_branch_flushes_two() {
    let mut ctx = TestContext::new().load_program(
        0,
        &[beq(0, 0, 2), addi(T0, 0, 1), addi(T1, 0, 1), addi(T2, 0, 1)],
    );
    ctx.run(8);

    let resolve = ctx.snapshot(3);
    assert_eq!(resolve.execute.state, StageState::Instr);
    assert!(resolve.execute.entry.is_some_and(|e| e.branch_taken));
    assert_eq!(resolve.decode.state, StageState::Flush);
    assert_eq!(resolve.fetch.state, StageState::Flush);
    assert_eq!(resolve.fetch.entry.map(|e| e.pc), Some(8));
    assert!(resolve.hazards.iter().any(|h| h.kind == HazardKind::Control));

    let next = ctx.snapshot(4);
    assert_eq!(next.fetch.entry.map(|e| e.pc), Some(12));
    assert_eq!(next.decode.state, StageState::Bubble);
    assert_eq!(next.execute.state, StageState::Bubble);

    assert_eq!(ctx.get_reg(T0 as usize), 0);
    assert_eq!(ctx.get_reg(T1 as usize), 0);
    assert_eq!(ctx.get_reg(T2 as usize), 1);
    assert_eq!(ctx.stats().flushed, 2);
    assert_eq!(ctx.stats().branches_taken, 1);
}

#[test]
fn jump_flushes_one() {
    let mut ctx = TestContext::new().load_program(
        0,
        &[j(12), addi(T0, 0, 1), addi(T1, 0, 1), addi(T2, 0, 1)],
    );
    ctx.run(7);

    let resolve = ctx.snapshot(2);
    assert_eq!(resolve.decode.state, StageState::Instr);
    assert_eq!(resolve.fetch.state, StageState::Flush);
    assert_eq!(resolve.fetch.entry.map(|e| e.pc), Some(4));
    assert_eq!(ctx.snapshot(3).fetch.entry.map(|e| e.pc), Some(12));
    assert_eq!(ctx.snapshot(3).decode.state, StageState::Bubble);

    assert_eq!(ctx.get_reg(T0 as usize), 0);
    assert_eq!(ctx.get_reg(T2 as usize), 1);
    assert_eq!(ctx.stats().jumps, 1);
    assert_eq!(ctx.stats().flushed, 1);
}

#[test]
fn branch_redirect_wins_over_younger_jump() {
    // beq resolves in EX in the same cycle the j at 4 sits in ID.
    let mut ctx = TestContext::new().load_program(
        0,
        &[beq(0, 0, 2), j(20), addi(T0, 0, 1), addi(T1, 0, 7), NOP, addi(T2, 0, 9)],
    );
    ctx.run(6);
    assert_eq!(ctx.snapshot(3).decode.state, StageState::Flush);
    assert_eq!(ctx.snapshot(4).fetch.entry.map(|e| e.pc), Some(12));
    assert_eq!(ctx.stats().jumps, 0);
    assert_eq!(ctx.stats().flushed, 2);
    assert_eq!(ctx.get_reg(T0 as usize), 0);
}

#[test]
fn jr_returns_to_link_address() {
    let mut ctx = TestContext::new().load_program(
        0,
        &[jal(12), addi(T1, 0, 5), j(24), addi(T0, 0, 3), jr(31), NOP, NOP],
    );
    ctx.run(16);
    assert_eq!(ctx.get_reg(31), 4);
    assert_eq!(ctx.get_reg(T0 as usize), 3);
    assert_eq!(ctx.get_reg(T1 as usize), 5);
}

#[test]
fn squashed_store_never_writes_memory() {
    let mut ctx = TestContext::new().load_program(
        0,
        &[addi(T0, 0, 9), beq(0, 0, 1), sw(T0, 0, 0), addi(T1, 0, 1)],
    );
    let _ = ctx.run_to_completion(20);
    assert_eq!(ctx.mem(0), 0);
    assert_eq!(ctx.get_reg(T1 as usize), 1);
}

#[test]
fn reset_clears_pipeline_and_history() {
    let mut ctx = TestContext::new().load_program(0, &[addi(T0, 0, 1), addi(T1, 0, 2)]);
    ctx.run(3);
    assert!(!ctx.sim.pipeline.latches.is_empty());

    ctx.sim.reset(Default::default()).expect("aligned pc");
    assert_eq!(ctx.sim.cycle(), 0);
    assert!(ctx.sim.pipeline.history().is_empty());
    assert!(ctx.sim.pipeline.latches.is_empty());
    assert_eq!(ctx.stats().cycles, 0);
    assert!(ctx.sim.is_drained());
}

#[test]
fn history_is_bounded() {
    let mut config = Config::default();
    config.pipeline.history_limit = 3;
    let mut ctx = TestContext::with_config(&config).load_program(0, &[addi(T0, 0, 1)]);
    ctx.run(10);

    let cycles: Vec<u64> = ctx.sim.pipeline.history().iter().map(|s| s.cycle).collect();
    assert_eq!(cycles, vec![8, 9, 10]);
}

#[test]
fn empty_memory_runs_without_panicking() {
    let mut ctx = TestContext::new();
    ctx.run(5);
    assert_eq!(ctx.sim.cycle(), 5);
    assert_eq!(ctx.cpu().pc, 20);
    assert_eq!(ctx.stats().instructions_retired, 0);
}
