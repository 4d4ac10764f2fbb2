//! Whole-Program Pipeline Tests.
//!
//! Each program is assembled, loaded at address 0, and run for a fixed cycle
//! budget. The budgets are tight: a program of N instructions needs N + 4
//! cycles, plus one per load-use stall, two per taken branch, and one per jump.

use crate::common::TestContext;

fn run(source: &str, cycles: u64) -> TestContext {
    let mut ctx = TestContext::new().load_asm(source);
    ctx.run(cycles);
    ctx
}

#[test]
fn basic_arithmetic() {
    let ctx = run(
        "addi $t0, $zero, 10
         addi $t1, $zero, 5
         add  $t0, $t0, $t1
         sub  $t1, $t0, $t0",
        8,
    );
    assert_eq!(ctx.reg("$t0"), 15);
    assert_eq!(ctx.reg("$t1"), 0);
}

#[test]
fn raw_hazard_forwarded() {
    let ctx = run(
        "addi $t1, $zero, 10
         addi $t2, $zero, 10
         add  $t0, $t1, $t2
         add  $t3, $t0, $zero",
        8,
    );
    assert_eq!(ctx.reg("$t0"), 20);
    assert_eq!(ctx.reg("$t1"), 10);
    assert_eq!(ctx.reg("$t2"), 10);
    assert_eq!(ctx.reg("$t3"), 20);
}

#[test]
fn load_use_hazard() {
    let ctx = run(
        "addi $t0, $zero, 42
         sw   $t0, 0($zero)
         lw   $t1, 0($zero)
         add  $t2, $t1, $zero",
        10,
    );
    assert_eq!(ctx.reg("$t2"), 42);
    assert_eq!(ctx.mem(0), 42);
    assert_eq!(ctx.stats().stalls_load_use, 1);
}

#[test]
fn memory_operations() {
    let ctx = run(
        "addi $t0, $zero, 100
         addi $t1, $zero, 200
         sw   $t0, 0($zero)
         sw   $t1, 4($zero)
         lw   $t2, 0($zero)
         lw   $t3, 4($zero)",
        10,
    );
    assert_eq!(ctx.mem(0), 100);
    assert_eq!(ctx.mem(4), 200);
    assert_eq!(ctx.reg("$t2"), 100);
    assert_eq!(ctx.reg("$t3"), 200);
}

#[test]
fn beq_taken() {
    let ctx = run(
        "addi $t0, $zero, 5
         addi $t1, $zero, 5
         beq  $t0, $t1, target
         addi $t0, $zero, 88
         target:
         addi $t0, $zero, 99",
        10,
    );
    assert_eq!(ctx.reg("$t0"), 99);
    assert_eq!(ctx.stats().branches_taken, 1);
}

#[test]
fn beq_not_taken() {
    let ctx = run(
        "addi $t0, $zero, 5
         addi $t1, $zero, 6
         beq  $t0, $t1, target
         addi $t2, $zero, 77
         target:
         addi $t2, $zero, 88",
        10,
    );
    assert_eq!(ctx.reg("$t2"), 88);
    assert_eq!(ctx.stats().branches_not_taken, 1);
    assert_eq!(ctx.stats().flushed, 0);
}

#[test]
fn bne_taken() {
    let ctx = run(
        "addi $t0, $zero, 5
         addi $t1, $zero, 6
         bne  $t0, $t1, target
         addi $t3, $zero, 99
         target:
         addi $t3, $zero, 111",
        10,
    );
    assert_eq!(ctx.reg("$t3"), 111);
}

#[test]
fn logical_operations() {
    let ctx = run(
        "addi $t0, $zero, 15
         addi $t1, $zero, 240
         and  $t2, $t0, $t1
         or   $t3, $t0, $t1
         xor  $t4, $t0, $t0
         nor  $t5, $zero, $zero",
        10,
    );
    assert_eq!(ctx.reg("$t2"), 0);
    assert_eq!(ctx.reg("$t3"), 255);
    assert_eq!(ctx.reg("$t4"), 0);
    assert_eq!(ctx.reg("$t5"), -1);
}

#[test]
fn set_less_than() {
    let ctx = run(
        "addi $t0, $zero, 5
         addi $t1, $zero, 10
         slt  $t2, $t0, $t1
         slt  $t3, $t1, $t0",
        8,
    );
    assert_eq!(ctx.reg("$t2"), 1);
    assert_eq!(ctx.reg("$t3"), 0);
}

#[test]
fn zero_register_is_immutable() {
    let ctx = run(
        "addi $zero, $zero, 100
         add  $t0, $zero, $zero",
        6,
    );
    assert_eq!(ctx.reg("$zero"), 0);
    assert_eq!(ctx.reg("$t0"), 0);
}

#[test]
fn negative_numbers() {
    let ctx = run(
        "addi $t0, $zero, -1
         addi $t1, $zero, -10
         add  $t2, $t0, $t1",
        7,
    );
    assert_eq!(ctx.reg("$t0"), -1);
    assert_eq!(ctx.reg("$t1"), -10);
    assert_eq!(ctx.reg("$t2"), -11);
}

#[test]
fn large_immediate_sums() {
    let ctx = run(
        "addi $t0, $zero, 32767
         addi $t0, $t0, 32767
         addi $t0, $t0, 2",
        7,
    );
    assert_eq!(ctx.reg("$t0"), 32767 + 32767 + 2);
}

#[test]
fn sequential_stores() {
    let ctx = run(
        "addi $t0, $zero, 10
         addi $t1, $zero, 20
         addi $t2, $zero, 30
         addi $t3, $zero, 40
         addi $t4, $zero, 50
         sw   $t0, 0($zero)
         sw   $t1, 4($zero)
         sw   $t2, 8($zero)
         sw   $t3, 12($zero)
         sw   $t4, 16($zero)",
        14,
    );
    for (addr, value) in [(0, 10), (4, 20), (8, 30), (12, 40), (16, 50)] {
        assert_eq!(ctx.mem(addr), value, "mem[{addr}]");
    }
}

#[test]
fn loop_counter() {
    let ctx = run(
        "addi $t0, $zero, 0
         addi $t1, $zero, 5
         loop_start:
         addi $t0, $t0, 1
         slt  $t2, $t0, $t1
         bne  $t2, $zero, loop_start",
        30,
    );
    assert_eq!(ctx.reg("$t0"), 5);
}

#[test]
fn fibonacci_to_memory() {
    let ctx = run(
        "addi $t0, $zero, 0
         addi $t1, $zero, 1
         sw   $t0, 100($zero)
         sw   $t1, 104($zero)
         add  $t2, $t0, $t1
         sw   $t2, 108($zero)
         add  $t0, $t1, $t2
         sw   $t0, 112($zero)
         add  $t1, $t2, $t0
         sw   $t1, 116($zero)",
        15,
    );
    for (addr, value) in [(100, 0), (104, 1), (108, 1), (112, 2), (116, 3)] {
        assert_eq!(ctx.mem(addr), value, "mem[{addr}]");
    }
}

#[test]
fn offset_addressing() {
    let ctx = run(
        "addi $t0, $zero, 100
         addi $t1, $zero, 77
         sw   $t1, 0($t0)
         sw   $t1, 4($t0)
         sw   $t1, -4($t0)",
        9,
    );
    assert_eq!(ctx.mem(100), 77);
    assert_eq!(ctx.mem(104), 77);
    assert_eq!(ctx.mem(96), 77);
}

#[test]
fn chained_dependencies() {
    let ctx = run(
        "addi $t0, $zero, 10
         add  $t1, $t0, $t0
         add  $t2, $t1, $t1
         add  $t3, $t2, $t2",
        10,
    );
    assert_eq!(ctx.reg("$t1"), 20);
    assert_eq!(ctx.reg("$t2"), 40);
    assert_eq!(ctx.reg("$t3"), 80);
}

#[test]
fn branch_on_forwarded_value() {
    let ctx = run(
        "addi $t0, $zero, 5
         addi $t1, $zero, 5
         add  $t2, $t0, $t1
         beq  $t2, $t1, skip
         addi $t3, $zero, 99
         skip:
         addi $t4, $zero, 100",
        12,
    );
    assert_eq!(ctx.reg("$t3"), 99);
    assert_eq!(ctx.reg("$t4"), 100);
}

#[test]
fn branch_then_jump() {
    let ctx = run(
        "addi $t0, $zero, 3
         addi $t1, $zero, 3
         beq  $t0, $t1, path1
         addi $t2, $zero, 1
         j    end_test
         path1:
         addi $t2, $zero, 2
         end_test:
         addi $t3, $zero, 99",
        12,
    );
    assert_eq!(ctx.reg("$t2"), 2);
    assert_eq!(ctx.reg("$t3"), 99);
}

#[test]
fn many_independent_instructions() {
    let ctx = run(
        "addi $s0, $zero, 1
         addi $s1, $zero, 2
         addi $s2, $zero, 3
         addi $s3, $zero, 4
         addi $s4, $zero, 5
         add  $s5, $s0, $s1
         add  $s6, $s2, $s3
         add  $s7, $s4, $s5
         sub  $t0, $s6, $s7
         and  $t1, $s0, $s1
         or   $t2, $s2, $s3
         xor  $t3, $s4, $s5",
        20,
    );
    assert_eq!(ctx.reg("$s5"), 3);
    assert_eq!(ctx.reg("$s6"), 7);
    assert_eq!(ctx.reg("$s7"), 8);
    assert_eq!(ctx.reg("$t0"), -1);
    assert_eq!(ctx.reg("$t1"), 0);
    assert_eq!(ctx.reg("$t2"), 7);
    assert_eq!(ctx.reg("$t3"), 6);
}

#[test]
fn shift_left_logical() {
    let ctx = run(
        "addi $t0, $zero, 1
         sll  $t1, $t0, 3
         sll  $t2, $t0, 0
         addi $t3, $zero, -1
         sll  $t4, $t3, 16",
        10,
    );
    assert_eq!(ctx.reg("$t1"), 8);
    assert_eq!(ctx.reg("$t2"), 1);
    assert_eq!(ctx.reg("$t4") as u32, 0xFFFF_0000);
}

#[test]
fn shift_right_logical() {
    let ctx = run(
        "addi $t0, $zero, 8
         srl  $t1, $t0, 3
         addi $t2, $zero, -1
         srl  $t3, $t2, 16",
        8,
    );
    assert_eq!(ctx.reg("$t1"), 1);
    assert_eq!(ctx.reg("$t3"), 0x0000_FFFF);
}

#[test]
fn jump_and_link() {
    let ctx = run(
        "jal  function
         j    end
         function:
         addi $t1, $zero, 42
         j    end
         addi $t0, $zero, 99
         end:
         addi $t2, $zero, 77",
        12,
    );
    assert_eq!(ctx.reg("$ra"), 4);
    assert_eq!(ctx.reg("$t1"), 42);
    assert_eq!(ctx.reg("$t2"), 77);
    assert_eq!(ctx.reg("$t0"), 0);
}

#[test]
fn immediate_logical() {
    let ctx = run(
        "addi $t0, $zero, 0xFF
         ori  $t1, $t0, 0x0F0
         andi $t2, $t0, 0x0F
         addi $t3, $zero, 10
         slti $t4, $t3, 20
         slti $t5, $t3, 5",
        12,
    );
    assert_eq!(ctx.reg("$t1"), 255);
    assert_eq!(ctx.reg("$t2"), 15);
    assert_eq!(ctx.reg("$t4"), 1);
    assert_eq!(ctx.reg("$t5"), 0);
}

#[test]
fn aligned_loads_and_stores() {
    let ctx = run(
        "addi $t0, $zero, 0x5678
         sw   $t0, 0($zero)
         sw   $t0, 4($zero)
         lw   $t1, 0($zero)
         lw   $t2, 4($zero)
         addi $t3, $zero, 100
         sw   $t0, -4($t3)
         lw   $t4, -4($t3)",
        14,
    );
    assert_eq!(ctx.reg("$t1"), 0x5678);
    assert_eq!(ctx.reg("$t2"), 0x5678);
    assert_eq!(ctx.reg("$t4"), 0x5678);
    assert_eq!(ctx.mem(0), 0x5678);
    assert_eq!(ctx.mem(96), 0x5678);
}

#[test]
fn long_dependency_chains() {
    let ctx = run(
        "addi $t0, $zero, 1
         add  $t1, $t0, $t0
         add  $t2, $t1, $t1
         add  $t3, $t2, $t2
         add  $t4, $t3, $t3
         addi $t5, $zero, 2
         addi $t6, $zero, 3
         add  $t7, $t5, $t6
         sub  $t8, $t7, $t5
         and  $t9, $t8, $t6",
        20,
    );
    assert_eq!(ctx.reg("$t1"), 2);
    assert_eq!(ctx.reg("$t2"), 4);
    assert_eq!(ctx.reg("$t3"), 8);
    assert_eq!(ctx.reg("$t4"), 16);
    assert_eq!(ctx.reg("$t7"), 5);
    assert_eq!(ctx.reg("$t8"), 3);
    assert_eq!(ctx.reg("$t9"), 3);
}

#[test]
fn nested_control_flow() {
    let ctx = run(
        "addi $t0, $zero, 1
         addi $t1, $zero, 1
         beq  $t0, $t1, equal
         addi $t2, $zero, 99
         j    end
         equal:
         addi $t2, $zero, 42
         end:
         addi $t3, $zero, 5
         addi $t4, $zero, 10
         slt  $t5, $t3, $t4
         bne  $t5, $zero, outer
         addi $t6, $zero, 11
         j    finish
         outer:
         addi $t6, $zero, 22
         beq  $t3, $t4, inner
         addi $t7, $zero, 33
         j    finish
         inner:
         addi $t7, $zero, 44
         finish:",
        20,
    );
    assert_eq!(ctx.reg("$t2"), 42);
    assert_eq!(ctx.reg("$t6"), 22);
    assert_eq!(ctx.reg("$t7"), 33);
}

#[test]
fn zero_register_as_destination() {
    let ctx = run(
        "add  $zero, $zero, $zero
         sub  $zero, $zero, $zero
         and  $zero, $zero, $zero
         or   $zero, $zero, $zero
         xor  $zero, $zero, $zero
         nor  $zero, $zero, $zero
         slt  $zero, $zero, $zero
         sll  $zero, $zero, 5
         srl  $zero, $zero, 5
         add  $t0, $zero, $zero
         addi $t1, $zero, 100
         add  $t2, $t1, $zero
         sub  $t3, $t1, $zero
         and  $t4, $t1, $zero
         or   $t5, $t1, $zero
         slt  $t6, $zero, $t1",
        25,
    );
    assert_eq!(ctx.reg("$zero"), 0);
    assert_eq!(ctx.reg("$t0"), 0);
    assert_eq!(ctx.reg("$t1"), 100);
    assert_eq!(ctx.reg("$t2"), 100);
    assert_eq!(ctx.reg("$t3"), 100);
    assert_eq!(ctx.reg("$t4"), 0);
    assert_eq!(ctx.reg("$t5"), 100);
    assert_eq!(ctx.reg("$t6"), 1);
}

#[test]
fn data_memory_edge_cases() {
    let ctx = run(
        "addi $t0, $zero, 0xBEEF
         sw   $t0, 0($zero)
         sw   $t0, 1020($zero)
         lw   $t1, 0($zero)
         lw   $t2, 1020($zero)
         addi $t3, $zero, 1
         sw   $t3, 100($zero)
         addi $t3, $zero, 2
         sw   $t3, 100($zero)
         lw   $t4, 100($zero)
         addi $t5, $zero, 200
         sw   $t0, 0($t5)
         lw   $t6, 0($t5)
         add  $t7, $t6, $zero",
        20,
    );
    let expected = 0xFFFF_BEEF_u32 as i32;
    assert_eq!(ctx.reg("$t1"), expected);
    assert_eq!(ctx.reg("$t2"), expected);
    assert_eq!(ctx.reg("$t4"), 2);
    assert_eq!(ctx.reg("$t7"), expected);
}

#[test]
fn results_match_after_drain() {
    let mut ctx = TestContext::new().load_asm(
        "addi $t0, $zero, 3
         addi $t1, $zero, 0
         loop:
         add  $t1, $t1, $t0
         addi $t0, $t0, -1
         bne  $t0, $zero, loop
         sw   $t1, 0($zero)
         lw   $t2, 0($zero)
         sra  $t3, $t2, 1",
    );
    let _ = ctx.run_to_completion(200);
    assert_eq!(ctx.reg("$t1"), 6);
    assert_eq!(ctx.reg("$t2"), 6);
    assert_eq!(ctx.reg("$t3"), 3);
    assert_eq!(ctx.stats().instructions_retired, 2 + 3 * 3 + 3);
}
