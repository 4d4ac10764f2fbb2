//! ALU arithmetic operations.
//!
//! MIPS `add`/`addi` trap on signed overflow in hardware; this pipeline has no
//! exception path, so both add and subtract wrap like `addu`/`subu`.

use crate::core::pipeline::signals::AluOp;

/// Executes an arithmetic operation. Returns `0` for non-arithmetic opcodes.
pub const fn execute(op: AluOp, a: i32, b: i32) -> i32 {
    match op {
        AluOp::Add => a.wrapping_add(b),
        AluOp::Sub => a.wrapping_sub(b),
        _ => 0,
    }
}
