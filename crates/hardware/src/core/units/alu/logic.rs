//! ALU logical and comparison operations.

use crate::core::pipeline::signals::AluOp;

/// Executes a logical or comparison operation.
///
/// `Slt` compares signed and yields `1` or `0`. Returns `0` for other opcodes.
pub const fn execute(op: AluOp, a: i32, b: i32) -> i32 {
    match op {
        AluOp::And => a & b,
        AluOp::Or => a | b,
        AluOp::Xor => a ^ b,
        AluOp::Nor => !(a | b),
        AluOp::Slt => (a < b) as i32,
        _ => 0,
    }
}
