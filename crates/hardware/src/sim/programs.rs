//! Built-in demonstration programs.

/// A named hex program.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Demo {
    /// Name used to select the demo.
    pub name: &'static str,
    /// One-line summary.
    pub description: &'static str,
    /// Machine words, loaded at address 0.
    pub words: &'static [u32],
}

/// `addi $t0, $zero, 5; addi $t1, $t0, 3; add $t2, $t0, $t1`
const ARITH: [u32; 3] = [0x2008_0005, 0x2109_0003, 0x0109_5020];

/// Store then reload, with a dependent add right after the load.
const LOADUSE: [u32; 7] = [
    0x2008_000A, // addi $t0, $zero, 10
    0x2009_0014, // addi $t1, $zero, 20
    0xAD09_0004, // sw   $t1, 4($t0)
    0x8D0A_0004, // lw   $t2, 4($t0)
    0x0148_5820, // add  $t3, $t2, $t0
    0x016C_6020, // add  $t4, $t3, $t4
    0x218D_0001, // addi $t5, $t4, 1
];

/// One untaken and one taken `beq`.
const BRANCH: [u32; 5] = [
    0x2008_0001, // addi $t0, $zero, 1
    0x2009_0002, // addi $t1, $zero, 2
    0x1109_0002, // beq  $t0, $t1, 2
    0x200A_0003, // addi $t2, $zero, 3
    0x1108_0002, // beq  $t0, $t0, 2
];

/// All built-in demos.
pub static DEMOS: [Demo; 3] = [
    Demo {
        name: "arith",
        description: "dependent ALU chain resolved by forwarding",
        words: &ARITH,
    },
    Demo {
        name: "loaduse",
        description: "store, load, and a load-use stall",
        words: &LOADUSE,
    },
    Demo {
        name: "branch",
        description: "untaken then taken branch with flushes",
        words: &BRANCH,
    },
];

/// Looks up a demo by name (case-insensitive).
pub fn demo(name: &str) -> Option<&'static Demo> {
    DEMOS.iter().find(|d| d.name.eq_ignore_ascii_case(name))
}
