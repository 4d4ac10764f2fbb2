//! Assembler Tests.
//!
//! Encodings for every operand form, label resolution relative to the base
//! address, and the diagnostics reported for malformed source.

use mipsim_core::common::error::{AsmError, AsmErrorKind};
use mipsim_core::isa::asm::assemble;
use mipsim_core::isa::decode::decode;
use mipsim_core::isa::disasm::disassemble;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

fn one(line: &str) -> u32 {
    match assemble(line, 0).as_deref() {
        Ok([word]) => *word,
        other => panic!("expected one word for {line:?}, got {other:?}"),
    }
}

fn errors(source: &str) -> Vec<AsmError> {
    assemble(source, 0).expect_err("source should be rejected")
}

#[rstest]
#[case("addi $t0, $zero, 5", 0x2008_0005)]
#[case("addi $t0, $zero, -1", 0x2008_FFFF)]
#[case("andi $t0, $t0, 0xFFFF", 0x3108_FFFF)]
#[case("ori $t0, $zero, -32768", 0x3408_8000)]
#[case("add $t2, $t0, $t1", 0x0109_5020)]
#[case("lw $t2, 4($t0)", 0x8D0A_0004)]
#[case("sw $t1, 4($t0)", 0xAD09_0004)]
#[case("lw $t0, ($t1)", 0x8D28_0000)]
#[case("lw $t0, 0x10($sp)", 0x8FA8_0010)]
#[case("sll $t1, $t0, 16", 0x0008_4C00)]
#[case("jr $ra", 0x03E0_0008)]
#[case("beq $t0, $t1, -1", 0x1109_FFFF)]
#[case("nop", 0)]
#[case("ADDI $T0, $ZERO, 5", 0x2008_0005)]
#[case("addi $8 $0 5", 0x2008_0005)]
fn encodes(#[case] line: &str, #[case] word: u32) {
    assert_eq!(one(line), word, "{line}");
}

#[test]
fn labels_resolve_to_offsets_and_targets() {
    let src = "\
start: addi $t0, $zero, 3   # counter
loop:  addi $t0, $t0, -1

       bne $t0, $zero, loop
       j end
       nop
end:
";
    assert_eq!(
        assemble(src, 0),
        Ok(vec![0x2008_0003, 0x2108_FFFF, 0x1500_FFFE, 0x0800_0005, 0])
    );

    // Branch offsets are relative; jump targets move with the base.
    let moved = assemble(src, 0x100).expect("assembles at 0x100");
    assert_eq!(moved[2], 0x1500_FFFE);
    assert_eq!(moved[3], 0x0800_0045);
}

#[test]
fn forward_branch_and_jal() {
    let src = "beq $t0, $t0, skip\nnop\nskip: jal sub\nsub: jr $ra";
    let words = assemble(src, 0).expect("assembles");
    assert_eq!(words[0] & 0xFFFF, 1);
    assert_eq!(words[2], 0x0C00_0003);
}

#[test]
fn numeric_jump_operand_is_word_target() {
    assert_eq!(one("j 7"), 0x0800_0007);
    assert_eq!(one("jal 0x4000000"), 0x0C00_0000, "masked to 26 bits");
}

#[test]
fn comments_and_blank_lines_produce_nothing() {
    assert_eq!(assemble("# header\n\n   \n# a: b\n", 0), Ok(vec![]));
}

#[test]
fn reports_every_error_sorted_by_line() {
    let src = "\
addi $t0, $zero, 5
foo $t0
add $t0, $t1
addi $t9x, $t0, 1
beq $t0, $t1, nowhere
sll $t0, $t0, 32
dup:
dup: nop
9bad: nop
addi $t0, $t0, 70000
";
    let errs = errors(src);
    let lines: Vec<usize> = errs.iter().map(|e| e.line).collect();
    assert_eq!(lines, vec![2, 3, 4, 5, 6, 8, 9, 10]);
    assert_eq!(errs[0].kind, AsmErrorKind::UnknownMnemonic("foo".into()));
    assert_eq!(
        errs[1].kind,
        AsmErrorKind::OperandCount {
            mnemonic: "add".into(),
            expected: 3,
            found: 2
        }
    );
    assert_eq!(errs[2].kind, AsmErrorKind::BadRegister("$t9x".into()));
    assert_eq!(errs[3].kind, AsmErrorKind::UndefinedLabel("nowhere".into()));
    assert_eq!(errs[4].kind, AsmErrorKind::BadImmediate("32".into()));
    assert_eq!(errs[5].kind, AsmErrorKind::DuplicateLabel("dup".into()));
    assert_eq!(errs[6].kind, AsmErrorKind::BadLabel("9bad".into()));
    assert_eq!(errs[7].kind, AsmErrorKind::BadImmediate("70000".into()));
}

#[test]
fn error_messages_carry_line_numbers() {
    let errs = errors("nop\nfrobnicate $t0");
    assert_eq!(errs[0].to_string(), "line 2: unknown instruction 'frobnicate'");
}

#[rstest]
#[case("beq $t0, $t1, 40000")]
#[case("addi $t0, $t0, 0x")]
#[case("addi $t0, $t0, --1")]
#[case("addi $t0, $t0, 12abc")]
fn rejects_bad_immediates(#[case] line: &str) {
    let errs = errors(line);
    assert!(
        matches!(errs[0].kind, AsmErrorKind::BadImmediate(_)),
        "{line}: {:?}",
        errs[0]
    );
}

#[test]
fn disassembly_reassembles() {
    let src = "\
addi $t0, $zero, -7
andi $t1, $t0, 65535
slti $t2, $t1, 100
sub $t3, $t2, $t1
nor $t4, $t3, $zero
slt $t5, $t4, $t3
srl $t6, $t5, 3
sra $t7, $t6, 31
lw $s0, -4($sp)
sw $s1, 8($gp)
bne $s0, $s1, -2
jr $ra
nop
";
    let words = assemble(src, 0).expect("assembles");
    let text: Vec<String> = words
        .iter()
        .map(|&w| disassemble(&decode(w).expect("decodes")))
        .collect();
    assert_eq!(assemble(&text.join("\n"), 0), Ok(words));
}

proptest! {
    #[test]
    fn immediates_survive_encoding(imm in any::<i16>()) {
        let word = one(&format!("addi $t0, $t1, {imm}"));
        prop_assert_eq!(decode(word).map(|i| i.imm), Ok(i32::from(imm)));
    }

    #[test]
    fn any_register_pair_encodes(rd in 0usize..32, rs in 0usize..32, rt in 0usize..32) {
        let inst = decode(one(&format!("or ${rd}, ${rs}, ${rt}"))).expect("decodes");
        prop_assert_eq!((inst.rd, inst.rs, inst.rt), (rd, rs, rt));
    }
}
