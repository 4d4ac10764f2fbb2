//! # Program Loader Tests
//!
//! Hex and assembly parsing, start address validation, out-of-bounds words,
//! and the guarantee that a failed load leaves the previous program in place.

use mipsim_core::common::error::{DecodeError, LoadError};
use mipsim_core::config::Config;
use mipsim_core::core::Cpu;
use mipsim_core::sim::loader::{
    SourceFormat, load_assembly, load_auto, load_hex, load_words, parse_hex, parse_program,
};
use pretty_assertions::assert_eq;

fn cpu() -> Cpu {
    Cpu::new(&Config::default())
}

#[test]
fn hex_with_comments_and_blank_lines() {
    let mut cpu = cpu();
    let report = load_hex(&mut cpu, "0x20080005  # addi\n\n# note\n21090003\n", 0)
        .expect("valid hex");
    assert_eq!(report.loaded, 2);
    assert_eq!((report.start, report.end), (0, 4));
    assert!(report.warnings.is_empty());
    assert_eq!(cpu.pc, 0);
    assert_eq!(cpu.imem.fetch(4).map(|i| i.raw), Some(0x2109_0003));
}

#[test]
fn load_at_offset_points_pc_at_program() {
    let mut cpu = cpu();
    let report = load_words(&mut cpu, &[0x2008_0005, 0, 0], 0x40).expect("loads");
    assert_eq!(cpu.pc, 0x40);
    assert_eq!(report.end, 0x48);
    assert_eq!(cpu.imem.fetch(0), None);
}

#[test]
fn bad_hex_reports_line_number() {
    let err = parse_hex("0x20080005\n\nzzz\n").unwrap_err();
    assert_eq!(
        err,
        LoadError::BadHex {
            line: 3,
            text: "zzz".into()
        }
    );
}

#[test]
fn unaligned_start_is_rejected() {
    let mut cpu = cpu();
    assert_eq!(
        load_hex(&mut cpu, "00000000", 2),
        Err(LoadError::UnalignedStart(2))
    );
}

#[test]
fn start_past_memory_is_rejected() {
    let mut cpu = cpu();
    let size = cpu.imem.size_bytes();
    assert_eq!(
        load_words(&mut cpu, &[0], size),
        Err(LoadError::StartOutOfBounds { addr: size, size })
    );
}

#[test]
fn empty_program_is_rejected() {
    let mut cpu = cpu();
    assert_eq!(load_hex(&mut cpu, "# nothing\n", 0), Err(LoadError::Empty));
    assert_eq!(load_auto(&mut cpu, "\n\n", 0), Err(LoadError::Empty));
    assert_eq!(load_words(&mut cpu, &[], 0), Err(LoadError::Empty));
}

#[test]
fn undecodable_word_names_its_position() {
    let mut cpu = cpu();
    let err = load_hex(&mut cpu, "0x20080005\n0xFFFFFFFF", 8).unwrap_err();
    assert_eq!(
        err,
        LoadError::Decode {
            index: 1,
            addr: 12,
            source: DecodeError::UnknownOpcode {
                word: 0xFFFF_FFFF,
                opcode: 0x3F
            }
        }
    );
}

#[test]
fn assembly_errors_are_collected() {
    let mut cpu = cpu();
    match load_assembly(&mut cpu, "addi $t0\nnop\nbogus", 0) {
        Err(LoadError::Assembly(errs)) => {
            assert_eq!(errs.iter().map(|e| e.line).collect::<Vec<_>>(), vec![1, 3]);
        }
        other => panic!("expected assembly error, got {other:?}"),
    }
}

#[test]
fn words_past_memory_are_skipped_with_warnings() {
    let mut config = Config::default();
    config.memory.instruction_words = 2;
    let mut cpu = Cpu::new(&config);

    let report = load_words(&mut cpu, &[0x2008_0001, 0x2008_0002, 0x2008_0003], 4)
        .expect("partial load succeeds");
    assert_eq!(report.loaded, 1);
    assert_eq!(report.end, 4);
    assert_eq!(
        report.warnings,
        vec![
            "Skipping out-of-bounds instruction at address 8".to_string(),
            "Skipping out-of-bounds instruction at address 12".to_string(),
        ]
    );
}

#[test]
fn failed_load_leaves_previous_program() {
    let mut cpu = cpu();
    let _ = load_words(&mut cpu, &[0x2008_0005], 0).expect("first load");
    cpu.pc = 4;

    assert!(load_hex(&mut cpu, "0x20080005\n0xFC000000", 0x10).is_err());
    assert!(load_assembly(&mut cpu, "nope", 0x10).is_err());
    assert_eq!(cpu.imem.fetch(0).map(|i| i.raw), Some(0x2008_0005));
    assert_eq!(cpu.pc, 4);
}

#[test]
fn reload_replaces_previous_program() {
    let mut cpu = cpu();
    let _ = load_words(&mut cpu, &[0x2008_0005, 0x2008_0006], 0).expect("first load");
    let _ = load_words(&mut cpu, &[0x2009_0007], 0x20).expect("second load");
    assert_eq!(cpu.imem.fetch(0), None);
    assert_eq!(cpu.imem.iter().count(), 1);
}

#[test]
fn auto_detects_format() {
    let mut cpu = cpu();
    let hex = load_auto(&mut cpu, "0x20080005\n0x21090003", 0).expect("hex");
    assert_eq!(hex.loaded, 2);

    let asm = load_auto(&mut cpu, "loop: addi $t0, $t0, 1\nj loop", 0).expect("asm");
    assert_eq!(asm.loaded, 2);
    assert_eq!(cpu.imem.fetch(4).map(|i| i.raw), Some(0x0800_0000));
}

#[test]
fn assembly_labels_use_load_address() {
    let words = parse_program("j end\nend:", 0x40, SourceFormat::Asm).expect("assembles");
    assert_eq!(words, vec![0x0800_0011]);
    // Forcing hex on assembly text fails on the first line.
    assert!(matches!(
        parse_program("j end", 0, SourceFormat::Hex),
        Err(LoadError::BadHex { line: 1, .. })
    ));
}
