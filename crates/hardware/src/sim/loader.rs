//! Program Loader.
//!
//! This module turns program text into instruction memory contents. It performs:
//! 1. **Parsing:** Hex words (one per line) or assembly source, or auto-detection
//!    between the two.
//! 2. **Validation:** Start address alignment and bounds, empty programs, and
//!    undecodable words. Every word is decoded before memory is touched, so a
//!    failed load leaves the previous program in place.
//! 3. **Installation:** Clears instruction memory, stores the program, and points
//!    the PC at its first word. Words past the end of memory are skipped with a warning.

use serde::Serialize;
use tracing::{info, warn};

use crate::common::constants::WORD_BYTES;
use crate::common::error::LoadError;
use crate::core::Cpu;
use crate::isa::asm::assemble;
use crate::isa::decode::decode;

/// Program text encoding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SourceFormat {
    /// Hex if every line is a hex word, assembly otherwise.
    #[default]
    Auto,
    /// One 32-bit hex word per line.
    Hex,
    /// MIPS assembly.
    Asm,
}

/// Summary of a successful load.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// Number of words stored.
    pub loaded: usize,
    /// Address of the first word.
    pub start: u32,
    /// Address of the last stored word.
    pub end: u32,
    /// Words skipped because they fell outside instruction memory.
    pub warnings: Vec<String>,
}

/// Strips a `#` comment and surrounding whitespace.
fn strip_comment(line: &str) -> &str {
    line.split_once('#').map_or(line, |(code, _)| code).trim()
}

/// Parses one hex word with an optional `0x` prefix.
fn parse_hex_word(text: &str) -> Option<u32> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    if digits.is_empty() || digits.len() > 8 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}

/// Parses hex program text into words.
///
/// Blank lines and `#` comments are skipped.
pub fn parse_hex(text: &str) -> Result<Vec<u32>, LoadError> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, strip_comment(line)))
        .filter(|(_, code)| !code.is_empty())
        .map(|(line, code)| {
            parse_hex_word(code).ok_or_else(|| LoadError::BadHex {
                line,
                text: code.to_string(),
            })
        })
        .collect()
}

/// Whether every code line of `text` is a hex word.
pub fn looks_like_hex(text: &str) -> bool {
    let mut any = false;
    for code in text.lines().map(strip_comment).filter(|c| !c.is_empty()) {
        if parse_hex_word(code).is_none() {
            return false;
        }
        any = true;
    }
    any
}

/// Converts program text to machine words in the given format.
pub fn parse_program(text: &str, start: u32, format: SourceFormat) -> Result<Vec<u32>, LoadError> {
    match format {
        SourceFormat::Hex => parse_hex(text),
        SourceFormat::Asm => assemble(text, start).map_err(LoadError::Assembly),
        SourceFormat::Auto if looks_like_hex(text) => parse_hex(text),
        SourceFormat::Auto => assemble(text, start).map_err(LoadError::Assembly),
    }
}

fn validate_start(cpu: &Cpu, start: u32) -> Result<(), LoadError> {
    if start % WORD_BYTES != 0 {
        return Err(LoadError::UnalignedStart(start));
    }
    let size = cpu.imem.size_bytes();
    if start >= size {
        return Err(LoadError::StartOutOfBounds { addr: start, size });
    }
    Ok(())
}

/// Installs machine words at `start`.
///
/// # Arguments
///
/// * `cpu` - CPU whose instruction memory and PC are replaced.
/// * `words` - Machine words in program order.
/// * `start` - Byte address of the first word.
///
/// # Returns
///
/// A [`LoadReport`], or an error if the start address is invalid, the program
/// is empty, or a word does not decode.
pub fn load_words(cpu: &mut Cpu, words: &[u32], start: u32) -> Result<LoadReport, LoadError> {
    validate_start(cpu, start)?;
    if words.is_empty() {
        return Err(LoadError::Empty);
    }

    let mut decoded = Vec::with_capacity(words.len());
    for (index, &word) in words.iter().enumerate() {
        let addr = start.wrapping_add(index as u32 * WORD_BYTES);
        let inst = decode(word).map_err(|source| LoadError::Decode {
            index,
            addr,
            source,
        })?;
        decoded.push((addr, inst));
    }

    cpu.imem.clear();
    let mut report = LoadReport {
        start,
        ..LoadReport::default()
    };
    for (addr, inst) in decoded {
        if cpu.imem.store(addr, inst) {
            report.loaded += 1;
        } else {
            warn!(addr, "instruction outside instruction memory skipped");
            report
                .warnings
                .push(format!("Skipping out-of-bounds instruction at address {addr}"));
        }
    }
    report.end = start + report.loaded.saturating_sub(1) as u32 * WORD_BYTES;
    cpu.pc = start;

    info!(
        loaded = report.loaded,
        start = report.start,
        end = report.end,
        skipped = report.warnings.len(),
        "program loaded"
    );
    Ok(report)
}

/// Loads hex program text at `start`.
pub fn load_hex(cpu: &mut Cpu, text: &str, start: u32) -> Result<LoadReport, LoadError> {
    load_text(cpu, text, start, SourceFormat::Hex)
}

/// Assembles and loads program text at `start`.
pub fn load_assembly(cpu: &mut Cpu, text: &str, start: u32) -> Result<LoadReport, LoadError> {
    load_text(cpu, text, start, SourceFormat::Asm)
}

/// Loads program text at `start`, detecting hex or assembly.
pub fn load_auto(cpu: &mut Cpu, text: &str, start: u32) -> Result<LoadReport, LoadError> {
    load_text(cpu, text, start, SourceFormat::Auto)
}

/// Loads program text at `start` in the given format.
pub fn load_text(
    cpu: &mut Cpu,
    text: &str,
    start: u32,
    format: SourceFormat,
) -> Result<LoadReport, LoadError> {
    validate_start(cpu, start)?;
    let words = parse_program(text, start, format)?;
    load_words(cpu, &words, start)
}
