//! Error definitions for the simulator.
//!
//! This module defines the failure modes of every user-facing operation. It provides:
//! 1. **Decode Errors:** Words that do not encode a supported MIPS instruction.
//! 2. **Assembly Errors:** Source lines the assembler cannot translate, tagged with a line number.
//! 3. **Load Errors:** Invalid program images or start addresses.
//! 4. **Configuration Errors:** Unreadable or malformed configuration files.
//!
//! All of these convert into [`SimError`], the error type returned at crate boundaries.

use thiserror::Error;

/// A 32-bit word that does not encode a supported instruction.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The primary opcode field (bits 31..26) is not implemented.
    #[error("unknown opcode {opcode:#04x} in word {word:#010x}")]
    UnknownOpcode {
        /// The full instruction word.
        word: u32,
        /// The unrecognised opcode.
        opcode: u32,
    },

    /// An R-type word whose function field (bits 5..0) is not implemented.
    #[error("unknown R-type function {funct:#04x} in word {word:#010x}")]
    UnknownFunct {
        /// The full instruction word.
        word: u32,
        /// The unrecognised function code.
        funct: u32,
    },
}

/// An assembler diagnostic, tied to a 1-based source line.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("line {line}: {kind}")]
pub struct AsmError {
    /// Source line the error was found on.
    pub line: usize,
    /// What went wrong.
    pub kind: AsmErrorKind,
}

/// The reason an assembly line was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AsmErrorKind {
    /// Mnemonic is not part of the supported instruction set.
    #[error("unknown instruction '{0}'")]
    UnknownMnemonic(String),

    /// Wrong number of operands for the mnemonic.
    #[error("'{mnemonic}' expects {expected} operand(s), found {found}")]
    OperandCount {
        /// Mnemonic being assembled.
        mnemonic: String,
        /// Operands the mnemonic takes.
        expected: usize,
        /// Operands present on the line.
        found: usize,
    },

    /// Register operand is not a known name or number.
    #[error("unknown register '{0}'")]
    BadRegister(String),

    /// Immediate operand is not a decimal or `0x` hex integer.
    #[error("invalid immediate '{0}'")]
    BadImmediate(String),

    /// Branch or jump names a label that is never defined.
    #[error("undefined label '{0}'")]
    UndefinedLabel(String),

    /// The same label is defined twice.
    #[error("duplicate label '{0}'")]
    DuplicateLabel(String),

    /// Label name is empty or contains characters other than `[A-Za-z0-9_.]`.
    #[error("invalid label '{0}'")]
    BadLabel(String),
}

/// Failure while placing a program into instruction memory.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LoadError {
    /// Start address is not a multiple of four.
    #[error("start address {0:#x} is not word-aligned")]
    UnalignedStart(u32),

    /// Start address lies past the end of instruction memory.
    #[error("start address {addr:#x} is outside instruction memory ({size} bytes)")]
    StartOutOfBounds {
        /// Requested start address.
        addr: u32,
        /// Instruction memory size in bytes.
        size: u32,
    },

    /// Input contained no instructions.
    #[error("no instructions to load")]
    Empty,

    /// A hex line could not be parsed as a 32-bit word.
    #[error("line {line}: invalid hex word '{text}'")]
    BadHex {
        /// 1-based input line.
        line: usize,
        /// The offending text.
        text: String,
    },

    /// A word does not decode to a supported instruction.
    #[error("word {index} at {addr:#x}: {source}")]
    Decode {
        /// Position of the word in the program.
        index: usize,
        /// Address the word would have been placed at.
        addr: u32,
        /// Underlying decode failure.
        #[source]
        source: DecodeError,
    },

    /// Assembly source failed to assemble.
    #[error("assembly failed: {}", join_errors(.0))]
    Assembly(Vec<AsmError>),
}

fn join_errors(errors: &[AsmError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Failure while reading simulator configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("cannot read config {path}: {source}")]
    Io {
        /// Path that was opened.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration text is not valid JSON for [`Config`](crate::config::Config).
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value is syntactically valid but unusable.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Top-level error type returned by simulator entry points.
#[derive(Debug, Error)]
pub enum SimError {
    /// Instruction decode failure.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Program load failure.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Configuration failure.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
