//! MIPS five-stage pipeline simulator CLI.
//!
//! This binary provides a single entry point for offline use. It performs:
//! 1. **Run:** Load a hex or assembly program, run it, and print registers and statistics.
//! 2. **Demo:** Step a built-in program cycle by cycle, printing PC and registers.
//! 3. **Asm:** Assemble a source file to hex words.
//! 4. **Disasm:** Decode hex words back to assembly.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use mipsim_core::common::error::{LoadError, SimError};
use mipsim_core::isa::abi::reg_name;
use mipsim_core::isa::asm::assemble;
use mipsim_core::isa::disasm::disassemble_word;
use mipsim_core::sim::loader::parse_hex;
use mipsim_core::sim::programs::{DEMOS, demo};
use mipsim_core::sim::SourceFormat;
use mipsim_core::{Config, Simulator};
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Cycle limit for `run` when `--cycles` is not given and the program never drains.
const DEFAULT_MAX_CYCLES: u64 = 100_000;

#[derive(Parser, Debug)]
#[command(
    name = "mipsim",
    author,
    version,
    about = "MIPS five-stage pipeline simulator",
    long_about = "Run MIPS programs on a cycle-level five-stage pipeline model.\n\nExamples:\n  mipsim run prog.s --trace\n  mipsim run prog.hex --cycles 20 --json\n  mipsim demo loaduse\n  mipsim asm prog.s > prog.hex\n  mipsim disasm prog.hex"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Load and run a program until it drains (or for a fixed number of cycles).
    Run {
        /// Program file: hex words, one per line, or assembly.
        file: PathBuf,

        /// Run exactly this many cycles instead of until the pipeline drains.
        #[arg(long)]
        cycles: Option<u64>,

        /// Load address (decimal or 0x hex); defaults to the configured start PC.
        #[arg(long, value_parser = parse_addr)]
        start: Option<u32>,

        /// Program text format.
        #[arg(long, value_enum, default_value_t = Format::Auto)]
        format: Format,

        /// Print the final state as JSON instead of the text report.
        #[arg(long)]
        json: bool,

        /// Print PC and changed registers after every cycle.
        #[arg(long)]
        trace: bool,

        /// Simulator configuration (JSON).
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Step a built-in demo program, printing PC and registers each cycle.
    Demo {
        /// Demo name: arith, loaduse or branch.
        name: String,

        /// Number of cycles to run.
        #[arg(long, default_value_t = 12)]
        cycles: u64,
    },

    /// Assemble a source file and print one hex word per line.
    Asm {
        /// Assembly source.
        file: PathBuf,

        /// Address of the first instruction, for label resolution.
        #[arg(long, default_value = "0", value_parser = parse_addr)]
        base: u32,
    },

    /// Disassemble a file of hex words.
    Disasm {
        /// Hex words, one per line.
        file: PathBuf,

        /// Address of the first word.
        #[arg(long, default_value = "0", value_parser = parse_addr)]
        base: u32,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Auto,
    Hex,
    Asm,
}

impl From<Format> for SourceFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Auto => Self::Auto,
            Format::Hex => Self::Hex,
            Format::Asm => Self::Asm,
        }
    }
}

#[derive(Debug, Error)]
enum CliError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Sim(#[from] SimError),

    #[error("unknown demo '{0}' (available: {names})", names = demo_names())]
    UnknownDemo(String),

    #[error("cannot serialize state: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<LoadError> for CliError {
    fn from(err: LoadError) -> Self {
        Self::Sim(err.into())
    }
}

fn demo_names() -> String {
    DEMOS.iter().map(|d| d.name).collect::<Vec<_>>().join(", ")
}

fn parse_addr(s: &str) -> Result<u32, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("invalid address '{s}': {e}"))
}

fn read(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.display().to_string(),
        source,
    })
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Run {
            file,
            cycles,
            start,
            format,
            json,
            trace,
            config,
        } => cmd_run(&file, cycles, start, format.into(), json, trace, config.as_deref()),
        Commands::Demo { name, cycles } => cmd_demo(&name, cycles),
        Commands::Asm { file, base } => cmd_asm(&file, base),
        Commands::Disasm { file, base } => cmd_disasm(&file, base),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Loads `file`, runs it, and prints the final registers and statistics (or JSON state).
fn cmd_run(
    file: &Path,
    cycles: Option<u64>,
    start: Option<u32>,
    format: SourceFormat,
    json: bool,
    trace: bool,
    config: Option<&Path>,
) -> Result<(), CliError> {
    let config = match config {
        Some(path) => Config::from_file(path).map_err(SimError::from)?,
        None => Config::default(),
    };
    let mut sim = Simulator::new(&config);
    let start = start.unwrap_or(config.general.start_pc);
    let report = sim.load(&read(file)?, start, format)?;
    for warning in &report.warnings {
        eprintln!("warning: {warning}");
    }
    debug!(loaded = report.loaded, start = report.start, end = report.end, "loaded program");

    let limit = cycles.unwrap_or(DEFAULT_MAX_CYCLES);
    let mut ran = 0;
    let mut prev = sim.cpu.regs.snapshot();
    while ran < limit && (cycles.is_some() || !sim.is_drained()) {
        sim.step();
        ran += 1;
        if trace {
            let regs = sim.cpu.regs.snapshot();
            let changed: Vec<String> = regs
                .iter()
                .zip(prev.iter())
                .enumerate()
                .filter(|(_, (now, before))| now != before)
                .map(|(i, (now, _))| format!("{}={now}", reg_name(i)))
                .collect();
            println!("cycle {:>5}  pc=0x{:08X}  {}", sim.cycle(), sim.cpu.pc, changed.join(" "));
            prev = regs;
        }
    }
    if cycles.is_none() && !sim.is_drained() {
        eprintln!("warning: stopped after {limit} cycles without draining");
    }

    if json {
        println!("{}", sim.state().to_json_pretty()?);
    } else {
        println!();
        print!("{}", sim.cpu.regs.dump());
        println!();
        sim.stats().print();
    }
    Ok(())
}

/// Runs a built-in demo for a fixed number of cycles.
fn cmd_demo(name: &str, cycles: u64) -> Result<(), CliError> {
    let d = demo(name).ok_or_else(|| CliError::UnknownDemo(name.to_owned()))?;
    let mut sim = Simulator::new(&Config::default());
    let report = sim.load_words(d.words, 0)?;

    println!("=== MIPS PIPELINE SIMULATOR ===");
    println!("Program: {} ({})", d.name.to_uppercase(), d.description);
    println!("Loaded {} instructions", report.loaded);
    println!("Running {cycles} cycles...");
    println!();

    for _ in 0..cycles {
        sim.step();
        println!("--- CYCLE {} ---", sim.cycle());
        println!("PC: {}", sim.cpu.pc);
        let regs = sim.cpu.regs.snapshot();
        for (row, chunk) in regs.chunks(8).enumerate() {
            let cells: Vec<String> = chunk
                .iter()
                .enumerate()
                .map(|(i, v)| format!("${:>2}={v:>4}", row * 8 + i))
                .collect();
            let label = if row == 0 { "Registers: " } else { "           " };
            println!("{label}{}", cells.join("  "));
        }
        println!();
    }

    println!("=== FINAL RESULTS ===");
    println!("Final register values:");
    for idx in 8..=13 {
        println!("  {} (${idx}) = {}", reg_name(idx), sim.cpu.regs.read(idx));
    }
    Ok(())
}

/// Assembles `file` and prints one `0x%08X` word per line.
fn cmd_asm(file: &Path, base: u32) -> Result<(), CliError> {
    let words = assemble(&read(file)?, base).map_err(LoadError::Assembly)?;
    for word in words {
        println!("0x{word:08X}");
    }
    Ok(())
}

/// Decodes hex words and prints `address: word  assembly`.
fn cmd_disasm(file: &Path, base: u32) -> Result<(), CliError> {
    let words = parse_hex(&read(file)?)?;
    for (i, word) in words.iter().enumerate() {
        let addr = base.wrapping_add(i as u32 * 4);
        println!("{addr:08x}: {word:08x}  {}", disassemble_word(*word));
    }
    Ok(())
}
