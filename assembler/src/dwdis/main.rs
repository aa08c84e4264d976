#![deny(unsafe_code)]

use std::error::Error;
use std::ffi::OsString;
use std::fmt::{self, Display, Formatter};
use std::io::Write;

use clap::ArgAction::{Set, SetTrue};
use clap::Parser;
use tracing::{event, span, Level};
use tracing_subscriber::prelude::*;

use assembler::*;

const ABOUT: &str = "Disassembler for DWARF location expression bytecode";

/// Disassembler for DWARF location expression bytecode
#[derive(Parser, Debug)]
#[clap(version, about = ABOUT, long_about = None)]
struct Cli {
    /// File from which the bytecode is read
    #[clap(action = Set)]
    input: OsString,

    /// Width in bits of a target address.
    #[clap(action = Set, long, default_value_t = 64)]
    address_bits: u32,

    /// Width in bits of a section offset (32 or 64).
    #[clap(action = Set, long, default_value_t = 32)]
    word_bits: u32,

    /// Read fixed-width operands most significant byte first.
    #[clap(action = SetTrue, long)]
    big_endian: bool,
}

#[derive(Debug)]
enum Fail {
    Disassembly(AssemblerFailure),
    Generic(String),
}

impl Display for Fail {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            Fail::Disassembly(failure) => failure.fmt(f),
            Fail::Generic(message) => f.write_str(message),
        }
    }
}

impl Error for Fail {}

fn run_disassembler() -> Result<(), Fail> {
    let cli = Cli::parse();

    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true);
    let filter_layer = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new("info"))
        .map_err(|e| Fail::Generic(format!("failed to initialise tracing filter: {e}")))?;
    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();

    let target = target_from_options(cli.address_bits, cli.word_bits, cli.big_endian)
        .map_err(|e| Fail::Generic(format!("invalid target: {e}")))?;

    let span = span!(Level::ERROR, "disassemble", input=?cli.input, %target);
    let _enter = span.enter();
    let ops = disassemble_file(&cli.input, &target).map_err(Fail::Disassembly)?;
    event!(Level::DEBUG, "decoded {} operations", ops.len());

    let mut stdout = std::io::stdout().lock();
    for op in &ops {
        writeln!(stdout, "{:#06x}: {op}", op.offset())
            .map_err(|error| Fail::Disassembly(AssemblerFailure::IoErrorOnStdout { error }))?;
    }
    Ok(())
}

fn main() {
    match run_disassembler() {
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
        Ok(()) => {
            std::process::exit(0);
        }
    }
}
