use std::error::Error;
use std::ffi::OsString;
use std::fmt::{self, Display, Formatter};
use std::io::Write;
use std::path::PathBuf;

use clap::ArgAction::{Set, SetTrue};
use clap::Parser;
use tracing::{event, span, Level};
use tracing_subscriber::prelude::*;

use assembler::*;

/// Assembler for DWARF location expressions
#[derive(Parser, Debug)]
#[clap(version, about, long_about = None)]
struct Cli {
    /// File from which assembly source is read.
    #[clap(action = Set)]
    input: OsString,

    /// File to which the bytecode is written.  When omitted, a hex
    /// dump of the bytecode is printed instead.
    #[clap(action = Set, short = 'o', long)]
    output: Option<PathBuf>,

    /// Width in bits of a target address.
    #[clap(action = Set, long, default_value_t = 64)]
    address_bits: u32,

    /// Width in bits of a section offset (32 or 64).
    #[clap(action = Set, long, default_value_t = 32)]
    word_bits: u32,

    /// Write fixed-width operands most significant byte first.
    #[clap(action = SetTrue, long)]
    big_endian: bool,
}

#[derive(Debug)]
enum Fail {
    /// We initialised the assembler but then it failed.
    AsmFail(AssemblerFailure),
    /// We were not able to correctly initialise the assembler.
    InitialisationFailure(String),
}

impl Display for Fail {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            Fail::AsmFail(assembler_failure) => assembler_failure.fmt(f),
            Fail::InitialisationFailure(msg) => f.write_str(msg.as_str()),
        }
    }
}

impl Error for Fail {}

fn run_assembler() -> Result<(), Fail> {
    let cli = Cli::parse();

    // RUST_LOG selects which trace messages get printed, see
    // https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true);
    let filter_layer = match tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new("info"))
    {
        Err(e) => {
            return Err(Fail::InitialisationFailure(format!(
                "failed to initialise tracing filter (perhaps there is a problem with environment variables): {e}"
            )));
        }
        Ok(layer) => layer,
    };

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();

    let target = target_from_options(cli.address_bits, cli.word_bits, cli.big_endian)
        .map_err(|e| Fail::InitialisationFailure(format!("invalid target: {e}")))?;

    let span = span!(Level::ERROR, "assemble", input=?cli.input, output=?cli.output, %target);
    let _enter = span.enter();
    let bytes = match assemble_file(&cli.input, cli.output.as_deref(), &target) {
        Ok(bytes) => bytes,
        Err(e) => {
            event!(Level::ERROR, "assembly failed: {:?}", e);
            return Err(Fail::AsmFail(e));
        }
    };
    event!(Level::INFO, "assembly succeeded");
    if cli.output.is_none() {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", hex_dump(&bytes))
            .map_err(|error| Fail::AsmFail(AssemblerFailure::IoErrorOnStdout { error }))?;
    }
    Ok(())
}

fn main() {
    match run_assembler() {
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
        Ok(()) => {
            std::process::exit(0);
        }
    }
}
