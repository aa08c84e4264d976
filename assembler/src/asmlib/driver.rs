use std::ffi::OsStr;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use tracing::{event, span, Level};

use base::prelude::*;

use super::disasm::{disassemble, DecodedOperation};
use super::encoder::Encoder;
use super::lexer::tokenize;
use super::parser::{end_of_input, parse_expression, SyntaxError};
use super::source::Source;
use super::types::{AssemblerFailure, Diagnostic};

#[cfg(test)]
mod tests;

/// Assemble `input` for the default target (64-bit addresses,
/// 32-bit words, little-endian).
///
/// # Errors
///
/// Returns a [`Diagnostic`] describing the first problem in the
/// input.  No bytes are returned when assembly fails.
pub fn assemble(input: &str) -> Result<Vec<u8>, Diagnostic> {
    assemble_for_target(input, &Target::default())
}

/// Assemble `input` for the given target.
///
/// # Errors
///
/// Returns a [`Diagnostic`] describing the first problem in the
/// input.  No bytes are returned when assembly fails.
pub fn assemble_for_target(input: &str, target: &Target) -> Result<Vec<u8>, Diagnostic> {
    let span = span!(Level::DEBUG, "assemble", bytes_in = input.len(), %target);
    let _enter = span.enter();
    let result = assemble_source(&Source::new(input), target);
    match &result {
        Ok(output) => {
            event!(Level::DEBUG, "assembled {} bytes", output.len());
        }
        Err(e) => {
            event!(Level::DEBUG, "assembly failed: {e}");
        }
    }
    result
}

fn assemble_source(source: &Source<'_>, target: &Target) -> Result<Vec<u8>, Diagnostic> {
    let tokens = tokenize(source)?;
    event!(Level::TRACE, "input contains {} tokens", tokens.len());
    let mut encoder = Encoder::new(source, *target);
    match parse_expression(source, tokens) {
        Ok(expr) => {
            encoder.encode_operations(&expr.operations, end_of_input(source))?;
            Ok(encoder.finish())
        }
        Err(SyntaxError {
            prefix,
            stop,
            incomplete,
            diagnostic,
        }) => {
            // Problems before the syntax error are reported first.
            encoder.encode_operations(&prefix, stop)?;
            if let Some(incomplete) = incomplete.as_ref() {
                encoder.encode_incomplete(incomplete)?;
            }
            Err(diagnostic)
        }
    }
}

/// Build a [`Target`] from the widths (in bits) and byte order given
/// on a command line.
///
/// # Errors
///
/// Fails if either width is unsupported.
pub fn target_from_options(
    address_bits: u32,
    word_bits: u32,
    big_endian: bool,
) -> Result<Target, TargetConfigFailed> {
    let byte_order = if big_endian {
        ByteOrder::Big
    } else {
        ByteOrder::Little
    };
    Target::new(
        Width::try_from(address_bits)?,
        Width::try_from(word_bits)?,
        byte_order,
    )
}

/// Format bytes as space-separated pairs of hex digits.
#[must_use]
pub fn hex_dump(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<String>>()
        .join(" ")
}

fn read_input(input_file: &OsStr) -> Result<Vec<u8>, AssemblerFailure> {
    std::fs::read(input_file).map_err(|error| AssemblerFailure::IoErrorOnInput {
        filename: input_file.to_owned(),
        error,
    })
}

fn write_output(output_file: &Path, bytes: &[u8]) -> Result<(), AssemblerFailure> {
    let fail = |error| AssemblerFailure::IoErrorOnOutput {
        filename: output_file.to_owned(),
        error,
    };
    let mut file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(output_file)
        .map_err(fail)?;
    file.write_all(bytes).map_err(fail)?;
    file.flush().map_err(fail)
}

/// Assemble the contents of `input_file`.  When `output_file` is
/// given, the bytecode is written there too.
///
/// # Errors
///
/// Fails if either file cannot be read or written, or if the input
/// does not assemble.
pub fn assemble_file(
    input_file: &OsStr,
    output_file: Option<&Path>,
    target: &Target,
) -> Result<Vec<u8>, AssemblerFailure> {
    let raw = read_input(input_file)?;
    let body = String::from_utf8(raw).map_err(|e| AssemblerFailure::IoErrorOnInput {
        filename: input_file.to_owned(),
        error: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
    })?;
    let bytes =
        assemble_for_target(&body, target).map_err(|diagnostic| AssemblerFailure::BadSource {
            filename: input_file.to_owned(),
            diagnostic,
        })?;
    if let Some(path) = output_file {
        write_output(path, &bytes)?;
        event!(
            Level::INFO,
            "wrote {} bytes to {}",
            bytes.len(),
            path.display()
        );
    }
    Ok(bytes)
}

/// Decode the bytecode in `input_file`.
///
/// # Errors
///
/// Fails if the file cannot be read or does not hold valid bytecode.
pub fn disassemble_file(
    input_file: &OsStr,
    target: &Target,
) -> Result<Vec<DecodedOperation>, AssemblerFailure> {
    let bytes = read_input(input_file)?;
    disassemble(&bytes, target).map_err(|failure| AssemblerFailure::BadBytecode {
        filename: input_file.to_owned(),
        failure,
    })
}
