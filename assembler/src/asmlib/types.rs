use std::error::Error;
use std::ffi::{OsStr, OsString};
use std::fmt::{self, Display, Formatter};
use std::io::Error as IoError;
use std::ops::Range;
use std::path::PathBuf;

use super::disasm::DisassemblyFailure;
use super::source::{LineAndColumn, Source};
use super::span::Span;

/// The two phases of assembly which can reject the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// The input contains something that is not a token: a stray
    /// character, an unknown operation name or a malformed literal.
    Lexical,
    /// The tokens do not form a valid expression, or an operand
    /// cannot be encoded as its operation requires.
    Parse,
}

impl Display for DiagnosticKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DiagnosticKind::Lexical => "lexical error",
            DiagnosticKind::Parse => "parse error",
        })
    }
}

/// Describes why assembly failed, and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub(crate) kind: DiagnosticKind,
    pub(crate) location: LineAndColumn,
    pub(crate) span: Range<usize>,
    pub(crate) msg: String,
}

impl Diagnostic {
    pub(crate) fn new(kind: DiagnosticKind, source: &Source<'_>, span: Span, msg: String) -> Self {
        Diagnostic {
            kind,
            location: source.location_of(span.start),
            span: span.start..span.end,
            msg,
        }
    }

    #[must_use]
    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    #[must_use]
    pub fn location(&self) -> &LineAndColumn {
        &self.location
    }

    /// The byte range of the input at fault.
    #[must_use]
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    #[must_use]
    pub fn message(&self) -> &str {
        self.msg.as_str()
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.msg)
    }
}

impl Error for Diagnostic {}

#[derive(Debug)]
pub enum AssemblerFailure {
    IoErrorOnStdout {
        error: IoError,
    },
    IoErrorOnInput {
        filename: OsString,
        error: IoError,
    },
    IoErrorOnOutput {
        filename: PathBuf,
        error: IoError,
    },
    BadSource {
        filename: OsString,
        diagnostic: Diagnostic,
    },
    BadBytecode {
        filename: OsString,
        failure: DisassemblyFailure,
    },
}

fn write_os_string(f: &mut Formatter<'_>, s: &OsStr) -> Result<(), fmt::Error> {
    match s.to_str() {
        Some(unicode_name) => f.write_str(unicode_name),
        None => write!(
            f,
            "{} (some non-Unicode characters changed to make it printable)",
            s.to_string_lossy(),
        ),
    }
}

impl Display for AssemblerFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            AssemblerFailure::IoErrorOnStdout { error } => {
                write!(f, "error writing on stdout: {error}")
            }
            AssemblerFailure::IoErrorOnInput { filename, error } => {
                f.write_str("I/O error reading input file ")?;
                write_os_string(f, filename)?;
                write!(f, ": {error}")
            }
            AssemblerFailure::IoErrorOnOutput { filename, error } => {
                write!(
                    f,
                    "I/O error writing output file {}: {error}",
                    filename.display(),
                )
            }
            AssemblerFailure::BadSource {
                filename,
                diagnostic,
            } => {
                write_os_string(f, filename)?;
                write!(f, ": {diagnostic}")
            }
            AssemblerFailure::BadBytecode { filename, failure } => {
                write_os_string(f, filename)?;
                write!(f, ": {failure}")
            }
        }
    }
}

impl Error for AssemblerFailure {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            AssemblerFailure::IoErrorOnStdout { error }
            | AssemblerFailure::IoErrorOnInput { error, .. }
            | AssemblerFailure::IoErrorOnOutput { error, .. } => Some(error),
            AssemblerFailure::BadSource { diagnostic, .. } => Some(diagnostic),
            AssemblerFailure::BadBytecode { failure, .. } => Some(failure),
        }
    }
}
