//! Split the input into tokens.
//!
//! Whitespace (including vertical tab and form feed) separates
//! tokens and `#` starts a comment which runs to the end of the line.
//! Operation names are resolved against the operation table here, so
//! the parser only ever sees valid operation codes.
use std::fmt::{self, Display, Formatter};
use std::ops::Range;

use logos::Logos;
use tracing::{event, Level};

use base::prelude::*;

use super::source::Source;
use super::span::{span, Span};
use super::types::{Diagnostic, DiagnosticKind};


/// The numeric code of an operation whose name the lexer has
/// resolved.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub(crate) struct Opcode(u8);

impl Opcode {
    pub(crate) fn code(self) -> u8 {
        self.0
    }

    pub(crate) fn operation(self) -> Option<&'static Operation> {
        operations().by_code(self.0)
    }
}

impl Display for Opcode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.operation() {
            Some(op) => f.write_str(op.name()),
            None => write!(f, "<unknown operation {:#04x}>", self.0),
        }
    }
}

#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub(crate) enum LexErrorKind {
    #[default]
    UnexpectedCharacter,
    UnknownOperation(String),
    MalformedLiteral {
        text: String,
        reason: StringConversionFailed,
    },
}

fn capture_operation(lex: &mut logos::Lexer<Token>) -> Result<Opcode, LexErrorKind> {
    let name = lex.slice();
    match operations().by_name(name) {
        Some(op) => Ok(Opcode(op.code())),
        None => Err(LexErrorKind::UnknownOperation(name.to_string())),
    }
}

fn capture_literal(lex: &logos::Lexer<Token>, radix: Radix) -> Result<WideInt, LexErrorKind> {
    let text = lex.slice();
    WideInt::parse(text, radix).map_err(|reason| LexErrorKind::MalformedLiteral {
        text: text.to_string(),
        reason,
    })
}

fn capture_decimal(lex: &mut logos::Lexer<Token>) -> Result<WideInt, LexErrorKind> {
    capture_literal(lex, Radix::Decimal)
}

fn capture_hex(lex: &mut logos::Lexer<Token>) -> Result<WideInt, LexErrorKind> {
    capture_literal(lex, Radix::Hexadecimal)
}

/// The parser consumes these tokens.
#[derive(Debug, PartialEq, Eq, Logos, Clone)]
#[logos(error = LexErrorKind)]
#[logos(skip r"[ \t\r\n\x0B\x0C]+")]
#[logos(skip r"#[^\r\n\x0B]*")]
pub(crate) enum Token {
    #[regex("[A-Za-z_][A-Za-z0-9_]*", capture_operation)]
    Operation(Opcode),

    #[regex("-?[0-9]+", capture_decimal)]
    Decimal(WideInt),

    /// Negative hexadecimal literals are matched only so that they
    /// can be rejected with a useful message.
    #[regex("-?0[xX][0-9a-fA-F]*", capture_hex)]
    Hex(WideInt),

    #[token("(")]
    LeftParen,

    #[token(")")]
    RightParen,

    #[token(",")]
    Comma,
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Token::Operation(opcode) => write!(f, "{opcode}"),
            Token::Decimal(value) => write!(f, "{value}"),
            Token::Hex(value) => write!(f, "{value:#x}"),
            Token::LeftParen => f.write_str("("),
            Token::RightParen => f.write_str(")"),
            Token::Comma => f.write_str(","),
        }
    }
}

fn describe_lex_error(kind: LexErrorKind, slice: &str) -> String {
    match kind {
        LexErrorKind::UnexpectedCharacter => match slice.chars().next() {
            Some(ch) => format!("unexpected character '{}'", ch.escape_debug()),
            None => "unexpected end of input".to_string(),
        },
        LexErrorKind::UnknownOperation(name) => format!("unknown operation '{name}'"),
        LexErrorKind::MalformedLiteral { text, reason } => {
            format!("malformed numeric literal '{text}': {reason}")
        }
    }
}

/// Convert the whole input into tokens.  Lexing stops at the first
/// error.
pub(crate) fn tokenize(source: &Source<'_>) -> Result<Vec<(Token, Span)>, Diagnostic> {
    let mut lexer = Token::lexer(source.as_str());
    let mut tokens: Vec<(Token, Span)> = Vec::new();
    while let Some(item) = lexer.next() {
        let range: Range<usize> = lexer.span();
        match item {
            Ok(tok) => tokens.push((tok, span(range))),
            Err(kind) => {
                let msg = describe_lex_error(kind, lexer.slice());
                event!(Level::DEBUG, "lexical error at {range:?}: {msg}");
                return Err(Diagnostic::new(
                    DiagnosticKind::Lexical,
                    source,
                    span(range),
                    msg,
                ));
            }
        }
    }
    Ok(tokens)
}
