//! Grammar of an expression:
//!
//! ```text
//! expression := operation*
//! operation  := OP-NAME [ '(' [ literal (',' literal)* ] ')' ]
//! literal    := DECIMAL | HEX
//! ```
//!
//! The grammar accepts an operand list (even an empty one) after any
//! operation.  Whether that list matches the operation's schema is
//! checked by the encoder, which knows the schema.
use chumsky::error::{Rich, RichPattern};
use chumsky::extra::Err as ErrExtra;
use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::{any, end, just, Input, IterParser, SimpleSpan};
use chumsky::select;
use chumsky::Parser;
use tracing::{event, Level};

use base::prelude::*;

use super::ast::{Arguments, Expression, Literal, OperationCall};
use super::lexer::Token as Tok;
use super::source::Source;
use super::span::Span;
use super::types::{Diagnostic, DiagnosticKind};


pub(crate) const NO_PARENTHESES: &str = "no parentheses for zero-operand operations";

pub(crate) type Extra<'a> = ErrExtra<Rich<'a, Tok>>;

type Mig<I, O> = chumsky::input::MappedInput<
    Tok,
    SimpleSpan,
    chumsky::input::Stream<std::vec::IntoIter<(Tok, SimpleSpan)>>,
    fn(I) -> O,
>;
pub(crate) type Mi = Mig<(Tok, SimpleSpan), (Tok, SimpleSpan)>;

fn literal<'a, I>() -> impl Parser<'a, I, Literal, Extra<'a>> + Clone
where
    I: Input<'a, Token = Tok, Span = Span> + ValueInput<'a>,
{
    select! {
        Tok::Decimal(value) => (Radix::Decimal, value),
        Tok::Hex(value) => (Radix::Hexadecimal, value),
    }
    .map_with(|(radix, value), extra| Literal {
        radix,
        value,
        span: extra.span(),
    })
    .labelled("numeric literal")
}

fn arguments<'a, I>() -> impl Parser<'a, I, Arguments, Extra<'a>> + Clone
where
    I: Input<'a, Token = Tok, Span = Span> + ValueInput<'a>,
{
    let open = just(Tok::LeftParen).map_with(|_, extra| extra.span());
    let close = just(Tok::RightParen).map_with(|_, extra| extra.span());
    open.then(
        literal()
            .separated_by(just(Tok::Comma))
            .collect::<Vec<Literal>>(),
    )
    .then(close)
    .map(|((open, operands), close)| Arguments {
        open,
        operands,
        close,
    })
}

fn operation<'a, I>() -> impl Parser<'a, I, OperationCall, Extra<'a>> + Clone
where
    I: Input<'a, Token = Tok, Span = Span> + ValueInput<'a>,
{
    select! {
        Tok::Operation(opcode) => opcode,
    }
    .map_with(|opcode, extra| (opcode, extra.span()))
    .labelled("operation")
    .then(arguments().or_not())
    .map(|((opcode, span), arguments)| OperationCall {
        opcode,
        span,
        arguments,
    })
}

pub(crate) fn expression<'a, I>() -> impl Parser<'a, I, Expression, Extra<'a>>
where
    I: Input<'a, Token = Tok, Span = Span> + ValueInput<'a>,
{
    operation()
        .repeated()
        .collect::<Vec<OperationCall>>()
        .then_ignore(end())
        .map(|operations| Expression { operations })
}

/// Parses as many complete operations as possible, then reports the
/// first token it could not use (if any).
fn expression_prefix<'a, I>(
) -> impl Parser<'a, I, (Vec<OperationCall>, Option<(Tok, Span)>), Extra<'a>>
where
    I: Input<'a, Token = Tok, Span = Span> + ValueInput<'a>,
{
    operation()
        .repeated()
        .collect::<Vec<OperationCall>>()
        .then(any().map_with(|tok, extra| (tok, extra.span())).or_not())
        .then_ignore(any().repeated())
}

/// The operands which follow an opening parenthesis, up to the first
/// token which cannot continue the list.
fn partial_arguments<'a, I>() -> impl Parser<'a, I, Vec<Literal>, Extra<'a>>
where
    I: Input<'a, Token = Tok, Span = Span> + ValueInput<'a>,
{
    just(Tok::LeftParen)
        .ignore_then(
            literal()
                .separated_by(just(Tok::Comma))
                .allow_trailing()
                .collect::<Vec<Literal>>(),
        )
        .then_ignore(any().repeated())
}

fn token_stream(tokens: Vec<(Tok, Span)>, eoi: Span) -> Mi {
    Stream::from_iter(tokens).map(eoi, |unchanged| unchanged)
}

/// The span used for errors found at the end of the input.
pub(crate) fn end_of_input(source: &Source<'_>) -> Span {
    let len = source.as_str().len();
    Span::new(len, len)
}

fn describe_syntax_error(e: &Rich<'_, Tok>) -> String {
    let found: String = match e.found() {
        Some(tok) => format!("'{tok}'"),
        None => "end of input".to_string(),
    };
    let mut expected: Vec<String> = e
        .expected()
        .map(|pattern| match pattern {
            RichPattern::Token(tok) => format!("'{}'", &**tok),
            RichPattern::Label(label) => label.to_string(),
            RichPattern::EndOfInput => "end of input".to_string(),
            #[allow(unreachable_patterns)]
            other => other.to_string(),
        })
        .collect();
    expected.sort();
    expected.dedup();
    match expected.as_slice() {
        [] => format!("unexpected {found}"),
        [only] => format!("expected {only}, found {found}"),
        several => format!("expected one of {}, found {found}", several.join(", ")),
    }
}

/// An operation whose operand list is broken off by a syntax error.
#[derive(Debug)]
pub(crate) struct IncompleteCall {
    /// The operation itself; its `arguments` are always `None`.
    pub(crate) call: OperationCall,
    /// The operands which precede the syntax error.
    pub(crate) operands: Vec<Literal>,
}

/// A syntax error, together with the operations which precede it.
/// The caller encodes `prefix` (and then `incomplete`) before
/// reporting `diagnostic` so that an encoding error earlier in the
/// input is reported first.
#[derive(Debug)]
pub(crate) struct SyntaxError {
    pub(crate) prefix: Vec<OperationCall>,
    /// Where the operations in `prefix` stop.
    pub(crate) stop: Span,
    pub(crate) incomplete: Option<IncompleteCall>,
    pub(crate) diagnostic: Diagnostic,
}

pub(crate) fn parse_expression(
    source: &Source<'_>,
    tokens: Vec<(Tok, Span)>,
) -> Result<Expression, SyntaxError> {
    let eoi = end_of_input(source);
    let (output, errors) = expression()
        .parse(token_stream(tokens.clone(), eoi))
        .into_output_errors();
    let first_error = errors.into_iter().min_by_key(|e| e.span().start);
    match (output, first_error) {
        (Some(expr), None) => Ok(expr),
        (_, Some(e)) => {
            let msg = describe_syntax_error(&e);
            event!(Level::DEBUG, "syntax error at {:?}: {msg}", e.span());
            let diagnostic = Diagnostic::new(DiagnosticKind::Parse, source, *e.span(), msg);
            Err(recover_prefix(source, tokens, eoi, diagnostic))
        }
        (None, None) => {
            // Chumsky always reports why it produced no output.
            let diagnostic = Diagnostic::new(
                DiagnosticKind::Parse,
                source,
                eoi,
                "failed to parse the input".to_string(),
            );
            Err(SyntaxError {
                prefix: Vec::new(),
                stop: eoi,
                incomplete: None,
                diagnostic,
            })
        }
    }
}

fn recover_prefix(
    source: &Source<'_>,
    tokens: Vec<(Tok, Span)>,
    eoi: Span,
    diagnostic: Diagnostic,
) -> SyntaxError {
    let (mut prefix, unconsumed) = expression_prefix()
        .parse(token_stream(tokens.clone(), eoi))
        .into_output()
        .unwrap_or_default();
    let mut diagnostic = diagnostic;
    let mut incomplete: Option<IncompleteCall> = None;
    let stop: Span = match unconsumed {
        Some((Tok::LeftParen, open)) => {
            // The operand list of the last operation is malformed, so
            // the prefix does not include that operation.
            match prefix.pop() {
                Some(call) if call.arguments.is_none() => {
                    let zero_operands = call
                        .opcode
                        .operation()
                        .is_some_and(|op| op.operands().is_empty());
                    let stop = call.span;
                    if zero_operands {
                        diagnostic = Diagnostic::new(
                            DiagnosticKind::Parse,
                            source,
                            open,
                            NO_PARENTHESES.to_string(),
                        );
                    } else {
                        let rest: Vec<(Tok, Span)> = tokens
                            .into_iter()
                            .skip_while(|(_, span)| *span != open)
                            .collect();
                        let operands = partial_arguments()
                            .parse(token_stream(rest, eoi))
                            .into_output()
                            .unwrap_or_default();
                        incomplete = Some(IncompleteCall { call, operands });
                    }
                    stop
                }
                Some(call) => {
                    prefix.push(call);
                    open
                }
                None => open,
            }
        }
        Some((_, span)) => span,
        None => eoi,
    };
    SyntaxError {
        prefix,
        stop,
        incomplete,
        diagnostic,
    }
}
