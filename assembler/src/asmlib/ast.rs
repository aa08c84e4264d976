//! Syntax of an expression: a sequence of operations, each with an
//! optional parenthesised operand list.
use std::fmt::{self, Display, Formatter};

use base::prelude::*;

use super::lexer::Opcode;
use super::span::{Span, Spanned};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Literal {
    pub(crate) radix: Radix,
    pub(crate) value: WideInt,
    pub(crate) span: Span,
}

impl Spanned for Literal {
    fn span(&self) -> Span {
        self.span
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.radix {
            Radix::Decimal => write!(f, "{}", self.value),
            Radix::Hexadecimal => write!(f, "{:#x}", self.value),
        }
    }
}

/// A parenthesised operand list.  The spans of the parentheses are
/// kept so that arity errors can point at them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Arguments {
    pub(crate) open: Span,
    pub(crate) operands: Vec<Literal>,
    pub(crate) close: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OperationCall {
    pub(crate) opcode: Opcode,
    pub(crate) span: Span,
    pub(crate) arguments: Option<Arguments>,
}

impl Spanned for OperationCall {
    fn span(&self) -> Span {
        self.span
    }
}

impl Display for OperationCall {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.opcode)?;
        if let Some(args) = self.arguments.as_ref() {
            f.write_str("(")?;
            for (i, operand) in args.operands.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{operand}")?;
            }
            f.write_str(")")?;
        }
        Ok(())
    }
}

/// A complete expression.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct Expression {
    pub(crate) operations: Vec<OperationCall>,
}
