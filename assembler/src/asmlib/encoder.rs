//! Convert parsed operations into bytecode.
//!
//! Each operation contributes its code byte followed by its operands,
//! encoded as its schema dictates.  A `VariableLength` operand takes
//! its width from the value of the operand encoded just before it
//! (which is normally the block length operand of the same
//! operation).
use tracing::{event, Level};

use base::prelude::*;

use super::ast::{Literal, OperationCall};
use super::parser::{IncompleteCall, NO_PARENTHESES};
use super::source::Source;
use super::span::{Span, Spanned};
use super::types::{Diagnostic, DiagnosticKind};

#[cfg(test)]
mod tests;

/// LEB128 operands are declared to be this wide.
const LEB128_WIDTH: Width = Width::W64;

/// State carried from one operand to the next.
#[derive(Debug, Default)]
pub(crate) struct EncodeState {
    last_operand: Option<WideInt>,
}

impl EncodeState {
    /// The number of bytes in a variable-length operand, as given by
    /// the previous operand.
    fn variable_length_bytes(&self) -> Result<u64, String> {
        match self.last_operand.as_ref() {
            None => Err("variable-length operand has no preceding size operand".to_string()),
            Some(size) => size
                .to_u64()
                .ok_or_else(|| "size operand exceeds supported 64-bit range".to_string()),
        }
    }
}

pub(crate) struct Encoder<'a, 's> {
    source: &'a Source<'s>,
    target: Target,
    state: EncodeState,
    output: Vec<u8>,
}

impl<'a, 's> Encoder<'a, 's> {
    pub(crate) fn new(source: &'a Source<'s>, target: Target) -> Encoder<'a, 's> {
        Encoder {
            source,
            target,
            state: EncodeState::default(),
            output: Vec::new(),
        }
    }

    fn error(&self, span: Span, msg: String) -> Diagnostic {
        event!(Level::DEBUG, "cannot encode operand at {span:?}: {msg}");
        Diagnostic::new(DiagnosticKind::Parse, self.source, span, msg)
    }

    /// Encode `calls` in order.  `stop` is the position just after the
    /// last of them (the end of the input, or a token which could not
    /// be parsed).
    pub(crate) fn encode_operations(
        &mut self,
        calls: &[OperationCall],
        stop: Span,
    ) -> Result<(), Diagnostic> {
        for (i, call) in calls.iter().enumerate() {
            let following: Span = calls.get(i + 1).map_or(stop, |next| next.span());
            self.encode_call(call, following)?;
        }
        Ok(())
    }

    /// Encode the operands of an operation which precede a syntax
    /// error in its operand list.  Only the operands themselves are
    /// checked, since the list has no end.
    pub(crate) fn encode_incomplete(
        &mut self,
        incomplete: &IncompleteCall,
    ) -> Result<(), Diagnostic> {
        let call = &incomplete.call;
        let Some(op) = call.opcode.operation() else {
            return Err(self.unknown_operation(call));
        };
        self.output.push(op.code());
        let schema: &[OperandKind] = op.operands();
        for (kind, operand) in schema.iter().zip(incomplete.operands.iter()) {
            self.encode_operand(*kind, operand)?;
        }
        if let Some(extra) = incomplete.operands.get(schema.len()) {
            return Err(self.error(
                extra.span,
                format!(
                    "too many operands for {op}: expected {}, found at least {}",
                    schema.len(),
                    incomplete.operands.len()
                ),
            ));
        }
        Ok(())
    }

    pub(crate) fn finish(self) -> Vec<u8> {
        self.output
    }

    fn encode_call(&mut self, call: &OperationCall, following: Span) -> Result<(), Diagnostic> {
        let Some(op) = call.opcode.operation() else {
            return Err(self.unknown_operation(call));
        };
        let start = self.output.len();
        self.output.push(op.code());
        let schema: &[OperandKind] = op.operands();
        match (call.arguments.as_ref(), schema.is_empty()) {
            (None, true) => (),
            (Some(args), true) => {
                return Err(self.error(args.open, NO_PARENTHESES.to_string()));
            }
            (None, false) => {
                return Err(self.error(following, format!("expected '(' after {op}")));
            }
            (Some(args), false) => {
                let given = args.operands.len();
                for (i, kind) in schema.iter().enumerate() {
                    match args.operands.get(i) {
                        Some(operand) => self.encode_operand(*kind, operand)?,
                        None => {
                            return Err(self.error(
                                args.close,
                                format!(
                                    "too few operands for {op}: expected {}, found {given}",
                                    schema.len()
                                ),
                            ));
                        }
                    }
                }
                if let Some(extra) = args.operands.get(schema.len()) {
                    return Err(self.error(
                        extra.span,
                        format!(
                            "too many operands for {op}: expected {}, found {given}",
                            schema.len()
                        ),
                    ));
                }
            }
        }
        event!(
            Level::TRACE,
            "encoded {call} as {:02x?}",
            &self.output[start..]
        );
        Ok(())
    }

    fn unknown_operation(&self, call: &OperationCall) -> Diagnostic {
        self.error(
            call.span,
            format!(
                "operation code {:#04x} has no operand schema",
                call.opcode.code()
            ),
        )
    }

    fn require_unsigned(&self, operand: &Literal) -> Result<(), Diagnostic> {
        if operand.value.is_negative() {
            Err(self.error(
                operand.span,
                format!("expected unsigned operand, found {operand}"),
            ))
        } else {
            Ok(())
        }
    }

    fn require_fits(&self, operand: &Literal, width: usize) -> Result<(), Diagnostic> {
        let needed = operand.value.literal_bits();
        if needed > width {
            Err(self.error(
                operand.span,
                format!("operand value too large: needs {needed} bits, width is {width}"),
            ))
        } else {
            Ok(())
        }
    }

    fn encode_operand(&mut self, kind: OperandKind, operand: &Literal) -> Result<(), Diagnostic> {
        let order = self.target.byte_order();
        let leb_width = LEB128_WIDTH.bits() as usize;
        if !kind.is_signed() {
            self.require_unsigned(operand)?;
        }
        match kind {
            OperandKind::Uleb128 => {
                self.require_fits(operand, leb_width)?;
                encode_uleb128(&operand.value, &mut self.output);
            }
            OperandKind::Sleb128 => {
                self.require_fits(operand, leb_width)?;
                encode_sleb128(&operand.value, &mut self.output);
            }
            OperandKind::FixedSigned(width) => {
                let bits = width.bits() as usize;
                self.require_fits(operand, bits)?;
                encode_fixed(&operand.value, bits, order, &mut self.output);
            }
            OperandKind::FixedUnsigned(_) | OperandKind::TargetAddress | OperandKind::Word => {
                let Some(width) = self.target.width_of(kind) else {
                    return Err(self.error(
                        operand.span,
                        format!("{kind} operands have no fixed width"),
                    ));
                };
                let bits = width.bits() as usize;
                self.require_fits(operand, bits)?;
                encode_fixed(&operand.value, bits, order, &mut self.output);
            }
            OperandKind::VariableLength => {
                self.encode_variable_length(operand)?;
            }
        }
        self.state.last_operand = Some(operand.value.clone());
        Ok(())
    }

    fn encode_variable_length(&mut self, operand: &Literal) -> Result<(), Diagnostic> {
        let byte_count: u64 = self
            .state
            .variable_length_bytes()
            .map_err(|msg| self.error(operand.span, msg))?;
        let Some((bytes, bits)) = usize::try_from(byte_count)
            .ok()
            .and_then(|bytes| bytes.checked_mul(8).map(|bits| (bytes, bits)))
        else {
            return Err(self.error(
                operand.span,
                format!("variable-length operand of {byte_count} bytes is too large for this host"),
            ));
        };
        self.require_fits(operand, bits)?;
        if self.output.try_reserve_exact(bytes).is_err() {
            return Err(self.error(
                operand.span,
                format!("cannot allocate {bytes} bytes for variable-length operand"),
            ));
        }
        encode_fixed(
            &operand.value,
            bits,
            self.target.byte_order(),
            &mut self.output,
        );
        Ok(())
    }
}
