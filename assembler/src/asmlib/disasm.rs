//! Decode bytecode back into operations.
//!
//! The output of [`disassemble`] displays in the assembler's own
//! syntax, so assembling it for the same target reproduces the input
//! (provided the input used the shortest LEB128 encodings).
use std::error::Error;
use std::fmt::{self, Display, Formatter};

use tracing::{event, Level};

use base::prelude::*;


/// Describes why some bytes could not be decoded.  Each variant
/// carries the offset of the operation code at fault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisassemblyFailure {
    UnknownOpcode { offset: usize, code: u8 },
    Truncated { offset: usize, failure: DecodeFailed },
    MissingSize { offset: usize },
    SizeTooLarge { offset: usize },
}

impl Display for DisassemblyFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            DisassemblyFailure::UnknownOpcode { offset, code } => {
                write!(f, "unknown operation code {code:#04x} at offset {offset}")
            }
            DisassemblyFailure::Truncated { offset, failure } => {
                write!(f, "operation at offset {offset} is incomplete: {failure}")
            }
            DisassemblyFailure::MissingSize { offset } => {
                write!(
                    f,
                    "operation at offset {offset} has a variable-length operand with no size operand before it"
                )
            }
            DisassemblyFailure::SizeTooLarge { offset } => {
                write!(
                    f,
                    "operation at offset {offset} has a size operand which exceeds the supported 64-bit range"
                )
            }
        }
    }
}

impl Error for DisassemblyFailure {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DisassemblyFailure::Truncated { failure, .. } => Some(failure),
            _ => None,
        }
    }
}

/// One operation, decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedOperation {
    offset: usize,
    operation: &'static Operation,
    operands: Vec<WideInt>,
}

impl DecodedOperation {
    /// Position of the operation code within the input.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[must_use]
    pub fn code(&self) -> u8 {
        self.operation.code()
    }

    #[must_use]
    pub fn operation(&self) -> &'static Operation {
        self.operation
    }

    #[must_use]
    pub fn operands(&self) -> &[WideInt] {
        &self.operands
    }
}

impl Display for DecodedOperation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.operation.name())?;
        let schema = self.operation.operands();
        if schema.is_empty() {
            return Ok(());
        }
        f.write_str("(")?;
        for (i, (kind, value)) in schema.iter().zip(self.operands.iter()).enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match kind {
                OperandKind::TargetAddress | OperandKind::VariableLength => {
                    write!(f, "{value:#x}")?;
                }
                OperandKind::FixedSigned(w) if value.literal_bits() > w.bits() as usize => {
                    // The most negative value of a width cannot be
                    // written in decimal, so show its bits instead.
                    let bits = w.bits() as usize;
                    let pattern = WideInt::from_le_bytes(value.to_bits(bits).as_le_bytes(), false);
                    write!(f, "{pattern:#x}")?;
                }
                _ => write!(f, "{value}")?,
            }
        }
        f.write_str(")")
    }
}

/// Decode `bytes` as a sequence of operations for `target`.
///
/// # Errors
///
/// Fails on an unknown operation code, on an operand which runs off
/// the end of the input, and on a variable-length operand whose size
/// cannot be represented.
pub fn disassemble(
    bytes: &[u8],
    target: &Target,
) -> Result<Vec<DecodedOperation>, DisassemblyFailure> {
    let order = target.byte_order();
    let mut result: Vec<DecodedOperation> = Vec::new();
    let mut last_operand: Option<WideInt> = None;
    let mut pos: usize = 0;
    while let Some(&code) = bytes.get(pos) {
        let offset = pos;
        let Some(operation) = operations().by_code(code) else {
            return Err(DisassemblyFailure::UnknownOpcode { offset, code });
        };
        pos += 1;
        let mut operands: Vec<WideInt> = Vec::with_capacity(operation.operands().len());
        for kind in operation.operands() {
            let rest: &[u8] = &bytes[pos..];
            let decoded = match kind {
                OperandKind::Uleb128 => decode_uleb128(rest),
                OperandKind::Sleb128 => decode_sleb128(rest),
                OperandKind::VariableLength => {
                    let size = last_operand
                        .as_ref()
                        .ok_or(DisassemblyFailure::MissingSize { offset })?;
                    let len: usize = size
                        .to_u64()
                        .and_then(|n| usize::try_from(n).ok())
                        .ok_or(DisassemblyFailure::SizeTooLarge { offset })?;
                    decode_fixed(rest, len, false, order)
                }
                OperandKind::FixedSigned(w) | OperandKind::FixedUnsigned(w) => {
                    decode_fixed(rest, w.bytes(), kind.is_signed(), order)
                }
                OperandKind::TargetAddress => {
                    decode_fixed(rest, target.address_width().bytes(), false, order)
                }
                OperandKind::Word => decode_fixed(rest, target.word_width().bytes(), false, order),
            };
            let (value, used) =
                decoded.map_err(|failure| DisassemblyFailure::Truncated { offset, failure })?;
            pos += used;
            last_operand = Some(value.clone());
            operands.push(value);
        }
        result.push(DecodedOperation {
            offset,
            operation,
            operands,
        });
    }
    event!(
        Level::DEBUG,
        "decoded {} operations from {} bytes",
        result.len(),
        bytes.len()
    );
    Ok(result)
}
