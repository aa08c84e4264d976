//! Basic error reporting.

use std::error::Error;
use std::fmt::{self, Debug, Display, Formatter};

/// Represents a failure to turn the text of a numeric literal into a
/// [`WideInt`](crate::wideint::WideInt).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StringConversionFailed {
    /// There were no digits at all.
    Empty,
    /// A character which is not a digit in the literal's radix.
    NotADigit(char),
    /// A leading minus sign on a hexadecimal literal.
    NegativeHex,
}

impl Error for StringConversionFailed {}

impl Display for StringConversionFailed {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            StringConversionFailed::Empty => f.write_str("numeric literal has no digits"),
            StringConversionFailed::NotADigit(ch) => {
                write!(f, "'{ch}' is not a valid digit")
            }
            StringConversionFailed::NegativeHex => {
                f.write_str("hexadecimal literals cannot be negative")
            }
        }
    }
}

/// Represents a failure to decode an encoded operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecodeFailed {
    /// The input ended in the middle of a value.  `needed` is the
    /// number of bytes which were required and `available` is the
    /// number which remained.
    Truncated { needed: usize, available: usize },
    /// A LEB128 value ran off the end of the input while its
    /// continuation bit was still set.
    UnterminatedLeb128 { available: usize },
}

impl Error for DecodeFailed {}

impl Display for DecodeFailed {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            DecodeFailed::Truncated { needed, available } => {
                write!(
                    f,
                    "operand is truncated: needs {needed} bytes but only {available} remain"
                )
            }
            DecodeFailed::UnterminatedLeb128 { available } => {
                write!(
                    f,
                    "LEB128 operand is not terminated within the remaining {available} bytes"
                )
            }
        }
    }
}

/// Signals that a [`Target`](crate::target::Target) was requested
/// with a width the target description does not support.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetConfigFailed {
    /// Widths of address and word operands must be one of 8, 16, 32
    /// or 64 bits.
    UnsupportedWidth(u32),
    /// Words (section offsets) are either 32 or 64 bits.
    UnsupportedWordWidth(u32),
}

impl Error for TargetConfigFailed {}

impl Display for TargetConfigFailed {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            TargetConfigFailed::UnsupportedWidth(bits) => {
                write!(f, "{bits} is not a supported width (use 8, 16, 32 or 64)")
            }
            TargetConfigFailed::UnsupportedWordWidth(bits) => {
                write!(f, "{bits} is not a supported word width (use 32 or 64)")
            }
        }
    }
}
