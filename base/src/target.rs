//! Description of the machine for which bytecode is produced.
//!
//! Only three properties of the target affect the encoding: the
//! width of a target address, the width of a "word" (a section
//! offset, which is 32 bits in the 32-bit DWARF format and 64 bits in
//! the 64-bit DWARF format), and the byte order of fixed-width
//! operands.  LEB128 operands are the same on every target.

use std::fmt::{self, Display, Formatter};

use super::error::TargetConfigFailed;
use super::opcode::{OperandKind, Width};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    #[default]
    Little,
    Big,
}

impl Display for ByteOrder {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ByteOrder::Little => "little-endian",
            ByteOrder::Big => "big-endian",
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Target {
    address: Width,
    word: Width,
    byte_order: ByteOrder,
}

impl Default for Target {
    /// A 64-bit little-endian machine using the 32-bit DWARF format.
    fn default() -> Target {
        Target {
            address: Width::W64,
            word: Width::W32,
            byte_order: ByteOrder::Little,
        }
    }
}

impl Target {
    /// Describe a target.  The word width must be 32 or 64 bits.
    ///
    /// # Errors
    ///
    /// Returns [`TargetConfigFailed::UnsupportedWordWidth`] if `word`
    /// is narrower than 32 bits.
    pub fn new(
        address: Width,
        word: Width,
        byte_order: ByteOrder,
    ) -> Result<Target, TargetConfigFailed> {
        match word {
            Width::W32 | Width::W64 => Ok(Target {
                address,
                word,
                byte_order,
            }),
            Width::W8 | Width::W16 => Err(TargetConfigFailed::UnsupportedWordWidth(word.bits())),
        }
    }

    #[must_use]
    pub fn address_width(&self) -> Width {
        self.address
    }

    #[must_use]
    pub fn word_width(&self) -> Width {
        self.word
    }

    #[must_use]
    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Returns the encoded width of an operand of kind `kind`, for
    /// those kinds whose width does not depend on the operand's
    /// value (or on the value of a preceding operand).
    #[must_use]
    pub fn width_of(&self, kind: OperandKind) -> Option<Width> {
        match kind {
            OperandKind::FixedSigned(w) | OperandKind::FixedUnsigned(w) => Some(w),
            OperandKind::TargetAddress => Some(self.address),
            OperandKind::Word => Some(self.word),
            OperandKind::Uleb128 | OperandKind::Sleb128 | OperandKind::VariableLength => None,
        }
    }
}

impl Display for Target {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-bit address, {}-bit word, {}",
            self.address.bits(),
            self.word.bits(),
            self.byte_order
        )
    }
}

#[test]
fn test_target_rejects_narrow_words() {
    assert_eq!(
        Target::new(Width::W32, Width::W16, ByteOrder::Big),
        Err(TargetConfigFailed::UnsupportedWordWidth(16))
    );
    let t = Target::new(Width::W32, Width::W64, ByteOrder::Big).expect("valid target");
    assert_eq!(t.address_width(), Width::W32);
    assert_eq!(t.word_width(), Width::W64);
    assert_eq!(t.byte_order(), ByteOrder::Big);
}

#[test]
fn test_target_display() {
    assert_eq!(
        Target::default().to_string(),
        "64-bit address, 32-bit word, little-endian"
    );
}
