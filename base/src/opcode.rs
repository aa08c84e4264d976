//! The operations of the expression language.
//!
//! Each operation has a mnemonic (for example `DW_OP_plus_uconst`),
//! a one-byte numeric code, and an ordered list of operand kinds (its
//! "schema").  The assembler looks operations up by mnemonic and the
//! disassembler looks them up by code.  The table is built once, on
//! first use, and never changes afterwards.

use std::collections::HashMap;
use std::fmt::{self, Debug, Display, Formatter};
use std::sync::OnceLock;

use super::error::TargetConfigFailed;

mod table;

/// The width of a fixed-width operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Width {
    W8,
    W16,
    W32,
    W64,
}

impl Width {
    #[must_use]
    pub const fn bits(self) -> u32 {
        match self {
            Width::W8 => 8,
            Width::W16 => 16,
            Width::W32 => 32,
            Width::W64 => 64,
        }
    }

    #[must_use]
    pub const fn bytes(self) -> usize {
        (self.bits() / 8) as usize
    }
}

impl TryFrom<u32> for Width {
    type Error = TargetConfigFailed;

    fn try_from(bits: u32) -> Result<Width, TargetConfigFailed> {
        match bits {
            8 => Ok(Width::W8),
            16 => Ok(Width::W16),
            32 => Ok(Width::W32),
            64 => Ok(Width::W64),
            other => Err(TargetConfigFailed::UnsupportedWidth(other)),
        }
    }
}

impl Display for Width {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bits())
    }
}

/// How a single operand is encoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperandKind {
    Uleb128,
    Sleb128,
    FixedSigned(Width),
    FixedUnsigned(Width),
    /// An address on the target machine; its width is a property of
    /// the target.
    TargetAddress,
    /// A section offset; 32 bits in the 32-bit DWARF format.
    Word,
    /// A block of bytes whose length is the value of the preceding
    /// operand.
    VariableLength,
}

impl OperandKind {
    /// Returns true when a negative literal is acceptable for this
    /// kind of operand.
    #[must_use]
    pub fn is_signed(self) -> bool {
        matches!(self, OperandKind::Sleb128 | OperandKind::FixedSigned(_))
    }
}

impl Display for OperandKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            OperandKind::Uleb128 => f.write_str("ULEB128"),
            OperandKind::Sleb128 => f.write_str("SLEB128"),
            OperandKind::FixedSigned(w) => write!(f, "signed {w}-bit"),
            OperandKind::FixedUnsigned(w) => write!(f, "unsigned {w}-bit"),
            OperandKind::TargetAddress => f.write_str("target address"),
            OperandKind::Word => f.write_str("word"),
            OperandKind::VariableLength => f.write_str("variable-length block"),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Operation {
    name: &'static str,
    code: u8,
    operands: &'static [OperandKind],
}

impl Operation {
    pub(crate) const fn new(
        name: &'static str,
        code: u8,
        operands: &'static [OperandKind],
    ) -> Operation {
        Operation {
            name,
            code,
            operands,
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn code(&self) -> u8 {
        self.code
    }

    #[must_use]
    pub fn operands(&self) -> &'static [OperandKind] {
        self.operands
    }
}

impl Debug for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}(0x{:02x})", self.name, self.code)
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Lookup of operations by mnemonic and by numeric code.
pub struct OperationTable {
    by_name: HashMap<&'static str, &'static Operation>,
    by_code: [Option<&'static Operation>; 256],
}

impl OperationTable {
    fn build(operations: &'static [Operation]) -> OperationTable {
        let mut by_name: HashMap<&'static str, &'static Operation> =
            HashMap::with_capacity(operations.len());
        let mut by_code: [Option<&'static Operation>; 256] = [None; 256];
        for op in operations {
            if let Some(previous) = by_name.insert(op.name, op) {
                panic!("operation table contains {} twice", previous.name);
            }
            let slot = &mut by_code[usize::from(op.code)];
            if let Some(previous) = slot {
                panic!(
                    "operation table gives code 0x{:02x} to both {} and {}",
                    op.code, previous.name, op.name
                );
            }
            *slot = Some(op);
        }
        OperationTable { by_name, by_code }
    }

    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&'static Operation> {
        self.by_name.get(name).copied()
    }

    /// Codes which have no operand schema are not valid operations,
    /// so they are not found.
    #[must_use]
    pub fn by_code(&self, code: u8) -> Option<&'static Operation> {
        self.by_code[usize::from(code)]
    }

    /// Iterates over the operations in order of their codes.
    pub fn iter(&self) -> impl Iterator<Item = &'static Operation> + '_ {
        self.by_code.iter().filter_map(|slot| *slot)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// Returns the process-wide operation table.
pub fn operations() -> &'static OperationTable {
    static TABLE: OnceLock<OperationTable> = OnceLock::new();
    TABLE.get_or_init(|| OperationTable::build(table::OPERATIONS))
}
