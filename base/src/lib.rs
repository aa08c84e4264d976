//! The `base` crate defines the things about DWARF expression
//! bytecode which are useful to more than one tool.  The idea is that
//! an assembler, a disassembler or an evaluator would all depend on
//! this crate, but none of them would need to depend on each other.
//!
//! It provides the table of operations (mnemonic, numeric code and
//! operand schema), an arbitrary-precision integer type used to hold
//! operand values, and the fixed-width and LEB128 encodings of those
//! values.

pub mod encoding;
pub mod error;
pub mod opcode;
pub mod prelude;
pub mod target;
pub mod wideint;

#[test]
fn test_default_target_matches_operand_kinds() {
    use prelude::*;
    let target = Target::default();
    assert_eq!(target.width_of(OperandKind::TargetAddress), Some(Width::W64));
    assert_eq!(target.width_of(OperandKind::Word), Some(Width::W32));
    assert_eq!(
        target.width_of(OperandKind::FixedSigned(Width::W16)),
        Some(Width::W16)
    );
    assert_eq!(target.width_of(OperandKind::Uleb128), None);
    assert_eq!(target.width_of(OperandKind::VariableLength), None);
}
