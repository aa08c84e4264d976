//! The operations defined by the DWARF standard (versions 2 to 5)
//! together with the GNU extensions whose operands can be described
//! by a fixed schema.

use super::OperandKind::{
    FixedSigned, FixedUnsigned, Sleb128, TargetAddress, Uleb128, VariableLength, Word,
};
use super::Width::{W16, W32, W64, W8};
use super::{OperandKind, Operation};

const NONE: &[OperandKind] = &[];
const ADDR: &[OperandKind] = &[TargetAddress];
const U8: &[OperandKind] = &[FixedUnsigned(W8)];
const S8: &[OperandKind] = &[FixedSigned(W8)];
const U16: &[OperandKind] = &[FixedUnsigned(W16)];
const S16: &[OperandKind] = &[FixedSigned(W16)];
const U32: &[OperandKind] = &[FixedUnsigned(W32)];
const S32: &[OperandKind] = &[FixedSigned(W32)];
const U64: &[OperandKind] = &[FixedUnsigned(W64)];
const S64: &[OperandKind] = &[FixedSigned(W64)];
const ULEB: &[OperandKind] = &[Uleb128];
const SLEB: &[OperandKind] = &[Sleb128];
const ULEB_SLEB: &[OperandKind] = &[Uleb128, Sleb128];
const ULEB_ULEB: &[OperandKind] = &[Uleb128, Uleb128];
const U8_ULEB: &[OperandKind] = &[FixedUnsigned(W8), Uleb128];
const WORD: &[OperandKind] = &[Word];
const WORD_SLEB: &[OperandKind] = &[Word, Sleb128];
/// A ULEB128 length followed by that many bytes.
const BLOCK: &[OperandKind] = &[Uleb128, VariableLength];
/// A type DIE offset, a one-byte length, then that many bytes.
const TYPED_BLOCK: &[OperandKind] = &[Uleb128, FixedUnsigned(W8), VariableLength];

macro_rules! op {
    ($name:literal, $code:literal, $operands:expr) => {
        Operation::new(concat!("DW_OP_", $name), $code, $operands)
    };
}

pub(super) static OPERATIONS: &[Operation] = &[
    op!("addr", 0x03, ADDR),
    op!("deref", 0x06, NONE),
    op!("const1u", 0x08, U8),
    op!("const1s", 0x09, S8),
    op!("const2u", 0x0a, U16),
    op!("const2s", 0x0b, S16),
    op!("const4u", 0x0c, U32),
    op!("const4s", 0x0d, S32),
    op!("const8u", 0x0e, U64),
    op!("const8s", 0x0f, S64),
    op!("constu", 0x10, ULEB),
    op!("consts", 0x11, SLEB),
    op!("dup", 0x12, NONE),
    op!("drop", 0x13, NONE),
    op!("over", 0x14, NONE),
    op!("pick", 0x15, U8),
    op!("swap", 0x16, NONE),
    op!("rot", 0x17, NONE),
    op!("xderef", 0x18, NONE),
    op!("abs", 0x19, NONE),
    op!("and", 0x1a, NONE),
    op!("div", 0x1b, NONE),
    op!("minus", 0x1c, NONE),
    op!("mod", 0x1d, NONE),
    op!("mul", 0x1e, NONE),
    op!("neg", 0x1f, NONE),
    op!("not", 0x20, NONE),
    op!("or", 0x21, NONE),
    op!("plus", 0x22, NONE),
    op!("plus_uconst", 0x23, ULEB),
    op!("shl", 0x24, NONE),
    op!("shr", 0x25, NONE),
    op!("shra", 0x26, NONE),
    op!("xor", 0x27, NONE),
    op!("bra", 0x28, S16),
    op!("eq", 0x29, NONE),
    op!("ge", 0x2a, NONE),
    op!("gt", 0x2b, NONE),
    op!("le", 0x2c, NONE),
    op!("lt", 0x2d, NONE),
    op!("ne", 0x2e, NONE),
    op!("skip", 0x2f, S16),
    op!("lit0", 0x30, NONE),
    op!("lit1", 0x31, NONE),
    op!("lit2", 0x32, NONE),
    op!("lit3", 0x33, NONE),
    op!("lit4", 0x34, NONE),
    op!("lit5", 0x35, NONE),
    op!("lit6", 0x36, NONE),
    op!("lit7", 0x37, NONE),
    op!("lit8", 0x38, NONE),
    op!("lit9", 0x39, NONE),
    op!("lit10", 0x3a, NONE),
    op!("lit11", 0x3b, NONE),
    op!("lit12", 0x3c, NONE),
    op!("lit13", 0x3d, NONE),
    op!("lit14", 0x3e, NONE),
    op!("lit15", 0x3f, NONE),
    op!("lit16", 0x40, NONE),
    op!("lit17", 0x41, NONE),
    op!("lit18", 0x42, NONE),
    op!("lit19", 0x43, NONE),
    op!("lit20", 0x44, NONE),
    op!("lit21", 0x45, NONE),
    op!("lit22", 0x46, NONE),
    op!("lit23", 0x47, NONE),
    op!("lit24", 0x48, NONE),
    op!("lit25", 0x49, NONE),
    op!("lit26", 0x4a, NONE),
    op!("lit27", 0x4b, NONE),
    op!("lit28", 0x4c, NONE),
    op!("lit29", 0x4d, NONE),
    op!("lit30", 0x4e, NONE),
    op!("lit31", 0x4f, NONE),
    op!("reg0", 0x50, NONE),
    op!("reg1", 0x51, NONE),
    op!("reg2", 0x52, NONE),
    op!("reg3", 0x53, NONE),
    op!("reg4", 0x54, NONE),
    op!("reg5", 0x55, NONE),
    op!("reg6", 0x56, NONE),
    op!("reg7", 0x57, NONE),
    op!("reg8", 0x58, NONE),
    op!("reg9", 0x59, NONE),
    op!("reg10", 0x5a, NONE),
    op!("reg11", 0x5b, NONE),
    op!("reg12", 0x5c, NONE),
    op!("reg13", 0x5d, NONE),
    op!("reg14", 0x5e, NONE),
    op!("reg15", 0x5f, NONE),
    op!("reg16", 0x60, NONE),
    op!("reg17", 0x61, NONE),
    op!("reg18", 0x62, NONE),
    op!("reg19", 0x63, NONE),
    op!("reg20", 0x64, NONE),
    op!("reg21", 0x65, NONE),
    op!("reg22", 0x66, NONE),
    op!("reg23", 0x67, NONE),
    op!("reg24", 0x68, NONE),
    op!("reg25", 0x69, NONE),
    op!("reg26", 0x6a, NONE),
    op!("reg27", 0x6b, NONE),
    op!("reg28", 0x6c, NONE),
    op!("reg29", 0x6d, NONE),
    op!("reg30", 0x6e, NONE),
    op!("reg31", 0x6f, NONE),
    op!("breg0", 0x70, SLEB),
    op!("breg1", 0x71, SLEB),
    op!("breg2", 0x72, SLEB),
    op!("breg3", 0x73, SLEB),
    op!("breg4", 0x74, SLEB),
    op!("breg5", 0x75, SLEB),
    op!("breg6", 0x76, SLEB),
    op!("breg7", 0x77, SLEB),
    op!("breg8", 0x78, SLEB),
    op!("breg9", 0x79, SLEB),
    op!("breg10", 0x7a, SLEB),
    op!("breg11", 0x7b, SLEB),
    op!("breg12", 0x7c, SLEB),
    op!("breg13", 0x7d, SLEB),
    op!("breg14", 0x7e, SLEB),
    op!("breg15", 0x7f, SLEB),
    op!("breg16", 0x80, SLEB),
    op!("breg17", 0x81, SLEB),
    op!("breg18", 0x82, SLEB),
    op!("breg19", 0x83, SLEB),
    op!("breg20", 0x84, SLEB),
    op!("breg21", 0x85, SLEB),
    op!("breg22", 0x86, SLEB),
    op!("breg23", 0x87, SLEB),
    op!("breg24", 0x88, SLEB),
    op!("breg25", 0x89, SLEB),
    op!("breg26", 0x8a, SLEB),
    op!("breg27", 0x8b, SLEB),
    op!("breg28", 0x8c, SLEB),
    op!("breg29", 0x8d, SLEB),
    op!("breg30", 0x8e, SLEB),
    op!("breg31", 0x8f, SLEB),
    op!("regx", 0x90, ULEB),
    op!("fbreg", 0x91, SLEB),
    op!("bregx", 0x92, ULEB_SLEB),
    op!("piece", 0x93, ULEB),
    op!("deref_size", 0x94, U8),
    op!("xderef_size", 0x95, U8),
    op!("nop", 0x96, NONE),
    op!("push_object_address", 0x97, NONE),
    op!("call2", 0x98, U16),
    op!("call4", 0x99, U32),
    op!("call_ref", 0x9a, WORD),
    op!("form_tls_address", 0x9b, NONE),
    op!("call_frame_cfa", 0x9c, NONE),
    op!("bit_piece", 0x9d, ULEB_ULEB),
    op!("implicit_value", 0x9e, BLOCK),
    op!("stack_value", 0x9f, NONE),
    op!("implicit_pointer", 0xa0, WORD_SLEB),
    op!("addrx", 0xa1, ULEB),
    op!("constx", 0xa2, ULEB),
    op!("entry_value", 0xa3, BLOCK),
    op!("const_type", 0xa4, TYPED_BLOCK),
    op!("regval_type", 0xa5, ULEB_ULEB),
    op!("deref_type", 0xa6, U8_ULEB),
    op!("xderef_type", 0xa7, U8_ULEB),
    op!("convert", 0xa8, ULEB),
    op!("reinterpret", 0xa9, ULEB),
    op!("GNU_push_tls_address", 0xe0, NONE),
    op!("GNU_uninit", 0xf0, NONE),
    op!("GNU_implicit_pointer", 0xf2, WORD_SLEB),
    op!("GNU_entry_value", 0xf3, BLOCK),
    op!("GNU_const_type", 0xf4, TYPED_BLOCK),
    op!("GNU_regval_type", 0xf5, ULEB_ULEB),
    op!("GNU_deref_type", 0xf6, U8_ULEB),
    op!("GNU_convert", 0xf7, ULEB),
    op!("GNU_reinterpret", 0xf9, ULEB),
    op!("GNU_parameter_ref", 0xfa, U32),
    op!("GNU_addr_index", 0xfb, ULEB),
    op!("GNU_const_index", 0xfc, ULEB),
    op!("GNU_variable_value", 0xfd, WORD),
];
