use super::super::driver::{assemble, assemble_for_target};
use super::super::source::LineAndColumn;
use super::*;

fn asm(input: &str) -> Vec<u8> {
    match assemble(input) {
        Ok(bytes) => bytes,
        Err(e) => panic!("failed to assemble {input:?}: {e}"),
    }
}

fn asm_for(input: &str, target: &Target) -> Vec<u8> {
    match assemble_for_target(input, target) {
        Ok(bytes) => bytes,
        Err(e) => panic!("failed to assemble {input:?} for {target}: {e}"),
    }
}

fn asm_error(input: &str) -> Diagnostic {
    match assemble(input) {
        Ok(bytes) => panic!("expected {input:?} to be rejected, but it assembled to {bytes:02x?}"),
        Err(e) => {
            assert_eq!(e.kind(), DiagnosticKind::Parse);
            e
        }
    }
}

fn big_endian() -> Target {
    Target::new(Width::W64, Width::W32, ByteOrder::Big).expect("valid target")
}

#[test]
fn test_fixed_unsigned() {
    assert_eq!(asm("DW_OP_const1u(1)"), vec![0x08, 0x01]);
    assert_eq!(asm("DW_OP_const1u(255)"), vec![0x08, 0xff]);
    assert_eq!(asm("DW_OP_const2u(0x1234)"), vec![0x0a, 0x34, 0x12]);
    assert_eq!(
        asm("DW_OP_const4u(0xdeadbeef)"),
        vec![0x0c, 0xef, 0xbe, 0xad, 0xde]
    );
    assert_eq!(
        asm("DW_OP_const8u(0x0102030405060708)"),
        vec![0x0e, 0x08, 0x07, 0x06, 0x05, 0x04, 0x03, 0x02, 0x01]
    );
}

#[test]
fn test_fixed_signed() {
    assert_eq!(asm("DW_OP_const1s(-1)"), vec![0x09, 0xff]);
    assert_eq!(asm("DW_OP_const1s(-127)"), vec![0x09, 0x81]);
    assert_eq!(asm("DW_OP_const2s(-2)"), vec![0x0b, 0xfe, 0xff]);
    assert_eq!(asm("DW_OP_skip(-3)"), vec![0x2f, 0xfd, 0xff]);
    // A non-negative literal is a bit pattern.
    assert_eq!(asm("DW_OP_const1s(0xff)"), vec![0x09, 0xff]);
    assert_eq!(asm("DW_OP_const1s(255)"), vec![0x09, 0xff]);
}

#[test]
fn test_fixed_width_big_endian() {
    assert_eq!(
        asm_for("DW_OP_const2u(0x1234)", &big_endian()),
        vec![0x0a, 0x12, 0x34]
    );
    assert_eq!(
        asm_for("DW_OP_const4s(-2)", &big_endian()),
        vec![0x0d, 0xff, 0xff, 0xff, 0xfe]
    );
    // LEB128 does not depend on byte order.
    assert_eq!(
        asm_for("DW_OP_constu(300)", &big_endian()),
        vec![0x10, 0xac, 0x02]
    );
}

#[test]
fn test_leb128_operands() {
    assert_eq!(asm("DW_OP_constu(300)"), vec![0x10, 0xac, 0x02]);
    assert_eq!(asm("DW_OP_constu(0)"), vec![0x10, 0x00]);
    assert_eq!(asm("DW_OP_consts(-123456)"), vec![0x11, 0xc0, 0xbb, 0x78]);
    assert_eq!(asm("DW_OP_consts(64)"), vec![0x11, 0xc0, 0x00]);
    assert_eq!(asm("DW_OP_fbreg(-8)"), vec![0x91, 0x78]);
    assert_eq!(asm("DW_OP_bregx(7, -8)"), vec![0x92, 0x07, 0x78]);
    assert_eq!(
        asm("DW_OP_constu(0xffffffffffffffff)"),
        vec![0x10, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x01]
    );
}

#[test]
fn test_negative_literal_needs_a_sign_bit() {
    // The sign bit is counted on top of the magnitude, so the most
    // negative value of each width does not fit.
    assert_eq!(
        asm_error("DW_OP_const1s(-128)").to_string(),
        "line 1, column 15: operand value too large: needs 9 bits, width is 8"
    );
    assert_eq!(
        asm_error("DW_OP_const1s(-256)").message(),
        "operand value too large: needs 10 bits, width is 8"
    );
    assert_eq!(
        asm_error("DW_OP_const2s(-32768)").message(),
        "operand value too large: needs 17 bits, width is 16"
    );
    assert_eq!(asm("DW_OP_const2s(-32767)"), vec![0x0b, 0x01, 0x80]);
}

#[test]
fn test_sleb128_operand_keeps_its_sign() {
    // Non-negative literals are magnitudes, never bit patterns.
    assert_eq!(
        asm("DW_OP_consts(0xffffffffffffffff)"),
        vec![0x11, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x01]
    );
    assert_eq!(
        asm("DW_OP_consts(9223372036854775808)"),
        vec![0x11, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x01]
    );
    assert_eq!(
        asm("DW_OP_consts(-9223372036854775807)"),
        vec![0x11, 0x81, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x7f]
    );
}

#[test]
fn test_leb128_operands_are_64_bits_wide() {
    assert_eq!(
        asm_error("DW_OP_constu(0x10000000000000000)").message(),
        "operand value too large: needs 65 bits, width is 64"
    );
    assert_eq!(
        asm_error("DW_OP_consts(-9223372036854775808)").message(),
        "operand value too large: needs 65 bits, width is 64"
    );
}

#[test]
fn test_target_address_and_word() {
    assert_eq!(
        asm("DW_OP_addr(0x1000)"),
        vec![0x03, 0x00, 0x10, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]
    );
    assert_eq!(asm("DW_OP_call_ref(1)"), vec![0x9a, 0x01, 0x00, 0x00, 0x00]);

    let small = Target::new(Width::W32, Width::W64, ByteOrder::Little).expect("valid target");
    assert_eq!(
        asm_for("DW_OP_addr(0x1000)", &small),
        vec![0x03, 0x00, 0x10, 0x00, 0x00]
    );
    assert_eq!(
        asm_for("DW_OP_call_ref(1)", &small),
        vec![0x9a, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]
    );
    match assemble_for_target("DW_OP_addr(0x100000000)", &small) {
        Err(e) => assert_eq!(
            e.message(),
            "operand value too large: needs 33 bits, width is 32"
        ),
        Ok(bytes) => panic!("33-bit address should not fit a 32-bit target: {bytes:02x?}"),
    }
}

#[test]
fn test_negative_literal_for_unsigned_operand() {
    for input in [
        "DW_OP_const1u(-1)",
        "DW_OP_constu(-1)",
        "DW_OP_addr(-1)",
        "DW_OP_call_ref(-1)",
        "DW_OP_pick(-1)",
        "DW_OP_implicit_value(1, -1)",
    ] {
        let e = asm_error(input);
        assert_eq!(e.message(), "expected unsigned operand, found -1", "{input}");
    }
    assert_eq!(
        asm_error("DW_OP_const1u(-1)").location(),
        &LineAndColumn::new(1, 15)
    );
    // Negative zero is zero.
    assert_eq!(asm("DW_OP_const1u(-0)"), vec![0x08, 0x00]);
}

#[test]
fn test_operand_too_wide() {
    let e = asm_error("DW_OP_const1u(300)");
    assert_eq!(
        e.message(),
        "operand value too large: needs 9 bits, width is 8"
    );
    assert_eq!(e.span(), 14..17);
    assert_eq!(
        asm_error("DW_OP_const1s(-129)").message(),
        "operand value too large: needs 9 bits, width is 8"
    );
    assert_eq!(
        asm_error("DW_OP_const2u(0x10000)").message(),
        "operand value too large: needs 17 bits, width is 16"
    );
}

#[test]
fn test_variable_length_block() {
    assert_eq!(
        asm("DW_OP_implicit_value(2, 0x1234)"),
        vec![0x9e, 0x02, 0x34, 0x12]
    );
    assert_eq!(asm("DW_OP_implicit_value(0, 0)"), vec![0x9e, 0x00]);
    assert_eq!(
        asm("DW_OP_implicit_value(4, 1)"),
        vec![0x9e, 0x04, 0x01, 0x00, 0x00, 0x00]
    );
    assert_eq!(
        asm_for("DW_OP_implicit_value(3, 0x010203)", &big_endian()),
        vec![0x9e, 0x03, 0x01, 0x02, 0x03]
    );
    // The block may be wider than any native integer.
    assert_eq!(
        asm("DW_OP_implicit_value(16, 0x0f0e0d0c0b0a09080706050403020100)"),
        vec![
            0x9e, 0x10, 0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c,
            0x0d, 0x0e, 0x0f
        ]
    );
}

#[test]
fn test_variable_length_width_follows_preceding_operand() {
    // In DW_OP_const_type the block length is the second operand, an
    // unsigned byte, not the ULEB128 type offset.
    assert_eq!(
        asm("DW_OP_const_type(0x30, 4, 0xdeadbeef)"),
        vec![0xa4, 0x30, 0x04, 0xef, 0xbe, 0xad, 0xde]
    );
    assert_eq!(
        asm_error("DW_OP_const_type(4, 1, 0x100)").message(),
        "operand value too large: needs 9 bits, width is 8"
    );
}

#[test]
fn test_variable_length_too_wide() {
    assert_eq!(
        asm_error("DW_OP_implicit_value(1, 0x100)").message(),
        "operand value too large: needs 9 bits, width is 8"
    );
    assert_eq!(
        asm_error("DW_OP_implicit_value(0, 1)").message(),
        "operand value too large: needs 1 bits, width is 0"
    );
}

#[test]
fn test_variable_length_size_beyond_host() {
    let e = asm_error("DW_OP_implicit_value(0xffffffffffffffff, 0)");
    assert!(
        e.message().contains("too large for this host"),
        "unexpected message: {}",
        e.message()
    );
}

#[test]
fn test_size_operand_range() {
    let mut state = EncodeState::default();
    assert_eq!(
        state.variable_length_bytes(),
        Err("variable-length operand has no preceding size operand".to_string())
    );
    state.last_operand = Some(WideInt::from(-1_i64));
    assert_eq!(
        state.variable_length_bytes(),
        Err("size operand exceeds supported 64-bit range".to_string())
    );
    state.last_operand = Some(
        WideInt::parse("0x10000000000000000", Radix::Hexadecimal).expect("valid literal"),
    );
    assert_eq!(
        state.variable_length_bytes(),
        Err("size operand exceeds supported 64-bit range".to_string())
    );
    state.last_operand = Some(WideInt::from(u64::MAX));
    assert_eq!(state.variable_length_bytes(), Ok(u64::MAX));
}

#[test]
fn test_too_few_operands() {
    let e = asm_error("DW_OP_const1u()");
    assert_eq!(
        e.message(),
        "too few operands for DW_OP_const1u: expected 1, found 0"
    );
    assert_eq!(e.location(), &LineAndColumn::new(1, 15));
    assert_eq!(
        asm_error("DW_OP_bregx(1)").message(),
        "too few operands for DW_OP_bregx: expected 2, found 1"
    );
}

#[test]
fn test_too_many_operands() {
    let e = asm_error("DW_OP_const1u(1, 2)");
    assert_eq!(
        e.message(),
        "too many operands for DW_OP_const1u: expected 1, found 2"
    );
    assert_eq!(e.location(), &LineAndColumn::new(1, 18));
}

#[test]
fn test_operands_are_checked_in_order() {
    // The bad first operand is reported, not the surplus one.
    assert_eq!(
        asm_error("DW_OP_const1u(-1, 2)").message(),
        "expected unsigned operand, found -1"
    );
}

#[test]
fn test_missing_operand_list() {
    let e = asm_error("DW_OP_const1u DW_OP_plus");
    assert_eq!(e.message(), "expected '(' after DW_OP_const1u");
    assert_eq!(e.location(), &LineAndColumn::new(1, 15));

    let e = asm_error("DW_OP_lit0\nDW_OP_const1u");
    assert_eq!(e.message(), "expected '(' after DW_OP_const1u");
    assert_eq!(e.location(), &LineAndColumn::new(2, 14));
}

#[test]
fn test_empty_parentheses_for_zero_operand_operation() {
    let e = asm_error("DW_OP_plus()");
    assert_eq!(e.message(), "no parentheses for zero-operand operations");
    assert_eq!(e.location(), &LineAndColumn::new(1, 11));
}

#[test]
fn test_failure_produces_no_bytes() {
    // The first two operations are fine, but assembly as a whole
    // fails.
    let e = asm_error("DW_OP_lit1 DW_OP_lit2 DW_OP_const1u(256)");
    assert_eq!(e.location(), &LineAndColumn::new(1, 37));
}

#[test]
fn test_entry_value_block() {
    assert_eq!(
        asm("DW_OP_entry_value(1, 0x50) DW_OP_stack_value"),
        vec![0xa3, 0x01, 0x50, 0x9f]
    );
}

mod proptests {
    use super::super::super::driver::assemble;
    use test_strategy::{proptest, Arbitrary};

    #[derive(Debug, Arbitrary)]
    struct BlockInput {
        #[strategy(0_usize..=16)]
        len: usize,
        bits: u128,
    }

    #[proptest]
    fn variable_length_width_is_eight_times_preceding_value(input: BlockInput) {
        let value: u128 = if input.len == 16 {
            input.bits
        } else {
            input.bits & ((1_u128 << (input.len * 8)) - 1)
        };
        let source = format!("DW_OP_implicit_value({}, {value:#x})", input.len);
        let bytes = assemble(&source).expect("block value fits its declared length");
        let len_byte = u8::try_from(input.len).expect("length fits one byte");
        let mut expected: Vec<u8> = vec![0x9e, len_byte];
        expected.extend_from_slice(&value.to_le_bytes()[..input.len]);
        assert_eq!(bytes, expected);
    }
}
