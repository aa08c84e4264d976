use std::io::Write;

use super::super::disasm::DisassemblyFailure;
use super::*;

fn write_temp_input(contents: &[u8]) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".dwexpr")
        .tempfile()
        .expect("should be able to create a temporary file");
    file.write_all(contents)
        .expect("should be able to write a temporary file");
    file
}

#[test]
fn test_hex_dump() {
    assert_eq!(hex_dump(&[]), "");
    assert_eq!(hex_dump(&[0x08, 0x01, 0x9f]), "08 01 9f");
}

#[test]
fn test_assemble_is_default_target() {
    let source = "DW_OP_addr(1) DW_OP_call_ref(2)";
    assert_eq!(
        assemble(source),
        assemble_for_target(source, &Target::default())
    );
}

#[test]
fn test_assemble_file_with_output() {
    let input = write_temp_input(b"DW_OP_lit1 DW_OP_constu(300) # comment\n");
    let output = tempfile::Builder::new()
        .suffix(".bin")
        .tempfile()
        .expect("should be able to create a temporary file")
        .into_temp_path();
    let bytes = assemble_file(
        input.path().as_os_str(),
        Some(output.as_ref()),
        &Target::default(),
    )
    .expect("input should assemble");
    assert_eq!(bytes, vec![0x31, 0x10, 0xac, 0x02]);
    let written = std::fs::read(&output).expect("output should be readable");
    assert_eq!(written, bytes);
}

#[test]
fn test_assemble_file_without_output() {
    let input = write_temp_input(b"DW_OP_stack_value");
    assert_eq!(
        assemble_file(input.path().as_os_str(), None, &Target::default())
            .expect("input should assemble"),
        vec![0x9f]
    );
}

#[test]
fn test_assemble_file_reports_file_name() {
    let input = write_temp_input(b"DW_OP_lit1\nDW_OP_const1u(300)");
    match assemble_file(input.path().as_os_str(), None, &Target::default()) {
        Err(AssemblerFailure::BadSource {
            filename,
            diagnostic,
        }) => {
            assert_eq!(filename.as_os_str(), input.path().as_os_str());
            assert_eq!(diagnostic.location().line(), 2);
            let shown = AssemblerFailure::BadSource {
                filename,
                diagnostic,
            }
            .to_string();
            assert!(
                shown.ends_with(
                    ": line 2, column 15: operand value too large: needs 9 bits, width is 8"
                ),
                "unexpected message {shown}"
            );
        }
        other => panic!("expected a source error, got {other:?}"),
    }
}

#[test]
fn test_missing_input_file() {
    let dir = tempfile::tempdir().expect("should be able to create a temporary directory");
    let missing = dir.path().join("absent.dwexpr");
    assert!(matches!(
        assemble_file(missing.as_os_str(), None, &Target::default()),
        Err(AssemblerFailure::IoErrorOnInput { .. })
    ));
    assert!(matches!(
        disassemble_file(missing.as_os_str(), &Target::default()),
        Err(AssemblerFailure::IoErrorOnInput { .. })
    ));
}

#[test]
fn test_non_utf8_input() {
    let input = write_temp_input(&[0xff, 0xfe]);
    assert!(matches!(
        assemble_file(input.path().as_os_str(), None, &Target::default()),
        Err(AssemblerFailure::IoErrorOnInput { .. })
    ));
}

#[test]
fn test_unwritable_output() {
    let input = write_temp_input(b"DW_OP_nop");
    let dir = tempfile::tempdir().expect("should be able to create a temporary directory");
    // A directory cannot be opened for writing.
    assert!(matches!(
        assemble_file(
            input.path().as_os_str(),
            Some(dir.path()),
            &Target::default()
        ),
        Err(AssemblerFailure::IoErrorOnOutput { .. })
    ));
}

#[test]
fn test_disassemble_file() {
    let input = write_temp_input(&[0x08, 0x01, 0x9f]);
    let ops = disassemble_file(input.path().as_os_str(), &Target::default())
        .expect("bytecode should be valid");
    let shown: Vec<String> = ops.iter().map(ToString::to_string).collect();
    assert_eq!(shown, vec!["DW_OP_const1u(1)", "DW_OP_stack_value"]);

    let bad = write_temp_input(&[0x01]);
    match disassemble_file(bad.path().as_os_str(), &Target::default()) {
        Err(AssemblerFailure::BadBytecode { failure, .. }) => {
            assert_eq!(
                failure,
                DisassemblyFailure::UnknownOpcode {
                    offset: 0,
                    code: 0x01
                }
            );
        }
        other => panic!("expected a bytecode error, got {other:?}"),
    }
}

#[test]
fn test_target_from_options() {
    assert_eq!(target_from_options(64, 32, false), Ok(Target::default()));
    assert_eq!(
        target_from_options(32, 64, true),
        Target::new(Width::W32, Width::W64, ByteOrder::Big)
    );
    assert_eq!(
        target_from_options(48, 32, false),
        Err(TargetConfigFailed::UnsupportedWidth(48))
    );
    assert_eq!(
        target_from_options(64, 16, false),
        Err(TargetConfigFailed::UnsupportedWordWidth(16))
    );
}
