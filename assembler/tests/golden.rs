use std::ffi::OsStr;
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use base::prelude::*;

use assembler::*;

fn get_test_input_file_name(relative_to_manifest: &str) -> PathBuf {
    let mut location = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    location.push(relative_to_manifest);
    if location.exists() {
        location
    } else {
        panic!(
            "Cannot find input {relative_to_manifest}: {} does not exist",
            location.display()
        );
    }
}

fn get_temp_output_file_name() -> tempfile::TempPath {
    tempfile::Builder::new()
        .suffix(".bin")
        .tempfile()
        .expect("should be able to create a temporary file")
        .into_temp_path()
}

fn read_all(name: &OsStr) -> Vec<u8> {
    let mut file = File::open(name)
        .unwrap_or_else(|e| panic!("should be able to open test file {name:?}: {e}"));
    let mut contents = Vec::new();
    file.read_to_end(&mut contents)
        .unwrap_or_else(|e| panic!("unexpected read error on {name:?}: {e}"));
    contents
}

fn files_are_identical(expected: &OsStr, got: &OsStr) -> Result<(), String> {
    let expected_bytes = read_all(expected);
    let got_bytes = read_all(got);
    if let Some(offset) = expected_bytes
        .iter()
        .zip(got_bytes.iter())
        .position(|(exp, got)| exp != got)
    {
        return Err(format!(
            "difference at position {offset}: expected byte {:#04x} but got {:#04x}",
            expected_bytes[offset], got_bytes[offset]
        ));
    }
    if expected_bytes.len() != got_bytes.len() {
        return Err(format!(
            "wrong file length: {:?} is {} bytes but {:?} is {} bytes",
            expected,
            expected_bytes.len(),
            got,
            got_bytes.len()
        ));
    }
    Ok(())
}

fn assembler_golden_output_test(
    input_relative_path: &str,
    golden_output_relative_path: &str,
) -> Result<(), String> {
    let input = get_test_input_file_name(input_relative_path);
    let golden = get_test_input_file_name(golden_output_relative_path);
    let actual_output = get_temp_output_file_name();

    match assemble_file(
        input.as_os_str(),
        Some(actual_output.as_ref()),
        &Target::default(),
    ) {
        Ok(_) => files_are_identical(golden.as_os_str(), actual_output.as_os_str()).map_err(|e| {
            format!(
                "{} and {} are not identical: {e}",
                golden.display(),
                actual_output.display(),
            )
        }),
        Err(e) => Err(format!("failed to assemble {input_relative_path}: {e}")),
    }
}

#[test]
fn golden_output_assembling_frame_base_expression() {
    assembler_golden_output_test("testdata/frame-base.dwexpr", "testdata/frame-base.bin")
        .expect("actual and golden outputs should have been identical");
}

#[test]
fn golden_output_disassembles_to_equivalent_source() {
    let golden = get_test_input_file_name("testdata/frame-base.bin");
    let target = Target::default();
    let ops = disassemble_file(golden.as_os_str(), &target)
        .expect("golden output should disassemble");
    let text: Vec<String> = ops.iter().map(ToString::to_string).collect();
    assert_eq!(text[0], "DW_OP_breg7(-8)");
    assert_eq!(text[4], "DW_OP_addr(0xdeadbeef)");
    assert_eq!(text[9], "DW_OP_implicit_value(3, 0x10203)");
    let again = assemble_for_target(&text.join("\n"), &target).expect("output reassembles");
    assert_eq!(again, read_all(golden.as_os_str()));
}
