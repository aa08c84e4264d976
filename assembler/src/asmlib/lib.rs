//! Assembler and disassembler for DWARF location expressions.
//!
//! The input is a sequence of `DW_OP_*` operations, each followed by
//! a parenthesised operand list when the operation takes operands:
//!
//! ```text
//! DW_OP_const1u(1) DW_OP_const1u(2) DW_OP_plus  # 1 + 2
//! DW_OP_stack_value
//! ```
//!
//! [`assemble`] turns that into the bytecode a DWARF consumer
//! evaluates, and [`disassemble`] turns bytecode back into
//! operations.
#![deny(unreachable_pub)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]
#![warn(clippy::must_use_candidate)]
#![warn(clippy::semicolon_if_nothing_returned)]
#![warn(clippy::clone_on_ref_ptr)]
#![warn(clippy::missing_errors_doc)]
#![warn(clippy::explicit_iter_loop)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)] // DW_OP_* names are not code spans

mod ast;
mod disasm;
mod driver;
mod encoder;
mod lexer;
mod parser;
mod source;
mod span;
mod types;


pub use disasm::{disassemble, DecodedOperation, DisassemblyFailure};
pub use driver::*;
pub use source::LineAndColumn;
pub use types::{AssemblerFailure, Diagnostic, DiagnosticKind};
