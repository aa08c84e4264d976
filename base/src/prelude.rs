//! The prelude exports the types which are needed to describe,
//! encode and decode expression bytecode.  Providing this prelude is
//! the main purpose of the base crate.
pub use super::encoding::*;
pub use super::error::*;
pub use super::opcode::{operations, OperandKind, Operation, OperationTable, Width};
pub use super::target::{ByteOrder, Target};
pub use super::wideint::{BitPattern, Radix, WideInt};
