//! CPU errors
//!
//! All errors the processor core can produce

use thiserror::Error;

/// CPU error type
///
/// Address arithmetic and ALU operations wrap by definition, so the only
/// way to make the processor fail is feeding it a byte it can't decode.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CpuError {
    #[error("Undefined opcode ${opcode:0>2X} at address ${address:0>4X}")]
    UndefinedOpcode { opcode: u8, address: u16 },
}
