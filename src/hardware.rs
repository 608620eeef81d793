//! MOS 6502 hardware constants

// Address space
// -------------
//
// 16-bit address space split in 256 pages of 256 bytes. The first two pages
// are special: zero page addressing modes only reach page 0 and the stack
// lives on page 1

pub const ZERO_PAGE_START: u16 = 0x0000;
pub const ZERO_PAGE_END: u16 = 0x00FF;

pub const STACK_START: u16 = 0x0100;
pub const STACK_END: u16 = 0x01FF;

// Vectors
// -------
//
// Little endian addresses stored at the top of the address space

pub const RESET_VECTOR: u16 = 0xFFFC;
pub const IRQ_BRK_VECTOR: u16 = 0xFFFE;
