//! Operand resolution for every 6502 addressing mode.
//!
//! Resolving reads the operand bytes following the opcode, advancing the
//! program counter past them, and computes where the instruction operates.

use crate::interfaces::Memory;
use crate::processor::instruction::AddressingMode;
use crate::processor::registers::Registers;
use crate::utils;

use AddressingMode::*;

/// Where an instruction finds its data
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operand {
    /// No data involved
    Implied,
    /// The accumulator itself, read and written in place
    Accumulator,
    /// A memory location. Immediate operands resolve to the address of the
    /// byte following the opcode
    Address(u16),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub operand: Operand,
    // index addition (or branch target) landed on a different page
    pub page_crossed: bool,
}

impl AddressingMode {
    /// Compute the effective operand for the instruction whose opcode has
    /// just been fetched. `registers.pc` must point to the first operand
    /// byte and is left pointing to the next instruction.
    pub fn resolve(&self, registers: &mut Registers, memory: &dyn Memory) -> Resolution {
        let (operand, page_crossed) = match self {
            Implied => (Operand::Implied, false),
            Accumulator => (Operand::Accumulator, false),
            Immediate => {
                let address = registers.pc;
                registers.pc = registers.pc.wrapping_add(1);
                (Operand::Address(address), false)
            }
            ZeroPage => {
                // Effective address is 00, ADL
                let adl = fetch(registers, memory);
                (Operand::Address(adl as u16), false)
            }
            ZeroPageX => {
                // Carry is discarded, effective address never leaves page zero
                let bal = fetch(registers, memory);
                let adl = bal.wrapping_add(registers.x_reg);
                (Operand::Address(adl as u16), false)
            }
            ZeroPageY => {
                let bal = fetch(registers, memory);
                let adl = bal.wrapping_add(registers.y_reg);
                (Operand::Address(adl as u16), false)
            }
            Absolute => {
                // Effective address is ADH, ADL
                let address = fetch_word(registers, memory);
                (Operand::Address(address), false)
            }
            AbsoluteX => {
                let base = fetch_word(registers, memory);
                indexed(base, registers.x_reg)
            }
            AbsoluteY => {
                let base = fetch_word(registers, memory);
                indexed(base, registers.y_reg)
            }
            IndirectX => {
                let bal = fetch(registers, memory);
                let pointer = bal.wrapping_add(registers.x_reg);
                let address = read_zero_page_word(memory, pointer);
                (Operand::Address(address), false)
            }
            IndirectY => {
                let pointer = fetch(registers, memory);
                let base = read_zero_page_word(memory, pointer);
                indexed(base, registers.y_reg)
            }
            Relative => {
                let offset = fetch(registers, memory) as i8;
                let target = registers.pc.wrapping_add_signed(offset as i16);
                let page_crossed = utils::page_crossed(registers.pc, target);
                (Operand::Address(target), page_crossed)
            }
            Indirect => {
                // NMOS bug: the pointer high byte is fetched without carry
                // into the page, so ($10FF) reads $10FF and $1000
                let pointer = fetch_word(registers, memory);
                let low = memory.read(pointer);
                let high = memory.read((pointer & 0xFF00) | (pointer.wrapping_add(1) & 0x00FF));
                (Operand::Address(utils::word(low, high)), false)
            }
        };

        Resolution {
            operand,
            page_crossed,
        }
    }
}

fn fetch(registers: &mut Registers, memory: &dyn Memory) -> u8 {
    let data = memory.read(registers.pc);
    registers.pc = registers.pc.wrapping_add(1);
    data
}

fn fetch_word(registers: &mut Registers, memory: &dyn Memory) -> u16 {
    let low = fetch(registers, memory);
    let high = fetch(registers, memory);
    utils::word(low, high)
}

/// Read a little endian pointer stored in page zero. The high byte wraps
/// from $FF to $00
fn read_zero_page_word(memory: &dyn Memory, pointer: u8) -> u16 {
    let low = memory.read(pointer as u16);
    let high = memory.read(pointer.wrapping_add(1) as u16);
    utils::word(low, high)
}

fn indexed(base: u16, index: u8) -> (Operand, bool) {
    let address = base.wrapping_add(index as u16);
    (Operand::Address(address), utils::page_crossed(base, address))
}
