use std::fmt;

use crate::interfaces::Memory;
use crate::processor::registers::Registers;

pub type Opcode = u8;

/// An `Instruction` represents a single MOS 6502 opcode. It has a name, an
/// addressing mode, a base number of cycles and a function pointer to
/// execute it's corresponding CPU operation.
#[derive(Clone, Copy)]
pub struct Instruction {
    pub opcode: Opcode,
    pub name: &'static str,
    pub instruction: InstructionKind,
    pub addressing_mode: AddressingMode,
    // base cycles, without page crossing or branch penalties
    pub cycles: u8,
}

impl Instruction {
    /// Total instruction size: opcode and operand bytes
    pub fn bytes(&self) -> u8 {
        1 + self.addressing_mode.operand_bytes()
    }

    /// Read-only instructions only consume their operand. They are the
    /// only ones paying an extra cycle when indexing crosses a page
    pub fn is_read_only(&self) -> bool {
        matches!(self.instruction, InstructionKind::InternalExecOnMemoryData(_))
    }

    /// Number of extra cycles an instruction costs if page boundary is
    /// crossed while resolving its operand
    pub fn page_crossing_cost(&self) -> u8 {
        match self.instruction {
            InstructionKind::InternalExecOnMemoryData(_) => 1,
            _ => 0,
        }
    }
}

impl fmt::Debug for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instruction")
            .field("opcode", &format_args!("0x{:0>2X}", self.opcode))
            .field("name", &self.name)
            .field("addressing_mode", &self.addressing_mode)
            .field("cycles", &self.cycles)
            .finish()
    }
}

#[derive(Clone, Copy)]
pub enum InstructionKind {
    SingleByte(fn(&mut Registers)),
    InternalExecOnMemoryData(fn(&mut Registers, u8)),
    StoreOp(fn(&mut Registers) -> u8),
    ReadModifyWrite(fn(&mut Registers, u8) -> u8),
    Misc(MiscInstructionKind),
}

#[derive(Clone, Copy)]
pub enum MiscInstructionKind {
    Push(fn(&mut Registers, &mut dyn Memory)),
    Pull(fn(&mut Registers, &dyn Memory)),
    Jump(fn(&mut Registers, u16)),
    // returns whether the branch has been taken
    Branch(fn(&mut Registers, u16) -> bool),
    Call(fn(&mut Registers, u16, &mut dyn Memory)),
    Return(fn(&mut Registers, &dyn Memory)),
    Break(fn(&mut Registers, &mut dyn Memory)),
    ReturnFromInterrupt(fn(&mut Registers, &dyn Memory)),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddressingMode {
    Implied,     // Implied Addressing
    Accumulator, // Accumulator Addressing
    Immediate,   // Immediate Addressing
    Absolute,    // Absoulute Addressing
    ZeroPage,    // Zero Page Addressing
    AbsoluteX,   // Absoulute Indexed Addressing (X)
    AbsoluteY,   // Absoulute Indexed Addressing (Y)
    ZeroPageX,   // Zero Page Indexed Addressing (X)
    ZeroPageY,   // Zero Page Indexed Addressing (Y)
    IndirectX,   // Zero Page Indexed Indirect Addressing (X)
    IndirectY,   // Zero Page Indirect Indexed Addressing (Y)
    Relative,    // Relative Addressing (branch operations)
    Indirect,    // Indirect Addressing (jump operations)
}

impl AddressingMode {
    /// Three letter code used by disassemblers and traces
    pub fn code(&self) -> &'static str {
        match self {
            AddressingMode::Implied => "IMP",
            AddressingMode::Accumulator => "ACC",
            AddressingMode::Immediate => "IMM",
            AddressingMode::Absolute => "ABS",
            AddressingMode::ZeroPage => "ZPP",
            AddressingMode::AbsoluteX => "ABX",
            AddressingMode::AbsoluteY => "ABY",
            AddressingMode::ZeroPageX => "ZPX",
            AddressingMode::ZeroPageY => "ZPY",
            AddressingMode::IndirectX => "IZX",
            AddressingMode::IndirectY => "IZY",
            AddressingMode::Relative => "REL",
            AddressingMode::Indirect => "IND",
        }
    }

    /// Bytes following the opcode consumed by this mode
    pub fn operand_bytes(&self) -> u8 {
        match self {
            AddressingMode::Implied | AddressingMode::Accumulator => 0,
            AddressingMode::Immediate
            | AddressingMode::ZeroPage
            | AddressingMode::ZeroPageX
            | AddressingMode::ZeroPageY
            | AddressingMode::IndirectX
            | AddressingMode::IndirectY
            | AddressingMode::Relative => 1,
            AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY
            | AddressingMode::Indirect => 2,
        }
    }
}

impl fmt::Display for AddressingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
