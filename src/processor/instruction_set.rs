use log::trace;
use once_cell::sync::Lazy;

use crate::hardware::{IRQ_BRK_VECTOR, STACK_START};
use crate::interfaces::Memory;
use crate::processor::instruction::{
    AddressingMode, Instruction, InstructionKind, MiscInstructionKind, Opcode,
};
use crate::processor::registers::Registers;
use crate::processor::status_register::{StatusRegister, StatusRegisterFlag};
use crate::utils;

use AddressingMode::*;
use InstructionKind::*;
use MiscInstructionKind::*;
use StatusRegisterFlag::*;

static LEGAL_OPCODES: Lazy<InstructionSet> = Lazy::new(InstructionSet::new_legal_opcode_set);

macro_rules! instruction {
    ($opcode:expr, $name:expr, $kind:expr, $addr_mode:expr, $cycles:expr) => {
        Instruction {
            opcode: $opcode,
            name: $name,
            instruction: $kind,
            addressing_mode: $addr_mode,
            cycles: $cycles,
        }
    };
}

/// Decode table with one slot per opcode byte
pub struct InstructionSet {
    instructions: [Option<Instruction>; 256],
}

impl InstructionSet {
    /// Documented NMOS 6502 instruction set, shared by every CPU
    pub fn legal() -> &'static InstructionSet {
        &LEGAL_OPCODES
    }

    #[rustfmt::skip]
    pub fn new_legal_opcode_set() -> Self {
        let mut instructions: [Option<Instruction>; 256] = [None; 256];

        let legal = [
            // Transfer instructions
            instruction!(0xA9, "LDA", InternalExecOnMemoryData(lda), Immediate, 2),
            instruction!(0xA5, "LDA", InternalExecOnMemoryData(lda), ZeroPage, 3),
            instruction!(0xB5, "LDA", InternalExecOnMemoryData(lda), ZeroPageX, 4),
            instruction!(0xAD, "LDA", InternalExecOnMemoryData(lda), Absolute, 4),
            instruction!(0xBD, "LDA", InternalExecOnMemoryData(lda), AbsoluteX, 4),
            instruction!(0xB9, "LDA", InternalExecOnMemoryData(lda), AbsoluteY, 4),
            instruction!(0xA1, "LDA", InternalExecOnMemoryData(lda), IndirectX, 6),
            instruction!(0xB1, "LDA", InternalExecOnMemoryData(lda), IndirectY, 5),

            instruction!(0xA2, "LDX", InternalExecOnMemoryData(ldx), Immediate, 2),
            instruction!(0xA6, "LDX", InternalExecOnMemoryData(ldx), ZeroPage, 3),
            instruction!(0xB6, "LDX", InternalExecOnMemoryData(ldx), ZeroPageY, 4),
            instruction!(0xAE, "LDX", InternalExecOnMemoryData(ldx), Absolute, 4),
            instruction!(0xBE, "LDX", InternalExecOnMemoryData(ldx), AbsoluteY, 4),

            instruction!(0xA0, "LDY", InternalExecOnMemoryData(ldy), Immediate, 2),
            instruction!(0xA4, "LDY", InternalExecOnMemoryData(ldy), ZeroPage, 3),
            instruction!(0xB4, "LDY", InternalExecOnMemoryData(ldy), ZeroPageX, 4),
            instruction!(0xAC, "LDY", InternalExecOnMemoryData(ldy), Absolute, 4),
            instruction!(0xBC, "LDY", InternalExecOnMemoryData(ldy), AbsoluteX, 4),

            instruction!(0x85, "STA", StoreOp(sta), ZeroPage, 3),
            instruction!(0x95, "STA", StoreOp(sta), ZeroPageX, 4),
            instruction!(0x8D, "STA", StoreOp(sta), Absolute, 4),
            instruction!(0x9D, "STA", StoreOp(sta), AbsoluteX, 5),
            instruction!(0x99, "STA", StoreOp(sta), AbsoluteY, 5),
            instruction!(0x81, "STA", StoreOp(sta), IndirectX, 6),
            instruction!(0x91, "STA", StoreOp(sta), IndirectY, 6),

            instruction!(0x86, "STX", StoreOp(stx), ZeroPage, 3),
            instruction!(0x96, "STX", StoreOp(stx), ZeroPageY, 4),
            instruction!(0x8E, "STX", StoreOp(stx), Absolute, 4),

            instruction!(0x84, "STY", StoreOp(sty), ZeroPage, 3),
            instruction!(0x94, "STY", StoreOp(sty), ZeroPageX, 4),
            instruction!(0x8C, "STY", StoreOp(sty), Absolute, 4),

            instruction!(0xAA, "TAX", SingleByte(tax), Implied, 2),
            instruction!(0xA8, "TAY", SingleByte(tay), Implied, 2),
            instruction!(0xBA, "TSX", SingleByte(tsx), Implied, 2),
            instruction!(0x8A, "TXA", SingleByte(txa), Implied, 2),
            instruction!(0x9A, "TXS", SingleByte(txs), Implied, 2),
            instruction!(0x98, "TYA", SingleByte(tya), Implied, 2),

            // Stack instructions
            instruction!(0x48, "PHA", Misc(Push(pha)), Implied, 3),
            instruction!(0x08, "PHP", Misc(Push(php)), Implied, 3),
            instruction!(0x68, "PLA", Misc(Pull(pla)), Implied, 4),
            instruction!(0x28, "PLP", Misc(Pull(plp)), Implied, 4),

            // Decrements and increments
            instruction!(0xC6, "DEC", ReadModifyWrite(dec), ZeroPage, 5),
            instruction!(0xD6, "DEC", ReadModifyWrite(dec), ZeroPageX, 6),
            instruction!(0xCE, "DEC", ReadModifyWrite(dec), Absolute, 6),
            instruction!(0xDE, "DEC", ReadModifyWrite(dec), AbsoluteX, 7),

            instruction!(0xCA, "DEX", SingleByte(dex), Implied, 2),
            instruction!(0x88, "DEY", SingleByte(dey), Implied, 2),

            instruction!(0xE6, "INC", ReadModifyWrite(inc), ZeroPage, 5),
            instruction!(0xF6, "INC", ReadModifyWrite(inc), ZeroPageX, 6),
            instruction!(0xEE, "INC", ReadModifyWrite(inc), Absolute, 6),
            instruction!(0xFE, "INC", ReadModifyWrite(inc), AbsoluteX, 7),

            instruction!(0xE8, "INX", SingleByte(inx), Implied, 2),
            instruction!(0xC8, "INY", SingleByte(iny), Implied, 2),

            // Arithmetic operations
            instruction!(0x69, "ADC", InternalExecOnMemoryData(adc), Immediate, 2),
            instruction!(0x65, "ADC", InternalExecOnMemoryData(adc), ZeroPage, 3),
            instruction!(0x75, "ADC", InternalExecOnMemoryData(adc), ZeroPageX, 4),
            instruction!(0x6D, "ADC", InternalExecOnMemoryData(adc), Absolute, 4),
            instruction!(0x7D, "ADC", InternalExecOnMemoryData(adc), AbsoluteX, 4),
            instruction!(0x79, "ADC", InternalExecOnMemoryData(adc), AbsoluteY, 4),
            instruction!(0x61, "ADC", InternalExecOnMemoryData(adc), IndirectX, 6),
            instruction!(0x71, "ADC", InternalExecOnMemoryData(adc), IndirectY, 5),

            instruction!(0xE9, "SBC", InternalExecOnMemoryData(sbc), Immediate, 2),
            instruction!(0xE5, "SBC", InternalExecOnMemoryData(sbc), ZeroPage, 3),
            instruction!(0xF5, "SBC", InternalExecOnMemoryData(sbc), ZeroPageX, 4),
            instruction!(0xED, "SBC", InternalExecOnMemoryData(sbc), Absolute, 4),
            instruction!(0xFD, "SBC", InternalExecOnMemoryData(sbc), AbsoluteX, 4),
            instruction!(0xF9, "SBC", InternalExecOnMemoryData(sbc), AbsoluteY, 4),
            instruction!(0xE1, "SBC", InternalExecOnMemoryData(sbc), IndirectX, 6),
            instruction!(0xF1, "SBC", InternalExecOnMemoryData(sbc), IndirectY, 5),

            // Logical operations
            instruction!(0x29, "AND", InternalExecOnMemoryData(and), Immediate, 2),
            instruction!(0x25, "AND", InternalExecOnMemoryData(and), ZeroPage, 3),
            instruction!(0x35, "AND", InternalExecOnMemoryData(and), ZeroPageX, 4),
            instruction!(0x2D, "AND", InternalExecOnMemoryData(and), Absolute, 4),
            instruction!(0x3D, "AND", InternalExecOnMemoryData(and), AbsoluteX, 4),
            instruction!(0x39, "AND", InternalExecOnMemoryData(and), AbsoluteY, 4),
            instruction!(0x21, "AND", InternalExecOnMemoryData(and), IndirectX, 6),
            instruction!(0x31, "AND", InternalExecOnMemoryData(and), IndirectY, 5),

            instruction!(0x49, "EOR", InternalExecOnMemoryData(eor), Immediate, 2),
            instruction!(0x45, "EOR", InternalExecOnMemoryData(eor), ZeroPage, 3),
            instruction!(0x55, "EOR", InternalExecOnMemoryData(eor), ZeroPageX, 4),
            instruction!(0x4D, "EOR", InternalExecOnMemoryData(eor), Absolute, 4),
            instruction!(0x5D, "EOR", InternalExecOnMemoryData(eor), AbsoluteX, 4),
            instruction!(0x59, "EOR", InternalExecOnMemoryData(eor), AbsoluteY, 4),
            instruction!(0x41, "EOR", InternalExecOnMemoryData(eor), IndirectX, 6),
            instruction!(0x51, "EOR", InternalExecOnMemoryData(eor), IndirectY, 5),

            instruction!(0x09, "ORA", InternalExecOnMemoryData(ora), Immediate, 2),
            instruction!(0x05, "ORA", InternalExecOnMemoryData(ora), ZeroPage, 3),
            instruction!(0x15, "ORA", InternalExecOnMemoryData(ora), ZeroPageX, 4),
            instruction!(0x0D, "ORA", InternalExecOnMemoryData(ora), Absolute, 4),
            instruction!(0x1D, "ORA", InternalExecOnMemoryData(ora), AbsoluteX, 4),
            instruction!(0x19, "ORA", InternalExecOnMemoryData(ora), AbsoluteY, 4),
            instruction!(0x01, "ORA", InternalExecOnMemoryData(ora), IndirectX, 6),
            instruction!(0x11, "ORA", InternalExecOnMemoryData(ora), IndirectY, 5),

            // Shift and rotation instructions. Accumulator variants are
            // read-modify-write on A
            instruction!(0x0A, "ASL", ReadModifyWrite(asl), Accumulator, 2),
            instruction!(0x06, "ASL", ReadModifyWrite(asl), ZeroPage, 5),
            instruction!(0x16, "ASL", ReadModifyWrite(asl), ZeroPageX, 6),
            instruction!(0x0E, "ASL", ReadModifyWrite(asl), Absolute, 6),
            instruction!(0x1E, "ASL", ReadModifyWrite(asl), AbsoluteX, 7),

            instruction!(0x4A, "LSR", ReadModifyWrite(lsr), Accumulator, 2),
            instruction!(0x46, "LSR", ReadModifyWrite(lsr), ZeroPage, 5),
            instruction!(0x56, "LSR", ReadModifyWrite(lsr), ZeroPageX, 6),
            instruction!(0x4E, "LSR", ReadModifyWrite(lsr), Absolute, 6),
            instruction!(0x5E, "LSR", ReadModifyWrite(lsr), AbsoluteX, 7),

            instruction!(0x2A, "ROL", ReadModifyWrite(rol), Accumulator, 2),
            instruction!(0x26, "ROL", ReadModifyWrite(rol), ZeroPage, 5),
            instruction!(0x36, "ROL", ReadModifyWrite(rol), ZeroPageX, 6),
            instruction!(0x2E, "ROL", ReadModifyWrite(rol), Absolute, 6),
            instruction!(0x3E, "ROL", ReadModifyWrite(rol), AbsoluteX, 7),

            instruction!(0x6A, "ROR", ReadModifyWrite(ror), Accumulator, 2),
            instruction!(0x66, "ROR", ReadModifyWrite(ror), ZeroPage, 5),
            instruction!(0x76, "ROR", ReadModifyWrite(ror), ZeroPageX, 6),
            instruction!(0x6E, "ROR", ReadModifyWrite(ror), Absolute, 6),
            instruction!(0x7E, "ROR", ReadModifyWrite(ror), AbsoluteX, 7),

            // Flag instructions
            instruction!(0x18, "CLC", SingleByte(clc), Implied, 2),
            instruction!(0xD8, "CLD", SingleByte(cld), Implied, 2),
            instruction!(0x58, "CLI", SingleByte(cli), Implied, 2),
            instruction!(0xB8, "CLV", SingleByte(clv), Implied, 2),
            instruction!(0x38, "SEC", SingleByte(sec), Implied, 2),
            instruction!(0xF8, "SED", SingleByte(sed), Implied, 2),
            instruction!(0x78, "SEI", SingleByte(sei), Implied, 2),

            // Comparisons
            instruction!(0xC9, "CMP", InternalExecOnMemoryData(cmp), Immediate, 2),
            instruction!(0xC5, "CMP", InternalExecOnMemoryData(cmp), ZeroPage, 3),
            instruction!(0xD5, "CMP", InternalExecOnMemoryData(cmp), ZeroPageX, 4),
            instruction!(0xCD, "CMP", InternalExecOnMemoryData(cmp), Absolute, 4),
            instruction!(0xDD, "CMP", InternalExecOnMemoryData(cmp), AbsoluteX, 4),
            instruction!(0xD9, "CMP", InternalExecOnMemoryData(cmp), AbsoluteY, 4),
            instruction!(0xC1, "CMP", InternalExecOnMemoryData(cmp), IndirectX, 6),
            instruction!(0xD1, "CMP", InternalExecOnMemoryData(cmp), IndirectY, 5),

            instruction!(0xE0, "CPX", InternalExecOnMemoryData(cpx), Immediate, 2),
            instruction!(0xE4, "CPX", InternalExecOnMemoryData(cpx), ZeroPage, 3),
            instruction!(0xEC, "CPX", InternalExecOnMemoryData(cpx), Absolute, 4),

            instruction!(0xC0, "CPY", InternalExecOnMemoryData(cpy), Immediate, 2),
            instruction!(0xC4, "CPY", InternalExecOnMemoryData(cpy), ZeroPage, 3),
            instruction!(0xCC, "CPY", InternalExecOnMemoryData(cpy), Absolute, 4),

            // Conditional branch instructions
            instruction!(0x90, "BCC", Misc(Branch(bcc)), Relative, 2),
            instruction!(0xB0, "BCS", Misc(Branch(bcs)), Relative, 2),
            instruction!(0xF0, "BEQ", Misc(Branch(beq)), Relative, 2),
            instruction!(0x30, "BMI", Misc(Branch(bmi)), Relative, 2),
            instruction!(0xD0, "BNE", Misc(Branch(bne)), Relative, 2),
            instruction!(0x10, "BPL", Misc(Branch(bpl)), Relative, 2),
            instruction!(0x50, "BVC", Misc(Branch(bvc)), Relative, 2),
            instruction!(0x70, "BVS", Misc(Branch(bvs)), Relative, 2),

            // Jumps and subroutines
            instruction!(0x4C, "JMP", Misc(Jump(jmp)), Absolute, 3),
            instruction!(0x6C, "JMP", Misc(Jump(jmp)), Indirect, 5),
            instruction!(0x20, "JSR", Misc(Call(jsr)), Absolute, 6),
            instruction!(0x60, "RTS", Misc(Return(rts)), Implied, 6),

            // Interrupts
            instruction!(0x00, "BRK", Misc(Break(brk)), Implied, 7),
            instruction!(0x40, "RTI", Misc(ReturnFromInterrupt(rti)), Implied, 6),

            // Other
            instruction!(0x24, "BIT", InternalExecOnMemoryData(bit), ZeroPage, 3),
            instruction!(0x2C, "BIT", InternalExecOnMemoryData(bit), Absolute, 4),

            instruction!(0xEA, "NOP", SingleByte(nop), Implied, 2),
        ];

        for instruction in legal {
            let slot = &mut instructions[instruction.opcode as usize];
            debug_assert!(
                slot.is_none(),
                "Opcode 0x{:0>2X} defined twice",
                instruction.opcode
            );
            *slot = Some(instruction);
        }

        Self { instructions }
    }

    pub fn lookup(&self, opcode: Opcode) -> Option<&Instruction> {
        self.instructions[opcode as usize].as_ref()
    }

    /// Defined instructions in opcode order
    pub fn iter(&self) -> impl Iterator<Item = &Instruction> {
        self.instructions.iter().flatten()
    }
}

// Instruction Set
// ---------------

// Transfer instructions

/// LDA - Load Accumulator with Memory
///
/// Operation:
/// M -> A
///
/// Status Register
/// N Z C I D V
/// + + - - - -
pub fn lda(regs: &mut Registers, operand: u8) {
    regs.acc = operand;
    regs.sr.auto_set(regs.acc);
}

/// LDX - Load Index X with Memory
///
/// Operation:
/// M -> X
///
/// Status Register
/// N Z C I D V
/// + + - - - -
pub fn ldx(regs: &mut Registers, operand: u8) {
    regs.x_reg = operand;
    regs.sr.auto_set(regs.x_reg);
}

/// LDY - Load Index Y with Memory
///
/// Operation:
/// M -> Y
///
/// Status Register
/// N Z C I D V
/// + + - - - -
pub fn ldy(regs: &mut Registers, operand: u8) {
    regs.y_reg = operand;
    regs.sr.auto_set(regs.y_reg);
}

/// STA - Store Accumulator in Memory
///
/// Operation:
/// A -> M
pub fn sta(regs: &mut Registers) -> u8 {
    regs.acc
}

/// STX - Store Index X in Memory
///
/// Operation:
/// X -> M
pub fn stx(regs: &mut Registers) -> u8 {
    regs.x_reg
}

/// STY - Store Index Y in Memory
///
/// Operation:
/// Y -> M
pub fn sty(regs: &mut Registers) -> u8 {
    regs.y_reg
}

/// TAX - Transfer Accumulator to Index X
///
/// Status Register:
/// N Z C I D V
/// + + - - - -
pub fn tax(regs: &mut Registers) {
    regs.x_reg = regs.acc;
    regs.sr.auto_set(regs.x_reg);
}

/// TAY - Transfer Accumulator to Index Y
///
/// Status Register:
/// N Z C I D V
/// + + - - - -
pub fn tay(regs: &mut Registers) {
    regs.y_reg = regs.acc;
    regs.sr.auto_set(regs.y_reg);
}

/// TSX - Transfer Stack Pointer to Index X
///
/// Status Register:
/// N Z C I D V
/// + + - - - -
pub fn tsx(regs: &mut Registers) {
    regs.x_reg = regs.sp;
    regs.sr.auto_set(regs.x_reg);
}

/// TXA - Transfer Index X to Accumulator
///
/// Status Register:
/// N Z C I D V
/// + + - - - -
pub fn txa(regs: &mut Registers) {
    regs.acc = regs.x_reg;
    regs.sr.auto_set(regs.acc);
}

/// TXS - Transfer Index X to Stack Pointer
///
/// Unlike the other transfers, no flag is affected
///
/// Status Register:
/// N Z C I D V
/// - - - - - -
pub fn txs(regs: &mut Registers) {
    regs.sp = regs.x_reg;
}

/// TYA - Transfer Index Y to Accumulator
///
/// Status Register:
/// N Z C I D V
/// + + - - - -
pub fn tya(regs: &mut Registers) {
    regs.acc = regs.y_reg;
    regs.sr.auto_set(regs.acc);
}

// Stack instructions

pub fn push(regs: &mut Registers, data: u8, memory: &mut dyn Memory) {
    let address = STACK_START | regs.sp as u16;
    trace!("Push to ${address:0>4X} <- 0x{data:0>2X}");
    memory.write(address, data);
    regs.sp = regs.sp.wrapping_sub(1);
}

pub fn pull(regs: &mut Registers, memory: &dyn Memory) -> u8 {
    regs.sp = regs.sp.wrapping_add(1);
    let address = STACK_START | regs.sp as u16;
    let data = memory.read(address);
    trace!("Pull from ${address:0>4X} -> 0x{data:0>2X}");
    data
}

fn push_word(regs: &mut Registers, data: u16, memory: &mut dyn Memory) {
    let [low, high] = data.to_le_bytes();
    push(regs, high, memory);
    push(regs, low, memory);
}

fn pull_word(regs: &mut Registers, memory: &dyn Memory) -> u16 {
    let low = pull(regs, memory);
    let high = pull(regs, memory);
    utils::word(low, high)
}

/// PHA - Push Accumulator on Stack
///
/// Operation:
/// push A
pub fn pha(regs: &mut Registers, memory: &mut dyn Memory) {
    let acc = regs.acc;
    push(regs, acc, memory);
}

/// PHP - Push Processor Status on Stack
///
/// The status register will be pushed with the break flag and bit
/// 5 set to 1.
///
/// Operation:
/// push SR
pub fn php(regs: &mut Registers, memory: &mut dyn Memory) {
    let status = regs.sr.to_stack(true);
    push(regs, status, memory);
}

/// PLA - Pull Accumulator from Stack
///
/// Operation:
/// pull A
///
/// Status Register
/// N Z C I D V
/// + + - - - -
pub fn pla(regs: &mut Registers, memory: &dyn Memory) {
    regs.acc = pull(regs, memory);
    regs.sr.auto_set(regs.acc);
}

/// PLP - Pull Processor Status from Stack
///
/// The status register will be pulled with the break flag and bit
/// 5 ignored.
///
/// Operation:
/// pull SR
///
/// Status Register
///  N Z C I D V
///  from stack
pub fn plp(regs: &mut Registers, memory: &dyn Memory) {
    regs.sr = StatusRegister::from_stack(pull(regs, memory));
}

// Decrements and increments

/// DEC - Decrement Memory by One
///
/// Operation:
/// M - 1 -> M
///
/// Status Register
/// N Z C I D V
/// + + - - - -
pub fn dec(regs: &mut Registers, operand: u8) -> u8 {
    let result = operand.wrapping_sub(1);
    regs.sr.auto_set(result);
    result
}

/// DEX - Decrement Index X by One
///
/// Status Register
/// N Z C I D V
/// + + - - - -
pub fn dex(regs: &mut Registers) {
    regs.x_reg = regs.x_reg.wrapping_sub(1);
    regs.sr.auto_set(regs.x_reg);
}

/// DEY - Decrement Index Y by One
///
/// Status Register
/// N Z C I D V
/// + + - - - -
pub fn dey(regs: &mut Registers) {
    regs.y_reg = regs.y_reg.wrapping_sub(1);
    regs.sr.auto_set(regs.y_reg);
}

/// INC - Increment Memory by One
///
/// Operation:
/// M + 1 -> M
///
/// Status Register
/// N Z C I D V
/// + + - - - -
pub fn inc(regs: &mut Registers, operand: u8) -> u8 {
    let result = operand.wrapping_add(1);
    regs.sr.auto_set(result);
    result
}

/// INX - Increment Index X by One
///
/// Status Register
/// N Z C I D V
/// + + - - - -
pub fn inx(regs: &mut Registers) {
    regs.x_reg = regs.x_reg.wrapping_add(1);
    regs.sr.auto_set(regs.x_reg);
}

/// INY - Increment Index Y by One
///
/// Status Register
/// N Z C I D V
/// + + - - - -
pub fn iny(regs: &mut Registers) {
    regs.y_reg = regs.y_reg.wrapping_add(1);
    regs.sr.auto_set(regs.y_reg);
}

// Arithmetic operations

/// ADC - Add Memory to Accumulator with Carry
///
/// Binary mode only, the decimal flag is ignored.
///
/// Operation:
/// A + M + C -> A, C
///
/// Status Register:
/// N Z C I D V
/// + + + - - +
pub fn adc(regs: &mut Registers, operand: u8) {
    let carry = regs.sr.get(Carry) as u16;
    let sum = regs.acc as u16 + operand as u16 + carry;
    let result = sum as u8;
    // operands share a sign the result doesn't have
    let overflow = (regs.acc ^ result) & (operand ^ result) & 0x80 != 0;

    regs.acc = result;
    regs.sr.auto_set(regs.acc);
    regs.sr.set_value(Carry, sum > 0xFF);
    regs.sr.set_value(Overflow, overflow);
}

/// SBC - Subtract Memory from Accumulator with Borrow
///
/// Operation:
/// A - M - (1 - C) -> A
///
/// Status Register:
/// N Z C I D V
/// + + + - - +
pub fn sbc(regs: &mut Registers, operand: u8) {
    adc(regs, !operand);
}

// Logic operations

/// AND - AND Memory with Accumulator
///
/// Operation:
/// A AND M -> A
///
/// Status Register:
/// N Z C I D V
/// + + - - - -
pub fn and(regs: &mut Registers, operand: u8) {
    regs.acc &= operand;
    regs.sr.auto_set(regs.acc);
}

/// EOR - Exclusive-OR Memory with Accumulator
///
/// Operation:
/// A EOR M -> A
///
/// Status Register:
/// N Z C I D V
/// + + - - - -
pub fn eor(regs: &mut Registers, operand: u8) {
    regs.acc ^= operand;
    regs.sr.auto_set(regs.acc);
}

/// ORA - OR Memory with Accumulator
///
/// Operation:
/// A OR M -> A
///
/// Status Register:
/// N Z C I D V
/// + + - - - -
pub fn ora(regs: &mut Registers, operand: u8) {
    regs.acc |= operand;
    regs.sr.auto_set(regs.acc);
}

// Shift & Rotate instructions

/// ASL - Shift Left One Bit (Memory or Accumulator)
///
/// Operation:
/// C <- [76543210] <- 0
///
/// Status Register:
/// N Z C I D V
/// + + + - - -
pub fn asl(regs: &mut Registers, operand: u8) -> u8 {
    let result = operand << 1;
    regs.sr.auto_set(result);
    regs.sr.set_value(Carry, utils::bv(operand, 7) != 0);
    result
}

/// LSR - Shift One Bit Right (Memory or Accumulator)
///
/// Operation:
/// 0 -> [76543210] -> C
///
/// Status Register:
/// N Z C I D V
/// 0 + + - - -
pub fn lsr(regs: &mut Registers, operand: u8) -> u8 {
    let result = operand >> 1;
    regs.sr.auto_set(result);
    regs.sr.set_value(Carry, utils::bv(operand, 0) != 0);
    result
}

/// ROL - Rotate One Bit Left (Memory or Accumulator)
///
/// Operation:
/// C <- [76543210] <- C
///
/// Status Register:
/// N Z C I D V
/// + + + - - -
pub fn rol(regs: &mut Registers, operand: u8) -> u8 {
    let carry_in = regs.sr.get(Carry) as u8;
    let result = (operand << 1) | carry_in;
    regs.sr.auto_set(result);
    regs.sr.set_value(Carry, utils::bv(operand, 7) != 0);
    result
}

/// ROR - Rotate One Bit Right (Memory or Accumulator)
///
/// Operation:
/// C -> [76543210] -> C
///
/// Status Register:
/// N Z C I D V
/// + + + - - -
pub fn ror(regs: &mut Registers, operand: u8) -> u8 {
    let carry_in = regs.sr.get(Carry) as u8;
    let result = (operand >> 1) | (carry_in << 7);
    regs.sr.auto_set(result);
    regs.sr.set_value(Carry, utils::bv(operand, 0) != 0);
    result
}

// Flag instructions

/// CLC - Clear Carry Flag
pub fn clc(regs: &mut Registers) {
    regs.sr.clear(Carry);
}

/// CLD - Clear Decimal Mode
pub fn cld(regs: &mut Registers) {
    regs.sr.clear(Decimal);
}

/// CLI - Clear Interrupt Disable Bit
pub fn cli(regs: &mut Registers) {
    regs.sr.clear(InterruptDisable);
}

/// CLV - Clear Overflow Flag
pub fn clv(regs: &mut Registers) {
    regs.sr.clear(Overflow);
}

/// SEC - Set Carry Flag
pub fn sec(regs: &mut Registers) {
    regs.sr.set(Carry);
}

/// SED - Set Decimal Flag
pub fn sed(regs: &mut Registers) {
    regs.sr.set(Decimal);
}

/// SEI - Set Interrupt Disable Status
pub fn sei(regs: &mut Registers) {
    regs.sr.set(InterruptDisable);
}

// Comparisons

pub fn generic_cmp(regs: &mut Registers, a: u8, b: u8) {
    let diff = a.wrapping_sub(b);
    regs.sr.auto_set(diff);
    regs.sr.set_value(Carry, a >= b);
}

/// CMP - Compare Memory with Accumulator
///
/// Operation:
/// A - M
///
/// Status Register:
/// N Z C I D V
/// + + + - - -
pub fn cmp(regs: &mut Registers, operand: u8) {
    let acc = regs.acc;
    generic_cmp(regs, acc, operand);
}

/// CPX - Compare Memory and Index X
///
/// Operation:
/// X - M
///
/// Status Register:
/// N Z C I D V
/// + + + - - -
pub fn cpx(regs: &mut Registers, operand: u8) {
    let x_reg = regs.x_reg;
    generic_cmp(regs, x_reg, operand);
}

/// CPY - Compare Memory and Index Y
///
/// Operation:
/// Y - M
///
/// Status Register:
/// N Z C I D V
/// + + + - - -
pub fn cpy(regs: &mut Registers, operand: u8) {
    let y_reg = regs.y_reg;
    generic_cmp(regs, y_reg, operand);
}

// Conditional branch
//
// Branch effects receive the already resolved target and report whether
// the branch was taken, the CPU charges the extra cycles

fn branch(regs: &mut Registers, condition: bool, target: u16) -> bool {
    if condition {
        regs.pc = target;
    }
    condition
}

/// BCC - Branch on Carry Clear
///
/// Operation:
/// branch on C = 0
pub fn bcc(regs: &mut Registers, target: u16) -> bool {
    let condition = !regs.sr.get(Carry);
    branch(regs, condition, target)
}

/// BCS - Branch on Carry Set
///
/// Operation:
/// branch on C = 1
pub fn bcs(regs: &mut Registers, target: u16) -> bool {
    let condition = regs.sr.get(Carry);
    branch(regs, condition, target)
}

/// BEQ - Branch on Result Zero
///
/// Operation:
/// branch on Z = 1
pub fn beq(regs: &mut Registers, target: u16) -> bool {
    let condition = regs.sr.get(Zero);
    branch(regs, condition, target)
}

/// BMI - Branch on Result Minus
///
/// Operation:
/// branch on N = 1
pub fn bmi(regs: &mut Registers, target: u16) -> bool {
    let condition = regs.sr.get(Negative);
    branch(regs, condition, target)
}

/// BNE - Branch on Result not Zero
///
/// Operation:
/// branch on Z = 0
pub fn bne(regs: &mut Registers, target: u16) -> bool {
    let condition = !regs.sr.get(Zero);
    branch(regs, condition, target)
}

/// BPL - Branch on Result Plus
///
/// Operation:
/// branch on N = 0
pub fn bpl(regs: &mut Registers, target: u16) -> bool {
    let condition = !regs.sr.get(Negative);
    branch(regs, condition, target)
}

/// BVC - Branch on Overflow Clear
///
/// Operation:
/// branch on V = 0
pub fn bvc(regs: &mut Registers, target: u16) -> bool {
    let condition = !regs.sr.get(Overflow);
    branch(regs, condition, target)
}

/// BVS - Branch on Overflow Set
///
/// Operation:
/// branch on V = 1
pub fn bvs(regs: &mut Registers, target: u16) -> bool {
    let condition = regs.sr.get(Overflow);
    branch(regs, condition, target)
}

// Jumps and subroutines

/// JMP - Jump to New Location
///
/// Operation:
/// (PC+1) -> PCL
/// (PC+2) -> PCH
pub fn jmp(regs: &mut Registers, address: u16) {
    regs.pc = address;
}

/// JSR - Jump to New Location Saving Return Address
///
/// The pushed return address points to the last byte of the JSR
/// instruction, RTS compensates.
///
/// Operation:
/// push (PC+2)
/// (PC+1) -> PCL
/// (PC+2) -> PCH
pub fn jsr(regs: &mut Registers, address: u16, memory: &mut dyn Memory) {
    // PC already points past the operand
    let return_address = regs.pc.wrapping_sub(1);
    push_word(regs, return_address, memory);
    regs.pc = address;
}

/// RTS - Return from subroutine
///
/// Operation:
/// pull PC, PC+1 -> PC
pub fn rts(regs: &mut Registers, memory: &dyn Memory) {
    regs.pc = pull_word(regs, memory).wrapping_add(1);
}

// Interrupts

/// BRK - Force Break
///
/// BRK initiates a software interrupt similar to a hardware
/// interrupt (IRQ). The return address pushed to the stack is
/// PC+2, providing an extra byte of spacing for a break mark
/// (identifying a reason for the break.)
///
/// The status register will be pushed to the stack with the break
/// flag set to 1. However, when retrieved during RTI or by a PLP
/// instruction, the break flag will be ignored.
///
/// Operation:
/// interrupt, push PC+2, push SR
///
/// Status Register:
/// N Z C I D V
/// - - - 1 - -
pub fn brk(regs: &mut Registers, memory: &mut dyn Memory) {
    // PC already points past the opcode, skip the break mark
    let return_address = regs.pc.wrapping_add(1);
    push_word(regs, return_address, memory);
    let status = regs.sr.to_stack(true);
    push(regs, status, memory);
    regs.sr.set(InterruptDisable);

    let low = memory.read(IRQ_BRK_VECTOR);
    let high = memory.read(IRQ_BRK_VECTOR + 1);
    regs.pc = utils::word(low, high);
}

/// RTI - Return from Interrupt
///
/// The status register is pulled with the break flag and bit 5
/// ignored. Then PC is pulled from stack.
///
/// Operation:
/// pull SR, pull PC
///
/// Status Register:
///  N Z C I D V
///  from stack
pub fn rti(regs: &mut Registers, memory: &dyn Memory) {
    regs.sr = StatusRegister::from_stack(pull(regs, memory));
    regs.pc = pull_word(regs, memory);
}

// Other

/// BIT - Test Bits in Memory with Accumulator
///
/// bits 7 and 6 of operand are transfered to bit 7 and 6 of SR
/// (N,V); the zero-flag is set to the result of operand AND
/// accumulator.
///
/// Operation:
/// A AND M, M7 -> N, M6 -> V
///
/// Status Register:
///  N Z C I D V
/// M7 + - - - M6
pub fn bit(regs: &mut Registers, operand: u8) {
    regs.sr.set_value(Negative, utils::bv(operand, 7) != 0);
    regs.sr.set_value(Overflow, utils::bv(operand, 6) != 0);
    regs.sr.set_value(Zero, regs.acc & operand == 0);
}

/// NOP - No Operation
pub fn nop(_: &mut Registers) {}
