use std::collections::BTreeSet;

use mos6502::AddressingMode::*;
use mos6502::{AddressingMode, InstructionKind, InstructionSet};

const READ_ONLY: [&str; 13] = [
    "ADC", "AND", "BIT", "CMP", "CPX", "CPY", "EOR", "LDA", "LDX", "LDY", "ORA", "SBC", "NOP",
];

const READ_MODIFY_WRITE: [&str; 6] = ["ASL", "DEC", "INC", "LSR", "ROL", "ROR"];

#[test]
fn test_legal_opcode_count() {
    assert_eq!(InstructionSet::legal().iter().count(), 151);
}

#[test]
fn test_every_entry_sits_in_its_opcode_slot() {
    let set = InstructionSet::legal();

    for opcode in 0..=255u8 {
        if let Some(instruction) = set.lookup(opcode) {
            assert_eq!(instruction.opcode, opcode);
        }
    }
}

#[test]
fn test_mnemonics() {
    let names: BTreeSet<&str> = InstructionSet::legal().iter().map(|i| i.name).collect();

    assert_eq!(names.len(), 56);
    for name in ["ADC", "BRK", "JMP", "PHP", "RTI", "TXS", "SEI"] {
        assert!(names.contains(name), "{name} missing");
    }
}

#[test]
fn test_undefined_opcodes() {
    let set = InstructionSet::legal();

    for opcode in [0x02, 0x03, 0x1A, 0x80, 0x89, 0x9C, 0xCB, 0xEB, 0xFF] {
        assert!(set.lookup(opcode).is_none(), "0x{opcode:0>2X} is defined");
    }
}

#[test]
fn test_known_entries() {
    let set = InstructionSet::legal();
    let check = |opcode: u8, name: &str, mode: AddressingMode, cycles: u8| {
        let instruction = set.lookup(opcode).unwrap();
        assert_eq!(instruction.name, name);
        assert_eq!(instruction.addressing_mode, mode);
        assert_eq!(instruction.cycles, cycles);
    };

    check(0x69, "ADC", Immediate, 2);
    check(0x71, "ADC", IndirectY, 5);
    check(0xE1, "SBC", IndirectX, 6);
    check(0x2A, "ROL", Accumulator, 2);
    check(0x1E, "ASL", AbsoluteX, 7);
    check(0x9D, "STA", AbsoluteX, 5);
    check(0x91, "STA", IndirectY, 6);
    check(0xB6, "LDX", ZeroPageY, 4);
    check(0x6C, "JMP", Indirect, 5);
    check(0x20, "JSR", Absolute, 6);
    check(0x00, "BRK", Implied, 7);
    check(0xF0, "BEQ", Relative, 2);
}

#[test]
fn test_mode_codes() {
    let set = InstructionSet::legal();
    let codes: Vec<&str> = [0x0A, 0xA9, 0xA5, 0xB5, 0xB6, 0xAD, 0xBD, 0xB9, 0x6C, 0xA1, 0xB1, 0x10, 0xEA]
        .into_iter()
        .map(|opcode| set.lookup(opcode).unwrap().addressing_mode.code())
        .collect();

    assert_eq!(
        codes,
        ["ACC", "IMM", "ZPP", "ZPX", "ZPY", "ABS", "ABX", "ABY", "IND", "IZX", "IZY", "REL", "IMP"]
    );
    assert_eq!(IndirectY.to_string(), "IZY");
}

#[test]
fn test_instruction_sizes() {
    for instruction in InstructionSet::legal().iter() {
        let expected = match instruction.addressing_mode {
            Implied | Accumulator => 1,
            Absolute | AbsoluteX | AbsoluteY | Indirect => 3,
            _ => 2,
        };
        assert_eq!(instruction.bytes(), expected, "{instruction:?}");
    }
}

#[test]
fn test_read_only_classification() {
    for instruction in InstructionSet::legal().iter() {
        let read_only = READ_ONLY.contains(&instruction.name)
            && instruction.addressing_mode != Implied;
        assert_eq!(instruction.is_read_only(), read_only, "{instruction:?}");
    }
}

#[test]
fn test_read_only_base_cycles() {
    for instruction in InstructionSet::legal().iter().filter(|i| i.is_read_only()) {
        let expected = match instruction.addressing_mode {
            Immediate => 2,
            ZeroPage => 3,
            ZeroPageX | ZeroPageY | Absolute | AbsoluteX | AbsoluteY => 4,
            IndirectX => 6,
            IndirectY => 5,
            mode => panic!("unexpected mode {mode} for {}", instruction.name),
        };
        assert_eq!(instruction.cycles, expected, "{instruction:?}");
    }
}

#[test]
fn test_read_modify_write_base_cycles() {
    for instruction in InstructionSet::legal().iter() {
        if !READ_MODIFY_WRITE.contains(&instruction.name) {
            continue;
        }
        assert!(matches!(
            instruction.instruction,
            InstructionKind::ReadModifyWrite(_)
        ));

        let expected = match instruction.addressing_mode {
            Accumulator => 2,
            ZeroPage => 5,
            ZeroPageX | Absolute => 6,
            AbsoluteX => 7,
            mode => panic!("unexpected mode {mode} for {}", instruction.name),
        };
        assert_eq!(instruction.cycles, expected, "{instruction:?}");
    }
}

#[test]
fn test_store_base_cycles() {
    for instruction in InstructionSet::legal().iter() {
        if !matches!(instruction.instruction, InstructionKind::StoreOp(_)) {
            continue;
        }

        let expected = match instruction.addressing_mode {
            ZeroPage => 3,
            ZeroPageX | ZeroPageY | Absolute => 4,
            AbsoluteX | AbsoluteY => 5,
            IndirectX | IndirectY => 6,
            mode => panic!("unexpected mode {mode} for {}", instruction.name),
        };
        assert_eq!(instruction.cycles, expected, "{instruction:?}");
    }
}
