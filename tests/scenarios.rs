use std::cell::RefCell;
use std::rc::Rc;

use mos6502::StatusRegisterFlag::*;
use mos6502::{
    Cpu, CpuError, CpuSettings, CpuState, Memory, Ram, SharedMemory, SharedRam,
    UndefinedOpcodePolicy,
};

const PROGRAM_START: u16 = 0x0600;

fn setup(program: &[u8], settings: CpuSettings) -> (Cpu, SharedRam) {
    let mut ram = Ram::new();
    ram.load(PROGRAM_START, program);
    ram.set_reset_vector(PROGRAM_START);

    let ram: SharedRam = Rc::new(RefCell::new(ram));
    let memory: SharedMemory = ram.clone();
    (Cpu::with_settings(memory, settings), ram)
}

/// Run until the CPU fetches the byte at `address`
fn run_until(cpu: &mut Cpu, address: u16) -> Result<u64, CpuError> {
    let start = cpu.total_cycles();
    while !(cpu.pc() == address && cpu.state() == CpuState::Idle) {
        cpu.step()?;
    }
    Ok(cpu.total_cycles() - start)
}

#[test]
fn test_count_down_loop() {
    let program = [
        0xA2, 0x05, // LDX #$05
        0xCA, //       DEX
        0xD0, 0xFD, // BNE -3
        0x00, //       BRK
    ];
    let (mut cpu, _) = setup(&program, CpuSettings::default());

    let cycles = run_until(&mut cpu, 0x0605).unwrap();

    assert_eq!(cpu.x(), 0);
    assert!(cpu.flag(Zero));
    // LDX + 5 * DEX + 4 taken BNE + 1 not taken
    assert_eq!(cycles, 2 + 5 * 2 + 4 * 3 + 2);
}

#[test]
fn test_sum_of_table() {
    let program = [
        0xA0, 0x00, //       LDY #$00
        0x18, //             CLC
        0xA9, 0x00, //       LDA #$00
        0x79, 0x00, 0x02, // ADC $0200,Y
        0xC8, //             INY
        0xC0, 0x04, //       CPY #$04
        0xD0, 0xF8, //       BNE -8
        0x85, 0x10, //       STA $10
        0x00, //             BRK
    ];
    let (mut cpu, ram) = setup(&program, CpuSettings::default());
    ram.borrow_mut().load(0x0200, &[0x10, 0x20, 0x30, 0x40]);

    run_until(&mut cpu, 0x060F).unwrap();

    assert_eq!(cpu.accumulator(), 0xA0);
    assert_eq!(ram.borrow().read(0x0010), 0xA0);
    // left by the last CPY
    assert!(cpu.flag(Zero));
    assert!(cpu.flag(Carry));
}

#[test]
fn test_copy_block_with_indirect_indexed() {
    let program = [
        0xA0, 0x03, //       LDY #$03
        0xB1, 0x20, //       LDA ($20),Y
        0x91, 0x22, //       STA ($22),Y
        0x88, //             DEY
        0x10, 0xF9, //       BPL -7
        0x00, //             BRK
    ];
    let (mut cpu, ram) = setup(&program, CpuSettings::default());
    {
        let mut ram = ram.borrow_mut();
        // source $02FE, destination $0400
        ram.load(0x0020, &[0xFE, 0x02, 0x00, 0x04]);
        ram.load(0x02FE, &[0xDE, 0xAD, 0xBE, 0xEF]);
    }

    run_until(&mut cpu, 0x0609).unwrap();

    let ram = ram.borrow();
    let copied: Vec<u8> = (0x0400..0x0404).map(|address| ram.read(address)).collect();
    assert_eq!(copied, [0xDE, 0xAD, 0xBE, 0xEF]);
    assert_eq!(cpu.y(), 0xFF);
}

#[test]
fn test_multiply_by_ten_subroutine() {
    let program = [
        0xA9, 0x07, //       LDA #$07
        0x20, 0x08, 0x06, // JSR $0608
        0x85, 0x00, //       STA $00
        0x00, //             BRK
        // $0608: A * 10
        0x0A, //             ASL A
        0x85, 0x01, //       STA $01
        0x0A, //             ASL A
        0x0A, //             ASL A
        0x18, //             CLC
        0x65, 0x01, //       ADC $01
        0x60, //             RTS
    ];
    let (mut cpu, ram) = setup(&program, CpuSettings::default());
    cpu.set_sp(0xFF);

    run_until(&mut cpu, 0x0607).unwrap();

    assert_eq!(ram.borrow().read(0x0000), 70);
    assert_eq!(cpu.sp(), 0xFF);
}

#[test]
fn test_break_handler_and_return() {
    let program = [
        0x00, 0xEA, // BRK + break mark
        0xE8, //       INX
    ];
    let (mut cpu, ram) = setup(&program, CpuSettings::default());
    {
        let mut ram = ram.borrow_mut();
        // handler at $0700: LDA #$42; RTI
        ram.load(0x0700, &[0xA9, 0x42, 0x40]);
        ram.load(0xFFFE, &[0x00, 0x07]);
    }
    cpu.set_sp(0xFF);

    assert_eq!(cpu.step_instruction().unwrap(), 7);
    assert_eq!(cpu.pc(), 0x0700);
    assert!(cpu.flag(InterruptDisable));

    run_until(&mut cpu, 0x0602).unwrap();
    cpu.step_instruction().unwrap();

    assert_eq!(cpu.accumulator(), 0x42);
    assert_eq!(cpu.x(), 1);
    assert!(!cpu.flag(InterruptDisable));
    assert_eq!(cpu.sp(), 0xFF);
}

#[test]
fn test_halt_on_undefined_opcode_reports_location() {
    let program = [
        0xE8, // INX
        0x02, // undefined
    ];
    let (mut cpu, _) = setup(&program, CpuSettings::default());

    let error = run_until(&mut cpu, 0x0700).unwrap_err();

    assert_eq!(
        error,
        CpuError::UndefinedOpcode {
            opcode: 0x02,
            address: 0x0601
        }
    );
    assert_eq!(error.to_string(), "Undefined opcode $02 at address $0601");
    assert_eq!(cpu.pc(), 0x0601);
    assert_eq!(cpu.total_cycles(), 2);
    assert_eq!(cpu.step(), Err(error));
}

#[test]
fn test_skip_undefined_opcodes() {
    let settings = CpuSettings {
        undefined_opcode: UndefinedOpcodePolicy::Skip,
        ..Default::default()
    };
    let program = [
        0x02, 0xFF, // undefined
        0xE8, //       INX
    ];
    let (mut cpu, _) = setup(&program, settings);

    let cycles = run_until(&mut cpu, 0x0603).unwrap();

    assert_eq!(cpu.x(), 1);
    assert_eq!(cycles, 2 + 2 + 2);
}

#[test]
fn test_reset_restarts_program() {
    let program = [
        0xA9, 0x01, // LDA #$01
        0x4C, 0x00, 0x07, // JMP $0700
    ];
    let (mut cpu, ram) = setup(&program, CpuSettings::default());

    run_until(&mut cpu, 0x0700).unwrap();
    let elapsed = cpu.total_cycles();

    ram.borrow_mut().set_reset_vector(0x0602);
    cpu.reset();

    assert_eq!(cpu.pc(), 0x0602);
    assert_eq!(cpu.accumulator(), 0);
    assert_eq!(cpu.state(), CpuState::Idle);
    assert_eq!(cpu.total_cycles(), elapsed);
}
