//! Run a small count down program one clock cycle at a time.
//!
//! Every cycle is logged at info level. Use `RUST_LOG=debug` to also see
//! each fetched instruction, or `RUST_LOG=trace` for memory accesses.

use std::cell::RefCell;
use std::rc::Rc;

use log::{info, LevelFilter};
use mos6502::{Cpu, CpuState, Memory, Ram, SharedMemory, SharedRam};

const PROGRAM_START: u16 = 0x0600;
const RESULT: u16 = 0x0010;

// Count X down from 5, storing every value in page zero, then stop on BRK
const PROGRAM: [u8; 10] = [
    0xA2, 0x05, // LDX #$05
    0x86, 0x10, // STX $10
    0xCA, //       DEX
    0xD0, 0xFB, // BNE -5
    0x86, 0x10, // STX $10
    0x00, //       BRK
];

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let mut ram = Ram::new();
    ram.load(PROGRAM_START, &PROGRAM);
    ram.set_reset_vector(PROGRAM_START);
    let ram: SharedRam = Rc::new(RefCell::new(ram));
    let memory: SharedMemory = ram.clone();

    let mut cpu = Cpu::new(memory);
    let end = PROGRAM_START + PROGRAM.len() as u16 - 1;

    while !(cpu.pc() == end && cpu.state() == CpuState::Idle) {
        cpu.step()?;
        info!(
            "cycle {:>3} | {:?} | remaining {}",
            cpu.total_cycles(),
            cpu.registers(),
            cpu.cycles_remaining()
        );
    }

    let result = ram.borrow().read(RESULT);
    println!("Done after {} cycles, ${RESULT:0>4X} = {result}", cpu.total_cycles());

    Ok(())
}
