//! MOS 6502 CPU core

mod errors;
pub mod hardware;
mod interfaces;
mod processor;
mod settings;
mod types;
mod utils;

pub use errors::CpuError;
pub use interfaces::Memory;
pub use processor::addressing::{Operand, Resolution};
pub use processor::cpu::{Cpu, CpuState};
pub use processor::instruction::{
    AddressingMode, Instruction, InstructionKind, MiscInstructionKind, Opcode,
};
pub use processor::instruction_set::InstructionSet;
pub use processor::memory::Ram;
pub use processor::registers::Registers;
pub use processor::status_register::{StatusRegister, StatusRegisterFlag};
pub use settings::{CpuSettings, UndefinedOpcodePolicy};
pub use types::{SharedMemory, SharedRam};
