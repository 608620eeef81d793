
use std::rc::Rc;

use log::{debug, error, info, trace, warn};

use crate::errors::CpuError;
use crate::hardware::RESET_VECTOR;
use crate::interfaces::Memory;
use crate::processor::addressing::{Operand, Resolution};
use crate::processor::instruction::{Instruction, InstructionKind, MiscInstructionKind};
use crate::processor::instruction_set::InstructionSet;
use crate::processor::registers::Registers;
use crate::processor::status_register::{StatusRegister, StatusRegisterFlag};
use crate::settings::{CpuSettings, UndefinedOpcodePolicy};
use crate::types::SharedMemory;
use crate::utils;

use InstructionKind::*;
use MiscInstructionKind::*;

// Cost of an undefined opcode executed as a NOP
const SKIPPED_OPCODE_CYCLES: u8 = 2;

/// MOS 6502 processor emulator.
///
/// CPU abstraction is connected to a `Memory` to perform read and
/// write operations on it. Instructions execute atomically on their
/// first cycle, the remaining ones are spent idling so the CPU keeps
/// pace with the rest of the system clock.
///
/// This implementation uses the legal opcode instruction set. Illegal
/// instructions are handled according to `CpuSettings`.
pub struct Cpu {
    registers: Registers,
    memory: SharedMemory,
    instruction_set: &'static InstructionSet,
    settings: CpuSettings,

    // cycles left before the next fetch, 0 means ready
    cycles_remaining: u8,
    total_cycles: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CpuState {
    /// Next step fetches a new instruction
    Idle,
    /// Still spending cycles of the last executed instruction
    Running,
}

impl Cpu {
    /// Create a new CPU connected to `memory`. The program counter is
    /// loaded from the reset vector.
    pub fn new(memory: SharedMemory) -> Self {
        Self::with_settings(memory, CpuSettings::default())
    }

    pub fn with_settings(memory: SharedMemory, settings: CpuSettings) -> Self {
        let mut cpu = Self {
            registers: Registers::default(),
            memory,
            instruction_set: InstructionSet::legal(),
            settings,
            cycles_remaining: 0,
            total_cycles: 0,
        };
        cpu.reset();
        cpu
    }

    /// Clear registers and flags and jump to the address stored in the
    /// reset vector. Any instruction in flight is abandoned.
    pub fn reset(&mut self) {
        let pc = {
            let memory = self.memory.borrow();
            let low = memory.read(RESET_VECTOR);
            let high = memory.read(RESET_VECTOR + 1);
            utils::word(low, high)
        };

        self.registers.reset(pc, self.settings.reset_stack_pointer);
        self.cycles_remaining = 0;
        info!("CPU reset, starting at ${pc:0>4X}");
    }

    /// Advance the CPU a single clock cycle.
    ///
    /// When idle, the instruction pointed by the program counter is
    /// fetched and fully executed. Otherwise the cycle is spent on the
    /// instruction already in progress.
    pub fn step(&mut self) -> Result<(), CpuError> {
        if self.cycles_remaining == 0 {
            let cost = self.execute()?;
            self.cycles_remaining = cost - 1;
        } else {
            self.cycles_remaining -= 1;
        }
        self.total_cycles += 1;
        Ok(())
    }

    /// Step until the current instruction is completed, or a whole new
    /// one if the CPU is idle. Returns the number of cycles spent.
    pub fn step_instruction(&mut self) -> Result<u8, CpuError> {
        let mut cycles = 0;
        loop {
            self.step()?;
            cycles += 1;
            if self.cycles_remaining == 0 {
                return Ok(cycles);
            }
        }
    }

    /// Fetch, decode and execute the instruction at PC. Returns its total
    /// cost in cycles.
    fn execute(&mut self) -> Result<u8, CpuError> {
        let shared = Rc::clone(&self.memory);
        let mut memory = shared.borrow_mut();
        let memory: &mut dyn Memory = &mut *memory;

        let address = self.registers.pc;
        let opcode = memory.read(address);

        let instruction = match self.instruction_set.lookup(opcode) {
            Some(instruction) => *instruction,
            None => return self.undefined_opcode(opcode, address),
        };

        debug!(
            "{:?} | {} {}",
            self.registers, instruction.name, instruction.addressing_mode
        );

        self.registers.pc = address.wrapping_add(1);
        let resolution = instruction
            .addressing_mode
            .resolve(&mut self.registers, &*memory);

        let mut cycles = instruction.cycles;
        if resolution.page_crossed {
            cycles += instruction.page_crossing_cost();
        }
        cycles += self.exec(&instruction, resolution, memory);

        Ok(cycles)
    }

    fn undefined_opcode(&mut self, opcode: u8, address: u16) -> Result<u8, CpuError> {
        match self.settings.undefined_opcode {
            UndefinedOpcodePolicy::Halt => {
                error!("Undefined opcode 0x{opcode:0>2X} at ${address:0>4X}, CPU halted");
                Err(CpuError::UndefinedOpcode { opcode, address })
            }
            UndefinedOpcodePolicy::Skip => {
                warn!("Undefined opcode 0x{opcode:0>2X} at ${address:0>4X} skipped");
                self.registers.pc = address.wrapping_add(1);
                Ok(SKIPPED_OPCODE_CYCLES)
            }
        }
    }

    /// Run the instruction effect over its resolved operand. Returns the
    /// extra cycles spent by taken branches
    fn exec(
        &mut self,
        instruction: &Instruction,
        resolution: Resolution,
        memory: &mut dyn Memory,
    ) -> u8 {
        let operand = resolution.operand;

        match (instruction.instruction, operand) {
            (SingleByte(fun), _) => fun(&mut self.registers),
            (InternalExecOnMemoryData(fun), _) => {
                let data = self.load(operand, memory);
                fun(&mut self.registers, data);
            }
            (StoreOp(fun), _) => {
                let data = fun(&mut self.registers);
                self.store(operand, data, memory);
            }
            (ReadModifyWrite(fun), _) => {
                let data = self.load(operand, memory);
                let result = fun(&mut self.registers, data);
                self.store(operand, result, memory);
            }
            (Misc(Push(fun)), _) => fun(&mut self.registers, memory),
            (Misc(Pull(fun)), _) => fun(&mut self.registers, memory),
            (Misc(Return(fun)), _) => fun(&mut self.registers, memory),
            (Misc(Break(fun)), _) => fun(&mut self.registers, memory),
            (Misc(ReturnFromInterrupt(fun)), _) => fun(&mut self.registers, memory),
            (Misc(Jump(fun)), Operand::Address(target)) => fun(&mut self.registers, target),
            (Misc(Call(fun)), Operand::Address(target)) => {
                fun(&mut self.registers, target, memory)
            }
            (Misc(Branch(fun)), Operand::Address(target)) => {
                if fun(&mut self.registers, target) {
                    return 1 + resolution.page_crossed as u8;
                }
            }
            (Misc(_), _) => unreachable!(
                "{} {} resolved without a target address",
                instruction.name, instruction.addressing_mode
            ),
        }

        0
    }

    fn load(&self, operand: Operand, memory: &dyn Memory) -> u8 {
        match operand {
            Operand::Accumulator => self.registers.acc,
            Operand::Address(address) => {
                let data = memory.read(address);
                trace!("CPU read from: ${address:0>4X} -> 0x{data:0>2X}");
                data
            }
            // nothing to read, effects ignore it
            Operand::Implied => 0,
        }
    }

    fn store(&mut self, operand: Operand, data: u8, memory: &mut dyn Memory) {
        match operand {
            Operand::Accumulator => self.registers.acc = data,
            Operand::Address(address) => {
                trace!("CPU write to: ${address:0>4X} <- 0x{data:0>2X}");
                memory.write(address, data);
            }
            Operand::Implied => {}
        }
    }
}

// Host access to the CPU state
impl Cpu {
    pub fn state(&self) -> CpuState {
        if self.cycles_remaining == 0 {
            CpuState::Idle
        } else {
            CpuState::Running
        }
    }

    pub fn cycles_remaining(&self) -> u8 {
        self.cycles_remaining
    }

    /// Cycles elapsed since the CPU was created
    pub fn total_cycles(&self) -> u64 {
        self.total_cycles
    }

    pub fn registers(&self) -> &Registers {
        &self.registers
    }

    pub fn settings(&self) -> &CpuSettings {
        &self.settings
    }

    pub fn accumulator(&self) -> u8 {
        self.registers.acc
    }

    pub fn set_accumulator(&mut self, value: u8) {
        self.registers.acc = value;
    }

    pub fn x(&self) -> u8 {
        self.registers.x_reg
    }

    pub fn set_x(&mut self, value: u8) {
        self.registers.x_reg = value;
    }

    pub fn y(&self) -> u8 {
        self.registers.y_reg
    }

    pub fn set_y(&mut self, value: u8) {
        self.registers.y_reg = value;
    }

    pub fn pc(&self) -> u16 {
        self.registers.pc
    }

    pub fn set_pc(&mut self, value: u16) {
        self.registers.pc = value;
    }

    pub fn sp(&self) -> u8 {
        self.registers.sp
    }

    pub fn set_sp(&mut self, value: u8) {
        self.registers.sp = value;
    }

    pub fn flag(&self, flag: StatusRegisterFlag) -> bool {
        self.registers.sr.get(flag)
    }

    pub fn set_flag(&mut self, flag: StatusRegisterFlag, value: bool) {
        self.registers.sr.set_value(flag, value);
    }

    pub fn status(&self) -> StatusRegister {
        self.registers.sr
    }
}
