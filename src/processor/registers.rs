use std::fmt;

use crate::processor::status_register::StatusRegister;

/// Programmer visible state of the 6502
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Registers {
    pub acc: u8,   // Accumulator
    pub x_reg: u8, // X register
    pub y_reg: u8, // Y register
    pub sp: u8,    // Stack Pointer
    pub pc: u16,   // Program Counter
    pub sr: StatusRegister,
}

impl Registers {
    pub fn reset(&mut self, pc: u16, sp: u8) {
        self.acc = 0;
        self.x_reg = 0;
        self.y_reg = 0;
        self.sp = sp;
        self.pc = pc;
        self.sr.reset();
    }
}

impl fmt::Debug for Registers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PC:{:0>4X} A:{:0>2X} X:{:0>2X} Y:{:0>2X} SP:{:0>2X} P:{}",
            self.pc, self.acc, self.x_reg, self.y_reg, self.sp, self.sr
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processor::status_register::StatusRegisterFlag::*;

    #[test]
    fn test_registers_reset() {
        let mut registers = Registers {
            acc: 1,
            x_reg: 2,
            y_reg: 3,
            sp: 4,
            pc: 5,
            ..Default::default()
        };
        registers.sr.set(Carry);

        registers.reset(0x8000, 0xFD);
        assert_eq!(registers.acc, 0);
        assert_eq!(registers.x_reg, 0);
        assert_eq!(registers.y_reg, 0);
        assert_eq!(registers.sp, 0xFD);
        assert_eq!(registers.pc, 0x8000);
        assert!(!registers.sr.get(Carry));
    }

    #[test]
    fn test_registers_debug_format() {
        let registers = Registers {
            acc: 0x7F,
            pc: 0x0600,
            ..Default::default()
        };

        assert_eq!(
            format!("{registers:?}"),
            "PC:0600 A:7F X:00 Y:00 SP:00 P:nv--dizc"
        );
    }
}
