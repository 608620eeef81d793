use std::convert::From;
use std::fmt;

use bitflags::bitflags;

use crate::utils;

// Bring local enum variants to scope
use StatusRegisterFlag::*;

bitflags! {
    /// Bit layout of the status register when it's pushed to the stack
    #[derive(Default)]
    pub struct StatusFlags: u8 {
        const CARRY = 1 << 0;
        const ZERO = 1 << 1;
        const INTERRUPT_DISABLE = 1 << 2;
        const DECIMAL = 1 << 3;
        // Break and bit 5 only exist on the stack copy of the register
        const BREAK = 1 << 4;
        const UNUSED = 1 << 5;
        const OVERFLOW = 1 << 6;
        const NEGATIVE = 1 << 7;

        const STORED = Self::CARRY.bits
            | Self::ZERO.bits
            | Self::INTERRUPT_DISABLE.bits
            | Self::DECIMAL.bits
            | Self::OVERFLOW.bits
            | Self::NEGATIVE.bits;
    }
}

#[derive(Copy, Clone, Default, PartialEq, Eq)]
pub struct StatusRegister {
    flags: StatusFlags,
}

impl StatusRegister {
    pub fn new() -> Self {
        Self {
            flags: StatusFlags::empty(),
        }
    }

    pub fn reset(&mut self) {
        self.flags = StatusFlags::empty();
    }

    pub fn get(&self, flag: StatusRegisterFlag) -> bool {
        self.flags.contains(flag.into())
    }

    pub fn set(&mut self, flag: StatusRegisterFlag) {
        self.flags.insert(flag.into());
    }

    pub fn clear(&mut self, flag: StatusRegisterFlag) {
        self.flags.remove(flag.into());
    }

    pub fn set_value(&mut self, flag: StatusRegisterFlag, condition: bool) {
        self.flags.set(flag.into(), condition);
    }

    /// Update Zero and Negative flags from the result of an operation
    pub fn auto_set(&mut self, value: u8) {
        self.set_value(Zero, value == 0);
        self.set_value(Negative, utils::bv(value, 7) != 0);
    }

    /// Status byte as pushed by PHP and BRK. Bit 5 is always set, break
    /// depends on who pushes it
    pub fn to_stack(&self, break_flag: bool) -> u8 {
        let mut flags = self.flags | StatusFlags::UNUSED;
        flags.set(StatusFlags::BREAK, break_flag);
        flags.bits()
    }

    /// Status register pulled by PLP and RTI. Break and bit 5 are ignored
    pub fn from_stack(value: u8) -> Self {
        Self::from(value)
    }
}

impl From<u8> for StatusRegister {
    fn from(value: u8) -> Self {
        Self {
            flags: StatusFlags::from_bits_truncate(value) & StatusFlags::STORED,
        }
    }
}

impl From<StatusRegister> for u8 {
    fn from(value: StatusRegister) -> Self {
        value.flags.bits()
    }
}

impl fmt::Debug for StatusRegister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StatusRegister({self})")
    }
}

/// Show flags as `NV--DIZC`, upper case when set
impl fmt::Display for StatusRegister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = |flag: StatusRegisterFlag, c: char| {
            if self.get(flag) {
                c
            } else {
                c.to_ascii_lowercase()
            }
        };

        write!(
            f,
            "{}{}--{}{}{}{}",
            letter(Negative, 'N'),
            letter(Overflow, 'V'),
            letter(Decimal, 'D'),
            letter(InterruptDisable, 'I'),
            letter(Zero, 'Z'),
            letter(Carry, 'C'),
        )
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StatusRegisterFlag {
    Negative,
    Overflow,
    Decimal,
    InterruptDisable,
    Zero,
    Carry,
}

impl From<StatusRegisterFlag> for StatusFlags {
    fn from(flag: StatusRegisterFlag) -> Self {
        match flag {
            Negative => StatusFlags::NEGATIVE,
            Overflow => StatusFlags::OVERFLOW,
            Decimal => StatusFlags::DECIMAL,
            InterruptDisable => StatusFlags::INTERRUPT_DISABLE,
            Zero => StatusFlags::ZERO,
            Carry => StatusFlags::CARRY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_register_all() {
        let mut sr = StatusRegister::default();

        let flags = vec![
            Carry,
            Zero,
            InterruptDisable,
            Decimal,
            Overflow,
            Negative,
        ];

        for flag in flags {
            assert!(!sr.get(flag));
            sr.set(flag);
            assert!(sr.get(flag));
            sr.clear(flag);
            assert!(!sr.get(flag));
        }
    }

    #[test]
    fn test_status_register_flags_are_independent() {
        let mut sr = StatusRegister::default();

        sr.set(Carry);
        sr.set(Negative);
        assert!(!sr.get(Zero));
        assert!(!sr.get(Overflow));

        sr.clear(Carry);
        assert!(sr.get(Negative));
    }

    #[test]
    fn test_status_register_auto_set() {
        let mut sr = StatusRegister::default();

        sr.auto_set(0);
        assert!(sr.get(Zero));
        assert!(!sr.get(Negative));

        sr.auto_set(0x80);
        assert!(!sr.get(Zero));
        assert!(sr.get(Negative));

        sr.auto_set(0x7F);
        assert!(!sr.get(Zero));
        assert!(!sr.get(Negative));
    }

    #[test]
    fn test_status_register_to_stack() {
        let mut sr = StatusRegister::default();
        sr.set(Carry);
        sr.set(Negative);

        assert_eq!(sr.to_stack(true), 0b1011_0001);
        assert_eq!(sr.to_stack(false), 0b1010_0001);
    }

    #[test]
    fn test_status_register_from_stack_ignores_break_and_bit_5() {
        let sr = StatusRegister::from_stack(0xFF);

        assert_eq!(u8::from(sr), 0b1100_1111);
        assert!(sr.get(Carry));
        assert!(sr.get(Decimal));
    }

    #[test]
    fn test_status_register_display() {
        let mut sr = StatusRegister::default();
        assert_eq!(sr.to_string(), "nv--dizc");

        sr.set(Negative);
        sr.set(Zero);
        assert_eq!(sr.to_string(), "Nv--diZc");
    }
}
