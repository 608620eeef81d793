use crate::hardware::RESET_VECTOR;
use crate::interfaces::Memory;

const RAM_SIZE: usize = 64 * 1024; // 64 kB RAM

/// Flat 64 kB memory covering the whole 6502 address space
pub struct Ram {
    memory: Vec<u8>,
}

impl Ram {
    pub fn new() -> Self {
        Self {
            memory: vec![0; RAM_SIZE],
        }
    }
}

impl Default for Ram {
    fn default() -> Self {
        Self::new()
    }
}

impl Memory for Ram {
    fn read(&self, address: u16) -> u8 {
        self.memory[address as usize]
    }

    fn write(&mut self, address: u16, data: u8) {
        self.memory[address as usize] = data;
    }
}

impl Ram {
    /// Load `contents` array starting on `address`. Contents wrap around
    /// the end of the address space.
    pub fn load(&mut self, address: u16, contents: &[u8]) {
        for (i, byte) in contents.iter().enumerate() {
            let i = i as u16;
            self.write(address.wrapping_add(i), *byte);
        }
    }

    /// Point the reset vector to `address`
    pub fn set_reset_vector(&mut self, address: u16) {
        let [low, high] = address.to_le_bytes();
        self.write(RESET_VECTOR, low);
        self.write(RESET_VECTOR + 1, high);
    }
}
