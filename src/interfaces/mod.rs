/// Byte addressable memory seen by the processor.
///
/// Every 16-bit address is valid: reads are total and writes only touch
/// the addressed byte.
pub trait Memory {
    /// Read a byte from the specified `address`
    fn read(&self, address: u16) -> u8;

    /// Write a byte of `data` to the specified `address`
    fn write(&mut self, address: u16, data: u8);
}
