/// Return the bit value for `value` at bit position `bit`
pub fn bv(value: u8, bit: u8) -> u8 {
    (value >> bit) & 1
}

/// Return the page (high byte) of `address`
pub fn page(address: u16) -> u8 {
    (address >> 8) as u8
}

/// Whether `a` and `b` live in different 256-byte pages
pub fn page_crossed(a: u16, b: u16) -> bool {
    page(a) != page(b)
}

/// Build a little-endian word from its low and high bytes
pub fn word(low: u8, high: u8) -> u16 {
    ((high as u16) << 8) | low as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bv() {
        assert_eq!(bv(0b0000_0000, 0), 0);
        assert_eq!(bv(0b0000_0001, 0), 1);
        assert_eq!(bv(0b0001_0000, 4), 1);
        assert_eq!(bv(0b1110_1111, 4), 0);
    }

    #[test]
    fn test_page() {
        assert_eq!(page(0x0000), 0x00);
        assert_eq!(page(0x02FF), 0x02);
        assert_eq!(page(0xFFFF), 0xFF);
    }

    #[test]
    fn test_page_crossed() {
        assert!(!page_crossed(0x0200, 0x02FF));
        assert!(page_crossed(0x02FF, 0x0300));
        assert!(page_crossed(0xFFFF, 0x0000));
    }

    #[test]
    fn test_word() {
        assert_eq!(word(0x34, 0x12), 0x1234);
        assert_eq!(word(0xFF, 0x00), 0x00FF);
    }
}
