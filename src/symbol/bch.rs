/// BCH codes protecting the format (15,5) and version (18,6) fields
///
/// Both are systematic: the payload sits in the high bits, the remainder of
/// binary polynomial division by a fixed generator in the low bits.
pub struct Bch;

/// x^10 + x^8 + x^5 + x^4 + x^2 + x + 1
pub const FORMAT_GENERATOR: u32 = 0b101_0011_0111;
/// x^12 + x^11 + x^10 + x^9 + x^8 + x^5 + x^2 + 1
pub const VERSION_GENERATOR: u32 = 0b1_1111_0010_0101;
/// XOR mask applied to the format codeword before stamping
pub const FORMAT_MASK: u16 = 0b101_0100_0001_0010;

impl Bch {
    /// Remainder of `value` divided by `generator` over GF(2)
    fn remainder(mut value: u32, generator: u32) -> u32 {
        let degree = 31 - generator.leading_zeros();
        while value != 0 && 31 - value.leading_zeros() >= degree {
            let shift = (31 - value.leading_zeros()) - degree;
            value ^= generator << shift;
        }
        value
    }

    /// 15-bit format codeword for 5 data bits (before masking)
    pub fn format_checksum(data: u8) -> u16 {
        let shifted = ((data & 0x1F) as u32) << 10;
        (shifted | Self::remainder(shifted, FORMAT_GENERATOR)) as u16
    }

    /// 18-bit version codeword for 6 data bits
    pub fn version_checksum(data: u8) -> u32 {
        let shifted = ((data & 0x3F) as u32) << 12;
        shifted | Self::remainder(shifted, VERSION_GENERATOR)
    }

    /// Whether 15 unmasked bits form a valid format codeword
    pub fn is_format_codeword(codeword: u16) -> bool {
        Self::remainder((codeword & 0x7FFF) as u32, FORMAT_GENERATOR) == 0
    }

    /// Whether 18 bits form a valid version codeword
    pub fn is_version_codeword(codeword: u32) -> bool {
        Self::remainder(codeword & 0x3FFFF, VERSION_GENERATOR) == 0
    }
}
