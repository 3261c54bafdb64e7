use crate::error::{QrError, Result};

/// Widest single field the packer accepts (a Kanji codeword)
pub const MAX_FIELD_BITS: usize = 13;

/// Growable MSB-first bit buffer used both to pack the data codeword stream
/// and to read it back.
///
/// The write side keeps whole bytes in `bytes` and the current partial byte
/// in an accumulator. The read side is a separate bit cursor, so a buffer
/// can be filled, rewound with [`BitBuffer::reset`], then consumed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitBuffer {
    bytes: Vec<u8>,
    pending: u8,
    pending_len: u8,
    read_pos: usize,
}

impl BitBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bytes),
            ..Self::default()
        }
    }

    /// Wrap already-packed bytes for reading
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            ..Self::default()
        }
    }

    /// Append one bit
    pub fn add_bit(&mut self, bit: bool) {
        self.pending = (self.pending << 1) | bit as u8;
        self.pending_len += 1;
        if self.pending_len == 8 {
            self.bytes.push(self.pending);
            self.pending = 0;
            self.pending_len = 0;
        }
    }

    /// Append the low `bit_length` bits of `value`, most significant first
    pub fn add_bits(&mut self, value: u32, bit_length: usize) -> Result<()> {
        if bit_length > MAX_FIELD_BITS {
            return Err(QrError::FieldWidthOverflow { width: bit_length });
        }
        for i in (0..bit_length).rev() {
            self.add_bit((value >> i) & 1 == 1);
        }
        Ok(())
    }

    /// Append a full byte
    pub fn write_byte(&mut self, byte: u8) {
        if self.pending_len == 0 {
            self.bytes.push(byte);
        } else {
            for i in (0..8).rev() {
                self.add_bit((byte >> i) & 1 == 1);
            }
        }
    }

    /// Pad the partial byte with zero bits so the buffer is byte aligned
    pub fn flush(&mut self) {
        if self.pending_len > 0 {
            self.bytes.push(self.pending << (8 - self.pending_len));
            self.pending = 0;
            self.pending_len = 0;
        }
    }

    /// Total bits written so far
    pub fn bit_len(&self) -> usize {
        self.bytes.len() * 8 + self.pending_len as usize
    }

    /// Whole bytes written so far (excludes the partial byte)
    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_aligned(&self) -> bool {
        self.pending_len == 0
    }

    /// Bits left between the read cursor and the end of written data
    pub fn remaining_bits(&self) -> usize {
        self.bit_len().saturating_sub(self.read_pos)
    }

    fn bit_at(&self, pos: usize) -> bool {
        let byte = pos / 8;
        if byte < self.bytes.len() {
            return (self.bytes[byte] >> (7 - pos % 8)) & 1 == 1;
        }
        let offset = pos - self.bytes.len() * 8;
        if offset < self.pending_len as usize {
            return (self.pending >> (self.pending_len as usize - 1 - offset)) & 1 == 1;
        }
        false
    }

    /// Read one bit; past the end this yields `false`
    pub fn read_bit(&mut self) -> bool {
        let bit = self.bit_at(self.read_pos);
        if self.read_pos < self.bit_len() {
            self.read_pos += 1;
        }
        bit
    }

    /// Read `length` bits (at most 32) into the low bits of the result;
    /// missing bits past the end read as zero
    pub fn read_bits(&mut self, length: usize) -> u32 {
        let mut value = 0u32;
        for _ in 0..length.min(32) {
            value = (value << 1) | self.read_bit() as u32;
        }
        value
    }

    /// Read the next 8 bits, or `None` when fewer than 8 remain
    pub fn read_byte(&mut self) -> Option<u8> {
        if self.remaining_bits() < 8 {
            return None;
        }
        Some(self.read_bits(8) as u8)
    }

    /// Rewind the read cursor
    pub fn reset(&mut self) {
        self.read_pos = 0;
    }

    /// Drop all data and rewind
    pub fn clear(&mut self) {
        self.bytes.clear();
        self.pending = 0;
        self.pending_len = 0;
        self.read_pos = 0;
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Flush and hand back the packed bytes
    pub fn into_bytes(mut self) -> Vec<u8> {
        self.flush();
        self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_bits_msb_first() {
        let mut buf = BitBuffer::new();
        buf.add_bits(0b0001, 4).unwrap();
        buf.add_bits(8, 10).unwrap();
        assert_eq!(buf.bit_len(), 14);
        buf.flush();
        // 0001 0000001000 00 -> 0x10 0x20
        assert_eq!(buf.as_bytes(), &[0x10, 0x20]);
    }

    #[test]
    fn test_field_width_limit() {
        let mut buf = BitBuffer::new();
        assert!(buf.add_bits(0x1FFF, 13).is_ok());
        assert!(matches!(
            buf.add_bits(0, 14),
            Err(QrError::FieldWidthOverflow { width: 14 })
        ));
    }

    #[test]
    fn test_write_byte_unaligned() {
        let mut buf = BitBuffer::new();
        buf.add_bit(true);
        buf.write_byte(0xFF);
        buf.flush();
        assert_eq!(buf.as_bytes(), &[0xFF, 0x80]);

        let mut aligned = BitBuffer::new();
        aligned.write_byte(0xAB);
        assert!(aligned.is_aligned());
        assert_eq!(aligned.as_bytes(), &[0xAB]);
    }

    #[test]
    fn test_read_back_and_sentinels() {
        let mut buf = BitBuffer::new();
        buf.add_bits(0b101, 3).unwrap();
        buf.write_byte(0x5A);

        assert!(buf.read_bit());
        assert!(!buf.read_bit());
        assert!(buf.read_bit());
        assert_eq!(buf.read_byte(), Some(0x5A));
        assert_eq!(buf.remaining_bits(), 0);
        assert!(!buf.read_bit());
        assert_eq!(buf.read_byte(), None);
        assert_eq!(buf.read_bits(4), 0);

        buf.reset();
        assert_eq!(buf.read_bits(3), 0b101);
    }

    #[test]
    fn test_read_unflushed_tail() {
        let mut buf = BitBuffer::new();
        buf.add_bits(0b1_0110, 5).unwrap();
        assert_eq!(buf.read_bits(5), 0b1_0110);
    }

    #[test]
    fn test_clear() {
        let mut buf = BitBuffer::from_bytes(vec![1, 2, 3]);
        assert_eq!(buf.read_byte(), Some(1));
        buf.clear();
        assert_eq!(buf.bit_len(), 0);
        assert_eq!(buf.read_byte(), None);
        assert_eq!(buf.into_bytes(), Vec::<u8>::new());
    }
}
