/// Byte mode (Mode 0100) for 8-bit data
/// Text is carried as its UTF-8 bytes, 8 bits each
use crate::error::{QrError, Result};
use crate::symbol::bit_buffer::BitBuffer;

pub struct ByteCodec;

impl ByteCodec {
    pub fn encode(text: &str, out: &mut BitBuffer) {
        for &byte in text.as_bytes() {
            out.write_byte(byte);
        }
    }

    /// Read `character_count` bytes and interpret them as UTF-8
    pub fn decode(input: &mut BitBuffer, character_count: usize) -> Result<String> {
        let mut bytes = Vec::with_capacity(character_count);
        for _ in 0..character_count {
            let byte = input.read_byte().ok_or_else(|| {
                QrError::MalformedSymbol("byte segment truncated".to_string())
            })?;
            bytes.push(byte);
        }

        String::from_utf8(bytes)
            .map_err(|e| QrError::MalformedSymbol(format!("byte segment is not UTF-8: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_decode() {
        // "HI" in ASCII = 72, 73
        let mut buf = BitBuffer::new();
        buf.add_bits(0x48, 8).unwrap();
        buf.add_bits(0x49, 8).unwrap();
        assert_eq!(ByteCodec::decode(&mut buf, 2).unwrap(), "HI");
    }

    #[test]
    fn test_utf8_bytes() {
        let mut buf = BitBuffer::new();
        ByteCodec::encode("é!", &mut buf);
        assert_eq!(buf.as_bytes(), &[0xC3, 0xA9, b'!']);
        assert_eq!(ByteCodec::decode(&mut buf, 3).unwrap(), "é!");
    }

    #[test]
    fn test_invalid_utf8() {
        let mut buf = BitBuffer::new();
        buf.write_byte(0xFF);
        assert!(matches!(
            ByteCodec::decode(&mut buf, 1),
            Err(QrError::MalformedSymbol(_))
        ));
    }

    #[test]
    fn test_truncated() {
        let mut buf = BitBuffer::new();
        buf.write_byte(b'a');
        assert!(ByteCodec::decode(&mut buf, 2).is_err());
    }
}
