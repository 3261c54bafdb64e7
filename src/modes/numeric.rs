/// Numeric mode (Mode 0001)
/// Groups of 3 digits = 10 bits, 2 digits = 7 bits, 1 digit = 4 bits
use crate::error::{QrError, Result};
use crate::modes::Mode;
use crate::symbol::bit_buffer::BitBuffer;

/// Payload bits for `digits` characters
pub fn encoded_bits(digits: usize) -> usize {
    10 * (digits / 3) + [0, 4, 7][digits % 3]
}

fn group_bits(group_size: usize) -> usize {
    match group_size {
        3 => 10,
        2 => 7,
        _ => 4,
    }
}

pub struct NumericCodec;

impl NumericCodec {
    /// Append the digit groups of `text`
    pub fn encode(text: &str, out: &mut BitBuffer) -> Result<()> {
        let bytes = text.as_bytes();
        if !bytes.iter().all(u8::is_ascii_digit) {
            return Err(QrError::UnsupportedMode(Mode::Numeric));
        }
        for group in bytes.chunks(3) {
            let value = group
                .iter()
                .fold(0u32, |acc, &d| acc * 10 + (d - b'0') as u32);
            out.add_bits(value, group_bits(group.len()))?;
        }
        Ok(())
    }

    /// Read `character_count` digits
    pub fn decode(input: &mut BitBuffer, character_count: usize) -> Result<String> {
        let mut result = String::with_capacity(character_count);
        let mut chars_remaining = character_count;

        while chars_remaining > 0 {
            let group_size = chars_remaining.min(3);
            let bits_needed = group_bits(group_size);
            if input.remaining_bits() < bits_needed {
                return Err(QrError::MalformedSymbol(
                    "numeric segment truncated".to_string(),
                ));
            }

            let value = input.read_bits(bits_needed);
            let limit = 10u32.pow(group_size as u32);
            if value >= limit {
                return Err(QrError::MalformedSymbol(format!(
                    "numeric group value {value} exceeds {group_size} digits"
                )));
            }
            result.push_str(&format!("{:0width$}", value, width = group_size));
            chars_remaining -= group_size;
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_encode_groups() {
        let mut buf = BitBuffer::new();
        NumericCodec::encode("01234567", &mut buf).unwrap();
        // 012 -> 12, 345 -> 345, 67 -> 67
        assert_eq!(buf.bit_len(), 27);
        assert_eq!(buf.read_bits(10), 12);
        assert_eq!(buf.read_bits(10), 345);
        assert_eq!(buf.read_bits(7), 67);
    }

    #[test]
    fn test_numeric_decode() {
        // 3 digits (10 bits) - binary 1111111001 = 1017 is out of range,
        // 1111100111 = 999 is the largest valid group
        let mut buf = BitBuffer::new();
        buf.add_bits(999, 10).unwrap();
        buf.add_bits(5, 4).unwrap();
        assert_eq!(NumericCodec::decode(&mut buf, 4).unwrap(), "9995");

        let mut bad = BitBuffer::new();
        bad.add_bits(1017, 10).unwrap();
        assert!(NumericCodec::decode(&mut bad, 3).is_err());
    }

    #[test]
    fn test_leading_zeros_kept() {
        let mut buf = BitBuffer::new();
        NumericCodec::encode("007", &mut buf).unwrap();
        buf.reset();
        assert_eq!(NumericCodec::decode(&mut buf, 3).unwrap(), "007");
    }

    #[test]
    fn test_rejects_non_digits() {
        let mut buf = BitBuffer::new();
        assert!(matches!(
            NumericCodec::encode("12a", &mut buf),
            Err(QrError::UnsupportedMode(Mode::Numeric))
        ));
    }

    #[test]
    fn test_truncated() {
        let mut buf = BitBuffer::new();
        buf.add_bits(12, 7).unwrap();
        assert!(NumericCodec::decode(&mut buf, 3).is_err());
    }
}
