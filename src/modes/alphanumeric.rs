/// Alphanumeric mode (Mode 0010)
/// Alphanumeric character set: 0-9, A-Z, space, $%*+-./:
use crate::error::{QrError, Result};
use crate::modes::Mode;
use crate::symbol::bit_buffer::BitBuffer;

const ALPHANUMERIC_TABLE: [char; 45] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I',
    'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', ' ', '$',
    '%', '*', '+', '-', '.', '/', ':',
];

/// Index of `c` in the 45-character table
pub fn value_of(c: char) -> Option<u8> {
    match c {
        '0'..='9' => Some(c as u8 - b'0'),
        'A'..='Z' => Some(c as u8 - b'A' + 10),
        ' ' => Some(36),
        '$' => Some(37),
        '%' => Some(38),
        '*' => Some(39),
        '+' => Some(40),
        '-' => Some(41),
        '.' => Some(42),
        '/' => Some(43),
        ':' => Some(44),
        _ => None,
    }
}

/// Payload bits for `chars` characters
/// Pairs = 11 bits, single = 6 bits
pub fn encoded_bits(chars: usize) -> usize {
    11 * (chars / 2) + 6 * (chars % 2)
}

pub struct AlphanumericCodec;

impl AlphanumericCodec {
    pub fn encode(text: &str, out: &mut BitBuffer) -> Result<()> {
        let values = text
            .chars()
            .map(value_of)
            .collect::<Option<Vec<u8>>>()
            .ok_or(QrError::UnsupportedMode(Mode::Alphanumeric))?;

        for pair in values.chunks(2) {
            match *pair {
                [first, second] => out.add_bits(first as u32 * 45 + second as u32, 11)?,
                [single] => out.add_bits(single as u32, 6)?,
                _ => {}
            }
        }
        Ok(())
    }

    pub fn decode(input: &mut BitBuffer, character_count: usize) -> Result<String> {
        let mut result = String::with_capacity(character_count);
        let mut chars_remaining = character_count;

        while chars_remaining > 0 {
            if chars_remaining >= 2 {
                let value = Self::read_field(input, 11)?;
                let (first, second) = (value / 45, value % 45);
                if first >= 45 {
                    return Err(QrError::MalformedSymbol(format!(
                        "alphanumeric pair value {value} out of range"
                    )));
                }
                result.push(ALPHANUMERIC_TABLE[first]);
                result.push(ALPHANUMERIC_TABLE[second]);
                chars_remaining -= 2;
            } else {
                let value = Self::read_field(input, 6)?;
                if value >= 45 {
                    return Err(QrError::MalformedSymbol(format!(
                        "alphanumeric value {value} out of range"
                    )));
                }
                result.push(ALPHANUMERIC_TABLE[value]);
                chars_remaining -= 1;
            }
        }

        Ok(result)
    }

    fn read_field(input: &mut BitBuffer, bits: usize) -> Result<usize> {
        if input.remaining_bits() < bits {
            return Err(QrError::MalformedSymbol(
                "alphanumeric segment truncated".to_string(),
            ));
        }
        Ok(input.read_bits(bits) as usize)
    }
}
