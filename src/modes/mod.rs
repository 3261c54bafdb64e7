//! QR data modes
//!
//! This module contains the per-mode field codecs and the segmenter:
//! - Numeric: digits (0-9), three per 10 bits
//! - Alphanumeric: digits, A-Z and ` $%*+-./:`, two per 11 bits
//! - Byte: UTF-8 bytes, 8 bits each
//!
//! Kanji mode is recognised but not implemented.

pub mod alphanumeric;
pub mod byte;
pub mod numeric;
pub mod segment;

use crate::models::Version;

pub use segment::{Segment, SegmentMode, Segmenter};

/// Mode indicator of an ECI header; only skipped when reading
pub const ECI_INDICATOR: u8 = 0b0111;

/// Data encoding mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Mode 0001
    Numeric,
    /// Mode 0010
    Alphanumeric,
    /// Mode 0100
    Byte,
    /// Mode 1000 (Shift JIS double-byte), unsupported
    Kanji,
}

impl Mode {
    /// 4-bit mode indicator
    pub fn indicator(&self) -> u8 {
        match self {
            Mode::Numeric => 0b0001,
            Mode::Alphanumeric => 0b0010,
            Mode::Byte => 0b0100,
            Mode::Kanji => 0b1000,
        }
    }

    pub fn from_indicator(bits: u8) -> Option<Self> {
        match bits {
            0b0001 => Some(Mode::Numeric),
            0b0010 => Some(Mode::Alphanumeric),
            0b0100 => Some(Mode::Byte),
            0b1000 => Some(Mode::Kanji),
            _ => None,
        }
    }

    /// Width of the character count field for a version
    pub fn char_count_bits(&self, version: Version) -> usize {
        let tier = match version.number() {
            1..=9 => 0,
            10..=26 => 1,
            _ => 2,
        };
        match self {
            Mode::Numeric => [10, 12, 14][tier],
            Mode::Alphanumeric => [9, 11, 13][tier],
            Mode::Byte => [8, 16, 16][tier],
            Mode::Kanji => [8, 10, 12][tier],
        }
    }

    /// Whether this mode can represent `c`
    pub fn can_encode(&self, c: char) -> bool {
        match self {
            Mode::Numeric => c.is_ascii_digit(),
            Mode::Alphanumeric => alphanumeric::value_of(c).is_some(),
            Mode::Byte => true,
            Mode::Kanji => false,
        }
    }

    pub fn can_encode_str(&self, text: &str) -> bool {
        text.chars().all(|c| self.can_encode(c))
    }

    /// Most restrictive of numeric/alphanumeric/byte that fits `c`
    pub fn narrowest_for(c: char) -> Self {
        if Mode::Numeric.can_encode(c) {
            Mode::Numeric
        } else if Mode::Alphanumeric.can_encode(c) {
            Mode::Alphanumeric
        } else {
            Mode::Byte
        }
    }

    fn generality(&self) -> u8 {
        match self {
            Mode::Numeric => 0,
            Mode::Alphanumeric => 1,
            Mode::Byte => 2,
            Mode::Kanji => 3,
        }
    }

    /// True when `self` accepts a strictly larger character set than `other`
    pub fn is_broader_than(&self, other: Mode) -> bool {
        self.generality() > other.generality()
    }

    /// Payload bits (without header) for `text` in this mode
    pub fn payload_bits(&self, text: &str) -> usize {
        match self {
            Mode::Numeric => numeric::encoded_bits(text.len()),
            Mode::Alphanumeric => alphanumeric::encoded_bits(text.chars().count()),
            Mode::Byte => text.len() * 8,
            Mode::Kanji => text.chars().count() * 13,
        }
    }
}
