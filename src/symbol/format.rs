//! Format information: 2 EC-level bits and 3 mask bits, BCH(15,5)
//! protected, XOR-masked and stamped twice around the finder patterns.

use crate::error::{QrError, Result};
use crate::models::{BitMatrix, ECLevel, MaskPattern};
use crate::symbol::bch::{Bch, FORMAT_MASK};

/// Decoded or to-be-stamped format information
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatInfo {
    pub ec_level: ECLevel,
    pub mask_pattern: MaskPattern,
}

impl FormatInfo {
    pub fn new(ec_level: ECLevel, mask_pattern: MaskPattern) -> Self {
        Self {
            ec_level,
            mask_pattern,
        }
    }

    /// The 15 bits as stamped (after the fixed XOR mask)
    pub fn bits(&self) -> u16 {
        let data = (self.ec_level.format_bits() << 3) | self.mask_pattern.bits();
        Bch::format_checksum(data) ^ FORMAT_MASK
    }

    /// Split stamped bits back into level and mask; the BCH remainder must be zero
    pub fn from_bits(bits: u16) -> Option<Self> {
        let unmasked = (bits ^ FORMAT_MASK) & 0x7FFF;
        if !Bch::is_format_codeword(unmasked) {
            return None;
        }
        let data = (unmasked >> 10) as u8;
        Some(Self {
            ec_level: ECLevel::from_bits(data >> 3),
            mask_pattern: MaskPattern::from_bits(data & 0x07),
        })
    }

    /// Write both copies into the grid
    pub fn stamp(&self, grid: &mut BitMatrix) {
        let bits = self.bits();
        let size = grid.width();
        for i in 0..15 {
            let bit = (bits >> i) & 1 == 1;
            let (x, y) = first_copy_position(i);
            grid.set(x, y, bit);
            let (x, y) = second_copy_position(i, size);
            grid.set(x, y, bit);
        }
        // Always-dark module shares the second copy's column
        grid.set(8, size - 8, true);
    }

    /// Read format information; the copy beside the top-left finder is
    /// tried first, then the split copy
    pub fn extract(grid: &BitMatrix) -> Result<Self> {
        let size = grid.width();
        if size < 21 {
            return Err(QrError::MalformedSymbol(format!(
                "grid side {size} too small for format information"
            )));
        }

        let first = read_bits(|i| {
            let (x, y) = first_copy_position(i);
            grid.get(x, y)
        });
        let second = read_bits(|i| {
            let (x, y) = second_copy_position(i, size);
            grid.get(x, y)
        });

        Self::from_bits(first)
            .or_else(|| Self::from_bits(second))
            .ok_or_else(|| {
                QrError::MalformedSymbol(format!(
                    "no valid format information (read {first:015b} / {second:015b})"
                ))
            })
    }
}

fn read_bits(mut module: impl FnMut(usize) -> bool) -> u16 {
    (0..15).fold(0u16, |acc, i| acc | ((module(i) as u16) << i))
}

/// Bit `i` (0 = least significant) around the top-left finder
fn first_copy_position(i: usize) -> (usize, usize) {
    match i {
        0..=5 => (8, i),
        6 => (8, 7),
        7 => (8, 8),
        8 => (7, 8),
        _ => (14 - i, 8),
    }
}

/// Bit `i` split between the top-right and bottom-left finders
fn second_copy_position(i: usize, size: usize) -> (usize, usize) {
    if i < 8 {
        (size - 1 - i, 8)
    } else {
        (8, size - 15 + i)
    }
}
