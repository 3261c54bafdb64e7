//! Version information for QR codes v7+

use crate::error::{QrError, Result};
use crate::models::{BitMatrix, Version};
use crate::symbol::bch::Bch;

/// Version info is 18 bits (6 data + 12 ECC), stamped twice
pub struct VersionInfo;

impl VersionInfo {
    /// Stamp both version blocks; versions below 7 carry none
    pub fn stamp(grid: &mut BitMatrix, version: Version) {
        if !version.has_version_info() {
            return;
        }
        let bits = Bch::version_checksum(version.number());
        let size = grid.width();
        for i in 0..18 {
            let bit = (bits >> i) & 1 == 1;
            let (a, b) = block_position(i, size);
            // Top-right block, then its transpose above the bottom-left finder
            grid.set(a, b, bit);
            grid.set(b, a, bit);
        }
    }

    /// Read the version blocks and check them against `expected`
    /// (derived from the grid side). Either valid copy may confirm it.
    pub fn verify(grid: &BitMatrix, expected: Version) -> Result<()> {
        if !expected.has_version_info() {
            return Ok(());
        }
        let top_right = Self::read(grid, true);
        let bottom_left = Self::read(grid, false);

        let decoded: Vec<u8> = [top_right, bottom_left]
            .into_iter()
            .filter(|&bits| Bch::is_version_codeword(bits))
            .map(|bits| (bits >> 12) as u8)
            .collect();

        if decoded.is_empty() {
            return Err(QrError::MalformedSymbol(format!(
                "no valid version information (read {top_right:018b} / {bottom_left:018b})"
            )));
        }
        if decoded.contains(&expected.number()) {
            Ok(())
        } else {
            Err(QrError::MalformedSymbol(format!(
                "version information says {} but grid side implies {}",
                decoded[0], expected
            )))
        }
    }

    fn read(grid: &BitMatrix, top_right: bool) -> u32 {
        let size = grid.width();
        (0..18).fold(0u32, |acc, i| {
            let (a, b) = block_position(i, size);
            let dark = if top_right { grid.get(a, b) } else { grid.get(b, a) };
            acc | ((dark as u32) << i)
        })
    }
}

/// (x, y) of bit `i` in the top-right block; the bottom-left block is the transpose
fn block_position(i: usize, size: usize) -> (usize, usize) {
    (size - 11 + i % 3, i / 3)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stamp_and_verify() {
        for n in 7..=40u8 {
            let version = Version::new(n).unwrap();
            let mut grid = BitMatrix::square(version.size());
            VersionInfo::stamp(&mut grid, version);
            assert!(VersionInfo::verify(&grid, version).is_ok());
        }
    }

    #[test]
    fn test_small_versions_untouched() {
        let version = Version::new(6).unwrap();
        let mut grid = BitMatrix::square(version.size());
        VersionInfo::stamp(&mut grid, version);
        assert_eq!(grid.count_dark(), 0);
        assert!(VersionInfo::verify(&grid, version).is_ok());
    }

    #[test]
    fn test_version_7_layout() {
        // 0x07C94 = 000111 110010 010100, least significant bit first
        let version = Version::new(7).unwrap();
        let mut grid = BitMatrix::square(version.size());
        VersionInfo::stamp(&mut grid, version);
        let size = version.size();
        assert!(!grid.get(size - 11, 0)); // bit 0
        assert!(!grid.get(size - 10, 0)); // bit 1
        assert!(grid.get(size - 9, 0)); // bit 2
        assert!(grid.get(0, size - 9)); // bit 2 transposed
    }

    #[test]
    fn test_mismatch_detected() {
        let stamped = Version::new(8).unwrap();
        let mut grid = BitMatrix::square(Version::new(9).unwrap().size());
        VersionInfo::stamp(&mut grid, stamped);
        assert!(matches!(
            VersionInfo::verify(&grid, Version::new(9).unwrap()),
            Err(QrError::MalformedSymbol(_))
        ));

        let blank = BitMatrix::square(Version::new(7).unwrap().size());
        assert!(VersionInfo::verify(&blank, Version::new(7).unwrap()).is_err());
    }
}
