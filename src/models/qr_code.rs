use std::fmt;
use std::str::FromStr;

use super::BitMatrix;
use crate::error::{QrError, Result};

/// QR code version (1-40, Model 2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version(u8);

impl Version {
    /// Smallest version
    pub const MIN: Version = Version(1);
    /// Largest version
    pub const MAX: Version = Version(40);

    /// Validate a version number
    pub fn new(number: u8) -> Result<Self> {
        if (1..=40).contains(&number) {
            Ok(Self(number))
        } else {
            Err(QrError::InvalidVersion(number))
        }
    }

    /// Derive the version from a grid side length (`17 + 4 * version`)
    pub fn from_size(size: usize) -> Result<Self> {
        if size < 21 || (size - 17) % 4 != 0 {
            return Err(QrError::MalformedSymbol(format!(
                "grid side {size} is not of the form 17 + 4k"
            )));
        }
        let number = (size - 17) / 4;
        if number > 40 {
            return Err(QrError::InvalidVersion(number.min(u8::MAX as usize) as u8));
        }
        Self::new(number as u8)
    }

    /// Get the version number
    pub fn number(&self) -> u8 {
        self.0
    }

    /// Get the size in modules (width = height)
    pub fn size(&self) -> usize {
        4 * self.0 as usize + 17
    }

    /// Whether the symbol carries version information blocks
    pub fn has_version_info(&self) -> bool {
        self.0 >= 7
    }

    /// Iterate every version from 1 to 40
    pub fn all() -> impl Iterator<Item = Version> {
        (1..=40).map(Version)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error correction level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ECLevel {
    /// Low (~7% recovery capacity)
    L,
    /// Medium (~15% recovery capacity)
    M,
    /// Quartile (~25% recovery capacity)
    Q,
    /// High (~30% recovery capacity)
    H,
}

impl ECLevel {
    /// All levels from least to most resilient
    pub const ALL: [ECLevel; 4] = [ECLevel::L, ECLevel::M, ECLevel::Q, ECLevel::H];

    /// Get error correction level from format bits (01=L, 00=M, 11=Q, 10=H)
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0b01 => ECLevel::L,
            0b00 => ECLevel::M,
            0b11 => ECLevel::Q,
            _ => ECLevel::H,
        }
    }

    /// The two format-information bits for this level
    pub fn format_bits(&self) -> u8 {
        match self {
            ECLevel::L => 0b01,
            ECLevel::M => 0b00,
            ECLevel::Q => 0b11,
            ECLevel::H => 0b10,
        }
    }

    /// Row index into the capacity tables
    pub fn ordinal(&self) -> usize {
        match self {
            ECLevel::L => 0,
            ECLevel::M => 1,
            ECLevel::Q => 2,
            ECLevel::H => 3,
        }
    }
}

impl fmt::Display for ECLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ECLevel::L => "L",
            ECLevel::M => "M",
            ECLevel::Q => "Q",
            ECLevel::H => "H",
        };
        f.write_str(name)
    }
}

impl FromStr for ECLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "L" => Ok(ECLevel::L),
            "M" => Ok(ECLevel::M),
            "Q" => Ok(ECLevel::Q),
            "H" => Ok(ECLevel::H),
            other => Err(format!("unknown error correction level '{other}'")),
        }
    }
}

/// Mask pattern (0-7); `x` is the column and `y` the row
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MaskPattern {
    /// (x + y) % 2 == 0
    Pattern0 = 0,
    /// y % 2 == 0
    Pattern1 = 1,
    /// x % 3 == 0
    Pattern2 = 2,
    /// (x + y) % 3 == 0
    Pattern3 = 3,
    /// (x/3 + y/2) % 2 == 0
    Pattern4 = 4,
    /// (x*y)%2 + (x*y)%3 == 0
    Pattern5 = 5,
    /// ((x*y)%2 + (x*y)%3) % 2 == 0
    Pattern6 = 6,
    /// ((x*y)%3 + (x+y)%2) % 2 == 0
    Pattern7 = 7,
}

impl MaskPattern {
    /// Every mask in reference order
    pub const ALL: [MaskPattern; 8] = [
        MaskPattern::Pattern0,
        MaskPattern::Pattern1,
        MaskPattern::Pattern2,
        MaskPattern::Pattern3,
        MaskPattern::Pattern4,
        MaskPattern::Pattern5,
        MaskPattern::Pattern6,
        MaskPattern::Pattern7,
    ];

    /// Get mask pattern from its 3-bit reference
    pub fn from_bits(bits: u8) -> Self {
        Self::ALL[(bits & 0x07) as usize]
    }

    /// The 3-bit mask reference
    pub fn bits(&self) -> u8 {
        *self as u8
    }

    /// Check if module at column `x`, row `y` should be inverted
    pub fn is_masked(&self, x: usize, y: usize) -> bool {
        match self {
            MaskPattern::Pattern0 => (x + y) % 2 == 0,
            MaskPattern::Pattern1 => y % 2 == 0,
            MaskPattern::Pattern2 => x % 3 == 0,
            MaskPattern::Pattern3 => (x + y) % 3 == 0,
            MaskPattern::Pattern4 => (x / 3 + y / 2) % 2 == 0,
            MaskPattern::Pattern5 => (x * y) % 2 + (x * y) % 3 == 0,
            MaskPattern::Pattern6 => ((x * y) % 2 + (x * y) % 3) % 2 == 0,
            MaskPattern::Pattern7 => ((x * y) % 3 + (x + y) % 2) % 2 == 0,
        }
    }
}

impl FromStr for MaskPattern {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().parse::<u8>() {
            Ok(n) if n < 8 => Ok(Self::from_bits(n)),
            _ => Err(format!("mask must be 0-7, got '{s}'")),
        }
    }
}

/// An encoded or decoded QR symbol
#[derive(Debug, Clone)]
pub struct QRCode {
    /// Text carried by the symbol
    pub content: String,
    /// QR code version
    pub version: Version,
    /// Error correction level
    pub error_correction: ECLevel,
    /// Mask pattern used
    pub mask_pattern: MaskPattern,
    /// Module matrix (true = dark, false = light), without quiet zone
    pub modules: BitMatrix,
}

impl QRCode {
    /// Create a new QR code record
    pub fn new(
        content: String,
        version: Version,
        error_correction: ECLevel,
        mask_pattern: MaskPattern,
        modules: BitMatrix,
    ) -> Self {
        Self {
            content,
            version,
            error_correction,
            mask_pattern,
            modules,
        }
    }

    /// Side length in modules
    pub fn size(&self) -> usize {
        self.version.size()
    }

    /// Module at column `x`, row `y`
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.modules.get(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_size() {
        assert_eq!(Version::new(1).unwrap().size(), 21);
        assert_eq!(Version::new(2).unwrap().size(), 25);
        assert_eq!(Version::new(40).unwrap().size(), 177);
    }

    #[test]
    fn test_version_bounds() {
        assert!(matches!(Version::new(0), Err(QrError::InvalidVersion(0))));
        assert!(matches!(Version::new(41), Err(QrError::InvalidVersion(41))));
        assert_eq!(Version::all().count(), 40);
    }

    #[test]
    fn test_version_from_size() {
        assert_eq!(Version::from_size(21).unwrap().number(), 1);
        assert_eq!(Version::from_size(177).unwrap().number(), 40);
        assert!(matches!(
            Version::from_size(22),
            Err(QrError::MalformedSymbol(_))
        ));
        assert!(matches!(
            Version::from_size(17),
            Err(QrError::MalformedSymbol(_))
        ));
        assert!(matches!(
            Version::from_size(181),
            Err(QrError::InvalidVersion(41))
        ));
    }

    #[test]
    fn test_ec_level_bits() {
        for level in ECLevel::ALL {
            assert_eq!(ECLevel::from_bits(level.format_bits()), level);
        }
        assert_eq!(ECLevel::from_bits(0b01), ECLevel::L);
        assert_eq!(ECLevel::from_bits(0b00), ECLevel::M);
        assert_eq!("q".parse::<ECLevel>(), Ok(ECLevel::Q));
        assert!("X".parse::<ECLevel>().is_err());
    }

    #[test]
    fn test_mask_pattern() {
        let mask = MaskPattern::Pattern0;
        assert!(mask.is_masked(0, 0));
        assert!(!mask.is_masked(0, 1));
        assert!(mask.is_masked(1, 1));

        // Row parity, not column parity
        assert!(MaskPattern::Pattern1.is_masked(5, 0));
        assert!(!MaskPattern::Pattern1.is_masked(0, 1));

        // Column divisible by three
        assert!(MaskPattern::Pattern2.is_masked(3, 1));
        assert!(!MaskPattern::Pattern2.is_masked(1, 3));

        // floor(x/3) + floor(y/2)
        assert!(MaskPattern::Pattern4.is_masked(2, 1));
        assert!(!MaskPattern::Pattern4.is_masked(3, 0));
    }

    #[test]
    fn test_mask_bits() {
        for (i, mask) in MaskPattern::ALL.iter().enumerate() {
            assert_eq!(mask.bits() as usize, i);
            assert_eq!(MaskPattern::from_bits(i as u8), *mask);
        }
        assert_eq!("7".parse::<MaskPattern>(), Ok(MaskPattern::Pattern7));
        assert!("8".parse::<MaskPattern>().is_err());
    }
}
