use tracing::debug;

use crate::decoder::payload::{deinterleave, parse_segments};
use crate::encoder::placement::read_codewords;
use crate::error::{QrError, Result};
use crate::models::{BitMatrix, QRCode, Version};
use crate::modes::Segment;
use crate::symbol::format::FormatInfo;
use crate::symbol::function_mask::FunctionMask;
use crate::symbol::mask::reverse_mask;
use crate::symbol::tables::block_layout;
use crate::symbol::version::VersionInfo;

/// Main QR decoder that reads a sampled module grid
pub struct QrDecoder;

impl QrDecoder {
    /// Decode a square module grid (no quiet zone) into a QR code record
    pub fn decode(grid: &BitMatrix) -> Result<QRCode> {
        let (qr, _) = Self::decode_segments(grid)?;
        Ok(qr)
    }

    /// Decode and also return the segments exactly as they were stored
    pub fn decode_segments(grid: &BitMatrix) -> Result<(QRCode, Vec<Segment>)> {
        if !grid.is_square() {
            return Err(QrError::MalformedSymbol(format!(
                "grid is {}x{}, expected a square",
                grid.width(),
                grid.height()
            )));
        }
        let version = Version::from_size(grid.width())?;

        let format_info = FormatInfo::extract(grid)?;
        VersionInfo::verify(grid, version)?;

        let func = FunctionMask::new(version);
        let mut unmasked = grid.clone();
        reverse_mask(&mut unmasked, format_info.mask_pattern, &func);

        let layout = block_layout(version, format_info.ec_level);
        let codewords = read_codewords(&unmasked, &func, layout.total_codewords());
        let data = deinterleave(&codewords, layout)?;
        let segments = parse_segments(&data, version)?;

        let content: String = segments.iter().map(|s| s.text.as_str()).collect();
        debug!(
            version = version.number(),
            level = %format_info.ec_level,
            mask = format_info.mask_pattern.bits(),
            segments = segments.len(),
            "decoded symbol"
        );

        let qr = QRCode::new(
            content,
            version,
            format_info.ec_level,
            format_info.mask_pattern,
            grid.clone(),
        );
        Ok((qr, segments))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EncodeOptions;
    use crate::encoder::QrEncoder;
    use crate::models::{ECLevel, MaskPattern};
    use crate::modes::Mode;

    #[test]
    fn test_decoder_round_trip() {
        let qr = QrEncoder::encode("HELLO WORLD", &EncodeOptions::new()).unwrap();
        let decoded = QrDecoder::decode(&qr.modules).unwrap();
        assert_eq!(decoded.content, "HELLO WORLD");
        assert_eq!(decoded.version, qr.version);
        assert_eq!(decoded.error_correction, qr.error_correction);
        assert_eq!(decoded.mask_pattern, qr.mask_pattern);
    }

    #[test]
    fn test_segments_survive() {
        let opts = EncodeOptions::new().with_level(ECLevel::L);
        let text = "ORDER 12345678901234 ok";
        let qr = QrEncoder::encode(text, &opts).unwrap();
        let (decoded, segments) = QrDecoder::decode_segments(&qr.modules).unwrap();
        assert_eq!(decoded.content, text);
        let modes: Vec<Mode> = segments.iter().map(|s| s.mode).collect();
        assert_eq!(modes, vec![Mode::Alphanumeric, Mode::Numeric, Mode::Byte]);
    }

    #[test]
    fn test_numeric_header_bits() {
        let opts = EncodeOptions::new().with_level(ECLevel::M);
        let qr = QrEncoder::encode("01234567", &opts).unwrap();
        let func = FunctionMask::new(qr.version);
        let mut unmasked = qr.modules.clone();
        reverse_mask(&mut unmasked, qr.mask_pattern, &func);
        let codewords = read_codewords(&unmasked, &func, 26);
        // Mode 0001, then the 10-bit count 8
        assert_eq!(codewords[0] >> 4, 0b0001);
        assert_eq!(((codewords[0] as u16 & 0x0F) << 6) | (codewords[1] as u16 >> 2), 8);
    }

    #[test]
    fn test_rejects_bad_shapes() {
        assert!(matches!(
            QrDecoder::decode(&BitMatrix::new(21, 25)),
            Err(QrError::MalformedSymbol(_))
        ));
        assert!(matches!(
            QrDecoder::decode(&BitMatrix::square(22)),
            Err(QrError::MalformedSymbol(_))
        ));
        // Blank grid has no valid format information
        assert!(QrDecoder::decode(&BitMatrix::square(21)).is_err());
    }

    #[test]
    fn test_version_info_mismatch() {
        let opts = EncodeOptions::new()
            .with_min_version(7)
            .with_mask(MaskPattern::Pattern2);
        let qr = QrEncoder::encode("version seven", &opts).unwrap();
        assert_eq!(qr.version.number(), 7);
        assert!(QrDecoder::decode(&qr.modules).is_ok());

        // Restamp both version blocks as version 8
        let mut corrupt = qr.modules.clone();
        VersionInfo::stamp(&mut corrupt, Version::new(8).unwrap());
        assert!(matches!(
            QrDecoder::decode(&corrupt),
            Err(QrError::MalformedSymbol(_))
        ));
    }
}
