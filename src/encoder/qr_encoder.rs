use tracing::debug;

use crate::config::EncodeOptions;
use crate::encoder::codewords::{interleave, pack_segments, segments_bit_len};
use crate::encoder::placement::place_codewords;
use crate::error::{QrError, Result};
use crate::models::{ECLevel, QRCode, Version};
use crate::modes::{Segment, Segmenter};
use crate::symbol::function_mask::FunctionMask;
use crate::symbol::mask::{MaskChoice, masked_symbol, select_best_mask};
use crate::symbol::penalty::total_penalty;
use crate::symbol::tables::capacity_table;

/// Version ranges sharing one set of character count widths
const VERSION_TIERS: [(u8, u8); 3] = [(1, 9), (10, 26), (27, 40)];

/// Main QR encoder - wires segmentation, coding, placement and masking
pub struct QrEncoder;

impl QrEncoder {
    /// Encode `text` into a fully masked and stamped symbol
    pub fn encode(text: &str, options: &EncodeOptions) -> Result<QRCode> {
        let level = options.effective_level();
        let min_version = Version::new(options.min_version)?;
        let segments = Segmenter::segment(text, options.mode)?;
        debug!(
            segments = segments.len(),
            plan = %segments.iter().map(ToString::to_string).collect::<Vec<_>>().join(" "),
            "segmented payload"
        );

        let version = Self::choose_version(&segments, level, min_version)?;
        let layout = capacity_table().layout(version, level);
        let data = pack_segments(&segments, version, layout.total_data_words())?;
        let stream = interleave(&data, layout);

        let func = FunctionMask::new(version);
        let unmasked = place_codewords(&stream, &func);

        let choice = match options.mask {
            Some(mask) => {
                let grid = masked_symbol(&unmasked, mask, level, &func);
                MaskChoice {
                    mask,
                    penalty: total_penalty(&grid),
                    grid,
                }
            }
            None => select_best_mask(&unmasked, level, version, options.parallel_masks),
        };
        debug!(
            version = version.number(),
            level = %level,
            mask = choice.mask.bits(),
            penalty = choice.penalty,
            "encoded symbol"
        );

        Ok(QRCode::new(
            text.to_string(),
            version,
            level,
            choice.mask,
            choice.grid,
        ))
    }

    /// Smallest version at or above `min_version` that holds the segments.
    /// Count field widths depend on the version, so each tier is tried with
    /// its own widths and accepted only if the result lands inside it.
    pub fn choose_version(
        segments: &[Segment],
        level: ECLevel,
        min_version: Version,
    ) -> Result<Version> {
        let table = capacity_table();
        let mut data_bits = 0;

        for (first, last) in VERSION_TIERS {
            if min_version.number() > last {
                continue;
            }
            let probe = Version::new(first)?;
            if segments.iter().any(|s| !s.fits_count(probe)) {
                continue;
            }

            data_bits = segments_bit_len(segments, probe);
            // Terminator, then round up to whole codewords
            let needed_words = (data_bits + 4).div_ceil(8);
            let start = Version::new(first.max(min_version.number()))?;

            if let Some(version) = table.minimal_version_from(level, needed_words, start) {
                if version.number() <= last {
                    return Ok(version);
                }
            }
        }

        Err(QrError::PayloadTooLarge { level, data_bits })
    }
}
