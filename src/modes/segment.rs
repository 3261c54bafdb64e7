//! Splitting a payload into mode segments and writing their headers.

use std::fmt;

use crate::error::{QrError, Result};
use crate::models::Version;
use crate::modes::alphanumeric::AlphanumericCodec;
use crate::modes::byte::ByteCodec;
use crate::modes::numeric::NumericCodec;
use crate::modes::Mode;
use crate::symbol::bit_buffer::{BitBuffer, MAX_FIELD_BITS};

/// Segments shorter than this merge into a broader neighbour
const MERGE_INTO_BROADER: usize = 4;
/// Segments shorter than this merge into a narrower neighbour
const MERGE_INTO_NARROWER: usize = 5;

/// A run of text carried in one mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub mode: Mode,
    pub text: String,
}

impl Segment {
    pub fn new(mode: Mode, text: impl Into<String>) -> Self {
        Self {
            mode,
            text: text.into(),
        }
    }

    /// Value written to the character count field: bytes for byte mode,
    /// characters otherwise
    pub fn char_count(&self) -> usize {
        match self.mode {
            Mode::Byte => self.text.len(),
            _ => self.text.chars().count(),
        }
    }

    /// Whether the count fits the field width used by `version`
    pub fn fits_count(&self, version: Version) -> bool {
        self.char_count() < 1usize << self.mode.char_count_bits(version)
    }

    /// Header plus payload bits at `version`
    pub fn bit_len(&self, version: Version) -> usize {
        4 + self.mode.char_count_bits(version) + self.mode.payload_bits(&self.text)
    }

    /// Write mode indicator, count field and payload
    pub fn write(&self, version: Version, out: &mut BitBuffer) -> Result<()> {
        let width = self.mode.char_count_bits(version);
        if !self.fits_count(version) {
            return Err(QrError::FieldWidthOverflow { width });
        }
        out.add_bits(self.mode.indicator() as u32, 4)?;
        let count = self.char_count() as u32;
        if width > MAX_FIELD_BITS {
            // 16-bit byte counts go out in two halves
            out.add_bits(count >> 8, width - 8)?;
            out.add_bits(count & 0xFF, 8)?;
        } else {
            out.add_bits(count, width)?;
        }

        match self.mode {
            Mode::Numeric => NumericCodec::encode(&self.text, out),
            Mode::Alphanumeric => AlphanumericCodec::encode(&self.text, out),
            Mode::Byte => {
                ByteCodec::encode(&self.text, out);
                Ok(())
            }
            Mode::Kanji => Err(QrError::UnsupportedMode(Mode::Kanji)),
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self.mode, self.char_count())
    }
}

/// How the encoder chooses modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SegmentMode {
    /// Greedy runs of the narrowest mode, then merge short runs
    #[default]
    Auto,
    /// The whole payload as one segment of this mode
    Single(Mode),
}

pub struct Segmenter;

impl Segmenter {
    pub fn segment(text: &str, mode: SegmentMode) -> Result<Vec<Segment>> {
        match mode {
            SegmentMode::Auto => Ok(Self::auto(text)),
            SegmentMode::Single(mode) => Self::single(text, mode),
        }
    }

    /// One segment covering `text`; fails if `mode` cannot carry every character
    pub fn single(text: &str, mode: Mode) -> Result<Vec<Segment>> {
        if mode == Mode::Kanji || !mode.can_encode_str(text) {
            return Err(QrError::UnsupportedMode(mode));
        }
        if text.is_empty() {
            return Ok(Vec::new());
        }
        Ok(vec![Segment::new(mode, text)])
    }

    /// Split into greedy runs, then merge short runs into neighbours
    /// until nothing changes
    pub fn auto(text: &str) -> Vec<Segment> {
        let mut segments = Self::greedy_runs(text);
        while Self::merge_pass(&mut segments) {}
        segments
    }

    fn greedy_runs(text: &str) -> Vec<Segment> {
        let mut segments: Vec<Segment> = Vec::new();
        for c in text.chars() {
            let mode = Mode::narrowest_for(c);
            match segments.last_mut() {
                Some(last) if last.mode == mode => last.text.push(c),
                _ => segments.push(Segment::new(mode, c.to_string())),
            }
        }
        segments
    }

    /// Merge the first short segment found; true if anything merged
    fn merge_pass(segments: &mut Vec<Segment>) -> bool {
        for i in 0..segments.len() {
            let Some(target) = Self::merge_target(segments, i) else {
                continue;
            };
            let moved = segments.remove(i);
            if target < i {
                segments[target].text.push_str(&moved.text);
            } else {
                // right neighbour shifted down by the removal
                segments[i].text.insert_str(0, &moved.text);
            }
            Self::coalesce(segments);
            return true;
        }
        false
    }

    /// Neighbour index segment `i` should merge into, if any. Prefers the
    /// narrower qualifying neighbour, then the left one.
    fn merge_target(segments: &[Segment], i: usize) -> Option<usize> {
        let seg = &segments[i];
        let len = seg.text.chars().count();
        let left = i.checked_sub(1);
        let right = (i + 1 < segments.len()).then_some(i + 1);

        [left, right]
            .into_iter()
            .flatten()
            .filter(|&j| {
                let neighbour = segments[j].mode;
                if neighbour == seg.mode || !neighbour.can_encode_str(&seg.text) {
                    return false;
                }
                let threshold = if neighbour.is_broader_than(seg.mode) {
                    MERGE_INTO_BROADER
                } else {
                    MERGE_INTO_NARROWER
                };
                len < threshold
            })
            .min_by_key(|&j| (segments[j].mode.generality(), j))
    }

    fn coalesce(segments: &mut Vec<Segment>) {
        let mut i = 1;
        while i < segments.len() {
            if segments[i].mode == segments[i - 1].mode {
                let next = segments.remove(i);
                segments[i - 1].text.push_str(&next.text);
            } else {
                i += 1;
            }
        }
    }
}
