use crate::models::{BitMatrix, Version};

/// Alignment pattern row/column coordinates, indexed by version - 1
const ALIGNMENT_PATTERN_POSITIONS: [&[u8]; 40] = [
    &[],
    &[6, 18],
    &[6, 22],
    &[6, 26],
    &[6, 30],
    &[6, 34],
    &[6, 22, 38],
    &[6, 24, 42],
    &[6, 26, 46],
    &[6, 28, 50],
    &[6, 30, 54],
    &[6, 32, 58],
    &[6, 34, 62],
    &[6, 26, 46, 66],
    &[6, 26, 48, 70],
    &[6, 26, 50, 74],
    &[6, 30, 54, 78],
    &[6, 30, 56, 82],
    &[6, 30, 58, 86],
    &[6, 34, 62, 90],
    &[6, 28, 50, 72, 94],
    &[6, 26, 50, 74, 98],
    &[6, 30, 54, 78, 102],
    &[6, 28, 54, 80, 106],
    &[6, 32, 58, 84, 110],
    &[6, 30, 58, 86, 114],
    &[6, 34, 62, 90, 118],
    &[6, 26, 50, 74, 98, 122],
    &[6, 30, 54, 78, 102, 126],
    &[6, 26, 52, 78, 104, 130],
    &[6, 30, 56, 82, 108, 134],
    &[6, 34, 60, 86, 112, 138],
    &[6, 30, 58, 86, 114, 142],
    &[6, 34, 62, 90, 118, 146],
    &[6, 30, 54, 78, 102, 126, 150],
    &[6, 24, 50, 76, 102, 128, 154],
    &[6, 28, 54, 80, 106, 132, 158],
    &[6, 32, 58, 84, 110, 136, 162],
    &[6, 26, 54, 82, 110, 138, 166],
    &[6, 30, 58, 86, 114, 142, 170],
];

/// Alignment pattern coordinates for a version (rows and columns share them)
pub fn alignment_pattern_positions(version: Version) -> &'static [u8] {
    ALIGNMENT_PATTERN_POSITIONS[version.number() as usize - 1]
}

/// Centers of every alignment pattern: all coordinate pairs except the
/// three that would sit on a finder pattern
pub fn alignment_centers(version: Version) -> Vec<(usize, usize)> {
    let positions = alignment_pattern_positions(version);
    let Some(last) = positions.len().checked_sub(1) else {
        return Vec::new();
    };
    let mut centers = Vec::with_capacity(positions.len() * positions.len());
    for (i, &cy) in positions.iter().enumerate() {
        for (j, &cx) in positions.iter().enumerate() {
            let on_finder = (i == 0 && j == 0) || (i == 0 && j == last) || (i == last && j == 0);
            if !on_finder {
                centers.push((cx as usize, cy as usize));
            }
        }
    }
    centers
}

/// Function module mask for a specific QR version.
/// true = function module (not data), false = data module.
///
/// Finder corners are marked as full 9x9 areas (8x9 / 9x8 at the right and
/// bottom edges) so they also cover the separators, the format information
/// strips and the always-dark module.
#[derive(Debug, Clone)]
pub struct FunctionMask {
    mask: BitMatrix,
    version: Version,
}

impl FunctionMask {
    pub fn new(version: Version) -> Self {
        let size = version.size();
        let mut mask = BitMatrix::square(size);

        // Finder patterns, separators and format areas
        Self::mark_rect(&mut mask, 0, 0, 9, 9);
        Self::mark_rect(&mut mask, size - 8, 0, 8, 9);
        Self::mark_rect(&mut mask, 0, size - 8, 9, 8);

        // Timing patterns (row 6 and column 6)
        for i in 0..size {
            mask.set(6, i, true);
            mask.set(i, 6, true);
        }

        // Alignment patterns: Chebyshev distance <= 2 from each center
        for (cx, cy) in alignment_centers(version) {
            Self::mark_rect(&mut mask, cx - 2, cy - 2, 5, 5);
        }

        // Version info (v7+): 6x3 above bottom-left, 3x6 left of top-right
        if version.has_version_info() {
            Self::mark_rect(&mut mask, size - 11, 0, 3, 6);
            Self::mark_rect(&mut mask, 0, size - 11, 6, 3);
        }

        Self { mask, version }
    }

    pub fn size(&self) -> usize {
        self.mask.width()
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn is_function(&self, x: usize, y: usize) -> bool {
        self.mask.get(x, y)
    }

    /// True when (x, y) carries a data or error-correction bit
    pub fn is_data(&self, x: usize, y: usize) -> bool {
        x < self.size() && y < self.size() && !self.mask.get(x, y)
    }

    pub fn data_modules_count(&self) -> usize {
        self.size() * self.size() - self.mask.count_dark()
    }

    fn mark_rect(mask: &mut BitMatrix, x: usize, y: usize, width: usize, height: usize) {
        for yy in y..y + height {
            for xx in x..x + width {
                mask.set(xx, yy, true);
            }
        }
    }
}
