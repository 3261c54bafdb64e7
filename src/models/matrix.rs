use std::fmt;

/// Square module grid, bit-packed row-major (true = dark)
#[derive(Clone, PartialEq, Eq)]
pub struct BitMatrix {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl BitMatrix {
    /// Create a new bit matrix with given dimensions
    pub fn new(width: usize, height: usize) -> Self {
        let bytes_needed = (width * height).div_ceil(8);
        Self {
            width,
            height,
            data: vec![0; bytes_needed],
        }
    }

    /// Create an all-light square grid of `size` x `size` modules
    pub fn square(size: usize) -> Self {
        Self::new(size, size)
    }

    /// Build a grid from rows of booleans; rows must all have the same length
    pub fn from_rows(rows: &[Vec<bool>]) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        let mut matrix = Self::new(width, height);
        for (y, row) in rows.iter().enumerate() {
            for (x, &dark) in row.iter().enumerate().take(width) {
                matrix.set(x, y, dark);
            }
        }
        matrix
    }

    /// Get matrix width
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get matrix height
    pub fn height(&self) -> usize {
        self.height
    }

    /// Side length of a square grid (the width)
    pub fn size(&self) -> usize {
        self.width
    }

    /// True when width equals height
    pub fn is_square(&self) -> bool {
        self.width == self.height
    }

    /// Get bit at (x, y)
    pub fn get(&self, x: usize, y: usize) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let index = y * self.width + x;
        let byte_index = index / 8;
        let bit_index = index % 8;
        (self.data[byte_index] >> bit_index) & 1 == 1
    }

    /// Set bit at (x, y)
    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = y * self.width + x;
        let byte_index = index / 8;
        let bit_index = index % 8;
        if value {
            self.data[byte_index] |= 1 << bit_index;
        } else {
            self.data[byte_index] &= !(1 << bit_index);
        }
    }

    /// Toggle bit at (x, y)
    pub fn toggle(&mut self, x: usize, y: usize) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = y * self.width + x;
        let byte_index = index / 8;
        let bit_index = index % 8;
        self.data[byte_index] ^= 1 << bit_index;
    }

    /// Clear all bits to 0
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Number of dark modules
    pub fn count_dark(&self) -> usize {
        // Padding bits past width * height are never set.
        self.data.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// Get raw data as bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

impl Default for BitMatrix {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl fmt::Debug for BitMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BitMatrix {}x{}", self.width, self.height)?;
        fmt::Display::fmt(self, f)
    }
}

/// Two characters per module, `##` for dark and two spaces for light
impl fmt::Display for BitMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for x in 0..self.width {
                f.write_str(if self.get(x, y) { "##" } else { "  " })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_matrix() {
        let mut matrix = BitMatrix::new(8, 8);
        assert_eq!(matrix.width(), 8);
        assert_eq!(matrix.height(), 8);

        matrix.set(3, 4, true);
        assert!(matrix.get(3, 4));
        assert!(!matrix.get(3, 3));
        assert_eq!(matrix.count_dark(), 1);

        matrix.toggle(3, 4);
        assert!(!matrix.get(3, 4));

        matrix.set(1, 1, true);
        matrix.clear();
        assert!(!matrix.get(1, 1));
        assert_eq!(matrix.count_dark(), 0);
    }

    #[test]
    fn test_out_of_bounds() {
        let mut matrix = BitMatrix::square(21);
        matrix.set(30, 30, true); // Should not panic
        assert!(!matrix.get(30, 30));
        assert_eq!(matrix.count_dark(), 0);
    }

    #[test]
    fn test_from_rows() {
        let rows = vec![vec![true, false, true], vec![false, false, true]];
        let matrix = BitMatrix::from_rows(&rows);
        assert_eq!(matrix.width(), 3);
        assert_eq!(matrix.height(), 2);
        assert!(!matrix.is_square());
        assert!(matrix.get(0, 0));
        assert!(matrix.get(2, 1));
        assert!(!matrix.get(1, 1));
    }

    #[test]
    fn test_display_rows() {
        let mut matrix = BitMatrix::square(2);
        matrix.set(0, 0, true);
        assert_eq!(matrix.to_string(), "##  \n    \n");
    }
}
