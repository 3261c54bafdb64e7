use crate::models::BitMatrix;
use crate::symbol::function_mask::FunctionMask;

/// Data module coordinates in codeword order: column pairs from the right
/// edge, alternating upward and downward, skipping the timing column
pub fn zigzag_positions(func: &FunctionMask) -> Vec<(usize, usize)> {
    let dimension = func.size();
    let mut positions = Vec::with_capacity(func.data_modules_count());
    let mut upward = true;
    let mut col = dimension as i32 - 1;

    while col > 0 {
        if col == 6 {
            col -= 1;
            continue;
        }

        let (right, left) = (col as usize, col as usize - 1);
        for step in 0..dimension {
            let row = if upward { dimension - 1 - step } else { step };
            for x in [right, left] {
                if func.is_data(x, row) {
                    positions.push((x, row));
                }
            }
        }

        upward = !upward;
        col -= 2;
    }

    positions
}

/// Lay `codewords` MSB-first along the zigzag into an otherwise blank grid.
/// Modules past the last codeword (remainder bits) stay light.
pub fn place_codewords(codewords: &[u8], func: &FunctionMask) -> BitMatrix {
    let mut grid = BitMatrix::square(func.size());
    let total_bits = codewords.len() * 8;
    for (i, (x, y)) in zigzag_positions(func).into_iter().enumerate() {
        if i >= total_bits {
            break;
        }
        let bit = (codewords[i / 8] >> (7 - i % 8)) & 1 == 1;
        grid.set(x, y, bit);
    }
    grid
}

/// Read the data modules back in zigzag order
pub fn read_codewords(grid: &BitMatrix, func: &FunctionMask, count: usize) -> Vec<u8> {
    let mut codewords = vec![0u8; count];
    for (i, (x, y)) in zigzag_positions(func).into_iter().enumerate() {
        if i >= count * 8 {
            break;
        }
        if grid.get(x, y) {
            codewords[i / 8] |= 1 << (7 - i % 8);
        }
    }
    codewords
}
