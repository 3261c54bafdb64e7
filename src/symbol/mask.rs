//! Mask application, reversal and best-mask selection.

use rayon::prelude::*;
use tracing::trace;

use crate::models::{BitMatrix, ECLevel, MaskPattern, Version};
use crate::symbol::format::FormatInfo;
use crate::symbol::function_mask::FunctionMask;
use crate::symbol::patterns::draw_function_patterns;
use crate::symbol::penalty::total_penalty;
use crate::symbol::version::VersionInfo;

/// Build a fresh grid with every function pattern drawn and the data
/// modules of `source` XORed with `mask`
pub fn apply_mask(source: &BitMatrix, mask: MaskPattern, func: &FunctionMask) -> BitMatrix {
    let version = func.version();
    let size = version.size();
    let mut grid = BitMatrix::square(size);
    draw_function_patterns(&mut grid, version);

    for y in 0..size {
        for x in 0..size {
            if func.is_data(x, y) {
                grid.set(x, y, source.get(x, y) ^ mask.is_masked(x, y));
            }
        }
    }
    grid
}

/// Undo `mask` in place on data modules; function modules keep the bits read
pub fn reverse_mask(matrix: &mut BitMatrix, mask: MaskPattern, func: &FunctionMask) {
    let size = func.size();
    for y in 0..size {
        for x in 0..size {
            if func.is_data(x, y) && mask.is_masked(x, y) {
                matrix.toggle(x, y);
            }
        }
    }
}

/// Fully stamped symbol for one mask choice
pub fn masked_symbol(
    source: &BitMatrix,
    mask: MaskPattern,
    level: ECLevel,
    func: &FunctionMask,
) -> BitMatrix {
    let mut grid = apply_mask(source, mask, func);
    FormatInfo::new(level, mask).stamp(&mut grid);
    VersionInfo::stamp(&mut grid, func.version());
    grid
}

/// Mask chosen by the penalty search, with its score and stamped grid
#[derive(Debug, Clone)]
pub struct MaskChoice {
    pub mask: MaskPattern,
    pub penalty: u32,
    pub grid: BitMatrix,
}

/// Score all eight masks and keep the lowest total penalty; ties go to
/// the lower mask index. `parallel` spreads candidates over rayon's pool
/// without changing the outcome.
pub fn select_best_mask(
    source: &BitMatrix,
    level: ECLevel,
    version: Version,
    parallel: bool,
) -> MaskChoice {
    let func = FunctionMask::new(version);
    let evaluate = |mask: MaskPattern| {
        let grid = masked_symbol(source, mask, level, &func);
        let penalty = total_penalty(&grid);
        trace!(mask = mask.bits(), penalty, "mask candidate");
        MaskChoice {
            mask,
            penalty,
            grid,
        }
    };

    let candidates: Vec<MaskChoice> = if parallel {
        MaskPattern::ALL.par_iter().map(|&m| evaluate(m)).collect()
    } else {
        MaskPattern::ALL.iter().map(|&m| evaluate(m)).collect()
    };

    // min_by_key keeps the first minimum, and candidates stay in mask order
    candidates
        .into_iter()
        .min_by_key(|choice| choice.penalty)
        .unwrap_or_else(|| evaluate(MaskPattern::Pattern0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noisy_source(size: usize) -> BitMatrix {
        let mut grid = BitMatrix::square(size);
        for y in 0..size {
            for x in 0..size {
                grid.set(x, y, (x * 31 + y * 17 + x * y) % 7 < 3);
            }
        }
        grid
    }

    #[test]
    fn test_unmask() {
        let version = Version::new(1).unwrap();
        let func = FunctionMask::new(version);
        let mut matrix = BitMatrix::square(21);
        matrix.set(10, 10, true);
        matrix.set(11, 10, false);

        reverse_mask(&mut matrix, MaskPattern::Pattern0, &func);
        // (10 + 10) % 2 == 0 -> toggled; (11 + 10) odd -> untouched
        assert!(!matrix.get(10, 10));
        assert!(!matrix.get(11, 10));
        // Function module (0, 0) is never masked
        assert!(!matrix.get(0, 0));
    }

    #[test]
    fn test_mask_is_self_inverse_on_data() {
        for n in [1u8, 2, 7, 14, 40] {
            let version = Version::new(n).unwrap();
            let func = FunctionMask::new(version);
            let source = noisy_source(version.size());
            for mask in MaskPattern::ALL {
                let mut masked = apply_mask(&source, mask, &func);
                reverse_mask(&mut masked, mask, &func);
                for y in 0..version.size() {
                    for x in 0..version.size() {
                        if func.is_data(x, y) {
                            assert_eq!(masked.get(x, y), source.get(x, y));
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_apply_stamps_function_patterns() {
        let version = Version::new(2).unwrap();
        let func = FunctionMask::new(version);
        let source = noisy_source(version.size());
        let grid = apply_mask(&source, MaskPattern::Pattern3, &func);
        assert!(grid.get(0, 0));
        assert!(!grid.get(1, 1));
        assert!(grid.get(18, 18));
        assert!(grid.get(8, version.size() - 8));
    }

    #[test]
    fn test_best_mask_is_argmin_over_all_eight() {
        let version = Version::new(3).unwrap();
        let func = FunctionMask::new(version);
        let source = noisy_source(version.size());
        let scores: Vec<u32> = MaskPattern::ALL
            .iter()
            .map(|&m| total_penalty(&masked_symbol(&source, m, ECLevel::M, &func)))
            .collect();
        let best = scores.iter().copied().min().unwrap();
        let expected = scores.iter().position(|&s| s == best).unwrap();

        let choice = select_best_mask(&source, ECLevel::M, version, false);
        assert_eq!(choice.mask.bits() as usize, expected);
        assert_eq!(choice.penalty, best);
        assert_eq!(
            FormatInfo::extract(&choice.grid).unwrap(),
            FormatInfo::new(ECLevel::M, choice.mask)
        );
    }

    #[test]
    fn test_parallel_search_matches_sequential() {
        let version = Version::new(8).unwrap();
        let source = noisy_source(version.size());
        let seq = select_best_mask(&source, ECLevel::Q, version, false);
        let par = select_best_mask(&source, ECLevel::Q, version, true);
        assert_eq!(seq.mask, par.mask);
        assert_eq!(seq.penalty, par.penalty);
        assert_eq!(seq.grid, par.grid);
    }
}
