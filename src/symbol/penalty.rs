//! The four penalty rules used to rank mask candidates.

use crate::models::BitMatrix;

/// dark, light, dark, dark, dark, light, dark, then four light
const FINDER_LIKE: [bool; 11] = [
    true, false, true, true, true, false, true, false, false, false, false,
];

/// One penalty rule; each is a pure function of a fully stamped grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PenaltyRule {
    /// Runs of five or more same-colour modules in a row or column
    AdjacentRuns,
    /// 2x2 blocks of one colour
    Blocks,
    /// 1:1:3:1:1 finder-like patterns with a four-module light margin
    FinderLike,
    /// Deviation of the dark proportion from 50%
    DarkBalance,
}

impl PenaltyRule {
    pub const ALL: [PenaltyRule; 4] = [
        PenaltyRule::AdjacentRuns,
        PenaltyRule::Blocks,
        PenaltyRule::FinderLike,
        PenaltyRule::DarkBalance,
    ];

    pub fn score(&self, grid: &BitMatrix) -> u32 {
        match self {
            PenaltyRule::AdjacentRuns => adjacent_runs(grid),
            PenaltyRule::Blocks => blocks(grid),
            PenaltyRule::FinderLike => finder_like(grid),
            PenaltyRule::DarkBalance => dark_balance(grid),
        }
    }
}

/// Sum of all four rules
pub fn total_penalty(grid: &BitMatrix) -> u32 {
    PenaltyRule::ALL.iter().map(|rule| rule.score(grid)).sum()
}

/// (number of lines, modules per line), reading rows when `horizontal`
fn line_shape(grid: &BitMatrix, horizontal: bool) -> (usize, usize) {
    if horizontal {
        (grid.height(), grid.width())
    } else {
        (grid.width(), grid.height())
    }
}

/// Module `i` along line `line`, reading rows when `horizontal`
fn line_module(grid: &BitMatrix, horizontal: bool, line: usize, i: usize) -> bool {
    if horizontal {
        grid.get(i, line)
    } else {
        grid.get(line, i)
    }
}

fn adjacent_runs(grid: &BitMatrix) -> u32 {
    let mut score = 0u32;
    for horizontal in [true, false] {
        let (lines, size) = line_shape(grid, horizontal);
        if size == 0 {
            continue;
        }
        for line in 0..lines {
            let mut run_color = line_module(grid, horizontal, line, 0);
            let mut run_len = 1u32;
            for i in 1..size {
                let color = line_module(grid, horizontal, line, i);
                if color == run_color {
                    run_len += 1;
                } else {
                    if run_len >= 5 {
                        score += run_len - 2;
                    }
                    run_color = color;
                    run_len = 1;
                }
            }
            if run_len >= 5 {
                score += run_len - 2;
            }
        }
    }
    score
}

fn blocks(grid: &BitMatrix) -> u32 {
    let mut score = 0u32;
    for y in 0..grid.height().saturating_sub(1) {
        for x in 0..grid.width().saturating_sub(1) {
            let c = grid.get(x, y);
            if c == grid.get(x + 1, y) && c == grid.get(x, y + 1) && c == grid.get(x + 1, y + 1) {
                score += 3;
            }
        }
    }
    score
}

fn finder_like(grid: &BitMatrix) -> u32 {
    let window = FINDER_LIKE.len();
    let mut score = 0u32;
    for horizontal in [true, false] {
        let (lines, size) = line_shape(grid, horizontal);
        for line in 0..lines {
            let mut i = 0;
            while i + window <= size {
                let forward = (0..window)
                    .all(|k| line_module(grid, horizontal, line, i + k) == FINDER_LIKE[k]);
                let mirrored = (0..window).all(|k| {
                    line_module(grid, horizontal, line, i + k) == FINDER_LIKE[window - 1 - k]
                });
                if forward || mirrored {
                    score += 40;
                    i += window;
                } else {
                    i += 1;
                }
            }
        }
    }
    score
}

fn dark_balance(grid: &BitMatrix) -> u32 {
    let total = grid.width() * grid.height();
    if total == 0 {
        return 0;
    }
    let dark_percent = (grid.count_dark() * 100 / total) as i64;
    let steps = (dark_percent - 50).unsigned_abs() / 5;
    10 * steps as u32
}
