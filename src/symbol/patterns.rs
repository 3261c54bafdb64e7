//! Drawing of the fixed function patterns onto a module grid

use crate::models::{BitMatrix, Version};
use crate::symbol::function_mask::alignment_centers;

/// Finder, separators, timing, alignment patterns and the dark module.
/// Format and version areas are left for [`crate::symbol::format`] and
/// [`crate::symbol::version`] to fill.
pub fn draw_function_patterns(grid: &mut BitMatrix, version: Version) {
    let size = version.size();

    draw_timing_patterns(grid, size);

    draw_finder_pattern(grid, 3, 3);
    draw_finder_pattern(grid, size - 4, 3);
    draw_finder_pattern(grid, 3, size - 4);

    for (cx, cy) in alignment_centers(version) {
        draw_alignment_pattern(grid, cx, cy);
    }

    draw_dark_module(grid, size);
}

fn draw_timing_patterns(grid: &mut BitMatrix, size: usize) {
    for i in 0..size {
        grid.set(6, i, i % 2 == 0);
        grid.set(i, 6, i % 2 == 0);
    }
}

/// 7x7 finder centred on (cx, cy) plus its one-module light separator,
/// clipped at the symbol edge
fn draw_finder_pattern(grid: &mut BitMatrix, cx: usize, cy: usize) {
    for dy in -4i32..=4 {
        for dx in -4i32..=4 {
            let x = cx as i32 + dx;
            let y = cy as i32 + dy;
            if x < 0 || y < 0 {
                continue;
            }
            let dist = dx.abs().max(dy.abs());
            grid.set(x as usize, y as usize, dist != 2 && dist != 4);
        }
    }
}

/// 5x5 alignment pattern: dark ring, light ring, dark centre
fn draw_alignment_pattern(grid: &mut BitMatrix, cx: usize, cy: usize) {
    for dy in -2i32..=2 {
        for dx in -2i32..=2 {
            let x = (cx as i32 + dx) as usize;
            let y = (cy as i32 + dy) as usize;
            grid.set(x, y, dx.abs().max(dy.abs()) != 1);
        }
    }
}

fn draw_dark_module(grid: &mut BitMatrix, size: usize) {
    grid.set(8, size - 8, true);
}
