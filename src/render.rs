//! Turning a module grid into pixels or terminal text.

use std::path::Path;

use image::{GrayImage, Luma};

use crate::error::Result;
use crate::models::BitMatrix;

const DARK: Luma<u8> = Luma([0]);
const LIGHT: Luma<u8> = Luma([255]);

/// Render `grid` with `module_px` pixels per module and a light margin of
/// `quiet_zone` modules on every side
pub fn render_luma(grid: &BitMatrix, module_px: usize, quiet_zone: usize) -> GrayImage {
    let module_px = module_px.max(1);
    let width = (grid.width() + 2 * quiet_zone) * module_px;
    let height = (grid.height() + 2 * quiet_zone) * module_px;

    GrayImage::from_fn(width as u32, height as u32, |px, py| {
        let mx = (px as usize / module_px).checked_sub(quiet_zone);
        let my = (py as usize / module_px).checked_sub(quiet_zone);
        match (mx, my) {
            (Some(x), Some(y)) if grid.get(x, y) => DARK,
            _ => LIGHT,
        }
    })
}

/// Render and write to `path`; the format follows the file extension
pub fn save_image<P: AsRef<Path>>(
    grid: &BitMatrix,
    path: P,
    module_px: usize,
    quiet_zone: usize,
) -> Result<()> {
    render_luma(grid, module_px, quiet_zone).save(path)?;
    Ok(())
}

/// Two characters per module, dark as full blocks, with a quiet zone
pub fn render_text(grid: &BitMatrix, quiet_zone: usize) -> String {
    let width = grid.width() + 2 * quiet_zone;
    let height = grid.height() + 2 * quiet_zone;
    let mut out = String::with_capacity(height * (width * 2 * 3 + 1));
    for y in 0..height {
        for x in 0..width {
            let dark = x >= quiet_zone
                && y >= quiet_zone
                && grid.get(x - quiet_zone, y - quiet_zone);
            out.push_str(if dark { "██" } else { "  " });
        }
        out.push('\n');
    }
    out
}
