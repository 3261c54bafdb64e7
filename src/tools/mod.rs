//! Helpers for reading symbols back out of images.
//!
//! Sampling only handles clean, axis-aligned renderings such as the ones
//! produced by [`crate::render`]; finder localisation and perspective
//! correction in photos are not attempted.

use std::path::Path;

use image::GrayImage;
use tracing::debug;

use crate::QRCode;
use crate::decoder::QrDecoder;
use crate::error::{QrError, Result};
use crate::models::{BitMatrix, Version};

/// Modules across the top row of a finder pattern
const FINDER_WIDTH: f64 = 7.0;

/// Load an image from disk as 8-bit luma
pub fn load_luma<P: AsRef<Path>>(path: P) -> Result<GrayImage> {
    Ok(image::open(path)?.to_luma8())
}

/// Binarize with Otsu's threshold; dark pixels become `true`
pub fn binarize(gray: &GrayImage) -> BitMatrix {
    let threshold = otsu_threshold(gray.as_raw());
    let (width, height) = gray.dimensions();
    let mut binary = BitMatrix::new(width as usize, height as usize);
    for (x, y, pixel) in gray.enumerate_pixels() {
        binary.set(x as usize, y as usize, pixel.0[0] < threshold);
    }
    binary
}

/// Otsu's optimal threshold over a 256-bin histogram
fn otsu_threshold(gray: &[u8]) -> u8 {
    let mut histogram = [0u64; 256];
    for &pixel in gray {
        histogram[pixel as usize] += 1;
    }

    let total = gray.len() as f64;
    let total_sum: f64 = histogram
        .iter()
        .enumerate()
        .map(|(i, &c)| i as f64 * c as f64)
        .sum();

    let mut best_variance = 0.0;
    let mut best_threshold = 128u8;
    let mut below_count = 0.0;
    let mut below_sum = 0.0;

    for threshold in 1..=255usize {
        below_count += histogram[threshold - 1] as f64;
        below_sum += (threshold - 1) as f64 * histogram[threshold - 1] as f64;
        let above_count = total - below_count;
        if below_count == 0.0 || above_count == 0.0 {
            continue;
        }

        let below_mean = below_sum / below_count;
        let above_mean = (total_sum - below_sum) / above_count;
        let variance =
            (below_count / total) * (above_count / total) * (below_mean - above_mean).powi(2);
        if variance > best_variance {
            best_variance = variance;
            best_threshold = threshold as u8;
        }
    }

    best_threshold
}

/// Sample a module grid from an unrotated rendering.
///
/// The dark bounding box gives the symbol extent, the top row of the
/// top-left finder gives a first pitch estimate, and the side is then
/// snapped to the nearest valid `17 + 4v` size before sampling module
/// centers.
pub fn grid_from_luma(gray: &GrayImage) -> Result<BitMatrix> {
    let binary = binarize(gray);
    let (min_x, min_y, max_x, max_y) = dark_bounds(&binary)
        .ok_or_else(|| QrError::MalformedSymbol("image has no dark pixels".to_string()))?;

    let finder_run = (min_x..=max_x)
        .take_while(|&x| binary.get(x, min_y))
        .count();
    let pitch_estimate = finder_run as f64 / FINDER_WIDTH;
    if pitch_estimate <= 0.0 {
        return Err(QrError::MalformedSymbol(
            "top-left finder not found".to_string(),
        ));
    }

    let side_px = (max_x - min_x + 1) as f64;
    let modules = side_px / pitch_estimate;
    let version_number = ((modules - 17.0) / 4.0).round();
    if !(1.0..=40.0).contains(&version_number) {
        return Err(QrError::MalformedSymbol(format!(
            "sampled side of {modules:.1} modules is not a QR size"
        )));
    }
    let size = Version::new(version_number as u8)?.size();
    let pitch_x = side_px / size as f64;
    let pitch_y = (max_y - min_y + 1) as f64 / size as f64;
    debug!(size, pitch_x, pitch_y, "sampling grid");

    let mut grid = BitMatrix::square(size);
    for my in 0..size {
        let py = min_y + ((my as f64 + 0.5) * pitch_y) as usize;
        for mx in 0..size {
            let px = min_x + ((mx as f64 + 0.5) * pitch_x) as usize;
            grid.set(mx, my, binary.get(px, py));
        }
    }
    Ok(grid)
}

fn dark_bounds(binary: &BitMatrix) -> Option<(usize, usize, usize, usize)> {
    let mut bounds: Option<(usize, usize, usize, usize)> = None;
    for y in 0..binary.height() {
        for x in 0..binary.width() {
            if !binary.get(x, y) {
                continue;
            }
            bounds = Some(match bounds {
                None => (x, y, x, y),
                Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
            });
        }
    }
    bounds
}

/// Load, sample and decode an image file
pub fn decode_image<P: AsRef<Path>>(path: P) -> Result<QRCode> {
    let gray = load_luma(path)?;
    let grid = grid_from_luma(&gray)?;
    QrDecoder::decode(&grid)
}
