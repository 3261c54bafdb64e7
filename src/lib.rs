//! qr_forge - QR code encoding and decoding
//!
//! Turns text into a fully masked, stamped QR module grid and reads such
//! a grid back into text. Image rendering and sampling of clean,
//! axis-aligned renderings live in [`render`] and [`tools`].
//!
//! ```
//! let qr = qr_forge::encode_text("HELLO WORLD").unwrap();
//! let decoded = qr_forge::decode(&qr.modules).unwrap();
//! assert_eq!(decoded.content, "HELLO WORLD");
//! ```

/// Environment defaults and per-call encode options
pub mod config;
/// QR code decoding (format/version reading, unmasking, segment parsing)
pub mod decoder;
/// QR code encoding (segment packing, interleaving, placement, masking)
pub mod encoder;
/// Crate-wide error type
pub mod error;
/// Core data structures (QRCode, BitMatrix, Version, etc.)
pub mod models;
/// Data modes and the segmenter
pub mod modes;
/// Grid to image and terminal text
pub mod render;
/// Tables, Galois field, BCH, geometry and masks
pub mod symbol;
/// Image loading and grid sampling helpers
pub mod tools;

pub use config::EncodeOptions;
pub use decoder::QrDecoder;
pub use encoder::QrEncoder;
pub use error::{QrError, Result};
pub use models::{BitMatrix, ECLevel, MaskPattern, QRCode, Version};
pub use modes::{Mode, Segment, SegmentMode};

/// Recommended light margin around a symbol, in modules
pub const QUIET_ZONE: usize = 4;

/// Encode `text` with explicit options
pub fn encode(text: &str, options: &EncodeOptions) -> Result<QRCode> {
    QrEncoder::encode(text, options)
}

/// Encode `text` with default options (auto segmentation, default level)
pub fn encode_text(text: &str) -> Result<QRCode> {
    QrEncoder::encode(text, &EncodeOptions::default())
}

/// Decode a square module grid without quiet zone
pub fn decode(grid: &BitMatrix) -> Result<QRCode> {
    QrDecoder::decode(grid)
}
