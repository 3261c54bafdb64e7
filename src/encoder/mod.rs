//! Text to symbol
//!
//! - `codewords`: segment packing, padding, block split and interleaving
//! - `placement`: zigzag traversal of data modules
//! - `qr_encoder`: version choice, mask search and stamping

/// Data codeword stream and error-correction interleaving
pub mod codewords;
/// Zigzag order of data modules
pub mod placement;
/// Encoder entry point
pub mod qr_encoder;

pub use qr_encoder::QrEncoder;
