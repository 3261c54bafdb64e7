//! QR code decoding modules
//!
//! This module reads a clean module grid back into text:
//! - Format and version information extraction
//! - Unmasking and zigzag bitstream extraction
//! - Block de-interleaving and segment parsing
//!
//! Reed-Solomon parity is not used to repair codewords; they are
//! trusted as read.

/// De-interleaving and segment parsing of the codeword stream
pub mod payload;
/// Main QR decoder that orchestrates the decoding pipeline
pub mod qr_decoder;

pub use qr_decoder::QrDecoder;
