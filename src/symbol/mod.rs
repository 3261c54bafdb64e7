//! Symbol structure shared by the encoder and the decoder
//!
//! - Capacity and block tables
//! - Reed-Solomon parity over GF(256) and the BCH format/version codes
//! - Function-pattern geometry, masks and mask penalties
//! - The bit packer used for the codeword stream

/// BCH codes for format and version info
pub mod bch;
/// MSB-first bit packer/reader
pub mod bit_buffer;
/// Format information stamping and extraction (mask pattern, EC level)
pub mod format;
/// Function module mask and alignment pattern positions
pub mod function_mask;
/// Mask application, reversal and penalty-driven selection
pub mod mask;
/// Finder, timing, alignment and dark-module drawing
pub mod patterns;
/// The four mask penalty rules
pub mod penalty;
/// Reed-Solomon error correction coding
pub mod reed_solomon;
/// QR specification tables (block layouts per version and level)
pub mod tables;
/// Version information stamping and verification (versions 7-40)
pub mod version;
