//! Error type shared by the encoder, the decoder and the image helpers.

use thiserror::Error;

use crate::models::ECLevel;
use crate::modes::Mode;

/// Everything that can go wrong while building or reading a symbol.
#[derive(Debug, Error)]
pub enum QrError {
    /// Version outside 1-40, or derived from an ill-sized grid.
    #[error("invalid QR version {0}: must be between 1 and 40")]
    InvalidVersion(u8),

    /// No version at the requested level has enough data capacity.
    #[error("payload of {data_bits} bits does not fit any version at level {level}")]
    PayloadTooLarge { level: ECLevel, data_bits: usize },

    /// The payload or symbol needs a mode this crate does not implement.
    #[error("unsupported data mode: {0:?}")]
    UnsupportedMode(Mode),

    /// Structural inconsistency found while reading a grid.
    #[error("malformed symbol: {0}")]
    MalformedSymbol(String),

    /// A single bit-field write exceeded the packer's maximum width.
    #[error("value does not fit a bit field of width {width}")]
    FieldWidthOverflow { width: usize },

    /// Image load or save failure in the rendering helpers.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, QrError>;
