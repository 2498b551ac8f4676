//! Conversion pipeline error type.

use thiserror::Error;

/// Failure inside the conversion pipeline. Callers never propagate these:
/// every variant degrades to "download the original, unconverted resource".
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("fetch failed: {0:#}")]
    Fetch(anyhow::Error),
    #[error("decode failed: {0}")]
    Decode(image::ImageError),
    #[error("encode failed: {0}")]
    Encode(image::ImageError),
}
