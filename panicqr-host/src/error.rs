//! The host's top-level error type, unifying the core's `Copy` enums
//! with the compression, I/O, and image-encoding errors the ambient
//! stack introduces, so the driver and demo binary can propagate with
//! `?` instead of matching on the core's errors by hand.

use thiserror::Error;

use crate::compress::CompressError;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("QR encode failed: {0}")]
    Encode(panicqr_core::error::EncodeError),
    #[error("payload fit failed: {0}")]
    Fit(panicqr_core::error::FitError),
    #[error("compression backend error: {0}")]
    Compress(#[from] CompressError),
    #[error("unsupported compression level {0} (scratch not sized for it)")]
    UnsupportedCompressionLevel(i32),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PNG encode error: {0}")]
    Image(#[from] image::ImageError),
}

impl From<panicqr_core::error::EncodeError> for HostError {
    fn from(e: panicqr_core::error::EncodeError) -> Self {
        HostError::Encode(e)
    }
}

impl From<panicqr_core::error::FitError> for HostError {
    fn from(e: panicqr_core::error::FitError) -> Self {
        HostError::Fit(e)
    }
}
