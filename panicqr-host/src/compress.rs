//! The production [`panicqr_core::fitter::Compressor`] implementation,
//! backed by the `zstd` crate's one-shot bulk compressor.

use panicqr_core::fitter::Compressor;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompressError {
    #[error("zstd compression failed: {0}")]
    Zstd(#[source] std::io::Error),
    #[error("compressed output ({written}B) does not fit the destination ({cap}B)")]
    Overflow { written: usize, cap: usize },
}

/// Wraps a fixed ZSTD compression level, matching spec.md §9's note
/// that implementations "must size the scratch for the chosen level
/// exactly." A fresh `zstd::bulk::Compressor` is built per call at that
/// same level, so every call in a symbol's binary search gets an
/// identically-sized context.
pub struct ZstdCompressor {
    level: i32,
}

impl ZstdCompressor {
    /// `level` should already be validated by
    /// [`crate::config::HostConfig::validate`].
    pub fn new(level: i32) -> Self {
        ZstdCompressor { level }
    }

    pub fn level(&self) -> i32 {
        self.level
    }
}

impl Compressor for ZstdCompressor {
    type Error = CompressError;

    fn compress(&mut self, src: &[u8], dst: &mut [u8]) -> Result<usize, CompressError> {
        let mut compressor =
            zstd::bulk::Compressor::new(self.level).map_err(CompressError::Zstd)?;
        let written = compressor
            .compress_to_buffer(src, dst)
            .map_err(CompressError::Zstd)?;
        if written > dst.len() {
            return Err(CompressError::Overflow {
                written,
                cap: dst.len(),
            });
        }
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compresses_into_a_smaller_or_equal_buffer() {
        let mut c = ZstdCompressor::new(3);
        let src = vec![0u8; 4096];
        let mut dst = vec![0u8; 4096];
        let written = c.compress(&src, &mut dst).unwrap();
        assert!(written < src.len());
    }

    #[test]
    fn refuses_when_destination_too_small() {
        let mut c = ZstdCompressor::new(3);
        let src = (0u32..4096).map(|x| x as u8).collect::<Vec<_>>();
        let mut dst = vec![0u8; 4];
        assert!(c.compress(&src, &mut dst).is_err());
    }

    #[test]
    fn round_trips_through_decompression() {
        let mut c = ZstdCompressor::new(3);
        let src = b"the kernel is fine, probably, this time, for real".repeat(8);
        let mut dst = vec![0u8; src.len() + 64];
        let written = c.compress(&src, &mut dst).unwrap();
        let decoded = zstd::bulk::decompress(&dst[..written], src.len() * 2).unwrap();
        assert_eq!(decoded, src);
    }
}
