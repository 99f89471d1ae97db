//! The payload fitter: binary search over the uncompressed prefix
//! length so that a ZSTD-framed, header-prefixed payload fits a QR
//! version's byte-mode data capacity.
//!
//! The core has no concrete compression implementation (and must not:
//! see spec.md §5, "Shared resources: None within the core"); callers
//! plug one in through [`Compressor`]. `panicqr-host` supplies the
//! production implementation backed by the `zstd` crate.

use crate::error::FitError;
use crate::tables::Version;

/// Little-endian magic identifying a persisted payload frame:
/// `0x44 0x54 0x53 0x5A` on the wire.
pub const FRAME_MAGIC: u32 = 0x5A53_5444;
/// `magic (4 bytes) + uncompressed_length (4 bytes)`.
pub const HEADER_LEN: usize = 8;

/// A compressor the fitter can call repeatedly with different prefix
/// lengths during its binary search. Implementations are free to be
/// stateful (e.g. a reusable ZSTD context) as long as `compress` is a
/// pure function of `src` for a fixed `self`.
pub trait Compressor {
    type Error;

    /// Compresses `src` into `dst`, returning the number of bytes
    /// written. Returns `Err` if `src` does not fit within `dst` at the
    /// compressor's configured level; the fitter treats this exactly
    /// like "this prefix length does not fit" (spec.md §7, kind 2).
    fn compress(&mut self, src: &[u8], dst: &mut [u8]) -> Result<usize, Self::Error>;
}

/// The outcome of a successful [`fit_payload`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FitResult {
    /// Number of source bytes consumed (`best_k`); the caller advances
    /// its read cursor by this amount.
    pub consumed: usize,
    /// Total length of the frame written to `dst` (header + compressed
    /// bytes).
    pub frame_len: usize,
}

/// `qr_max_data_size(version, url_len)`. With `url_len == 0`, the plain
/// byte-mode capacity `D(v) - 3`. With `url_len > 0`, the capacity left
/// for a numeric-mode segment following a `url_len`-byte byte segment,
/// expressed in the numeric segment's *source* bytes (accounting for
/// the custom 13-bit repacking's 2.5% expansion via the `39/40` factor).
/// Returns 0 if `version` is invalid or the url alone exhausts capacity.
pub fn qr_max_data_size(version: Version, url_len: usize) -> usize {
    let d = version.data_capacity();
    if url_len == 0 {
        d.saturating_sub(3)
    } else if d < url_len + 5 {
        0
    } else {
        (d - url_len - 5) * 39 / 40
    }
}

/// Binary-searches for the largest prefix `src[0..k]` whose
/// `[header | compressor.compress(src[0..k])]` frame fits within
/// `version`'s byte-mode capacity, then deterministically recompresses
/// that prefix into `dst` and writes the header.
///
/// `dst` must be at least `HEADER_LEN` bytes; the usable frame capacity
/// is `min(qr_max_data_size(version, 0), dst.len())`.
pub fn fit_payload<C: Compressor>(
    compressor: &mut C,
    src: &[u8],
    version: Version,
    dst: &mut [u8],
) -> Result<FitResult, FitError> {
    if dst.len() < HEADER_LEN {
        return Err(FitError::DestinationTooSmall);
    }
    let cap = core::cmp::min(qr_max_data_size(version, 0), dst.len());
    if cap <= HEADER_LEN {
        return Err(FitError::CapacityTooSmall);
    }
    if src.is_empty() {
        write_header(dst, 0);
        return Ok(FitResult {
            consumed: 0,
            frame_len: HEADER_LEN,
        });
    }

    let scratch = &mut dst[HEADER_LEN..];
    let mut lo = 1usize;
    let mut hi = src.len();
    let mut best_k = 0usize;
    let mut best_size = 0usize;

    while lo <= hi {
        let m = lo + (hi - lo) / 2;
        match compressor.compress(&src[..m], scratch) {
            Ok(compressed_size) if HEADER_LEN + compressed_size <= cap => {
                best_k = m;
                best_size = compressed_size;
                lo = m + 1;
            }
            _ => {
                if m == 0 {
                    break;
                }
                hi = m - 1;
            }
        }
    }

    if best_k == 0 {
        return Err(FitError::NothingFits);
    }

    // The last search iteration may not have targeted best_k; recompress
    // deterministically so the on-wire bytes match the recorded length.
    let final_size = compressor
        .compress(&src[..best_k], &mut dst[HEADER_LEN..])
        .map_err(|_| FitError::FinalPassMismatch)?;
    if HEADER_LEN + final_size > cap {
        return Err(FitError::FinalPassMismatch);
    }
    let _ = best_size;

    write_header(dst, best_k as u32);
    Ok(FitResult {
        consumed: best_k,
        frame_len: HEADER_LEN + final_size,
    })
}

fn write_header(dst: &mut [u8], uncompressed_length: u32) {
    dst[0..4].copy_from_slice(&FRAME_MAGIC.to_le_bytes());
    dst[4..8].copy_from_slice(&uncompressed_length.to_le_bytes());
}
