//! A no-allocation QR Code Model 2 encoder, fixed to error-correction
//! level Low and mask pattern 0, plus a payload fitter that binary-
//! searches for the largest log prefix whose compressed, framed form
//! fits one symbol.
//!
//! This crate is `#![no_std]` and has no dependencies: every buffer is
//! supplied by the caller and reused across symbols, which keeps it
//! usable from a panic-notifier context where the allocator may not be
//! trusted. The production ZSTD compressor, framebuffer, and log-buffer
//! collaborators live in the `panicqr-host` crate; this crate only
//! depends on the [`fitter::Compressor`] trait.

#![cfg_attr(not(test), no_std)]
#![forbid(unsafe_code)]

pub mod encoder;
pub mod error;
pub mod fitter;
mod gf256;
pub mod matrix;
pub mod segment;
pub mod tables;

use encoder::EncodedMessage;
use error::EncodeError;
use matrix::QrImage;
use segment::Segment;
use tables::Version;

/// The byte-mode capacity of a symbol: `D(version) - 3` bytes, or, with
/// `url_len > 0`, the numeric-segment capacity left after a
/// `url_len`-byte byte segment (see [`fitter::qr_max_data_size`] for the
/// exact formula). Returns 0 for an invalid version.
pub fn qr_max_data_size(version: u8, url_len: usize) -> usize {
    match Version::new(version) {
        Some(v) => fitter::qr_max_data_size(v, url_len),
        None => 0,
    }
}

/// Builds a complete QR Code symbol into `data`, overwriting it with the
/// rendered bitmap, using `tmp` as scratch space for the pre-mask
/// encoded message.
///
/// If `url` is given, the segments are `[byte(url), numeric(data)]`;
/// otherwise a single `[byte(data)]` segment is used. `data` must be at
/// least as large as the version's bitmap (`stride * width`); `tmp` must
/// be at least `version.buffer_len()`. Returns the symbol width
/// (`4*version + 17`) on success.
pub fn qr_generate(
    url: Option<&[u8]>,
    data: &mut [u8],
    data_len: usize,
    version: u8,
    tmp: &mut [u8],
) -> Result<u8, EncodeError> {
    let version = Version::new(version).ok_or(EncodeError::InvalidVersion)?;
    if tmp.len() < version.buffer_len() {
        return Err(EncodeError::TmpBufferTooSmall);
    }
    let width = version.width();
    let stride = usize::from((width + 7) / 8);
    let bitmap_len = stride * usize::from(width);
    if data.len() < bitmap_len || data_len > data.len() {
        return Err(EncodeError::DataBufferTooSmall);
    }

    let mut msg = EncodedMessage::new(version, tmp);
    match url {
        Some(url) => {
            let seg_url = Segment::Byte(url);
            let seg_data = Segment::Numeric(&data[..data_len]);
            let total_bits = seg_url.total_size_bits(version) + seg_data.total_size_bits(version);
            if total_bits > version.data_capacity() * 8 {
                return Err(EncodeError::SegmentsTooLong);
            }
            msg.encode(&[seg_url, seg_data]);
        }
        None => {
            let seg_data = Segment::Byte(&data[..data_len]);
            if seg_data.total_size_bits(version) > version.data_capacity() * 8 {
                return Err(EncodeError::SegmentsTooLong);
            }
            msg.encode(&[seg_data]);
        }
    }

    let mut image = QrImage::new(version, data);
    Ok(image.draw_all(msg))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimum_symbol_matches_spec_scenario() {
        let mut data = [0u8; 64];
        data[..6].copy_from_slice(b"HELLO\n");
        let mut tmp = [0u8; 64];
        let width = qr_generate(None, &mut data, 6, 1, &mut tmp).unwrap();
        assert_eq!(width, 21);
    }

    #[test]
    fn rejects_invalid_version() {
        let mut data = [0u8; 64];
        let mut tmp = [0u8; 64];
        let err = qr_generate(None, &mut data, 0, 41, &mut tmp).unwrap_err();
        assert_eq!(err, EncodeError::InvalidVersion);
    }

    #[test]
    fn rejects_undersized_tmp_buffer() {
        let mut data = [0u8; 64];
        let mut tmp = [0u8; 4];
        let err = qr_generate(None, &mut data, 0, 1, &mut tmp).unwrap_err();
        assert_eq!(err, EncodeError::TmpBufferTooSmall);
    }

    #[test]
    fn empty_input_produces_valid_empty_symbol() {
        let mut data = [0u8; tables::MAX_BITMAP_LEN];
        let mut tmp = [0u8; 512];
        let width = qr_generate(None, &mut data, 0, 5, &mut tmp).unwrap();
        assert_eq!(width, 37);
    }

    #[test]
    fn version_sweep_reports_correct_width() {
        let mut data = [0u8; tables::MAX_BITMAP_LEN];
        let mut tmp = [0u8; tables::MAX_BUFFER_LEN];
        for v in Version::MIN..=Version::MAX {
            let cap = qr_max_data_size(v, 0);
            let width = qr_generate(None, &mut data, cap, v, &mut tmp).unwrap();
            assert_eq!(width, v * 4 + 17);
        }
    }

    #[test]
    fn url_plus_numeric_two_segment_layout_encodes() {
        // spec.md §6: with a url, qr_generate emits [byte(url), numeric(data)].
        let url = b"https://example.com/k?d=";
        let mut data = [0u8; tables::MAX_BITMAP_LEN];
        let payload = [0xABu8; 32];
        data[..payload.len()].copy_from_slice(&payload);
        let mut tmp = [0u8; tables::MAX_BUFFER_LEN];
        let width = qr_generate(Some(url), &mut data, payload.len(), 10, &mut tmp).unwrap();
        assert_eq!(width, 10 * 4 + 17);
    }

    #[test]
    fn url_too_long_for_capacity_is_rejected() {
        let url = [b'x'; 4000];
        let mut data = [0u8; tables::MAX_BITMAP_LEN];
        let mut tmp = [0u8; tables::MAX_BUFFER_LEN];
        let err = qr_generate(Some(&url), &mut data, 0, 1, &mut tmp).unwrap_err();
        assert_eq!(err, EncodeError::SegmentsTooLong);
    }

    #[test]
    fn determinism_across_runs() {
        let mut data_a = [0u8; tables::MAX_BITMAP_LEN];
        let mut data_b = data_a;
        let mut tmp = [0u8; tables::MAX_BUFFER_LEN];
        let mut tmp_b = tmp;
        let payload = b"the kernel is fine, probably";
        data_a[..payload.len()].copy_from_slice(payload);
        data_b[..payload.len()].copy_from_slice(payload);

        qr_generate(None, &mut data_a, payload.len(), 3, &mut tmp).unwrap();
        qr_generate(None, &mut data_b, payload.len(), 3, &mut tmp_b).unwrap();
        assert_eq!(&data_a[..], &data_b[..]);
    }
}
