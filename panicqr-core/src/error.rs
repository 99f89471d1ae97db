//! Error types for the encoder and the payload fitter. Both are `Copy`
//! enums with a manual `core::fmt::Display` impl; the crate is `no_std`
//! and zero-dependency, so there is no `core::error::Error` impl to
//! derive against (the teacher's own `DataTooLong` takes the same
//! approach).

/// A validation failure from [`crate::qr_generate`]. No state is
/// mutated when this is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    /// The chosen version is outside `1..=40`.
    InvalidVersion,
    /// `tmp` is smaller than `version.buffer_len()`.
    TmpBufferTooSmall,
    /// `data` is smaller than the bitmap `version` requires.
    DataBufferTooSmall,
    /// The segments' framed bit length exceeds `version.data_capacity()`.
    SegmentsTooLong,
}

impl core::fmt::Display for EncodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidVersion => write!(f, "version must be in 1..=40"),
            Self::TmpBufferTooSmall => write!(f, "tmp buffer too small for this version"),
            Self::DataBufferTooSmall => write!(f, "data buffer too small for this version's bitmap"),
            Self::SegmentsTooLong => write!(f, "segments do not fit the version's data capacity"),
        }
    }
}

/// A failure from [`crate::fitter::fit_payload`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitError {
    /// `qr_max_data_size(version, 0) <= 8`: the header alone wouldn't
    /// leave room for a compressed frame.
    CapacityTooSmall,
    /// Not even a 1-byte prefix compresses (plus header) within capacity.
    NothingFits,
    /// The final deterministic recompression pass produced a frame that
    /// no longer fits, despite an earlier search iteration fitting.
    FinalPassMismatch,
    /// The destination buffer is smaller than the computed capacity.
    DestinationTooSmall,
}

impl core::fmt::Display for FitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::CapacityTooSmall => write!(f, "version's byte-mode capacity is too small to hold a header"),
            Self::NothingFits => write!(f, "no prefix of the source compresses within capacity"),
            Self::FinalPassMismatch => write!(f, "final recompression pass no longer fits"),
            Self::DestinationTooSmall => write!(f, "destination buffer smaller than computed capacity"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_error_formats_without_panicking() {
        for e in [
            EncodeError::InvalidVersion,
            EncodeError::TmpBufferTooSmall,
            EncodeError::DataBufferTooSmall,
            EncodeError::SegmentsTooLong,
        ] {
            assert!(!std::format!("{e}").is_empty());
        }
    }

    #[test]
    fn fit_error_formats_without_panicking() {
        for e in [
            FitError::CapacityTooSmall,
            FitError::NothingFits,
            FitError::FinalPassMismatch,
            FitError::DestinationTooSmall,
        ] {
            assert!(!std::format!("{e}").is_empty());
        }
    }
}
