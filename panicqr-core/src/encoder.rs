//! Bit-level framing of segments into the encoded-message region, Reed-
//! Solomon parity computation, and the canonical interleaved output
//! order the matrix painter consumes.

use crate::gf256;
use crate::segment::{Segment, MODE_TERMINATOR};
use crate::tables::Version;

/// Alternating padding bytes appended after the terminator and
/// byte-alignment zero-pad, until the data region is full.
const PADDING: [u8; 2] = [0xEC, 0x11];

const MAX_EC_SIZE: usize = 30;
const MAX_BLK_SIZE: usize = 123;

/// Builds one QR Code's data-and-parity region in a caller-supplied
/// buffer, then exposes it as an iterator in the canonical interleaved
/// byte order the matrix painter expects.
///
/// `data` must be at least `version.buffer_len()` bytes; the caller owns
/// this buffer across symbols and passes the same one back in on the
/// next call, so it can be reused without reallocating.
pub struct EncodedMessage<'a> {
    data: &'a mut [u8],
    offset_bits: usize,
    version: Version,
    current: usize,
}

impl<'a> EncodedMessage<'a> {
    /// Zeroes `data` and prepares it to receive segments for `version`.
    pub fn new(version: Version, data: &'a mut [u8]) -> EncodedMessage<'a> {
        data[..version.buffer_len()].fill(0);
        EncodedMessage {
            data,
            offset_bits: 0,
            version,
            current: 0,
        }
    }

    fn push(&mut self, value: u16, len_bits: usize) {
        let byte_off = self.offset_bits / 8;
        let bit_off = self.offset_bits % 8;
        let b = bit_off + len_bits;
        self.offset_bits += len_bits;

        match (bit_off, b) {
            (0, 0..=8) => {
                self.data[byte_off] = (value << (8 - b)) as u8;
            }
            (0, _) => {
                self.data[byte_off] = (value >> (b - 8)) as u8;
                self.data[byte_off + 1] = (value << (16 - b)) as u8;
            }
            (_, 0..=8) => {
                self.data[byte_off] |= (value << (8 - b)) as u8;
            }
            (_, 9..=16) => {
                self.data[byte_off] |= (value >> (b - 8)) as u8;
                self.data[byte_off + 1] = (value << (16 - b)) as u8;
            }
            _ => {
                self.data[byte_off] |= (value >> (b - 8)) as u8;
                self.data[byte_off + 1] = (value >> (b - 16)) as u8;
                self.data[byte_off + 2] = (value << (24 - b)) as u8;
            }
        }
    }

    /// Appends one segment's mode indicator, length field, and payload
    /// bits.
    pub fn add_segment(&mut self, segment: Segment<'_>) {
        self.push(segment.mode(), 4);
        self.push(
            segment.character_count() as u16,
            segment.length_bits_count(self.version),
        );
        for (value, len_bits) in segment.payload_bits() {
            self.push(value, len_bits);
        }
    }

    /// Appends the terminator and fills the remainder of the data region
    /// with the alternating EC/11 padding pattern.
    fn finish(&mut self) {
        self.push(MODE_TERMINATOR, 4);

        let pad_offset = (self.offset_bits + 7) / 8;
        for i in pad_offset..self.version.data_capacity() {
            self.data[i] = PADDING[(i & 1) ^ (pad_offset & 1)];
        }
    }

    fn error_code_for_block(&mut self, offset: usize, size: usize, ec_offset: usize, ec_size: usize) {
        let mut scratch = [0u8; MAX_BLK_SIZE + MAX_EC_SIZE];
        scratch[..size].copy_from_slice(&self.data[offset..offset + size]);

        for i in 0..size {
            let lead = scratch[i];
            if lead == 0 {
                continue;
            }
            let log_lead = usize::from(gf256::LOG[usize::from(lead)]);
            for (coeff, &poly_term) in scratch[i + 1..].iter_mut().zip(self.version.poly().iter())
            {
                *coeff ^= gf256::EXP[(usize::from(poly_term) + log_lead) % 255];
            }
        }
        self.data[ec_offset..ec_offset + ec_size].copy_from_slice(&scratch[size..size + ec_size]);
    }

    /// Computes Reed-Solomon parity for every block and appends it after
    /// the data region.
    fn compute_error_code(&mut self) {
        let ec_size = self.version.ec_size();
        let g1_blocks = self.version.g1_blocks();
        let g1_size = self.version.g1_block_size();
        let g2_blocks = self.version.g2_blocks();
        let g2_size = self.version.g2_block_size();

        let mut offset = 0;
        let mut ec_offset = self.version.data_capacity();
        for _ in 0..g1_blocks {
            self.error_code_for_block(offset, g1_size, ec_offset, ec_size);
            offset += g1_size;
            ec_offset += ec_size;
        }
        for _ in 0..g2_blocks {
            self.error_code_for_block(offset, g2_size, ec_offset, ec_size);
            offset += g2_size;
            ec_offset += ec_size;
        }
    }

    /// Frames every segment, terminates and pads, then computes parity.
    /// After this call the iterator yields the full interleaved byte
    /// stream.
    pub fn encode(&mut self, segments: &[Segment<'_>]) {
        for &segment in segments {
            self.add_segment(segment);
        }
        self.finish();
        self.compute_error_code();
    }
}

impl Iterator for EncodedMessage<'_> {
    type Item = u8;

    /// Emits bytes in the canonical interleaved order: column-major
    /// across group-1-then-group-2 blocks for the data region (with the
    /// final column only present for group-2's extra byte), then
    /// column-major across all blocks' parity.
    fn next(&mut self) -> Option<u8> {
        let blocks = self.version.g1_blocks() + self.version.g2_blocks();
        let g1_blocks = self.version.g1_blocks();
        let g1_size = self.version.g1_block_size();
        let g2_size = self.version.g2_block_size();
        let ec_size = self.version.ec_size();

        let g1_end = g1_blocks * g1_size;
        let g2_end = self.version.data_capacity();
        let ec_end = g2_end + ec_size * blocks;

        if self.current >= ec_end {
            return None;
        }

        let offset = if self.current < g1_size * blocks {
            let blk = self.current % blocks;
            let blk_off = self.current / blocks;
            if blk < g1_blocks {
                blk * g1_size + blk_off
            } else {
                g1_end + g2_size * (blk - g1_blocks) + blk_off
            }
        } else if self.current < g2_end {
            // the single extra column in group-2 blocks' final byte
            let blk2 = self.current - blocks * g1_size;
            g1_size * g1_blocks + blk2 * g2_size + g2_size - 1
        } else {
            let ec_offset = self.current - g2_end;
            let blk = ec_offset % blocks;
            let blk_off = ec_offset / blocks;
            g2_end + blk * ec_size + blk_off
        };
        self.current += 1;
        Some(self.data[offset])
    }
}
