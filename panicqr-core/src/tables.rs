//! Per-version parameter tables for QR Code Model 2, ECC level Low only.
//!
//! All tables are embedded verbatim rather than computed at runtime: the
//! generator polynomials are BCH/Reed-Solomon constants, and the
//! version/format info words are precomputed BCH codes. None of this is
//! derived here.

/// A validated QR version in `1..=40`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version(u8);

impl Version {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 40;

    /// Returns `None` if `v` is outside `1..=40`.
    pub fn new(v: u8) -> Option<Version> {
        if (Self::MIN..=Self::MAX).contains(&v) {
            Some(Version(v))
        } else {
            None
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    fn index(self) -> usize {
        usize::from(self.0 - 1)
    }

    /// Symbol width and height in modules: `4v + 17`.
    pub fn width(self) -> u8 {
        self.0 * 4 + 17
    }

    pub fn g1_blocks(self) -> usize {
        usize::from(VPARAM[self.index()].g1)
    }

    pub fn g2_blocks(self) -> usize {
        usize::from(VPARAM[self.index()].g2)
    }

    pub fn g1_block_size(self) -> usize {
        usize::from(VPARAM[self.index()].s1)
    }

    pub fn g2_block_size(self) -> usize {
        self.g1_block_size() + 1
    }

    /// `E(v)`: number of error-correction codewords per block.
    pub fn ec_size(self) -> usize {
        VPARAM[self.index()].poly.len()
    }

    pub fn poly(self) -> &'static [u8] {
        VPARAM[self.index()].poly
    }

    /// `D(v)`: total data-codeword capacity in bytes.
    pub fn data_capacity(self) -> usize {
        self.g1_blocks() * self.g1_block_size() + self.g2_blocks() * self.g2_block_size()
    }

    /// Total size in bytes of the encoded message region (data + EC), the
    /// minimum length a `tmp` buffer passed to [`crate::encoder::EncodedMessage`]
    /// must have for this version.
    pub fn buffer_len(self) -> usize {
        self.data_capacity() + self.ec_size() * (self.g1_blocks() + self.g2_blocks())
    }

    /// Alignment-pattern center coordinates; empty for V1.
    pub fn alignment_pattern(self) -> &'static [u8] {
        ALIGNMENT_PATTERNS[self.index()]
    }

    /// 18-bit version-information word; zero below V7.
    pub fn version_info(self) -> u32 {
        if self.0 >= 7 {
            VERSION_INFORMATION[usize::from(self.0 - 7)]
        } else {
            0
        }
    }
}

/// Largest possible `buffer_len()` across V1..=40 (the V40 data+EC region).
pub const MAX_BUFFER_LEN: usize = 3706;
/// Largest possible bitmap byte length across V1..=40 (`stride(177) * 177`).
pub const MAX_BITMAP_LEN: usize = 4071;

struct VParam {
    poly: &'static [u8],
    g1: u8,
    g2: u8,
    s1: u8,
}

// Generator polynomials, named by their length (the only lengths QR Low
// ever needs).
const P7: [u8; 7] = [87, 229, 146, 149, 238, 102, 21];
const P10: [u8; 10] = [251, 67, 46, 61, 118, 70, 64, 94, 32, 45];
const P15: [u8; 15] = [
    8, 183, 61, 91, 202, 37, 51, 58, 58, 237, 140, 124, 5, 99, 105,
];
const P18: [u8; 18] = [
    215, 234, 158, 94, 184, 97, 118, 170, 79, 187, 152, 148, 252, 179, 5, 98, 96, 153,
];
const P20: [u8; 20] = [
    17, 60, 79, 50, 61, 163, 26, 187, 202, 180, 221, 225, 83, 239, 156, 164, 212, 212, 188, 190,
];
const P22: [u8; 22] = [
    210, 171, 247, 242, 93, 230, 14, 109, 221, 53, 200, 74, 8, 172, 98, 80, 219, 134, 160, 105,
    165, 231,
];
const P24: [u8; 24] = [
    229, 121, 135, 48, 211, 117, 251, 126, 159, 180, 169, 152, 192, 226, 228, 218, 111, 0, 117,
    232, 87, 96, 227, 21,
];
const P26: [u8; 26] = [
    173, 125, 158, 2, 103, 182, 118, 17, 145, 201, 111, 28, 165, 53, 161, 21, 245, 142, 13, 102,
    48, 227, 153, 145, 218, 70,
];
const P28: [u8; 28] = [
    168, 223, 200, 104, 224, 234, 108, 180, 110, 190, 195, 147, 205, 27, 232, 201, 21, 43, 245, 87,
    42, 195, 212, 119, 242, 37, 9, 123,
];
const P30: [u8; 30] = [
    41, 173, 145, 152, 216, 31, 179, 182, 50, 48, 110, 86, 239, 96, 222, 125, 42, 173, 226, 193,
    224, 130, 156, 37, 251, 216, 238, 40, 192, 180,
];

const VPARAM: [VParam; 40] = [
    VParam { poly: &P7, g1: 1, g2: 0, s1: 19 },    // V1
    VParam { poly: &P10, g1: 1, g2: 0, s1: 34 },   // V2
    VParam { poly: &P15, g1: 1, g2: 0, s1: 55 },   // V3
    VParam { poly: &P20, g1: 1, g2: 0, s1: 80 },   // V4
    VParam { poly: &P26, g1: 1, g2: 0, s1: 108 },  // V5
    VParam { poly: &P18, g1: 2, g2: 0, s1: 68 },   // V6
    VParam { poly: &P20, g1: 2, g2: 0, s1: 78 },   // V7
    VParam { poly: &P24, g1: 2, g2: 0, s1: 97 },   // V8
    VParam { poly: &P30, g1: 2, g2: 0, s1: 116 },  // V9
    VParam { poly: &P18, g1: 2, g2: 2, s1: 68 },   // V10
    VParam { poly: &P20, g1: 4, g2: 0, s1: 81 },   // V11
    VParam { poly: &P24, g1: 2, g2: 2, s1: 92 },   // V12
    VParam { poly: &P26, g1: 4, g2: 0, s1: 107 },  // V13
    VParam { poly: &P30, g1: 3, g2: 1, s1: 115 },  // V14
    VParam { poly: &P22, g1: 5, g2: 1, s1: 87 },   // V15
    VParam { poly: &P24, g1: 5, g2: 1, s1: 98 },   // V16
    VParam { poly: &P28, g1: 1, g2: 5, s1: 107 },  // V17
    VParam { poly: &P30, g1: 5, g2: 1, s1: 120 },  // V18
    VParam { poly: &P28, g1: 3, g2: 4, s1: 113 },  // V19
    VParam { poly: &P28, g1: 3, g2: 5, s1: 107 },  // V20
    VParam { poly: &P28, g1: 4, g2: 4, s1: 116 },  // V21
    VParam { poly: &P28, g1: 2, g2: 7, s1: 111 },  // V22
    VParam { poly: &P30, g1: 4, g2: 5, s1: 121 },  // V23
    VParam { poly: &P30, g1: 6, g2: 4, s1: 117 },  // V24
    VParam { poly: &P26, g1: 8, g2: 4, s1: 106 },  // V25
    VParam { poly: &P28, g1: 10, g2: 2, s1: 114 }, // V26
    VParam { poly: &P30, g1: 8, g2: 4, s1: 122 },  // V27
    VParam { poly: &P30, g1: 3, g2: 10, s1: 117 }, // V28
    VParam { poly: &P30, g1: 7, g2: 7, s1: 116 },  // V29
    VParam { poly: &P30, g1: 5, g2: 10, s1: 115 }, // V30
    VParam { poly: &P30, g1: 13, g2: 3, s1: 115 }, // V31
    VParam { poly: &P30, g1: 17, g2: 0, s1: 115 }, // V32
    VParam { poly: &P30, g1: 17, g2: 1, s1: 115 }, // V33
    VParam { poly: &P30, g1: 13, g2: 6, s1: 115 }, // V34
    VParam { poly: &P30, g1: 12, g2: 7, s1: 121 }, // V35
    VParam { poly: &P30, g1: 6, g2: 14, s1: 121 }, // V36
    VParam { poly: &P30, g1: 17, g2: 4, s1: 122 }, // V37
    VParam { poly: &P30, g1: 4, g2: 18, s1: 122 }, // V38
    VParam { poly: &P30, g1: 20, g2: 4, s1: 117 }, // V39
    VParam { poly: &P30, g1: 19, g2: 6, s1: 118 }, // V40
];

pub const ALIGNMENT_PATTERNS: [&[u8]; 40] = [
    &[],
    &[6, 18],
    &[6, 22],
    &[6, 26],
    &[6, 30],
    &[6, 34],
    &[6, 22, 38],
    &[6, 24, 42],
    &[6, 26, 46],
    &[6, 28, 50],
    &[6, 30, 54],
    &[6, 32, 58],
    &[6, 34, 62],
    &[6, 26, 46, 66],
    &[6, 26, 48, 70],
    &[6, 26, 50, 74],
    &[6, 30, 54, 78],
    &[6, 30, 56, 82],
    &[6, 30, 58, 86],
    &[6, 34, 62, 90],
    &[6, 28, 50, 72, 94],
    &[6, 26, 50, 74, 98],
    &[6, 30, 54, 78, 102],
    &[6, 28, 54, 80, 106],
    &[6, 32, 58, 84, 110],
    &[6, 30, 58, 86, 114],
    &[6, 34, 62, 90, 118],
    &[6, 26, 50, 74, 98, 122],
    &[6, 30, 54, 78, 102, 126],
    &[6, 26, 52, 78, 104, 130],
    &[6, 30, 56, 82, 108, 134],
    &[6, 34, 60, 86, 112, 138],
    &[6, 30, 58, 86, 114, 142],
    &[6, 34, 62, 90, 118, 146],
    &[6, 30, 54, 78, 102, 126, 150],
    &[6, 24, 50, 76, 102, 128, 154],
    &[6, 28, 54, 80, 106, 132, 158],
    &[6, 32, 58, 84, 110, 136, 162],
    &[6, 26, 54, 82, 110, 138, 166],
    &[6, 30, 58, 86, 114, 142, 170],
];

pub const VERSION_INFORMATION: [u32; 34] = [
    0b00_0111_1100_1001_0100,
    0b00_1000_0101_1011_1100,
    0b00_1001_1010_1001_1001,
    0b00_1010_0100_1101_0011,
    0b00_1011_1011_1111_0110,
    0b00_1100_0111_0110_0010,
    0b00_1101_1000_0100_0111,
    0b00_1110_0110_0000_1101,
    0b00_1111_1001_0010_1000,
    0b01_0000_1011_0111_1000,
    0b01_0001_0100_0101_1101,
    0b01_0010_1010_0001_0111,
    0b01_0011_0101_0011_0010,
    0b01_0100_1001_1010_0110,
    0b01_0101_0110_1000_0011,
    0b01_0110_1000_1100_1001,
    0b01_0111_0111_1110_1100,
    0b01_1000_1110_1100_0100,
    0b01_1001_0001_1110_0001,
    0b01_1010_1111_1010_1011,
    0b01_1011_0000_1000_1110,
    0b01_1100_1100_0001_1010,
    0b01_1101_0011_0011_1111,
    0b01_1110_1101_0111_0101,
    0b01_1111_0010_0101_0000,
    0b10_0000_1001_1101_0101,
    0b10_0001_0110_1111_0000,
    0b10_0010_1000_1011_1010,
    0b10_0011_0111_1001_1111,
    0b10_0100_1011_0000_1011,
    0b10_0101_0100_0010_1110,
    0b10_0110_1010_0110_0100,
    0b10_0111_0101_0100_0001,
    0b10_1000_1100_0110_1001,
];

/// The eight 15-bit format-information words for ECC level Low across mask
/// patterns 0..7; only index 0 is ever read, since mask selection is fixed.
pub const FORMAT_INFO_L: [u16; 8] = [
    0x77c4, 0x72f3, 0x7daa, 0x789d, 0x662f, 0x6318, 0x6c41, 0x6976,
];
