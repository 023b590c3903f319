use std::ops::{Deref, Not};

use super::codec::Mode;
use super::error::{QRError, QRResult};

// Version
//------------------------------------------------------------------------------

/// Micro QR version, M1 to M4.
#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub struct Version(pub(crate) u8);

impl Version {
    pub const MIN: Version = Version(1);
    pub const MAX: Version = Version(4);

    pub fn new(version: u8) -> QRResult<Self> {
        match version {
            1..=4 => Ok(Self(version)),
            _ => Err(QRError::InvalidVersion),
        }
    }

    pub fn all() -> impl Iterator<Item = Version> {
        (1..=4).map(Version)
    }

    pub(crate) fn from_grid_len(len: usize) -> QRResult<Self> {
        Self::all().find(|v| v.width() * v.width() == len).ok_or(QRError::InvalidGridSize(len))
    }

    pub(crate) fn is_valid(self) -> bool {
        (1..=4).contains(&self.0)
    }

    /// Modules per side.
    pub const fn width(self) -> usize {
        self.0 as usize * 2 + 9
    }

    pub const fn mode_bits(self) -> usize {
        self.0 as usize - 1
    }

    pub const fn terminator_bits(self) -> usize {
        self.0 as usize * 2 + 1
    }

    pub fn char_cnt_bits(self, mode: Mode) -> usize {
        CHAR_CNT_BITS[mode as usize][self.0 as usize - 1]
    }

    pub fn supports_mode(self, mode: Mode) -> bool {
        mode != Mode::Kanji && self.char_cnt_bits(mode) > 0
    }

    pub fn supports_ec_level(self, ecl: ECLevel) -> bool {
        SymbolNumber::new(self, ecl).is_some()
    }

    pub fn raw_data_modules(self) -> usize {
        RAW_DATA_MODULES[self.0 as usize - 1]
    }

    pub fn total_codewords(self) -> usize {
        (self.raw_data_modules() + 7) >> 3
    }
}

impl Deref for Version {
    type Target = u8;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}


// Error correction level
//------------------------------------------------------------------------------

/// Nominal share of codewords spent on error correction.
///
/// `DetectionOnly` exists at M1 only and `Q` at M4 only. `H` is never valid for
/// micro codes.
#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub enum ECLevel {
    DetectionOnly,
    L,
    M,
    Q,
    H,
}

impl ECLevel {
    // Lowest supported level at or above self
    pub(crate) fn at_least_for(self, ver: Version) -> Option<ECLevel> {
        [ECLevel::DetectionOnly, ECLevel::L, ECLevel::M, ECLevel::Q]
            .into_iter()
            .filter(|&e| e >= self)
            .find(|&e| ver.supports_ec_level(e))
    }

    pub(crate) fn next(self) -> Option<ECLevel> {
        match self {
            Self::DetectionOnly => Some(Self::L),
            Self::L => Some(Self::M),
            Self::M => Some(Self::Q),
            Self::Q => Some(Self::H),
            Self::H => None,
        }
    }
}

#[cfg(test)]
mod ec_level_tests {
    use super::{ECLevel, Version};

    #[test]
    fn test_at_least_for() {
        let v1 = Version::new(1).unwrap();
        let v2 = Version::new(2).unwrap();
        let v4 = Version::new(4).unwrap();
        assert_eq!(ECLevel::DetectionOnly.at_least_for(v1), Some(ECLevel::DetectionOnly));
        assert_eq!(ECLevel::L.at_least_for(v1), None);
        assert_eq!(ECLevel::DetectionOnly.at_least_for(v2), Some(ECLevel::L));
        assert_eq!(ECLevel::Q.at_least_for(v2), None);
        assert_eq!(ECLevel::Q.at_least_for(v4), Some(ECLevel::Q));
        assert_eq!(ECLevel::H.at_least_for(v4), None);
    }
}

// Symbol number
//------------------------------------------------------------------------------

/// Index 0..8 identifying a valid (version, ec level) pair.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct SymbolNumber(u8);

impl SymbolNumber {
    pub fn new(ver: Version, ecl: ECLevel) -> Option<Self> {
        SYMBOLS.iter().position(|&(v, e)| v == *ver && e == ecl).map(|i| Self(i as u8))
    }

    pub(crate) fn from_bits(bits: u8) -> Option<Self> {
        (bits < 8).then_some(Self(bits))
    }

    pub fn version(self) -> Version {
        Version(SYMBOLS[self.0 as usize].0)
    }

    pub fn ec_level(self) -> ECLevel {
        SYMBOLS[self.0 as usize].1
    }

    pub fn ecc_codewords(self) -> usize {
        ECC_CODEWORDS[self.0 as usize]
    }

    pub fn data_bit_capacity(self) -> usize {
        self.version().raw_data_modules() - (self.ecc_codewords() << 3)
    }

    pub fn data_codewords(self) -> usize {
        (self.data_bit_capacity() + 7) >> 3
    }

    /// Bit offset of the unused low nibble of the last data codeword in M1 and
    /// M3 symbols.
    pub fn half_byte_skip(self) -> Option<usize> {
        let bits = self.data_bit_capacity();
        (bits & 7 != 0).then_some(bits)
    }
}

impl Deref for SymbolNumber {
    type Target = u8;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}


// Color
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    pub fn select<T>(self, light: T, dark: T) -> T {
        match self {
            Self::Light => light,
            Self::Dark => dark,
        }
    }

    pub(crate) fn from_bit(bit: bool) -> Self {
        if bit {
            Self::Dark
        } else {
            Self::Light
        }
    }
}

impl Not for Color {
    type Output = Self;
    fn not(self) -> Self::Output {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

// Global constants
//------------------------------------------------------------------------------

static SYMBOLS: [(u8, ECLevel); 8] = [
    (1, ECLevel::DetectionOnly),
    (2, ECLevel::L),
    (2, ECLevel::M),
    (3, ECLevel::L),
    (3, ECLevel::M),
    (4, ECLevel::L),
    (4, ECLevel::M),
    (4, ECLevel::Q),
];

static ECC_CODEWORDS: [usize; 8] = [2, 5, 6, 6, 8, 8, 10, 14];

static RAW_DATA_MODULES: [usize; 4] = [36, 80, 132, 192];

// Indexed by mode then version
static CHAR_CNT_BITS: [[usize; 4]; 4] = [[3, 4, 5, 6], [0, 3, 4, 5], [0, 0, 4, 5], [0, 0, 3, 4]];
