use crate::common::error::{QRError, QRResult};
use crate::common::metadata::Version;

// Mode
//------------------------------------------------------------------------------

/// Encoding mode. The discriminant is the mode indicator written in `v-1` bits.
#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub enum Mode {
    Numeric = 0,
    Alphanumeric = 1,
    Byte = 2,
    Kanji = 3,
}

impl Mode {
    pub(crate) fn from_indicator(ind: u16) -> QRResult<Self> {
        match ind {
            0 => Ok(Self::Numeric),
            1 => Ok(Self::Alphanumeric),
            2 => Ok(Self::Byte),
            3 => Err(QRError::UnsupportedMode),
            _ => Err(QRError::InvalidMode(ind as u8)),
        }
    }

    #[inline]
    fn numeric_digit(char: u8) -> u16 {
        debug_assert!(Mode::Numeric.contains(char), "Invalid numeric data: {char}");
        (char - b'0') as u16
    }

    #[inline]
    fn alphanumeric_digit(char: u8) -> u16 {
        debug_assert!(Mode::Alphanumeric.contains(char), "Invalid alphanumeric data: {char}");
        ALPHANUMERIC_CHARSET.iter().position(|&c| c == char).unwrap_or(0) as u16
    }

    pub fn encode_chunk(&self, data: &[u8]) -> u16 {
        let len = data.len();
        match self {
            Self::Numeric => {
                debug_assert!(len <= 3, "Data is too long for numeric conversion: {len}");
                data.iter().fold(0_u16, |n, b| n * 10 + Self::numeric_digit(*b))
            }
            Self::Alphanumeric => {
                debug_assert!(len <= 2, "Data is too long for alphanumeric conversion: {len}");
                data.iter().fold(0_u16, |n, b| n * 45 + Self::alphanumeric_digit(*b))
            }
            Self::Byte => {
                debug_assert!(len == 1, "Data is too long for byte conversion: {len}");
                data[0] as u16
            }
            Self::Kanji => unreachable!("Kanji segments are never built"),
        }
    }

    /// Inverse of `encode_chunk`. Out of range values are rejected since they
    /// can only come from a corrupt stream.
    pub fn decode_chunk(&self, data: u16, bit_len: usize) -> QRResult<Vec<u8>> {
        match self {
            Self::Numeric => Self::decode_numeric_chunk(data, bit_len),
            Self::Alphanumeric => Self::decode_alphanumeric_chunk(data, bit_len),
            Self::Byte => {
                debug_assert!(bit_len == 8, "Invalid byte encoded length: {bit_len}");
                Ok(vec![data as u8])
            }
            Self::Kanji => Err(QRError::UnsupportedMode),
        }
    }

    fn decode_numeric_chunk(mut data: u16, bit_len: usize) -> QRResult<Vec<u8>> {
        let len = match bit_len {
            10 => 3,
            7 => 2,
            4 => 1,
            _ => unreachable!("Invalid numeric encoded length: {bit_len}"),
        };
        if data >= 10u16.pow(len as u32) {
            return Err(QRError::CorruptDataSegment);
        }

        let mut res = vec![0; len];
        for r in res.iter_mut().rev() {
            *r = (data % 10) as u8 + b'0';
            data /= 10;
        }
        Ok(res)
    }

    fn decode_alphanumeric_chunk(mut data: u16, bit_len: usize) -> QRResult<Vec<u8>> {
        let len = match bit_len {
            11 => 2,
            6 => 1,
            _ => unreachable!("Invalid alphanumeric encoded length: {bit_len}"),
        };
        if data >= 45u16.pow(len as u32) {
            return Err(QRError::CorruptDataSegment);
        }

        let mut res = vec![0; len];
        for r in res.iter_mut().rev() {
            *r = ALPHANUMERIC_CHARSET[(data % 45) as usize];
            data /= 45;
        }
        Ok(res)
    }

    pub fn contains(&self, byte: u8) -> bool {
        match self {
            Self::Numeric => byte.is_ascii_digit(),
            Self::Alphanumeric => ALPHANUMERIC_CHARSET.contains(&byte),
            Self::Byte => true,
            Self::Kanji => false,
        }
    }

    /// Payload bits for `len` characters.
    pub fn encoded_len(&self, len: usize) -> usize {
        match *self {
            Self::Numeric => (len * 10).div_ceil(3),
            Self::Alphanumeric => (len * 11).div_ceil(2),
            Self::Byte => len * 8,
            Self::Kanji => len * 13,
        }
    }

    /// Most compact mode able to hold every byte of `data`.
    pub(crate) fn classify(data: &[u8]) -> Self {
        [Self::Numeric, Self::Alphanumeric]
            .into_iter()
            .find(|m| data.iter().all(|&b| m.contains(b)))
            .unwrap_or(Self::Byte)
    }
}


// Segment
//------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Segment<'a> {
    pub mode: Mode,
    pub data: &'a [u8], // Reference to raw data
}

impl<'a> Segment<'a> {
    pub fn numeric(data: &'a [u8]) -> QRResult<Self> {
        Self::with_mode(Mode::Numeric, data)
    }

    pub fn alphanumeric(data: &'a [u8]) -> QRResult<Self> {
        Self::with_mode(Mode::Alphanumeric, data)
    }

    pub fn bytes(data: &'a [u8]) -> QRResult<Self> {
        Self::with_mode(Mode::Byte, data)
    }

    pub fn with_mode(mode: Mode, data: &'a [u8]) -> QRResult<Self> {
        if data.is_empty() {
            return Err(QRError::EmptyData);
        }
        if !data.iter().all(|&b| mode.contains(b)) {
            return Err(QRError::InvalidChar);
        }
        Ok(Self { mode, data })
    }

    /// Bits taken by this segment in `ver`, or `None` if the mode is unavailable
    /// or the character count overflows its field.
    pub fn bit_len(&self, ver: Version) -> Option<usize> {
        if !ver.supports_mode(self.mode) {
            return None;
        }
        let len_bits = ver.char_cnt_bits(self.mode);
        if self.data.len() >= 1 << len_bits {
            return None;
        }
        Some(ver.mode_bits() + len_bits + self.mode.encoded_len(self.data.len()))
    }
}


// Global constants
//------------------------------------------------------------------------------

pub static PADDING_CODEWORDS: [u8; 2] = [0b1110_1100, 0b0001_0001];

static ALPHANUMERIC_CHARSET: [u8; 45] = *b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";
