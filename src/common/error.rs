use thiserror::Error;

// Error
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, Error)]
pub enum QRError {
    // Micro QR builder
    #[error("Empty data")]
    EmptyData,
    #[error("Data exceeds the capacity of every allowed version")]
    CapacityOverflow,
    #[error("Invalid version")]
    InvalidVersion,
    #[error("Invalid error correction level")]
    InvalidECLevel,
    #[error("Invalid character")]
    InvalidChar,
    #[error("Invalid masking pattern")]
    InvalidMaskingPattern,
    #[error("Generated code failed validation")]
    Unknown,

    // Micro QR reader
    #[error("Module count {0} is not the square of a micro qr width")]
    InvalidGridSize(usize),
    #[error("Module value {0} is neither 0 nor 1")]
    InvalidModule(u8),
    #[error("Invalid format info detected")]
    InvalidFormatInfo,
    #[error("Format info version {found} doesn't match grid version {expected}")]
    VersionMismatch { expected: u8, found: u8 },
    #[error("Too many errors to correct successfully")]
    DataEcc,
    #[error("Bit stream ended before segment was complete")]
    DataUnderflow,
    #[error("Segment contains out of range value")]
    CorruptDataSegment,
    #[error("Invalid mode indicator {0}")]
    InvalidMode(u8),
    #[error("Kanji mode is not supported")]
    UnsupportedMode,
}

pub type QRResult<T> = Result<T, QRError>;

// Encode status
//------------------------------------------------------------------------------

/// Coarse outcome of an encode call, for callers that report status codes
/// instead of matching on [`QRError`].
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum EncodeStatus {
    Success,
    CodeCapacityExceeded,
    InvalidErrorCorrectionCapacity,
    InvalidData,
    UnknownError,
}

impl QRError {
    pub fn status(&self) -> EncodeStatus {
        match self {
            Self::CapacityOverflow => EncodeStatus::CodeCapacityExceeded,
            Self::InvalidECLevel => EncodeStatus::InvalidErrorCorrectionCapacity,
            Self::EmptyData
            | Self::InvalidChar
            | Self::InvalidVersion
            | Self::InvalidMaskingPattern => EncodeStatus::InvalidData,
            _ => EncodeStatus::UnknownError,
        }
    }
}

impl<T> From<&QRResult<T>> for EncodeStatus {
    fn from(res: &QRResult<T>) -> Self {
        match res {
            Ok(_) => Self::Success,
            Err(e) => e.status(),
        }
    }
}
