use std::borrow::Cow;

use encoding_rs::WINDOWS_1252;

use crate::common::codec::Mode;
use crate::common::metadata::{ECLevel, Version};

// Micro QR code
//------------------------------------------------------------------------------

/// Finished micro qr symbol, produced by the builder or the reader.
///
/// `Default` yields an invalid code.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MicroQRCode {
    ver: Option<Version>,
    ecl: Option<ECLevel>,
    mode: Option<Mode>,
    data: Vec<u8>,
    modules: Vec<u8>,
}

impl MicroQRCode {
    pub(crate) fn new(
        ver: Version,
        ecl: ECLevel,
        mode: Mode,
        data: Vec<u8>,
        modules: Vec<u8>,
    ) -> Self {
        Self { ver: Some(ver), ecl: Some(ecl), mode: Some(mode), data, modules }
    }

    pub fn version(&self) -> Option<Version> {
        self.ver
    }

    pub fn ec_level(&self) -> Option<ECLevel> {
        self.ecl
    }

    pub fn mode(&self) -> Option<Mode> {
        self.mode
    }

    /// Raw payload. Ascii text for numeric and alphanumeric codes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Payload as text. Byte payloads that aren't utf-8 are read as latin-1
    /// (windows-1252).
    pub fn data_string(&self) -> Cow<'_, str> {
        match std::str::from_utf8(&self.data) {
            Ok(s) => Cow::Borrowed(s),
            Err(_) => WINDOWS_1252.decode_without_bom_handling(&self.data).0,
        }
    }

    /// Row major modules, 1 for dark and 0 for light.
    pub fn modules(&self) -> &[u8] {
        &self.modules
    }

    /// Modules per side, 0 for an invalid code.
    pub fn width(&self) -> usize {
        self.ver.map_or(0, |v| v.width())
    }

    pub fn is_valid(&self) -> bool {
        let (Some(ver), Some(ecl), Some(mode)) = (self.ver, self.ecl, self.mode) else {
            return false;
        };
        ver.is_valid()
            && ver.supports_ec_level(ecl)
            && ver.supports_mode(mode)
            && !self.data.is_empty()
            && !self.modules.is_empty()
            && self.modules.len() == ver.width() * ver.width()
    }

    /// Compares metadata and payload, and the modules too unless
    /// `ignore_modules` is set.
    pub fn is_same(&self, other: &MicroQRCode, ignore_modules: bool) -> bool {
        self.ver == other.ver
            && self.ecl == other.ecl
            && self.mode == other.mode
            && self.data == other.data
            && (ignore_modules || self.modules == other.modules)
    }
}

/// True if any of `codes` carries the same payload and metadata as `code`.
pub fn contains_code(codes: &[MicroQRCode], code: &MicroQRCode) -> bool {
    codes.iter().any(|c| c.is_same(code, true))
}
