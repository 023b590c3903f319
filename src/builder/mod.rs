mod qr;

pub use qr::{MicroQR, Module};

use log::debug;

use crate::code::MicroQRCode;
use crate::common::{
    codec::{encode_segments, segments_bit_len, split_segments, Mode, Segment},
    ec::Block,
    error::{QRError, QRResult},
    mask::{apply_best_mask, MaskPattern},
    metadata::{ECLevel, SymbolNumber, Version},
};

/// Encodes text with the default settings and `ec_level` as the minimum level.
pub fn encode_text(text: &str, ec_level: ECLevel) -> QRResult<MicroQRCode> {
    MicroQRBuilder::new(text.as_bytes()).ec_level(ec_level).build()
}

/// Encodes arbitrary bytes in byte mode.
pub fn encode_binary(data: &[u8], ec_level: ECLevel) -> QRResult<MicroQRCode> {
    MicroQRBuilder::new(data).ec_level(ec_level).binary(true).build()
}

pub struct MicroQRBuilder<'a> {
    data: &'a [u8],
    ec_level: ECLevel,
    min_version: Version,
    max_version: Version,
    mask: Option<MaskPattern>,
    maximize_ec_level: bool,
    binary: bool,
}

impl<'a> MicroQRBuilder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            ec_level: ECLevel::L,
            min_version: Version::MIN,
            max_version: Version::MAX,
            mask: None,
            maximize_ec_level: true,
            binary: false,
        }
    }

    pub fn data(&mut self, data: &'a [u8]) -> &mut Self {
        self.data = data;
        self
    }

    /// Minimum ec level. Levels a version lacks are raised to the next one it
    /// has, so `DetectionOnly` becomes `L` above M1.
    pub fn ec_level(&mut self, ec_level: ECLevel) -> &mut Self {
        self.ec_level = ec_level;
        self
    }

    /// Pins the version.
    pub fn version(&mut self, version: Version) -> &mut Self {
        self.min_version = version;
        self.max_version = version;
        self
    }

    pub fn version_range(&mut self, min: Version, max: Version) -> &mut Self {
        self.min_version = min;
        self.max_version = max;
        self
    }

    pub fn unset_version(&mut self) -> &mut Self {
        self.version_range(Version::MIN, Version::MAX)
    }

    pub fn mask(&mut self, mask: MaskPattern) -> &mut Self {
        self.mask = Some(mask);
        self
    }

    /// Raise the ec level while the data still fits the chosen version.
    pub fn maximize_ec_level(&mut self, maximize: bool) -> &mut Self {
        self.maximize_ec_level = maximize;
        self
    }

    /// Encode everything in byte mode, skipping numeric and alphanumeric
    /// detection.
    pub fn binary(&mut self, binary: bool) -> &mut Self {
        self.binary = binary;
        self
    }

    pub fn metadata(&self) -> String {
        let mask = match self.mask {
            Some(m) => format!("{}", *m),
            None => "Auto".to_string(),
        };
        format!(
            "{{ Versions: {}..={}, Ec level: {:?}, Mask: {mask} }}",
            *self.min_version, *self.max_version, self.ec_level
        )
    }
}


impl MicroQRBuilder<'_> {
    pub fn build(&self) -> QRResult<MicroQRCode> {
        debug!("Generating micro qr {}", self.metadata());
        if self.data.is_empty() {
            return Err(QRError::EmptyData);
        }
        if self.min_version > self.max_version {
            return Err(QRError::InvalidVersion);
        }
        if !self.versions().any(|v| self.ec_level.at_least_for(v).is_some()) {
            return Err(QRError::InvalidECLevel);
        }

        let mode = if self.binary { Mode::Byte } else { Mode::classify(self.data) };
        let segs = vec![Segment::with_mode(mode, self.data)?];
        let (segs, sn) = match self.find_symbol(&segs) {
            Some(sn) => (segs, sn),
            None => {
                debug!("Single {mode:?} segment doesn't fit, splitting...");
                split_segments(self.data, mode)
                    .into_iter()
                    .find_map(|s| self.find_symbol(&s).map(|sn| (s, sn)))
                    .ok_or(QRError::CapacityOverflow)?
            }
        };
        let sn = self.upgrade_ec_level(&segs, sn);
        let ver = sn.version();
        debug!("Chose version {} with ec level {:?}", *ver, sn.ec_level());

        let encoded = encode_segments(&segs, sn);
        let blk = Block::new(encoded.data(), ver.total_codewords());

        let mut qr = MicroQR::new(ver, sn.ec_level());
        qr.draw_all_function_patterns();
        qr.draw_codewords(blk.full(), sn.half_byte_skip());

        let mask = match self.mask {
            Some(m) => {
                qr.apply_mask(m);
                m
            }
            None => apply_best_mask(&mut qr),
        };
        debug!("Applied mask {}", *mask);
        qr.draw_format_info(sn, mask);

        let top = segs.iter().map(|s| s.mode).max().unwrap_or(mode);
        let code = MicroQRCode::new(ver, sn.ec_level(), top, self.data.to_vec(), qr.to_modules());
        if !code.is_valid() {
            return Err(QRError::Unknown);
        }
        Ok(code)
    }

    fn versions(&self) -> impl Iterator<Item = Version> {
        let (min, max) = (self.min_version, self.max_version);
        Version::all().filter(move |&v| min <= v && v <= max)
    }

    // Smallest version in range whose capacity at the requested level holds segs
    fn find_symbol(&self, segs: &[Segment]) -> Option<SymbolNumber> {
        self.versions().find_map(|ver| {
            let ecl = self.ec_level.at_least_for(ver)?;
            let sn = SymbolNumber::new(ver, ecl)?;
            let bits = segments_bit_len(segs, ver)?;
            (bits <= sn.data_bit_capacity()).then_some(sn)
        })
    }

    fn upgrade_ec_level(&self, segs: &[Segment], mut sn: SymbolNumber) -> SymbolNumber {
        if !self.maximize_ec_level {
            return sn;
        }

        let ver = sn.version();
        let bits = segments_bit_len(segs, ver).unwrap_or(usize::MAX);
        while let Some(next) = sn.ec_level().next().and_then(|e| SymbolNumber::new(ver, e)) {
            if bits > next.data_bit_capacity() {
                break;
            }
            sn = next;
        }
        sn
    }
}

#[cfg(test)]
mod builder_tests {
    use test_case::test_case;

    use super::{encode_binary, encode_text, MicroQRBuilder};
    use crate::common::codec::Mode;
    use crate::common::error::QRError;
    use crate::common::mask::MaskPattern;
    use crate::common::metadata::{ECLevel, Version};

    const GOLDEN_17: &str = "1111111010110000010100101110100111011101010010111010011100000100001111111\
                             000100000000100110001000010010001000011111011101";

    #[test]
    fn test_golden_m1() {
        let code = encode_text("17", ECLevel::DetectionOnly).unwrap();
        assert_eq!(code.version(), Version::new(1).ok());
        assert_eq!(code.ec_level(), Some(ECLevel::DetectionOnly));
        assert_eq!(code.mode(), Some(Mode::Numeric));
        let modules: String = code.modules().iter().map(|m| char::from(b'0' + m)).collect();
        assert_eq!(modules, GOLDEN_17);
    }

    #[test_case("17", ECLevel::DetectionOnly, 1, ECLevel::DetectionOnly, Mode::Numeric)]
    #[test_case("12345", ECLevel::DetectionOnly, 1, ECLevel::DetectionOnly, Mode::Numeric)]
    #[test_case("123456", ECLevel::DetectionOnly, 2, ECLevel::M, Mode::Numeric)]
    #[test_case("A5FVYM", ECLevel::L, 2, ECLevel::L, Mode::Alphanumeric)]
    #[test_case("A5", ECLevel::L, 2, ECLevel::M, Mode::Alphanumeric)]
    #[test_case("hello", ECLevel::L, 3, ECLevel::M, Mode::Byte)]
    #[test_case("12", ECLevel::Q, 4, ECLevel::Q, Mode::Numeric)]
    fn test_version_and_ec_level(
        data: &str,
        ecl: ECLevel,
        exp_ver: u8,
        exp_ecl: ECLevel,
        exp_mode: Mode,
    ) {
        let code = encode_text(data, ecl).unwrap();
        assert_eq!(code.version(), Version::new(exp_ver).ok());
        assert_eq!(code.ec_level(), Some(exp_ecl));
        assert_eq!(code.mode(), Some(exp_mode));
        assert!(code.is_valid());
    }

    #[test]
    fn test_no_ec_upgrade() {
        let code = MicroQRBuilder::new(b"A5").maximize_ec_level(false).build().unwrap();
        assert_eq!(code.ec_level(), Some(ECLevel::L));
    }

    #[test]
    fn test_binary() {
        let code = encode_binary(b"1234", ECLevel::L).unwrap();
        assert_eq!(code.mode(), Some(Mode::Byte));
        assert_eq!(code.version(), Version::new(3).ok());
    }

    #[test]
    fn test_split_segments_fit() {
        // 20 bytes overflow M4-L in one byte segment, the numeric tail makes it fit
        let data = b"ab012345678901234567";
        let code = encode_text(std::str::from_utf8(data).unwrap(), ECLevel::L).unwrap();
        assert_eq!(code.version(), Version::new(4).ok());
        assert_eq!(code.mode(), Some(Mode::Byte));
        assert_eq!(code.data(), data);
    }

    #[test]
    fn test_capacity_boundary_m4_q() {
        let v4 = Version::new(4).unwrap();
        let fits = "1".repeat(21);
        let code = MicroQRBuilder::new(fits.as_bytes())
            .version(v4)
            .ec_level(ECLevel::Q)
            .build()
            .unwrap();
        assert_eq!(code.ec_level(), Some(ECLevel::Q));

        let over = "1".repeat(22);
        let res = MicroQRBuilder::new(over.as_bytes()).version(v4).ec_level(ECLevel::Q).build();
        assert_eq!(res, Err(QRError::CapacityOverflow));
        // Lower level still fits
        let code = encode_text(&over, ECLevel::M).unwrap();
        assert_eq!(code.ec_level(), Some(ECLevel::M));
    }

    #[test]
    fn test_pinned_mask() {
        for m in 0..4 {
            let mask = MaskPattern::new(m).unwrap();
            let code = MicroQRBuilder::new(b"MASK").mask(mask).build().unwrap();
            assert!(code.is_valid());
        }
    }

    #[test]
    fn test_errors() {
        assert_eq!(encode_text("", ECLevel::L), Err(QRError::EmptyData));
        assert_eq!(encode_text("1", ECLevel::H), Err(QRError::InvalidECLevel));
        assert_eq!(encode_text(&"x".repeat(16), ECLevel::L), Err(QRError::CapacityOverflow));

        let v1 = Version::new(1).unwrap();
        let v2 = Version::new(2).unwrap();
        let res = MicroQRBuilder::new(b"1").ec_level(ECLevel::L).version(v1).build();
        assert_eq!(res, Err(QRError::InvalidECLevel));
        let res = MicroQRBuilder::new(b"1").version_range(v2, v1).build();
        assert_eq!(res, Err(QRError::InvalidVersion));
        let res = MicroQRBuilder::new(b"abc").version(v2).build();
        assert_eq!(res, Err(QRError::CapacityOverflow));
    }
}
