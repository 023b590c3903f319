mod deqr;

pub use deqr::DeMicroQR;

use log::debug;

use crate::code::MicroQRCode;
use crate::common::{
    bit_utils::BitStream, codec, ec::Block, error::QRResult, mask::MaskPattern,
    metadata::SymbolNumber,
};

/// Decodes a row major grid of 0 and 1 modules, either as stored or mirrored
/// about the main diagonal.
///
/// The stored orientation is used whenever its format word is readable. If the
/// data then fails to decode, the mirrored orientation gets one more try before
/// the first error is returned.
pub fn decode(modules: &[u8]) -> QRResult<MicroQRCode> {
    let mut deqr = DeMicroQR::from_modules(modules)?;

    let (sn, mask) = deqr.read_format_info()?;
    let err = match decode_data(&deqr, sn, mask) {
        Ok(code) => return Ok(code),
        Err(e) if deqr.is_transposed() => return Err(e),
        Err(e) => e,
    };

    debug!("Decoding failed with {err:?}, retrying on mirrored grid");
    let (sn, mask) = deqr.read_mirrored_format_info().map_err(|_| err)?;
    decode_data(&deqr, sn, mask).map_err(|_| err)
}

fn decode_data(deqr: &DeMicroQR, sn: SymbolNumber, mask: MaskPattern) -> QRResult<MicroQRCode> {
    let ver = sn.version();
    debug!("Read format: Version {}, Ec level {:?}, Mask {}", *ver, sn.ec_level(), *mask);

    let codewords = deqr.extract_codewords(sn, mask);
    let mut blk = Block::with_encoded(&codewords, sn.data_codewords());
    let data = blk.rectify()?;

    let mut enc = BitStream::from_codewords(data, sn.data_bit_capacity());
    let (payload, mode) = codec::decode(&mut enc, ver)?;
    debug!("Decoded {} bytes in {mode:?} mode", payload.len());

    Ok(MicroQRCode::new(ver, sn.ec_level(), mode, payload, deqr.to_modules()))
}

#[cfg(test)]
mod reader_tests {
    use test_case::test_case;

    use super::decode;
    use crate::builder::{encode_text, MicroQRBuilder};
    use crate::common::codec::Mode;
    use crate::common::error::QRError;
    use crate::common::mask::MaskPattern;
    use crate::common::metadata::{ECLevel, Version};

    #[test_case("17", ECLevel::DetectionOnly)]
    #[test_case("A5FVYM", ECLevel::L)]
    #[test_case("Hello", ECLevel::M)]
    #[test_case("0123456789", ECLevel::Q)]
    fn test_decode(data: &str, ecl: ECLevel) {
        let code = encode_text(data, ecl).unwrap();
        let res = decode(code.modules()).unwrap();
        assert_eq!(res, code);
        assert_eq!(res.data_string(), data);
    }

    #[test]
    fn test_decode_every_mask() {
        for m in 0..4 {
            let mask = MaskPattern::new(m).unwrap();
            let code = MicroQRBuilder::new(b"MICRO 42").mask(mask).build().unwrap();
            assert_eq!(decode(code.modules()), Ok(code));
        }
    }

    #[test]
    fn test_decode_mixed_mode() {
        let data = b"ab012345678901234567";
        let code = MicroQRBuilder::new(data).build().unwrap();
        let res = decode(code.modules()).unwrap();
        assert_eq!(res.data(), data);
        assert_eq!(res.mode(), Some(Mode::Byte));
        assert_eq!(res.version(), Version::new(4).ok());
    }

    #[test]
    fn test_decode_invalid_input() {
        assert_eq!(decode(&[0; 122]), Err(QRError::InvalidGridSize(122)));
        assert_eq!(decode(&[2; 121]), Err(QRError::InvalidModule(2)));
    }

    #[test]
    fn test_decode_damaged_data() {
        // M4-Q corrects up to 7 codewords
        let code = encode_text("DAMAGE", ECLevel::Q).unwrap();
        let mut modules = code.modules().to_vec();
        for r in 12..17 {
            modules[r * 17 + 16] ^= 1;
        }
        let res = decode(&modules).unwrap();
        assert!(res.is_same(&code, true));
        assert!(!res.is_same(&code, false));
    }
}
