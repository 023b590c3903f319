use log::debug;

use crate::common::{
    error::{QRError, QRResult},
    format::{parse_format_bits, FORMAT_INFO_COORDS},
    iter::EncRegionIter,
    mask::MaskPattern,
    metadata::{Color, SymbolNumber, Version},
};

// Micro QR type for reader
//------------------------------------------------------------------------------

/// Sampled module grid, row major.
#[derive(Debug, Clone)]
pub struct DeMicroQR {
    w: usize,
    grid: Vec<Color>,
    ver: Version,
    transposed: bool,
}

impl DeMicroQR {
    /// Grid from 0 and 1 bytes. The length must be the area of a micro qr.
    pub fn from_modules(modules: &[u8]) -> QRResult<Self> {
        let ver = Version::from_grid_len(modules.len())?;
        let grid = modules
            .iter()
            .map(|&m| match m {
                0 => Ok(Color::Light),
                1 => Ok(Color::Dark),
                _ => Err(QRError::InvalidModule(m)),
            })
            .collect::<QRResult<Vec<_>>>()?;
        Ok(Self { w: ver.width(), grid, ver, transposed: false })
    }

    pub fn version(&self) -> Version {
        self.ver
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn is_transposed(&self) -> bool {
        self.transposed
    }

    pub fn to_modules(&self) -> Vec<u8> {
        self.grid.iter().map(|c| c.select(0, 1)).collect()
    }

    fn coord_to_index(&self, r: i16, c: i16) -> usize {
        let w = self.w as i16;
        debug_assert!(-w <= r && r < w, "row should be greater than or equal to width");
        debug_assert!(-w <= c && c < w, "column should be greater than or equal to width");

        let r = if r < 0 { r + w } else { r };
        let c = if c < 0 { c + w } else { c };
        (r * w + c) as _
    }

    pub fn get(&self, r: i16, c: i16) -> Color {
        self.grid[self.coord_to_index(r, c)]
    }

    /// Mirrors the grid about its main diagonal.
    pub fn transpose(&mut self) {
        let w = self.w;
        for r in 0..w {
            for c in r + 1..w {
                self.grid.swap(r * w + c, c * w + r);
            }
        }
        self.transposed = !self.transposed;
    }
}

#[cfg(test)]
mod deqr_util_tests {
    use super::DeMicroQR;
    use crate::common::error::QRError;
    use crate::common::metadata::{Color, Version};

    #[test]
    fn test_from_modules() {
        let mut modules = vec![0u8; 169];
        modules[14] = 1;
        let deqr = DeMicroQR::from_modules(&modules).unwrap();
        assert_eq!(deqr.version(), Version::new(2).unwrap());
        assert_eq!(deqr.width(), 13);
        assert_eq!(deqr.get(1, 1), Color::Dark);
        assert_eq!(deqr.get(-1, -1), Color::Light);
        assert_eq!(deqr.to_modules(), modules);
    }

    #[test]
    fn test_invalid_modules() {
        assert_eq!(DeMicroQR::from_modules(&[0; 120]).err(), Some(QRError::InvalidGridSize(120)));
        assert_eq!(DeMicroQR::from_modules(&[]).err(), Some(QRError::InvalidGridSize(0)));
        let mut modules = vec![0u8; 121];
        modules[60] = 255;
        assert_eq!(DeMicroQR::from_modules(&modules).err(), Some(QRError::InvalidModule(255)));
    }

    #[test]
    fn test_transpose() {
        let mut modules = vec![0u8; 121];
        modules[3] = 1;
        let mut deqr = DeMicroQR::from_modules(&modules).unwrap();
        deqr.transpose();
        assert_eq!(deqr.get(3, 0), Color::Dark);
        assert_eq!(deqr.get(0, 3), Color::Light);
        deqr.transpose();
        assert_eq!(deqr.to_modules(), modules);
    }
}

// Format info
//------------------------------------------------------------------------------

impl DeMicroQR {
    fn read_format_bits(&self, transposed: bool) -> u16 {
        FORMAT_INFO_COORDS.iter().enumerate().fold(0, |acc, (i, &(r, c))| {
            let clr = if transposed { self.get(c, r) } else { self.get(r, c) };
            acc | (((clr == Color::Dark) as u16) << i)
        })
    }

    fn parse_oriented(&self, transposed: bool) -> QRResult<(SymbolNumber, MaskPattern)> {
        let (sn, mask) = parse_format_bits(self.read_format_bits(transposed))?;
        let found = sn.version();
        if found != self.ver {
            return Err(QRError::VersionMismatch { expected: *self.ver, found: *found });
        }
        Ok((sn, mask))
    }

    /// Reads the format word as stored. Only when that fails, or names another
    /// version, is the mirrored word tried, transposing the grid on success.
    /// The error of the stored reading is returned when both fail.
    pub fn read_format_info(&mut self) -> QRResult<(SymbolNumber, MaskPattern)> {
        let err = match self.parse_oriented(false) {
            Ok(res) => return Ok(res),
            Err(e) => e,
        };
        debug!("Format read failed with {err:?}, trying mirrored grid");
        self.read_mirrored_format_info().map_err(|_| err)
    }

    /// Reads the mirrored format word and transposes the grid on success.
    pub fn read_mirrored_format_info(&mut self) -> QRResult<(SymbolNumber, MaskPattern)> {
        let res = self.parse_oriented(true)?;
        self.transpose();
        Ok(res)
    }
}

#[cfg(test)]
mod format_info_tests {
    use super::DeMicroQR;
    use crate::builder::MicroQR;
    use crate::common::error::QRError;
    use crate::common::format::FORMAT_INFO_COORDS;
    use crate::common::mask::MaskPattern;
    use crate::common::metadata::{ECLevel, SymbolNumber, Version};

    fn drawn(sn: SymbolNumber, mask: MaskPattern) -> DeMicroQR {
        let mut qr = MicroQR::new(sn.version(), sn.ec_level());
        qr.draw_all_function_patterns();
        qr.draw_codewords(&[0x5a; 24], None);
        qr.draw_format_info(sn, mask);
        DeMicroQR::from_modules(&qr.to_modules()).unwrap()
    }

    fn flip(deqr: &mut DeMicroQR, bit: usize) {
        let (r, c) = FORMAT_INFO_COORDS[bit];
        let idx = deqr.coord_to_index(r, c);
        deqr.grid[idx] = !deqr.grid[idx];
    }

    #[test]
    fn test_read_format_info() {
        for sn in (0..8).filter_map(SymbolNumber::from_bits) {
            for mask in MaskPattern::all() {
                let mut deqr = drawn(sn, mask);
                let orig = deqr.to_modules();
                assert_eq!(deqr.read_format_info(), Ok((sn, mask)));
                assert!(!deqr.is_transposed());

                deqr.transpose();
                assert_eq!(deqr.read_mirrored_format_info(), Ok((sn, mask)));
                assert!(!deqr.is_transposed());
                assert_eq!(deqr.to_modules(), orig);
            }
        }
    }

    #[test]
    fn test_stored_reading_wins_over_mirrored() {
        // Up to 3 flips keep the stored reading, whatever the mirrored one says
        for sn in (0..8).filter_map(SymbolNumber::from_bits) {
            for mask in MaskPattern::all() {
                for bits in [[0, 7, 14], [3, 8, 12], [1, 2, 9]] {
                    let mut deqr = drawn(sn, mask);
                    bits.iter().for_each(|&b| flip(&mut deqr, b));
                    assert_eq!(deqr.read_format_info(), Ok((sn, mask)));
                    assert!(!deqr.is_transposed());
                }
            }
        }
    }

    #[test]
    fn test_falls_back_to_mirrored() {
        // Mirrored M1 mask 0 reads as an M2 word, which the grid size rules out
        let sn = SymbolNumber::new(Version::new(1).unwrap(), ECLevel::DetectionOnly).unwrap();
        let mask = MaskPattern::new(0).unwrap();
        let mut deqr = drawn(sn, mask);
        let orig = deqr.to_modules();
        deqr.transpose();
        assert_eq!(deqr.read_format_info(), Ok((sn, mask)));
        assert_eq!(deqr.to_modules(), orig);
    }

    #[test]
    fn test_version_mismatch() {
        // M2 format drawn into an M3 sized grid
        let sn = SymbolNumber::new(Version::new(2).unwrap(), ECLevel::L).unwrap();
        let small = drawn(sn, MaskPattern::new(1).unwrap());
        let mut modules = vec![0u8; 225];
        for r in 0..13 {
            modules[r * 15..r * 15 + 13].copy_from_slice(&small.to_modules()[r * 13..r * 13 + 13]);
        }
        let mut deqr = DeMicroQR::from_modules(&modules).unwrap();
        assert_eq!(
            deqr.read_format_info(),
            Err(QRError::VersionMismatch { expected: 3, found: 2 })
        );
        assert!(!deqr.is_transposed());
    }

    #[test]
    fn test_blank_format() {
        let mut deqr = DeMicroQR::from_modules(&[0; 121]).unwrap();
        assert!(deqr.read_format_info().is_err());
    }
}

// Encoding region
//------------------------------------------------------------------------------

impl DeMicroQR {
    /// Unmasks the encoding region and packs it into data then ecc codewords,
    /// leaving the skipped low nibble of the last data codeword zero.
    pub fn extract_codewords(&self, sn: SymbolNumber, mask: MaskPattern) -> Vec<u8> {
        let mask_fn = mask.mask_functions();
        let skip = sn.half_byte_skip();
        let mut codewords = vec![0u8; self.ver.total_codewords()];
        let mut i = 0;
        for (r, c) in EncRegionIter::new(self.ver) {
            if Some(i) == skip {
                i += 4;
            }
            let dark = self.get(r, c) == Color::Dark;
            if dark != mask_fn(r, c) {
                codewords[i >> 3] |= 0x80 >> (i & 7);
            }
            i += 1;
        }
        codewords
    }
}

#[cfg(test)]
mod encoding_region_tests {
    use super::DeMicroQR;
    use crate::builder::MicroQR;
    use crate::common::ec::Block;
    use crate::common::mask::MaskPattern;
    use crate::common::metadata::SymbolNumber;

    #[test]
    fn test_extract_codewords() {
        for sn in (0..8).filter_map(SymbolNumber::from_bits) {
            let ver = sn.version();
            let mut data: Vec<u8> =
                (0..sn.data_codewords() as u8).map(|b| b.wrapping_mul(37)).collect();
            if let Some(skip) = sn.half_byte_skip() {
                data[skip >> 3] &= 0xf0;
            }
            let blk = Block::new(&data, ver.total_codewords());

            for mask in MaskPattern::all() {
                let mut qr = MicroQR::new(ver, sn.ec_level());
                qr.draw_all_function_patterns();
                qr.draw_codewords(blk.full(), sn.half_byte_skip());
                qr.apply_mask(mask);
                qr.draw_format_info(sn, mask);

                let deqr = DeMicroQR::from_modules(&qr.to_modules()).unwrap();
                assert_eq!(deqr.extract_codewords(sn, mask), blk.full(), "Symbol {}", *sn);
            }
        }
    }
}
