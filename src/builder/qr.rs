use std::ops::Deref;

use crate::common::format::{encode_format_bits, FORMAT_INFO_COORDS};
use crate::common::iter::EncRegionIter;
use crate::common::mask::MaskPattern;
use crate::common::metadata::{Color, ECLevel, SymbolNumber, Version};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Module {
    Empty,
    Func(Color),
    Format(Color),
    Data(Color),
}

impl Deref for Module {
    type Target = Color;
    fn deref(&self) -> &Self::Target {
        match self {
            Module::Empty => &Color::Light,
            Module::Func(c) => c,
            Module::Format(c) => c,
            Module::Data(c) => c,
        }
    }
}

/// Module grid of a micro qr under construction.
#[derive(Debug, Clone)]
pub struct MicroQR {
    grid: Box<[Module; MAX_GRID_SIZE]>,
    w: usize,
    ver: Version,
    ecl: ECLevel,
    mask: Option<MaskPattern>,
}

// Micro QR type for builder
//------------------------------------------------------------------------------

impl MicroQR {
    pub fn new(ver: Version, ecl: ECLevel) -> Self {
        debug_assert!(ver.is_valid(), "Invalid version {}", *ver);

        let w = ver.width();
        Self { grid: Box::new([Module::Empty; MAX_GRID_SIZE]), w, ver, ecl, mask: None }
    }

    pub fn grid(&self) -> &[Module] {
        &self.grid[..self.w * self.w]
    }

    pub fn version(&self) -> Version {
        self.ver
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn ec_level(&self) -> ECLevel {
        self.ecl
    }

    pub fn mask(&self) -> Option<MaskPattern> {
        self.mask
    }

    /// Row major modules, 1 for dark and 0 for light.
    pub fn to_modules(&self) -> Vec<u8> {
        self.grid().iter().map(|m| (**m == Color::Dark) as u8).collect()
    }

    #[cfg(test)]
    pub fn to_debug_str(&self) -> String {
        let w = self.w as i16;
        let mut res = String::with_capacity((w * (w + 1)) as usize);
        res.push('\n');
        for i in 0..w {
            for j in 0..w {
                let c = match self.get(i, j) {
                    Module::Empty => '.',
                    Module::Func(Color::Dark) => 'f',
                    Module::Func(Color::Light) => 'F',
                    Module::Format(Color::Dark) => 'm',
                    Module::Format(Color::Light) => 'M',
                    Module::Data(Color::Dark) => 'd',
                    Module::Data(Color::Light) => 'D',
                };
                res.push(c);
            }
            res.push('\n');
        }
        res
    }

    fn coord_to_index(&self, r: i16, c: i16) -> usize {
        let w = self.w as i16;
        debug_assert!(-w <= r && r < w, "row should be greater than or equal to w");
        debug_assert!(-w <= c && c < w, "column should be greater than or equal to w");

        let r = if r < 0 { r + w } else { r };
        let c = if c < 0 { c + w } else { c };
        (r * w + c) as _
    }

    pub fn get(&self, r: i16, c: i16) -> Module {
        self.grid[self.coord_to_index(r, c)]
    }

    pub fn get_mut(&mut self, r: i16, c: i16) -> &mut Module {
        let index = self.coord_to_index(r, c);
        &mut self.grid[index]
    }

    pub fn set(&mut self, r: i16, c: i16, module: Module) {
        *self.get_mut(r, c) = module;
    }
}


// Finder pattern
//------------------------------------------------------------------------------

impl MicroQR {
    // Single finder in the top left corner, separator on its right and bottom
    fn draw_finder_pattern(&mut self) {
        for i in -3..=4 {
            for j in -3..=4 {
                self.set(
                    3 + i,
                    3 + j,
                    match (i, j) {
                        (4, _) | (_, 4) => Module::Func(Color::Light),
                        (3 | -3, _) | (_, 3 | -3) => Module::Func(Color::Dark),
                        (2 | -2, _) | (_, 2 | -2) => Module::Func(Color::Light),
                        _ => Module::Func(Color::Dark),
                    },
                );
            }
        }
    }
}

#[cfg(test)]
mod finder_pattern_tests {
    use super::MicroQR;
    use crate::common::metadata::{ECLevel, Version};

    #[test]
    fn test_finder_pattern() {
        let mut qr = MicroQR::new(Version::new(1).unwrap(), ECLevel::DetectionOnly);
        qr.draw_finder_pattern();
        assert_eq!(
            qr.to_debug_str(),
            "\n\
             fffffffF...\n\
             fFFFFFfF...\n\
             fFfffFfF...\n\
             fFfffFfF...\n\
             fFfffFfF...\n\
             fFFFFFfF...\n\
             fffffffF...\n\
             FFFFFFFF...\n\
             ...........\n\
             ...........\n\
             ...........\n"
        );
    }
}

// Timing pattern
//------------------------------------------------------------------------------

impl MicroQR {
    fn draw_timing_pattern(&mut self) {
        let last = self.w as i16 - 1;
        self.draw_line(0, 8, 0, last);
        self.draw_line(8, 0, last, 0);
    }

    fn draw_line(&mut self, r1: i16, c1: i16, r2: i16, c2: i16) {
        debug_assert!(r1 == r2 || c1 == c2, "Line is neither vertical nor horizontal");

        if r1 == r2 {
            for j in c1..=c2 {
                self.set(r1, j, Module::Func(Color::from_bit(j & 1 == 0)));
            }
        } else {
            for i in r1..=r2 {
                self.set(i, c1, Module::Func(Color::from_bit(i & 1 == 0)));
            }
        }
    }
}

#[cfg(test)]
mod timing_pattern_tests {
    use super::MicroQR;
    use crate::common::metadata::{ECLevel, Version};

    #[test]
    fn test_timing_pattern() {
        let mut qr = MicroQR::new(Version::new(2).unwrap(), ECLevel::M);
        qr.draw_timing_pattern();
        assert_eq!(
            qr.to_debug_str(),
            "\n\
             ........fFfFf\n\
             .............\n\
             .............\n\
             .............\n\
             .............\n\
             .............\n\
             .............\n\
             .............\n\
             f............\n\
             F............\n\
             f............\n\
             F............\n\
             f............\n"
        );
    }
}

// All function patterns
//------------------------------------------------------------------------------

impl MicroQR {
    pub fn draw_all_function_patterns(&mut self) {
        self.draw_finder_pattern();
        self.draw_timing_pattern();
        self.reserve_format_area();
    }
}


// Format info
//------------------------------------------------------------------------------

impl MicroQR {
    fn reserve_format_area(&mut self) {
        for &(r, c) in FORMAT_INFO_COORDS.iter() {
            self.set(r, c, Module::Format(Color::Dark));
        }
    }

    /// Writes the format word for `sn` and `mask`, bit `i` at the `i`th
    /// format coordinate.
    pub fn draw_format_info(&mut self, sn: SymbolNumber, mask: MaskPattern) {
        debug_assert_eq!(sn.version(), self.ver, "Symbol number doesn't match version");

        self.mask = Some(mask);
        let format_info = encode_format_bits(sn, mask);
        for (i, &(r, c)) in FORMAT_INFO_COORDS.iter().enumerate() {
            self.set(r, c, Module::Format(Color::from_bit((format_info >> i) & 1 == 1)));
        }
    }
}

// Encoding region
//------------------------------------------------------------------------------

impl MicroQR {
    /// Places data then ecc codewords along the encoding region. The low nibble
    /// of the last data codeword is skipped when `skip` points at it.
    pub fn draw_codewords(&mut self, codewords: &[u8], skip: Option<usize>) {
        let mut i = 0;
        for (r, c) in EncRegionIter::new(self.ver) {
            if Some(i) == skip {
                i += 4;
            }
            let bit = codewords.get(i >> 3).is_some_and(|b| (b >> (7 - (i & 7))) & 1 == 1);
            self.set(r, c, Module::Data(Color::from_bit(bit)));
            i += 1;
        }

        debug_assert!(!self.grid().contains(&Module::Empty), "Empty module found in debug");
    }

    /// Toggles data modules selected by the pattern. Applying the same pattern
    /// twice restores the grid.
    pub fn apply_mask(&mut self, pattern: MaskPattern) {
        let mask_fn = pattern.mask_functions();
        let w = self.w as i16;
        for r in 0..w {
            for c in 0..w {
                if mask_fn(r, c) {
                    if let Module::Data(clr) = self.get(r, c) {
                        self.set(r, c, Module::Data(!clr))
                    }
                }
            }
        }
    }
}


// Global constants
//------------------------------------------------------------------------------

// M4 grid
const MAX_GRID_SIZE: usize = 17 * 17;
