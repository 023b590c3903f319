use std::ops::Deref;

use log::trace;

use super::error::{QRError, QRResult};
use super::metadata::Color;
use crate::builder::MicroQR;

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub struct MaskPattern(u8);

impl MaskPattern {
    pub fn new(pattern: u8) -> QRResult<Self> {
        match pattern {
            0..=3 => Ok(Self(pattern)),
            _ => Err(QRError::InvalidMaskingPattern),
        }
    }

    pub(crate) fn all() -> impl Iterator<Item = MaskPattern> {
        (0..4).map(MaskPattern)
    }

    pub(crate) fn from_bits(bits: u8) -> Self {
        Self(bits & 0b11)
    }
}

impl Deref for MaskPattern {
    type Target = u8;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

// Arguments are row then column
mod mask_functions {
    pub fn horizontal_lines(r: i16, _: i16) -> bool {
        r & 1 == 0
    }

    pub fn large_checkerboard(r: i16, c: i16) -> bool {
        ((r >> 1) + (c / 3)) & 1 == 0
    }

    pub fn diamonds(r: i16, c: i16) -> bool {
        (((r * c) & 1) + ((r * c) % 3)) & 1 == 0
    }

    pub fn meadow(r: i16, c: i16) -> bool {
        (((r + c) & 1) + ((r * c) % 3)) & 1 == 0
    }
}

impl MaskPattern {
    pub fn mask_functions(self) -> fn(i16, i16) -> bool {
        match *self {
            0b00 => mask_functions::horizontal_lines,
            0b01 => mask_functions::large_checkerboard,
            0b10 => mask_functions::diamonds,
            0b11 => mask_functions::meadow,
            _ => unreachable!("Invalid pattern"),
        }
    }
}

/// Tries every pattern and keeps the first with the highest score. Each trial
/// mask is undone by applying it a second time.
pub(crate) fn apply_best_mask(qr: &mut MicroQR) -> MaskPattern {
    let mut best = (MaskPattern(0), 0);
    for (i, mask) in MaskPattern::all().enumerate() {
        qr.apply_mask(mask);
        let score = compute_score(qr);
        qr.apply_mask(mask);
        trace!("Mask {} scored {score}", *mask);
        if i == 0 || score > best.1 {
            best = (mask, score);
        }
    }
    qr.apply_mask(best.0);
    best.0
}

/// Dark modules along the right column and bottom row, skipping the timing
/// corner, packed as `min << 4 | max`. Higher is better.
pub(crate) fn compute_score(qr: &MicroQR) -> u32 {
    let w = qr.width() as i16;
    let dark = |r, c| (*qr.get(r, c) == Color::Dark) as u32;
    let right: u32 = (1..w).map(|r| dark(r, w - 1)).sum();
    let bottom: u32 = (1..w).map(|c| dark(w - 1, c)).sum();
    (right.min(bottom) << 4) | right.max(bottom)
}
