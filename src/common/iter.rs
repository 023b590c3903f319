use super::metadata::Version;

// Iterator over the encoding region of a micro qr
//------------------------------------------------------------------------------

/// Yields `(row, column)` of every data module in placement order: column pairs
/// from the right, alternating upward and downward, right column first. Timing
/// lines and the finder corner (row and column <= 8) are skipped.
pub struct EncRegionIter {
    right: i16,
    vert: i16,
    side: i16,
    w: i16,
}

impl EncRegionIter {
    pub const fn new(version: Version) -> Self {
        let w = version.width() as i16;
        Self { right: w - 1, vert: 0, side: 0, w }
    }

    fn advance(&mut self) {
        self.side += 1;
        if self.side == 2 {
            self.side = 0;
            self.vert += 1;
            if self.vert == self.w {
                self.vert = 0;
                self.right -= 2;
            }
        }
    }
}

impl Iterator for EncRegionIter {
    type Item = (i16, i16);
    fn next(&mut self) -> Option<Self::Item> {
        while self.right > 0 {
            let (right, vert, side) = (self.right, self.vert, self.side);
            self.advance();

            let c = right - side;
            let upward = (self.w - right) & 2 == 0;
            let r = if upward { self.w - 1 - vert } else { vert };
            if r == 0 || c == 0 || (r <= 8 && c <= 8) {
                continue;
            }
            return Some((r, c));
        }
        None
    }
}

#[cfg(test)]
mod iter_tests {
    use std::collections::HashSet;

    use super::EncRegionIter;
    use crate::common::metadata::Version;

    #[test]
    fn test_region_size() {
        for ver in Version::all() {
            let coords: Vec<_> = EncRegionIter::new(ver).collect();
            assert_eq!(coords.len(), ver.raw_data_modules(), "Version {}", *ver);
            let uniq: HashSet<_> = coords.iter().collect();
            assert_eq!(uniq.len(), coords.len());
        }
    }

    #[test]
    fn test_order_m1() {
        let coords: Vec<_> = EncRegionIter::new(Version::new(1).unwrap()).collect();
        // Upward through the rightmost pair
        assert_eq!(coords[..4], [(10, 10), (10, 9), (9, 10), (9, 9)]);
        // Next pair runs downward and only starts below the finder corner
        assert_eq!(coords[20..22], [(9, 8), (9, 7)]);
        assert!(coords.iter().all(|&(r, c)| r > 0 && c > 0 && (r > 8 || c > 8)));
    }
}
