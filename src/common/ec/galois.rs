// Galois field
//------------------------------------------------------------------------------

/// Log/exp tables for GF(2^m) with m <= 8. The exp table holds `order + 1`
/// entries so that `exp[order] == 1`; `log[0]` is never read.
#[derive(Debug)]
pub(crate) struct GaloisField {
    pub order: usize,
    pub exp: [u8; 256],
    pub log: [u8; 256],
}

pub(crate) static GF16: GaloisField = GaloisField::new(0b1_0011, 15);

pub(crate) static GF256: GaloisField = GaloisField::new(0x11d, 255);

pub(crate) const MAX_POLY: usize = 64;

pub(crate) type Poly = [u8; MAX_POLY];

impl GaloisField {
    const fn new(prim: u16, order: usize) -> Self {
        let mut exp = [0u8; 256];
        let mut log = [0u8; 256];
        let mut x: u16 = 1;
        let mut i = 0;
        while i < order {
            exp[i] = x as u8;
            log[x as usize] = i as u8;
            x <<= 1;
            if x > order as u16 {
                x ^= prim;
            }
            i += 1;
        }
        exp[order] = exp[0];
        Self { order, exp, log }
    }

    #[inline]
    pub fn gen_pow(&self, i: usize) -> u8 {
        self.exp[i % self.order]
    }

    #[inline]
    pub fn mul(&self, a: u8, b: u8) -> u8 {
        if a == 0 || b == 0 {
            return 0;
        }
        self.exp[(self.log[a as usize] as usize + self.log[b as usize] as usize) % self.order]
    }

    #[inline]
    pub fn div(&self, a: u8, b: u8) -> u8 {
        debug_assert!(b != 0, "Division by zero in GF({})", self.order + 1);
        if a == 0 {
            return 0;
        }
        let la = self.log[a as usize] as usize;
        let lb = self.log[b as usize] as usize;
        self.exp[(self.order + la - lb) % self.order]
    }
}

// Polynomial operations
//------------------------------------------------------------------------------

impl GaloisField {
    /// dst += c * src * x^shift
    pub fn poly_add(&self, dst: &mut Poly, src: &Poly, c: u8, shift: usize) {
        if c == 0 {
            return;
        }
        for (i, &v) in src.iter().enumerate().take(MAX_POLY.saturating_sub(shift)) {
            dst[i + shift] ^= self.mul(v, c);
        }
    }

    pub fn poly_eval(&self, poly: &[u8], x: u8) -> u8 {
        if x == 0 {
            return poly.first().copied().unwrap_or(0);
        }
        let log_x = self.log[x as usize] as usize;
        poly.iter().enumerate().filter(|(_, &c)| c != 0).fold(0, |sum, (i, &c)| {
            sum ^ self.exp[(self.log[c as usize] as usize + log_x * i) % self.order]
        })
    }

    /// Error locator polynomial from the first `n` syndromes.
    pub fn berlekamp_massey(&self, synd: &Poly, n: usize) -> Poly {
        let mut cx = [0u8; MAX_POLY];
        let mut bx = [0u8; MAX_POLY];
        cx[0] = 1;
        bx[0] = 1;
        let mut l = 0;
        let mut m = 1;
        let mut b = 1u8;

        for i in 0..n {
            // Discrepancy
            let mut d = synd[i];
            for j in 1..=l {
                d ^= self.mul(cx[j], synd[i - j]);
            }

            if d == 0 {
                m += 1;
                continue;
            }

            let scale = self.div(d, b);
            if 2 * l <= i {
                let tx = cx;
                self.poly_add(&mut cx, &bx, scale, m);
                bx = tx;
                l = i + 1 - l;
                b = d;
                m = 1;
            } else {
                self.poly_add(&mut cx, &bx, scale, m);
                m += 1;
            }
        }
        cx
    }
}
