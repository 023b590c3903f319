use super::galois::{Poly, GF256, MAX_POLY};
use super::{Block, MAX_BLOCK_SIZE};
use crate::common::error::{QRError, QRResult};

// Rectifier
//------------------------------------------------------------------------------

impl Block {
    pub fn rectify(&mut self) -> QRResult<&[u8]> {
        // Compute syndromes
        let synd = match self.syndromes() {
            Ok(()) => return Ok(self.data()),
            Err(s) => s,
        };

        // Error locator polynomial
        let sig = GF256.berlekamp_massey(&synd, self.ec_len());
        let err_loc = self.chien_search(&sig);

        // Sigma derivative
        let mut dsig = [0u8; MAX_POLY];
        for i in (1..MAX_POLY).step_by(2) {
            dsig[i - 1] = sig[i];
        }

        // Error evaluator
        let omg = self.omega(&synd, &sig);

        // Error magnitude
        let err_mag = self.forney(&omg, &dsig, &err_loc)?;

        // Rectify errors by XORing data with magnitude
        for (d, &e) in self.data.iter_mut().zip(err_mag.iter()).take(self.len) {
            *d ^= e;
        }

        match self.syndromes() {
            Ok(()) => Ok(self.data()),
            Err(_) => Err(QRError::DataEcc),
        }
    }

    fn syndromes(&self) -> Result<(), Poly> {
        let mut rev = [0u8; MAX_BLOCK_SIZE];
        for (r, &b) in rev.iter_mut().zip(self.full().iter().rev()) {
            *r = b;
        }

        let mut synd = [0u8; MAX_POLY];
        for (i, s) in synd.iter_mut().take(self.ec_len()).enumerate() {
            *s = GF256.poly_eval(&rev[..self.len], GF256.gen_pow(i));
        }

        if synd.iter().all(|&s| s == 0) {
            Ok(())
        } else {
            Err(synd)
        }
    }

    // Marks positions where sigma has a root at the inverse locator
    fn chien_search(&self, sig: &Poly) -> [bool; MAX_BLOCK_SIZE] {
        let mut err_loc = [false; MAX_BLOCK_SIZE];
        for (i, e) in err_loc[..self.len].iter_mut().rev().enumerate() {
            *e = GF256.poly_eval(sig, GF256.gen_pow(255 - i)) == 0;
        }
        err_loc
    }

    fn omega(&self, synd: &Poly, sig: &Poly) -> Poly {
        let t = self.ec_len() - 1;
        let mut omg = [0u8; MAX_POLY];
        for i in 0..t {
            let sy = synd[i + 1];
            for j in 0..t - i {
                omg[i + j] ^= GF256.mul(sy, sig[j]);
            }
        }
        omg
    }

    fn forney(
        &self,
        omg: &Poly,
        dsig: &Poly,
        err_loc: &[bool; MAX_BLOCK_SIZE],
    ) -> QRResult<[u8; MAX_BLOCK_SIZE]> {
        let mut mag = [0u8; MAX_BLOCK_SIZE];
        for (i, _) in err_loc[..self.len].iter().rev().enumerate().filter(|(_, &e)| e) {
            let xinv = GF256.gen_pow(255 - i);
            let omg_x = GF256.poly_eval(omg, xinv);
            let dsig_x = GF256.poly_eval(dsig, xinv);
            if dsig_x == 0 {
                return Err(QRError::DataEcc);
            }
            mag[self.len - 1 - i] = GF256.div(omg_x, dsig_x);
        }
        Ok(mag)
    }
}
