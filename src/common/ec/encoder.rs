use super::galois::GF256;

// Reed-Solomon encoder
//------------------------------------------------------------------------------

/// Coefficients of the generator polynomial with roots a^0..a^(degree-1),
/// highest degree first and the leading 1 omitted.
pub(crate) fn generator_coefficients(degree: usize) -> Vec<u8> {
    debug_assert!(degree > 0, "Generator polynomial needs a positive degree");

    let mut coeffs = vec![0u8; degree];
    coeffs[degree - 1] = 1;

    // Multiply by (x - root) for each successive root
    let mut root = 1u8;
    for _ in 0..degree {
        for j in 0..degree {
            coeffs[j] = GF256.mul(coeffs[j], root);
            if j + 1 < degree {
                coeffs[j] ^= coeffs[j + 1];
            }
        }
        root = GF256.mul(root, 2);
    }
    coeffs
}

/// Remainder of data(x) * x^n divided by the generator polynomial.
pub(crate) fn compute_remainders(data: &[u8], coeffs: &[u8]) -> Vec<u8> {
    let n = coeffs.len();
    let mut rem = vec![0u8; n];
    for &b in data {
        let factor = b ^ rem[0];
        rem.rotate_left(1);
        rem[n - 1] = 0;
        for (r, &c) in rem.iter_mut().zip(coeffs) {
            *r ^= GF256.mul(c, factor);
        }
    }
    rem
}

pub(crate) fn ecc(data: &[u8], ecc_count: usize) -> Vec<u8> {
    compute_remainders(data, &generator_coefficients(ecc_count))
}
