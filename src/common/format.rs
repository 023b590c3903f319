use super::ec::{Poly, GF16, MAX_POLY};
use super::error::{QRError, QRResult};
use super::mask::MaskPattern;
use super::metadata::SymbolNumber;

// Format information
//------------------------------------------------------------------------------

/// 15 bit BCH(15,5) word carrying the symbol number and mask, xored with the
/// micro qr format mask.
pub(crate) fn encode_format_bits(sn: SymbolNumber, mask: MaskPattern) -> u16 {
    let payload = ((*sn as u16) << 2) | *mask as u16;
    encode_payload(payload)
}

fn encode_payload(payload: u16) -> u16 {
    let data = payload << 10;
    let mut rem = data;
    for b in (10..15).rev() {
        if (rem >> b) & 1 == 1 {
            rem ^= FORMAT_GENERATOR << (b - 10);
        }
    }
    (data | rem) ^ FORMAT_MASK
}

/// Nearest reference word by hamming distance. Fails on ties or when the
/// closest word is 4 or more bits away.
pub(crate) fn decode_format_bits(bits: u16) -> QRResult<(SymbolNumber, MaskPattern)> {
    let mut best = (0u16, u32::MAX);
    let mut ties = 0;
    for payload in 0..32 {
        let dist = (encode_payload(payload) ^ bits).count_ones();
        if dist < best.1 {
            best = (payload, dist);
            ties = 1;
        } else if dist == best.1 {
            ties += 1;
        }
    }

    if ties != 1 || best.1 >= 4 {
        return Err(QRError::InvalidFormatInfo);
    }
    let sn = SymbolNumber::from_bits((best.0 >> 2) as u8).ok_or(QRError::InvalidFormatInfo)?;
    Ok((sn, MaskPattern::from_bits(best.0 as u8)))
}

/// Algebraic correction of up to 3 flipped bits over GF(16).
pub(crate) fn rectify_format_bits(bits: u16) -> QRResult<u16> {
    let mut u = bits ^ FORMAT_MASK;
    let synd = match format_syndromes(u) {
        Some(s) => s,
        None => return Ok(bits),
    };

    let sig = GF16.berlekamp_massey(&synd, FORMAT_SYNDROMES);
    for i in 0..FORMAT_BITS {
        if GF16.poly_eval(&sig, GF16.gen_pow(15 - i)) == 0 {
            u ^= 1 << i;
        }
    }

    let fixed = u ^ FORMAT_MASK;
    if format_syndromes(u).is_some() || (fixed ^ bits).count_ones() >= 4 {
        return Err(QRError::InvalidFormatInfo);
    }
    Ok(fixed)
}

// None when the word is a valid codeword
fn format_syndromes(u: u16) -> Option<Poly> {
    let mut synd = [0u8; MAX_POLY];
    for (i, s) in synd.iter_mut().take(FORMAT_SYNDROMES).enumerate() {
        for j in (0..FORMAT_BITS).filter(|&j| (u >> j) & 1 == 1) {
            *s ^= GF16.gen_pow((i + 1) * j);
        }
    }
    synd.iter().any(|&s| s != 0).then_some(synd)
}

/// Decodes a format word read off the grid.
///
/// BCH(15,5) has distance 7, so below 4 flips the nearest word is also what the
/// algebraic correction lands on. Debug builds cross-check the two.
pub(crate) fn parse_format_bits(bits: u16) -> QRResult<(SymbolNumber, MaskPattern)> {
    let res = decode_format_bits(bits);
    debug_assert!(
        res.map_or(true, |(sn, mask)| {
            rectify_format_bits(bits) == Ok(encode_format_bits(sn, mask))
        }),
        "Format correction disagrees for {bits:015b}"
    );
    res
}


// Global constants
//------------------------------------------------------------------------------

const FORMAT_BITS: usize = 15;

const FORMAT_SYNDROMES: usize = 6;

static FORMAT_GENERATOR: u16 = 0b101_0011_0111;

static FORMAT_MASK: u16 = 0b100_0100_0100_0101;

/// `(row, column)` of format bit `i`, least significant first.
pub(crate) static FORMAT_INFO_COORDS: [(i16, i16); 15] = [
    (1, 8),
    (2, 8),
    (3, 8),
    (4, 8),
    (5, 8),
    (6, 8),
    (7, 8),
    (8, 8),
    (8, 7),
    (8, 6),
    (8, 5),
    (8, 4),
    (8, 3),
    (8, 2),
    (8, 1),
];
