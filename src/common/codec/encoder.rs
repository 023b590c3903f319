use crate::common::bit_utils::BitStream;
use crate::common::metadata::{SymbolNumber, Version};

use super::types::{Mode, Segment, PADDING_CODEWORDS};

// Encoder
//------------------------------------------------------------------------------

/// Total bits of `segs` in `ver`, or `None` if any segment cannot be written there.
pub(crate) fn segments_bit_len(segs: &[Segment], ver: Version) -> Option<usize> {
    segs.iter().map(|s| s.bit_len(ver)).sum()
}

/// Writes segments, terminator and padding into a stream holding exactly the
/// data bit capacity of `sn`. Callers check the fit with `segments_bit_len`.
pub(crate) fn encode_segments(segs: &[Segment], sn: SymbolNumber) -> BitStream {
    let ver = sn.version();
    let mut bs = BitStream::new(sn.data_bit_capacity());
    for seg in segs {
        push_segment(seg, ver, &mut bs);
    }
    push_terminator(ver, &mut bs);
    pad_remaining_capacity(&mut bs);
    bs
}

/// Alternative segmentations of `data` tried in order when a single segment in
/// `mode` does not fit. Numeric runs are split off the ends first and, for
/// byte data, alphanumeric runs next. The remainder keeps `mode`.
pub(crate) fn split_segments<'a>(data: &'a [u8], mode: Mode) -> Vec<Vec<Segment<'a>>> {
    let mut res = vec![];
    let run_modes: &[Mode] = match mode {
        Mode::Byte => &[Mode::Numeric, Mode::Alphanumeric],
        _ => &[Mode::Numeric],
    };
    for &run in run_modes.iter().filter(|&&m| m < mode) {
        let lead = data.iter().take_while(|&&b| run.contains(b)).count();
        let trail = data.iter().rev().take_while(|&&b| run.contains(b)).count();
        if lead == data.len() {
            continue;
        }

        let len = data.len();
        let cut = |d: &'a [u8]| Segment { mode: run, data: d };
        let rest = |d: &'a [u8]| Segment { mode, data: d };
        if lead > 0 {
            res.push(vec![cut(&data[..lead]), rest(&data[lead..])]);
        }
        if trail > 0 {
            res.push(vec![rest(&data[..len - trail]), cut(&data[len - trail..])]);
        }
        if lead > 0 && trail > 0 {
            res.push(vec![
                cut(&data[..lead]),
                rest(&data[lead..len - trail]),
                cut(&data[len - trail..]),
            ]);
        }
    }
    res
}


// Writer for encoded data
//------------------------------------------------------------------------------

fn push_segment(seg: &Segment, ver: Version, out: &mut BitStream) {
    push_header(seg, ver, out);
    match seg.mode {
        Mode::Numeric => push_numeric_data(seg.data, out),
        Mode::Alphanumeric => push_alphanumeric_data(seg.data, out),
        Mode::Byte => push_byte_data(seg.data, out),
        Mode::Kanji => unreachable!("Kanji segments are never built"),
    }
}

fn push_header(seg: &Segment, ver: Version, out: &mut BitStream) {
    out.push_bits(seg.mode as u8, ver.mode_bits());
    let len_bits = ver.char_cnt_bits(seg.mode);
    let char_cnt = seg.data.len();
    debug_assert!(
        char_cnt < (1 << len_bits),
        "Char count exceeds bit length: Char count {char_cnt}, Char count bits {len_bits}"
    );
    out.push_bits(char_cnt as u16, len_bits);
}

fn push_numeric_data(data: &[u8], out: &mut BitStream) {
    for chunk in data.chunks(3) {
        let len = Mode::Numeric.encoded_len(chunk.len());
        out.push_bits(Mode::Numeric.encode_chunk(chunk), len);
    }
}

fn push_alphanumeric_data(data: &[u8], out: &mut BitStream) {
    for chunk in data.chunks(2) {
        let len = Mode::Alphanumeric.encoded_len(chunk.len());
        out.push_bits(Mode::Alphanumeric.encode_chunk(chunk), len);
    }
}

fn push_byte_data(data: &[u8], out: &mut BitStream) {
    for &b in data {
        out.push_bits(b, 8);
    }
}

fn push_terminator(ver: Version, out: &mut BitStream) {
    let term_len = std::cmp::min(ver.terminator_bits(), out.capacity() - out.len());
    out.push_bits(0u8, term_len);
}

fn pad_remaining_capacity(out: &mut BitStream) {
    push_padding_bits(out);
    push_padding_codewords(out);
    // Zero nibble closing the last codeword of M1 and M3
    out.push_bits(0u8, out.capacity() - out.len());
}

fn push_padding_bits(out: &mut BitStream) {
    let offset = out.len() & 7;
    if offset > 0 {
        let padding_bits_len = std::cmp::min(8 - offset, out.capacity() - out.len());
        out.push_bits(0u8, padding_bits_len);
    }
}

fn push_padding_codewords(out: &mut BitStream) {
    let remain_byte_capacity = (out.capacity() - out.len()) >> 3;
    PADDING_CODEWORDS.iter().copied().cycle().take(remain_byte_capacity).for_each(|pc| {
        out.push_bits(pc, 8);
    });
}
