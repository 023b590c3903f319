use log::trace;

use crate::common::bit_utils::BitStream;
use crate::common::error::{QRError, QRResult};
use crate::common::metadata::Version;

use super::types::Mode;

// Decoder
//------------------------------------------------------------------------------

/// Reads segments until the terminator or the end of the stream. Returns the
/// payload and the highest mode seen.
pub(crate) fn decode(inp: &mut BitStream, ver: Version) -> QRResult<(Vec<u8>, Mode)> {
    let mut res = Vec::with_capacity(inp.len() >> 2);
    let mut top = Mode::Numeric;
    while inp.remaining() >= ver.mode_bits() && inp.peek_nonzero(ver.terminator_bits()) {
        let mode = read_segment(inp, ver, &mut res)?;
        top = top.max(mode);
    }

    if res.is_empty() {
        return Err(QRError::EmptyData);
    }
    Ok((res, top))
}

// Reader for encoded data
//------------------------------------------------------------------------------

fn read_segment(inp: &mut BitStream, ver: Version, out: &mut Vec<u8>) -> QRResult<Mode> {
    let old_len = out.len();
    let (mode, char_cnt) = take_header(inp, ver)?;

    match mode {
        Mode::Numeric => read_numeric(inp, char_cnt, out)?,
        Mode::Alphanumeric => read_alphanumeric(inp, char_cnt, out)?,
        Mode::Byte => read_byte(inp, char_cnt, out)?,
        Mode::Kanji => return Err(QRError::UnsupportedMode),
    };

    trace!("Read {mode:?} segment of {} chars", out.len() - old_len);
    Ok(mode)
}

fn take_header(inp: &mut BitStream, ver: Version) -> QRResult<(Mode, usize)> {
    let ind = inp.take_bits(ver.mode_bits()).ok_or(QRError::DataUnderflow)?;
    let mode = Mode::from_indicator(ind)?;
    if !ver.supports_mode(mode) {
        return Err(QRError::UnsupportedMode);
    }

    let len_bits = ver.char_cnt_bits(mode);
    let char_cnt = inp.take_bits(len_bits).ok_or(QRError::DataUnderflow)?;

    Ok((mode, char_cnt.into()))
}

fn read_numeric(inp: &mut BitStream, mut char_cnt: usize, out: &mut Vec<u8>) -> QRResult<()> {
    while char_cnt > 0 {
        let n = char_cnt.min(3);
        let bit_len = Mode::Numeric.encoded_len(n);
        let chunk = inp.take_bits(bit_len).ok_or(QRError::DataUnderflow)?;
        out.extend(Mode::Numeric.decode_chunk(chunk, bit_len)?);
        char_cnt -= n;
    }
    Ok(())
}

fn read_alphanumeric(inp: &mut BitStream, mut char_cnt: usize, out: &mut Vec<u8>) -> QRResult<()> {
    while char_cnt > 0 {
        let n = char_cnt.min(2);
        let bit_len = Mode::Alphanumeric.encoded_len(n);
        let chunk = inp.take_bits(bit_len).ok_or(QRError::DataUnderflow)?;
        out.extend(Mode::Alphanumeric.decode_chunk(chunk, bit_len)?);
        char_cnt -= n;
    }
    Ok(())
}

fn read_byte(inp: &mut BitStream, char_cnt: usize, out: &mut Vec<u8>) -> QRResult<()> {
    if inp.remaining() < char_cnt * 8 {
        return Err(QRError::DataUnderflow);
    }
    for _ in 0..char_cnt {
        let chunk = inp.take_bits(8).ok_or(QRError::DataUnderflow)?;
        out.extend(Mode::Byte.decode_chunk(chunk, 8)?);
    }
    Ok(())
}
