mod decoder;
mod encoder;
mod types;

pub(crate) use decoder::decode;
pub(crate) use encoder::{encode_segments, segments_bit_len, split_segments};
pub use types::Mode;
pub(crate) use types::Segment;
