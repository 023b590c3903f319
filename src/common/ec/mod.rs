mod block;
mod decoder;
mod encoder;
mod galois;

pub(crate) use block::Block;
pub(crate) use galois::{Poly, GF16, MAX_POLY};

// Largest micro qr block (M4)
pub(crate) const MAX_BLOCK_SIZE: usize = 24;
