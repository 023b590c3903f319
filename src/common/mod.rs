pub mod bit_utils;
pub mod codec;
pub mod ec;
pub mod error;
pub mod format;
pub mod iter;
pub mod mask;
pub mod metadata;

