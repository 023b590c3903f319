//! # mqrism
//!
//! A Rust library for generating and reading Micro QR codes (M1 to M4) with Reed-Solomon
//! error correction.
//!
//! ## Features
//!
//! - **Micro QR Generation**: Numeric, alphanumeric and byte payloads, with automatic version,
//!   error correction level and mask selection
//! - **Micro QR Reading**: Decode a sampled module grid, stored as is or mirrored
//! - **Error Correction**: Reed-Solomon over GF(256) for data and BCH over GF(16) for format info
//! - **Rendering**: Grayscale images and terminal friendly text
//!
//! ## Quick Start
//!
//! ### Simple Micro QR Generation
//!
//! ```rust
//! use mqrism::{encode_text, ECLevel};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Smallest version that fits, error correction raised while it still fits
//! let code = encode_text("HELLO 42", ECLevel::L)?;
//!
//! let img = code.to_image(2, 4); // 2 module quiet zone, 4px per module
//! assert_eq!(img.width(), (code.width() as u32 + 4) * 4);
//! # Ok(())
//! # }
//! ```
//!
//! ### Full Configuration
//!
//! ```rust
//! use mqrism::{ECLevel, MaskPattern, MicroQRBuilder, Version};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let code = MicroQRBuilder::new(b"Hello")
//!     .version_range(Version::new(3)?, Version::new(4)?) // if not provided, tries M1 to M4
//!     .ec_level(ECLevel::M)                              // minimum level, defaults to ECLevel::L
//!     .mask(MaskPattern::new(2)?)                        // if not provided, picks the best score
//!     .maximize_ec_level(false)                          // keep M even if Q would fit
//!     .build()?;
//!
//! assert_eq!(code.version(), Some(Version::new(3)?));
//! print!("{}", code.to_str(2));
//! # Ok(())
//! # }
//! ```
//!
//! ### Reading a Micro QR Code
//!
//! ```rust
//! use mqrism::{decode, encode_text, ECLevel};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let modules = encode_text("17", ECLevel::DetectionOnly)?.modules().to_vec();
//!
//! // Row major grid of 0 and 1, e.g. from a sampler
//! let code = decode(&modules)?;
//! assert_eq!(code.data_string(), "17");
//! # Ok(())
//! # }
//! ```
//!
//! ## Micro QR Code Components
//!
//! ### Versions
//! - **M1**: 11x11 modules, numeric only
//! - **M2**: 13x13 modules, adds alphanumeric
//! - **M3**: 15x15 modules, adds byte
//! - **M4**: 17x17 modules
//!
//! ### Error Correction Levels
//! - **DetectionOnly**: M1 only, detects errors without correcting them
//! - **L (Low)**: ~7% error correction, M2 to M4
//! - **M (Medium)**: ~15% error correction, M2 to M4
//! - **Q (Quartile)**: ~25% error correction, M4 only
//!
//! `ECLevel::H` exists only to be rejected with [`QRError::InvalidECLevel`].

pub mod builder;
mod code;
pub(crate) mod common;
pub mod payload;
pub mod reader;
mod render;

pub use builder::{encode_binary, encode_text, MicroQRBuilder};
pub use code::{contains_code, MicroQRCode};
pub use common::codec::Mode;
pub use common::error::{EncodeStatus, QRError, QRResult};
pub use common::mask::MaskPattern;
pub use common::metadata::{Color, ECLevel, SymbolNumber, Version};
pub use payload::{WifiConfig, WifiEncryption, WifiParseError};
pub use reader::decode;
