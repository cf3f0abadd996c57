//! Interpolative coding of sorted position lists.
//!
//! `interpol` packs strictly increasing integer sequences, such as the term
//! positions inside an inverted-index posting, into a compact bitstream. Once
//! the two endpoints of a run are known, every interior value is confined to
//! a shrinking window, and each one is sent with close to the minimum number
//! of bits that window allows.
//!
//! # Building Blocks
//!
//! - [`BitWriter`] / [`BitReader`]: LSB-first bit packing, raw fixed-width
//!   fields, and truncated binary codes for a value in `[0, outof)`
//! - [`BitWriter::encode_interpolative`] / [`BitReader::decode_interpolative`]:
//!   recursive binary interpolative coding of a whole run
//! - [`InterpolativeDecoder`]: the same decode, one value per call, for
//!   consumers that may stop early
//!
//! The endpoints themselves are not part of an interpolative run. Callers
//! write them however suits their container (a fixed-width field, a count in
//! a header, or external metadata) and supply them again when decoding.
//!
//! # Historical Context
//!
//! Binary interpolative coding was introduced by Moffat and Stuiver for
//! inverted file compression. It adapts to local clustering in a way that
//! gap-based codes (Golomb, Elias gamma/delta) cannot, and it is especially
//! effective on the dense runs typical of positional postings.
//!
//! # Example
//!
//! ```rust
//! use interpol::{BitReader, BitWriter};
//!
//! let positions = vec![10u32, 13, 14, 18, 20];
//! let last = positions.len() - 1;
//!
//! let mut writer = BitWriter::new();
//! writer.encode_interpolative(&positions, 0, last);
//! let buf = writer.finish();
//!
//! // Endpoints are known to the caller.
//! let mut decoded = vec![0u32; positions.len()];
//! decoded[0] = 10;
//! decoded[last] = 20;
//! BitReader::new(&buf)
//!     .decode_interpolative(&mut decoded, 0, last)
//!     .unwrap();
//! assert_eq!(positions, decoded);
//! ```
//!
//! # References
//!
//! - Moffat, A. and Stuiver, L. (2000). "Binary Interpolative Coding for
//!   Effective Index Compression"
//! - Witten, I., Moffat, A. and Bell, T. (1999). "Managing Gigabytes"

#![warn(missing_docs)]
#![warn(clippy::all)]

mod bits;
mod error;
mod interpolative;
mod reader;
mod writer;

pub use bits::{bits_needed, code_len};
pub use error::CompressionError;
pub use interpolative::InterpolativeDecoder;
pub use reader::BitReader;
pub use writer::BitWriter;
