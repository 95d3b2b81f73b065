//! Static Huffman coding over any symbol alphabet.
//!
//! [`encode`] counts the symbols of its input, builds a [`CodeTree`] from those
//! counts, and returns the concatenated codes together with the tree. [`decode`]
//! needs that same tree to turn the bits back into symbols.
//!
//! ```
//! let data: Vec<char> = "The bird is the word".chars().collect();
//! let encoded = huffman::encode(&data)?;
//! assert_eq!(encoded.bits.len(), 70);
//!
//! let decoded = huffman::decode(&encoded.bits, &encoded.tree)?;
//! assert_eq!(decoded, data);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! For byte data, [`container`] wraps the bits and the symbol counts into a
//! single self-describing buffer.

pub mod bits;
pub mod code_table;
pub mod container;
pub mod decoder;
pub mod encoder;
mod errors;
pub mod flags;
pub mod frequency;
pub mod heap;
pub mod stats;
pub mod tree;

use std::io::{self, prelude::*};

pub use crate::{
    bits::Bits,
    code_table::CodeTable,
    decoder::{decode, Decoder},
    encoder::{encode, Encoded, Encoder},
    errors::{DecodeError, EncodeError, FormatError},
    frequency::FrequencyTable,
    stats::CompressionStats,
    tree::CodeTree,
};

pub(crate) fn error<T>(msg: impl Into<String>) -> io::Result<T> {
    Err(io::Error::new(io::ErrorKind::InvalidData, msg.into()))
}

pub(crate) fn read_u8(mut input: impl Read) -> io::Result<u8> {
    let mut buf = [0; 1];
    input.read_exact(&mut buf)?;
    Ok(buf[0])
}

pub(crate) fn read_u16_le(mut input: impl Read) -> io::Result<u16> {
    let mut buf = [0; 2];
    input.read_exact(&mut buf)?;
    Ok(u16::from_le_bytes(buf))
}

pub(crate) fn read_u32_le(mut input: impl Read) -> io::Result<u32> {
    let mut buf = [0; 4];
    input.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

pub(crate) fn read_u64_le(mut input: impl Read) -> io::Result<u64> {
    let mut buf = [0; 8];
    input.read_exact(&mut buf)?;
    Ok(u64::from_le_bytes(buf))
}
