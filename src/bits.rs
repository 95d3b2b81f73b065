//! The bit-sequence representation shared by the encoder and decoder.
//!
//! Bits are packed most-significant-first into bytes, so the first bit of the
//! sequence is the high bit of the first byte. The textual `'0'`/`'1'` form is
//! offered for display and for tests that pin exact encodings.

use bitvec::prelude::*;

use crate::errors::DecodeError;

/// A packed, growable bit sequence.
pub type Bits = BitVec<u8, Msb0>;

/// A borrowed view of a bit sequence.
pub type BitStr = BitSlice<u8, Msb0>;

/// Render bits as a string of `'0'` and `'1'`.
pub fn to_bit_string(bits: &BitStr) -> String {
    bits.iter()
        .by_vals()
        .map(|bit| if bit { '1' } else { '0' })
        .collect()
}

/// Parse a string of `'0'` and `'1'`. Any other character is an error.
pub fn parse_bit_string(text: &str) -> Result<Bits, DecodeError> {
    let mut bits = Bits::with_capacity(text.len());
    for (position, c) in text.chars().enumerate() {
        match c {
            '0' => bits.push(false),
            '1' => bits.push(true),
            _ => return Err(DecodeError::InvalidBitChar { position, found: c }),
        }
    }
    Ok(bits)
}

/// Pack bits into bytes, zero-filling the unused low bits of the last byte.
pub fn to_packed(bits: &BitStr) -> Vec<u8> {
    let mut packed = Bits::with_capacity(bits.len());
    packed.extend_from_bitslice(bits);
    packed.set_uninitialized(false);
    packed.into_vec()
}

/// Rebuild a bit sequence from packed bytes, keeping only the first
/// `bit_count` bits. Returns `None` if `bytes` is too short, longer than
/// needed to hold `bit_count` bits, or `bit_count` is too large for a [`Bits`].
pub fn from_packed(bytes: Vec<u8>, bit_count: usize) -> Option<Bits> {
    if bit_count > BitStr::MAX_BITS || bytes.len() != packed_len(bit_count) {
        return None;
    }
    let mut bits = Bits::from_vec(bytes);
    bits.truncate(bit_count);
    Some(bits)
}

/// Number of bytes needed to hold `bit_count` packed bits.
pub fn packed_len(bit_count: usize) -> usize {
    bit_count.div_ceil(8)
}
