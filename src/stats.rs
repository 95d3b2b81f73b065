use std::fmt;

use crate::encoder::Encoded;

/// How an encoding compares to storing every symbol in a fixed number of bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionStats {
    pub symbols: usize,
    pub encoded_bits: usize,
    pub fixed_width_bits: usize,
}

impl CompressionStats {
    /// `symbol_width` is the size of one symbol in the fixed-width encoding,
    /// e.g. 8 for bytes.
    pub fn new<S>(encoded: &Encoded<S>, symbol_width: usize) -> Self {
        let symbols = encoded.tree.weight();
        Self {
            symbols,
            encoded_bits: encoded.bits.len(),
            fixed_width_bits: symbols * symbol_width,
        }
    }

    /// Encoded size over fixed-width size. Smaller is better.
    pub fn ratio(&self) -> f64 {
        if self.fixed_width_bits == 0 {
            return 1.0;
        }
        self.encoded_bits as f64 / self.fixed_width_bits as f64
    }

    /// Bits saved over the fixed-width encoding; negative if the encoding is larger.
    pub fn saved_bits(&self) -> i64 {
        self.fixed_width_bits as i64 - self.encoded_bits as i64
    }

    pub fn bits_per_symbol(&self) -> f64 {
        if self.symbols == 0 {
            return 0.0;
        }
        self.encoded_bits as f64 / self.symbols as f64
    }
}

impl fmt::Display for CompressionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} symbols: {} bits -> {} bits ({:.1}%, {:.2} bits/symbol)",
            self.symbols,
            self.fixed_width_bits,
            self.encoded_bits,
            self.ratio() * 100.0,
            self.bits_per_symbol()
        )
    }
}
