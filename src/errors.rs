use std::io;

/// An error encountered while encoding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    /// There is nothing to build a code tree from.
    #[error("cannot encode empty input")]
    EmptyInput,

    /// The symbol at `position` has no code. Only possible when encoding with
    /// a code table derived from different data.
    #[error("symbol at position {position} is not in the code table")]
    UnknownSymbol { position: usize },
}

/// An error encountered while decoding a bit sequence.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The bits ran out partway through a code.
    #[error("bit sequence ends {trailing_bits} bits into an incomplete code")]
    TruncatedInput { trailing_bits: usize },

    /// The bit at `position` asks for a child the current node doesn't have.
    #[error("bit {position} does not match the code tree")]
    MalformedTree { position: usize },

    #[error("invalid bit character {found:?} at position {position}")]
    InvalidBitChar { position: usize, found: char },
}

/// A malformed container, as read by [`crate::container::read`].
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("malformed header: {0}")]
    Header(String),

    #[error("malformed frequency table: {0}")]
    Table(String),

    #[error("malformed footer: {0}")]
    Footer(String),
}

impl From<EncodeError> for io::Error {
    fn from(e: EncodeError) -> Self {
        io::Error::new(io::ErrorKind::InvalidInput, e)
    }
}

impl From<DecodeError> for io::Error {
    fn from(e: DecodeError) -> Self {
        io::Error::new(io::ErrorKind::InvalidData, e)
    }
}

impl From<FormatError> for io::Error {
    fn from(e: FormatError) -> Self {
        io::Error::new(io::ErrorKind::InvalidData, e)
    }
}
