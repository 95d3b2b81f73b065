//! A self-describing byte format for Huffman-encoded byte data.
//!
//! The tree itself isn't stored. Instead the container holds the symbol
//! counts in first-appearance order, which is all [`CodeTree::build`] needs to
//! reproduce the encoder's tree exactly.
//!
//! ```text
//! +---+---+---+---+-------+---+---+=========================+
//! |     MAGIC     | FLAGS | COUNT |  COUNT x (SYM, FREQ)    |
//! +---+---+---+---+-------+---+---+=========================+
//! +---+---+---+---+---+---+---+---+===========+---+---+---+---+
//! |           BIT COUNT           |  PAYLOAD  |  LENGTH (opt) |
//! +---+---+---+---+---+---+---+---+===========+---+---+---+---+
//! ```
//!
//! Integers are little-endian. `SYM` is one byte and `FREQ` is a `u64`. The
//! payload is the bit sequence packed most-significant-bit first, zero padded
//! to a whole byte. `LENGTH` is the original length mod 2^32, present only if
//! [`Flags::LENGTH`] is set.

use std::io::{self, prelude::*};

use crate::{
    bits::{self, to_packed},
    code_table::CodeTable,
    decoder::Decoder,
    encoder::{encode, Encoded},
    error,
    errors::FormatError,
    flags::Flags,
    frequency::FrequencyTable,
    read_u16_le, read_u32_le, read_u64_le, read_u8,
    stats::CompressionStats,
    tree::CodeTree,
};

pub const MAGIC: [u8; 4] = *b"HUF\x01";

/// Upper bound on distinct symbols: one per byte value.
const MAX_SYMBOLS: usize = 256;

/// Settings for [`write`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Append the original length, so truncation is detected on read.
    pub length_footer: bool,

    /// Set [`Flags::TEXT`] when the input is valid UTF-8.
    pub detect_text: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            length_footer: true,
            detect_text: true,
        }
    }
}

/// What [`write`] produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub flags: Flags,
    pub stats: CompressionStats,
    pub bytes_written: usize,
}

/// Encode `data` and write it to `out` as a container.
///
/// Empty input is rejected, as there is no tree to describe it.
pub fn write(data: &[u8], options: Options, mut out: impl Write) -> io::Result<Summary> {
    let encoded = encode(data)?;
    let stats = CompressionStats::new(&encoded, 8);
    let Encoded { bits, tree } = encoded;

    let mut flags = Flags::empty();
    if options.detect_text && std::str::from_utf8(data).is_ok() {
        flags |= Flags::TEXT;
    }
    if options.length_footer {
        flags |= Flags::LENGTH;
    }

    let symbol_count = tree.leaf_count();
    let mut header = Vec::with_capacity(MAGIC.len() + 3 + 9 * symbol_count + 8);
    header.extend_from_slice(&MAGIC);
    header.push(flags.bits());
    header.extend_from_slice(&(symbol_count as u16).to_le_bytes());
    for (&symbol, frequency) in tree.leaves() {
        header.push(symbol);
        header.extend_from_slice(&(frequency as u64).to_le_bytes());
    }
    header.extend_from_slice(&(bits.len() as u64).to_le_bytes());

    let payload = to_packed(&bits);

    out.write_all(&header)?;
    out.write_all(&payload)?;
    let mut bytes_written = header.len() + payload.len();

    if flags.contains(Flags::LENGTH) {
        out.write_all(&(data.len() as u32).to_le_bytes())?;
        bytes_written += 4;
    }

    log::debug!(
        "wrote container: {symbol_count} symbols, {} payload bits, {bytes_written} bytes, flags {flags:?}",
        bits.len()
    );

    Ok(Summary {
        flags,
        stats,
        bytes_written,
    })
}

/// Read one container from `input` and return the decoded bytes.
///
/// The input must end exactly where the container does.
pub fn read(mut input: impl BufRead) -> io::Result<Vec<u8>> {
    let flags = read_header(&mut input)?;
    let frequencies = read_table(&mut input)?;
    let total = frequencies.total();

    let tree = CodeTree::build(frequencies.clone())
        .ok_or_else(|| FormatError::Table("no symbols".into()))?;
    let Some(expected_bits) = CodeTable::generate(&tree).encoded_len(frequencies.iter()) else {
        return Err(FormatError::Table("encoded length overflows".into()).into());
    };

    let bit_count = read_u64_le(&mut input)?;
    if bit_count != expected_bits as u64 {
        let msg = format!(
            "bit count {bit_count} doesn't match the table, which implies {expected_bits}"
        );
        return Err(FormatError::Header(msg).into());
    }

    let mut payload = vec![];
    (&mut input)
        .take(bits::packed_len(expected_bits) as u64)
        .read_to_end(&mut payload)?;
    let Some(encoded_bits) = bits::from_packed(payload, expected_bits) else {
        let msg = "payload ends before the bit count";
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, msg));
    };

    let data = Decoder::new(&tree).decode(&encoded_bits)?;
    if data.len() != total {
        let msg = format!("decoded {} bytes, but the table counts {total}", data.len());
        return Err(FormatError::Table(msg).into());
    }

    if flags.contains(Flags::LENGTH) {
        let length = read_u32_le(&mut input)?;
        if length != data.len() as u32 {
            let msg = format!("length {length} doesn't match decoded length {}", data.len());
            return Err(FormatError::Footer(msg).into());
        }
    }

    validate_eof(&mut input)?;

    if flags.contains(Flags::TEXT) && std::str::from_utf8(&data).is_err() {
        log::warn!("container is flagged as text, but decoded data isn't valid UTF-8");
    }

    Ok(data)
}

fn read_header(mut input: impl Read) -> io::Result<Flags> {
    let mut magic = [0; 4];
    input.read_exact(&mut magic)?;
    if magic != MAGIC {
        let msg = format!(
            "unrecognized magic. expected {}, got {}",
            hex::encode(MAGIC),
            hex::encode(magic)
        );
        return Err(FormatError::Header(msg).into());
    }

    let flag_byte = read_u8(&mut input)?;
    let Some(flags) = Flags::from_bits(flag_byte) else {
        let msg = format!("reserved bit set in flag byte: {flag_byte:08b}");
        return Err(FormatError::Header(msg).into());
    };
    log::trace!("container flags: {flags:?}");
    Ok(flags)
}

fn read_table(mut input: impl Read) -> io::Result<FrequencyTable<u8>> {
    let count = read_u16_le(&mut input)? as usize;
    if count == 0 || count > MAX_SYMBOLS {
        let msg = format!("symbol count must be between 1 and {MAX_SYMBOLS}, got {count}");
        return Err(FormatError::Table(msg).into());
    }

    let mut counts = Vec::with_capacity(count);
    let mut total = 0usize;
    for _ in 0..count {
        let symbol = read_u8(&mut input)?;
        let frequency = read_u64_le(&mut input)?;

        let sum = usize::try_from(frequency)
            .ok()
            .and_then(|f| Some((f, total.checked_add(f)?)));
        let Some((frequency, sum)) = sum else {
            return Err(FormatError::Table("symbol counts overflow".into()).into());
        };
        total = sum;
        counts.push((symbol, frequency));
    }

    FrequencyTable::from_counts(counts).map_err(|e| FormatError::Table(e.to_string()).into())
}

fn validate_eof(mut input: impl BufRead) -> io::Result<()> {
    if !input.fill_buf()?.is_empty() {
        // Concatenated containers could be supported, but nothing writes them.
        error("expected eof, but got more bytes after the container")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use rand_chacha::{
        rand_core::{RngCore, SeedableRng},
        ChaCha8Rng,
    };
    use test_case::test_case;

    use super::*;

    fn compress(data: &[u8], options: Options) -> Vec<u8> {
        let mut out = vec![];
        let summary = write(data, options, &mut out).unwrap();
        assert_eq!(summary.bytes_written, out.len());
        out
    }

    #[test_case(b"Hello world!")]
    #[test_case(b"abc")]
    #[test_case(b"A")]
    #[test_case(b"The bird is the word")]
    #[test_case(&[0, 255, 0, 255, 128] ; "binary")]
    fn round_trip(input: &[u8]) -> anyhow::Result<()> {
        for options in [
            Options::default(),
            Options {
                length_footer: false,
                detect_text: false,
            },
        ] {
            let compressed = compress(input, options);
            assert_eq!(read(Cursor::new(compressed))?, input);
        }
        Ok(())
    }

    #[test]
    fn random_round_trip() -> anyhow::Result<()> {
        let mut payload = vec![0; 100_000];
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        rng.fill_bytes(&mut payload);

        let compressed = compress(&payload, Options::default());
        assert_eq!(read(Cursor::new(compressed))?, payload);
        Ok(())
    }

    #[test]
    fn layout() {
        // b = 1 x 1, a = 2 x 1 => tree (b, a), codes b = 0, a = 1
        let compressed = compress(b"aab", Options::default());

        let mut expected = vec![];
        expected.extend_from_slice(b"HUF\x01");
        expected.push(0b_0000_0011);
        expected.extend_from_slice(&2u16.to_le_bytes());
        expected.push(b'a');
        expected.extend_from_slice(&2u64.to_le_bytes());
        expected.push(b'b');
        expected.extend_from_slice(&1u64.to_le_bytes());
        expected.extend_from_slice(&3u64.to_le_bytes());
        expected.push(0b_1100_0000);
        expected.extend_from_slice(&3u32.to_le_bytes());

        assert_eq!(hex::encode(&compressed), hex::encode(&expected));
    }

    #[test]
    fn text_flag() {
        let summary = write(b"plain", Options::default(), io::sink()).unwrap();
        assert_eq!(summary.flags, Flags::TEXT | Flags::LENGTH);

        let summary = write(&[0xff, 0xfe], Options::default(), io::sink()).unwrap();
        assert_eq!(summary.flags, Flags::LENGTH);
    }

    #[test]
    fn empty_input() {
        let e = write(b"", Options::default(), io::sink()).unwrap_err();
        assert_eq!(e.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn bad_magic() {
        let mut compressed = compress(b"abc", Options::default());
        compressed[0] = b'X';
        let e = read(Cursor::new(compressed)).unwrap_err();
        assert_eq!(e.kind(), io::ErrorKind::InvalidData);
        assert!(e.to_string().contains("magic"));
    }

    #[test]
    fn truncated() {
        let compressed = compress(b"Hello world!", Options::default());
        for len in [3, 10, compressed.len() - 6, compressed.len() - 1] {
            assert!(read(Cursor::new(&compressed[..len])).is_err(), "len {len}");
        }
    }

    #[test]
    fn trailing_garbage() {
        let mut compressed = compress(b"Hello world!", Options::default());
        compressed.push(0);
        assert!(read(Cursor::new(compressed)).is_err());
    }

    #[test]
    fn wrong_length_footer() {
        let mut compressed = compress(b"Hello world!", Options::default());
        let n = compressed.len();
        compressed[n - 4] ^= 1;
        let e = read(Cursor::new(compressed)).unwrap_err();
        assert!(e.to_string().contains("footer"));
    }

    #[test]
    fn duplicate_symbol() {
        let mut compressed = compress(b"ab", Options::default());
        // Overwrite the second symbol with the first.
        compressed[7 + 9] = b'a';
        let e = read(Cursor::new(compressed)).unwrap_err();
        assert!(e.to_string().contains("more than once"));
    }

    /// Everything up to and including the bit count.
    fn header(flag_byte: u8, counts: &[(u8, u64)], bit_count: u64) -> Vec<u8> {
        let mut out = vec![];
        out.extend_from_slice(&MAGIC);
        out.push(flag_byte);
        out.extend_from_slice(&(counts.len() as u16).to_le_bytes());
        for &(symbol, count) in counts {
            out.push(symbol);
            out.extend_from_slice(&count.to_le_bytes());
        }
        out.extend_from_slice(&bit_count.to_le_bytes());
        out
    }

    #[test_case(0b_0000_0100)]
    #[test_case(0b_1000_0001)]
    fn reserved_flag_bits(flag_byte: u8) {
        let mut compressed = compress(b"abc", Options::default());
        compressed[4] = flag_byte;
        let e = read(Cursor::new(compressed)).unwrap_err();
        assert_eq!(e.kind(), io::ErrorKind::InvalidData);
        assert!(e.to_string().contains("reserved bit"));
    }

    #[test]
    fn bit_count_mismatch() {
        // c = 0, a = 10, b = 11: "abc" takes 5 bits.
        let mut input = header(0, &[(b'a', 1), (b'b', 1), (b'c', 1)], 6);
        input.push(0b_1011_0000);

        let e = read(Cursor::new(input)).unwrap_err();
        assert_eq!(e.kind(), io::ErrorKind::InvalidData);
        assert!(e.to_string().contains("bit count 6"));
    }

    /// Counts summing to `usize::MAX` with one-bit codes imply a bit count of
    /// `u64::MAX`; there is no payload to back it.
    #[cfg(target_pointer_width = "64")]
    #[test]
    fn huge_counts_without_payload() {
        let input = header(0, &[(b'a', 1 << 63), (b'b', (1 << 63) - 1)], u64::MAX);

        let e = read(Cursor::new(input)).unwrap_err();
        assert_eq!(e.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn counts_overflow() {
        let input = header(0, &[(b'a', u64::MAX), (b'b', 1)], 0);

        let e = read(Cursor::new(input)).unwrap_err();
        assert!(e.to_string().contains("overflow"));
    }
}
