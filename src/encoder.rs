use std::hash::Hash;

use crate::{
    bits::Bits,
    code_table::CodeTable,
    errors::EncodeError,
    frequency::FrequencyTable,
    tree::CodeTree,
};

/// The output of [`encode`]: the bit sequence, and the tree needed to decode it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded<S> {
    pub bits: Bits,
    pub tree: CodeTree<S>,
}

/// Huffman-encode `data`, building the code tree from its symbol counts.
pub fn encode<S: Eq + Hash + Clone>(data: &[S]) -> Result<Encoded<S>, EncodeError> {
    let frequencies = FrequencyTable::from_symbols(data);
    let tree = CodeTree::build(frequencies).ok_or(EncodeError::EmptyInput)?;
    let table = CodeTable::generate(&tree);
    let bits = Encoder::new(&table).encode(data)?;

    log::debug!(
        "encoded {} symbols ({} distinct) into {} bits",
        data.len(),
        table.len(),
        bits.len()
    );

    Ok(Encoded { bits, tree })
}

/// Maps symbols to their codes and concatenates the results.
pub struct Encoder<'t, S: Eq + Hash> {
    table: &'t CodeTable<S>,
}

impl<'t, S: Eq + Hash + Clone> Encoder<'t, S> {
    pub fn new(table: &'t CodeTable<S>) -> Self {
        Self { table }
    }

    pub fn encode(&self, data: &[S]) -> Result<Bits, EncodeError> {
        let mut bits = Bits::new();
        self.encode_into(data, &mut bits)?;
        Ok(bits)
    }

    /// Append the codes for `data` to `out`.
    ///
    /// On error, `out` is left holding the codes of the symbols before the
    /// unknown one.
    pub fn encode_into(&self, data: &[S], out: &mut Bits) -> Result<(), EncodeError> {
        for (position, symbol) in data.iter().enumerate() {
            let code = self
                .table
                .get(symbol)
                .ok_or(EncodeError::UnknownSymbol { position })?;
            out.extend_from_bitslice(code);
        }
        Ok(())
    }
}
