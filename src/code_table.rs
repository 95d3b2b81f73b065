use std::{collections::HashMap, hash::Hash};

use bitvec::prelude::*;

use crate::{
    bits::{BitStr, Bits},
    tree::{CodeTree, Node},
};

/// Maps every symbol of a [`CodeTree`] to its code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable<S: Eq + Hash> {
    codes: HashMap<S, Bits>,
}

impl<S: Eq + Hash + Clone> CodeTable<S> {
    /// Walk the tree depth-first, appending `0` for each left branch and `1`
    /// for each right branch on the way down to a leaf.
    ///
    /// A tree consisting of a single leaf gets the one-bit code `0` for its
    /// symbol, so that every symbol costs at least one bit.
    pub fn generate(tree: &CodeTree<S>) -> Self {
        let mut codes = HashMap::with_capacity(tree.leaf_count());

        if let Node::Leaf { symbol, .. } = tree.node(tree.root()) {
            codes.insert(symbol.clone(), bitvec![u8, Msb0; 0]);
            return Self { codes };
        }

        let mut stack = vec![(tree.root(), Bits::new())];
        while let Some((id, code)) = stack.pop() {
            match tree.node(id) {
                Node::Leaf { symbol, .. } => {
                    codes.insert(symbol.clone(), code);
                }
                Node::Internal { left, right, .. } => {
                    let mut right_code = code.clone();
                    right_code.push(true);
                    stack.push((*right, right_code));

                    let mut left_code = code;
                    left_code.push(false);
                    stack.push((*left, left_code));
                }
            }
        }

        log::trace!("generated {} codes", codes.len());
        Self { codes }
    }

    pub fn get(&self, symbol: &S) -> Option<&BitStr> {
        self.codes.get(symbol).map(|code| code.as_bitslice())
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// All `(symbol, code)` pairs, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&S, &BitStr)> {
        self.codes.iter().map(|(s, code)| (s, code.as_bitslice()))
    }

    /// Sum of `count * code length` over the given symbol counts, or `None`
    /// if it doesn't fit in a `usize`. Symbols without a code are skipped.
    pub fn encoded_len<'a>(
        &self,
        counts: impl IntoIterator<Item = (&'a S, usize)>,
    ) -> Option<usize>
    where
        S: 'a,
    {
        counts
            .into_iter()
            .filter_map(|(s, count)| self.get(s).map(|code| (code.len(), count)))
            .try_fold(0usize, |total, (len, count)| {
                total.checked_add(len.checked_mul(count)?)
            })
    }
}

#[cfg(test)]
mod tests {
    use crate::{bits::to_bit_string, frequency::FrequencyTable};

    use super::*;

    fn table_of(text: &str) -> CodeTable<char> {
        let data: Vec<char> = text.chars().collect();
        let tree = CodeTree::build(FrequencyTable::from_symbols(&data)).unwrap();
        CodeTable::generate(&tree)
    }

    fn as_strings(table: &CodeTable<char>) -> HashMap<char, String> {
        table
            .iter()
            .map(|(&c, code)| (c, to_bit_string(code)))
            .collect()
    }

    #[test]
    fn bird_sentence_codes() {
        let expected: HashMap<char, String> = [
            ('i', "000"),
            ('r', "001"),
            ('d', "010"),
            ('s', "0110"),
            ('w', "0111"),
            ('t', "1000"),
            ('o', "1001"),
            ('T', "1010"),
            ('b', "1011"),
            (' ', "110"),
            ('h', "1110"),
            ('e', "1111"),
        ]
        .into_iter()
        .map(|(c, code)| (c, code.to_string()))
        .collect();

        assert_eq!(as_strings(&table_of("The bird is the word")), expected);
    }

    #[test]
    fn single_symbol_gets_one_bit() {
        let table = table_of("aaaa");
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(&'a').map(to_bit_string).as_deref(), Some("0"));
    }

    #[test]
    fn prefix_free() {
        let table = table_of("it was the best of times, it was the worst of times");
        let codes: Vec<_> = table.iter().map(|(_, code)| code).collect();

        for (i, a) in codes.iter().enumerate() {
            for (j, b) in codes.iter().enumerate() {
                if i != j {
                    assert!(
                        !b.starts_with(*a),
                        "{} is a prefix of {}",
                        to_bit_string(a),
                        to_bit_string(b)
                    );
                }
            }
        }
    }

    #[test]
    fn deterministic() {
        let text = "mississippi river";
        assert_eq!(table_of(text), table_of(text));
    }

    #[test]
    fn encoded_len_matches_weighted_depths() {
        let data: Vec<char> = "aabbbc".chars().collect();
        let frequencies = FrequencyTable::from_symbols(&data);
        let table = CodeTable::generate(&CodeTree::build(frequencies.clone()).unwrap());

        // b = 0, c = 10, a = 11
        assert_eq!(table.encoded_len(frequencies.iter()), Some(3 + 2 + 4));
        assert_eq!(table.encoded_len([(&'a', usize::MAX)]), None);
    }
}
