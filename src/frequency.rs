use std::{
    collections::{HashMap, HashSet},
    hash::Hash,
};

/// Occurrence counts of each distinct symbol in some input.
///
/// Symbols are kept in the order they first appeared. That order is what the
/// tree builder uses to break ties between equal counts, so two tables built
/// from the same data always produce the same tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable<S> {
    entries: Vec<(S, usize)>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrequencyError {
    #[error("symbol #{index} has a count of zero")]
    ZeroCount { index: usize },

    #[error("symbol #{index} appears more than once")]
    Duplicate { index: usize },

    #[error("counts overflow at symbol #{index}")]
    TotalOverflow { index: usize },
}

impl<S: Eq + Hash + Clone> FrequencyTable<S> {
    /// Count every symbol in `data`.
    pub fn from_symbols(data: &[S]) -> Self {
        let mut index: HashMap<S, usize> = HashMap::new();
        let mut entries: Vec<(S, usize)> = Vec::new();

        for symbol in data {
            match index.get(symbol) {
                Some(&i) => entries[i].1 += 1,
                None => {
                    index.insert(symbol.clone(), entries.len());
                    entries.push((symbol.clone(), 1));
                }
            }
        }

        Self { entries }
    }

    /// Build a table from pre-computed counts, kept in the given order.
    ///
    /// The counts must sum to at most `usize::MAX`, the same bound a table
    /// counted from real data has.
    pub fn from_counts(counts: impl IntoIterator<Item = (S, usize)>) -> Result<Self, FrequencyError> {
        let mut seen = HashSet::new();
        let mut entries = Vec::new();
        let mut total = 0usize;

        for (index, (symbol, count)) in counts.into_iter().enumerate() {
            if count == 0 {
                return Err(FrequencyError::ZeroCount { index });
            }
            total = total
                .checked_add(count)
                .ok_or(FrequencyError::TotalOverflow { index })?;
            if !seen.insert(symbol.clone()) {
                return Err(FrequencyError::Duplicate { index });
            }
            entries.push((symbol, count));
        }

        Ok(Self { entries })
    }

    pub fn count(&self, symbol: &S) -> Option<usize> {
        self.entries
            .iter()
            .find(|(s, _)| s == symbol)
            .map(|&(_, count)| count)
    }
}

impl<S> FrequencyTable<S> {
    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts, i.e. the length of the counted input.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|&(_, count)| count).sum()
    }

    /// Entries in first-appearance order.
    pub fn iter(&self) -> impl Iterator<Item = (&S, usize)> {
        self.entries.iter().map(|(s, count)| (s, *count))
    }

    pub(crate) fn into_entries(self) -> Vec<(S, usize)> {
        self.entries
    }
}
