use crate::{
    bits::BitStr,
    errors::DecodeError,
    tree::{CodeTree, Node, NodeId},
};

/// Decode `bits` using the same tree they were encoded with.
pub fn decode<S: Clone>(bits: &BitStr, tree: &CodeTree<S>) -> Result<Vec<S>, DecodeError> {
    Decoder::new(tree).decode(bits)
}

/// Walks a [`CodeTree`] one bit at a time.
pub struct Decoder<'t, S> {
    tree: &'t CodeTree<S>,
}

impl<'t, S: Clone> Decoder<'t, S> {
    pub fn new(tree: &'t CodeTree<S>) -> Self {
        Self { tree }
    }

    /// Decode a complete bit sequence.
    ///
    /// Every code must be complete: if the bits end with the cursor partway
    /// down the tree, the input was truncated or corrupted, and an error is
    /// returned rather than the symbols decoded so far.
    pub fn decode(&self, bits: &BitStr) -> Result<Vec<S>, DecodeError> {
        let mut out = Vec::new();
        let mut cursor = self.tree.root();
        let mut code_start = 0;

        for (position, bit) in bits.iter().by_vals().enumerate() {
            cursor = self.step(cursor, bit, position)?;

            if let Node::Leaf { symbol, .. } = self.tree.node(cursor) {
                out.push(symbol.clone());
                cursor = self.tree.root();
                code_start = position + 1;
            }
        }

        if code_start != bits.len() {
            return Err(DecodeError::TruncatedInput {
                trailing_bits: bits.len() - code_start,
            });
        }

        log::debug!("decoded {} bits into {} symbols", bits.len(), out.len());
        Ok(out)
    }

    /// Follow one bit down from `node`.
    ///
    /// A lone-leaf tree has no branches; by convention its symbol is coded as
    /// a single `0`, which leaves the cursor on the root leaf.
    fn step(&self, node: NodeId, bit: bool, position: usize) -> Result<NodeId, DecodeError> {
        match (self.tree.node(node), bit) {
            (Node::Internal { left, .. }, false) => Ok(*left),
            (Node::Internal { right, .. }, true) => Ok(*right),
            (Node::Leaf { .. }, false) if node == self.tree.root() => Ok(node),
            (Node::Leaf { .. }, _) => Err(DecodeError::MalformedTree { position }),
        }
    }
}
