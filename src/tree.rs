use std::fmt;

use crate::{
    frequency::FrequencyTable,
    heap::{HeapEntry, PriorityQueue},
};

/// Index of a node within its [`CodeTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node<S> {
    Leaf {
        symbol: S,
        frequency: usize,
    },
    Internal {
        frequency: usize,
        left: NodeId,
        right: NodeId,
    },
}

impl<S> Node<S> {
    pub fn frequency(&self) -> usize {
        match self {
            Node::Leaf { frequency, .. } | Node::Internal { frequency, .. } => *frequency,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }
}

/// A Huffman code tree.
///
/// Nodes are stored in an arena and refer to their children by [`NodeId`].
/// Every internal node has exactly two children, so the tree is full, and it is
/// never mutated after [`CodeTree::build`] returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTree<S> {
    nodes: Vec<Node<S>>,
    root: NodeId,
}

impl<S> CodeTree<S> {
    /// Greedily merge the two lightest nodes until one root remains.
    ///
    /// Ties are broken by push order: leaves in first-appearance order, then
    /// merged nodes in the order they were created. Returns `None` for an
    /// empty table. A table with a single symbol yields a lone leaf root.
    pub fn build(frequencies: FrequencyTable<S>) -> Option<Self> {
        let entries = frequencies.into_entries();
        if entries.is_empty() {
            return None;
        }

        let mut nodes = Vec::with_capacity(2 * entries.len() - 1);
        let mut queue = PriorityQueue::with_capacity(entries.len());
        let mut sequence = 0u64;

        for (symbol, frequency) in entries {
            let id = NodeId(nodes.len());
            nodes.push(Node::Leaf { symbol, frequency });
            queue.push(HeapEntry::new(frequency, sequence, id));
            sequence += 1;
        }

        let root = loop {
            let e1 = queue.pop()?;
            let Some(e2) = queue.pop() else {
                break e1.item;
            };

            let frequency = e1.frequency + e2.frequency;
            let id = NodeId(nodes.len());
            nodes.push(Node::Internal {
                frequency,
                left: e1.item,
                right: e2.item,
            });
            queue.push(HeapEntry::new(frequency, sequence, id));
            sequence += 1;
        };

        log::debug!(
            "built code tree: {} nodes, total weight {}",
            nodes.len(),
            nodes[root.0].frequency()
        );

        Some(Self { nodes, root })
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node<S> {
        &self.nodes[id.0]
    }

    /// Total number of nodes, leaves and internal.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Number of distinct symbols.
    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.is_leaf()).count()
    }

    /// The root's frequency; equals the length of the input the tree was built from.
    pub fn weight(&self) -> usize {
        self.node(self.root).frequency()
    }

    /// True when the whole tree is one leaf, i.e. the input had one distinct symbol.
    pub fn is_single_leaf(&self) -> bool {
        self.node(self.root).is_leaf()
    }

    /// Leaf symbols and their frequencies.
    ///
    /// Leaves are stored before any internal node, in the order their symbols
    /// first appeared, so feeding these back into [`FrequencyTable::from_counts`]
    /// and [`CodeTree::build`] reproduces this exact tree.
    pub fn leaves(&self) -> impl Iterator<Item = (&S, usize)> {
        self.nodes.iter().map_while(|node| match node {
            Node::Leaf { symbol, frequency } => Some((symbol, *frequency)),
            Node::Internal { .. } => None,
        })
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        let mut max = 0;
        let mut stack = vec![(self.root, 0)];
        while let Some((id, depth)) = stack.pop() {
            match self.node(id) {
                Node::Leaf { .. } => max = max.max(depth),
                Node::Internal { left, right, .. } => {
                    stack.push((*right, depth + 1));
                    stack.push((*left, depth + 1));
                }
            }
        }
        max
    }
}

/// Renders the tree one node per line, indented by depth.
impl<S: fmt::Debug> fmt::Display for CodeTree<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack = vec![(self.root, 0, "root")];
        while let Some((id, depth, label)) = stack.pop() {
            let indent = "  ".repeat(depth);
            match self.node(id) {
                Node::Leaf { symbol, frequency } => {
                    writeln!(f, "{indent}{label}: {symbol:?} [{frequency}]")?;
                }
                Node::Internal {
                    frequency,
                    left,
                    right,
                } => {
                    writeln!(f, "{indent}{label}: * [{frequency}]")?;
                    stack.push((*right, depth + 1, "1"));
                    stack.push((*left, depth + 1, "0"));
                }
            }
        }
        Ok(())
    }
}
