//! Deterministic Huffman tree construction.
//!
//! Nodes live in one arena. Children are referenced by index and every node
//! keeps the index of its parent, which is only followed to derive codes.

use super::code::Code;
use crate::common::MAX_CODE_BITS;
use alloc::collections::BinaryHeap;
use alloc::vec::Vec;
use core::cmp::Reverse;

pub(crate) type NodeId = usize;

/// Marks the end of an encoded sequence inside a byte aligned stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopSymbol<T> {
    /// A stop symbol that is not a value of `T` at all. Never collides with the table.
    Null,
    /// A designated value of `T`. It must not be a key of the frequency table.
    Value(T),
}

impl<T> StopSymbol<T> {
    pub fn as_value(&self) -> Option<&T> {
        match self {
            StopSymbol::Null => None,
            StopSymbol::Value(symbol) => Some(symbol),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum HuffmanTreeError {
    StopSymbolInTable,
    NoSymbols,
    DuplicateSymbol { position: usize },
    FrequencyOverflow,
    CodeTooLong { limit: u32 },
}

#[cfg(feature = "std")]
impl std::error::Error for HuffmanTreeError {}

impl core::fmt::Display for HuffmanTreeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            HuffmanTreeError::StopSymbolInTable => {
                write!(f, "The stop symbol must not be part of the frequency table")
            }
            HuffmanTreeError::NoSymbols => {
                write!(
                    f,
                    "Can't build a huffman tree without any symbol of positive frequency"
                )
            }
            HuffmanTreeError::DuplicateSymbol { position } => {
                write!(
                    f,
                    "Symbol at position {} appears more than once in the frequency table",
                    position,
                )
            }
            HuffmanTreeError::FrequencyOverflow => {
                write!(f, "Sum of all frequencies does not fit into 64 bits")
            }
            HuffmanTreeError::CodeTooLong { limit } => {
                write!(
                    f,
                    "Frequency table produces a code longer than {} bits",
                    limit,
                )
            }
        }
    }
}

pub(crate) enum NodeKind<T> {
    /// `symbol` is `None` for the stop leaf.
    Leaf { symbol: Option<T>, code: Code },
    Branch { zero: NodeId, one: NodeId },
}

pub(crate) struct Node<T> {
    pub frequency: u64,
    /// Orders nodes of equal frequency. Assigned once, strictly increasing.
    pub tie_breaker: u64,
    pub parent: Option<NodeId>,
    pub kind: NodeKind<T>,
}

impl<T> Node<T> {
    fn leaf(symbol: Option<T>, frequency: u64, tie_breaker: u64) -> Self {
        Node {
            frequency,
            tie_breaker,
            parent: None,
            kind: NodeKind::Leaf {
                symbol,
                code: Code::EMPTY,
            },
        }
    }

    fn priority(&self, id: NodeId) -> Reverse<(u64, u64, NodeId)> {
        Reverse((self.frequency, self.tie_breaker, id))
    }
}

pub(crate) struct HuffmanTree<T> {
    pub nodes: Vec<Node<T>>,
    pub root: NodeId,
    pub stop_leaf: NodeId,
    pub max_code_len: u8,
}

impl<T> HuffmanTree<T> {
    /// Build the tree from `(symbol, frequency)` pairs that are already sorted
    /// by symbol and have a positive frequency.
    ///
    /// Leaves get their tie-breakers in input order, the stop leaf comes after
    /// them, and each new branch gets the next counter value. The first node
    /// taken from the queue becomes the one-child, the second the zero-child.
    pub fn build(sorted_frequencies: impl IntoIterator<Item = (T, u64)>) -> Result<Self, HuffmanTreeError> {
        let sorted_frequencies = sorted_frequencies.into_iter();
        let mut nodes: Vec<Node<T>> = Vec::with_capacity(sorted_frequencies.size_hint().0 * 2 + 1);
        for (symbol, frequency) in sorted_frequencies {
            debug_assert!(frequency > 0);
            let id = nodes.len();
            nodes.push(Node::leaf(Some(symbol), frequency, id as u64));
        }
        if nodes.is_empty() {
            return Err(HuffmanTreeError::NoSymbols);
        }

        let stop_leaf = nodes.len();
        nodes.push(Node::leaf(None, 0, stop_leaf as u64));
        let num_leaves = nodes.len();

        let mut queue: BinaryHeap<_> = nodes
            .iter()
            .enumerate()
            .map(|(id, node)| node.priority(id))
            .collect();

        let root = loop {
            let Some(Reverse((first_freq, _, first))) = queue.pop() else {
                return Err(HuffmanTreeError::NoSymbols);
            };
            let Some(Reverse((second_freq, _, second))) = queue.pop() else {
                break first;
            };

            let frequency = first_freq
                .checked_add(second_freq)
                .ok_or(HuffmanTreeError::FrequencyOverflow)?;
            let id = nodes.len();
            nodes[first].parent = Some(id);
            nodes[second].parent = Some(id);
            nodes.push(Node {
                frequency,
                tie_breaker: id as u64,
                parent: None,
                kind: NodeKind::Branch {
                    zero: second,
                    one: first,
                },
            });
            queue.push(nodes[id].priority(id));
        };

        let mut tree = HuffmanTree {
            nodes,
            root,
            stop_leaf,
            max_code_len: 0,
        };

        let codes = (0..num_leaves)
            .map(|leaf| tree.derive_code(leaf))
            .collect::<Result<Vec<_>, _>>()?;
        for (leaf, new_code) in codes.into_iter().enumerate() {
            tree.max_code_len = tree.max_code_len.max(new_code.len);
            if let NodeKind::Leaf { code, .. } = &mut tree.nodes[leaf].kind {
                *code = new_code;
            }
        }

        vprintln!(
            "Built huffman tree: {} leaves, {} nodes, longest code {} bits",
            num_leaves,
            tree.nodes.len(),
            tree.max_code_len
        );
        Ok(tree)
    }

    /// Walk from `leaf` up to the root, prepending a `1` whenever the current
    /// node is its parent's one-child.
    pub fn derive_code(&self, leaf: NodeId) -> Result<Code, HuffmanTreeError> {
        let mut code = Code::EMPTY;
        let mut current = leaf;
        while let Some(parent) = self.nodes[current].parent {
            let one = matches!(self.nodes[parent].kind, NodeKind::Branch { one, .. } if one == current);
            code = code.prepend(one).ok_or(HuffmanTreeError::CodeTooLong {
                limit: MAX_CODE_BITS,
            })?;
            current = parent;
        }
        Ok(code)
    }

    /// The cached code of a leaf. Branches have no code.
    pub fn code(&self, id: NodeId) -> Option<Code> {
        match &self.nodes[id].kind {
            NodeKind::Leaf { code, .. } => Some(*code),
            NodeKind::Branch { .. } => None,
        }
    }

    pub fn num_leaves(&self) -> usize {
        self.stop_leaf + 1
    }
}
