//! Decision nodes and node references
//!
//! Node references are encoded as signed integers on the wire:
//!
//! | encoded value            | meaning                                     |
//! |--------------------------|---------------------------------------------|
//! | `1`                      | TRUE terminal                               |
//! | `-1`                     | FALSE terminal                              |
//! | `2 ..= 99_999_999`       | decision node `nodes[k - 2]`                |
//! | `-2 ..= -99_999_999`     | complement edge to node `nodes[-k - 2]`     |
//! | `>= 100_000_000`         | result terminal `results[k - 100_000_000]`  |
//!
//! `0` is never valid. Following a complement edge swaps the node's high and
//! low children.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};

/// First encoded value that denotes a result terminal
pub const RESULT_REF_OFFSET: i64 = 100_000_000;

/// Reference to a node or terminal in the diagram
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum NodeRef {
    /// TRUE terminal
    True,
    /// FALSE ("no match") terminal
    False,
    /// Decision node, optionally through a complement edge
    Node { index: usize, complement: bool },
    /// Result terminal
    Result(usize),
}

impl NodeRef {
    /// Plain reference to a decision node
    pub fn node(index: usize) -> Self {
        NodeRef::Node {
            index,
            complement: false,
        }
    }

    /// Complemented reference to a decision node
    pub fn complement(index: usize) -> Self {
        NodeRef::Node {
            index,
            complement: true,
        }
    }

    pub fn decode(encoded: i64) -> Result<Self> {
        match encoded {
            0 => Err(CoreError::InvalidNodeRef(encoded)),
            1 => Ok(NodeRef::True),
            -1 => Ok(NodeRef::False),
            k if k >= RESULT_REF_OFFSET => Ok(NodeRef::Result((k - RESULT_REF_OFFSET) as usize)),
            k if k <= -RESULT_REF_OFFSET => Err(CoreError::InvalidNodeRef(encoded)),
            k if k > 0 => Ok(NodeRef::node((k - 2) as usize)),
            k => Ok(NodeRef::complement((-k - 2) as usize)),
        }
    }

    pub fn encode(&self) -> i64 {
        match self {
            NodeRef::True => 1,
            NodeRef::False => -1,
            NodeRef::Node {
                index,
                complement: false,
            } => *index as i64 + 2,
            NodeRef::Node {
                index,
                complement: true,
            } => -(*index as i64 + 2),
            NodeRef::Result(index) => *index as i64 + RESULT_REF_OFFSET,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, NodeRef::Node { .. })
    }
}

impl TryFrom<i64> for NodeRef {
    type Error = CoreError;

    fn try_from(encoded: i64) -> Result<Self> {
        NodeRef::decode(encoded)
    }
}

impl From<NodeRef> for i64 {
    fn from(node_ref: NodeRef) -> Self {
        node_ref.encode()
    }
}

/// A decision node: test one condition, branch high on true and low on false
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "[i64; 3]", into = "[i64; 3]")]
pub struct DecisionNode {
    pub condition_index: usize,
    pub high: NodeRef,
    pub low: NodeRef,
}

impl DecisionNode {
    pub fn new(condition_index: usize, high: NodeRef, low: NodeRef) -> Self {
        Self {
            condition_index,
            high,
            low,
        }
    }

    /// The child to follow for `outcome`, honouring a complement edge
    pub fn branch(&self, outcome: bool, complement: bool) -> NodeRef {
        if outcome != complement {
            self.high
        } else {
            self.low
        }
    }
}

impl TryFrom<[i64; 3]> for DecisionNode {
    type Error = CoreError;

    fn try_from([condition, high, low]: [i64; 3]) -> Result<Self> {
        let condition_index =
            usize::try_from(condition).map_err(|_| CoreError::InvalidNodeRef(condition))?;
        Ok(Self {
            condition_index,
            high: NodeRef::decode(high)?,
            low: NodeRef::decode(low)?,
        })
    }
}

impl From<DecisionNode> for [i64; 3] {
    fn from(node: DecisionNode) -> Self {
        [
            node.condition_index as i64,
            node.high.encode(),
            node.low.encode(),
        ]
    }
}
