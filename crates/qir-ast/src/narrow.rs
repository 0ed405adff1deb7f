//! Converting values handed over by a query-building layer into nodes.

use crate::catalog::ProductNode;
use crate::error::{AstError, AstResult};
use crate::node::Node;
use std::fmt;
use std::sync::Arc;

/// Something that stands for a node without being one, such as a query
/// builder object.
pub trait NodeGenerator: fmt::Debug + Send + Sync {
    /// The node this value represents
    fn node_delegate(&self) -> Node;
}

/// A value that may or may not have a node representation.
#[derive(Debug, Clone)]
pub enum QueryValue {
    /// Already a node
    Node(Node),
    /// Delegates to a node
    Generator(Arc<dyn NodeGenerator>),
    /// Positional tuple, narrowed element-wise into a product
    Tuple(Vec<QueryValue>),
    /// Anything else; `kind` describes it in error messages
    Opaque { kind: String },
}

impl QueryValue {
    pub fn opaque(kind: impl Into<String>) -> Self {
        QueryValue::Opaque { kind: kind.into() }
    }
}

impl From<Node> for QueryValue {
    fn from(node: Node) -> Self {
        QueryValue::Node(node)
    }
}

impl Node {
    /// Narrow `value` to a node.
    ///
    /// Fails with [`AstError::CannotNarrow`] when `value`, or any element of
    /// a tuple, is opaque.
    pub fn narrow(value: QueryValue) -> AstResult<Node> {
        match value {
            QueryValue::Node(node) => Ok(node),
            QueryValue::Generator(generator) => Ok(generator.node_delegate()),
            QueryValue::Tuple(values) => {
                let elements = values
                    .into_iter()
                    .map(Node::narrow)
                    .collect::<AstResult<Vec<_>>>()?;
                Ok(Node::from(ProductNode::new(elements)))
            }
            QueryValue::Opaque { kind } => Err(AstError::CannotNarrow { kind }),
        }
    }
}

impl TryFrom<QueryValue> for Node {
    type Error = AstError;

    fn try_from(value: QueryValue) -> AstResult<Node> {
        Node::narrow(value)
    }
}
