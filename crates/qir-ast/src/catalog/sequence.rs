//! Generator-only nodes producing numbers, used to synthesize row numbers.

use crate::node::capability::TypedNode;
use crate::node::shape::{nullary_shape, Describe};
use qir_core::SqlType;
use serde::Serialize;
use std::fmt;

/// An external numeric sequence
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SequenceNode {
    pub name: String,
    pub increment: i64,
}

impl SequenceNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            increment: 1,
        }
    }

    pub fn with_increment(mut self, increment: i64) -> Self {
        self.increment = increment;
        self
    }
}

nullary_shape!(SequenceNode);

impl Describe for SequenceNode {
    fn kind_name(&self) -> &'static str {
        "Sequence"
    }

    fn fmt_attrs(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, " {}", self.name)?;
        if self.increment != 1 {
            write!(f, " by {}", self.increment)?;
        }
        Ok(())
    }
}

impl TypedNode for SequenceNode {
    fn sql_type(&self) -> SqlType {
        SqlType::bigint()
    }
}

/// The infinite ascending stream `start, start + 1, ...`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RangeFrom {
    pub start: i64,
}

impl RangeFrom {
    pub fn new(start: i64) -> Self {
        Self { start }
    }
}

impl Default for RangeFrom {
    fn default() -> Self {
        Self::new(1)
    }
}

nullary_shape!(RangeFrom);

impl Describe for RangeFrom {
    fn kind_name(&self) -> &'static str {
        "RangeFrom"
    }

    fn fmt_attrs(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, " {}", self.start)
    }
}

impl TypedNode for RangeFrom {
    fn sql_type(&self) -> SqlType {
        SqlType::bigint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Node;

    #[test]
    fn test_generators_are_bigint() {
        let seq = Node::from(SequenceNode::new("order_seq"));
        let range = Node::from(RangeFrom::default());
        assert_eq!(seq.node_type(), Some(SqlType::bigint()));
        assert_eq!(range.node_type(), Some(SqlType::bigint()));
        assert!(seq.children().is_empty());
    }

    #[test]
    fn test_display() {
        assert_eq!(Node::from(RangeFrom::default()).to_string(), "RangeFrom 1");
        assert_eq!(
            Node::from(SequenceNode::new("s").with_increment(5)).to_string(),
            "Sequence s by 5"
        );
        assert_eq!(Node::from(SequenceNode::new("s")).to_string(), "Sequence s");
    }
}
