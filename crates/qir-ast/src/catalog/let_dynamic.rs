//! Mutually visible named definitions in scope for a body.

use crate::node::capability::DefNode;
use crate::node::shape::{check_arity, check_generator_count, Describe, Shape};
use crate::node::Node;
use crate::symbol::Symbol;
use serde::Serialize;

/// `let s1 = d1, s2 = d2, ... in body`.
///
/// Every definition sees every other one, in any order. Cycles among the
/// definitions are not detected here; a separate pass rejects them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct LetDynamic {
    pub defs: Vec<(Symbol, Node)>,
    pub body: Node,
}

impl LetDynamic {
    pub fn new(defs: Vec<(Symbol, Node)>, body: Node) -> Self {
        Self { defs, body }
    }

    /// Definition bound to `symbol`
    pub fn definition(&self, symbol: &Symbol) -> Option<&Node> {
        self.defs.iter().find(|(s, _)| s == symbol).map(|(_, n)| n)
    }
}

impl Shape for LetDynamic {
    fn children(&self) -> Vec<Node> {
        self.defs
            .iter()
            .map(|(_, n)| n.clone())
            .chain(std::iter::once(self.body.clone()))
            .collect()
    }

    fn rebuild(&self, mut children: Vec<Node>) -> Self {
        check_arity("LetDynamic", self.defs.len() + 1, children.len());
        let body = children.pop().unwrap_or_else(|| self.body.clone());
        let defs = self
            .defs
            .iter()
            .map(|(s, _)| s.clone())
            .zip(children)
            .collect();
        Self::new(defs, body)
    }
}

impl Describe for LetDynamic {
    fn kind_name(&self) -> &'static str {
        "LetDynamic"
    }

    fn child_names(&self) -> Vec<String> {
        self.defs
            .iter()
            .map(|(s, _)| format!("let {s}"))
            .chain(std::iter::once("in".to_string()))
            .collect()
    }
}

impl DefNode for LetDynamic {
    fn generators(&self) -> Vec<(Symbol, Node)> {
        self.defs.clone()
    }

    fn with_generators(&self, symbols: &[Symbol]) -> Self {
        check_generator_count("LetDynamic", self.defs.len(), symbols.len());
        let defs = symbols
            .iter()
            .cloned()
            .zip(self.defs.iter().map(|(_, n)| n.clone()))
            .collect();
        Self::new(defs, self.body.clone())
    }
}
