//! Canonical form of field-selection chains.
//!
//! `Ref(s)` is the path `[s]` and `Select(p, f)` is `f :: p`, so a [`Path`]
//! lists symbols outermost selection first and the root reference last.
//! [`FwdPath`] is the same chain in reading order, root first.

use crate::catalog::{Ref, Select};
use crate::node::{Node, NodeKind};
use crate::symbol::Symbol;

/// Chain of selections, outermost field first.
pub struct Path;

impl Path {
    /// Build the nested selection for `symbols`. The last symbol becomes the
    /// innermost [`Ref`].
    ///
    /// # Panics
    ///
    /// When `symbols` is empty.
    pub fn construct(symbols: &[Symbol]) -> Node {
        let (root, fields) = symbols
            .split_last()
            .unwrap_or_else(|| panic!("a path needs at least one symbol"));
        fields
            .iter()
            .rev()
            .fold(Node::from(Ref::new(root.clone())), |input, field| {
                Node::from(Select::over(input, field.clone()))
            })
    }

    /// Symbols of a selection chain, or `None` when some level is neither a
    /// `Select` nor a terminal `Ref`.
    pub fn deconstruct(node: &Node) -> Option<Vec<Symbol>> {
        let mut symbols = Vec::new();
        let mut current = node.clone();
        loop {
            let next = match current.kind() {
                NodeKind::Ref(r) => {
                    symbols.push(r.symbol.clone());
                    return Some(symbols);
                }
                NodeKind::Select(select) => {
                    symbols.push(select.field().clone());
                    select.input().clone()
                }
                _ => return None,
            };
            current = next;
        }
    }

    /// `root.a.b` rendering of a path
    pub fn render(symbols: &[Symbol]) -> String {
        symbols
            .iter()
            .rev()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(".")
    }
}

/// Chain of selections in reading order, root reference first.
pub struct FwdPath;

impl FwdPath {
    /// # Panics
    ///
    /// When `symbols` is empty.
    pub fn construct(symbols: &[Symbol]) -> Node {
        let reversed: Vec<Symbol> = symbols.iter().rev().cloned().collect();
        Path::construct(&reversed)
    }

    pub fn deconstruct(node: &Node) -> Option<Vec<Symbol>> {
        Path::deconstruct(node).map(|mut symbols| {
            symbols.reverse();
            symbols
        })
    }
}
