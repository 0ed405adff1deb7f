//! Identity-preserving tree rewriting.
//!
//! Everything here is built on [`Node::map_children`]: a pass that changes
//! nothing returns the very instance it was given, so fixpoint loops can
//! stop on [`Node::ptr_eq`] without comparing trees.

use crate::node::{Node, NodeKind};
use crate::symbol::Symbol;
use std::collections::HashMap;

/// Cheap "unchanged" check used by [`map_or_none`].
pub trait Same {
    fn same(&self, other: &Self) -> bool;
}

impl Same for Node {
    /// Nodes are unchanged only when they are the same instance.
    fn same(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Same for Symbol {
    fn same(&self, other: &Self) -> bool {
        self == other
    }
}

/// Apply `f` to every item. Returns `None` when every output is the same as
/// its input, otherwise the full mapped sequence.
///
/// Nothing is allocated until the first changed item.
pub fn map_or_none<T, F>(items: &[T], mut f: F) -> Option<Vec<T>>
where
    T: Same + Clone,
    F: FnMut(&T) -> T,
{
    let mut mapped: Option<Vec<T>> = None;
    for (i, item) in items.iter().enumerate() {
        let out = f(item);
        match mapped.as_mut() {
            Some(acc) => acc.push(out),
            None if !out.same(item) => {
                let mut acc = Vec::with_capacity(items.len());
                acc.extend_from_slice(&items[..i]);
                acc.push(out);
                mapped = Some(acc);
            }
            None => {}
        }
    }
    mapped
}

fn replace_in<F>(node: &Node, f: &mut F) -> Node
where
    F: FnMut(&Node) -> Option<Node>,
{
    match f(node) {
        Some(replacement) => replacement,
        None => node.map_children(|child| replace_in(child, f)),
    }
}

fn transform_up_in<F>(node: &Node, f: &mut F) -> Node
where
    F: FnMut(&Node) -> Node,
{
    let rebuilt = node.map_children(|child| transform_up_in(child, f));
    f(&rebuilt)
}

fn for_each_in<F>(node: &Node, f: &mut F)
where
    F: FnMut(&Node),
{
    f(node);
    for child in node.children() {
        for_each_in(&child, f);
    }
}

impl Node {
    /// Top-down replacement. Where `f` returns a node the subtree is
    /// swapped for it and not visited further; elsewhere the walk descends.
    pub fn replace<F>(&self, mut f: F) -> Node
    where
        F: FnMut(&Node) -> Option<Node>,
    {
        let out = replace_in(self, &mut f);
        if !out.ptr_eq(self) {
            log::debug!("Replace pass changed {} tree", self.kind_name());
        }
        out
    }

    /// Bottom-up transform: children first, then `f` on the node rebuilt
    /// from them.
    pub fn transform_up<F>(&self, mut f: F) -> Node
    where
        F: FnMut(&Node) -> Node,
    {
        transform_up_in(self, &mut f)
    }

    /// Pre-order visit of every node in the tree.
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&Node),
    {
        for_each_in(self, &mut f);
    }

    /// Every node matching `pred`, in pre-order.
    pub fn collect<P>(&self, mut pred: P) -> Vec<Node>
    where
        P: FnMut(&Node) -> bool,
    {
        let mut found = Vec::new();
        self.for_each(|node| {
            if pred(node) {
                found.push(node.clone());
            }
        });
        found
    }
}

/// Replace every node by its delegate, bottom-up.
pub fn resolve_delegates(node: &Node) -> Node {
    node.transform_up(|n| {
        let delegate = n.delegate();
        if !delegate.ptr_eq(n) {
            log::debug!("Collapsed {} into {}", n.kind_name(), delegate.kind_name());
        }
        delegate
    })
}

/// Rename a bound variable. Only `Ref` nodes name variables; the field of a
/// `Select` and the function of an `Apply` are left alone.
fn rename_variable(node: &Node, renames: &HashMap<Symbol, Symbol>) -> Node {
    match node.kind() {
        NodeKind::Ref(_) => {
            node.map_references(|s| renames.get(s).cloned().unwrap_or_else(|| s.clone()))
        }
        _ => node.clone(),
    }
}

/// Point every variable reference found in `renames` at its new symbol.
pub fn rename_references(node: &Node, renames: &HashMap<Symbol, Symbol>) -> Node {
    if renames.is_empty() {
        return node.clone();
    }
    node.transform_up(|n| rename_variable(n, renames))
}

/// Give every binding node in the tree fresh anonymous generators and
/// rewrite variable references to match.
///
/// A symbol bound by more than one node gets a single replacement.
pub fn freshen_generators(node: &Node) -> Node {
    let mut renames: HashMap<Symbol, Symbol> = HashMap::new();
    node.for_each(|n| {
        for (symbol, _) in n.generators() {
            renames.entry(symbol).or_insert_with(Symbol::fresh);
        }
    });
    if renames.is_empty() {
        return node.clone();
    }
    log::debug!("Freshening {} generator symbols", renames.len());
    node.transform_up(|n| {
        let renamed = n.map_generators(|s| renames.get(s).cloned().unwrap_or_else(|| s.clone()));
        rename_variable(&renamed, &renames)
    })
}

#[cfg(test)]
#[path = "rewrite_test.rs"]
mod tests;
