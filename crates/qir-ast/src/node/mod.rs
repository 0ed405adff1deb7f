//! The node protocol shared by every tree element.
//!
//! [`Node`] is a cheap-clone handle to an immutable [`NodeKind`]. Equality and
//! hashing are structural; [`Node::ptr_eq`] exposes instance identity, which
//! only the rewriting utilities rely on to skip rebuilding unchanged
//! subtrees.

pub mod capability;
pub mod shape;

use crate::catalog::{
    Apply, Bind, Conditional, Drop, Filter, GroupBy, IfThen, Join, LetDynamic, Literal,
    ProductNode, Pure, RangeFrom, Ref, Select, SequenceNode, SortBy, StructNode, Table,
    TableExpansion, TableRefExpansion, Take, Union,
};
use crate::rewrite::map_or_none;
use crate::symbol::{IntrinsicSymbol, Symbol};
use capability::{DefNode, RefNode, TypedNode};
use qir_core::SqlType;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use shape::{Describe, Shape};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// One variant per node kind; each variant holds exactly its attributes and child slots.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum NodeKind {
    Literal(Literal),
    Product(ProductNode),
    Struct(StructNode),
    Pure(Pure),
    Filter(Filter),
    SortBy(SortBy),
    Take(Take),
    Drop(Drop),
    GroupBy(GroupBy),
    Join(Join),
    Union(Union),
    Bind(Bind),
    Table(Table),
    TableExpansion(TableExpansion),
    TableRefExpansion(TableRefExpansion),
    Select(Select),
    Apply(Apply),
    Ref(Ref),
    LetDynamic(LetDynamic),
    Sequence(SequenceNode),
    RangeFrom(RangeFrom),
    IfThen(IfThen),
    Conditional(Conditional),
}

/// Apply `$body` to the payload of whichever variant `$kind` holds.
macro_rules! dispatch {
    ($kind:expr, $n:ident => $body:expr) => {
        match $kind {
            NodeKind::Literal($n) => $body,
            NodeKind::Product($n) => $body,
            NodeKind::Struct($n) => $body,
            NodeKind::Pure($n) => $body,
            NodeKind::Filter($n) => $body,
            NodeKind::SortBy($n) => $body,
            NodeKind::Take($n) => $body,
            NodeKind::Drop($n) => $body,
            NodeKind::GroupBy($n) => $body,
            NodeKind::Join($n) => $body,
            NodeKind::Union($n) => $body,
            NodeKind::Bind($n) => $body,
            NodeKind::Table($n) => $body,
            NodeKind::TableExpansion($n) => $body,
            NodeKind::TableRefExpansion($n) => $body,
            NodeKind::Select($n) => $body,
            NodeKind::Apply($n) => $body,
            NodeKind::Ref($n) => $body,
            NodeKind::LetDynamic($n) => $body,
            NodeKind::Sequence($n) => $body,
            NodeKind::RangeFrom($n) => $body,
            NodeKind::IfThen($n) => $body,
            NodeKind::Conditional($n) => $body,
        }
    };
}

/// Like `dispatch!`, but wraps the result back into the same variant.
macro_rules! map_variant {
    ($kind:expr, $n:ident => $body:expr) => {
        match $kind {
            NodeKind::Literal($n) => NodeKind::Literal($body),
            NodeKind::Product($n) => NodeKind::Product($body),
            NodeKind::Struct($n) => NodeKind::Struct($body),
            NodeKind::Pure($n) => NodeKind::Pure($body),
            NodeKind::Filter($n) => NodeKind::Filter($body),
            NodeKind::SortBy($n) => NodeKind::SortBy($body),
            NodeKind::Take($n) => NodeKind::Take($body),
            NodeKind::Drop($n) => NodeKind::Drop($body),
            NodeKind::GroupBy($n) => NodeKind::GroupBy($body),
            NodeKind::Join($n) => NodeKind::Join($body),
            NodeKind::Union($n) => NodeKind::Union($body),
            NodeKind::Bind($n) => NodeKind::Bind($body),
            NodeKind::Table($n) => NodeKind::Table($body),
            NodeKind::TableExpansion($n) => NodeKind::TableExpansion($body),
            NodeKind::TableRefExpansion($n) => NodeKind::TableRefExpansion($body),
            NodeKind::Select($n) => NodeKind::Select($body),
            NodeKind::Apply($n) => NodeKind::Apply($body),
            NodeKind::Ref($n) => NodeKind::Ref($body),
            NodeKind::LetDynamic($n) => NodeKind::LetDynamic($body),
            NodeKind::Sequence($n) => NodeKind::Sequence($body),
            NodeKind::RangeFrom($n) => NodeKind::RangeFrom($body),
            NodeKind::IfThen($n) => NodeKind::IfThen($body),
            NodeKind::Conditional($n) => NodeKind::Conditional($body),
        }
    };
}

/// Apply `$body` to the payload of binding variants, `$other` to the rest.
macro_rules! dispatch_def {
    ($kind:expr, $n:ident => $body:expr, _ => $other:expr) => {
        match $kind {
            NodeKind::Struct($n) => $body,
            NodeKind::Filter($n) => $body,
            NodeKind::SortBy($n) => $body,
            NodeKind::Take($n) => $body,
            NodeKind::Drop($n) => $body,
            NodeKind::GroupBy($n) => $body,
            NodeKind::Join($n) => $body,
            NodeKind::Union($n) => $body,
            NodeKind::Bind($n) => $body,
            NodeKind::TableExpansion($n) => $body,
            NodeKind::TableRefExpansion($n) => $body,
            NodeKind::LetDynamic($n) => $body,
            _ => $other,
        }
    };
}

macro_rules! impl_from_payload {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for NodeKind {
                fn from(node: $ty) -> Self {
                    NodeKind::$variant(node)
                }
            }

            impl From<$ty> for Node {
                fn from(node: $ty) -> Self {
                    Node::new(NodeKind::$variant(node))
                }
            }
        )*
    };
}

impl_from_payload!(
    Literal(Literal),
    Product(ProductNode),
    Struct(StructNode),
    Pure(Pure),
    Filter(Filter),
    SortBy(SortBy),
    Take(Take),
    Drop(Drop),
    GroupBy(GroupBy),
    Join(Join),
    Union(Union),
    Bind(Bind),
    Table(Table),
    TableExpansion(TableExpansion),
    TableRefExpansion(TableRefExpansion),
    Select(Select),
    Apply(Apply),
    Ref(Ref),
    LetDynamic(LetDynamic),
    Sequence(SequenceNode),
    RangeFrom(RangeFrom),
    IfThen(IfThen),
    Conditional(Conditional),
);

#[derive(Debug, PartialEq, Eq, Hash)]
struct NodeData {
    kind: NodeKind,
    /// Result type attached by a type checker
    ty: Option<SqlType>,
}

/// Shared, immutable handle to one tree node.
#[derive(Clone)]
pub struct Node(Arc<NodeData>);

impl Node {
    /// Wrap a node kind in a new, untyped handle.
    pub fn new(kind: impl Into<NodeKind>) -> Self {
        Node(Arc::new(NodeData {
            kind: kind.into(),
            ty: None,
        }))
    }

    /// The kind and attributes of this node
    pub fn kind(&self) -> &NodeKind {
        &self.0.kind
    }

    /// Name of the node kind (`Filter`, `Join`, ...)
    pub fn kind_name(&self) -> &'static str {
        dispatch!(self.kind(), n => n.kind_name())
    }

    /// True when both handles point at the same instance.
    pub fn ptr_eq(&self, other: &Node) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn addr(&self) -> usize {
        Arc::as_ptr(&self.0) as usize
    }

    /// Ordered children. Stable across calls.
    pub fn children(&self) -> Vec<Node> {
        dispatch!(self.kind(), n => n.children())
    }

    /// One display name per child; positions without an explicit name
    /// fall back to their index.
    pub fn child_names(&self) -> Vec<String> {
        let count = self.children().len();
        let mut names = dispatch!(self.kind(), n => n.child_names());
        names.truncate(count);
        let named = names.len();
        names.extend((named..count).map(|i| i.to_string()));
        names
    }

    /// A node of the same kind and attributes with `children` substituted.
    ///
    /// # Panics
    ///
    /// When `children` does not have exactly as many elements as
    /// [`children`](Self::children) returns.
    pub fn rebuild(&self, children: Vec<Node>) -> Node {
        Node(Arc::new(NodeData {
            kind: map_variant!(self.kind(), n => n.rebuild(children)),
            ty: self.0.ty.clone(),
        }))
    }

    /// Apply `f` to every child and rebuild, returning this very instance
    /// when `f` hands back every child unchanged.
    pub fn map_children<F>(&self, f: F) -> Node
    where
        F: FnMut(&Node) -> Node,
    {
        match map_or_none(&self.children(), f) {
            None => self.clone(),
            Some(children) => {
                log::trace!("Rebuilding {} with new children", self.kind_name());
                self.rebuild(children)
            }
        }
    }

    /// The node that should be used in place of this one.
    ///
    /// A filter whose predicate is the literal `true` delegates to its
    /// source; every other node delegates to itself. A type attached to the
    /// filter moves onto an untyped source.
    pub fn delegate(&self) -> Node {
        match self.kind() {
            NodeKind::Filter(filter) if filter.is_trivial() => {
                let source = filter.from.delegate();
                match &self.0.ty {
                    Some(ty) if source.node_type().is_none() => source.with_type(ty.clone()),
                    _ => source,
                }
            }
            _ => self.clone(),
        }
    }

    /// A symbol bound to this exact instance.
    pub fn intrinsic_symbol(&self) -> Symbol {
        Symbol::Intrinsic(IntrinsicSymbol::new(self.clone()))
    }

    /// True for a raw table entity
    pub fn is_table(&self) -> bool {
        matches!(self.kind(), NodeKind::Table(_))
    }

    // ── Typed ────────────────────────────────────────────────────────

    /// Result type of this node: intrinsic for literals and generators,
    /// otherwise whatever a type checker attached.
    pub fn node_type(&self) -> Option<SqlType> {
        match self.kind() {
            NodeKind::Literal(n) => Some(n.sql_type()),
            NodeKind::Sequence(n) => Some(n.sql_type()),
            NodeKind::RangeFrom(n) => Some(n.sql_type()),
            _ => self.0.ty.clone(),
        }
    }

    /// A copy of this node carrying `ty` as its result type.
    ///
    /// Literals change their own type; other kinds get the type attached.
    pub fn with_type(&self, ty: SqlType) -> Node {
        let data = match self.kind() {
            NodeKind::Literal(lit) => NodeData {
                kind: NodeKind::Literal(Literal::new(lit.value.clone(), ty)),
                ty: None,
            },
            other => NodeData {
                kind: other.clone(),
                ty: Some(ty),
            },
        };
        Node(Arc::new(data))
    }

    // ── DefNode ──────────────────────────────────────────────────────

    /// True for kinds that introduce bindings
    pub fn is_def_node(&self) -> bool {
        dispatch_def!(self.kind(), _n => true, _ => false)
    }

    /// `(symbol, node the symbol ranges over)` pairs this node introduces.
    /// Empty for nodes that bind nothing.
    pub fn generators(&self) -> Vec<(Symbol, Node)> {
        dispatch_def!(self.kind(), n => n.generators(), _ => Vec::new())
    }

    /// Alpha-rename: the same node with its generator symbols replaced,
    /// in order, by `symbols`.
    ///
    /// # Panics
    ///
    /// When `symbols` is not as long as [`generators`](Self::generators).
    pub fn with_generators(&self, symbols: &[Symbol]) -> Node {
        let kind = match self.kind() {
            NodeKind::Struct(n) => NodeKind::Struct(n.with_generators(symbols)),
            NodeKind::Filter(n) => NodeKind::Filter(n.with_generators(symbols)),
            NodeKind::SortBy(n) => NodeKind::SortBy(n.with_generators(symbols)),
            NodeKind::Take(n) => NodeKind::Take(n.with_generators(symbols)),
            NodeKind::Drop(n) => NodeKind::Drop(n.with_generators(symbols)),
            NodeKind::GroupBy(n) => NodeKind::GroupBy(n.with_generators(symbols)),
            NodeKind::Join(n) => NodeKind::Join(n.with_generators(symbols)),
            NodeKind::Union(n) => NodeKind::Union(n.with_generators(symbols)),
            NodeKind::Bind(n) => NodeKind::Bind(n.with_generators(symbols)),
            NodeKind::TableExpansion(n) => NodeKind::TableExpansion(n.with_generators(symbols)),
            NodeKind::TableRefExpansion(n) => {
                NodeKind::TableRefExpansion(n.with_generators(symbols))
            }
            NodeKind::LetDynamic(n) => NodeKind::LetDynamic(n.with_generators(symbols)),
            _ => {
                assert!(
                    symbols.is_empty(),
                    "{} introduces no generators, got {} replacement symbols",
                    self.kind_name(),
                    symbols.len()
                );
                return self.clone();
            }
        };
        Node(Arc::new(NodeData {
            kind,
            ty: self.0.ty.clone(),
        }))
    }

    /// Rename generators through `f`, returning this instance when no
    /// symbol changed.
    pub fn map_generators<F>(&self, f: F) -> Node
    where
        F: FnMut(&Symbol) -> Symbol,
    {
        let symbols: Vec<Symbol> = self.generators().into_iter().map(|(s, _)| s).collect();
        match map_or_none(&symbols, f) {
            None => self.clone(),
            Some(renamed) => {
                log::trace!("Renaming generators of {}", self.kind_name());
                self.with_generators(&renamed)
            }
        }
    }

    // ── RefNode ──────────────────────────────────────────────────────

    /// The symbol referenced by `Select`, `Apply` and `Ref` nodes
    pub fn reference(&self) -> Option<&Symbol> {
        match self.kind() {
            NodeKind::Select(n) => Some(n.reference()),
            NodeKind::Apply(n) => Some(n.reference()),
            NodeKind::Ref(n) => Some(n.reference()),
            _ => None,
        }
    }

    /// The same reference node pointing at `symbol`; `None` for nodes that
    /// reference nothing.
    pub fn with_reference(&self, symbol: Symbol) -> Option<Node> {
        let kind = match self.kind() {
            NodeKind::Select(n) => NodeKind::Select(n.with_reference(symbol)),
            NodeKind::Apply(n) => NodeKind::Apply(n.with_reference(symbol)),
            NodeKind::Ref(n) => NodeKind::Ref(n.with_reference(symbol)),
            _ => return None,
        };
        Some(Node(Arc::new(NodeData {
            kind,
            ty: self.0.ty.clone(),
        })))
    }

    /// Rewrite the referenced symbol through `f`, returning this instance
    /// when the symbol is unchanged or the node references nothing.
    pub fn map_references<F>(&self, f: F) -> Node
    where
        F: FnOnce(&Symbol) -> Symbol,
    {
        let Some(current) = self.reference() else {
            return self.clone();
        };
        let mapped = f(current);
        if &mapped == current {
            return self.clone();
        }
        log::trace!("Rewriting {} reference {} -> {}", self.kind_name(), current, mapped);
        self.with_reference(mapped).unwrap_or_else(|| self.clone())
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.0 == other.0
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl fmt::Display for Node {
    /// Kind name plus non-child attributes; children are left to [`crate::Dump`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        dispatch!(self.kind(), n => {
            f.write_str(n.kind_name())?;
            n.fmt_attrs(f)
        })
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0.ty {
            None => fmt::Debug::fmt(&self.0.kind, f),
            Some(ty) => write!(f, "{:?} : {}", self.0.kind, ty),
        }
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.0.ty {
            None => self.0.kind.serialize(serializer),
            Some(ty) => {
                let mut state = serializer.serialize_struct("TypedNode", 2)?;
                state.serialize_field("node", &self.0.kind)?;
                state.serialize_field("type", ty)?;
                state.end()
            }
        }
    }
}

#[cfg(test)]
#[path = "node_test.rs"]
mod tests;
