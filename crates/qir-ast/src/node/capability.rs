//! Binding and typing capabilities, orthogonal to shape.

use super::shape::Shape;
use super::Node;
use crate::symbol::Symbol;
use qir_core::SqlType;

/// A node that introduces symbol bindings over some of its children.
pub trait DefNode: Shape {
    /// `(symbol, node the symbol ranges over)` pairs, in declaration order.
    fn generators(&self) -> Vec<(Symbol, Node)>;

    /// The same node with generator symbols replaced in order by
    /// `symbols`; children and every other attribute stay put.
    ///
    /// # Panics
    ///
    /// When `symbols.len()` differs from `generators().len()`.
    fn with_generators(&self, symbols: &[Symbol]) -> Self;
}

/// A node that references exactly one symbol.
pub trait RefNode {
    fn reference(&self) -> &Symbol;
    fn with_reference(&self, symbol: Symbol) -> Self;
}

/// A node whose result type is part of its own attributes.
pub trait TypedNode {
    fn sql_type(&self) -> SqlType;
}
