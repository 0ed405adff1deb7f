//! Symbols: the identifiers that bind and reference values inside a tree.

use crate::node::Node;
use qir_core::{FieldName, FunctionName, TableName};
use serde::{Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};

/// Next id handed out by [`AnonSymbol::fresh`].
///
/// Initialized once at process start and only ever incremented; ids are
/// never reused.
static NEXT_ANON_ID: AtomicU64 = AtomicU64::new(1);

/// An identifier used to bind or reference a value in the tree.
///
/// | variant     | equality           | rendering        |
/// |-------------|--------------------|------------------|
/// | `Anon`      | allocation id      | `@7`             |
/// | `Table`     | table name         | `raw.orders`     |
/// | `Field`     | field name         | `amount`         |
/// | `Element`   | 1-based position   | `_2`             |
/// | `Function`  | function name      | `count`          |
/// | `Intrinsic` | node identity      | `/Filter@7f..`   |
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// Generated symbol, unique for the lifetime of the process
    Anon(AnonSymbol),
    /// Symbol naming a table
    Table(TableName),
    /// Symbol naming a record field or column
    Field(FieldName),
    /// Positional element of a product, starting at 1
    Element(usize),
    /// Function or operator identity
    Function(FunctionName),
    /// Symbol derived from the identity of one node instance
    Intrinsic(IntrinsicSymbol),
}

impl Symbol {
    /// Allocate a fresh anonymous symbol.
    pub fn fresh() -> Self {
        Symbol::Anon(AnonSymbol::fresh())
    }

    /// Symbol for a table name.
    pub fn table(name: impl Into<String>) -> Self {
        Symbol::Table(TableName::new(name))
    }

    /// Symbol for a field name.
    pub fn field(name: impl Into<String>) -> Self {
        Symbol::Field(FieldName::new(name))
    }

    /// Symbol for the `index`-th (1-based) element of a product.
    pub fn element(index: usize) -> Self {
        assert!(index > 0, "element symbols are 1-based");
        Symbol::Element(index)
    }

    /// Symbol for a function or operator.
    pub fn function(name: impl Into<String>) -> Self {
        Symbol::Function(FunctionName::new(name))
    }

    /// Returns true for generated symbols.
    pub fn is_anon(&self) -> bool {
        matches!(self, Symbol::Anon(_))
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Anon(anon) => write!(f, "{anon}"),
            Symbol::Table(name) => write!(f, "{name}"),
            Symbol::Field(name) => write!(f, "{name}"),
            Symbol::Element(index) => write!(f, "_{index}"),
            Symbol::Function(name) => write!(f, "{name}"),
            Symbol::Intrinsic(intrinsic) => write!(f, "{intrinsic}"),
        }
    }
}

impl Serialize for Symbol {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A generated symbol identified by a process-wide allocation counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnonSymbol(u64);

impl AnonSymbol {
    /// Allocate the next id. Safe to call from any thread.
    pub fn fresh() -> Self {
        AnonSymbol(NEXT_ANON_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// The allocation id
    pub fn id(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for AnonSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

/// A symbol standing for one specific node instance.
///
/// Lets a node act as its own binder. Two intrinsic symbols are equal only
/// when they wrap the same instance; structurally equal copies do not count.
#[derive(Clone)]
pub struct IntrinsicSymbol(Node);

impl IntrinsicSymbol {
    pub(crate) fn new(target: Node) -> Self {
        IntrinsicSymbol(target)
    }

    /// The node this symbol was derived from
    pub fn target(&self) -> &Node {
        &self.0
    }
}

impl PartialEq for IntrinsicSymbol {
    fn eq(&self, other: &Self) -> bool {
        self.0.ptr_eq(&other.0)
    }
}

impl Eq for IntrinsicSymbol {}

impl Hash for IntrinsicSymbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.addr().hash(state);
    }
}

impl fmt::Display for IntrinsicSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}@{:x}", self.0.kind_name(), self.0.addr())
    }
}

impl fmt::Debug for IntrinsicSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IntrinsicSymbol({self})")
    }
}

#[cfg(test)]
#[path = "symbol_test.rs"]
mod tests;
