//! Tables and the expansion nodes that bind them to a generator.
//!
//! A [`Table`] is a raw entity: fields cannot be selected from it directly.
//! Expansion gives the table (or a reference to one) a generator symbol and
//! pairs it with its column structure, so that selections go through the
//! generator. Expansions exist only between two compilation phases; a later
//! phase removes them again.

use crate::node::capability::DefNode;
use crate::node::shape::{binary_shape, check_generator_count, nullary_shape, BinaryNode, Describe};
use crate::node::Node;
use crate::symbol::Symbol;
use qir_core::TableName;
use serde::Serialize;
use std::fmt;

/// A database table, optionally schema-qualified
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Table {
    pub schema: Option<String>,
    pub name: TableName,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            schema: None,
            name: TableName::new(name),
        }
    }

    pub fn in_schema(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: Some(schema.into()),
            name: TableName::new(name),
        }
    }

    /// `schema.name`, or just the name when unqualified
    pub fn qualified_name(&self) -> String {
        match &self.schema {
            Some(schema) => format!("{schema}.{}", self.name),
            None => self.name.to_string(),
        }
    }

    /// Symbol naming this table
    pub fn symbol(&self) -> Symbol {
        Symbol::Table(TableName::new(self.qualified_name()))
    }
}

nullary_shape!(Table);

impl Describe for Table {
    fn kind_name(&self) -> &'static str {
        "Table"
    }

    fn fmt_attrs(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, " {}", self.qualified_name())
    }
}

/// A table bound to `generator`, alongside its column structure.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TableExpansion {
    pub generator: Symbol,
    pub table: Node,
    pub columns: Node,
}

impl TableExpansion {
    pub fn new(generator: Symbol, table: Node, columns: Node) -> Self {
        Self {
            generator,
            table,
            columns,
        }
    }
}

impl BinaryNode for TableExpansion {
    fn left(&self) -> &Node {
        &self.table
    }

    fn right(&self) -> &Node {
        &self.columns
    }

    fn with_children(&self, left: Node, right: Node) -> Self {
        Self::new(self.generator.clone(), left, right)
    }
}

binary_shape!(TableExpansion);

impl Describe for TableExpansion {
    fn kind_name(&self) -> &'static str {
        "TableExpansion"
    }

    fn child_names(&self) -> Vec<String> {
        vec![format!("table {}", self.generator), "columns".into()]
    }
}

impl DefNode for TableExpansion {
    fn generators(&self) -> Vec<(Symbol, Node)> {
        vec![(self.generator.clone(), self.table.clone())]
    }

    fn with_generators(&self, symbols: &[Symbol]) -> Self {
        check_generator_count("TableExpansion", 1, symbols.len());
        Self::new(symbols[0].clone(), self.table.clone(), self.columns.clone())
    }
}

/// A reference to an already expanded table, re-bound to `marker`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TableRefExpansion {
    pub marker: Symbol,
    pub table_ref: Node,
    pub columns: Node,
}

impl TableRefExpansion {
    pub fn new(marker: Symbol, table_ref: Node, columns: Node) -> Self {
        Self {
            marker,
            table_ref,
            columns,
        }
    }
}

impl BinaryNode for TableRefExpansion {
    fn left(&self) -> &Node {
        &self.table_ref
    }

    fn right(&self) -> &Node {
        &self.columns
    }

    fn with_children(&self, left: Node, right: Node) -> Self {
        Self::new(self.marker.clone(), left, right)
    }
}

binary_shape!(TableRefExpansion);

impl Describe for TableRefExpansion {
    fn kind_name(&self) -> &'static str {
        "TableRefExpansion"
    }

    fn child_names(&self) -> Vec<String> {
        vec![format!("ref {}", self.marker), "columns".into()]
    }
}

impl DefNode for TableRefExpansion {
    fn generators(&self) -> Vec<(Symbol, Node)> {
        vec![(self.marker.clone(), self.table_ref.clone())]
    }

    fn with_generators(&self, symbols: &[Symbol]) -> Self {
        check_generator_count("TableRefExpansion", 1, symbols.len());
        Self::new(symbols[0].clone(), self.table_ref.clone(), self.columns.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Ref, StructNode};

    #[test]
    fn test_qualified_name() {
        assert_eq!(Table::new("orders").qualified_name(), "orders");
        assert_eq!(Table::in_schema("raw", "orders").qualified_name(), "raw.orders");
        assert_eq!(
            Table::in_schema("raw", "orders").symbol(),
            Symbol::table("raw.orders")
        );
    }

    #[test]
    fn test_table_is_nullary() {
        let table = Node::from(Table::new("orders"));
        assert!(table.children().is_empty());
        assert!(table.is_table());
        assert_eq!(table.to_string(), "Table orders");
        assert_eq!(table.rebuild(Vec::new()), table);
        assert!(table.map_children(|c| c.clone()).ptr_eq(&table));
    }

    #[test]
    fn test_expansion_generators() {
        let gen = Symbol::fresh();
        let table = Node::from(Table::new("orders"));
        let columns = Node::from(StructNode::new(Vec::new()));
        let expansion = Node::from(TableExpansion::new(gen.clone(), table.clone(), columns));

        let generators = expansion.generators();
        assert_eq!(generators.len(), 1);
        assert_eq!(generators[0].0, gen);
        assert!(generators[0].1.ptr_eq(&table));
        assert_eq!(
            expansion.child_names(),
            vec![format!("table {gen}"), "columns".to_string()]
        );
    }

    #[test]
    fn test_ref_expansion_rename() {
        let marker = Symbol::fresh();
        let target = Node::from(Ref::new(Symbol::fresh()));
        let columns = Node::from(StructNode::new(Vec::new()));
        let expansion = Node::from(TableRefExpansion::new(marker, target.clone(), columns));

        let renamed_to = Symbol::fresh();
        let renamed = expansion.with_generators(std::slice::from_ref(&renamed_to));
        assert_eq!(renamed.generators()[0].0, renamed_to);
        assert!(renamed.children()[0].ptr_eq(&target));
    }
}
