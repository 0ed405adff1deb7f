//! Value-level node kinds: literals, records, references and conditionals

use crate::error::{AstError, AstResult};
use crate::node::capability::{DefNode, RefNode, TypedNode};
use crate::node::shape::{
    binary_shape, check_arity, check_generator_count, nullary_shape, unary_shape, BinaryNode,
    Describe, Shape, UnaryNode,
};
use crate::node::{Node, NodeKind};
use crate::path::Path;
use crate::symbol::Symbol;
use qir_core::{FloatBitWidth, SqlType};
use serde::Serialize;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A constant value
#[derive(Debug, Clone, Serialize)]
pub enum LiteralValue {
    /// Null literal
    Null,
    /// Boolean literal
    Boolean(bool),
    /// Integer literal
    Integer(i64),
    /// Float literal; compared bitwise
    Float(f64),
    /// String literal
    String(String),
}

impl PartialEq for LiteralValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (LiteralValue::Null, LiteralValue::Null) => true,
            (LiteralValue::Boolean(a), LiteralValue::Boolean(b)) => a == b,
            (LiteralValue::Integer(a), LiteralValue::Integer(b)) => a == b,
            (LiteralValue::Float(a), LiteralValue::Float(b)) => a.to_bits() == b.to_bits(),
            (LiteralValue::String(a), LiteralValue::String(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for LiteralValue {}

impl Hash for LiteralValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            LiteralValue::Null => {}
            LiteralValue::Boolean(b) => b.hash(state),
            LiteralValue::Integer(i) => i.hash(state),
            LiteralValue::Float(f) => f.to_bits().hash(state),
            LiteralValue::String(s) => s.hash(state),
        }
    }
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::Null => write!(f, "null"),
            LiteralValue::Boolean(b) => write!(f, "{b}"),
            LiteralValue::Integer(i) => write!(f, "{i}"),
            LiteralValue::Float(x) => write!(f, "{x}"),
            LiteralValue::String(s) => write!(f, "{s:?}"),
        }
    }
}

/// A constant of a known type. Equal iff value and type are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Literal {
    pub value: LiteralValue,
    pub ty: SqlType,
}

impl Literal {
    pub fn new(value: LiteralValue, ty: SqlType) -> Self {
        Self { value, ty }
    }

    pub fn boolean(value: bool) -> Self {
        Self::new(LiteralValue::Boolean(value), SqlType::Boolean)
    }

    pub fn integer(value: i64) -> Self {
        Self::new(LiteralValue::Integer(value), SqlType::bigint())
    }

    pub fn float(value: f64) -> Self {
        Self::new(
            LiteralValue::Float(value),
            SqlType::Float {
                bits: FloatBitWidth::F64,
            },
        )
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::new(LiteralValue::String(value.into()), SqlType::varchar())
    }

    /// A typed null
    pub fn null(ty: SqlType) -> Self {
        Self::new(LiteralValue::Null, ty)
    }

    /// True for the boolean constant `true`
    pub fn is_true(&self) -> bool {
        matches!(self.value, LiteralValue::Boolean(true))
    }
}

nullary_shape!(Literal);

impl Describe for Literal {
    fn kind_name(&self) -> &'static str {
        "Literal"
    }

    fn fmt_attrs(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, " {}", self.value)
    }
}

impl TypedNode for Literal {
    fn sql_type(&self) -> SqlType {
        self.ty.clone()
    }
}

/// Conjunction of positional sub-expressions (a tuple).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ProductNode {
    pub elements: Vec<Node>,
}

impl ProductNode {
    pub fn new(elements: Vec<Node>) -> Self {
        Self { elements }
    }
}

impl Shape for ProductNode {
    fn children(&self) -> Vec<Node> {
        self.elements.clone()
    }

    fn rebuild(&self, children: Vec<Node>) -> Self {
        check_arity("Product", self.elements.len(), children.len());
        Self { elements: children }
    }
}

impl Describe for ProductNode {
    fn kind_name(&self) -> &'static str {
        "Product"
    }

    fn child_names(&self) -> Vec<String> {
        (1..=self.elements.len()).map(|i| format!("_{i}")).collect()
    }
}

/// Named-field record: each element is paired with the symbol naming it.
///
/// Declares no generators over its own fields, so binding-aware passes do
/// not walk record fields as scopes. The capability is still implemented so
/// that every record can go through the same rename entry point.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct StructNode {
    pub elements: Vec<(Symbol, Node)>,
}

impl StructNode {
    pub fn new(elements: Vec<(Symbol, Node)>) -> Self {
        Self { elements }
    }

    /// Value of the field named `symbol`
    pub fn field(&self, symbol: &Symbol) -> Option<&Node> {
        self.elements
            .iter()
            .find(|(s, _)| s == symbol)
            .map(|(_, n)| n)
    }

    /// The same record with its field symbols replaced in order.
    pub fn with_field_symbols(&self, symbols: &[Symbol]) -> Self {
        check_generator_count("Struct", self.elements.len(), symbols.len());
        Self {
            elements: symbols
                .iter()
                .cloned()
                .zip(self.elements.iter().map(|(_, n)| n.clone()))
                .collect(),
        }
    }
}

impl Shape for StructNode {
    fn children(&self) -> Vec<Node> {
        self.elements.iter().map(|(_, n)| n.clone()).collect()
    }

    fn rebuild(&self, children: Vec<Node>) -> Self {
        check_arity("Struct", self.elements.len(), children.len());
        Self {
            elements: self
                .elements
                .iter()
                .map(|(s, _)| s.clone())
                .zip(children)
                .collect(),
        }
    }
}

impl Describe for StructNode {
    fn kind_name(&self) -> &'static str {
        "Struct"
    }

    fn child_names(&self) -> Vec<String> {
        self.elements.iter().map(|(s, _)| s.to_string()).collect()
    }
}

impl DefNode for StructNode {
    fn generators(&self) -> Vec<(Symbol, Node)> {
        Vec::new()
    }

    fn with_generators(&self, symbols: &[Symbol]) -> Self {
        check_generator_count("Struct", 0, symbols.len());
        self.clone()
    }
}

/// Lifts a scalar value into a one-row collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Pure {
    pub value: Node,
}

impl Pure {
    pub fn new(value: Node) -> Self {
        Self { value }
    }
}

impl UnaryNode for Pure {
    fn child(&self) -> &Node {
        &self.value
    }

    fn with_child(&self, child: Node) -> Self {
        Self { value: child }
    }
}

unary_shape!(Pure);

impl Describe for Pure {
    fn kind_name(&self) -> &'static str {
        "Pure"
    }

    fn child_names(&self) -> Vec<String> {
        vec!["value".into()]
    }
}

/// A bare reference to a bound symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Ref {
    pub symbol: Symbol,
}

impl Ref {
    pub fn new(symbol: Symbol) -> Self {
        Self { symbol }
    }
}

nullary_shape!(Ref);

impl Describe for Ref {
    fn kind_name(&self) -> &'static str {
        "Ref"
    }

    fn fmt_attrs(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, " {}", self.symbol)
    }
}

impl RefNode for Ref {
    fn reference(&self) -> &Symbol {
        &self.symbol
    }

    fn with_reference(&self, symbol: Symbol) -> Self {
        Self { symbol }
    }
}

/// Field access on `input`.
///
/// The input may never be a raw [`Table`](crate::catalog::Table): tables are
/// bound to a generator through a table expansion first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Select {
    input: Node,
    field: Symbol,
}

impl Select {
    /// Select `field` from `input`, rejecting raw tables.
    pub fn new(input: Node, field: Symbol) -> AstResult<Self> {
        if let NodeKind::Table(table) = input.kind() {
            return Err(AstError::SelectFromTable {
                table: table.qualified_name(),
                field: field.to_string(),
            });
        }
        Ok(Self { input, field })
    }

    /// Constructor for callers that know `input` is not a table.
    pub(crate) fn over(input: Node, field: Symbol) -> Self {
        debug_assert!(!input.is_table());
        Self { input, field }
    }

    pub fn input(&self) -> &Node {
        &self.input
    }

    pub fn field(&self) -> &Symbol {
        &self.field
    }
}

impl UnaryNode for Select {
    fn child(&self) -> &Node {
        &self.input
    }

    /// # Panics
    ///
    /// When `child` is a raw table.
    fn with_child(&self, child: Node) -> Self {
        match Select::new(child, self.field.clone()) {
            Ok(select) => select,
            Err(err) => panic!("{err}"),
        }
    }
}

unary_shape!(Select);

impl Describe for Select {
    fn kind_name(&self) -> &'static str {
        "Select"
    }

    fn child_names(&self) -> Vec<String> {
        vec!["in".into()]
    }

    fn fmt_attrs(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match Path::deconstruct(&self.input) {
            Some(mut path) => {
                path.insert(0, self.field.clone());
                write!(f, " {}", Path::render(&path))
            }
            None => write!(f, " {}", self.field),
        }
    }
}

impl RefNode for Select {
    fn reference(&self) -> &Symbol {
        &self.field
    }

    fn with_reference(&self, symbol: Symbol) -> Self {
        Self {
            input: self.input.clone(),
            field: symbol,
        }
    }
}

/// Function or operator call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Apply {
    pub function: Symbol,
    pub args: Vec<Node>,
}

impl Apply {
    pub fn new(function: Symbol, args: Vec<Node>) -> Self {
        Self { function, args }
    }
}

impl Shape for Apply {
    fn children(&self) -> Vec<Node> {
        self.args.clone()
    }

    fn rebuild(&self, children: Vec<Node>) -> Self {
        check_arity("Apply", self.args.len(), children.len());
        Self {
            function: self.function.clone(),
            args: children,
        }
    }
}

impl Describe for Apply {
    fn kind_name(&self) -> &'static str {
        "Apply"
    }

    fn fmt_attrs(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, " {}", self.function)
    }
}

impl RefNode for Apply {
    fn reference(&self) -> &Symbol {
        &self.function
    }

    fn with_reference(&self, symbol: Symbol) -> Self {
        Self {
            function: symbol,
            args: self.args.clone(),
        }
    }
}

/// One `condition => result` clause of a [`Conditional`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct IfThen {
    pub condition: Node,
    pub result: Node,
}

impl IfThen {
    pub fn new(condition: Node, result: Node) -> Self {
        Self { condition, result }
    }
}

impl BinaryNode for IfThen {
    fn left(&self) -> &Node {
        &self.condition
    }

    fn right(&self) -> &Node {
        &self.result
    }

    fn with_children(&self, left: Node, right: Node) -> Self {
        Self::new(left, right)
    }
}

binary_shape!(IfThen);

impl Describe for IfThen {
    fn kind_name(&self) -> &'static str {
        "IfThen"
    }

    fn child_names(&self) -> Vec<String> {
        vec!["if".into(), "then".into()]
    }
}

/// `IfThen` clauses tried in order, first match wins, with a mandatory
/// else-clause.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Conditional {
    pub clauses: Vec<Node>,
    pub otherwise: Node,
}

impl Conditional {
    pub fn new(clauses: Vec<IfThen>, otherwise: Node) -> Self {
        Self {
            clauses: clauses.into_iter().map(Node::from).collect(),
            otherwise,
        }
    }
}

impl Shape for Conditional {
    fn children(&self) -> Vec<Node> {
        let mut children = self.clauses.clone();
        children.push(self.otherwise.clone());
        children
    }

    fn rebuild(&self, mut children: Vec<Node>) -> Self {
        check_arity("Conditional", self.clauses.len() + 1, children.len());
        let otherwise = children.pop().unwrap_or_else(|| self.otherwise.clone());
        Self {
            clauses: children,
            otherwise,
        }
    }
}

impl Describe for Conditional {
    fn kind_name(&self) -> &'static str {
        "Conditional"
    }

    fn child_names(&self) -> Vec<String> {
        (0..self.clauses.len())
            .map(|i| i.to_string())
            .chain(std::iter::once("else".to_string()))
            .collect()
    }
}

#[cfg(test)]
#[path = "scalar_test.rs"]
mod tests;
