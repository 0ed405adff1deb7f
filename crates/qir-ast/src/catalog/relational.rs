//! Collection-level node kinds. Every kind here binds at least one
//! generator symbol over its source rows.

use crate::node::capability::DefNode;
use crate::node::shape::{
    binary_shape, check_arity, check_generator_count, unary_shape, BinaryNode, Describe, Shape,
    UnaryNode,
};
use crate::node::{Node, NodeKind};
use crate::symbol::Symbol;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    pub fn reverse(self) -> Self {
        match self {
            Direction::Ascending => Direction::Descending,
            Direction::Descending => Direction::Ascending,
        }
    }
}

/// Where nulls are placed relative to non-null values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum NullOrdering {
    /// Backend default placement
    #[default]
    Default,
    /// NULLS FIRST
    First,
    /// NULLS LAST
    Last,
}

impl NullOrdering {
    /// Swap first and last; the default placement is left alone.
    pub fn reverse(self) -> Self {
        match self {
            NullOrdering::Default => NullOrdering::Default,
            NullOrdering::First => NullOrdering::Last,
            NullOrdering::Last => NullOrdering::First,
        }
    }
}

/// Ordering of one sort key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ordering {
    pub direction: Direction,
    pub nulls: NullOrdering,
}

impl Ordering {
    pub fn asc() -> Self {
        Self {
            direction: Direction::Ascending,
            nulls: NullOrdering::Default,
        }
    }

    pub fn desc() -> Self {
        Self {
            direction: Direction::Descending,
            nulls: NullOrdering::Default,
        }
    }

    /// Flip both the direction and the null placement.
    pub fn reverse(self) -> Self {
        Self {
            direction: self.direction.reverse(),
            nulls: self.nulls.reverse(),
        }
    }

    pub fn nulls_default(self) -> Self {
        Self {
            nulls: NullOrdering::Default,
            ..self
        }
    }

    pub fn nulls_first(self) -> Self {
        Self {
            nulls: NullOrdering::First,
            ..self
        }
    }

    pub fn nulls_last(self) -> Self {
        Self {
            nulls: NullOrdering::Last,
            ..self
        }
    }

    pub fn is_descending(&self) -> bool {
        self.direction == Direction::Descending
    }
}

impl Default for Ordering {
    fn default() -> Self {
        Self::asc()
    }
}

impl fmt::Display for Ordering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction {
            Direction::Ascending => write!(f, "asc")?,
            Direction::Descending => write!(f, "desc")?,
        }
        match self.nulls {
            NullOrdering::Default => Ok(()),
            NullOrdering::First => write!(f, " nulls first"),
            NullOrdering::Last => write!(f, " nulls last"),
        }
    }
}

/// Join kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JoinType {
    /// Inner join
    Inner,
    /// Left outer join
    Left,
    /// Right outer join
    Right,
    /// Full outer join
    Outer,
}

impl JoinType {
    /// Keyword used when rendering SQL
    pub fn sql_name(&self) -> &'static str {
        match self {
            JoinType::Inner => "INNER",
            JoinType::Left => "LEFT",
            JoinType::Right => "RIGHT",
            JoinType::Outer => "FULL OUTER",
        }
    }
}

impl fmt::Display for JoinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JoinType::Inner => write!(f, "inner"),
            JoinType::Left => write!(f, "left"),
            JoinType::Right => write!(f, "right"),
            JoinType::Outer => write!(f, "outer"),
        }
    }
}

/// Keep the rows of `from` for which `predicate` holds, with `generator`
/// naming the current row inside the predicate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Filter {
    pub generator: Symbol,
    pub from: Node,
    pub predicate: Node,
}

impl Filter {
    pub fn new(generator: Symbol, from: Node, predicate: Node) -> Self {
        Self {
            generator,
            from,
            predicate,
        }
    }

    /// True when the predicate is the literal `true`, so the filter keeps
    /// every row.
    pub fn is_trivial(&self) -> bool {
        matches!(self.predicate.kind(), NodeKind::Literal(lit) if lit.is_true())
    }
}

impl BinaryNode for Filter {
    fn left(&self) -> &Node {
        &self.from
    }

    fn right(&self) -> &Node {
        &self.predicate
    }

    fn with_children(&self, left: Node, right: Node) -> Self {
        Self::new(self.generator.clone(), left, right)
    }
}

binary_shape!(Filter);

impl Describe for Filter {
    fn kind_name(&self) -> &'static str {
        "Filter"
    }

    fn child_names(&self) -> Vec<String> {
        vec![format!("from {}", self.generator), "where".into()]
    }
}

impl DefNode for Filter {
    fn generators(&self) -> Vec<(Symbol, Node)> {
        vec![(self.generator.clone(), self.from.clone())]
    }

    fn with_generators(&self, symbols: &[Symbol]) -> Self {
        check_generator_count("Filter", 1, symbols.len());
        Self::new(symbols[0].clone(), self.from.clone(), self.predicate.clone())
    }
}

/// Order the rows of `from` by one or more keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SortBy {
    pub generator: Symbol,
    pub from: Node,
    pub by: Vec<(Node, Ordering)>,
}

impl SortBy {
    pub fn new(generator: Symbol, from: Node, by: Vec<(Node, Ordering)>) -> Self {
        Self {
            generator,
            from,
            by,
        }
    }

    pub fn orderings(&self) -> impl Iterator<Item = &Ordering> {
        self.by.iter().map(|(_, o)| o)
    }
}

impl Shape for SortBy {
    fn children(&self) -> Vec<Node> {
        std::iter::once(self.from.clone())
            .chain(self.by.iter().map(|(key, _)| key.clone()))
            .collect()
    }

    fn rebuild(&self, children: Vec<Node>) -> Self {
        check_arity("SortBy", self.by.len() + 1, children.len());
        let mut children = children.into_iter();
        let from = children.next().unwrap_or_else(|| self.from.clone());
        let by = children.zip(self.by.iter().map(|(_, o)| *o)).collect();
        Self::new(self.generator.clone(), from, by)
    }
}

impl Describe for SortBy {
    fn kind_name(&self) -> &'static str {
        "SortBy"
    }

    fn child_names(&self) -> Vec<String> {
        std::iter::once(format!("from {}", self.generator))
            .chain((0..self.by.len()).map(|i| format!("by{i}")))
            .collect()
    }

    fn fmt_attrs(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, ordering) in self.orderings().enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            write!(f, "{sep}{ordering}")?;
        }
        Ok(())
    }
}

impl DefNode for SortBy {
    fn generators(&self) -> Vec<(Symbol, Node)> {
        vec![(self.generator.clone(), self.from.clone())]
    }

    fn with_generators(&self, symbols: &[Symbol]) -> Self {
        check_generator_count("SortBy", 1, symbols.len());
        Self::new(symbols[0].clone(), self.from.clone(), self.by.clone())
    }
}

/// Row-count bounds share one layout: a source, a count and a synthesized
/// generator naming the row being limited.
macro_rules! define_bound {
    ($(#[$meta:meta])* $ty:ident, $name:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
        pub struct $ty {
            pub generator: Symbol,
            pub from: Node,
            pub count: u64,
        }

        impl $ty {
            /// Bound `from` under a freshly allocated generator.
            pub fn new(from: Node, count: u64) -> Self {
                Self::with_generator(Symbol::fresh(), from, count)
            }

            pub fn with_generator(generator: Symbol, from: Node, count: u64) -> Self {
                Self {
                    generator,
                    from,
                    count,
                }
            }
        }

        impl UnaryNode for $ty {
            fn child(&self) -> &Node {
                &self.from
            }

            fn with_child(&self, child: Node) -> Self {
                Self::with_generator(self.generator.clone(), child, self.count)
            }
        }

        unary_shape!($ty);

        impl Describe for $ty {
            fn kind_name(&self) -> &'static str {
                $name
            }

            fn child_names(&self) -> Vec<String> {
                vec![format!("from {}", self.generator)]
            }

            fn fmt_attrs(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, " {}", self.count)
            }
        }

        impl DefNode for $ty {
            fn generators(&self) -> Vec<(Symbol, Node)> {
                vec![(self.generator.clone(), self.from.clone())]
            }

            fn with_generators(&self, symbols: &[Symbol]) -> Self {
                check_generator_count($name, 1, symbols.len());
                Self::with_generator(symbols[0].clone(), self.from.clone(), self.count)
            }
        }
    };
}

define_bound!(
    /// The first `count` rows of `from`.
    Take,
    "Take"
);

define_bound!(
    /// Every row of `from` after the first `count`.
    Drop,
    "Drop"
);

/// Group the rows of `from` by `by`.
///
/// `from_gen` names a source row while `by` is evaluated; `by_gen` names
/// the computed key in whatever consumes the groups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct GroupBy {
    pub from_gen: Symbol,
    pub by_gen: Symbol,
    pub from: Node,
    pub by: Node,
}

impl GroupBy {
    pub fn new(from_gen: Symbol, by_gen: Symbol, from: Node, by: Node) -> Self {
        Self {
            from_gen,
            by_gen,
            from,
            by,
        }
    }
}

impl BinaryNode for GroupBy {
    fn left(&self) -> &Node {
        &self.from
    }

    fn right(&self) -> &Node {
        &self.by
    }

    fn with_children(&self, left: Node, right: Node) -> Self {
        Self::new(self.from_gen.clone(), self.by_gen.clone(), left, right)
    }
}

binary_shape!(GroupBy);

impl Describe for GroupBy {
    fn kind_name(&self) -> &'static str {
        "GroupBy"
    }

    fn child_names(&self) -> Vec<String> {
        vec![
            format!("from {}", self.from_gen),
            format!("by {}", self.by_gen),
        ]
    }
}

impl DefNode for GroupBy {
    fn generators(&self) -> Vec<(Symbol, Node)> {
        vec![
            (self.from_gen.clone(), self.from.clone()),
            (self.by_gen.clone(), self.by.clone()),
        ]
    }

    fn with_generators(&self, symbols: &[Symbol]) -> Self {
        check_generator_count("GroupBy", 2, symbols.len());
        Self::new(
            symbols[0].clone(),
            symbols[1].clone(),
            self.from.clone(),
            self.by.clone(),
        )
    }
}

/// Join `left` and `right` on `on`, with one generator per side.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Join {
    pub left_gen: Symbol,
    pub right_gen: Symbol,
    pub left: Node,
    pub right: Node,
    pub join_type: JoinType,
    pub on: Node,
}

impl Join {
    pub fn new(
        left_gen: Symbol,
        right_gen: Symbol,
        left: Node,
        right: Node,
        join_type: JoinType,
        on: Node,
    ) -> Self {
        Self {
            left_gen,
            right_gen,
            left,
            right,
            join_type,
            on,
        }
    }
}

impl Shape for Join {
    fn children(&self) -> Vec<Node> {
        vec![self.left.clone(), self.right.clone(), self.on.clone()]
    }

    fn rebuild(&self, children: Vec<Node>) -> Self {
        let [left, right, on] = crate::node::shape::expect_arity::<3>(children, "Join");
        Self::new(
            self.left_gen.clone(),
            self.right_gen.clone(),
            left,
            right,
            self.join_type,
            on,
        )
    }
}

impl Describe for Join {
    fn kind_name(&self) -> &'static str {
        "Join"
    }

    fn child_names(&self) -> Vec<String> {
        vec![
            format!("left {}", self.left_gen),
            format!("right {}", self.right_gen),
            "on".into(),
        ]
    }

    fn fmt_attrs(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, " {}", self.join_type)
    }
}

impl DefNode for Join {
    fn generators(&self) -> Vec<(Symbol, Node)> {
        vec![
            (self.left_gen.clone(), self.left.clone()),
            (self.right_gen.clone(), self.right.clone()),
        ]
    }

    fn with_generators(&self, symbols: &[Symbol]) -> Self {
        check_generator_count("Join", 2, symbols.len());
        Self {
            left_gen: symbols[0].clone(),
            right_gen: symbols[1].clone(),
            ..self.clone()
        }
    }
}

/// Set union of two collections. `all` keeps duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Union {
    pub left: Node,
    pub right: Node,
    pub all: bool,
    pub left_gen: Symbol,
    pub right_gen: Symbol,
}

impl Union {
    /// Union under two freshly allocated generators.
    pub fn new(left: Node, right: Node, all: bool) -> Self {
        Self::with_generators_named(left, right, all, Symbol::fresh(), Symbol::fresh())
    }

    pub fn with_generators_named(
        left: Node,
        right: Node,
        all: bool,
        left_gen: Symbol,
        right_gen: Symbol,
    ) -> Self {
        Self {
            left,
            right,
            all,
            left_gen,
            right_gen,
        }
    }
}

impl BinaryNode for Union {
    fn left(&self) -> &Node {
        &self.left
    }

    fn right(&self) -> &Node {
        &self.right
    }

    fn with_children(&self, left: Node, right: Node) -> Self {
        Self {
            left,
            right,
            ..self.clone()
        }
    }
}

binary_shape!(Union);

impl Describe for Union {
    fn kind_name(&self) -> &'static str {
        "Union"
    }

    fn child_names(&self) -> Vec<String> {
        vec![
            format!("left {}", self.left_gen),
            format!("right {}", self.right_gen),
        ]
    }

    fn fmt_attrs(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.all {
            write!(f, " all")?;
        }
        Ok(())
    }
}

impl DefNode for Union {
    fn generators(&self) -> Vec<(Symbol, Node)> {
        vec![
            (self.left_gen.clone(), self.left.clone()),
            (self.right_gen.clone(), self.right.clone()),
        ]
    }

    fn with_generators(&self, symbols: &[Symbol]) -> Self {
        check_generator_count("Union", 2, symbols.len());
        Self {
            left_gen: symbols[0].clone(),
            right_gen: symbols[1].clone(),
            ..self.clone()
        }
    }
}

/// Monadic flat-map: evaluate `select` once per row of `from`, with
/// `generator` naming that row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Bind {
    pub generator: Symbol,
    pub from: Node,
    pub select: Node,
}

impl Bind {
    pub fn new(generator: Symbol, from: Node, select: Node) -> Self {
        Self {
            generator,
            from,
            select,
        }
    }
}

impl BinaryNode for Bind {
    fn left(&self) -> &Node {
        &self.from
    }

    fn right(&self) -> &Node {
        &self.select
    }

    fn with_children(&self, left: Node, right: Node) -> Self {
        Self::new(self.generator.clone(), left, right)
    }
}

binary_shape!(Bind);

impl Describe for Bind {
    fn kind_name(&self) -> &'static str {
        "Bind"
    }

    fn child_names(&self) -> Vec<String> {
        vec![format!("from {}", self.generator), "select".into()]
    }
}

impl DefNode for Bind {
    fn generators(&self) -> Vec<(Symbol, Node)> {
        vec![(self.generator.clone(), self.from.clone())]
    }

    fn with_generators(&self, symbols: &[Symbol]) -> Self {
        check_generator_count("Bind", 1, symbols.len());
        Self::new(symbols[0].clone(), self.from.clone(), self.select.clone())
    }
}

#[cfg(test)]
#[path = "relational_test.rs"]
mod tests;
