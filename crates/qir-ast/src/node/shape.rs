//! Shape capabilities: how many children a node kind has and how it is
//! rebuilt from replacements.
//!
//! Nullary, unary and binary kinds implement the small trait for their
//! arity and get [`Shape`] from the matching macro. Variadic kinds
//! implement [`Shape`] by hand.

use super::Node;
use std::fmt;

/// Child access and rebuild, the structural half of the node protocol.
pub trait Shape: Sized {
    /// Ordered children
    fn children(&self) -> Vec<Node>;

    /// Same kind and attributes with `children` substituted.
    ///
    /// # Panics
    ///
    /// When `children` has the wrong length.
    fn rebuild(&self, children: Vec<Node>) -> Self;
}

/// Naming and rendering, the diagnostic half of the node protocol.
pub trait Describe {
    /// Kind name used in renderings
    fn kind_name(&self) -> &'static str;

    /// Explicit child names. May be shorter than the child list; missing
    /// positions are named by index.
    fn child_names(&self) -> Vec<String> {
        Vec::new()
    }

    /// Write non-child attributes, each preceded by a space.
    fn fmt_attrs(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Ok(())
    }
}

/// A node without children.
pub trait NullaryNode: Clone {}

/// A node with exactly one child.
pub trait UnaryNode {
    fn child(&self) -> &Node;
    fn with_child(&self, child: Node) -> Self;
}

/// A node with exactly two children.
pub trait BinaryNode {
    fn left(&self) -> &Node;
    fn right(&self) -> &Node;
    fn with_children(&self, left: Node, right: Node) -> Self;
}

/// Convert `children` into a fixed-size array, panicking on a length mismatch.
pub(crate) fn expect_arity<const N: usize>(children: Vec<Node>, kind: &str) -> [Node; N] {
    let len = children.len();
    match <[Node; N]>::try_from(children) {
        Ok(array) => array,
        Err(_) => panic!("{kind}::rebuild expects {N} children, got {len}"),
    }
}

/// Assert a variadic rebuild received the expected number of children.
pub(crate) fn check_arity(kind: &str, expected: usize, actual: usize) {
    assert_eq!(
        expected, actual,
        "{kind}::rebuild expects {expected} children, got {actual}"
    );
}

/// Assert an alpha-rename received one symbol per generator.
pub(crate) fn check_generator_count(kind: &str, expected: usize, actual: usize) {
    assert_eq!(
        expected, actual,
        "{kind}::with_generators expects {expected} symbols, got {actual}"
    );
}

macro_rules! nullary_shape {
    ($($ty:ident),* $(,)?) => {
        $(
            impl $crate::node::shape::NullaryNode for $ty {}

            impl $crate::node::shape::Shape for $ty {
                fn children(&self) -> Vec<$crate::node::Node> {
                    Vec::new()
                }

                fn rebuild(&self, children: Vec<$crate::node::Node>) -> Self {
                    let [] = $crate::node::shape::expect_arity::<0>(children, stringify!($ty));
                    self.clone()
                }
            }
        )*
    };
}

macro_rules! unary_shape {
    ($($ty:ident),* $(,)?) => {
        $(
            impl $crate::node::shape::Shape for $ty {
                fn children(&self) -> Vec<$crate::node::Node> {
                    vec![$crate::node::shape::UnaryNode::child(self).clone()]
                }

                fn rebuild(&self, children: Vec<$crate::node::Node>) -> Self {
                    let [child] = $crate::node::shape::expect_arity::<1>(children, stringify!($ty));
                    $crate::node::shape::UnaryNode::with_child(self, child)
                }
            }
        )*
    };
}

macro_rules! binary_shape {
    ($($ty:ident),* $(,)?) => {
        $(
            impl $crate::node::shape::Shape for $ty {
                fn children(&self) -> Vec<$crate::node::Node> {
                    use $crate::node::shape::BinaryNode;
                    vec![self.left().clone(), self.right().clone()]
                }

                fn rebuild(&self, children: Vec<$crate::node::Node>) -> Self {
                    let [left, right] = $crate::node::shape::expect_arity::<2>(children, stringify!($ty));
                    $crate::node::shape::BinaryNode::with_children(self, left, right)
                }
            }
        )*
    };
}

pub(crate) use {binary_shape, nullary_shape, unary_shape};
