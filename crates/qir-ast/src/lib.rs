//! qir-ast: immutable query IR
//!
//! This crate provides the tree a query compiler works on: symbols, the
//! node protocol with its shape and binding capabilities, the concrete node
//! catalog, and identity-preserving rewriting utilities.

pub mod catalog;
pub(crate) mod dump;
pub(crate) mod error;
pub(crate) mod narrow;
pub mod node;
pub(crate) mod path;
pub(crate) mod rewrite;
pub(crate) mod symbol;

pub use dump::Dump;
pub use error::{AstError, AstResult};
pub use narrow::{NodeGenerator, QueryValue};
pub use node::capability::{DefNode, RefNode, TypedNode};
pub use node::shape::{BinaryNode, Describe, NullaryNode, Shape, UnaryNode};
pub use node::{Node, NodeKind};
pub use path::{FwdPath, Path};
pub use rewrite::{freshen_generators, map_or_none, rename_references, resolve_delegates, Same};
pub use symbol::{AnonSymbol, IntrinsicSymbol, Symbol};

pub use qir_core::{Config, DumpConfig, FieldName, FunctionName, SqlType, TableName};
