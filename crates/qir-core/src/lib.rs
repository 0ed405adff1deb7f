//! qir-core - Core library for qir
//!
//! This crate provides the leaf types shared by the query IR: strongly-typed
//! names, SQL type descriptors attached to typed nodes, and configuration
//! parsing.

pub mod config;
pub mod error;
pub mod names;
pub mod types;

pub use config::{Config, DumpConfig};
pub use error::{CoreError, CoreResult};
pub use names::{FieldName, FunctionName, TableName};
pub use types::{FloatBitWidth, IntBitWidth, SqlType};
