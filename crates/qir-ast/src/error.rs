//! Error types for qir-ast

use thiserror::Error;

/// Tree construction and manipulation error type
///
/// Contract violations by callers (rebuilding with the wrong number of
/// children or generators) are panics, not variants of this enum.
#[derive(Error, Debug)]
pub enum AstError {
    /// Q001: Field selected directly from a raw table
    #[error(
        "[Q001] Select({table}, \"{field}\") found: a raw table must be bound to a generator \
         through a table expansion before its fields are selected"
    )]
    SelectFromTable { table: String, field: String },

    /// Q002: External value has no node representation
    #[error("[Q002] Cannot narrow {kind} to a query node")]
    CannotNarrow { kind: String },

    /// Q003: Core error propagation
    #[error("[Q003] Core error: {0}")]
    Core(#[from] qir_core::CoreError),

    /// Q004: JSON serialization error
    #[error("[Q004] JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for AstError
pub type AstResult<T> = Result<T, AstError>;
