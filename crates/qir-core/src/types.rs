//! SQL type descriptors attached to typed IR nodes

use serde::{Deserialize, Serialize};

/// Valid bit widths for integer types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IntBitWidth {
    /// 8-bit (TINYINT)
    I8,
    /// 16-bit (SMALLINT)
    I16,
    /// 32-bit (INTEGER)
    I32,
    /// 64-bit (BIGINT)
    I64,
}

/// Valid bit widths for floating-point types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FloatBitWidth {
    /// 32-bit (FLOAT / REAL)
    F32,
    /// 64-bit (DOUBLE)
    F64,
}

/// Result type of an IR node.
///
/// Scalar variants mirror the SQL types a code generator can emit.
/// `Collection` describes a multi-row result whose element is the row type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SqlType {
    /// Boolean (BOOL, BOOLEAN)
    Boolean,
    /// Integer types: TINYINT(8), SMALLINT(16), INT(32), BIGINT(64)
    Integer { bits: IntBitWidth },
    /// Floating-point: FLOAT(32), DOUBLE(64)
    Float { bits: FloatBitWidth },
    /// Exact numeric with optional precision and scale
    Decimal {
        precision: Option<u16>,
        scale: Option<u16>,
    },
    /// Character/string types with optional max length
    String { max_length: Option<u32> },
    /// DATE
    Date,
    /// TIME
    Time,
    /// TIMESTAMP / DATETIME
    Timestamp,
    /// BINARY / BLOB
    Binary,
    /// Array/List type (INTEGER[])
    Array(Box<SqlType>),
    /// Named record (STRUCT(name VARCHAR, age INT))
    Struct(Vec<(String, SqlType)>),
    /// Multi-row result with the given row type
    Collection(Box<SqlType>),
    /// Type could not be determined; carries a reason
    Unknown(String),
}

impl SqlType {
    /// Shorthand for `BIGINT`, the type of generated row numbers.
    pub fn bigint() -> Self {
        SqlType::Integer {
            bits: IntBitWidth::I64,
        }
    }

    /// Shorthand for an unbounded `VARCHAR`.
    pub fn varchar() -> Self {
        SqlType::String { max_length: None }
    }

    /// Returns true if this type is unknown
    pub fn is_unknown(&self) -> bool {
        matches!(self, SqlType::Unknown(_))
    }

    /// Returns true if this type describes more than one row
    pub fn is_collection(&self) -> bool {
        matches!(self, SqlType::Collection(_))
    }

    /// Element type of a collection, or `None` for scalar types
    pub fn element_type(&self) -> Option<&SqlType> {
        match self {
            SqlType::Collection(inner) => Some(inner),
            _ => None,
        }
    }

    /// Human-readable display name
    pub fn display_name(&self) -> String {
        match self {
            SqlType::Boolean => "BOOLEAN".into(),
            SqlType::Integer { bits } => match bits {
                IntBitWidth::I8 => "TINYINT".into(),
                IntBitWidth::I16 => "SMALLINT".into(),
                IntBitWidth::I32 => "INTEGER".into(),
                IntBitWidth::I64 => "BIGINT".into(),
            },
            SqlType::Float {
                bits: FloatBitWidth::F32,
            } => "FLOAT".into(),
            SqlType::Float {
                bits: FloatBitWidth::F64,
            } => "DOUBLE".into(),
            SqlType::Decimal {
                precision: Some(p),
                scale: Some(s),
            } => format!("DECIMAL({p},{s})"),
            SqlType::Decimal {
                precision: Some(p), ..
            } => format!("DECIMAL({p})"),
            SqlType::Decimal { .. } => "DECIMAL".into(),
            SqlType::String {
                max_length: Some(n),
            } => format!("VARCHAR({n})"),
            SqlType::String { .. } => "VARCHAR".into(),
            SqlType::Date => "DATE".into(),
            SqlType::Time => "TIME".into(),
            SqlType::Timestamp => "TIMESTAMP".into(),
            SqlType::Binary => "BINARY".into(),
            SqlType::Array(inner) => format!("{}[]", inner.display_name()),
            SqlType::Struct(fields) => {
                let field_strs: Vec<String> = fields
                    .iter()
                    .map(|(name, ty)| format!("{} {}", name, ty.display_name()))
                    .collect();
                format!("STRUCT({})", field_strs.join(", "))
            }
            SqlType::Collection(inner) => format!("COLLECTION({})", inner.display_name()),
            SqlType::Unknown(reason) => format!("UNKNOWN({reason})"),
        }
    }
}

impl std::fmt::Display for SqlType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
