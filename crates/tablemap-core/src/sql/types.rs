// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Mapping from value types to canonical SQL column types.
//!
//! ```text
//! ┌─────────────┬──────────────────────────────┐
//! │ ValueType   │ SQL                          │
//! ├─────────────┼──────────────────────────────┤
//! │ Bool        │ BOOLEAN                      │
//! │ Byte, Short │ SMALLINT                     │
//! │ Int         │ INT                          │
//! │ Long        │ BIGINT                       │
//! │ Float       │ FLOAT                        │
//! │ Double      │ DOUBLE                       │
//! │ Char        │ CHAR                         │
//! │ Text        │ VARCHAR(n) or LONG VARCHAR   │
//! │ Bytes       │ BLOB                         │
//! │ Date        │ DATE                         │
//! │ Time        │ TIME                         │
//! │ Timestamp   │ TIMESTAMP                    │
//! └─────────────┴──────────────────────────────┘
//! ```

use crate::value::ValueType;

/// Mapped SQL type with its nullability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlType {
    /// Type name (e.g. `BIGINT`, `VARCHAR(50)`).
    pub name: String,

    /// Whether the column admits `NULL`.
    pub nullable: bool
}

impl SqlType {
    /// Non-nullable type.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name:     name.into(),
            nullable: false
        }
    }

    /// Nullable type.
    #[must_use]
    pub fn nullable(name: impl Into<String>) -> Self {
        Self {
            name:     name.into(),
            nullable: true
        }
    }

    /// Map a value type, honouring the text length.
    #[must_use]
    pub fn of(value_type: ValueType, length: Option<u32>) -> Self {
        Self::new(type_name(value_type, length))
    }

    /// Column clause: type followed by the constraint suffix.
    ///
    /// `UNIQUE NOT NULL` when unique, `NOT NULL` when not nullable.
    #[must_use]
    pub fn clause(&self, unique: bool) -> String {
        if unique {
            format!("{} UNIQUE NOT NULL", self.name)
        } else if self.nullable {
            self.name.clone()
        } else {
            format!("{} NOT NULL", self.name)
        }
    }
}

/// Canonical SQL type name.
#[must_use]
pub fn type_name(value_type: ValueType, length: Option<u32>) -> String {
    match value_type {
        ValueType::Bool => "BOOLEAN".to_string(),
        ValueType::Byte | ValueType::Short => "SMALLINT".to_string(),
        ValueType::Int => "INT".to_string(),
        ValueType::Long => "BIGINT".to_string(),
        ValueType::Float => "FLOAT".to_string(),
        ValueType::Double => "DOUBLE".to_string(),
        ValueType::Char => "CHAR".to_string(),
        ValueType::Text => match length {
            Some(n) if n > 0 => format!("VARCHAR({n})"),
            _ => "LONG VARCHAR".to_string()
        },
        ValueType::Bytes => "BLOB".to_string(),
        ValueType::Date => "DATE".to_string(),
        ValueType::Time => "TIME".to_string(),
        ValueType::Timestamp => "TIMESTAMP".to_string()
    }
}
