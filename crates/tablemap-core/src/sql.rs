// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! SQL text generation.
//!
//! Every statement is derived from an [`EntityMetadata`] alone, so output is
//! deterministic for a given descriptor and dialect.
//!
//! # Module Structure
//!
//! ```text
//! sql/
//! ├── types.rs - value type to SQL type mapping
//! ├── ddl.rs   - CREATE TABLE with keys and cascading foreign keys
//! └── dml.rs   - INSERT, UPDATE, DELETE, SELECT
//! ```
//!
//! # Conditions
//!
//! Filters passed to load operations are [`Condition`]s. A condition built
//! with [`Condition::equals`] binds its value as a parameter. A raw condition
//! (including any `&str` converted with `into()`) is appended verbatim after
//! `WHERE` and must never contain untrusted input.

pub mod ddl;
pub mod dml;
pub mod types;

pub use ddl::{create_table, create_tables};
pub use dml::{InsertPlan, SelectPlan, delete, insert, select, update};
pub use types::{SqlType, type_name};

use crate::{
    error::Result,
    metadata::{EntityMetadata, FieldMetadata},
    value::Value
};

/// `WHERE` clause with its bound parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Condition {
    clause: String,
    params: Vec<Value>
}

impl Condition {
    /// Verbatim clause without parameters.
    ///
    /// The text is not escaped.
    #[must_use]
    pub fn raw(clause: impl Into<String>) -> Self {
        Self {
            clause: clause.into(),
            params: Vec::new()
        }
    }

    /// `column = ?` with `value` bound.
    #[must_use]
    pub fn equals(column: &str, value: Value) -> Self {
        Self {
            clause: format!("{column} = ?"),
            params: vec![value]
        }
    }

    /// Clause text.
    #[must_use]
    pub fn clause(&self) -> &str {
        &self.clause
    }

    /// Bound parameters in placeholder order.
    #[must_use]
    pub fn params(&self) -> &[Value] {
        &self.params
    }

    /// Whether the clause is blank.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clause.trim().is_empty()
    }
}

impl From<&str> for Condition {
    fn from(clause: &str) -> Self {
        Self::raw(clause)
    }
}

impl From<String> for Condition {
    fn from(clause: String) -> Self {
        Self::raw(clause)
    }
}

/// Owning side of a one-to-many relation, used when generating statements
/// for the child table.
#[derive(Debug, Clone, Copy)]
pub struct Owner<'a> {
    /// Owner descriptor.
    pub metadata: &'a EntityMetadata,

    /// The owner's one-to-many field.
    pub field: &'a FieldMetadata
}

impl Owner<'_> {
    /// Join column on the child table.
    ///
    /// # Errors
    ///
    /// [`Error::Metadata`](crate::Error::Metadata) when the field is not
    /// one-to-many or the owner has no id.
    pub fn join_column(&self) -> Result<String> {
        self.field.join_column(self.metadata)
    }
}
