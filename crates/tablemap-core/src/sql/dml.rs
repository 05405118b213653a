// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Data manipulation statements.
//!
//! | Statement | Columns | Placeholders |
//! |-----------|---------|--------------|
//! | `INSERT` | bound fields, then the owner join column | one per column |
//! | `UPDATE` | bound fields in `SET` | one per column, then the id |
//! | `DELETE` | none | the id |
//! | `SELECT` | every column field | from the [`Condition`] |
//!
//! "Bound fields" are column-backed fields the application supplies: every
//! field with a column except a generated id.

use super::{Condition, Owner};
use crate::{
    dialect::Dialect,
    error::Result,
    metadata::{EntityMetadata, FieldMetadata}
};

/// Generated `INSERT` with the follow-up identity query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertPlan {
    /// Statement text.
    pub sql: String,

    /// Columns in placeholder order.
    pub columns: Vec<String>,

    /// Query reading back the generated id, when the entity has one.
    pub identity_query: Option<String>
}

/// Generated `SELECT` with its column layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectPlan {
    /// Statement text.
    pub sql: String,

    /// Id column, when the entity has one.
    pub key: Option<String>,

    /// Remaining selected columns in declaration order.
    pub columns: Vec<String>
}

/// Column-backed fields whose values the application supplies.
pub(crate) fn bound_fields(entity: &EntityMetadata) -> impl Iterator<Item = &FieldMetadata> {
    entity.column_fields().filter(|f| !f.is_generated())
}

/// Generate the `INSERT` for `entity`.
///
/// With an `owner`, the join column is appended last.
///
/// # Errors
///
/// [`Error::Metadata`](crate::Error::Metadata) for an invalid descriptor.
pub fn insert(
    dialect: &dyn Dialect,
    owner: Option<Owner<'_>>,
    entity: &EntityMetadata
) -> Result<InsertPlan> {
    entity.validate()?;
    let table = entity.table();

    let mut columns: Vec<String> = bound_fields(entity)
        .map(|f| f.column_name().to_string())
        .collect();
    if let Some(owner) = owner {
        columns.push(owner.join_column()?);
    }

    let sql = if columns.is_empty() {
        format!("INSERT INTO {table} DEFAULT VALUES")
    } else {
        let placeholders = vec!["?"; columns.len()].join(", ");
        format!("INSERT INTO {table} ({}) VALUES ({placeholders})", columns.join(", "))
    };

    let identity_query = entity
        .id_field()
        .filter(|id| id.is_generated())
        .map(|_| dialect.last_insert_id_query(table));

    Ok(InsertPlan {
        sql,
        columns,
        identity_query
    })
}

/// Generate the `UPDATE` for `entity`, keyed by its id.
///
/// Returns `None` when the entity has no column to set.
///
/// # Errors
///
/// [`Error::Metadata`](crate::Error::Metadata) when the entity has no id.
pub fn update(entity: &EntityMetadata) -> Result<Option<String>> {
    entity.validate()?;
    let id = entity.require_id()?;
    let assignments: Vec<String> = bound_fields(entity)
        .map(|f| format!("{} = ?", f.column_name()))
        .collect();
    if assignments.is_empty() {
        return Ok(None);
    }
    Ok(Some(format!(
        "UPDATE {} SET {} WHERE {} = ?",
        entity.table(),
        assignments.join(", "),
        id.column_name()
    )))
}

/// Generate the `DELETE` for `entity`, keyed by its id.
///
/// # Errors
///
/// [`Error::Metadata`](crate::Error::Metadata) when the entity has no id.
pub fn delete(entity: &EntityMetadata) -> Result<String> {
    let id = entity.require_id()?;
    Ok(format!("DELETE FROM {} WHERE {} = ?", entity.table(), id.column_name()))
}

/// Generate the `SELECT` for `entity` filtered by `condition`.
///
/// An empty condition selects every row.
///
/// # Errors
///
/// [`Error::Metadata`](crate::Error::Metadata) for an invalid descriptor.
pub fn select(entity: &EntityMetadata, condition: &Condition) -> Result<SelectPlan> {
    entity.validate()?;
    let selected: Vec<&str> = entity.column_fields().map(|f| f.column_name()).collect();
    let key = entity.id_field().map(|id| id.column_name().to_string());
    let columns = entity
        .column_fields()
        .filter(|f| !f.is_id())
        .map(|f| f.column_name().to_string())
        .collect();

    let mut sql = format!("SELECT {} FROM {}", selected.join(", "), entity.table());
    if !condition.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(condition.clause().trim());
    }

    Ok(SelectPlan {
        sql,
        key,
        columns
    })
}
