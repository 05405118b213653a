// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Caller-owned database handle.
//!
//! The runtime never opens, pools or caches connections. Each public
//! operation borrows a [`Connection`] mutably for its whole duration,
//! including recursive relation work, and every statement is prepared,
//! executed and released inside a single call.
//!
//! Parameters use positional `?` placeholders.

use crate::{error::Result, value::Value};

/// Minimal synchronous database handle.
///
/// Implementations report driver failures as
/// [`Error::Execution`](crate::Error::Execution) carrying the statement text.
pub trait Connection {
    /// Execute a statement that returns no rows.
    ///
    /// Returns the number of affected rows.
    ///
    /// # Errors
    ///
    /// [`Error::Execution`](crate::Error::Execution) when the database
    /// rejects the statement.
    fn execute(&mut self, sql: &str, params: &[Value]) -> Result<u64>;

    /// Run a query and collect every row.
    ///
    /// # Errors
    ///
    /// [`Error::Execution`](crate::Error::Execution) when the database
    /// rejects the statement.
    fn query(&mut self, sql: &str, params: &[Value]) -> Result<Vec<Row>>;
}

impl<C: Connection + ?Sized> Connection for &mut C {
    fn execute(&mut self, sql: &str, params: &[Value]) -> Result<u64> {
        (**self).execute(sql, params)
    }

    fn query(&mut self, sql: &str, params: &[Value]) -> Result<Vec<Row>> {
        (**self).query(sql, params)
    }
}

/// Execute `sql`, logging the statement and its parameters.
pub(crate) fn execute_logged<C: Connection + ?Sized>(
    connection: &mut C,
    sql: &str,
    params: &[Value]
) -> Result<u64> {
    log::debug!(target: "tablemap::sql", "{sql} {params:?}");
    let affected = connection.execute(sql, params)?;
    log::trace!(target: "tablemap::sql", "{affected} rows affected");
    Ok(affected)
}

/// Run `sql` as a query, logging the statement and its parameters.
pub(crate) fn query_logged<C: Connection + ?Sized>(
    connection: &mut C,
    sql: &str,
    params: &[Value]
) -> Result<Vec<Row>> {
    log::debug!(target: "tablemap::sql", "{sql} {params:?}");
    let rows = connection.query(sql, params)?;
    log::trace!(target: "tablemap::sql", "{} rows returned", rows.len());
    Ok(rows)
}

/// One result row.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    columns: Vec<String>,
    values:  Vec<Value>
}

impl Row {
    /// Build a row from parallel column and value lists.
    #[must_use]
    pub fn new(columns: Vec<String>, values: Vec<Value>) -> Self {
        Self {
            columns,
            values
        }
    }

    /// Value of `column`, matched case-insensitively.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns
            .iter()
            .position(|c| c.eq_ignore_ascii_case(column))
            .and_then(|i| self.values.get(i))
    }

    /// Column names in select order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Values in select order.
    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Consume the row, keeping only the values.
    #[must_use]
    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}
