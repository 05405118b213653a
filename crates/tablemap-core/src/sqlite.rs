// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! [`Connection`] for SQLite through `rusqlite`.
//!
//! | Value | Stored as |
//! |-------|-----------|
//! | bool, integers | `INTEGER` |
//! | float, double | `REAL` |
//! | char, text | `TEXT` |
//! | bytes | `BLOB` |
//! | date, time, timestamp | `TEXT`, through rusqlite's `chrono` support |
//!
//! Reads return the storage class as-is; the result mapper converts to the
//! declared field type.

use rusqlite::{
    ToSql, params_from_iter,
    types::{Null, ToSqlOutput, ValueRef}
};

use crate::{
    connection::{Connection, Row},
    error::{Error, Result},
    value::Value
};

/// Open an in-memory database with foreign keys enforced.
///
/// # Errors
///
/// [`Error::Execution`] when SQLite cannot be initialised.
pub fn open_in_memory() -> Result<rusqlite::Connection> {
    let connection =
        rusqlite::Connection::open_in_memory().map_err(|e| Error::execution("open :memory:", e))?;
    connection
        .execute_batch("PRAGMA foreign_keys = ON")
        .map_err(|e| Error::execution("PRAGMA foreign_keys = ON", e))?;
    Ok(connection)
}

impl Connection for rusqlite::Connection {
    fn execute(&mut self, sql: &str, params: &[Value]) -> Result<u64> {
        let mut statement = self.prepare(sql).map_err(|e| Error::execution(sql, e))?;
        let affected = statement
            .execute(params_from_iter(params))
            .map_err(|e| Error::execution(sql, e))?;
        Ok(affected as u64)
    }

    fn query(&mut self, sql: &str, params: &[Value]) -> Result<Vec<Row>> {
        let mut statement = self.prepare(sql).map_err(|e| Error::execution(sql, e))?;
        let columns: Vec<String> = statement
            .column_names()
            .into_iter()
            .map(String::from)
            .collect();

        let mut rows = statement
            .query(params_from_iter(params))
            .map_err(|e| Error::execution(sql, e))?;
        let mut out = Vec::new();
        while let Some(row) = rows.next().map_err(|e| Error::execution(sql, e))? {
            let values = (0..columns.len())
                .map(|i| row.get_ref(i).map(from_sqlite))
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(|e| Error::execution(sql, e))?;
            out.push(Row::new(columns.clone(), values));
        }
        Ok(out)
    }
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match self {
            Self::Null => Ok(ToSqlOutput::from(Null)),
            Self::Bool(v) => Ok(ToSqlOutput::from(*v)),
            Self::Byte(v) => Ok(ToSqlOutput::from(*v)),
            Self::Short(v) => Ok(ToSqlOutput::from(*v)),
            Self::Int(v) => Ok(ToSqlOutput::from(*v)),
            Self::Long(v) => Ok(ToSqlOutput::from(*v)),
            Self::Float(v) => Ok(ToSqlOutput::from(f64::from(*v))),
            Self::Double(v) => Ok(ToSqlOutput::from(*v)),
            Self::Char(v) => Ok(ToSqlOutput::from(v.to_string())),
            Self::Text(v) => Ok(ToSqlOutput::from(v.as_str())),
            Self::Bytes(v) => Ok(ToSqlOutput::from(v.as_slice())),
            Self::Date(v) => v.to_sql(),
            Self::Time(v) => v.to_sql(),
            Self::Timestamp(v) => v.to_sql()
        }
    }
}

fn from_sqlite(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(v) => Value::Long(v),
        ValueRef::Real(v) => Value::Double(v),
        ValueRef::Text(v) => Value::Text(String::from_utf8_lossy(v).into_owned()),
        ValueRef::Blob(v) => Value::Bytes(v.to_vec())
    }
}
