// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Database dialects.
//!
//! Statements are generated in one canonical shape. A [`Dialect`] only
//! supplies the pieces that differ between products: how an identity column
//! is declared and how the last generated id is read back.
//!
//! | Dialect | Identity column | Last id query | Identity is the key |
//! |---------|-----------------|---------------|---------------------|
//! | [`Standard`] | `INT NOT NULL GENERATED ALWAYS AS IDENTITY(START WITH s, INCREMENT BY i)` | `SELECT IDENTITY_VAL_LOCAL() FROM t` | no |
//! | [`MySql`] | `INT NOT NULL AUTO_INCREMENT` | `SELECT LAST_INSERT_ID()` | no |
//! | [`HsqlDb`] | `IDENTITY` | `CALL IDENTITY()` | yes |
//! | [`Sqlite`] | `INTEGER PRIMARY KEY AUTOINCREMENT` | `SELECT last_insert_rowid()` | yes |
//!
//! When the identity clause already declares the primary key, the generator
//! omits the separate `CONSTRAINT PK_<table>` line.
//!
//! # Configuration
//!
//! [`DialectKind`] parses from a string so applications can select the
//! dialect from their own configuration:
//!
//! ```rust
//! use tablemap_core::DialectKind;
//!
//! let kind: DialectKind = "mysql".parse().unwrap();
//! assert_eq!(kind.dialect().name(), "mysql");
//! ```

use std::{fmt, str::FromStr};

/// Product-specific SQL fragments.
pub trait Dialect: fmt::Debug + Send + Sync {
    /// Short lowercase name.
    fn name(&self) -> &'static str;

    /// Column clause for a database-assigned id.
    ///
    /// `column_type` is the canonical integer type (`INT` or `BIGINT`).
    fn identity_column(&self, column_type: &str, start: i64, step: i64) -> String;

    /// Whether [`identity_column`](Self::identity_column) already makes the
    /// column the primary key.
    fn identity_implies_primary_key(&self) -> bool {
        false
    }

    /// Query returning the id generated by the last insert into `table`.
    fn last_insert_id_query(&self, table: &str) -> String;
}

/// Canonical dialect (Apache Derby syntax).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Standard;

impl Dialect for Standard {
    fn name(&self) -> &'static str {
        "standard"
    }

    fn identity_column(&self, column_type: &str, start: i64, step: i64) -> String {
        format!(
            "{column_type} NOT NULL GENERATED ALWAYS AS IDENTITY(START WITH {start}, INCREMENT BY {step})"
        )
    }

    fn last_insert_id_query(&self, table: &str) -> String {
        format!("SELECT IDENTITY_VAL_LOCAL() FROM {table}")
    }
}

/// MySQL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MySql;

impl Dialect for MySql {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn identity_column(&self, column_type: &str, _start: i64, _step: i64) -> String {
        format!("{column_type} NOT NULL AUTO_INCREMENT")
    }

    fn last_insert_id_query(&self, _table: &str) -> String {
        "SELECT LAST_INSERT_ID()".to_string()
    }
}

/// HyperSQL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HsqlDb;

impl Dialect for HsqlDb {
    fn name(&self) -> &'static str {
        "hsqldb"
    }

    fn identity_column(&self, _column_type: &str, _start: i64, _step: i64) -> String {
        "IDENTITY".to_string()
    }

    fn identity_implies_primary_key(&self) -> bool {
        true
    }

    fn last_insert_id_query(&self, _table: &str) -> String {
        "CALL IDENTITY()".to_string()
    }
}

/// SQLite.
///
/// Only `INTEGER PRIMARY KEY` columns auto-increment, so start and step are
/// ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sqlite;

impl Dialect for Sqlite {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn identity_column(&self, _column_type: &str, _start: i64, _step: i64) -> String {
        "INTEGER PRIMARY KEY AUTOINCREMENT".to_string()
    }

    fn identity_implies_primary_key(&self) -> bool {
        true
    }

    fn last_insert_id_query(&self, _table: &str) -> String {
        "SELECT last_insert_rowid()".to_string()
    }
}

/// Dialect selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialectKind {
    /// [`Standard`].
    #[default]
    Standard,
    /// [`MySql`].
    MySql,
    /// [`HsqlDb`].
    HsqlDb,
    /// [`Sqlite`].
    Sqlite
}

impl DialectKind {
    /// Dialect implementation for this kind.
    #[must_use]
    pub fn dialect(self) -> Box<dyn Dialect> {
        match self {
            Self::Standard => Box::new(Standard),
            Self::MySql => Box::new(MySql),
            Self::HsqlDb => Box::new(HsqlDb),
            Self::Sqlite => Box::new(Sqlite)
        }
    }
}

/// Error for an unrecognised dialect name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown dialect `{0}`, expected standard, derby, mysql, hsqldb or sqlite")]
pub struct UnknownDialect(pub String);

impl FromStr for DialectKind {
    type Err = UnknownDialect;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" | "derby" => Ok(Self::Standard),
            "mysql" => Ok(Self::MySql),
            "hsqldb" | "hsql" => Ok(Self::HsqlDb),
            "sqlite" => Ok(Self::Sqlite),
            _ => Err(UnknownDialect(s.to_string()))
        }
    }
}
