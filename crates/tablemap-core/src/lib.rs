// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Runtime for tablemap.
//!
//! Maps structs described by a static [`EntityMetadata`] onto relational
//! tables, generates the SQL for schema creation and CRUD, walks
//! one-to-many and many-to-one relations on load, save and delete, and
//! converts entity graphs to and from a JSON notation.
//!
//! Most users depend on `tablemap`, which re-exports this crate together
//! with `#[derive(Entity)]`. This crate can be used on its own with
//! hand-written descriptors.
//!
//! # Overview
//!
//! ```text
//! EntityMetadata ──► sql (DDL / DML) ──► Connection ──► mapper (rows → entities)
//!        │                                   ▲
//!        ├──► binder (entity → params) ──────┤
//!        ├──► graph (insert / update diff / delete)
//!        └──► json (encode / decode)
//! ```
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`metadata`] | Static descriptors: table, columns, id, relations, accessors |
//! | [`dialect`] | Identity column clause and last-id query per product |
//! | [`sql`] | `CREATE TABLE`, `INSERT`, `UPDATE`, `DELETE`, `SELECT` text |
//! | [`binder`] | Entity field values as statement parameters |
//! | [`mapper`] | Rows to entities with eager relation loading |
//! | [`equality`] | Structural comparison used by the update diff |
//! | [`json`] | Entity graph notation |
//! | [`manager`] | [`EntityManager`], the public entry point |
//!
//! # Logging
//!
//! Every executed statement is logged through the `log` facade at `debug`
//! level with target `tablemap::sql`. Install any logger to see them.
//!
//! # Features
//!
//! | Feature | Effect |
//! |---------|--------|
//! | `sqlite` | [`Connection`] for `rusqlite::Connection` and [`sqlite::open_in_memory`] |

#![warn(missing_docs)]
#![warn(clippy::all)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod binder;
pub mod connection;
pub mod dialect;
pub mod equality;
pub mod error;
mod graph;
pub mod json;
pub mod manager;
pub mod mapper;
pub mod metadata;
pub mod prelude;
pub mod record;
pub mod sql;
pub mod value;

#[cfg(feature = "sqlite")]
#[cfg_attr(docsrs, doc(cfg(feature = "sqlite")))]
pub mod sqlite;

#[cfg(test)]
mod testing;

pub use connection::{Connection, Row};
pub use dialect::{Dialect, DialectKind, HsqlDb, MySql, Sqlite, Standard, UnknownDialect};
pub use equality::entities_equal;
pub use error::{BoxError, Error, Result};
pub use manager::EntityManager;
pub use metadata::{Constraints, EntityMetadata, FieldKind, FieldMetadata, TemporalKind};
pub use record::{Entity, Record, downcast_box, downcast_mut, downcast_ref};
pub use sql::Condition;
pub use value::{Enumerated, SqlValue, Value, ValueType, enum_from_value};
