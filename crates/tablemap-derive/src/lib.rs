// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(
    missing_docs,
    rustdoc::missing_crate_level_docs,
    rustdoc::broken_intra_doc_links,
    rust_2018_idioms
)]
#![deny(unsafe_code)]

//! Derive macros for tablemap.
//!
//! Use through the `tablemap` crate, which re-exports both macros together
//! with the runtime the generated code refers to.
//!
//! # Attribute Quick Reference
//!
//! ## Entity-Level `#[entity(...)]`
//!
//! ```rust,ignore
//! #[derive(Debug, Default, Entity)]
//! #[entity(table = "Person")] // Optional: defaults to the struct name
//! pub struct Person { /* ... */ }
//! ```
//!
//! ## Field-Level Attributes
//!
//! ```rust,ignore
//! pub struct Person {
//!     #[id]                                  // Identity column
//!     #[generated(start = 1, increment = 1)] // Assigned by the database
//!     pub id: Option<i64>,
//!
//!     #[column(length = 50)]                 // VARCHAR(50) NOT NULL
//!     pub name: String,
//!
//!     #[column(name = "mail", unique)]       // Custom column, UNIQUE NOT NULL
//!     pub email: String,
//!
//!     pub nickname: Option<String>,          // Nullable column
//!
//!     #[temporal(date)]                      // DATE NOT NULL
//!     pub birth: NaiveDate,
//!
//!     #[enumerated]                          // Ordinal, INT NOT NULL
//!     pub level: Level,
//!
//!     #[lob]                                 // BLOB NOT NULL
//!     pub photo: Vec<u8>,
//!
//!     #[many_to_one(name = "team_id")]       // Foreign key to Team's id
//!     pub team: Option<Box<Team>>,
//!
//!     #[one_to_many]                         // Orders carry Person_id
//!     pub orders: Vec<Order>,
//!
//!     #[column(skip)]                        // Not mapped
//!     pub cache: Vec<String>,
//! }
//! ```
//!
//! # Generated Code
//!
//! | Derive | Generates |
//! |--------|-----------|
//! | `Entity` | `impl tablemap::Entity` returning a static `EntityMetadata` with one accessor pair per field |
//! | `Enumerated` | `impl tablemap::Enumerated` and `impl tablemap::SqlValue` (ordinal as `INT`) |
//!
//! The struct must implement `Default`; loading starts from a default
//! instance and fills mapped fields.

mod entity;
mod enumerated;
mod utils;

use proc_macro::TokenStream;

/// Derive the static schema descriptor of a struct.
///
/// # Struct Attributes
///
/// | Attribute | Default | Description |
/// |-----------|---------|-------------|
/// | `table = "..."` | struct name | Table name |
///
/// # Field Attributes
///
/// | Attribute | Applies to | Description |
/// |-----------|------------|-------------|
/// | `#[id]` | `i32`, `i64`, `String` (or `Option` of them) | Identity column |
/// | `#[generated(start = N, increment = N)]` | `Option<i32>`, `Option<i64>` with `#[id]` | Database-assigned id |
/// | `#[column(name, length, nullable, unique, skip)]` | column fields | Column name and constraints |
/// | `#[temporal(date \| time \| timestamp, name)]` | chrono types | Temporal column |
/// | `#[enumerated(name)]` | `#[derive(Enumerated)]` enums | Ordinal column |
/// | `#[lob(name)]` | `Vec<u8>` | Binary large object |
/// | `#[many_to_one(name)]` | `Option<T>`, `Option<Box<T>>` | Foreign key to `T`'s id |
/// | `#[one_to_many(join_column)]` | `Vec<T>` | Children with a join column back to this table |
///
/// Fields without attributes are plain columns named after the field.
/// `Option` types map to nullable columns.
///
/// # Errors
///
/// Compile errors for generic structs, tuple structs, enums, conflicting
/// relation attributes, more than one `#[id]`, and relation attributes on
/// fields of the wrong shape.
#[proc_macro_derive(
    Entity,
    attributes(
        entity, id, generated, column, temporal, enumerated, lob, many_to_one, one_to_many
    )
)]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    entity::derive(input)
}

/// Derive ordinal storage for a fieldless enum.
///
/// Variants are numbered from zero in declaration order, ignoring any
/// explicit discriminants.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Debug, Default, Clone, Copy, PartialEq, Enumerated)]
/// pub enum Level {
///     #[default]
///     Junior, // 0
///     Senior  // 1
/// }
/// ```
#[proc_macro_derive(Enumerated)]
pub fn derive_enumerated(input: TokenStream) -> TokenStream {
    enumerated::derive(input)
}
