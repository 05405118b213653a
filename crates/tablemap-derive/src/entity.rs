// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Entity derive macro implementation.
//!
//! # Architecture
//!
//! ```text
//! entity.rs (orchestrator)
//! │
//! ├── parse/          → Attribute parsing (EntityDef, FieldDef)
//! │
//! ├── accessors.rs    → Per-field get / set functions over `dyn Record`
//! └── descriptor.rs   → impl Entity with the static EntityMetadata
//! ```
//!
//! # Generated Code
//!
//! For an entity like:
//!
//! ```rust,ignore
//! #[derive(Debug, Default, Entity)]
//! pub struct Person {
//!     #[id]
//!     #[generated]
//!     pub id: Option<i64>,
//!     #[column(length = 50)]
//!     pub name: String,
//!     #[one_to_many]
//!     pub orders: Vec<Order>,
//! }
//! ```
//!
//! The macro generates a single `impl tablemap::Entity for Person`. All
//! mapping rules live in the returned descriptor; no other items are added
//! to the user's module.

mod accessors;
mod descriptor;
pub mod parse;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

use self::parse::EntityDef;

/// Main entry point for the Entity derive macro.
pub fn derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match EntityDef::from_derive_input(&input) {
        Ok(entity) => generate(entity),
        Err(err) => err.write_errors().into()
    }
}

fn generate(entity: EntityDef) -> TokenStream {
    descriptor::generate(&entity).into()
}
