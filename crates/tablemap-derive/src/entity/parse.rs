// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Attribute parsing for the Entity derive macro.
//!
//! Entity-level attributes go through [`darling`]; field-level attributes
//! are marker-style and parsed manually.
//!
//! # Architecture
//!
//! ```text
//! parse.rs (coordinator, EntityDef)
//! ├── attrs.rs  - #[entity(table = "...")]
//! └── field.rs  - FieldDef
//!     ├── column.rs  - ColumnConfig
//!     └── mapping.rs - Mapping, Generated, Temporal
//! ```
//!
//! # Data Structures
//!
//! ```text
//! EntityDef
//! ├── ident: Ident       (struct name, e.g., "Person")
//! ├── table: String      (table name, defaults to the struct name)
//! └── fields: Vec<FieldDef>   (mapped fields in declaration order)
//!     └── FieldDef
//!         ├── ident: Ident
//!         ├── ty: Type
//!         ├── mapping: Mapping
//!         └── column: ColumnConfig
//! ```

mod attrs;
mod field;


use darling::FromDeriveInput;
pub use field::{FieldDef, Generated, Mapping, Temporal};
use syn::{DeriveInput, Ident};

use self::attrs::EntityAttrs;

/// Complete parsed entity definition.
#[derive(Debug)]
pub struct EntityDef {
    /// Struct identifier.
    pub ident: Ident,

    /// Table name.
    pub table: String,

    /// Mapped fields in declaration order; skipped fields are left out.
    pub fields: Vec<FieldDef>
}

impl EntityDef {
    /// Parse entity definition from syn's `DeriveInput`.
    ///
    /// # Errors
    ///
    /// - Applied to an enum, union, tuple or unit struct
    /// - Generic parameters
    /// - Invalid field attributes
    /// - More than one `#[id]`
    /// - `#[one_to_many]` without an `#[id]` on the owner
    pub fn from_derive_input(input: &DeriveInput) -> darling::Result<Self> {
        let attrs = EntityAttrs::from_derive_input(input)?;

        if !attrs.generics.params.is_empty() {
            return Err(
                darling::Error::custom("Entity cannot be derived for generic structs")
                    .with_span(&attrs.generics)
            );
        }

        let fields: Vec<FieldDef> = match &input.data {
            syn::Data::Struct(data) => match &data.fields {
                syn::Fields::Named(named) => named
                    .named
                    .iter()
                    .map(FieldDef::from_field)
                    .collect::<darling::Result<Vec<_>>>()?
                    .into_iter()
                    .filter(|f| !f.is_skipped())
                    .collect(),
                _ => {
                    return Err(darling::Error::custom("Entity requires named fields")
                        .with_span(&input.ident));
                }
            },
            _ => {
                return Err(
                    darling::Error::custom("Entity can only be derived for structs")
                        .with_span(&input.ident)
                );
            }
        };

        let mut ids = fields.iter().filter(|f| f.is_id());
        if let (Some(_), Some(second)) = (ids.next(), ids.next()) {
            return Err(
                darling::Error::custom("at most one field may carry `#[id]`")
                    .with_span(&second.ident)
            );
        }
        if !fields.iter().any(FieldDef::is_id)
            && let Some(collection) = fields
                .iter()
                .find(|f| matches!(f.mapping, Mapping::OneToMany { .. }))
        {
            return Err(darling::Error::custom(
                "`#[one_to_many]` requires an `#[id]` field on the owning entity"
            )
            .with_span(&collection.ident));
        }

        let table = attrs.table.unwrap_or_else(|| attrs.ident.to_string());
        if table.trim().is_empty() {
            return Err(darling::Error::custom("table name must not be empty").with_span(&attrs.ident));
        }

        Ok(Self {
            ident: attrs.ident,
            table,
            fields
        })
    }

    /// Struct name as a string.
    #[must_use]
    pub fn name_str(&self) -> String {
        self.ident.to_string()
    }
}
