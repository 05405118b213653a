// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Entity-level attribute parsing with darling.
//!
//! | Attribute | Required | Default | Description |
//! |-----------|----------|---------|-------------|
//! | `table` | No | struct name | Table name |

use darling::FromDeriveInput;
use syn::{Generics, Ident};

/// Entity-level attributes parsed from `#[entity(...)]`.
///
/// Internal to parsing; [`EntityDef`](super::EntityDef) combines these with
/// the field definitions.
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(entity), supports(struct_named), allow_unknown_fields)]
pub struct EntityAttrs {
    /// Struct identifier (e.g., `Person`).
    pub ident: Ident,

    /// Generic parameters, rejected by the constructor.
    pub generics: Generics,

    /// Table name override.
    #[darling(default)]
    pub table: Option<String>
}
