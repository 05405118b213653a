// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Column configuration parsed from `#[column(...)]`.
//!
//! | Option | Effect |
//! |--------|--------|
//! | `name = "col"` | Column name, defaults to the field name |
//! | `length = N` | `VARCHAR(N)` for text columns |
//! | `nullable` | Admit `NULL` even for non-`Option` types |
//! | `unique` | `UNIQUE` constraint |
//! | `skip` | Field is not mapped at all |

use syn::{Attribute, LitInt, LitStr, Token};

/// Column-level configuration of a field.
///
/// # Example
///
/// ```rust,ignore
/// #[column(name = "mail", length = 120, unique)]
/// pub email: String,
/// ```
#[derive(Debug, Clone, Default)]
pub struct ColumnConfig {
    /// Custom column name.
    pub name: Option<String>,

    /// `VARCHAR` length.
    pub length: Option<u32>,

    /// Explicitly allow `NULL`.
    pub nullable: bool,

    /// `UNIQUE` constraint.
    pub unique: bool,

    /// Field excluded from mapping.
    pub skip: bool
}

impl ColumnConfig {
    /// Merge options of one `#[column(...)]` attribute into `self`.
    ///
    /// # Errors
    ///
    /// Unknown options or malformed values.
    pub fn merge_attr(&mut self, attr: &Attribute) -> syn::Result<()> {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let _: Token![=] = meta.input.parse()?;
                let value: LitStr = meta.input.parse()?;
                self.set_name(value)?;
            } else if meta.path.is_ident("length") {
                let _: Token![=] = meta.input.parse()?;
                let value: LitInt = meta.input.parse()?;
                let length: u32 = value.base10_parse()?;
                if length == 0 {
                    return Err(syn::Error::new(value.span(), "length must be positive"));
                }
                self.length = Some(length);
            } else if meta.path.is_ident("nullable") {
                self.nullable = true;
            } else if meta.path.is_ident("unique") {
                self.unique = true;
            } else if meta.path.is_ident("skip") {
                self.skip = true;
            } else {
                return Err(meta.error("expected `name`, `length`, `nullable`, `unique` or `skip`"));
            }
            Ok(())
        })
    }

    /// Set the column name once.
    ///
    /// # Errors
    ///
    /// The name was already given by another attribute, or is empty.
    pub fn set_name(&mut self, value: LitStr) -> syn::Result<()> {
        let name = value.value();
        if name.trim().is_empty() {
            return Err(syn::Error::new(value.span(), "column name must not be empty"));
        }
        if self.name.is_some() {
            return Err(syn::Error::new(value.span(), "column name given twice"));
        }
        self.name = Some(name);
        Ok(())
    }
}
