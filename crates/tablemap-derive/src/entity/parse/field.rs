// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Field-level attribute parsing.
//!
//! # Architecture
//!
//! ```text
//! field.rs (coordinator)
//! ├── column.rs  - #[column(...)] options
//! └── mapping.rs - #[id], #[generated] and relation markers
//! ```
//!
//! # Conflicts
//!
//! A field carries at most one of `#[temporal]`, `#[enumerated]`, `#[lob]`,
//! `#[many_to_one]` and `#[one_to_many]`. `#[id]` combines with none of
//! them, `#[generated]` requires `#[id]`, and `#[column(skip)]` excludes
//! everything else.

mod column;
mod mapping;

pub use column::ColumnConfig;
pub use mapping::{Generated, Mapping, Temporal};
use syn::{Attribute, Field, Ident, Meta, Type};

use crate::utils::{collection_element, is_option, reference_target};

/// Field definition with all parsed attributes.
///
/// # Example
///
/// ```rust,ignore
/// #[id]
/// #[generated]              // Mapping::Id(Some(Generated { start: 1, increment: 1 }))
/// pub id: Option<i64>,
///
/// #[column(length = 50)]    // Mapping::Plain, ColumnConfig::length = Some(50)
/// pub name: String,
///
/// #[one_to_many]            // Mapping::OneToMany { element: Order, .. }
/// pub orders: Vec<Order>,
/// ```
#[derive(Debug)]
pub struct FieldDef {
    /// Field identifier.
    pub ident: Ident,

    /// Field type.
    pub ty: Type,

    /// Relation kind.
    pub mapping: Mapping,

    /// Column options.
    pub column: ColumnConfig
}

impl FieldDef {
    /// Parse field definition from syn's `Field`.
    ///
    /// # Errors
    ///
    /// Unnamed fields, malformed attribute options, conflicting markers and
    /// relation markers on fields of the wrong shape.
    pub fn from_field(field: &Field) -> darling::Result<Self> {
        let ident = field.ident.clone().ok_or_else(|| {
            darling::Error::custom("Entity fields must be named").with_span(field)
        })?;
        let ty = field.ty.clone();

        let mut column = ColumnConfig::default();
        let mut is_id = false;
        let mut generated = None;
        let mut marker: Option<(&Attribute, Mapping)> = None;

        for attr in &field.attrs {
            let found = if attr.path().is_ident("id") {
                if !matches!(attr.meta, Meta::Path(_)) {
                    return Err(darling::Error::custom("`#[id]` takes no arguments").with_span(attr));
                }
                is_id = true;
                None
            } else if attr.path().is_ident("generated") {
                generated = Some(Generated::from_attr(attr)?);
                None
            } else if attr.path().is_ident("column") {
                column.merge_attr(attr)?;
                None
            } else if attr.path().is_ident("temporal") {
                Some(Mapping::Temporal(Temporal::from_attr(attr, &mut column)?))
            } else if attr.path().is_ident("enumerated") {
                mapping::parse_name(attr, &mut column)?;
                Some(Mapping::Enumerated)
            } else if attr.path().is_ident("lob") {
                mapping::parse_name(attr, &mut column)?;
                Some(Mapping::Lob)
            } else if attr.path().is_ident("many_to_one") {
                mapping::parse_name(attr, &mut column)?;
                let (target, boxed) = reference_target(&ty).ok_or_else(|| {
                    darling::Error::custom(
                        "`#[many_to_one]` requires a field of type `Option<T>` or `Option<Box<T>>`"
                    )
                    .with_span(&field.ty)
                })?;
                Some(Mapping::ManyToOne {
                    target,
                    boxed
                })
            } else if attr.path().is_ident("one_to_many") {
                let join_column = mapping::parse_join_column(attr)?;
                let element = collection_element(&ty).ok_or_else(|| {
                    darling::Error::custom("`#[one_to_many]` requires a field of type `Vec<T>`")
                        .with_span(&field.ty)
                })?;
                Some(Mapping::OneToMany {
                    element,
                    join_column
                })
            } else {
                None
            };

            if let Some(mapping) = found {
                if let Some((previous, _)) = &marker {
                    return Err(darling::Error::custom(format!(
                        "`#[{}]` conflicts with `#[{}]`",
                        attr_name(attr),
                        attr_name(previous)
                    ))
                    .with_span(attr));
                }
                marker = Some((attr, mapping));
            }
        }

        if generated.is_some() && !is_id {
            return Err(darling::Error::custom("`#[generated]` requires `#[id]`").with_span(&ident));
        }
        if generated.is_some() && !is_option(&ty) {
            return Err(darling::Error::custom(
                "generated ids must be `Option<i32>` or `Option<i64>` so unsaved entities are recognisable"
            )
            .with_span(&field.ty));
        }

        let mapping = match (is_id, marker) {
            (true, Some((attr, _))) => {
                return Err(darling::Error::custom(format!(
                    "`#[id]` cannot be combined with `#[{}]`",
                    attr_name(attr)
                ))
                .with_span(attr));
            }
            (true, None) => Mapping::Id(generated),
            (false, Some((_, mapping))) => mapping,
            (false, None) => Mapping::Plain
        };

        if column.skip && (is_id || !matches!(mapping, Mapping::Plain)) {
            return Err(darling::Error::custom(
                "`#[column(skip)]` excludes every other mapping attribute"
            )
            .with_span(&ident));
        }
        if matches!(mapping, Mapping::OneToMany { .. })
            && (column.name.is_some() || column.length.is_some() || column.nullable || column.unique)
        {
            return Err(darling::Error::custom(
                "one-to-many fields have no column; use `join_column` on `#[one_to_many]`"
            )
            .with_span(&ident));
        }

        Ok(Self {
            ident,
            ty,
            mapping,
            column
        })
    }

    /// Get the field name as an identifier.
    #[must_use]
    pub fn name(&self) -> &Ident {
        &self.ident
    }

    /// Get the field name as a string.
    #[must_use]
    pub fn name_str(&self) -> String {
        self.ident.to_string()
    }

    /// Get the field type.
    #[must_use]
    pub fn ty(&self) -> &Type {
        &self.ty
    }

    /// Column name: the explicit one or the field name.
    #[must_use]
    pub fn column_name(&self) -> String {
        self.column.name.clone().unwrap_or_else(|| self.name_str())
    }

    /// Check if this is the identity field.
    #[must_use]
    pub fn is_id(&self) -> bool {
        matches!(self.mapping, Mapping::Id(_))
    }

    /// Check if the field is excluded from mapping.
    #[must_use]
    pub fn is_skipped(&self) -> bool {
        self.column.skip
    }
}

fn attr_name(attr: &Attribute) -> String {
    attr.path()
        .get_ident()
        .map(ToString::to_string)
        .unwrap_or_default()
}
