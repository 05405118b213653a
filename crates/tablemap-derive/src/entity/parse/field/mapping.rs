// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Relation markers and their options.
//!
//! ```text
//! #[generated]                          start 1, increment 1
//! #[generated(start = 100, increment = 10)]
//! #[temporal(date | time | timestamp, name = "col")]
//! #[enumerated] / #[enumerated(name = "col")]
//! #[lob] / #[lob(name = "col")]
//! #[many_to_one] / #[many_to_one(name = "col")]
//! #[one_to_many] / #[one_to_many(join_column = "col")]
//! ```

use syn::{Attribute, LitInt, LitStr, Meta, Token, Type};

use super::column::ColumnConfig;

/// Identity generation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generated {
    /// First value.
    pub start: i64,

    /// Step between values.
    pub increment: i64
}

impl Default for Generated {
    fn default() -> Self {
        Self {
            start:     1,
            increment: 1
        }
    }
}

impl Generated {
    /// Parse `#[generated]` or `#[generated(start = .., increment = ..)]`.
    ///
    /// # Errors
    ///
    /// Unknown options, non-integer values or a zero increment.
    pub fn from_attr(attr: &Attribute) -> syn::Result<Self> {
        let mut generated = Self::default();
        if matches!(attr.meta, Meta::Path(_)) {
            return Ok(generated);
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("start") {
                let _: Token![=] = meta.input.parse()?;
                generated.start = parse_signed(meta.input)?;
            } else if meta.path.is_ident("increment") {
                let _: Token![=] = meta.input.parse()?;
                let span = meta.input.span();
                generated.increment = parse_signed(meta.input)?;
                if generated.increment == 0 {
                    return Err(syn::Error::new(span, "increment must not be zero"));
                }
            } else {
                return Err(meta.error("expected `start` or `increment`"));
            }
            Ok(())
        })?;
        Ok(generated)
    }
}

fn parse_signed(input: syn::parse::ParseStream<'_>) -> syn::Result<i64> {
    let negative = input.peek(Token![-]);
    if negative {
        let _: Token![-] = input.parse()?;
    }
    let value: LitInt = input.parse()?;
    let magnitude: i64 = value.base10_parse()?;
    Ok(if negative { -magnitude } else { magnitude })
}

/// Temporal precision selected by `#[temporal(...)]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Temporal {
    /// `DATE`
    Date,
    /// `TIME`
    Time,
    /// `TIMESTAMP`
    Timestamp
}

impl Temporal {
    /// Parse `#[temporal(kind, name = "col")]`, recording the name in `column`.
    ///
    /// # Errors
    ///
    /// Missing or repeated kind, unknown options.
    pub fn from_attr(attr: &Attribute, column: &mut ColumnConfig) -> syn::Result<Self> {
        let mut kind = None;
        attr.parse_nested_meta(|meta| {
            let found = if meta.path.is_ident("date") {
                Self::Date
            } else if meta.path.is_ident("time") {
                Self::Time
            } else if meta.path.is_ident("timestamp") {
                Self::Timestamp
            } else if meta.path.is_ident("name") {
                let _: Token![=] = meta.input.parse()?;
                let value: LitStr = meta.input.parse()?;
                return column.set_name(value);
            } else {
                return Err(meta.error("expected `date`, `time`, `timestamp` or `name`"));
            };
            if kind.replace(found).is_some() {
                return Err(meta.error("temporal kind given twice"));
            }
            Ok(())
        })?;
        kind.ok_or_else(|| {
            syn::Error::new_spanned(attr, "expected one of `date`, `time`, `timestamp`")
        })
    }
}

/// Parse an optional single `name = "col"` option into `column`.
///
/// Used by `#[enumerated]`, `#[lob]` and `#[many_to_one]`.
///
/// # Errors
///
/// Any option other than `name`.
pub fn parse_name(attr: &Attribute, column: &mut ColumnConfig) -> syn::Result<()> {
    if matches!(attr.meta, Meta::Path(_)) {
        return Ok(());
    }
    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("name") {
            let _: Token![=] = meta.input.parse()?;
            let value: LitStr = meta.input.parse()?;
            column.set_name(value)
        } else {
            Err(meta.error("expected `name`"))
        }
    })
}

/// Parse an optional `join_column = "col"` option of `#[one_to_many]`.
///
/// # Errors
///
/// Any other option, or an empty name.
pub fn parse_join_column(attr: &Attribute) -> syn::Result<Option<String>> {
    let mut join_column = None;
    if matches!(attr.meta, Meta::Path(_)) {
        return Ok(join_column);
    }
    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("join_column") {
            let _: Token![=] = meta.input.parse()?;
            let value: LitStr = meta.input.parse()?;
            if value.value().trim().is_empty() {
                return Err(syn::Error::new(value.span(), "join column must not be empty"));
            }
            join_column = Some(value.value());
            Ok(())
        } else {
            Err(meta.error("expected `join_column`"))
        }
    })?;
    Ok(join_column)
}

/// How a field is mapped.
#[derive(Debug, Clone)]
pub enum Mapping {
    /// Ordinary column.
    Plain,

    /// Identity column, optionally generated by the database.
    Id(Option<Generated>),

    /// Temporal column.
    Temporal(Temporal),

    /// Ordinal-stored enum.
    Enumerated,

    /// Binary large object.
    Lob,

    /// Foreign key to another entity.
    ManyToOne {
        /// Referenced entity type.
        target: Type,
        /// Field type is `Option<Box<T>>` rather than `Option<T>`.
        boxed:  bool
    },

    /// Child entities in their own table.
    OneToMany {
        /// Element entity type.
        element:     Type,
        /// Explicit join column on the child table.
        join_column: Option<String>
    }
}
