// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Field accessor function pointers.
//!
//! The descriptor stores plain `fn` pointers instead of looking fields up by
//! name. Each pointer downcasts the record to its concrete type and touches
//! exactly one field.

use crate::{
    error::Result,
    record::Record,
    value::Value
};

/// Read a column value.
pub type ScalarGet = fn(&dyn Record) -> Result<Value>;

/// Write a column value.
pub type ScalarSet = fn(&mut dyn Record, Value) -> Result<()>;

/// Borrow the related entity of a many-to-one field.
pub type ReferenceGet = fn(&dyn Record) -> Result<Option<&dyn Record>>;

/// Replace the related entity of a many-to-one field.
pub type ReferenceSet = fn(&mut dyn Record, Option<Box<dyn Record>>) -> Result<()>;

/// Borrow the elements of a one-to-many field.
pub type CollectionGet = fn(&dyn Record) -> Result<Vec<&dyn Record>>;

/// Mutably borrow the elements of a one-to-many field.
pub type CollectionGetMut = fn(&mut dyn Record) -> Result<Vec<&mut dyn Record>>;

/// Replace the elements of a one-to-many field.
pub type CollectionSet = fn(&mut dyn Record, Vec<Box<dyn Record>>) -> Result<()>;

/// Accessor set of one field, shaped by its relation kind.
#[derive(Clone, Copy)]
pub enum Accessor {
    /// Column stored on the entity's own row.
    Scalar {
        /// Getter.
        get: ScalarGet,
        /// Setter.
        set: ScalarSet
    },

    /// Single related entity (many-to-one).
    Reference {
        /// Getter.
        get: ReferenceGet,
        /// Setter.
        set: ReferenceSet
    },

    /// Owned child entities (one-to-many).
    Collection {
        /// Getter.
        get:     CollectionGet,
        /// Mutable getter.
        get_mut: CollectionGetMut,
        /// Setter.
        set:     CollectionSet
    }
}

impl std::fmt::Debug for Accessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Scalar { .. } => "Accessor::Scalar",
            Self::Reference { .. } => "Accessor::Reference",
            Self::Collection { .. } => "Accessor::Collection"
        })
    }
}
