// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Entity traits and type-erased access.
//!
//! [`Entity`] is what `#[derive(Entity)]` implements: a `Default`-constructible
//! struct with a static [`EntityMetadata`]. Every entity is also a [`Record`],
//! the object-safe view the runtime walks when it follows relations without
//! knowing concrete types.
//!
//! ```text
//! Person ──impl Entity──► Record (blanket) ──► &dyn Record / Box<dyn Record>
//!                                   ▲
//!                 downcast_ref / downcast_mut / downcast_box
//! ```

use std::{any::Any, fmt};

use crate::{
    error::{Error, Result},
    metadata::EntityMetadata
};

/// A struct mapped onto a table.
///
/// Normally derived. A manual implementation returns a metadata reference
/// cached for the lifetime of the program, usually through a
/// `static OnceLock<EntityMetadata>`.
pub trait Entity: Any + fmt::Debug + Default {
    /// Static descriptor for this type.
    fn entity_metadata() -> &'static EntityMetadata;
}

/// Object-safe view of an entity.
///
/// Implemented for every [`Entity`]; there is no need to implement it by hand.
pub trait Record: Any + fmt::Debug {
    /// Descriptor of the concrete type.
    fn metadata(&self) -> &'static EntityMetadata;

    /// Upcast for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for downcasting.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Owned upcast for downcasting.
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: Entity> Record for T {
    fn metadata(&self) -> &'static EntityMetadata {
        T::entity_metadata()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

fn type_mismatch<T: Entity>(found: &'static EntityMetadata) -> Error {
    Error::binding(format!(
        "expected entity {}, found {}",
        T::entity_metadata().type_name(),
        found.type_name()
    ))
}

/// Borrow a record as its concrete type.
///
/// # Errors
///
/// [`Error::Binding`] when the record is of another type.
pub fn downcast_ref<T: Entity>(record: &dyn Record) -> Result<&T> {
    let found = record.metadata();
    record
        .as_any()
        .downcast_ref::<T>()
        .ok_or_else(|| type_mismatch::<T>(found))
}

/// Mutably borrow a record as its concrete type.
///
/// # Errors
///
/// [`Error::Binding`] when the record is of another type.
pub fn downcast_mut<T: Entity>(record: &mut dyn Record) -> Result<&mut T> {
    let found = record.metadata();
    record
        .as_any_mut()
        .downcast_mut::<T>()
        .ok_or_else(|| type_mismatch::<T>(found))
}

/// Take ownership of a boxed record as its concrete type.
///
/// # Errors
///
/// [`Error::Binding`] when the record is of another type.
pub fn downcast_box<T: Entity>(record: Box<dyn Record>) -> Result<Box<T>> {
    let found = record.metadata();
    record
        .into_any()
        .downcast::<T>()
        .map_err(|_| type_mismatch::<T>(found))
}
