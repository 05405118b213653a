// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Static schema descriptors.
//!
//! An [`EntityMetadata`] is built once per type, usually by
//! `#[derive(Entity)]`, and never mutated afterwards. It answers every
//! question the runtime asks about a type: its table, its columns in
//! declaration order, which field is the id, and how to reach each field.
//!
//! # Module Structure
//!
//! ```text
//! metadata/
//! ├── field.rs    - FieldMetadata, FieldKind, TemporalKind, Constraints
//! └── accessor.rs - fn pointer accessors per relation kind
//! ```
//!
//! # Validation
//!
//! Construction is infallible so descriptors can live in a `static`.
//! [`EntityMetadata::validate`] checks the mapping rules and is run by the
//! runtime before a type is used:
//!
//! | Rule | Error |
//! |------|-------|
//! | at most one id field | `Metadata` |
//! | id is `int`, `long` or `text` | `Metadata` |
//! | generated id is `int` or `long` | `Metadata` |
//! | temporal kind matches the value type | `Metadata` |
//! | enumerated field is stored as `int` | `Metadata` |
//! | large object is `bytes` | `Metadata` |
//! | many-to-one target has an id | `Metadata` |
//! | one-to-many owner has an id | `Metadata` |

mod accessor;
mod field;

pub use accessor::{
    Accessor, CollectionGet, CollectionGetMut, CollectionSet, ReferenceGet, ReferenceSet,
    ScalarGet, ScalarSet
};
pub use field::{Constraints, FieldKind, FieldMetadata, TemporalKind};

use crate::{
    error::{Error, Result},
    record::Record,
    value::{Value, ValueType}
};

/// Descriptor of an entity type.
#[derive(Debug)]
pub struct EntityMetadata {
    type_name:   &'static str,
    table:       &'static str,
    instantiate: fn() -> Box<dyn Record>,
    fields:      Vec<FieldMetadata>
}

impl EntityMetadata {
    /// Start a descriptor.
    ///
    /// # Arguments
    ///
    /// * `type_name` - Rust type name, used in diagnostics
    /// * `table` - Table name
    /// * `instantiate` - Factory for a default instance
    #[must_use]
    pub fn new(
        type_name: &'static str,
        table: &'static str,
        instantiate: fn() -> Box<dyn Record>
    ) -> Self {
        Self {
            type_name,
            table,
            instantiate,
            fields: Vec::new()
        }
    }

    /// Append a field in declaration order.
    #[must_use]
    pub fn field(mut self, field: FieldMetadata) -> Self {
        self.fields.push(field);
        self
    }

    /// Rust type name.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Table name.
    #[must_use]
    pub const fn table(&self) -> &'static str {
        self.table
    }

    /// All fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldMetadata] {
        &self.fields
    }

    /// Field by struct field name.
    #[must_use]
    pub fn field_named(&self, name: &str) -> Option<&FieldMetadata> {
        self.fields.iter().find(|f| f.name() == name)
    }

    /// The id field, if the type declares one.
    #[must_use]
    pub fn id_field(&self) -> Option<&FieldMetadata> {
        self.fields.iter().find(|f| f.is_id())
    }

    /// The id field.
    ///
    /// # Errors
    ///
    /// [`Error::Metadata`] when the type declares none.
    pub fn require_id(&self) -> Result<&FieldMetadata> {
        self.id_field()
            .ok_or_else(|| Error::metadata(self.type_name, "no #[id] field"))
    }

    /// Current id value of `record`.
    ///
    /// # Errors
    ///
    /// [`Error::Metadata`] when the type has no id; accessor failures.
    pub fn id_value(&self, record: &dyn Record) -> Result<Value> {
        self.require_id()?.get(record)
    }

    /// Fields stored on the entity's own row.
    pub fn column_fields(&self) -> impl Iterator<Item = &FieldMetadata> {
        self.fields.iter().filter(|f| f.kind().has_column())
    }

    /// One-to-many fields.
    pub fn collection_fields(&self) -> impl Iterator<Item = &FieldMetadata> {
        self.fields.iter().filter(|f| !f.kind().has_column())
    }

    /// New default instance.
    #[must_use]
    pub fn instantiate(&self) -> Box<dyn Record> {
        (self.instantiate)()
    }

    /// Whether `record` is an instance of this type.
    #[must_use]
    pub fn describes(&self, record: &dyn Record) -> bool {
        std::ptr::eq(self, record.metadata())
    }

    /// Check the mapping rules.
    ///
    /// Related descriptors are only inspected for the properties this type
    /// depends on (the target's id); they are validated on their own when
    /// the runtime reaches them.
    ///
    /// # Errors
    ///
    /// [`Error::Metadata`] naming the first violated rule.
    pub fn validate(&self) -> Result<()> {
        let fail = |reason: String| Err(Error::metadata(self.type_name, reason));

        let ids = self.fields.iter().filter(|f| f.is_id()).count();
        if ids > 1 {
            return fail(format!("{ids} id fields declared, at most one is allowed"));
        }

        for field in &self.fields {
            let name = field.name();
            match *field.kind() {
                FieldKind::Id => {
                    let ty = field.scalar_type()?;
                    if !matches!(ty, ValueType::Int | ValueType::Long | ValueType::Text) {
                        return fail(format!("id `{name}` must be int, long or text, not {ty}"));
                    }
                }
                FieldKind::GeneratedId {
                    step, ..
                } => {
                    let ty = field.scalar_type()?;
                    if !matches!(ty, ValueType::Int | ValueType::Long) {
                        return fail(format!("generated id `{name}` must be int or long, not {ty}"));
                    }
                    if step == 0 {
                        return fail(format!("generated id `{name}` has a zero increment"));
                    }
                    if !field.constraints().nullable {
                        return fail(format!(
                            "generated id `{name}` must be an Option so unsaved entities are recognisable"
                        ));
                    }
                }
                FieldKind::Temporal(kind) => {
                    let ty = field.scalar_type()?;
                    if ty != kind.value_type() {
                        return fail(format!(
                            "temporal field `{name}` is {} but holds {ty}",
                            kind.as_sql()
                        ));
                    }
                }
                FieldKind::Enumerated => {
                    let ty = field.scalar_type()?;
                    if ty != ValueType::Int {
                        return fail(format!("enumerated field `{name}` must store an int ordinal"));
                    }
                }
                FieldKind::LargeObject => {
                    let ty = field.scalar_type()?;
                    if ty != ValueType::Bytes {
                        return fail(format!("large object `{name}` must hold bytes, not {ty}"));
                    }
                }
                FieldKind::ManyToOne {
                    target
                } => {
                    let target = target();
                    if target.id_field().is_none() {
                        return fail(format!(
                            "many-to-one `{name}` targets {} which has no id",
                            target.type_name()
                        ));
                    }
                }
                FieldKind::OneToMany {
                    ..
                } => {
                    if ids == 0 {
                        return fail(format!("one-to-many `{name}` requires an id on the owner"));
                    }
                }
                FieldKind::Plain => {
                    field.scalar_type()?;
                }
            }
        }
        Ok(())
    }
}
