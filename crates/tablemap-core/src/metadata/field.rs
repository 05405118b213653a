// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Per-field mapping rules.
//!
//! | Kind | Column | Notes |
//! |------|--------|-------|
//! | `Plain` | yes | honours nullable / unique / length |
//! | `Id` | yes | identity supplied by the application |
//! | `GeneratedId` | yes | assigned by the database, never inserted or updated |
//! | `Temporal` | yes | `DATE` / `TIME` / `TIMESTAMP NOT NULL` |
//! | `Enumerated` | yes | ordinal, `INT NOT NULL` |
//! | `LargeObject` | yes | `BLOB NOT NULL` |
//! | `ManyToOne` | yes | foreign key holding the target's id |
//! | `OneToMany` | no | children carry a join column back to the owner |

use super::{
    EntityMetadata,
    accessor::{
        Accessor, CollectionGet, CollectionGetMut, CollectionSet, ReferenceGet, ReferenceSet,
        ScalarGet, ScalarSet
    }
};
use crate::{
    error::{Error, Result},
    record::Record,
    value::{Value, ValueType}
};

/// Subtype of a temporal field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemporalKind {
    /// Calendar date.
    Date,
    /// Time of day.
    Time,
    /// Date and time.
    Timestamp
}

impl TemporalKind {
    /// Value type a field of this kind must declare.
    #[must_use]
    pub const fn value_type(self) -> ValueType {
        match self {
            Self::Date => ValueType::Date,
            Self::Time => ValueType::Time,
            Self::Timestamp => ValueType::Timestamp
        }
    }

    /// SQL type keyword.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Date => "DATE",
            Self::Time => "TIME",
            Self::Timestamp => "TIMESTAMP"
        }
    }
}

/// Relation classification of a field.
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    /// Ordinary column.
    Plain,

    /// Identity column with an application-assigned value.
    Id,

    /// Identity column assigned by the database.
    GeneratedId {
        /// First generated value.
        start: i64,
        /// Increment between values.
        step:  i64
    },

    /// Date, time or timestamp column.
    Temporal(TemporalKind),

    /// Enum stored by ordinal.
    Enumerated,

    /// Binary large object.
    LargeObject,

    /// Reference to a parent entity through a foreign key column.
    ManyToOne {
        /// Descriptor of the referenced type.
        target: fn() -> &'static EntityMetadata
    },

    /// Owned children stored in their own table.
    OneToMany {
        /// Descriptor of the element type.
        element:     fn() -> &'static EntityMetadata,
        /// Explicit join column name on the child table.
        join_column: Option<&'static str>
    }
}

impl FieldKind {
    /// Whether the field identifies its entity.
    #[must_use]
    pub const fn is_id(&self) -> bool {
        matches!(self, Self::Id | Self::GeneratedId { .. })
    }

    /// Whether the database assigns the value.
    #[must_use]
    pub const fn is_generated(&self) -> bool {
        matches!(self, Self::GeneratedId { .. })
    }

    /// Whether the field is stored on the entity's own row.
    #[must_use]
    pub const fn has_column(&self) -> bool {
        !matches!(self, Self::OneToMany { .. })
    }
}

/// Column constraints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Constraints {
    /// Column admits `NULL`.
    pub nullable: bool,

    /// Column carries a `UNIQUE` constraint.
    pub unique: bool,

    /// `VARCHAR` length for text columns; `None` maps to `LONG VARCHAR`.
    pub length: Option<u32>
}

/// Mapping rule of a single struct field.
#[derive(Debug, Clone)]
pub struct FieldMetadata {
    name:        &'static str,
    column:      &'static str,
    value_type:  Option<ValueType>,
    kind:        FieldKind,
    constraints: Constraints,
    accessor:    Accessor
}

impl FieldMetadata {
    /// Describe a field stored as a single column.
    ///
    /// The column name defaults to the field name.
    #[must_use]
    pub fn scalar(
        name: &'static str,
        value_type: ValueType,
        kind: FieldKind,
        get: ScalarGet,
        set: ScalarSet
    ) -> Self {
        Self {
            name,
            column: name,
            value_type: Some(value_type),
            kind,
            constraints: Constraints::default(),
            accessor: Accessor::Scalar {
                get,
                set
            }
        }
    }

    /// Describe a many-to-one reference.
    #[must_use]
    pub fn many_to_one(
        name: &'static str,
        target: fn() -> &'static EntityMetadata,
        get: ReferenceGet,
        set: ReferenceSet
    ) -> Self {
        Self {
            name,
            column: name,
            value_type: None,
            kind: FieldKind::ManyToOne {
                target
            },
            constraints: Constraints::default(),
            accessor: Accessor::Reference {
                get,
                set
            }
        }
    }

    /// Describe a one-to-many collection.
    #[must_use]
    pub fn one_to_many(
        name: &'static str,
        element: fn() -> &'static EntityMetadata,
        join_column: Option<&'static str>,
        get: CollectionGet,
        get_mut: CollectionGetMut,
        set: CollectionSet
    ) -> Self {
        Self {
            name,
            column: name,
            value_type: None,
            kind: FieldKind::OneToMany {
                element,
                join_column
            },
            constraints: Constraints::default(),
            accessor: Accessor::Collection {
                get,
                get_mut,
                set
            }
        }
    }

    /// Override the column name.
    #[must_use]
    pub const fn column(mut self, column: &'static str) -> Self {
        self.column = column;
        self
    }

    /// Set the `VARCHAR` length.
    #[must_use]
    pub const fn length(mut self, length: u32) -> Self {
        self.constraints.length = Some(length);
        self
    }

    /// Allow or forbid `NULL`.
    #[must_use]
    pub const fn nullable(mut self, nullable: bool) -> Self {
        self.constraints.nullable = nullable;
        self
    }

    /// Add or remove the `UNIQUE` constraint.
    #[must_use]
    pub const fn unique(mut self, unique: bool) -> Self {
        self.constraints.unique = unique;
        self
    }

    /// Struct field name, used as the JSON key.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Column name.
    #[must_use]
    pub const fn column_name(&self) -> &'static str {
        self.column
    }

    /// Declared value type, `None` for relations.
    #[must_use]
    pub const fn value_type(&self) -> Option<ValueType> {
        self.value_type
    }

    /// Relation kind.
    #[must_use]
    pub const fn kind(&self) -> &FieldKind {
        &self.kind
    }

    /// Column constraints.
    #[must_use]
    pub const fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    /// Whether the field identifies its entity.
    #[must_use]
    pub const fn is_id(&self) -> bool {
        self.kind.is_id()
    }

    /// Whether the value is assigned by the database.
    #[must_use]
    pub const fn is_generated(&self) -> bool {
        self.kind.is_generated()
    }

    /// Declared type of a column-backed scalar field.
    ///
    /// # Errors
    ///
    /// [`Error::Metadata`] for relation fields.
    pub fn scalar_type(&self) -> Result<ValueType> {
        self.value_type.ok_or_else(|| self.not_a("scalar"))
    }

    /// Descriptor of a many-to-one target.
    ///
    /// # Errors
    ///
    /// [`Error::Metadata`] for any other kind.
    pub fn target(&self) -> Result<&'static EntityMetadata> {
        match self.kind {
            FieldKind::ManyToOne {
                target
            } => Ok(target()),
            _ => Err(self.not_a("many-to-one"))
        }
    }

    /// Descriptor of a one-to-many element.
    ///
    /// # Errors
    ///
    /// [`Error::Metadata`] for any other kind.
    pub fn element(&self) -> Result<&'static EntityMetadata> {
        match self.kind {
            FieldKind::OneToMany {
                element, ..
            } => Ok(element()),
            _ => Err(self.not_a("one-to-many"))
        }
    }

    /// Join column on the child table of a one-to-many field.
    ///
    /// Explicit when declared, otherwise `<OwnerTable>_<OwnerIdColumn>`.
    ///
    /// # Errors
    ///
    /// [`Error::Metadata`] when the field is not one-to-many or the owner has
    /// no id.
    pub fn join_column(&self, owner: &EntityMetadata) -> Result<String> {
        match self.kind {
            FieldKind::OneToMany {
                join_column: Some(column),
                ..
            } => Ok(column.to_string()),
            FieldKind::OneToMany {
                join_column: None, ..
            } => {
                let id = owner.require_id()?;
                Ok(format!("{}_{}", owner.table(), id.column_name()))
            }
            _ => Err(self.not_a("one-to-many"))
        }
    }

    /// Read a scalar value.
    ///
    /// # Errors
    ///
    /// Propagates accessor failures; [`Error::Metadata`] for relations.
    pub fn get(&self, record: &dyn Record) -> Result<Value> {
        match self.accessor {
            Accessor::Scalar {
                get, ..
            } => get(record),
            _ => Err(self.not_a("scalar"))
        }
    }

    /// Write a scalar value.
    ///
    /// # Errors
    ///
    /// Propagates accessor failures; [`Error::Metadata`] for relations.
    pub fn set(&self, record: &mut dyn Record, value: Value) -> Result<()> {
        match self.accessor {
            Accessor::Scalar {
                set, ..
            } => set(record, value),
            _ => Err(self.not_a("scalar"))
        }
    }

    /// Borrow the referenced entity.
    ///
    /// # Errors
    ///
    /// Propagates accessor failures; [`Error::Metadata`] for other kinds.
    pub fn reference<'r>(&self, record: &'r dyn Record) -> Result<Option<&'r dyn Record>> {
        match self.accessor {
            Accessor::Reference {
                get, ..
            } => get(record),
            _ => Err(self.not_a("many-to-one"))
        }
    }

    /// Replace the referenced entity.
    ///
    /// # Errors
    ///
    /// Propagates accessor failures; [`Error::Metadata`] for other kinds.
    pub fn set_reference(&self, record: &mut dyn Record, value: Option<Box<dyn Record>>) -> Result<()> {
        match self.accessor {
            Accessor::Reference {
                set, ..
            } => set(record, value),
            _ => Err(self.not_a("many-to-one"))
        }
    }

    /// Borrow the child entities.
    ///
    /// # Errors
    ///
    /// Propagates accessor failures; [`Error::Metadata`] for other kinds.
    pub fn children<'r>(&self, record: &'r dyn Record) -> Result<Vec<&'r dyn Record>> {
        match self.accessor {
            Accessor::Collection {
                get, ..
            } => get(record),
            _ => Err(self.not_a("one-to-many"))
        }
    }

    /// Mutably borrow the child entities.
    ///
    /// # Errors
    ///
    /// Propagates accessor failures; [`Error::Metadata`] for other kinds.
    pub fn children_mut<'r>(&self, record: &'r mut dyn Record) -> Result<Vec<&'r mut dyn Record>> {
        match self.accessor {
            Accessor::Collection {
                get_mut, ..
            } => get_mut(record),
            _ => Err(self.not_a("one-to-many"))
        }
    }

    /// Replace the child entities.
    ///
    /// # Errors
    ///
    /// Propagates accessor failures; [`Error::Metadata`] for other kinds.
    pub fn set_children(&self, record: &mut dyn Record, children: Vec<Box<dyn Record>>) -> Result<()> {
        match self.accessor {
            Accessor::Collection {
                set, ..
            } => set(record, children),
            _ => Err(self.not_a("one-to-many"))
        }
    }

    fn not_a(&self, expected: &str) -> Error {
        Error::metadata(self.name, format!("field is not a {expected} field"))
    }
}
