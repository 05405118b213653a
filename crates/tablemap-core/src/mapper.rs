// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Result mapping with eager relation loading.
//!
//! ```text
//! SELECT ... FROM Person WHERE ...
//!   └─ row ──► instantiate ──► scalar columns
//!               ├─ many-to-one: SELECT ... FROM <target> WHERE <id> = fk
//!               └─ one-to-many: SELECT ... FROM <child> WHERE <join> = id
//!                                 └─ each child row is mapped the same way
//! ```
//!
//! Every relation is loaded before the parent is returned. An entity that is
//! reached again while it is still being resolved (a reference cycle) is
//! returned with its columns only.

use crate::{
    connection::{Connection, Row, query_logged},
    error::Result,
    metadata::{EntityMetadata, FieldKind},
    record::Record,
    sql::{Condition, dml},
    value::Value
};

/// Materializes rows into entity graphs over one borrowed connection.
#[derive(Debug)]
pub struct Loader<'c, C: Connection + ?Sized> {
    connection: &'c mut C,
    resolving:  Vec<(&'static str, String)>
}

impl<'c, C: Connection + ?Sized> Loader<'c, C> {
    /// Loader over `connection`.
    pub fn new(connection: &'c mut C) -> Self {
        Self {
            connection,
            resolving: Vec::new()
        }
    }

    /// Every entity of `metadata` matching `condition`, in row order.
    ///
    /// # Errors
    ///
    /// Statement failures, conversion failures and mapping errors.
    pub fn load_list(
        &mut self,
        metadata: &EntityMetadata,
        condition: &Condition
    ) -> Result<Vec<Box<dyn Record>>> {
        let plan = dml::select(metadata, condition)?;
        let rows = query_logged(self.connection, &plan.sql, condition.params())?;
        rows.iter().map(|row| self.materialize(metadata, row)).collect()
    }

    /// First entity of `metadata` matching `condition`.
    ///
    /// # Errors
    ///
    /// Same as [`load_list`](Self::load_list).
    pub fn load_first(
        &mut self,
        metadata: &EntityMetadata,
        condition: &Condition
    ) -> Result<Option<Box<dyn Record>>> {
        Ok(self.load_list(metadata, condition)?.into_iter().next())
    }

    /// Build one entity from `row`, then load its relations.
    ///
    /// `NULL` columns leave the field at its default.
    ///
    /// # Errors
    ///
    /// [`Error::Binding`](crate::Error::Binding) when a column value cannot
    /// be converted to the field type; relation query failures.
    pub fn materialize(&mut self, metadata: &EntityMetadata, row: &Row) -> Result<Box<dyn Record>> {
        let mut record = metadata.instantiate();
        for field in metadata.column_fields() {
            if matches!(field.kind(), FieldKind::ManyToOne { .. }) {
                continue;
            }
            if let Some(value) = row.get(field.column_name()).filter(|v| !v.is_null()) {
                field.set(record.as_mut(), value.clone().coerce(field.scalar_type()?)?)?;
            }
        }

        let key = match metadata.id_field() {
            Some(id) => id.get(record.as_ref())?,
            None => Value::Null
        };
        let marker = (metadata.table(), key.to_string());
        if !key.is_null() {
            if self.resolving.contains(&marker) {
                log::trace!("{} {} already resolving, returned shallow", marker.0, marker.1);
                return Ok(record);
            }
            self.resolving.push(marker);
        }

        let resolved = self.resolve_relations(metadata, record.as_mut(), row, &key);
        if !key.is_null() {
            self.resolving.pop();
        }
        resolved?;
        Ok(record)
    }

    fn resolve_relations(
        &mut self,
        metadata: &EntityMetadata,
        record: &mut dyn Record,
        row: &Row,
        key: &Value
    ) -> Result<()> {
        for field in metadata.fields() {
            match field.kind() {
                FieldKind::ManyToOne {
                    ..
                } => {
                    let Some(foreign) = row.get(field.column_name()).filter(|v| !v.is_null()) else {
                        continue;
                    };
                    let target = field.target()?;
                    let target_id = target.require_id()?;
                    let value = foreign.clone().coerce(target_id.scalar_type()?)?;
                    let parent =
                        self.load_first(target, &Condition::equals(target_id.column_name(), value))?;
                    field.set_reference(record, parent)?;
                }
                FieldKind::OneToMany {
                    ..
                } => {
                    if key.is_null() {
                        continue;
                    }
                    let join = field.join_column(metadata)?;
                    let children =
                        self.load_list(field.element()?, &Condition::equals(&join, key.clone()))?;
                    field.set_children(record, children)?;
                }
                _ => {}
            }
        }
        Ok(())
    }
}
