// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Statement parameter binding.
//!
//! Values are appended in the same order the generator lists columns, so a
//! plan's placeholders and the bound values always line up. A many-to-one
//! field binds the referenced entity's id, never the entity itself.

use crate::{
    error::{Error, Result},
    metadata::FieldKind,
    record::Record,
    sql::dml::bound_fields,
    value::Value
};

/// Append the bound field values of `record` to `params`.
///
/// Returns the number of values appended.
///
/// # Errors
///
/// [`Error::Binding`] when a referenced entity has not been saved (its id
/// is unset); accessor failures.
pub fn bind(record: &dyn Record, params: &mut Vec<Value>) -> Result<usize> {
    let metadata = record.metadata();
    let before = params.len();
    for field in bound_fields(metadata) {
        let value = match field.kind() {
            FieldKind::ManyToOne {
                ..
            } => match field.reference(record)? {
                Some(target) => {
                    let id = target.metadata().id_value(target)?;
                    if id.is_null() {
                        return Err(Error::binding(format!(
                            "`{}.{}` references an unsaved {}",
                            metadata.type_name(),
                            field.name(),
                            target.metadata().type_name()
                        )));
                    }
                    id
                }
                None => Value::Null
            },
            _ => field.get(record)?
        };
        params.push(value);
    }
    Ok(params.len() - before)
}

/// Id of a persisted `record`.
///
/// # Errors
///
/// [`Error::Metadata`] when the type has no id, [`Error::Binding`] when the
/// id is unset.
pub fn persisted_id(record: &dyn Record) -> Result<Value> {
    let metadata = record.metadata();
    let id = metadata.id_value(record)?;
    if id.is_null() {
        return Err(Error::binding(format!(
            "{} has no id; it must be inserted first",
            metadata.type_name()
        )));
    }
    Ok(id)
}
