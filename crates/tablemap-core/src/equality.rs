// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Structural entity equality.
//!
//! Used by the update path to decide whether a persisted child changed.
//!
//! | Field kind | Comparison |
//! |------------|------------|
//! | plain, id | trimmed, case-insensitive text form |
//! | temporal | value |
//! | enumerated | ordinal |
//! | large object | bytes |
//! | many-to-one | recursive, both absent is equal |
//! | one-to-many | same length, then element-wise in order |

use crate::{
    error::Result,
    metadata::FieldKind,
    record::Record,
    value::Value
};

/// Whether `a` and `b` are the same type with equal mapped fields.
///
/// # Errors
///
/// Accessor failures.
pub fn entities_equal(a: &dyn Record, b: &dyn Record) -> Result<bool> {
    let metadata = a.metadata();
    if !metadata.describes(b) {
        return Ok(false);
    }

    for field in metadata.fields() {
        let equal = match field.kind() {
            FieldKind::Plain | FieldKind::Id | FieldKind::GeneratedId { .. } => {
                loosely_equal(&field.get(a)?, &field.get(b)?)
            }
            FieldKind::Temporal(_) | FieldKind::Enumerated | FieldKind::LargeObject => {
                field.get(a)? == field.get(b)?
            }
            FieldKind::ManyToOne {
                ..
            } => match (field.reference(a)?, field.reference(b)?) {
                (Some(left), Some(right)) => entities_equal(left, right)?,
                (None, None) => true,
                _ => false
            },
            FieldKind::OneToMany {
                ..
            } => {
                let left = field.children(a)?;
                let right = field.children(b)?;
                left.len() == right.len() && all_equal(&left, &right)?
            }
        };
        if !equal {
            log::trace!("{}.{} differs", metadata.type_name(), field.name());
            return Ok(false);
        }
    }
    Ok(true)
}

fn all_equal(left: &[&dyn Record], right: &[&dyn Record]) -> Result<bool> {
    for (l, r) in left.iter().zip(right) {
        if !entities_equal(*l, *r)? {
            return Ok(false);
        }
    }
    Ok(true)
}

fn loosely_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Null, _) | (_, Value::Null) => false,
        _ => a.to_string().trim().to_lowercase() == b.to_string().trim().to_lowercase()
    }
}
