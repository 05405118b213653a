// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use base64::{Engine, engine::general_purpose::STANDARD};
use serde_json::{Map, Value as Json};

use crate::{
    error::{Error, Result},
    metadata::{EntityMetadata, FieldKind, FieldMetadata},
    record::{Entity, Record, downcast_box},
    value::{Value, ValueType}
};

/// Parse an object produced by [`encode`](super::encode) into a `T`.
///
/// # Errors
///
/// [`Error::Format`] when the text does not follow the notation or a value
/// does not fit its field.
pub fn decode<T: Entity>(text: &str) -> Result<T> {
    decode_record(T::entity_metadata(), text).and_then(downcast_box::<T>).map(|boxed| *boxed)
}

/// Parse an object into a new instance described by `metadata`.
///
/// Members are matched to fields by name; `null` leaves a field at its
/// default and missing members are allowed.
///
/// # Errors
///
/// [`Error::Format`] for malformed text, unknown members and values that do
/// not fit their field.
pub fn decode_record(metadata: &EntityMetadata, text: &str) -> Result<Box<dyn Record>> {
    let json: Json = serde_json::from_str(text).map_err(|e| Error::format(e.to_string()))?;
    record_from(metadata, json)
}

fn record_from(metadata: &EntityMetadata, json: Json) -> Result<Box<dyn Record>> {
    let members = object(metadata, json)?;
    let mut record = metadata.instantiate();

    for (name, json) in members {
        let field = metadata.field_named(&name).ok_or_else(|| {
            Error::format(format!("`{}` has no field `{name}`", metadata.type_name()))
        })?;
        if json.is_null() {
            continue;
        }
        assign(field, record.as_mut(), json)
            .map_err(|e| Error::format(format!("`{}`: {}", field.name(), reason(e))))?;
    }
    Ok(record)
}

fn object(metadata: &EntityMetadata, json: Json) -> Result<Map<String, Json>> {
    match json {
        Json::Object(members) => Ok(members),
        other => Err(Error::format(format!(
            "`{}` expects an object, found {other}",
            metadata.type_name()
        )))
    }
}

/// Message of a nested error without repeating the `format` prefix.
fn reason(error: Error) -> String {
    match error {
        Error::Format(reason) => reason,
        other => other.to_string()
    }
}

fn assign(field: &FieldMetadata, record: &mut dyn Record, json: Json) -> Result<()> {
    match field.kind() {
        FieldKind::ManyToOne {
            ..
        } => {
            let target = record_from(field.target()?, json)?;
            field.set_reference(record, Some(target))
        }
        FieldKind::OneToMany {
            ..
        } => {
            let Json::Array(items) = json else {
                return Err(Error::format(format!("expected an array, found {json}")));
            };
            let element = field.element()?;
            let children = items
                .into_iter()
                .map(|item| record_from(element, item))
                .collect::<Result<Vec<_>>>()?;
            field.set_children(record, children)
        }
        _ => {
            let value = scalar(field.scalar_type()?, json).map_err(Error::format)?;
            field.set(record, value)
        }
    }
}

/// Value of type `target` from its JSON form.
fn scalar(target: ValueType, json: Json) -> std::result::Result<Value, String> {
    let value = match (target, json) {
        (_, Json::Null) => Value::Null,
        (ValueType::Bool, Json::Bool(v)) => Value::Bool(v),
        (ValueType::Float | ValueType::Double, Json::Number(n)) => {
            Value::Double(n.as_f64().ok_or_else(|| format!("{n} is not a number"))?)
        }
        (t, Json::Number(n)) if t.is_integer() => {
            Value::Long(n.as_i64().ok_or_else(|| format!("{n} is not an integer"))?)
        }
        (ValueType::Bytes, Json::String(text)) => Value::Bytes(lob_bytes(&text)?),
        (_, Json::String(text)) => Value::Text(text),
        (t, other) => return Err(format!("expected {t}, found {other}"))
    };
    value.coerce(target).map_err(|e| e.to_string())
}

/// Bytes of a large object written as a data URL, or plain base64.
fn lob_bytes(text: &str) -> std::result::Result<Vec<u8>, String> {
    let payload = match text.strip_prefix("data:") {
        Some(url) => url
            .split_once(";base64,")
            .map(|(_, data)| data)
            .ok_or("data URL is not base64")?,
        None => text
    };
    STANDARD.decode(payload).map_err(|e| e.to_string())
}
