// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::{SecondsFormat, TimeZone, Utc};
use serde_json::Value as Json;

use super::LOB_PREFIX;
use crate::{
    error::Result,
    metadata::FieldKind,
    record::Record,
    value::{DATE_FORMAT, TIME_FORMAT, Value}
};

/// Render `record` and every related entity as an object.
///
/// Fields appear in declaration order, keyed by field name.
///
/// # Errors
///
/// Accessor failures.
pub fn encode(record: &dyn Record) -> Result<String> {
    let mut out = String::new();
    write_record(record, &mut out)?;
    Ok(out)
}

/// Render raw rows as an array of arrays.
#[must_use]
pub fn encode_rows(rows: &[Vec<Value>]) -> String {
    let rows = rows
        .iter()
        .map(|row| Json::Array(row.iter().map(scalar).collect()))
        .collect();
    Json::Array(rows).to_string()
}

fn write_record(record: &dyn Record, out: &mut String) -> Result<()> {
    out.push('{');
    for (i, field) in record.metadata().fields().iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(&Json::from(field.name()).to_string());
        out.push_str(": ");
        match field.kind() {
            FieldKind::ManyToOne {
                ..
            } => match field.reference(record)? {
                Some(target) => write_record(target, out)?,
                None => out.push_str("null")
            },
            FieldKind::OneToMany {
                ..
            } => {
                out.push('[');
                for (j, child) in field.children(record)?.into_iter().enumerate() {
                    if j > 0 {
                        out.push_str(", ");
                    }
                    write_record(child, out)?;
                }
                out.push(']');
            }
            _ => out.push_str(&scalar(&field.get(record)?).to_string())
        }
    }
    out.push('}');
    Ok(())
}

/// JSON form of a single value.
pub(super) fn scalar(value: &Value) -> Json {
    match value {
        Value::Null => Json::Null,
        Value::Bool(v) => Json::from(*v),
        Value::Byte(v) => Json::from(*v),
        Value::Short(v) => Json::from(*v),
        Value::Int(v) => Json::from(*v),
        Value::Long(v) => Json::from(*v),
        Value::Float(v) => Json::from(f64::from(*v)),
        Value::Double(v) => Json::from(*v),
        Value::Char(v) => Json::from(v.to_string()),
        Value::Text(v) => Json::from(v.as_str()),
        Value::Bytes(v) if v.is_empty() => Json::from(""),
        Value::Bytes(v) => Json::from(format!("{LOB_PREFIX}{}", STANDARD.encode(v))),
        Value::Date(v) => Json::from(v.format(DATE_FORMAT).to_string()),
        Value::Time(v) => Json::from(v.format(TIME_FORMAT).to_string()),
        Value::Timestamp(v) => {
            Json::from(Utc.from_utc_datetime(v).to_rfc3339_opts(SecondsFormat::AutoSi, true))
        }
    }
}
