// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Dynamically typed column values.
//!
//! Every mapped field is read and written through [`Value`]. Rust field types
//! opt in by implementing [`SqlValue`], which fixes the declared
//! [`ValueType`] of the column and converts in both directions.
//!
//! # Type Table
//!
//! ```text
//! ┌───────────────────┬─────────────┬──────────────────────┐
//! │ Rust type         │ ValueType   │ Canonical SQL        │
//! ├───────────────────┼─────────────┼──────────────────────┤
//! │ bool              │ Bool        │ BOOLEAN              │
//! │ i8 / i16          │ Byte/Short  │ SMALLINT             │
//! │ i32               │ Int         │ INT                  │
//! │ i64               │ Long        │ BIGINT               │
//! │ f32 / f64         │ Float/Double│ FLOAT / DOUBLE       │
//! │ char              │ Char        │ CHAR                 │
//! │ String            │ Text        │ VARCHAR(n)/LONG ...  │
//! │ Vec<u8>           │ Bytes       │ BLOB                 │
//! │ NaiveDate         │ Date        │ DATE                 │
//! │ NaiveTime         │ Time        │ TIME                 │
//! │ NaiveDateTime     │ Timestamp   │ TIMESTAMP            │
//! │ DateTime<Utc>     │ Timestamp   │ TIMESTAMP            │
//! │ Option<T>         │ T           │ T (nullable)         │
//! │ #[derive(Enum..)] │ Int         │ INT (ordinal)        │
//! └───────────────────┴─────────────┴──────────────────────┘
//! ```
//!
//! Drivers are loosely typed (SQLite hands back `i64`, `f64`, text and
//! blobs), so values read from a row go through [`Value::coerce`] before they
//! reach a setter.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

use crate::error::{Error, Result};

/// Date format used for text round-trips.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Time format used for text round-trips.
pub const TIME_FORMAT: &str = "%H:%M:%S%.f";

/// Timestamp format used for text round-trips.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Declared type of a mapped column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// `bool`.
    Bool,
    /// `i8`.
    Byte,
    /// `i16`.
    Short,
    /// `i32`.
    Int,
    /// `i64`.
    Long,
    /// `f32`.
    Float,
    /// `f64`.
    Double,
    /// `char`.
    Char,
    /// `String`.
    Text,
    /// `Vec<u8>`.
    Bytes,
    /// Calendar date.
    Date,
    /// Time of day.
    Time,
    /// Date and time.
    Timestamp
}

impl ValueType {
    /// Name used in error messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Byte => "byte",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::Char => "char",
            Self::Text => "text",
            Self::Bytes => "bytes",
            Self::Date => "date",
            Self::Time => "time",
            Self::Timestamp => "timestamp"
        }
    }

    /// Whether the type is one of the date/time types.
    #[must_use]
    pub const fn is_temporal(self) -> bool {
        matches!(self, Self::Date | Self::Time | Self::Timestamp)
    }

    /// Whether the type is an integer type.
    #[must_use]
    pub const fn is_integer(self) -> bool {
        matches!(self, Self::Byte | Self::Short | Self::Int | Self::Long)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single column value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// SQL `NULL`, also used for an unset id.
    Null,
    /// Boolean.
    Bool(bool),
    /// 8-bit integer.
    Byte(i8),
    /// 16-bit integer.
    Short(i16),
    /// 32-bit integer.
    Int(i32),
    /// 64-bit integer.
    Long(i64),
    /// 32-bit float.
    Float(f32),
    /// 64-bit float.
    Double(f64),
    /// Single character.
    Char(char),
    /// Text.
    Text(String),
    /// Binary data.
    Bytes(Vec<u8>),
    /// Calendar date.
    Date(NaiveDate),
    /// Time of day.
    Time(NaiveTime),
    /// Date and time, interpreted as UTC.
    Timestamp(NaiveDateTime)
}

impl Value {
    /// Whether this is [`Value::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Declared type of this value, `None` for `Null`.
    #[must_use]
    pub const fn value_type(&self) -> Option<ValueType> {
        Some(match self {
            Self::Null => return None,
            Self::Bool(_) => ValueType::Bool,
            Self::Byte(_) => ValueType::Byte,
            Self::Short(_) => ValueType::Short,
            Self::Int(_) => ValueType::Int,
            Self::Long(_) => ValueType::Long,
            Self::Float(_) => ValueType::Float,
            Self::Double(_) => ValueType::Double,
            Self::Char(_) => ValueType::Char,
            Self::Text(_) => ValueType::Text,
            Self::Bytes(_) => ValueType::Bytes,
            Self::Date(_) => ValueType::Date,
            Self::Time(_) => ValueType::Time,
            Self::Timestamp(_) => ValueType::Timestamp
        })
    }

    fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Bool(v) => Some(i64::from(*v)),
            Self::Byte(v) => Some(i64::from(*v)),
            Self::Short(v) => Some(i64::from(*v)),
            Self::Int(v) => Some(i64::from(*v)),
            Self::Long(v) => Some(*v),
            Self::Float(v) if v.fract() == 0.0 => Some(*v as i64),
            Self::Double(v) if v.fract() == 0.0 => Some(*v as i64),
            Self::Text(v) => v.trim().parse().ok(),
            _ => None
        }
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(f64::from(*v)),
            Self::Double(v) => Some(*v),
            Self::Text(v) => v.trim().parse().ok(),
            other => other.as_i64().map(|v| v as f64)
        }
    }

    /// Convert a driver value into the declared column type.
    ///
    /// `Null` passes through unchanged. Integers narrow with range checks,
    /// text is parsed for numbers and temporals, and integers become booleans
    /// by comparing with zero.
    ///
    /// # Errors
    ///
    /// [`Error::Binding`] when the value cannot represent the target type.
    pub fn coerce(self, target: ValueType) -> Result<Self> {
        if self.is_null() || self.value_type() == Some(target) {
            return Ok(self);
        }
        let converted = match target {
            ValueType::Bool => match &self {
                Self::Text(v) => match v.trim().to_ascii_lowercase().as_str() {
                    "true" | "1" => Some(Self::Bool(true)),
                    "false" | "0" => Some(Self::Bool(false)),
                    _ => None
                },
                other => other.as_i64().map(|v| Self::Bool(v != 0))
            },
            ValueType::Byte => self.as_i64().and_then(|v| i8::try_from(v).ok()).map(Self::Byte),
            ValueType::Short => self.as_i64().and_then(|v| i16::try_from(v).ok()).map(Self::Short),
            ValueType::Int => self.as_i64().and_then(|v| i32::try_from(v).ok()).map(Self::Int),
            ValueType::Long => self.as_i64().map(Self::Long),
            ValueType::Float => self.as_f64().map(|v| Self::Float(v as f32)),
            ValueType::Double => self.as_f64().map(Self::Double),
            ValueType::Char => match &self {
                Self::Text(v) => {
                    let mut chars = v.chars();
                    match (chars.next(), chars.next()) {
                        (Some(c), None) => Some(Self::Char(c)),
                        _ => None
                    }
                }
                _ => None
            },
            ValueType::Text => match &self {
                Self::Bytes(_) => None,
                other => Some(Self::Text(other.to_string()))
            },
            ValueType::Bytes => match &self {
                Self::Text(v) => Some(Self::Bytes(v.clone().into_bytes())),
                _ => None
            },
            ValueType::Date => match &self {
                Self::Timestamp(v) => Some(Self::Date(v.date())),
                Self::Text(v) => parse_date(v).map(Self::Date),
                _ => None
            },
            ValueType::Time => match &self {
                Self::Timestamp(v) => Some(Self::Time(v.time())),
                Self::Text(v) => NaiveTime::parse_from_str(v.trim(), TIME_FORMAT)
                    .ok()
                    .map(Self::Time),
                _ => None
            },
            ValueType::Timestamp => match &self {
                Self::Date(v) => v.and_hms_opt(0, 0, 0).map(Self::Timestamp),
                Self::Text(v) => parse_timestamp(v).map(Self::Timestamp),
                _ => None
            }
        };
        converted.ok_or_else(|| Error::binding(format!("cannot convert {self} to {target}")))
    }
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .ok()
        .or_else(|| parse_timestamp(text).map(|ts| ts.date()))
}

fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f"))
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|dt| dt.naive_utc())
        })
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Byte(v) => write!(f, "{v}"),
            Self::Short(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Long(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Double(v) => write!(f, "{v}"),
            Self::Char(v) => write!(f, "{v}"),
            Self::Text(v) => f.write_str(v),
            Self::Bytes(v) => write!(f, "<{} bytes>", v.len()),
            Self::Date(v) => write!(f, "{}", v.format(DATE_FORMAT)),
            Self::Time(v) => write!(f, "{}", v.format(TIME_FORMAT)),
            Self::Timestamp(v) => write!(f, "{}", v.format(TIMESTAMP_FORMAT))
        }
    }
}

/// Conversion between a Rust field type and [`Value`].
///
/// Implemented for the primitive types in the module table. Use
/// `#[derive(Enumerated)]` for fieldless enums stored by ordinal.
pub trait SqlValue: Sized {
    /// Declared column type.
    const VALUE_TYPE: ValueType;

    /// Whether the type admits `Null`.
    const NULLABLE: bool = false;

    /// Current value as a [`Value`].
    fn to_value(&self) -> Value;

    /// Build from a [`Value`] already coerced to [`Self::VALUE_TYPE`].
    ///
    /// # Errors
    ///
    /// [`Error::Binding`] on type mismatch or `Null` for a non-nullable type.
    fn from_value(value: Value) -> Result<Self>;
}

fn mismatch<T>(expected: ValueType, found: &Value) -> Result<T> {
    Err(Error::binding(format!("expected {expected}, found {found:?}")))
}

macro_rules! impl_sql_value {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl SqlValue for $ty {
                const VALUE_TYPE: ValueType = ValueType::$variant;

                fn to_value(&self) -> Value {
                    Value::$variant(self.clone())
                }

                fn from_value(value: Value) -> Result<Self> {
                    match value.coerce(ValueType::$variant)? {
                        Value::$variant(v) => Ok(v),
                        other => mismatch(ValueType::$variant, &other)
                    }
                }
            }
        )*
    };
}

impl_sql_value! {
    bool => Bool,
    i8 => Byte,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    char => Char,
    String => Text,
    Vec<u8> => Bytes,
    NaiveDate => Date,
    NaiveTime => Time,
    NaiveDateTime => Timestamp
}

impl SqlValue for DateTime<Utc> {
    const VALUE_TYPE: ValueType = ValueType::Timestamp;

    fn to_value(&self) -> Value {
        Value::Timestamp(self.naive_utc())
    }

    fn from_value(value: Value) -> Result<Self> {
        NaiveDateTime::from_value(value).map(|naive| Utc.from_utc_datetime(&naive))
    }
}

impl<T: SqlValue> SqlValue for Option<T> {
    const VALUE_TYPE: ValueType = T::VALUE_TYPE;
    const NULLABLE: bool = true;

    fn to_value(&self) -> Value {
        self.as_ref().map_or(Value::Null, SqlValue::to_value)
    }

    fn from_value(value: Value) -> Result<Self> {
        if value.is_null() {
            Ok(None)
        } else {
            T::from_value(value).map(Some)
        }
    }
}

/// Fieldless enum stored by declaration ordinal.
///
/// Derive with `#[derive(Enumerated)]`; the derive also implements
/// [`SqlValue`] with [`ValueType::Int`].
pub trait Enumerated: Sized {
    /// Zero-based declaration position.
    fn ordinal(&self) -> i32;

    /// Variant at `ordinal`, if any.
    fn from_ordinal(ordinal: i32) -> Option<Self>;
}

/// Decode an [`Enumerated`] from its stored ordinal.
///
/// # Errors
///
/// [`Error::Binding`] when the value is not an integer or the ordinal is out
/// of range.
pub fn enum_from_value<E: Enumerated>(value: Value) -> Result<E> {
    let ordinal = i32::from_value(value)?;
    E::from_ordinal(ordinal).ok_or_else(|| {
        Error::binding(format!(
            "ordinal {ordinal} is out of range for {}",
            std::any::type_name::<E>()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerce_narrows_integers() {
        assert_eq!(Value::Long(7).coerce(ValueType::Int).ok(), Some(Value::Int(7)));
        assert_eq!(Value::Long(7).coerce(ValueType::Byte).ok(), Some(Value::Byte(7)));
        assert!(Value::Long(i64::MAX).coerce(ValueType::Int).is_err());
    }

    #[test]
    fn coerce_integer_to_bool() {
        assert_eq!(Value::Long(1).coerce(ValueType::Bool).ok(), Some(Value::Bool(true)));
        assert_eq!(Value::Long(0).coerce(ValueType::Bool).ok(), Some(Value::Bool(false)));
    }

    #[test]
    fn coerce_text_to_temporals() {
        let date = NaiveDate::from_ymd_opt(1990, 5, 17).unwrap();
        assert_eq!(
            Value::Text("1990-05-17".into()).coerce(ValueType::Date).ok(),
            Some(Value::Date(date))
        );
        let ts = date.and_hms_opt(8, 30, 0).unwrap();
        assert_eq!(
            Value::Text("1990-05-17 08:30:00".into())
                .coerce(ValueType::Timestamp)
                .ok(),
            Some(Value::Timestamp(ts))
        );
        let time = NaiveTime::from_hms_milli_opt(8, 30, 0, 250).unwrap();
        assert_eq!(
            Value::Text("08:30:00.250".into()).coerce(ValueType::Time).ok(),
            Some(Value::Time(time))
        );
    }

    #[test]
    fn coerce_keeps_null() {
        assert_eq!(Value::Null.coerce(ValueType::Date).ok(), Some(Value::Null));
    }

    #[test]
    fn coerce_rejects_garbage() {
        let err = Value::Text("soon".into()).coerce(ValueType::Date);
        assert!(matches!(err, Err(Error::Binding(_))));
    }

    #[test]
    fn char_from_single_letter_text() {
        assert_eq!(char::from_value(Value::Text("x".into())).ok(), Some('x'));
        assert!(char::from_value(Value::Text("xy".into())).is_err());
    }

    #[test]
    fn option_maps_null() {
        assert_eq!(Option::<i64>::from_value(Value::Null).ok(), Some(None));
        assert_eq!(Some(3i64).to_value(), Value::Long(3));
        assert_eq!(None::<i64>.to_value(), Value::Null);
        assert!(<Option<String> as SqlValue>::NULLABLE);
        assert!(!<String as SqlValue>::NULLABLE);
    }

    #[test]
    fn non_nullable_rejects_null() {
        assert!(i32::from_value(Value::Null).is_err());
    }

    #[test]
    fn utc_timestamp_round_trip() {
        let now = Utc.with_ymd_and_hms(2024, 2, 29, 12, 0, 1).unwrap();
        let value = now.to_value();
        assert_eq!(DateTime::<Utc>::from_value(value).ok(), Some(now));
    }

    #[derive(Debug, PartialEq)]
    enum Level {
        Low,
        High
    }

    impl Enumerated for Level {
        fn ordinal(&self) -> i32 {
            match self {
                Self::Low => 0,
                Self::High => 1
            }
        }

        fn from_ordinal(ordinal: i32) -> Option<Self> {
            match ordinal {
                0 => Some(Self::Low),
                1 => Some(Self::High),
                _ => None
            }
        }
    }

    #[test]
    fn enum_from_stored_ordinal() {
        assert_eq!(enum_from_value::<Level>(Value::Long(1)).ok(), Some(Level::High));
        assert!(enum_from_value::<Level>(Value::Int(5)).is_err());
    }
}
