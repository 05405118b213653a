// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Hand-written entities for unit tests.
//!
//! These mirror what `#[derive(Entity)]` expands to, so the runtime can be
//! tested without the proc-macro crate.

use std::sync::OnceLock;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::{
    connection::{Connection, Row},
    error::{Error, Result},
    metadata::{EntityMetadata, FieldKind, FieldMetadata, TemporalKind},
    record::{Entity, Record, downcast_box, downcast_mut, downcast_ref},
    value::{Enumerated, SqlValue, Value, ValueType, enum_from_value}
};

macro_rules! scalar_accessors {
    ($ty:ty, $field:ident, $get:ident, $set:ident) => {
        fn $get(record: &dyn Record) -> Result<Value> {
            Ok(SqlValue::to_value(&downcast_ref::<$ty>(record)?.$field))
        }

        fn $set(record: &mut dyn Record, value: Value) -> Result<()> {
            downcast_mut::<$ty>(record)?.$field = SqlValue::from_value(value)?;
            Ok(())
        }
    };
}

/// Parent entity with a generated id and a child collection.
#[derive(Debug, Default, Clone)]
pub struct Person {
    pub id:     Option<i64>,
    pub name:   String,
    pub birth:  NaiveDate,
    pub orders: Vec<Order>
}

impl Person {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            birth: NaiveDate::from_ymd_opt(1990, 5, 17).unwrap_or_default(),
            ..Self::default()
        }
    }
}

scalar_accessors!(Person, id, person_get_id, person_set_id);
scalar_accessors!(Person, name, person_get_name, person_set_name);
scalar_accessors!(Person, birth, person_get_birth, person_set_birth);

fn person_get_orders(record: &dyn Record) -> Result<Vec<&dyn Record>> {
    Ok(downcast_ref::<Person>(record)?
        .orders
        .iter()
        .map(|o| o as &dyn Record)
        .collect())
}

fn person_get_orders_mut(record: &mut dyn Record) -> Result<Vec<&mut dyn Record>> {
    Ok(downcast_mut::<Person>(record)?
        .orders
        .iter_mut()
        .map(|o| o as &mut dyn Record)
        .collect())
}

fn person_set_orders(record: &mut dyn Record, values: Vec<Box<dyn Record>>) -> Result<()> {
    downcast_mut::<Person>(record)?.orders = values
        .into_iter()
        .map(|v| downcast_box::<Order>(v).map(|b| *b))
        .collect::<Result<Vec<_>>>()?;
    Ok(())
}

impl Entity for Person {
    fn entity_metadata() -> &'static EntityMetadata {
        static METADATA: OnceLock<EntityMetadata> = OnceLock::new();
        METADATA.get_or_init(|| {
            EntityMetadata::new("Person", "Person", || Box::new(Person::default()) as Box<dyn Record>)
                .field(
                    FieldMetadata::scalar(
                        "id",
                        ValueType::Long,
                        FieldKind::GeneratedId {
                            start: 1,
                            step:  1
                        },
                        person_get_id,
                        person_set_id
                    )
                    .nullable(true)
                )
                .field(
                    FieldMetadata::scalar(
                        "name",
                        ValueType::Text,
                        FieldKind::Plain,
                        person_get_name,
                        person_set_name
                    )
                    .length(50)
                )
                .field(FieldMetadata::scalar(
                    "birth",
                    ValueType::Date,
                    FieldKind::Temporal(TemporalKind::Date),
                    person_get_birth,
                    person_set_birth
                ))
                .field(FieldMetadata::one_to_many(
                    "orders",
                    Order::entity_metadata,
                    None,
                    person_get_orders,
                    person_get_orders_mut,
                    person_set_orders
                ))
        })
    }
}

/// Child entity stored in `Orders`.
#[derive(Debug, Default, Clone)]
pub struct Order {
    pub id:     Option<i64>,
    pub amount: f64
}

impl Order {
    pub fn priced(amount: f64) -> Self {
        Self {
            id: None,
            amount
        }
    }
}

scalar_accessors!(Order, id, order_get_id, order_set_id);
scalar_accessors!(Order, amount, order_get_amount, order_set_amount);

impl Entity for Order {
    fn entity_metadata() -> &'static EntityMetadata {
        static METADATA: OnceLock<EntityMetadata> = OnceLock::new();
        METADATA.get_or_init(|| {
            EntityMetadata::new("Order", "Orders", || Box::new(Order::default()) as Box<dyn Record>)
                .field(
                    FieldMetadata::scalar(
                        "id",
                        ValueType::Long,
                        FieldKind::GeneratedId {
                            start: 1,
                            step:  1
                        },
                        order_get_id,
                        order_set_id
                    )
                    .nullable(true)
                )
                .field(FieldMetadata::scalar(
                    "amount",
                    ValueType::Double,
                    FieldKind::Plain,
                    order_get_amount,
                    order_set_amount
                ))
        })
    }
}

/// Ordinal-stored enum.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Grade {
    #[default]
    Poor,
    Fair,
    Great
}

impl Enumerated for Grade {
    fn ordinal(&self) -> i32 {
        match self {
            Self::Poor => 0,
            Self::Fair => 1,
            Self::Great => 2
        }
    }

    fn from_ordinal(ordinal: i32) -> Option<Self> {
        match ordinal {
            0 => Some(Self::Poor),
            1 => Some(Self::Fair),
            2 => Some(Self::Great),
            _ => None
        }
    }
}

impl SqlValue for Grade {
    const VALUE_TYPE: ValueType = ValueType::Int;

    fn to_value(&self) -> Value {
        Value::Int(self.ordinal())
    }

    fn from_value(value: Value) -> Result<Self> {
        enum_from_value(value)
    }
}

/// Entity exercising every scalar kind plus a many-to-one reference.
#[derive(Debug, Default, Clone)]
pub struct Review {
    pub code:   String,
    pub author: Option<Box<Person>>,
    pub grade:  Grade,
    pub photo:  Vec<u8>,
    pub posted: NaiveDateTime,
    pub at:     NaiveTime,
    pub pinned: bool,
    pub votes:  i16,
    pub mark:   char,
    pub score:  f32,
    pub note:   Option<String>
}

impl Review {
    pub fn sample() -> Self {
        let day = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap_or_default();
        Self {
            code:   "R-1".into(),
            author: None,
            grade:  Grade::Great,
            photo:  vec![0x89, b'P', b'N', b'G', 0, 255],
            posted: day.and_hms_milli_opt(14, 5, 6, 120).unwrap_or_default(),
            at:     NaiveTime::from_hms_opt(9, 30, 0).unwrap_or_default(),
            pinned: true,
            votes:  -3,
            mark:   'A',
            score:  4.5,
            note:   Some("says \"hi\", then, {leaves}".into())
        }
    }
}

scalar_accessors!(Review, code, review_get_code, review_set_code);
scalar_accessors!(Review, grade, review_get_grade, review_set_grade);
scalar_accessors!(Review, photo, review_get_photo, review_set_photo);
scalar_accessors!(Review, posted, review_get_posted, review_set_posted);
scalar_accessors!(Review, at, review_get_at, review_set_at);
scalar_accessors!(Review, pinned, review_get_pinned, review_set_pinned);
scalar_accessors!(Review, votes, review_get_votes, review_set_votes);
scalar_accessors!(Review, mark, review_get_mark, review_set_mark);
scalar_accessors!(Review, score, review_get_score, review_set_score);
scalar_accessors!(Review, note, review_get_note, review_set_note);

fn review_get_author(record: &dyn Record) -> Result<Option<&dyn Record>> {
    Ok(downcast_ref::<Review>(record)?
        .author
        .as_deref()
        .map(|p| p as &dyn Record))
}

fn review_set_author(record: &mut dyn Record, value: Option<Box<dyn Record>>) -> Result<()> {
    downcast_mut::<Review>(record)?.author = match value {
        Some(v) => Some(downcast_box::<Person>(v)?),
        None => None
    };
    Ok(())
}

impl Entity for Review {
    fn entity_metadata() -> &'static EntityMetadata {
        static METADATA: OnceLock<EntityMetadata> = OnceLock::new();
        METADATA.get_or_init(|| {
            EntityMetadata::new("Review", "Review", || Box::new(Review::default()) as Box<dyn Record>)
                .field(
                    FieldMetadata::scalar(
                        "code",
                        ValueType::Text,
                        FieldKind::Id,
                        review_get_code,
                        review_set_code
                    )
                    .length(12)
                )
                .field(
                    FieldMetadata::many_to_one(
                        "author",
                        Person::entity_metadata,
                        review_get_author,
                        review_set_author
                    )
                    .column("author_id")
                )
                .field(FieldMetadata::scalar(
                    "grade",
                    ValueType::Int,
                    FieldKind::Enumerated,
                    review_get_grade,
                    review_set_grade
                ))
                .field(FieldMetadata::scalar(
                    "photo",
                    ValueType::Bytes,
                    FieldKind::LargeObject,
                    review_get_photo,
                    review_set_photo
                ))
                .field(FieldMetadata::scalar(
                    "posted",
                    ValueType::Timestamp,
                    FieldKind::Temporal(TemporalKind::Timestamp),
                    review_get_posted,
                    review_set_posted
                ))
                .field(FieldMetadata::scalar(
                    "at",
                    ValueType::Time,
                    FieldKind::Temporal(TemporalKind::Time),
                    review_get_at,
                    review_set_at
                ))
                .field(FieldMetadata::scalar(
                    "pinned",
                    ValueType::Bool,
                    FieldKind::Plain,
                    review_get_pinned,
                    review_set_pinned
                ))
                .field(FieldMetadata::scalar(
                    "votes",
                    ValueType::Short,
                    FieldKind::Plain,
                    review_get_votes,
                    review_set_votes
                ))
                .field(
                    FieldMetadata::scalar(
                        "mark",
                        ValueType::Char,
                        FieldKind::Plain,
                        review_get_mark,
                        review_set_mark
                    )
                    .unique(true)
                )
                .field(FieldMetadata::scalar(
                    "score",
                    ValueType::Float,
                    FieldKind::Plain,
                    review_get_score,
                    review_set_score
                ))
                .field(
                    FieldMetadata::scalar(
                        "note",
                        ValueType::Text,
                        FieldKind::Plain,
                        review_get_note,
                        review_set_note
                    )
                    .nullable(true)
                )
        })
    }
}

/// Statement log entry of a [`Scripted`] connection.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub sql:    String,
    pub params: Vec<Value>
}

/// Connection double that records statements and replays canned rows.
///
/// Each `query` pops the next queued result; an empty queue yields no rows.
#[derive(Debug, Default)]
pub struct Scripted {
    pub calls:   Vec<Call>,
    pub results: std::collections::VecDeque<Vec<Row>>,
    pub fail_on: Option<&'static str>
}

impl Scripted {
    pub fn returning(mut self, rows: Vec<Row>) -> Self {
        self.results.push_back(rows);
        self
    }

    pub fn sql(&self) -> Vec<&str> {
        self.calls.iter().map(|c| c.sql.as_str()).collect()
    }

    fn record(&mut self, sql: &str, params: &[Value]) -> Result<()> {
        self.calls.push(Call {
            sql:    sql.to_string(),
            params: params.to_vec()
        });
        match self.fail_on {
            Some(prefix) if sql.starts_with(prefix) => Err(Error::execution(sql, "scripted failure")),
            _ => Ok(())
        }
    }
}

impl Connection for Scripted {
    fn execute(&mut self, sql: &str, params: &[Value]) -> Result<u64> {
        self.record(sql, params)?;
        Ok(1)
    }

    fn query(&mut self, sql: &str, params: &[Value]) -> Result<Vec<Row>> {
        self.record(sql, params)?;
        Ok(self.results.pop_front().unwrap_or_default())
    }
}

/// Single-row helper.
pub fn row(columns: &[&str], values: Vec<Value>) -> Row {
    Row::new(columns.iter().map(|c| c.to_string()).collect(), values)
}
