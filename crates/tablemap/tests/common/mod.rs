// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Entities and helpers shared by the integration tests.

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use tablemap::{Connection, Entity, EntityManager, Enumerated, Result, Row, Sqlite, Value};

/// Seniority stored by ordinal.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Enumerated)]
pub enum Level {
    #[default]
    Junior,
    Senior,
    Lead
}

#[derive(Debug, Default, Clone, Entity)]
pub struct Person {
    #[id]
    #[generated]
    pub id: Option<i64>,

    #[column(length = 50)]
    pub name: String,

    #[temporal(date)]
    pub birth: NaiveDate,

    #[enumerated]
    pub level: Level,

    pub email: Option<String>,

    #[one_to_many]
    pub orders: Vec<Order>,

    #[column(skip)]
    pub scratch: Vec<String>
}

#[derive(Debug, Default, Clone, Entity)]
#[entity(table = "Orders")]
pub struct Order {
    #[id]
    #[generated]
    pub id: Option<i64>,

    pub amount: f64,

    #[temporal(timestamp)]
    pub placed: NaiveDateTime,

    #[one_to_many]
    pub lines: Vec<Line>
}

#[derive(Debug, Default, Clone, Entity)]
pub struct Line {
    #[id]
    #[generated(start = 100, increment = 1)]
    pub id: Option<i64>,

    #[column(length = 20)]
    pub sku: String,

    pub quantity: i32
}

#[derive(Debug, Default, Clone, Entity)]
pub struct Badge {
    #[id]
    #[column(length = 12)]
    pub code: String,

    #[many_to_one(name = "holder_id")]
    #[column(nullable)]
    pub holder: Option<Box<Person>>,

    #[lob]
    pub image: Vec<u8>,

    pub active: bool,

    #[temporal(time)]
    pub issued_at: NaiveTime,

    pub mark: char,

    pub weight: f32,

    pub rank: i16
}

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    day(y, m, d).and_hms_opt(h, min, 0).unwrap()
}

pub fn line(sku: &str, quantity: i32) -> Line {
    Line {
        id: None,
        sku: sku.into(),
        quantity
    }
}

pub fn order(amount: f64, lines: Vec<Line>) -> Order {
    Order {
        id: None,
        amount,
        placed: at(2024, 1, 15, 10, 30),
        lines
    }
}

/// Ada with two orders, the first carrying two lines.
pub fn ada() -> Person {
    Person {
        name: "Ada".into(),
        birth: day(1815, 12, 10),
        level: Level::Lead,
        email: Some("ada@example.org".into()),
        orders: vec![
            order(12.5, vec![line("PEN", 2), line("INK", 1)]),
            order(40.0, Vec::new())
        ],
        ..Person::default()
    }
}

/// SQLite database holding the Person, Orders and Line tables.
pub fn database() -> (EntityManager, rusqlite::Connection) {
    init_logger();
    let manager = EntityManager::new(Sqlite);
    let mut conn = tablemap::sqlite::open_in_memory().unwrap();
    manager.create_tables::<Person, _>(&mut conn).unwrap();
    (manager, conn)
}

/// Connection wrapper recording every statement it forwards.
pub struct Recording<C> {
    pub inner:      C,
    pub statements: Vec<String>
}

impl<C: Connection> Recording<C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            statements: Vec::new()
        }
    }

    pub fn take(&mut self) -> Vec<String> {
        std::mem::take(&mut self.statements)
    }
}

impl<C: Connection> Connection for Recording<C> {
    fn execute(&mut self, sql: &str, params: &[Value]) -> Result<u64> {
        self.statements.push(sql.to_string());
        Connection::execute(&mut self.inner, sql, params)
    }

    fn query(&mut self, sql: &str, params: &[Value]) -> Result<Vec<Row>> {
        self.statements.push(sql.to_string());
        Connection::query(&mut self.inner, sql, params)
    }
}

/// Number of rows in `table`.
pub fn count(manager: &EntityManager, conn: &mut impl Connection, table: &str) -> i64 {
    let rows = manager.select(conn, &format!("SELECT COUNT(*) FROM {table}")).unwrap();
    match rows[0][0] {
        Value::Long(n) => n,
        ref other => panic!("unexpected count {other:?}")
    }
}
