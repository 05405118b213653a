// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use tablemap::{Entity, Enumerated, FieldKind, TemporalKind};

#[derive(Debug, Default, Clone, Copy, PartialEq, Enumerated)]
pub enum Tier {
    #[default]
    Free,
    Paid
}

#[derive(Debug, Default, Entity)]
#[entity(table = "accounts")]
pub struct Account {
    #[id]
    #[generated(start = 1000, increment = 5)]
    pub id: Option<i64>,

    #[column(name = "mail", length = 120, unique)]
    pub email: String,

    #[column(nullable)]
    pub nickname: String,

    #[temporal(date, name = "born_on")]
    pub born: NaiveDate,

    #[temporal(time)]
    pub wake: NaiveTime,

    #[temporal(timestamp)]
    pub created: NaiveDateTime,

    #[enumerated]
    pub tier: Tier,

    #[enumerated(name = "fallback_tier")]
    pub fallback: Option<Tier>,

    #[lob(name = "avatar_png")]
    pub avatar: Vec<u8>,

    pub score: f32,
    pub visits: i8,
    pub initial: char,

    #[column(skip)]
    pub session: Vec<String>,
}

fn main() {
    let meta = Account::entity_metadata();
    meta.validate().unwrap();
    assert_eq!(meta.table(), "accounts");
    assert_eq!(meta.fields().len(), 12);
    assert!(matches!(
        meta.require_id().unwrap().kind(),
        FieldKind::GeneratedId { start: 1000, step: 5 }
    ));
    assert_eq!(meta.field_named("email").unwrap().column_name(), "mail");
    assert!(meta.field_named("email").unwrap().constraints().unique);
    assert!(meta.field_named("nickname").unwrap().constraints().nullable);
    assert!(matches!(
        meta.field_named("born").unwrap().kind(),
        FieldKind::Temporal(TemporalKind::Date)
    ));
    assert!(meta.field_named("fallback").unwrap().constraints().nullable);
    assert_eq!(meta.field_named("avatar").unwrap().column_name(), "avatar_png");
    assert!(meta.field_named("session").is_none());
    assert_eq!(Tier::Paid.ordinal(), 1);
    assert_eq!(Tier::from_ordinal(0), Some(Tier::Free));
}
