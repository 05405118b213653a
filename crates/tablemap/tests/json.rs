// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Entity graph notation on derived entities.

mod common;

use chrono::NaiveTime;
use common::{Badge, Level, Person, ada, database, line, order};
use tablemap::{Error, entities_equal, json};

#[test]
fn encodes_a_derived_graph() {
    let mut person = Person {
        id: Some(3),
        name: "Ada".into(),
        birth: common::day(1815, 12, 10),
        level: Level::Senior,
        orders: vec![order(40.0, vec![line("PEN", 2)])],
        ..Person::default()
    };
    person.orders[0].id = Some(8);

    assert_eq!(
        json::encode(&person).unwrap(),
        concat!(
            r#"{"id": 3, "name": "Ada", "birth": "1815-12-10", "level": 1, "email": null, "#,
            r#""orders": [{"id": 8, "amount": 40.0, "placed": "2024-01-15T10:30:00Z", "#,
            r#""lines": [{"id": null, "sku": "PEN", "quantity": 2}]}]}"#
        )
    );
}

#[test]
fn decode_restores_an_equal_graph() {
    let original = ada();
    let text = json::encode(&original).unwrap();
    let decoded: Person = json::decode(&text).unwrap();
    assert!(entities_equal(&original, &decoded).unwrap());
    assert_eq!(decoded.orders[0].lines[1].sku, "INK");
    assert_eq!(decoded.level, Level::Lead);
}

#[test]
fn loaded_entity_survives_a_round_trip() {
    let (manager, mut conn) = database();
    let mut person = ada();
    manager.insert(&mut conn, &mut person).unwrap();
    let loaded: Person = manager.load(&mut conn, "name = 'Ada'").unwrap().unwrap();

    let decoded: Person = json::decode(&json::encode(&loaded).unwrap()).unwrap();
    assert!(entities_equal(&loaded, &decoded).unwrap());
    assert_eq!(decoded.id, person.id);
}

#[test]
fn badge_carries_reference_bytes_and_scalars() {
    let mut holder = ada();
    holder.id = Some(1);
    let badge = Badge {
        code: "B-2".into(),
        holder: Some(Box::new(holder)),
        image: vec![0x89, b'P', b'N', b'G'],
        active: true,
        issued_at: NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
        mark: '"',
        weight: 0.5,
        rank: 12
    };
    let text = json::encode(&badge).unwrap();
    assert!(text.contains(r#""image": "data:image/png;base64,iVBORw==""#), "{text}");
    assert!(text.contains(r#""mark": "\"""#), "{text}");
    assert!(text.contains(r#""holder": {"id": 1, "name": "Ada""#), "{text}");

    let decoded: Badge = json::decode(&text).unwrap();
    assert!(entities_equal(&badge, &decoded).unwrap());
    assert_eq!(decoded.image, badge.image);
}

#[test]
fn null_reference_and_empty_lob() {
    let badge = Badge {
        code: "B-3".into(),
        mark: 'q',
        ..Badge::default()
    };
    let text = json::encode(&badge).unwrap();
    assert!(text.contains(r#""holder": null"#), "{text}");
    assert!(text.contains(r#""image": """#), "{text}");
    let decoded: Badge = json::decode(&text).unwrap();
    assert!(decoded.holder.is_none());
    assert!(decoded.image.is_empty());
}

#[test]
fn malformed_input_is_a_format_error() {
    for text in [
        "",
        "[]",
        r#"{"id": 1"#,
        r#"{"nickname": "x"}"#,
        r#"{"level": "high"}"#,
        r#"{"orders": {"id": 1}}"#,
        r#"{"level": 9}"#
    ] {
        let err = json::decode::<Person>(text).unwrap_err();
        assert!(matches!(err, Error::Format(_)), "{text}: {err}");
    }
}
