// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use tablemap::{Enumerated, SqlValue, Value, ValueType};

#[derive(Debug, Clone, Copy, PartialEq, Enumerated)]
enum Phase {
    Draft,
    Review,
    Published
}

fn main() {
    assert_eq!(<Phase as SqlValue>::VALUE_TYPE, ValueType::Int);
    assert_eq!(Phase::Published.ordinal(), 2);
    assert_eq!(Phase::Review.to_value(), Value::Int(1));
    assert_eq!(Phase::from_value(Value::Long(0)).unwrap(), Phase::Draft);
    assert!(Phase::from_value(Value::Int(3)).is_err());
    assert_eq!(Phase::from_ordinal(7), None);
}
