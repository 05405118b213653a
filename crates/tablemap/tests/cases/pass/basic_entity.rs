// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use tablemap::Entity;

#[derive(Debug, Default, Entity)]
pub struct Note {
    #[id]
    pub id: i32,
    pub text: String,
    pub pinned: Option<bool>,
}

fn main() {
    let meta = Note::entity_metadata();
    assert_eq!(meta.table(), "Note");
    assert_eq!(meta.fields().len(), 3);
    assert!(meta.field_named("pinned").unwrap().constraints().nullable);
    meta.validate().unwrap();
}
