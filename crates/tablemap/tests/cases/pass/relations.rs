// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use tablemap::{Entity, FieldKind};

#[derive(Debug, Default, Entity)]
pub struct Team {
    #[id]
    #[column(length = 8)]
    pub code: String,

    #[one_to_many(join_column = "team_code")]
    pub members: Vec<Member>,
}

#[derive(Debug, Default, Entity)]
pub struct Member {
    #[id]
    #[generated]
    pub id: Option<i32>,

    pub name: String,

    #[many_to_one(name = "mentor_id")]
    #[column(nullable)]
    pub mentor: Option<Box<Member>>,

    #[many_to_one]
    pub office: Option<Office>,
}

#[derive(Debug, Default, Entity)]
pub struct Office {
    #[id]
    pub id: i64,
    pub city: String,
}

fn main() {
    let team = Team::entity_metadata();
    team.validate().unwrap();
    let members = team.field_named("members").unwrap();
    assert_eq!(members.join_column(team).unwrap(), "team_code");
    assert_eq!(members.element().unwrap().table(), "Member");

    let member = Member::entity_metadata();
    member.validate().unwrap();
    let mentor = member.field_named("mentor").unwrap();
    assert!(matches!(mentor.kind(), FieldKind::ManyToOne { .. }));
    assert_eq!(mentor.column_name(), "mentor_id");
    assert_eq!(mentor.target().unwrap().table(), "Member");
    assert_eq!(member.field_named("office").unwrap().column_name(), "office");
}
