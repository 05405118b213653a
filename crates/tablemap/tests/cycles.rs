// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Loading graphs whose relations point back at their owner.

mod common;

use tablemap::{Entity, EntityManager, Sqlite, sqlite};

#[derive(Debug, Default, Clone, Entity)]
pub struct Team {
    #[id]
    #[generated]
    pub id: Option<i64>,

    pub name: String,

    #[one_to_many]
    pub members: Vec<Member>
}

#[derive(Debug, Default, Clone, Entity)]
pub struct Member {
    #[id]
    #[generated]
    pub id: Option<i64>,

    pub name: String,

    #[many_to_one]
    #[column(nullable)]
    pub team: Option<Box<Team>>
}

fn member(name: &str) -> Member {
    Member {
        name: name.into(),
        ..Member::default()
    }
}

/// Team with two members whose `team` points back at it.
fn linked_team(manager: &EntityManager, conn: &mut rusqlite::Connection) -> Team {
    let mut team = Team {
        id:      None,
        name:    "Core".into(),
        members: vec![member("Ada"), member("Alan")]
    };
    manager.insert(conn, &mut team).unwrap();

    let owner = Team {
        members: Vec::new(),
        ..team.clone()
    };
    for member in &mut team.members {
        member.team = Some(Box::new(owner.clone()));
        manager.update(conn, member).unwrap();
    }
    team
}

#[test]
fn back_reference_stops_one_level_deep() {
    common::init_logger();
    let manager = EntityManager::new(Sqlite);
    let mut conn = sqlite::open_in_memory().unwrap();
    manager.create_tables::<Team, _>(&mut conn).unwrap();
    linked_team(&manager, &mut conn);

    let members: Vec<Member> = manager.load_list(&mut conn, "1 = 1 ORDER BY id").unwrap();
    assert_eq!(members.len(), 2);

    let ada = &members[0];
    let team = ada.team.as_deref().unwrap();
    assert_eq!(team.name, "Core");
    let names: Vec<_> = team.members.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Ada", "Alan"]);
    // Ada is still being resolved, so her nested copy has columns only.
    assert_eq!(team.members[0].id, ada.id);
    assert!(team.members[0].team.is_none());
    // Alan reaches the team again while it is resolving: no members below it.
    let nested = team.members[1].team.as_deref().unwrap();
    assert_eq!(nested.id, team.id);
    assert!(nested.members.is_empty());

    let alan_team = members[1].team.as_deref().unwrap();
    assert!(alan_team.members[1].team.is_none());
    assert!(alan_team.members[0].team.as_deref().unwrap().members.is_empty());
}

#[test]
fn owner_side_load_terminates() {
    common::init_logger();
    let manager = EntityManager::new(Sqlite);
    let mut conn = sqlite::open_in_memory().unwrap();
    manager.create_tables::<Team, _>(&mut conn).unwrap();
    let saved = linked_team(&manager, &mut conn);

    let team: Team = manager.load(&mut conn, "name = 'Core'").unwrap().unwrap();
    assert_eq!(team.id, saved.id);
    assert_eq!(team.members.len(), 2);
    for member in &team.members {
        let back = member.team.as_deref().unwrap();
        assert_eq!(back.id, team.id);
        assert!(back.members.is_empty());
    }
}
