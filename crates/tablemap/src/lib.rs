// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]

//! # tablemap
//!
//! One crate, all features. Re-exports:
//! - [`Entity`] and [`Enumerated`] derive macros from `tablemap-derive`
//! - All types from `tablemap-core` ([`EntityManager`], [`Connection`],
//!   [`Condition`], [`Value`])
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use chrono::NaiveDate;
//! use tablemap::{Entity, EntityManager, Sqlite};
//!
//! #[derive(Debug, Default, Entity)]
//! pub struct Person {
//!     #[id]
//!     #[generated]
//!     pub id: Option<i64>,
//!     #[column(length = 50)]
//!     pub name: String,
//!     #[temporal(date)]
//!     pub birth: NaiveDate,
//!     #[one_to_many]
//!     pub orders: Vec<Order>,
//! }
//!
//! #[derive(Debug, Default, Entity)]
//! #[entity(table = "Orders")]
//! pub struct Order {
//!     #[id]
//!     #[generated]
//!     pub id: Option<i64>,
//!     pub amount: f64,
//! }
//!
//! let manager = EntityManager::new(Sqlite);
//! let mut conn = tablemap::sqlite::open_in_memory()?;
//! manager.create_tables::<Person, _>(&mut conn)?;
//!
//! let mut ada = Person { name: "Ada".into(), ..Person::default() };
//! ada.orders.push(Order { amount: 9.5, ..Order::default() });
//! manager.insert(&mut conn, &mut ada)?;
//!
//! let loaded: Option<Person> = manager.load(&mut conn, "name = 'Ada'")?;
//! println!("{}", tablemap::json::encode(&ada)?);
//! ```
//!
//! # Workflow
//!
//! ```text
//! #[derive(Entity)] ──► EntityMetadata ──► EntityManager ──► Connection
//!                                          │
//!                                          ├── create_tables
//!                                          ├── insert / update / delete
//!                                          ├── load / load_list
//!                                          └── select / select_to_json
//! ```

pub use tablemap_core::*;
pub use tablemap_derive::{Entity, Enumerated};
