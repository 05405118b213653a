// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Public entry point.
//!
//! [`EntityManager`] holds the chosen dialect and nothing else. Every
//! operation borrows the caller's [`Connection`] for its duration:
//!
//! ```rust,ignore
//! let manager = EntityManager::from_kind(DialectKind::Sqlite);
//! manager.create_tables::<Person, _>(&mut conn)?;
//!
//! let mut ada = Person { name: "Ada".into(), ..Person::default() };
//! manager.insert(&mut conn, &mut ada)?;
//!
//! let found: Option<Person> = manager.load(&mut conn, Condition::equals("name", "Ada".into()))?;
//! ```

use std::collections::HashSet;

use crate::{
    connection::{Connection, execute_logged, query_logged},
    dialect::{Dialect, DialectKind},
    error::Result,
    graph,
    json,
    mapper::Loader,
    metadata::EntityMetadata,
    record::{Entity, Record, downcast_box},
    sql::{Condition, ddl},
    value::Value
};

/// Dialect-aware persistence operations.
#[derive(Debug)]
pub struct EntityManager {
    dialect: Box<dyn Dialect>
}

impl Default for EntityManager {
    fn default() -> Self {
        Self::from_kind(DialectKind::default())
    }
}

impl EntityManager {
    /// Manager generating SQL for `dialect`.
    #[must_use]
    pub fn new(dialect: impl Dialect + 'static) -> Self {
        Self {
            dialect: Box::new(dialect)
        }
    }

    /// Manager for a configured dialect kind.
    #[must_use]
    pub fn from_kind(kind: DialectKind) -> Self {
        Self {
            dialect: kind.dialect()
        }
    }

    /// Active dialect.
    #[must_use]
    pub fn dialect(&self) -> &dyn Dialect {
        self.dialect.as_ref()
    }

    /// `CREATE TABLE` statements for `metadata` and its child tables.
    ///
    /// # Errors
    ///
    /// [`Error::Metadata`](crate::Error::Metadata) for an invalid descriptor.
    pub fn create_table_statements(&self, metadata: &EntityMetadata) -> Result<Vec<String>> {
        ddl::create_tables(self.dialect(), metadata)
    }

    /// Create the table of `T` and of every type reachable through its
    /// one-to-many fields.
    ///
    /// # Errors
    ///
    /// Mapping errors; the first failing statement.
    pub fn create_tables<T: Entity, C: Connection + ?Sized>(&self, connection: &mut C) -> Result<()> {
        self.create_tables_for(connection, T::entity_metadata())
    }

    /// [`create_tables`](Self::create_tables) for a descriptor.
    ///
    /// # Errors
    ///
    /// Mapping errors; the first failing statement.
    pub fn create_tables_for<C: Connection + ?Sized>(
        &self,
        connection: &mut C,
        metadata: &EntityMetadata
    ) -> Result<()> {
        for statement in self.create_table_statements(metadata)? {
            execute_logged(connection, &statement, &[])?;
        }
        Ok(())
    }

    /// Create the root table from caller-supplied `sql`, then the generated
    /// child tables.
    ///
    /// Lets a product the dialects do not cover use its own DDL for the
    /// root while child tables keep their generated shape.
    ///
    /// # Errors
    ///
    /// Mapping errors; the first failing statement.
    pub fn create_tables_with<C: Connection + ?Sized>(
        &self,
        connection: &mut C,
        metadata: &EntityMetadata,
        sql: &str
    ) -> Result<()> {
        metadata.validate()?;
        execute_logged(connection, sql, &[])?;
        let mut seen = HashSet::from([metadata.table()]);
        let mut statements = Vec::new();
        ddl::children_tables(self.dialect(), metadata, &mut seen, &mut statements)?;
        for statement in statements {
            execute_logged(connection, &statement, &[])?;
        }
        Ok(())
    }

    /// Execute `;`-separated statements, skipping blank ones.
    ///
    /// Semicolons inside string literals are not recognised.
    ///
    /// # Errors
    ///
    /// The first failing statement.
    pub fn execute_script<C: Connection + ?Sized>(&self, connection: &mut C, script: &str) -> Result<()> {
        for statement in script.split(';').map(str::trim).filter(|s| !s.is_empty()) {
            execute_logged(connection, statement, &[])?;
        }
        Ok(())
    }

    /// First `T` matching `condition`, with its relations loaded.
    ///
    /// An empty condition returns `None` without querying.
    ///
    /// # Errors
    ///
    /// Statement, conversion and mapping failures.
    pub fn load<T: Entity, C: Connection + ?Sized>(
        &self,
        connection: &mut C,
        condition: impl Into<Condition>
    ) -> Result<Option<T>> {
        let condition = condition.into();
        if condition.is_empty() {
            return Ok(None);
        }
        Loader::new(connection)
            .load_first(T::entity_metadata(), &condition)?
            .map(|record| downcast_box::<T>(record).map(|boxed| *boxed))
            .transpose()
    }

    /// Every `T` matching `condition`, with relations loaded.
    ///
    /// An empty condition scans the whole table.
    ///
    /// # Errors
    ///
    /// Statement, conversion and mapping failures.
    pub fn load_list<T: Entity, C: Connection + ?Sized>(
        &self,
        connection: &mut C,
        condition: impl Into<Condition>
    ) -> Result<Vec<T>> {
        Loader::new(connection)
            .load_list(T::entity_metadata(), &condition.into())?
            .into_iter()
            .map(|record| downcast_box::<T>(record).map(|boxed| *boxed))
            .collect()
    }

    /// Insert `entity` and its children, assigning generated ids.
    ///
    /// # Errors
    ///
    /// [`Error::Binding`](crate::Error::Binding) for a reference to an
    /// unsaved entity; statement failures. Rows written before a failure
    /// stay written.
    pub fn insert<C: Connection + ?Sized>(&self, connection: &mut C, entity: &mut dyn Record) -> Result<()> {
        graph::insert_record(connection, self.dialect(), None, entity)
    }

    /// Update `entity`, inserting, updating and deleting children so the
    /// stored collections match the in-memory ones.
    ///
    /// # Errors
    ///
    /// [`Error::Binding`](crate::Error::Binding) when the id is unset;
    /// statement failures.
    pub fn update<C: Connection + ?Sized>(&self, connection: &mut C, entity: &mut dyn Record) -> Result<()> {
        graph::update_record(connection, self.dialect(), entity)
    }

    /// Delete `entity`; child rows are removed by the cascading keys.
    ///
    /// # Errors
    ///
    /// [`Error::Binding`](crate::Error::Binding) when the id is unset;
    /// statement failures.
    pub fn delete<C: Connection + ?Sized>(&self, connection: &mut C, entity: &dyn Record) -> Result<()> {
        graph::delete_record(connection, entity)
    }

    /// Run arbitrary `sql` and return the raw values of every row.
    ///
    /// # Errors
    ///
    /// Statement failures.
    pub fn select<C: Connection + ?Sized>(&self, connection: &mut C, sql: &str) -> Result<Vec<Vec<Value>>> {
        Ok(query_logged(connection, sql, &[])?
            .into_iter()
            .map(|row| row.into_values())
            .collect())
    }

    /// [`select`](Self::select) rendered as a JSON array of arrays.
    ///
    /// # Errors
    ///
    /// Statement failures.
    pub fn select_to_json<C: Connection + ?Sized>(&self, connection: &mut C, sql: &str) -> Result<String> {
        let rows = self.select(connection, sql)?;
        Ok(json::encode_rows(&rows))
    }
}
