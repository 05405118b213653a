// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Graph persistence: insert, update with child diffing, delete.
//!
//! # Insert
//!
//! ```text
//! INSERT parent ──► identity query ──► parent.id = generated
//!   └─ for each one-to-many child: INSERT child (..., <join> = parent.id)
//! ```
//!
//! # Update
//!
//! The persisted counterpart is loaded once, then every one-to-many
//! collection is diffed by child id:
//!
//! | New child | Persisted child with that id | Action |
//! |-----------|------------------------------|--------|
//! | id unset | n/a | insert |
//! | id set | exists, differs | update (recursively) |
//! | id set | exists, equal | none |
//! | id set | missing | insert |
//! | absent | exists | delete |
//!
//! Children are deleted by id; their own descendants go with them through
//! the `ON DELETE CASCADE` foreign keys. The entity's own row is updated
//! last.

use crate::{
    binder::{bind, persisted_id},
    connection::{Connection, execute_logged, query_logged},
    dialect::Dialect,
    equality::entities_equal,
    error::{Error, Result},
    mapper::Loader,
    metadata::{EntityMetadata, FieldMetadata},
    record::Record,
    sql::{Condition, Owner, dml},
    value::Value
};

/// Saved owner of a child being inserted.
#[derive(Debug, Clone)]
pub(crate) struct OwnerLink<'a> {
    metadata: &'a EntityMetadata,
    field:    &'a FieldMetadata,
    id:       Value
}

impl OwnerLink<'_> {
    fn owner(&self) -> Owner<'_> {
        Owner {
            metadata: self.metadata,
            field:    self.field
        }
    }
}

/// Insert `entity`, assign its generated id, then insert its children.
pub(crate) fn insert_record<C: Connection + ?Sized>(
    connection: &mut C,
    dialect: &dyn Dialect,
    owner: Option<&OwnerLink<'_>>,
    entity: &mut dyn Record
) -> Result<()> {
    let metadata = entity.metadata();
    let plan = dml::insert(dialect, owner.map(OwnerLink::owner), metadata)?;

    let mut params = Vec::with_capacity(plan.columns.len());
    let bound = bind(entity, &mut params)?;
    if let Some(owner) = owner {
        params.push(owner.id.clone());
    }
    log::trace!("bound {bound} values for {}", metadata.table());
    execute_logged(connection, &plan.sql, &params)?;

    if let Some(query) = &plan.identity_query {
        let generated = query_logged(connection, query, &[])?
            .into_iter()
            .next()
            .and_then(|row| row.into_values().into_iter().next())
            .filter(|value| !value.is_null());
        let Some(generated) = generated else {
            log::warn!("identity query for {} returned no value", metadata.table());
            return Err(Error::execution(query.as_str(), "identity query returned no rows"));
        };
        let id = metadata.require_id()?;
        id.set(entity, generated.coerce(id.scalar_type()?)?)?;
    }

    insert_children(connection, dialect, entity)
}

fn insert_children<C: Connection + ?Sized>(
    connection: &mut C,
    dialect: &dyn Dialect,
    entity: &mut dyn Record
) -> Result<()> {
    let metadata = entity.metadata();
    if metadata.collection_fields().next().is_none() {
        return Ok(());
    }
    let id = persisted_id(entity)?;
    for field in metadata.collection_fields() {
        let link = OwnerLink {
            metadata,
            field,
            id: id.clone()
        };
        for child in field.children_mut(entity)? {
            insert_record(connection, dialect, Some(&link), child)?;
        }
    }
    Ok(())
}

/// Synchronize a persisted `entity` and its collections with the database.
pub(crate) fn update_record<C: Connection + ?Sized>(
    connection: &mut C,
    dialect: &dyn Dialect,
    entity: &mut dyn Record
) -> Result<()> {
    let metadata = entity.metadata();
    let id = persisted_id(entity)?;

    let persisted = if metadata.collection_fields().next().is_some() {
        let key = metadata.require_id()?.column_name();
        Loader::new(connection).load_first(metadata, &Condition::equals(key, id.clone()))?
    } else {
        None
    };
    if persisted.is_none() && metadata.collection_fields().next().is_some() {
        log::debug!("{} {id} has no persisted row, children are inserted", metadata.table());
    }

    for field in metadata.collection_fields() {
        let stored = match persisted.as_deref() {
            Some(persisted) => field.children(persisted)?,
            None => Vec::new()
        };
        let link = OwnerLink {
            metadata,
            field,
            id: id.clone()
        };
        sync_collection(connection, dialect, &link, &stored, entity)?;
    }

    if let Some(sql) = dml::update(metadata)? {
        let mut params = Vec::new();
        bind(entity, &mut params)?;
        params.push(id);
        execute_logged(connection, &sql, &params)?;
    }
    Ok(())
}

fn sync_collection<C: Connection + ?Sized>(
    connection: &mut C,
    dialect: &dyn Dialect,
    link: &OwnerLink<'_>,
    stored: &[&dyn Record],
    entity: &mut dyn Record
) -> Result<()> {
    let element = link.field.element()?;
    let element_id = element.require_id()?;

    let mut kept = Vec::new();
    for child in link.field.children_mut(entity)? {
        let child_id = element_id.get(child)?;
        if child_id.is_null() {
            insert_record(connection, dialect, Some(link), child)?;
            continue;
        }

        let mut counterpart = None;
        for candidate in stored {
            if element_id.get(*candidate)? == child_id {
                counterpart = Some(*candidate);
                break;
            }
        }
        kept.push(child_id);
        match counterpart {
            Some(previous) if entities_equal(child, previous)? => {}
            Some(_) => update_record(connection, dialect, child)?,
            None => insert_record(connection, dialect, Some(link), child)?
        }
    }

    let delete = dml::delete(element)?;
    for candidate in stored {
        let stored_id = element_id.get(*candidate)?;
        if !kept.contains(&stored_id) {
            execute_logged(connection, &delete, &[stored_id])?;
        }
    }
    Ok(())
}

/// Delete a persisted `entity`; children go through the cascade.
pub(crate) fn delete_record<C: Connection + ?Sized>(
    connection: &mut C,
    entity: &dyn Record
) -> Result<()> {
    let id = persisted_id(entity)?;
    let sql = dml::delete(entity.metadata())?;
    execute_logged(connection, &sql, &[id])?;
    Ok(())
}
