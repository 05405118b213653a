// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `CREATE TABLE` generation.
//!
//! Output is a pure function of the descriptor and the dialect:
//!
//! ```text
//! CREATE TABLE Orders (
//!     Person_id BIGINT NOT NULL,
//!     id BIGINT NOT NULL GENERATED ALWAYS AS IDENTITY(START WITH 1, INCREMENT BY 1),
//!     amount DOUBLE NOT NULL,
//!     CONSTRAINT PK_Orders PRIMARY KEY (id),
//!     CONSTRAINT FKA_Orders_Person FOREIGN KEY (Person_id) REFERENCES Person ON DELETE CASCADE
//! )
//! ```
//!
//! Column lines come first (owner join column, then fields in declaration
//! order), followed by the primary key and the foreign keys.

use std::collections::HashSet;

use super::{
    Owner,
    types::{SqlType, type_name}
};
use crate::{
    dialect::Dialect,
    error::{Error, Result},
    metadata::{EntityMetadata, FieldKind, FieldMetadata},
    value::ValueType
};

/// Generate the `CREATE TABLE` statement of one table.
///
/// With an `owner`, the table is the child side of a one-to-many relation:
/// a `NOT NULL` join column typed like the owner's id is prepended and a
/// cascading foreign key to the owner is appended.
///
/// # Errors
///
/// [`Error::Metadata`] when the descriptor is invalid or maps no column.
pub fn create_table(
    dialect: &dyn Dialect,
    owner: Option<Owner<'_>>,
    child: &EntityMetadata
) -> Result<String> {
    child.validate()?;
    let table = child.table();

    let mut lines = Vec::new();
    let mut foreign_keys = Vec::new();
    let mut primary_key = None;

    if let Some(owner) = owner {
        let join = owner.join_column()?;
        let owner_id = owner.metadata.require_id()?;
        let owner_table = owner.metadata.table();
        lines.push(format!(
            "    {join} {} NOT NULL",
            key_type(owner_id, owner_id.constraints().length)?
        ));
        foreign_keys.push(format!(
            "    CONSTRAINT FKA_{table}_{owner_table} FOREIGN KEY ({join}) REFERENCES {owner_table} ON DELETE CASCADE"
        ));
    }

    for field in child.column_fields() {
        let column = field.column_name();
        lines.push(format!("    {column} {}", column_clause(dialect, field)?));

        if field.is_id() && !(field.is_generated() && dialect.identity_implies_primary_key()) {
            primary_key = Some(format!("    CONSTRAINT PK_{table} PRIMARY KEY ({column})"));
        }
        if let FieldKind::ManyToOne {
            ..
        } = field.kind()
        {
            let target = field.target()?.table();
            foreign_keys.push(format!(
                "    CONSTRAINT FKA_{table}_{column} FOREIGN KEY ({column}) REFERENCES {target} ON DELETE CASCADE"
            ));
        }
    }

    if lines.is_empty() {
        return Err(Error::metadata(child.type_name(), "no mapped columns"));
    }

    lines.extend(primary_key);
    lines.extend(foreign_keys);
    Ok(format!("CREATE TABLE {table} (\n{}\n)", lines.join(",\n")))
}

/// Generate `CREATE TABLE` statements for `root` and every table reachable
/// through one-to-many fields, owners before children.
///
/// A table reached twice is emitted once.
///
/// # Errors
///
/// [`Error::Metadata`] for the first invalid descriptor.
pub fn create_tables(dialect: &dyn Dialect, root: &EntityMetadata) -> Result<Vec<String>> {
    let mut statements = vec![create_table(dialect, None, root)?];
    let mut seen = HashSet::from([root.table()]);
    children_tables(dialect, root, &mut seen, &mut statements)?;
    Ok(statements)
}

/// Append child table statements of `owner` (recursively) to `statements`.
pub(crate) fn children_tables(
    dialect: &dyn Dialect,
    owner: &EntityMetadata,
    seen: &mut HashSet<&'static str>,
    statements: &mut Vec<String>
) -> Result<()> {
    for field in owner.collection_fields() {
        let element = field.element()?;
        if !seen.insert(element.table()) {
            continue;
        }
        statements.push(create_table(
            dialect,
            Some(Owner {
                metadata: owner,
                field
            }),
            element
        )?);
        children_tables(dialect, element, seen, statements)?;
    }
    Ok(())
}

fn column_clause(dialect: &dyn Dialect, field: &FieldMetadata) -> Result<String> {
    let constraints = field.constraints();
    Ok(match *field.kind() {
        FieldKind::GeneratedId {
            start,
            step
        } => dialect.identity_column(&type_name(field.scalar_type()?, None), start, step),
        FieldKind::Enumerated => "INT NOT NULL".to_string(),
        FieldKind::Temporal(kind) => format!("{} NOT NULL", kind.as_sql()),
        FieldKind::LargeObject => "BLOB NOT NULL".to_string(),
        FieldKind::ManyToOne {
            ..
        } => {
            let target_id = field.target()?.require_id()?;
            let length = constraints.length.or(target_id.constraints().length);
            let sql_type = SqlType {
                name:     key_type(target_id, length)?,
                nullable: constraints.nullable
            };
            sql_type.clause(false)
        }
        FieldKind::Id => SqlType::of(field.scalar_type()?, constraints.length).clause(constraints.unique),
        FieldKind::Plain => SqlType {
            name:     type_name(field.scalar_type()?, constraints.length),
            nullable: constraints.nullable
        }
        .clause(constraints.unique),
        FieldKind::OneToMany {
            ..
        } => return Err(Error::metadata(field.name(), "one-to-many fields have no column"))
    })
}

/// Type of a column holding a reference to `id`.
fn key_type(id: &FieldMetadata, length: Option<u32>) -> Result<String> {
    match id.scalar_type()? {
        ValueType::Int => Ok("INT".to_string()),
        ValueType::Long => Ok("BIGINT".to_string()),
        ValueType::Text => Ok(type_name(ValueType::Text, length)),
        other => Err(Error::metadata(
            id.name(),
            format!("{other} cannot be referenced by a foreign key")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dialect::{HsqlDb, MySql, Sqlite, Standard},
        record::Entity,
        testing::{Order, Person, Review}
    };

    fn orders_owner() -> Owner<'static> {
        let person = Person::entity_metadata();
        Owner {
            metadata: person,
            field:    person.field_named("orders").unwrap()
        }
    }

    #[test]
    fn person_table() {
        let sql = create_table(&Standard, None, Person::entity_metadata()).unwrap();
        assert_eq!(
            sql,
            "CREATE TABLE Person (\n    \
             id BIGINT NOT NULL GENERATED ALWAYS AS IDENTITY(START WITH 1, INCREMENT BY 1),\n    \
             name VARCHAR(50) NOT NULL,\n    \
             birth DATE NOT NULL,\n    \
             CONSTRAINT PK_Person PRIMARY KEY (id)\n)"
        );
    }

    #[test]
    fn child_table_gets_join_column_and_cascade() {
        let sql = create_table(&Standard, Some(orders_owner()), Order::entity_metadata()).unwrap();
        assert_eq!(
            sql,
            "CREATE TABLE Orders (\n    \
             Person_id BIGINT NOT NULL,\n    \
             id BIGINT NOT NULL GENERATED ALWAYS AS IDENTITY(START WITH 1, INCREMENT BY 1),\n    \
             amount DOUBLE NOT NULL,\n    \
             CONSTRAINT PK_Orders PRIMARY KEY (id),\n    \
             CONSTRAINT FKA_Orders_Person FOREIGN KEY (Person_id) REFERENCES Person ON DELETE CASCADE\n)"
        );
    }

    #[test]
    fn every_column_kind() {
        let sql = create_table(&Standard, None, Review::entity_metadata()).unwrap();
        let expected = [
            "    code VARCHAR(12) NOT NULL",
            "    author_id BIGINT NOT NULL",
            "    grade INT NOT NULL",
            "    photo BLOB NOT NULL",
            "    posted TIMESTAMP NOT NULL",
            "    at TIME NOT NULL",
            "    pinned BOOLEAN NOT NULL",
            "    votes SMALLINT NOT NULL",
            "    mark CHAR UNIQUE NOT NULL",
            "    score FLOAT NOT NULL",
            "    note LONG VARCHAR",
            "    CONSTRAINT PK_Review PRIMARY KEY (code)",
            "    CONSTRAINT FKA_Review_author_id FOREIGN KEY (author_id) REFERENCES Person ON DELETE CASCADE"
        ];
        assert_eq!(sql, format!("CREATE TABLE Review (\n{}\n)", expected.join(",\n")));
    }

    #[test]
    fn sqlite_identity_drops_primary_key_line() {
        let sql = create_table(&Sqlite, None, Order::entity_metadata()).unwrap();
        assert_eq!(
            sql,
            "CREATE TABLE Orders (\n    id INTEGER PRIMARY KEY AUTOINCREMENT,\n    amount DOUBLE NOT NULL\n)"
        );
        let hsql = create_table(&HsqlDb, None, Order::entity_metadata()).unwrap();
        assert!(hsql.contains("id IDENTITY"));
        assert!(!hsql.contains("PK_Orders"));
    }

    #[test]
    fn mysql_keeps_primary_key() {
        let sql = create_table(&MySql, None, Order::entity_metadata()).unwrap();
        assert!(sql.contains("id BIGINT NOT NULL AUTO_INCREMENT"));
        assert!(sql.contains("CONSTRAINT PK_Orders PRIMARY KEY (id)"));
    }

    #[test]
    fn output_is_deterministic() {
        let first = create_tables(&Standard, Person::entity_metadata()).unwrap();
        let second = create_tables(&Standard, Person::entity_metadata()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn recursion_creates_owner_first() {
        let statements = create_tables(&Standard, Person::entity_metadata()).unwrap();
        assert_eq!(statements.len(), 2);
        assert!(statements[0].starts_with("CREATE TABLE Person"));
        assert!(statements[1].starts_with("CREATE TABLE Orders"));
    }
}
