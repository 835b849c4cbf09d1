//! Declarative description of the `parcel` table and its DDL bootstrap.
//!
//! This is not a migration engine: every statement is `IF NOT EXISTS`, so
//! running [`initialize_schema`] against an existing database is a no-op.

use rusqlite::Connection;

pub const PARCEL_TABLE: &str = "parcel";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Integer,
    Text,
}

impl DataType {
    fn as_sql(self) -> &'static str {
        match self {
            DataType::Integer => "INTEGER",
            DataType::Text => "TEXT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnConstraint {
    /// Rowid alias; SQLite assigns the value on insert.
    PrimaryKeyAutoIncrement,
    NotNull,
}

impl ColumnConstraint {
    fn as_sql(self) -> &'static str {
        match self {
            ColumnConstraint::PrimaryKeyAutoIncrement => "PRIMARY KEY AUTOINCREMENT",
            ColumnConstraint::NotNull => "NOT NULL",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDefinition {
    pub name: &'static str,
    pub data_type: DataType,
    pub constraints: Vec<ColumnConstraint>,
}

impl ColumnDefinition {
    pub fn new(name: &'static str, data_type: DataType) -> Self {
        Self {
            name,
            data_type,
            constraints: Vec::new(),
        }
    }

    pub fn with_constraint(mut self, constraint: ColumnConstraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    fn to_sql(&self) -> String {
        let mut sql = format!("{} {}", self.name, self.data_type.as_sql());
        for constraint in &self.constraints {
            sql.push(' ');
            sql.push_str(constraint.as_sql());
        }
        sql
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexDefinition {
    pub name: &'static str,
    pub columns: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableDefinition {
    pub name: &'static str,
    pub columns: Vec<ColumnDefinition>,
    pub indexes: Vec<IndexDefinition>,
}

impl TableDefinition {
    /// DDL statements creating the table and its indexes, each idempotent.
    pub fn create_statements(&self) -> Vec<String> {
        let columns = self
            .columns
            .iter()
            .map(ColumnDefinition::to_sql)
            .collect::<Vec<_>>()
            .join(", ");
        let mut statements = vec![format!(
            "CREATE TABLE IF NOT EXISTS {} ({})",
            self.name, columns
        )];
        for index in &self.indexes {
            statements.push(format!(
                "CREATE INDEX IF NOT EXISTS {} ON {} ({})",
                index.name,
                self.name,
                index.columns.join(", ")
            ));
        }
        statements
    }
}

/// The single backing table for parcels.
pub fn parcel_table() -> TableDefinition {
    use ColumnConstraint::*;
    use DataType::*;

    TableDefinition {
        name: PARCEL_TABLE,
        columns: vec![
            ColumnDefinition::new("number", Integer).with_constraint(PrimaryKeyAutoIncrement),
            ColumnDefinition::new("client", Integer).with_constraint(NotNull),
            ColumnDefinition::new("status", Text).with_constraint(NotNull),
            ColumnDefinition::new("address", Text).with_constraint(NotNull),
            ColumnDefinition::new("created_at", Text).with_constraint(NotNull),
        ],
        indexes: vec![IndexDefinition {
            name: "parcel_client_idx",
            columns: vec!["client"],
        }],
    }
}

/// Create the `parcel` table and its indexes if they are missing.
pub fn initialize_schema(conn: &Connection) -> rusqlite::Result<()> {
    for sql in parcel_table().create_statements() {
        conn.execute(&sql, [])?;
    }
    tracing::debug!(table = PARCEL_TABLE, "schema initialized");
    Ok(())
}
