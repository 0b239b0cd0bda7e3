//! Schema model: the tables, columns, keys and relationships a generation run works from

use serde::{Deserialize, Serialize};

use crate::error::{CodegenError, Result};

/// Metadata for a database table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Table name as it appears in the catalog
    pub name: String,

    /// Columns in declaration order
    #[serde(default)]
    pub columns: Vec<Column>,

    /// Primary key (required)
    pub primary_key: PrimaryKey,

    /// Foreign key constraints owned by this table
    #[serde(default)]
    pub foreign_keys: Vec<ForeignKey>,

    /// One-to-many relationships where this table is the "one" side
    #[serde(default)]
    pub has_many: Vec<HasManyRelationship>,
}

/// Metadata for a column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Column name
    pub name: String,

    /// Provider type name without arguments (e.g. "varchar", "number")
    pub data_type: String,

    /// Character or binary length
    #[serde(default)]
    pub length: Option<u32>,

    /// Numeric precision
    #[serde(default)]
    pub precision: Option<u32>,

    /// Numeric scale
    #[serde(default)]
    pub scale: Option<u32>,

    #[serde(default)]
    pub nullable: bool,

    #[serde(default)]
    pub is_primary_key: bool,

    #[serde(default)]
    pub is_foreign_key: bool,
}

/// Primary key definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimaryKey {
    /// Key column names in declaration order
    pub columns: Vec<String>,
}

impl PrimaryKey {
    /// Check if this is a composite primary key
    pub fn is_composite(&self) -> bool {
        self.columns.len() > 1
    }
}

/// Foreign key constraint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForeignKey {
    /// Owning column in this table
    pub column_name: String,

    /// Referenced table name; empty when the key does not resolve to a known table
    #[serde(default)]
    pub references: String,

    /// Property name used when several keys point at the same table
    #[serde(default)]
    pub unique_property_name: String,
}

impl ForeignKey {
    /// Whether the key resolves to a known table
    pub fn is_resolved(&self) -> bool {
        !self.references.is_empty()
    }

    /// Name for the reference property, falling back to the referenced table
    pub fn property_name(&self) -> &str {
        if self.unique_property_name.is_empty() {
            &self.references
        } else {
            &self.unique_property_name
        }
    }
}

/// One-to-many relationship owned by a table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HasManyRelationship {
    /// Child table on the "many" side
    pub reference: String,

    /// Foreign key column in the child table, empty when unknown
    #[serde(default)]
    pub reference_column: String,
}

impl Table {
    /// Get a column by name
    pub fn get_column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Primary key columns in key order
    ///
    /// Key names without a matching column are skipped; `validate` reports them.
    pub fn primary_key_columns(&self) -> Vec<&Column> {
        self.primary_key
            .columns
            .iter()
            .filter_map(|name| self.get_column(name))
            .collect()
    }

    /// Columns that are not part of the primary key, in declaration order
    pub fn non_key_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| !c.is_primary_key)
    }

    /// Foreign keys that resolve to a known table
    pub fn resolved_foreign_keys(&self) -> impl Iterator<Item = &ForeignKey> {
        self.foreign_keys.iter().filter(|fk| fk.is_resolved())
    }

    /// Check if a column is part of the primary key
    pub fn is_primary_key_column(&self, column_name: &str) -> bool {
        self.primary_key.columns.iter().any(|c| c == column_name)
    }

    /// Declared spelling of a column; an exact match wins over a case-insensitive one
    pub fn declared_column_name(&self, name: &str) -> Option<&str> {
        declared_spelling(&self.columns, name)
    }

    /// Rewrite key column names to the spelling the columns were declared with
    pub fn canonicalize_key_columns(&mut self) {
        let columns = &self.columns;
        let key_names = self
            .primary_key
            .columns
            .iter_mut()
            .chain(self.foreign_keys.iter_mut().map(|fk| &mut fk.column_name));
        for name in key_names {
            if let Some(declared) = declared_spelling(columns, name) {
                *name = declared.to_string();
            }
        }
    }

    /// Derive the per-column key flags from the key definitions.
    ///
    /// Schema documents only need to list the key; the flags follow from it.
    /// Key column names are matched case-insensitively.
    pub fn resolve_key_flags(&mut self) {
        self.canonicalize_key_columns();
        for column in &mut self.columns {
            if self.primary_key.columns.contains(&column.name) {
                column.is_primary_key = true;
                column.nullable = false;
            }
            if self
                .foreign_keys
                .iter()
                .any(|fk| fk.column_name == column.name)
            {
                column.is_foreign_key = true;
            }
        }
    }

    /// Check the structural invariants every generator relies on
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(CodegenError::ValidationError(
                "table name must not be empty".into(),
            ));
        }
        if self.primary_key.columns.is_empty() {
            return Err(CodegenError::ValidationError(format!(
                "table `{}` has no primary key columns",
                self.name
            )));
        }
        for key in &self.primary_key.columns {
            if self.get_column(key).is_none() {
                return Err(CodegenError::ValidationError(format!(
                    "primary key column `{}` not found in table `{}`",
                    key, self.name
                )));
            }
        }
        for column in &self.columns {
            if column.is_primary_key && !self.is_primary_key_column(&column.name) {
                return Err(CodegenError::ValidationError(format!(
                    "column `{}` of table `{}` is flagged as primary key but missing from the key",
                    column.name, self.name
                )));
            }
        }
        Ok(())
    }
}

/// Top-level schema document (`[[tables]]` entries in TOML)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaDocument {
    #[serde(default)]
    pub tables: Vec<Table>,
}

fn declared_spelling<'a>(columns: &'a [Column], name: &str) -> Option<&'a str> {
    columns
        .iter()
        .find(|c| c.name == name)
        .or_else(|| columns.iter().find(|c| c.name.eq_ignore_ascii_case(name)))
        .map(|c| c.name.as_str())
}
