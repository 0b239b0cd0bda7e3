//! DDL schema parser using sqlparser-rs

use std::collections::{HashMap, HashSet};

use sqlparser::ast::{
    ColumnOption, Expr, ForeignKeyConstraint, Ident, IndexColumn, ObjectName,
    PrimaryKeyConstraint, Statement, TableConstraint,
};
use sqlparser::parser::Parser;
use tracing::{debug, warn};

use super::metadata::*;
use crate::codegen::dialect::{split_type_arguments, Dialect};
use crate::error::Result;

/// Type names whose arguments are precision and scale rather than a length
const NUMERIC_TYPES: &[&str] = &["decimal", "dec", "numeric", "number", "float"];

/// A foreign key as written in the DDL, before tables are cross-referenced
struct RawForeignKey {
    column_name: String,
    foreign_table: String,
}

/// Parse `CREATE TABLE` statements into the schema model.
///
/// Foreign keys are resolved against the tables of the same script: a key to
/// a table the script does not create stays unresolved (empty `references`).
/// Has-many relationships are derived from the resolved keys. Tables without
/// a primary key are skipped.
pub fn parse_schema(sql: &str, dialect: Dialect) -> Result<Vec<Table>> {
    let parser_dialect = dialect.behaviour().parser_dialect();
    let statements = Parser::parse_sql(parser_dialect.as_ref(), sql)?;

    let mut parsed = Vec::new();
    for stmt in statements {
        if let Statement::CreateTable(create_table) = stmt {
            match extract_table(&create_table) {
                Some(entry) => parsed.push(entry),
                None => warn!(
                    "Skipping table {}: no primary key",
                    extract_table_name(&create_table.name)
                ),
            }
        }
    }

    let mut tables = link_tables(parsed);
    for table in &mut tables {
        table.resolve_key_flags();
        table
            .validate()
            .map_err(|e| e.in_table(&table.name, None))?;
    }
    Ok(tables)
}

/// Extract one table; `None` when it has no primary key
fn extract_table(create: &sqlparser::ast::CreateTable) -> Option<(Table, Vec<RawForeignKey>)> {
    let name = extract_table_name(&create.name);

    let mut columns = Vec::new();
    let mut raw_keys = Vec::new();
    let mut primary_key = None;

    for col_def in &create.columns {
        let (column, col_pk, col_reference) = extract_column(col_def);
        if col_pk {
            primary_key = Some(vec![column.name.clone()]);
        }
        if let Some(foreign_table) = col_reference {
            raw_keys.push(RawForeignKey {
                column_name: column.name.clone(),
                foreign_table,
            });
        }
        columns.push(column);
    }

    for constraint in &create.constraints {
        match constraint {
            TableConstraint::PrimaryKey(PrimaryKeyConstraint {
                columns: pk_cols, ..
            }) => {
                primary_key = Some(pk_cols.iter().map(extract_ident_from_index_column).collect());
            }
            TableConstraint::ForeignKey(ForeignKeyConstraint {
                columns: fk_cols,
                foreign_table,
                ..
            }) => {
                for col in fk_cols {
                    raw_keys.push(RawForeignKey {
                        column_name: extract_ident(col),
                        foreign_table: extract_table_name(foreign_table),
                    });
                }
            }
            _ => {}
        }
    }

    let mut table = Table {
        name,
        columns,
        primary_key: PrimaryKey {
            columns: primary_key?,
        },
        foreign_keys: Vec::new(),
        has_many: Vec::new(),
    };
    // Unquoted identifiers compare case-insensitively
    table.canonicalize_key_columns();
    for key in &mut raw_keys {
        if let Some(declared) = table.declared_column_name(&key.column_name) {
            key.column_name = declared.to_string();
        }
    }
    Some((table, raw_keys))
}

/// Extract a column, whether it is an inline primary key, and its inline reference
fn extract_column(col_def: &sqlparser::ast::ColumnDef) -> (Column, bool, Option<String>) {
    let name = extract_ident(&col_def.name);
    let (data_type, args) = split_type_arguments(&col_def.data_type.to_string());

    let (length, precision, scale) = if NUMERIC_TYPES.contains(&data_type.as_str()) {
        (None, args.first().copied().flatten(), args.get(1).copied().flatten())
    } else {
        (args.first().copied().flatten(), None, None)
    };

    let mut nullable = true;
    let mut is_primary = false;
    let mut reference = None;

    for option in &col_def.options {
        match &option.option {
            ColumnOption::NotNull => nullable = false,
            ColumnOption::Null => nullable = true,
            ColumnOption::PrimaryKey(_) => {
                is_primary = true;
                nullable = false;
            }
            other => {
                // Inline `REFERENCES parent (id)`
                let text = other.to_string();
                if let Some(pos) = text.find("REFERENCES ") {
                    reference = Some(referenced_table_from_text(&text[pos + 11..]));
                }
            }
        }
    }

    let column = Column {
        name,
        data_type,
        length,
        precision,
        scale,
        nullable,
        is_primary_key: false,
        is_foreign_key: false,
    };
    (column, is_primary, reference)
}

/// Table name out of `schema.parent (id) ON DELETE ...`
fn referenced_table_from_text(text: &str) -> String {
    let object = text
        .split(|c: char| c == '(' || c.is_whitespace())
        .next()
        .unwrap_or_default();
    object
        .rsplit('.')
        .next()
        .unwrap_or_default()
        .trim_matches(|c| c == '"' || c == '`' || c == '[' || c == ']')
        .to_string()
}

/// Cross-reference foreign keys and derive has-many relationships
fn link_tables(parsed: Vec<(Table, Vec<RawForeignKey>)>) -> Vec<Table> {
    let canonical: HashMap<String, String> = parsed
        .iter()
        .map(|(t, _)| (t.name.to_lowercase(), t.name.clone()))
        .collect();

    let mut tables = Vec::with_capacity(parsed.len());
    for (mut table, mut raw_keys) in parsed {
        // An inline REFERENCES repeated as a table constraint is one key
        let mut seen = HashSet::new();
        raw_keys.retain(|key| {
            seen.insert((
                key.column_name.to_lowercase(),
                key.foreign_table.to_lowercase(),
            ))
        });

        let mut per_target: HashMap<String, usize> = HashMap::new();
        for key in &raw_keys {
            if let Some(target) = canonical.get(&key.foreign_table.to_lowercase()) {
                *per_target.entry(target.clone()).or_default() += 1;
            }
        }

        for key in raw_keys {
            let references = match canonical.get(&key.foreign_table.to_lowercase()) {
                Some(target) => target.clone(),
                None => {
                    debug!(
                        "{}.{} references unknown table {}",
                        table.name, key.column_name, key.foreign_table
                    );
                    String::new()
                }
            };
            let unique_property_name = match per_target.get(&references) {
                Some(count) if *count > 1 => strip_id_suffix(&key.column_name),
                _ => references.clone(),
            };
            table.foreign_keys.push(ForeignKey {
                column_name: key.column_name,
                references,
                unique_property_name,
            });
        }
        tables.push(table);
    }

    let mut relationships: HashMap<String, Vec<HasManyRelationship>> = HashMap::new();
    for child in &tables {
        for fk in child.resolved_foreign_keys() {
            relationships
                .entry(fk.references.clone())
                .or_default()
                .push(HasManyRelationship {
                    reference: child.name.clone(),
                    reference_column: fk.column_name.clone(),
                });
        }
    }
    for table in &mut tables {
        if let Some(has_many) = relationships.remove(&table.name) {
            table.has_many = has_many;
        }
    }

    tables
}

/// `billing_address_id` -> `billing_address`, `ParentId` -> `Parent`
fn strip_id_suffix(column: &str) -> String {
    let lower = column.to_lowercase();
    for suffix in ["_id", "id"] {
        if lower.ends_with(suffix) && column.len() > suffix.len() {
            return column[..column.len() - suffix.len()].to_string();
        }
    }
    column.to_string()
}

/// Extract a simple string from an ObjectName
fn extract_table_name(name: &ObjectName) -> String {
    name.0
        .last()
        .and_then(|part| part.as_ident())
        .map(|ident| ident.value.clone())
        .unwrap_or_default()
}

fn extract_ident(ident: &Ident) -> String {
    ident.value.clone()
}

/// Extract a column name string from an IndexColumn
fn extract_ident_from_index_column(ic: &IndexColumn) -> String {
    match &ic.column.expr {
        Expr::Identifier(ident) => ident.value.clone(),
        other => format!("{}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHOP: &str = r#"
        CREATE TABLE Customer (
            CustomerId INT NOT NULL PRIMARY KEY,
            Name NVARCHAR(100) NOT NULL,
            Email NVARCHAR(255) NULL
        );
        CREATE TABLE Address (
            AddressId INT NOT NULL PRIMARY KEY,
            Street NVARCHAR(200) NOT NULL
        );
        CREATE TABLE Orders (
            OrderId INT NOT NULL,
            CustomerId INT NOT NULL,
            BillingAddressId INT NULL,
            ShippingAddressId INT NULL,
            Total DECIMAL(10, 2) NOT NULL,
            WarehouseId INT NULL,
            PRIMARY KEY (OrderId),
            FOREIGN KEY (CustomerId) REFERENCES Customer (CustomerId),
            FOREIGN KEY (BillingAddressId) REFERENCES Address (AddressId),
            FOREIGN KEY (ShippingAddressId) REFERENCES Address (AddressId),
            FOREIGN KEY (WarehouseId) REFERENCES Warehouse (WarehouseId)
        );
    "#;

    fn table<'a>(tables: &'a [Table], name: &str) -> &'a Table {
        tables.iter().find(|t| t.name == name).unwrap()
    }

    #[test]
    fn test_parse_columns_and_arguments() {
        let tables = parse_schema(SHOP, Dialect::SqlServer).unwrap();
        assert_eq!(tables.len(), 3);

        let customer = table(&tables, "Customer");
        assert_eq!(customer.primary_key.columns, vec!["CustomerId"]);
        let name = customer.get_column("Name").unwrap();
        assert_eq!(name.data_type, "nvarchar");
        assert_eq!(name.length, Some(100));
        assert!(!name.nullable);
        assert!(customer.get_column("Email").unwrap().nullable);
        assert!(customer.get_column("CustomerId").unwrap().is_primary_key);

        let total = table(&tables, "Orders").get_column("Total").unwrap();
        assert_eq!(total.data_type, "decimal");
        assert_eq!((total.precision, total.scale), (Some(10), Some(2)));
        assert_eq!(total.length, None);
    }

    #[test]
    fn test_foreign_keys_resolved_and_disambiguated() {
        let tables = parse_schema(SHOP, Dialect::SqlServer).unwrap();
        let orders = table(&tables, "Orders");

        let by_column = |c: &str| {
            orders
                .foreign_keys
                .iter()
                .find(|fk| fk.column_name == c)
                .unwrap()
        };
        assert_eq!(by_column("CustomerId").references, "Customer");
        assert_eq!(by_column("CustomerId").unique_property_name, "Customer");
        assert_eq!(by_column("BillingAddressId").unique_property_name, "BillingAddress");
        assert_eq!(by_column("ShippingAddressId").unique_property_name, "ShippingAddress");

        let warehouse = by_column("WarehouseId");
        assert!(!warehouse.is_resolved());
        assert!(orders.get_column("WarehouseId").unwrap().is_foreign_key);
    }

    #[test]
    fn test_has_many_derived() {
        let tables = parse_schema(SHOP, Dialect::SqlServer).unwrap();
        let customer = table(&tables, "Customer");
        assert_eq!(
            customer.has_many,
            vec![HasManyRelationship {
                reference: "Orders".to_string(),
                reference_column: "CustomerId".to_string(),
            }]
        );
        assert_eq!(table(&tables, "Address").has_many.len(), 2);
    }

    #[test]
    fn test_key_columns_match_case_insensitively() {
        let sql = r#"
            CREATE TABLE Customer (
                CustomerId INT NOT NULL,
                Name NVARCHAR(100) NOT NULL,
                PRIMARY KEY (customerid)
            );
            CREATE TABLE Orders (
                OrderId INT NOT NULL,
                CustomerId INT NOT NULL,
                PRIMARY KEY (ORDERID),
                FOREIGN KEY (customerID) REFERENCES customer (CustomerId)
            );
        "#;
        let tables = parse_schema(sql, Dialect::SqlServer).unwrap();

        let customer = table(&tables, "Customer");
        assert_eq!(customer.primary_key.columns, vec!["CustomerId"]);
        assert!(customer.get_column("CustomerId").unwrap().is_primary_key);
        assert_eq!(customer.has_many[0].reference_column, "CustomerId");

        let orders = table(&tables, "Orders");
        assert_eq!(orders.primary_key.columns, vec!["OrderId"]);
        assert_eq!(orders.foreign_keys[0].column_name, "CustomerId");
        assert_eq!(orders.foreign_keys[0].references, "Customer");
        assert!(orders.get_column("CustomerId").unwrap().is_foreign_key);
    }

    #[test]
    fn test_repeated_foreign_key_counted_once() {
        let sql = r#"
            CREATE TABLE parent (id INTEGER PRIMARY KEY);
            CREATE TABLE child (
                id INTEGER PRIMARY KEY,
                parent_id INTEGER REFERENCES parent (id),
                FOREIGN KEY (parent_id) REFERENCES parent (id)
            );
        "#;
        let tables = parse_schema(sql, Dialect::PostgreSql).unwrap();
        let child = table(&tables, "child");
        assert_eq!(child.foreign_keys.len(), 1);
        assert_eq!(child.foreign_keys[0].unique_property_name, "parent");
        assert_eq!(table(&tables, "parent").has_many.len(), 1);
    }

    #[test]
    fn test_parse_composite_primary_key() {
        let sql = r#"
            CREATE TABLE order_items (
                order_id BIGINT NOT NULL,
                product_id BIGINT NOT NULL,
                quantity INT NOT NULL,
                PRIMARY KEY (order_id, product_id)
            );
        "#;

        let tables = parse_schema(sql, Dialect::MySql).unwrap();
        let pk = &tables[0].primary_key;
        assert!(pk.is_composite());
        assert_eq!(pk.columns, vec!["order_id", "product_id"]);
    }

    #[test]
    fn test_table_without_key_is_skipped() {
        let sql = "CREATE TABLE audit_log (message TEXT);";
        assert!(parse_schema(sql, Dialect::PostgreSql).unwrap().is_empty());
    }

    #[test]
    fn test_self_reference() {
        let sql = r#"
            CREATE TABLE category (
                id INTEGER PRIMARY KEY,
                parent_id INTEGER REFERENCES category (id),
                name VARCHAR(50) NOT NULL
            );
        "#;
        let tables = parse_schema(sql, Dialect::PostgreSql).unwrap();
        let category = &tables[0];
        assert_eq!(category.foreign_keys.len(), 1);
        assert_eq!(category.foreign_keys[0].references, "category");
        assert_eq!(category.has_many[0].reference, "category");
        assert_eq!(category.has_many[0].reference_column, "parent_id");
    }

    #[test]
    fn test_oracle_types() {
        let sql = r#"
            CREATE TABLE Customer (
                CustomerId NUMBER(10) NOT NULL,
                Balance NUMBER(12, 2),
                Name VARCHAR2(80),
                PRIMARY KEY (CustomerId)
            );
        "#;
        let tables = parse_schema(sql, Dialect::Oracle).unwrap();
        let id = tables[0].get_column("CustomerId").unwrap();
        assert_eq!(id.data_type, "number");
        assert_eq!(id.precision, Some(10));
        let name = tables[0].get_column("Name").unwrap();
        assert_eq!((name.data_type.as_str(), name.length), ("varchar2", Some(80)));
    }

    #[test]
    fn test_strip_id_suffix() {
        assert_eq!(strip_id_suffix("billing_address_id"), "billing_address");
        assert_eq!(strip_id_suffix("ParentId"), "Parent");
        assert_eq!(strip_id_suffix("Id"), "Id");
        assert_eq!(strip_id_suffix("Owner"), "Owner");
    }

    #[test]
    fn test_referenced_table_from_text() {
        assert_eq!(referenced_table_from_text("category(id)"), "category");
        assert_eq!(referenced_table_from_text("dbo.Customer (CustomerId)"), "Customer");
        assert_eq!(referenced_table_from_text("\"Parent\" (id) ON DELETE CASCADE"), "Parent");
    }
}
