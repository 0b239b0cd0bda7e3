//! Schema sources: DDL via sqlparser-rs and TOML schema documents

mod metadata;
mod schema_parser;

pub use metadata::*;
pub use schema_parser::*;

use std::path::Path;

use crate::codegen::dialect::Dialect;
use crate::error::{CodegenError, Result};

/// Parse a TOML schema document (`[[tables]]` entries) into the schema model
pub fn parse_schema_document(text: &str) -> Result<Vec<Table>> {
    let document: SchemaDocument = toml::from_str(text)
        .map_err(|e| CodegenError::ParseError(format!("invalid schema document: {}", e)))?;

    let mut tables = document.tables;
    for table in &mut tables {
        table.resolve_key_flags();
        table
            .validate()
            .map_err(|e| e.in_table(&table.name, None))?;
    }
    Ok(tables)
}

/// Load a schema file, choosing the reader by extension (`.toml`, anything else is DDL)
pub fn load_schema_file(path: &Path, dialect: Dialect) -> Result<Vec<Table>> {
    let text = std::fs::read_to_string(path)?;
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("toml") => parse_schema_document(&text),
        _ => parse_schema(&text, dialect),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = r#"
        [[tables]]
        name = "Customer"
        primary_key = { columns = ["CustomerId"] }
        columns = [
            { name = "CustomerId", data_type = "int" },
            { name = "Name", data_type = "nvarchar", length = 100 },
        ]
        has_many = [{ reference = "Orders", reference_column = "CustomerId" }]

        [[tables]]
        name = "Orders"
        primary_key = { columns = ["OrderId"] }
        columns = [
            { name = "OrderId", data_type = "int" },
            { name = "CustomerId", data_type = "int" },
        ]
        foreign_keys = [{ column_name = "CustomerId", references = "Customer" }]
    "#;

    #[test]
    fn test_parse_schema_document() {
        let tables = parse_schema_document(DOCUMENT).unwrap();
        assert_eq!(tables.len(), 2);

        let customer = &tables[0];
        assert!(customer.get_column("CustomerId").unwrap().is_primary_key);
        assert_eq!(customer.get_column("Name").unwrap().length, Some(100));
        assert_eq!(customer.has_many[0].reference, "Orders");

        let orders = &tables[1];
        assert!(orders.get_column("CustomerId").unwrap().is_foreign_key);
        assert_eq!(orders.foreign_keys[0].property_name(), "Customer");
    }

    #[test]
    fn test_document_missing_key_column_rejected() {
        let text = r#"
            [[tables]]
            name = "Broken"
            primary_key = { columns = ["Id"] }
            columns = [{ name = "Other", data_type = "int" }]
        "#;
        let err = parse_schema_document(text).unwrap_err();
        assert!(err.to_string().contains("Broken"));
    }

    #[test]
    fn test_load_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let toml_path = dir.path().join("schema.toml");
        std::fs::write(&toml_path, DOCUMENT).unwrap();
        assert_eq!(load_schema_file(&toml_path, Dialect::SqlServer).unwrap().len(), 2);

        let sql_path = dir.path().join("schema.sql");
        std::fs::write(&sql_path, "CREATE TABLE t (id INT PRIMARY KEY);").unwrap();
        assert_eq!(load_schema_file(&sql_path, Dialect::SqlServer).unwrap().len(), 1);
    }
}
