//! mapgen: Generate .NET domain classes and NHibernate mappings from schema metadata
//!
//! The schema comes from a DDL script (parsed with `sqlparser-rs`) or a TOML
//! schema document. For every table mapgen emits a domain class in C# or
//! VB.NET plus the mapping for one strategy:
//!
//! - `.hbm.xml` mapping documents (`xml`, the default)
//! - FluentNHibernate `ClassMap<T>` classes (`fluent`)
//! - NHibernate mapping-by-code, explicit or convention based (`by_code`, `convention`)
//! - Castle ActiveRecord attributes (`active_record`)
//!
//! and, on request, a WCF data-contract class.
//!
//! # Configuration file
//!
//! ```toml
//! schema_file = "schema.sql"
//! namespace = "Shop.Domain"
//! output_folder = "./generated"
//! dialect = "sqlserver"
//! strategy = "fluent"
//! ```
//!
//! # Programmatic use
//!
//! ```rust,ignore
//! mapgen::CodegenBuilder::new("schema.sql", "Shop.Domain")
//!     .output_folder("generated")
//!     .strategy("fluent")
//!     .generate()
//!     .expect("Failed to generate mappings");
//! ```
//!
//! # CLI Usage
//!
//! ```bash
//! mapgen --config mapgen.toml --output ./generated generate
//! ```

pub mod codegen;
pub mod config;
pub mod error;
pub mod parser;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

pub use codegen::CodeGenerator;
pub use config::{CodegenConfig, Preferences};
pub use error::{CodegenError, Result};

/// Main entry point for code generation; returns the paths written
pub fn generate(config: &CodegenConfig) -> Result<Vec<PathBuf>> {
    // Contradictory options fail before any file is read or written
    let prefs = config.preferences()?;

    let tables = load_tables(config, &prefs)?;
    let generator = CodeGenerator::new(prefs, config.dry_run);
    let written = generator.generate(&tables)?;

    info!("Code generation complete");
    Ok(written)
}

/// Load the schema file and apply the include/exclude filters
pub fn load_tables(config: &CodegenConfig, prefs: &Preferences) -> Result<Vec<parser::Table>> {
    info!("Parsing schema: {:?}", config.schema_file);
    let tables = parser::load_schema_file(&config.schema_file, prefs.dialect)?;
    info!("Found {} tables", tables.len());

    let tables = filter_tables(tables, &config.include_tables, &config.exclude_tables);
    debug!(
        "After filtering: {} tables (include={}, exclude={})",
        tables.len(),
        config.include_tables,
        config.exclude_tables
    );
    Ok(tables)
}

/// Filter tables based on include/exclude patterns
fn filter_tables(tables: Vec<parser::Table>, include: &str, exclude: &str) -> Vec<parser::Table> {
    let include_all = include.trim() == "*" || include.trim().is_empty();
    let include_set: HashSet<String> = if include_all {
        HashSet::new()
    } else {
        include.split(',').map(|s| s.trim().to_lowercase()).collect()
    };
    let exclude_set: HashSet<String> = exclude
        .split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect();

    tables
        .into_iter()
        .filter(|t| {
            let name = t.name.to_lowercase();
            let included = include_all || include_set.contains(&name);
            let excluded = exclude_set.contains(&name);
            included && !excluded
        })
        .collect()
}

/// Builder pattern for configuring a run in code
pub struct CodegenBuilder {
    config: CodegenConfig,
}

impl CodegenBuilder {
    /// Create a new builder with the given schema file and target namespace
    pub fn new(schema_file: impl AsRef<Path>, namespace: &str) -> Self {
        Self {
            config: CodegenConfig::default_with_schema(
                schema_file.as_ref().to_path_buf(),
                namespace,
            ),
        }
    }

    /// Set the folder receiving every artifact
    pub fn output_folder(mut self, dir: impl AsRef<Path>) -> Self {
        self.config.output_folder = dir.as_ref().to_path_buf();
        self
    }

    pub fn assembly_name(mut self, name: &str) -> Self {
        self.config.assembly_name = name.to_string();
        self
    }

    pub fn class_name_prefix(mut self, prefix: &str) -> Self {
        self.config.class_name_prefix = prefix.to_string();
        self
    }

    /// Set the target language (`csharp` or `vb`)
    pub fn language(mut self, language: &str) -> Self {
        self.config.language = language.to_string();
        self
    }

    /// Set the database dialect (`sqlserver`, `oracle`, `mysql`, `postgresql`)
    pub fn dialect(mut self, dialect: &str) -> Self {
        self.config.dialect = dialect.to_string();
        self
    }

    pub fn sequence_name(mut self, name: &str) -> Self {
        self.config.sequence_name = name.to_string();
        self
    }

    /// Set the member style (`field`, `property`, `auto_property`)
    pub fn field_generation_convention(mut self, convention: &str) -> Self {
        self.config.field_generation_convention = convention.to_string();
        self
    }

    pub fn collection_type(mut self, collection_type: &str) -> Self {
        self.config.foreign_entity_collection_type = collection_type.to_string();
        self
    }

    pub fn lazy(mut self, use_lazy: bool) -> Self {
        self.config.use_lazy = use_lazy;
        self
    }

    pub fn partial_classes(mut self) -> Self {
        self.config.generate_partial_classes = true;
        self
    }

    pub fn include_foreign_keys(mut self) -> Self {
        self.config.include_foreign_keys = true;
        self
    }

    /// Set the mapping strategy (`convention`, `fluent`, `active_record`, `by_code`, `xml`)
    pub fn strategy(mut self, strategy: &str) -> Self {
        self.config.strategy = strategy.to_string();
        self
    }

    pub fn data_contract(mut self) -> Self {
        self.config.generate_data_contract = true;
        self
    }

    /// Base class first, then interfaces
    pub fn inherit(mut self, types: &[&str]) -> Self {
        self.config.inheritance_and_interfaces = types.join(",");
        self
    }

    /// Set tables to include
    pub fn include_tables(mut self, tables: &[&str]) -> Self {
        self.config.include_tables = tables.join(",");
        self
    }

    /// Set tables to exclude
    pub fn exclude_tables(mut self, tables: &[&str]) -> Self {
        self.config.exclude_tables = tables.join(",");
        self
    }

    /// Enable dry run mode (preview without writing files)
    pub fn dry_run(mut self) -> Self {
        self.config.dry_run = true;
        self
    }

    pub fn config(&self) -> &CodegenConfig {
        &self.config
    }

    /// Generate the code
    pub fn generate(self) -> Result<Vec<PathBuf>> {
        generate(&self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{PrimaryKey, Table};

    fn named(name: &str) -> Table {
        Table {
            name: name.to_string(),
            columns: Vec::new(),
            primary_key: PrimaryKey {
                columns: Vec::new(),
            },
            foreign_keys: Vec::new(),
            has_many: Vec::new(),
        }
    }

    fn names(tables: Vec<Table>) -> Vec<String> {
        tables.into_iter().map(|t| t.name).collect()
    }

    #[test]
    fn test_filter_tables() {
        let all = || vec![named("Customer"), named("Orders"), named("AuditLog")];
        assert_eq!(names(filter_tables(all(), "*", "")).len(), 3);
        assert_eq!(names(filter_tables(all(), "customer, Orders", "")), vec!["Customer", "Orders"]);
        assert_eq!(names(filter_tables(all(), "*", "auditlog")), vec!["Customer", "Orders"]);
        assert_eq!(names(filter_tables(all(), "", "Orders,AuditLog")), vec!["Customer"]);
    }

    #[test]
    fn test_builder_maps_onto_config() {
        let builder = CodegenBuilder::new("schema.sql", "Shop")
            .output_folder("out")
            .strategy("fluent")
            .language("vb")
            .inherit(&["EntityBase", "IAuditable"])
            .partial_classes()
            .data_contract()
            .dry_run();
        let config = builder.config();
        assert_eq!(config.output_folder, PathBuf::from("out"));
        assert_eq!(config.inheritance_and_interfaces, "EntityBase,IAuditable");

        let prefs = config.preferences().unwrap();
        assert_eq!(prefs.strategy, crate::config::PrimaryStrategy::Fluent);
        assert_eq!(prefs.base_types, vec!["EntityBase", "IAuditable"]);
        assert!(prefs.partial && prefs.generate_data_contract);
    }

    #[test]
    fn test_conflict_before_reading_schema() {
        let err = CodegenBuilder::new("does-not-exist.sql", "Shop")
            .language("vb")
            .strategy("by_code")
            .generate()
            .unwrap_err();
        assert!(matches!(err, CodegenError::ConfigurationConflict(_)));
    }
}
