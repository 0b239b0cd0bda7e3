//! Configuration settings for mapgen

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::defaults;
use super::preferences::{FieldGenerationConvention, Preferences, PrimaryStrategy};
use crate::codegen::dialect::Dialect;
use crate::codegen::syntax::Language;
use crate::error::{CodegenError, Result};

/// Main configuration struct for code generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodegenConfig {
    /// Path to the schema file (`.sql` DDL or `.toml` schema document)
    #[serde(default)]
    pub schema_file: PathBuf,

    /// Tables to include (comma-separated, or "*" for all)
    #[serde(default = "default_include_tables")]
    pub include_tables: String,

    /// Tables to exclude (comma-separated)
    #[serde(default = "default_exclude_tables")]
    pub exclude_tables: String,

    /// Folder receiving every generated artifact
    #[serde(default = "default_output_folder")]
    pub output_folder: PathBuf,

    /// Namespace of the generated classes (required)
    #[serde(default)]
    pub namespace: String,

    /// Assembly holding the generated classes; defaults to the namespace
    #[serde(default)]
    pub assembly_name: String,

    /// Prefix prepended to every generated class name
    #[serde(default)]
    pub class_name_prefix: String,

    /// Target language (csharp, vb)
    #[serde(default = "default_language")]
    pub language: String,

    /// Database dialect (sqlserver, oracle, mysql, postgresql)
    #[serde(default = "default_dialect")]
    pub dialect: String,

    /// Sequence feeding single-column keys, where the dialect supports one
    #[serde(default)]
    pub sequence_name: String,

    /// Member style (field, property, auto_property)
    #[serde(default = "default_field_generation_convention")]
    pub field_generation_convention: String,

    /// Collection interface for has-many members
    #[serde(default = "default_foreign_entity_collection_type")]
    pub foreign_entity_collection_type: String,

    #[serde(default = "default_use_lazy")]
    pub use_lazy: bool,

    #[serde(default = "default_generate_partial_classes")]
    pub generate_partial_classes: bool,

    /// Also emit plain value members for foreign-key columns
    #[serde(default = "default_include_foreign_keys")]
    pub include_foreign_keys: bool,

    /// Mapping strategy (convention, fluent, active_record, by_code, xml)
    #[serde(default = "default_strategy")]
    pub strategy: String,

    /// Also emit a data-contract class per table
    #[serde(default = "default_generate_data_contract")]
    pub generate_data_contract: bool,

    /// Base class and interfaces of domain classes (comma-separated, base class first)
    #[serde(default)]
    pub inheritance_and_interfaces: String,

    /// Dry run mode - preview without writing files
    #[serde(default = "default_dry_run")]
    pub dry_run: bool,

    /// Log level (trace, debug, info, warn, error)
    /// Can be overridden by RUST_LOG env var
    #[serde(default)]
    pub log_level: Option<String>,
}

// Default value functions for serde
fn default_include_tables() -> String {
    defaults::INCLUDE_TABLES.to_string()
}
fn default_exclude_tables() -> String {
    defaults::EXCLUDE_TABLES.to_string()
}
fn default_output_folder() -> PathBuf {
    PathBuf::from(defaults::OUTPUT_FOLDER)
}
fn default_language() -> String {
    defaults::LANGUAGE.to_string()
}
fn default_dialect() -> String {
    defaults::DIALECT.to_string()
}
fn default_field_generation_convention() -> String {
    defaults::FIELD_GENERATION_CONVENTION.to_string()
}
fn default_foreign_entity_collection_type() -> String {
    defaults::FOREIGN_ENTITY_COLLECTION_TYPE.to_string()
}
fn default_use_lazy() -> bool {
    defaults::USE_LAZY
}
fn default_generate_partial_classes() -> bool {
    defaults::GENERATE_PARTIAL_CLASSES
}
fn default_include_foreign_keys() -> bool {
    defaults::INCLUDE_FOREIGN_KEYS
}
fn default_strategy() -> String {
    defaults::STRATEGY.to_string()
}
fn default_generate_data_contract() -> bool {
    defaults::GENERATE_DATA_CONTRACT
}
fn default_dry_run() -> bool {
    defaults::DRY_RUN
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            schema_file: PathBuf::new(),
            include_tables: default_include_tables(),
            exclude_tables: default_exclude_tables(),
            output_folder: default_output_folder(),
            namespace: String::new(),
            assembly_name: String::new(),
            class_name_prefix: String::new(),
            language: default_language(),
            dialect: default_dialect(),
            sequence_name: String::new(),
            field_generation_convention: default_field_generation_convention(),
            foreign_entity_collection_type: default_foreign_entity_collection_type(),
            use_lazy: default_use_lazy(),
            generate_partial_classes: default_generate_partial_classes(),
            include_foreign_keys: default_include_foreign_keys(),
            strategy: default_strategy(),
            generate_data_contract: default_generate_data_contract(),
            inheritance_and_interfaces: String::new(),
            dry_run: default_dry_run(),
            log_level: None,
        }
    }
}

impl CodegenConfig {
    /// Create a default config with the given schema file and namespace
    pub fn default_with_schema(schema_file: PathBuf, namespace: &str) -> Self {
        Self {
            schema_file,
            namespace: namespace.to_string(),
            ..Default::default()
        }
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: CodegenConfig = toml::from_str(&content).map_err(|e| {
            CodegenError::ConfigError(format!(
                "Failed to parse config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(config)
    }

    /// Load configuration using config-rs (file + environment variables)
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from config file if specified
        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path));
        } else {
            // Try default locations
            builder = builder.add_source(File::with_name("mapgen").required(false));
        }

        // Override with environment variables (MAPGEN_*)
        builder = builder.add_source(Environment::with_prefix("MAPGEN").try_parsing(true));

        let config: CodegenConfig = builder.build()?.try_deserialize()?;

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.schema_file.as_os_str().is_empty() {
            return Err(CodegenError::ValidationError(
                "schema_file is required".into(),
            ));
        }

        if !self.schema_file.exists() {
            return Err(CodegenError::ValidationError(format!(
                "Schema file not found: {}",
                self.schema_file.display()
            )));
        }

        self.preferences().map(|_| ())
    }

    /// Resolve the string options into typed preferences.
    ///
    /// Fails with [`CodegenError::ConfigurationConflict`] for unknown or
    /// contradictory options and [`CodegenError::ValidationError`] for missing
    /// required settings. Nothing touches the filesystem.
    pub fn preferences(&self) -> Result<Preferences> {
        let namespace = self.namespace.trim();
        if namespace.is_empty() {
            return Err(CodegenError::ValidationError(
                "namespace is required".into(),
            ));
        }
        if namespace.contains(char::is_whitespace) {
            return Err(CodegenError::ValidationError(format!(
                "namespace `{}` must not contain whitespace",
                namespace
            )));
        }
        if self.output_folder.as_os_str().is_empty() {
            return Err(CodegenError::ValidationError(
                "output_folder is required".into(),
            ));
        }

        let language: Language = self.language.parse()?;
        let dialect: Dialect = self.dialect.parse()?;
        let field_convention: FieldGenerationConvention =
            self.field_generation_convention.parse()?;
        let strategy: PrimaryStrategy = self.strategy.parse()?;

        if strategy.requires_csharp() && language != Language::CSharp {
            return Err(CodegenError::ConfigurationConflict(format!(
                "the {} strategy emits C# lambdas and cannot target {}",
                strategy, language
            )));
        }

        let collection_type = self.foreign_entity_collection_type.trim();
        if collection_type.is_empty() {
            return Err(CodegenError::ConfigurationConflict(
                "foreign_entity_collection_type must not be empty".into(),
            ));
        }

        let assembly_name = match self.assembly_name.trim() {
            "" => namespace.to_string(),
            name => name.to_string(),
        };

        let base_types = self
            .inheritance_and_interfaces
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Preferences {
            output_folder: self.output_folder.clone(),
            namespace: namespace.to_string(),
            assembly_name,
            class_name_prefix: self.class_name_prefix.trim().to_string(),
            language,
            dialect,
            sequence_name: self.sequence_name.trim().to_string(),
            field_convention,
            collection_type: collection_type.to_string(),
            use_lazy: self.use_lazy,
            partial: self.generate_partial_classes,
            include_foreign_keys: self.include_foreign_keys,
            strategy,
            generate_data_contract: self.generate_data_contract,
            base_types,
        })
    }
}
