//! Default configuration values - single source of truth

/// Default include tables pattern (all tables)
pub const INCLUDE_TABLES: &str = "*";

/// Default exclude tables pattern (none)
pub const EXCLUDE_TABLES: &str = "";

/// Default output folder for generated artifacts
pub const OUTPUT_FOLDER: &str = "./generated";

/// Default target language
pub const LANGUAGE: &str = "csharp";

/// Default database dialect
pub const DIALECT: &str = "sqlserver";

/// Default member style of domain classes
pub const FIELD_GENERATION_CONVENTION: &str = "auto_property";

/// Default collection interface for has-many members
pub const FOREIGN_ENTITY_COLLECTION_TYPE: &str = "IList";

/// Default primary strategy
pub const STRATEGY: &str = "xml";

/// Whether mapped classes are lazy-loaded by default
pub const USE_LAZY: bool = true;

/// Whether to emit partial classes by default
pub const GENERATE_PARTIAL_CLASSES: bool = false;

/// Whether foreign-key columns also get plain value members by default
pub const INCLUDE_FOREIGN_KEYS: bool = false;

/// Whether to emit a data-contract class by default
pub const GENERATE_DATA_CONTRACT: bool = false;

/// Whether to run in dry-run mode by default
pub const DRY_RUN: bool = false;
