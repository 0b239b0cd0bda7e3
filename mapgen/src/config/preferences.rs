//! Resolved generation preferences
//!
//! [`CodegenConfig`](super::CodegenConfig) keeps options as the strings a user
//! typed; [`Preferences`] is the typed snapshot every strategy reads.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::codegen::dialect::Dialect;
use crate::codegen::naming;
use crate::codegen::syntax::Language;
use crate::error::CodegenError;

/// How domain-class members are declared
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldGenerationConvention {
    /// Public fields
    Field,
    /// Private backing field plus a property with bodies
    Property,
    /// Auto-implemented properties
    AutoProperty,
}

impl FromStr for FieldGenerationConvention {
    type Err = CodegenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "field" => Ok(Self::Field),
            "property" => Ok(Self::Property),
            "auto_property" | "autoproperty" => Ok(Self::AutoProperty),
            other => Err(CodegenError::ConfigurationConflict(format!(
                "unknown field generation convention `{}`",
                other
            ))),
        }
    }
}

/// The one mapping strategy a run uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimaryStrategy {
    /// Conformist mapping declaring only table, id and relationships
    Convention,
    /// FluentNHibernate `ClassMap<T>`
    Fluent,
    /// Castle ActiveRecord attributes
    ActiveRecord,
    /// Conformist mapping with an explicit `Property` per column
    ByCode,
    /// `.hbm.xml` mapping document
    XmlMapping,
}

impl PrimaryStrategy {
    /// Whether the strategy relies on multi-statement lambdas (C# only)
    pub fn requires_csharp(&self) -> bool {
        matches!(self, PrimaryStrategy::Convention | PrimaryStrategy::ByCode)
    }
}

impl FromStr for PrimaryStrategy {
    type Err = CodegenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "convention" | "nh_fluent" => Ok(Self::Convention),
            "fluent" => Ok(Self::Fluent),
            "active_record" | "activerecord" | "castle" => Ok(Self::ActiveRecord),
            "by_code" | "bycode" => Ok(Self::ByCode),
            "xml" | "xml_mapping" | "hbm" => Ok(Self::XmlMapping),
            other => Err(CodegenError::ConfigurationConflict(format!(
                "unknown generation strategy `{}`",
                other
            ))),
        }
    }
}

impl fmt::Display for PrimaryStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PrimaryStrategy::Convention => "convention",
            PrimaryStrategy::Fluent => "fluent",
            PrimaryStrategy::ActiveRecord => "active_record",
            PrimaryStrategy::ByCode => "by_code",
            PrimaryStrategy::XmlMapping => "xml",
        };
        f.write_str(name)
    }
}

/// Typed, validated generation options
#[derive(Debug, Clone, PartialEq)]
pub struct Preferences {
    pub output_folder: PathBuf,
    pub namespace: String,
    pub assembly_name: String,
    pub class_name_prefix: String,
    pub language: Language,
    pub dialect: Dialect,
    pub sequence_name: String,
    pub field_convention: FieldGenerationConvention,
    /// Collection interface for has-many members, e.g. `IList`
    pub collection_type: String,
    pub use_lazy: bool,
    pub partial: bool,
    pub include_foreign_keys: bool,
    pub strategy: PrimaryStrategy,
    pub generate_data_contract: bool,
    /// Base class first, then interfaces
    pub base_types: Vec<String>,
}

impl Preferences {
    /// Generated class name for a table: prefix plus the singular table name
    pub fn class_name(&self, table_name: &str) -> String {
        format!("{}{}", self.class_name_prefix, naming::format_singular(table_name))
    }

    /// Assembly-qualified name as NHibernate expects it in mapping documents
    pub fn qualified_class_name(&self, table_name: &str) -> String {
        format!(
            "{}.{}, {}",
            self.namespace,
            self.class_name(table_name),
            self.assembly_name
        )
    }

    /// File name for an artifact of the given class with the given extension
    pub fn file_name(&self, class_name: &str, extension: &str) -> String {
        format!("{}.{}", class_name, extension)
    }

    /// File name for a source artifact in the configured language
    pub fn source_file_name(&self, class_name: &str) -> String {
        self.file_name(class_name, self.language.file_extension())
    }
}
