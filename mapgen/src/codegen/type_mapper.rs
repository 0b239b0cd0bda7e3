//! Database to .NET type mapping

use super::dialect::Dialect;
use super::syntax::Language;
use crate::error::{CodegenError, Result};
use crate::parser::Column;

/// A .NET primitive or framework type a column can map to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClrType {
    Boolean,
    Byte,
    SByte,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Single,
    Double,
    Decimal,
    DateTime,
    DateTimeOffset,
    TimeSpan,
    Guid,
    String,
    ByteArray,
}

impl ClrType {
    /// Framework name, as used by NHibernate `type` attributes
    pub fn clr_name(&self) -> &'static str {
        match self {
            ClrType::Boolean => "Boolean",
            ClrType::Byte => "Byte",
            ClrType::SByte => "SByte",
            ClrType::Int16 => "Int16",
            ClrType::UInt16 => "UInt16",
            ClrType::Int32 => "Int32",
            ClrType::UInt32 => "UInt32",
            ClrType::Int64 => "Int64",
            ClrType::UInt64 => "UInt64",
            ClrType::Single => "Single",
            ClrType::Double => "Double",
            ClrType::Decimal => "Decimal",
            ClrType::DateTime => "DateTime",
            ClrType::DateTimeOffset => "DateTimeOffset",
            ClrType::TimeSpan => "TimeSpan",
            ClrType::Guid => "Guid",
            ClrType::String => "String",
            ClrType::ByteArray => "Byte[]",
        }
    }

    /// Keyword or type name in the given source language
    pub fn keyword(&self, language: Language) -> &'static str {
        match language {
            Language::CSharp => match self {
                ClrType::Boolean => "bool",
                ClrType::Byte => "byte",
                ClrType::SByte => "sbyte",
                ClrType::Int16 => "short",
                ClrType::UInt16 => "ushort",
                ClrType::Int32 => "int",
                ClrType::UInt32 => "uint",
                ClrType::Int64 => "long",
                ClrType::UInt64 => "ulong",
                ClrType::Single => "float",
                ClrType::Double => "double",
                ClrType::Decimal => "decimal",
                ClrType::String => "string",
                ClrType::ByteArray => "byte[]",
                other => other.clr_name(),
            },
            Language::VisualBasic => match self {
                ClrType::Int16 => "Short",
                ClrType::UInt16 => "UShort",
                ClrType::Int32 => "Integer",
                ClrType::UInt32 => "UInteger",
                ClrType::Int64 => "Long",
                ClrType::UInt64 => "ULong",
                ClrType::DateTime => "Date",
                ClrType::ByteArray => "Byte()",
                other => other.clr_name(),
            },
        }
    }

    /// Value types need an explicit `Nullable` wrapper for nullable columns
    pub fn is_value_type(&self) -> bool {
        !matches!(self, ClrType::String | ClrType::ByteArray)
    }

    /// Integral types are eligible for database-generated identities
    pub fn is_integral(&self) -> bool {
        matches!(
            self,
            ClrType::Byte
                | ClrType::SByte
                | ClrType::Int16
                | ClrType::UInt16
                | ClrType::Int32
                | ClrType::UInt32
                | ClrType::Int64
                | ClrType::UInt64
        )
    }
}

/// A type reference in a generated declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    Clr(ClrType),
    /// `Nullable<T>` over a value type
    Nullable(ClrType),
    /// A generated or framework class, e.g. `Customer`
    Named(String),
    /// A generic instantiation, e.g. `IList<Order>`
    Generic { name: String, args: Vec<TypeRef> },
}

impl TypeRef {
    /// Type for a column value, wrapping value types when the column is nullable
    pub fn for_column(ty: ClrType, nullable: bool) -> Self {
        if nullable && ty.is_value_type() {
            TypeRef::Nullable(ty)
        } else {
            TypeRef::Clr(ty)
        }
    }

    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named(name.into())
    }

    pub fn generic(name: impl Into<String>, arg: TypeRef) -> Self {
        TypeRef::Generic {
            name: name.into(),
            args: vec![arg],
        }
    }

    /// Render the reference in the given source language
    pub fn render(&self, language: Language) -> String {
        match (self, language) {
            (TypeRef::Clr(ty), _) => ty.keyword(language).to_string(),
            (TypeRef::Nullable(ty), Language::CSharp) => format!("{}?", ty.keyword(language)),
            (TypeRef::Nullable(ty), Language::VisualBasic) => {
                format!("Nullable(Of {})", ty.keyword(language))
            }
            (TypeRef::Named(name), _) => name.clone(),
            (TypeRef::Generic { name, args }, _) => {
                let args = args
                    .iter()
                    .map(|a| a.render(language))
                    .collect::<Vec<_>>()
                    .join(", ");
                match language {
                    Language::CSharp => format!("{}<{}>", name, args),
                    Language::VisualBasic => format!("{}(Of {})", name, args),
                }
            }
        }
    }

    /// The underlying column type, if this reference is one
    pub fn clr_type(&self) -> Option<ClrType> {
        match self {
            TypeRef::Clr(ty) | TypeRef::Nullable(ty) => Some(*ty),
            _ => None,
        }
    }
}

/// Maps provider column types onto .NET types
pub struct DataTypeMapper;

impl DataTypeMapper {
    /// Map a raw provider type to a .NET type.
    ///
    /// The raw type is matched case-insensitively with whitespace collapsed.
    /// Unknown types fail with [`CodegenError::UnsupportedType`].
    pub fn map_from_db_type(
        dialect: Dialect,
        raw_type: &str,
        length: Option<u32>,
        precision: Option<u32>,
        scale: Option<u32>,
    ) -> Result<ClrType> {
        let normalized = normalize_type_name(raw_type);
        dialect
            .behaviour()
            .map_type(&normalized, length, precision, scale)
            .ok_or_else(|| CodegenError::UnsupportedType {
                dialect: dialect.behaviour().name().to_string(),
                raw_type: raw_type.to_string(),
            })
    }

    /// Map a schema column, attaching the column name to any failure
    pub fn map_column(dialect: Dialect, table: &str, column: &Column) -> Result<ClrType> {
        Self::map_from_db_type(
            dialect,
            &column.data_type,
            column.length,
            column.precision,
            column.scale,
        )
        .map_err(|e| e.in_table(table, Some(&column.name)))
    }
}

/// Lowercase and collapse runs of whitespace
fn normalize_type_name(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
