//! Oracle type table

use sqlparser::dialect::GenericDialect;

use super::{IdGenerator, SqlDialect};
use crate::codegen::type_mapper::ClrType;

/// `RAW(16)` is the conventional Oracle storage for GUIDs
const GUID_RAW_LENGTH: u32 = 16;

pub struct Oracle;

impl Oracle {
    /// `NUMBER(p, s)`: integral when the scale is zero and the precision fits
    fn map_number(precision: Option<u32>, scale: Option<u32>) -> ClrType {
        match (precision, scale.unwrap_or(0)) {
            (Some(p), 0) if p <= 4 => ClrType::Int16,
            (Some(p), 0) if p <= 9 => ClrType::Int32,
            (Some(p), 0) if p <= 18 => ClrType::Int64,
            _ => ClrType::Decimal,
        }
    }
}

impl SqlDialect for Oracle {
    fn name(&self) -> &'static str {
        "Oracle"
    }

    fn map_type(
        &self,
        raw_type: &str,
        length: Option<u32>,
        precision: Option<u32>,
        scale: Option<u32>,
    ) -> Option<ClrType> {
        let ty = match raw_type {
            "number" => Self::map_number(precision, scale),
            "decimal" | "numeric" => ClrType::Decimal,
            "integer" | "int" => ClrType::Int32,
            "smallint" => ClrType::Int16,
            "float" | "binary_double" => ClrType::Double,
            "binary_float" => ClrType::Single,
            "varchar2" | "nvarchar2" | "varchar" | "char" | "nchar" | "clob" | "nclob" | "long"
            | "rowid" | "urowid" | "xmltype" => ClrType::String,
            "date" | "timestamp" => ClrType::DateTime,
            "timestamp with time zone" | "timestamp with local time zone" => {
                ClrType::DateTimeOffset
            }
            "interval day to second" => ClrType::TimeSpan,
            "raw" if length == Some(GUID_RAW_LENGTH) => ClrType::Guid,
            "raw" | "long raw" | "blob" | "bfile" => ClrType::ByteArray,
            _ => return None,
        };
        Some(ty)
    }

    fn id_generator(&self, _key_type: ClrType, sequence_name: &str) -> IdGenerator {
        if sequence_name.trim().is_empty() {
            IdGenerator::Assigned
        } else {
            IdGenerator::Sequence(sequence_name.trim().to_string())
        }
    }

    fn parser_dialect(&self) -> Box<dyn sqlparser::dialect::Dialect> {
        Box::new(GenericDialect {})
    }
}
