//! SQL Server type table

use sqlparser::dialect::MsSqlDialect;

use super::{IdGenerator, SqlDialect};
use crate::codegen::type_mapper::ClrType;

pub struct SqlServer;

impl SqlDialect for SqlServer {
    fn name(&self) -> &'static str {
        "SqlServer"
    }

    fn map_type(
        &self,
        raw_type: &str,
        _length: Option<u32>,
        _precision: Option<u32>,
        _scale: Option<u32>,
    ) -> Option<ClrType> {
        let ty = match raw_type {
            "bit" => ClrType::Boolean,
            "tinyint" => ClrType::Byte,
            "smallint" => ClrType::Int16,
            "int" | "integer" => ClrType::Int32,
            "bigint" => ClrType::Int64,
            "decimal" | "numeric" | "money" | "smallmoney" => ClrType::Decimal,
            "float" => ClrType::Double,
            "real" => ClrType::Single,
            "date" | "datetime" | "datetime2" | "smalldatetime" => ClrType::DateTime,
            "datetimeoffset" => ClrType::DateTimeOffset,
            "time" => ClrType::TimeSpan,
            "char" | "nchar" | "varchar" | "nvarchar" | "text" | "ntext" | "xml" | "sysname" => {
                ClrType::String
            }
            "binary" | "varbinary" | "image" | "timestamp" | "rowversion" => ClrType::ByteArray,
            "uniqueidentifier" => ClrType::Guid,
            _ => return None,
        };
        Some(ty)
    }

    fn id_generator(&self, key_type: ClrType, _sequence_name: &str) -> IdGenerator {
        if key_type.is_integral() {
            IdGenerator::Identity
        } else if key_type == ClrType::Guid {
            IdGenerator::GuidComb
        } else {
            IdGenerator::Assigned
        }
    }

    fn parser_dialect(&self) -> Box<dyn sqlparser::dialect::Dialect> {
        Box::new(MsSqlDialect {})
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(raw: &str) -> Option<ClrType> {
        SqlServer.map_type(raw, None, None, None)
    }

    #[test]
    fn test_integer_family() {
        assert_eq!(map("bit"), Some(ClrType::Boolean));
        assert_eq!(map("tinyint"), Some(ClrType::Byte));
        assert_eq!(map("smallint"), Some(ClrType::Int16));
        assert_eq!(map("int"), Some(ClrType::Int32));
        assert_eq!(map("bigint"), Some(ClrType::Int64));
    }

    #[test]
    fn test_numeric_is_decimal_regardless_of_scale() {
        assert_eq!(
            SqlServer.map_type("numeric", None, Some(5), Some(0)),
            Some(ClrType::Decimal)
        );
        assert_eq!(map("money"), Some(ClrType::Decimal));
        assert_eq!(map("float"), Some(ClrType::Double));
        assert_eq!(map("real"), Some(ClrType::Single));
    }

    #[test]
    fn test_text_binary_and_temporal() {
        assert_eq!(map("nvarchar"), Some(ClrType::String));
        assert_eq!(map("xml"), Some(ClrType::String));
        assert_eq!(map("varbinary"), Some(ClrType::ByteArray));
        assert_eq!(map("rowversion"), Some(ClrType::ByteArray));
        assert_eq!(map("datetime2"), Some(ClrType::DateTime));
        assert_eq!(map("datetimeoffset"), Some(ClrType::DateTimeOffset));
        assert_eq!(map("time"), Some(ClrType::TimeSpan));
        assert_eq!(map("uniqueidentifier"), Some(ClrType::Guid));
    }

    #[test]
    fn test_unsupported() {
        assert_eq!(map("geography"), None);
        assert_eq!(map("sql_variant"), None);
        assert_eq!(map("varchar2"), None);
    }

    #[test]
    fn test_id_generator() {
        assert_eq!(SqlServer.id_generator(ClrType::Int32, ""), IdGenerator::Identity);
        assert_eq!(SqlServer.id_generator(ClrType::Guid, ""), IdGenerator::GuidComb);
        assert_eq!(SqlServer.id_generator(ClrType::String, "seq"), IdGenerator::Assigned);
    }
}
