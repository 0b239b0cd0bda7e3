//! MySQL type table

use sqlparser::dialect::MySqlDialect;

use super::{IdGenerator, SqlDialect};
use crate::codegen::type_mapper::ClrType;

pub struct MySql;

impl SqlDialect for MySql {
    fn name(&self) -> &'static str {
        "MySql"
    }

    fn map_type(
        &self,
        raw_type: &str,
        length: Option<u32>,
        _precision: Option<u32>,
        _scale: Option<u32>,
    ) -> Option<ClrType> {
        let (base, unsigned) = match raw_type.strip_suffix(" unsigned") {
            Some(base) => (base, true),
            None => (raw_type, false),
        };
        let ty = match base {
            "bool" | "boolean" => ClrType::Boolean,
            "tinyint" if length == Some(1) => ClrType::Boolean,
            "bit" if length.unwrap_or(1) == 1 => ClrType::Boolean,
            "tinyint" if unsigned => ClrType::Byte,
            "tinyint" => ClrType::SByte,
            "smallint" if unsigned => ClrType::UInt16,
            "smallint" | "year" => ClrType::Int16,
            "mediumint" | "int" | "integer" if unsigned => ClrType::UInt32,
            "mediumint" | "int" | "integer" => ClrType::Int32,
            "bigint" if unsigned => ClrType::UInt64,
            "bigint" => ClrType::Int64,
            "decimal" | "numeric" => ClrType::Decimal,
            "float" => ClrType::Single,
            "double" | "real" => ClrType::Double,
            "date" | "datetime" | "timestamp" => ClrType::DateTime,
            "time" => ClrType::TimeSpan,
            "char" | "varchar" | "tinytext" | "text" | "mediumtext" | "longtext" | "enum"
            | "set" | "json" => ClrType::String,
            "binary" | "varbinary" | "tinyblob" | "blob" | "mediumblob" | "longblob" | "bit" => {
                ClrType::ByteArray
            }
            _ => return None,
        };
        Some(ty)
    }

    fn id_generator(&self, key_type: ClrType, _sequence_name: &str) -> IdGenerator {
        if key_type.is_integral() {
            IdGenerator::Identity
        } else {
            IdGenerator::Assigned
        }
    }

    fn parser_dialect(&self) -> Box<dyn sqlparser::dialect::Dialect> {
        Box::new(MySqlDialect {})
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boolean_forms() {
        assert_eq!(MySql.map_type("tinyint", Some(1), None, None), Some(ClrType::Boolean));
        assert_eq!(MySql.map_type("bit", Some(1), None, None), Some(ClrType::Boolean));
        assert_eq!(MySql.map_type("boolean", None, None, None), Some(ClrType::Boolean));
        assert_eq!(MySql.map_type("bit", Some(8), None, None), Some(ClrType::ByteArray));
    }

    #[test]
    fn test_unsigned_widening() {
        assert_eq!(MySql.map_type("tinyint", Some(4), None, None), Some(ClrType::SByte));
        assert_eq!(MySql.map_type("tinyint unsigned", None, None, None), Some(ClrType::Byte));
        assert_eq!(MySql.map_type("int unsigned", None, None, None), Some(ClrType::UInt32));
        assert_eq!(MySql.map_type("bigint unsigned", None, None, None), Some(ClrType::UInt64));
        assert_eq!(MySql.map_type("bigint", None, None, None), Some(ClrType::Int64));
    }

    #[test]
    fn test_text_and_binary() {
        assert_eq!(MySql.map_type("longtext", None, None, None), Some(ClrType::String));
        assert_eq!(MySql.map_type("enum", None, None, None), Some(ClrType::String));
        assert_eq!(MySql.map_type("mediumblob", None, None, None), Some(ClrType::ByteArray));
        assert_eq!(MySql.map_type("geometry", None, None, None), None);
    }
}
