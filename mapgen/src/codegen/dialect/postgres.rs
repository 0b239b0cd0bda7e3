//! PostgreSQL type table

use sqlparser::dialect::PostgreSqlDialect;

use super::{IdGenerator, SqlDialect};
use crate::codegen::type_mapper::ClrType;

pub struct PostgreSql;

impl SqlDialect for PostgreSql {
    fn name(&self) -> &'static str {
        "PostgreSql"
    }

    fn map_type(
        &self,
        raw_type: &str,
        _length: Option<u32>,
        _precision: Option<u32>,
        _scale: Option<u32>,
    ) -> Option<ClrType> {
        let ty = match raw_type {
            "boolean" | "bool" => ClrType::Boolean,
            "smallint" | "int2" | "smallserial" => ClrType::Int16,
            "integer" | "int" | "int4" | "serial" => ClrType::Int32,
            "bigint" | "int8" | "bigserial" => ClrType::Int64,
            "numeric" | "decimal" | "money" => ClrType::Decimal,
            "real" | "float4" => ClrType::Single,
            "double precision" | "float8" | "double" => ClrType::Double,
            "date" | "timestamp" | "timestamp without time zone" => ClrType::DateTime,
            "timestamptz" | "timestamp with time zone" => ClrType::DateTimeOffset,
            "time" | "time without time zone" | "interval" => ClrType::TimeSpan,
            "char" | "character" | "varchar" | "character varying" | "text" | "citext"
            | "json" | "jsonb" | "xml" => ClrType::String,
            "bytea" => ClrType::ByteArray,
            "uuid" => ClrType::Guid,
            _ => return None,
        };
        Some(ty)
    }

    fn id_generator(&self, key_type: ClrType, sequence_name: &str) -> IdGenerator {
        if !sequence_name.trim().is_empty() {
            IdGenerator::Sequence(sequence_name.trim().to_string())
        } else if key_type.is_integral() {
            IdGenerator::Native
        } else {
            IdGenerator::Assigned
        }
    }

    fn parser_dialect(&self) -> Box<dyn sqlparser::dialect::Dialect> {
        Box::new(PostgreSqlDialect {})
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_table() {
        assert_eq!(PostgreSql.map_type("serial", None, None, None), Some(ClrType::Int32));
        assert_eq!(
            PostgreSql.map_type("double precision", None, None, None),
            Some(ClrType::Double)
        );
        assert_eq!(
            PostgreSql.map_type("timestamptz", None, None, None),
            Some(ClrType::DateTimeOffset)
        );
        assert_eq!(PostgreSql.map_type("jsonb", None, None, None), Some(ClrType::String));
        assert_eq!(PostgreSql.map_type("uuid", None, None, None), Some(ClrType::Guid));
        assert_eq!(PostgreSql.map_type("tsvector", None, None, None), None);
    }

    #[test]
    fn test_id_generator() {
        assert_eq!(PostgreSql.id_generator(ClrType::Int64, ""), IdGenerator::Native);
        assert_eq!(
            PostgreSql.id_generator(ClrType::Int64, "orders_id_seq"),
            IdGenerator::Sequence("orders_id_seq".to_string())
        );
    }
}
