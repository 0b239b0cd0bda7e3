//! Database dialects
//!
//! Each dialect owns its type table, its identity-generation convention and the
//! `sqlparser` dialect used to read its DDL. Callers look the behaviour up through
//! [`Dialect::behaviour`] instead of branching on the dialect themselves.
//!
//! | Dialect | Raw types | .NET type |
//! |---------|-----------|-----------|
//! | SQL Server | `bit` | Boolean |
//! | | `tinyint` / `smallint` / `int` / `bigint` | Byte / Int16 / Int32 / Int64 |
//! | | `decimal`, `numeric`, `money`, `smallmoney` | Decimal |
//! | | `float` / `real` | Double / Single |
//! | | `date`, `datetime`, `datetime2`, `smalldatetime` | DateTime |
//! | | `datetimeoffset` / `time` | DateTimeOffset / TimeSpan |
//! | | `char`, `nchar`, `varchar`, `nvarchar`, `text`, `ntext`, `xml`, `sysname` | String |
//! | | `binary`, `varbinary`, `image`, `timestamp`, `rowversion` | Byte[] |
//! | | `uniqueidentifier` | Guid |
//! | Oracle | `number(p,0)` p<=4 / p<=9 / p<=18 | Int16 / Int32 / Int64 |
//! | | `number` otherwise, `decimal`, `numeric` | Decimal |
//! | | `integer`, `int` / `smallint` | Int32 / Int16 |
//! | | `float`, `binary_double` / `binary_float` | Double / Single |
//! | | `varchar2`, `nvarchar2`, `varchar`, `char`, `nchar`, `clob`, `nclob`, `long`, `rowid`, `urowid`, `xmltype` | String |
//! | | `date`, `timestamp` | DateTime |
//! | | `timestamp with (local) time zone` / `interval day to second` | DateTimeOffset / TimeSpan |
//! | | `raw(16)` | Guid |
//! | | `raw`, `long raw`, `blob`, `bfile` | Byte[] |
//! | MySQL | `tinyint(1)`, `bit(1)`, `bool`, `boolean` | Boolean |
//! | | `tinyint` / `smallint` / `mediumint`, `int` / `bigint` (`unsigned` widens to unsigned) | SByte / Int16 / Int32 / Int64 |
//! | | `decimal`, `numeric` / `float` / `double`, `real` | Decimal / Single / Double |
//! | | `date`, `datetime`, `timestamp` / `time` / `year` | DateTime / TimeSpan / Int16 |
//! | | `char`, `varchar`, `*text`, `enum`, `set`, `json` | String |
//! | | `binary`, `varbinary`, `*blob`, `bit(n)` | Byte[] |
//! | PostgreSQL | `boolean` / `smallint` / `integer`, `serial` / `bigint`, `bigserial` | Boolean / Int16 / Int32 / Int64 |
//! | | `numeric`, `decimal`, `money` / `real` / `double precision` | Decimal / Single / Double |
//! | | `date`, `timestamp` / `timestamptz` / `time`, `interval` | DateTime / DateTimeOffset / TimeSpan |
//! | | `char`, `varchar`, `text`, `citext`, `json`, `jsonb`, `xml` | String |
//! | | `bytea` / `uuid` | Byte[] / Guid |

mod mysql;
mod oracle;
mod postgres;
mod sqlserver;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::type_mapper::ClrType;
use crate::error::CodegenError;

/// How a single-column primary key gets its values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdGenerator {
    Assigned,
    Identity,
    Native,
    GuidComb,
    Sequence(String),
}

impl IdGenerator {
    /// NHibernate generator class name
    pub fn class_name(&self) -> &'static str {
        match self {
            IdGenerator::Assigned => "assigned",
            IdGenerator::Identity => "identity",
            IdGenerator::Native => "native",
            IdGenerator::GuidComb => "guid.comb",
            IdGenerator::Sequence(_) => "sequence",
        }
    }
}

/// Dialect-specific behaviour
pub trait SqlDialect: Sync {
    /// Display name used in diagnostics
    fn name(&self) -> &'static str;

    /// Map a normalized (lowercase, single-spaced) raw type name
    fn map_type(
        &self,
        raw_type: &str,
        length: Option<u32>,
        precision: Option<u32>,
        scale: Option<u32>,
    ) -> Option<ClrType>;

    /// Identity generation for a single-column key of the given type
    fn id_generator(&self, key_type: ClrType, sequence_name: &str) -> IdGenerator;

    /// `sqlparser` dialect for reading this vendor's DDL
    fn parser_dialect(&self) -> Box<dyn sqlparser::dialect::Dialect>;
}

/// Supported database dialects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dialect {
    SqlServer,
    Oracle,
    MySql,
    PostgreSql,
}

impl Dialect {
    /// Look up the behaviour for this dialect
    pub fn behaviour(self) -> &'static dyn SqlDialect {
        match self {
            Dialect::SqlServer => &sqlserver::SqlServer,
            Dialect::Oracle => &oracle::Oracle,
            Dialect::MySql => &mysql::MySql,
            Dialect::PostgreSql => &postgres::PostgreSql,
        }
    }
}

impl FromStr for Dialect {
    type Err = CodegenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sqlserver" | "sql_server" | "mssql" => Ok(Dialect::SqlServer),
            "oracle" => Ok(Dialect::Oracle),
            "mysql" => Ok(Dialect::MySql),
            "postgresql" | "postgres" => Ok(Dialect::PostgreSql),
            other => Err(CodegenError::ConfigurationConflict(format!(
                "unknown database dialect `{}`",
                other
            ))),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.behaviour().name())
    }
}

/// Split a rendered DDL type such as `NUMBER(10, 2)` or
/// `TIMESTAMP(6) WITH TIME ZONE` into name and numeric arguments.
///
/// Non-numeric arguments (`MAX`, `50 BYTE`) keep their leading number if any.
pub fn split_type_arguments(rendered: &str) -> (String, Vec<Option<u32>>) {
    let Some(open) = rendered.find('(') else {
        return (normalize(rendered), Vec::new());
    };
    let close = rendered[open..]
        .find(')')
        .map(|i| open + i)
        .unwrap_or(rendered.len());
    let args = rendered[open + 1..close]
        .split(',')
        .map(|arg| {
            let digits: String = arg
                .trim()
                .chars()
                .take_while(|c| c.is_ascii_digit())
                .collect();
            digits.parse().ok()
        })
        .collect();
    let rest = rendered.get(close + 1..).unwrap_or("");
    let name = normalize(&format!("{} {}", &rendered[..open], rest));
    (name, args)
}

fn normalize(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
