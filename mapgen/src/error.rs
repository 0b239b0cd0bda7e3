//! Error types for mapgen

use thiserror::Error;

/// Result type alias for mapgen operations
pub type Result<T> = std::result::Result<T, CodegenError>;

/// Errors that can occur during code generation
#[derive(Error, Debug)]
pub enum CodegenError {
    #[error("Failed to parse SQL schema: {0}")]
    ParseError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Conflicting configuration: {0}")]
    ConfigurationConflict(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Unsupported {dialect} data type: {raw_type}")]
    UnsupportedType { dialect: String, raw_type: String },

    #[error("{}: {source}", context_label(.table, .column))]
    Context {
        table: String,
        column: Option<String>,
        #[source]
        source: Box<CodegenError>,
    },
}

fn context_label(table: &str, column: &Option<String>) -> String {
    match column {
        Some(column) => format!("table `{}`, column `{}`", table, column),
        None => format!("table `{}`", table),
    }
}

impl CodegenError {
    /// Attach table (and optionally column) context to an error.
    ///
    /// Context is attached once: an error that already carries a location is
    /// returned unchanged so the innermost (most precise) location wins.
    pub fn in_table(self, table: &str, column: Option<&str>) -> Self {
        match self {
            CodegenError::Context { .. } => self,
            other => CodegenError::Context {
                table: table.to_string(),
                column: column.map(str::to_string),
                source: Box::new(other),
            },
        }
    }

    /// The underlying error, with any table/column context removed
    pub fn root(&self) -> &CodegenError {
        match self {
            CodegenError::Context { source, .. } => source.root(),
            other => other,
        }
    }
}

impl From<sqlparser::parser::ParserError> for CodegenError {
    fn from(err: sqlparser::parser::ParserError) -> Self {
        CodegenError::ParseError(err.to_string())
    }
}

impl From<config::ConfigError> for CodegenError {
    fn from(err: config::ConfigError) -> Self {
        CodegenError::ConfigError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_message() {
        let err = CodegenError::UnsupportedType {
            dialect: "Oracle".into(),
            raw_type: "sdo_geometry".into(),
        }
        .in_table("shapes", Some("outline"));
        assert_eq!(
            err.to_string(),
            "table `shapes`, column `outline`: Unsupported Oracle data type: sdo_geometry"
        );
    }

    #[test]
    fn test_context_attached_once() {
        let err = CodegenError::ValidationError("bad".into())
            .in_table("a", Some("x"))
            .in_table("a", None);
        assert!(matches!(
            err,
            CodegenError::Context { column: Some(ref c), .. } if c == "x"
        ));
        assert!(matches!(err.root(), CodegenError::ValidationError(_)));
    }
}
