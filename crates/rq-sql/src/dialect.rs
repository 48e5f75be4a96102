//! SQL dialect abstraction
//!
//! A dialect quotes the identifiers of a rendered relation and re-parses the
//! rendered text so malformed SQL is caught before it leaves the builder.

use rq_core::Dialect;
use sqlparser::ast::Statement;
use sqlparser::dialect::{
    Dialect as ParserDialect, DuckDbDialect as SqlParserDuckDb,
    SnowflakeDialect as SqlParserSnowflake,
};
use sqlparser::parser::Parser;

use crate::error::{SqlError, SqlResult};

/// Trait for SQL dialect implementations
pub trait SqlDialect: Send + Sync {
    /// Get the underlying sqlparser dialect
    fn parser_dialect(&self) -> &dyn ParserDialect;

    /// Which configured dialect this is
    fn kind(&self) -> Dialect;

    /// Quote an identifier for this dialect
    fn quote_ident(&self, ident: &str) -> String {
        format!("\"{}\"", ident.replace('"', "\"\""))
    }

    /// Parse SQL into exactly one statement
    fn parse_single(&self, sql: &str) -> SqlResult<Statement> {
        let sql = sql.trim();
        if sql.is_empty() {
            return Err(SqlError::EmptySql);
        }
        let statements = Parser::parse_sql(self.parser_dialect(), sql).map_err(|e| {
            let message = e.to_string();
            let (line, column) = location_from_error(&message);
            SqlError::ParseError {
                message,
                line,
                column,
            }
        })?;
        statements.into_iter().next().ok_or(SqlError::EmptySql)
    }
}

/// Pull "Line: N, Column: M" out of a sqlparser error message.
///
/// `ParserError` carries no structured location, only the text.
fn location_from_error(message: &str) -> (usize, usize) {
    let number_after = |label: &str| -> Option<usize> {
        let start = message.find(label)? + label.len();
        let digits: String = message[start..]
            .chars()
            .take_while(char::is_ascii_digit)
            .collect();
        digits.parse().ok()
    };
    match (number_after("Line: "), number_after("Column: ")) {
        (Some(line), Some(column)) => (line, column),
        _ => (0, 0),
    }
}

/// DuckDB SQL dialect
#[derive(Debug, Default)]
pub struct DuckDbDialect {
    dialect: SqlParserDuckDb,
}

impl SqlDialect for DuckDbDialect {
    fn parser_dialect(&self) -> &dyn ParserDialect {
        &self.dialect
    }

    fn kind(&self) -> Dialect {
        Dialect::DuckDb
    }
}

/// Snowflake SQL dialect
#[derive(Debug, Default)]
pub struct SnowflakeDialect {
    dialect: SqlParserSnowflake,
}

impl SqlDialect for SnowflakeDialect {
    fn parser_dialect(&self) -> &dyn ParserDialect {
        &self.dialect
    }

    fn kind(&self) -> Dialect {
        Dialect::Snowflake
    }
}

/// Get the dialect implementation for a configured dialect
pub fn dialect_for(kind: Dialect) -> Box<dyn SqlDialect> {
    match kind {
        Dialect::DuckDb => Box::new(DuckDbDialect::default()),
        Dialect::Snowflake => Box::new(SnowflakeDialect::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_ident_escapes_quotes() {
        let dialect = DuckDbDialect::default();
        assert_eq!(dialect.quote_ident("name"), "\"name\"");
        assert_eq!(dialect.quote_ident("we\"ird"), "\"we\"\"ird\"");
    }

    #[test]
    fn test_parse_single_rejects_empty() {
        let dialect = DuckDbDialect::default();
        assert!(matches!(dialect.parse_single("   "), Err(SqlError::EmptySql)));
    }

    #[test]
    fn test_parse_single_reports_parse_error() {
        let dialect = DuckDbDialect::default();
        let err = dialect.parse_single("SELECT * FROM (").unwrap_err();
        assert!(matches!(err, SqlError::ParseError { .. }));
    }

    #[test]
    fn test_location_from_error() {
        assert_eq!(
            location_from_error("Expected: end of statement, found: x at Line: 3, Column: 14"),
            (3, 14)
        );
        assert_eq!(location_from_error("no location"), (0, 0));
    }

    #[test]
    fn test_dialect_for() {
        assert_eq!(dialect_for(Dialect::DuckDb).kind(), Dialect::DuckDb);
        assert_eq!(dialect_for(Dialect::Snowflake).kind(), Dialect::Snowflake);
    }
}
