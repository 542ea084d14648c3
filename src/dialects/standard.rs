//! Standard SQL (SQL-2011-flavoured) dialect.

use crate::dialect::{DialectConfig, ParamTypes, QuoteStyle};

pub(super) fn config() -> DialectConfig {
    DialectConfig {
        commands: &[
            // queries
            "WITH [RECURSIVE]",
            "SELECT [ALL | DISTINCT]",
            "FROM",
            "WHERE",
            "GROUP BY [ALL | DISTINCT]",
            "HAVING",
            "WINDOW",
            "PARTITION BY",
            "ORDER BY",
            "LIMIT",
            "OFFSET",
            "FETCH {FIRST | NEXT}",
            // DML
            "INSERT INTO",
            "VALUES",
            "UPDATE",
            "SET",
            "DELETE FROM",
            "TRUNCATE TABLE",
            // DDL
            "CREATE [RECURSIVE] VIEW",
            "CREATE [GLOBAL TEMPORARY | LOCAL TEMPORARY] TABLE",
            "DROP TABLE",
            "DROP VIEW",
            "ALTER TABLE",
            "ADD COLUMN",
            "ALTER COLUMN",
            "DROP COLUMN",
            "RENAME COLUMN",
            "RENAME TO",
            "SET SCHEMA",
        ],
        set_operations: &[
            "UNION [ALL | DISTINCT]",
            "EXCEPT [ALL | DISTINCT]",
            "INTERSECT [ALL | DISTINCT]",
        ],
        joins: &[
            "JOIN",
            "{LEFT | RIGHT | FULL} [OUTER] JOIN",
            "{INNER | CROSS} JOIN",
            "NATURAL [INNER] JOIN",
            "NATURAL {LEFT | RIGHT | FULL} [OUTER] JOIN",
        ],
        keywords: &[
            "ALL", "ANY", "AS", "ASC", "BETWEEN", "BY", "CROSS", "CURRENT", "DEFAULT",
            "DESC", "DISTINCT", "ESCAPE", "EXISTS", "FALSE", "FOLLOWING", "FOR", "FULL", "IN",
            "INTERVAL", "IS", "LIKE", "NOT", "NULL", "NULLS", "ON", "ONLY", "OVER", "PRECEDING",
            "RANGE", "ROW", "ROWS", "SIMILAR", "SOME", "THEN", "TO", "TRUE", "UNBOUNDED",
            "UNKNOWN", "USING",
        ],
        functions: &[
            "ABS", "AVG", "CAST", "CEIL", "CHAR_LENGTH", "COALESCE", "COUNT", "CUME_DIST",
            "DENSE_RANK", "EXTRACT", "FLOOR", "LAG", "LEAD", "LOWER", "MAX", "MIN", "MOD",
            "NULLIF", "POSITION", "POWER", "RANK", "ROW_NUMBER", "SQRT", "SUBSTRING", "SUM",
            "TRIM", "UPPER",
        ],
        string_types: vec![QuoteStyle::prefixed("'", "'", &["N", "U&", "X"])],
        ident_types: vec![QuoteStyle::prefixed("\"", "\"", &["U&"])],
        param_types: ParamTypes {
            positional: true,
            ..ParamTypes::default()
        },
        ..DialectConfig::new("standard")
    }
}
