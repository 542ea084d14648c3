//! Trino dialect. Adds row-pattern delimiters `{- ... -}` and `{ ... }`
//! from MATCH_RECOGNIZE alongside the usual paren pairs.

use crate::dialect::{DialectConfig, ParamTypes, QuoteStyle};

pub(super) fn config() -> DialectConfig {
    DialectConfig {
        commands: COMMANDS,
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
            "ALL", "AS", "ASC", "BETWEEN", "BY", "CROSS", "CUBE", "CURRENT", "DEFAULT", "DESC",
            "DISTINCT", "EXISTS", "FALSE", "FOLLOWING", "FOR", "FULL", "GROUPING", "IN",
            "INTERVAL", "IS", "LATERAL", "LIKE", "NOT", "NULL", "NULLS", "ON", "ORDINALITY",
            "OVER", "PRECEDING", "RANGE", "ROLLUP", "ROW", "ROWS", "SOME", "TABLESAMPLE",
            "THEN", "TO", "TRUE", "UNBOUNDED", "USING",
        ],
        functions: &[
            "ABS", "APPROX_DISTINCT", "ARBITRARY", "ARRAY_AGG", "ARRAY_JOIN", "AVG",
            "CARDINALITY", "CAST", "CEIL", "COALESCE", "CONCAT", "COUNT", "CUME_DIST",
            "DATE_ADD", "DATE_DIFF", "DATE_TRUNC", "DENSE_RANK", "ELEMENT_AT", "EXTRACT",
            "FILTER", "FLOOR", "FORMAT_DATETIME", "GREATEST", "JSON_EXTRACT", "LAG", "LEAD",
            "LEAST", "LOWER", "MAP_KEYS", "MAP_VALUES", "MAX", "MAX_BY", "MIN", "MIN_BY",
            "NOW", "NULLIF", "POSITION", "RANK", "REDUCE", "REGEXP_LIKE", "ROW_NUMBER",
            "SPLIT", "SUBSTRING", "SUM", "TRANSFORM", "TRIM", "TRY", "TRY_CAST", "UNNEST",
            "UPPER",
        ],
        string_types: vec![QuoteStyle::prefixed("'", "'", &["X", "U&"])],
        ident_types: vec![QuoteStyle::plain("\"", "\"")],
        param_types: ParamTypes {
            positional: true,
            ..ParamTypes::default()
        },
        operators: &["||", "->"],
        open_parens: &["(", "[", "{", "{-", "CASE"],
        close_parens: &[")", "]", "}", "-}", "END"],
        ..DialectConfig::new("trino")
    }
}

static COMMANDS: &[&str] = &[
    // queries
    "WITH [RECURSIVE]",
    "SELECT [ALL | DISTINCT]",
    "FROM",
    "WHERE",
    "GROUP BY",
    "HAVING",
    "WINDOW",
    "PARTITION BY",
    "ORDER BY",
    "LIMIT",
    "OFFSET",
    "FETCH",
    // DML
    "INSERT INTO",
    "MERGE INTO",
    "VALUES",
    "UPDATE",
    "SET",
    "DELETE FROM",
    "TRUNCATE TABLE",
    // DDL
    "CREATE SCHEMA",
    "CREATE TABLE",
    "CREATE [OR REPLACE] [MATERIALIZED] VIEW",
    "CREATE ROLE",
    "ALTER SCHEMA",
    "ALTER TABLE",
    "ALTER [MATERIALIZED] VIEW",
    "RENAME TO",
    "ADD COLUMN",
    "RENAME COLUMN",
    "DROP COLUMN",
    "DROP SCHEMA",
    "DROP TABLE",
    "DROP [MATERIALIZED] VIEW",
    "DROP ROLE",
    "SET AUTHORIZATION",
    "SET PROPERTIES",
    // auxiliary
    "EXECUTE",
    "EXPLAIN [ANALYZE] [VERBOSE]",
    "ANALYZE",
    "USE",
    "COMMENT ON {TABLE | COLUMN}",
    "DESCRIBE {INPUT | OUTPUT}",
    "REFRESH MATERIALIZED VIEW",
    "RESET SESSION",
    "SET SESSION",
    "SET PATH",
    "SET TIME ZONE",
    "SHOW GRANTS",
    "SHOW CREATE {TABLE | SCHEMA | VIEW}",
    "SHOW CREATE MATERIALIZED VIEW",
    "SHOW TABLES",
    "SHOW SCHEMAS",
    "SHOW CATALOGS",
    "SHOW COLUMNS",
    "SHOW STATS FOR",
    "SHOW [CURRENT] ROLES",
    "SHOW ROLE GRANTS",
    "SHOW FUNCTIONS",
    "SHOW SESSION",
    // MATCH_RECOGNIZE
    "MATCH_RECOGNIZE",
    "MEASURES",
    "{ONE ROW | ALL ROWS} PER MATCH",
    "AFTER MATCH",
    "PATTERN",
    "SUBSET",
    "DEFINE",
];
