//! PostgreSQL dialect. Notable departures from standard SQL: `$tag$`
//! strings, `$1` numbered parameters, a large operator vocabulary, and `$`
//! allowed in identifiers.

use crate::dialect::{DialectConfig, IdentChars, ParamTypes, QuoteStyle};

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
            "ALL", "ANY", "ARRAY", "AS", "ASC", "ASYMMETRIC", "BETWEEN", "BOTH", "BY",
            "COLLATE", "CONCURRENTLY", "CROSS", "CURRENT_DATE", "CURRENT_TIMESTAMP", "DEFAULT",
            "DESC", "DISTINCT", "EXISTS", "FALSE", "FILTER", "FOLLOWING", "FOR", "FREEZE",
            "FULL", "ILIKE", "IN", "INTERVAL", "IS", "ISNULL", "LATERAL", "LEADING", "LIKE",
            "NOT", "NOTNULL", "NOWAIT", "NULL", "NULLS", "ON", "ONLY", "OVER", "OVERLAPS",
            "PRECEDING", "RANGE", "ROW", "ROWS", "SIMILAR", "SOME", "SYMMETRIC", "TABLESAMPLE",
            "THEN", "TO", "TRAILING", "TRUE", "UNBOUNDED", "UNKNOWN", "USING", "VARIADIC",
            "VERBOSE", "WITHIN",
        ],
        functions: &[
            "ABS", "AGE", "ARRAY_AGG", "AVG", "BOOL_AND", "BOOL_OR", "CAST", "CEIL",
            "CHAR_LENGTH", "COALESCE", "COUNT", "CUME_DIST", "CURRENT_SETTING", "DATE_PART",
            "DATE_TRUNC", "DENSE_RANK", "EXTRACT", "FLOOR", "GENERATE_SERIES", "GREATEST",
            "JSONB_AGG", "JSONB_BUILD_OBJECT", "LAG", "LEAD", "LEAST", "LOWER", "MAX", "MIN",
            "NOW", "NULLIF", "PERCENTILE_CONT", "POSITION", "RANK", "REGEXP_REPLACE",
            "ROW_NUMBER", "STRING_AGG", "SUBSTRING", "SUM", "TO_CHAR", "TO_DATE",
            "TO_TIMESTAMP", "TRIM", "UNNEST", "UPPER",
        ],
        string_types: vec![QuoteStyle::prefixed("'", "'", &["B", "E", "X", "U&"])],
        ident_types: vec![QuoteStyle::prefixed("\"", "\"", &["U&"])],
        ident_chars: IdentChars {
            rest_extra: "$",
            ..IdentChars::default()
        },
        param_types: ParamTypes {
            numbered: &["$"],
            ..ParamTypes::default()
        },
        operators: OPERATORS,
        open_parens: &["(", "[", "CASE"],
        close_parens: &[")", "]", "END"],
        dollar_strings: true,
        ..DialectConfig::new("postgresql")
    }
}

static COMMANDS: &[&str] = &[
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
    "UPDATE [ONLY]",
    "SET",
    "WHERE CURRENT OF",
    "DELETE FROM [ONLY]",
    "TRUNCATE [TABLE] [ONLY]",
    "RETURNING",
    // DDL
    "CREATE [OR REPLACE] [TEMP | TEMPORARY] [RECURSIVE] VIEW",
    "CREATE MATERIALIZED VIEW [IF NOT EXISTS]",
    "CREATE [GLOBAL | LOCAL] [TEMPORARY | TEMP | UNLOGGED] TABLE [IF NOT EXISTS]",
    "DROP TABLE [IF EXISTS]",
    "ALTER TABLE [IF EXISTS] [ONLY]",
    "ALTER TABLE ALL IN TABLESPACE",
    "RENAME [COLUMN]",
    "RENAME TO",
    "ADD [COLUMN] [IF NOT EXISTS]",
    "DROP [COLUMN] [IF EXISTS]",
    "ALTER [COLUMN]",
    "[SET DATA] TYPE",
    "{SET | DROP} DEFAULT",
    "{SET | DROP} NOT NULL",
    // transactions and sessions
    "ABORT",
    "BEGIN",
    "COMMIT",
    "COMMIT PREPARED",
    "ROLLBACK",
    "ROLLBACK PREPARED",
    "ROLLBACK TO SAVEPOINT",
    "SAVEPOINT",
    "RELEASE SAVEPOINT",
    "PREPARE TRANSACTION",
    "START TRANSACTION",
    "SET CONSTRAINTS",
    "SET ROLE",
    "SET SESSION AUTHORIZATION",
    "SET TRANSACTION",
    "SET SCHEMA",
    // other statements
    "ANALYZE",
    "CALL",
    "CHECKPOINT",
    "CLOSE",
    "CLUSTER",
    "COMMENT",
    "COPY",
    "CREATE DATABASE",
    "CREATE EXTENSION",
    "CREATE FUNCTION",
    "CREATE INDEX",
    "CREATE POLICY",
    "CREATE ROLE",
    "CREATE RULE",
    "CREATE SCHEMA",
    "CREATE SEQUENCE",
    "CREATE TRIGGER",
    "CREATE TYPE",
    "CREATE USER",
    "DEALLOCATE",
    "DECLARE",
    "DISCARD",
    "DO",
    "DROP DATABASE",
    "DROP EXTENSION",
    "DROP FUNCTION",
    "DROP INDEX",
    "DROP MATERIALIZED VIEW",
    "DROP POLICY",
    "DROP ROLE",
    "DROP RULE",
    "DROP SCHEMA",
    "DROP SEQUENCE",
    "DROP TRIGGER",
    "DROP TYPE",
    "DROP USER",
    "DROP VIEW",
    "EXECUTE",
    "EXPLAIN",
    "FETCH",
    "GRANT",
    "LISTEN",
    "LOAD",
    "LOCK",
    "MOVE",
    "NOTIFY",
    "PREPARE",
    "REFRESH MATERIALIZED VIEW",
    "REINDEX",
    "RESET",
    "REVOKE",
    "SELECT INTO",
    "SHOW",
    "UNLISTEN",
    "VACUUM",
    "AFTER",
];

static OPERATORS: &[&str] = &[
    // math
    "<<", ">>", "|/", "||/", "!!",
    // string concatenation
    "||",
    // pattern matching
    "~~", "~~*", "!~~", "!~~*",
    // POSIX regexps
    "~", "~*", "!~", "!~*",
    // trigram similarity
    "<%", "<<%", "%>", "%>>",
    // byte comparison
    "~>~", "~<~", "~>=~", "~<=~",
    // geometric
    "@-@", "@@", "#", "##", "<->", "&&", "&<", "&>", "<<|", "&<|", "|>>", "|&>", "<^", "^>",
    "?#", "?-", "?|", "?-|", "?||", "@>", "<@", "~=",
    // network addresses
    ">>=", "<<=",
    // text search
    "@@@",
    // json
    "?", "@?", "?&", "->", "->>", "#>", "#>>", "#-",
    // other
    ":=", "=>", "-|-",
];
