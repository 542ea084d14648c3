//! MariaDB dialect. Backtick identifiers, `@`-variables in four spellings,
//! `#` line comments, identifiers that may start with a digit, and the
//! `SET(...)` datatype disambiguated after tokenization.

use crate::dialect::{DialectConfig, IdentChars, ParamTypes, QuoteStyle, VariableForm};
use crate::postprocess::ReclassifyRule;

pub(super) fn config() -> DialectConfig {
    DialectConfig {
        commands: COMMANDS,
        set_operations: &[
            "UNION [ALL | DISTINCT]",
            "EXCEPT [ALL | DISTINCT]",
            "INTERSECT [ALL | DISTINCT]",
            "MINUS [ALL | DISTINCT]",
        ],
        joins: &[
            "JOIN",
            "{LEFT | RIGHT} [OUTER] JOIN",
            "{INNER | CROSS} JOIN",
            "NATURAL JOIN",
            "NATURAL {LEFT | RIGHT} [OUTER] JOIN",
            "STRAIGHT_JOIN",
        ],
        dependent_clauses: &["WHEN", "ELSE", "ELSEIF", "ELSIF"],
        logical_operators: &["AND", "OR", "XOR"],
        keywords: &[
            "ALL", "AS", "ASC", "BETWEEN", "BINARY", "BY", "COLLATE", "CROSS", "DEFAULT",
            "DESC", "DISTINCT", "DIV", "EXISTS", "FALSE", "FORCE", "FOR", "HIGH_PRIORITY",
            "IGNORE", "IN", "INNER", "INTERVAL", "IS", "LEFT", "LIKE", "LOW_PRIORITY", "MOD",
            "NOT", "NULL", "ON", "OUTER", "REGEXP", "RIGHT", "RLIKE", "SEPARATOR",
            "SQL_CALC_FOUND_ROWS", "STRAIGHT_JOIN", "THEN", "TO", "TRUE", "USE", "USING",
        ],
        functions: &[
            "ABS", "AVG", "CAST", "CEIL", "CHAR_LENGTH", "COALESCE", "CONCAT", "CONCAT_WS",
            "COUNT", "CURDATE", "CURTIME", "DATE_ADD", "DATE_FORMAT", "DATE_SUB",
            "FROM_UNIXTIME", "GREATEST", "GROUP_CONCAT", "IF", "IFNULL", "JSON_EXTRACT",
            "JSON_OBJECT", "LAST_INSERT_ID", "LEAST", "LOWER", "MAX", "MIN", "NOW", "NULLIF",
            "RAND", "REPLACE", "ROUND", "SUBSTRING", "SUM", "TIMESTAMPDIFF", "TRIM",
            "UNIX_TIMESTAMP", "UPPER", "UUID",
        ],
        string_types: vec![
            QuoteStyle {
                backslash_escapes: true,
                ..QuoteStyle::prefixed("'", "'", &["B", "X"])
            },
            QuoteStyle {
                backslash_escapes: true,
                ..QuoteStyle::prefixed("\"", "\"", &["B", "X"])
            },
        ],
        ident_types: vec![QuoteStyle::plain("`", "`")],
        ident_chars: IdentChars {
            first_extra: "$",
            rest_extra: "$",
            allow_first_digit: true,
        },
        variable_types: vec![
            VariableForm::Pattern("@[A-Za-z0-9_.$]+"),
            VariableForm::Quoted(prefix_quoted("\"", "\"")),
            VariableForm::Quoted(prefix_quoted("'", "'")),
            VariableForm::Quoted(prefix_quoted("`", "`")),
        ],
        param_types: ParamTypes {
            positional: true,
            ..ParamTypes::default()
        },
        operators: &[":=", "<<", ">>", "<=>", "&&", "||"],
        line_comment_types: &["--", "#"],
        rules: &[ReclassifyRule::SetTypeBeforeParen],
        ..DialectConfig::new("mariadb")
    }
}

fn prefix_quoted(open: &'static str, close: &'static str) -> QuoteStyle {
    QuoteStyle {
        open,
        close,
        prefixes: &["@"],
        require_prefix: true,
        backslash_escapes: false,
    }
}

static COMMANDS: &[&str] = &[
    // queries
    "WITH [RECURSIVE]",
    "SELECT",
    "FROM",
    "WHERE",
    "GROUP BY",
    "HAVING",
    "ORDER BY",
    "LIMIT",
    "OFFSET",
    // DML
    "INSERT [INTO]",
    "REPLACE",
    "VALUES",
    "UPDATE",
    "SET",
    "DELETE [FROM]",
    "RETURNING",
    "TRUNCATE [TABLE]",
    "LOAD DATA INFILE",
    "LOAD XML INFILE",
    // DDL
    "CREATE DATABASE",
    "CREATE EVENT",
    "CREATE FUNCTION",
    "CREATE [SPATIAL | UNIQUE] INDEX",
    "CREATE PROCEDURE",
    "CREATE ROLE",
    "CREATE SEQUENCE",
    "CREATE SERVER",
    "CREATE TABLE",
    "CREATE TRIGGER",
    "CREATE USER",
    "CREATE VIEW",
    "ALTER DATABASE",
    "ALTER EVENT",
    "ALTER FUNCTION",
    "ALTER PROCEDURE",
    "ALTER SCHEMA",
    "ALTER SEQUENCE",
    "ALTER SERVER",
    "ALTER TABLE",
    "ALTER COLUMN",
    "ALTER USER",
    "ALTER VIEW",
    "ADD",
    "DROP DATABASE",
    "DROP EVENT",
    "DROP FUNCTION",
    "DROP INDEX",
    "DROP PROCEDURE",
    "DROP ROLE",
    "DROP SEQUENCE",
    "DROP SERVER",
    "DROP TABLE",
    "DROP TRIGGER",
    "DROP USER",
    "DROP VIEW",
    "RENAME TABLE",
    "RENAME USER",
    // transactions
    "BEGIN",
    "COMMIT",
    "ROLLBACK",
    "SAVEPOINT",
    "RELEASE SAVEPOINT",
    "START TRANSACTION",
    "LOCK TABLE",
    "UNLOCK TABLE",
    // session and admin
    "SET CHARACTER SET",
    "SET DEFAULT ROLE",
    "SET GLOBAL TRANSACTION",
    "SET NAMES",
    "SET PASSWORD",
    "SET ROLE",
    "SET STATEMENT",
    "SET TRANSACTION",
    "ANALYZE [TABLE]",
    "CHECK {TABLE | VIEW}",
    "CHECKSUM TABLE",
    "DESCRIBE",
    "DO",
    "EXECUTE",
    "EXPLAIN",
    "FLUSH",
    "GRANT",
    "HELP",
    "KILL",
    "OPTIMIZE TABLE",
    "PREPARE",
    "DEALLOCATE PREPARE",
    "REPAIR {TABLE | VIEW}",
    "REVOKE",
    "SHOW",
    "SHOW BINARY LOGS",
    "SHOW CHARACTER SET",
    "SHOW COLLATION",
    "SHOW COLUMNS",
    "SHOW CREATE {DATABASE | EVENT | FUNCTION | PROCEDURE | SEQUENCE | TABLE | TRIGGER | USER | VIEW}",
    "SHOW DATABASES",
    "SHOW ENGINES",
    "SHOW ERRORS",
    "SHOW EVENTS",
    "SHOW GRANTS",
    "SHOW {INDEX | INDEXES | KEYS}",
    "SHOW OPEN TABLES",
    "SHOW PLUGINS",
    "SHOW PRIVILEGES",
    "SHOW PROCESSLIST",
    "SHOW SCHEMAS",
    "SHOW STATUS",
    "SHOW TABLE STATUS",
    "SHOW TABLES",
    "SHOW TRIGGERS",
    "SHOW VARIABLES",
    "SHOW WARNINGS",
    "SHUTDOWN",
    "USE",
];
