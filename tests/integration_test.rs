use sqlpretty::layout::{CommaPosition, LetterCase};
use sqlpretty::{format_string, tokenize_string, Mode};

fn default_mode() -> Mode {
    Mode::default()
}

fn postgresql_mode() -> Mode {
    Mode {
        dialect_name: "postgresql".to_string(),
        ..Mode::default()
    }
}

fn mariadb_mode() -> Mode {
    Mode {
        dialect_name: "mariadb".to_string(),
        ..Mode::default()
    }
}

fn trino_mode() -> Mode {
    Mode {
        dialect_name: "trino".to_string(),
        ..Mode::default()
    }
}

#[test]
fn test_format_select_one() {
    let result = format_string("select 1\n", &default_mode()).unwrap();
    assert_eq!(result, "SELECT\n  1\n");
}

#[test]
fn test_format_uppercases_keywords() {
    let result = format_string("select a, b from t where x = 1\n", &default_mode()).unwrap();
    assert!(result.contains("SELECT"));
    assert!(result.contains("FROM"));
    assert!(result.contains("WHERE"));
}

#[test]
fn test_format_preserves_quoted_names() {
    let result = format_string("SELECT \"My Column\" FROM \"MyTable\"\n", &default_mode()).unwrap();
    assert!(result.contains("\"My Column\""));
    assert!(result.contains("\"MyTable\""));
}

#[test]
fn test_comment_inside_multiword_clause_survives() {
    let source = "select a from t group -- note\nby a\n";
    let result = format_string(source, &default_mode()).unwrap();
    assert!(result.contains("-- note"), "comment dropped:\n{result}");
    assert!(result.contains("BY"));

    let preserve = Mode {
        keyword_case: LetterCase::Preserve,
        ..Mode::default()
    };
    let result = format_string(source, &preserve).unwrap();
    assert!(result.contains("-- note"), "comment dropped:\n{result}");
}

#[test]
fn test_format_preserves_string_literals() {
    let result = format_string("SELECT 'Hello  World' AS greeting\n", &default_mode()).unwrap();
    assert!(result.contains("'Hello  World'"));
}

#[test]
fn test_format_case_expression() {
    let result = format_string(
        "select case when x = 1 then 'a' when x = 2 then 'b' else 'c' end\n",
        &default_mode(),
    )
    .unwrap();
    assert_eq!(
        result,
        "SELECT\n  CASE\n    WHEN x = 1 THEN 'a'\n    WHEN x = 2 THEN 'b'\n    ELSE 'c'\n  END\n"
    );
}

#[test]
fn test_format_join() {
    let result = format_string(
        "select a.id, b.name from table_a a left join table_b b on a.id = b.a_id\n",
        &default_mode(),
    )
    .unwrap();
    assert!(result.contains("\nLEFT JOIN table_b b ON a.id = b.a_id"));
}

#[test]
fn test_format_multi_word_phrases_stay_whole() {
    let result = format_string("select a from t group by a order by a\n", &default_mode()).unwrap();
    assert!(result.contains("\nGROUP BY\n"));
    assert!(result.contains("\nORDER BY\n"));
}

#[test]
fn test_format_cte() {
    let result = format_string(
        "with cte as (select 1 as id) select * from cte\n",
        &default_mode(),
    )
    .unwrap();
    assert!(result.starts_with("WITH\n"));
    assert!(result.contains("AS"));
    assert!(result.contains("FROM\n  cte\n"));
}

#[test]
fn test_format_union() {
    let result = format_string("select 1 union all select 2\n", &default_mode()).unwrap();
    assert!(result.contains("\nUNION ALL\n"));
}

#[test]
fn test_format_multiple_statements() {
    let result = format_string("select 1;\nselect 2;\n", &default_mode()).unwrap();
    assert_eq!(result.matches(';').count(), 2);
    assert_eq!(result.matches("SELECT").count(), 2);
}

#[test]
fn test_format_comments_preserved() {
    let result = format_string("-- this is a comment\nselect 1\n", &default_mode()).unwrap();
    assert!(result.starts_with("-- this is a comment\n"));
}

#[test]
fn test_format_block_comment_preserved() {
    let result = format_string("select 1 /* keep me */\n", &default_mode()).unwrap();
    assert!(result.contains("/* keep me */"));
}

#[test]
fn test_format_idempotent() {
    let sources = [
        "select a, b from t where x = 1 and y = 2",
        "select case when a then 1 else 2 end from t",
        "select * from (select id from users) as u",
        "insert into t (a, b) values (1, 2)",
        "select a, -- names\n b from t",
    ];
    for source in sources {
        let once = format_string(source, &default_mode()).unwrap();
        let twice = format_string(&once, &default_mode()).unwrap();
        assert_eq!(once, twice, "not idempotent for {source:?}");
    }
}

#[test]
fn test_lowercase_keyword_mode() {
    let mode = Mode {
        keyword_case: LetterCase::Lower,
        ..Mode::default()
    };
    let result = format_string("SELECT A FROM T\n", &mode).unwrap();
    assert_eq!(result, "select\n  A\nfrom\n  T\n");
}

#[test]
fn test_leading_comma_mode() {
    let mode = Mode {
        comma_position: CommaPosition::Before,
        ..Mode::default()
    };
    let result = format_string("select a, b, c from t\n", &mode).unwrap();
    assert_eq!(result, "SELECT\n  a\n  , b\n  , c\nFROM\n  t\n");
}

#[test]
fn test_wide_indent_mode() {
    let mode = Mode {
        indent_width: 4,
        ..Mode::default()
    };
    let result = format_string("select a from t\n", &mode).unwrap();
    assert_eq!(result, "SELECT\n    a\nFROM\n    t\n");
}

#[test]
fn test_unknown_dialect_errors() {
    let mode = Mode {
        dialect_name: "oracle".to_string(),
        ..Mode::default()
    };
    assert!(format_string("select 1\n", &mode).is_err());
}

// ─── PostgreSQL ───

#[test]
fn test_pg_numbered_params() {
    let result =
        format_string("select * from t where id = $1 and kind = $2\n", &postgresql_mode()).unwrap();
    assert!(result.contains("id = $1"));
    assert!(result.contains("AND kind = $2"));
}

#[test]
fn test_pg_dollar_string_preserved() {
    let result = format_string("select $fn$body text$fn$\n", &postgresql_mode()).unwrap();
    assert!(result.contains("$fn$body text$fn$"));
}

#[test]
fn test_pg_cast_operator_tight() {
    let result = format_string("select total::numeric from t\n", &postgresql_mode()).unwrap();
    assert!(result.contains("total::numeric"));
}

#[test]
fn test_pg_json_operators_spaced() {
    let result = format_string("select data->>'k' from t\n", &postgresql_mode()).unwrap();
    assert!(result.contains("data ->> 'k'"));
}

// ─── MariaDB ───

#[test]
fn test_mariadb_hash_comment() {
    let result = format_string("select 1 # trailing note\n", &mariadb_mode()).unwrap();
    assert!(result.contains("# trailing note"));
}

#[test]
fn test_mariadb_variables() {
    let result = format_string("select @total, @'quoted var' from t\n", &mariadb_mode()).unwrap();
    assert!(result.contains("@total"));
    assert!(result.contains("@'quoted var'"));
}

#[test]
fn test_mariadb_null_safe_equals_is_one_token() {
    let rows = tokenize_string("a<=>b", &mariadb_mode()).unwrap();
    let texts: Vec<&str> = rows.iter().map(|(_, t, _, _)| t.as_str()).collect();
    assert_eq!(texts, vec!["a", "<=>", "b"]);
}

#[test]
fn test_mariadb_backtick_identifiers() {
    let result = format_string("select `select` from t\n", &mariadb_mode()).unwrap();
    assert!(result.contains("`select`"));
}

// ─── Trino ───

#[test]
fn test_trino_row_pattern_delimiters_are_single_tokens() {
    use sqlpretty::token::TokenKind;

    let rows = tokenize_string("pattern ({- a -} b+)", &trino_mode()).unwrap();
    let excluded: Vec<(TokenKind, &str)> = rows
        .iter()
        .filter(|(kind, ..)| *kind != TokenKind::Whitespace)
        .map(|(kind, text, ..)| (*kind, text.as_str()))
        .collect();
    assert!(excluded.contains(&(TokenKind::OpenParen, "{-")));
    assert!(excluded.contains(&(TokenKind::CloseParen, "-}")));
}

#[test]
fn test_trino_lambda_arrow_spaced() {
    let result = format_string("select transform(xs, x -> x + 1) from t\n", &trino_mode()).unwrap();
    assert!(result.contains("x -> x + 1"));
}

// ─── Token inspection ───

#[test]
fn test_tokenize_string_reconstructs_source() {
    let source = "select a,  b -- c\nfrom t";
    let rows = tokenize_string(source, &default_mode()).unwrap();
    let rebuilt: String = rows.iter().map(|(_, text, _, _)| text.as_str()).collect();
    assert_eq!(rebuilt, source);
}

#[test]
fn test_tokenize_string_offsets_cover_source() {
    let source = "select 'x' from t";
    let rows = tokenize_string(source, &default_mode()).unwrap();
    let mut pos = 0;
    for (_, text, offset, len) in &rows {
        assert_eq!(*offset, pos);
        assert_eq!(*len, text.len());
        pos += len;
    }
    assert_eq!(pos, source.len());
}
