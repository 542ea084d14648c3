use sqlpretty::{format_string, Mode};
use std::fs;

const SENTINEL: &str = ")))))__SQLPRETTY_OUTPUT__(((((";

/// Read a golden test data file and return a (source, expected) tuple.
///
/// - If the file contains the sentinel, lines above = source, lines below
///   = expected.
/// - If no sentinel, the file is preformatted: expected = source.
/// - Source is trimmed + "\n"; expected preserves exact whitespace.
fn read_test_data(path: &str) -> (String, String) {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read test file {}: {}", path, e));

    let lines: Vec<&str> = content.lines().collect();

    let mut source_lines: Vec<&str> = Vec::new();
    let mut formatted_lines: Vec<&str> = Vec::new();
    let mut found_sentinel = false;

    for line in &lines {
        if line.trim() == SENTINEL {
            found_sentinel = true;
            continue;
        }
        if found_sentinel {
            formatted_lines.push(line);
        } else {
            source_lines.push(line);
        }
    }

    if !found_sentinel {
        formatted_lines = source_lines.clone();
    }

    let source = {
        let joined = source_lines.join("\n");
        let trimmed = joined.trim();
        if trimmed.is_empty() {
            String::new()
        } else {
            format!("{}\n", trimmed)
        }
    };

    let expected = if formatted_lines.is_empty() {
        String::new()
    } else {
        let mut result = formatted_lines.join("\n");
        if content.ends_with('\n') {
            result.push('\n');
        }
        result
    };

    (source, expected)
}

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

fn run_golden_test(path: &str, mode: &Mode) {
    let (source, expected) = read_test_data(path);
    let actual = format_string(&source, mode).unwrap_or_else(|e| {
        panic!("format_string failed for {}: {}", path, e);
    });
    assert_eq!(
        expected, actual,
        "\n\nFormatting mismatch for {}\n\n--- expected ---\n{}\n--- actual ---\n{}\n",
        path, expected, actual
    );
    // Idempotency check
    let second = format_string(&actual, mode).unwrap_or_else(|e| {
        panic!("Idempotency format failed for {}: {}", path, e);
    });
    assert_eq!(
        expected, second,
        "\n\nIdempotency failed for {}\n\n--- expected ---\n{}\n--- second pass ---\n{}\n",
        path, expected, second
    );
}

fn run_golden_error_test(path: &str) {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read error test file {}: {}", path, e));
    let source = format!("{}\n", content.trim());
    let result = format_string(&source, &default_mode());
    assert!(
        result.is_err(),
        "Expected error for {} but got Ok:\n{}",
        path,
        result.unwrap()
    );
}

macro_rules! golden_tests {
    (mode: $mode_fn:ident, $($name:ident => $path:expr),* $(,)?) => {
        $(
            #[test]
            fn $name() {
                run_golden_test($path, &$mode_fn());
            }
        )*
    };
}

macro_rules! golden_error_tests {
    ($($name:ident => $path:expr),* $(,)?) => {
        $(
            #[test]
            fn $name() {
                run_golden_error_test($path);
            }
        )*
    };
}

// Preformatted golden tests: no sentinel, input must pass through unchanged.

golden_tests! {
    mode: default_mode,
    golden_preformatted_001_select_1 => "tests/data/preformatted/001_select_1.sql",
    golden_preformatted_002_select_from_where => "tests/data/preformatted/002_select_from_where.sql",
    golden_preformatted_003_literals => "tests/data/preformatted/003_literals.sql",
    golden_preformatted_004_header_comment => "tests/data/preformatted/004_header_comment.sql",
    golden_preformatted_005_case_expression => "tests/data/preformatted/005_case_expression.sql",
}

// Unformatted golden tests, standard dialect.

golden_tests! {
    mode: default_mode,
    golden_unformatted_100_select_case => "tests/data/unformatted/100_select_case.sql",
    golden_unformatted_101_joins => "tests/data/unformatted/101_joins.sql",
    golden_unformatted_102_unions => "tests/data/unformatted/102_unions.sql",
    golden_unformatted_103_subquery_group_by => "tests/data/unformatted/103_subquery_group_by.sql",
    golden_unformatted_104_insert_values => "tests/data/unformatted/104_insert_values.sql",
    golden_unformatted_105_semicolons => "tests/data/unformatted/105_semicolons.sql",
    golden_unformatted_106_comments => "tests/data/unformatted/106_comments.sql",
}

// Dialect-specific golden tests.

golden_tests! {
    mode: postgresql_mode,
    golden_unformatted_110_pg_operators => "tests/data/unformatted/110_pg_operators.sql",
    golden_unformatted_111_pg_params_dollar_strings => "tests/data/unformatted/111_pg_params_dollar_strings.sql",
}

golden_tests! {
    mode: mariadb_mode,
    golden_unformatted_120_mariadb_variables => "tests/data/unformatted/120_mariadb_variables.sql",
}

golden_tests! {
    mode: trino_mode,
    golden_unformatted_130_trino_unnest => "tests/data/unformatted/130_trino_unnest.sql",
}

// Error golden tests: these inputs must fail to tokenize.

golden_error_tests! {
    golden_error_900_unterminated_string => "tests/data/errors/900_unterminated_string.sql",
    golden_error_901_unterminated_block_comment => "tests/data/errors/901_unterminated_block_comment.sql",
    golden_error_902_unterminated_quoted_ident => "tests/data/errors/902_unterminated_quoted_ident.sql",
}
