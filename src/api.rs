use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::{Result, SqlPrettyError};
use crate::layout;
use crate::lexer;
use crate::mode::Mode;
use crate::postprocess;
use crate::report::{FileResult, FileStatus, Report};
use crate::token::{Token, TokenKind};

/// Format a SQL string according to the given mode: tokenize, apply the
/// dialect's reclassification rules, render, then (unless skipped) verify
/// the output is token-equivalent to the input.
pub fn format_string(source: &str, mode: &Mode) -> Result<String> {
    let spec = mode.dialect()?;

    let tokens = lexer::tokenize(source, spec)?;
    let tokens = postprocess::reclassify(tokens, spec.rules);
    let result = layout::render(&tokens, spec, &mode.layout());

    if mode.should_safety_check() {
        safety_check(&tokens, &result, mode)?;
    }

    Ok(result)
}

/// Tokenize a SQL string and return `(kind, text, offset, length)` rows,
/// for inspection and debugging.
pub fn tokenize_string(source: &str, mode: &Mode) -> Result<Vec<(TokenKind, String, usize, usize)>> {
    let spec = mode.dialect()?;
    let tokens = lexer::tokenize(source, spec)?;
    let tokens = postprocess::reclassify(tokens, spec.rules);
    Ok(tokens
        .into_iter()
        .map(|t| (t.kind, t.text, t.spos, t.epos - t.spos))
        .collect())
}

/// Run the formatter on a collection of files.
pub fn run(files: &[PathBuf], mode: &Mode) -> Report {
    let matching_paths = get_matching_paths(files, mode);
    let mut report = Report::new();

    if mode.single_process || matching_paths.len() <= 1 {
        for path in &matching_paths {
            report.add(format_file(path, mode));
        }
        return report;
    }

    use rayon::prelude::*;

    // threads == 0 lets rayon pick one per core.
    let pool = match rayon::ThreadPoolBuilder::new()
        .num_threads(mode.threads)
        .build()
    {
        Ok(pool) => pool,
        Err(_) => {
            for path in &matching_paths {
                report.add(format_file(path, mode));
            }
            return report;
        }
    };

    let results: Vec<FileResult> = pool.install(|| {
        matching_paths
            .par_iter()
            .map(|path| format_file(path, mode))
            .collect()
    });
    for result in results {
        report.add(result);
    }
    report
}

/// Format a single file. In check/diff mode the file is never rewritten.
fn format_file(path: &Path, mode: &Mode) -> FileResult {
    let source = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => return FileResult::failed(path, format!("Read error: {}", e)),
    };

    let formatted = match format_string(&source, mode) {
        Ok(f) => f,
        Err(e) => return FileResult::failed(path, e.to_string()),
    };

    if source == formatted {
        return FileResult::ok(path, FileStatus::Unchanged);
    }

    if mode.check || mode.diff {
        if mode.diff {
            print_diff(path, &source, &formatted);
        }
        return FileResult::ok(path, FileStatus::Changed);
    }

    match std::fs::write(path, &formatted) {
        Ok(()) => FileResult::ok(path, FileStatus::Changed),
        Err(e) => FileResult::failed(path, format!("Write error: {}", e)),
    }
}

/// Expand the given paths into the sorted set of SQL files to process.
/// Files are taken as given; directories are walked, skipping dotfiles
/// and anything matching an exclude glob.
pub fn get_matching_paths(paths: &[PathBuf], mode: &Mode) -> Vec<PathBuf> {
    let extensions = mode.sql_extensions();
    let excludes: Vec<glob::Pattern> = mode
        .exclude
        .iter()
        .filter_map(|p| glob::Pattern::new(p).ok())
        .collect();

    let mut found = HashSet::new();
    let mut pending: Vec<PathBuf> = Vec::new();

    for path in paths {
        if path.is_dir() {
            pending.push(path.clone());
        } else if is_sql_file(path, extensions) {
            found.insert(path.clone());
        }
    }

    while let Some(dir) = pending.pop() {
        let Ok(entries) = std::fs::read_dir(&dir) else {
            continue;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().to_string();
            if name.starts_with('.') || excludes.iter().any(|p| p.matches(&name)) {
                continue;
            }
            if path.is_dir() {
                pending.push(path);
            } else if is_sql_file(&path, extensions) {
                found.insert(path);
            }
        }
    }

    let mut sorted: Vec<PathBuf> = found.into_iter().collect();
    sorted.sort();
    sorted
}

fn is_sql_file(path: &Path, extensions: &[&str]) -> bool {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    extensions
        .iter()
        .any(|ext| name.ends_with(&format!(".{ext}")))
}

/// Re-tokenize the rendered output and verify it carries the same
/// significant tokens as the input: same kinds, same canonical keys.
/// Whitespace tokens are ignored on both sides since the renderer owns
/// all whitespace.
fn safety_check(original: &[Token], formatted: &str, mode: &Mode) -> Result<()> {
    let spec = mode.dialect()?;
    let rendered = lexer::tokenize(formatted, spec)?;
    let rendered = postprocess::reclassify(rendered, spec.rules);

    let originals: Vec<&Token> = original
        .iter()
        .filter(|t| t.kind != TokenKind::Whitespace)
        .collect();
    let rendereds: Vec<&Token> = rendered
        .iter()
        .filter(|t| t.kind != TokenKind::Whitespace)
        .collect();

    if originals.len() != rendereds.len() {
        return Err(SqlPrettyError::Equivalence(format!(
            "Token count mismatch: input has {} tokens, output has {}",
            originals.len(),
            rendereds.len()
        )));
    }

    for (i, (a, b)) in originals.iter().zip(rendereds.iter()).enumerate() {
        if a.kind != b.kind {
            return Err(SqlPrettyError::Equivalence(format!(
                "Token kind mismatch at position {}: input {:?} '{}', output {:?} '{}'",
                i, a.kind, a.text, b.kind, b.text
            )));
        }
        if a.key != b.key {
            return Err(SqlPrettyError::Equivalence(format!(
                "Token text mismatch at position {}: input '{}', output '{}'",
                i, a.text, b.text
            )));
        }
    }

    Ok(())
}

/// Print a unified diff between original and formatted content.
pub fn print_diff(path: &Path, original: &str, formatted: &str) {
    use similar::{ChangeTag, TextDiff};

    eprintln!("--- {}", path.display());
    eprintln!("+++ {}", path.display());

    let diff = TextDiff::from_lines(original, formatted);
    for change in diff.iter_all_changes() {
        let sign = match change.tag() {
            ChangeTag::Delete => "-",
            ChangeTag::Insert => "+",
            ChangeTag::Equal => " ",
        };
        eprint!("{}{}", sign, change);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_simple_select() {
        let mode = Mode::default();
        let result = format_string("select 1\n", &mode).unwrap();
        assert_eq!(result, "SELECT\n  1\n");
    }

    #[test]
    fn test_format_passes_safety_check() {
        let mode = Mode::default();
        let source = "SELECT a, b FROM t WHERE x = 1 AND y = 2\n";
        let result = format_string(source, &mode).unwrap();
        assert!(result.contains("FROM"));
        assert!(result.contains("AND y = 2"));
    }

    #[test]
    fn test_format_empty_string() {
        let mode = Mode::default();
        assert_eq!(format_string("", &mode).unwrap(), "");
        assert_eq!(format_string(" \n ", &mode).unwrap(), "");
    }

    #[test]
    fn test_format_is_idempotent() {
        let mode = Mode::default();
        let once = format_string("select a,b from t where x=1 and y=2", &mode).unwrap();
        let twice = format_string(&once, &mode).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_format_reports_lex_errors() {
        let mode = Mode::default();
        let err = format_string("SELECT 'oops", &mode).unwrap_err();
        assert!(matches!(err, SqlPrettyError::Lex { .. }));
    }

    #[test]
    fn test_tokenize_string_offsets() {
        let mode = Mode::default();
        let rows = tokenize_string("SELECT x", &mode).unwrap();
        assert_eq!(rows[0].0, TokenKind::Command);
        assert_eq!(rows[0].2, 0);
        assert_eq!(rows[0].3, 6);
        let (kind, text, offset, len) = rows.last().unwrap().clone();
        assert_eq!(kind, TokenKind::Identifier);
        assert_eq!(text, "x");
        assert_eq!(offset, 7);
        assert_eq!(len, 1);
    }

    #[test]
    fn test_is_sql_file() {
        let extensions = &["sql", "ddl", "dml"];
        assert!(is_sql_file(Path::new("test.sql"), extensions));
        assert!(is_sql_file(Path::new("schema.DDL"), extensions));
        assert!(!is_sql_file(Path::new("test.py"), extensions));
        assert!(!is_sql_file(Path::new("mysql"), extensions));
    }

    #[test]
    fn test_format_with_postgresql_dialect() {
        let mut mode = Mode::default();
        mode.dialect_name = "postgresql".to_string();
        let result = format_string("select $1::int\n", &mode).unwrap();
        assert_eq!(result, "SELECT\n  $1::int\n");
    }

    #[test]
    fn test_format_with_mariadb_set_datatype() {
        let mut mode = Mode::default();
        mode.dialect_name = "mariadb".to_string();
        let result =
            format_string("CREATE TABLE t (c SET('a', 'b'))", &mode).unwrap();
        // SET before a paren is the datatype, not the statement.
        assert!(result.contains("SET('a', 'b')"));
    }
}
