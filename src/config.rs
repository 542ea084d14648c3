use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{Result, SqlPrettyError};
use crate::layout::{CommaPosition, LetterCase};
use crate::mode::Mode;

/// Load sqlpretty configuration from a sqlpretty.toml or pyproject.toml
/// file. Searches parent directories of the input files if no config path
/// is given.
pub fn load_config(files: &[PathBuf], config_path: Option<&Path>) -> Result<Mode> {
    let mut mode = Mode::default();

    let config_file = match config_path {
        Some(path) => {
            if path.exists() {
                Some(path.to_path_buf())
            } else {
                return Err(SqlPrettyError::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
        }
        None => find_config_file(files),
    };

    if let Some(path) = config_file {
        let raw = load_config_from_path(&path)?;
        apply_config(&mut mode, &raw)?;
    }

    Ok(mode)
}

/// Search for a sqlpretty.toml or pyproject.toml in the parent directories
/// of the given files, most specific directory first.
fn find_config_file(files: &[PathBuf]) -> Option<PathBuf> {
    let mut seen = Vec::new();
    for file in files {
        let start = if file.is_dir() {
            file.as_path()
        } else {
            file.parent().unwrap_or(Path::new("."))
        };
        let mut current = Some(start);
        while let Some(dir) = current {
            if !seen.contains(&dir.to_path_buf()) {
                seen.push(dir.to_path_buf());
                for name in ["sqlpretty.toml", "pyproject.toml"] {
                    let candidate = dir.join(name);
                    if candidate.is_file() {
                        return Some(candidate);
                    }
                }
            }
            current = dir.parent();
        }
    }
    None
}

/// Load and parse a TOML config file.
fn load_config_from_path(path: &Path) -> Result<HashMap<String, toml::Value>> {
    let content = std::fs::read_to_string(path)?;
    let parsed: toml::Value = content.parse().map_err(|e| {
        SqlPrettyError::Config(format!("Failed to parse {}: {}", path.display(), e))
    })?;

    // pyproject.toml carries a [tool.sqlpretty] section; sqlpretty.toml
    // uses top-level keys.
    let section = parsed.get("tool").and_then(|t| t.get("sqlpretty")).or_else(|| {
        if path
            .file_name()
            .map(|n| n == "sqlpretty.toml")
            .unwrap_or(false)
        {
            Some(&parsed)
        } else {
            None
        }
    });

    match section {
        Some(toml::Value::Table(table)) => {
            let mut map = HashMap::new();
            for (k, v) in table {
                map.insert(k.to_lowercase(), v.clone());
            }
            Ok(map)
        }
        _ => Ok(HashMap::new()),
    }
}

/// Apply configuration values to a Mode.
fn apply_config(mode: &mut Mode, config: &HashMap<String, toml::Value>) -> Result<()> {
    if let Some(toml::Value::String(d)) = config.get("dialect") {
        mode.dialect_name = d.clone();
    }

    if let Some(toml::Value::Integer(n)) = config.get("indent_width") {
        mode.indent_width = *n as usize;
    }

    if let Some(toml::Value::String(s)) = config.get("keyword_case") {
        mode.keyword_case = parse_case(s)?;
    }

    if let Some(toml::Value::String(s)) = config.get("function_case") {
        mode.function_case = parse_case(s)?;
    }

    if let Some(toml::Value::String(s)) = config.get("comma_position") {
        mode.comma_position = match s.as_str() {
            "after" => CommaPosition::After,
            "before" => CommaPosition::Before,
            other => {
                return Err(SqlPrettyError::Config(format!(
                    "Invalid comma_position: {other:?} (expected \"after\" or \"before\")"
                )))
            }
        };
    }

    if let Some(toml::Value::Array(arr)) = config.get("exclude") {
        mode.exclude = arr
            .iter()
            .filter_map(|v| v.as_str().map(String::from))
            .collect();
    }

    if let Some(toml::Value::Boolean(b)) = config.get("fast") {
        mode.fast = *b;
    }

    // Validate no unknown keys
    let known_keys = [
        "dialect",
        "indent_width",
        "keyword_case",
        "function_case",
        "comma_position",
        "exclude",
        "fast",
    ];
    for key in config.keys() {
        if !known_keys.contains(&key.as_str()) {
            return Err(SqlPrettyError::Config(format!(
                "Unknown config option: {}",
                key
            )));
        }
    }

    Ok(())
}

fn parse_case(s: &str) -> Result<LetterCase> {
    match s {
        "preserve" => Ok(LetterCase::Preserve),
        "upper" => Ok(LetterCase::Upper),
        "lower" => Ok(LetterCase::Lower),
        other => Err(SqlPrettyError::Config(format!(
            "Invalid case: {other:?} (expected \"preserve\", \"upper\", or \"lower\")"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let mode = Mode::default();
        assert_eq!(mode.dialect_name, "standard");
        assert_eq!(mode.indent_width, 2);
    }

    #[test]
    fn test_apply_config() {
        let mut mode = Mode::default();
        let mut config = HashMap::new();
        config.insert("indent_width".to_string(), toml::Value::Integer(4));
        config.insert(
            "dialect".to_string(),
            toml::Value::String("postgresql".to_string()),
        );
        config.insert(
            "keyword_case".to_string(),
            toml::Value::String("lower".to_string()),
        );

        apply_config(&mut mode, &config).unwrap();
        assert_eq!(mode.indent_width, 4);
        assert_eq!(mode.dialect_name, "postgresql");
        assert_eq!(mode.keyword_case, LetterCase::Lower);
    }

    #[test]
    fn test_unknown_config_key_error() {
        let mut mode = Mode::default();
        let mut config = HashMap::new();
        config.insert("unknown_option".to_string(), toml::Value::Boolean(true));

        assert!(apply_config(&mut mode, &config).is_err());
    }

    #[test]
    fn test_invalid_case_value_error() {
        let mut mode = Mode::default();
        let mut config = HashMap::new();
        config.insert(
            "keyword_case".to_string(),
            toml::Value::String("shouting".to_string()),
        );

        assert!(apply_config(&mut mode, &config).is_err());
    }
}
