//! Built-in dialects. Each submodule declares one [`DialectConfig`]; the
//! compiled [`DialectSpec`] is built once per process and cached.

use std::sync::OnceLock;

use crate::dialect::{DialectConfig, DialectSpec};
use crate::error::{Result, SqlPrettyError};

mod mariadb;
mod postgresql;
mod standard;
mod trino;

/// Canonical names of the built-in dialects, for help text.
pub const DIALECT_NAMES: &[&str] = &["standard", "postgresql", "mariadb", "trino"];

/// Look up a built-in dialect by name or alias, compiling it on first use.
pub fn from_name(name: &str) -> Result<&'static DialectSpec> {
    match name.to_ascii_lowercase().as_str() {
        "standard" | "sql" => cached(&STANDARD, standard::config),
        "postgresql" | "postgres" | "pg" => cached(&POSTGRESQL, postgresql::config),
        "mariadb" | "mysql" => cached(&MARIADB, mariadb::config),
        "trino" | "presto" => cached(&TRINO, trino::config),
        other => Err(SqlPrettyError::Config(format!(
            "unknown dialect {other:?}, expected one of: {}",
            DIALECT_NAMES.join(", ")
        ))),
    }
}

static STANDARD: OnceLock<DialectSpec> = OnceLock::new();
static POSTGRESQL: OnceLock<DialectSpec> = OnceLock::new();
static MARIADB: OnceLock<DialectSpec> = OnceLock::new();
static TRINO: OnceLock<DialectSpec> = OnceLock::new();

fn cached(
    cell: &'static OnceLock<DialectSpec>,
    config: fn() -> DialectConfig,
) -> Result<&'static DialectSpec> {
    if let Some(spec) = cell.get() {
        return Ok(spec);
    }
    // Built-in configs are expected to compile; surface the error rather
    // than panic so a bad edit fails a run, not the process.
    let spec = DialectSpec::build(config())?;
    Ok(cell.get_or_init(|| spec))
}
