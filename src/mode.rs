use serde::Deserialize;

use crate::dialect::DialectSpec;
use crate::dialects;
use crate::error::Result;
use crate::layout::{CommaPosition, LayoutOptions, LetterCase};

/// Mode holds all formatting configuration for sqlpretty.
#[derive(Debug, Clone, Deserialize)]
pub struct Mode {
    #[serde(default = "default_dialect")]
    pub dialect_name: String,

    #[serde(default = "default_indent_width")]
    pub indent_width: usize,

    #[serde(default = "default_keyword_case")]
    pub keyword_case: LetterCase,

    #[serde(default = "default_function_case")]
    pub function_case: LetterCase,

    #[serde(default = "default_comma_position")]
    pub comma_position: CommaPosition,

    #[serde(default)]
    pub check: bool,

    #[serde(default)]
    pub diff: bool,

    /// Skip the safety equivalence check for faster operation.
    #[serde(default)]
    pub fast: bool,

    /// Glob patterns to exclude.
    #[serde(default)]
    pub exclude: Vec<String>,

    #[serde(default)]
    pub verbose: bool,

    #[serde(default)]
    pub quiet: bool,

    /// Number of threads for parallel processing (0 = all cores).
    #[serde(default)]
    pub threads: usize,

    #[serde(default)]
    pub single_process: bool,
}

fn default_dialect() -> String {
    "standard".to_string()
}
fn default_indent_width() -> usize {
    2
}
fn default_keyword_case() -> LetterCase {
    LetterCase::Upper
}
fn default_function_case() -> LetterCase {
    LetterCase::Preserve
}
fn default_comma_position() -> CommaPosition {
    CommaPosition::After
}

impl Mode {
    /// Look up the compiled dialect for the configured dialect_name.
    pub fn dialect(&self) -> Result<&'static DialectSpec> {
        dialects::from_name(&self.dialect_name)
    }

    pub fn layout(&self) -> LayoutOptions {
        LayoutOptions {
            indent_width: self.indent_width,
            keyword_case: self.keyword_case,
            function_case: self.function_case,
            comma_position: self.comma_position,
        }
    }

    /// Whether the rendered output should be re-tokenized and compared
    /// against the input before being accepted.
    pub fn should_safety_check(&self) -> bool {
        !self.fast && !self.check && !self.diff
    }

    /// SQL file extensions to process.
    pub fn sql_extensions(&self) -> &[&str] {
        &["sql", "ddl", "dml"]
    }
}

impl Default for Mode {
    fn default() -> Self {
        Self {
            dialect_name: default_dialect(),
            indent_width: default_indent_width(),
            keyword_case: default_keyword_case(),
            function_case: default_function_case(),
            comma_position: default_comma_position(),
            check: false,
            diff: false,
            fast: false,
            exclude: Vec::new(),
            verbose: false,
            quiet: false,
            threads: 0,
            single_process: false,
        }
    }
}
