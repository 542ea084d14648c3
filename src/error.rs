use thiserror::Error;

/// User-facing errors.
#[derive(Error, Debug)]
pub enum SqlPrettyError {
    /// A dialect configuration could not be compiled into a usable
    /// specification. Fatal for the dialect, never raised per document.
    #[error("sqlpretty config error: {0}")]
    Config(String),

    /// An unterminated quoted construct in the input. The only
    /// input-dependent fatal condition; all other malformed input is
    /// tolerated with best-effort token classification.
    #[error("sqlpretty lex error at position {position}: {message}")]
    Lex { position: usize, message: String },

    /// Formatted output failed the token equivalence check against the input.
    #[error("sqlpretty equivalence error: {0}")]
    Equivalence(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, SqlPrettyError>;

impl SqlPrettyError {
    pub(crate) fn unterminated(what: &str, position: usize) -> Self {
        Self::Lex {
            position,
            message: format!("unterminated {what}"),
        }
    }
}
