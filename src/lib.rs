pub mod api;
pub mod config;
pub mod dialect;
pub mod dialects;
pub mod error;
pub mod layout;
pub mod lexer;
pub mod mode;
pub mod phrase;
pub mod postprocess;
pub mod report;
pub mod token;

// Re-export the main public API
pub use api::{format_string, get_matching_paths, run, tokenize_string};
pub use config::load_config;
pub use error::SqlPrettyError;
pub use mode::Mode;
