//! Dialect configuration and the compiled, immutable specification the
//! lexer consumes.
//!
//! A `DialectConfig` is plain data: phrase templates per category, reserved
//! word lists, and scalar lexical rules. `DialectSpec::build` compiles it
//! once (expanding templates, indexing phrases, sorting operators for
//! maximal munch, compiling variable patterns) and the result is shared
//! read-only across any number of concurrent format calls.

use std::collections::{HashMap, HashSet};

use compact_str::CompactString;
use regex::Regex;
use smallvec::SmallVec;

use crate::error::{Result, SqlPrettyError};
use crate::phrase;
use crate::postprocess::ReclassifyRule;
use crate::token::TokenKind;

/// Word sequence of one compiled phrase, first word included.
pub type PhraseWords = SmallVec<[CompactString; 4]>;

/// Multi-word phrase categories, in match priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhraseCategory {
    Command,
    SetOperation,
    Join,
    DependentClause,
    LogicalOperator,
}

impl PhraseCategory {
    /// Tie-break order for equal-length phrase matches.
    pub const PRIORITY: [PhraseCategory; 5] = [
        PhraseCategory::Command,
        PhraseCategory::SetOperation,
        PhraseCategory::Join,
        PhraseCategory::DependentClause,
        PhraseCategory::LogicalOperator,
    ];

    pub fn token_kind(self) -> TokenKind {
        match self {
            PhraseCategory::Command => TokenKind::Command,
            PhraseCategory::SetOperation => TokenKind::SetOperation,
            PhraseCategory::Join => TokenKind::Join,
            PhraseCategory::DependentClause => TokenKind::DependentClause,
            PhraseCategory::LogicalOperator => TokenKind::LogicalOperator,
        }
    }
}

/// One quoting style for strings or identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuoteStyle {
    pub open: &'static str,
    pub close: &'static str,
    /// Case-insensitive prefixes allowed immediately before the opening
    /// quote (`B`, `X`, `U&`, ...).
    pub prefixes: &'static [&'static str],
    /// When set, the bare quote does not match; one of the prefixes must
    /// be present (used for quoted variables such as `@'name'`).
    pub require_prefix: bool,
    /// Whether a backslash escapes the following character inside the
    /// quotes. Doubling the closing quote always escapes it.
    pub backslash_escapes: bool,
}

impl QuoteStyle {
    pub const fn plain(open: &'static str, close: &'static str) -> Self {
        Self {
            open,
            close,
            prefixes: &[],
            require_prefix: false,
            backslash_escapes: false,
        }
    }

    pub const fn prefixed(
        open: &'static str,
        close: &'static str,
        prefixes: &'static [&'static str],
    ) -> Self {
        Self {
            open,
            close,
            prefixes,
            require_prefix: false,
            backslash_escapes: false,
        }
    }
}

/// Characters allowed in bare identifiers beyond letters, digits, and `_`.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentChars {
    pub first_extra: &'static str,
    pub rest_extra: &'static str,
    pub allow_first_digit: bool,
}

/// One way a dialect spells variables.
#[derive(Debug, Clone)]
pub enum VariableForm {
    /// An anchored regular expression, e.g. `@[A-Za-z0-9_.$]+`.
    Pattern(&'static str),
    /// A quoted form requiring a prefix, e.g. `@'name'`.
    Quoted(QuoteStyle),
}

/// Bind-parameter syntaxes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParamTypes {
    /// Bare `?`.
    pub positional: bool,
    /// Prefixes followed by digits: `$1`.
    pub numbered: &'static [&'static str],
    /// Prefixes followed by a word: `:name`.
    pub named: &'static [&'static str],
}

/// Raw, declarative configuration of one dialect. Constructed by the files
/// under `src/dialects/` and compiled by [`DialectSpec::build`].
pub struct DialectConfig {
    pub name: &'static str,
    /// Phrase templates per category (see [`crate::phrase`]). Commands must
    /// compile to a non-empty set; the other categories may be empty.
    pub commands: &'static [&'static str],
    pub set_operations: &'static [&'static str],
    pub joins: &'static [&'static str],
    pub dependent_clauses: &'static [&'static str],
    pub logical_operators: &'static [&'static str],
    pub keywords: &'static [&'static str],
    pub functions: &'static [&'static str],
    pub string_types: Vec<QuoteStyle>,
    pub ident_types: Vec<QuoteStyle>,
    pub ident_chars: IdentChars,
    pub variable_types: Vec<VariableForm>,
    pub param_types: ParamTypes,
    /// Dialect-specific operator symbols, merged with [`BASE_OPERATORS`].
    pub operators: &'static [&'static str],
    /// Operators rendered without surrounding spaces.
    pub tight_operators: &'static [&'static str],
    pub open_parens: &'static [&'static str],
    pub close_parens: &'static [&'static str],
    pub line_comment_types: &'static [&'static str],
    pub block_comment: Option<(&'static str, &'static str)>,
    pub nested_block_comments: bool,
    /// PostgreSQL-style `$tag$ ... $tag$` string literals.
    pub dollar_strings: bool,
    /// Context-sensitive reclassification rules, applied in order.
    pub rules: &'static [ReclassifyRule],
}

/// Operators every dialect understands, before dialect extras.
pub const BASE_OPERATORS: &[&str] = &[
    "<>", "<=", ">=", "!=", "::", ",", ";", ".", ":", "=", "<", ">", "+", "-", "*", "/", "%",
];

impl DialectConfig {
    /// A config with the cross-dialect defaults: `(`/`CASE` paren pairs,
    /// `--` line comments, `/* */` block comments, `AND`/`OR`,
    /// `WHEN`/`ELSE`, single-quoted strings, double-quoted identifiers.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            commands: &[],
            set_operations: &[],
            joins: &[],
            dependent_clauses: &["WHEN", "ELSE"],
            logical_operators: &["AND", "OR"],
            keywords: &[],
            functions: &[],
            string_types: vec![QuoteStyle::plain("'", "'")],
            ident_types: vec![QuoteStyle::plain("\"", "\"")],
            ident_chars: IdentChars::default(),
            variable_types: Vec::new(),
            param_types: ParamTypes::default(),
            operators: &[],
            tight_operators: &[".", "::"],
            open_parens: &["(", "CASE"],
            close_parens: &[")", "END"],
            line_comment_types: &["--"],
            block_comment: Some(("/*", "*/")),
            nested_block_comments: false,
            dollar_strings: false,
            rules: &[],
        }
    }
}

/// Compiled phrase set for one category: phrases grouped by their first
/// word, longest first, so the lexer's maximal-munch lookup tries
/// `GROUP BY ALL` before `GROUP BY` before giving up.
#[derive(Debug, Default)]
pub struct PhraseSet {
    by_first: HashMap<CompactString, Vec<PhraseWords>>,
    len: usize,
}

impl PhraseSet {
    fn build(templates: &[&str]) -> Result<Self> {
        let mut by_first: HashMap<CompactString, Vec<PhraseWords>> = HashMap::new();
        let mut len = 0;
        for joined in phrase::expand_phrases(templates)? {
            let words: PhraseWords = joined.split(' ').map(CompactString::from).collect();
            by_first
                .entry(words[0].clone())
                .or_default()
                .push(words);
            len += 1;
        }
        for phrases in by_first.values_mut() {
            phrases.sort_by(|a, b| b.len().cmp(&a.len()));
        }
        Ok(Self { by_first, len })
    }

    /// All phrases starting with `first` (a canonical key), longest first.
    pub fn candidates(&self, first: &str) -> &[PhraseWords] {
        self.by_first.get(first).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn len(&self) -> usize {
        self.len
    }
}

/// A compiled variable matcher.
#[derive(Debug)]
pub enum CompiledVariable {
    Pattern(Regex),
    Quoted(QuoteStyle),
}

/// The immutable, compiled specification of one dialect. Built once,
/// never mutated, safe to share across threads.
#[derive(Debug)]
pub struct DialectSpec {
    pub name: &'static str,
    pub(crate) phrase_sets: [(PhraseCategory, PhraseSet); 5],
    pub(crate) keywords: HashSet<CompactString>,
    pub(crate) functions: HashSet<CompactString>,
    pub(crate) string_types: Vec<QuoteStyle>,
    pub(crate) ident_types: Vec<QuoteStyle>,
    pub(crate) ident_chars: IdentChars,
    pub(crate) variables: Vec<CompiledVariable>,
    pub(crate) param_types: ParamTypes,
    /// Base and dialect operators, longest first.
    pub(crate) operators: Vec<&'static str>,
    pub(crate) tight_operators: HashSet<&'static str>,
    /// Delimiters, longest first. Word-form pairs such as `CASE`/`END`
    /// are matched by the lexer's word rule instead.
    pub(crate) open_parens: Vec<&'static str>,
    pub(crate) close_parens: Vec<&'static str>,
    pub(crate) line_comment_types: Vec<&'static str>,
    pub(crate) block_comment: Option<(&'static str, &'static str)>,
    pub(crate) nested_block_comments: bool,
    pub(crate) dollar_strings: bool,
    pub(crate) rules: &'static [ReclassifyRule],
}

impl DialectSpec {
    pub fn build(config: DialectConfig) -> Result<Self> {
        let phrase_sets = [
            (PhraseCategory::Command, PhraseSet::build(config.commands)?),
            (
                PhraseCategory::SetOperation,
                PhraseSet::build(config.set_operations)?,
            ),
            (PhraseCategory::Join, PhraseSet::build(config.joins)?),
            (
                PhraseCategory::DependentClause,
                PhraseSet::build(config.dependent_clauses)?,
            ),
            (
                PhraseCategory::LogicalOperator,
                PhraseSet::build(config.logical_operators)?,
            ),
        ];

        if phrase_sets[0].1.is_empty() {
            return Err(SqlPrettyError::Config(format!(
                "dialect {:?} compiled to an empty command set",
                config.name
            )));
        }

        let mut seen = HashSet::new();
        for op in config.operators {
            if !seen.insert(*op) {
                return Err(SqlPrettyError::Config(format!(
                    "dialect {:?} configures duplicate operator {op:?}",
                    config.name
                )));
            }
        }

        let mut operators: Vec<&'static str> = BASE_OPERATORS
            .iter()
            .chain(config.operators.iter())
            .copied()
            .collect();
        operators.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
        operators.dedup();

        let mut variables = Vec::with_capacity(config.variable_types.len());
        for form in &config.variable_types {
            variables.push(match form {
                VariableForm::Pattern(pat) => {
                    let anchored = format!(r"\A(?:{pat})");
                    let compiled = Regex::new(&anchored).map_err(|e| {
                        SqlPrettyError::Config(format!(
                            "dialect {:?} has an invalid variable pattern {pat:?}: {e}",
                            config.name
                        ))
                    })?;
                    CompiledVariable::Pattern(compiled)
                }
                VariableForm::Quoted(style) => CompiledVariable::Quoted(QuoteStyle {
                    require_prefix: true,
                    ..*style
                }),
            });
        }

        let sorted_desc = |items: &[&'static str]| {
            let mut v: Vec<&'static str> = items.to_vec();
            v.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
            v
        };

        Ok(Self {
            name: config.name,
            phrase_sets,
            keywords: config.keywords.iter().map(|k| CompactString::from(*k)).collect(),
            functions: config
                .functions
                .iter()
                .map(|f| CompactString::from(*f))
                .collect(),
            string_types: config.string_types,
            ident_types: config.ident_types,
            ident_chars: config.ident_chars,
            variables,
            param_types: config.param_types,
            operators,
            tight_operators: config.tight_operators.iter().copied().collect(),
            open_parens: sorted_desc(config.open_parens),
            close_parens: sorted_desc(config.close_parens),
            line_comment_types: sorted_desc(config.line_comment_types),
            block_comment: config.block_comment,
            nested_block_comments: config.nested_block_comments,
            dollar_strings: config.dollar_strings,
            rules: config.rules,
        })
    }

    pub fn is_keyword(&self, key: &str) -> bool {
        self.keywords.contains(key)
    }

    pub fn is_function(&self, key: &str) -> bool {
        self.functions.contains(key)
    }

    pub(crate) fn is_word_char(&self, c: char, first: bool) -> bool {
        if c == '_' || c.is_alphabetic() || !c.is_ascii() {
            return true;
        }
        if c.is_ascii_digit() {
            return !first || self.ident_chars.allow_first_digit;
        }
        let extra = if first {
            self.ident_chars.first_extra
        } else {
            self.ident_chars.rest_extra
        };
        extra.contains(c)
    }

    /// Whether `key` is a word-form paren delimiter (e.g. `CASE`).
    pub(crate) fn word_paren_kind(&self, key: &str) -> Option<TokenKind> {
        let is_word = |d: &&&str| d.chars().all(|c| c.is_ascii_alphabetic());
        if self.open_parens.iter().filter(is_word).any(|d| d.eq_ignore_ascii_case(key)) {
            return Some(TokenKind::OpenParen);
        }
        if self.close_parens.iter().filter(is_word).any(|d| d.eq_ignore_ascii_case(key)) {
            return Some(TokenKind::CloseParen);
        }
        None
    }

    pub(crate) fn is_tight_operator(&self, symbol: &str) -> bool {
        self.tight_operators.contains(symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> DialectConfig {
        DialectConfig {
            commands: &["SELECT [ALL | DISTINCT]", "FROM", "GROUP BY"],
            set_operations: &["UNION [ALL]"],
            joins: &["{LEFT | RIGHT} [OUTER] JOIN"],
            keywords: &["AS", "ON"],
            functions: &["COUNT"],
            operators: &["<=>", "||"],
            ..DialectConfig::new("test")
        }
    }

    #[test]
    fn test_build_indexes_phrases_by_first_word() {
        let spec = DialectSpec::build(test_config()).unwrap();
        let commands = &spec.phrase_sets[0].1;
        let selects = commands.candidates("SELECT");
        assert_eq!(selects.len(), 3);
        // Longest first: SELECT ALL / SELECT DISTINCT before SELECT.
        assert_eq!(selects[0].len(), 2);
        assert_eq!(selects[2].len(), 1);
        assert!(commands.candidates("NOPE").is_empty());
    }

    #[test]
    fn test_operators_sorted_longest_first() {
        let spec = DialectSpec::build(test_config()).unwrap();
        let pos_3 = spec.operators.iter().position(|o| *o == "<=>").unwrap();
        let pos_2 = spec.operators.iter().position(|o| *o == "<=").unwrap();
        let pos_1 = spec.operators.iter().position(|o| *o == "<").unwrap();
        assert!(pos_3 < pos_2 && pos_2 < pos_1);
    }

    #[test]
    fn test_empty_command_set_rejected() {
        let config = DialectConfig {
            commands: &[],
            ..DialectConfig::new("empty")
        };
        assert!(DialectSpec::build(config).is_err());
    }

    #[test]
    fn test_duplicate_operator_rejected() {
        let config = DialectConfig {
            commands: &["SELECT"],
            operators: &["||", "||"],
            ..DialectConfig::new("dup")
        };
        assert!(DialectSpec::build(config).is_err());
    }

    #[test]
    fn test_malformed_template_rejected_at_build() {
        let config = DialectConfig {
            commands: &["SELECT [ALL"],
            ..DialectConfig::new("bad")
        };
        assert!(DialectSpec::build(config).is_err());
    }

    #[test]
    fn test_invalid_variable_pattern_rejected() {
        let config = DialectConfig {
            commands: &["SELECT"],
            variable_types: vec![VariableForm::Pattern("@[")],
            ..DialectConfig::new("badvar")
        };
        assert!(DialectSpec::build(config).is_err());
    }

    #[test]
    fn test_word_paren_detection() {
        let spec = DialectSpec::build(test_config()).unwrap();
        assert_eq!(spec.word_paren_kind("CASE"), Some(TokenKind::OpenParen));
        assert_eq!(spec.word_paren_kind("END"), Some(TokenKind::CloseParen));
        assert_eq!(spec.word_paren_kind("SELECT"), None);
    }

    #[test]
    fn test_word_chars_respect_dialect_extras() {
        let config = DialectConfig {
            commands: &["SELECT"],
            ident_chars: IdentChars {
                first_extra: "",
                rest_extra: "$",
                allow_first_digit: false,
            },
            ..DialectConfig::new("chars")
        };
        let spec = DialectSpec::build(config).unwrap();
        assert!(spec.is_word_char('a', true));
        assert!(spec.is_word_char('$', false));
        assert!(!spec.is_word_char('$', true));
        assert!(!spec.is_word_char('7', true));
        assert!(spec.is_word_char('7', false));
    }
}
