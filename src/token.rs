use compact_str::CompactString;

/// Position in source string (byte offset).
pub type Pos = usize;

/// All token kinds produced by the lexer. This is a closed set: the layout
/// engine matches on it exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A top-level clause keyword, possibly multi-word ("GROUP BY").
    Command,
    /// UNION / EXCEPT / INTERSECT and friends.
    SetOperation,
    /// A join keyword, possibly multi-word ("LEFT OUTER JOIN").
    Join,
    /// A branch marker inside a multi-branch construct (WHEN, ELSE).
    DependentClause,
    /// AND / OR / dialect extras such as XOR.
    LogicalOperator,
    /// A reserved single-word keyword.
    Keyword,
    /// A reserved function name directly followed by an open paren.
    FunctionName,
    Identifier,
    QuotedIdentifier,
    StringLiteral,
    /// A dialect variable such as `@name` or `@'quoted'`.
    Variable,
    /// A bind placeholder: `?`, `$1`, `:name`.
    Parameter,
    Operator,
    OpenParen,
    CloseParen,
    Number,
    LineComment,
    BlockComment,
    Whitespace,
    /// A character matching no rule. Never a hard failure.
    Unknown,
}

impl TokenKind {
    /// Kinds skipped when looking for the next significant token.
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::Whitespace | Self::LineComment | Self::BlockComment)
    }
}

/// An immutable token. `text` reproduces the exact source substring between
/// `spos` and `epos`; `key` is the canonical comparison form (uppercased,
/// interior whitespace runs collapsed to single spaces).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub key: CompactString,
    pub spos: Pos,
    pub epos: Pos,
}

impl Token {
    pub fn new(kind: TokenKind, text: &str, spos: Pos, epos: Pos) -> Self {
        Self {
            kind,
            text: text.to_string(),
            key: canonical_key(text),
            spos,
            epos,
        }
    }

    /// A token whose canonical key is supplied by the caller. Used for
    /// multi-word phrase tokens, whose raw text may contain interior
    /// whitespace or comments that do not belong in the key.
    pub fn keyed(kind: TokenKind, text: &str, key: CompactString, spos: Pos, epos: Pos) -> Self {
        Self {
            kind,
            text: text.to_string(),
            key,
            spos,
            epos,
        }
    }

    /// The same token with a different kind. Used by the post-processor,
    /// which never touches text or position.
    pub fn with_kind(&self, kind: TokenKind) -> Self {
        Self {
            kind,
            ..self.clone()
        }
    }
}

/// Uppercase and collapse interior whitespace: `"group\n   by"` -> `"GROUP BY"`.
pub fn canonical_key(text: &str) -> CompactString {
    let mut key = CompactString::default();
    for (i, word) in text.split_whitespace().enumerate() {
        if i > 0 {
            key.push(' ');
        }
        for c in word.chars() {
            key.extend(c.to_uppercase());
        }
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_key_collapses_whitespace() {
        assert_eq!(canonical_key("group\n    by"), "GROUP BY");
        assert_eq!(canonical_key("select"), "SELECT");
        assert_eq!(canonical_key("  x  "), "X");
    }

    #[test]
    fn test_token_preserves_raw_text() {
        let tok = Token::new(TokenKind::Command, "Group  By", 10, 19);
        assert_eq!(tok.text, "Group  By");
        assert_eq!(tok.key, "GROUP BY");
        assert_eq!(tok.spos, 10);
        assert_eq!(tok.epos, 19);
    }

    #[test]
    fn test_with_kind_changes_only_kind() {
        let tok = Token::new(TokenKind::Command, "SET", 0, 3);
        let re = tok.with_kind(TokenKind::FunctionName);
        assert_eq!(re.kind, TokenKind::FunctionName);
        assert_eq!(re.text, tok.text);
        assert_eq!(re.spos, tok.spos);
        assert_eq!(re.epos, tok.epos);
    }

    #[test]
    fn test_trivia_classification() {
        assert!(TokenKind::Whitespace.is_trivia());
        assert!(TokenKind::LineComment.is_trivia());
        assert!(TokenKind::BlockComment.is_trivia());
        assert!(!TokenKind::Identifier.is_trivia());
    }
}
