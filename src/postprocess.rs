//! Token reclassification rules that need context beyond the lexer's
//! single forward scan.
//!
//! Rules are plain data attached to a dialect configuration. `reclassify`
//! applies them strictly in slice order, each rule seeing the output of the
//! previous one; a rule changes only token kinds, never text, positions, or
//! stream length.

use crate::token::{Token, TokenKind};

/// A named, pure reclassification rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReclassifyRule {
    /// `SET` directly before `(` denotes a composite data type, not the
    /// SET statement: reclassify the command token as a function name so
    /// it attaches to its paren (`SET(a, b)` vs `SET x = 1`).
    SetTypeBeforeParen,
}

/// Apply the dialect's rules to a token stream.
pub fn reclassify(tokens: Vec<Token>, rules: &[ReclassifyRule]) -> Vec<Token> {
    let mut tokens = tokens;
    for rule in rules {
        tokens = match rule {
            ReclassifyRule::SetTypeBeforeParen => set_type_before_paren(tokens),
        };
    }
    tokens
}

fn set_type_before_paren(tokens: Vec<Token>) -> Vec<Token> {
    let next_significant = |from: usize| {
        tokens[from..]
            .iter()
            .find(|t| !t.kind.is_trivia())
            .map(|t| (t.kind, t.key.as_str()))
    };

    let mut out = Vec::with_capacity(tokens.len());
    for (i, token) in tokens.iter().enumerate() {
        let reclassed = token.kind == TokenKind::Command
            && token.key == "SET"
            && matches!(next_significant(i + 1), Some((TokenKind::OpenParen, "(")));
        if reclassed {
            out.push(token.with_kind(TokenKind::FunctionName));
        } else {
            out.push(token.clone());
        }
    }
    out
}
