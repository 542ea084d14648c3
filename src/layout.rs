//! The layout engine: renders a token stream into canonically indented
//! text. Deterministic and idempotent — output depends only on token kinds
//! and canonical keys (plus raw text for preserved tokens), never on the
//! input's whitespace, except that comments keep their own-line/attached
//! placement.

use clap::ValueEnum;
use serde::Deserialize;

use crate::dialect::DialectSpec;
use crate::token::{Token, TokenKind};

/// Letter-casing policy for reserved words and function names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LetterCase {
    Preserve,
    Upper,
    Lower,
}

/// Where the comma goes when a clause-level list breaks across lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CommaPosition {
    After,
    Before,
}

/// Layout configuration, consumed only by this module.
#[derive(Debug, Clone, Copy)]
pub struct LayoutOptions {
    pub indent_width: usize,
    pub keyword_case: LetterCase,
    pub function_case: LetterCase,
    pub comma_position: CommaPosition,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            indent_width: 2,
            keyword_case: LetterCase::Upper,
            function_case: LetterCase::Preserve,
            comma_position: CommaPosition::After,
        }
    }
}

/// Render a token stream. Never fails: unbalanced parens degrade to a
/// running indent counter that never goes negative.
pub fn render(tokens: &[Token], spec: &DialectSpec, opts: &LayoutOptions) -> String {
    let mut renderer = Renderer {
        spec,
        opts,
        lines: Vec::new(),
        cur: String::new(),
        cur_indent: 0,
        base: 0,
        content: 0,
        pending: None,
        clause: None,
        stack: Vec::new(),
        no_space: true,
        prev_kind: None,
    };
    renderer.run(tokens);
    renderer.finish()
}

/// Saved indent state of one open paren, restored at its lexical match.
struct Frame {
    open_line: usize,
    open_indent: usize,
    base: usize,
    content: usize,
    clause: Option<usize>,
    wordlike: bool,
}

struct Renderer<'a> {
    spec: &'a DialectSpec,
    opts: &'a LayoutOptions,
    lines: Vec<String>,
    /// Current line content, without indentation.
    cur: String,
    cur_indent: usize,
    /// Indent level for clause keywords (command/join/set-operation).
    base: usize,
    /// Indent level for continuation lines inside the current clause.
    content: usize,
    /// Forced line break before the next token, at the given indent.
    pending: Option<usize>,
    /// Paren depth of the current clause keyword; commas at this depth
    /// break the list.
    clause: Option<usize>,
    stack: Vec<Frame>,
    /// Suppress the space before the next token (line start, after an
    /// open paren, after a tight operator).
    no_space: bool,
    prev_kind: Option<TokenKind>,
}

impl Renderer<'_> {
    fn run(&mut self, tokens: &[Token]) {
        let significant: Vec<(usize, &Token)> = tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| t.kind != TokenKind::Whitespace)
            .collect();

        for (i, token) in significant {
            match token.kind {
                TokenKind::Command => {
                    self.pending = None;
                    self.newline(self.base);
                    let text = self.cased(token, self.opts.keyword_case);
                    self.push_tok(&text, true);
                    self.content = self.base + 1;
                    self.clause = Some(self.stack.len());
                    self.pending = Some(self.content);
                }
                TokenKind::SetOperation => {
                    self.pending = None;
                    self.newline(self.base);
                    let text = self.cased(token, self.opts.keyword_case);
                    self.push_tok(&text, true);
                    self.content = self.base + 1;
                    self.clause = None;
                }
                TokenKind::Join => {
                    self.pending = None;
                    self.newline(self.base);
                    let text = self.cased(token, self.opts.keyword_case);
                    self.push_tok(&text, true);
                    self.content = self.base + 1;
                }
                TokenKind::DependentClause => {
                    self.pending = None;
                    self.newline(self.base);
                    let text = self.cased(token, self.opts.keyword_case);
                    self.push_tok(&text, true);
                    self.content = self.base + 1;
                }
                TokenKind::LogicalOperator => {
                    self.pending = None;
                    self.newline(self.content);
                    let text = self.cased(token, self.opts.keyword_case);
                    self.push_tok(&text, true);
                }
                TokenKind::Keyword => {
                    let text = self.cased(token, self.opts.keyword_case);
                    self.push_tok(&text, true);
                }
                TokenKind::FunctionName => {
                    let text = self.cased(token, self.opts.function_case);
                    self.push_tok(&text, true);
                }
                TokenKind::OpenParen => self.open_paren(token),
                TokenKind::CloseParen => self.close_paren(token),
                TokenKind::Operator => self.operator(token),
                TokenKind::LineComment | TokenKind::BlockComment => {
                    self.comment(token, own_line(tokens, i));
                }
                TokenKind::Identifier
                | TokenKind::QuotedIdentifier
                | TokenKind::StringLiteral
                | TokenKind::Variable
                | TokenKind::Parameter
                | TokenKind::Number
                | TokenKind::Unknown => {
                    self.push_tok(&token.text, true);
                }
                TokenKind::Whitespace => unreachable!("filtered above"),
            }
            self.prev_kind = Some(token.kind);
        }
    }

    fn open_paren(&mut self, token: &Token) {
        let wordlike = token.key.chars().all(|c| c.is_ascii_alphabetic());
        if wordlike {
            let text = self.cased(token, self.opts.keyword_case);
            self.push_tok(&text, true);
        } else {
            let attach = self.prev_kind == Some(TokenKind::FunctionName);
            self.push_tok(&token.text, !attach);
        }
        self.stack.push(Frame {
            open_line: self.lines.len(),
            open_indent: self.cur_indent,
            base: self.base,
            content: self.content,
            clause: self.clause,
            wordlike,
        });
        self.base = self.cur_indent + 1;
        self.content = self.base;
        self.clause = None;
        if !wordlike {
            self.no_space = true;
        }
    }

    fn close_paren(&mut self, token: &Token) {
        let Some(frame) = self.stack.pop() else {
            // Unbalanced close: render in place, indent never goes negative.
            self.push_tok(&token.text, false);
            return;
        };
        let inline = frame.open_line == self.lines.len();
        if !inline {
            self.pending = None;
            self.newline(frame.open_indent);
        }
        if frame.wordlike {
            let text = self.cased(token, self.opts.keyword_case);
            self.push_tok(&text, true);
        } else {
            self.push_tok(&token.text, false);
        }
        self.base = frame.base;
        self.content = frame.content;
        self.clause = frame.clause;
    }

    fn operator(&mut self, token: &Token) {
        match token.key.as_str() {
            "," => {
                let breaks = self.clause == Some(self.stack.len());
                if breaks && self.opts.comma_position == CommaPosition::Before {
                    self.pending = None;
                    self.newline(self.content);
                    self.push_tok(",", false);
                } else {
                    self.push_tok(",", false);
                    if breaks {
                        self.pending = Some(self.content);
                    }
                }
            }
            ";" => {
                self.push_tok(";", false);
                self.clause = None;
                self.content = self.base;
                self.pending = Some(self.base);
            }
            symbol if self.spec.is_tight_operator(symbol) => {
                self.push_tok(&token.text, false);
                self.no_space = true;
            }
            _ => {
                self.push_tok(&token.text, true);
            }
        }
    }

    fn comment(&mut self, token: &Token, own_line: bool) {
        let indent = self.pending.unwrap_or(self.content);
        if own_line {
            self.pending = None;
            self.newline(indent);
            self.push_tok(&token.text, false);
            self.pending = Some(indent);
        } else {
            let was_pending = self.pending.take();
            self.push_tok(&token.text, true);
            self.pending = if token.kind == TokenKind::LineComment {
                Some(was_pending.unwrap_or(self.content))
            } else {
                was_pending
            };
        }
    }

    // ---- low-level output ----

    fn newline(&mut self, indent: usize) {
        if !self.cur.is_empty() {
            let pad = " ".repeat(self.opts.indent_width * self.cur_indent);
            self.lines.push(format!("{}{}", pad, self.cur.trim_end()));
            self.cur.clear();
        }
        self.cur_indent = indent;
        self.no_space = true;
    }

    fn push_tok(&mut self, text: &str, want_space: bool) {
        if let Some(indent) = self.pending.take() {
            self.newline(indent);
        }
        if !self.cur.is_empty() && want_space && !self.no_space {
            self.cur.push(' ');
        }
        self.cur.push_str(text);
        self.no_space = false;
    }

    fn cased(&self, token: &Token, case: LetterCase) -> String {
        if token.key.contains(' ') {
            return self.cased_phrase(token, case);
        }
        match case {
            LetterCase::Upper => token.key.to_string(),
            LetterCase::Lower => token.key.to_lowercase().to_string(),
            LetterCase::Preserve => token.text.clone(),
        }
    }

    /// Re-case a multi-word token word by word. Whitespace between words
    /// collapses to one space, but a comment lexed between the words is
    /// copied through verbatim; a line comment keeps its line break so it
    /// cannot swallow the words after it.
    fn cased_phrase(&self, token: &Token, case: LetterCase) -> String {
        let mut out = String::new();
        let mut rest = token.text.as_str();
        while let Some(c) = rest.chars().next() {
            if c.is_whitespace() {
                rest = &rest[c.len_utf8()..];
                continue;
            }
            if !out.is_empty() && !out.ends_with('\n') {
                out.push(' ');
            }
            if self
                .spec
                .line_comment_types
                .iter()
                .any(|m| rest.starts_with(*m))
            {
                let end = rest.find('\n').unwrap_or(rest.len());
                out.push_str(rest[..end].trim_end());
                out.push('\n');
                rest = &rest[end..];
                continue;
            }
            if let Some(end) = self.block_comment_end(rest) {
                out.push_str(&rest[..end]);
                rest = &rest[end..];
                continue;
            }
            let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
            let word = &rest[..end];
            match case {
                LetterCase::Upper => out.push_str(&word.to_uppercase()),
                LetterCase::Lower => out.push_str(&word.to_lowercase()),
                LetterCase::Preserve => out.push_str(word),
            }
            rest = &rest[end..];
        }
        out
    }

    fn block_comment_end(&self, rest: &str) -> Option<usize> {
        let (open, close) = self.spec.block_comment?;
        if !rest.starts_with(open) {
            return None;
        }
        Some(rest.find(close).map_or(rest.len(), |i| i + close.len()))
    }

    fn finish(mut self) -> String {
        self.newline(0);
        if self.lines.is_empty() {
            return String::new();
        }
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }
}

/// Whether the comment at `index` stood on its own source line: nothing but
/// whitespace (containing a newline) between it and the previous content.
fn own_line(tokens: &[Token], index: usize) -> bool {
    for token in tokens[..index].iter().rev() {
        match token.kind {
            TokenKind::Whitespace => {
                if token.text.contains('\n') {
                    return true;
                }
            }
            _ => return false,
        }
    }
    true
}
