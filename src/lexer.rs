//! The tokenizer: a single forward scan over the source against a compiled
//! dialect specification.
//!
//! Whitespace and comments are emitted as tokens, so concatenating the raw
//! text of every token reproduces the input byte-for-byte. The scan is
//! total over plain text; the only failures are unterminated quoted
//! constructs and block comments, reported at the offset where the
//! construct began.

use compact_str::CompactString;
use memchr::memchr;

use crate::dialect::{CompiledVariable, DialectSpec, PhraseCategory, QuoteStyle};
use crate::error::{Result, SqlPrettyError};
use crate::token::{Token, TokenKind};

/// Tokenize `source` against `spec`. Tokens appear in source order and
/// cover the entire input.
pub fn tokenize(source: &str, spec: &DialectSpec) -> Result<Vec<Token>> {
    let mut lexer = Lexer {
        source,
        bytes: source.as_bytes(),
        spec,
        pos: 0,
        tokens: Vec::new(),
    };
    lexer.run()?;
    Ok(lexer.tokens)
}

struct Lexer<'a> {
    source: &'a str,
    bytes: &'a [u8],
    spec: &'a DialectSpec,
    pos: usize,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    fn run(&mut self) -> Result<()> {
        while self.pos < self.bytes.len() {
            let start = self.pos;
            self.step()?;
            debug_assert!(self.pos > start, "lexer must advance");
        }
        Ok(())
    }

    fn emit(&mut self, kind: TokenKind, start: usize, end: usize) {
        self.tokens
            .push(Token::new(kind, &self.source[start..end], start, end));
        self.pos = end;
    }

    fn step(&mut self) -> Result<()> {
        let start = self.pos;

        if let Some(end) = scan_whitespace(self.bytes, start) {
            self.emit(TokenKind::Whitespace, start, end);
            return Ok(());
        }

        if let Some((kind, end)) = self.scan_comment(start)? {
            self.emit(kind, start, end);
            return Ok(());
        }

        if self.spec.dollar_strings {
            if let Some(end) = self.scan_dollar_string(start)? {
                self.emit(TokenKind::StringLiteral, start, end);
                return Ok(());
            }
        }

        for style in &self.spec.string_types {
            if let Some(end) = self.scan_quoted(start, style, "string literal")? {
                self.emit(TokenKind::StringLiteral, start, end);
                return Ok(());
            }
        }

        for style in &self.spec.ident_types {
            if let Some(end) = self.scan_quoted(start, style, "quoted identifier")? {
                self.emit(TokenKind::QuotedIdentifier, start, end);
                return Ok(());
            }
        }

        if let Some((kind, end)) = self.scan_variable_or_param(start)? {
            self.emit(kind, start, end);
            return Ok(());
        }

        if let Some(()) = self.scan_word(start) {
            return Ok(());
        }

        // Operators and symbol-form parens compete under maximal munch:
        // `-}` must win over `-`, `{-` over `{`.
        let rest = &self.source[start..];
        let mut best: Option<(TokenKind, usize)> = None;
        let candidates = self
            .spec
            .open_parens
            .iter()
            .map(|p| (TokenKind::OpenParen, *p))
            .chain(self.spec.close_parens.iter().map(|p| (TokenKind::CloseParen, *p)))
            .chain(self.spec.operators.iter().map(|op| (TokenKind::Operator, *op)));
        for (kind, symbol) in candidates {
            if symbol.len() > best.map_or(0, |(_, len)| len) && rest.starts_with(symbol) {
                best = Some((kind, symbol.len()));
            }
        }
        if let Some((kind, len)) = best {
            self.emit(kind, start, start + len);
            return Ok(());
        }

        if self.bytes[start].is_ascii_digit() {
            let end = scan_number(self.bytes, start);
            self.emit(TokenKind::Number, start, end);
            return Ok(());
        }

        // Nothing matched: one character of generic fallout, never an error.
        let c = self.source[start..].chars().next().unwrap();
        self.emit(TokenKind::Unknown, start, start + c.len_utf8());
        Ok(())
    }

    // ---- comments ----

    fn scan_comment(&self, start: usize) -> Result<Option<(TokenKind, usize)>> {
        for marker in &self.spec.line_comment_types {
            if self.source[start..].starts_with(marker) {
                let end = match memchr(b'\n', &self.bytes[start..]) {
                    Some(offset) => start + offset,
                    None => self.bytes.len(),
                };
                return Ok(Some((TokenKind::LineComment, end)));
            }
        }

        if let Some((open, close)) = self.spec.block_comment {
            if self.source[start..].starts_with(open) {
                let end = scan_block_comment(
                    self.source,
                    start,
                    open,
                    close,
                    self.spec.nested_block_comments,
                )
                .ok_or_else(|| SqlPrettyError::unterminated("block comment", start))?;
                return Ok(Some((TokenKind::BlockComment, end)));
            }
        }

        Ok(None)
    }

    // ---- quoted constructs ----

    /// Try `style` at `start`: an optional (or required) case-insensitive
    /// prefix immediately followed by the opening quote. Returns the end
    /// offset past the closing quote, `None` if the style does not start
    /// here, or an error if it starts but never closes.
    fn scan_quoted(&self, start: usize, style: &QuoteStyle, what: &str) -> Result<Option<usize>> {
        let mut body = None;
        for prefix in style.prefixes {
            let after = start + prefix.len();
            if self.bytes.len() >= after
                && self.bytes[start..after].eq_ignore_ascii_case(prefix.as_bytes())
                && self.source[after..].starts_with(style.open)
            {
                body = Some(after + style.open.len());
                break;
            }
        }
        if body.is_none() && !style.require_prefix && self.source[start..].starts_with(style.open) {
            body = Some(start + style.open.len());
        }
        let Some(mut i) = body else {
            return Ok(None);
        };

        let close = style.close.as_bytes();
        while i < self.bytes.len() {
            if style.backslash_escapes && self.bytes[i] == b'\\' && i + 1 < self.bytes.len() {
                i += 2;
                continue;
            }
            if self.bytes[i..].starts_with(close) {
                // A doubled closing quote is an escaped literal quote.
                if self.bytes[i + close.len()..].starts_with(close) {
                    i += 2 * close.len();
                    continue;
                }
                return Ok(Some(i + close.len()));
            }
            i += 1;
        }
        Err(SqlPrettyError::unterminated(what, start))
    }

    /// PostgreSQL `$tag$ ... $tag$` literals. The tag is identifier-like
    /// and must not start with a digit (that form is a numbered parameter).
    fn scan_dollar_string(&self, start: usize) -> Result<Option<usize>> {
        if self.bytes[start] != b'$' {
            return Ok(None);
        }
        let mut tag_end = start + 1;
        while tag_end < self.bytes.len()
            && (self.bytes[tag_end].is_ascii_alphanumeric() || self.bytes[tag_end] == b'_')
        {
            tag_end += 1;
        }
        if tag_end >= self.bytes.len() || self.bytes[tag_end] != b'$' {
            return Ok(None);
        }
        if self.bytes[start + 1].is_ascii_digit() {
            return Ok(None);
        }
        let tag = &self.source[start..=tag_end];
        match self.source[tag_end + 1..].find(tag) {
            Some(offset) => Ok(Some(tag_end + 1 + offset + tag.len())),
            None => Err(SqlPrettyError::unterminated("string literal", start)),
        }
    }

    // ---- variables and parameters ----

    fn scan_variable_or_param(&self, start: usize) -> Result<Option<(TokenKind, usize)>> {
        for variable in &self.spec.variables {
            match variable {
                CompiledVariable::Pattern(re) => {
                    if let Some(m) = re.find(&self.source[start..]) {
                        return Ok(Some((TokenKind::Variable, start + m.end())));
                    }
                }
                CompiledVariable::Quoted(style) => {
                    if let Some(end) = self.scan_quoted(start, style, "variable")? {
                        return Ok(Some((TokenKind::Variable, end)));
                    }
                }
            }
        }

        for prefix in self.spec.param_types.numbered {
            if self.source[start..].starts_with(prefix) {
                let mut i = start + prefix.len();
                while i < self.bytes.len() && self.bytes[i].is_ascii_digit() {
                    i += 1;
                }
                if i > start + prefix.len() {
                    return Ok(Some((TokenKind::Parameter, i)));
                }
            }
        }

        for prefix in self.spec.param_types.named {
            if self.source[start..].starts_with(prefix) {
                let name_start = start + prefix.len();
                let name_end = self.word_end(name_start);
                if name_end > name_start {
                    return Ok(Some((TokenKind::Parameter, name_end)));
                }
            }
        }

        if self.spec.param_types.positional && self.bytes[start] == b'?' {
            return Ok(Some((TokenKind::Parameter, start + 1)));
        }

        Ok(None)
    }

    // ---- words ----

    /// End of the word-character run starting at `start` (which may be
    /// empty if the character there is not a word character).
    fn word_end(&self, start: usize) -> usize {
        let mut end = start;
        for c in self.source[start..].chars() {
            if !self.spec.is_word_char(c, false) {
                break;
            }
            end += c.len_utf8();
        }
        end
    }

    fn scan_word(&mut self, start: usize) -> Option<()> {
        let first = self.source[start..].chars().next()?;
        if !self.spec.is_word_char(first, true) {
            return None;
        }

        let end = self.word_end(start);

        // Dialects that allow a leading digit still lex pure numbers as
        // numbers: `123` and `1e5` are literals, `1a` is an identifier.
        if first.is_ascii_digit() {
            let num_end = scan_number(self.bytes, start);
            if num_end >= end {
                self.emit(TokenKind::Number, start, num_end);
                return Some(());
            }
        }

        let key = CompactString::from(self.source[start..end].to_uppercase());

        // Multi-word phrase lookup: longest match wins; equal lengths go to
        // the earlier category.
        let spec = self.spec;
        let mut best: Option<(PhraseCategory, &[CompactString], usize)> = None;
        for (category, set) in &spec.phrase_sets {
            for phrase in set.candidates(&key) {
                if best.is_some_and(|(_, words, _)| words.len() >= phrase.len()) {
                    // Candidates are sorted longest first, so nothing in
                    // this category can beat the current best.
                    break;
                }
                if let Some(phrase_end) = self.match_phrase_tail(end, &phrase[1..]) {
                    best = Some((*category, phrase, phrase_end));
                    break;
                }
            }
        }

        if let Some((category, words, phrase_end)) = best {
            let phrase_key = CompactString::from(
                words
                    .iter()
                    .map(|w| w.as_str())
                    .collect::<Vec<_>>()
                    .join(" "),
            );
            self.tokens.push(Token::keyed(
                category.token_kind(),
                &self.source[start..phrase_end],
                phrase_key,
                start,
                phrase_end,
            ));
            self.pos = phrase_end;
            return Some(());
        }

        let kind = if let Some(paren_kind) = self.spec.word_paren_kind(&key) {
            paren_kind
        } else if self.spec.is_keyword(&key) {
            TokenKind::Keyword
        } else if self.spec.is_function(&key) && self.paren_follows(end) {
            TokenKind::FunctionName
        } else {
            TokenKind::Identifier
        };

        self.emit(kind, start, end);
        Some(())
    }

    /// Match the remaining words of a phrase after its first word, peeking
    /// past whitespace and comments without consuming. Returns the offset
    /// just past the last matched word.
    fn match_phrase_tail(&self, mut pos: usize, rest: &[CompactString]) -> Option<usize> {
        for expected in rest {
            pos = self.skip_trivia(pos);
            let word_start = pos;
            let word_end = self.word_end(word_start);
            if word_end == word_start
                || !self.source[word_start..word_end].eq_ignore_ascii_case(expected)
            {
                return None;
            }
            pos = word_end;
        }
        Some(pos)
    }

    /// Whether a symbol-form open paren follows at `pos` modulo trivia.
    fn paren_follows(&self, pos: usize) -> bool {
        let pos = self.skip_trivia(pos);
        self.spec
            .open_parens
            .iter()
            .filter(|d| !d.chars().next().is_some_and(|c| c.is_ascii_alphabetic()))
            .any(|d| self.source[pos..].starts_with(d))
    }

    /// Skip whitespace and terminated comments for non-consuming lookahead.
    /// Stops at an unterminated block comment so the main scan reports it.
    fn skip_trivia(&self, mut pos: usize) -> usize {
        loop {
            if let Some(end) = scan_whitespace(self.bytes, pos) {
                pos = end;
                continue;
            }
            let mut advanced = false;
            for marker in &self.spec.line_comment_types {
                if self.source[pos..].starts_with(marker) {
                    pos = match memchr(b'\n', &self.bytes[pos..]) {
                        Some(offset) => pos + offset,
                        None => self.bytes.len(),
                    };
                    advanced = true;
                    break;
                }
            }
            if advanced {
                continue;
            }
            if let Some((open, close)) = self.spec.block_comment {
                if self.source[pos..].starts_with(open) {
                    match scan_block_comment(
                        self.source,
                        pos,
                        open,
                        close,
                        self.spec.nested_block_comments,
                    ) {
                        Some(end) => {
                            pos = end;
                            continue;
                        }
                        None => return pos,
                    }
                }
            }
            return pos;
        }
    }
}

// ---- scan helpers ----

fn scan_whitespace(bytes: &[u8], start: usize) -> Option<usize> {
    let mut end = start;
    while end < bytes.len() && bytes[end].is_ascii_whitespace() {
        end += 1;
    }
    (end > start).then_some(end)
}

/// Standard integer/decimal/exponent forms. `start` points at a digit.
fn scan_number(bytes: &[u8], start: usize) -> usize {
    let len = bytes.len();
    let mut i = start;
    while i < len && bytes[i].is_ascii_digit() {
        i += 1;
    }
    if i < len && bytes[i] == b'.' {
        let mut j = i + 1;
        while j < len && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > i + 1 {
            i = j;
        }
    }
    if i < len && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < len && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        if j < len && bytes[j].is_ascii_digit() {
            while j < len && bytes[j].is_ascii_digit() {
                j += 1;
            }
            i = j;
        }
    }
    i
}

/// Returns the offset past the closing delimiter, or `None` if the comment
/// never closes.
fn scan_block_comment(
    source: &str,
    start: usize,
    open: &str,
    close: &str,
    nested: bool,
) -> Option<usize> {
    let mut depth = 1usize;
    let mut i = start + open.len();
    while i < source.len() {
        if nested && source[i..].starts_with(open) {
            depth += 1;
            i += open.len();
            continue;
        }
        if source[i..].starts_with(close) {
            depth -= 1;
            i += close.len();
            if depth == 0 {
                return Some(i);
            }
            continue;
        }
        i += 1;
    }
    None
}
