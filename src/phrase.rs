//! Compiler for the phrase-template mini-language.
//!
//! A template is a sequence of whitespace-separated units:
//!   - a literal word: `JOIN`
//!   - an optional group: `[OUTER]` (present or absent; the body may
//!     itself alternate, `[ALL | DISTINCT]`)
//!   - an alternation group: `{LEFT | RIGHT}` (exactly one option, options
//!     may be multi-word)
//!
//! `expand` produces every concrete word sequence the template denotes, in
//! left-to-right unit order, deduplicated. Groups cannot nest; a nested or
//! unbalanced group is a config error reported when the dialect
//! specification is built, never at format time.

use crate::error::{Result, SqlPrettyError};

/// One unit of a parsed template, as a set of word-sequence branches.
/// A literal has one branch, an alternation one per option, an optional
/// group its options plus the empty branch.
type Branches = Vec<Vec<String>>;

/// Expand a single template into its concrete phrases (uppercased).
pub fn expand(template: &str) -> Result<Vec<String>> {
    let units = parse_units(template)?;

    let mut phrases: Vec<Vec<String>> = vec![Vec::new()];
    for branches in &units {
        let mut next = Vec::with_capacity(phrases.len() * branches.len());
        for phrase in &phrases {
            for branch in branches {
                let mut extended = phrase.clone();
                extended.extend(branch.iter().cloned());
                next.push(extended);
            }
        }
        phrases = next;
    }

    let mut out: Vec<String> = Vec::with_capacity(phrases.len());
    for words in phrases {
        let joined = words.join(" ");
        if !joined.is_empty() && !out.contains(&joined) {
            out.push(joined);
        }
    }
    Ok(out)
}

/// Expand a list of templates into one deduplicated phrase list.
pub fn expand_phrases(templates: &[&str]) -> Result<Vec<String>> {
    let mut out = Vec::new();
    for template in templates {
        for phrase in expand(template)? {
            if !out.contains(&phrase) {
                out.push(phrase);
            }
        }
    }
    Ok(out)
}

fn parse_units(template: &str) -> Result<Vec<Branches>> {
    let malformed = |msg: &str| {
        SqlPrettyError::Config(format!("malformed phrase template {template:?}: {msg}"))
    };

    let mut units: Vec<Branches> = Vec::new();
    let mut rest = template.trim_start();

    while !rest.is_empty() {
        let c = rest.chars().next().unwrap();
        match c {
            '[' => {
                let (body, tail) = take_group(&rest[1..], ']')
                    .ok_or_else(|| malformed("unbalanced '['"))?;
                if body.contains(['[', '{']) {
                    return Err(malformed("nested group inside '[...]'"));
                }
                if body.split_whitespace().next().is_none() {
                    return Err(malformed("empty optional group"));
                }
                // An optional body may itself alternate: `[ALL | DISTINCT]`
                // is ALL, DISTINCT, or nothing.
                let mut branches = split_options(body, &malformed)?;
                branches.push(Vec::new());
                units.push(branches);
                rest = tail;
            }
            '{' => {
                let (body, tail) = take_group(&rest[1..], '}')
                    .ok_or_else(|| malformed("unbalanced '{'"))?;
                if body.contains(['[', '{']) {
                    return Err(malformed("nested group inside '{...}'"));
                }
                units.push(split_options(body, &malformed)?);
                rest = tail;
            }
            ']' | '}' => return Err(malformed("unbalanced closing bracket")),
            _ => {
                let end = rest
                    .find(|c: char| c.is_whitespace() || matches!(c, '[' | '{' | ']' | '}'))
                    .unwrap_or(rest.len());
                units.push(vec![vec![rest[..end].to_uppercase()]]);
                rest = &rest[end..];
            }
        }
        rest = rest.trim_start();
    }

    Ok(units)
}

/// Split off a `[...]`/`{...}` body. `rest` starts just after the opening
/// bracket; returns (body, text after the closing bracket).
fn take_group(rest: &str, close: char) -> Option<(&str, &str)> {
    let end = rest.find([close, '[', '{'])?;
    if rest[end..].starts_with(close) {
        Some((&rest[..end], &rest[end + 1..]))
    } else {
        // Hit a nested opener first; report the body so the caller can
        // produce the nesting error.
        Some((rest, ""))
    }
}

/// Split a group body on `|` into word-sequence branches.
fn split_options(
    body: &str,
    malformed: &dyn Fn(&str) -> SqlPrettyError,
) -> Result<Branches> {
    let mut branches: Branches = Vec::new();
    for option in body.split('|') {
        let words: Vec<String> = option.split_whitespace().map(str::to_uppercase).collect();
        if words.is_empty() {
            return Err(malformed("empty alternative"));
        }
        branches.push(words);
    }
    Ok(branches)
}
