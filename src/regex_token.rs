//! Token generator for regular-expression patterns.
//!
//! Parses a literal prefix straight out of the regex source (the full
//! regex engine is an external collaborator, out of scope here -- see
//! `DESIGN.md`), falling back to the regex engine's first-byte set when no
//! literal prefix exists.

use crate::pattern::FirstByteSource;
use crate::token::{case_permutations, Token, MAX_TOKEN};

fn is_quantifier(c: u8) -> bool {
    matches!(c, b'*' | b'?' | b'{')
}

/// A literal in regex syntax: safe to copy into an anchor token verbatim.
fn is_hashable(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_'
}

/// An escaped, escapable character's literal value, or `None` if the
/// escape isn't one we understand (in which case the prefix scan stops).
fn escaped_literal(c: u8) -> Option<u8> {
    match c {
        b'.' | b'^' | b'$' | b'|' | b'(' | b')' | b'[' | b']' | b'{' | b'}' | b'*' | b'+'
        | b'?' | b'\\' | b'/' => Some(c),
        b'n' => Some(b'\n'),
        b't' => Some(b'\t'),
        b'r' => Some(b'\r'),
        _ => None,
    }
}

/// Parse the longest literal prefix of a regex's source, skipping a
/// leading `^`. Stops before any character that a following quantifier
/// (`*`, `?`, `{`) could make optional, and before any construct other
/// than a hashable literal or a recognized escape.
fn generate_regex_token(source: &str) -> Token {
    let bytes = source.as_bytes();
    let mut i = 0;
    if bytes.first() == Some(&b'^') {
        i += 1;
    }

    let mut out = Vec::new();
    while out.len() < MAX_TOKEN && i < bytes.len() {
        let c = bytes[i];
        let (literal, consumed) = if c == b'\\' {
            match bytes.get(i + 1).copied().and_then(escaped_literal) {
                Some(lit) => (lit, 2),
                None => break,
            }
        } else if is_hashable(c) {
            (c, 1)
        } else {
            break;
        };

        let after = i + consumed;
        if bytes.get(after).copied().is_some_and(is_quantifier) {
            break;
        }
        out.push(literal);
        i = after;
    }

    Token::new(out, 0)
}

/// Generate tokens for a regex pattern: the literal prefix (with case
/// permutations if `no_case`), or a one-byte token per possible first
/// byte if the prefix is empty, or the root-match fallback if even that
/// is unbounded or empty.
pub fn generate_regex_tokens(
    source: &str,
    no_case: bool,
    first_bytes: Option<&dyn FirstByteSource>,
) -> Vec<Token> {
    let token = generate_regex_token(source);
    if !token.is_empty() {
        return if no_case {
            case_permutations(&token)
        } else {
            vec![token]
        };
    }

    match first_bytes.map(|src| src.first_bytes()) {
        Some(bytes) if !bytes.is_empty() => {
            bytes.into_iter().map(|b| Token::new(vec![b], 0)).collect()
        }
        _ => vec![Token::empty()],
    }
}
