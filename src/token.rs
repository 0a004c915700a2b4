//! Token buffer and the literal-text token generator.
//!
//! A token is a short anchor substring the automaton literally matches,
//! paired with the backtrack distance the scanner needs to replay a
//! full-pattern verifier. See `DESIGN.md` for how this maps to the
//! original "flat byte stream of records" wire layout -- we keep the
//! logical record (`Token`) and skip the serialization, since nothing here
//! crosses a process boundary.

/// Longest anchor a token generator will ever emit.
pub const MAX_TOKEN: usize = 4;

/// One anchor candidate plus its backtrack distance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub bytes: Vec<u8>,
    pub backtrack: u32,
}

impl Token {
    pub fn new(bytes: Vec<u8>, backtrack: u32) -> Self {
        debug_assert!(bytes.len() <= MAX_TOKEN);
        Token { bytes, backtrack }
    }

    /// The zero-length fallback token: no usable anchor, match at root.
    pub fn empty() -> Self {
        Token {
            bytes: Vec::new(),
            backtrack: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Literal ASCII token: first `min(len, MAX_TOKEN)` bytes, backtrack 0.
fn ascii_token(pattern: &[u8]) -> Token {
    let n = pattern.len().min(MAX_TOKEN);
    Token::new(pattern[..n].to_vec(), 0)
}

/// Literal wide (UTF-16LE-ish interleaved-zero) token: up to `MAX_TOKEN`
/// bytes built by interleaving `pattern[i]` at even offsets with a zero
/// byte at each odd offset.
fn wide_token(pattern: &[u8]) -> Token {
    let token_len = (2 * pattern.len()).min(MAX_TOKEN);
    let source_bytes = token_len / 2;
    let mut bytes = Vec::with_capacity(token_len);
    for &b in &pattern[..source_bytes] {
        bytes.push(b);
        bytes.push(0);
    }
    Token::new(bytes, 0)
}

/// Every case-permutation of a token's ASCII-letter positions, including
/// the token itself. A token with `k` letter positions yields `2^k`
/// variants, all sharing `backtrack`.
pub fn case_permutations(token: &Token) -> Vec<Token> {
    let letter_positions: Vec<usize> = token
        .bytes
        .iter()
        .enumerate()
        .filter(|(_, b)| b.is_ascii_alphabetic())
        .map(|(i, _)| i)
        .collect();

    let k = letter_positions.len();
    let mut out = Vec::with_capacity(1usize << k);
    for mask in 0..(1u32 << k) {
        let mut bytes = token.bytes.clone();
        for (bit, &pos) in letter_positions.iter().enumerate() {
            let upper = (mask >> bit) & 1 == 1;
            bytes[pos] = if upper {
                bytes[pos].to_ascii_uppercase()
            } else {
                bytes[pos].to_ascii_lowercase()
            };
        }
        out.push(Token::new(bytes, token.backtrack));
    }
    out
}

/// Generate tokens for a literal text pattern per the `ascii`/`wide`/
/// `no_case` flags. Always returns at least one token (possibly the empty
/// fallback only if `pattern` itself is empty and both flags are unset,
/// which callers should avoid).
pub fn generate_literal_tokens(pattern: &[u8], ascii: bool, wide: bool, no_case: bool) -> Vec<Token> {
    let mut base = Vec::new();
    if ascii {
        base.push(ascii_token(pattern));
    }
    if wide {
        base.push(wide_token(pattern));
    }
    if base.is_empty() {
        return vec![Token::empty()];
    }

    if !no_case {
        return base;
    }

    base.iter().flat_map(case_permutations).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_literal_token() {
        let tokens = generate_literal_tokens(b"abc", true, false, false);
        assert_eq!(tokens, vec![Token::new(b"abc".to_vec(), 0)]);
    }

    #[test]
    fn ascii_literal_truncates_to_max_token() {
        let tokens = generate_literal_tokens(b"abcdefgh", true, false, false);
        assert_eq!(tokens[0].bytes, b"abcd");
    }

    #[test]
    fn wide_token_interleaves_zero_bytes() {
        let tokens = generate_literal_tokens(b"Ab", false, true, false);
        assert_eq!(tokens, vec![Token::new(vec![b'A', 0, b'b', 0], 0)]);
    }

    #[test]
    fn wide_and_ascii_both_emitted() {
        let tokens = generate_literal_tokens(b"Ab", true, true, false);
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].bytes, b"Ab");
        assert_eq!(tokens[1].bytes, vec![b'A', 0, b'b', 0]);
    }

    #[test]
    fn wide_no_case_emits_four_variants() {
        // scenario S2
        let tokens = generate_literal_tokens(b"Ab", false, true, true);
        let mut bytes: Vec<Vec<u8>> = tokens.into_iter().map(|t| t.bytes).collect();
        bytes.sort();
        let mut expected = vec![
            vec![b'A', 0, b'b', 0],
            vec![b'A', 0, b'B', 0],
            vec![b'a', 0, b'b', 0],
            vec![b'a', 0, b'B', 0],
        ];
        expected.sort();
        assert_eq!(bytes, expected);
    }

    #[test]
    fn no_letters_means_single_variant() {
        let tokens = generate_literal_tokens(b"123", true, false, true);
        assert_eq!(tokens.len(), 1);
    }

    #[test]
    fn all_variants_share_backtrack() {
        let tokens = generate_literal_tokens(b"Ab", true, false, true);
        assert!(tokens.iter().all(|t| t.backtrack == 0));
    }
}
