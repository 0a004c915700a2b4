//! Token generator for hex patterns with wildcards and alternations.
//!
//! Walks the pattern's parallel byte/mask streams, tracking a sliding
//! window of the most recently seen concrete run and keeping the single
//! best-scoring window as the emitted anchor. See `DESIGN.md` for the one
//! place this deliberately diverges from the prose spec (mid-run
//! `EXACT_SKIP` handling) and why.

use crate::pattern::{mask, HexPattern};
use crate::token::{Token, MAX_TOKEN};

struct Window {
    bytes: [u8; MAX_TOKEN],
    len: usize,
    /// Index into the pattern's byte stream of `bytes[0]`.
    start_index: usize,
    /// Backtrack distance recorded for `bytes[0]`.
    start_backtrack: u32,
}

impl Window {
    fn new() -> Self {
        Window {
            bytes: [0; MAX_TOKEN],
            len: 0,
            start_index: 0,
            start_backtrack: 0,
        }
    }

    fn clear(&mut self) {
        self.len = 0;
    }

    fn push(&mut self, byte: u8, index: usize, backtrack: u32) {
        if self.len < MAX_TOKEN {
            self.bytes[self.len] = byte;
            self.len += 1;
            if self.len == 1 {
                self.start_index = index;
                self.start_backtrack = backtrack;
            }
        } else {
            self.bytes.copy_within(1.., 0);
            self.bytes[MAX_TOKEN - 1] = byte;
            self.start_index += 1;
            self.start_backtrack += 1;
        }
    }

    fn unique_bytes(&self) -> usize {
        let mut seen = [false; 256];
        let mut count = 0;
        for &b in &self.bytes[..self.len] {
            if !seen[b as usize] {
                seen[b as usize] = true;
                count += 1;
            }
        }
        count
    }
}

#[derive(Clone, Copy)]
struct Candidate {
    position: usize,
    length: usize,
    backtrack: u32,
}

/// Generate the single anchor token for a hex pattern, per the policy
/// described in the spec's hex token generator section.
pub fn generate_hex_token(pattern: &HexPattern) -> Token {
    let bytes = &pattern.bytes;
    let mask_stream = &pattern.mask;

    let mut byte_idx = 0usize;
    let mut mask_idx = 0usize;

    let mut token_length: usize = 0;
    let mut backtrack: u32 = 0;
    let mut window = Window::new();

    let mut max_unique: usize = 0;
    let mut candidate: Option<Candidate> = None;
    let mut candidate_length: usize = 0;

    let mut in_alt = false;
    let mut or_branch_len: u32 = 0;
    let mut or_uniform_len: Option<u32> = None;

    macro_rules! update_candidate_if_better {
        () => {{
            let unique = window.unique_bytes();
            if unique > max_unique || token_length > candidate_length {
                max_unique = unique;
                candidate_length = window.len;
                candidate = Some(Candidate {
                    position: window.start_index,
                    length: window.len,
                    backtrack: window.start_backtrack,
                });
                if max_unique == MAX_TOKEN && window.len == MAX_TOKEN {
                    break;
                }
            }
        }};
    }

    while mask_idx < mask_stream.len() {
        match mask_stream[mask_idx] {
            mask::CONCRETE => {
                let b = bytes[byte_idx];
                if in_alt {
                    or_branch_len += 1;
                } else {
                    window.push(b, byte_idx, backtrack);
                    token_length = (token_length + 1).min(MAX_TOKEN);
                    update_candidate_if_better!();
                    backtrack += 1;
                }
                byte_idx += 1;
                mask_idx += 1;
            }
            mask::OR => {
                if in_alt {
                    match or_uniform_len {
                        None => or_uniform_len = Some(or_branch_len),
                        Some(prev) if prev != or_branch_len => break,
                        _ => {}
                    }
                }
                in_alt = true;
                or_branch_len = 0;
                token_length = 0;
                window.clear();
                mask_idx += 1;
            }
            mask::OR_END => {
                match or_uniform_len {
                    None => or_uniform_len = Some(or_branch_len),
                    Some(prev) if prev != or_branch_len => break,
                    _ => {}
                }
                backtrack += or_uniform_len.unwrap_or(0);
                in_alt = false;
                or_branch_len = 0;
                or_uniform_len = None;
                token_length = 0;
                window.clear();
                mask_idx += 1;
            }
            mask::EXACT_SKIP => {
                let count = *mask_stream.get(mask_idx + 1).unwrap_or(&0);
                backtrack += count as u32;
                token_length = 0;
                window.clear();
                mask_idx += 2;
            }
            mask::RANGE_SKIP => break,
            mask::END => break,
            _ => break,
        }
    }

    match candidate {
        Some(c) => Token::new(bytes[c.position..c.position + c.length].to_vec(), c.backtrack),
        None => Token::empty(),
    }
}
