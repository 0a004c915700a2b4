//! The trie/automaton itself: pattern insertion, failure-link construction,
//! and the scan-time transition function.
//!
//! Grounded on `ac_offset.rs`'s `ACBuilder`/`build_failure_links`/
//! `find_transition` -- same two-phase shape (insert everything, then link
//! once), same BFS, same "follow failure links until a transition exists or
//! we're back at root" scan-time loop. We drop the offset/zerocopy wire
//! format entirely: nothing here crosses a process boundary, so states live
//! in plain arenas instead of a serialized byte buffer.

use std::collections::VecDeque;
use std::fmt::Write as _;

use crate::arena::Arena;
use crate::error::{Result, TrieError};
use crate::hex::generate_hex_token;
use crate::pattern::{FirstByteSource, Pattern, PatternBody, PatternId};
use crate::regex_token::generate_regex_tokens;
use crate::state::{MatchDescriptor, MatchId, State, StateId, TransNode};
use crate::token::generate_literal_tokens;

pub struct Automaton {
    states: Arena<State>,
    trans: Arena<TransNode>,
    matches: Arena<MatchDescriptor>,
    root: StateId,
    pattern_count: u32,
    linked: bool,
}

/// Create an empty automaton with just a root state.
pub fn create_automaton() -> Automaton {
    let mut states = Arena::new();
    let root = states.alloc(State::new(0));
    Automaton {
        states,
        trans: Arena::new(),
        matches: Arena::new(),
        root,
        pattern_count: 0,
        linked: false,
    }
}

impl Automaton {
    pub fn root(&self) -> StateId {
        self.root
    }

    pub fn pattern_count(&self) -> u32 {
        self.pattern_count
    }

    pub fn is_linked(&self) -> bool {
        self.linked
    }

    /// Insert a pattern, generating and inserting its token(s) into the
    /// trie. Returns the pattern's id and the shortest anchor length among
    /// the tokens generated for it (0 if every token fell back to a root
    /// match). Must be called before `create_failure_links`.
    pub fn add_pattern(&mut self, pattern: Pattern) -> Result<(PatternId, u32)> {
        if self.linked {
            return Err(TrieError::Other(
                "add_pattern called after create_failure_links".into(),
            ));
        }

        let id = PatternId(self.pattern_count);
        self.pattern_count += 1;

        let tokens = match &pattern.body {
            PatternBody::Text(bytes) => generate_literal_tokens(
                bytes,
                pattern.flags.ascii,
                pattern.flags.wide,
                pattern.flags.no_case,
            ),
            // Hex tokens stay case-exact: NO_CASE only ever applies to the
            // literal-text and regex generators.
            PatternBody::Hex(hex) => vec![generate_hex_token(hex)],
            PatternBody::Regex { source, first_bytes } => {
                let collaborator: Option<&dyn FirstByteSource> = first_bytes.as_deref();
                generate_regex_tokens(source, pattern.flags.no_case, collaborator)
            }
        };

        let min_token_length = tokens.iter().map(|t| t.bytes.len() as u32).min().unwrap_or(0);

        for token in &tokens {
            let leaf = if token.is_empty() {
                self.root
            } else {
                self.insert_token(&token.bytes)
            };
            // The match descriptor's backtrack is measured from the input
            // cursor at the terminal state (i.e. state.depth bytes past
            // where the token started), not from the token's own first
            // byte -- so it adds the terminal state's depth to the
            // token's backtrack.
            let depth = self.states.get(leaf).depth;
            self.attach_match(leaf, id, depth + token.backtrack);
        }

        Ok((id, min_token_length))
    }

    fn insert_token(&mut self, bytes: &[u8]) -> StateId {
        let mut cur = self.root;
        for &b in bytes {
            cur = self.get_or_create_child(cur, b);
        }
        cur
    }

    fn get_or_create_child(&mut self, state: StateId, byte: u8) -> StateId {
        if let Some(existing) = self.states.get(state).get_child(&self.trans, byte) {
            return existing;
        }
        let depth = self.states.get(state).depth + 1;
        let child = self.states.alloc(State::new(depth));
        self.states.get_mut(state).set_child(&mut self.trans, byte, child);
        child
    }

    fn attach_match(&mut self, state: StateId, pattern: PatternId, backtrack: u32) {
        let next = self.states.get(state).matches;
        let match_id = self.matches.alloc(MatchDescriptor {
            pattern,
            backtrack,
            next,
        });
        self.states.get_mut(state).matches = Some(match_id);
    }

    /// Append `inherited`'s match list onto the end of `state`'s own match
    /// list. Matches are chained unconditionally: a state inherits its
    /// failure state's matches whether or not it has any terminal matches
    /// of its own, and whether or not the inherited matches carry a zero
    /// backtrack. See `DESIGN.md` for why the alternative (only chaining
    /// when the backtrack is nonzero) was rejected.
    fn append_matches(&mut self, state: StateId, inherited: MatchId) {
        match self.states.get(state).matches {
            None => self.states.get_mut(state).matches = Some(inherited),
            Some(head) => {
                let mut tail = head;
                while let Some(next) = self.matches.get(tail).next {
                    tail = next;
                }
                self.matches.get_mut(tail).next = Some(inherited);
            }
        }
    }

    /// Build every state's failure link and collapse match lists along
    /// them, in one breadth-first pass. Can only be called once; scan-time
    /// transitions are undefined (and `next_state` will panic) before this
    /// runs.
    pub fn create_failure_links(&mut self) -> Result<()> {
        if self.linked {
            return Err(TrieError::AlreadyLinked);
        }

        let root = self.root;
        let mut queue: VecDeque<StateId> = VecDeque::new();
        queue.push_back(root);

        while let Some(state) = queue.pop_front() {
            let children: Vec<(u8, StateId)> = self.states.get(state).children(&self.trans).collect();
            for (b, child) in children {
                let child_failure = if state == root {
                    root
                } else {
                    self.find_failure_target(state, b)
                };

                self.states.get_mut(child).failure = Some(child_failure);

                if let Some(inherited) = self.states.get(child_failure).matches {
                    self.append_matches(child, inherited);
                }

                queue.push_back(child);
            }
        }

        self.linked = true;
        Ok(())
    }

    /// Follow `state`'s own failure chain looking for a transition on `b`,
    /// stopping at root if none is found. `state`'s failure link is already
    /// final by the time this runs, since the BFS processes states in
    /// non-decreasing depth order.
    fn find_failure_target(&self, state: StateId, b: u8) -> StateId {
        let mut f = self
            .states
            .get(state)
            .failure
            .expect("failure link of a state already popped from the BFS queue");
        loop {
            if let Some(target) = self.states.get(f).get_child(&self.trans, b) {
                return target;
            }
            if f == self.root {
                return self.root;
            }
            f = self.states.get(f).failure.expect("BFS processes shallower states first");
        }
    }

    /// Follow a transition on `byte` from `state`, falling back through
    /// failure links and finally to root's self-loop. Pure: same inputs
    /// always give the same output, and it never fails once failure links
    /// have been built.
    pub fn next_state(&self, state: StateId, byte: u8) -> StateId {
        let mut cur = state;
        loop {
            if let Some(target) = self.states.get(cur).get_child(&self.trans, byte) {
                return target;
            }
            if cur == self.root {
                return self.root;
            }
            cur = self
                .states
                .get(cur)
                .failure
                .expect("next_state called before create_failure_links");
        }
    }

    /// Depth of `state` in the trie (root is 0).
    pub fn depth_of(&self, state: StateId) -> u32 {
        self.states.get(state).depth
    }

    /// `state`'s failure link, or `None` for the root.
    pub fn failure_of(&self, state: StateId) -> Option<StateId> {
        self.states.get(state).failure
    }

    /// `state`'s direct trie transitions, as `(byte, target)` pairs. Used
    /// by traversals over the whole automaton; the scan-time path only
    /// ever needs `next_state`.
    pub fn children_of(&self, state: StateId) -> Vec<(u8, StateId)> {
        self.states.get(state).children(&self.trans).collect()
    }

    /// Iterate the patterns (and their backtrack distances) attached to
    /// `state`, already collapsed across its failure chain.
    pub fn matches_at(&self, state: StateId) -> MatchIter<'_> {
        MatchIter {
            matches: &self.matches,
            cur: self.states.get(state).matches,
        }
    }

    /// Depth-first text rendering of the trie, for debugging. Not part of
    /// the scan-time interface.
    pub fn debug_dump(&self) -> String {
        let mut out = String::new();
        self.dump_state(self.root, 0, &mut out);
        out
    }

    fn dump_state(&self, state: StateId, indent: usize, out: &mut String) {
        let pad = "  ".repeat(indent);
        let matches: Vec<(PatternId, u32)> = self.matches_at(state).collect();
        let _ = writeln!(out, "{pad}state depth={} matches={:?}", self.states.get(state).depth, matches);
        for (byte, child) in self.states.get(state).children(&self.trans) {
            let _ = writeln!(out, "{pad}  -0x{byte:02x}->");
            self.dump_state(child, indent + 2, out);
        }
    }
}

pub struct MatchIter<'a> {
    matches: &'a Arena<MatchDescriptor>,
    cur: Option<MatchId>,
}

impl<'a> Iterator for MatchIter<'a> {
    type Item = (PatternId, u32);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cur?;
        let descriptor = self.matches.get(id);
        self.cur = descriptor.next;
        Some((descriptor.pattern, descriptor.backtrack))
    }
}
