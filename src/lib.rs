//! anchortrie - multi-pattern anchor matching core for a signature engine
//!
//! This crate builds and scans a hybrid trie/Aho-Corasick automaton over
//! short "anchor" tokens extracted from signature patterns (literal text,
//! hex byte/wildcard sequences, and regular expressions). It finds where a
//! pattern's anchor occurs in a byte stream; it does not itself evaluate
//! whether the full pattern matches at that position; that is the job of a
//! verifier layered on top (a hex mask walker, a regex engine, a wide/case
//! re-checker), which is out of scope here.
//!
//! # Quick start
//!
//! ```rust
//! use anchortrie::automaton::create_automaton;
//! use anchortrie::pattern::{Pattern, PatternFlags};
//!
//! let mut automaton = create_automaton();
//! automaton.add_pattern(Pattern::text(b"he".to_vec(), PatternFlags::ascii()))?;
//! automaton.add_pattern(Pattern::text(b"she".to_vec(), PatternFlags::ascii()))?;
//! automaton.create_failure_links()?;
//!
//! let mut state = automaton.root();
//! for &b in b"ushers" {
//!     state = automaton.next_state(state, b);
//!     for (pattern_id, backtrack) in automaton.matches_at(state) {
//!         println!("anchor hit: pattern {pattern_id:?}, backtrack {backtrack}");
//!     }
//! }
//! # Ok::<(), anchortrie::error::TrieError>(())
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────┐
//! │  Pattern (text / hex / regex + flags)      │
//! └───────────────────────────────────────────┘
//!          │ token generator (token / hex / regex_token)
//!          ▼
//! ┌───────────────────────────────────────────┐
//! │  Token: short byte anchor + backtrack      │
//! └───────────────────────────────────────────┘
//!          │ add_pattern
//!          ▼
//! ┌───────────────────────────────────────────┐
//! │  Trie (state.rs, dense <= depth 1, sparse  │
//! │  beyond) + arena-addressed states          │
//! └───────────────────────────────────────────┘
//!          │ create_failure_links (one-time BFS)
//!          ▼
//! ┌───────────────────────────────────────────┐
//! │  Automaton: pure next_state + matches_at   │
//! └───────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Append-only, index-addressed backing store for trie states and the
/// objects they reference.
pub mod arena;
/// The trie/automaton: pattern insertion, failure-link construction, and
/// the scan-time transition function.
pub mod automaton;
/// Error types for automaton construction.
pub mod error;
/// Token generator for hex patterns with wildcards and alternations.
pub mod hex;
/// Pattern input model: flags, literal bytes, hex mask streams, and the
/// regex-engine collaborator trait.
pub mod pattern;
/// Token generator for regular-expression patterns.
pub mod regex_token;
/// Trie states, transitions, and match descriptor lists.
pub mod state;
/// Token buffer and the literal-text token generator.
pub mod token;

pub use crate::automaton::{create_automaton, Automaton};
pub use crate::error::{Result, TrieError};
pub use crate::pattern::{Pattern, PatternFlags, PatternId};
pub use crate::token::{Token, MAX_TOKEN};

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library major version.
pub const VERSION_MAJOR: u32 = 0;

/// Library minor version.
pub const VERSION_MINOR: u32 = 1;

/// Library patch version.
pub const VERSION_PATCH: u32 = 0;
