//! Error types for the automaton build path.
use std::fmt;

/// Result type alias for automaton build operations.
pub type Result<T> = std::result::Result<T, TrieError>;

/// Errors that can occur while constructing an automaton.
///
/// Scan-time transitions (`next_state`) never fail: once `create_failure_links`
/// has run, the automaton is a pure function of state and byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrieError {
    /// Arena allocation failed, or a per-pattern scratch token buffer could
    /// not be obtained. States and matches inserted before the failure
    /// remain valid; failure links have not yet been built.
    OutOfMemory(String),

    /// The mask stream attached to a hex pattern violates the documented
    /// invariants (unterminated alternation, skip count with no operand,
    /// missing end sentinel). Never raised as a hard error by the token
    /// generator itself -- reserved for callers that want to reject a
    /// pattern before it reaches `add_pattern`.
    MalformedPattern(String),

    /// `create_failure_links` was invoked a second time on an automaton
    /// that already has failure links.
    AlreadyLinked,

    /// General errors that don't fit another variant.
    Other(String),
}

impl fmt::Display for TrieError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrieError::OutOfMemory(msg) => write!(f, "out of memory: {}", msg),
            TrieError::MalformedPattern(msg) => write!(f, "malformed pattern: {}", msg),
            TrieError::AlreadyLinked => {
                write!(f, "create_failure_links called more than once")
            }
            TrieError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for TrieError {}

impl From<String> for TrieError {
    fn from(msg: String) -> Self {
        TrieError::Other(msg)
    }
}

impl From<&str> for TrieError {
    fn from(msg: &str) -> Self {
        TrieError::Other(msg.to_string())
    }
}
