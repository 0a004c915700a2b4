//! Pattern input model: flags, literal bytes, hex mask streams and the
//! regex-engine collaborator trait.

/// Flags attached to a pattern, controlling which token generator runs.
///
/// `ascii` and `wide` are independent -- a text pattern may set one, the
/// other, or both, and gets a token for each. `hex` and `regexp` select an
/// entirely different token generator and are mutually exclusive with the
/// text flags and with each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PatternFlags {
    pub hex: bool,
    pub regexp: bool,
    pub ascii: bool,
    pub wide: bool,
    pub no_case: bool,
}

impl PatternFlags {
    pub const fn ascii() -> Self {
        PatternFlags {
            ascii: true,
            ..Self::EMPTY
        }
    }

    pub const fn wide() -> Self {
        PatternFlags {
            wide: true,
            ..Self::EMPTY
        }
    }

    pub const fn hex() -> Self {
        PatternFlags {
            hex: true,
            ..Self::EMPTY
        }
    }

    pub const fn regexp() -> Self {
        PatternFlags {
            regexp: true,
            ..Self::EMPTY
        }
    }

    pub const fn no_case(mut self) -> Self {
        self.no_case = true;
        self
    }

    pub const fn and_wide(mut self) -> Self {
        self.wide = true;
        self
    }

    const EMPTY: Self = PatternFlags {
        hex: false,
        regexp: false,
        ascii: false,
        wide: false,
        no_case: false,
    };
}

/// Raw mask byte codes for a hex pattern's mask stream.
///
/// The mask stream runs in lockstep with the pattern's byte stream for
/// [`CONCRETE`](mask::CONCRETE) codes only: every other code advances the
/// mask cursor without consuming a pattern byte. [`EXACT_SKIP`](mask::EXACT_SKIP)
/// additionally consumes one extra mask byte (the skip count) that has no
/// counterpart in the pattern byte stream at all.
pub mod mask {
    /// The pattern byte at this position is concrete; consume one pattern byte.
    pub const CONCRETE: u8 = 0xFF;
    /// Opens an alternation, or separates two branches of one already open.
    pub const OR: u8 = 0xFE;
    /// Closes an alternation.
    pub const OR_END: u8 = 0xFD;
    /// Followed by one count byte: skip exactly that many pattern positions.
    pub const EXACT_SKIP: u8 = 0xFC;
    /// Variable-length skip; token generation cannot see past this point.
    pub const RANGE_SKIP: u8 = 0xFB;
    /// Terminates the mask stream.
    pub const END: u8 = 0xFA;
}

/// A hex pattern's parallel byte/mask streams.
#[derive(Debug, Clone, Default)]
pub struct HexPattern {
    pub bytes: Vec<u8>,
    pub mask: Vec<u8>,
}

/// Builds a [`HexPattern`]'s parallel streams without requiring callers to
/// hand-count mask bytes.
///
/// `alt_depth` tracks whether an alternation is currently open (the mask
/// format supports one level of nesting, not arbitrarily many) so misuse --
/// an `or_branch`/`or_end` with no matching `or_start`, a nested `or_start`,
/// or a `finish` with an alternation still open -- is caught here rather
/// than producing a mask stream `generate_hex_token` would silently
/// misinterpret.
#[derive(Debug, Default)]
pub struct HexPatternBuilder {
    bytes: Vec<u8>,
    mask: Vec<u8>,
    alt_depth: u32,
}

impl HexPatternBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a concrete byte.
    pub fn byte(mut self, b: u8) -> Self {
        self.bytes.push(b);
        self.mask.push(mask::CONCRETE);
        self
    }

    /// Append several concrete bytes.
    pub fn bytes(mut self, bs: &[u8]) -> Self {
        for &b in bs {
            self = self.byte(b);
        }
        self
    }

    /// Open an alternation: `or_start().bytes(..).or_branch().bytes(..).or_end()`.
    pub fn or_start(mut self) -> Self {
        assert_eq!(self.alt_depth, 0, "nested alternations are not supported");
        self.mask.push(mask::OR);
        self.alt_depth = 1;
        self
    }

    /// Separate two branches of the currently open alternation.
    pub fn or_branch(mut self) -> Self {
        assert_eq!(self.alt_depth, 1, "or_branch with no open alternation");
        self.mask.push(mask::OR);
        self
    }

    /// Close the currently open alternation.
    pub fn or_end(mut self) -> Self {
        assert_eq!(self.alt_depth, 1, "or_end with no matching or_start");
        self.mask.push(mask::OR_END);
        self.alt_depth = 0;
        self
    }

    /// Skip exactly `count` pattern positions.
    pub fn exact_skip(mut self, count: u8) -> Self {
        self.mask.push(mask::EXACT_SKIP);
        self.mask.push(count);
        self
    }

    /// Variable-length skip; ends token generation if reached.
    pub fn range_skip(mut self) -> Self {
        self.mask.push(mask::RANGE_SKIP);
        self
    }

    pub fn finish(self) -> HexPattern {
        assert_eq!(self.alt_depth, 0, "finish with an alternation still open");
        let mut mask = self.mask;
        mask.push(mask::END);
        HexPattern {
            bytes: self.bytes,
            mask,
        }
    }
}

/// External collaborator: given a regex's parsed form, enumerate the set of
/// bytes with which a match can possibly begin. Consumed by the regex token
/// generator as a fallback when no literal prefix can be extracted; the
/// regex engine itself is out of scope for this crate (see `DESIGN.md`).
pub trait FirstByteSource {
    /// Possible first bytes of the regex's language. An empty result means
    /// the regex accepts the empty string (or first bytes are unbounded),
    /// and the pattern falls back to a root match.
    fn first_bytes(&self) -> Vec<u8>;
}

/// A pattern as consumed by [`crate::automaton::Automaton::add_pattern`].
pub enum PatternBody {
    /// ASCII/wide/no-case literal text, matched via `bytes` directly.
    Text(Vec<u8>),
    /// Hex pattern with wildcards and alternations.
    Hex(HexPattern),
    /// Regex source text, skipping a leading `^` is the generator's job.
    /// `first_bytes` is consulted only if no literal prefix is found.
    Regex {
        source: String,
        first_bytes: Option<Box<dyn FirstByteSource>>,
    },
}

/// A pattern to insert into the automaton.
pub struct Pattern {
    pub flags: PatternFlags,
    pub body: PatternBody,
}

impl Pattern {
    pub fn text(bytes: impl Into<Vec<u8>>, flags: PatternFlags) -> Self {
        Pattern {
            flags,
            body: PatternBody::Text(bytes.into()),
        }
    }

    pub fn hex(hex: HexPattern) -> Self {
        Pattern {
            flags: PatternFlags::hex(),
            body: PatternBody::Hex(hex),
        }
    }

    pub fn regex(source: impl Into<String>, no_case: bool) -> Self {
        Pattern {
            flags: PatternFlags {
                regexp: true,
                no_case,
                ..PatternFlags::default()
            },
            body: PatternBody::Regex {
                source: source.into(),
                first_bytes: None,
            },
        }
    }

    pub fn regex_with_first_bytes(
        source: impl Into<String>,
        no_case: bool,
        first_bytes: Box<dyn FirstByteSource>,
    ) -> Self {
        Pattern {
            flags: PatternFlags {
                regexp: true,
                no_case,
                ..PatternFlags::default()
            },
            body: PatternBody::Regex {
                source: source.into(),
                first_bytes: Some(first_bytes),
            },
        }
    }
}

/// Stable reference to a pattern handed to `add_pattern`, echoed back in
/// every [`crate::state::MatchDescriptor`] it produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PatternId(pub u32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balanced_alternation_builds_fine() {
        let hex = HexPatternBuilder::new()
            .byte(0x01)
            .or_start()
            .byte(0x02)
            .or_branch()
            .byte(0x03)
            .or_end()
            .byte(0x04)
            .finish();
        assert_eq!(hex.bytes, vec![0x01, 0x02, 0x03, 0x04]);
    }

    #[test]
    #[should_panic(expected = "nested alternations are not supported")]
    fn nested_or_start_panics() {
        HexPatternBuilder::new().or_start().or_start();
    }

    #[test]
    #[should_panic(expected = "or_branch with no open alternation")]
    fn or_branch_without_or_start_panics() {
        HexPatternBuilder::new().byte(0x01).or_branch();
    }

    #[test]
    #[should_panic(expected = "or_end with no matching or_start")]
    fn or_end_without_or_start_panics() {
        HexPatternBuilder::new().byte(0x01).or_end();
    }

    #[test]
    #[should_panic(expected = "finish with an alternation still open")]
    fn finish_with_unclosed_alternation_panics() {
        HexPatternBuilder::new().or_start().byte(0x01).finish();
    }
}
