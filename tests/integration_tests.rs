//! End-to-end tests over the public automaton API: insertion, linking, and
//! scanning across all three pattern kinds.

use anchortrie::automaton::create_automaton;
use anchortrie::pattern::{FirstByteSource, HexPatternBuilder, Pattern, PatternFlags};

fn scan(automaton: &anchortrie::Automaton, text: &[u8]) -> Vec<anchortrie::PatternId> {
    let mut state = automaton.root();
    let mut fired = Vec::new();
    for &b in text {
        state = automaton.next_state(state, b);
        fired.extend(automaton.matches_at(state).map(|(p, _)| p));
    }
    fired
}

#[test]
fn ascii_literal_trie_path() {
    // S1
    let mut automaton = create_automaton();
    let (needle, _) = automaton
        .add_pattern(Pattern::text(b"needle".to_vec(), PatternFlags::ascii()))
        .unwrap();
    automaton.create_failure_links().unwrap();

    assert!(scan(&automaton, b"a haystack with a needle in it").contains(&needle));
    assert!(scan(&automaton, b"nothing here").is_empty());
}

#[test]
fn no_case_literal_matches_any_casing() {
    let mut automaton = create_automaton();
    let (pattern_id, _) = automaton
        .add_pattern(Pattern::text(
            b"evil".to_vec(),
            PatternFlags::ascii().no_case(),
        ))
        .unwrap();
    automaton.create_failure_links().unwrap();

    assert!(scan(&automaton, b"EVIL").contains(&pattern_id));
    assert!(scan(&automaton, b"Evil").contains(&pattern_id));
    assert!(scan(&automaton, b"evil").contains(&pattern_id));
}

#[test]
fn hex_pattern_with_wildcard_gap() {
    let hex = HexPatternBuilder::new()
        .bytes(&[0xDE, 0xAD])
        .exact_skip(2)
        .bytes(&[0xBE, 0xEF])
        .finish();
    let mut automaton = create_automaton();
    let (pattern_id, _) = automaton.add_pattern(Pattern::hex(hex)).unwrap();
    automaton.create_failure_links().unwrap();

    let haystack = [0xDE, 0xAD, 0x00, 0x00, 0xBE, 0xEF];
    assert!(scan(&automaton, &haystack).contains(&pattern_id));
}

struct Unbounded;
impl FirstByteSource for Unbounded {
    fn first_bytes(&self) -> Vec<u8> {
        Vec::new()
    }
}

#[test]
fn unanchorable_regex_matches_at_every_position() {
    // S6: a regex with no literal prefix and no bounded first-byte set
    // falls back to a root match, so it's seen as soon as anything scans.
    let mut automaton = create_automaton();
    let (pattern_id, min_len) = automaton
        .add_pattern(Pattern::regex_with_first_bytes(".*", false, Box::new(Unbounded)))
        .unwrap();
    automaton.create_failure_links().unwrap();

    assert_eq!(min_len, 0);
    assert!(scan(&automaton, b"x").contains(&pattern_id));
    assert!(scan(&automaton, b"").is_empty());
}

#[test]
fn regex_with_bounded_first_bytes_anchors_on_each() {
    struct Bytes(Vec<u8>);
    impl FirstByteSource for Bytes {
        fn first_bytes(&self) -> Vec<u8> {
            self.0.clone()
        }
    }

    let mut automaton = create_automaton();
    let (pattern_id, _) = automaton
        .add_pattern(Pattern::regex_with_first_bytes(
            "[ab]c*",
            false,
            Box::new(Bytes(vec![b'a', b'b'])),
        ))
        .unwrap();
    automaton.create_failure_links().unwrap();

    assert!(scan(&automaton, b"za").contains(&pattern_id));
    assert!(scan(&automaton, b"zb").contains(&pattern_id));
    assert!(scan(&automaton, b"zz").is_empty());
}

#[test]
fn many_overlapping_patterns_all_fire() {
    let mut automaton = create_automaton();
    let mut ids = Vec::new();
    for word in ["he", "she", "his", "hers"] {
        let (id, _) = automaton
            .add_pattern(Pattern::text(word.as_bytes().to_vec(), PatternFlags::ascii()))
            .unwrap();
        ids.push((word, id));
    }
    automaton.create_failure_links().unwrap();

    let fired = scan(&automaton, b"ushers");
    for (word, id) in &ids {
        let expect_fired = *word != "his";
        assert_eq!(fired.contains(id), expect_fired, "word = {word}");
    }
}
