//! Trie/automaton states: the hybrid dense/sparse transition table, match
//! descriptor lists, and the opaque child iterator the failure-link builder
//! walks.

use crate::arena::{Arena, Id};
use crate::pattern::PatternId;

pub type StateId = Id<State>;
pub type MatchId = Id<MatchDescriptor>;
pub type TransId = Id<TransNode>;

/// States at depth `<= MAX_TABLE_BASED_STATES_DEPTH` get a full 256-entry
/// dense table; deeper states fall back to a sparse linked list. Root and
/// its direct children are dense, since nearly every byte value appears as
/// some pattern's first or second byte in practice, while the trie thins
/// out quickly past that.
pub const MAX_TABLE_BASED_STATES_DEPTH: u32 = 1;

/// One pattern firing at a state, as a node in that state's match list.
/// Built once during failure-link construction by chaining a state's own
/// terminal matches onto whatever its failure state already matches (see
/// `Automaton::create_failure_links`) -- nothing walks the failure chain at
/// scan time.
pub struct MatchDescriptor {
    pub pattern: PatternId,
    pub backtrack: u32,
    pub next: Option<MatchId>,
}

/// One entry of a sparse state's transition list.
pub struct TransNode {
    pub byte: u8,
    pub target: StateId,
    pub next: Option<TransId>,
}

enum Transitions {
    Dense(Box<[Option<StateId>; 256]>),
    Sparse(Option<TransId>),
}

pub struct State {
    pub depth: u32,
    /// Failure link; `None` only for the root itself.
    pub failure: Option<StateId>,
    pub matches: Option<MatchId>,
    transitions: Transitions,
}

impl State {
    pub fn new(depth: u32) -> Self {
        let transitions = if depth <= MAX_TABLE_BASED_STATES_DEPTH {
            Transitions::Dense(Box::new([None; 256]))
        } else {
            Transitions::Sparse(None)
        };
        State {
            depth,
            failure: None,
            matches: None,
            transitions,
        }
    }

    /// Look up the transition on `byte`, if one exists.
    pub fn get_child(&self, trans_arena: &Arena<TransNode>, byte: u8) -> Option<StateId> {
        match &self.transitions {
            Transitions::Dense(table) => table[byte as usize],
            Transitions::Sparse(head) => {
                let mut cur = *head;
                while let Some(id) = cur {
                    let node = trans_arena.get(id);
                    if node.byte == byte {
                        return Some(node.target);
                    }
                    cur = node.next;
                }
                None
            }
        }
    }

    /// Add a transition on `byte` to `target`. Callers are responsible for
    /// checking `get_child` first; this does not deduplicate.
    pub fn set_child(&mut self, trans_arena: &mut Arena<TransNode>, byte: u8, target: StateId) {
        match &mut self.transitions {
            Transitions::Dense(table) => table[byte as usize] = Some(target),
            Transitions::Sparse(head) => {
                let node = trans_arena.alloc(TransNode {
                    byte,
                    target,
                    next: *head,
                });
                *head = Some(node);
            }
        }
    }

    /// Enumerate this state's existing transitions as `(byte, target)`
    /// pairs. Used by the failure-link builder's BFS, which needs the edge
    /// byte for every child to look up the corresponding transition from
    /// the parent's failure state.
    pub fn children<'a>(&'a self, trans_arena: &'a Arena<TransNode>) -> ChildIter<'a> {
        match &self.transitions {
            Transitions::Dense(table) => ChildIter::Dense { table, pos: 0 },
            Transitions::Sparse(head) => ChildIter::Sparse {
                arena: trans_arena,
                cur: *head,
            },
        }
    }
}

pub enum ChildIter<'a> {
    Dense {
        table: &'a [Option<StateId>; 256],
        pos: usize,
    },
    Sparse {
        arena: &'a Arena<TransNode>,
        cur: Option<TransId>,
    },
}

impl<'a> Iterator for ChildIter<'a> {
    type Item = (u8, StateId);

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            ChildIter::Dense { table, pos } => {
                while *pos < 256 {
                    let byte = *pos as u8;
                    *pos += 1;
                    if let Some(target) = table[byte as usize] {
                        return Some((byte, target));
                    }
                }
                None
            }
            ChildIter::Sparse { arena, cur } => {
                let id = (*cur)?;
                let node = arena.get(id);
                *cur = node.next;
                Some((node.byte, node.target))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dense_state_at_shallow_depth() {
        let mut states: Arena<State> = Arena::new();
        let mut trans: Arena<TransNode> = Arena::new();
        let root = states.alloc(State::new(0));
        let child = states.alloc(State::new(1));
        states.get_mut(root).set_child(&mut trans, b'a', child);
        assert_eq!(states.get(root).get_child(&trans, b'a'), Some(child));
        assert_eq!(states.get(root).get_child(&trans, b'b'), None);
    }

    #[test]
    fn sparse_state_past_dense_depth() {
        let mut states: Arena<State> = Arena::new();
        let mut trans: Arena<TransNode> = Arena::new();
        let deep = states.alloc(State::new(MAX_TABLE_BASED_STATES_DEPTH + 1));
        let target = states.alloc(State::new(MAX_TABLE_BASED_STATES_DEPTH + 2));
        states.get_mut(deep).set_child(&mut trans, b'x', target);
        assert_eq!(states.get(deep).get_child(&trans, b'x'), Some(target));
        assert_eq!(states.get(deep).get_child(&trans, b'y'), None);
    }

    #[test]
    fn children_iterator_exposes_edge_bytes() {
        let mut states: Arena<State> = Arena::new();
        let mut trans: Arena<TransNode> = Arena::new();
        let deep = states.alloc(State::new(MAX_TABLE_BASED_STATES_DEPTH + 1));
        let t1 = states.alloc(State::new(MAX_TABLE_BASED_STATES_DEPTH + 2));
        let t2 = states.alloc(State::new(MAX_TABLE_BASED_STATES_DEPTH + 2));
        states.get_mut(deep).set_child(&mut trans, b'a', t1);
        states.get_mut(deep).set_child(&mut trans, b'b', t2);
        let mut seen: Vec<(u8, StateId)> = states.get(deep).children(&trans).collect();
        seen.sort_by_key(|(b, _)| *b);
        assert_eq!(seen, vec![(b'a', t1), (b'b', t2)]);
    }

    #[test]
    fn dense_children_iterator_skips_empty_slots() {
        let mut states: Arena<State> = Arena::new();
        let mut trans: Arena<TransNode> = Arena::new();
        let root = states.alloc(State::new(0));
        let child = states.alloc(State::new(1));
        states.get_mut(root).set_child(&mut trans, b'z', child);
        let seen: Vec<(u8, StateId)> = states.get(root).children(&trans).collect();
        assert_eq!(seen, vec![(b'z', child)]);
    }
}
