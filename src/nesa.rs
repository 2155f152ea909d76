//! The non-erasing stack automaton (NESA) data model: states, the stack
//! alphabet, and the deterministic transition relation the compiler produces
//! and the engine (`crate::engine`) consumes.

use hashbrown::HashMap;

pub type StateName = String;
pub type Symbol = String;

/// The implicit symbol read at or beyond the top of the stack.
pub const BLANK: &str = "BLANK";

/// A transition's side effect on the stack/head. `HaltMarker` is never
/// produced by the compiler as a real transition target — `halt`/`goto`
/// targets are simply states with no outgoing transitions rather than a
/// literal effect variant. Kept here so the effect vocabulary stays
/// complete even though this implementation never constructs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Push(Symbol),
    Move(i8),
    HaltMarker,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state_from: StateName,
    pub symbol_read: Symbol,
    pub state_to: StateName,
    pub effect: Effect,
}

/// The compiled automaton: a deterministic mapping from `(state_from,
/// symbol_read)` to a transition target, plus the closed sets of states and
/// alphabet symbols it touches.
#[derive(Debug, Clone)]
pub struct Nesa {
    transitions: HashMap<(StateName, Symbol), (StateName, Effect)>,
    /// All states mentioned as either endpoint of a transition, in first-seen
    /// order. Fixed iteration order is required for transition-table
    /// equality: two tables must compare equal only when every state maps to
    /// the same entry, which needs a stable per-state position.
    states: Vec<StateName>,
    alphabet: Vec<Symbol>,
}

impl Nesa {
    /// Builds a NESA from the compiler's flat transition list.
    ///
    /// # Panics
    /// Panics if two transitions share the same `(state_from, symbol_read)`
    /// key — the automaton is required to be deterministic, and a compiler
    /// that violates this has a bug, not a user-facing error.
    pub fn new(transitions: Vec<Transition>) -> Self {
        let mut map = HashMap::with_capacity(transitions.len());
        let mut states: Vec<StateName> = Vec::new();
        let mut seen_states: hashbrown::HashSet<StateName> = hashbrown::HashSet::new();
        let mut alphabet: Vec<Symbol> = vec![BLANK.to_string()];
        let mut seen_alphabet: hashbrown::HashSet<Symbol> = hashbrown::HashSet::from([BLANK.to_string()]);

        let mut note_state = |states: &mut Vec<StateName>, seen: &mut hashbrown::HashSet<StateName>, s: &StateName| {
            if seen.insert(s.clone()) {
                states.push(s.clone());
            }
        };

        for t in transitions {
            note_state(&mut states, &mut seen_states, &t.state_from);
            note_state(&mut states, &mut seen_states, &t.state_to);
            if seen_alphabet.insert(t.symbol_read.clone()) {
                alphabet.push(t.symbol_read.clone());
            }
            let key = (t.state_from, t.symbol_read);
            let existing = map.insert(key.clone(), (t.state_to, t.effect));
            assert!(
                existing.is_none(),
                "duplicate transition for state {:?} on symbol {:?}: the NESA must be deterministic",
                key.0,
                key.1
            );
        }

        Self {
            transitions: map,
            states,
            alphabet,
        }
    }

    pub fn transition(&self, state: &str, symbol: &str) -> Option<(&StateName, &Effect)> {
        self.transitions
            .get(&(state.to_string(), symbol.to_string()))
            .map(|(to, effect)| (to, effect))
    }

    pub fn states(&self) -> &[StateName] {
        &self.states
    }

    pub fn alphabet(&self) -> &[Symbol] {
        &self.alphabet
    }

    pub fn transition_count(&self) -> usize {
        self.transitions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looks_up_by_state_and_symbol() {
        let nesa = Nesa::new(vec![Transition {
            state_from: "a".into(),
            symbol_read: BLANK.into(),
            state_to: "b".into(),
            effect: Effect::Push("X".into()),
        }]);
        let (to, effect) = nesa.transition("a", BLANK).unwrap();
        assert_eq!(to, "b");
        assert_eq!(effect, &Effect::Push("X".into()));
        assert!(nesa.transition("a", "X").is_none());
    }

    #[test]
    #[should_panic(expected = "deterministic")]
    fn rejects_duplicate_transition_key() {
        Nesa::new(vec![
            Transition {
                state_from: "a".into(),
                symbol_read: BLANK.into(),
                state_to: "b".into(),
                effect: Effect::None,
            },
            Transition {
                state_from: "a".into(),
                symbol_read: BLANK.into(),
                state_to: "c".into(),
                effect: Effect::None,
            },
        ]);
    }
}
