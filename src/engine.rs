//! The NESA engine: a direct interpreter ([`run`]) and a terminating decider
//! ([`decide`]) based on transition-table equivalence: walk forward, stop the
//! instant a (state, transition table) pair repeats.

use hashbrown::HashMap;

use crate::config::Config;
use crate::nesa::{Effect, Nesa, StateName, Symbol, BLANK};
use crate::status::{Outcome, REJECT_INVALID_MOVE, START_STATE};

/// Runs the automaton directly from the empty stack until it halts or
/// rejects. **May not terminate** — a non-halting program loops forever here
/// by design. Callers that need a termination guarantee want [`decide`]
/// instead.
pub fn run(nesa: &Nesa) -> Outcome {
    let mut state: StateName = START_STATE.to_string();
    let mut stack: Vec<Symbol> = Vec::new();
    let mut pointer: usize = 0;

    loop {
        let read: Symbol = if pointer < stack.len() {
            stack[pointer].clone()
        } else {
            BLANK.to_string()
        };

        let (state_to, effect) = match nesa.transition(&state, &read) {
            Some((to, effect)) => (to.clone(), effect.clone()),
            None => return Outcome::from_raw_state(&state),
        };
        state = state_to;

        match effect {
            Effect::Push(symbol) => {
                if pointer == stack.len() {
                    stack.push(symbol);
                    pointer += 1;
                } else {
                    return Outcome::RejectInvalidPush;
                }
            }
            Effect::Move(delta) => {
                let shifted = pointer as i64 + delta as i64;
                if shifted < 0 || shifted as usize > stack.len() {
                    return Outcome::RejectInvalidMove;
                }
                pointer = shifted as usize;
            }
            Effect::None | Effect::HaltMarker => {}
        }
    }
}

/// One summarized outcome for a single state, at a fixed stack contents: the
/// state the automaton would eventually reach from here, and whether that
/// represents a halt (as opposed to the head having moved on upward, still
/// running).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct TableEntry {
    state_to: StateName,
    halt: bool,
}

/// A transition table: one [`TableEntry`] per automaton state, in the fixed
/// order established by [`Nesa::states`]. Two tables are equal exactly when
/// their entries are equal position-for-position, which is what makes the
/// stacks they summarize indistinguishable to the automaton.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct TransitionTable(Vec<TableEntry>);

/// Maps a state name to its fixed position in `Nesa::states()`, so every
/// `TransitionTable` can be a plain aligned `Vec` instead of a map.
struct StateIndex(HashMap<StateName, usize>);

impl StateIndex {
    fn new(states: &[StateName]) -> Self {
        Self(
            states
                .iter()
                .enumerate()
                .map(|(i, s)| (s.clone(), i))
                .collect(),
        )
    }

    fn position(&self, state: &str) -> usize {
        *self
            .0
            .get(state)
            .unwrap_or_else(|| panic!("state {state} never registered with the NESA"))
    }
}

impl TransitionTable {
    fn get(&self, idx: &StateIndex, state: &str) -> &TableEntry {
        &self.0[idx.position(state)]
    }
}

/// The empty-stack table: every state maps to a halting
/// `+REJECT:INVALIDMOVE+`, since a `move(-1)` off an empty stack rejects.
fn first_transition_table(nesa: &Nesa) -> TransitionTable {
    TransitionTable(
        nesa.states()
            .iter()
            .map(|_| TableEntry {
                state_to: REJECT_INVALID_MOVE.to_string(),
                halt: true,
            })
            .collect(),
    )
}

/// Simulates a bounded local run starting at `(state, new_symbol)`, resolving
/// any `move(-1)` against `prev_table` (the table for the stack cell below
/// the one we're computing for). Bounded by `|States| + 1` iterations: an
/// unresolved loop within this single cell means a stack cell can itself
/// never finish deciding, i.e. `+DOESNOTHALT+`.
fn get_eventual_transition(
    nesa: &Nesa,
    idx: &StateIndex,
    state: &str,
    prev_table: &TransitionTable,
    new_symbol: &str,
) -> TableEntry {
    let mut current = state.to_string();
    let bound = nesa.states().len() + 1;

    for _ in 0..bound {
        let (to, effect) = match nesa.transition(&current, new_symbol) {
            Some(pair) => pair,
            None => {
                return TableEntry {
                    state_to: current,
                    halt: true,
                }
            }
        };
        current = to.clone();

        match effect {
            Effect::Push(_) => {
                return TableEntry {
                    state_to: crate::status::REJECT_INVALID_PUSH.to_string(),
                    halt: true,
                }
            }
            Effect::Move(delta) if delta == 1 => {
                return TableEntry {
                    state_to: current,
                    halt: false,
                }
            }
            Effect::Move(delta) if delta == -1 => {
                let prev_entry = prev_table.get(idx, &current);
                if prev_entry.halt {
                    return TableEntry {
                        state_to: prev_entry.state_to.clone(),
                        halt: true,
                    };
                }
                current = prev_entry.state_to.clone();
            }
            Effect::Move(delta) => {
                unreachable!("compiler only ever emits move(+1)/move(-1), got move({delta})")
            }
            Effect::None | Effect::HaltMarker => {}
        }
    }

    TableEntry {
        state_to: crate::status::DOES_NOT_HALT.to_string(),
        halt: true,
    }
}

fn make_transition_table(
    nesa: &Nesa,
    idx: &StateIndex,
    prev_table: &TransitionTable,
    new_symbol: &str,
) -> TransitionTable {
    TransitionTable(
        nesa.states()
            .iter()
            .map(|s| get_eventual_transition(nesa, idx, s, prev_table, new_symbol))
            .collect(),
    )
}

/// Decides whether `nesa` halts on the empty input, terminating in all
/// cases. Either returns a halting [`Outcome`] (exactly matching what [`run`]
/// would eventually return, if [`run`] would ever return), or
/// `Outcome::DoesNotHalt`.
///
/// Grounded on Hopcroft & Ullman, "Nonerasing Stack Automata", JCSS 1(1967),
/// §5 Thm 1: equal transition tables make two stack contents indistinguishable
/// to the automaton, and there are finitely many distinct tables over a
/// finite state set, so an infinite non-looping run must eventually repeat a
/// (state, table) pair.
pub fn decide(nesa: &Nesa, config: &Config) -> Outcome {
    let idx = StateIndex::new(nesa.states());

    if config.log_decider_estimate() {
        log_worst_case_estimate(nesa.states().len());
    }

    let mut current_table = first_transition_table(nesa);
    let mut history: HashMap<TransitionTable, Vec<StateName>> =
        HashMap::with_capacity(config.decider_history_initial_capacity());
    history.insert(current_table.clone(), Vec::new());

    let mut state: StateName = START_STATE.to_string();

    loop {
        let (state_to, effect) = match nesa.transition(&state, BLANK) {
            Some((to, effect)) => (to.clone(), effect.clone()),
            None => return Outcome::from_raw_state(&state),
        };
        state = state_to;

        if let Effect::Push(symbol) = &effect {
            current_table = make_transition_table(nesa, &idx, &current_table, symbol);
            #[cfg(feature = "debug_decider")]
            println!(
                "decide: pushed '{symbol}', now tracking {} distinct transition tables",
                history.len()
            );
            history.entry(current_table.clone()).or_default();
        }

        match effect {
            Effect::Push(_) => {}
            Effect::Move(delta) if delta == 1 => return Outcome::RejectInvalidMove,
            Effect::Move(delta) if delta == -1 => {
                let entry = current_table.get(&idx, &state);
                if entry.halt {
                    return Outcome::from_raw_state(&entry.state_to);
                }
                state = entry.state_to.clone();
            }
            Effect::Move(delta) => {
                unreachable!("compiler only ever emits move(+1)/move(-1), got move({delta})")
            }
            Effect::None | Effect::HaltMarker => {}
        }

        let visited = history
            .get_mut(&current_table)
            .expect("current table always inserted into history before this point");
        if visited.contains(&state) {
            return Outcome::DoesNotHalt;
        }
        visited.push(state.clone());
    }
}

#[cfg(feature = "decider_timer_info")]
fn log_worst_case_estimate(n_states: usize) {
    use num_format::ToFormattedString;
    let n = n_states as u128;
    let estimate = n * n * 2;
    println!(
        "decide: may have to run through {} tables in the worst case",
        estimate.to_formatted_string(&num_format::Locale::en)
    );
}

#[cfg(not(feature = "decider_timer_info"))]
fn log_worst_case_estimate(_n_states: usize) {}
