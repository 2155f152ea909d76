//! Runtime outcomes. The engine never errors: every terminal condition is one
//! of these closed variants, represented as a typed enum rather than
//! stringly-typed results sprinkled through the codebase.

use std::fmt::Display;

pub const REJECT_INVALID_PUSH: &str = "+REJECT:INVALIDPUSH+";
pub const REJECT_INVALID_MOVE: &str = "+REJECT:INVALIDMOVE+";
pub const DOES_NOT_HALT: &str = "+DOESNOTHALT+";
pub const HALT_VARIABLE_OUTSIDE_BOUNDS_PREFIX: &str = "-halt-variableoutsidebounds";
pub const START_STATE: &str = "+START+";
pub const FIRST_LABEL: &str = "+FIRSTLABEL";

/// A terminal state name, tagged by what kind of halt it represents. The raw
/// state name (before [`clean`]) is always retained since that's what the
/// decider's association-list history and the engine's step loop operate on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Halted by exhausting transitions at a user-reachable label.
    Halted(String),
    RejectInvalidPush,
    RejectInvalidMove,
    /// Only ever produced by [`crate::engine::decide`].
    DoesNotHalt,
}

impl Outcome {
    /// Builds an `Outcome` from a raw terminal state name returned by the
    /// engine's step loop.
    pub fn from_raw_state(state: &str) -> Self {
        match state {
            REJECT_INVALID_PUSH => Outcome::RejectInvalidPush,
            REJECT_INVALID_MOVE => Outcome::RejectInvalidMove,
            DOES_NOT_HALT => Outcome::DoesNotHalt,
            other => Outcome::Halted(other.to_string()),
        }
    }

    /// The user-visible label: everything in a halted state up to (not
    /// including) the first `-`, or the sentinel text itself for rejects and
    /// `+DOESNOTHALT+`.
    pub fn cleaned(&self) -> String {
        match self {
            Outcome::Halted(state) => clean(state),
            Outcome::RejectInvalidPush => REJECT_INVALID_PUSH.to_string(),
            Outcome::RejectInvalidMove => REJECT_INVALID_MOVE.to_string(),
            Outcome::DoesNotHalt => DOES_NOT_HALT.to_string(),
        }
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.cleaned())
    }
}

/// Strips everything from the first `-` onward. `clean(s) == s` when `s`
/// contains no `-`, since `-` is reserved and never appears in a pure user
/// label.
pub fn clean(state: &str) -> String {
    match state.split_once('-') {
        Some((prefix, _)) => prefix.to_string(),
        None => state.to_string(),
    }
}
