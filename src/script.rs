//! [`Script`]: the top-level handle a caller compiles once and then runs or
//! decides against — compile up front, keep the compiled automaton around,
//! expose `run`/`decide` as thin convenience wrappers that return the
//! cleaned, user-facing label.

use crate::ast::Program;
use crate::compiler::compile;
use crate::config::Config;
use crate::engine;
use crate::error::CompileError;
use crate::nesa::Nesa;
use crate::preprocessor::preprocess;
use crate::status::Outcome;

/// A compiled script, ready to run or decide. Holds no reference to the AST
/// it was built from — once compiled, a [`Script`] is just its [`Nesa`].
#[derive(Debug, Clone)]
pub struct Script {
    nesa: Nesa,
}

impl Script {
    /// Preprocesses and compiles `program` into a [`Script`]. Fails exactly
    /// when [`crate::preprocessor::preprocess`] or [`crate::compiler::compile`]
    /// would.
    pub fn compile(program: Program) -> Result<Script, CompileError> {
        let normalized = preprocess(program)?;
        let nesa = compile(normalized)?;
        Ok(Script { nesa })
    }

    /// Runs the compiled automaton directly. May not terminate; see
    /// [`crate::engine::run`].
    pub fn run(&self) -> Outcome {
        engine::run(&self.nesa)
    }

    /// Decides whether the compiled automaton halts, always terminating; see
    /// [`crate::engine::decide`].
    pub fn decide(&self, config: &Config) -> Outcome {
        engine::decide(&self.nesa, config)
    }

    /// Decides using [`Config::default`].
    pub fn decide_default(&self) -> Outcome {
        self.decide(&Config::default())
    }

    pub fn nesa(&self) -> &Nesa {
        &self.nesa
    }
}
