//! Compiles a small block-structured script language into a non-erasing
//! stack automaton (NESA), then either runs it directly or decides whether
//! it halts.
//!
//! # Glossary
//!
//! - **NESA** — non-erasing stack automaton: finite-state control with a
//!   stack that may grow via push but from which symbols cannot be removed;
//!   head may move up/down over existing cells.
//! - **Valuation** — a tuple of current values for declared variables.
//! - **Possibility / live valuation** — a valuation reachable at a program
//!   point, tracked by the compiler to prune dead (state, variable)
//!   combinations.
//! - **State suffix** — the `-v1-v2-…` appendage encoding a valuation.
//! - **Progress index** — the `-block<n>` position within a block's
//!   statement sequence.
//! - **Transition table** — a snapshot, for a fixed stack, of the
//!   automaton's future behavior keyed by state.
//! - **Clean** — strip everything from the first `-` onward; produces the
//!   user-visible label.

pub mod ast;
pub mod compiler;
pub mod config;
pub mod engine;
pub mod error;
pub mod expression;
pub mod nesa;
pub mod preprocessor;
pub mod reporter;
pub mod script;
pub mod status;
pub mod toml;
pub mod utils;
pub mod valuation;
