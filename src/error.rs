//! Compile-time failures. The engine itself never errors: it only ever
//! returns one of a closed set of outcome strings, handled in
//! [`crate::status`]. Everything here surfaces before a [`crate::nesa::Nesa`]
//! ever exists.

use std::fmt::Display;

/// A fatal failure of compilation: duplicate label, duplicate variable,
/// `init > max`, assignment to an undeclared variable, or a malformed AST
/// shape the external parser should never hand us.
#[derive(Debug, Clone, PartialEq)]
pub enum CompileError {
    DuplicateLabel(String),
    DuplicateVariable(String),
    InitExceedsMaximum {
        name: String,
        initial: i64,
        maximum: i64,
    },
    UndeclaredVariableAssignment(String),
    /// A bare code block or bare label appeared somewhere other than the
    /// first/last top-level position, which normalization does not define a
    /// meaning for. The external parser is expected to never produce this,
    /// but the preprocessor checks it rather than panicking.
    MisplacedBareChild,
    /// The program has no top-level children at all.
    EmptyProgram,
}

impl std::error::Error for CompileError {}

impl Display for CompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompileError::DuplicateLabel(label) => {
                write!(f, "parse error: label '{label}' declared twice")
            }
            CompileError::DuplicateVariable(name) => {
                write!(f, "parse error: variable '{name}' declared twice")
            }
            CompileError::InitExceedsMaximum {
                name,
                initial,
                maximum,
            } => write!(
                f,
                "parse error: variable '{name}' initialised to a larger value than its declared maximum ({initial} > {maximum})"
            ),
            CompileError::UndeclaredVariableAssignment(name) => {
                write!(f, "assignment to nonexistant variable {name}")
            }
            CompileError::MisplacedBareChild => {
                write!(
                    f,
                    "parse error: a bare code block or label appeared where only a labelled block is allowed"
                )
            }
            CompileError::EmptyProgram => write!(f, "parse error: program has no top-level blocks"),
        }
    }
}
