//! Normalizes a raw [`crate::ast::Program`] and extracts its variable table,
//! label set, and stack alphabet in a single traversal.

use crate::ast::{LabelledBlock, Program, Statement, TopLevel};
use crate::error::CompileError;
use crate::status::FIRST_LABEL;
use crate::valuation::VariableTable;

/// The result of preprocessing: a program guaranteed to start and end with a
/// labelled block and contain no variable declarations, plus the metadata the
/// compiler needs.
#[derive(Debug, Clone)]
pub struct Normalized {
    pub blocks: Vec<LabelledBlock>,
    pub variables: VariableTable,
    pub labels: Vec<String>,
    /// Alphabet in first-seen order. `BLANK` is always present, prepended.
    pub alphabet: Vec<String>,
}

/// Normalizes boundaries, then collects labels/variables/alphabet in one
/// traversal over the (already boundary-normalized) block list.
pub fn preprocess(program: Program) -> Result<Normalized, CompileError> {
    let blocks = normalize_boundaries(program)?;

    let mut variables = VariableTable::new();
    let mut labels: Vec<String> = Vec::new();
    let mut alphabet: Vec<String> = vec!["BLANK".to_string()];

    let mut stripped_blocks = Vec::with_capacity(blocks.len());
    for block in blocks {
        if labels.contains(&block.label) {
            return Err(CompileError::DuplicateLabel(block.label.clone()));
        }
        labels.push(block.label.clone());
        let statements = collect_and_strip(block.statements, &mut variables, &mut alphabet)?;
        stripped_blocks.push(LabelledBlock {
            label: block.label,
            statements,
        });
    }

    Ok(Normalized {
        blocks: stripped_blocks,
        variables,
        labels,
        alphabet,
    })
}

/// Applies the two boundary normalization rules and rejects any other bare
/// top-level child as malformed.
fn normalize_boundaries(program: Program) -> Result<Vec<LabelledBlock>, CompileError> {
    let n = program.children.len();
    if n == 0 {
        return Err(CompileError::EmptyProgram);
    }

    let mut blocks = Vec::with_capacity(n);
    for (i, child) in program.children.into_iter().enumerate() {
        let is_first = i == 0;
        let is_last = i == n - 1;
        match child {
            TopLevel::Labelled(block) => blocks.push(block),
            TopLevel::Bare(statements) if is_first => blocks.push(LabelledBlock {
                label: FIRST_LABEL.to_string(),
                statements,
            }),
            TopLevel::BareLabel(label) if is_last => blocks.push(LabelledBlock {
                label,
                statements: vec![],
            }),
            _ => return Err(CompileError::MisplacedBareChild),
        }
    }
    Ok(blocks)
}

/// Recursively strips variable declarations out of a statement list (they're
/// hoisted into `variables`) and records every push/ifread symbol into
/// `alphabet`, descending into conditional bodies rather than stopping at the
/// top level of each block.
fn collect_and_strip(
    statements: Vec<Statement>,
    variables: &mut VariableTable,
    alphabet: &mut Vec<String>,
) -> Result<Vec<Statement>, CompileError> {
    let mut out = Vec::with_capacity(statements.len());
    for statement in statements {
        match statement {
            Statement::VarDeclaration(decl) => {
                variables.declare(decl.name, decl.initial, decl.maximum)?;
                // Discarded: variable declarations never reach the compiler.
            }
            Statement::Push(symbol) => {
                note_symbol(alphabet, &symbol);
                out.push(Statement::Push(symbol));
            }
            Statement::IfRead { symbol, body } => {
                note_symbol(alphabet, &symbol);
                let body = collect_and_strip(body, variables, alphabet)?;
                out.push(Statement::IfRead { symbol, body });
            }
            Statement::IfComparison {
                lhs,
                comparator,
                rhs,
                body,
            } => {
                let body = collect_and_strip(body, variables, alphabet)?;
                out.push(Statement::IfComparison {
                    lhs,
                    comparator,
                    rhs,
                    body,
                });
            }
            other => out.push(other),
        }
    }
    Ok(out)
}

fn note_symbol(alphabet: &mut Vec<String>, symbol: &str) {
    if !alphabet.iter().any(|s| s == symbol) {
        alphabet.push(symbol.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::builder::*;
    use crate::ast::{MoveDirection, TopLevel};

    #[test]
    fn wraps_bare_leading_block_with_synthetic_label() {
        let program = program_raw(vec![
            TopLevel::Bare(vec![push("X")]),
            TopLevel::Labelled(block("END", vec![])),
        ]);
        let normalized = preprocess(program).unwrap();
        assert_eq!(normalized.blocks[0].label, FIRST_LABEL);
        assert_eq!(normalized.labels, vec![FIRST_LABEL.to_string(), "END".to_string()]);
    }

    #[test]
    fn extends_bare_trailing_label_with_empty_body() {
        let program = program_raw(vec![
            TopLevel::Labelled(block("START", vec![push("X")])),
            TopLevel::BareLabel("END".to_string()),
        ]);
        let normalized = preprocess(program).unwrap();
        assert_eq!(normalized.blocks.last().unwrap().label, "END");
        assert!(normalized.blocks.last().unwrap().statements.is_empty());
    }

    #[test]
    fn collects_variables_alphabet_and_labels() {
        let program = program(vec![block(
            "MAIN",
            vec![
                var("x", 0, 3),
                push("A"),
                mv(MoveDirection::Down),
                ifread("B", vec![push("C")]),
                halt("MAIN"),
            ],
        )]);
        let normalized = preprocess(program).unwrap();
        assert_eq!(normalized.variables.names(), vec!["x".to_string()]);
        assert_eq!(normalized.labels, vec!["MAIN".to_string()]);
        assert_eq!(
            normalized.alphabet,
            vec!["BLANK".to_string(), "A".to_string(), "B".to_string(), "C".to_string()]
        );
        // the var declaration statement itself is gone
        assert!(normalized.blocks[0]
            .statements
            .iter()
            .all(|s| !matches!(s, Statement::VarDeclaration(_))));
    }

    #[test]
    fn rejects_duplicate_label() {
        let program = program(vec![block("A", vec![]), block("A", vec![])]);
        assert!(matches!(
            preprocess(program),
            Err(CompileError::DuplicateLabel(_))
        ));
    }

    #[test]
    fn rejects_duplicate_variable_anywhere_in_tree() {
        let program = program(vec![block(
            "A",
            vec![var("x", 0, 1), ifread("S", vec![var("x", 0, 1)])],
        )]);
        assert!(matches!(
            preprocess(program),
            Err(CompileError::DuplicateVariable(_))
        ));
    }

    #[test]
    fn idempotent_on_already_normalized_trees() {
        let program = program(vec![
            block("A", vec![push("X")]),
            block("B", vec![]),
        ]);
        let first = preprocess(program).unwrap();
        let reassembled = crate::ast::builder::program(first.blocks.clone());
        let second = preprocess(reassembled).unwrap();
        assert_eq!(first.blocks, second.blocks);
        assert_eq!(first.labels, second.labels);
        assert_eq!(first.alphabet, second.alphabet);
    }
}
