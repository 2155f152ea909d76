//! Translates a normalized AST into a flat list of NESA [`Transition`]s. This
//! is the state-explosion step: every labelled block's statements are
//! unfolded once per live variable valuation, turning bounded-integer control
//! flow into a stateless transition relation.

use crate::ast::{Comparator, Expr, LabelledBlock, Statement};
use crate::error::CompileError;
use crate::expression;
use crate::nesa::{Effect, Nesa, Transition};
use crate::preprocessor::Normalized;
use crate::status::START_STATE;
use crate::valuation::{Valuation, VariableTable};

/// Compiles a normalized program into a [`Nesa`].
pub fn compile(normalized: Normalized) -> Result<Nesa, CompileError> {
    let Normalized {
        blocks,
        variables,
        alphabet,
        ..
    } = normalized;

    let var_names = variables.names();
    let full_possibilities = variables.all_possibilities();
    let first_label = blocks[0].label.clone();

    let mut transitions = Vec::new();
    transitions.push(Transition {
        state_from: START_STATE.to_string(),
        symbol_read: crate::nesa::BLANK.to_string(),
        state_to: format!("{first_label}{}", variables.initial_valuation().suffix()),
        effect: Effect::None,
    });

    for i in 0..blocks.len() {
        let entry_possibilities = full_possibilities.clone();
        #[cfg(feature = "debug_compiler")]
        println!(
            "compiling block '{}' ({} of {}) with {} live valuations",
            blocks[i].label,
            i + 1,
            blocks.len(),
            entry_possibilities.len()
        );
        let (block_transitions, _narrowed, final_n) = compile_labelled_block(
            &blocks[i],
            &alphabet,
            entry_possibilities,
            &var_names,
            &variables,
        )?;
        transitions.extend(block_transitions);

        if i + 1 < blocks.len() {
            let from_label = &blocks[i].label;
            let to_label = &blocks[i + 1].label;
            for ending in state_endings(&full_possibilities) {
                for symbol in &alphabet {
                    transitions.push(Transition {
                        state_from: format!("{from_label}{ending}-block{final_n}"),
                        symbol_read: symbol.clone(),
                        state_to: format!("{to_label}{ending}"),
                        effect: Effect::None,
                    });
                }
            }
        }
    }

    Ok(Nesa::new(transitions))
}

fn state_endings(possibilities: &[Valuation]) -> Vec<String> {
    possibilities.iter().map(Valuation::suffix).collect()
}

/// Compiles one labelled block: its entry transitions (full domain, for every
/// live valuation `p` entering the label `L + suffix(p)`, read any symbol, go
/// to `L + suffix(p) + "-block0"`) followed by its statement body.
fn compile_labelled_block(
    block: &LabelledBlock,
    alphabet: &[String],
    variable_possibilities: Vec<Valuation>,
    var_names: &[String],
    variables: &VariableTable,
) -> Result<(Vec<Transition>, Vec<Valuation>, usize), CompileError> {
    let label = &block.label;
    let mut transitions = Vec::new();
    for ending in state_endings(&variable_possibilities) {
        for symbol in alphabet {
            transitions.push(Transition {
                state_from: format!("{label}{ending}"),
                symbol_read: symbol.clone(),
                state_to: format!("{label}{ending}-block0"),
                effect: Effect::None,
            });
        }
    }

    let (body_transitions, narrowed, final_n) = compile_codeblock(
        &block.statements,
        label,
        alphabet,
        variable_possibilities,
        var_names,
        variables,
        0,
    )?;
    transitions.extend(body_transitions);

    Ok((transitions, narrowed, final_n))
}

/// Compiles one statement sequence within block `label`, starting at progress
/// index `n` with live valuations `variable_possibilities`. Returns the
/// emitted transitions, the (possibly narrowed/rewritten) live valuations
/// after the sequence, and the progress index reached.
#[allow(clippy::too_many_arguments)]
fn compile_codeblock(
    statements: &[Statement],
    label: &str,
    alphabet: &[String],
    mut variable_possibilities: Vec<Valuation>,
    var_names: &[String],
    variables: &VariableTable,
    mut n: usize,
) -> Result<(Vec<Transition>, Vec<Valuation>, usize), CompileError> {
    let mut transitions = Vec::new();

    for statement in statements {
        match statement {
            Statement::Pass => {}

            Statement::Push(symbol) => {
                for ending in state_endings(&variable_possibilities) {
                    for read_symbol in alphabet {
                        transitions.push(Transition {
                            state_from: format!("{label}{ending}-block{n}"),
                            symbol_read: read_symbol.clone(),
                            state_to: format!("{label}{ending}-block{}", n + 1),
                            effect: Effect::Push(symbol.clone()),
                        });
                    }
                }
                n += 1;
            }

            Statement::Move(direction) => {
                let delta: i8 = match direction {
                    crate::ast::MoveDirection::Down => -1,
                    crate::ast::MoveDirection::Up => 1,
                };
                for ending in state_endings(&variable_possibilities) {
                    for read_symbol in alphabet {
                        transitions.push(Transition {
                            state_from: format!("{label}{ending}-block{n}"),
                            symbol_read: read_symbol.clone(),
                            state_to: format!("{label}{ending}-block{}", n + 1),
                            effect: Effect::Move(delta),
                        });
                    }
                }
                n += 1;
            }

            Statement::Halt(target_label) => {
                for ending in state_endings(&variable_possibilities) {
                    for read_symbol in alphabet {
                        transitions.push(Transition {
                            state_from: format!("{label}{ending}-block{n}"),
                            symbol_read: read_symbol.clone(),
                            state_to: format!("{target_label}{ending}-halt"),
                            effect: Effect::None,
                        });
                    }
                }
                // Advanced past a dead state so a trailing halt inside a
                // conditional body still yields a distinct post-body
                // progress index for the parent to chain from.
                n += 1;
            }

            Statement::Goto(target_label) => {
                for ending in state_endings(&variable_possibilities) {
                    for read_symbol in alphabet {
                        transitions.push(Transition {
                            state_from: format!("{label}{ending}-block{n}"),
                            symbol_read: read_symbol.clone(),
                            state_to: format!("{target_label}{ending}"),
                            effect: Effect::None,
                        });
                    }
                }
                n += 1;
            }

            Statement::VarAssignment { name, expr } => {
                let var_index = var_names
                    .iter()
                    .position(|v| v == name)
                    .ok_or_else(|| CompileError::UndeclaredVariableAssignment(name.clone()))?;
                let maximum = variables.maximum(var_index);

                let mut next_possibilities = Vec::with_capacity(variable_possibilities.len());
                for p in &variable_possibilities {
                    let new_val = expression::evaluate(expr, var_names, &p.0);
                    let ending = p.suffix();
                    if new_val < 0 || new_val > maximum {
                        for read_symbol in alphabet {
                            transitions.push(Transition {
                                state_from: format!("{label}{ending}-block{n}"),
                                symbol_read: read_symbol.clone(),
                                state_to: format!(
                                "{label}{}",
                                crate::status::HALT_VARIABLE_OUTSIDE_BOUNDS_PREFIX
                            ),
                                effect: Effect::None,
                            });
                        }
                        // dropped from the live set, not kept
                    } else {
                        let new_possibility = p.with(var_index, new_val);
                        let new_ending = new_possibility.suffix();
                        for read_symbol in alphabet {
                            transitions.push(Transition {
                                state_from: format!("{label}{ending}-block{n}"),
                                symbol_read: read_symbol.clone(),
                                state_to: format!("{label}{new_ending}-block{}", n + 1),
                                effect: Effect::None,
                            });
                        }
                        next_possibilities.push(new_possibility);
                    }
                }
                variable_possibilities = next_possibilities;
                n += 1;
            }

            Statement::IfRead { symbol: read_symbol, body } => {
                let v0 = variable_possibilities.clone();
                for ending in state_endings(&variable_possibilities) {
                    transitions.push(Transition {
                        state_from: format!("{label}{ending}-block{n}"),
                        symbol_read: read_symbol.clone(),
                        state_to: format!("{label}{ending}-block{}", n + 1),
                        effect: Effect::None,
                    });
                }

                let (body_transitions, narrowed, new_n) = compile_codeblock(
                    body,
                    label,
                    alphabet,
                    variable_possibilities,
                    var_names,
                    variables,
                    n + 1,
                )?;

                for ending in state_endings(&v0) {
                    for other_symbol in alphabet {
                        if other_symbol != read_symbol {
                            transitions.push(Transition {
                                state_from: format!("{label}{ending}-block{n}"),
                                symbol_read: other_symbol.clone(),
                                state_to: format!("{label}{ending}-block{new_n}"),
                                effect: Effect::None,
                            });
                        }
                    }
                }
                transitions.extend(body_transitions);
                variable_possibilities = narrowed;
                n = new_n;
            }

            Statement::IfComparison {
                lhs,
                comparator,
                rhs,
                body,
            } => {
                let v0 = variable_possibilities.clone();
                let constrained =
                    constrain_possibilities(&variable_possibilities, var_names, lhs, *comparator, rhs);

                for ending in state_endings(&constrained) {
                    for read_symbol in alphabet {
                        transitions.push(Transition {
                            state_from: format!("{label}{ending}-block{n}"),
                            symbol_read: read_symbol.clone(),
                            state_to: format!("{label}{ending}-block{}", n + 1),
                            effect: Effect::None,
                        });
                    }
                }

                let (body_transitions, narrowed, new_n) = compile_codeblock(
                    body,
                    label,
                    alphabet,
                    constrained.clone(),
                    var_names,
                    variables,
                    n + 1,
                )?;
                transitions.extend(body_transitions);

                let false_branch: Vec<Valuation> = v0
                    .into_iter()
                    .filter(|p| !constrained.contains(p))
                    .collect();
                for ending in state_endings(&false_branch) {
                    for read_symbol in alphabet {
                        transitions.push(Transition {
                            state_from: format!("{label}{ending}-block{n}"),
                            symbol_read: read_symbol.clone(),
                            state_to: format!("{label}{ending}-block{new_n}"),
                            effect: Effect::None,
                        });
                    }
                }

                variable_possibilities = narrowed;
                n = new_n;
            }
        }
    }

    Ok((transitions, variable_possibilities, n))
}

fn constrain_possibilities(
    possibilities: &[Valuation],
    var_names: &[String],
    lhs: &Expr,
    comparator: Comparator,
    rhs: &Expr,
) -> Vec<Valuation> {
    possibilities
        .iter()
        .filter(|p| {
            let a = expression::evaluate(lhs, var_names, &p.0);
            let b = expression::evaluate(rhs, var_names, &p.0);
            expression::compare(comparator, a, b)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::builder::*;
    use crate::ast::MoveDirection;
    use crate::preprocessor::preprocess;

    fn compiled(program: crate::ast::Program) -> Nesa {
        compile(preprocess(program).unwrap()).unwrap()
    }

    #[test]
    fn start_transition_targets_first_label_with_initial_valuation() {
        let program = program(vec![block(
            "MAIN",
            vec![var("x", 0, 2), halt("MAIN")],
        )]);
        let nesa = compiled(program);
        let (to, effect) = nesa.transition(START_STATE, crate::nesa::BLANK).unwrap();
        assert_eq!(to, "MAIN-0");
        assert_eq!(effect, &Effect::None);
    }

    #[test]
    fn every_live_state_symbol_pair_has_exactly_one_transition() {
        let program = program(vec![
            block("A", vec![push("X"), mv(MoveDirection::Down), goto("B")]),
            block("B", vec![halt("B")]),
        ]);
        let nesa = compiled(program);
        for symbol in nesa.alphabet() {
            assert!(nesa.transition("A", symbol).is_some());
            assert!(nesa.transition("A-block0", symbol).is_some());
            assert!(nesa.transition("B", symbol).is_some());
        }
    }

    #[test]
    fn out_of_bounds_assignment_routes_to_sentinel() {
        let program = program(vec![block(
            "A",
            vec![var("x", 0, 0), assign("x", binop(var_ref("x"), crate::ast::BinOp::Add, num(1)))],
        )]);
        let nesa = compiled(program);
        for symbol in nesa.alphabet() {
            let (to, _) = nesa.transition("A-0-block0", symbol).unwrap();
            assert_eq!(to, "A-halt-variableoutsidebounds");
        }
    }

    #[test]
    fn assignment_at_exactly_maximum_is_legal() {
        let program = program(vec![block(
            "A",
            vec![var("x", 1, 2), assign("x", binop(var_ref("x"), crate::ast::BinOp::Add, num(1))), halt("A")],
        )]);
        let nesa = compiled(program);
        for symbol in nesa.alphabet() {
            let (to, _) = nesa.transition("A-1-block0", symbol).unwrap();
            assert_eq!(to, "A-2-block1");
        }
    }

    #[test]
    fn rejects_assignment_to_undeclared_variable() {
        let program = program(vec![block("A", vec![assign("y", num(1))])]);
        let result = compile(preprocess(program).unwrap());
        assert!(matches!(
            result,
            Err(CompileError::UndeclaredVariableAssignment(_))
        ));
    }

    #[test]
    fn halt_and_goto_are_distinguishable() {
        let program = program(vec![
            block("A", vec![goto("B")]),
            block("B", vec![halt("B")]),
        ]);
        let nesa = compiled(program);
        // goto routes to the live entry, which still has outgoing transitions
        let (goto_target, _) = nesa.transition("A-block0", crate::nesa::BLANK).unwrap();
        assert_eq!(goto_target, "B");
        assert!(nesa.transition(goto_target, crate::nesa::BLANK).is_some());
        // halt routes to a `-halt` sink with no outgoing transitions
        assert!(nesa.transition("B-halt", crate::nesa::BLANK).is_none());
    }
}
