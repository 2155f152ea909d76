//! Integration tests for the five seed scenarios that any compliant
//! implementation of this script language must decide correctly. Since the
//! grammar front end is an external collaborator, programs are built
//! in-memory via `ast::builder` rather than parsed from `.nedsa` source text.

use nesa_challenge::ast::builder::*;
use nesa_challenge::ast::MoveDirection;
use nesa_challenge::config::Config;
use nesa_challenge::script::Script;
use nesa_challenge::status::Outcome;

/// Pushes once, then oscillates `move DOWN` / `move UP` forever without ever
/// pushing again: loops back to the same finite-state configuration on an
/// unchanging stack.
#[test]
fn testloop_does_not_halt() {
    let program = program(vec![
        block("SETUP", vec![push("X"), goto("ECHO")]),
        block(
            "ECHO",
            vec![
                mv(MoveDirection::Down),
                mv(MoveDirection::Up),
                goto("ECHO"),
            ],
        ),
    ]);
    let script = Script::compile(program).unwrap();
    assert_eq!(script.decide_default(), Outcome::DoesNotHalt);
}

/// Pushes the same symbol forever without any `move`, growing the stack
/// without bound but never revisiting a finite-state configuration.
#[test]
fn testgrow_does_not_halt() {
    let program = program(vec![block("GROW", vec![push("X"), goto("GROW")])]);
    let script = Script::compile(program).unwrap();
    assert_eq!(script.decide_default(), Outcome::DoesNotHalt);
}

/// A minimal program with just a leading bare code block and a trailing bare
/// label, exercising both boundary normalizations at once.
fn start_end_label_program() -> nesa_challenge::ast::Program {
    program_raw(vec![
        nesa_challenge::ast::TopLevel::Bare(vec![push("X"), goto("SUCCESS")]),
        nesa_challenge::ast::TopLevel::BareLabel("SUCCESS".to_string()),
    ])
}

#[test]
fn teststartendlabel_halts_at_trailing_label() {
    let script = Script::compile(start_end_label_program()).unwrap();
    assert_eq!(script.decide_default().cleaned(), "SUCCESS");
}

/// Exercises `move DOWN` immediately followed by `move UP`, gated behind an
/// `ifread` on the symbol just pushed.
#[test]
fn testmove_halts_at_success() {
    let program = program(vec![block(
        "A",
        vec![
            push("X"),
            mv(MoveDirection::Down),
            ifread("X", vec![mv(MoveDirection::Up)]),
            halt("SUCCESS"),
        ],
    )]);
    let script = Script::compile(program).unwrap();
    assert_eq!(script.decide_default().cleaned(), "SUCCESS");
}

/// `run()` and `decide()` must agree on any program that actually halts.
#[test]
fn run_and_decide_agree_on_teststartendlabel() {
    let script = Script::compile(start_end_label_program()).unwrap();
    assert_eq!(script.run().cleaned(), script.decide_default().cleaned());
}

#[test]
fn decider_history_capacity_is_configurable_without_changing_the_outcome() {
    let script = Script::compile(start_end_label_program()).unwrap();
    let config = Config::builder()
        .decider_history_initial_capacity(1)
        .log_decider_estimate(false)
        .build();
    assert_eq!(script.decide(&config).cleaned(), "SUCCESS");
}
