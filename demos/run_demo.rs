//! Builds a small counting program directly in-memory (no grammar front end
//! is wired up yet) and runs it with the direct interpreter.
//!
//! Run this with `cargo run --bin run_demo`.

use std::time::Instant;

use nesa_challenge::ast::builder::*;
use nesa_challenge::ast::BinOp;
use nesa_challenge::reporter::report_compile;
use nesa_challenge::script::Script;

fn main() {
    // Counts up to 3 on the stack, then halts.
    let program = program(vec![
        block(
            "COUNT",
            vec![
                var("n", 0, 3),
                push("X"),
                ifcmp(
                    var_ref("n"),
                    nesa_challenge::ast::Comparator::Lt,
                    num(3),
                    vec![
                        assign("n", binop(var_ref("n"), BinOp::Add, num(1))),
                        goto("COUNT"),
                    ],
                ),
                halt("DONE"),
            ],
        ),
        block("DONE", vec![]),
    ]);

    let start = Instant::now();
    let script = Script::compile(program).expect("demo program is well-formed");
    println!("{}", report_compile(script.nesa(), start.elapsed()));

    let outcome = script.run();
    println!("run() -> {outcome} (cleaned: {})", outcome.cleaned());
}
