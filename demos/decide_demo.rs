//! Builds a program that never halts and decides it anyway, showing that
//! `decide()` always terminates even though `run()` would spin forever.
//!
//! Run this with `cargo run --bin decide_demo`.

use std::time::Instant;

use nesa_challenge::ast::builder::*;
use nesa_challenge::config::Config;
use nesa_challenge::reporter::report_decide;
use nesa_challenge::script::Script;

fn main() {
    let program = program(vec![
        block("LOOP", vec![goto("ECHO")]),
        block("ECHO", vec![goto("LOOP")]),
    ]);

    let script = Script::compile(program).expect("demo program is well-formed");
    let config = Config::default();

    let start = Instant::now();
    let outcome = script.decide(&config);
    println!("{}", report_decide(&outcome, start.elapsed()));
}
