#![allow(dead_code)]

use criterion::{criterion_group, criterion_main, Criterion};
use std::time::Duration;

use nesa_challenge::ast::builder::*;
use nesa_challenge::ast::{BinOp, Program};
use nesa_challenge::compiler::compile;
use nesa_challenge::config::Config;
use nesa_challenge::engine::{decide, run};
use nesa_challenge::preprocessor::preprocess;

const WARM_UP_TIME_MS: u64 = 500;

criterion_group!(
    benches,
    benchmark_compile_small,
    benchmark_compile_with_variables,
    benchmark_run_halting_program,
    benchmark_decide_non_halting_program,
);
criterion_main!(benches);

/// A handful of chained blocks with no variables: exercises pure
/// state-explosion-free compilation.
fn program_small() -> Program {
    program(vec![
        block("A", vec![push("X"), goto("B")]),
        block("B", vec![push("Y"), goto("C")]),
        block("C", vec![halt("C")]),
    ])
}

/// A block carrying a handful of bounded variables, to exercise the
/// Cartesian-product state explosion.
fn program_with_variables() -> Program {
    program(vec![block(
        "A",
        vec![
            var("x", 0, 9),
            var("y", 0, 9),
            push("X"),
            assign("x", binop(var_ref("x"), BinOp::Add, num(1))),
            halt("A"),
        ],
    )])
}

/// Bounces between two labels forever: never halts, exercising the
/// decider's cycle-detection path without ever growing the stack.
fn program_non_halting() -> Program {
    program(vec![
        block("LOOP", vec![goto("ECHO")]),
        block("ECHO", vec![goto("LOOP")]),
    ])
}

fn benchmark_compile_small(c: &mut Criterion) {
    let mut group = c.benchmark_group("Bench Compile Small Program");
    group.warm_up_time(Duration::from_millis(WARM_UP_TIME_MS));
    group.sample_size(50);
    group.bench_function("compile chained blocks", |b| {
        b.iter(|| compile(preprocess(program_small()).unwrap()).unwrap())
    });
    group.finish();
}

fn benchmark_compile_with_variables(c: &mut Criterion) {
    let mut group = c.benchmark_group("Bench Compile Variable State Explosion");
    group.warm_up_time(Duration::from_millis(WARM_UP_TIME_MS));
    group.sample_size(50);
    group.bench_function("compile 100-valuation block", |b| {
        b.iter(|| compile(preprocess(program_with_variables()).unwrap()).unwrap())
    });
    group.finish();
}

fn benchmark_run_halting_program(c: &mut Criterion) {
    let nesa = compile(preprocess(program_small()).unwrap()).unwrap();
    let mut group = c.benchmark_group("Bench Direct Run");
    group.warm_up_time(Duration::from_millis(WARM_UP_TIME_MS));
    group.sample_size(50);
    group.bench_function("run halting program", |b| b.iter(|| run(&nesa)));
    group.finish();
}

fn benchmark_decide_non_halting_program(c: &mut Criterion) {
    let nesa = compile(preprocess(program_non_halting()).unwrap()).unwrap();
    let config = Config::builder().log_decider_estimate(false).build();
    let mut group = c.benchmark_group("Bench Decider Table History");
    group.warm_up_time(Duration::from_millis(WARM_UP_TIME_MS));
    group.sample_size(50);
    group.bench_function("decide non-halting program", |b| {
        b.iter(|| decide(&nesa, &config))
    });
    group.finish();
}
