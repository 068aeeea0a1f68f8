// Criterion benchmarks for rule compilation.
//
// Run:
//   cargo bench -p sauma-rules

use criterion::{Criterion, criterion_group, criterion_main};

use sauma_core::{Symbol, SymbolTable};
use sauma_rules::{
    compile_rule, Direction, MatchStrategy, Net, RuleAction, RuleParts, RuleSpec,
};

fn user_symbols(names: &[&str]) -> Vec<Symbol> {
    let mut table = SymbolTable::new();
    names
        .iter()
        .map(|n| table.intern(n).expect("user symbol"))
        .collect()
}

/// Compile a small contexted rule from scratch each iteration.
fn bench_compile_contexted(c: &mut Criterion) {
    let syms = user_symbols(&["a", "b", "x"]);
    let (a, b, x) = (syms[0], syms[1], syms[2]);
    c.bench_function("compile a->x/_b", |bench| {
        bench.iter(|| {
            compile_rule(
                &RuleSpec {
                    direction: Direction::RightArrow,
                    obligatory: true,
                    strategy: None,
                    epenthesis: false,
                },
                &RuleParts {
                    left: Net::empty_string(),
                    action: RuleAction::Pair {
                        upper: Net::symbol(a),
                        lower: Net::symbol(x),
                    },
                    right: Net::symbol(b),
                },
            )
            .expect("rule compiles")
        })
    });
}

/// Longest-match over a multi-symbol action, the heaviest constraint set.
fn bench_compile_longest(c: &mut Criterion) {
    let syms = user_symbols(&["a", "x"]);
    let (a, x) = (syms[0], syms[1]);
    c.bench_function("compile a+->x longest", |bench| {
        bench.iter(|| {
            compile_rule(
                &RuleSpec {
                    direction: Direction::RightArrow,
                    obligatory: true,
                    strategy: Some(MatchStrategy::Longest),
                    epenthesis: false,
                },
                &RuleParts::bare(RuleAction::Pair {
                    upper: Net::symbol(a).plus(),
                    lower: Net::symbol(x),
                }),
            )
            .expect("rule compiles")
        })
    });
}

/// Run strings through an already-compiled rule.
fn bench_apply(c: &mut Criterion) {
    let syms = user_symbols(&["a", "b", "x"]);
    let (a, b, x) = (syms[0], syms[1], syms[2]);
    let fst = compile_rule(
        &RuleSpec {
            direction: Direction::RightArrow,
            obligatory: true,
            strategy: None,
            epenthesis: false,
        },
        &RuleParts {
            left: Net::empty_string(),
            action: RuleAction::Pair {
                upper: Net::symbol(a),
                lower: Net::symbol(x),
            },
            right: Net::symbol(b),
        },
    )
    .expect("rule compiles");
    let input: Vec<Symbol> = [a, b, a, a, b, b, a].to_vec();
    c.bench_function("apply_down 7 symbols", |bench| {
        bench.iter(|| fst.apply_down(&input, 64))
    });
}

criterion_group!(
    benches,
    bench_compile_contexted,
    bench_compile_longest,
    bench_apply
);
criterion_main!(benches);
