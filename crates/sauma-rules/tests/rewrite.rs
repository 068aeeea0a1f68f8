//! End-to-end rule compilation: compile rewrite rules and run strings
//! through the resulting transducers.

use sauma_core::{Marker, Symbol, SymbolTable};
use sauma_rules::{
    compile_rule, Direction, MatchStrategy, Net, RuleAction, RuleParts, RuleSpec,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

struct Letters {
    a: Symbol,
    b: Symbol,
    c: Symbol,
    t: Symbol,
    x: Symbol,
    y: Symbol,
    lb: Symbol,
    rb: Symbol,
}

fn letters() -> Letters {
    let mut table = SymbolTable::new();
    let mut intern = |n: &str| table.intern(n).expect("user symbol");
    Letters {
        a: intern("a"),
        b: intern("b"),
        c: intern("c"),
        t: intern("t"),
        x: intern("x"),
        y: intern("y"),
        lb: intern("["),
        rb: intern("]"),
    }
}

fn spec(direction: Direction, obligatory: bool) -> RuleSpec {
    RuleSpec {
        direction,
        obligatory,
        strategy: None,
        epenthesis: false,
    }
}

fn pair(upper: Net, lower: Net) -> RuleAction {
    RuleAction::Pair { upper, lower }
}

fn down(fst: &Net, input: &[Symbol]) -> Vec<Vec<Symbol>> {
    fst.apply_down(input, 64)
}

// ---------------------------------------------------------------------------
// Contexted rules
// ---------------------------------------------------------------------------

#[test]
fn right_context_gates_the_rewrite() {
    // a -> x / _ b
    let l = letters();
    let fst = compile_rule(
        &spec(Direction::RightArrow, true),
        &RuleParts {
            left: Net::empty_string(),
            action: pair(Net::symbol(l.a), Net::symbol(l.x)),
            right: Net::symbol(l.b),
        },
    )
    .unwrap();
    assert_eq!(down(&fst, &[l.a, l.b]), vec![vec![l.x, l.b]]);
    assert_eq!(down(&fst, &[l.b, l.a]), vec![vec![l.b, l.a]]);
    // only the a before b rewrites
    assert_eq!(down(&fst, &[l.a, l.a, l.b]), vec![vec![l.a, l.x, l.b]]);
}

#[test]
fn left_context_gates_the_rewrite() {
    // a -> x / b _
    let l = letters();
    let fst = compile_rule(
        &spec(Direction::RightArrow, true),
        &RuleParts {
            left: Net::symbol(l.b),
            action: pair(Net::symbol(l.a), Net::symbol(l.x)),
            right: Net::empty_string(),
        },
    )
    .unwrap();
    assert_eq!(down(&fst, &[l.b, l.a]), vec![vec![l.b, l.x]]);
    assert_eq!(down(&fst, &[l.a, l.b]), vec![vec![l.a, l.b]]);
}

#[test]
fn word_boundary_contexts_anchor_at_the_edges() {
    // a -> x / # _ : only word-initial a rewrites
    let l = letters();
    let fst = compile_rule(
        &spec(Direction::RightArrow, true),
        &RuleParts {
            left: Net::marker(Marker::WordBoundary),
            action: pair(Net::symbol(l.a), Net::symbol(l.x)),
            right: Net::empty_string(),
        },
    )
    .unwrap();
    assert_eq!(down(&fst, &[l.a, l.a]), vec![vec![l.x, l.a]]);
    assert_eq!(down(&fst, &[l.b, l.a]), vec![vec![l.b, l.a]]);
}

// ---------------------------------------------------------------------------
// Obligatoriness and arrows
// ---------------------------------------------------------------------------

#[test]
fn optional_rule_yields_both_candidates() {
    let l = letters();
    let fst = compile_rule(
        &spec(Direction::RightArrow, false),
        &RuleParts::bare(pair(Net::symbol(l.a), Net::symbol(l.x))),
    )
    .unwrap();
    let mut expected = vec![vec![l.a], vec![l.x]];
    expected.sort();
    assert_eq!(down(&fst, &[l.a]), expected);
}

#[test]
fn left_arrow_constrains_the_surface_side() {
    // x <- a / _ b : surface ab must come from xb
    let l = letters();
    let fst = compile_rule(
        &spec(Direction::LeftArrow, true),
        &RuleParts {
            left: Net::empty_string(),
            action: pair(Net::symbol(l.x), Net::symbol(l.a)),
            right: Net::symbol(l.b),
        },
    )
    .unwrap();
    assert_eq!(fst.apply_up(&[l.a, l.b], 64), vec![vec![l.x, l.b]]);
    // surface a before anything but b needs no source x
    assert!(fst
        .apply_up(&[l.a, l.a], 64)
        .contains(&vec![l.a, l.a]));
}

#[test]
fn composing_two_rules_chains_their_effects() {
    let l = letters();
    let first = compile_rule(
        &spec(Direction::RightArrow, true),
        &RuleParts::bare(pair(Net::symbol(l.a), Net::symbol(l.b))),
    )
    .unwrap();
    let second = compile_rule(
        &spec(Direction::RightArrow, true),
        &RuleParts::bare(pair(Net::symbol(l.b), Net::symbol(l.c))),
    )
    .unwrap();
    let cascade = first.compose(&second);
    assert_eq!(down(&cascade, &[l.a]), vec![vec![l.c]]);
    assert_eq!(down(&cascade, &[l.t]), vec![vec![l.t]]);
}

// ---------------------------------------------------------------------------
// Match strategies
// ---------------------------------------------------------------------------

#[test]
fn longest_match_takes_the_whole_run() {
    // a+ -> x, longest
    let l = letters();
    let fst = compile_rule(
        &RuleSpec {
            direction: Direction::RightArrow,
            obligatory: true,
            strategy: Some(MatchStrategy::Longest),
            epenthesis: false,
        },
        &RuleParts::bare(pair(Net::symbol(l.a).plus(), Net::symbol(l.x))),
    )
    .unwrap();
    assert_eq!(down(&fst, &[l.a, l.a, l.a]), vec![vec![l.x]]);
    assert_eq!(down(&fst, &[l.a, l.b, l.a]), vec![vec![l.x, l.b, l.x]]);
}

#[test]
fn shortest_match_splits_the_run() {
    let l = letters();
    let fst = compile_rule(
        &RuleSpec {
            direction: Direction::RightArrow,
            obligatory: true,
            strategy: Some(MatchStrategy::Shortest),
            epenthesis: false,
        },
        &RuleParts::bare(pair(Net::symbol(l.a).plus(), Net::symbol(l.x))),
    )
    .unwrap();
    assert_eq!(down(&fst, &[l.a, l.a]), vec![vec![l.x, l.x]]);
}

// ---------------------------------------------------------------------------
// Epenthesis
// ---------------------------------------------------------------------------

#[test]
fn optional_epenthesis_inserts_at_most_once_per_site() {
    // "" -> y / a _ b
    let l = letters();
    let fst = compile_rule(
        &RuleSpec {
            direction: Direction::RightArrow,
            obligatory: false,
            strategy: None,
            epenthesis: true,
        },
        &RuleParts {
            left: Net::symbol(l.a),
            action: pair(Net::empty_string(), Net::symbol(l.y)),
            right: Net::symbol(l.b),
        },
    )
    .unwrap();
    let outputs = down(&fst, &[l.a, l.b]);
    assert!(outputs.contains(&vec![l.a, l.b]));
    assert!(outputs.contains(&vec![l.a, l.y, l.b]));
    assert!(!outputs.contains(&vec![l.a, l.y, l.y, l.b]));
}

#[test]
fn obligatory_epenthesis_forces_the_insertion() {
    // "" -> y / a _ a
    let l = letters();
    let fst = compile_rule(
        &RuleSpec {
            direction: Direction::RightArrow,
            obligatory: true,
            strategy: None,
            epenthesis: true,
        },
        &RuleParts {
            left: Net::symbol(l.a),
            action: pair(Net::empty_string(), Net::symbol(l.y)),
            right: Net::symbol(l.a),
        },
    )
    .unwrap();
    assert_eq!(down(&fst, &[l.a, l.a]), vec![vec![l.a, l.y, l.a]]);
    assert_eq!(down(&fst, &[l.a]), vec![vec![l.a]]);
}

// ---------------------------------------------------------------------------
// Markup
// ---------------------------------------------------------------------------

#[test]
fn markup_rule_brackets_the_word() {
    // (a|c|t)+ -> [ ... ] / # _ #, longest
    let l = letters();
    let word = Net::symbol(l.c)
        .union(&Net::symbol(l.a))
        .union(&Net::symbol(l.t))
        .plus();
    let fst = compile_rule(
        &RuleSpec {
            direction: Direction::RightArrow,
            obligatory: true,
            strategy: Some(MatchStrategy::Longest),
            epenthesis: false,
        },
        &RuleParts {
            left: Net::marker(Marker::WordBoundary),
            action: RuleAction::Markup {
                input: word,
                left: Net::symbol(l.lb),
                right: Net::symbol(l.rb),
            },
            right: Net::marker(Marker::WordBoundary),
        },
    )
    .unwrap();
    assert_eq!(
        down(&fst, &[l.c, l.a, l.t]),
        vec![vec![l.lb, l.c, l.a, l.t, l.rb]]
    );
}

// ---------------------------------------------------------------------------
// Transducer actions
// ---------------------------------------------------------------------------

#[test]
fn relation_action_compiles_like_its_pair() {
    let l = letters();
    let fst = compile_rule(
        &spec(Direction::RightArrow, true),
        &RuleParts::bare(RuleAction::Relation(Net::one_arc(l.a, l.x))),
    )
    .unwrap();
    assert_eq!(down(&fst, &[l.a, l.b]), vec![vec![l.x, l.b]]);
}

#[test]
fn unmatched_input_passes_through_unchanged() {
    let l = letters();
    let fst = compile_rule(
        &spec(Direction::RightArrow, true),
        &RuleParts::bare(pair(Net::symbol(l.a), Net::symbol(l.x))),
    )
    .unwrap();
    // symbols never mentioned by the rule ride the identity wildcard
    assert_eq!(down(&fst, &[l.y, l.t]), vec![vec![l.y, l.t]]);
}
