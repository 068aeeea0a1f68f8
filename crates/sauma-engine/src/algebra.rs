// Rational operations: union, concatenation, closure, cross product,
// projections and relabeling. All functions build a fresh automaton;
// callers decide when to optimize.

use sauma_core::{EPSILON, OTHER_ID, OTHER_NONID, Symbol};

use crate::compose::compose;
use crate::fst::{Fst, StateId};

/// Copy all states of `src` into `dst`, returning the id offset.
fn splice(dst: &mut Fst, src: &Fst) -> StateId {
    let offset = dst.states.len() as StateId;
    for state in &src.states {
        let s = dst.add_state();
        for a in &state.arcs {
            dst.add_arc(s, a.ilabel, a.olabel, a.target + offset);
        }
        if state.is_final {
            dst.set_final(s);
        }
    }
    offset
}

/// `a | b`.
pub fn union(a: &Fst, b: &Fst) -> Fst {
    let mut out = Fst::empty();
    let start = out.add_state();
    out.start = Some(start);
    for operand in [a, b] {
        if let Some(s) = operand.start {
            let offset = splice(&mut out, operand);
            out.add_arc(start, EPSILON, EPSILON, s + offset);
        }
    }
    out
}

/// `a b`.
pub fn concat(a: &Fst, b: &Fst) -> Fst {
    let (Some(a_start), Some(b_start)) = (a.start, b.start) else {
        return Fst::empty();
    };
    let mut out = Fst::empty();
    let a_off = splice(&mut out, a);
    let b_off = splice(&mut out, b);
    out.start = Some(a_start + a_off);
    // a's finals lose finality and gain an epsilon bridge into b
    for s in 0..a.states.len() as StateId {
        if a.states[s as usize].is_final {
            out.states[(s + a_off) as usize].is_final = false;
            out.add_arc(s + a_off, EPSILON, EPSILON, b_start + b_off);
        }
    }
    out
}

/// `a*`.
pub fn star(a: &Fst) -> Fst {
    let mut out = Fst::empty();
    let start = out.add_state();
    out.set_final(start);
    out.start = Some(start);
    if let Some(s) = a.start {
        let offset = splice(&mut out, a);
        out.add_arc(start, EPSILON, EPSILON, s + offset);
        for i in 0..a.states.len() as StateId {
            if a.states[i as usize].is_final {
                out.states[(i + offset) as usize].is_final = false;
                out.add_arc(i + offset, EPSILON, EPSILON, start);
            }
        }
    }
    out
}

/// `a+`.
pub fn plus(a: &Fst) -> Fst {
    concat(a, &star(a))
}

/// Cross product of two acceptors: `{(u, v) : u in a, v in b}`.
///
/// Built by composing "a with its output erased" against "b with its
/// input erased". Identity wildcards demote to the non-identity half on
/// the surviving tape: pairing breaks the identity reading.
pub fn crossproduct(a: &Fst, b: &Fst) -> Fst {
    let mut upper = a.clone();
    for state in &mut upper.states {
        for arc in &mut state.arcs {
            if arc.ilabel == OTHER_ID {
                arc.ilabel = OTHER_NONID;
            }
            arc.olabel = EPSILON;
        }
    }
    let mut lower = b.clone();
    for state in &mut lower.states {
        for arc in &mut state.arcs {
            if arc.olabel == OTHER_ID {
                arc.olabel = OTHER_NONID;
            }
            arc.ilabel = EPSILON;
        }
    }
    compose(&upper, &lower)
}

/// Keep the input tape, as an acceptor. A lone wildcard half reads as
/// "some symbol outside the alphabet", which projects to the identity
/// wildcard.
pub fn input_project(a: &Fst) -> Fst {
    let mut out = a.clone();
    for state in &mut out.states {
        for arc in &mut state.arcs {
            let l = if arc.ilabel == OTHER_NONID {
                OTHER_ID
            } else {
                arc.ilabel
            };
            arc.ilabel = l;
            arc.olabel = l;
        }
    }
    out
}

/// Keep the output tape, as an acceptor.
pub fn output_project(a: &Fst) -> Fst {
    let mut out = a.clone();
    for state in &mut out.states {
        for arc in &mut state.arcs {
            let l = if arc.olabel == OTHER_NONID {
                OTHER_ID
            } else {
                arc.olabel
            };
            arc.ilabel = l;
            arc.olabel = l;
        }
    }
    out
}

/// Replace every occurrence of label `from` (on either tape) with `to`.
pub fn substitute_label(a: &Fst, from: Symbol, to: Symbol) -> Fst {
    let mut out = a.clone();
    for state in &mut out.states {
        for arc in &mut state.arcs {
            if arc.ilabel == from {
                arc.ilabel = to;
            }
            if arc.olabel == from {
                arc.olabel = to;
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimize::{connect, rm_epsilon};
    use crate::paths::accepted_strings;

    #[test]
    fn union_of_strings() {
        let f = union(&Fst::one_string(&[20]), &Fst::one_string(&[21, 22]));
        let strings = accepted_strings(&f, 10);
        assert_eq!(strings, vec![vec![20], vec![21, 22]]);
    }

    #[test]
    fn concat_of_strings() {
        let f = concat(&Fst::one_string(&[20]), &Fst::one_string(&[21]));
        assert_eq!(accepted_strings(&f, 10), vec![vec![20, 21]]);
    }

    #[test]
    fn concat_with_empty_language_is_empty() {
        let f = concat(&Fst::one_string(&[20]), &Fst::empty());
        assert!(f.is_empty_language());
    }

    #[test]
    fn star_accepts_empty_and_repeats() {
        let f = star(&Fst::one_string(&[20]));
        let strings = accepted_strings(&f, 4);
        assert!(strings.contains(&vec![]));
        assert!(strings.contains(&vec![20, 20]));
    }

    #[test]
    fn plus_rejects_empty() {
        let f = plus(&Fst::one_string(&[20]));
        let strings = accepted_strings(&f, 4);
        assert!(!strings.contains(&vec![]));
        assert!(strings.contains(&vec![20]));
    }

    #[test]
    fn crossproduct_pairs_strings() {
        let f = crossproduct(&Fst::one_string(&[20]), &Fst::one_string(&[21, 22]));
        let f = connect(&rm_epsilon(&f));
        // one path: 20 -> 21 22 in some interleaving
        let ins = accepted_strings(&input_project(&f), 10);
        let outs = accepted_strings(&output_project(&f), 10);
        assert_eq!(ins, vec![vec![20]]);
        assert_eq!(outs, vec![vec![21, 22]]);
    }

    #[test]
    fn substitute_to_epsilon() {
        let f = substitute_label(&Fst::one_string(&[20, 21]), 20, EPSILON);
        let strings = accepted_strings(&rm_epsilon(&f), 10);
        assert_eq!(strings, vec![vec![21]]);
    }
}
