// Bounded path enumeration. The workhorse behind `apply` and behind most
// of the test suite: automata are compared by the finite slice of their
// behavior up to a path-length bound.

use sauma_core::{EPSILON, Symbol};

use crate::fst::{Fst, StateId};
use crate::optimize::rm_epsilon;

/// Every accepting path of at most `max_arcs` arcs, as an (input, output)
/// string pair with epsilons dropped. Sorted and deduplicated.
///
/// Double-epsilon arcs are removed up front, so cyclic automata terminate:
/// every remaining arc consumes budget.
pub fn paths(f: &Fst, max_arcs: usize) -> Vec<(Vec<Symbol>, Vec<Symbol>)> {
    let f = rm_epsilon(f);
    let mut out = Vec::new();
    let Some(start) = f.start else {
        return out;
    };
    let mut input = Vec::new();
    let mut output = Vec::new();
    walk(&f, start, max_arcs, &mut input, &mut output, &mut out);
    out.sort_unstable();
    out.dedup();
    out
}

fn walk(
    f: &Fst,
    state: StateId,
    budget: usize,
    input: &mut Vec<Symbol>,
    output: &mut Vec<Symbol>,
    out: &mut Vec<(Vec<Symbol>, Vec<Symbol>)>,
) {
    if f.states[state as usize].is_final {
        out.push((input.clone(), output.clone()));
    }
    if budget == 0 {
        return;
    }
    for a in &f.states[state as usize].arcs {
        if a.ilabel != EPSILON {
            input.push(a.ilabel);
        }
        if a.olabel != EPSILON {
            output.push(a.olabel);
        }
        walk(f, a.target, budget - 1, input, output, out);
        if a.ilabel != EPSILON {
            input.pop();
        }
        if a.olabel != EPSILON {
            output.pop();
        }
    }
}

/// Every string of at most `max_arcs` symbols accepted on the input tape.
/// Meaningful on acceptors; on relations it enumerates the input side.
pub fn accepted_strings(f: &Fst, max_arcs: usize) -> Vec<Vec<Symbol>> {
    let mut strings: Vec<Vec<Symbol>> = paths(f, max_arcs)
        .into_iter()
        .map(|(input, _)| input)
        .collect();
    strings.sort_unstable();
    strings.dedup();
    strings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::star;

    #[test]
    fn paths_of_a_relation() {
        let f = Fst::one_arc(20, 21);
        assert_eq!(paths(&f, 5), vec![(vec![20], vec![21])]);
    }

    #[test]
    fn cyclic_enumeration_is_bounded() {
        let f = star(&Fst::one_string(&[20]));
        let strings = accepted_strings(&f, 3);
        assert_eq!(strings, vec![vec![], vec![20], vec![20, 20], vec![20, 20, 20]]);
    }

    #[test]
    fn one_sided_epsilon_counts_against_the_budget() {
        let f = star(&Fst::one_arc(EPSILON, 21));
        let ps = paths(&f, 2);
        assert!(ps.contains(&(vec![], vec![21, 21])));
        assert!(!ps.contains(&(vec![], vec![21, 21, 21])));
    }

    #[test]
    fn empty_language_has_no_paths() {
        assert!(paths(&Fst::empty(), 5).is_empty());
    }
}
