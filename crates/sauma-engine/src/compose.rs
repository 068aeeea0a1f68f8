// Transducer composition.
//
// The joining tapes may carry wildcard labels. After open-world promotion
// (done above this crate) the two operands agree on their explicit
// alphabets, so a wildcard on one joining tape can only denote the same
// residue set as a wildcard on the other; concrete labels match only
// themselves. The identity wildcard survives onto an outer tape only when
// the identity chain runs unbroken through the middle.

use hashbrown::HashMap;
use sauma_core::{EPSILON, OTHER_ID, OTHER_NONID, Symbol};

use crate::fst::{Fst, StateId};

#[inline]
fn is_other(l: Symbol) -> bool {
    l == OTHER_ID || l == OTHER_NONID
}

#[inline]
fn join_match(upper_out: Symbol, lower_in: Symbol) -> bool {
    upper_out == lower_in || (is_other(upper_out) && is_other(lower_in))
}

/// `a .o. b`.
pub fn compose(a: &Fst, b: &Fst) -> Fst {
    let (Some(a_start), Some(b_start)) = (a.start, b.start) else {
        return Fst::empty();
    };
    let mut out = Fst::empty();
    let mut index: HashMap<(StateId, StateId), StateId> = HashMap::new();
    let mut work: Vec<(StateId, StateId)> = Vec::new();

    let start = out.add_state();
    index.insert((a_start, b_start), start);
    work.push((a_start, b_start));
    out.start = Some(start);

    while let Some((sa, sb)) = work.pop() {
        let q = index[&(sa, sb)];
        if a.states[sa as usize].is_final && b.states[sb as usize].is_final {
            out.set_final(q);
        }
        let mut goto = |index: &mut HashMap<(StateId, StateId), StateId>,
                        out: &mut Fst,
                        work: &mut Vec<(StateId, StateId)>,
                        pair: (StateId, StateId)|
         -> StateId {
            *index.entry(pair).or_insert_with(|| {
                work.push(pair);
                out.add_state()
            })
        };

        // upper-only moves: a emits epsilon on its output tape
        for arc in &a.states[sa as usize].arcs {
            if arc.olabel == EPSILON {
                let t = goto(&mut index, &mut out, &mut work, (arc.target, sb));
                out.add_arc(q, arc.ilabel, EPSILON, t);
            }
        }
        // lower-only moves: b reads epsilon on its input tape
        for arc in &b.states[sb as usize].arcs {
            if arc.ilabel == EPSILON {
                let t = goto(&mut index, &mut out, &mut work, (sa, arc.target));
                out.add_arc(q, EPSILON, arc.olabel, t);
            }
        }
        // matched moves
        for ua in &a.states[sa as usize].arcs {
            if ua.olabel == EPSILON {
                continue;
            }
            for la in &b.states[sb as usize].arcs {
                if la.ilabel == EPSILON || !join_match(ua.olabel, la.ilabel) {
                    continue;
                }
                let unbroken = ua.ilabel == OTHER_ID
                    && ua.olabel == OTHER_ID
                    && la.ilabel == OTHER_ID
                    && la.olabel == OTHER_ID;
                let ilabel = if ua.ilabel == OTHER_ID && !unbroken {
                    OTHER_NONID
                } else {
                    ua.ilabel
                };
                let olabel = if la.olabel == OTHER_ID && !unbroken {
                    OTHER_NONID
                } else {
                    la.olabel
                };
                let t = goto(&mut index, &mut out, &mut work, (ua.target, la.target));
                out.add_arc(q, ilabel, olabel, t);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::output_project;
    use crate::optimize::{connect, rm_epsilon};
    use crate::paths::accepted_strings;

    #[test]
    fn compose_rewrites_one_symbol() {
        // 20 -> 21 through an explicit one-arc transducer
        let t = Fst::one_arc(20, 21);
        let f = compose(&Fst::one_string(&[20]), &t);
        let outs = accepted_strings(&output_project(&f), 10);
        assert_eq!(outs, vec![vec![21]]);
    }

    #[test]
    fn compose_threads_identity_wildcard() {
        let f = compose(&Fst::universal_language(), &Fst::universal_language());
        let arcs = &f.states[f.start.unwrap() as usize].arcs;
        assert!(arcs.iter().any(|a| a.ilabel == OTHER_ID && a.olabel == OTHER_ID));
    }

    #[test]
    fn compose_demotes_broken_identity() {
        // ?:? composed with ?:20 cannot keep the identity reading upstream
        let f = compose(&Fst::universal_language(), &Fst::one_arc(OTHER_NONID, 20));
        let arcs = &f.states[f.start.unwrap() as usize].arcs;
        assert!(arcs.iter().any(|a| a.ilabel == OTHER_NONID && a.olabel == 20));
    }

    #[test]
    fn compose_with_epsilon_insertion() {
        // input "20" against a transducer copying 20 and inserting 22;
        // the joining tapes carry explicit labels, promotion being the
        // caller's job at this level
        let ins = Fst::one_arc(EPSILON, 22);
        let t = crate::algebra::concat(&Fst::one_arc(20, 20), &ins);
        let f = compose(&Fst::one_string(&[20]), &t);
        let outs = accepted_strings(&connect(&rm_epsilon(&output_project(&f))), 10);
        assert_eq!(outs, vec![vec![20, 22]]);
    }

    #[test]
    fn compose_disjoint_labels_is_empty() {
        let f = compose(&Fst::one_string(&[20]), &Fst::one_arc(21, 21));
        assert!(f.is_empty_language());
    }
}
