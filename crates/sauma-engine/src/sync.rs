// Rule-alignment primitives.
//
// A rule center is first flattened into a one-tape acceptor where every
// arc pair `i:o` becomes the two-symbol sequence `i o`, with the hard
// epsilon marker standing in for a silent tape. The rule preprocessor
// then inserts pivot markers between each upper symbol and the lower
// symbol it rewrites to, and `synchronize_rule` folds every
// `u > v` window back into a single `u:v` transducer arc.

use sauma_core::{EPSILON, Marker};

use crate::fst::{Fst, StateId};
use crate::optimize::{connect, rm_epsilon};
use crate::EngineError;

/// Split every arc `i:o` into the acceptor sequence `i' o'`, where a
/// silent tape becomes the hard epsilon marker. Structural double-epsilon
/// arcs are kept untouched.
pub fn flatten_for_rule(f: &Fst) -> Fst {
    let hard = Marker::HardEpsilon.sym();
    let mut out = Fst::empty();
    for _ in &f.states {
        out.add_state();
    }
    out.start = f.start;
    for (q, state) in f.states.iter().enumerate() {
        if state.is_final {
            out.set_final(q as StateId);
        }
        for a in &state.arcs {
            if a.ilabel == EPSILON && a.olabel == EPSILON {
                out.add_arc(q as StateId, EPSILON, EPSILON, a.target);
                continue;
            }
            let i = if a.ilabel == EPSILON { hard } else { a.ilabel };
            let o = if a.olabel == EPSILON { hard } else { a.olabel };
            let mid = out.add_state();
            out.add_arc(q as StateId, i, i, mid);
            out.add_arc(mid, o, o, a.target);
        }
    }
    out
}

/// Fold every `u > v` window of a flat, pivot-annotated acceptor back
/// into a transducer arc `u:v`, mapping the hard epsilon marker to true
/// epsilon on its tape. Symbols not adjacent to a pivot stay as identity
/// arcs. Malformed pivot structure is an author error in the fragment
/// being compiled, not a recoverable condition.
pub fn synchronize_rule(f: &Fst) -> Result<Fst, EngineError> {
    let pivot = Marker::RightAngle.sym();
    let hard = Marker::HardEpsilon.sym();
    let f = rm_epsilon(f);
    if !f.is_acceptor() {
        return Err(EngineError::NotAcceptor);
    }
    let Some(start) = f.start else {
        return Ok(Fst::empty());
    };
    if f.states[start as usize].arcs.iter().any(|a| a.ilabel == pivot) {
        return Err(EngineError::Unsynchronizable("pivot at the start of a fragment"));
    }
    // states entered through a pivot hold the tail half of a window; their
    // outgoing symbols are consumed by the fold at the window head and must
    // not be re-read as fresh identity columns
    let mut in_window = vec![false; f.states.len()];
    for state in &f.states {
        for a in &state.arcs {
            if a.ilabel == pivot {
                in_window[a.target as usize] = true;
            }
        }
    }
    let mut out = Fst::empty();
    for _ in &f.states {
        out.add_state();
    }
    out.start = Some(start);
    for (q, state) in f.states.iter().enumerate() {
        if state.is_final {
            out.set_final(q as StateId);
        }
        for a in &state.arcs {
            let u = a.ilabel;
            if u == pivot {
                continue;
            }
            let r = a.target;
            let rs = &f.states[r as usize];
            for pa in &rs.arcs {
                if pa.ilabel != pivot {
                    continue;
                }
                let ss = &f.states[pa.target as usize];
                if ss.is_final {
                    return Err(EngineError::Unsynchronizable("pivot with no following symbol"));
                }
                for va in &ss.arcs {
                    let v = va.ilabel;
                    if v == pivot {
                        return Err(EngineError::Unsynchronizable("adjacent pivots"));
                    }
                    let iu = if u == hard { EPSILON } else { u };
                    let ov = if v == hard { EPSILON } else { v };
                    out.add_arc(q as StateId, iu, ov, va.target);
                }
            }
            // a continuation that bypasses every pivot keeps the symbol on
            // both tapes; hard epsilon may only occur inside a window
            if !in_window[q] && (rs.is_final || rs.arcs.iter().any(|x| x.ilabel != pivot)) {
                if u == hard {
                    return Err(EngineError::Unsynchronizable("padding outside a rewrite window"));
                }
                out.add_arc(q as StateId, u, u, r);
            }
        }
    }
    Ok(connect(&out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::paths;

    const PIVOT: sauma_core::Symbol = Marker::RightAngle.sym();
    const HARD: sauma_core::Symbol = Marker::HardEpsilon.sym();

    #[test]
    fn flatten_splits_relation_arcs() {
        let f = flatten_for_rule(&Fst::one_arc(20, 21));
        assert_eq!(paths(&f, 5), vec![(vec![20, 21], vec![20, 21])]);
    }

    #[test]
    fn flatten_pads_silent_tapes() {
        let f = flatten_for_rule(&Fst::one_arc(20, EPSILON));
        assert_eq!(paths(&f, 5), vec![(vec![20, HARD], vec![20, HARD])]);
    }

    #[test]
    fn synchronize_pairs_across_pivot() {
        let f = synchronize_rule(&Fst::one_string(&[20, PIVOT, 21])).unwrap();
        assert_eq!(paths(&f, 5), vec![(vec![20], vec![21])]);
    }

    #[test]
    fn synchronize_maps_padding_to_epsilon() {
        let f = synchronize_rule(&Fst::one_string(&[HARD, PIVOT, 21])).unwrap();
        assert_eq!(paths(&f, 5), vec![(vec![], vec![21])]);
    }

    #[test]
    fn synchronize_keeps_unpivoted_symbols_as_identity() {
        let f = synchronize_rule(&Fst::one_string(&[20, 21])).unwrap();
        assert_eq!(paths(&f, 5), vec![(vec![20, 21], vec![20, 21])]);
    }

    #[test]
    fn synchronize_folds_padded_window_tails() {
        // two adjacent windows where the second pads its lower tape:
        // 20 > 21 then 22 > 0 folds to 20:21 22:0
        let f = synchronize_rule(&Fst::one_string(&[20, PIVOT, 21, 22, PIVOT, HARD])).unwrap();
        assert_eq!(paths(&f, 5), vec![(vec![20, 22], vec![21])]);
    }

    #[test]
    fn synchronize_rejects_leading_pivot() {
        assert!(matches!(
            synchronize_rule(&Fst::one_string(&[PIVOT, 20])),
            Err(EngineError::Unsynchronizable(_))
        ));
    }

    #[test]
    fn synchronize_rejects_trailing_pivot() {
        assert!(matches!(
            synchronize_rule(&Fst::one_string(&[20, PIVOT])),
            Err(EngineError::Unsynchronizable(_))
        ));
    }

    #[test]
    fn synchronize_rejects_adjacent_pivots() {
        assert!(matches!(
            synchronize_rule(&Fst::one_string(&[20, PIVOT, PIVOT, 21])),
            Err(EngineError::Unsynchronizable(_))
        ));
    }

    #[test]
    fn synchronize_rejects_bare_padding() {
        assert!(matches!(
            synchronize_rule(&Fst::one_string(&[HARD, 21])),
            Err(EngineError::Unsynchronizable(_))
        ));
    }
}
