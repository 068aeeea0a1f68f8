// Canonicalization passes: epsilon removal, determinization over the
// encoded pair alphabet, minimization, and trimming.
//
// Determinization and minimization treat each `ilabel:olabel` pair as an
// atomic letter, so they apply to transducers as well as acceptors; the
// result recognizes the same set of label-pair strings, which is enough
// for the callers here (language equivalence, not functionality).

use hashbrown::{HashMap, HashSet};
use sauma_core::{EPSILON, Symbol};

use crate::config::OptimizeConfig;
use crate::fst::{Fst, StateId};
use crate::EngineError;

/// Remove arcs that are epsilon on both tapes. One-sided epsilon arcs are
/// genuine moves and stay.
pub fn rm_epsilon(f: &Fst) -> Fst {
    let Some(start) = f.start else {
        return Fst::empty();
    };
    let n = f.states.len();
    let mut out = Fst::empty();
    for _ in 0..n {
        out.add_state();
    }
    out.start = Some(start);
    for q in 0..n {
        let mut seen = vec![false; n];
        let mut work = vec![q];
        seen[q] = true;
        let mut dedup = HashSet::new();
        while let Some(p) = work.pop() {
            if f.states[p].is_final {
                out.set_final(q as StateId);
            }
            for a in &f.states[p].arcs {
                if a.ilabel == EPSILON && a.olabel == EPSILON {
                    if !seen[a.target as usize] {
                        seen[a.target as usize] = true;
                        work.push(a.target as usize);
                    }
                } else if dedup.insert((a.ilabel, a.olabel, a.target)) {
                    out.add_arc(q as StateId, a.ilabel, a.olabel, a.target);
                }
            }
        }
    }
    out
}

/// Subset construction. Requires an epsilon-free automaton.
pub fn determinize(f: &Fst) -> Result<Fst, EngineError> {
    if !f.is_epsilon_free() {
        return Err(EngineError::NotEpsilonFree);
    }
    Ok(determinize_core(f))
}

fn determinize_core(f: &Fst) -> Fst {
    let Some(start) = f.start else {
        return Fst::empty();
    };
    let mut out = Fst::empty();
    let mut index: HashMap<Vec<StateId>, StateId> = HashMap::new();
    let mut work: Vec<Vec<StateId>> = Vec::new();
    let start_set = vec![start];
    let q0 = out.add_state();
    index.insert(start_set.clone(), q0);
    work.push(start_set);
    out.start = Some(q0);
    while let Some(set) = work.pop() {
        let q = index[&set];
        if set.iter().any(|&s| f.states[s as usize].is_final) {
            out.set_final(q);
        }
        let mut by_label: HashMap<(Symbol, Symbol), Vec<StateId>> = HashMap::new();
        for &s in &set {
            for a in &f.states[s as usize].arcs {
                by_label.entry((a.ilabel, a.olabel)).or_default().push(a.target);
            }
        }
        let mut moves: Vec<_> = by_label.into_iter().collect();
        moves.sort_unstable_by_key(|(label, _)| *label);
        for ((ilabel, olabel), mut targets) in moves {
            targets.sort_unstable();
            targets.dedup();
            let t = *index.entry(targets.clone()).or_insert_with(|| {
                work.push(targets);
                out.add_state()
            });
            out.add_arc(q, ilabel, olabel, t);
        }
    }
    out
}

/// Moore partition refinement. Requires a deterministic automaton.
pub fn minimize(f: &Fst) -> Result<Fst, EngineError> {
    if !f.is_deterministic() {
        return Err(EngineError::NotDeterministic);
    }
    Ok(minimize_core(f))
}

fn minimize_core(f: &Fst) -> Fst {
    let f = connect(f);
    let Some(start) = f.start else {
        return Fst::empty();
    };
    let n = f.states.len();
    // class 0 = non-final, class 1 = final (either may be empty)
    let mut class: Vec<usize> = f.states.iter().map(|s| s.is_final as usize).collect();
    loop {
        // signature: finality plus the class reached under each pair label
        let mut sig_ids: HashMap<(usize, Vec<((Symbol, Symbol), usize)>), usize> = HashMap::new();
        let mut next: Vec<usize> = Vec::with_capacity(n);
        for s in 0..n {
            let mut moves: Vec<((Symbol, Symbol), usize)> = f.states[s]
                .arcs
                .iter()
                .map(|a| ((a.ilabel, a.olabel), class[a.target as usize]))
                .collect();
            moves.sort_unstable();
            let fresh = sig_ids.len();
            next.push(*sig_ids.entry((class[s], moves)).or_insert(fresh));
        }
        if next == class {
            break;
        }
        class = next;
    }
    let classes = class.iter().max().map_or(0, |m| m + 1);
    let mut out = Fst::empty();
    for _ in 0..classes {
        out.add_state();
    }
    out.start = Some(class[start as usize] as StateId);
    let mut done = vec![false; classes];
    for s in 0..n {
        let c = class[s];
        if f.states[s].is_final {
            out.set_final(c as StateId);
        }
        if done[c] {
            continue;
        }
        done[c] = true;
        for a in &f.states[s].arcs {
            out.add_arc(c as StateId, a.ilabel, a.olabel, class[a.target as usize] as StateId);
        }
    }
    out
}

/// Drop states not on some accepting path and renumber the rest.
pub fn connect(f: &Fst) -> Fst {
    let Some(start) = f.start else {
        return Fst::empty();
    };
    let n = f.states.len();
    let mut forward = vec![false; n];
    let mut work = vec![start];
    forward[start as usize] = true;
    while let Some(s) = work.pop() {
        for a in &f.states[s as usize].arcs {
            if !forward[a.target as usize] {
                forward[a.target as usize] = true;
                work.push(a.target);
            }
        }
    }
    let mut reverse: Vec<Vec<StateId>> = vec![Vec::new(); n];
    for (s, state) in f.states.iter().enumerate() {
        for a in &state.arcs {
            reverse[a.target as usize].push(s as StateId);
        }
    }
    let mut backward = vec![false; n];
    let mut work: Vec<StateId> = (0..n as StateId)
        .filter(|&s| f.states[s as usize].is_final)
        .collect();
    for &s in &work {
        backward[s as usize] = true;
    }
    while let Some(s) = work.pop() {
        for &p in &reverse[s as usize] {
            if !backward[p as usize] {
                backward[p as usize] = true;
                work.push(p);
            }
        }
    }
    let mut map: Vec<Option<StateId>> = vec![None; n];
    let mut out = Fst::empty();
    for s in 0..n {
        if forward[s] && backward[s] {
            map[s] = Some(out.add_state());
        }
    }
    let Some(new_start) = map[start as usize] else {
        return Fst::empty();
    };
    out.start = Some(new_start);
    for s in 0..n {
        let Some(q) = map[s] else { continue };
        if f.states[s].is_final {
            out.set_final(q);
        }
        for a in &f.states[s].arcs {
            if let Some(t) = map[a.target as usize] {
                out.add_arc(q, a.ilabel, a.olabel, t);
            }
        }
    }
    out
}

/// Run the configured passes and trim. Each enabled pass pulls in the
/// passes it depends on, so any configuration is safe on any input.
pub fn optimize(f: &Fst, config: &OptimizeConfig) -> Fst {
    let mut f = f.clone();
    if config.rm_epsilon || config.determinize || config.minimize {
        f = rm_epsilon(&f);
    }
    if config.determinize || config.minimize {
        f = determinize_core(&f);
    }
    if config.minimize {
        f = minimize_core(&f);
    }
    connect(&f)
}
