// Boolean operations over acceptors.
//
// Intersection and difference are only meaningful on languages, and only
// after the two operands have been reconciled against each other's
// alphabets; with that done, wildcard labels on both sides denote the
// same residue set and match by plain label equality.

use hashbrown::{HashMap, HashSet};
use sauma_core::{OTHER_ID, Symbol};

use crate::fst::{Fst, StateId};
use crate::optimize::{connect, determinize, rm_epsilon};
use crate::EngineError;

/// `a & b`.
pub fn intersect(a: &Fst, b: &Fst) -> Result<Fst, EngineError> {
    if !a.is_acceptor() || !b.is_acceptor() {
        return Err(EngineError::NotAcceptor);
    }
    let a = rm_epsilon(a);
    let b = rm_epsilon(b);
    Ok(connect(&product(&a, &b)))
}

/// `a - b`.
///
/// `b` is determinized and completed over the union of both label
/// alphabets plus the identity wildcard, so that its complement is exact
/// even for symbols `b` never mentions.
pub fn difference(a: &Fst, b: &Fst) -> Result<Fst, EngineError> {
    if !a.is_acceptor() || !b.is_acceptor() {
        return Err(EngineError::NotAcceptor);
    }
    let a = rm_epsilon(a);
    let mut universe: HashSet<Symbol> = a.labels();
    universe.extend(b.labels());
    universe.insert(OTHER_ID);
    let mut alphabet: Vec<Symbol> = universe.into_iter().collect();
    alphabet.sort_unstable();

    let mut det = determinize(&rm_epsilon(b))?;
    complete(&mut det, &alphabet);
    for state in &mut det.states {
        state.is_final = !state.is_final;
    }
    Ok(connect(&product(&a, &det)))
}

/// Label-equality product of two epsilon-free acceptors.
fn product(a: &Fst, b: &Fst) -> Fst {
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
        for ua in &a.states[sa as usize].arcs {
            for la in &b.states[sb as usize].arcs {
                if ua.ilabel != la.ilabel {
                    continue;
                }
                let pair = (ua.target, la.target);
                let t = *index.entry(pair).or_insert_with(|| {
                    work.push(pair);
                    out.add_state()
                });
                out.add_arc(q, ua.ilabel, ua.ilabel, t);
            }
        }
    }
    out
}

/// Add a non-final sink so every state has an arc for every symbol in
/// `alphabet`. Assumes a deterministic acceptor.
fn complete(f: &mut Fst, alphabet: &[Symbol]) {
    if f.start.is_none() {
        let s = f.add_state();
        f.start = Some(s);
    }
    let sink = f.add_state();
    for s in 0..f.states.len() as StateId {
        let have: HashSet<Symbol> = f.states[s as usize].arcs.iter().map(|a| a.ilabel).collect();
        for &sym in alphabet {
            if !have.contains(&sym) {
                f.add_arc(s, sym, sym, sink);
            }
        }
    }
}
