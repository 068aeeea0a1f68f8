// The automaton value type.
//
// States live in a dense vector; state 0 is not special, the start state
// is explicit. An automaton with `start == None` denotes the empty
// language. Acceptors are transducers whose arcs all carry equal labels.

use hashbrown::HashSet;
use sauma_core::{EPSILON, OTHER_ID, OTHER_NONID, Symbol};

/// Index of a state inside an [`Fst`].
pub type StateId = u32;

/// One transition: an input label, an output label and a target state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arc {
    pub ilabel: Symbol,
    pub olabel: Symbol,
    pub target: StateId,
}

/// One state: its outgoing arcs and its finality.
#[derive(Debug, Clone, Default)]
pub struct State {
    pub arcs: Vec<Arc>,
    pub is_final: bool,
}

/// An unweighted finite-state transducer (or acceptor).
#[derive(Debug, Clone, Default)]
pub struct Fst {
    pub states: Vec<State>,
    pub start: Option<StateId>,
}

impl Fst {
    /// The empty language: no states, no start.
    pub fn empty() -> Self {
        Fst::default()
    }

    /// The language containing only the empty string.
    pub fn empty_string() -> Self {
        let mut f = Fst::empty();
        let s = f.add_state();
        f.set_final(s);
        f.start = Some(s);
        f
    }

    /// A start state, a final state, and one arc labeled `ilabel:olabel`.
    pub fn one_arc(ilabel: Symbol, olabel: Symbol) -> Self {
        let mut f = Fst::empty();
        let s = f.add_state();
        let t = f.add_state();
        f.add_arc(s, ilabel, olabel, t);
        f.set_final(t);
        f.start = Some(s);
        f
    }

    /// The identity acceptor of a single string of symbols.
    pub fn one_string(symbols: &[Symbol]) -> Self {
        let mut f = Fst::empty();
        let mut cur = f.add_state();
        f.start = Some(cur);
        for &sym in symbols {
            let next = f.add_state();
            f.add_arc(cur, sym, sym, next);
            cur = next;
        }
        f.set_final(cur);
        f
    }

    /// `?*` -- every string over the open-world alphabet.
    pub fn universal_language() -> Self {
        let mut f = Fst::empty();
        let s = f.add_state();
        f.set_final(s);
        f.add_arc(s, OTHER_ID, OTHER_ID, s);
        f.start = Some(s);
        f
    }

    /// `[?:? | ?:0 | 0:? | ?:?']*` -- every string pair.
    pub fn universal_relation() -> Self {
        let mut f = Fst::empty();
        let s = f.add_state();
        f.set_final(s);
        f.add_arc(s, OTHER_ID, OTHER_ID, s);
        f.add_arc(s, OTHER_NONID, OTHER_NONID, s);
        f.add_arc(s, OTHER_NONID, EPSILON, s);
        f.add_arc(s, EPSILON, OTHER_NONID, s);
        f.start = Some(s);
        f
    }

    pub fn add_state(&mut self) -> StateId {
        self.states.push(State::default());
        (self.states.len() - 1) as StateId
    }

    pub fn add_arc(&mut self, from: StateId, ilabel: Symbol, olabel: Symbol, target: StateId) {
        self.states[from as usize].arcs.push(Arc {
            ilabel,
            olabel,
            target,
        });
    }

    pub fn set_final(&mut self, state: StateId) {
        self.states[state as usize].is_final = true;
    }

    /// True if every arc carries equal labels (denotes a language).
    pub fn is_acceptor(&self) -> bool {
        self.states
            .iter()
            .flat_map(|s| &s.arcs)
            .all(|a| a.ilabel == a.olabel)
    }

    /// True if no arc is epsilon on both tapes.
    pub fn is_epsilon_free(&self) -> bool {
        !self
            .states
            .iter()
            .flat_map(|s| &s.arcs)
            .any(|a| a.ilabel == EPSILON && a.olabel == EPSILON)
    }

    /// True if no state has an epsilon arc or two arcs with the same
    /// label pair.
    pub fn is_deterministic(&self) -> bool {
        if !self.is_epsilon_free() {
            return false;
        }
        let mut seen = HashSet::new();
        for s in &self.states {
            seen.clear();
            for a in &s.arcs {
                if !seen.insert((a.ilabel, a.olabel)) {
                    return false;
                }
            }
        }
        true
    }

    /// True if some cycle is reachable from the start state.
    pub fn is_cyclic(&self) -> bool {
        let Some(start) = self.start else {
            return false;
        };
        // Iterative DFS with a three-color marking.
        const WHITE: u8 = 0;
        const GRAY: u8 = 1;
        const BLACK: u8 = 2;
        let mut color = vec![WHITE; self.states.len()];
        let mut stack: Vec<(StateId, usize)> = vec![(start, 0)];
        color[start as usize] = GRAY;
        while let Some(&mut (state, ref mut next)) = stack.last_mut() {
            let arcs = &self.states[state as usize].arcs;
            if *next < arcs.len() {
                let target = arcs[*next].target;
                *next += 1;
                match color[target as usize] {
                    GRAY => return true,
                    WHITE => {
                        color[target as usize] = GRAY;
                        stack.push((target, 0));
                    }
                    _ => {}
                }
            } else {
                color[state as usize] = BLACK;
                stack.pop();
            }
        }
        false
    }

    /// True if no final state is reachable from the start.
    pub fn is_empty_language(&self) -> bool {
        let Some(start) = self.start else {
            return true;
        };
        let mut seen = vec![false; self.states.len()];
        let mut work = vec![start];
        seen[start as usize] = true;
        while let Some(s) = work.pop() {
            if self.states[s as usize].is_final {
                return false;
            }
            for a in &self.states[s as usize].arcs {
                if !seen[a.target as usize] {
                    seen[a.target as usize] = true;
                    work.push(a.target);
                }
            }
        }
        true
    }

    /// Every non-epsilon label occurring on any arc, wildcards included.
    pub fn labels(&self) -> HashSet<Symbol> {
        let mut out = HashSet::new();
        for s in &self.states {
            for a in &s.arcs {
                if a.ilabel != EPSILON {
                    out.insert(a.ilabel);
                }
                if a.olabel != EPSILON {
                    out.insert(a.olabel);
                }
            }
        }
        out
    }

    /// Expand every wildcard arc with one parallel arc per symbol in
    /// `missing`, preserving source and target.
    ///
    /// `?:?` expands to the identity pair `m:m`; a `OTHER_NONID` half
    /// expands on its own tape only, and the paired-nonidentity arc
    /// `OTHER_NONID:OTHER_NONID` expands to every non-equal pair. The
    /// wildcard arcs themselves are kept: after expansion they denote the
    /// symbols still outside the grown alphabet.
    pub fn expand_other(&mut self, missing: &[Symbol]) {
        if missing.is_empty() {
            return;
        }
        for state in &mut self.states {
            let mut added = Vec::new();
            for arc in &state.arcs {
                match (arc.ilabel, arc.olabel) {
                    (OTHER_ID, OTHER_ID) => {
                        for &m in missing {
                            added.push(Arc {
                                ilabel: m,
                                olabel: m,
                                target: arc.target,
                            });
                        }
                    }
                    (OTHER_NONID, OTHER_NONID) => {
                        for &m in missing {
                            added.push(Arc {
                                ilabel: m,
                                olabel: OTHER_NONID,
                                target: arc.target,
                            });
                            added.push(Arc {
                                ilabel: OTHER_NONID,
                                olabel: m,
                                target: arc.target,
                            });
                            for &n in missing {
                                if m != n {
                                    added.push(Arc {
                                        ilabel: m,
                                        olabel: n,
                                        target: arc.target,
                                    });
                                }
                            }
                        }
                    }
                    (OTHER_NONID, o) => {
                        for &m in missing {
                            added.push(Arc {
                                ilabel: m,
                                olabel: o,
                                target: arc.target,
                            });
                        }
                    }
                    (i, OTHER_NONID) => {
                        for &m in missing {
                            added.push(Arc {
                                ilabel: i,
                                olabel: m,
                                target: arc.target,
                            });
                        }
                    }
                    _ => {}
                }
            }
            state.arcs.extend(added);
        }
    }
}
