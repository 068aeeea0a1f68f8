// The Net wrapper: an engine automaton plus the bookkeeping that makes
// open-world alphabets sound. Every binary operation promotes both
// operands against each other's alphabet before touching the engine, so
// the two wildcard readings are never conflated.

use std::rc::Rc;

use hashbrown::HashSet;
use sauma_core::{EPSILON, Marker, OTHER_ID, OTHER_NONID, Symbol};
use sauma_engine::paths::accepted_strings;
use sauma_engine::{algebra, boolean, compose, optimize};
use sauma_engine::{Fst, OptimizeConfig};

use crate::RuleError;

/// Provenance of a net's automaton. `Shared` nets belong to a persistent
/// table and are never mutated in place: any operation that would mutate
/// clones the automaton first and re-tags the net `Owned`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Owned,
    Shared,
}

/// A language or relation: an automaton handle, its explicit alphabet,
/// and whether some arc carries the "everything else" wildcard.
///
/// Invariants:
/// - without the wildcard, every arc label is in `alphabet`;
/// - `alphabet` never contains epsilon or the wildcard labels;
/// - binary operations see both operands promoted. A wildcard-carrying
///   result keeps the union of the promoted operand alphabets even for
///   symbols whose explicit arcs did not survive: the wildcard means
///   "anything outside `alphabet`", and letting the alphabet shrink
///   would silently re-admit the very symbols an operation removed
///   (`? - Tape1Sig` must keep excluding the tape-1 markers). Once the
///   wildcard is gone the alphabet collapses to the labels that occur.
#[derive(Debug, Clone)]
pub struct Net {
    fst: Rc<Fst>,
    alphabet: HashSet<Symbol>,
    has_wildcard: bool,
    source: Source,
}

impl Net {
    /// Wrap an automaton, deriving alphabet and wildcard flag from its arcs.
    pub fn from_fst(fst: Fst) -> Net {
        Net::with_carried_alphabet(fst, &HashSet::new())
    }

    /// Wrap an operation result, carrying the operands' alphabet through
    /// when the wildcard survives (see the type-level invariants).
    pub(crate) fn with_carried_alphabet(fst: Fst, carried: &HashSet<Symbol>) -> Net {
        let labels = fst.labels();
        let has_wildcard = labels.contains(&OTHER_ID) || labels.contains(&OTHER_NONID);
        let mut alphabet: HashSet<Symbol> =
            labels.into_iter().filter(|&l| l > OTHER_NONID).collect();
        if has_wildcard {
            alphabet.extend(carried.iter().copied().filter(|&l| l > OTHER_NONID));
        }
        Net {
            fst: Rc::new(fst),
            alphabet,
            has_wildcard,
            source: Source::Owned,
        }
    }

    /// The empty language.
    pub fn empty() -> Net {
        Net::from_fst(Fst::empty())
    }

    /// The language containing only the empty string.
    pub fn empty_string() -> Net {
        Net::from_fst(Fst::empty_string())
    }

    /// The single-symbol language `{s}`.
    pub fn symbol(s: Symbol) -> Net {
        Net::from_fst(Fst::one_arc(s, s))
    }

    /// The single-pair relation `{(i, o)}`.
    pub fn one_arc(ilabel: Symbol, olabel: Symbol) -> Net {
        Net::from_fst(Fst::one_arc(ilabel, olabel))
    }

    /// The single-string language.
    pub fn one_string(symbols: &[Symbol]) -> Net {
        Net::from_fst(Fst::one_string(symbols))
    }

    /// The single-symbol language of an internal marker.
    pub fn marker(m: Marker) -> Net {
        Net::symbol(m.sym())
    }

    /// `?` -- any single symbol, open world.
    pub fn any_symbol() -> Net {
        Net::symbol(OTHER_ID)
    }

    /// `?*` -- every string.
    pub fn universal_language() -> Net {
        Net::from_fst(Fst::universal_language())
    }

    /// Every string pair.
    pub fn universal_relation() -> Net {
        Net::from_fst(Fst::universal_relation())
    }

    /// A second handle to the same automaton, tagged `Shared`; the
    /// original stays untouched by whatever the holder does next.
    pub fn share(&self) -> Net {
        Net {
            fst: Rc::clone(&self.fst),
            alphabet: self.alphabet.clone(),
            has_wildcard: self.has_wildcard,
            source: Source::Shared,
        }
    }

    pub fn fst(&self) -> &Fst {
        &self.fst
    }

    pub fn alphabet(&self) -> &HashSet<Symbol> {
        &self.alphabet
    }

    pub fn has_wildcard(&self) -> bool {
        self.has_wildcard
    }

    pub fn source(&self) -> Source {
        self.source
    }

    pub fn is_empty_language(&self) -> bool {
        self.fst.is_empty_language()
    }

    /// Clone-before-mutate: `Shared` nets and aliased handles get a fresh
    /// automaton, then the exclusive reference is handed out.
    fn fst_mut(&mut self) -> &mut Fst {
        if self.source == Source::Shared {
            self.fst = Rc::new((*self.fst).clone());
            self.source = Source::Owned;
        }
        Rc::make_mut(&mut self.fst)
    }

    /// Expand this net's wildcard arcs to explicitly cover every symbol of
    /// `reference` missing from its own alphabet. No-op without a
    /// wildcard or when nothing is missing. The engine wildcard labels
    /// themselves are never drawn into an expansion; marker symbols are
    /// ordinary alphabet members here and do get expanded over.
    pub fn promote(&mut self, reference: &HashSet<Symbol>) {
        if !self.has_wildcard {
            return;
        }
        let mut missing: Vec<Symbol> = reference
            .iter()
            .copied()
            .filter(|s| *s > OTHER_NONID && !self.alphabet.contains(s))
            .collect();
        if missing.is_empty() {
            return;
        }
        missing.sort_unstable();
        self.fst_mut().expand_other(&missing);
        self.alphabet.extend(missing);
    }

    /// Promote both operands against each other; the returned set is the
    /// union of the promoted alphabets, to be carried into the result.
    fn promoted_pair(a: &Net, b: &Net) -> (Net, Net, HashSet<Symbol>) {
        let mut pa = a.clone();
        let mut pb = b.clone();
        pa.promote(&b.alphabet);
        pb.promote(&a.alphabet);
        let mut carried = pa.alphabet.clone();
        carried.extend(pb.alphabet.iter().copied());
        (pa, pb, carried)
    }

    pub fn union(&self, other: &Net) -> Net {
        let (a, b, carried) = Net::promoted_pair(self, other);
        Net::with_carried_alphabet(algebra::union(a.fst(), b.fst()), &carried)
    }

    pub fn concat(&self, other: &Net) -> Net {
        let (a, b, carried) = Net::promoted_pair(self, other);
        Net::with_carried_alphabet(algebra::concat(a.fst(), b.fst()), &carried)
    }

    pub fn intersect(&self, other: &Net) -> Result<Net, RuleError> {
        let (a, b, carried) = Net::promoted_pair(self, other);
        Ok(Net::with_carried_alphabet(
            boolean::intersect(a.fst(), b.fst())?,
            &carried,
        ))
    }

    pub fn difference(&self, other: &Net) -> Result<Net, RuleError> {
        let (a, b, carried) = Net::promoted_pair(self, other);
        Ok(Net::with_carried_alphabet(
            boolean::difference(a.fst(), b.fst())?,
            &carried,
        ))
    }

    pub fn compose(&self, other: &Net) -> Net {
        let (a, b, carried) = Net::promoted_pair(self, other);
        Net::with_carried_alphabet(compose::compose(a.fst(), b.fst()), &carried)
    }

    /// Cross product of two languages: every string of `self` paired with
    /// every string of `other`.
    pub fn crossproduct(&self, other: &Net) -> Net {
        let (a, b, carried) = Net::promoted_pair(self, other);
        Net::with_carried_alphabet(algebra::crossproduct(a.fst(), b.fst()), &carried)
    }

    pub fn star(&self) -> Net {
        Net::with_carried_alphabet(algebra::star(self.fst()), &self.alphabet)
    }

    pub fn plus(&self) -> Net {
        Net::with_carried_alphabet(algebra::plus(self.fst()), &self.alphabet)
    }

    /// `~x` over the open world: `?* - x`.
    pub fn complement(&self) -> Result<Net, RuleError> {
        Net::universal_language().difference(self)
    }

    /// `\x`: any single symbol not in `x`.
    pub fn symbol_complement(&self) -> Result<Net, RuleError> {
        Net::any_symbol().difference(self)
    }

    /// The language of strings not containing a member of `self` as a
    /// substring: `?* - (?* self ?*)`.
    pub fn not_contains(&self) -> Result<Net, RuleError> {
        let any = Net::universal_language();
        Net::universal_language().difference(&any.concat(self).concat(&any))
    }

    pub fn input_project(&self) -> Net {
        Net::with_carried_alphabet(algebra::input_project(self.fst()), &self.alphabet)
    }

    pub fn output_project(&self) -> Net {
        Net::with_carried_alphabet(algebra::output_project(self.fst()), &self.alphabet)
    }

    /// Replace every occurrence of `sym` with true epsilon, dropping it
    /// from the alphabet.
    pub fn substitute_to_epsilon(&self, sym: Symbol) -> Net {
        if !self.alphabet.contains(&sym) {
            return self.clone();
        }
        let mut carried = self.alphabet.clone();
        carried.remove(&sym);
        Net::with_carried_alphabet(
            algebra::substitute_label(self.fst(), sym, EPSILON),
            &carried,
        )
    }

    pub fn optimize(&self, config: &OptimizeConfig) -> Net {
        Net::with_carried_alphabet(optimize::optimize(self.fst(), config), &self.alphabet)
    }

    /// Run `input` through this transducer and collect the output strings,
    /// bounded by `max_arcs` enumeration steps (insertion-looping rules
    /// make the output side infinite; the bound keeps this total).
    pub fn apply_down(&self, input: &[Symbol], max_arcs: usize) -> Vec<Vec<Symbol>> {
        let outputs = Net::one_string(input).compose(self).output_project();
        accepted_strings(outputs.fst(), max_arcs)
    }

    /// Mirror of [`Net::apply_down`]: collect the input strings this
    /// transducer maps to `output`.
    pub fn apply_up(&self, output: &[Symbol], max_arcs: usize) -> Vec<Vec<Symbol>> {
        let inputs = self.compose(&Net::one_string(output)).input_project();
        accepted_strings(inputs.fst(), max_arcs)
    }
}
