// Special-symbol hygiene and the rule finalizer.
//
// Rule parts written with the open-world wildcard would otherwise match
// the encoding's own marker symbols once promotion expands them; the
// cleanup filters weed those out up front. `cleanup_rule` is the other
// end of the pipeline: it collapses the surviving triple strings into
// an ordinary two-tape transducer.

use sauma_core::{EPSILON, Marker, OTHER_NONID};
use sauma_engine::{sync, OptimizeConfig};

use crate::net::Net;
use crate::tapes::i_syms;
use crate::RuleError;

/// Marker symbols that must not leak into a rule's action languages.
fn special_symbols_action() -> Net {
    i_syms()
        .union(&Net::marker(Marker::Outside))
        .union(&Net::marker(Marker::Id))
        .union(&Net::marker(Marker::HardEpsilon))
        .union(&Net::marker(Marker::WordBoundary))
}

/// Marker symbols that must not leak into a rule's contexts. The word
/// boundary stays available: contexts anchor on it.
fn special_symbols_context() -> Net {
    i_syms()
        .union(&Net::marker(Marker::Outside))
        .union(&Net::marker(Marker::Id))
        .union(&Net::marker(Marker::HardEpsilon))
}

/// Bar marker symbols from both sides of an action. Composition rather
/// than intersection, so transducer actions work too.
pub fn cleanup_action(net: &Net) -> Result<Net, RuleError> {
    if !net.has_wildcard() {
        return Ok(net.clone());
    }
    let filter = special_symbols_action().not_contains()?;
    Ok(filter.compose(net).compose(&filter))
}

/// Bar marker symbols from a context language.
pub fn cleanup_context(net: &Net) -> Result<Net, RuleError> {
    if !net.has_wildcard() {
        return Ok(net.clone());
    }
    net.intersect(&special_symbols_context().not_contains()?)
}

/// Strip the framing `O # ID` columns from both ends of a candidate.
fn remove_boundary() -> Net {
    let del = |m: Marker| Net::one_arc(m.sym(), EPSILON);
    del(Marker::Outside)
        .concat(&del(Marker::WordBoundary))
        .concat(&del(Marker::Id))
        .concat(&Net::any_symbol().star())
        .concat(&del(Marker::Outside))
        .concat(&del(Marker::WordBoundary))
        .concat(&del(Marker::Id))
}

/// Turn column triples into pivot-separated symbol pairs: an identity
/// column `m s ID` becomes the bare symbol `s`, any other column
/// `m s t` becomes `s > t`. The pivot marker is inserted fresh, so the
/// input may not already contain it, and a column pairing a hard
/// epsilon with `ID` would be contradictory.
fn preprocess() -> Result<Net, RuleError> {
    let any = Net::any_symbol();
    let column = any.concat(&any).concat(&any);
    let no_hard_id = column
        .star()
        .concat(&any)
        .concat(&Net::marker(Marker::HardEpsilon))
        .concat(&Net::marker(Marker::Id))
        .concat(&any.star())
        .complement()?;
    let no_pivot = Net::marker(Marker::RightAngle).not_contains()?;
    let identity_col = Net::one_arc(OTHER_NONID, EPSILON)
        .concat(&any)
        .concat(&Net::one_arc(Marker::Id.sym(), EPSILON));
    let rewrite_col = Net::one_arc(OTHER_NONID, EPSILON)
        .concat(&any)
        .concat(&Net::one_arc(EPSILON, Marker::RightAngle.sym()))
        .concat(&Net::marker(Marker::Id).symbol_complement()?);
    Ok(no_hard_id
        .compose(&no_pivot)
        .compose(&identity_col.union(&rewrite_col).star()))
}

/// Collapse a language of framed triple strings into a transducer:
/// strip the frame, rewrite columns to pivot-separated pairs, fold each
/// pivot window into a single arc, and erase the marker symbols.
pub fn cleanup_rule(rule: &Net, config: &OptimizeConfig) -> Result<Net, RuleError> {
    let flat = rule
        .compose(&remove_boundary())
        .compose(&preprocess()?)
        .output_project();
    let synced = sync::synchronize_rule(flat.fst())?;
    let mut net = Net::with_carried_alphabet(synced, flat.alphabet());
    for m in [
        Marker::Id,
        Marker::HardEpsilon,
        Marker::Inside,
        Marker::IOpen,
        Marker::IOpenClose,
        Marker::IClose,
        Marker::Outside,
        Marker::WordBoundary,
        Marker::RightAngle,
    ] {
        net = net.substitute_to_epsilon(m.sym());
    }
    Ok(net.optimize(config))
}
