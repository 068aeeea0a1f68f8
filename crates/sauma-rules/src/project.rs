// Effective-string views of triple-tape fragments.
//
// `tape2of3` and friends place a literal string on one tape, but the
// *effective* input or output string of a candidate is not literal: hard
// epsilons pad the tapes, and an `ID` on tape 3 stands for a copy of the
// tape-2 symbol. `upper` and `lower` lift a plain language into all the
// triple-tape fragments whose effective input (resp. output) side reads
// a string of it, one union branch per admissible column shape.

use sauma_core::{EPSILON, Marker, OTHER_NONID};
use sauma_engine::OptimizeConfig;

use crate::net::Net;
use crate::rule::Direction;
use crate::tapes::{i_syms, tape2_sig, tape3_sig};
use crate::RuleError;

/// The relation inserting one string of `y`: `0:y`.
fn ins(y: &Net) -> Net {
    Net::empty_string().crossproduct(y)
}

/// The relation inserting one marker symbol.
fn ins_marker(m: Marker) -> Net {
    Net::one_arc(EPSILON, m.sym())
}

/// All triple-tape fragments whose effective input side reads a string
/// of `x`. A column consumes its tape-2 symbol unless that symbol is a
/// hard epsilon, in which case the whole column is inserted for free.
pub fn upper(x: &Net) -> Result<Net, RuleError> {
    let outside = ins_marker(Marker::Outside)
        .concat(&Net::any_symbol())
        .concat(&ins_marker(Marker::Id));
    let consumed = ins(&i_syms())
        .concat(&Net::any_symbol())
        .concat(&ins(&tape3_sig()?));
    let inserted = ins(&i_syms())
        .concat(&ins_marker(Marker::HardEpsilon))
        .concat(&ins(&tape3_sig()?.difference(&Net::marker(Marker::Id))?));
    let columns = outside.union(&consumed).union(&inserted).star();
    Ok(x.compose(&columns)
        .output_project()
        .optimize(&OptimizeConfig::full()))
}

/// All triple-tape fragments whose effective output side reads a string
/// of `x`. The output symbol of a column is its tape-3 symbol, except
/// that `ID` there copies the tape-2 symbol through, and a hard epsilon
/// contributes nothing.
pub fn lower(x: &Net) -> Result<Net, RuleError> {
    let copied_outside = ins_marker(Marker::Outside)
        .concat(&Net::any_symbol())
        .concat(&ins_marker(Marker::Id));
    let rewritten = ins(&i_syms())
        .concat(&ins(&tape2_sig()?))
        .concat(&Net::any_symbol());
    let copied_inside = ins(&i_syms())
        .concat(&Net::any_symbol())
        .concat(&Net::marker(Marker::Id));
    let deleted = ins(&i_syms())
        .concat(&ins(&tape2_sig()?))
        .concat(&ins_marker(Marker::HardEpsilon));
    let columns = copied_outside
        .union(&rewritten)
        .union(&copied_inside)
        .union(&deleted)
        .star();
    Ok(x.compose(&columns)
        .output_project()
        .optimize(&OptimizeConfig::full()))
}

/// The matched side of a rule: a right-arrow rule matches its action and
/// contexts against the input side, a left-arrow rule against the output
/// side.
pub fn side(direction: Direction, x: &Net) -> Result<Net, RuleError> {
    match direction {
        Direction::RightArrow => upper(x),
        Direction::LeftArrow => lower(x),
    }
}

/// Fragments where a string of `x` sits entirely outside any rewritten
/// span, aligned with `O` columns. Both sides read the same string
/// there, so one view serves both directions.
pub fn unrewritten(x: &Net) -> Net {
    let column = ins_marker(Marker::Outside)
        .concat(&Net::any_symbol())
        .concat(&Net::one_arc(EPSILON, OTHER_NONID));
    x.compose(&column.star()).output_project()
}
