// Triple-tape lifting, alignment, and the delimited action span.
//
// Two- and three-tape languages are encoded as flat strings of aligned
// columns: the triple string `O a ID O b ID` has `O O` on tape 1, `a b`
// on tape 2 and `ID ID` on tape 3. Lifting a plain language onto one
// tape composes it with a filler relation that inserts unconstrained
// symbols on the remaining tapes.

use sauma_core::{EPSILON, Marker, OTHER_NONID};
use sauma_engine::sync;

use crate::net::Net;
use crate::rule::Direction;
use crate::RuleError;

/// Tape-1 symbols that can open a rewritten span.
pub fn i_open() -> Net {
    Net::marker(Marker::IOpen).union(&Net::marker(Marker::IOpenClose))
}

/// Tape-1 symbols that can close a rewritten span.
pub fn i_close() -> Net {
    Net::marker(Marker::IClose).union(&Net::marker(Marker::IOpenClose))
}

/// All I-markers.
pub fn i_syms() -> Net {
    Net::marker(Marker::Inside)
        .union(&Net::marker(Marker::IOpen))
        .union(&Net::marker(Marker::IClose))
        .union(&Net::marker(Marker::IOpenClose))
}

/// Everything that can appear on tape 1: `O` or an I-marker.
pub fn tape1_sig() -> Net {
    Net::marker(Marker::Outside).union(&i_syms())
}

/// Everything that can appear on tape 2: any symbol that is not a tape-1
/// marker and not `ID` (which lives on tape 3 only).
pub fn tape2_sig() -> Result<Net, RuleError> {
    Net::any_symbol()
        .difference(&tape1_sig())?
        .difference(&Net::marker(Marker::Id))
}

/// Everything that can appear on tape 3.
pub fn tape3_sig() -> Result<Net, RuleError> {
    Net::any_symbol().difference(&tape1_sig())
}

fn pad() -> Net {
    Net::one_arc(EPSILON, OTHER_NONID)
}

/// Lift a language onto tape 1 of a triple: `[x .o. [? 0:? 0:?]*].l`.
pub fn tape1of3(x: &Net) -> Net {
    let filler = Net::any_symbol().concat(&pad()).concat(&pad()).star();
    x.compose(&filler).output_project()
}

/// Lift a language onto tape 2 of a triple.
pub fn tape2of3(x: &Net) -> Net {
    let filler = pad().concat(&Net::any_symbol()).concat(&pad()).star();
    x.compose(&filler).output_project()
}

/// Lift a language onto tape 3 of a triple.
pub fn tape3of3(x: &Net) -> Net {
    let filler = pad().concat(&pad()).concat(&Net::any_symbol()).star();
    x.compose(&filler).output_project()
}

/// Lift a flat two-tape language onto tapes 2 and 3 (tape 1 free).
pub fn tape23of3(x: &Net) -> Net {
    let filler = pad()
        .concat(&Net::any_symbol())
        .concat(&Net::any_symbol())
        .star();
    x.compose(&filler).output_project()
}

/// Lift a language onto tape 1 of a pair: `[x .o. [? 0:?]*].l`.
pub fn tape1of2(x: &Net) -> Net {
    let filler = Net::any_symbol().concat(&pad()).star();
    x.compose(&filler).output_project()
}

/// Lift a language onto tape 2 of a pair.
pub fn tape2of2(x: &Net) -> Net {
    let filler = pad().concat(&Net::any_symbol()).star();
    x.compose(&filler).output_project()
}

/// `base` with symbols of `fluff` freely interspersed.
pub fn ignore(base: &Net, fluff: &Net) -> Net {
    let inserter = Net::any_symbol()
        .star()
        .concat(&Net::empty_string().crossproduct(fluff).star())
        .star();
    base.compose(&inserter).output_project()
}

/// Pad `x` and `y` with trailing hard epsilons to equal column count,
/// forbidding the column where both tapes are hard epsilon at once.
fn align2(x: &Net, y: &Net) -> Result<Net, RuleError> {
    let hard = Net::marker(Marker::HardEpsilon);
    let any = Net::any_symbol().star();
    let no_double_hard = any
        .concat(&hard)
        .concat(&hard)
        .concat(&any)
        .complement()?;
    tape1of2(&x.concat(&hard.star()))
        .intersect(&tape2of2(&y.concat(&hard.star())))?
        .intersect(&no_double_hard)
}

fn marker_col(m: Marker) -> Net {
    Net::marker(m)
        .concat(&Net::any_symbol())
        .concat(&Net::any_symbol())
}

/// The admissible tape-1 bracketings of an action span: one multi-column
/// run, one single-column span, or nothing at all (empty action).
fn bracket_shape() -> Net {
    marker_col(Marker::IOpen)
        .concat(&marker_col(Marker::Inside).star())
        .concat(&marker_col(Marker::IClose))
        .union(&marker_col(Marker::IOpenClose))
        .union(&Net::empty_string())
}

fn delimit(pair: &Net) -> Result<Net, RuleError> {
    tape1of3(&i_syms().star())
        .intersect(&tape23of3(pair))?
        .intersect(&bracket_shape())
}

/// The action span of `x -> y`: `x` and `y` aligned column by column on
/// tapes 2 and 3, bracketed by I-markers on tape 1.
///
/// `cross(a, bc)` is the triple string `I[ a b I] 0 c`, in columns:
/// tape 1 `I[ I]`, tape 2 `a 0`, tape 3 `b c`.
pub fn cross(x: &Net, y: &Net) -> Result<Net, RuleError> {
    delimit(&align2(x, y)?)
}

/// The action span of a transducer rule: the relation is flattened into
/// aligned-bigram form instead of being aligned from two languages.
pub fn cross_from_relation(t: &Net) -> Result<Net, RuleError> {
    delimit(&Net::from_fst(sync::flatten_for_rule(t.fst())))
}

/// Markup alignment: left insertion `y`, the consumed input `x` copied
/// through as identity, right insertion `z`. The direction picks which
/// pair tape carries the insertions -- a right-arrow rule consumes `x`
/// on tape 2 and inserts on tape 3, a left-arrow rule the mirror image.
fn align_markup(direction: Direction, x: &Net, y: &Net, z: &Net) -> Result<Net, RuleError> {
    let hard_run = Net::marker(Marker::HardEpsilon).star();
    let id_run = Net::marker(Marker::Id).star();
    let (left, right) = match direction {
        Direction::RightArrow => (
            tape1of2(&hard_run).intersect(&tape2of2(y))?,
            tape1of2(&hard_run).intersect(&tape2of2(z))?,
        ),
        Direction::LeftArrow => (
            tape1of2(y).intersect(&tape2of2(&hard_run))?,
            tape1of2(z).intersect(&tape2of2(&hard_run))?,
        ),
    };
    let middle = tape1of2(x).intersect(&tape2of2(&id_run))?;
    Ok(left.concat(&middle).concat(&right))
}

/// The action span of a markup rule `x -> y ... z`.
pub fn cross_markup(direction: Direction, x: &Net, y: &Net, z: &Net) -> Result<Net, RuleError> {
    delimit(&align_markup(direction, x, y, z)?)
}

/// The word-boundary column `O # ID` framing every candidate string.
pub fn boundary() -> Net {
    Net::marker(Marker::Outside)
        .concat(&Net::marker(Marker::WordBoundary))
        .concat(&Net::marker(Marker::Id))
}

/// A column outside any rewritten span: `O`, a tape-2 symbol, `ID`.
/// The word boundary is not an interior symbol; its column occurs only
/// in the `boundary` frame and in lifted contexts.
pub fn outside_col() -> Result<Net, RuleError> {
    let interior = tape2_sig()?.difference(&Net::marker(Marker::WordBoundary))?;
    Ok(Net::marker(Marker::Outside)
        .concat(&interior)
        .concat(&Net::marker(Marker::Id)))
}

/// A column that opens a span, other tapes free.
pub fn open_col() -> Net {
    i_open()
        .concat(&Net::any_symbol())
        .concat(&Net::any_symbol())
}

/// A column that closes a span, other tapes free.
pub fn close_col() -> Net {
    i_close()
        .concat(&Net::any_symbol())
        .concat(&Net::any_symbol())
}
