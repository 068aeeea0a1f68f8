// Match-disambiguation fragments and the epenthesis context operators.
//
// Overlap strategies are compiled negatively: each combinator here
// produces the fragments a strategy *forbids*, and `compile_rule` bars
// them from appearing between the rule's contexts via `not_contain`.

use sauma_core::Marker;

use crate::net::Net;
use crate::project::side;
use crate::rule::Direction;
use crate::tapes::{i_close, i_open, ignore, tape1_sig, tape1of3, tape2_sig, tape2of3, tape3_sig, tape3of3};
use crate::RuleError;

/// Triple strings containing no occurrence of the fragment `x`. The
/// match may start at any column boundary but end anywhere, so the
/// prefix is measured in whole columns.
pub fn not_contain(x: &Net) -> Result<Net, RuleError> {
    let column = tape1_sig().concat(&tape2_sig()?).concat(&tape3_sig()?);
    column
        .star()
        .concat(x)
        .concat(&Net::any_symbol().star())
        .complement()
}

/// A span whose matched side could have extended further: it opens, and
/// then another span opens or an outside column follows while the
/// matched string is still incomplete. Forbidding these forces longest
/// match.
pub fn longest(direction: Direction, x: &Net) -> Result<Net, RuleError> {
    let shape = tape1of3(
        &i_open()
            .concat(&tape1_sig().star())
            .concat(&Net::marker(Marker::Outside).union(&i_open()))
            .concat(&tape1_sig().star()),
    );
    let hard = Net::marker(Marker::HardEpsilon);
    let trimmed = ignore(x, &hard).difference(&Net::any_symbol().star().concat(&hard))?;
    shape.intersect(&side(direction, &trimmed)?)
}

/// A span that runs on past a complete match: it opens and never closes
/// while the matched side already reads a full string of `x`.
pub fn shortest(direction: Direction, x: &Net) -> Result<Net, RuleError> {
    let shape = tape1of3(
        &Net::marker(Marker::IOpen).concat(&i_close().symbol_complement()?.star()),
    );
    shape.intersect(&side(direction, x)?)
}

/// A match preceded by an unrewritten column: the span could have
/// started earlier.
pub fn leftmost(direction: Direction, x: &Net) -> Result<Net, RuleError> {
    let shape = tape1of3(
        &Net::marker(Marker::Outside)
            .concat(&Net::any_symbol().star())
            .concat(&i_open())
            .concat(&Net::any_symbol().star()),
    );
    side(direction, x)?.intersect(&shape)
}

/// A match followed by an unrewritten column: the span could have
/// started later.
pub fn rightmost(direction: Direction, x: &Net) -> Result<Net, RuleError> {
    let shape = tape1of3(
        &Net::any_symbol()
            .star()
            .concat(&i_close())
            .concat(&Net::any_symbol().star())
            .concat(&Net::marker(Marker::Outside)),
    );
    side(direction, x)?.intersect(&shape)
}

/// The columns an epenthesis context may end or start on: an outside
/// column, or a whole bracketed span that consumes at least one symbol
/// on the matched side. Bare insertion spans are excluded so a context
/// cannot match across an already-inserted span, which would license
/// unbounded re-insertion.
pub fn ep_extend(direction: Direction) -> Result<Net, RuleError> {
    let span = Net::marker(Marker::IOpen)
        .concat(&Net::marker(Marker::Inside).star())
        .concat(&Net::marker(Marker::IClose))
        .union(&Net::marker(Marker::IOpenClose));
    let consuming = Net::marker(Marker::HardEpsilon).star().complement()?;
    let lifted = match direction {
        Direction::RightArrow => tape2of3(&consuming),
        Direction::LeftArrow => tape3of3(&consuming),
    };
    Ok(tape1of3(&Net::marker(Marker::Outside)).union(&tape1of3(&span).intersect(&lifted)?))
}

/// Strings ending in a left-context match that does not stop inside or
/// just after a bare insertion span.
pub fn ep_context_left(direction: Direction, context: &Net) -> Result<Net, RuleError> {
    let any = Net::universal_language();
    any.concat(context)
        .intersect(&any.concat(&ep_extend(direction)?))
}

/// Strings starting with a right-context match, anchored the same way.
pub fn ep_context_right(direction: Direction, context: &Net) -> Result<Net, RuleError> {
    let any = Net::universal_language();
    ep_extend(direction)?
        .concat(&any)
        .intersect(&context.concat(&any))
}
