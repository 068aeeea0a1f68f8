// Whole-rule assembly.
//
// A rule compiles in three stages: build the base language of candidate
// triple strings (framed runs of outside columns and action spans),
// intersect away every candidate that violates the contexts, the
// obligatoriness requirement, or the match strategy, and finally
// collapse what is left into a two-tape transducer.

use sauma_engine::OptimizeConfig;

use crate::cleanup::{cleanup_action, cleanup_context, cleanup_rule};
use crate::net::Net;
use crate::project::{side, unrewritten};
use crate::rule::{Direction, MatchStrategy, RuleAction, RuleParts, RuleSpec};
use crate::strategy;
use crate::tapes::{boundary, close_col, cross, cross_from_relation, cross_markup, open_col, outside_col};
use crate::RuleError;

/// Compile one rewrite rule into a transducer.
///
/// An action that is the empty language can never fire, and the
/// candidate encoding has no strings for it, so the result is the empty
/// transducer rather than identity.
pub fn compile_rule(spec: &RuleSpec, parts: &RuleParts) -> Result<Net, RuleError> {
    let left = cleanup_context(&parts.left)?;
    let right = cleanup_context(&parts.right)?;

    // the action span and the matched-side language it rewrites
    let (cp, matched) = match &parts.action {
        RuleAction::Pair { upper, lower } => {
            let upper = cleanup_action(upper)?;
            let lower = cleanup_action(lower)?;
            if upper.is_empty_language() || lower.is_empty_language() {
                return Ok(Net::empty());
            }
            let matched = match spec.direction {
                Direction::RightArrow => upper.share(),
                Direction::LeftArrow => lower.share(),
            };
            (cross(&upper, &lower)?, matched)
        }
        RuleAction::Relation(t) => {
            let t = cleanup_action(t)?;
            if t.is_empty_language() {
                return Ok(Net::empty());
            }
            let matched = match spec.direction {
                Direction::RightArrow => t.input_project(),
                Direction::LeftArrow => t.output_project(),
            };
            (cross_from_relation(&t)?, matched)
        }
        RuleAction::Markup { input, left, right } => {
            let input = cleanup_action(input)?;
            let left_ins = cleanup_action(left)?;
            let right_ins = cleanup_action(right)?;
            if input.is_empty_language()
                || left_ins.is_empty_language()
                || right_ins.is_empty_language()
            {
                return Ok(Net::empty());
            }
            (
                cross_markup(spec.direction, &input, &left_ins, &right_ins)?,
                input,
            )
        }
    };

    let base = boundary()
        .concat(&outside_col()?.union(&cp).star())
        .concat(&boundary());

    let side_l = side(spec.direction, &left)?;
    let side_r = side(spec.direction, &right)?;
    let any = Net::universal_language();

    // every span must open right after a left-context match and close
    // right before a right-context match
    let prefix = if spec.epenthesis {
        strategy::ep_context_left(spec.direction, &side_l)?
    } else {
        any.concat(&side_l)
    };
    let left_ok = prefix
        .complement()?
        .concat(&open_col())
        .concat(&any)
        .complement()?;
    let suffix = if spec.epenthesis {
        strategy::ep_context_right(spec.direction, &side_r)?
    } else {
        side_r.concat(&any)
    };
    let right_ok = any
        .concat(&close_col())
        .concat(&suffix.complement()?)
        .complement()?;

    let mut rule = base.intersect(&left_ok)?.intersect(&right_ok)?;

    // bad fragments barred from appearing between the two contexts
    let mut bad: Option<Net> = None;
    if spec.obligatory && !spec.epenthesis {
        let visible = matched.difference(&Net::empty_string())?;
        bad = Some(unrewritten(&visible));
    }
    if let Some(choice) = spec.strategy {
        let visible = matched.difference(&Net::empty_string())?;
        let fragment = match choice {
            MatchStrategy::Longest => strategy::longest(spec.direction, &visible)?,
            MatchStrategy::Shortest => strategy::shortest(spec.direction, &visible)?,
            MatchStrategy::Leftmost => strategy::leftmost(spec.direction, &visible)?,
            MatchStrategy::Rightmost => strategy::rightmost(spec.direction, &visible)?,
        };
        bad = Some(match bad {
            Some(b) => b.union(&fragment),
            None => fragment,
        });
    }
    if let Some(bad) = bad {
        let forbidden = side_l.concat(&bad).concat(&side_r);
        rule = rule.intersect(&strategy::not_contain(&forbidden)?)?;
    }

    // an obligatory epenthesis rule may not leave a bare junction where
    // both contexts meet over ordinary columns
    if spec.obligatory && spec.epenthesis {
        let out = outside_col()?;
        let left_end = any.concat(&side_l).intersect(&any.concat(&out))?;
        let right_start = side_r.concat(&any).intersect(&out.concat(&any))?;
        rule = rule.intersect(&left_end.concat(&right_start).complement()?)?;
    }

    cleanup_rule(&rule, &OptimizeConfig::full())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sauma_core::Symbol;

    const A: Symbol = 20;
    const B: Symbol = 21;
    const X: Symbol = 22;

    fn rule_spec(direction: Direction, obligatory: bool) -> RuleSpec {
        RuleSpec {
            direction,
            obligatory,
            strategy: None,
            epenthesis: false,
        }
    }

    fn pair(upper: Net, lower: Net) -> RuleAction {
        RuleAction::Pair { upper, lower }
    }

    #[test]
    fn bare_obligatory_rule_rewrites_everywhere() {
        let fst = compile_rule(
            &rule_spec(Direction::RightArrow, true),
            &RuleParts::bare(pair(Net::symbol(A), Net::symbol(X))),
        )
        .unwrap();
        assert_eq!(fst.apply_down(&[A], 32), vec![vec![X]]);
        assert_eq!(fst.apply_down(&[A, A], 32), vec![vec![X, X]]);
        // unrelated symbols ride through on the wildcard
        assert_eq!(fst.apply_down(&[B], 32), vec![vec![B]]);
    }

    #[test]
    fn optional_rule_keeps_the_identity_path() {
        let fst = compile_rule(
            &rule_spec(Direction::RightArrow, false),
            &RuleParts::bare(pair(Net::symbol(A), Net::symbol(X))),
        )
        .unwrap();
        assert_eq!(fst.apply_down(&[A], 32), vec![vec![A], vec![X]]);
    }

    #[test]
    fn empty_action_language_compiles_to_the_empty_transducer() {
        let fst = compile_rule(
            &rule_spec(Direction::RightArrow, true),
            &RuleParts::bare(pair(Net::empty(), Net::symbol(X))),
        )
        .unwrap();
        assert!(fst.is_empty_language());
    }

    #[test]
    fn left_arrow_matches_on_the_output_side() {
        // x <- a : every surface a must be derived from x
        let fst = compile_rule(
            &rule_spec(Direction::LeftArrow, true),
            &RuleParts::bare(pair(Net::symbol(X), Net::symbol(A))),
        )
        .unwrap();
        assert_eq!(fst.apply_up(&[A], 32), vec![vec![X]]);
        // downward the rule is optional, but a bare a has no licit image
        assert_eq!(fst.apply_down(&[X], 32), vec![vec![A], vec![X]]);
        assert!(fst.apply_down(&[A], 32).is_empty());
    }
}
