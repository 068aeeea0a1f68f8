// The rule description consumed by the compiler. One tagged value per
// rule replaces a per-shape function explosion: every combinator that
// differs between `->` and `<-` takes the direction as a parameter.

use crate::net::Net;

/// Arrow direction of a rule. A right-arrow rule `A -> B / L _ R`
/// matches `A` and its contexts on the input side; a left-arrow rule
/// `A <- B / L _ R` matches on the output side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    RightArrow,
    LeftArrow,
}

/// Which of the overlapping candidate spans a rule rewrites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStrategy {
    Longest,
    Shortest,
    Leftmost,
    Rightmost,
}

/// Shape flags of one rewrite rule.
#[derive(Debug, Clone, Copy)]
pub struct RuleSpec {
    pub direction: Direction,
    /// Obligatory rules must rewrite every matching span; optional rules
    /// may let a match pass through unchanged.
    pub obligatory: bool,
    /// `None` compiles the plain (unconstrained-overlap) rule.
    pub strategy: Option<MatchStrategy>,
    /// Insertion-only rules need relaxed context matching: no input
    /// symbol marks the rewrite site.
    pub epenthesis: bool,
}

/// The action of a rule.
#[derive(Debug, Clone)]
pub enum RuleAction {
    /// `A -> B`: two independently specified languages, aligned column
    /// by column.
    Pair { upper: Net, lower: Net },
    /// A transducer rule: the action is already a relation `A:B`.
    Relation(Net),
    /// A markup rule `X -> Y ... Z`: `input` is copied through with
    /// `left` inserted before it and `right` after it.
    Markup { input: Net, left: Net, right: Net },
}

/// The three pieces of `A -> B / L _ R`.
#[derive(Debug, Clone)]
pub struct RuleParts {
    pub left: Net,
    pub action: RuleAction,
    pub right: Net,
}

impl RuleParts {
    /// A rule with empty contexts on both sides.
    pub fn bare(action: RuleAction) -> RuleParts {
        RuleParts {
            left: Net::empty_string(),
            action,
            right: Net::empty_string(),
        }
    }
}
