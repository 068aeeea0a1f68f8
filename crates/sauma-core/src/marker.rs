// Compiler-internal marker symbols used on the three tapes of a triple
// string. Each marker resolves to a fixed reserved symbol id so that the
// combinators never compare names at run time.

use crate::symbols::Symbol;

/// The closed set of internal marker symbols reserved by the rule compiler.
///
/// Tape 1 of a triple string carries only [`Marker::Outside`] or one of the
/// I-markers; [`Marker::Id`] and [`Marker::HardEpsilon`] appear on tapes 2
/// and 3. None of these is ever visible in a compiled transducer: the rule
/// finalizer substitutes them all with true epsilon.
///
/// The `**@...@` spellings follow the convention that no user symbol name
/// may begin with `**`, so collisions are impossible by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    /// `**@I[@` -- opens a multi-column rewrite span on tape 1.
    IOpen,
    /// `**@I]@` -- closes a multi-column rewrite span on tape 1.
    IClose,
    /// `**@I[]@` -- a one-column span (opens and closes at once).
    IOpenClose,
    /// `**@I@` -- interior column of a multi-column span.
    Inside,
    /// `**@O@` -- tape-1 marker for columns outside any rewrite span.
    Outside,
    /// `**@ID@` -- tape-3 marker meaning "copy the tape-2 symbol here".
    Id,
    /// `**@0@` -- explicit padding symbol, distinct from true epsilon.
    HardEpsilon,
    /// `**@#@` -- word boundary, usable inside rule contexts.
    WordBoundary,
    /// `**@>@` -- alignment pivot inserted by the finalizer's preprocessor.
    RightAngle,
    /// `**@RD@` -- delimiter reserved for language-restriction rules.
    RestrictionDelim,
}

impl Marker {
    /// All markers, in reserved-id order.
    pub const ALL: [Marker; 10] = [
        Marker::IOpen,
        Marker::IClose,
        Marker::IOpenClose,
        Marker::Inside,
        Marker::Outside,
        Marker::Id,
        Marker::HardEpsilon,
        Marker::WordBoundary,
        Marker::RightAngle,
        Marker::RestrictionDelim,
    ];

    /// The reserved symbol id of this marker.
    ///
    /// Markers occupy the id block immediately after the engine wildcards,
    /// so `sym` is a pure function independent of any symbol table.
    #[inline]
    pub const fn sym(self) -> Symbol {
        crate::symbols::FIRST_MARKER + self as Symbol
    }

    /// The reserved print name of this marker.
    pub const fn name(self) -> &'static str {
        match self {
            Marker::IOpen => "**@I[@",
            Marker::IClose => "**@I]@",
            Marker::IOpenClose => "**@I[]@",
            Marker::Inside => "**@I@",
            Marker::Outside => "**@O@",
            Marker::Id => "**@ID@",
            Marker::HardEpsilon => "**@0@",
            Marker::WordBoundary => "**@#@",
            Marker::RightAngle => "**@>@",
            Marker::RestrictionDelim => "**@RD@",
        }
    }
}
