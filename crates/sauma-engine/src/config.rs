// Optimizer configuration.
//
// The original system keeps these as interpreter-level switches consulted
// on every algebra call; here they travel as an explicit value so the
// finalizer (and tests) can turn passes off selectively.

/// Which passes [`crate::optimize::optimize`] runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptimizeConfig {
    /// Remove epsilon transitions.
    pub rm_epsilon: bool,
    /// Determinize over the encoded pair alphabet.
    pub determinize: bool,
    /// Minimize (implies determinization of the input first).
    pub minimize: bool,
}

impl OptimizeConfig {
    /// All passes enabled.
    pub const fn full() -> Self {
        OptimizeConfig {
            rm_epsilon: true,
            determinize: true,
            minimize: true,
        }
    }

    /// No passes at all; [`crate::optimize::optimize`] only trims.
    pub const fn none() -> Self {
        OptimizeConfig {
            rm_epsilon: false,
            determinize: false,
            minimize: false,
        }
    }
}

impl Default for OptimizeConfig {
    fn default() -> Self {
        OptimizeConfig::full()
    }
}
