//! Shared symbol types for the sauma finite-state rule compiler.
//!
//! - [`marker`] -- the closed set of compiler-internal marker symbols
//! - [`symbols`] -- the interning symbol table mapping names to small ids

pub mod marker;
pub mod symbols;

pub use marker::Marker;
pub use symbols::{EPSILON, OTHER_ID, OTHER_NONID, Symbol, SymbolTable};

/// Error type for symbol registration.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A user symbol name collides with a reserved marker or wildcard name.
    /// Rule compilation cannot proceed with such a symbol in play, since the
    /// open-world promotion machinery would conflate it with the internal
    /// marker of the same name.
    #[error("symbol name {0:?} is reserved for internal use")]
    ReservedSymbol(String),
}
