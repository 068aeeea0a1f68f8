// Interning symbol table: maps symbol names (single characters or
// registered multi-character names) to dense small integers.

use hashbrown::HashMap;

use crate::CoreError;
use crate::marker::Marker;

/// A symbol id. Either a reserved id (epsilon, wildcards, markers) or a
/// user symbol interned through [`SymbolTable`].
pub type Symbol = u32;

/// The engine epsilon. Wired in as 0 everywhere; never a member of any
/// alphabet.
pub const EPSILON: Symbol = 0;

/// The identity wildcard `?:?` -- "any symbol not in the alphabet, mapped
/// to itself". Never a member of any alphabet; its presence is tracked by
/// the `has_wildcard` flag on a net.
pub const OTHER_ID: Symbol = 1;

/// The non-identity wildcard half -- "any symbol not in the alphabet" on
/// one tape, independent of what the other tape carries.
pub const OTHER_NONID: Symbol = 2;

/// First marker id; markers occupy a dense block after the wildcards.
pub const FIRST_MARKER: Symbol = 3;

/// First id handed out to user symbols.
pub const FIRST_USER: Symbol = FIRST_MARKER + Marker::ALL.len() as Symbol;

/// Interning table for user symbols.
///
/// The reserved block (epsilon, the two wildcards, the markers) is
/// registered at construction and can never be returned by [`intern`] for
/// an ordinary name; attempting to intern a reserved name is an author
/// error surfaced as [`CoreError::ReservedSymbol`].
///
/// [`intern`]: SymbolTable::intern
pub struct SymbolTable {
    names: Vec<String>,
    ids: HashMap<String, Symbol>,
}

impl SymbolTable {
    /// Create a table with the reserved block pre-registered.
    pub fn new() -> Self {
        let mut names = Vec::with_capacity(FIRST_USER as usize);
        names.push(String::new()); // epsilon prints as the empty string
        names.push("OTHER_ID".to_string());
        names.push("OTHER_NONID".to_string());
        for m in Marker::ALL {
            names.push(m.name().to_string());
        }
        let ids = names
            .iter()
            .enumerate()
            .map(|(i, n)| (n.clone(), i as Symbol))
            .collect();
        SymbolTable { names, ids }
    }

    /// Intern a user symbol name, returning its id. Re-interning a known
    /// name returns the existing id.
    pub fn intern(&mut self, name: &str) -> Result<Symbol, CoreError> {
        if let Some(&id) = self.ids.get(name) {
            if id < FIRST_USER {
                return Err(CoreError::ReservedSymbol(name.to_string()));
            }
            return Ok(id);
        }
        if name.starts_with("**") {
            return Err(CoreError::ReservedSymbol(name.to_string()));
        }
        let id = self.names.len() as Symbol;
        self.names.push(name.to_string());
        self.ids.insert(name.to_string(), id);
        Ok(id)
    }

    /// Intern every char of `s` as a single-character symbol.
    pub fn intern_chars(&mut self, s: &str) -> Result<Vec<Symbol>, CoreError> {
        s.chars()
            .map(|c| self.intern(&c.to_string()))
            .collect()
    }

    /// Look up the print name of a symbol id, if registered.
    pub fn name(&self, sym: Symbol) -> Option<&str> {
        self.names.get(sym as usize).map(String::as_str)
    }

    /// Number of registered symbols, reserved block included.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always false: the reserved block is present from construction.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        SymbolTable::new()
    }
}
