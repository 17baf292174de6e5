//! Symbol interning for selectors and global names
//!
//! This module provides O(1) identity comparison for selectors and global
//! names by mapping strings to unique integer IDs. Guard tests in the
//! dispatch chains compare `SymbolId`s, never string contents.

use rustc_hash::FxHashMap as HashMap;
use std::cell::RefCell;

/// A globally unique symbol ID
pub type SymbolId = u32;

/// Thread-local symbol interner
pub struct SymbolInterner {
    /// Map from string to ID
    string_to_id: HashMap<String, SymbolId>,
    /// Map from ID to string (for reverse lookup)
    id_to_string: Vec<String>,
}

impl SymbolInterner {
    /// Create a new interner with pre-seeded common selectors
    pub fn new() -> Self {
        let mut interner = Self {
            string_to_id: HashMap::default(),
            id_to_string: Vec::with_capacity(64),
        };

        // Pre-intern common selectors for better cache locality
        let common_selectors = [
            // Reflection
            "perform:", "perform:withArguments:", "perform:inSuperclass:",
            "perform:withArguments:inSuperclass:", "instVarAt:", "instVarAt:put:",
            "respondsTo:", "hasGlobal:",
            // Core protocol
            "new", "class", "name", "value", "value:", "value:with:",
            "=", "==", "hash", "printString", "asString", "isNil", "notNil",
            // Arithmetic
            "+", "-", "*", "/", "//", "%", "<", ">", "<=", ">=", "negated", "abs",
            // Collections
            "at:", "at:put:", "length", "do:", "collect:", "new:withAll:",
            // Well-known globals
            "Object", "Class", "Nil", "Boolean", "True", "False",
            "Integer", "Double", "String", "Symbol", "Array", "system",
        ];

        for selector in common_selectors {
            interner.intern(selector);
        }

        interner
    }

    /// Intern a string, returning its unique ID
    #[inline]
    pub fn intern(&mut self, s: &str) -> SymbolId {
        if let Some(&id) = self.string_to_id.get(s) {
            return id;
        }

        let id = self.id_to_string.len() as SymbolId;
        self.id_to_string.push(s.to_string());
        self.string_to_id.insert(s.to_string(), id);
        id
    }

    /// Get the ID for a string if it's already interned
    #[inline]
    pub fn get_id(&self, s: &str) -> Option<SymbolId> {
        self.string_to_id.get(s).copied()
    }

    /// Get the string for an ID
    #[inline]
    pub fn get_string(&self, id: SymbolId) -> Option<&str> {
        self.id_to_string.get(id as usize).map(|s| s.as_str())
    }
}

impl Default for SymbolInterner {
    fn default() -> Self {
        Self::new()
    }
}

thread_local! {
    /// Global symbol interner instance
    static INTERNER: RefCell<SymbolInterner> = RefCell::new(SymbolInterner::new());
}

/// Intern a string using the global interner
#[inline]
pub fn intern(s: &str) -> SymbolId {
    INTERNER.with(|interner| interner.borrow_mut().intern(s))
}

/// Resolve a symbol ID back to its string, if it was interned
#[inline]
pub fn resolve(id: SymbolId) -> Option<String> {
    INTERNER.with(|interner| interner.borrow().get_string(id).map(|s| s.to_string()))
}

/// Resolve a symbol ID for display, tolerating unknown IDs
#[inline]
pub fn symbol_name(id: SymbolId) -> String {
    resolve(id).unwrap_or_else(|| format!("<symbol {}>", id))
}
