//! Global-existence checks
//!
//! A [`HasGlobal`] is the call-site state behind `hasGlobal:`. Entries are
//! guarded on global-name identity and their action is the constant
//! answer `true`: only a positive observation is worth caching, because a
//! global, once bound, stays bound in this model. A negative answer is
//! computed generically and never installs an entry, so a site probing a
//! name that is defined later is not stuck with a stale `false`.

use crate::dispatch::chain::{CacheState, InlineCache, Install, Lookup};
use crate::intern::SymbolId;
use crate::runtime::universe::Universe;

/// Call-site state for a global-existence check
pub struct HasGlobal {
    cache: InlineCache<SymbolId, ()>,
}

impl HasGlobal {
    /// Create an uninitialized check site
    pub fn new() -> Self {
        Self {
            cache: InlineCache::new("has-global"),
        }
    }

    /// Create an uninitialized check site with a custom cache bound
    pub fn with_bound(bound: usize) -> Self {
        Self {
            cache: InlineCache::with_bound("has-global", bound),
        }
    }

    /// Whether a global named `name` exists
    pub fn check(&mut self, universe: &Universe, name: SymbolId) -> bool {
        match self.cache.lookup(&name) {
            Lookup::Hit(()) => true,
            Lookup::Generic => universe.global_exists(name),
            Lookup::Miss => {
                if !universe.global_exists(name) {
                    return false;
                }
                match self.cache.install(name, ()) {
                    Install::Installed(()) => true,
                    // The chain collapsed, but existence was just observed.
                    Install::WentMegamorphic => true,
                }
            }
        }
    }

    /// The cache-free path: recompute existence from the global table
    pub fn check_generic(universe: &Universe, name: SymbolId) -> bool {
        universe.global_exists(name)
    }

    /// Observable state of the underlying chain
    pub fn state(&self) -> CacheState {
        self.cache.state()
    }

    /// Number of installed entries
    pub fn chain_length(&self) -> usize {
        self.cache.chain_length()
    }
}

impl Default for HasGlobal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intern::intern;
    use crate::runtime::value::Value;

    #[test]
    fn test_positive_check_installs_entry() {
        let universe = Universe::new();
        let mut site = HasGlobal::new();
        let name = intern("Object");

        assert!(site.check(&universe, name));
        assert_eq!(site.state(), CacheState::Cached(1));
        assert!(site.check(&universe, name));
        assert_eq!(site.chain_length(), 1);
    }

    #[test]
    fn test_negative_check_never_caches() {
        let universe = Universe::new();
        let mut site = HasGlobal::new();
        let name = intern("Foo");

        for _ in 0..10 {
            assert!(!site.check(&universe, name));
        }
        assert_eq!(site.state(), CacheState::Uninitialized);
    }

    #[test]
    fn test_later_defined_global_becomes_visible() {
        let mut universe = Universe::new();
        let mut site = HasGlobal::new();
        let name = intern("LateBound");

        assert!(!site.check(&universe, name));
        universe.set_global(name, Value::Integer(1));
        assert!(site.check(&universe, name));
        assert_eq!(site.chain_length(), 1);
    }

    #[test]
    fn test_megamorphic_check_still_answers() {
        let mut universe = Universe::new();
        let mut site = HasGlobal::new();
        let mut names = Vec::new();
        for i in 0..7 {
            let name = intern(&format!("G{}", i));
            universe.set_global(name, Value::Integer(i));
            names.push(name);
        }

        for &name in &names {
            assert!(site.check(&universe, name));
        }
        assert_eq!(site.state(), CacheState::Megamorphic);

        // Answers stay correct through the fallback, positive and negative.
        assert!(site.check(&universe, names[0]));
        assert!(!site.check(&universe, intern("StillMissing")));
        assert_eq!(site.chain_length(), 0);
    }
}
