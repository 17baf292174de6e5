//! Generic dispatch-chain machinery
//!
//! An [`InlineCache`] owns an ordered, singly-linked chain of guarded cache
//! entries terminated by exactly one `Uninitialized` or `Generic` node. The
//! chain is a strict ownership tree: the cache owns the head, each entry
//! owns the rest through its `next` box, so replacing any subtree is a
//! plain assignment and stale nodes become unreachable at once.
//!
//! Guards are tested in insertion order (oldest first); entries are never
//! reordered, promoted, or mutated once installed. A miss at the
//! `Uninitialized` terminal installs a new entry at the tail, unless the
//! chain has reached its bound, in which case the whole chain is replaced
//! by a single `Generic` node and the site permanently abandons caching.
//!
//! Chains are exclusively `&mut`-owned by their call site. Single-threaded
//! execution per site is a precondition; a host with real parallelism must
//! keep each chain thread-local or add its own synchronization.

use tracing::{debug, trace};

/// Default number of cache entries a chain may hold before a further miss
/// collapses it to the generic fallback
pub const INLINE_CACHE_SIZE: usize = 6;

/// A single resolved binding: guard, action, and position in the chain.
/// Immutable once installed.
struct CacheEntry<G, A> {
    guard: G,
    action: A,
    depth: usize,
    next: Box<ChainNode<G, A>>,
}

/// One node of a dispatch chain
enum ChainNode<G, A> {
    /// Terminal of a still-growing chain; `depth` equals the number of
    /// entries in front of it
    Uninitialized { depth: usize },
    /// A guarded entry, forwarding to `next` on mismatch
    Cached(CacheEntry<G, A>),
    /// Terminal of a megamorphic chain; never leaves this state
    Generic,
}

impl<G, A> ChainNode<G, A> {
    /// Depth of the `Uninitialized` terminal, or `None` once megamorphic
    fn terminal_depth(&self) -> Option<usize> {
        let mut node = self;
        loop {
            match node {
                ChainNode::Cached(entry) => node = &entry.next,
                ChainNode::Uninitialized { depth } => return Some(*depth),
                ChainNode::Generic => return None,
            }
        }
    }

    /// Replace the `Uninitialized` terminal with a fresh entry followed by
    /// a new terminal one deeper, returning the installed action
    fn install_at_tail(&mut self, guard: G, action: A) -> &A {
        match self {
            ChainNode::Cached(entry) => entry.next.install_at_tail(guard, action),
            ChainNode::Uninitialized { depth } => {
                let depth = *depth;
                *self = ChainNode::Cached(CacheEntry {
                    guard,
                    action,
                    depth,
                    next: Box::new(ChainNode::Uninitialized { depth: depth + 1 }),
                });
                match self {
                    ChainNode::Cached(entry) => &entry.action,
                    _ => unreachable!(),
                }
            }
            ChainNode::Generic => unreachable!("cache entries are never installed on a megamorphic chain"),
        }
    }
}

/// Observable state of a dispatch chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    /// No discriminant observed yet
    Uninitialized,
    /// Caching, with this many entries installed
    Cached(usize),
    /// Collapsed to the generic fallback; terminal
    Megamorphic,
}

/// Outcome of probing a chain with a discriminant
pub enum Lookup<'a, A> {
    /// A guard matched; execute this action
    Hit(&'a A),
    /// No guard matched and the chain can still grow; specialize via
    /// [`InlineCache::install`]
    Miss,
    /// The chain is megamorphic; execute the generic fallback
    Generic,
}

/// Outcome of a specialization attempt
pub enum Install<'a, A> {
    /// The entry was appended at the tail; execute its action now (the
    /// retry-once-after-install step)
    Installed(&'a A),
    /// The chain was at its bound and collapsed to the generic fallback
    WentMegamorphic,
}

/// A borrowed view of one installed entry, in guard order
pub struct EntryRef<'a, G, A> {
    /// The entry's guard
    pub guard: &'a G,
    /// The entry's action
    pub action: &'a A,
    /// 0-based position in the chain
    pub depth: usize,
}

/// Iterator over a chain's installed entries, head to tail
pub struct Entries<'a, G, A> {
    node: &'a ChainNode<G, A>,
}

impl<'a, G, A> Iterator for Entries<'a, G, A> {
    type Item = EntryRef<'a, G, A>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.node;
        match node {
            ChainNode::Cached(entry) => {
                self.node = &entry.next;
                Some(EntryRef {
                    guard: &entry.guard,
                    action: &entry.action,
                    depth: entry.depth,
                })
            }
            _ => None,
        }
    }
}

/// A bounded, self-specializing dispatch chain
pub struct InlineCache<G, A> {
    head: ChainNode<G, A>,
    bound: usize,
    /// Site label for trace output
    site: &'static str,
}

impl<G: PartialEq, A> InlineCache<G, A> {
    /// Create an empty chain with the default bound
    pub fn new(site: &'static str) -> Self {
        Self::with_bound(site, INLINE_CACHE_SIZE)
    }

    /// Create an empty chain with a custom bound. A bound of 0 collapses
    /// to the generic fallback on the first miss, which forces every
    /// subsequent dispatch down the uncached path.
    pub fn with_bound(site: &'static str, bound: usize) -> Self {
        Self {
            head: ChainNode::Uninitialized { depth: 0 },
            bound,
            site,
        }
    }

    /// Probe the chain: test each guard in insertion order against the
    /// observed discriminant
    pub fn lookup(&self, guard: &G) -> Lookup<'_, A> {
        let mut node = &self.head;
        loop {
            match node {
                ChainNode::Cached(entry) => {
                    if entry.guard == *guard {
                        return Lookup::Hit(&entry.action);
                    }
                    node = &entry.next;
                }
                ChainNode::Uninitialized { .. } => return Lookup::Miss,
                ChainNode::Generic => return Lookup::Generic,
            }
        }
    }

    /// Specialize after a miss: append an entry for the observed
    /// discriminant, or collapse the whole chain to the generic fallback
    /// if it is already at its bound.
    ///
    /// Must only be called after [`lookup`](Self::lookup) reported a
    /// [`Lookup::Miss`] for the same discriminant.
    pub fn install(&mut self, guard: G, action: A) -> Install<'_, A> {
        let depth = match self.head.terminal_depth() {
            Some(depth) => depth,
            None => unreachable!("install after a lookup that reported a megamorphic chain"),
        };
        if depth >= self.bound {
            debug!(
                site = self.site,
                depth,
                bound = self.bound,
                "dispatch chain at bound, collapsing to generic"
            );
            self.head = ChainNode::Generic;
            return Install::WentMegamorphic;
        }
        trace!(site = self.site, depth, "installing cache entry");
        Install::Installed(self.head.install_at_tail(guard, action))
    }

    /// Number of installed entries; fixed at 0 once megamorphic
    pub fn chain_length(&self) -> usize {
        self.head.terminal_depth().unwrap_or(0)
    }

    /// Whether the chain has collapsed to the generic fallback
    pub fn is_megamorphic(&self) -> bool {
        matches!(self.head, ChainNode::Generic)
    }

    /// Observable state of the chain
    pub fn state(&self) -> CacheState {
        match self.head.terminal_depth() {
            None => CacheState::Megamorphic,
            Some(0) => CacheState::Uninitialized,
            Some(n) => CacheState::Cached(n),
        }
    }

    /// Iterate the installed entries in guard order, head to tail
    pub fn entries(&self) -> Entries<'_, G, A> {
        Entries { node: &self.head }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn probe(cache: &mut InlineCache<u32, i32>, guard: u32) -> Option<i32> {
        match cache.lookup(&guard) {
            Lookup::Hit(action) => Some(*action),
            Lookup::Generic => None,
            Lookup::Miss => match cache.install(guard, guard as i32 * 10) {
                Install::Installed(action) => Some(*action),
                Install::WentMegamorphic => None,
            },
        }
    }

    #[test]
    fn test_starts_uninitialized() {
        let cache: InlineCache<u32, i32> = InlineCache::new("test");
        assert_eq!(cache.state(), CacheState::Uninitialized);
        assert_eq!(cache.chain_length(), 0);
        assert!(!cache.is_megamorphic());
    }

    #[test]
    fn test_first_miss_installs_and_executes() {
        let mut cache = InlineCache::new("test");
        assert_eq!(probe(&mut cache, 7), Some(70));
        assert_eq!(cache.state(), CacheState::Cached(1));
    }

    #[test]
    fn test_monomorphic_stability() {
        let mut cache = InlineCache::new("test");
        probe(&mut cache, 7);
        for _ in 0..100 {
            assert_eq!(probe(&mut cache, 7), Some(70));
            assert_eq!(cache.chain_length(), 1);
        }
    }

    #[test]
    fn test_fifo_guard_order() {
        let mut cache = InlineCache::new("test");
        for guard in [3, 1, 2] {
            probe(&mut cache, guard);
        }
        let guards: Vec<u32> = cache.entries().map(|e| *e.guard).collect();
        assert_eq!(guards, vec![3, 1, 2]);
        let depths: Vec<usize> = cache.entries().map(|e| e.depth).collect();
        assert_eq!(depths, vec![0, 1, 2]);

        // A repeat of the first guard hits the head entry, not a rebuild.
        assert_eq!(probe(&mut cache, 3), Some(30));
        assert_eq!(cache.chain_length(), 3);
    }

    #[test]
    fn test_entries_never_overwritten() {
        let mut cache: InlineCache<u32, i32> = InlineCache::new("test");
        cache.install(1, 100);
        cache.install(2, 200);
        // A later install for a fresh guard must leave earlier actions
        // untouched.
        cache.install(3, 300);
        match cache.lookup(&1) {
            Lookup::Hit(action) => assert_eq!(*action, 100),
            _ => panic!("expected a hit on the first entry"),
        }
    }

    #[test]
    fn test_bounded_growth_then_megamorphic() {
        let mut cache = InlineCache::new("test");
        for guard in 0..INLINE_CACHE_SIZE as u32 {
            probe(&mut cache, guard);
        }
        assert_eq!(cache.state(), CacheState::Cached(INLINE_CACHE_SIZE));

        // One more distinct discriminant collapses the chain.
        assert_eq!(probe(&mut cache, 99), None);
        assert_eq!(cache.state(), CacheState::Megamorphic);
        assert_eq!(cache.chain_length(), 0);

        // Megamorphic is terminal: previously cached guards miss generically
        // and nothing grows back.
        for guard in 0..200 {
            assert_eq!(probe(&mut cache, guard), None);
        }
        assert_eq!(cache.chain_length(), 0);
        assert!(cache.is_megamorphic());
    }

    #[test]
    fn test_zero_bound_forces_generic_immediately() {
        let mut cache = InlineCache::with_bound("test", 0);
        assert_eq!(probe(&mut cache, 1), None);
        assert!(cache.is_megamorphic());
    }

    #[test]
    fn test_custom_bound_respected() {
        let mut cache = InlineCache::with_bound("test", 2);
        probe(&mut cache, 1);
        probe(&mut cache, 2);
        assert_eq!(cache.state(), CacheState::Cached(2));
        probe(&mut cache, 3);
        assert_eq!(cache.state(), CacheState::Megamorphic);
    }
}
