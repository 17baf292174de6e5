//! Reflective message sends by symbol
//!
//! A [`SymbolDispatch`] is the call-site state behind `perform:` and
//! `perform:withArguments:`: the selector arrives as a runtime value, so
//! the site caches on selector identity. Requests with and without a
//! packed argument array specialize independently on the same chain, since
//! the two shapes materialize their argument lists differently.
//!
//! The cached action is a prepared, selector-bound send. The receiver's
//! class is deliberately not part of the guard: the prepared send still
//! resolves through the receiver's class on every call, exactly like the
//! generic fallback, so caching never changes which method runs — it is
//! the seam where an optimizing host attaches a direct call target.

use crate::dispatch::chain::{CacheState, InlineCache, Install, Lookup};
use crate::error::Result;
use crate::intern::SymbolId;
use crate::runtime::universe::Universe;
use crate::runtime::value::Value;

/// Discriminant of a reflective send: selector identity plus whether a
/// packed argument array accompanied the request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SendGuard {
    selector: SymbolId,
    has_arguments: bool,
}

/// A prepared, selector-bound send
#[derive(Debug, Clone)]
struct PreparedSend {
    selector: SymbolId,
    unpacks_arguments: bool,
}

impl PreparedSend {
    fn execute(
        &self,
        universe: &Universe,
        receiver: &Value,
        arguments: Option<&Value>,
    ) -> Result<Value> {
        debug_assert_eq!(self.unpacks_arguments, arguments.is_some());
        let class = universe.class_of(receiver);
        let invokable = universe
            .lookup_invokable(class, self.selector)
            .ok_or_else(|| universe.does_not_understand(class, self.selector))?;
        let argument_list = universe.materialize_arguments(receiver, arguments)?;
        universe.invoke(&invokable, &argument_list)
    }
}

/// Call-site state for a reflective send
pub struct SymbolDispatch {
    cache: InlineCache<SendGuard, PreparedSend>,
}

impl SymbolDispatch {
    /// Create an uninitialized send site
    pub fn new() -> Self {
        Self {
            cache: InlineCache::new("symbol-send"),
        }
    }

    /// Create an uninitialized send site with a custom cache bound
    pub fn with_bound(bound: usize) -> Self {
        Self {
            cache: InlineCache::with_bound("symbol-send", bound),
        }
    }

    /// Dispatch `selector` to `receiver`, with an optional packed argument
    /// array. Propagates whatever the resolved method raises; an unknown
    /// selector raises `DoesNotUnderstand` identically on the cached and
    /// generic paths.
    pub fn dispatch(
        &mut self,
        universe: &Universe,
        receiver: &Value,
        selector: SymbolId,
        arguments: Option<&Value>,
    ) -> Result<Value> {
        let guard = SendGuard {
            selector,
            has_arguments: arguments.is_some(),
        };
        match self.cache.lookup(&guard) {
            Lookup::Hit(send) => send.execute(universe, receiver, arguments),
            Lookup::Generic => Self::dispatch_generic(universe, receiver, selector, arguments),
            Lookup::Miss => {
                let prepared = PreparedSend {
                    selector,
                    unpacks_arguments: guard.has_arguments,
                };
                match self.cache.install(guard, prepared) {
                    Install::Installed(send) => send.execute(universe, receiver, arguments),
                    Install::WentMegamorphic => {
                        Self::dispatch_generic(universe, receiver, selector, arguments)
                    }
                }
            }
        }
    }

    /// The cache-free path: resolve through the receiver's class and
    /// invoke indirectly, every call
    pub fn dispatch_generic(
        universe: &Universe,
        receiver: &Value,
        selector: SymbolId,
        arguments: Option<&Value>,
    ) -> Result<Value> {
        let class = universe.class_of(receiver);
        let invokable = universe
            .lookup_invokable(class, selector)
            .ok_or_else(|| universe.does_not_understand(class, selector))?;
        let argument_list = universe.materialize_arguments(receiver, arguments)?;
        universe.invoke(&invokable, &argument_list)
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

impl Default for SymbolDispatch {
    fn default() -> Self {
        Self::new()
    }
}
