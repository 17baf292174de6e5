//! Adaptive inline-cache dispatch
//!
//! Call sites for dynamically-resolved operations start uninitialized,
//! specialize themselves into a short chain of guarded cache entries as
//! concrete discriminants are observed, and collapse to a cache-free
//! generic fallback once they prove megamorphic. The chain machinery is
//! generic ([`chain`]); the concrete call-site kinds are reflective sends
//! ([`send`]), indexed field access ([`field`]), global-existence checks
//! ([`global`]), and the stateless superclass-scoped perform ([`perform`]).
//!
//! Cached fast paths are observationally equivalent to their fallbacks,
//! including failure behavior: a cache accelerates the success path and
//! never masks an error.

pub mod chain;
pub mod field;
pub mod global;
pub mod perform;
pub mod send;

pub use chain::{CacheState, InlineCache, Install, Lookup, INLINE_CACHE_SIZE};
pub use field::FieldDispatch;
pub use global::HasGlobal;
pub use perform::perform_in_superclass;
pub use send::SymbolDispatch;
