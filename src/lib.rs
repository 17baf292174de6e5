//! Argent: a self-specializing inline-cache dispatch engine
//!
//! Argent is the execution core of a dynamic object-oriented language
//! interpreter: call sites (reflective message sends, indexed field
//! access, global-variable lookups) resolve a dynamically-typed operation
//! to a concrete target and remember the resolution, so future executions
//! skip the expensive lookup work.
//!
//! Every cacheable call site follows the same adaptive protocol: it starts
//! uninitialized, grows one guarded cache entry per observed discriminant
//! (FIFO, bounded at [`INLINE_CACHE_SIZE`] entries by default), and
//! collapses permanently to a cache-free generic fallback once the site
//! proves megamorphic. Cached and generic paths are observationally
//! equivalent, failures included.
//!
//! # Quick Start
//!
//! ```
//! use argent::{intern, SymbolDispatch, Universe, Value};
//! use std::rc::Rc;
//!
//! let mut universe = Universe::new();
//! let selector = intern::intern("double");
//! let integer_class = universe.builtins().integer_class;
//! universe.class_mut(integer_class).install_method(
//!     selector,
//!     Rc::new(|_, args| match args[0] {
//!         Value::Integer(i) => Ok(Value::Integer(i * 2)),
//!         _ => Ok(Value::Nil),
//!     }),
//! );
//!
//! let mut site = SymbolDispatch::new();
//! let result = site.dispatch(&universe, &Value::Integer(21), selector, None)?;
//! assert_eq!(result, Value::Integer(42));
//! # argent::Result::Ok(())
//! ```
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`dispatch`] | Chain machinery and the four call-site kinds |
//! | [`runtime`] | The object-model surface the chains dispatch over |
//! | [`intern`] | Symbol interning (identity-comparable selectors) |
//! | [`error`](Error) | Dispatch-layer error taxonomy |
//!
//! Chains are single-threaded by contract: each is `&mut`-owned by its
//! call site and never shared across threads.

pub mod dispatch;
pub mod error;
pub mod intern;
pub mod runtime;

pub use dispatch::{
    perform_in_superclass, CacheState, FieldDispatch, HasGlobal, InlineCache, SymbolDispatch,
    INLINE_CACHE_SIZE,
};
pub use error::{Error, Result};
pub use intern::SymbolId;
pub use runtime::{Class, ClassId, Instance, Universe, Value};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
