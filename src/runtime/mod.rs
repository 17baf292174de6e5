//! Minimal object-model surface consumed by the dispatch core
//!
//! The dispatch engine only ever touches the object model through a small
//! collaborator surface: class-of introspection, selector lookup, indirect
//! invocation, indexed field access, the global table, and argument
//! materialization. This module provides a concrete, single-threaded
//! implementation of that surface — enough to host the dispatch chains and
//! to exercise them realistically in tests and benchmarks.

pub mod class;
pub mod object;
pub mod universe;
pub mod value;

pub use class::{Class, ClassId, Invokable, NativeFn};
pub use object::Instance;
pub use universe::Universe;
pub use value::Value;
