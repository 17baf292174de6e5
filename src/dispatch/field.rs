//! Indexed field access dispatch
//!
//! A [`FieldDispatch`] is the call-site state behind reflective field
//! access (`instVarAt:` and `instVarAt:put:`). Entries are guarded on the
//! pair (class identity, field index); the action is a direct slot
//! accessor for that index.
//!
//! Reads and writes are kept as two separate, independently growing chains
//! under the shared bound. An entry is read-only or write-only by
//! construction; the type split makes routing a write through a
//! read-specialized entry unrepresentable rather than a runtime check.

use crate::dispatch::chain::{CacheState, InlineCache, Install, Lookup};
use crate::error::{Error, Result};
use crate::runtime::class::ClassId;
use crate::runtime::object::Instance;
use crate::runtime::universe::Universe;
use crate::runtime::value::Value;

/// Discriminant of an indexed field access
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FieldGuard {
    class: ClassId,
    index: usize,
}

/// A direct slot accessor, valid only under its entry's guard
#[derive(Debug, Clone, Copy)]
struct FieldAccessor {
    index: usize,
}

impl FieldAccessor {
    fn read(&self, obj: &Instance) -> Value {
        match obj.field(self.index) {
            Some(value) => value,
            None => unreachable!("field accessor escaped its guarded layout"),
        }
    }

    fn write(&self, obj: &Instance, value: Value) -> Value {
        if !obj.set_field(self.index, value.clone()) {
            unreachable!("field accessor escaped its guarded layout");
        }
        value
    }
}

/// Call-site state for indexed field reads and writes
pub struct FieldDispatch {
    read: InlineCache<FieldGuard, FieldAccessor>,
    write: InlineCache<FieldGuard, FieldAccessor>,
}

impl FieldDispatch {
    /// Create an uninitialized field-access site
    pub fn new() -> Self {
        Self {
            read: InlineCache::new("field-read"),
            write: InlineCache::new("field-write"),
        }
    }

    /// Create an uninitialized field-access site with a custom cache bound
    /// shared by the read and write chains
    pub fn with_bound(bound: usize) -> Self {
        Self {
            read: InlineCache::with_bound("field-read", bound),
            write: InlineCache::with_bound("field-write", bound),
        }
    }

    /// Read field `index` of `obj`
    pub fn read(&mut self, universe: &Universe, obj: &Instance, index: usize) -> Result<Value> {
        let guard = FieldGuard {
            class: obj.class(),
            index,
        };
        match self.read.lookup(&guard) {
            Lookup::Hit(accessor) => Ok(accessor.read(obj)),
            Lookup::Generic => Self::read_generic(universe, obj, index),
            Lookup::Miss => {
                let accessor = Self::accessor_for(universe, guard)?;
                match self.read.install(guard, accessor) {
                    Install::Installed(accessor) => Ok(accessor.read(obj)),
                    Install::WentMegamorphic => Self::read_generic(universe, obj, index),
                }
            }
        }
    }

    /// Write `value` into field `index` of `obj`, answering the value
    pub fn write(
        &mut self,
        universe: &Universe,
        obj: &Instance,
        index: usize,
        value: Value,
    ) -> Result<Value> {
        let guard = FieldGuard {
            class: obj.class(),
            index,
        };
        match self.write.lookup(&guard) {
            Lookup::Hit(accessor) => Ok(accessor.write(obj, value)),
            Lookup::Generic => Self::write_generic(universe, obj, index, value),
            Lookup::Miss => {
                let accessor = Self::accessor_for(universe, guard)?;
                match self.write.install(guard, accessor) {
                    Install::Installed(accessor) => Ok(accessor.write(obj, value)),
                    Install::WentMegamorphic => Self::write_generic(universe, obj, index, value),
                }
            }
        }
    }

    /// The cache-free read path: slot read by index, no class specialization
    pub fn read_generic(universe: &Universe, obj: &Instance, index: usize) -> Result<Value> {
        obj.field(index)
            .ok_or_else(|| Self::out_of_bounds(universe, obj, index))
    }

    /// The cache-free write path: slot write by index, answering the value
    pub fn write_generic(
        universe: &Universe,
        obj: &Instance,
        index: usize,
        value: Value,
    ) -> Result<Value> {
        if obj.set_field(index, value.clone()) {
            Ok(value)
        } else {
            Err(Self::out_of_bounds(universe, obj, index))
        }
    }

    /// Derive the direct accessor for a guard, or fail without memoizing:
    /// an index outside the class layout is a resolution failure, not a
    /// specialization.
    fn accessor_for(universe: &Universe, guard: FieldGuard) -> Result<FieldAccessor> {
        let class = universe.class(guard.class);
        if guard.index >= class.n_fields {
            return Err(Error::FieldIndexOutOfBounds {
                class: class.name.clone(),
                index: guard.index,
                count: class.n_fields,
            });
        }
        Ok(FieldAccessor { index: guard.index })
    }

    fn out_of_bounds(universe: &Universe, obj: &Instance, index: usize) -> Error {
        Error::FieldIndexOutOfBounds {
            class: universe.class(obj.class()).name.clone(),
            index,
            count: obj.n_fields(),
        }
    }

    /// Observable state of the read chain
    pub fn read_state(&self) -> CacheState {
        self.read.state()
    }

    /// Observable state of the write chain
    pub fn write_state(&self) -> CacheState {
        self.write.state()
    }

    /// Number of installed read entries
    pub fn read_chain_length(&self) -> usize {
        self.read.chain_length()
    }

    /// Number of installed write entries
    pub fn write_chain_length(&self) -> usize {
        self.write.chain_length()
    }
}

impl Default for FieldDispatch {
    fn default() -> Self {
        Self::new()
    }
}
