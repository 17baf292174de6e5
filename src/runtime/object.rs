//! Instances with indexed field storage
//!
//! An instance stores its fields as a flat vector indexed by the field
//! offsets its class's layout declares. Reads and writes by index are the
//! generic slot operations; the dispatch core layers class-specialized
//! accessors on top of them.

use crate::runtime::class::ClassId;
use crate::runtime::value::Value;
use std::cell::RefCell;
use std::rc::Rc;

/// An object with indexed fields
#[derive(Debug, PartialEq)]
pub struct Instance {
    class: ClassId,
    fields: RefCell<Vec<Value>>,
}

impl Instance {
    /// Allocate an instance of `class` with `n_fields` nil-initialized fields
    pub fn new(class: ClassId, n_fields: usize) -> Rc<Self> {
        Rc::new(Self {
            class,
            fields: RefCell::new(vec![Value::Nil; n_fields]),
        })
    }

    /// Class identity of this instance
    #[inline]
    pub fn class(&self) -> ClassId {
        self.class
    }

    /// Number of fields in this instance's layout
    #[inline]
    pub fn n_fields(&self) -> usize {
        self.fields.borrow().len()
    }

    /// Generic slot read by index
    #[inline]
    pub fn field(&self, index: usize) -> Option<Value> {
        self.fields.borrow().get(index).cloned()
    }

    /// Generic slot write by index; `false` if the index is out of bounds
    #[inline]
    pub fn set_field(&self, index: usize, value: Value) -> bool {
        let mut fields = self.fields.borrow_mut();
        match fields.get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }
}
