//! Runtime value types
//!
//! This module defines the runtime representation of language values. The
//! representation is deliberately small: the dispatch core only needs enough
//! of a value universe to derive discriminants (class identity, selector
//! identity) and to carry results through invocations.

use crate::intern::SymbolId;
use crate::runtime::class::ClassId;
use crate::runtime::object::Instance;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// A runtime value
#[derive(Clone, PartialEq)]
pub enum Value {
    /// nil
    Nil,
    /// Boolean value
    Boolean(bool),
    /// 64-bit integer
    Integer(i64),
    /// Double-precision float
    Double(f64),
    /// Immutable string
    String(Rc<str>),
    /// Interned symbol
    Symbol(SymbolId),
    /// Mutable array with reference semantics
    Array(Rc<RefCell<Vec<Value>>>),
    /// A class, as a first-class value
    Class(ClassId),
    /// An instance with indexed field storage
    Instance(Rc<Instance>),
}

impl Value {
    /// Build a string value
    pub fn string(s: &str) -> Self {
        Value::String(Rc::from(s))
    }

    /// Build an array value from a vector of elements
    pub fn array(elements: Vec<Value>) -> Self {
        Value::Array(Rc::new(RefCell::new(elements)))
    }

    /// Human-readable name of this value's kind, for error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Boolean(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Double(_) => "double",
            Value::String(_) => "string",
            Value::Symbol(_) => "symbol",
            Value::Array(_) => "array",
            Value::Class(_) => "class",
            Value::Instance(_) => "instance",
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Double(d) => write!(f, "{}", d),
            Value::String(s) => write!(f, "'{}'", s),
            Value::Symbol(id) => write!(f, "#{}", crate::intern::symbol_name(*id)),
            Value::Array(items) => {
                write!(f, "#(")?;
                for (i, item) in items.borrow().iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{:?}", item)?;
                }
                write!(f, ")")
            }
            Value::Class(id) => write!(f, "<class {}>", id.0),
            Value::Instance(obj) => write!(f, "<instance of class {}>", obj.class().0),
        }
    }
}
