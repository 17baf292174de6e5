//! Classes and invokable methods
//!
//! A class declares an indexed field layout (a field count) and a method
//! table keyed by interned selector. Methods are native functions over the
//! universe and an argument list whose first element is the receiver.

use crate::error::Result;
use crate::intern::SymbolId;
use crate::runtime::universe::Universe;
use crate::runtime::value::Value;
use rustc_hash::FxHashMap as HashMap;
use std::rc::Rc;

/// Identity of a class within a universe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassId(pub u32);

/// Type alias for native method implementations
pub type NativeFn = Rc<dyn Fn(&Universe, &[Value]) -> Result<Value>>;

/// A resolved, invokable method
#[derive(Clone)]
pub struct Invokable {
    /// Selector this method answers to
    pub selector: SymbolId,
    /// Class that holds the method (where lookup found it)
    pub holder: ClassId,
    /// The method body
    code: NativeFn,
}

impl Invokable {
    /// Execute the method body
    #[inline]
    pub fn call(&self, universe: &Universe, arguments: &[Value]) -> Result<Value> {
        (self.code)(universe, arguments)
    }
}

/// A class: name, superclass link, field layout, and method table
pub struct Class {
    /// Class name, for error messages and global registration
    pub name: String,
    /// Superclass, `None` only for the root class
    pub superclass: Option<ClassId>,
    /// Number of indexed fields instances of this class carry
    pub n_fields: usize,
    /// Methods defined directly on this class
    methods: HashMap<SymbolId, NativeFn>,
}

impl Class {
    /// Create a class with the given name, superclass, and field count
    pub fn new(name: &str, superclass: Option<ClassId>, n_fields: usize) -> Self {
        Self {
            name: name.to_string(),
            superclass,
            n_fields,
            methods: HashMap::default(),
        }
    }

    /// Install a method under `selector`, replacing any previous definition
    pub fn install_method(&mut self, selector: SymbolId, code: NativeFn) {
        self.methods.insert(selector, code);
    }

    /// Look up a method defined directly on this class (no superclass walk)
    pub fn local_method(&self, selector: SymbolId) -> Option<&NativeFn> {
        self.methods.get(&selector)
    }

    pub(crate) fn bind(&self, selector: SymbolId, holder: ClassId) -> Option<Invokable> {
        self.methods.get(&selector).map(|code| Invokable {
            selector,
            holder,
            code: Rc::clone(code),
        })
    }
}
