//! The universe: class registry, globals, and the collaborator operations
//! the dispatch core is written against
//!
//! The dispatch chains consume exactly this surface: `class_of`,
//! `lookup_invokable`, `invoke`, `global_exists`, and argument
//! materialization. Everything here is single-threaded by design; values
//! use `Rc`/`RefCell` reference semantics.

use crate::error::{Error, Result};
use crate::intern::{self, SymbolId};
use crate::runtime::class::{Class, ClassId, Invokable};
use crate::runtime::object::Instance;
use crate::runtime::value::Value;
use rustc_hash::FxHashMap as HashMap;
use std::rc::Rc;

/// Classes every universe starts with
#[derive(Debug, Clone, Copy)]
pub struct Builtins {
    pub object_class: ClassId,
    pub class_class: ClassId,
    pub nil_class: ClassId,
    pub boolean_class: ClassId,
    pub integer_class: ClassId,
    pub double_class: ClassId,
    pub string_class: ClassId,
    pub symbol_class: ClassId,
    pub array_class: ClassId,
}

/// The object-model surface the dispatch core collaborates with
pub struct Universe {
    classes: Vec<Class>,
    globals: HashMap<SymbolId, Value>,
    builtins: Builtins,
}

impl Universe {
    /// Create a universe with the builtin classes registered and bound as
    /// globals under their names
    pub fn new() -> Self {
        let mut classes = Vec::new();
        let mut register = |name: &str, superclass: Option<ClassId>| {
            let id = ClassId(classes.len() as u32);
            classes.push(Class::new(name, superclass, 0));
            id
        };

        let object_class = register("Object", None);
        let builtins = Builtins {
            object_class,
            class_class: register("Class", Some(object_class)),
            nil_class: register("Nil", Some(object_class)),
            boolean_class: register("Boolean", Some(object_class)),
            integer_class: register("Integer", Some(object_class)),
            double_class: register("Double", Some(object_class)),
            string_class: register("String", Some(object_class)),
            symbol_class: register("Symbol", Some(object_class)),
            array_class: register("Array", Some(object_class)),
        };

        let mut universe = Self {
            classes,
            globals: HashMap::default(),
            builtins,
        };

        for id in 0..universe.classes.len() {
            let id = ClassId(id as u32);
            let name = intern::intern(&universe.class(id).name);
            universe.set_global(name, Value::Class(id));
        }

        universe
    }

    /// The builtin class identities
    pub fn builtins(&self) -> &Builtins {
        &self.builtins
    }

    /// Register a class, returning its identity
    pub fn add_class(&mut self, class: Class) -> ClassId {
        let id = ClassId(self.classes.len() as u32);
        self.classes.push(class);
        id
    }

    /// Borrow a class by identity
    ///
    /// Panics if `id` was not issued by this universe; class identities are
    /// never forged or shared across universes.
    pub fn class(&self, id: ClassId) -> &Class {
        &self.classes[id.0 as usize]
    }

    /// Mutably borrow a class, e.g. to install methods
    pub fn class_mut(&mut self, id: ClassId) -> &mut Class {
        &mut self.classes[id.0 as usize]
    }

    /// Allocate an instance of `class` with its declared field layout
    pub fn new_instance(&self, class: ClassId) -> Rc<Instance> {
        Instance::new(class, self.class(class).n_fields)
    }

    /// Runtime class of a value
    pub fn class_of(&self, value: &Value) -> ClassId {
        match value {
            Value::Nil => self.builtins.nil_class,
            Value::Boolean(_) => self.builtins.boolean_class,
            Value::Integer(_) => self.builtins.integer_class,
            Value::Double(_) => self.builtins.double_class,
            Value::String(_) => self.builtins.string_class,
            Value::Symbol(_) => self.builtins.symbol_class,
            Value::Array(_) => self.builtins.array_class,
            Value::Class(_) => self.builtins.class_class,
            Value::Instance(obj) => obj.class(),
        }
    }

    /// Resolve `selector` starting at `class`, walking the superclass chain
    pub fn lookup_invokable(&self, class: ClassId, selector: SymbolId) -> Option<Invokable> {
        let mut current = Some(class);
        while let Some(id) = current {
            if let Some(invokable) = self.class(id).bind(selector, id) {
                return Some(invokable);
            }
            current = self.class(id).superclass;
        }
        None
    }

    /// Indirect invocation of a resolved target
    #[inline]
    pub fn invoke(&self, invokable: &Invokable, arguments: &[Value]) -> Result<Value> {
        invokable.call(self, arguments)
    }

    /// The error raised when `selector` cannot be resolved from `class`
    pub fn does_not_understand(&self, class: ClassId, selector: SymbolId) -> Error {
        Error::DoesNotUnderstand {
            class: self.class(class).name.clone(),
            selector: intern::symbol_name(selector),
        }
    }

    /// Bind a global name to a value
    pub fn set_global(&mut self, name: SymbolId, value: Value) {
        self.globals.insert(name, value);
    }

    /// Read a global by name
    pub fn global(&self, name: SymbolId) -> Option<&Value> {
        self.globals.get(&name)
    }

    /// Whether a global of this name exists
    #[inline]
    pub fn global_exists(&self, name: SymbolId) -> bool {
        self.globals.contains_key(&name)
    }

    /// Materialize an invocation argument list: the receiver, followed by
    /// the elements of the packed argument array when one is supplied
    pub fn materialize_arguments(
        &self,
        receiver: &Value,
        packed: Option<&Value>,
    ) -> Result<Vec<Value>> {
        match packed {
            None => Ok(vec![receiver.clone()]),
            Some(Value::Array(items)) => {
                let items = items.borrow();
                let mut arguments = Vec::with_capacity(items.len() + 1);
                arguments.push(receiver.clone());
                arguments.extend(items.iter().cloned());
                Ok(arguments)
            }
            Some(other) => Err(Error::InternalError(format!(
                "packed arguments must be an array, got {}",
                other.kind_name()
            ))),
        }
    }
}

impl Default for Universe {
    fn default() -> Self {
        Self::new()
    }
}
