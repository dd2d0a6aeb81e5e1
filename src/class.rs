//! Classes built from delegating prototypes
//!
//! A [`Class`] owns a [`Prototype`]: a table of methods plus an optional
//! parent prototype that lookups fall back to. [`inherits`] splices a base
//! class into a class's chain by giving it a fresh prototype whose parent is
//! the base's prototype. Nothing is patched in place; the old prototype is
//! left untouched.
//!
//! An [`Instance`] holds the prototype its class had when the instance was
//! created. Instances created before `inherits` therefore keep the old
//! chain, so `inherits` belongs right after the class's methods are
//! defined and before any instance exists.
//!
//! ## Example
//!
//! ```
//! use dynval::class::{inherits, Class};
//! use dynval::Value;
//!
//! let shape = Class::new("Shape");
//! shape.define("kind", Value::function(|_, _| Ok(Value::from("shape"))));
//!
//! let circle = Class::new("Circle");
//! circle.define("radius", Value::function(|_, _| Ok(Value::from(2))));
//! inherits(&circle, &shape);
//!
//! let c = circle.instantiate();
//! assert_eq!(c.invoke("kind", &[]).unwrap(), Value::from("shape"));
//! assert_eq!(c.invoke("radius", &[]).unwrap(), Value::from(2));
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use log::debug;

use crate::error::{Error, Result};
use crate::function::invoke;
use crate::value::{Key, Map, Value};

/// A method table with an optional parent to delegate to
#[derive(Debug, Default)]
pub struct Prototype {
    methods: RefCell<Map>,
    parent: Option<Rc<Prototype>>,
}

impl Prototype {
    fn with_parent(parent: Rc<Prototype>) -> Self {
        Self {
            methods: RefCell::new(Map::new()),
            parent: Some(parent),
        }
    }

    /// Find `name` in this table or the nearest ancestor that defines it
    pub fn lookup(&self, name: &str) -> Option<Value> {
        if let Some(found) = self.methods.borrow().get(name) {
            return Some(found.clone());
        }
        self.parent.as_ref().and_then(|parent| parent.lookup(name))
    }

    pub fn parent(&self) -> Option<&Rc<Prototype>> {
        self.parent.as_ref()
    }

    /// Names defined directly on this prototype
    pub fn own_names(&self) -> Vec<String> {
        self.methods.borrow().keys().cloned().collect()
    }

    /// Every entry reachable through the chain, nearer definitions winning
    fn visible_entries(&self) -> Map {
        let mut entries = match &self.parent {
            Some(parent) => parent.visible_entries(),
            None => Map::new(),
        };
        for (name, value) in self.methods.borrow().iter() {
            entries.insert(name.clone(), value.clone());
        }
        entries
    }
}

/// A named class whose prototype can be rewired by [`inherits`]
#[derive(Debug)]
pub struct Class {
    name: String,
    prototype: RefCell<Rc<Prototype>>,
}

impl Class {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prototype: RefCell::new(Rc::new(Prototype::default())),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The class's current prototype
    pub fn prototype(&self) -> Rc<Prototype> {
        self.prototype.borrow().clone()
    }

    /// Define (or replace) `name` on the current prototype
    pub fn define(&self, name: impl Into<String>, value: Value) {
        self.prototype
            .borrow()
            .methods
            .borrow_mut()
            .insert(name.into(), value);
    }

    /// Create an instance bound to the current prototype, with no fields
    pub fn instantiate(&self) -> Instance {
        self.instantiate_with(Value::empty_object())
    }

    /// Create an instance bound to the current prototype.
    ///
    /// `fields` becomes the instance's own state and the receiver of every
    /// method call.
    pub fn instantiate_with(&self, fields: Value) -> Instance {
        Instance {
            class_name: self.name.clone(),
            prototype: self.prototype(),
            fields,
        }
    }
}

/// Make instances of `clazz` delegate to `base_clazz`'s prototype.
///
/// `clazz` gets a new prototype whose parent is `base_clazz`'s prototype.
/// Every entry visible through `clazz`'s old prototype is copied onto the new
/// one, so methods defined before the call survive and keep precedence over
/// the base's.
pub fn inherits(clazz: &Class, base_clazz: &Class) {
    let old = clazz.prototype();
    let spliced = Prototype::with_parent(base_clazz.prototype());
    *spliced.methods.borrow_mut() = old.visible_entries();

    debug!(
        "Class {} now inherits from {} ({} methods carried over)",
        clazz.name,
        base_clazz.name,
        spliced.methods.borrow().len()
    );

    *clazz.prototype.borrow_mut() = Rc::new(spliced);
}

/// An object created from a [`Class`]
#[derive(Debug, Clone)]
pub struct Instance {
    class_name: String,
    prototype: Rc<Prototype>,
    fields: Value,
}

impl Instance {
    /// The instance's own state
    pub fn fields(&self) -> &Value {
        &self.fields
    }

    /// Look up `name` on the instance's own fields, then along its prototype chain
    pub fn get(&self, name: &str) -> Option<Value> {
        self.fields
            .get(&Key::Name(name.to_string()))
            .or_else(|| self.prototype.lookup(name))
    }

    /// Call method `name` with the instance's fields as receiver.
    ///
    /// # Errors
    ///
    /// Returns `Error::MethodNotFound` if nothing in the chain defines `name`
    /// and `Error::NotCallable` if the entry found is not a function.
    pub fn invoke(&self, name: &str, args: &[Value]) -> Result<Value> {
        let method = self.get(name).ok_or_else(|| Error::MethodNotFound {
            class: self.class_name.clone(),
            method: name.to_string(),
        })?;
        invoke(&method, &self.fields, args)
    }

    /// True if `class`'s current prototype is on this instance's chain
    pub fn is_instance_of(&self, class: &Class) -> bool {
        let target = class.prototype();
        let mut current = Some(&self.prototype);
        while let Some(proto) = current {
            if Rc::ptr_eq(proto, &target) {
                return true;
            }
            current = proto.parent();
        }
        false
    }
}
