//! Callable values and receiver binding

use std::fmt;
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::value::Value;

type Callable = dyn Fn(&Value, &[Value]) -> Result<Value>;

/// A callable value.
///
/// The wrapped closure receives the receiver (`this`) and the call
/// arguments. Cloning a `Function` shares the closure.
#[derive(Clone)]
pub struct Function {
    inner: Rc<Callable>,
}

impl Function {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Value, &[Value]) -> Result<Value> + 'static,
    {
        Self { inner: Rc::new(f) }
    }

    /// Invoke with `this` as receiver
    pub fn call(&self, this: &Value, args: &[Value]) -> Result<Value> {
        (self.inner)(this, args)
    }

    /// True if both values wrap the same closure
    pub fn ptr_eq(&self, other: &Function) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Function({:p})", Rc::as_ptr(&self.inner))
    }
}

/// Return a function that always calls `func` with `context` as receiver.
///
/// Whatever receiver the bound function is invoked with is ignored; the
/// arguments are forwarded unchanged.
pub fn bind(func: &Function, context: Value) -> Function {
    let func = func.clone();
    Function::new(move |_this, args| func.call(&context, args))
}

/// Call `callee` if it is a function, failing with `Error::NotCallable` otherwise.
pub fn invoke(callee: &Value, this: &Value, args: &[Value]) -> Result<Value> {
    match callee {
        Value::Function(func) => func.call(this, args),
        other => Err(Error::NotCallable {
            kind: other.type_name().to_string(),
        }),
    }
}
