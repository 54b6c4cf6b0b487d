//! Native callables and the stack calling convention.
//!
//! To call a native the interpreter pushes the callable itself as a
//! placeholder, then the arguments left to right. The bridge resolves the
//! overload from the argument types, pops the arguments (right to left,
//! handed to the host function left to right), pops the placeholder, runs
//! the host function and pushes its result unless the signature returns
//! `Nothing`.
//!
//! Any disagreement between what resolution promised and what the stack
//! actually holds is an internal error, never a coercion.

use std::fmt;
use std::rc::Rc;

use crate::error::{Result, SketchError};
use crate::types::{Colour, ObjRef, TypeDesc, Value};

use super::session::{Session, ValueStack};
use super::signature::{OverloadSet, Resolved};

/// Host implementation of a native.
pub type NativeFn = fn(&mut Session, Args) -> Result<Value>;

/// A named native with its overloads.
pub struct NativeCallable {
    pub name: &'static str,
    overloads: OverloadSet,
    func: NativeFn,
}

impl fmt::Debug for NativeCallable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NativeCallable({})", self.name)
    }
}

impl NativeCallable {
    pub fn new(name: &'static str, overloads: OverloadSet, func: NativeFn) -> Self {
        Self {
            name,
            overloads,
            func,
        }
    }

    pub fn overloads(&self) -> &OverloadSet {
        &self.overloads
    }

    /// Resolve the overload for these argument types without touching any stack.
    pub fn resolve(&self, args: &[TypeDesc]) -> Result<Resolved<'_>> {
        self.overloads.resolve(self.name, args)
    }

    /// Invoke with `argc` arguments already pushed above this callable's placeholder.
    ///
    /// On `TypeMismatch` the stack is left exactly as it was. When the host
    /// function fails or returns the wrong type, whatever it enqueued or
    /// asked to redraw is withdrawn.
    pub fn invoke(&'static self, session: &mut Session, argc: usize) -> Result<()> {
        let types = arg_types(session, argc)?;
        let resolved = self.resolve(&types)?;

        tracing::trace!(
            native = self.name,
            overload = resolved.index,
            args = %crate::types::format_types(&types),
            "invoke"
        );

        let values = pop_args(session, argc)?;
        let args = Args::bind(self.name, resolved, values)?;

        match session.pop() {
            Some(Value::Native(callee)) if std::ptr::eq(callee, self) => {}
            Some(other) => {
                return Err(SketchError::internal(format!(
                    "{}: expected callable placeholder under the arguments, found {:?}",
                    self.name, other
                )))
            }
            None => {
                return Err(SketchError::internal(format!(
                    "{}: stack underflow reading callable placeholder",
                    self.name
                )))
            }
        }

        let ret = resolved.signature.return_type();
        let mark = session.checkpoint();
        let result = match (self.func)(session, args) {
            Ok(result) => result,
            Err(err) => {
                session.rollback(mark);
                return Err(err);
            }
        };

        if result.type_desc() != ret {
            session.rollback(mark);
            return Err(SketchError::internal(format!(
                "{} returned {} but its signature promises {}",
                self.name,
                result.type_desc(),
                ret
            )));
        }

        if ret != TypeDesc::Nothing {
            session.push(result);
        }
        Ok(())
    }
}

/// Types of the top `argc` values, in left-to-right argument order.
pub fn arg_types<S: ValueStack + ?Sized>(stack: &S, argc: usize) -> Result<Vec<TypeDesc>> {
    (0..argc)
        .rev()
        .map(|depth| {
            stack
                .peek(depth)
                .map(Value::type_desc)
                .ok_or_else(|| underflow(argc, stack.depth()))
        })
        .collect()
}

/// Pop `argc` values and return them in left-to-right argument order.
///
/// This is the only place the reverse-pop order of the calling convention
/// is handled.
pub fn pop_args<S: ValueStack + ?Sized>(stack: &mut S, argc: usize) -> Result<Vec<Value>> {
    if stack.depth() < argc {
        return Err(underflow(argc, stack.depth()));
    }

    let mut values = Vec::with_capacity(argc);
    for _ in 0..argc {
        match stack.pop() {
            Some(value) => values.push(value),
            None => return Err(underflow(argc, values.len())),
        }
    }
    values.reverse();
    Ok(values)
}

fn underflow(wanted: usize, depth: usize) -> SketchError {
    SketchError::internal(format!(
        "stack underflow: call needs {} argument(s), stack holds {}",
        wanted, depth
    ))
}

/// Arguments of one call, checked against the resolved signature.
pub struct Args {
    callee: &'static str,
    overload: usize,
    values: Vec<Value>,
}

impl Args {
    /// Pair popped values with the resolved signature.
    ///
    /// Fails with an internal error if a value's type differs from its
    /// parameter's, which means resolution and popping disagreed.
    pub fn bind(callee: &'static str, resolved: Resolved<'_>, values: Vec<Value>) -> Result<Self> {
        let params = resolved.signature.params();
        if params.len() != values.len() {
            return Err(SketchError::internal(format!(
                "{}: resolved {} parameter(s) but popped {} value(s)",
                callee,
                params.len(),
                values.len()
            )));
        }

        for (param, value) in params.iter().zip(&values) {
            if value.type_desc() != param.ty {
                return Err(SketchError::internal(format!(
                    "{}: parameter '{}' expects {}, popped {}",
                    callee,
                    param.name,
                    param.ty,
                    value.type_desc()
                )));
            }
        }

        Ok(Self {
            callee,
            overload: resolved.index,
            values,
        })
    }

    /// Index of the overload that matched.
    pub fn overload(&self) -> usize {
        self.overload
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&Value> {
        self.values.get(index).ok_or_else(|| {
            SketchError::internal(format!("{}: no argument at position {}", self.callee, index))
        })
    }

    pub fn number(&self, index: usize) -> Result<f64> {
        match self.get(index)? {
            Value::Number(n) => Ok(*n),
            other => Err(self.wrong(index, "Number", other)),
        }
    }

    pub fn text(&self, index: usize) -> Result<Rc<str>> {
        match self.get(index)? {
            Value::Text(s) => Ok(s.clone()),
            other => Err(self.wrong(index, "Text", other)),
        }
    }

    pub fn colour(&self, index: usize) -> Result<Colour> {
        match self.get(index)? {
            Value::Colour(c) => Ok(*c),
            other => Err(self.wrong(index, "Colour", other)),
        }
    }

    pub fn object(&self, index: usize) -> Result<ObjRef> {
        match self.get(index)? {
            Value::Object(obj) => Ok(obj.clone()),
            other => Err(self.wrong(index, "an object", other)),
        }
    }

    fn wrong(&self, index: usize, expected: &str, got: &Value) -> SketchError {
        SketchError::internal(format!(
            "{}: argument {} should be {}, got {}",
            self.callee,
            index,
            expected,
            got.type_desc()
        ))
    }
}

/// Call a native the way the interpreter does: placeholder, arguments, invoke.
///
/// Returns the pushed result, or `None` for `Nothing`-returning calls.
pub fn call(
    session: &mut Session,
    callable: &'static NativeCallable,
    args: Vec<Value>,
) -> Result<Option<Value>> {
    let depth = session.depth();
    let argc = args.len();

    session.push(Value::Native(callable));
    for arg in args {
        session.push(arg);
    }

    if let Err(err) = callable.invoke(session, argc) {
        // Drop whatever the failed call left above the caller's stack.
        while session.depth() > depth {
            session.pop();
        }
        return Err(err);
    }

    if session.depth() > depth {
        Ok(session.pop())
    } else {
        Ok(None)
    }
}
