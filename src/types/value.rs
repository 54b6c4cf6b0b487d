//! Runtime values held on the evaluation stack.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::Serialize;

use crate::bridge::NativeCallable;
use crate::geometry::{Gasket, HexTiling, RichCircle, RichPoint, Sierpinski};

use super::{ClassKind, Colour, TypeDesc};

/// A script-visible object.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "class", rename_all = "lowercase")]
pub enum Object {
    Apollonian(Gasket),
    Sierpinski(Sierpinski),
    Hexagons(HexTiling),
    Point(RichPoint),
    Circle(RichCircle),
}

impl Object {
    pub fn class(&self) -> ClassKind {
        match self {
            Object::Apollonian(_) => ClassKind::Apollonian,
            Object::Sierpinski(_) => ClassKind::Sierpinski,
            Object::Hexagons(_) => ClassKind::Hexagons,
            Object::Point(_) => ClassKind::Point,
            Object::Circle(_) => ClassKind::Circle,
        }
    }
}

/// Shared handle to an object.
///
/// The render queue and script bindings hold the same handle, so a gasket
/// grown by `next()` shows its new circles on the next redraw.
pub type ObjRef = Rc<RefCell<Object>>;

/// A value on the evaluation stack.
#[derive(Clone)]
pub enum Value {
    Nothing,
    Number(f64),
    Text(Rc<str>),
    Colour(Colour),
    List(Rc<Vec<Value>>),
    Object(ObjRef),
    /// Placeholder the interpreter pushes beneath a call's arguments.
    Native(&'static NativeCallable),
}

impl Value {
    pub fn text(s: impl AsRef<str>) -> Self {
        Value::Text(Rc::from(s.as_ref()))
    }

    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Rc::new(items))
    }

    pub fn object(object: Object) -> Self {
        Value::Object(Rc::new(RefCell::new(object)))
    }

    /// The runtime type, used for overload resolution.
    pub fn type_desc(&self) -> TypeDesc {
        match self {
            Value::Nothing => TypeDesc::Nothing,
            Value::Number(_) => TypeDesc::Number,
            Value::Text(_) => TypeDesc::Text,
            Value::Colour(_) => TypeDesc::Colour,
            Value::List(_) => TypeDesc::List,
            Value::Object(obj) => TypeDesc::Class(obj.borrow().class()),
            Value::Native(_) => TypeDesc::Native,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjRef> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nothing => write!(f, "Nothing"),
            Value::Number(n) => write!(f, "Number({})", n),
            Value::Text(s) => write!(f, "Text({:?})", s),
            Value::Colour(c) => write!(f, "Colour({})", c),
            Value::List(items) => f.debug_list().entries(items.iter()).finish(),
            Value::Object(obj) => write!(f, "Object({})", obj.borrow().class()),
            Value::Native(callable) => write!(f, "Native({})", callable.name),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<Colour> for Value {
    fn from(c: Colour) -> Self {
        Value::Colour(c)
    }
}

impl From<Object> for Value {
    fn from(object: Object) -> Self {
        Value::object(object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    #[test]
    fn test_type_desc() {
        assert_eq!(Value::from(1.0).type_desc(), TypeDesc::Number);
        assert_eq!(Value::text("x").type_desc(), TypeDesc::Text);
        assert_eq!(Value::from(Colour::BLACK).type_desc(), TypeDesc::Colour);
        assert_eq!(Value::list(vec![]).type_desc(), TypeDesc::List);

        let gasket = Value::from(Object::Apollonian(Gasket::new(Point::default())));
        assert_eq!(
            gasket.type_desc(),
            TypeDesc::Class(ClassKind::Apollonian)
        );
    }

    #[test]
    fn test_objects_are_shared() {
        let value = Value::from(Object::Apollonian(Gasket::new(Point::default())));
        let alias = value.clone();

        if let Some(obj) = value.as_object() {
            if let Object::Apollonian(g) = &mut *obj.borrow_mut() {
                g.enclosing(10.0);
            }
        }

        let obj = alias.as_object().unwrap().borrow();
        match &*obj {
            Object::Apollonian(g) => assert_eq!(g.circles().len(), 3),
            other => panic!("unexpected object {:?}", other.class()),
        }
    }
}
