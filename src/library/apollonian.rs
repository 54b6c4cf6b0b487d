//! `Apol`: Apollonian gaskets.

use crate::bridge::{Args, ClassDesc, NativeCallable, OverloadSet, Session, Signature};
use crate::error::Result;
use crate::geometry::{Gasket, Point};
use crate::types::{ClassKind, ObjRef, Object, TypeDesc, Value};

use super::{class_type, draw_method, new_object, wrong_receiver};

const KIND: ClassKind = ClassKind::Apollonian;

pub(super) fn class() -> Result<ClassDesc> {
    let this = class_type(KIND);

    let constructor = NativeCallable::new(
        "Apol",
        OverloadSet::new(vec![
            Signature::returns(this),
            Signature::returns(this)
                .param("x", TypeDesc::Number)
                .param("y", TypeDesc::Number),
        ])?,
        construct,
    );

    let methods = vec![
        NativeCallable::new(
            "Apol.enclosing",
            OverloadSet::new(vec![Signature::returns(TypeDesc::Nothing)
                .param("self", this)
                .param("r", TypeDesc::Number)])?,
            enclosing,
        ),
        NativeCallable::new(
            "Apol.next",
            OverloadSet::new(vec![Signature::returns(TypeDesc::Nothing).param("self", this)])?,
            next,
        ),
        NativeCallable::new(
            "Apol.count",
            OverloadSet::new(vec![Signature::returns(TypeDesc::Number).param("self", this)])?,
            count,
        ),
        draw_method(KIND, "Apol.draw")?,
    ];

    Ok(ClassDesc {
        kind: KIND,
        constructor,
        methods,
    })
}

fn with_gasket<R>(object: &ObjRef, f: impl FnOnce(&mut Gasket) -> R) -> Result<R> {
    let mut object = object.borrow_mut();
    match &mut *object {
        Object::Apollonian(gasket) => Ok(f(gasket)),
        other => Err(wrong_receiver(KIND, other.class())),
    }
}

fn construct(_: &mut Session, args: Args) -> Result<Value> {
    let origin = match args.overload() {
        0 => Point::default(),
        _ => Point::new(args.number(0)?, args.number(1)?),
    };
    Ok(new_object(Object::Apollonian(Gasket::new(origin))))
}

fn enclosing(session: &mut Session, args: Args) -> Result<Value> {
    let radius = args.number(1)?;
    with_gasket(&args.object(0)?, |g| g.enclosing(radius))?;
    session.render();
    Ok(Value::Nothing)
}

fn next(session: &mut Session, args: Args) -> Result<Value> {
    with_gasket(&args.object(0)?, Gasket::next)?;
    session.render();
    Ok(Value::Nothing)
}

fn count(_: &mut Session, args: Args) -> Result<Value> {
    let n = with_gasket(&args.object(0)?, |g| g.circles().len())?;
    Ok(Value::Number(n as f64))
}
