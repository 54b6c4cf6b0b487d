//! `Sierp`: Sierpinski triangles.

use crate::bridge::{Args, ClassDesc, NativeCallable, OverloadSet, Session, Signature};
use crate::error::Result;
use crate::geometry::{Point, Sierpinski, Triangle};
use crate::types::{ClassKind, ObjRef, Object, TypeDesc, Value};

use super::{class_type, draw_method, new_object, wrong_receiver};

const KIND: ClassKind = ClassKind::Sierpinski;

pub(super) fn class() -> Result<ClassDesc> {
    let this = class_type(KIND);
    let point = class_type(ClassKind::Point);

    let constructor = NativeCallable::new(
        "Sierp",
        OverloadSet::new(vec![
            Signature::returns(this)
                .param("x1", TypeDesc::Number)
                .param("y1", TypeDesc::Number)
                .param("x2", TypeDesc::Number)
                .param("y2", TypeDesc::Number)
                .param("x3", TypeDesc::Number)
                .param("y3", TypeDesc::Number),
            Signature::returns(this)
                .param("a", point)
                .param("b", point)
                .param("c", point),
        ])?,
        construct,
    );

    let methods = vec![
        NativeCallable::new(
            "Sierp.next",
            OverloadSet::new(vec![Signature::returns(TypeDesc::Nothing).param("self", this)])?,
            next,
        ),
        NativeCallable::new(
            "Sierp.count",
            OverloadSet::new(vec![Signature::returns(TypeDesc::Number).param("self", this)])?,
            count,
        ),
        draw_method(KIND, "Sierp.draw")?,
    ];

    Ok(ClassDesc {
        kind: KIND,
        constructor,
        methods,
    })
}

fn with_fractal<R>(object: &ObjRef, f: impl FnOnce(&mut Sierpinski) -> R) -> Result<R> {
    let mut object = object.borrow_mut();
    match &mut *object {
        Object::Sierpinski(fractal) => Ok(f(fractal)),
        other => Err(wrong_receiver(KIND, other.class())),
    }
}

fn point_arg(args: &Args, index: usize) -> Result<Point> {
    let object = args.object(index)?;
    let object = object.borrow();
    match &*object {
        Object::Point(p) => Ok(p.point),
        other => Err(wrong_receiver(ClassKind::Point, other.class())),
    }
}

fn construct(_: &mut Session, args: Args) -> Result<Value> {
    let seed = match args.overload() {
        0 => Triangle::new(
            Point::new(args.number(0)?, args.number(1)?),
            Point::new(args.number(2)?, args.number(3)?),
            Point::new(args.number(4)?, args.number(5)?),
        ),
        _ => Triangle::new(point_arg(&args, 0)?, point_arg(&args, 1)?, point_arg(&args, 2)?),
    };

    if seed.is_degenerate() {
        tracing::warn!(?seed, "degenerate Sierpinski seed; subdivisions will not be finite");
    }
    Ok(new_object(Object::Sierpinski(Sierpinski::new(seed))))
}

fn next(session: &mut Session, args: Args) -> Result<Value> {
    with_fractal(&args.object(0)?, Sierpinski::next)?;
    session.render();
    Ok(Value::Nothing)
}

fn count(_: &mut Session, args: Args) -> Result<Value> {
    let n = with_fractal(&args.object(0)?, |f| f.triangles().len())?;
    Ok(Value::Number(n as f64))
}
