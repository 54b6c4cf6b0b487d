//! `Point` and `Circle`: labelled construction-diagram shapes.

use crate::bridge::{Args, ClassDesc, NativeCallable, OverloadSet, Session, Signature};
use crate::error::Result;
use crate::geometry::{RichCircle, RichPoint};
use crate::types::{ClassKind, ObjRef, Object, TypeDesc, Value};

use super::{class_type, draw_method, field, new_object, wrong_receiver};

pub(super) fn point_class() -> Result<ClassDesc> {
    let this = class_type(ClassKind::Point);

    let constructor = NativeCallable::new(
        "Point",
        OverloadSet::new(vec![
            Signature::returns(this)
                .param("x", TypeDesc::Number)
                .param("y", TypeDesc::Number),
            Signature::returns(this)
                .param("x", TypeDesc::Number)
                .param("y", TypeDesc::Number)
                .param("label", TypeDesc::Text),
        ])?,
        construct_point,
    );

    let methods = vec![
        NativeCallable::new(
            "Point.get",
            OverloadSet::new(vec![Signature::returns(TypeDesc::Number)
                .param("self", this)
                .param("field", TypeDesc::Text)])?,
            point_get,
        ),
        draw_method(ClassKind::Point, "Point.draw")?,
    ];

    Ok(ClassDesc {
        kind: ClassKind::Point,
        constructor,
        methods,
    })
}

pub(super) fn circle_class() -> Result<ClassDesc> {
    let this = class_type(ClassKind::Circle);

    let constructor = NativeCallable::new(
        "Circle",
        OverloadSet::new(vec![
            Signature::returns(this)
                .param("x", TypeDesc::Number)
                .param("y", TypeDesc::Number)
                .param("r", TypeDesc::Number),
            Signature::returns(this)
                .param("x", TypeDesc::Number)
                .param("y", TypeDesc::Number)
                .param("r", TypeDesc::Number)
                .param("label", TypeDesc::Text),
            Signature::returns(this)
                .param("center", class_type(ClassKind::Point))
                .param("r", TypeDesc::Number),
        ])?,
        construct_circle,
    );

    let methods = vec![
        NativeCallable::new(
            "Circle.get",
            OverloadSet::new(vec![Signature::returns(TypeDesc::Number)
                .param("self", this)
                .param("field", TypeDesc::Text)])?,
            circle_get,
        ),
        NativeCallable::new(
            "Circle.intersect",
            OverloadSet::new(vec![Signature::returns(TypeDesc::List)
                .param("self", this)
                .param("other", this)])?,
            intersect,
        ),
        draw_method(ClassKind::Circle, "Circle.draw")?,
    ];

    Ok(ClassDesc {
        kind: ClassKind::Circle,
        constructor,
        methods,
    })
}

fn point_of(object: &ObjRef) -> Result<RichPoint> {
    match &*object.borrow() {
        Object::Point(p) => Ok(p.clone()),
        other => Err(wrong_receiver(ClassKind::Point, other.class())),
    }
}

fn circle_of(object: &ObjRef) -> Result<RichCircle> {
    match &*object.borrow() {
        Object::Circle(c) => Ok(c.clone()),
        other => Err(wrong_receiver(ClassKind::Circle, other.class())),
    }
}

fn construct_point(_: &mut Session, args: Args) -> Result<Value> {
    let mut point = RichPoint::new(args.number(0)?, args.number(1)?);
    if args.overload() == 1 {
        point = point.with_label(&*args.text(2)?);
    }
    Ok(new_object(Object::Point(point)))
}

fn point_get(_: &mut Session, args: Args) -> Result<Value> {
    let point = point_of(&args.object(0)?)?;
    let name = args.text(1)?;
    field(ClassKind::Point, RichPoint::FIELDS, &name, point.field(&name))
}

fn construct_circle(_: &mut Session, args: Args) -> Result<Value> {
    let circle = match args.overload() {
        0 => RichCircle::new(args.number(0)?, args.number(1)?, args.number(2)?),
        1 => RichCircle::new(args.number(0)?, args.number(1)?, args.number(2)?)
            .with_label(&*args.text(3)?),
        _ => {
            let center = point_of(&args.object(0)?)?.point;
            RichCircle::new(center.x, center.y, args.number(1)?)
        }
    };
    Ok(new_object(Object::Circle(circle)))
}

fn circle_get(_: &mut Session, args: Args) -> Result<Value> {
    let circle = circle_of(&args.object(0)?)?;
    let name = args.text(1)?;
    field(ClassKind::Circle, RichCircle::FIELDS, &name, circle.field(&name))
}

fn intersect(_: &mut Session, args: Args) -> Result<Value> {
    let a = circle_of(&args.object(0)?)?;
    let b = circle_of(&args.object(1)?)?;
    let points = a
        .intersect(&b)
        .into_iter()
        .map(|p| new_object(Object::Point(p)))
        .collect();
    Ok(Value::list(points))
}

#[cfg(test)]
mod tests {
    use crate::bridge::{call, registry, Session};
    use crate::error::SketchError;
    use crate::library::testing::call_named;
    use crate::types::{Object, Value};

    fn get(session: &mut Session, name: &str, obj: &Value, field: &str) -> Option<f64> {
        call_named(session, name, vec![obj.clone(), Value::text(field)]).and_then(|v| v.as_number())
    }

    #[test]
    fn test_point_fields_and_label() {
        let mut session = Session::new();
        let p = call_named(
            &mut session,
            "Point",
            vec![Value::from(3.0), Value::from(4.0), Value::text("P")],
        )
        .unwrap();

        assert_eq!(get(&mut session, "Point.get", &p, "x"), Some(3.0));
        assert_eq!(get(&mut session, "Point.get", &p, "y"), Some(4.0));
        let object = p.as_object().unwrap().borrow();
        match &*object {
            Object::Point(rp) => assert_eq!(rp.label.as_deref(), Some("P")),
            other => panic!("expected a point, got {:?}", other.class()),
        }
    }

    #[test]
    fn test_unknown_field() {
        let mut session = Session::new();
        let c = call_named(
            &mut session,
            "Circle",
            vec![Value::from(0.0), Value::from(0.0), Value::from(1.0)],
        )
        .unwrap();

        let getter = registry().get("Circle.get").unwrap();
        let err = call(&mut session, getter, vec![c, Value::text("z")]).unwrap_err();
        assert!(matches!(err, SketchError::UnknownField { ref field, .. } if field == "z"));
        assert_eq!(session.stack().len(), 0);
    }

    #[test]
    fn test_circle_from_point() {
        let mut session = Session::new();
        let p = call_named(&mut session, "Point", vec![Value::from(1.0), Value::from(2.0)]).unwrap();
        let c = call_named(&mut session, "Circle", vec![p, Value::from(5.0)]).unwrap();

        assert_eq!(get(&mut session, "Circle.get", &c, "x"), Some(1.0));
        assert_eq!(get(&mut session, "Circle.get", &c, "r"), Some(5.0));
    }

    #[test]
    fn test_intersect_returns_points() {
        let mut session = Session::new();
        let a = call_named(
            &mut session,
            "Circle",
            vec![Value::from(-3.0), Value::from(0.0), Value::from(5.0)],
        )
        .unwrap();
        let b = call_named(
            &mut session,
            "Circle",
            vec![Value::from(3.0), Value::from(0.0), Value::from(5.0)],
        )
        .unwrap();

        let crossing = call_named(&mut session, "Circle.intersect", vec![a.clone(), b]).unwrap();
        let points = crossing.as_list().unwrap();
        assert_eq!(points.len(), 2);

        let ys: Vec<f64> = points
            .iter()
            .map(|p| get(&mut session, "Point.get", p, "y").unwrap())
            .collect();
        assert!((ys[0] + ys[1]).abs() < 1e-9);
        assert!((ys[0].abs() - 4.0).abs() < 1e-9);

        let far = call_named(
            &mut session,
            "Circle",
            vec![Value::from(100.0), Value::from(0.0), Value::from(1.0)],
        )
        .unwrap();
        let none = call_named(&mut session, "Circle.intersect", vec![a, far]).unwrap();
        assert!(none.as_list().unwrap().is_empty());
    }
}
