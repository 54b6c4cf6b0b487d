//! `Hexa`: hexagonal tilings.

use crate::bridge::{Args, ClassDesc, NativeCallable, OverloadSet, Session, Signature};
use crate::error::Result;
use crate::geometry::{HexTiling, Point, MAX_RINGS};
use crate::types::{ClassKind, Object, TypeDesc, Value};

use super::{class_type, draw_method, new_object};

const KIND: ClassKind = ClassKind::Hexagons;

/// Rings drawn when the script does not say.
pub const DEFAULT_RINGS: u32 = 2;

pub(super) fn class() -> Result<ClassDesc> {
    let this = class_type(KIND);

    let constructor = NativeCallable::new(
        "Hexa",
        OverloadSet::new(vec![
            Signature::returns(this)
                .param("x", TypeDesc::Number)
                .param("y", TypeDesc::Number)
                .param("size", TypeDesc::Number),
            Signature::returns(this)
                .param("x", TypeDesc::Number)
                .param("y", TypeDesc::Number)
                .param("size", TypeDesc::Number)
                .param("rings", TypeDesc::Number),
        ])?,
        construct,
    );

    Ok(ClassDesc {
        kind: KIND,
        constructor,
        methods: vec![draw_method(KIND, "Hexa.draw")?],
    })
}

fn construct(_: &mut Session, args: Args) -> Result<Value> {
    let center = Point::new(args.number(0)?, args.number(1)?);
    let size = args.number(2)?;
    let rings = match args.overload() {
        0 => DEFAULT_RINGS,
        _ => {
            let asked = args.number(3)?;
            let capped = rings(asked);
            if (capped as f64) < asked.round() {
                tracing::warn!(asked, capped, "Hexa ring count capped");
            }
            capped
        }
    };
    Ok(new_object(Object::Hexagons(HexTiling::new(center, size, rings))))
}

/// Scripts only have floats; negative and NaN counts mean no rings.
fn rings(n: f64) -> u32 {
    if n.is_nan() {
        0
    } else {
        n.round().clamp(0.0, MAX_RINGS as f64) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::testing::call_named;
    use crate::render::{draw_canvas, Recorder};

    fn tiling(value: &Value) -> HexTiling {
        match &*value.as_object().unwrap().borrow() {
            Object::Hexagons(t) => *t,
            other => panic!("expected hexagons, got {:?}", other.class()),
        }
    }

    #[test]
    fn test_default_rings() {
        let mut session = Session::new();
        let hexa = call_named(
            &mut session,
            "Hexa",
            vec![Value::from(0.0), Value::from(0.0), Value::from(10.0)],
        )
        .unwrap();
        assert_eq!(tiling(&hexa).cell_count(), 19);
    }

    #[test]
    fn test_rings_are_rounded_and_clamped() {
        assert_eq!(rings(2.6), 3);
        assert_eq!(rings(-4.0), 0);
        assert_eq!(rings(f64::NAN), 0);
        assert_eq!(rings(1e12), MAX_RINGS);

        let mut session = Session::new();
        let hexa = call_named(
            &mut session,
            "Hexa",
            vec![
                Value::from(5.0),
                Value::from(5.0),
                Value::from(10.0),
                Value::from(0.0),
            ],
        )
        .unwrap();
        let t = tiling(&hexa);
        assert_eq!(t.cell_count(), 1);
        assert_eq!(t.center, Point::new(5.0, 5.0));
    }

    #[test]
    fn test_huge_ring_count_draws_capped_tiling() {
        let mut session = Session::new();
        let hexa = call_named(
            &mut session,
            "Hexa",
            vec![
                Value::from(0.0),
                Value::from(0.0),
                Value::from(1.0),
                Value::from(1e12),
            ],
        )
        .unwrap();
        assert_eq!(tiling(&hexa).rings, MAX_RINGS);

        call_named(&mut session, "Hexa.draw", vec![hexa]);
        let mut recorder = Recorder::new();
        draw_canvas(session.canvas(), &mut recorder);
        assert_eq!(recorder.paints(), 12_481);
    }

    #[test]
    fn test_draw_enqueues() {
        let mut session = Session::new();
        let hexa = call_named(
            &mut session,
            "Hexa",
            vec![Value::from(0.0), Value::from(0.0), Value::from(10.0)],
        )
        .unwrap();
        call_named(&mut session, "Hexa.draw", vec![hexa]);
        assert_eq!(session.canvas().len(), 1);
        assert!(session.take_redraw());
    }
}
