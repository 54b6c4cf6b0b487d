//! The native library: one module per script-visible class.
//!
//! Each module builds a fully populated [`ClassDesc`]; the registry collects
//! them once at startup.

mod apollonian;
mod diagram;
mod hexagon;
mod sierpinski;

use crate::bridge::{Args, ClassDesc, NativeCallable, OverloadSet, Session, Signature};
use crate::error::{Result, SketchError};
use crate::types::{ClassKind, Colour, Object, TypeDesc, Value};

/// Stroke colour used by draw calls that do not pass one.
pub const DEFAULT_STROKE: Colour = Colour::BLACK;

/// Build every class of the library.
pub fn classes() -> Result<Vec<ClassDesc>> {
    Ok(vec![
        apollonian::class()?,
        sierpinski::class()?,
        hexagon::class()?,
        diagram::point_class()?,
        diagram::circle_class()?,
    ])
}

fn class_type(kind: ClassKind) -> TypeDesc {
    TypeDesc::Class(kind)
}

/// `X.draw(self)` and `X.draw(self, stroke)`, shared by every class.
fn draw_method(kind: ClassKind, name: &'static str) -> Result<NativeCallable> {
    let overloads = OverloadSet::new(vec![
        Signature::returns(TypeDesc::Nothing).param("self", class_type(kind)),
        Signature::returns(TypeDesc::Nothing)
            .param("self", class_type(kind))
            .param("stroke", TypeDesc::Colour),
    ])?;
    Ok(NativeCallable::new(name, overloads, draw))
}

/// Put the receiver on the canvas and ask for a redraw.
fn draw(session: &mut Session, args: Args) -> Result<Value> {
    let object = args.object(0)?;
    let colour = match args.overload() {
        0 => DEFAULT_STROKE,
        _ => args.colour(1)?,
    };
    session.oncanvas(object, colour);
    session.render();
    Ok(Value::Nothing)
}

/// Error for a receiver of the wrong class reaching a host function.
fn wrong_receiver(expected: ClassKind, found: ClassKind) -> SketchError {
    SketchError::internal(format!("receiver should be {}, got {}", expected, found))
}

/// Read a named field through a class-specific getter.
fn field(class: ClassKind, known: &[&str], name: &str, value: Option<f64>) -> Result<Value> {
    value.map(Value::Number).ok_or_else(|| SketchError::UnknownField {
        class: class.name().to_string(),
        field: name.to_string(),
        help: Some(format!("fields: {}", known.join(", "))),
    })
}

fn new_object(object: Object) -> Value {
    Value::object(object)
}

#[cfg(test)]
pub(crate) mod testing {
    use crate::bridge::{call, registry, Session};
    use crate::types::Value;

    /// Call a registered native by name.
    pub fn call_named(session: &mut Session, name: &str, args: Vec<Value>) -> Option<Value> {
        let callable = registry()
            .get(name)
            .unwrap_or_else(|| panic!("{} is not registered", name));
        call(session, callable, args).unwrap()
    }
}
