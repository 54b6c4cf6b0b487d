//! Core domain types for sketchpad.
//!
//! - `Colour` - RGBA colour values
//! - `TypeDesc` / `ClassKind` - the closed set of script-visible types
//! - `Value` / `Object` - what lives on the evaluation stack

mod colour;
mod descriptor;
mod value;

pub use colour::Colour;
pub use descriptor::{format_types, ClassKind, TypeDesc};
pub use value::{ObjRef, Object, Value};
