//! Type descriptors for native signatures and runtime values.
//!
//! Types are a closed set: a handful of primitives plus the object classes
//! the native library exposes. Equality is structural, so a class type is
//! equal to another only when both name the same class.

use std::fmt;

/// An object class exposed to scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ClassKind {
    Apollonian,
    Sierpinski,
    Hexagons,
    Point,
    Circle,
}

impl ClassKind {
    /// Every class, in registration order.
    pub const ALL: [ClassKind; 5] = [
        ClassKind::Apollonian,
        ClassKind::Sierpinski,
        ClassKind::Hexagons,
        ClassKind::Point,
        ClassKind::Circle,
    ];

    /// The class name as written in type signatures.
    pub fn name(&self) -> &'static str {
        match self {
            ClassKind::Apollonian => "Apollonian",
            ClassKind::Sierpinski => "Sierpinski",
            ClassKind::Hexagons => "Hexagons",
            ClassKind::Point => "Point",
            ClassKind::Circle => "Circle",
        }
    }

    /// The name scripts use for the constructor and as the method prefix.
    pub fn script_name(&self) -> &'static str {
        match self {
            ClassKind::Apollonian => "Apol",
            ClassKind::Sierpinski => "Sierp",
            ClassKind::Hexagons => "Hexa",
            ClassKind::Point => "Point",
            ClassKind::Circle => "Circle",
        }
    }
}

impl fmt::Display for ClassKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The type of a value, parameter or return slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeDesc {
    Number,
    Text,
    Colour,
    List,
    /// Unit: calls returning this push nothing.
    Nothing,
    /// A native callable placeholder on the stack.
    Native,
    Class(ClassKind),
}

impl fmt::Display for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDesc::Number => write!(f, "Number"),
            TypeDesc::Text => write!(f, "Text"),
            TypeDesc::Colour => write!(f, "Colour"),
            TypeDesc::List => write!(f, "List"),
            TypeDesc::Nothing => write!(f, "Nothing"),
            TypeDesc::Native => write!(f, "Native"),
            TypeDesc::Class(kind) => write!(f, "{}", kind),
        }
    }
}

/// Format a list of types the way call sites are shown in diagnostics.
pub fn format_types(types: &[TypeDesc]) -> String {
    types
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
