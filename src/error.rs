use miette::Diagnostic;
use thiserror::Error;

/// Main error type for sketchpad operations
#[derive(Error, Diagnostic, Debug)]
pub enum SketchError {
    #[error("No overload of {name} accepts ({attempted})")]
    #[diagnostic(code(sketchpad::type_mismatch))]
    TypeMismatch {
        name: String,
        attempted: String,
        #[help]
        help: Option<String>,
    },

    #[error("Internal error: {message}")]
    #[diagnostic(
        code(sketchpad::internal),
        help("this is a bug in the native bridge, not in the sketch")
    )]
    Internal { message: String },

    #[error("Unknown callable: {name}")]
    #[diagnostic(code(sketchpad::unknown_callable))]
    UnknownCallable {
        name: String,
        #[help]
        help: Option<String>,
    },

    #[error("Undefined binding: ${name}")]
    #[diagnostic(code(sketchpad::unknown_binding))]
    UnknownBinding { name: String },

    #[error("{class} has no field '{field}'")]
    #[diagnostic(code(sketchpad::unknown_field))]
    UnknownField {
        class: String,
        field: String,
        #[help]
        help: Option<String>,
    },

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(sketchpad::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(sketchpad::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Build error: {message}")]
    #[diagnostic(code(sketchpad::build))]
    Build {
        message: String,
        #[help]
        help: Option<String>,
    },
}

impl SketchError {
    /// Shorthand for an `Internal` error.
    pub fn internal(message: impl Into<String>) -> Self {
        SketchError::Internal {
            message: message.into(),
        }
    }

    /// Whether the interpreter can report this to the script author and carry on.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, SketchError::Internal { .. })
    }
}

pub type Result<T> = std::result::Result<T, SketchError>;
