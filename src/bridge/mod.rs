//! The typed bridge between the interpreter and host-implemented natives.
//!
//! - [`signature`]: signatures, overload sets, exact-type resolution
//! - [`native`]: native callables and the stack calling convention
//! - [`session`]: evaluation stack, render queue, redraw trigger
//! - [`registry`]: the process-wide native table

pub mod native;
pub mod registry;
pub mod session;
pub mod signature;

pub use native::{arg_types, call, pop_args, Args, NativeCallable, NativeFn};
pub use registry::{registry, ClassDesc, NativeRegistry};
pub use session::{Checkpoint, Session, Shown, ValueStack};
pub use signature::{OverloadSet, Param, Resolved, Signature};
