//! Executes a sketch's steps against a fresh session.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::bridge::{call, registry, NativeCallable, Session, Shown};
use crate::error::{Result, SketchError};
use crate::types::Value;

use super::{Arg, Sketch, Step};

/// Options for a sketch run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Keep a copy of the render queue at every frame.
    pub snapshot_frames: bool,
}

/// The render queue as it stood when a frame was produced.
#[derive(Debug)]
pub struct Frame {
    pub index: usize,
    /// Step that triggered the redraw.
    pub step: usize,
    /// Deep copies: later steps do not change a snapshot.
    pub canvas: Vec<Shown>,
}

/// Everything a finished run leaves behind.
#[derive(Debug)]
pub struct Run {
    pub session: Session,
    pub bindings: HashMap<String, Value>,
    pub frames: usize,
    pub snapshots: Vec<Frame>,
}

/// Run every step of a sketch.
///
/// A frame is produced whenever a redraw is pending after a call; all the
/// requests made during that call collapse into it.
pub fn run(sketch: &Sketch, options: RunOptions) -> Result<Run> {
    let mut run = Run {
        session: Session::new(),
        bindings: HashMap::new(),
        frames: 0,
        snapshots: Vec::new(),
    };

    tracing::info!(sketch = %sketch.name, steps = sketch.steps.len(), "running sketch");

    for (index, step) in sketch.steps.iter().enumerate() {
        run_step(&mut run, index, step, options).map_err(|err| {
            tracing::debug!(step = index, call = %step.call, %err, "step failed");
            err
        })?;
    }

    tracing::info!(
        sketch = %sketch.name,
        frames = run.frames,
        shown = run.session.canvas().len(),
        "sketch finished"
    );
    Ok(run)
}

fn run_step(run: &mut Run, index: usize, step: &Step, options: RunOptions) -> Result<()> {
    let callable = lookup(&step.call)?;
    let args = step
        .args
        .iter()
        .map(|arg| resolve_arg(arg, &run.bindings))
        .collect::<Result<Vec<_>>>()?;

    let mut result = None;
    for _ in 0..step.repeat {
        result = call(&mut run.session, callable, args.clone())?;

        if run.session.take_redraw() {
            if options.snapshot_frames {
                run.snapshots.push(Frame {
                    index: run.frames,
                    step: index,
                    canvas: snapshot(run.session.canvas()),
                });
            }
            run.frames += 1;
        }
    }

    if let Some(name) = &step.bind {
        run.bindings
            .insert(name.clone(), result.unwrap_or(Value::Nothing));
    }
    Ok(())
}

/// Find a registered native, with a suggestion when the name is close.
pub fn lookup(name: &str) -> Result<&'static NativeCallable> {
    let natives = registry();
    natives.get(name).ok_or_else(|| SketchError::UnknownCallable {
        name: name.to_string(),
        help: natives
            .suggest(name)
            .map(|candidate| format!("did you mean '{}'?", candidate)),
    })
}

fn resolve_arg(arg: &Arg, bindings: &HashMap<String, Value>) -> Result<Value> {
    Ok(match arg {
        Arg::Number(n) => Value::Number(*n),
        Arg::Colour(c) => Value::Colour(*c),
        Arg::Text(s) => Value::text(s),
        Arg::Binding(name) => bindings
            .get(name)
            .cloned()
            .ok_or_else(|| SketchError::UnknownBinding { name: name.clone() })?,
    })
}

fn snapshot(canvas: &[Shown]) -> Vec<Shown> {
    canvas
        .iter()
        .map(|shown| Shown {
            object: Rc::new(RefCell::new(shown.object.borrow().clone())),
            colour: shown.colour,
        })
        .collect()
}
