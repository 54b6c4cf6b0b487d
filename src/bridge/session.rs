//! Execution session: evaluation stack, render queue and redraw trigger.
//!
//! Natives only touch a session through `push`/`pop`, `oncanvas` and
//! `render`. A session belongs to one execution and is not shared.

use crate::types::{Colour, ObjRef, Value};

/// Minimal stack interface the calling convention is written against.
pub trait ValueStack {
    fn push(&mut self, value: Value);

    fn pop(&mut self) -> Option<Value>;

    fn depth(&self) -> usize;

    /// Value `depth` places below the top (0 = top).
    fn peek(&self, depth: usize) -> Option<&Value>;
}

/// An object in the render queue together with its stroke colour.
#[derive(Debug, Clone)]
pub struct Shown {
    pub object: ObjRef,
    pub colour: Colour,
}

/// Render queue length and redraw state at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    canvas: usize,
    redraw_pending: bool,
    render_requests: usize,
}

#[derive(Debug, Default)]
pub struct Session {
    stack: Vec<Value>,
    /// Currently displayed objects; insertion order is display order.
    canvas: Vec<Shown>,
    redraw_pending: bool,
    render_requests: usize,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an object to the render queue. Duplicates are allowed.
    pub fn oncanvas(&mut self, object: ObjRef, colour: Colour) {
        self.canvas.push(Shown { object, colour });
    }

    pub fn canvas(&self) -> &[Shown] {
        &self.canvas
    }

    /// Ask for a redraw. Repeated requests before the next frame collapse into one.
    pub fn render(&mut self) {
        self.redraw_pending = true;
        self.render_requests += 1;
    }

    pub fn redraw_pending(&self) -> bool {
        self.redraw_pending
    }

    /// Consume the pending redraw, if any. Returns true when a frame is due.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw_pending)
    }

    /// Total `render` calls, including ones that were batched together.
    pub fn render_requests(&self) -> usize {
        self.render_requests
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            canvas: self.canvas.len(),
            redraw_pending: self.redraw_pending,
            render_requests: self.render_requests,
        }
    }

    /// Withdraw enqueues and redraw requests made since `mark`.
    ///
    /// Mutations of the objects themselves are not undone.
    pub fn rollback(&mut self, mark: Checkpoint) {
        self.canvas.truncate(mark.canvas);
        self.redraw_pending = mark.redraw_pending;
        self.render_requests = mark.render_requests;
    }

    /// Values on the stack, bottom first.
    pub fn stack(&self) -> &[Value] {
        &self.stack
    }
}

impl ValueStack for Session {
    fn push(&mut self, value: Value) {
        self.stack.push(value);
    }

    fn pop(&mut self) -> Option<Value> {
        self.stack.pop()
    }

    fn depth(&self) -> usize {
        self.stack.len()
    }

    fn peek(&self, depth: usize) -> Option<&Value> {
        let len = self.stack.len();
        if depth >= len {
            return None;
        }
        self.stack.get(len - 1 - depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::types::Object;
    use crate::geometry::RichPoint;

    #[test]
    fn test_stack_is_lifo() {
        let mut session = Session::new();
        session.push(Value::from(1.0));
        session.push(Value::from(2.0));

        assert_eq!(session.depth(), 2);
        assert_eq!(session.peek(0).and_then(Value::as_number), Some(2.0));
        assert_eq!(session.peek(1).and_then(Value::as_number), Some(1.0));
        assert!(session.peek(2).is_none());

        assert_eq!(session.pop().and_then(|v| v.as_number()), Some(2.0));
        assert_eq!(session.pop().and_then(|v| v.as_number()), Some(1.0));
        assert!(session.pop().is_none());
    }

    #[test]
    fn test_render_requests_batch() {
        let mut session = Session::new();
        assert!(!session.take_redraw());

        session.render();
        session.render();
        session.render();

        assert!(session.take_redraw());
        assert!(!session.take_redraw());
        assert_eq!(session.render_requests(), 3);
    }

    #[test]
    fn test_canvas_keeps_order_and_duplicates() {
        let mut session = Session::new();
        let a = Value::from(Object::Point(RichPoint::new(0.0, 0.0)));
        let b = Value::from(Object::Point(RichPoint {
            point: Point::new(1.0, 1.0),
            label: None,
        }));

        let a = a.as_object().unwrap().clone();
        let b = b.as_object().unwrap().clone();
        session.oncanvas(a.clone(), Colour::BLACK);
        session.oncanvas(b.clone(), Colour::RED);
        session.oncanvas(a.clone(), Colour::BLUE);

        let shown = session.canvas();
        assert_eq!(shown.len(), 3);
        assert!(std::rc::Rc::ptr_eq(&shown[0].object, &a));
        assert!(std::rc::Rc::ptr_eq(&shown[1].object, &b));
        assert!(std::rc::Rc::ptr_eq(&shown[2].object, &a));
        assert_eq!(shown[2].colour, Colour::BLUE);
    }

    #[test]
    fn test_rollback_withdraws_later_effects() {
        let mut session = Session::new();
        let point = Value::from(Object::Point(RichPoint::new(0.0, 0.0)));
        let point = point.as_object().unwrap().clone();

        session.oncanvas(point.clone(), Colour::BLACK);
        let mark = session.checkpoint();
        session.oncanvas(point.clone(), Colour::RED);
        session.render();

        session.rollback(mark);
        assert_eq!(session.canvas().len(), 1);
        assert_eq!(session.canvas()[0].colour, Colour::BLACK);
        assert!(!session.redraw_pending());
        assert_eq!(session.checkpoint(), mark);
    }
}
