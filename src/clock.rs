//! Frame scheduling
//!
//! The game loop is a callback chain that re-schedules itself every frame
//! and never tears down. `TickSource` hides where frames come from: the
//! browser's `requestAnimationFrame`, or `ManualTicks` driven by a test.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Callback invoked with a frame timestamp in milliseconds
pub type FrameCallback = Box<dyn FnOnce(f64)>;

/// Something that can call back once on the next frame
pub trait TickSource {
    fn schedule(&self, callback: FrameCallback);
}

/// Run `on_frame` every frame, forever. Each frame schedules the next before
/// returning control.
pub fn run_loop<T, F>(source: Rc<T>, on_frame: F)
where
    T: TickSource + 'static,
    F: FnMut(f64) + 'static,
{
    schedule_next(source, Rc::new(RefCell::new(on_frame)));
}

fn schedule_next<T, F>(source: Rc<T>, on_frame: Rc<RefCell<F>>)
where
    T: TickSource + 'static,
    F: FnMut(f64) + 'static,
{
    let next = Rc::clone(&source);
    source.schedule(Box::new(move |time| {
        {
            let mut callback = on_frame.borrow_mut();
            (*callback)(time);
        }
        schedule_next(next, on_frame);
    }));
}

/// Tick source fired by hand
#[derive(Default)]
pub struct ManualTicks {
    pending: RefCell<Vec<FrameCallback>>,
    now: Cell<f64>,
    fired: Cell<u64>,
}

impl ManualTicks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock by `dt_ms` and run every callback scheduled so far.
    /// Callbacks scheduled while firing wait for the next call.
    pub fn fire(&self, dt_ms: f64) -> usize {
        self.now.set(self.now.get() + dt_ms);
        let due = std::mem::take(&mut *self.pending.borrow_mut());
        let count = due.len();
        for callback in due {
            callback(self.now.get());
        }
        self.fired.set(self.fired.get() + count as u64);
        count
    }

    /// Fire `frames` frames at 60 Hz
    pub fn run_frames(&self, frames: usize) {
        for _ in 0..frames {
            self.fire(1000.0 / 60.0);
        }
    }

    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Total callbacks run
    pub fn fired(&self) -> u64 {
        self.fired.get()
    }
}

impl TickSource for ManualTicks {
    fn schedule(&self, callback: FrameCallback) {
        self.pending.borrow_mut().push(callback);
    }
}
