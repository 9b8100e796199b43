// core/frame.rs
//
// Frame sources: where per-frame steps get registered and dispatched.
// The tween engine only talks to the `FrameSource` trait; hosts either implement
// it over their own update loop or pump a `FrameScheduler` once per frame.
//
// Usage:
//   let frames = Rc::new(FrameScheduler::new());
//   let handle = frames.register(Box::new(|| { /* step */ }));
//   frames.tick();            // once per host frame
//   frames.unregister(handle);

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Identifies one registered frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Host capability: run a callback once per frame until unregistered.
pub trait FrameSource {
    fn register(&self, step: Box<dyn FnMut()>) -> FrameHandle;

    /// Stop future invocations. Unknown or already removed handles are ignored.
    fn unregister(&self, handle: FrameHandle);
}

struct Registration {
    handle: FrameHandle,
    /// Checked right before every invocation.
    cancelled: Cell<bool>,
    step: RefCell<Box<dyn FnMut()>>,
}

/// In-process frame source with registration-ordered dispatch.
///
/// Steps may register or unregister callbacks while a tick is running:
/// new registrations first run on the next tick, and an unregistered
/// callback that has not run yet this tick is skipped.
#[derive(Default)]
pub struct FrameScheduler {
    entries: RefCell<Vec<Rc<Registration>>>,
    next_id: Cell<u64>,
    frame: Cell<u64>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every live callback once, in registration order.
    /// Returns how many callbacks ran.
    pub fn tick(&self) -> usize {
        let snapshot: Vec<Rc<Registration>> = self.entries.borrow().clone();
        let mut ran = 0;

        for entry in &snapshot {
            if entry.cancelled.get() {
                continue;
            }
            // Busy means this tick was re-entered from inside that very step.
            let Ok(mut step) = entry.step.try_borrow_mut() else {
                log::trace!("skipping busy frame callback {:?}", entry.handle);
                continue;
            };
            (&mut **step)();
            ran += 1;
        }

        self.frame.set(self.frame.get() + 1);
        ran
    }

    /// Ticks completed so far.
    pub fn frame(&self) -> u64 {
        self.frame.get()
    }

    /// Number of registered callbacks.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Unregister everything.
    pub fn clear(&self) {
        for entry in self.entries.borrow_mut().drain(..) {
            entry.cancelled.set(true);
        }
    }
}

impl FrameSource for FrameScheduler {
    fn register(&self, step: Box<dyn FnMut()>) -> FrameHandle {
        let handle = FrameHandle(self.next_id.get());
        self.next_id.set(handle.0 + 1);
        self.entries.borrow_mut().push(Rc::new(Registration {
            handle,
            cancelled: Cell::new(false),
            step: RefCell::new(step),
        }));
        handle
    }

    fn unregister(&self, handle: FrameHandle) {
        let mut entries = self.entries.borrow_mut();
        if let Some(idx) = entries.iter().position(|e| e.handle == handle) {
            entries.remove(idx).cancelled.set(true);
        }
    }
}

impl fmt::Debug for FrameScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameScheduler")
            .field("callbacks", &self.len())
            .field("frame", &self.frame.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder(log: &Rc<RefCell<Vec<u32>>>, id: u32) -> Box<dyn FnMut()> {
        let log = log.clone();
        Box::new(move || log.borrow_mut().push(id))
    }

    #[test]
    fn runs_in_registration_order() {
        let frames = FrameScheduler::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        frames.register(recorder(&log, 1));
        frames.register(recorder(&log, 2));
        frames.register(recorder(&log, 3));

        assert_eq!(frames.tick(), 3);
        assert_eq!(frames.tick(), 3);
        assert_eq!(*log.borrow(), vec![1, 2, 3, 1, 2, 3]);
        assert_eq!(frames.frame(), 2);
    }

    #[test]
    fn unregister_stops_invocations() {
        let frames = FrameScheduler::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let a = frames.register(recorder(&log, 1));
        frames.register(recorder(&log, 2));

        frames.tick();
        frames.unregister(a);
        frames.unregister(a);
        frames.tick();

        assert_eq!(*log.borrow(), vec![1, 2, 2]);
        assert_eq!(frames.len(), 1);
    }

    #[test]
    fn unregister_during_tick_skips_later_entries() {
        let frames = Rc::new(FrameScheduler::new());
        let log = Rc::new(RefCell::new(Vec::new()));

        // Handle ids are assigned sequentially, so the second registration is 1.
        let victim = FrameHandle(1);
        let f = frames.clone();
        let l = log.clone();
        frames.register(Box::new(move || {
            l.borrow_mut().push(1);
            f.unregister(victim);
        }));
        assert_eq!(frames.register(recorder(&log, 2)), victim);

        assert_eq!(frames.tick(), 1);
        assert_eq!(*log.borrow(), vec![1]);
    }

    #[test]
    fn register_during_tick_starts_next_tick() {
        let frames = Rc::new(FrameScheduler::new());
        let log = Rc::new(RefCell::new(Vec::new()));

        let f = frames.clone();
        let l = log.clone();
        let mut spawned = false;
        frames.register(Box::new(move || {
            l.borrow_mut().push(1);
            if !spawned {
                spawned = true;
                f.register(recorder(&l, 2));
            }
        }));

        frames.tick();
        assert_eq!(*log.borrow(), vec![1]);
        frames.tick();
        assert_eq!(*log.borrow(), vec![1, 1, 2]);
    }

    #[test]
    fn self_unregister() {
        let frames = Rc::new(FrameScheduler::new());
        let count = Rc::new(Cell::new(0));

        let f = frames.clone();
        let c = count.clone();
        frames.register(Box::new(move || {
            c.set(c.get() + 1);
            f.unregister(FrameHandle(0));
        }));

        frames.tick();
        frames.tick();
        assert_eq!(count.get(), 1);
        assert!(frames.is_empty());
    }

    #[test]
    fn nested_tick_does_not_rerun_busy_step() {
        let frames = Rc::new(FrameScheduler::new());
        let count = Rc::new(Cell::new(0));

        let f = frames.clone();
        let c = count.clone();
        frames.register(Box::new(move || {
            c.set(c.get() + 1);
            if c.get() == 1 {
                f.tick();
            }
        }));

        frames.tick();
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn clear_removes_everything() {
        let frames = FrameScheduler::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        frames.register(recorder(&log, 1));
        frames.register(recorder(&log, 2));
        frames.clear();
        assert_eq!(frames.tick(), 0);
        assert!(log.borrow().is_empty());
    }
}
