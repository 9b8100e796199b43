use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use frametween::{Clock, FrameHandle, FrameScheduler, FrameSource};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use crate::error::WebError;

/// Shared between the frame source and the rAF callback.
struct Pump {
    window: web_sys::Window,
    scheduler: FrameScheduler,
    callback: RefCell<Option<Closure<dyn FnMut()>>>,
    /// Id of the outstanding animation frame request, if any.
    pending: Cell<Option<i32>>,
}

impl Pump {
    fn request(&self) {
        if self.pending.get().is_some() {
            return;
        }
        let callback = self.callback.borrow();
        let Some(callback) = callback.as_ref() else {
            return;
        };
        match self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref::<js_sys::Function>())
        {
            Ok(id) => self.pending.set(Some(id)),
            Err(err) => log::error!("requestAnimationFrame failed: {:?}", err),
        }
    }

    fn cancel(&self) {
        if let Some(id) = self.pending.take() {
            if let Err(err) = self.window.cancel_animation_frame(id) {
                log::warn!("cancelAnimationFrame({}) failed: {:?}", id, err);
            }
        }
    }

    fn on_frame(&self) {
        self.pending.set(None);
        self.scheduler.tick();
        if !self.scheduler.is_empty() {
            self.request();
        }
    }
}

/// Frame source driven by the browser's `requestAnimationFrame`.
///
/// Callbacks run once per animation frame in registration order. A frame is
/// only requested while something is registered; removing the last callback
/// cancels the outstanding request.
pub struct AnimationFrameSource {
    pump: Rc<Pump>,
}

impl AnimationFrameSource {
    pub fn new() -> Result<Self, WebError> {
        let window = web_sys::window().ok_or(WebError::NoWindow)?;
        let pump = Rc::new(Pump {
            window,
            scheduler: FrameScheduler::new(),
            callback: RefCell::new(None),
            pending: Cell::new(None),
        });

        let weak: Weak<Pump> = Rc::downgrade(&pump);
        let callback = Closure::<dyn FnMut()>::new(move || {
            if let Some(pump) = weak.upgrade() {
                pump.on_frame();
            }
        });
        *pump.callback.borrow_mut() = Some(callback);

        Ok(Self { pump })
    }

    /// Number of registered callbacks.
    pub fn len(&self) -> usize {
        self.pump.scheduler.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pump.scheduler.is_empty()
    }

    /// Animation frames dispatched so far.
    pub fn frame(&self) -> u64 {
        self.pump.scheduler.frame()
    }
}

impl FrameSource for AnimationFrameSource {
    fn register(&self, step: Box<dyn FnMut()>) -> FrameHandle {
        let handle = self.pump.scheduler.register(step);
        self.pump.request();
        handle
    }

    fn unregister(&self, handle: FrameHandle) {
        self.pump.scheduler.unregister(handle);
        if self.pump.scheduler.is_empty() {
            self.pump.cancel();
        }
    }
}

impl Drop for AnimationFrameSource {
    fn drop(&mut self) {
        self.pump.cancel();
    }
}

impl fmt::Debug for AnimationFrameSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationFrameSource")
            .field("callbacks", &self.len())
            .field("pending", &self.pump.pending.get())
            .finish()
    }
}

/// Clock reading `performance.now()`, in seconds.
#[derive(Debug, Clone)]
pub struct PerformanceClock {
    performance: web_sys::Performance,
}

impl PerformanceClock {
    pub fn new() -> Result<Self, WebError> {
        let window = web_sys::window().ok_or(WebError::NoWindow)?;
        let performance = window.performance().ok_or(WebError::NoPerformance)?;
        Ok(Self { performance })
    }
}

impl Clock for PerformanceClock {
    fn now(&self) -> f64 {
        self.performance.now() / 1000.0
    }
}
