// extensions/tween.rs
//
// Tween engine: starts tweens against a frame source and a clock.
// Each tween is self-contained; its step is registered with the frame source and
// it is controlled through the returned `TweenHandle`. There is no tween registry.
//
// Usage:
//   let engine = TweenEngine::new(frames.clone(), clock.clone());
//   let handle = engine.start_tween(target, &["x"], TweenSpec::new(0.0, 1.0, 0.5), TweenConfig::new())?;
//   frames.tick();             // once per host frame
//   handle.stop(false);        // jump to the end and stop

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::api::config::{Callbacks, Ease, TweenConfig, ValueFormat};
use crate::api::error::{TweenError, TweenResult};
use crate::api::types::{LoopPolicy, TweenFinish, TweenSpec, TweenUpdate};
use crate::core::frame::{FrameHandle, FrameSource};
use crate::core::time::Clock;
use super::easing::lerp;
use super::policy;
use super::target::{TweenTarget, TweenValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Running,
    /// Completed under `Hold`: still stepped and reported, no longer writes.
    Held,
    Stopped,
}

struct TweenState {
    spec: TweenSpec,
    phase: Phase,
    frame: u64,
    start_time: f64,
    loops: u32,
    /// Value written by the most recent step.
    last_value: f64,
    registration: Option<FrameHandle>,
}

/// Shared between the registered step and the handle.
/// `state` is never borrowed while user code (ease, target, callbacks) runs.
struct TweenInstance {
    target: Rc<RefCell<dyn TweenTarget>>,
    properties: Vec<String>,
    ease: Ease,
    format: Option<ValueFormat>,
    frames: Rc<dyn FrameSource>,
    clock: Rc<dyn Clock>,
    state: RefCell<TweenState>,
    callbacks: RefCell<Callbacks>,
}

/// Progress of the current cycle. Degenerate durations complete at once.
fn progress(elapsed: f64, duration: f64) -> f64 {
    if duration > 0.0 {
        elapsed / duration
    } else {
        f64::INFINITY
    }
}

impl TweenInstance {
    fn live(&self) -> bool {
        self.state.borrow().phase != Phase::Stopped
    }

    /// Write one value to every property. Returns the decorated form, if any.
    fn write(&self, value: f64) -> Option<String> {
        let display = self.format.as_ref().map(|f| f.format(value));
        let mut target = self.target.borrow_mut();
        for name in &self.properties {
            target.write_property(
                name,
                TweenValue {
                    value,
                    display: display.as_deref(),
                },
            );
        }
        display
    }

    fn step(&self) {
        let now = self.clock.now();
        let (spec, start_time, frame, phase, held_value) = {
            let mut state = self.state.borrow_mut();
            if state.phase == Phase::Stopped {
                return;
            }
            let frame = state.frame;
            state.frame += 1;
            (state.spec, state.start_time, frame, state.phase, state.last_value)
        };

        let elapsed = now - start_time;
        let progress = progress(elapsed, spec.duration);
        let eased = (self.ease)(if progress.is_finite() { progress } else { 1.0 });

        if phase == Phase::Held {
            if self.live() {
                let update = TweenUpdate {
                    frame,
                    elapsed,
                    progress,
                    eased,
                    value: held_value,
                    display: self.format.as_ref().map(|f| f.format(held_value)),
                };
                (self.callbacks.borrow_mut().on_update)(&update);
            }
            return;
        }

        let mut value = lerp(spec.from, spec.to, eased);
        let mut display = self.write(value);
        // A Once completion is already stopped when its callbacks run; this
        // frame's callbacks still fire.
        let mut completing = false;

        if progress >= 1.0 {
            let resolution = policy::resolve(spec);
            if resolution.snap {
                value = spec.to;
            }
            let (finish, registration) = {
                let mut state = self.state.borrow_mut();
                if state.phase != Phase::Running {
                    // Stopped by the target while writing.
                    return;
                }
                state.spec = resolution.spec;
                state.loops += 1;
                state.last_value = value;
                if resolution.restart {
                    state.start_time = now;
                }
                if resolution.hold {
                    state.phase = Phase::Held;
                }
                let registration = if resolution.keep_registered {
                    None
                } else {
                    state.phase = Phase::Stopped;
                    completing = true;
                    state.registration.take()
                };
                let finish = TweenFinish {
                    spec: state.spec,
                    format: self.format.clone(),
                    loops: state.loops,
                };
                (finish, registration)
            };
            log::trace!("tween completed cycle {} ({})", finish.loops, spec.policy);

            if let Some(handle) = registration {
                self.frames.unregister(handle);
            }
            if resolution.snap {
                display = self.write(value);
            }
            if completing {
                log::debug!("tween finished after {} frames", frame + 1);
            }
            if completing || self.live() {
                (self.callbacks.borrow_mut().on_finish)(&finish);
            }
        } else {
            self.state.borrow_mut().last_value = value;
        }

        if completing || self.live() {
            let update = TweenUpdate {
                frame,
                elapsed,
                progress,
                eased,
                value,
                display,
            };
            (self.callbacks.borrow_mut().on_update)(&update);
        }
    }

    fn stop(&self, clean: bool) {
        let (to, registration) = {
            let mut state = self.state.borrow_mut();
            if state.phase == Phase::Stopped {
                return;
            }
            state.phase = Phase::Stopped;
            state.spec.policy = LoopPolicy::Once;
            (state.spec.to, state.registration.take())
        };
        if !clean {
            self.write(to);
        }
        if let Some(handle) = registration {
            self.frames.unregister(handle);
        }
        log::debug!("tween stopped (clean: {})", clean);
    }
}

/// Controls a running tween. Clones refer to the same tween.
#[derive(Clone)]
pub struct TweenHandle {
    tween: Rc<TweenInstance>,
}

impl TweenHandle {
    /// End the tween now. With `clean == false` every property is first set to
    /// `to`; with `clean == true` the current values are left as they are.
    /// Calling it on a stopped tween does nothing.
    pub fn stop(&self, clean: bool) {
        self.tween.stop(clean);
    }

    /// Stop, leaving properties where they are.
    pub fn cancel(&self) {
        self.stop(true);
    }

    /// Stop, jumping properties to the end value.
    pub fn finish(&self) {
        self.stop(false);
    }

    /// Whether the tween may still write to its target.
    pub fn is_active(&self) -> bool {
        self.tween.live()
    }

    /// Completions so far.
    pub fn loops(&self) -> u32 {
        self.tween.state.borrow().loops
    }

    /// Frames stepped so far.
    pub fn frame(&self) -> u64 {
        self.tween.state.borrow().frame
    }

    /// Snapshot of the running spec.
    pub fn spec(&self) -> TweenSpec {
        self.tween.state.borrow().spec
    }
}

impl fmt::Debug for TweenHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.tween.state.borrow();
        f.debug_struct("TweenHandle")
            .field("spec", &state.spec)
            .field("phase", &state.phase)
            .field("frame", &state.frame)
            .field("loops", &state.loops)
            .finish()
    }
}

/// Starts tweens. Holds only the host capabilities, so it is cheap to clone
/// into callbacks that start further tweens.
#[derive(Clone)]
pub struct TweenEngine {
    frames: Rc<dyn FrameSource>,
    clock: Rc<dyn Clock>,
}

impl TweenEngine {
    pub fn new(frames: Rc<dyn FrameSource>, clock: Rc<dyn Clock>) -> Self {
        Self { frames, clock }
    }

    /// Start tweening `properties` of `target` and return its handle.
    ///
    /// `on_start` runs before this returns; the first step runs on the next
    /// frame. Fails if the target lacks one of the properties.
    pub fn start_tween<T, S>(
        &self,
        target: Rc<RefCell<T>>,
        properties: &[S],
        spec: TweenSpec,
        config: TweenConfig,
    ) -> TweenResult<TweenHandle>
    where
        T: TweenTarget + 'static,
        S: AsRef<str>,
    {
        let properties: Vec<String> = properties.iter().map(|p| p.as_ref().to_string()).collect();
        {
            let target = target.borrow();
            if let Some(missing) = properties.iter().find(|p| !target.has_property(p)) {
                return Err(TweenError::InvalidTarget {
                    property: missing.clone(),
                });
            }
        }
        if spec.duration.is_nan() || spec.duration <= 0.0 {
            log::warn!(
                "tween duration {} is not positive; it completes on its first step",
                spec.duration
            );
        }

        let TweenConfig {
            ease,
            format,
            callbacks,
        } = config;
        let tween = Rc::new(TweenInstance {
            target,
            properties,
            ease,
            format,
            frames: self.frames.clone(),
            clock: self.clock.clone(),
            state: RefCell::new(TweenState {
                spec,
                phase: Phase::Running,
                frame: 0,
                start_time: self.clock.now(),
                loops: 0,
                last_value: spec.from,
                registration: None,
            }),
            callbacks: RefCell::new(callbacks),
        });

        (tween.callbacks.borrow_mut().on_start)();

        let stepper = tween.clone();
        let registration = self.frames.register(Box::new(move || stepper.step()));
        tween.state.borrow_mut().registration = Some(registration);

        log::debug!(
            "tween started: {:?} -> {:?} over {}s ({}), {} properties",
            spec.from,
            spec.to,
            spec.duration,
            spec.policy,
            tween.properties.len()
        );
        Ok(TweenHandle { tween })
    }
}

impl fmt::Debug for TweenEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TweenEngine").finish_non_exhaustive()
    }
}
