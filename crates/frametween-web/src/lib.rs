pub mod error;
pub mod runner;

use std::rc::Rc;

use frametween::TweenEngine;
use wasm_bindgen::prelude::*;

pub use error::WebError;
pub use runner::{AnimationFrameSource, PerformanceClock};

/// Install the panic hook and route `log` output to the browser console.
/// Safe to call more than once.
#[wasm_bindgen]
pub fn frametween_init() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("frametween: initialized");
}

/// A tween engine stepped by `requestAnimationFrame` and timed by `performance.now()`.
///
/// # Usage
///
/// ```ignore
/// frametween_web::frametween_init();
/// let engine = frametween_web::browser_engine()?;
/// let handle = engine.start_tween(target, &["opacity"], TweenSpec::new(0.0, 1.0, 0.3), TweenConfig::new())?;
/// ```
pub fn browser_engine() -> Result<TweenEngine, WebError> {
    let frames = Rc::new(AnimationFrameSource::new()?);
    let clock = Rc::new(PerformanceClock::new()?);
    Ok(TweenEngine::new(frames, clock))
}
