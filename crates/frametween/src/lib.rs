pub mod api;
pub mod core;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use api::config::{Ease, TweenConfig, ValueFormat};
pub use api::error::{TweenError, TweenResult};
pub use api::types::{LoopPolicy, TweenFinish, TweenSpec, TweenUpdate};
pub use core::frame::{FrameHandle, FrameScheduler, FrameSource};
pub use core::time::{Clock, ManualClock, MonotonicClock};
pub use extensions::{
    Easing, lerp,
    Property, PropertyBag, TweenTarget, TweenValue,
    TweenEngine, TweenHandle,
};
