// extensions/mod.rs
//
// The tween machinery: interpolation and easing, loop-policy resolution,
// property targets, and the per-frame tween instances built on them.

pub mod easing;
pub mod policy;
pub mod target;
pub mod tween;

pub use easing::{Easing, lerp};
pub use target::{Property, PropertyBag, TweenTarget, TweenValue};
pub use tween::{TweenEngine, TweenHandle};
