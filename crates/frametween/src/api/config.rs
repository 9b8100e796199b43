use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use super::types::{TweenFinish, TweenUpdate};
use crate::extensions::easing::{identity, Easing};

/// Easing function: raw progress in, eased progress out.
pub type Ease = Rc<dyn Fn(f64) -> f64>;

/// Decoration applied to the interpolated value before it is written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValueFormat {
    pub prefix: String,
    pub suffix: String,
    /// Fixed number of decimals. `None` prints the shortest exact form.
    pub precision: Option<usize>,
}

impl ValueFormat {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    pub fn with_precision(mut self, decimals: usize) -> Self {
        self.precision = Some(decimals);
        self
    }

    pub fn format(&self, value: f64) -> String {
        match self.precision {
            Some(decimals) => format!("{}{:.*}{}", self.prefix, decimals, value, self.suffix),
            None => format!("{}{}{}", self.prefix, value, self.suffix),
        }
    }
}

pub(crate) struct Callbacks {
    pub(crate) on_start: Box<dyn FnMut()>,
    pub(crate) on_update: Box<dyn FnMut(&TweenUpdate)>,
    pub(crate) on_finish: Box<dyn FnMut(&TweenFinish)>,
}

/// Easing, callbacks and formatting for one tween.
///
/// Everything is optional: the default eases linearly (identity, unclamped),
/// writes plain numbers, and ignores lifecycle events.
pub struct TweenConfig {
    pub(crate) ease: Ease,
    pub(crate) format: Option<ValueFormat>,
    pub(crate) callbacks: Callbacks,
}

impl Default for TweenConfig {
    fn default() -> Self {
        Self {
            ease: Rc::new(identity),
            format: None,
            callbacks: Callbacks {
                on_start: Box::new(|| {}),
                on_update: Box::new(|_| {}),
                on_finish: Box::new(|_| {}),
            },
        }
    }
}

impl TweenConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ease(mut self, ease: impl Fn(f64) -> f64 + 'static) -> Self {
        self.ease = Rc::new(ease);
        self
    }

    pub fn easing(self, easing: Easing) -> Self {
        self.ease(move |t| easing.apply(t))
    }

    /// Called once, synchronously, when the tween is started.
    pub fn on_start(mut self, f: impl FnMut() + 'static) -> Self {
        self.callbacks.on_start = Box::new(f);
        self
    }

    /// Called once per stepped frame, after the write.
    pub fn on_update(mut self, f: impl FnMut(&TweenUpdate) + 'static) -> Self {
        self.callbacks.on_update = Box::new(f);
        self
    }

    /// Called once per completion, after the loop policy is applied.
    pub fn on_finish(mut self, f: impl FnMut(&TweenFinish) + 'static) -> Self {
        self.callbacks.on_finish = Box::new(f);
        self
    }

    pub fn format(mut self, format: ValueFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.format.get_or_insert_with(ValueFormat::default).prefix = prefix.into();
        self
    }

    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.format.get_or_insert_with(ValueFormat::default).suffix = suffix.into();
        self
    }
}

impl fmt::Debug for TweenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TweenConfig")
            .field("format", &self.format)
            .finish_non_exhaustive()
    }
}
