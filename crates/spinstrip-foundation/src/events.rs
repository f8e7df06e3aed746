//! Observer callbacks.
//!
//! All callbacks are delivered through the runtime task queue rather than
//! synchronously from input handlers, so an observer sees a consistent
//! spinner and may re-enter it freely.

use crate::pointer::ClickTarget;
use crate::value::SpinValue;

/// Callback set handed over at construction. Every slot is optional.
#[derive(Default)]
pub struct SpinCallbacks {
    /// A drag crossed the slop threshold, or a programmatic transition
    /// started.
    pub on_spin_begin: Option<Box<dyn Fn()>>,
    /// The visual offset moved by `delta` pixels.
    pub on_spin: Option<Box<dyn Fn(f32)>>,
    /// The strip came to rest.
    pub on_spin_end: Option<Box<dyn Fn()>>,
    /// The selected value changed. Receives the new value and its index.
    pub on_change: Option<Box<dyn Fn(&SpinValue, usize)>>,
    /// A click was observed. Return `false` to suppress the default
    /// click behavior.
    pub on_click: Option<Box<dyn Fn(&ClickTarget) -> bool>>,
}

impl SpinCallbacks {
    pub fn new() -> Self {
        Self::default()
    }
}
