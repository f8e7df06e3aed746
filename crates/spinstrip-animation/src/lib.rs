//! Animation system for spinstrip.
//!
//! Provides easing curves and the settle/bounce animator that moves the
//! label strip from its released offset to the resting offset of the
//! target value.

mod easing;
mod snap;

pub use easing::Easing;
pub use snap::{
    adjusted_duration, bounce_amount, SettlePlan, SnapAnimator, SnapPhase, BOUNCE_THRESHOLD_PX,
};
