//! Settle/bounce animator.
//!
//! Drives the transition from a released offset to the resting offset of
//! the target value, optionally overshooting at the sequence boundaries
//! before settling back. Ticks run as deferred runtime tasks, so tests can
//! drive the whole animation deterministically.

use crate::Easing;
use spinstrip_core::RuntimeHandle;
use std::cell::RefCell;
use std::rc::Rc;

/// Bounces smaller than this many pixels are too small to perceive.
pub const BOUNCE_THRESHOLD_PX: f32 = 3.0;

/// Sampling interval for settle tweens (~60fps).
const TICK_MS: u64 = 16;

/// Pause between the overshoot tween finishing and the settle-back tween
/// starting.
const BOUNCE_REST_DELAY_MS: u64 = 20;

/// Fraction of the total duration spent on the overshoot when bouncing.
const BOUNCE_OVERSHOOT_SHARE: f32 = 0.7;

/// Duration adjustment for multi-position jumps: single steps animate at
/// the base duration, longer jumps proportionally slower, bounded by the
/// value-count scale.
pub fn adjusted_duration(base_ms: u64, from_index: usize, to_index: usize, len: usize) -> u64 {
    let shift = from_index.abs_diff(to_index);
    if shift <= 1 || len == 0 {
        return base_ms;
    }
    let factor = 0.7 * (1 + shift) as f64 / len as f64;
    (base_ms as f64 * (1.0 + factor)).floor() as u64
}

/// Overshoot distance for a settle of `travel` pixels. Zero for interior
/// targets (bounce is reserved for hitting an end) and for bounces below
/// the perception threshold.
pub fn bounce_amount(bounciness: f32, travel: f32, target_at_boundary: bool) -> f32 {
    if !target_at_boundary {
        return 0.0;
    }
    let amount = (bounciness * travel).floor();
    if amount.abs() < BOUNCE_THRESHOLD_PX {
        0.0
    } else {
        amount
    }
}

/// Resolved settle request: where to stop, how long to take, and how far
/// past the target to overshoot first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SettlePlan {
    pub target_offset: f32,
    pub duration_ms: u64,
    pub bounce_px: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapPhase {
    Idle,
    Settling,
    Bouncing,
}

#[derive(Clone, Copy)]
struct Tween {
    from: f32,
    to: f32,
    duration_ms: u64,
    start_ms: Option<u64>,
}

impl Tween {
    fn sample(&self, now_ms: u64, start_ms: u64, easing: Easing) -> (f32, bool) {
        let duration = self.duration_ms.max(1);
        let elapsed = now_ms.saturating_sub(start_ms);
        let linear = (elapsed as f32 / duration as f32).clamp(0.0, 1.0);
        if linear >= 1.0 {
            (self.to, true)
        } else {
            let eased = easing.transform(linear);
            (self.from + (self.to - self.from) * eased, false)
        }
    }
}

struct AnimatorInner {
    runtime: RuntimeHandle,
    phase: SnapPhase,
    /// Bumped on every settle/cancel; stale ticks check it and bail.
    epoch: u64,
    task: Option<spinstrip_core::TaskRegistration>,
    easing: Easing,
    plan: SettlePlan,
    tween: Tween,
    on_offset: Option<Rc<dyn Fn(f32)>>,
    on_complete: Option<Box<dyn FnOnce()>>,
}

enum TickOutcome {
    Continue,
    BeginBounceRest,
    Complete,
}

/// Drives settle transitions. Starting a new settle (or cancelling) while
/// one is in flight drops its pending ticks; stale completions never fire.
pub struct SnapAnimator {
    inner: Rc<RefCell<AnimatorInner>>,
}

impl Clone for SnapAnimator {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl SnapAnimator {
    pub fn new(runtime: RuntimeHandle) -> Self {
        Self {
            inner: Rc::new(RefCell::new(AnimatorInner {
                runtime,
                phase: SnapPhase::Idle,
                epoch: 0,
                task: None,
                easing: Easing::default(),
                plan: SettlePlan {
                    target_offset: 0.0,
                    duration_ms: 0,
                    bounce_px: 0.0,
                },
                tween: Tween {
                    from: 0.0,
                    to: 0.0,
                    duration_ms: 0,
                    start_ms: None,
                },
                on_offset: None,
                on_complete: None,
            })),
        }
    }

    /// Starts a settle from `from` toward the plan's target. `on_offset`
    /// receives every interpolated offset (including the final one);
    /// `on_complete` runs exactly once when the strip is at rest, and never
    /// synchronously inside this call.
    pub fn settle(
        &self,
        from: f32,
        plan: SettlePlan,
        easing: Easing,
        on_offset: impl Fn(f32) + 'static,
        on_complete: impl FnOnce() + 'static,
    ) {
        self.cancel();
        let epoch;
        let immediate = plan.duration_ms == 0 || from == plan.target_offset;
        {
            let mut inner = self.inner.borrow_mut();
            epoch = inner.epoch;
            inner.easing = easing;
            inner.plan = plan;
            inner.phase = SnapPhase::Settling;
            inner.on_offset = Some(Rc::new(on_offset));
            inner.on_complete = Some(Box::new(on_complete));
            if !immediate {
                let overshoot_duration = if plan.bounce_px != 0.0 {
                    (plan.duration_ms as f32 * BOUNCE_OVERSHOOT_SHARE).floor() as u64
                } else {
                    plan.duration_ms
                };
                inner.tween = Tween {
                    from,
                    to: plan.target_offset + plan.bounce_px,
                    duration_ms: overshoot_duration,
                    start_ms: None,
                };
            }
        }
        log::debug!(
            "snap: settle from {from} to {} over {}ms (bounce {})",
            plan.target_offset,
            plan.duration_ms,
            plan.bounce_px
        );
        if immediate {
            self.emit_offset(plan.target_offset);
            let weak = Rc::downgrade(&self.inner);
            let registration = self.runtime().register(0, move |_| {
                if let Some(inner) = weak.upgrade() {
                    Self::finish(&inner, epoch);
                }
            });
            self.inner.borrow_mut().task = Some(registration);
        } else {
            Self::schedule_tick(&self.inner, 0, epoch);
        }
    }

    /// Cancels any in-flight settle. Pending ticks and the completion
    /// callback are dropped; the offset stays wherever the last tick left
    /// it, ready to be adopted by a new gesture.
    pub fn cancel(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.epoch += 1;
        inner.task = None;
        inner.phase = SnapPhase::Idle;
        inner.on_offset = None;
        inner.on_complete = None;
    }

    pub fn phase(&self) -> SnapPhase {
        self.inner.borrow().phase
    }

    pub fn is_running(&self) -> bool {
        self.inner.borrow().phase != SnapPhase::Idle
    }

    fn runtime(&self) -> RuntimeHandle {
        self.inner.borrow().runtime.clone()
    }

    fn emit_offset(&self, offset: f32) {
        let callback = self.inner.borrow().on_offset.clone();
        if let Some(callback) = callback {
            callback(offset);
        }
    }

    fn schedule_tick(this: &Rc<RefCell<AnimatorInner>>, delay_ms: u64, epoch: u64) {
        let weak = Rc::downgrade(this);
        let runtime = this.borrow().runtime.clone();
        let registration = runtime.register(delay_ms, move |now_ms| {
            if let Some(inner) = weak.upgrade() {
                Self::on_tick(&inner, epoch, now_ms);
            }
        });
        this.borrow_mut().task = Some(registration);
    }

    fn on_tick(this: &Rc<RefCell<AnimatorInner>>, epoch: u64, now_ms: u64) {
        let (offset, outcome, on_offset) = {
            let mut inner = this.borrow_mut();
            if inner.epoch != epoch || inner.phase == SnapPhase::Idle {
                return;
            }
            inner.task = None;
            let start_ms = *inner.tween.start_ms.get_or_insert(now_ms);
            let (offset, finished) = inner.tween.sample(now_ms, start_ms, inner.easing);
            let outcome = if !finished {
                TickOutcome::Continue
            } else if inner.phase == SnapPhase::Settling && inner.plan.bounce_px != 0.0 {
                TickOutcome::BeginBounceRest
            } else {
                TickOutcome::Complete
            };
            (offset, outcome, inner.on_offset.clone())
        };

        if let Some(on_offset) = on_offset {
            on_offset(offset);
        }

        match outcome {
            TickOutcome::Continue => Self::schedule_tick(this, TICK_MS, epoch),
            TickOutcome::BeginBounceRest => Self::schedule_bounce_return(this, epoch),
            TickOutcome::Complete => Self::finish(this, epoch),
        }
    }

    fn schedule_bounce_return(this: &Rc<RefCell<AnimatorInner>>, epoch: u64) {
        let weak = Rc::downgrade(this);
        let runtime = this.borrow().runtime.clone();
        let registration = runtime.register(BOUNCE_REST_DELAY_MS, move |now_ms| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            {
                let mut guard = inner.borrow_mut();
                if guard.epoch != epoch || guard.phase != SnapPhase::Settling {
                    return;
                }
                guard.task = None;
                guard.phase = SnapPhase::Bouncing;
                let plan = guard.plan;
                let return_duration =
                    (plan.duration_ms as f32 * (1.0 - BOUNCE_OVERSHOOT_SHARE)).floor() as u64;
                guard.tween = Tween {
                    from: plan.target_offset + plan.bounce_px,
                    to: plan.target_offset,
                    duration_ms: return_duration,
                    start_ms: None,
                };
            }
            Self::on_tick(&inner, epoch, now_ms);
        });
        this.borrow_mut().task = Some(registration);
    }

    fn finish(this: &Rc<RefCell<AnimatorInner>>, epoch: u64) {
        let on_complete = {
            let mut inner = this.borrow_mut();
            if inner.epoch != epoch {
                return;
            }
            inner.phase = SnapPhase::Idle;
            inner.task = None;
            inner.on_offset = None;
            inner.on_complete.take()
        };
        if let Some(on_complete) = on_complete {
            on_complete();
        }
    }
}

#[cfg(test)]
#[path = "tests/snap_tests.rs"]
mod tests;
