//! The spinner control.
//!
//! Owns the selection state and orchestrates the collaborators: gesture
//! sessions convert pointer samples into drag deltas, the projector picks
//! a landing index at release, and the snap animator drives the strip to
//! its resting offset. All observer callbacks are delivered through the
//! runtime task queue in the order they were produced.

use crate::config::{InitialValue, SpinnerConfig, SpinnerKind};
use crate::error::ConfigError;
use crate::events::SpinCallbacks;
use crate::geometry::{Alignment, Geometry};
use crate::gesture::{GestureSession, MoveOutcome};
use crate::pointer::{ClickTarget, PointerSample};
use crate::projector::project;
use crate::range::{ValueSource, Values};
use crate::surface::SpinSurface;
use crate::value::SpinValue;
use spinstrip_animation::{adjusted_duration, bounce_amount, SettlePlan, SnapAnimator};
use spinstrip_core::RuntimeHandle;
use std::cell::RefCell;
use std::rc::Rc;

struct SpinnerInner {
    values: Values,
    config: SpinnerConfig,
    labels: Vec<String>,
    hints: Option<Vec<String>>,
    geometry: Rc<dyn Geometry>,
    surface: Rc<dyn SpinSurface>,
    runtime: RuntimeHandle,
    callbacks: Rc<SpinCallbacks>,
    animator: SnapAnimator,
    index: usize,
    /// Label currently carrying the selected style, if any.
    selected_index: Option<usize>,
    offset: f32,
    moving: bool,
    disabled: bool,
    destroyed: bool,
    session: Option<GestureSession>,
}

impl SpinnerInner {
    /// Resting offset for `index` under the current alignment rules.
    fn position_at_index(&self, index: usize) -> f32 {
        let edge = self.config.align_to_edge
            && (self.moving || self.config.kind == SpinnerKind::Toggle);
        let alignment = if edge { Alignment::Edge } else { Alignment::Center };
        let mut offset = self.geometry.offset_for_index(index, alignment);
        if self.config.align_to_edge && !self.moving {
            offset = self.geometry.align_offset(offset);
        }
        offset
    }

    /// Swap the selected style onto `index`, if a selected style is
    /// configured and the highlight actually moves.
    fn selection_swap(&mut self, index: usize) -> Option<(Option<usize>, usize)> {
        if self.config.style.selected_class.is_empty() || self.selected_index == Some(index) {
            return None;
        }
        let previous = self.selected_index.replace(index);
        Some((previous, index))
    }
}

/// Callback deliveries queued behind the runtime so observers never see a
/// half-updated spinner. A destroyed spinner drops them unfired.
enum DeferredEvent {
    SpinBegin,
    Spin(f32),
    SpinEnd,
    Change(SpinValue, usize),
}

/// Cheap cloneable handle to a spinner instance.
pub struct Spinner {
    inner: Rc<RefCell<SpinnerInner>>,
}

impl Clone for Spinner {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl Spinner {
    fn defer(&self, runtime: &RuntimeHandle, event: DeferredEvent) {
        let weak = Rc::downgrade(&self.inner);
        runtime.post(0, move |_| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            let callbacks = {
                let inner = inner.borrow();
                if inner.destroyed {
                    return;
                }
                Rc::clone(&inner.callbacks)
            };
            match &event {
                DeferredEvent::SpinBegin => {
                    if let Some(on_spin_begin) = &callbacks.on_spin_begin {
                        on_spin_begin();
                    }
                }
                DeferredEvent::Spin(delta) => {
                    if let Some(on_spin) = &callbacks.on_spin {
                        on_spin(*delta);
                    }
                }
                DeferredEvent::SpinEnd => {
                    if let Some(on_spin_end) = &callbacks.on_spin_end {
                        on_spin_end();
                    }
                }
                DeferredEvent::Change(value, index) => {
                    if let Some(on_change) = &callbacks.on_change {
                        on_change(value, *index);
                    }
                }
            }
        });
    }

    pub fn new(
        source: ValueSource,
        geometry: Rc<dyn Geometry>,
        surface: Rc<dyn SpinSurface>,
        runtime: RuntimeHandle,
        config: SpinnerConfig,
        callbacks: SpinCallbacks,
    ) -> Result<Spinner, ConfigError> {
        let values = source.resolve()?;
        let labels = config.labels.resolve(&values);
        let hints = config.hints.as_ref().map(|hints| hints.resolve());
        let initial_value = config.initial_value.clone();
        let disabled = config.disabled;

        let animator = SnapAnimator::new(runtime.clone());
        let spinner = Spinner {
            inner: Rc::new(RefCell::new(SpinnerInner {
                values,
                config,
                labels,
                hints,
                geometry,
                surface,
                runtime,
                callbacks: Rc::new(callbacks),
                animator,
                index: 0,
                selected_index: None,
                offset: 0.0,
                moving: false,
                disabled: false,
                destroyed: false,
                session: None,
            })),
        };

        match initial_value {
            InitialValue::FirstIndex => {
                spinner.set_index(0);
            }
            InitialValue::Value(value) => {
                spinner.set_value(&value);
            }
            InitialValue::Untouched => {}
        }
        if disabled {
            spinner.disable();
        }
        Ok(spinner)
    }

    pub fn value(&self) -> SpinValue {
        let inner = self.inner.borrow();
        inner.values.get(inner.index)
    }

    pub fn index(&self) -> usize {
        self.inner.borrow().index
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_disabled(&self) -> bool {
        self.inner.borrow().disabled
    }

    pub fn is_moving(&self) -> bool {
        self.inner.borrow().moving
    }

    pub fn labels(&self) -> Vec<String> {
        self.inner.borrow().labels.clone()
    }

    /// Hint for the selected value when hints are configured, otherwise
    /// the value's display text.
    pub fn display_text(&self) -> String {
        let inner = self.inner.borrow();
        inner
            .hints
            .as_ref()
            .and_then(|hints| hints.get(inner.index).cloned())
            .unwrap_or_else(|| inner.values.get(inner.index).to_string())
    }

    /// Selects the value at `index` and spins the strip to it. Requests
    /// out of range are ignored. Returns the selected index afterwards.
    pub fn set_index(&self, index: usize) -> usize {
        let (target_offset, duration_ms, current);
        {
            let mut inner = self.inner.borrow_mut();
            if inner.destroyed || index >= inner.values.len() {
                return inner.index;
            }
            target_offset = inner.position_at_index(index);
            duration_ms = adjusted_duration(
                inner.config.easing_duration_ms,
                inner.index,
                index,
                inner.values.len(),
            );
            if index != inner.index {
                let old_offset = inner.offset;
                inner.index = index;
                self.defer(
                    &inner.runtime,
                    DeferredEvent::Spin(target_offset - old_offset),
                );
                let value = inner.values.get(index);
                self.defer(&inner.runtime, DeferredEvent::Change(value, index));
            }
            current = inner.index;
        }
        self.spin_to(target_offset, duration_ms);
        current
    }

    /// Selects the first value equal to `value`; unknown values leave the
    /// selection alone. Returns the selected value afterwards.
    pub fn set_value(&self, value: &SpinValue) -> SpinValue {
        let position = self.inner.borrow().values.position_of(value);
        if let Some(index) = position {
            self.set_index(index);
        }
        self.value()
    }

    /// Moves the selection by `n` indices. Returns `None`, changing
    /// nothing, if the result would fall outside the sequence.
    pub fn advance(&self, n: i64) -> Option<SpinValue> {
        let (index, len) = {
            let inner = self.inner.borrow();
            (inner.index as i64, inner.values.len() as i64)
        };
        let target = index + n;
        if target < 0 || target >= len {
            return None;
        }
        self.set_index(target as usize);
        Some(self.value())
    }

    pub fn next(&self) -> Option<SpinValue> {
        self.advance(1)
    }

    pub fn prev(&self) -> Option<SpinValue> {
        self.advance(-1)
    }

    pub fn first(&self) -> SpinValue {
        self.set_index(0);
        self.value()
    }

    pub fn last(&self) -> SpinValue {
        let last = self.len().saturating_sub(1);
        self.set_index(last);
        self.value()
    }

    /// Advances one index, wrapping to the first after the last.
    pub fn toggle(&self) -> SpinValue {
        let (index, len) = {
            let inner = self.inner.borrow();
            (inner.index, inner.values.len())
        };
        let target = if index + 1 < len { index + 1 } else { 0 };
        self.set_index(target);
        self.value()
    }

    /// Opens a gesture session. Any in-flight settle is cancelled and its
    /// current offset adopted as the drag origin.
    pub fn pointer_down(&self, sample: &PointerSample) {
        let animator;
        {
            let mut inner = self.inner.borrow_mut();
            if inner.disabled || inner.destroyed || inner.session.is_some() {
                return;
            }
            inner.moving = false;
            inner.session = Some(GestureSession::begin(sample, inner.index));
            animator = inner.animator.clone();
            self.defer(&inner.runtime, DeferredEvent::SpinBegin);
        }
        animator.cancel();
    }

    /// Feeds a move sample into the open session, if any.
    pub fn pointer_move(&self, sample: &PointerSample) -> MoveOutcome {
        let (new_offset, delta, surface);
        {
            let mut inner = self.inner.borrow_mut();
            if inner.disabled || inner.destroyed {
                return MoveOutcome::Ignored;
            }
            let bounds = inner.geometry.bounds();
            let bounciness = inner.config.bounciness;
            let offset = inner.offset;
            let outcome = match inner.session.as_mut() {
                Some(session) => session.on_move(sample, offset, bounds, bounciness),
                None => return MoveOutcome::Ignored,
            };
            let MoveOutcome::Moved { offset, delta: moved_by } = outcome else {
                return outcome;
            };
            inner.moving = true;
            inner.offset = offset;
            new_offset = offset;
            delta = moved_by;
            surface = Rc::clone(&inner.surface);
            self.defer(&inner.runtime, DeferredEvent::Spin(delta));
        }
        surface.set_offset(new_offset);
        MoveOutcome::Moved {
            offset: new_offset,
            delta,
        }
    }

    /// Closes the gesture session. Returns `true` when the release ended a
    /// drag (the caller should then swallow any synthetic click).
    pub fn pointer_up(&self) -> bool {
        enum Release {
            Tap,
            NoSnap,
            Snap { target_offset: f32, duration_ms: u64 },
        }
        let release;
        let mut pending_selection = None;
        {
            let mut inner = self.inner.borrow_mut();
            if inner.destroyed {
                return false;
            }
            let Some(session) = inner.session.take() else {
                return false;
            };
            if inner.disabled {
                return false;
            }
            if !session.is_dragging() {
                release = Release::Tap;
            } else if !inner.config.enable_snap {
                let index = inner.geometry.index_for_offset(inner.offset);
                if index != session.start_index() {
                    inner.index = index;
                    let value = inner.values.get(index);
                    self.defer(&inner.runtime, DeferredEvent::Change(value, index));
                    if let Some(swap) = inner.selection_swap(index) {
                        pending_selection = Some((Rc::clone(&inner.surface), swap));
                    }
                }
                inner.moving = false;
                self.defer(&inner.runtime, DeferredEvent::SpinEnd);
                release = Release::NoSnap;
            } else {
                let (last_delta_px, last_delta_ms) = session.last_motion();
                let projection = project(
                    last_delta_px,
                    last_delta_ms,
                    inner.offset,
                    session.start_index(),
                    inner.config.acceleration,
                    inner.config.align_to_edge,
                    inner.values.len(),
                    &*inner.geometry,
                );
                let duration_ms = adjusted_duration(
                    inner.config.easing_duration_ms,
                    inner.index,
                    projection.target_index,
                    inner.values.len(),
                );
                if projection.target_index != session.start_index() {
                    let value = inner.values.get(projection.target_index);
                    self.defer(
                        &inner.runtime,
                        DeferredEvent::Change(value, projection.target_index),
                    );
                }
                inner.index = projection.target_index;
                release = Release::Snap {
                    target_offset: projection.target_offset,
                    duration_ms,
                };
            }
        }
        if let Some((surface, (previous, current))) = pending_selection {
            surface.set_selected(previous, current);
        }
        match release {
            Release::Tap => false,
            Release::NoSnap => true,
            Release::Snap {
                target_offset,
                duration_ms,
            } => {
                self.spin_to(target_offset, duration_ms);
                true
            }
        }
    }

    /// Default click behavior: jump to the clicked label, or invert the
    /// selection when configured as a toggle. The user click callback runs
    /// first and may suppress this by returning `false`.
    pub fn click(&self, target: ClickTarget) {
        if !self.click_permitted() {
            return;
        }
        let callbacks = self.callbacks();
        if let Some(on_click) = &callbacks.on_click {
            if !on_click(&target) {
                return;
            }
        }
        let ClickTarget::Label(index) = target else {
            return;
        };
        let (spin_to_click, enable_toggle, current) = {
            let inner = self.inner.borrow();
            (
                inner.config.spin_to_click,
                inner.config.enable_toggle,
                inner.index,
            )
        };
        if spin_to_click && index != current {
            self.set_index(index);
        } else if enable_toggle {
            self.toggle();
        }
    }

    pub fn disable(&self) {
        let surface = {
            let mut inner = self.inner.borrow_mut();
            if inner.destroyed {
                return;
            }
            inner.disabled = true;
            Rc::clone(&inner.surface)
        };
        surface.set_disabled(true);
    }

    pub fn enable(&self) {
        let surface = {
            let mut inner = self.inner.borrow_mut();
            if inner.destroyed {
                return;
            }
            inner.disabled = false;
            Rc::clone(&inner.surface)
        };
        surface.set_disabled(false);
    }

    /// Adopts a remeasured geometry and re-centers the current selection.
    /// Toggle spinners keep their fixed layout and only swap the geometry.
    pub fn relayout(&self, geometry: Rc<dyn Geometry>) {
        let current = {
            let mut inner = self.inner.borrow_mut();
            if inner.destroyed {
                return;
            }
            inner.geometry = geometry;
            if inner.config.kind == SpinnerKind::Toggle {
                return;
            }
            inner.index
        };
        self.set_index(current);
    }

    /// Tears the control down: the open session and any in-flight settle
    /// are dropped and no further callbacks fire. Subsequent calls are
    /// no-ops.
    pub fn destroy(&self) {
        let animator = {
            let mut inner = self.inner.borrow_mut();
            if inner.destroyed {
                return;
            }
            inner.destroyed = true;
            inner.session = None;
            inner.callbacks = Rc::new(SpinCallbacks::default());
            inner.animator.clone()
        };
        animator.cancel();
    }

    /// Click admission shared with the toggle wrapper: disabled and
    /// destroyed controls ignore clicks, and the synthetic click that
    /// trails a drag is swallowed while clearing the moving flag.
    pub(crate) fn click_permitted(&self) -> bool {
        let mut inner = self.inner.borrow_mut();
        if inner.disabled || inner.destroyed {
            return false;
        }
        if inner.moving {
            inner.moving = false;
            return false;
        }
        true
    }

    pub(crate) fn callbacks(&self) -> Rc<SpinCallbacks> {
        Rc::clone(&self.inner.borrow().callbacks)
    }

    fn spin_to(&self, target_offset: f32, duration_ms: u64) {
        let (animator, from, plan, easing, surface);
        {
            let inner = self.inner.borrow();
            if inner.destroyed {
                return;
            }
            let at_boundary = inner.index == 0 || inner.index + 1 == inner.values.len();
            let bounce_px = bounce_amount(
                inner.config.bounciness,
                target_offset - inner.offset,
                at_boundary,
            );
            plan = SettlePlan {
                target_offset,
                duration_ms,
                bounce_px,
            };
            animator = inner.animator.clone();
            easing = inner.config.easing;
            from = inner.offset;
            surface = Rc::clone(&inner.surface);
        }

        let offset_weak = Rc::downgrade(&self.inner);
        let offset_surface = Rc::clone(&surface);
        let complete_weak = Rc::downgrade(&self.inner);
        animator.settle(
            from,
            plan,
            easing,
            move |offset| {
                offset_surface.set_offset(offset);
                if let Some(inner) = offset_weak.upgrade() {
                    if let Ok(mut inner) = inner.try_borrow_mut() {
                        inner.offset = offset;
                    }
                }
            },
            move || {
                let Some(inner_rc) = complete_weak.upgrade() else {
                    return;
                };
                let (surface, callbacks, selection) = {
                    let mut inner = inner_rc.borrow_mut();
                    if inner.destroyed {
                        return;
                    }
                    inner.moving = false;
                    let index = inner.index;
                    let selection = inner.selection_swap(index);
                    (
                        Rc::clone(&inner.surface),
                        Rc::clone(&inner.callbacks),
                        selection,
                    )
                };
                if let Some((previous, current)) = selection {
                    surface.set_selected(previous, current);
                }
                if let Some(on_spin_end) = &callbacks.on_spin_end {
                    on_spin_end();
                }
            },
        );
    }
}
