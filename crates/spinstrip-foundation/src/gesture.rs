//! Per-gesture drag tracking.
//!
//! A [`GestureSession`] lives from pointer-down to pointer-up. It decides
//! whether the gesture is a horizontal drag at all, converts accepted
//! samples into damped offset deltas, and remembers the last accepted
//! delta and its timing for the momentum projection at release.

use crate::geometry::SlideBounds;
use crate::pointer::{PointerFamily, PointerSample};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GesturePhase {
    /// Pointer is down but no direction has been committed yet.
    Tracking,
    /// Horizontal drag in progress.
    Dragging,
    /// First movement was vertical; the rest of the gesture is dead.
    Rejected,
}

/// Result of feeding one move sample into the session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveOutcome {
    /// Sample had no effect (wrong family, zero movement, or clamped out).
    Ignored,
    /// The gesture is vertical; the caller should let it scroll the page.
    Rejected,
    /// The strip moved. `offset` is the new translation, `delta` the
    /// damped pixel change that produced it.
    Moved { offset: f32, delta: f32 },
}

pub struct GestureSession {
    phase: GesturePhase,
    family: PointerFamily,
    start_x: f32,
    start_y: f32,
    last_x: f32,
    last_time_ms: u64,
    start_index: usize,
    last_delta_px: f32,
    last_delta_ms: f32,
}

impl GestureSession {
    pub fn begin(sample: &PointerSample, start_index: usize) -> Self {
        Self {
            phase: GesturePhase::Tracking,
            family: sample.family,
            start_x: sample.x,
            start_y: sample.y,
            last_x: sample.x,
            last_time_ms: sample.time_ms,
            start_index,
            last_delta_px: 0.0,
            last_delta_ms: 0.0,
        }
    }

    pub fn family(&self) -> PointerFamily {
        self.family
    }

    pub fn start_index(&self) -> usize {
        self.start_index
    }

    pub fn is_dragging(&self) -> bool {
        self.phase == GesturePhase::Dragging
    }

    /// Last accepted delta in pixels and the milliseconds it took, for
    /// velocity estimation. Damping is already applied to the delta.
    pub fn last_motion(&self) -> (f32, f32) {
        (self.last_delta_px, self.last_delta_ms)
    }

    pub fn on_move(
        &mut self,
        sample: &PointerSample,
        current_offset: f32,
        bounds: SlideBounds,
        bounciness: f32,
    ) -> MoveOutcome {
        if sample.family != self.family {
            return MoveOutcome::Ignored;
        }
        match self.phase {
            GesturePhase::Rejected => return MoveOutcome::Rejected,
            GesturePhase::Tracking => {
                let dx = sample.x - self.start_x;
                let dy = sample.y - self.start_y;
                if dx == 0.0 && dy == 0.0 {
                    return MoveOutcome::Ignored;
                }
                if 1.5 * dy.abs() > dx.abs() {
                    self.phase = GesturePhase::Rejected;
                    return MoveOutcome::Rejected;
                }
                self.phase = GesturePhase::Dragging;
            }
            GesturePhase::Dragging => {}
        }

        let mut delta = sample.x - self.last_x;
        if delta == 0.0 {
            return MoveOutcome::Ignored;
        }

        // Resistance past the end points: a third of the movement, rounded
        // toward zero.
        let past_end = (delta > 0.0 && current_offset >= bounds.min_slide)
            || (delta < 0.0 && current_offset <= bounds.max_slide);
        if past_end {
            delta = (delta / 3.0).trunc();
        }

        let mut new_offset = current_offset + delta;
        if bounciness == 0.0 {
            new_offset = new_offset.min(bounds.min_slide).max(bounds.max_slide);
            if new_offset == current_offset {
                return MoveOutcome::Ignored;
            }
            delta = new_offset - current_offset;
        }

        self.last_delta_px = delta;
        self.last_delta_ms = (sample.time_ms.saturating_sub(self.last_time_ms)) as f32;
        self.last_x = sample.x;
        self.last_time_ms = sample.time_ms;
        MoveOutcome::Moved {
            offset: new_offset,
            delta,
        }
    }
}
