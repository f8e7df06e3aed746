//! Momentum projection at gesture release.
//!
//! Turns the last accepted drag delta into a landing offset and index.
//! The model is constant deceleration: displacement = v^2 / a, with the
//! deceleration scaled by the container width and the configured
//! acceleration factor.

use crate::geometry::{Alignment, Geometry};

/// Landing spot the release should settle toward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub target_index: usize,
    pub target_offset: f32,
}

/// Signed pixels the strip would coast after release.
pub fn projected_displacement(speed: f32, acceleration: f32, container_width: f32) -> f32 {
    let deceleration = (0.00005 / (1.0 + acceleration.abs()) * container_width).max(1e-4);
    speed.signum() * (speed * speed / deceleration).floor()
}

/// Projects the landing index and offset for a released drag.
///
/// `last_delta_px` and `last_delta_ms` come from the gesture session's
/// final accepted move. In centered mode a release with meaningful speed
/// always travels at least one index; edge mode lands on whatever label
/// edge the coast reaches.
#[allow(clippy::too_many_arguments)]
pub fn project(
    last_delta_px: f32,
    last_delta_ms: f32,
    current_offset: f32,
    start_index: usize,
    acceleration: f32,
    align_to_edge: bool,
    values_len: usize,
    geometry: &dyn Geometry,
) -> Projection {
    let elapsed = if last_delta_ms > 0.0 { last_delta_ms } else { 1.0 };
    let speed = last_delta_px / elapsed;
    let displacement = projected_displacement(speed, acceleration, geometry.container_width());
    let projected = current_offset + displacement;

    if align_to_edge {
        let target_offset = geometry.align_offset(projected);
        return Projection {
            target_index: geometry.index_for_offset(target_offset),
            target_offset,
        };
    }

    let mut index = geometry.index_for_offset(projected);
    // A flick that would land back on the starting value still advances
    // one step.
    if index == start_index && speed.abs() > 0.1 {
        if speed > 0.0 {
            index = index.saturating_sub(1);
        } else {
            index = (index + 1).min(values_len.saturating_sub(1));
        }
    }
    Projection {
        target_index: index,
        target_offset: geometry.offset_for_index(index, Alignment::Center),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::StripGeometry;

    fn centered() -> StripGeometry {
        // 11 labels, 30px each, in a 300px container.
        StripGeometry::uniform(30.0, 11, 300.0, false)
    }

    #[test]
    fn displacement_scales_with_speed_squared() {
        // speed 2 px/ms, acceleration 1, container 300:
        // deceleration = 0.00005 / 2 * 300 = 0.0075; 4 / 0.0075 = 533.33.
        assert_eq!(projected_displacement(2.0, 1.0, 300.0), 533.0);
        assert_eq!(projected_displacement(-2.0, 1.0, 300.0), -533.0);
    }

    #[test]
    fn deceleration_never_vanishes() {
        // A zero-width container would otherwise divide by zero.
        assert_eq!(projected_displacement(1.0, 1.0, 0.0), 10000.0);
    }

    #[test]
    fn fast_leftward_flick_lands_several_indices_on() {
        let geometry = centered();
        // Released at index 5 (offset -15) with -20px over 10ms.
        let projection = project(-20.0, 10.0, -15.0, 5, 1.0, false, 11, &geometry);
        // Projected offset -548 resolves past the end; clamp to last index.
        assert_eq!(projection.target_index, 10);
        assert_eq!(projection.target_offset, -165.0);
    }

    #[test]
    fn slow_release_with_speed_still_moves_one_step() {
        let geometry = centered();
        // Tiny displacement keeps the index at 5, but speed exceeds 0.1.
        let projection = project(-2.0, 10.0, -15.0, 5, 1.0, false, 11, &geometry);
        assert_eq!(projection.target_index, 6);
        assert_eq!(projection.target_offset, -45.0);
    }

    #[test]
    fn negligible_speed_snaps_back() {
        let geometry = centered();
        let projection = project(-0.5, 10.0, -16.0, 5, 1.0, false, 11, &geometry);
        assert_eq!(projection.target_index, 5);
        assert_eq!(projection.target_offset, -15.0);
    }

    #[test]
    fn zero_elapsed_time_does_not_blow_up() {
        let geometry = centered();
        let projection = project(-20.0, 0.0, -15.0, 5, 1.0, false, 11, &geometry);
        assert_eq!(projection.target_index, 10);
    }

    #[test]
    fn edge_mode_lands_on_a_label_edge() {
        let geometry = StripGeometry::uniform(30.0, 5, 100.0, true);
        let fast = project(-10.0, 1.0, -10.0, 0, 1.0, true, 5, &geometry);
        // A long coast clamps to the strip's left edge.
        assert_eq!(fast.target_offset, -50.0);
        let slow = project(-1.0, 10.0, -10.0, 0, 1.0, true, 5, &geometry);
        // A short coast settles back on the nearest label edge.
        assert_eq!(slow.target_offset, 0.0);
        assert_eq!(slow.target_index, 0);
    }
}
