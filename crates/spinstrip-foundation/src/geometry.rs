//! Index <-> pixel-offset mapping over the label strip.
//!
//! All conversions go through the [`Geometry`] trait so the spinner core
//! never measures anything itself; [`StripGeometry`] is the concrete
//! implementation over a list of per-label widths.

use smallvec::SmallVec;

/// How a label sits at its resting offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    /// Label center at the container center.
    Center,
    /// Label leading edge at the container leading edge.
    Edge,
}

/// Inclusive offset range a drag may occupy. `min_slide` is the largest
/// (rightmost) offset, `max_slide` the smallest; offsets shrink as the
/// strip moves left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideBounds {
    pub min_slide: f32,
    pub max_slide: f32,
}

/// Layout oracle for the spinner core.
pub trait Geometry {
    /// Resting offset that brings label `index` to its aligned position.
    fn offset_for_index(&self, index: usize, alignment: Alignment) -> f32;

    /// Label index a free offset resolves to.
    fn index_for_offset(&self, offset: f32) -> usize;

    /// Nearest edge-aligned resting offset at or left of `offset`.
    fn align_offset(&self, offset: f32) -> f32;

    fn bounds(&self) -> SlideBounds;

    fn container_width(&self) -> f32;
}

/// Geometry over an explicit list of label widths inside a fixed-width
/// container. Widths include any surrounding margins.
pub struct StripGeometry {
    widths: SmallVec<[f32; 16]>,
    container_width: f32,
    align_to_edge: bool,
}

impl StripGeometry {
    pub fn new(
        widths: impl IntoIterator<Item = f32>,
        container_width: f32,
        align_to_edge: bool,
    ) -> Self {
        let widths: SmallVec<[f32; 16]> = widths.into_iter().collect();
        if widths.iter().any(|w| *w <= 0.0) {
            log::warn!("strip geometry given a non-positive label width");
        }
        Self {
            widths,
            container_width,
            align_to_edge,
        }
    }

    pub fn uniform(width: f32, count: usize, container_width: f32, align_to_edge: bool) -> Self {
        Self::new(std::iter::repeat(width).take(count), container_width, align_to_edge)
    }

    fn strip_width(&self) -> f32 {
        self.widths.iter().sum()
    }

    fn width_at(&self, index: usize) -> f32 {
        self.widths.get(index).copied().unwrap_or(0.0)
    }
}

impl Geometry for StripGeometry {
    fn offset_for_index(&self, index: usize, alignment: Alignment) -> f32 {
        let (mut x, multiplier) = match alignment {
            Alignment::Center => ((self.container_width / 2.0).floor(), 0.5),
            Alignment::Edge => (0.0, 1.0),
        };
        let mut last = 0.0;
        for j in 0..=index.min(self.widths.len().saturating_sub(1)) {
            last = self.width_at(j);
            x -= last;
        }
        (x + multiplier * last).floor()
    }

    fn index_for_offset(&self, offset: f32) -> usize {
        let mut x = offset;
        let mut i = 0usize;
        if self.align_to_edge {
            // The loop condition reads the previous label's width, starting
            // from the first label's width negated. Kept as-is: resting
            // edge-aligned offsets resolve to themselves under it.
            let mut last = -self.width_at(0);
            while x < 0.5 * last && i < self.widths.len() {
                last = self.width_at(i);
                x += last;
                i += 1;
            }
        } else {
            let threshold = 0.5 * self.container_width;
            while x < threshold && i < self.widths.len() {
                x += self.width_at(i);
                i += 1;
            }
        }
        i.saturating_sub(1)
    }

    fn align_offset(&self, offset: f32) -> f32 {
        let left_edge = self.container_width - self.strip_width();
        if offset < left_edge {
            return left_edge;
        }
        let mut x = offset;
        let mut w = 0.0;
        let mut last = self.width_at(0);
        let mut i = 0usize;
        while x < -0.5 * last && i < self.widths.len() {
            last = self.width_at(i);
            x += last;
            w -= last;
            i += 1;
        }
        w
    }

    fn bounds(&self) -> SlideBounds {
        let strip = self.strip_width();
        if self.align_to_edge {
            SlideBounds {
                min_slide: 0.0,
                max_slide: self.container_width - strip,
            }
        } else {
            let first = self.widths.first().copied().unwrap_or(0.0);
            let last = self.widths.last().copied().unwrap_or(0.0);
            SlideBounds {
                min_slide: (0.5 * (self.container_width - first)).floor(),
                max_slide: -(strip - 0.5 * (self.container_width + last)).floor(),
            }
        }
    }

    fn container_width(&self) -> f32 {
        self.container_width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn centered() -> StripGeometry {
        StripGeometry::uniform(30.0, 11, 300.0, false)
    }

    fn edge_aligned() -> StripGeometry {
        StripGeometry::uniform(30.0, 11, 300.0, true)
    }

    #[test]
    fn centered_resting_offsets() {
        let geometry = centered();
        assert_eq!(geometry.offset_for_index(0, Alignment::Center), 135.0);
        assert_eq!(geometry.offset_for_index(5, Alignment::Center), -15.0);
        assert_eq!(geometry.offset_for_index(10, Alignment::Center), -165.0);
    }

    #[test]
    fn centered_bounds_match_end_offsets() {
        let geometry = centered();
        let bounds = geometry.bounds();
        assert_eq!(bounds.min_slide, geometry.offset_for_index(0, Alignment::Center));
        assert_eq!(bounds.max_slide, geometry.offset_for_index(10, Alignment::Center));
    }

    #[test]
    fn centered_offsets_round_trip() {
        let geometry = centered();
        for index in 0..11 {
            let offset = geometry.offset_for_index(index, Alignment::Center);
            assert_eq!(geometry.index_for_offset(offset), index, "index {index}");
        }
    }

    #[test]
    fn centered_free_offsets_resolve_to_nearest_label() {
        let geometry = centered();
        assert_eq!(geometry.index_for_offset(-16.0), 5);
        assert_eq!(geometry.index_for_offset(-29.0), 5);
        assert_eq!(geometry.index_for_offset(-31.0), 6);
    }

    #[test]
    fn offset_beyond_either_end_clamps() {
        let geometry = centered();
        assert_eq!(geometry.index_for_offset(500.0), 0);
        assert_eq!(geometry.index_for_offset(-500.0), 10);
    }

    #[test]
    fn edge_resting_offsets() {
        let geometry = edge_aligned();
        assert_eq!(geometry.offset_for_index(0, Alignment::Edge), 0.0);
        assert_eq!(geometry.offset_for_index(1, Alignment::Edge), -30.0);
        assert_eq!(geometry.offset_for_index(10, Alignment::Edge), -300.0);
    }

    #[test]
    fn edge_bounds() {
        let geometry = edge_aligned();
        let bounds = geometry.bounds();
        assert_eq!(bounds.min_slide, 0.0);
        assert_eq!(bounds.max_slide, -30.0);
    }

    #[test]
    fn align_offset_snaps_to_label_edges() {
        let geometry = StripGeometry::uniform(30.0, 5, 100.0, true);
        assert_eq!(geometry.align_offset(0.0), 0.0);
        assert_eq!(geometry.align_offset(-10.0), 0.0);
        assert_eq!(geometry.align_offset(-16.0), -30.0);
        assert_eq!(geometry.align_offset(-46.0), -60.0);
    }

    #[test]
    fn align_offset_clamps_to_strip_left_edge() {
        let geometry = edge_aligned();
        assert_eq!(geometry.align_offset(-400.0), -30.0);
    }

    #[test]
    fn edge_resting_offsets_resolve_to_themselves() {
        let geometry = edge_aligned();
        for index in 0..11 {
            let offset = geometry.offset_for_index(index, Alignment::Edge);
            let aligned = geometry.align_offset(offset);
            assert_eq!(geometry.index_for_offset(aligned), geometry.index_for_offset(offset));
        }
    }

    #[test]
    fn uneven_widths() {
        let geometry = StripGeometry::new([40.0, 20.0, 60.0], 200.0, false);
        // 100 - 40 + 20 = 80
        assert_eq!(geometry.offset_for_index(0, Alignment::Center), 80.0);
        // 100 - 60 + 10 = 50
        assert_eq!(geometry.offset_for_index(1, Alignment::Center), 50.0);
        // 100 - 120 + 30 = 10
        assert_eq!(geometry.offset_for_index(2, Alignment::Center), 10.0);
        let bounds = geometry.bounds();
        assert_eq!(bounds.min_slide, 80.0);
        assert_eq!(bounds.max_slide, 10.0);
    }
}
