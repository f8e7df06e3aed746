//! Plain-data pointer input.

/// Input device class a gesture session is bound to. Samples from the
/// other family are ignored for the session's duration, which filters the
/// synthetic mouse events some platforms emit after touch input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerFamily {
    Touch,
    Mouse,
}

/// One pointer observation in container coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub x: f32,
    pub y: f32,
    pub time_ms: u64,
    pub family: PointerFamily,
}

impl PointerSample {
    pub fn new(x: f32, y: f32, time_ms: u64, family: PointerFamily) -> Self {
        Self { x, y, time_ms, family }
    }
}

/// What a click landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// A label in the strip.
    Label(usize),
    /// The control chrome outside the labels.
    Control,
}
