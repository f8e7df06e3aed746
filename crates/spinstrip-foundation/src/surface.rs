//! Rendering seam.

/// Receives visual state changes from the spinner core. Implementations
/// apply them to whatever actually draws the strip; the core never holds a
/// reference to anything renderable beyond this trait.
pub trait SpinSurface {
    /// Strip translation changed. Called for every animation tick and
    /// every accepted drag delta.
    fn set_offset(&self, offset: f32);

    /// Selection highlight moved from `previous` to `current`. Only called
    /// when a selected-style is configured and the index changed.
    fn set_selected(&self, previous: Option<usize>, current: usize);

    fn set_disabled(&self, disabled: bool);
}
