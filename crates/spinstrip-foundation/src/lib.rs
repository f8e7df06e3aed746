//! Foundation elements for spinstrip: values, gestures, and the spinner
//! control.
//!
//! The crate converts raw pointer samples into a continuously updated
//! visual offset and a discrete selected index, with momentum projection,
//! edge resistance, and snap-to-value settling. Rendering stays behind the
//! [`SpinSurface`] and [`Geometry`] collaborator traits.

pub mod config;
pub mod error;
pub mod events;
pub mod geometry;
pub mod gesture;
pub mod pointer;
pub mod projector;
pub mod range;
pub mod spinner;
pub mod surface;
pub mod toggle;
pub mod value;

pub use config::{InitialValue, LabelSpec, SpinnerConfig, SpinnerKind, StyleOptions, TextListSpec};
pub use error::ConfigError;
pub use events::SpinCallbacks;
pub use geometry::{Alignment, Geometry, SlideBounds, StripGeometry};
pub use gesture::{GestureSession, MoveOutcome};
pub use pointer::{ClickTarget, PointerFamily, PointerSample};
pub use projector::{project, projected_displacement, Projection};
pub use range::{build_range, ValueSource, Values};
pub use spinner::Spinner;
pub use surface::SpinSurface;
pub use toggle::ToggleSpinner;
pub use value::SpinValue;

pub mod prelude {
    pub use crate::config::{InitialValue, LabelSpec, SpinnerConfig, SpinnerKind};
    pub use crate::error::ConfigError;
    pub use crate::events::SpinCallbacks;
    pub use crate::geometry::{Alignment, Geometry, SlideBounds, StripGeometry};
    pub use crate::pointer::{ClickTarget, PointerFamily, PointerSample};
    pub use crate::range::ValueSource;
    pub use crate::spinner::Spinner;
    pub use crate::surface::SpinSurface;
    pub use crate::toggle::ToggleSpinner;
    pub use crate::value::SpinValue;
}
