//! Construction-time errors.
//!
//! Steady-state operations never fail: out-of-range requests clamp or
//! no-op. Only configuration that leaves the widget unable to exist in a
//! valid state is reported, and always immediately at construction.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("value sequence must contain at least one value")]
    EmptyValues,
    #[error("toggle spinner requires exactly two values, got {0}")]
    ToggleArity(usize),
}
