//! Two-state toggle built on the spinner.
//!
//! A toggle is a spinner over exactly two values with a fixed
//! configuration: edge alignment, no bounce, a short transition, and
//! clicks anywhere flipping the selection.

use crate::config::{SpinnerConfig, SpinnerKind};
use crate::error::ConfigError;
use crate::events::SpinCallbacks;
use crate::geometry::Geometry;
use crate::pointer::ClickTarget;
use crate::range::ValueSource;
use crate::spinner::Spinner;
use crate::surface::SpinSurface;
use crate::value::SpinValue;
use spinstrip_core::RuntimeHandle;
use std::ops::Deref;
use std::rc::Rc;

pub struct ToggleSpinner {
    spinner: Spinner,
}

impl ToggleSpinner {
    /// Builds a toggle over exactly two values. `config` supplies the
    /// caller-tunable options; the toggle-defining ones are forced here.
    pub fn new(
        values: Vec<SpinValue>,
        geometry: Rc<dyn Geometry>,
        surface: Rc<dyn SpinSurface>,
        runtime: RuntimeHandle,
        mut config: SpinnerConfig,
        callbacks: SpinCallbacks,
    ) -> Result<ToggleSpinner, ConfigError> {
        if values.len() != 2 {
            return Err(ConfigError::ToggleArity(values.len()));
        }
        // Label clicks jump only when the caller asked for toggling to be
        // click-driven; the whole control toggles either way.
        config.spin_to_click = config.enable_toggle;
        config.kind = SpinnerKind::Toggle;
        config.align_to_edge = true;
        config.enable_toggle = true;
        config.bounciness = 0.0;
        config.easing_duration_ms = 50;
        config.style.selected_class = String::new();

        let spinner = Spinner::new(
            ValueSource::Explicit(values),
            geometry,
            surface,
            runtime,
            config,
            callbacks,
        )?;
        Ok(ToggleSpinner { spinner })
    }

    /// A click anywhere on the control flips it. The user click callback
    /// still runs; its return value cannot reinstate the label-jump
    /// default.
    pub fn click(&self, target: ClickTarget) {
        if !self.spinner.click_permitted() {
            return;
        }
        self.spinner.toggle();
        let callbacks = self.spinner.callbacks();
        if let Some(on_click) = &callbacks.on_click {
            on_click(&target);
        }
    }

    pub fn is_on(&self) -> bool {
        self.spinner.index() == 1
    }
}

impl Deref for ToggleSpinner {
    type Target = Spinner;

    fn deref(&self) -> &Spinner {
        &self.spinner
    }
}
