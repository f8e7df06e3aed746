//! Per-instance configuration, merged from defaults and caller overrides
//! at construction. Mutating it afterwards is unsupported.

use crate::range::Values;
use crate::value::SpinValue;
use spinstrip_animation::Easing;

/// Which control flavor the configuration drives. The toggle flavor uses
/// edge alignment unconditionally when positioning labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpinnerKind {
    #[default]
    Standard,
    Toggle,
}

/// Label content for the strip.
#[derive(Debug, Clone)]
pub enum LabelSpec {
    /// Render each value's display text.
    FromValues,
    /// Render blank labels (the strip still has geometry).
    Hidden,
    /// Explicit label list; missing entries render empty.
    List(Vec<String>),
    /// `'|'`-delimited string; a short pattern repeats across the values.
    Delimited(String),
}

impl LabelSpec {
    pub fn resolve(&self, values: &Values) -> Vec<String> {
        let count = values.len();
        match self {
            LabelSpec::FromValues => (0..count).map(|i| values.get(i).to_string()).collect(),
            LabelSpec::Hidden => vec![" ".to_owned(); count],
            LabelSpec::List(labels) => (0..count)
                .map(|i| labels.get(i).cloned().unwrap_or_default())
                .collect(),
            LabelSpec::Delimited(text) => {
                let parts: Vec<&str> = text.split('|').collect();
                if parts.is_empty() {
                    return vec![String::new(); count];
                }
                (0..count).map(|i| parts[i % parts.len()].to_owned()).collect()
            }
        }
    }
}

/// A list of display strings supplied either directly or as a
/// `'|'`-delimited string. Used for hints.
#[derive(Debug, Clone)]
pub enum TextListSpec {
    List(Vec<String>),
    Delimited(String),
}

impl TextListSpec {
    pub fn resolve(&self) -> Vec<String> {
        match self {
            TextListSpec::List(items) => items.clone(),
            TextListSpec::Delimited(text) => text.split('|').map(str::to_owned).collect(),
        }
    }
}

/// Initial selection behavior at construction.
#[derive(Debug, Clone, Default)]
pub enum InitialValue {
    /// Select index 0 (the default).
    #[default]
    FirstIndex,
    /// Leave the selection untouched; no initial transition is issued.
    Untouched,
    /// Select the first value equal to this one.
    Value(SpinValue),
}

/// Style identifiers and free-form CSS maps carried for the rendering
/// integration; the core only reads `selected_class` emptiness to gate
/// highlight swaps.
#[derive(Debug, Clone)]
pub struct StyleOptions {
    pub spin_class: String,
    pub thumb_class: String,
    pub label_class: String,
    pub selected_class: String,
    pub labels_div_class: String,
    pub disabled_class: String,
    pub spin_css: Vec<(String, String)>,
    pub thumb_css: Vec<(String, String)>,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self {
            spin_class: "spin".to_owned(),
            thumb_class: "spinThumb".to_owned(),
            label_class: "spinLabel".to_owned(),
            selected_class: "selected".to_owned(),
            labels_div_class: "spinLabelsDiv".to_owned(),
            disabled_class: "spinDisabled".to_owned(),
            spin_css: Vec::new(),
            thumb_css: Vec::new(),
        }
    }
}

#[derive(Clone)]
pub struct SpinnerConfig {
    pub kind: SpinnerKind,
    pub easing: Easing,
    pub easing_duration_ms: u64,
    pub labels: LabelSpec,
    /// Clicking a label spins to it.
    pub spin_to_click: bool,
    /// Snap to a value after the user finishes sliding.
    pub enable_snap: bool,
    /// Label clicks invert the selection instead of jumping to the label.
    pub enable_toggle: bool,
    /// Display substitutions shown in place of raw values.
    pub hints: Option<TextListSpec>,
    pub initial_value: InitialValue,
    pub disabled: bool,
    /// Bounce factor in relation to the distance moved; 0 disables the
    /// rubber-band and hard-clamps drags at the boundaries.
    pub bounciness: f32,
    /// Momentum acceleration factor.
    pub acceleration: f32,
    /// Align the selected item's edge to the container edge instead of
    /// centering it.
    pub align_to_edge: bool,
    pub style: StyleOptions,
}

impl Default for SpinnerConfig {
    fn default() -> Self {
        Self {
            kind: SpinnerKind::Standard,
            easing: Easing::EaseOut,
            easing_duration_ms: 350,
            labels: LabelSpec::FromValues,
            spin_to_click: true,
            enable_snap: true,
            enable_toggle: false,
            hints: None,
            initial_value: InitialValue::FirstIndex,
            disabled: false,
            bounciness: 0.2,
            acceleration: 1.0,
            align_to_edge: false,
            style: StyleOptions::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::ValueSource;

    fn three_values() -> Values {
        ValueSource::Explicit(vec![
            SpinValue::Int(1),
            SpinValue::Int(2),
            SpinValue::Int(3),
        ])
        .resolve()
        .unwrap()
    }

    #[test]
    fn labels_from_values() {
        let labels = LabelSpec::FromValues.resolve(&three_values());
        assert_eq!(labels, vec!["1", "2", "3"]);
    }

    #[test]
    fn short_delimited_pattern_repeats() {
        let labels = LabelSpec::Delimited("on|off".to_owned()).resolve(&three_values());
        assert_eq!(labels, vec!["on", "off", "on"]);
    }

    #[test]
    fn explicit_list_pads_with_empty() {
        let labels = LabelSpec::List(vec!["a".to_owned()]).resolve(&three_values());
        assert_eq!(labels, vec!["a", "", ""]);
    }

    #[test]
    fn hints_split_on_pipe() {
        let hints = TextListSpec::Delimited("low|mid|high".to_owned()).resolve();
        assert_eq!(hints, vec!["low", "mid", "high"]);
    }
}
