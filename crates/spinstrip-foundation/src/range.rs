//! Value-sequence construction.
//!
//! `build_range` produces inclusive numeric ranges with the float-drift
//! correction the step's own precision implies; [`ValueSource`] is the
//! tagged construction request resolved once at the call boundary into an
//! immutable [`Values`] sequence.

use crate::error::ConfigError;
use crate::value::SpinValue;
use std::rc::Rc;

/// Index domain used when a generator source does not name its own count.
const DEFAULT_GENERATOR_COUNT: usize = 101;

/// Builds the inclusive `[start, end]` range walked by `step`.
///
/// A step opposing the direction of `end - start` is flipped so the walk
/// is constructible; `step == 0` yields an empty sequence. Fractional
/// steps are rounded to the step's own decimal precision on every
/// iteration, so `build_range(0.0, 1.0, 0.1)` never accumulates binary
/// float error. Whole-number walks produce integer values.
pub fn build_range(start: f64, end: f64, step: f64) -> Vec<SpinValue> {
    if step == 0.0 {
        return Vec::new();
    }
    let step = if (start <= end && step < 0.0) || (start >= end && step > 0.0) {
        -step
    } else {
        step
    };

    let step_text = step.to_string();
    match step_text.find('.') {
        Some(dot) => {
            let decimals = (step_text.len() - dot - 1) as i32;
            let factor = 10f64.powi(decimals);
            let tolerance = 0.5 / factor;
            let mut out = Vec::new();
            let mut current = start;
            loop {
                let snapped = (current * factor).round() / factor;
                let past_end = if step > 0.0 {
                    snapped > end + tolerance
                } else {
                    snapped < end - tolerance
                };
                if past_end {
                    break;
                }
                out.push(SpinValue::Float(snapped));
                current = snapped + step;
            }
            out
        }
        None => {
            let (mut current, end, step) = (start.trunc() as i64, end.trunc() as i64, step as i64);
            let mut out = Vec::new();
            while if step > 0 { current <= end } else { current >= end } {
                out.push(SpinValue::Int(current));
                current += step;
            }
            out
        }
    }
}

/// Tagged construction request for the value sequence. Resolved exactly
/// once, before any core logic runs.
#[derive(Clone)]
pub enum ValueSource {
    /// The historical default: integers 0 through 100.
    Default,
    /// Integers 1 through `max`.
    FixedMax(f64),
    /// `min` through `max`, step 1.
    Range { min: f64, max: f64 },
    /// `min` through `max` walked by `step`.
    SteppedRange { min: f64, max: f64, step: f64 },
    /// Caller-supplied sequence, used as-is.
    Explicit(Vec<SpinValue>),
    /// Lazily produced values over a fixed index domain.
    Generator {
        produce: Rc<dyn Fn(usize) -> SpinValue>,
        count: Option<usize>,
    },
}

impl ValueSource {
    pub fn resolve(self) -> Result<Values, ConfigError> {
        let backing = match self {
            ValueSource::Default => Backing::List(build_range(0.0, 100.0, 1.0)),
            ValueSource::FixedMax(max) => Backing::List(build_range(1.0, max, 1.0)),
            ValueSource::Range { min, max } => Backing::List(build_range(min, max, 1.0)),
            ValueSource::SteppedRange { min, max, step } => {
                Backing::List(build_range(min, max, step))
            }
            ValueSource::Explicit(values) => Backing::List(values),
            ValueSource::Generator { produce, count } => Backing::Lazy {
                produce,
                count: count.unwrap_or(DEFAULT_GENERATOR_COUNT),
            },
        };
        let values = Values { backing };
        if values.len() == 0 {
            return Err(ConfigError::EmptyValues);
        }
        Ok(values)
    }
}

enum Backing {
    List(Vec<SpinValue>),
    Lazy {
        produce: Rc<dyn Fn(usize) -> SpinValue>,
        count: usize,
    },
}

/// Immutable ordered sequence of selectable values. Invariant: never
/// empty after construction.
pub struct Values {
    backing: Backing,
}

impl Values {
    pub fn len(&self) -> usize {
        match &self.backing {
            Backing::List(values) => values.len(),
            Backing::Lazy { count, .. } => *count,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> SpinValue {
        match &self.backing {
            Backing::List(values) => values[index].clone(),
            Backing::Lazy { produce, .. } => produce(index),
        }
    }

    /// Index of the first value equal to `value`, if any.
    pub fn position_of(&self, value: &SpinValue) -> Option<usize> {
        (0..self.len()).find(|&index| self.get(index) == *value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floats(values: &[SpinValue]) -> Vec<f64> {
        values
            .iter()
            .map(|value| match value {
                SpinValue::Float(f) => *f,
                SpinValue::Int(i) => *i as f64,
                SpinValue::Text(_) => panic!("unexpected text value"),
            })
            .collect()
    }

    #[test]
    fn inclusive_integer_range() {
        let range = build_range(1.0, 10.0, 1.0);
        assert_eq!(floats(&range), (1..=10).map(f64::from).collect::<Vec<_>>());
        assert!(matches!(range[0], SpinValue::Int(1)));
    }

    #[test]
    fn opposing_step_is_flipped() {
        assert_eq!(
            floats(&build_range(10.0, 1.0, 1.0)),
            (1..=10).rev().map(f64::from).collect::<Vec<_>>()
        );
    }

    #[test]
    fn fractional_steps_do_not_drift() {
        let range = build_range(0.0, 1.0, 0.25);
        assert_eq!(floats(&range), vec![0.0, 0.25, 0.5, 0.75, 1.0]);

        let tenths = build_range(0.0, 0.5, 0.1);
        assert_eq!(floats(&tenths), vec![0.0, 0.1, 0.2, 0.3, 0.4, 0.5]);
    }

    #[test]
    fn degenerate_ranges() {
        assert_eq!(floats(&build_range(7.0, 7.0, 1.0)), vec![7.0]);
        assert!(build_range(1.0, 10.0, 0.0).is_empty());
    }

    #[test]
    fn default_source_is_0_to_100() {
        let values = ValueSource::Default.resolve().unwrap();
        assert_eq!(values.len(), 101);
        assert_eq!(values.get(0), SpinValue::Int(0));
        assert_eq!(values.get(100), SpinValue::Int(100));
    }

    #[test]
    fn empty_explicit_sequence_is_rejected() {
        assert_eq!(
            ValueSource::Explicit(Vec::new()).resolve().err(),
            Some(ConfigError::EmptyValues)
        );
    }

    #[test]
    fn generator_defaults_to_0_to_100_domain() {
        let values = ValueSource::Generator {
            produce: Rc::new(|index| SpinValue::Int(index as i64 * 2)),
            count: None,
        }
        .resolve()
        .unwrap();
        assert_eq!(values.len(), 101);
        assert_eq!(values.get(3), SpinValue::Int(6));
        assert_eq!(values.position_of(&SpinValue::Int(6)), Some(3));
    }

    #[test]
    fn position_of_finds_first_match() {
        let values = ValueSource::Explicit(vec![
            SpinValue::from("a"),
            SpinValue::from("b"),
            SpinValue::from("b"),
        ])
        .resolve()
        .unwrap();
        assert_eq!(values.position_of(&SpinValue::from("b")), Some(1));
        assert_eq!(values.position_of(&SpinValue::from("z")), None);
    }
}
