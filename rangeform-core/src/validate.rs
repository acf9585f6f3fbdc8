//! Range validation — configuration problems and value-range problems.
//!
//! No errors are thrown anywhere in here: a missing or inconsistent
//! configuration is a reportable condition, collected as human-readable
//! strings. Settings problems make the control unusable and disable it;
//! value problems are transient and only alert.

use crate::config::{RangeSettings, SliderValue};

/// Validation outcome for one render pass. Pure: identical inputs always
/// produce identical output.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Validation {
    /// Configuration problems; interaction is blocked while any exist.
    pub settings: Vec<String>,
    /// Out-of-range value problems; alert only.
    pub values: Vec<String>,
}

impl Validation {
    pub fn run(settings: &RangeSettings, value: &SliderValue) -> Self {
        Self {
            settings: settings_problems(settings, value),
            values: value_problems(settings, value),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.settings.is_empty() && self.values.is_empty()
    }

    pub fn has_settings_problems(&self) -> bool {
        !self.settings.is_empty()
    }

    /// Settings problems joined for the alert region.
    pub fn settings_message(&self) -> Option<String> {
        join(&self.settings)
    }

    /// Value problems joined for the alert region.
    pub fn values_message(&self) -> Option<String> {
        join(&self.values)
    }
}

fn join(problems: &[String]) -> Option<String> {
    if problems.is_empty() {
        None
    } else {
        Some(problems.join(", "))
    }
}

fn settings_problems(settings: &RangeSettings, value: &SliderValue) -> Vec<String> {
    let mut problems = Vec::new();

    if settings.maximum.is_none() {
        problems.push("Maximum value is required".to_string());
    }
    if settings.minimum.is_none() {
        problems.push("Minimum value is required".to_string());
    }
    if let SliderValue::Range { lower, upper } = value {
        if lower.is_none() {
            problems.push("Lower bound value is required".to_string());
        }
        if upper.is_none() {
            problems.push("Upper bound value is required".to_string());
        }
    }
    if let (Some(min), Some(max)) = (settings.minimum, settings.maximum) {
        if min >= max {
            problems.push(format!(
                "Minimum value {min} should be less than the maximum value {max}"
            ));
        }
    }
    // NaN steps fail this comparison too and get reported.
    if !(settings.step > 0.0) {
        problems.push(format!(
            "Step value {} should be greater than 0",
            settings.step
        ));
    } else if let (Some(min), Some(max)) = (settings.minimum, settings.maximum) {
        if (max - min) % settings.step > 0.0 {
            problems.push(format!(
                "Step value is invalid, max - min ({max} - {min}) should be evenly divisible by the step value {}",
                settings.step
            ));
        }
    }

    problems
}

fn value_problems(settings: &RangeSettings, value: &SliderValue) -> Vec<String> {
    let (Some(min), Some(max)) = (settings.minimum, settings.maximum) else {
        return Vec::new();
    };

    let mut problems = Vec::new();
    match value {
        SliderValue::Single(Some(v)) => bound_problems(&mut problems, "Value", *v, min, max),
        SliderValue::Single(None) => {}
        SliderValue::Range { lower, upper } => {
            if let Some(v) = lower {
                bound_problems(&mut problems, "Lower bound", *v, min, max);
            }
            if let Some(v) = upper {
                bound_problems(&mut problems, "Upper bound", *v, min, max);
            }
        }
    }
    problems
}

fn bound_problems(problems: &mut Vec<String>, quantity: &str, v: f64, min: f64, max: f64) {
    if v > max {
        problems.push(format!(
            "{quantity} {v} should be less than the maximum {max}"
        ));
    }
    if v < min {
        problems.push(format!(
            "{quantity} {v} should be greater than the minimum {min}"
        ));
    }
}
