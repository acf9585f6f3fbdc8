//! Widget configuration — property sheets, resolved settings, form files.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::binding::{DataSource, ObjectId};

/// One handle, or a lower/upper pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SliderMode {
    #[default]
    Single,
    Range,
}

/// Track direction on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

/// Property sheet for one slider instance, as a form author writes it.
///
/// Numeric bounds come from named attributes on the bound object and may be
/// unset at runtime; only the step carries a static fallback. An empty
/// tooltip template suppresses the tooltip entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliderSpec {
    pub label: String,
    pub object: ObjectId,
    #[serde(default)]
    pub mode: SliderMode,
    #[serde(default)]
    pub value_attribute: Option<String>,
    #[serde(default)]
    pub lower_bound_attribute: Option<String>,
    #[serde(default)]
    pub upper_bound_attribute: Option<String>,
    #[serde(default)]
    pub min_attribute: Option<String>,
    #[serde(default)]
    pub max_attribute: Option<String>,
    #[serde(default)]
    pub step_attribute: Option<String>,
    /// Static step, used when no step attribute is named or it is unset.
    #[serde(default = "default_step")]
    pub step_value: f64,
    #[serde(default = "default_marker_count")]
    pub marker_count: u32,
    #[serde(default)]
    pub decimal_places: u32,
    /// Tooltip template; `{1}` is replaced with the handle value.
    #[serde(default = "default_tooltip")]
    pub tooltip: String,
    #[serde(default)]
    pub orientation: Orientation,
    #[serde(default)]
    pub read_only: bool,
    /// Action to invoke against the bound object when an edit is committed.
    #[serde(default)]
    pub on_change: Option<String>,
}

fn default_step() -> f64 {
    1.0
}

fn default_marker_count() -> u32 {
    2
}

fn default_tooltip() -> String {
    "{1}".to_string()
}

impl SliderSpec {
    pub fn new(label: impl Into<String>, object: ObjectId) -> Self {
        Self {
            label: label.into(),
            object,
            mode: SliderMode::Single,
            value_attribute: None,
            lower_bound_attribute: None,
            upper_bound_attribute: None,
            min_attribute: None,
            max_attribute: None,
            step_attribute: None,
            step_value: default_step(),
            marker_count: default_marker_count(),
            decimal_places: 0,
            tooltip: default_tooltip(),
            orientation: Orientation::Horizontal,
            read_only: false,
            on_change: None,
        }
    }

    /// Every attribute this slider reads; subscription targets.
    pub fn bound_attributes(&self) -> Vec<&str> {
        [
            &self.value_attribute,
            &self.lower_bound_attribute,
            &self.upper_bound_attribute,
            &self.min_attribute,
            &self.max_attribute,
            &self.step_attribute,
        ]
        .into_iter()
        .filter_map(|a| a.as_deref())
        .collect()
    }

    /// The attributes this slider writes in its current mode.
    pub fn edited_attributes(&self) -> Vec<&str> {
        let names = match self.mode {
            SliderMode::Single => vec![&self.value_attribute],
            SliderMode::Range => vec![&self.lower_bound_attribute, &self.upper_bound_attribute],
        };
        names.into_iter().filter_map(|a| a.as_deref()).collect()
    }

    /// Resolve the numeric configuration for one render pass. Minimum and
    /// maximum stay unset when their attributes are missing or empty; the
    /// step falls back to the static `step_value`.
    pub fn resolve_settings(&self, source: &dyn DataSource) -> RangeSettings {
        RangeSettings {
            minimum: self.attribute_value(source, self.min_attribute.as_deref()),
            maximum: self.attribute_value(source, self.max_attribute.as_deref()),
            step: self
                .attribute_value(source, self.step_attribute.as_deref())
                .unwrap_or(self.step_value),
            marker_count: self.marker_count,
            decimal_places: self.decimal_places,
        }
    }

    /// Resolve the current bound value(s) for one render pass.
    pub fn resolve_value(&self, source: &dyn DataSource) -> SliderValue {
        match self.mode {
            SliderMode::Single => {
                SliderValue::Single(self.attribute_value(source, self.value_attribute.as_deref()))
            }
            SliderMode::Range => SliderValue::Range {
                lower: self.attribute_value(source, self.lower_bound_attribute.as_deref()),
                upper: self.attribute_value(source, self.upper_bound_attribute.as_deref()),
            },
        }
    }

    fn attribute_value(&self, source: &dyn DataSource, attribute: Option<&str>) -> Option<f64> {
        attribute.and_then(|a| source.get_number(self.object, a))
    }
}

/// Numeric configuration resolved for a single render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeSettings {
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub step: f64,
    pub marker_count: u32,
    pub decimal_places: u32,
}

/// Current bound value(s), recomputed every render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SliderValue {
    Single(Option<f64>),
    Range {
        lower: Option<f64>,
        upper: Option<f64>,
    },
}

impl SliderValue {
    /// Whether every value the mode needs is present.
    pub fn is_defined(&self) -> bool {
        match self {
            SliderValue::Single(v) => v.is_some(),
            SliderValue::Range { lower, upper } => lower.is_some() && upper.is_some(),
        }
    }
}

/// Seed data for one object in a form definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectSeed {
    pub id: ObjectId,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    #[serde(default)]
    pub readonly: Vec<String>,
}

/// A whole form: seeded objects plus the sliders bound to them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormDefinition {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub objects: Vec<ObjectSeed>,
    #[serde(default)]
    pub sliders: Vec<SliderSpec>,
}

fn default_title() -> String {
    "Rangeform".to_string()
}

#[derive(Debug, Error)]
pub enum FormError {
    #[error("failed to read form definition {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse form definition {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

impl FormDefinition {
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Load a definition from a TOML file.
    pub fn load(path: &Path) -> Result<Self, FormError> {
        let text = std::fs::read_to_string(path).map_err(|source| FormError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&text).map_err(|source| FormError::Parse {
            path: path.display().to_string(),
            source,
        })
    }
}
