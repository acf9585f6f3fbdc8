//! Built-in demo form — four sliders over three data objects, plus a demo
//! action runner.
//!
//! Used when the app starts without a form file, and as the fixture for the
//! integration tests.

use std::collections::HashMap;

use rangeform_core::action::{ActionError, ActionRunner};
use rangeform_core::binding::ObjectId;
use rangeform_core::config::{FormDefinition, ObjectSeed, Orientation, SliderMode, SliderSpec};

const MIXER: ObjectId = ObjectId(1);
const PRICING: ObjectId = ObjectId(2);
const AMP: ObjectId = ObjectId(3);

/// The demo form definition.
pub fn definition() -> FormDefinition {
    FormDefinition {
        title: "Rangeform demo".to_string(),
        objects: vec![
            ObjectSeed {
                id: MIXER,
                attributes: [
                    ("volume", "40"),
                    ("volume_min", "0"),
                    ("volume_max", "100"),
                    ("opacity", "0.5"),
                    ("opacity_min", "0"),
                    ("opacity_max", "1"),
                ]
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
                readonly: Vec::new(),
            },
            ObjectSeed {
                id: PRICING,
                attributes: [
                    ("floor", "20"),
                    ("ceiling", "80"),
                    ("price_min", "0"),
                    ("price_max", "100"),
                    ("price_step", "10"),
                ]
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
                readonly: Vec::new(),
            },
            ObjectSeed {
                id: AMP,
                attributes: [("gain", "5"), ("gain_min", "0"), ("gain_max", "10")]
                    .into_iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
                readonly: vec!["gain".to_string()],
            },
        ],
        sliders: vec![
            volume_slider(),
            price_band_slider(),
            opacity_slider(),
            gain_slider(),
        ],
    }
}

fn volume_slider() -> SliderSpec {
    let mut spec = SliderSpec::new("Volume", MIXER);
    spec.value_attribute = Some("volume".into());
    spec.min_attribute = Some("volume_min".into());
    spec.max_attribute = Some("volume_max".into());
    spec.step_value = 5.0;
    spec.marker_count = 5;
    spec.tooltip = "{1}%".into();
    spec.on_change = Some("volume_changed".into());
    spec
}

fn price_band_slider() -> SliderSpec {
    let mut spec = SliderSpec::new("Price band", PRICING);
    spec.mode = SliderMode::Range;
    spec.lower_bound_attribute = Some("floor".into());
    spec.upper_bound_attribute = Some("ceiling".into());
    spec.min_attribute = Some("price_min".into());
    spec.max_attribute = Some("price_max".into());
    spec.step_attribute = Some("price_step".into());
    spec.marker_count = 5;
    spec.tooltip = "Price: {1}".into();
    spec.on_change = Some("price_changed".into());
    spec
}

fn opacity_slider() -> SliderSpec {
    let mut spec = SliderSpec::new("Opacity", MIXER);
    spec.value_attribute = Some("opacity".into());
    spec.min_attribute = Some("opacity_min".into());
    spec.max_attribute = Some("opacity_max".into());
    spec.step_value = 0.25;
    spec.marker_count = 5;
    spec.decimal_places = 2;
    spec
}

fn gain_slider() -> SliderSpec {
    let mut spec = SliderSpec::new("Gain (locked)", AMP);
    spec.value_attribute = Some("gain".into());
    spec.min_attribute = Some("gain_min".into());
    spec.max_attribute = Some("gain_max".into());
    spec.marker_count = 3;
    spec.orientation = Orientation::Vertical;
    spec.read_only = true;
    spec
}

/// Demo action runner: records every invocation and fails the ones it was
/// told to fail. The demo form wires `price_changed` to a failure so the
/// alert surface is visible out of the box.
#[derive(Debug, Default)]
pub struct DemoActions {
    invoked: Vec<(String, ObjectId)>,
    failing: HashMap<String, String>,
}

impl DemoActions {
    pub fn new() -> Self {
        let mut actions = Self::default();
        actions.fail_with("price_changed", "price service rejected the update");
        actions
    }

    /// Make `action` fail with `message` from now on.
    pub fn fail_with(&mut self, action: &str, message: &str) {
        self.failing.insert(action.to_string(), message.to_string());
    }

    /// How many times `action` has run (including failed runs).
    pub fn count(&self, action: &str) -> usize {
        self.invoked.iter().filter(|(name, _)| name == action).count()
    }

    pub fn invocations(&self) -> &[(String, ObjectId)] {
        &self.invoked
    }
}

impl ActionRunner for DemoActions {
    fn invoke(&mut self, action: &str, target: ObjectId) -> Result<(), ActionError> {
        self.invoked.push((action.to_string(), target));
        match self.failing.get(action) {
            Some(message) => Err(ActionError {
                action: action.to_string(),
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_form_is_internally_consistent() {
        let form = definition();
        let objects: Vec<ObjectId> = form.objects.iter().map(|o| o.id).collect();
        for slider in &form.sliders {
            assert!(
                objects.contains(&slider.object),
                "slider {} binds a missing object",
                slider.label
            );
            for attribute in slider.bound_attributes() {
                let seed = form
                    .objects
                    .iter()
                    .find(|o| o.id == slider.object)
                    .unwrap();
                assert!(
                    seed.attributes.contains_key(attribute),
                    "slider {} binds missing attribute {attribute}",
                    slider.label
                );
            }
        }
    }

    #[test]
    fn demo_actions_record_and_fail() {
        let mut actions = DemoActions::new();
        assert!(actions.invoke("volume_changed", ObjectId(1)).is_ok());
        assert!(actions.invoke("price_changed", ObjectId(2)).is_err());
        assert_eq!(actions.count("volume_changed"), 1);
        assert_eq!(actions.count("price_changed"), 1);
        assert_eq!(actions.invocations().len(), 2);
    }
}
